//! Status Bar View Component
//!
//! Renders the page indicator, key help and the last status message.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use lutui_engine::PageWindow;

use super::{FG_DIM, FG_NORMAL};

pub struct StatusBarView<'a> {
    status: &'a str,
    page: &'a PageWindow,
}

impl<'a> StatusBarView<'a> {
    pub fn new(status: &'a str, page: &'a PageWindow) -> Self {
        Self { status, page }
    }
}

impl<'a> Widget for StatusBarView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(FG_DIM));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

        let indicator = format!("{}/{}", self.page.page_index + 1, self.page.pages());
        Paragraph::new(Span::styled(indicator, Style::default().fg(FG_DIM)))
            .centered()
            .render(rows[0], buf);

        let key = Style::default().fg(Color::Yellow);
        let help_line = Line::from(vec![
            Span::styled("[↑/k]", key),
            Span::raw(" up "),
            Span::styled("[↓/j]", key),
            Span::raw(" down "),
            Span::styled("[←/h →/l]", key),
            Span::raw(" move "),
            Span::styled("[enter]", key),
            Span::raw(" start/stop "),
            Span::styled("[r]", key),
            Span::raw("efresh "),
            Span::styled("[q]", key),
            Span::raw("uit"),
        ]);
        Paragraph::new(help_line).render(rows[1], buf);

        Paragraph::new(Span::styled(self.status, Style::default().fg(FG_NORMAL)))
            .render(rows[2], buf);
    }
}
