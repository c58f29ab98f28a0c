use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use lutui_types::CatalogEntry;

use super::{CELL_BG, FG_DIM, FG_NORMAL};

/// Details of the selected game.
pub struct GameStatsView<'a> {
    entry: Option<&'a CatalogEntry>,
}

impl<'a> GameStatsView<'a> {
    pub fn new(entry: Option<&'a CatalogEntry>) -> Self {
        Self { entry }
    }
}

fn key_value<'a>(key: &'a str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{}:", key), Style::default().fg(FG_NORMAL)),
        Span::raw(" "),
        Span::styled(value, Style::default().fg(FG_DIM)),
    ])
}

impl<'a> Widget for GameStatsView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::TOP).title(Span::styled(
            "Game Stats",
            Style::default().fg(CELL_BG).add_modifier(Modifier::BOLD),
        ));

        let Some(entry) = self.entry else {
            Paragraph::new(Span::styled("Nothing selected", Style::default().fg(FG_DIM)))
                .block(block)
                .render(area, buf);
            return;
        };

        let mut lines = vec![
            key_value("name", &entry.name),
            key_value("platform", entry.platform.as_deref().unwrap_or("")),
            key_value("runner", entry.runner.as_deref().unwrap_or("")),
        ];
        if let Some(last_played) = &entry.lastplayed {
            lines.push(key_value("last played", last_played));
        }
        if let Some(playtime) = &entry.playtime {
            lines.push(key_value("playtime", playtime));
        }
        if entry.is_running {
            lines.push(Line::from(Span::styled(
                "Running",
                Style::default().fg(FG_DIM).add_modifier(Modifier::ITALIC),
            )));
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
