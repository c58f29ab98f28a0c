//! Rendering for the game grid.
//!
//! `draw` is a pure function of the [`AppModel`]: it reads the catalog,
//! layout and status text and never mutates anything.

mod grid_view;
mod stats;
mod status_bar;

pub use grid_view::GridView;
pub use stats::GameStatsView;
pub use status_bar::StatusBarView;

use crate::app::AppModel;
use lutui_runtime::CommandFactory;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Span,
    widgets::Paragraph,
};

pub(crate) const FG_NORMAL: Color = Color::Rgb(0xFF, 0xFF, 0xFF);
pub(crate) const FG_DIM: Color = Color::Rgb(0xA6, 0xA6, 0xA6);
pub(crate) const CELL_BG: Color = Color::Rgb(0x25, 0x76, 0x93);
pub(crate) const CELL_BG_SELECTED: Color = Color::Rgb(0x00, 0x90, 0xC4);
pub(crate) const CELL_BG_RUNNING: Color = Color::Rgb(0x60, 0x3B, 0x6F);

const STATS_WIDTH: u16 = 36;

pub fn draw<F: CommandFactory>(f: &mut Frame, model: &AppModel<F>) {
    let area = f.area();

    // [Grid + Stats | Status bar | Title]
    let chunks = Layout::vertical([
        Constraint::Min(4),
        Constraint::Length(4),
        Constraint::Length(1),
    ])
    .split(area);

    let grid_width = GridView::width_for(model.navigation().row_width());
    let body = Layout::horizontal([
        Constraint::Max(grid_width),
        Constraint::Length(2),
        Constraint::Min(STATS_WIDTH),
    ])
    .split(chunks[0]);

    let layout = model.layout();
    let selected = model.selected_index();
    f.render_widget(GridView::new(model.catalog(), &layout, selected), body[0]);
    f.render_widget(GameStatsView::new(model.selected()), body[2]);
    f.render_widget(StatusBarView::new(model.status(), model.page()), chunks[1]);

    let title = Paragraph::new(Span::styled("  LUTRIS TUI", Style::default().fg(FG_DIM)));
    f.render_widget(title, chunks[2]);
}
