use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph, Widget},
};

use lutui_engine::GridLayout;
use lutui_types::{Catalog, CatalogEntry};

use super::{CELL_BG, CELL_BG_RUNNING, CELL_BG_SELECTED, FG_DIM, FG_NORMAL};

const CELL_WIDTH: u16 = 24;
const CELL_HEIGHT: u16 = 4;
const CELL_GAP: u16 = 1;

/// One page of the catalog as bordered cells.
pub struct GridView<'a> {
    catalog: &'a Catalog,
    layout: &'a GridLayout,
    selected: Option<usize>,
}

impl<'a> GridView<'a> {
    pub fn new(catalog: &'a Catalog, layout: &'a GridLayout, selected: Option<usize>) -> Self {
        Self {
            catalog,
            layout,
            selected,
        }
    }

    /// Columns needed to show `row_width` cells side by side.
    pub fn width_for(row_width: usize) -> u16 {
        let cells = u16::try_from(row_width).unwrap_or(u16::MAX);
        cells
            .saturating_mul(CELL_WIDTH + CELL_GAP)
            .saturating_sub(CELL_GAP)
    }

    /// Unclipped position of cell `(row, col)` inside `area`.
    pub fn cell_rect(area: Rect, row: usize, col: usize) -> Rect {
        let col = u16::try_from(col).unwrap_or(u16::MAX);
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        Rect::new(
            area.x.saturating_add(col.saturating_mul(CELL_WIDTH + CELL_GAP)),
            area.y.saturating_add(row.saturating_mul(CELL_HEIGHT)),
            CELL_WIDTH,
            CELL_HEIGHT,
        )
    }

    fn cell_style(entry: &CatalogEntry, selected: bool) -> Style {
        // Running wins over selection
        let bg = if entry.is_running {
            CELL_BG_RUNNING
        } else if selected {
            CELL_BG_SELECTED
        } else {
            CELL_BG
        };
        Style::default().fg(FG_NORMAL).bg(bg)
    }
}

impl<'a> Widget for GridView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.layout.is_empty() {
            Paragraph::new(Line::from(vec![
                Span::styled("No installed games found. ", Style::default().fg(FG_NORMAL)),
                Span::styled("Press r to refresh.", Style::default().fg(FG_DIM)),
            ]))
            .render(area, buf);
            return;
        }

        for (row, indices) in self.layout.rows().iter().enumerate() {
            for (col, &index) in indices.iter().enumerate() {
                let Some(entry) = self.catalog.get(index) else {
                    continue;
                };

                let cell = Self::cell_rect(area, row, col).intersection(area);
                if cell.is_empty() {
                    continue;
                }

                let is_selected = self.selected == Some(index);
                let style = Self::cell_style(entry, is_selected);
                let mut block = Block::bordered()
                    .style(style)
                    .padding(Padding::horizontal(1));
                if is_selected {
                    block = block.border_style(style.add_modifier(Modifier::BOLD));
                }

                let detail = if entry.is_running {
                    "running".to_string()
                } else {
                    entry.runner.clone().unwrap_or_default()
                };
                let lines = vec![
                    Line::from(Span::styled(
                        entry.name.as_str(),
                        style.add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(detail, style.fg(FG_DIM))),
                ];

                Paragraph::new(lines).block(block).render(cell, buf);
            }
        }
    }
}
