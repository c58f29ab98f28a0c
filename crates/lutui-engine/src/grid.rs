use std::ops::Range;

/// The visible slice of the catalog.
///
/// `start..end` is the half-open range of catalog indices on page
/// `page_index`; `end - start <= page_size` always holds. `total` is the
/// catalog length the window was computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
    pub page_index: usize,
    pub page_size: usize,
    pub total: usize,
}

impl PageWindow {
    /// Number of pages for `total` entries. An empty catalog still has one
    /// (empty) page.
    pub fn page_count(total: usize, page_size: usize) -> usize {
        total.div_ceil(page_size.max(1)).max(1)
    }

    /// Window for `page_index`, clamped to the last page.
    pub fn new(total: usize, page_size: usize, page_index: usize) -> Self {
        let page_size = page_size.max(1);
        let last_page = Self::page_count(total, page_size) - 1;
        let page_index = page_index.min(last_page);
        let start = (page_index * page_size).min(total);
        let end = (start + page_size).min(total);

        Self {
            start,
            end,
            page_index,
            page_size,
            total,
        }
    }

    pub fn first(total: usize, page_size: usize) -> Self {
        Self::new(total, page_size, 0)
    }

    pub fn pages(&self) -> usize {
        Self::page_count(self.total, self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page_index > 0
    }

    pub fn next(&self) -> Self {
        if self.has_next() {
            Self::new(self.total, self.page_size, self.page_index + 1)
        } else {
            *self
        }
    }

    pub fn prev(&self) -> Self {
        if self.has_prev() {
            Self::new(self.total, self.page_size, self.page_index - 1)
        } else {
            *self
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Row/column arrangement of one page.
///
/// Cells hold catalog indices, never copies of entries. Every row except the
/// last is exactly `row_width` long; the last may be shorter. A layout is
/// never mutated after it is built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridLayout {
    rows: Vec<Vec<usize>>,
}

impl GridLayout {
    pub(crate) fn from_range(range: Range<usize>, row_width: usize) -> Self {
        let row_width = row_width.max(1);
        let indices: Vec<usize> = range.collect();
        let rows = indices.chunks(row_width).map(<[usize]>::to_vec).collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<usize>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of `row`, or 0 if the row does not exist.
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<usize> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Catalog indices in display order.
    pub fn flatten(&self) -> Vec<usize> {
        self.rows.iter().flatten().copied().collect()
    }
}

/// Slice `catalog[page_start..page_end]` into rows of at most `row_width`.
///
/// `page_end` is clamped to the catalog length, and `page_start` to
/// `page_end`, so an out-of-range window yields an empty layout rather than
/// a panic.
pub fn compute_layout<T>(
    catalog: &[T],
    page_start: usize,
    page_end: usize,
    row_width: usize,
) -> GridLayout {
    let end = page_end.min(catalog.len());
    let start = page_start.min(end);
    GridLayout::from_range(start..end, row_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_chunks_rows_in_order() {
        let catalog = ['A', 'B', 'C', 'D', 'E'];
        let layout = compute_layout(&catalog, 0, 4, 2);
        assert_eq!(layout.rows(), &[vec![0, 1], vec![2, 3]]);

        let layout = compute_layout(&catalog, 4, 8, 2);
        assert_eq!(layout.rows(), &[vec![4]]);
    }

    #[test]
    fn test_layout_last_row_may_be_short() {
        let catalog: Vec<u32> = (0..7).collect();
        let layout = compute_layout(&catalog, 0, 7, 3);
        assert_eq!(layout.row_count(), 3);
        assert_eq!(layout.row_len(0), 3);
        assert_eq!(layout.row_len(2), 1);
        assert_eq!(layout.row_len(3), 0);
        assert_eq!(layout.cell(2, 0), Some(6));
        assert_eq!(layout.cell(2, 1), None);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let catalog: Vec<u32> = (0..40).collect();
        let a = compute_layout(&catalog, 18, 36, 3);
        let b = compute_layout(&catalog, 18, 36, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_layout_out_of_range_window_is_empty() {
        let catalog = [1, 2, 3];
        assert!(compute_layout(&catalog, 5, 10, 2).is_empty());
        assert!(compute_layout::<u8>(&[], 0, 18, 3).is_empty());
    }

    #[test]
    fn test_zero_row_width_is_treated_as_one() {
        let catalog = [1, 2];
        let layout = compute_layout(&catalog, 0, 2, 0);
        assert_eq!(layout.rows(), &[vec![0], vec![1]]);
    }

    #[test]
    fn test_paginate_and_flatten_round_trips() {
        for total in 1..=30usize {
            let catalog: Vec<usize> = (0..total).collect();
            for page_size in 1..=8 {
                for row_width in 1..=4 {
                    let mut flattened = Vec::new();
                    let mut window = PageWindow::first(total, page_size);
                    loop {
                        let layout =
                            compute_layout(&catalog, window.start, window.end, row_width);
                        assert!(layout.rows().iter().all(|r| r.len() <= row_width));
                        flattened.extend(layout.flatten());
                        if !window.has_next() {
                            break;
                        }
                        window = window.next();
                    }
                    assert_eq!(
                        flattened, catalog,
                        "total={total} page_size={page_size} row_width={row_width}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_page_window_bounds() {
        assert_eq!(PageWindow::page_count(0, 18), 1);
        assert_eq!(PageWindow::page_count(18, 18), 1);
        assert_eq!(PageWindow::page_count(19, 18), 2);

        let window = PageWindow::new(5, 4, 1);
        assert_eq!(window.range(), 4..5);
        assert!(!window.has_next());
        assert!(window.has_prev());
        assert_eq!(window.prev().range(), 0..4);
    }

    #[test]
    fn test_page_window_clamps_to_last_page() {
        let window = PageWindow::new(5, 4, 9);
        assert_eq!(window.page_index, 1);
        assert_eq!(window.next(), window);

        let empty = PageWindow::new(0, 4, 3);
        assert_eq!(empty.page_index, 0);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_page_window_is_monotonic() {
        let mut window = PageWindow::first(50, 7);
        while window.has_next() {
            let next = window.next();
            assert!(next.start >= window.end);
            assert!(next.len() <= next.page_size);
            window = next;
        }
        assert_eq!(window.end, 50);
    }
}
