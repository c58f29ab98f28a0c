use crate::grid::{GridLayout, PageWindow, compute_layout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// `(row, col)` into the current page's [`GridLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    pub row: usize,
    pub col: usize,
}

impl CursorPosition {
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Cursor plus the page it lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    pub cursor: CursorPosition,
    pub page: PageWindow,
}

/// Cursor state machine over a paged grid.
///
/// Transitions are total: every `(state, direction)` pair yields either the
/// same state or one whose cursor addresses a real cell. Page changes always
/// land on the first cell of the new page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationController {
    row_width: usize,
    page_size: usize,
}

impl NavigationController {
    pub fn new(row_width: usize, page_size: usize) -> Self {
        Self {
            row_width: row_width.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn row_width(&self) -> usize {
        self.row_width
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn initial(&self, total: usize) -> NavState {
        NavState {
            cursor: CursorPosition::ORIGIN,
            page: PageWindow::first(total, self.page_size),
        }
    }

    pub fn layout<T>(&self, catalog: &[T], state: &NavState) -> GridLayout {
        compute_layout(catalog, state.page.start, state.page.end, self.row_width)
    }

    pub fn step(&self, state: &NavState, layout: &GridLayout, direction: Direction) -> NavState {
        let NavState { cursor, page } = *state;

        match direction {
            Direction::Down => {
                if layout.cell(cursor.row + 1, cursor.col).is_some() {
                    NavState {
                        cursor: CursorPosition::new(cursor.row + 1, cursor.col),
                        page,
                    }
                } else if page.has_next() {
                    NavState {
                        cursor: CursorPosition::ORIGIN,
                        page: page.next(),
                    }
                } else {
                    *state
                }
            }
            Direction::Up => {
                if cursor.row > 0 {
                    NavState {
                        cursor: CursorPosition::new(cursor.row - 1, cursor.col),
                        page,
                    }
                } else if page.has_prev() {
                    NavState {
                        cursor: CursorPosition::ORIGIN,
                        page: page.prev(),
                    }
                } else {
                    *state
                }
            }
            Direction::Right => {
                if cursor.col + 1 < layout.row_len(cursor.row) {
                    NavState {
                        cursor: CursorPosition::new(cursor.row, cursor.col + 1),
                        page,
                    }
                } else {
                    *state
                }
            }
            Direction::Left => {
                if cursor.col > 0 {
                    NavState {
                        cursor: CursorPosition::new(cursor.row, cursor.col - 1),
                        page,
                    }
                } else {
                    *state
                }
            }
        }
    }

    /// Catalog index under the cursor, `None` only for an empty page.
    pub fn selected(&self, layout: &GridLayout, state: &NavState) -> Option<usize> {
        layout.cell(state.cursor.row, state.cursor.col)
    }

    /// Re-fit `state` after the catalog length changed to `total`.
    ///
    /// The page index is kept if it still exists (otherwise the last page is
    /// used and the cursor resets), and the cursor is pulled back inside the
    /// page's layout.
    pub fn reconcile(&self, state: &NavState, total: usize) -> NavState {
        let page = PageWindow::new(total, self.page_size, state.page.page_index);
        if page.page_index != state.page.page_index {
            return NavState {
                cursor: CursorPosition::ORIGIN,
                page,
            };
        }

        let layout = GridLayout::from_range(page.range(), self.row_width);
        if layout.is_empty() {
            return NavState {
                cursor: CursorPosition::ORIGIN,
                page,
            };
        }

        let row = state.cursor.row.min(layout.row_count() - 1);
        let col = state.cursor.col.min(layout.row_len(row) - 1);
        NavState {
            cursor: CursorPosition::new(row, col),
            page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    fn press(
        nav: &NavigationController,
        catalog: &[char],
        state: NavState,
        direction: Direction,
    ) -> NavState {
        let layout = nav.layout(catalog, &state);
        nav.step(&state, &layout, direction)
    }

    fn selected_of(nav: &NavigationController, catalog: &[char], state: &NavState) -> char {
        let layout = nav.layout(catalog, state);
        catalog[nav.selected(&layout, state).expect("cursor should address a cell")]
    }

    #[test]
    fn test_five_entries_two_wide_four_per_page() {
        let catalog = ['A', 'B', 'C', 'D', 'E'];
        let nav = NavigationController::new(2, 4);

        let state = nav.initial(catalog.len());
        assert_eq!(nav.layout(&catalog, &state).rows(), &[vec![0, 1], vec![2, 3]]);
        assert_eq!(selected_of(&nav, &catalog, &state), 'A');

        let state = press(&nav, &catalog, state, Direction::Right);
        assert_eq!(state.cursor, CursorPosition::new(0, 1));
        assert_eq!(selected_of(&nav, &catalog, &state), 'B');

        let state = press(&nav, &catalog, state, Direction::Down);
        assert_eq!(state.cursor, CursorPosition::new(1, 1));
        assert_eq!(selected_of(&nav, &catalog, &state), 'D');

        let state = press(&nav, &catalog, state, Direction::Down);
        assert_eq!(state.page.page_index, 1);
        assert_eq!(state.cursor, CursorPosition::ORIGIN);
        assert_eq!(nav.layout(&catalog, &state).rows(), &[vec![4]]);
        assert_eq!(selected_of(&nav, &catalog, &state), 'E');
    }

    #[test]
    fn test_right_does_not_wrap() {
        let catalog = ['A', 'B', 'C'];
        let nav = NavigationController::new(2, 4);
        let state = nav.initial(catalog.len());

        let state = press(&nav, &catalog, state, Direction::Right);
        let again = press(&nav, &catalog, state, Direction::Right);
        assert_eq!(again, state);
    }

    #[test]
    fn test_right_is_bounded_by_current_row() {
        let catalog = ['A', 'B', 'C'];
        let nav = NavigationController::new(2, 4);
        let state = nav.initial(catalog.len());

        let state = press(&nav, &catalog, state, Direction::Down);
        assert_eq!(state.cursor, CursorPosition::new(1, 0));
        let again = press(&nav, &catalog, state, Direction::Right);
        assert_eq!(again, state);
    }

    #[test]
    fn test_down_into_short_row_advances_page_when_column_missing() {
        // Page 0: [A B] [C]; the cell under B does not exist.
        let catalog = ['A', 'B', 'C', 'D'];
        let nav = NavigationController::new(2, 3);
        let state = press(&nav, &catalog, nav.initial(4), Direction::Right);

        let state = press(&nav, &catalog, state, Direction::Down);
        assert_eq!(state.page.page_index, 1);
        assert_eq!(selected_of(&nav, &catalog, &state), 'D');
    }

    #[test]
    fn test_down_on_last_row_of_last_page_is_noop() {
        let catalog = ['A', 'B', 'C'];
        let nav = NavigationController::new(3, 18);
        let state = nav.initial(catalog.len());
        assert_eq!(press(&nav, &catalog, state, Direction::Down), state);
    }

    #[test]
    fn test_up_retreats_page_and_resets_cursor() {
        let catalog = ['A', 'B', 'C', 'D', 'E'];
        let nav = NavigationController::new(2, 4);
        let state = NavState {
            cursor: CursorPosition::ORIGIN,
            page: PageWindow::new(5, 4, 1),
        };

        let state = press(&nav, &catalog, state, Direction::Up);
        assert_eq!(state.page.page_index, 0);
        assert_eq!(state.cursor, CursorPosition::ORIGIN);

        let first = press(&nav, &catalog, state, Direction::Up);
        assert_eq!(first, state);
    }

    #[test]
    fn test_left_stops_at_first_column() {
        let catalog = ['A', 'B'];
        let nav = NavigationController::new(2, 4);
        let state = nav.initial(2);
        assert_eq!(press(&nav, &catalog, state, Direction::Left), state);
    }

    #[test]
    fn test_transitions_never_leave_the_grid() {
        let letters: Vec<char> = ('a'..='z').collect();
        for total in 1..=letters.len() {
            let catalog = &letters[..total];
            for row_width in 1..=4 {
                for page_size in 1..=7 {
                    let nav = NavigationController::new(row_width, page_size);
                    let mut frontier = vec![nav.initial(total)];
                    let mut seen = Vec::new();

                    while let Some(state) = frontier.pop() {
                        if seen.contains(&state) {
                            continue;
                        }
                        seen.push(state);
                        let layout = nav.layout(catalog, &state);
                        assert!(nav.selected(&layout, &state).is_some());

                        for direction in ALL {
                            let next = nav.step(&state, &layout, direction);
                            let next_layout = nav.layout(catalog, &next);
                            assert!(
                                nav.selected(&next_layout, &next).is_some(),
                                "{direction:?} from {state:?} left the grid"
                            );
                            if next.page != state.page {
                                assert_eq!(next.cursor, CursorPosition::ORIGIN);
                            }
                            frontier.push(next);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_repeated_down_reaches_last_page_then_stops() {
        let letters: Vec<char> = ('a'..='z').collect();
        for total in 1..=letters.len() {
            let catalog = &letters[..total];
            for row_width in 1..=4 {
                for page_size in 1..=7 {
                    let nav = NavigationController::new(row_width, page_size);
                    let mut state = nav.initial(total);
                    let bound = total.div_ceil(row_width) + PageWindow::page_count(total, page_size);
                    let mut steps = 0;

                    loop {
                        let next = press(&nav, catalog, state, Direction::Down);
                        if next == state {
                            break;
                        }
                        state = next;
                        steps += 1;
                        assert!(steps <= bound, "down did not settle for total={total}");
                    }

                    assert!(!state.page.has_next());
                    let layout = nav.layout(catalog, &state);
                    assert_eq!(state.cursor.row + 1, layout.row_count());
                }
            }
        }
    }

    #[test]
    fn test_empty_catalog_has_no_selection_and_is_inert() {
        let catalog: [char; 0] = [];
        let nav = NavigationController::new(3, 18);
        let state = nav.initial(0);
        let layout = nav.layout(&catalog, &state);
        assert_eq!(nav.selected(&layout, &state), None);
        for direction in ALL {
            assert_eq!(nav.step(&state, &layout, direction), state);
        }
    }

    #[test]
    fn test_reconcile_pulls_cursor_back_inside_shrunk_page() {
        let nav = NavigationController::new(3, 9);
        let state = NavState {
            cursor: CursorPosition::new(2, 2),
            page: PageWindow::new(9, 9, 0),
        };

        let fitted = nav.reconcile(&state, 7);
        assert_eq!(fitted.cursor, CursorPosition::new(2, 0));
        assert_eq!(fitted.page.range(), 0..7);
    }

    #[test]
    fn test_reconcile_resets_when_page_disappears() {
        let nav = NavigationController::new(2, 2);
        let state = NavState {
            cursor: CursorPosition::new(0, 1),
            page: PageWindow::new(6, 2, 2),
        };

        let fitted = nav.reconcile(&state, 3);
        assert_eq!(fitted.page.page_index, 1);
        assert_eq!(fitted.cursor, CursorPosition::ORIGIN);

        let emptied = nav.reconcile(&state, 0);
        assert_eq!(emptied.page.page_index, 0);
        assert_eq!(emptied.cursor, CursorPosition::ORIGIN);
    }
}
