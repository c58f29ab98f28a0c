//! Pure data transforms behind the game grid.
//!
//! [`grid`] turns a flat, ordered catalog into the rows of one page;
//! [`navigation`] is the cursor state machine that walks those rows and
//! pages. Neither module holds state between calls: every layout is
//! recomputed from its inputs, so callers can rebuild freely after a page or
//! catalog change.

pub mod grid;
pub mod navigation;

pub use grid::{GridLayout, PageWindow, compute_layout};
pub use navigation::{CursorPosition, Direction, NavState, NavigationController};
