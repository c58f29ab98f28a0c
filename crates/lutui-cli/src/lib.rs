// NOTE: lutui Architecture
//
// One owner for mutable state:
// - The grid loop thread owns the catalog, the supervisor and the cursor
// - Waiter threads only block on a child and post an ExitReport
// - The refresh thread only fetches and posts the new entry list
// - Everything lands on one mpsc queue and is applied by AppModel::update
//
// Termination addresses the process group, not the pid. Lutris forks
// wrappers and the game itself; killing only the direct child would leave
// the game running with the grid showing it stopped.

mod args;
mod commands;
pub mod app;
pub mod context;
mod handlers;
pub mod logging;
pub mod types;
pub mod ui;

pub use args::{Cli, Commands};
pub use commands::run;
