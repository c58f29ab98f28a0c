pub mod grid;
pub mod launch;
pub mod list;
