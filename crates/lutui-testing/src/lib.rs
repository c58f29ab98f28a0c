//! Testing infrastructure for lutui integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `TestWorld`: isolated data dir plus a scriptable fake `lutris`
//! - `fixtures`: sample catalogs in the Lutris JSON format
//! - `process`: liveness checks and background process management

pub mod fixtures;
pub mod process;
pub mod world;

pub use world::{FakeLaunch, TestWorld};
