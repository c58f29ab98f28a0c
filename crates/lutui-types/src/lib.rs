//! Core types shared by the lutui crates.
//!
//! The catalog is the single authoritative owner of every [`CatalogEntry`];
//! other components refer to entries by index or [`EntryId`] and route all
//! mutation of the running flag through the catalog slot.

pub mod catalog;
pub mod error;

pub use catalog::{Catalog, CatalogEntry, EntryId};
pub use error::{Error, Result};
