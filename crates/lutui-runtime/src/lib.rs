//! Runtime side of lutui: everything that touches the OS.
//!
//! - [`supervisor`]: launches games in their own process group and kills the
//!   whole tree on request
//! - [`lutris`]: discovers the `lutris` executable and fetches the catalog
//! - [`launcher`]: how a catalog entry becomes a [`std::process::Command`]
//! - [`config`]: data directory resolution and `config.toml`

pub mod config;
pub mod error;
pub mod launcher;
pub mod lutris;
pub mod supervisor;

pub use config::{Config, GridConfig, LutrisConfig, UiConfig, resolve_data_dir};
pub use error::{Error, Result};
pub use launcher::CommandFactory;
pub use lutris::{CatalogSource, JsonFileCatalog, LutrisClient, StaticCatalog};
pub use supervisor::{
    ExitReport, ExitState, ProcessHandle, ProcessSupervisor, SupervisorError, Waiter,
};
