use crate::launcher::CommandFactory;
use crate::{Error, Result};
use lutui_types::{Catalog, CatalogEntry, EntryId};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Anything that can produce the ordered list of installed games.
pub trait CatalogSource: Send + Sync {
    fn fetch_all(&self) -> Result<Vec<CatalogEntry>>;
}

/// Thin wrapper over the `lutris` executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LutrisClient {
    lutris_path: PathBuf,
}

impl LutrisClient {
    /// Use `explicit` if given, otherwise search `PATH` for `lutris`.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(Error::ExecutableNotFound(path.display().to_string()));
            }
            return Ok(Self::with_path(path));
        }

        let path = find_in_path("lutris")
            .ok_or_else(|| Error::ExecutableNotFound("no 'lutris' on PATH".to_string()))?;
        debug!(path = %path.display(), "discovered lutris");
        Ok(Self::with_path(path))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            lutris_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.lutris_path
    }

    pub fn launch_uri(id: EntryId) -> String {
        format!("lutris:rungameid/{}", id)
    }
}

impl CatalogSource for LutrisClient {
    fn fetch_all(&self) -> Result<Vec<CatalogEntry>> {
        let output = Command::new(&self.lutris_path)
            .args(["--list-games", "--json", "--installed"])
            .stdin(Stdio::null())
            .output()?;

        if !output.status.success() {
            return Err(Error::CommandFailed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let entries = parse_listing(&stdout)?;
        debug!(count = entries.len(), "fetched lutris catalog");
        Ok(entries)
    }
}

impl CommandFactory for LutrisClient {
    fn command(&self, entry: &CatalogEntry) -> Command {
        let mut command = Command::new(&self.lutris_path);
        command.arg(Self::launch_uri(entry.id));
        command
    }
}

/// Decode `lutris --list-games --json` output.
///
/// Lutris may print log lines before the JSON document, so decoding starts
/// at the first line that opens an array.
pub fn parse_listing(stdout: &str) -> Result<Vec<CatalogEntry>> {
    let start = stdout
        .lines()
        .scan(0usize, |offset, line| {
            let here = *offset;
            *offset += line.len() + 1;
            Some((here, line))
        })
        .find(|(_, line)| line.trim_start().starts_with('['))
        .map(|(offset, _)| offset)
        .unwrap_or(0);

    let entries: Vec<CatalogEntry> = serde_json::from_str(stdout.get(start..).unwrap_or(stdout))?;
    Ok(entries)
}

fn find_in_path(name: &str) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// In-memory catalog, mainly for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: Vec<CatalogEntry>,
}

impl StaticCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }
}

impl CatalogSource for StaticCatalog {
    fn fetch_all(&self) -> Result<Vec<CatalogEntry>> {
        Ok(self.entries.clone())
    }
}

/// Catalog read from a JSON file in the `lutris --list-games --json` format.
/// The file is re-read on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for JsonFileCatalog {
    fn fetch_all(&self) -> Result<Vec<CatalogEntry>> {
        let catalog = Catalog::load_json_file(&self.path)?;
        Ok(catalog.entries().to_vec())
    }
}
