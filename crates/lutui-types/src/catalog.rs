use crate::Result;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;

/// Stable identity of a game as assigned by Lutris.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u32);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One installed game as reported by `lutris --list-games --json`.
///
/// Everything except `is_running` is immutable identity or display metadata.
/// `is_running` is owned by the process supervisor and is never decoded from
/// JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: EntryId,
    #[serde(default)]
    pub slug: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub runner: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub platform: Option<String>,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub directory: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, deserialize_with = "lenient_text")]
    pub playtime: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub lastplayed: Option<String>,
    #[serde(skip)]
    pub is_running: bool,
}

impl CatalogEntry {
    pub fn new(id: u32, slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: EntryId(id),
            slug: slug.into(),
            name: name.into(),
            runner: None,
            platform: None,
            year: None,
            directory: None,
            hidden: false,
            playtime: None,
            lastplayed: None,
            is_running: false,
        }
    }

    pub fn with_runner(mut self, runner: impl Into<String>) -> Self {
        self.runner = Some(runner.into());
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }
}

/// Lutris has emitted `playtime` both as a preformatted string and as a float
/// of hours across releases. Empty strings are treated as absent.
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// The ordered list of installed games. Order is the order Lutris returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    pub fn load_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut CatalogEntry> {
        self.entries.get_mut(index)
    }

    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn find(&self, id: EntryId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn find_mut(&mut self, id: EntryId) -> Option<&mut CatalogEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// Look an entry up by numeric id first, then by slug.
    pub fn resolve(&self, query: &str) -> Option<usize> {
        if let Ok(id) = query.parse::<u32>()
            && let Some(index) = self.position(EntryId(id))
        {
            return Some(index);
        }
        self.entries.iter().position(|e| e.slug == query)
    }

    /// Replace the entry list with a freshly fetched one.
    ///
    /// Fetched entries never carry a running flag, so it is re-derived from
    /// `is_running` for every id.
    pub fn replace(&mut self, entries: Vec<CatalogEntry>, is_running: impl Fn(EntryId) -> bool) {
        self.entries = entries
            .into_iter()
            .map(|mut entry| {
                entry.is_running = is_running(entry.id);
                entry
            })
            .collect();
    }

    pub fn running_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_running).count()
    }
}

impl From<Vec<CatalogEntry>> for Catalog {
    fn from(entries: Vec<CatalogEntry>) -> Self {
        Self::new(entries)
    }
}
