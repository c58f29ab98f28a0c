//! Sample catalogs.
//!
//! Entries are shaped like `lutris --list-games --json --installed` output so
//! the same data can be served by the fake `lutris` and decoded by the real
//! parser.

use lutui_types::CatalogEntry;

/// Five games, matching the classic two-wide, four-per-page walkthrough:
/// page 0 is `[[A, B], [C, D]]`, page 1 is `[[E]]`.
pub fn five_games() -> Vec<CatalogEntry> {
    ["A", "B", "C", "D", "E"]
        .iter()
        .enumerate()
        .map(|(i, name)| {
            CatalogEntry::new(i as u32 + 1, name.to_lowercase(), *name)
                .with_runner("linux")
                .with_platform("Linux")
        })
        .collect()
}

/// `count` numbered games with ids starting at 100.
pub fn numbered_games(count: usize) -> Vec<CatalogEntry> {
    (0..count)
        .map(|i| {
            CatalogEntry::new(100 + i as u32, format!("game-{:02}", i), format!("Game {:02}", i))
                .with_runner("wine")
        })
        .collect()
}

/// Serialize entries the way Lutris prints them.
pub fn listing_json(entries: &[CatalogEntry]) -> String {
    serde_json::to_string_pretty(entries).expect("catalog entries always serialize")
}

/// A verbatim-style listing with the null and numeric fields Lutris emits.
pub const LUTRIS_LISTING: &str = r#"[
  {
    "id": 1,
    "slug": "celeste",
    "name": "Celeste",
    "runner": "linux",
    "platform": "Linux",
    "year": 2018,
    "directory": "/home/user/Games/celeste",
    "hidden": false,
    "playtime": "3 hours and 12 minutes",
    "lastplayed": "2024-03-01 21:04:11"
  },
  {
    "id": 2,
    "slug": "quake",
    "name": "Quake",
    "runner": "dosbox",
    "platform": "MS-DOS",
    "year": null,
    "directory": null,
    "hidden": false,
    "playtime": 0.5,
    "lastplayed": null
  },
  {
    "id": 3,
    "slug": "hollow-knight",
    "name": "Hollow Knight",
    "runner": "wine",
    "platform": "Windows",
    "year": 2017,
    "directory": "/home/user/Games/hollow-knight",
    "hidden": false,
    "playtime": "",
    "lastplayed": ""
  }
]"#;
