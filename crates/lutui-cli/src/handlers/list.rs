use anyhow::{Context as _, Result};
use is_terminal::IsTerminal;
use lutui_types::CatalogEntry;
use owo_colors::OwoColorize;

use crate::context::ExecutionContext;
use crate::types::OutputFormat;

pub fn handle(ctx: &ExecutionContext, format: OutputFormat) -> Result<()> {
    let source = ctx.catalog_source()?;
    let entries = source
        .fetch_all()
        .context("Failed to load installed games")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Plain => {
            let colored = std::io::stdout().is_terminal();
            if entries.is_empty() {
                println!("No installed games found");
            }
            for entry in &entries {
                println!("{}", format_line(entry, colored));
            }
        }
    }

    Ok(())
}

fn format_line(entry: &CatalogEntry, colored: bool) -> String {
    let id = format!("{:>5}", entry.id.0);
    let runner = entry.runner.as_deref().unwrap_or("-");
    let platform = entry.platform.as_deref().unwrap_or("-");

    if colored {
        format!(
            "{}  {}  {} {}",
            id.dimmed(),
            entry.name.bold(),
            runner.cyan(),
            format!("({})", platform).dimmed()
        )
    } else {
        format!("{}  {}  {} ({})", id, entry.name, runner, platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_layout() {
        let entry = CatalogEntry::new(42, "celeste", "Celeste")
            .with_runner("linux")
            .with_platform("Linux");
        assert_eq!(format_line(&entry, false), "   42  Celeste  linux (Linux)");
    }

    #[test]
    fn test_missing_metadata_uses_dash() {
        let entry = CatalogEntry::new(7, "x", "X");
        assert_eq!(format_line(&entry, false), "    7  X  - (-)");
    }
}
