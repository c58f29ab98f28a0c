use lutui_types::CatalogEntry;
use std::process::Command;

/// Builds the command that starts a catalog entry.
///
/// The supervisor owns stdio and process-group setup; implementations only
/// decide program and arguments.
pub trait CommandFactory {
    fn command(&self, entry: &CatalogEntry) -> Command;
}

impl<F> CommandFactory for F
where
    F: Fn(&CatalogEntry) -> Command,
{
    fn command(&self, entry: &CatalogEntry) -> Command {
        self(entry)
    }
}
