use crate::args::Cli;
use anyhow::{Context as _, Result};
use lutui_engine::NavigationController;
use lutui_runtime::{
    CatalogSource, Config, JsonFileCatalog, LutrisClient, resolve_data_dir,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Resolved settings for one invocation: data dir, config file and the
/// command-line overrides layered on top of it.
pub struct ExecutionContext {
    data_dir: PathBuf,
    config: Config,
    catalog_path: Option<PathBuf>,
}

impl ExecutionContext {
    pub fn new(cli: &Cli) -> Result<Self> {
        let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
        let config_path = Config::path_in(&data_dir);
        let mut config = Config::load_from(&config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?;

        if let Some(path) = &cli.lutris_path {
            config.lutris.path = Some(path.clone());
        }
        if let Some(row_width) = cli.row_width {
            config.grid.row_width = row_width;
        }
        if let Some(page_size) = cli.page_size {
            config.grid.page_size = page_size;
        }
        config.validate()?;

        Ok(Self {
            data_dir,
            config,
            catalog_path: cli.catalog.clone(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn lutris(&self) -> Result<LutrisClient> {
        Ok(LutrisClient::discover(self.config.lutris.path.as_deref())?)
    }

    /// Where installed games come from: `--catalog` if given, else lutris.
    pub fn catalog_source(&self) -> Result<Arc<dyn CatalogSource>> {
        match &self.catalog_path {
            Some(path) => Ok(Arc::new(JsonFileCatalog::new(path.clone()))),
            None => Ok(Arc::new(self.lutris()?)),
        }
    }

    /// The client used to start games.
    ///
    /// With `--catalog` the listing does not need lutris, so a missing
    /// executable is only reported once a launch actually fails.
    pub fn launcher(&self) -> Result<LutrisClient> {
        match self.lutris() {
            Ok(client) => Ok(client),
            Err(err) if self.catalog_path.is_some() => {
                warn!(error = %err, "lutris not found; launches will fail");
                Ok(LutrisClient::with_path("lutris"))
            }
            Err(err) => Err(err),
        }
    }

    pub fn navigation(&self) -> NavigationController {
        NavigationController::new(self.config.grid.row_width, self.config.grid.page_size)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.config.ui.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_flags_override_config_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        std::fs::write(
            Config::path_in(temp_dir.path()),
            "[grid]\nrow_width = 5\npage_size = 10\n",
        )?;
        let data_dir = temp_dir.path().to_str().unwrap();

        let cli = parse(&["lutui", "--data-dir", data_dir, "--page-size", "6"]);
        let ctx = ExecutionContext::new(&cli)?;

        assert_eq!(ctx.config().grid.row_width, 5);
        assert_eq!(ctx.config().grid.page_size, 6);
        assert_eq!(ctx.data_dir(), temp_dir.path());
        Ok(())
    }

    #[test]
    fn test_zero_override_is_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let data_dir = temp_dir.path().to_str().unwrap();

        let cli = parse(&["lutui", "--data-dir", data_dir, "--row-width", "0"]);
        let err = ExecutionContext::new(&cli).err().unwrap();
        assert!(err.to_string().contains("row_width"));
        Ok(())
    }

    #[test]
    fn test_catalog_file_without_lutris_still_gets_a_launcher() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let data_dir = temp_dir.path().to_str().unwrap();
        let missing = temp_dir.path().join("no-such-lutris");
        let catalog = temp_dir.path().join("catalog.json");
        std::fs::write(&catalog, "[]")?;

        let cli = parse(&[
            "lutui",
            "--data-dir",
            data_dir,
            "--lutris-path",
            missing.to_str().unwrap(),
            "--catalog",
            catalog.to_str().unwrap(),
        ]);
        let ctx = ExecutionContext::new(&cli)?;

        assert!(ctx.lutris().is_err());
        assert!(ctx.launcher().is_ok());
        assert!(ctx.catalog_source()?.fetch_all()?.is_empty());
        Ok(())
    }
}
