use std::io;

use anyhow::{Context as _, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use lutui_runtime::ProcessSupervisor;
use lutui_types::Catalog;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::app::{AppModel, CrosstermInput, run_loop};
use crate::context::ExecutionContext;

pub fn handle(ctx: &ExecutionContext) -> Result<()> {
    let source = ctx.catalog_source()?;
    let launcher = ctx.launcher()?;

    // Fetch before touching the terminal so a failure never leaves a
    // half-drawn screen behind
    let entries = source
        .fetch_all()
        .context("Failed to load installed games")?;
    info!(count = entries.len(), "catalog loaded");

    let model = AppModel::new(
        Catalog::new(entries),
        ProcessSupervisor::new(launcher),
        ctx.navigation(),
    );

    // Raw mode swallows Ctrl+C as a key; this only fires on an external SIGINT
    ctrlc::set_handler(move || {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        std::process::exit(130);
    })?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(
        &mut terminal,
        model,
        &mut CrosstermInput,
        source,
        ctx.tick(),
    );

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let model = result?;
    let still_running = model.supervisor().running_count();
    if still_running > 0 {
        info!(still_running, "quit with games still running");
        println!("{} game(s) left running", still_running);
    }

    Ok(())
}
