use anyhow::{Context as _, Result, anyhow};
use lutui_runtime::{ExitReport, ProcessSupervisor};
use lutui_types::Catalog;
use std::sync::mpsc;
use std::thread;
use tracing::info;

use crate::context::ExecutionContext;

enum LaunchEvent {
    Interrupted,
    Exited(ExitReport),
}

/// Run one game in the foreground until its direct child exits.
///
/// Ctrl+C kills the game's whole process group; the command then still
/// waits for the exit report so the child is reaped before returning.
pub fn handle(ctx: &ExecutionContext, game: &str) -> Result<()> {
    let source = ctx.catalog_source()?;
    let mut catalog = Catalog::new(
        source
            .fetch_all()
            .context("Failed to load installed games")?,
    );

    let index = catalog
        .resolve(game)
        .ok_or_else(|| anyhow!("Game '{}' not found among installed games", game))?;
    let entry = catalog
        .get_mut(index)
        .ok_or_else(|| anyhow!("Game '{}' not found among installed games", game))?;

    let (tx, rx) = mpsc::channel::<LaunchEvent>();

    // Installed before spawning so an early Ctrl+C cannot orphan the group
    let interrupt_tx = tx.clone();
    ctrlc::set_handler(move || {
        let _ = interrupt_tx.send(LaunchEvent::Interrupted);
    })?;

    let mut supervisor = ProcessSupervisor::new(ctx.launcher()?);
    let waiter = supervisor.launch(entry)?;
    println!("Started {} (pid {})", entry.name, waiter.pid());

    thread::Builder::new()
        .name(format!("lutui-waiter-{}", waiter.id()))
        .spawn(move || {
            let _ = tx.send(LaunchEvent::Exited(waiter.wait()));
        })?;

    loop {
        match rx.recv()? {
            LaunchEvent::Interrupted => {
                if entry.is_running {
                    info!(id = %entry.id, "interrupted; stopping game");
                    supervisor.terminate(entry)?;
                    println!("Stopping {}", entry.name);
                }
            }
            LaunchEvent::Exited(report) => {
                supervisor.reap(Some(&mut *entry), &report);
                println!("{} exited ({})", entry.name, report.state);
                return Ok(());
            }
        }
    }
}
