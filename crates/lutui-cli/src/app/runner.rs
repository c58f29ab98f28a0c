//! The grid event loop.
//!
//! One thread owns the [`AppModel`]. Each iteration draws, then takes one
//! event: queued worker results first, otherwise user input polled with the
//! tick as timeout (which also gives periodic redraws while idle).

use super::{AppEvent, AppModel, Effect, InputSource, Transition};
use crate::ui;
use anyhow::Result;
use lutui_runtime::{CatalogSource, CommandFactory, Waiter};
use ratatui::{Terminal, backend::Backend};
use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, error};

/// Run until the user quits, returning the final model.
///
/// The terminal is not set up or restored here; see `handlers::grid`.
pub fn run_loop<B, F, I>(
    terminal: &mut Terminal<B>,
    model: AppModel<F>,
    input: &mut I,
    source: Arc<dyn CatalogSource>,
    tick: Duration,
) -> Result<AppModel<F>>
where
    B: Backend,
    F: CommandFactory,
    I: InputSource,
{
    let (tx, rx) = mpsc::channel::<AppEvent>();
    let mut model = model;

    loop {
        terminal.draw(|f| ui::draw(f, &model))?;

        let event = match rx.try_recv() {
            Ok(event) => event,
            Err(_) => match input.poll_action(tick)? {
                Some(action) => AppEvent::Input(action),
                None => continue,
            },
        };
        debug!(?event, "event");

        let Transition { model: next, effect } = model.update(event)?;
        model = next;

        match effect {
            Effect::None => {}
            Effect::Quit => return Ok(model),
            Effect::Watch(waiter) => spawn_waiter(waiter, tx.clone())?,
            Effect::Refresh => spawn_refresh(Arc::clone(&source), tx.clone())?,
        }
    }
}

fn spawn_waiter(waiter: Waiter, tx: Sender<AppEvent>) -> Result<()> {
    thread::Builder::new()
        .name(format!("lutui-waiter-{}", waiter.id()))
        .spawn(move || {
            let report = waiter.wait();
            // The loop may already be gone after quit
            let _ = tx.send(AppEvent::ProcessExited(report));
        })?;
    Ok(())
}

fn spawn_refresh(source: Arc<dyn CatalogSource>, tx: Sender<AppEvent>) -> Result<()> {
    thread::Builder::new()
        .name("lutui-refresh".to_string())
        .spawn(move || {
            let event = match source.fetch_all() {
                Ok(entries) => AppEvent::CatalogRefreshed(entries),
                Err(err) => {
                    error!(error = %err, "catalog refresh failed");
                    AppEvent::RefreshFailed(err.to_string())
                }
            };
            let _ = tx.send(event);
        })?;
    Ok(())
}
