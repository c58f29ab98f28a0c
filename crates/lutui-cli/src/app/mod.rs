//! Grid application state and its single update function.
//!
//! Every state change goes through [`AppModel::update`], called only from the
//! loop thread in [`runner`]. Side effects that would block (waiting on a
//! child, fetching the catalog) are returned as an [`Effect`] for the runner
//! to move onto a worker thread; their results come back as [`AppEvent`]s.

pub mod input;
pub mod runner;

pub use input::{Action, CrosstermInput, InputSource};
pub use runner::run_loop;

use lutui_engine::{GridLayout, NavState, NavigationController, PageWindow};
use lutui_runtime::{CommandFactory, ExitReport, ProcessSupervisor, SupervisorError, Waiter};
use lutui_types::{Catalog, CatalogEntry};
use tracing::{info, warn};

/// Everything the loop thread consumes, from any producer.
#[derive(Debug)]
pub enum AppEvent {
    Input(Action),
    ProcessExited(ExitReport),
    CatalogRefreshed(Vec<CatalogEntry>),
    RefreshFailed(String),
}

/// Work the runner must start after an update.
#[derive(Debug)]
pub enum Effect {
    None,
    Quit,
    /// Block on this launch off the loop thread and post its exit
    Watch(Waiter),
    /// Fetch the catalog off the loop thread
    Refresh,
}

pub struct Transition<F> {
    pub model: AppModel<F>,
    pub effect: Effect,
}

pub struct AppModel<F> {
    catalog: Catalog,
    supervisor: ProcessSupervisor<F>,
    nav: NavigationController,
    state: NavState,
    status: String,
    refreshing: bool,
}

impl<F: CommandFactory> AppModel<F> {
    pub fn new(catalog: Catalog, supervisor: ProcessSupervisor<F>, nav: NavigationController) -> Self {
        let state = nav.initial(catalog.len());
        let status = if catalog.is_empty() {
            "No installed games found".to_string()
        } else {
            format!("Loaded {} games", catalog.len())
        };
        Self {
            catalog,
            supervisor,
            nav,
            state,
            status,
            refreshing: false,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn supervisor(&self) -> &ProcessSupervisor<F> {
        &self.supervisor
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.nav
    }

    pub fn nav_state(&self) -> &NavState {
        &self.state
    }

    pub fn page(&self) -> &PageWindow {
        &self.state.page
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn layout(&self) -> GridLayout {
        self.nav.layout(self.catalog.entries(), &self.state)
    }

    /// Catalog index under the cursor.
    pub fn selected_index(&self) -> Option<usize> {
        self.nav.selected(&self.layout(), &self.state)
    }

    pub fn selected(&self) -> Option<&CatalogEntry> {
        self.selected_index().and_then(|index| self.catalog.get(index))
    }

    /// Apply one event.
    ///
    /// The only error is a terminate request for an entry the supervisor has
    /// no handle for. That means the running flags and the supervisor have
    /// diverged, and the loop must stop rather than guess.
    pub fn update(mut self, event: AppEvent) -> Result<Transition<F>, SupervisorError> {
        let effect = match event {
            AppEvent::Input(Action::Move(direction)) => {
                let layout = self.layout();
                self.state = self.nav.step(&self.state, &layout, direction);
                Effect::None
            }
            AppEvent::Input(Action::Activate) => self.activate()?,
            AppEvent::Input(Action::Refresh) => self.request_refresh(),
            AppEvent::Input(Action::Quit) => Effect::Quit,
            AppEvent::ProcessExited(report) => {
                self.apply_exit(report);
                Effect::None
            }
            AppEvent::CatalogRefreshed(entries) => {
                self.apply_refresh(entries);
                Effect::None
            }
            AppEvent::RefreshFailed(message) => {
                self.refreshing = false;
                self.status = format!("Refresh failed: {}", message);
                Effect::None
            }
        };

        Ok(Transition { model: self, effect })
    }

    fn activate(&mut self) -> Result<Effect, SupervisorError> {
        let Some(index) = self.selected_index() else {
            return Ok(Effect::None);
        };
        let Some(entry) = self.catalog.get_mut(index) else {
            return Ok(Effect::None);
        };

        if entry.is_running {
            self.supervisor.terminate(entry)?;
            self.status = format!("Stopped {}", entry.name);
            return Ok(Effect::None);
        }

        match self.supervisor.launch(entry) {
            Ok(waiter) => {
                self.status = format!("Started {}", entry.name);
                Ok(Effect::Watch(waiter))
            }
            Err(err) => {
                self.status = err.to_string();
                Ok(Effect::None)
            }
        }
    }

    fn request_refresh(&mut self) -> Effect {
        if self.refreshing {
            return Effect::None;
        }
        self.refreshing = true;
        self.status = "Refreshing...".to_string();
        Effect::Refresh
    }

    fn apply_exit(&mut self, report: ExitReport) {
        let entry = self.catalog.find_mut(report.id);
        let name = entry
            .as_ref()
            .map(|e| e.name.clone())
            .unwrap_or_else(|| format!("Game {}", report.id));

        if self.supervisor.reap(entry, &report) {
            self.status = format!("{} exited ({})", name, report.state);
        }
    }

    fn apply_refresh(&mut self, entries: Vec<CatalogEntry>) {
        self.refreshing = false;

        let supervisor = &self.supervisor;
        self.catalog.replace(entries, |id| supervisor.is_running(id));
        self.state = self.nav.reconcile(&self.state, self.catalog.len());

        let orphaned = self
            .supervisor
            .running_ids()
            .filter(|id| self.catalog.find(*id).is_none())
            .count();
        if orphaned > 0 {
            warn!(orphaned, "running games disappeared from the refreshed catalog");
        }

        info!(count = self.catalog.len(), "catalog refreshed");
        self.status = format!("Loaded {} games", self.catalog.len());
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use lutui_engine::{CursorPosition, Direction};
    use lutui_runtime::ExitState;
    use lutui_testing::fixtures;
    use std::process::Command;

    type Factory = fn(&CatalogEntry) -> Command;

    fn sleeper(_: &CatalogEntry) -> Command {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "sleep 30"]);
        cmd
    }

    fn quick_exit(_: &CatalogEntry) -> Command {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "exit 3"]);
        cmd
    }

    fn missing_binary(_: &CatalogEntry) -> Command {
        Command::new("/nonexistent/lutui-test-binary")
    }

    fn model(entries: Vec<CatalogEntry>, factory: Factory, page_size: usize) -> AppModel<Factory> {
        AppModel::new(
            Catalog::new(entries),
            ProcessSupervisor::new(factory),
            NavigationController::new(2, page_size),
        )
    }

    fn apply(model: AppModel<Factory>, event: AppEvent) -> (AppModel<Factory>, Effect) {
        let Ok(Transition { model, effect }) = model.update(event) else {
            panic!("update failed");
        };
        (model, effect)
    }

    fn press(model: AppModel<Factory>, action: Action) -> (AppModel<Factory>, Effect) {
        apply(model, AppEvent::Input(action))
    }

    fn take_waiter(effect: Effect) -> Waiter {
        match effect {
            Effect::Watch(waiter) => waiter,
            other => panic!("expected Watch, got {:?}", other),
        }
    }

    #[test]
    fn test_navigation_scenario_through_update() {
        // Given: A..E, two per row, four per page
        let app = model(fixtures::five_games(), sleeper, 4);
        assert_eq!(app.selected().unwrap().name, "A");

        // When: right, down, down
        let (app, _) = press(app, Action::Move(Direction::Right));
        assert_eq!(app.selected().unwrap().name, "B");
        let (app, _) = press(app, Action::Move(Direction::Down));
        assert_eq!(app.selected().unwrap().name, "D");
        let (app, _) = press(app, Action::Move(Direction::Down));

        // Then: second page, first cell
        assert_eq!(app.page().page_index, 1);
        assert_eq!(app.nav_state().cursor, CursorPosition::ORIGIN);
        assert_eq!(app.selected().unwrap().name, "E");

        let (app, _) = press(app, Action::Move(Direction::Up));
        assert_eq!(app.page().page_index, 0);
        assert_eq!(app.selected().unwrap().name, "A");
    }

    #[test]
    fn test_activate_launches_then_terminates() {
        let app = model(fixtures::five_games(), sleeper, 4);

        let (app, effect) = press(app, Action::Activate);
        let waiter = take_waiter(effect);
        assert!(app.selected().unwrap().is_running);
        assert_eq!(app.status(), "Started A");

        let (app, effect) = press(app, Action::Activate);
        assert!(matches!(effect, Effect::None));
        assert!(!app.selected().unwrap().is_running);
        assert_eq!(app.status(), "Stopped A");

        // The killed child's completion arrives late and changes nothing
        let report = waiter.wait();
        let (app, _) = apply(app, AppEvent::ProcessExited(report));
        assert!(!app.selected().unwrap().is_running);
        assert_eq!(app.status(), "Stopped A");
        assert_eq!(app.supervisor().running_count(), 0);
    }

    #[test]
    fn test_natural_exit_clears_running() {
        let app = model(fixtures::five_games(), quick_exit, 4);

        let (app, effect) = press(app, Action::Activate);
        let report = take_waiter(effect).wait();
        assert_eq!(report.state, ExitState::Exited(3));

        let (app, _) = apply(app, AppEvent::ProcessExited(report));
        assert!(!app.selected().unwrap().is_running);
        assert_eq!(app.status(), "A exited (exit code 3)");
    }

    #[test]
    fn test_stale_exit_after_relaunch_is_ignored() {
        let app = model(fixtures::five_games(), sleeper, 4);

        let (app, effect) = press(app, Action::Activate);
        let first = take_waiter(effect);
        let (app, _) = press(app, Action::Activate);
        let (app, effect) = press(app, Action::Activate);
        let second = take_waiter(effect);

        let (app, effect) = apply(app, AppEvent::ProcessExited(first.wait()));
        assert!(matches!(effect, Effect::None));
        assert!(app.selected().unwrap().is_running);
        assert_eq!(app.status(), "Started A");

        let (app, _) = press(app, Action::Activate);
        assert!(!app.selected().unwrap().is_running);
        second.wait();
    }

    #[test]
    fn test_launch_failure_is_reported_in_status() {
        let app = model(fixtures::five_games(), missing_binary, 4);

        let (app, effect) = press(app, Action::Activate);
        assert!(matches!(effect, Effect::None));
        assert!(!app.selected().unwrap().is_running);
        assert!(app.status().starts_with("Failed to launch game 1"));
    }

    #[test]
    fn test_running_flag_without_handle_is_fatal() {
        let mut entries = fixtures::five_games();
        entries[0].is_running = true;
        let app = model(entries, sleeper, 4);

        let result = app.update(AppEvent::Input(Action::Activate));
        assert!(matches!(result, Err(SupervisorError::NotRunning(_))));
    }

    #[test]
    fn test_activate_on_empty_catalog_is_noop() {
        let app = model(Vec::new(), sleeper, 4);
        assert!(app.selected().is_none());
        assert_eq!(app.status(), "No installed games found");

        let (app, effect) = press(app, Action::Activate);
        assert!(matches!(effect, Effect::None));
        assert_eq!(app.supervisor().running_count(), 0);
    }

    #[test]
    fn test_quit_and_refresh_effects() {
        let app = model(fixtures::five_games(), sleeper, 4);

        let (app, effect) = press(app, Action::Refresh);
        assert!(matches!(effect, Effect::Refresh));
        assert!(app.is_refreshing());

        // A second request while one is in flight is dropped
        let (app, effect) = press(app, Action::Refresh);
        assert!(matches!(effect, Effect::None));

        let (_, effect) = press(app, Action::Quit);
        assert!(matches!(effect, Effect::Quit));
    }

    #[test]
    fn test_refresh_keeps_running_flags_and_reconciles_cursor() {
        let app = model(fixtures::five_games(), sleeper, 4);

        // Start E on page two
        let (app, _) = press(app, Action::Move(Direction::Down));
        let (app, _) = press(app, Action::Move(Direction::Down));
        let (app, effect) = press(app, Action::Activate);
        let waiter = take_waiter(effect);
        assert_eq!(app.selected().unwrap().name, "E");

        // The refreshed catalog drops A and B, leaving a single page
        let survivors = fixtures::five_games().split_off(2);
        let (app, _) = press(app, Action::Refresh);
        let (app, _) = apply(app, AppEvent::CatalogRefreshed(survivors));

        assert!(!app.is_refreshing());
        assert_eq!(app.catalog().len(), 3);
        assert_eq!(app.page().page_index, 0);
        assert_eq!(app.nav_state().cursor, CursorPosition::ORIGIN);
        assert!(app.catalog().entries()[2].is_running);
        assert_eq!(app.status(), "Loaded 3 games");

        // E is now at (1, 0); stopping it still works
        let (app, _) = press(app, Action::Move(Direction::Down));
        assert_eq!(app.selected().unwrap().name, "E");
        let (app, _) = press(app, Action::Activate);
        assert!(!app.selected().unwrap().is_running);
        waiter.wait();
    }

    #[test]
    fn test_refresh_failure_keeps_catalog() {
        let app = model(fixtures::five_games(), sleeper, 4);
        let (app, _) = press(app, Action::Refresh);
        let (app, _) = apply(app, AppEvent::RefreshFailed("lutris exploded".to_string()));

        assert!(!app.is_refreshing());
        assert_eq!(app.catalog().len(), 5);
        assert_eq!(app.status(), "Refresh failed: lutris exploded");
    }
}
