use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use crate::links::{open_in_browser, ExternalLink};
use crate::model::{LogLevel, Panel};
use crate::settings::{reset_settings, save_settings};

use super::App;

/// Seconds added or removed per `+`/`-` press on the settings panel.
const INTERVAL_STEP: i64 = 5;

/// Result of handling a key: Quit the app, or key was consumed (needs render).
/// None means the key was not handled.
pub enum InputResult {
    Quit,
    Consumed,
}

/// Handle a key event. Returns Some(Quit) to exit, Some(Consumed) if key was handled and
/// a render is needed, None if the key was not handled.
pub fn handle_key(app: &mut App, key_event: KeyEvent) -> Option<InputResult> {
    let KeyEvent { code, modifiers, .. } = key_event;

    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Some(InputResult::Quit);
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(InputResult::Quit),
        KeyCode::Tab | KeyCode::Right => {
            switch_panel(app, current_panel(app).next());
            return Some(InputResult::Consumed);
        }
        KeyCode::BackTab | KeyCode::Left => {
            switch_panel(app, current_panel(app).prev());
            return Some(InputResult::Consumed);
        }
        KeyCode::Char(c) => {
            if let Some(panel) = Panel::from_hotkey(c) {
                switch_panel(app, panel);
                return Some(InputResult::Consumed);
            }
        }
        _ => {}
    }

    let panel = current_panel(app);
    let result = match panel {
        Panel::Logs => handle_logs(app, code),
        Panel::Settings => handle_settings(app, code),
        _ => None,
    };
    if result.is_some() {
        return result;
    }

    handle_global(app, code)
}

fn current_panel(app: &App) -> Panel {
    app.router
        .lock()
        .map(|r| r.current_panel())
        .unwrap_or_else(|e| e.into_inner().current_panel())
}

/// Activate `panel` and refresh it right away instead of waiting a tick.
fn switch_panel(app: &mut App, panel: Panel) {
    if current_panel(app) == panel {
        return;
    }
    match app.router.lock() {
        Ok(mut router) => router.activate(panel),
        Err(e) => e.into_inner().activate(panel),
    }
    app.scheduler.spawn_dispatch(panel);
}

fn handle_global(app: &mut App, code: KeyCode) -> Option<InputResult> {
    match code {
        KeyCode::Char('r') => {
            if app.scheduler.trigger_enabled() {
                app.scheduler.spawn_refresh_now();
                app.set_status("Refreshing...");
            } else {
                app.set_status("Refresh already in progress");
            }
            Some(InputResult::Consumed)
        }
        KeyCode::Char(c) => {
            let link = ExternalLink::from_key(c)?;
            let url = link.url(&app.config);
            match open_in_browser(&url) {
                Ok(()) => app.set_status(format!("Opened {} ({})", link.label(), url)),
                Err(e) => app.set_status(format!("Could not open {}: {}", link.label(), e)),
            }
            Some(InputResult::Consumed)
        }
        _ => None,
    }
}

fn handle_logs(app: &mut App, code: KeyCode) -> Option<InputResult> {
    match code {
        KeyCode::Char('a') => {
            let enabled = !app.scheduler.log_auto_refresh();
            app.scheduler.set_log_auto_refresh(enabled);
            let label = if enabled { "on" } else { "off" };
            app.set_status(format!("Log auto-refresh {}", label));
            Some(InputResult::Consumed)
        }
        KeyCode::Char('c') => {
            app.scheduler.clear_logs();
            app.set_status("Logs cleared");
            Some(InputResult::Consumed)
        }
        _ => None,
    }
}

fn handle_settings(app: &mut App, code: KeyCode) -> Option<InputResult> {
    match code {
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
            change_interval(app, INTERVAL_STEP);
            Some(InputResult::Consumed)
        }
        KeyCode::Char('-') | KeyCode::Down => {
            change_interval(app, -INTERVAL_STEP);
            Some(InputResult::Consumed)
        }
        KeyCode::Char('s') => {
            persist(app);
            Some(InputResult::Consumed)
        }
        KeyCode::Char('x') => {
            match reset_settings(app.store()) {
                Ok(defaults) => {
                    app.settings = defaults;
                    restart_scheduler(app);
                    app.scheduler.record(LogLevel::Info, "settings", "settings reset to defaults");
                    app.set_status("Settings reset to defaults");
                }
                Err(e) => {
                    warn!(event = "app.settings_reset_failed", error_code = e.error_code(), error = %e);
                    app.set_status(format!("Reset failed: {}", e));
                }
            }
            Some(InputResult::Consumed)
        }
        _ => None,
    }
}

fn change_interval(app: &mut App, delta: i64) {
    let before = app.settings.refresh_interval;
    app.settings.adjust_refresh_interval(delta);
    if app.settings.refresh_interval == before {
        return;
    }
    restart_scheduler(app);
    app.scheduler.record(
        LogLevel::Info,
        "settings",
        format!("refresh interval set to {}s", app.settings.refresh_interval),
    );
    persist(app);
}

fn restart_scheduler(app: &mut App) {
    if let Some(interval) = app.settings.refresh_interval() {
        app.config.refresh_interval = interval;
    }
    app.scheduler.start(app.config.refresh_interval);
    info!(event = "app.interval_changed", interval_s = app.config.refresh_interval.as_secs());
}

fn persist(app: &mut App) {
    match save_settings(app.store(), &app.settings) {
        Ok(()) => {
            let secs = app.settings.refresh_interval;
            app.set_status(format!("Settings saved (refresh every {}s)", secs));
        }
        Err(e) => {
            warn!(event = "app.settings_save_failed", error_code = e.error_code(), error = %e);
            app.set_status(format!("Save failed: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::runtime::Handle;

    use super::*;
    use crate::config::DashboardConfig;
    use crate::docker::ContainerSource;
    use crate::error::DashboardResult;
    use crate::model::{ContainerCounts, EngineStatus, HealthReport, Settings};
    use crate::probe::Probe;
    use crate::settings::{load_settings, MemoryStore};

    struct OfflineProbe;

    #[async_trait]
    impl Probe for OfflineProbe {
        async fn health(&self) -> HealthReport {
            HealthReport::unreachable("connection refused")
        }
        async fn record_count(&self) -> DashboardResult<u64> {
            Ok(0)
        }
        async fn reachable(&self, _url: &str) -> bool {
            false
        }
    }

    struct NoEngine;

    #[async_trait]
    impl ContainerSource for NoEngine {
        async fn engine_status(&self) -> EngineStatus {
            EngineStatus::Offline
        }
        async fn counts(&self) -> Option<ContainerCounts> {
            None
        }
    }

    fn app() -> App {
        App::new(
            DashboardConfig::default(),
            Settings::default(),
            Box::new(MemoryStore::new()),
            Arc::new(OfflineProbe),
            Arc::new(NoEngine),
            Handle::current(),
        )
    }

    fn press(app: &mut App, code: KeyCode) -> Option<InputResult> {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[tokio::test]
    async fn hotkeys_switch_panels() {
        let mut app = app();
        assert!(matches!(press(&mut app, KeyCode::Char('3')), Some(InputResult::Consumed)));
        assert_eq!(current_panel(&app), Panel::Containers);

        app.drain_events();
        assert_eq!(app.state.panel, Panel::Containers);
        assert_eq!(app.state.frame_url.as_deref(), Some("http://localhost:9000"));
    }

    #[tokio::test]
    async fn tab_navigation_wraps() {
        let mut app = app();
        press(&mut app, KeyCode::BackTab);
        app.drain_events();
        assert_eq!(app.state.panel, Panel::Settings);

        press(&mut app, KeyCode::Tab);
        app.drain_events();
        assert_eq!(app.state.panel, Panel::Overview);
    }

    #[tokio::test]
    async fn quit_keys() {
        let mut app = app();
        assert!(matches!(press(&mut app, KeyCode::Char('q')), Some(InputResult::Quit)));
        assert!(matches!(press(&mut app, KeyCode::Esc), Some(InputResult::Quit)));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(handle_key(&mut app, ctrl_c), Some(InputResult::Quit)));
    }

    #[tokio::test]
    async fn interval_change_is_saved_and_restarts_timer() {
        let mut app = app();
        press(&mut app, KeyCode::Char('6'));
        press(&mut app, KeyCode::Char('+'));

        assert_eq!(app.settings.refresh_interval, 35);
        assert_eq!(app.config.refresh_interval, Duration::from_secs(35));
        assert!(app.scheduler.is_running());
        assert_eq!(load_settings(app.store()).refresh_interval, 35);
    }

    #[tokio::test]
    async fn reset_restores_defaults() {
        let mut app = app();
        press(&mut app, KeyCode::Char('6'));
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.settings.refresh_interval, 25);

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.settings, Settings::default());
        assert_eq!(app.config.refresh_interval, Duration::from_secs(30));
        assert_eq!(load_settings(app.store()), Settings::default());
    }

    #[tokio::test]
    async fn command_line_interval_is_the_base_for_edits() {
        let mut settings = Settings::default();
        settings.apply_interval_override(Some(12));
        let config = DashboardConfig::default().with_settings(&settings, false);
        let mut app = App::new(
            config,
            settings,
            Box::new(MemoryStore::new()),
            Arc::new(OfflineProbe),
            Arc::new(NoEngine),
            Handle::current(),
        );
        assert_eq!(app.config.refresh_interval, Duration::from_secs(12));

        press(&mut app, KeyCode::Char('6'));
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.settings.refresh_interval, 17);
        assert_eq!(app.config.refresh_interval, Duration::from_secs(17));
    }

    #[tokio::test]
    async fn log_keys_only_on_logs_panel() {
        let mut app = app();
        assert!(press(&mut app, KeyCode::Char('a')).is_none());
        assert!(app.scheduler.log_auto_refresh());

        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Char('a'));
        assert!(!app.scheduler.log_auto_refresh());
        assert_eq!(app.status.as_ref().map(|s| s.text.as_str()), Some("Log auto-refresh off"));
    }

    #[tokio::test]
    async fn refresh_key_sets_status() {
        let mut app = app();
        assert!(matches!(press(&mut app, KeyCode::Char('r')), Some(InputResult::Consumed)));
        assert!(app.status.is_some());
    }
}
