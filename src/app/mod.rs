mod state;
mod event_loop;
mod render;
mod input;

use std::io;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, Clear, ClearType},
};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::info;

use crate::config::DashboardConfig;
use crate::docker::{ContainerSource, DockerClient};
use crate::events::{DashboardEvent, EventSink};
use crate::model::{DashboardState, LogLevel, Settings};
use crate::probe::{HttpProbe, Probe};
use crate::router::SectionRouter;
use crate::scheduler::{Collaborators, RefreshScheduler};
use crate::settings::KeyValueStore;
use crate::view::Presenter;

pub use input::{handle_key, InputResult};
pub use state::StatusMessage;

const CLOCK_TICK: Duration = Duration::from_secs(1);

/// Restore the terminal to normal mode. Safe to call multiple times.
pub fn restore_terminal() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Main application state: the folded view model plus the handles that
/// change it.
pub struct App {
    pub state: DashboardState,
    events: mpsc::UnboundedReceiver<DashboardEvent>,
    pub router: Arc<Mutex<SectionRouter>>,
    pub scheduler: RefreshScheduler,
    pub settings: Settings,
    store: Box<dyn KeyValueStore>,
    pub config: DashboardConfig,
    pub status: Option<StatusMessage>,
}

impl App {
    pub fn new(
        config: DashboardConfig,
        settings: Settings,
        store: Box<dyn KeyValueStore>,
        probe: Arc<dyn Probe>,
        containers: Arc<dyn ContainerSource>,
        handle: Handle,
    ) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let sink: Arc<dyn EventSink> = Arc::new(tx);
        let router = Arc::new(Mutex::new(SectionRouter::new(&config, Arc::clone(&sink))));
        let scheduler = RefreshScheduler::new(
            config.clone(),
            Arc::clone(&router),
            Collaborators { probe, containers, sink },
            handle,
        );

        Self {
            state: DashboardState::default(),
            events,
            router,
            scheduler,
            settings,
            store,
            config,
            status: None,
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::new(text));
    }

    pub(crate) fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }
}

/// Two workers; the UI loop runs on its own thread.
pub fn build_runtime() -> io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(2)
        .build()
}

/// Run the application. Sets up terminal, runs the main loop, restores terminal on exit.
pub fn run(
    should_quit: Arc<AtomicBool>,
    config: DashboardConfig,
    settings: Settings,
    store: Box<dyn KeyValueStore>,
) -> io::Result<()> {
    let rt = build_runtime()?;

    let mut app = {
        // bollard wants a reactor while connecting.
        let _guard = rt.enter();
        let probe: Arc<dyn Probe> = Arc::new(HttpProbe::new(&config));
        let containers: Arc<dyn ContainerSource> = Arc::new(DockerClient::connect());
        App::new(config, settings, store, probe, containers, rt.handle().clone())
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Clear(ClearType::All))?;

    app.scheduler.record(LogLevel::Info, "console", "started");
    app.scheduler.start(app.config.refresh_interval);
    let initial = app.scheduler.clone();
    rt.spawn(async move { initial.run_initial_checks().await });

    let result = event_loop(&mut app, &should_quit);

    app.scheduler.stop();
    restore_terminal();
    rt.shutdown_timeout(Duration::from_millis(500));
    info!(event = "console.stopped");
    result
}

fn event_loop(app: &mut App, should_quit: &AtomicBool) -> io::Result<()> {
    let mut needs_render = true;
    let mut last_render = Instant::now();

    loop {
        if should_quit.load(Ordering::Relaxed) {
            break;
        }

        if app.drain_events() {
            needs_render = true;
        }
        if app.expire_status() {
            needs_render = true;
        }
        // Keep the clock in the tab bar moving.
        if last_render.elapsed() >= CLOCK_TICK {
            needs_render = true;
        }

        if needs_render {
            if Presenter::render_size_guard()? {
                last_render = Instant::now();
                needs_render = false;
                if crossterm::event::poll(Duration::from_millis(100))? {
                    let _ = crossterm::event::read()?;
                }
                continue;
            }

            render::render(app)?;
            last_render = Instant::now();
            needs_render = false;
        }

        if crossterm::event::poll(Duration::from_millis(100))? {
            match crossterm::event::read()? {
                crossterm::event::Event::Key(key_event) => match input::handle_key(app, key_event) {
                    Some(InputResult::Quit) => break,
                    Some(InputResult::Consumed) => needs_render = true,
                    None => {}
                },
                crossterm::event::Event::Resize(_, _) => needs_render = true,
                _ => {}
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_drives_timers_and_spawned_tasks() {
        let rt = build_runtime().unwrap();
        let joined = rt.block_on(async {
            let task = tokio::spawn(async {
                tokio::time::sleep(Duration::from_millis(5)).await;
                7
            });
            task.await.unwrap()
        });
        assert_eq!(joined, 7);
    }
}
