use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use clap::Parser;
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
use tracing::{error, info, warn};

use opsboard::app;
use opsboard::check::run_check;
use opsboard::config::{
    DashboardConfig, DEFAULT_API_BASE, DEFAULT_CONTAINER_MANAGER_URL, DEFAULT_DASHBOARDS_URL,
    DEFAULT_METRICS_URL,
};
use opsboard::docker::DockerClient;
use opsboard::error::DashboardError;
use opsboard::logging::{default_log_dir, init_logging};
use opsboard::model::clamp_refresh_secs;
use opsboard::probe::HttpProbe;
use opsboard::settings::{load_settings, FileStore, KeyValueStore, MemoryStore};

#[derive(Parser)]
#[command(name = "opsboard", version, about = "Terminal admin console for a small service deployment")]
struct Cli {
    /// Base URL of the backend API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,
    /// Container manager web UI
    #[arg(long, default_value = DEFAULT_CONTAINER_MANAGER_URL)]
    container_manager_url: String,
    /// Metrics web UI
    #[arg(long, default_value = DEFAULT_METRICS_URL)]
    metrics_url: String,
    /// Dashboards web UI
    #[arg(long, default_value = DEFAULT_DASHBOARDS_URL)]
    dashboards_url: String,
    /// Seconds between refreshes (5 to 3600); overrides the saved setting
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    interval: Option<u64>,
    /// Settings file (default: <config dir>/opsboard/settings.json)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Directory for the rolling log file
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// Run one round of checks, print a summary and exit
    #[arg(long)]
    check: bool,
}

impl Cli {
    fn config(&self) -> DashboardConfig {
        let mut config = DashboardConfig {
            api_base: self.api_base.clone(),
            container_manager_url: self.container_manager_url.clone(),
            metrics_url: self.metrics_url.clone(),
            dashboards_url: self.dashboards_url.clone(),
            ..DashboardConfig::default()
        };
        if let Some(secs) = self.interval {
            config.refresh_interval = Duration::from_secs(clamp_refresh_secs(secs));
        }
        config
    }
}

fn open_store(path: Option<PathBuf>) -> (Box<dyn KeyValueStore>, Option<PathBuf>) {
    match path.or_else(FileStore::default_path) {
        Some(path) => {
            let store = FileStore::new(path);
            let path = store.path().to_path_buf();
            (Box::new(store), Some(path))
        }
        None => {
            warn!(event = "settings.no_config_dir", "settings will not persist");
            (Box::new(MemoryStore::new()), None)
        }
    }
}

fn check(config: DashboardConfig) -> ExitCode {
    let rt = match app::build_runtime() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("opsboard: cannot start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let report = rt.block_on(async {
        let probe = Arc::new(HttpProbe::new(&config));
        let containers = Arc::new(DockerClient::connect());
        run_check(&config, probe, containers).await
    });

    for line in report.summary_lines() {
        println!("{}", line);
    }
    info!(event = "check.completed", api_ok = report.api_ok());
    if report.api_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_dir = cli.log_dir.clone().unwrap_or_else(default_log_dir);
    let _ = std::fs::create_dir_all(&log_dir);
    let _log_guard = init_logging(&log_dir);

    let mut config = cli.config();
    if cli.check {
        return check(config);
    }

    let (store, settings_path) = open_store(cli.settings.clone());
    let mut settings = load_settings(store.as_ref());
    settings.apply_interval_override(cli.interval);
    config.settings_path = settings_path;
    let config = config.with_settings(&settings, cli.interval.is_some());
    info!(
        event = "console.starting",
        api_base = %config.api_base,
        interval_s = config.refresh_interval.as_secs()
    );

    let should_quit = Arc::new(AtomicBool::new(false));
    for signal in [SIGTERM, SIGINT, SIGHUP] {
        if let Err(e) = signal_hook::flag::register(signal, Arc::clone(&should_quit)) {
            warn!(event = "console.signal_register_failed", signal, error = %e);
        }
    }

    // Leave the alternate screen before the panic message prints.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        app::restore_terminal();
        original_hook(panic_info);
    }));

    match app::run(should_quit, config, settings, store) {
        Ok(()) => ExitCode::SUCCESS,
        Err(source) => {
            app::restore_terminal();
            let err = DashboardError::Terminal { source };
            error!(event = "console.failed", error_code = err.error_code(), error = %err);
            eprintln!("opsboard: {}", err);
            ExitCode::FAILURE
        }
    }
}
