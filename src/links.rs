//! Shortcuts to the web UIs that sit next to the console.

use std::io;
use std::process::{Command, Stdio};

use tracing::{info, warn};

use crate::config::DashboardConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExternalLink {
    ContainerManager,
    Metrics,
    Dashboards,
    ApiDocs,
}

impl ExternalLink {
    pub const ALL: [ExternalLink; 4] = [
        ExternalLink::ContainerManager,
        ExternalLink::Metrics,
        ExternalLink::Dashboards,
        ExternalLink::ApiDocs,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExternalLink::ContainerManager => "Container manager",
            ExternalLink::Metrics => "Metrics",
            ExternalLink::Dashboards => "Dashboards",
            ExternalLink::ApiDocs => "API docs",
        }
    }

    pub fn key(self) -> char {
        match self {
            ExternalLink::ContainerManager => 'p',
            ExternalLink::Metrics => 'm',
            ExternalLink::Dashboards => 'g',
            ExternalLink::ApiDocs => 'd',
        }
    }

    pub fn from_key(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.key() == c)
    }

    pub fn url(self, config: &DashboardConfig) -> String {
        match self {
            ExternalLink::ContainerManager => config.container_manager_url.clone(),
            ExternalLink::Metrics => config.metrics_url.clone(),
            ExternalLink::Dashboards => config.dashboards_url.clone(),
            ExternalLink::ApiDocs => config.docs_url(),
        }
    }
}

fn opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

/// Hand `url` to the desktop's browser. Output is discarded so it cannot
/// scribble over the terminal UI.
pub fn open_in_browser(url: &str) -> io::Result<()> {
    let result = Command::new(opener())
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    match result {
        Ok(mut child) => {
            // Reap the opener once it exits.
            std::thread::spawn(move || child.wait());
            info!(event = "links.opened", url = %url);
            Ok(())
        }
        Err(e) => {
            warn!(event = "links.open_failed", url = %url, error = %e);
            Err(e)
        }
    }
}
