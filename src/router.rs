//! Which panel is on screen.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::DashboardConfig;
use crate::error::DashboardResult;
use crate::events::{DashboardEvent, EventSink};
use crate::model::Panel;

/// Tracks the single visible panel and the navigation highlight.
///
/// Visibility and highlight are kept as separate per-panel flags, the way a
/// page keeps them on separate elements, and `activate` is the only thing
/// that writes them.
pub struct SectionRouter {
    visible: [bool; Panel::COUNT],
    highlighted: [bool; Panel::COUNT],
    container_manager_url: String,
    embedded_frame: Option<String>,
    sink: Arc<dyn EventSink>,
}

impl SectionRouter {
    /// Starts on the overview panel.
    pub fn new(config: &DashboardConfig, sink: Arc<dyn EventSink>) -> Self {
        let mut visible = [false; Panel::COUNT];
        let mut highlighted = [false; Panel::COUNT];
        visible[Panel::Overview.index()] = true;
        highlighted[Panel::Overview.index()] = true;

        Self {
            visible,
            highlighted,
            container_manager_url: config.container_manager_url.clone(),
            embedded_frame: None,
            sink,
        }
    }

    pub fn activate(&mut self, panel: Panel) {
        for p in Panel::ALL {
            self.visible[p.index()] = p == panel;
            self.highlighted[p.index()] = p == panel;
        }
        debug!(event = "router.panel_activated", panel = panel.id());
        self.sink.emit(DashboardEvent::PanelActivated(panel));

        if panel == Panel::Containers {
            self.bind_container_frame();
        }
    }

    /// Activate by identifier; unknown identifiers leave state untouched.
    pub fn activate_id(&mut self, id: &str) -> DashboardResult<()> {
        let panel: Panel = id.parse()?;
        self.activate(panel);
        Ok(())
    }

    /// The first visible panel in navigation order, overview if none is.
    pub fn current_panel(&self) -> Panel {
        Panel::ALL
            .into_iter()
            .find(|p| self.visible[p.index()])
            .unwrap_or_default()
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.visible[panel.index()]
    }

    pub fn highlighted(&self) -> Option<Panel> {
        Panel::ALL.into_iter().find(|p| self.highlighted[p.index()])
    }

    pub fn embedded_frame(&self) -> Option<&str> {
        self.embedded_frame.as_deref()
    }

    fn bind_container_frame(&mut self) {
        if self.embedded_frame.is_some() {
            return;
        }
        info!(
            event = "router.frame_bound",
            url = %self.container_manager_url
        );
        self.embedded_frame = Some(self.container_manager_url.clone());
        self.sink
            .emit(DashboardEvent::FrameBound(self.container_manager_url.clone()));
    }
}
