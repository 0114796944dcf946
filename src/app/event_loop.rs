use std::time::Instant;

use tokio::sync::mpsc::error::TryRecvError;
use tracing::debug;

use super::App;

impl App {
    /// Fold every pending event into the view state. Returns whether
    /// anything changed.
    pub fn drain_events(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.state.apply(event);
                    changed = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!(event = "app.events_closed");
                    break;
                }
            }
        }
        changed
    }

    /// Expire the status line if timed out.
    pub fn expire_status(&mut self) -> bool {
        if self.status.as_ref().is_some_and(|s| s.is_expired(Instant::now())) {
            self.status = None;
            return true;
        }
        false
    }
}
