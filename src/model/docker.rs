/// Whether the local Docker engine answered its last ping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EngineStatus {
    #[default]
    Unknown,
    Online,
    Offline,
}

impl EngineStatus {
    pub fn label(self) -> &'static str {
        match self {
            EngineStatus::Unknown => "checking",
            EngineStatus::Online => "running",
            EngineStatus::Offline => "unavailable",
        }
    }
}

/// Counters shown on the containers panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContainerCounts {
    pub running: usize,
    pub stopped: usize,
    pub images: usize,
    pub networks: usize,
}

impl ContainerCounts {
    pub fn total(&self) -> usize {
        self.running + self.stopped
    }

    /// Build counts from the raw `state` strings Docker reports per container.
    pub fn from_states<'a>(
        states: impl IntoIterator<Item = &'a str>,
        images: usize,
        networks: usize,
    ) -> Self {
        let mut counts = ContainerCounts {
            images,
            networks,
            ..Default::default()
        };
        for state in states {
            if state.eq_ignore_ascii_case("running") {
                counts.running += 1;
            } else {
                counts.stopped += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_split_running_from_the_rest() {
        let counts = ContainerCounts::from_states(
            ["running", "exited", "Running", "paused", "created"],
            6,
            2,
        );
        assert_eq!(counts.running, 2);
        assert_eq!(counts.stopped, 3);
        assert_eq!(counts.total(), 5);
        assert_eq!(counts.images, 6);
        assert_eq!(counts.networks, 2);
    }

    #[test]
    fn engine_status_default() {
        assert_eq!(EngineStatus::default(), EngineStatus::Unknown);
        assert_eq!(EngineStatus::Offline.label(), "unavailable");
    }
}
