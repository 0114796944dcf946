use async_trait::async_trait;
use bollard::Docker;
use bollard::container::ListContainersOptions;
use bollard::image::ListImagesOptions;
use bollard::network::ListNetworksOptions;
use tracing::{debug, warn};

use crate::model::{ContainerCounts, EngineStatus};

/// Source of the container panel's counters.
#[async_trait]
pub trait ContainerSource: Send + Sync {
    async fn engine_status(&self) -> EngineStatus;

    /// `None` when the engine cannot be queried.
    async fn counts(&self) -> Option<ContainerCounts>;
}

/// Wrapper around bollard's Docker client.
pub struct DockerClient {
    client: Option<Docker>,
}

impl DockerClient {
    /// Connect lazily: a missing socket is not an error, the panel simply
    /// reports the engine as unavailable.
    pub fn connect() -> Self {
        let client = match Docker::connect_with_local_defaults() {
            Ok(c) => Some(c),
            Err(e) => {
                warn!(event = "docker.connect_failed", error = %e);
                None
            }
        };
        Self { client }
    }
}

#[async_trait]
impl ContainerSource for DockerClient {
    async fn engine_status(&self) -> EngineStatus {
        let Some(ref client) = self.client else {
            return EngineStatus::Offline;
        };
        match client.ping().await {
            Ok(_) => EngineStatus::Online,
            Err(e) => {
                debug!(event = "docker.ping_failed", error = %e);
                EngineStatus::Offline
            }
        }
    }

    async fn counts(&self) -> Option<ContainerCounts> {
        let client = self.client.as_ref()?;

        let options: ListContainersOptions<String> = ListContainersOptions {
            all: true, // stopped ones count too
            ..Default::default()
        };
        let summaries = match client.list_containers(Some(options)).await {
            Ok(s) => s,
            Err(e) => {
                warn!(event = "docker.list_containers_failed", error = %e);
                return None;
            }
        };

        let images = client
            .list_images(Some(ListImagesOptions::<String> {
                all: false,
                ..Default::default()
            }))
            .await
            .map(|v| v.len())
            .unwrap_or_else(|e| {
                debug!(event = "docker.list_images_failed", error = %e);
                0
            });

        let networks = client
            .list_networks(None::<ListNetworksOptions<String>>)
            .await
            .map(|v| v.len())
            .unwrap_or_else(|e| {
                debug!(event = "docker.list_networks_failed", error = %e);
                0
            });

        let states: Vec<String> = summaries
            .iter()
            .map(|s| s.state.clone().map(|st| st.to_string()).unwrap_or_default())
            .collect();

        Some(ContainerCounts::from_states(
            states.iter().map(String::as_str),
            images,
            networks,
        ))
    }
}
