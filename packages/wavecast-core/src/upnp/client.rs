//! Concrete control-point client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::upnp::discovery;
use crate::upnp::discovery::types::{DeviceDescriptor, DiscoveryConfig};
use crate::upnp::playback::{self, PlayOutcome};
use crate::upnp::traits::{RendererDiscovery, RendererPlayback};

/// Concrete implementation of the renderer client traits.
///
/// Wraps a shared HTTP client plus the scan parameters. Cheap to clone;
/// concurrent `play` calls share nothing mutable.
#[derive(Debug, Clone)]
pub struct ControlPointImpl {
    /// HTTP client for description fetches and SOAP requests.
    client: Client,
    /// Scan parameters applied to every `discover` call.
    config: DiscoveryConfig,
}

impl ControlPointImpl {
    /// Creates a control point with default scan parameters.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            config: DiscoveryConfig::default(),
        }
    }

    /// Creates a control point with custom scan parameters.
    ///
    /// The `timeout` field of `config` is overridden per `discover` call.
    #[must_use]
    pub fn with_config(client: Client, config: DiscoveryConfig) -> Self {
        Self { client, config }
    }
}

impl Default for ControlPointImpl {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

#[async_trait]
impl RendererDiscovery for ControlPointImpl {
    async fn discover(&self, timeout: Duration) -> Vec<DeviceDescriptor> {
        let config = DiscoveryConfig {
            timeout,
            ..self.config.clone()
        };
        discovery::discover_with_config(&self.client, &config).await
    }
}

#[async_trait]
impl RendererPlayback for ControlPointImpl {
    async fn play(&self, device: &DeviceDescriptor, media_url: &str) -> PlayOutcome {
        playback::play(&self.client, device, media_url).await
    }
}
