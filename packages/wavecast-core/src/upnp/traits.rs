//! Trait abstractions for renderer operations.
//!
//! These traits are the seam between the protocol engine and the transport
//! layer that embeds it. Servers depend on the traits rather than on the
//! concrete implementation, which keeps handlers testable with fakes.

use std::time::Duration;

use async_trait::async_trait;

use crate::upnp::discovery::types::DeviceDescriptor;
use crate::upnp::playback::PlayOutcome;

/// Trait for renderer discovery operations.
#[async_trait]
pub trait RendererDiscovery: Send + Sync {
    /// Discovers AVTransport-capable renderers on the local network.
    ///
    /// Always returns within roughly `timeout`; transport-setup failures
    /// yield an empty list rather than an error.
    async fn discover(&self, timeout: Duration) -> Vec<DeviceDescriptor>;
}

/// Trait for renderer playback control.
#[async_trait]
pub trait RendererPlayback: Send + Sync {
    /// Commands a renderer to play a media URL.
    ///
    /// Never fails with an error type; every failure is folded into the
    /// returned [`PlayOutcome`].
    async fn play(&self, device: &DeviceDescriptor, media_url: &str) -> PlayOutcome;
}

// ─────────────────────────────────────────────────────────────────────────────
// Combined Trait (for trait objects)
// ─────────────────────────────────────────────────────────────────────────────

/// Combined trait for the full control-point surface.
#[async_trait]
pub trait RendererClient: RendererDiscovery + RendererPlayback {}

/// Blanket implementation for any type implementing both traits.
impl<T: RendererDiscovery + RendererPlayback> RendererClient for T {}
