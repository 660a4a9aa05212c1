//! WaveCast Core - shared library for WaveCast.
//!
//! This crate provides the protocol engine for WaveCast, a cast-to-renderer
//! system: it discovers UPnP media renderers on the local network via SSDP
//! and starts playback on them via SOAP. It is designed to be embedded by a
//! transport layer (HTTP/WebSocket server, desktop app) that exposes the two
//! boundary operations to clients.
//!
//! # Architecture
//!
//! The crate is organized into a small set of modules:
//!
//! - [`upnp::discovery`]: deadline-bound SSDP scan with concurrent
//!   description resolution
//! - [`upnp::description`]: device-description fetching and field extraction
//! - [`upnp::xml`]: namespace-stripped XML tree used by the resolver
//! - [`upnp::soap`] / [`upnp::playback`]: SOAP control and the two-action
//!   play sequence
//! - [`error`]: machine-readable error codes for embedders
//! - [`protocol_constants`]: fixed SSDP/UPnP/SOAP values
//!
//! # Boundary
//!
//! The whole surface is two operations, available as free functions and
//! through the [`RendererDiscovery`]/[`RendererPlayback`] traits:
//!
//! - `discover(timeout)` → list of [`DeviceDescriptor`]
//! - `play(device, media_url)` → [`PlayOutcome`]
//!
//! Discovery never fails outward (setup failures log and yield an empty
//! list) and `play` never raises (failures fold into the outcome value), so
//! the embedding server can always produce a well-formed response.

#![warn(clippy::all)]

pub mod error;
pub mod protocol_constants;
pub mod upnp;

// Re-export commonly used types at the crate root
pub use error::{DiscoveryResult, ErrorCode, SoapResult};
pub use upnp::discovery::{discover, discover_with_config};
pub use upnp::playback::play;
pub use upnp::{
    AvTransportEndpoint, ControlPointImpl, DeviceDescriptor, DiscoveryConfig, PlayOutcome,
    RendererClient, RendererDiscovery, RendererPlayback,
};
