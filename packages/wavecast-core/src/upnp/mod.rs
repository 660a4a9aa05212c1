//! UPnP renderer discovery and control.
//!
//! This module provides the protocol engine for finding media renderers on
//! the local network and driving playback on them via SOAP.
//!
//! # Module Structure
//!
//! - `discovery` - SSDP scan engine, announcement parsing, descriptor types
//! - `description` - device-description fetching and field extraction
//! - `xml` - namespace-stripped XML tree and depth-first walker
//! - `soap` - low-level SOAP envelope building and HTTP transport
//! - `playback` - the SetAVTransportURI + Play action sequence
//! - `traits` - trait abstractions for the embedding transport layer
//! - `client` - `ControlPointImpl` concrete trait implementation
//! - `utils` - shared helpers (XML escaping, control-URL normalization)

pub mod client;
pub mod description;
pub mod discovery;
pub mod playback;
pub mod soap;
pub mod traits;
pub mod utils;
pub mod xml;

#[cfg(test)]
pub(crate) mod test_fixtures;

// Re-export domain types
pub use discovery::types::{AvTransportEndpoint, DeviceDescriptor, DiscoveryConfig};
pub use playback::PlayOutcome;

// Re-export trait abstractions
pub use traits::{RendererClient, RendererDiscovery, RendererPlayback};

// Re-export concrete implementation
pub use client::ControlPointImpl;
