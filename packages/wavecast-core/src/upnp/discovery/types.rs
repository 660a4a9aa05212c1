//! Shared types for renderer discovery.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during discovery setup.
///
/// Per-device failures (bad descriptions, unreachable hosts) are never
/// surfaced here; they are logged and the device is skipped.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Failed to bind the UDP socket for discovery.
    #[error("failed to bind UDP socket: {0}")]
    SocketBind(#[source] std::io::Error),

    /// Failed to join the SSDP multicast group.
    #[error("failed to join SSDP multicast group: {0}")]
    MulticastJoin(#[source] std::io::Error),

    /// Failed to send the SSDP search.
    #[error("failed to send SSDP search: {0}")]
    SendSearch(#[source] std::io::Error),
}

/// Convenient Result alias for discovery operations.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// The AVTransport control endpoint of a resolved renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvTransportEndpoint {
    /// Full service URN as advertised by the device (version included).
    pub service_type: String,
    /// Absolute control URL the SOAP actions are POSTed to.
    #[serde(rename = "controlURL")]
    pub control_url: String,
}

/// A renderer discovered on the local network, ready for playback control.
///
/// `location` is the discovery key: a result set never contains two
/// descriptors with the same location. `address` comes from the UDP sender
/// of the announcement, never from the description body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDescriptor {
    /// Absolute URL of the device description document.
    pub location: String,
    /// Friendly name from the device description.
    pub name: String,
    /// Manufacturer from the device description.
    pub manufacturer: String,
    /// Device class segment of the deviceType URN (e.g. "MediaRenderer").
    pub device_type: String,
    /// AVTransport control endpoint.
    pub av_transport: AvTransportEndpoint,
    /// IP address the announcement came from.
    pub address: String,
    /// HTTP port of the description document.
    pub port: u16,
}

/// Configuration for one discovery scan.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Total scan duration. The scan always returns when this elapses.
    pub timeout: Duration,
    /// Number of M-SEARCH rounds to send.
    pub send_count: u64,
    /// Delay between M-SEARCH rounds.
    pub retry_delay: Duration,
    /// Also send each round to the limited broadcast address, for
    /// responders that do not honor multicast.
    pub broadcast_fallback: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            send_count: 3,
            retry_delay: Duration::from_millis(800),
            broadcast_fallback: true,
        }
    }
}

impl DiscoveryConfig {
    /// Returns the default configuration with the given scan timeout.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_timeout_keeps_other_defaults() {
        let config = DiscoveryConfig::with_timeout(Duration::from_millis(1200));
        assert_eq!(config.timeout, Duration::from_millis(1200));
        assert_eq!(config.send_count, DiscoveryConfig::default().send_count);
        assert!(config.broadcast_fallback);
    }

    #[test]
    fn descriptor_serializes_for_the_transport_layer() {
        let descriptor = DeviceDescriptor {
            location: "http://192.168.1.9:49152/desc.xml".into(),
            name: "Living Room TV".into(),
            manufacturer: "Acme".into(),
            device_type: "MediaRenderer".into(),
            av_transport: AvTransportEndpoint {
                service_type: "urn:schemas-upnp-org:service:AVTransport:1".into(),
                control_url: "http://192.168.1.9:49152/upnp/control/AVTransport".into(),
            },
            address: "192.168.1.9".into(),
            port: 49152,
        };

        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["deviceType"], "MediaRenderer");
        assert_eq!(
            json["avTransport"]["controlURL"],
            "http://192.168.1.9:49152/upnp/control/AVTransport"
        );
        assert_eq!(json["address"], "192.168.1.9");
    }
}
