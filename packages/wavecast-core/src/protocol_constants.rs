//! Fixed protocol constants that should NOT be changed.
//!
//! These values are defined by external specifications (SSDP, UPnP, SOAP)
//! and changing them would break protocol compliance.

use std::net::Ipv4Addr;
use std::ops::RangeInclusive;

// ─────────────────────────────────────────────────────────────────────────────
// SSDP (Simple Service Discovery Protocol)
// ─────────────────────────────────────────────────────────────────────────────

/// Standard SSDP multicast group (protocol specification).
pub const SSDP_MULTICAST_GROUP: Ipv4Addr = Ipv4Addr::new(239, 255, 255, 250);

/// Secondary multicast group joined best-effort for renderers that announce
/// on the mDNS group instead of the SSDP one.
pub const SSDP_COMPAT_GROUP: Ipv4Addr = Ipv4Addr::new(224, 0, 0, 251);

/// Standard SSDP port.
pub const SSDP_PORT: u16 = 1900;

/// Standard SSDP multicast address and port.
pub const SSDP_MULTICAST_ADDR: &str = "239.255.255.250:1900";

/// Limited broadcast address used as a fallback send path for responders
/// that do not honor multicast.
pub const LIMITED_BROADCAST_ADDR: &str = "255.255.255.255:1900";

/// SSDP search target for AVTransport-capable renderers.
pub const SSDP_SEARCH_TARGET: &str = "urn:schemas-upnp-org:service:AVTransport:1";

/// Valid MX values (max responder reply delay, seconds). SSDP allows 1-5;
/// 1-3 keeps scans short while still spreading responder replies.
pub const SSDP_MX_RANGE: RangeInclusive<u64> = 1..=3;

/// UPnP 1.0 spec recommends TTL of 4 for SSDP multicast.
pub const SSDP_MULTICAST_TTL: u32 = 4;

// ─────────────────────────────────────────────────────────────────────────────
// UPnP Services
// ─────────────────────────────────────────────────────────────────────────────

/// Service-type prefix identifying an AVTransport service of any version.
pub const AVTRANSPORT_SERVICE_PREFIX: &str = "urn:schemas-upnp-org:service:AVTransport:";

/// Device class used when a deviceType URN cannot be decomposed.
pub const DEFAULT_DEVICE_CLASS: &str = "MediaRenderer";

// ─────────────────────────────────────────────────────────────────────────────
// HTTP/SOAP
// ─────────────────────────────────────────────────────────────────────────────

/// Timeout for device-description GET requests (seconds).
pub const DESCRIPTION_TIMEOUT_SECS: u64 = 5;

/// Timeout for SOAP HTTP requests (seconds).
///
/// 10 seconds is reasonable for LAN operations.
pub const SOAP_TIMEOUT_SECS: u64 = 10;

/// Maximum length of a response-body excerpt embedded in error messages.
pub const BODY_EXCERPT_MAX_CHARS: usize = 200;
