//! Centralized error handling for the WaveCast core library.
//!
//! Each protocol module defines its own `thiserror` enum next to the code
//! that produces it. This module adds the cross-cutting piece: stable,
//! machine-readable error codes the embedding transport layer can put on
//! the wire without string-matching display messages.

use crate::upnp::description::DescriptionError;
use crate::upnp::discovery::DiscoveryError;
use crate::upnp::soap::SoapError;

/// Trait for error types that provide machine-readable error codes.
///
/// Implement this trait to provide consistent error codes across different
/// error conversion paths.
pub trait ErrorCode {
    /// Returns a machine-readable error code for API responses.
    fn code(&self) -> &'static str;
}

impl ErrorCode for DiscoveryError {
    fn code(&self) -> &'static str {
        match self {
            Self::SocketBind(_) => "socket_bind_failed",
            Self::MulticastJoin(_) => "multicast_join_failed",
            Self::SendSearch(_) => "ssdp_send_failed",
        }
    }
}

impl ErrorCode for DescriptionError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidLocation(_) => "invalid_location",
            Self::Fetch(_) => "description_fetch_failed",
            Self::FetchStatus(_) => "description_fetch_status",
            Self::Parse(_) => "description_parse_failed",
            Self::NoDevice => "no_device_element",
            Self::ControlUrl(_) => "control_url_invalid",
        }
    }
}

impl ErrorCode for SoapError {
    fn code(&self) -> &'static str {
        match self {
            Self::Http(_) => "http_request_failed",
            Self::HttpStatus(_, _) => "http_error_status",
            Self::Fault(_) => "soap_fault",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Result Type Aliases
// ─────────────────────────────────────────────────────────────────────────────

// Re-export Result type aliases from their defining modules
pub use crate::upnp::discovery::DiscoveryResult;
pub use crate::upnp::soap::SoapResult;
