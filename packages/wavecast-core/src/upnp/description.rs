//! Device-description resolution.
//!
//! A discovered `location` URL points at a UPnP device description document.
//! Resolution fetches it, canonicalizes the XML (namespace prefixes
//! stripped), and extracts the control-relevant fields. Only devices that
//! expose an AVTransport service become descriptors; everything else is a
//! normal skip, not an error.

use std::net::IpAddr;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::protocol_constants::{
    AVTRANSPORT_SERVICE_PREFIX, DEFAULT_DEVICE_CLASS, DESCRIPTION_TIMEOUT_SECS,
};
use crate::upnp::discovery::types::{AvTransportEndpoint, DeviceDescriptor};
use crate::upnp::utils::normalize_control_url;
use crate::upnp::xml::{XmlNode, XmlTreeError};

/// Placeholder when a description omits `friendlyName`.
const UNKNOWN_NAME: &str = "Unknown Device";

/// Placeholder when a description omits `manufacturer`.
const UNKNOWN_MANUFACTURER: &str = "Unknown Manufacturer";

/// Errors that can occur while resolving one device description.
///
/// All of these are per-device: the scan logs them and moves on.
#[derive(Debug, Error)]
pub enum DescriptionError {
    /// The announced location is not an absolute http(s) URL.
    #[error("invalid location URL: {0}")]
    InvalidLocation(String),

    /// The description fetch failed at the transport level.
    #[error("description fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The description fetch returned a non-success status.
    #[error("description fetch returned HTTP {0}")]
    FetchStatus(u16),

    /// The description body was not parseable XML.
    #[error("description parse failed: {0}")]
    Parse(#[from] XmlTreeError),

    /// The document contains no `device` element.
    #[error("description has no device element")]
    NoDevice,

    /// The matched service's control URL is missing or unresolvable.
    #[error("invalid control URL: {0}")]
    ControlUrl(String),
}

/// Fetches and parses a device description.
///
/// Returns `Ok(None)` when the device exposes no AVTransport service, the
/// expected outcome for non-renderer devices. `address` must be the UDP
/// sender of the announcement; the description body is never trusted for it.
pub async fn resolve_location(
    client: &Client,
    location: &str,
    address: IpAddr,
) -> Result<Option<DeviceDescriptor>, DescriptionError> {
    let port = validate_location(location)?;

    let response = client
        .get(location)
        .timeout(Duration::from_secs(DESCRIPTION_TIMEOUT_SECS))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(DescriptionError::FetchStatus(status.as_u16()));
    }

    let body = response.text().await?;
    parse_device_description(&body, location, address, port)
}

/// Validates the location precondition and returns the description port.
fn validate_location(location: &str) -> Result<u16, DescriptionError> {
    let url =
        Url::parse(location).map_err(|_| DescriptionError::InvalidLocation(location.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(DescriptionError::InvalidLocation(location.to_string()));
    }
    url.port_or_known_default()
        .ok_or_else(|| DescriptionError::InvalidLocation(location.to_string()))
}

/// Parses a device-description body into a descriptor.
///
/// Pure function, separated from the fetch so tests can feed documents
/// directly. Tolerates both `root.device` and bare `device` shapes.
pub fn parse_device_description(
    xml: &str,
    location: &str,
    address: IpAddr,
    port: u16,
) -> Result<Option<DeviceDescriptor>, DescriptionError> {
    let root = XmlNode::parse(xml)?;
    let device = root.find_element("device").ok_or(DescriptionError::NoDevice)?;

    // First AVTransport-compatible service in document order wins. The
    // search covers the whole device subtree so renderers embedded below a
    // deviceList are found too.
    let service = device.find_first(&|n| {
        n.child_text("serviceType")
            .is_some_and(|st| st.starts_with(AVTRANSPORT_SERVICE_PREFIX))
    });
    let service = match service {
        Some(s) => s,
        None => return Ok(None),
    };

    let service_type = service.child_text("serviceType").unwrap_or_default();
    let control_rel = service
        .child_text("controlURL")
        .ok_or_else(|| DescriptionError::ControlUrl("missing controlURL".to_string()))?;
    let control_url = normalize_control_url(location, &control_rel)
        .ok_or(DescriptionError::ControlUrl(control_rel))?;

    let name = device
        .child_text("friendlyName")
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN_NAME.to_string());
    let manufacturer = device
        .child_text("manufacturer")
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN_MANUFACTURER.to_string());
    let device_type = device
        .child_text("deviceType")
        .map(|urn| device_class(&urn))
        .unwrap_or_else(|| DEFAULT_DEVICE_CLASS.to_string());

    Ok(Some(DeviceDescriptor {
        location: location.to_string(),
        name,
        manufacturer,
        device_type,
        av_transport: AvTransportEndpoint {
            service_type,
            control_url,
        },
        address: address.to_string(),
        port,
    }))
}

/// Extracts the device-class segment from a deviceType URN.
///
/// `urn:schemas-upnp-org:device:MediaRenderer:1` → `MediaRenderer`; URNs
/// with fewer than four `:`-segments fall back to the default class.
fn device_class(urn: &str) -> String {
    urn.split(':')
        .nth(3)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_DEVICE_CLASS)
        .to_string()
}
