//! Playback control for resolved renderers.
//!
//! Starting playback takes exactly two AVTransport actions, strictly
//! sequential: `SetAVTransportURI` loads the media URL, then `Play` starts
//! the transport. The second action is never sent when the first fails.

use reqwest::Client;
use serde::Serialize;

use crate::upnp::discovery::types::DeviceDescriptor;
use crate::upnp::soap::{send_soap_request, SoapResult};

/// Result of a playback attempt.
///
/// `play` never raises past its boundary: every transport or protocol
/// failure is folded into this value so the caller can always produce a
/// well-formed response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayOutcome {
    /// True when both control actions succeeded.
    pub success: bool,
    /// Failure description (status and body excerpt for HTTP errors).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlayOutcome {
    /// Successful outcome.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// Failed outcome with a description.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Commands a renderer to play a media URL.
///
/// # Arguments
/// * `client` - The HTTP client to use for the requests
/// * `device` - A descriptor from discovery (carries the control endpoint)
/// * `media_url` - The media URL the renderer should fetch and play
pub async fn play(client: &Client, device: &DeviceDescriptor, media_url: &str) -> PlayOutcome {
    match play_sequence(client, device, media_url).await {
        Ok(()) => PlayOutcome::ok(),
        Err(e) => {
            log::warn!(
                "[SOAP] play failed for {} ({}): {}",
                device.name,
                device.av_transport.control_url,
                e
            );
            PlayOutcome::failed(e.to_string())
        }
    }
}

/// The two-action sequence. `?` between the actions is the ordering
/// guarantee: `Play` is only built after `SetAVTransportURI` returned 2xx.
async fn play_sequence(
    client: &Client,
    device: &DeviceDescriptor,
    media_url: &str,
) -> SoapResult<()> {
    let endpoint = &device.av_transport;

    log::info!(
        "[SOAP] SetAVTransportURI: device={}, uri={}",
        device.name,
        media_url
    );

    send_soap_request(
        client,
        endpoint,
        "SetAVTransportURI",
        &[("CurrentURI", media_url), ("CurrentURIMetaData", "")],
    )
    .await?;

    log::debug!("[SOAP] SetAVTransportURI succeeded, sending Play");

    send_soap_request(client, endpoint, "Play", &[("Speed", "1")]).await?;

    log::info!("[SOAP] Play succeeded for {}", device.name);

    Ok(())
}
