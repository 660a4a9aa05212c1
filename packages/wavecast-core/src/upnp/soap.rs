//! Low-level SOAP protocol implementation for UPnP renderer control.
//!
//! Everything here is transport: envelope construction, the HTTP POST with
//! the UPnP-required headers, and mapping faults and error statuses into
//! [`SoapError`]. The playback action sequence lives in `playback.rs`.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

use crate::protocol_constants::{BODY_EXCERPT_MAX_CHARS, SOAP_TIMEOUT_SECS};
use crate::upnp::discovery::types::AvTransportEndpoint;
use crate::upnp::utils::{escape_xml, excerpt, extract_xml_text};

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during SOAP operations with a renderer.
#[derive(Debug, Error)]
pub enum SoapError {
    /// HTTP request to the renderer failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Renderer returned a non-success HTTP status without a SOAP fault.
    #[error("HTTP error {0}: {1}")]
    HttpStatus(u16, String),

    /// Renderer returned a SOAP fault response.
    #[error("SOAP fault: {0}")]
    Fault(String),
}

/// Convenient Result alias for SOAP operations.
pub type SoapResult<T> = Result<T, SoapError>;

// ─────────────────────────────────────────────────────────────────────────────
// SOAP Request/Response
// ─────────────────────────────────────────────────────────────────────────────

/// Builds the SOAP 1.1 envelope for one action.
///
/// The envelope must be a single line with no leading whitespace; some
/// SOAP parsers reject XML with whitespace before the root element. The
/// action element is namespaced to the device's own service type, and
/// argument values are XML-escaped.
pub(crate) fn build_envelope(service_type: &str, action: &str, args: &[(&str, &str)]) -> String {
    let mut body = format!(
        r#"<?xml version="1.0" encoding="utf-8"?><s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/"><s:Body><u:{} xmlns:u="{}">"#,
        action, service_type
    );

    for (k, v) in args {
        body.push_str(&format!("<{k}>{}</{k}>", escape_xml(v)));
    }

    body.push_str(&format!(r#"</u:{}></s:Body></s:Envelope>"#, action));
    body
}

/// Sends one SOAP action to a renderer's control endpoint.
///
/// Every control operation goes through here: the envelope is built from
/// the endpoint's service URN, POSTed to its control URL with the
/// `Content-Type` and quoted `SOAPAction` headers UPnP requires, and the
/// response is checked for faults before the HTTP status.
///
/// # Arguments
/// * `endpoint` - The renderer's AVTransport endpoint from discovery
/// * `action` - SOAP action name ("SetAVTransportURI", "Play")
/// * `args` - Action arguments in the order they appear in the body
///
/// # Returns
/// The raw response body, or a [`SoapError`] when the renderer faulted,
/// answered non-2xx, or could not be reached.
pub async fn send_soap_request(
    client: &Client,
    endpoint: &AvTransportEndpoint,
    action: &str,
    args: &[(&str, &str)],
) -> SoapResult<String> {
    let body = build_envelope(&endpoint.service_type, action, args);

    log::debug!(
        "[SOAP] {} -> {} (body: {} bytes)",
        action,
        endpoint.control_url,
        body.len()
    );

    let res = client
        .post(&endpoint.control_url)
        .header("Content-Type", "text/xml; charset=\"utf-8\"")
        .header(
            "SOAPAction",
            format!("\"{}#{}\"", endpoint.service_type, action),
        )
        .body(body)
        .timeout(Duration::from_secs(SOAP_TIMEOUT_SECS))
        .send()
        .await?;

    let status = res.status();
    let response_text = res.text().await?;

    // Check for a SOAP fault first: faults usually arrive with a 500 status
    // and the faultstring is the more useful message.
    if response_text.contains("<s:Fault>") || response_text.contains("<soap:Fault>") {
        let fault_msg = extract_fault_string(&response_text)
            .unwrap_or_else(|| "Unknown SOAP fault".to_string());
        return Err(SoapError::Fault(fault_msg));
    }

    if !status.is_success() {
        return Err(SoapError::HttpStatus(
            status.as_u16(),
            excerpt(&response_text, BODY_EXCERPT_MAX_CHARS),
        ));
    }

    Ok(response_text)
}

/// Pulls the human-readable `faultstring` out of a fault response.
fn extract_fault_string(xml: &str) -> Option<String> {
    extract_xml_text(xml, "faultstring")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVICE: &str = "urn:schemas-upnp-org:service:AVTransport:1";

    #[test]
    fn envelope_is_single_line_with_namespaces() {
        let env = build_envelope(SERVICE, "Play", &[("Speed", "1")]);
        assert!(env.starts_with(r#"<?xml version="1.0" encoding="utf-8"?><s:Envelope"#));
        assert!(!env.contains('\n'));
        assert!(env.contains(r#"xmlns:s="http://schemas.xmlsoap.org/soap/envelope/""#));
        assert!(env.contains(r#"s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/""#));
        assert!(env.contains(&format!(r#"<u:Play xmlns:u="{}"><Speed>1</Speed></u:Play>"#, SERVICE)));
    }

    #[test]
    fn envelope_preserves_argument_order() {
        let env = build_envelope(
            SERVICE,
            "SetAVTransportURI",
            &[("CurrentURI", "http://h/s.mp3"), ("CurrentURIMetaData", "")],
        );
        let uri_pos = env.find("<CurrentURI>").unwrap();
        let meta_pos = env.find("<CurrentURIMetaData>").unwrap();
        assert!(uri_pos < meta_pos);
        assert!(env.contains("<CurrentURIMetaData></CurrentURIMetaData>"));
    }

    #[test]
    fn envelope_escapes_argument_values() {
        let env = build_envelope(
            SERVICE,
            "SetAVTransportURI",
            &[("CurrentURI", "http://h/s.mp3?a=1&b=<2>'\"")],
        );
        assert!(env.contains("http://h/s.mp3?a=1&amp;b=&lt;2&gt;&apos;&quot;"));
        assert!(!env.contains("&b="));
    }

    #[test]
    fn fault_string_extraction() {
        let xml = r#"<s:Envelope><s:Body><s:Fault><faultcode>s:Client</faultcode><faultstring>UPnPError 716</faultstring></s:Fault></s:Body></s:Envelope>"#;
        assert_eq!(
            extract_fault_string(xml),
            Some("UPnPError 716".to_string())
        );
    }
}
