//! Shared helpers for the UPnP protocol modules.

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use url::Url;

// ─────────────────────────────────────────────────────────────────────────────
// XML Parsing Utilities
// ─────────────────────────────────────────────────────────────────────────────

/// Extracts text content from the first occurrence of an XML element.
///
/// Searches for an element by its local name (ignoring namespace prefixes)
/// and returns its decoded text content.
///
/// # Arguments
/// * `xml` - The XML string to search
/// * `element_name` - The local name of the element to find (without namespace prefix)
///
/// # Returns
/// The text content of the element with HTML entities decoded, or None if not found.
pub fn extract_xml_text(xml: &str, element_name: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let target_bytes = element_name.as_bytes();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == target_bytes => {
                if let Ok(text) = reader.read_text(e.name()) {
                    let decoded = html_escape::decode_html_entities(&text);
                    return Some(decoded.to_string());
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }
    None
}

// ─────────────────────────────────────────────────────────────────────────────
// XML Encoding
// ─────────────────────────────────────────────────────────────────────────────

/// Escapes XML special characters for embedding in XML content.
///
/// This escapes all five XML special characters as required by the XML spec:
/// - `&` → `&amp;`
/// - `<` → `&lt;`
/// - `>` → `&gt;`
/// - `"` → `&quot;`
/// - `'` → `&apos;`
///
/// Used for SOAP arguments (media URLs in particular).
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ─────────────────────────────────────────────────────────────────────────────
// Error Message Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Returns a bounded excerpt of a response body for error messages.
pub fn excerpt(body: &str, max_chars: usize) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= max_chars {
        trimmed.to_string()
    } else {
        let mut out: String = trimmed.chars().take(max_chars).collect();
        out.push_str("...");
        out
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Control URL Normalization
// ─────────────────────────────────────────────────────────────────────────────

/// Resolves a possibly-relative control URL against the origin of a device
/// description URL.
///
/// UPnP control URLs are conventionally absolute-from-origin, so resolution
/// uses only scheme + host + port of `base`, never its path. Runs of
/// consecutive `/` in the control path collapse to one. An already-absolute
/// `http(s)` control URL passes through with the same collapsing applied.
///
/// Returns `None` when either input is not a well-formed URL; callers treat
/// that as resolution failure for the service, not a crash.
pub fn normalize_control_url(base: &str, control: &str) -> Option<String> {
    let base_url = Url::parse(base).ok()?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return None;
    }

    // Absolute control URLs keep their own origin.
    if let Ok(abs) = Url::parse(control) {
        if matches!(abs.scheme(), "http" | "https") {
            let origin = origin_with_port(&abs)?;
            return Some(join_origin(&origin, abs.path()));
        }
    }

    let origin = origin_with_port(&base_url)?;
    Some(join_origin(&origin, control))
}

/// Renders `scheme://host:port` with the port always explicit, so bases like
/// `http://host:80/...` round-trip unchanged.
fn origin_with_port(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let port = url.port_or_known_default()?;
    Some(format!("{}://{}:{}", url.scheme(), host, port))
}

/// Joins an origin and a control path with exactly one separator, collapsing
/// any run of `/` inside the path. Query/fragment suffixes pass through.
fn join_origin(origin: &str, path: &str) -> String {
    let (path, suffix) = match path.find(['?', '#']) {
        Some(idx) => (&path[..idx], &path[idx..]),
        None => (path, ""),
    };

    let mut collapsed = String::with_capacity(path.len() + 1);
    let mut prev_slash = false;
    for ch in path.chars() {
        if ch == '/' {
            if !prev_slash {
                collapsed.push('/');
            }
            prev_slash = true;
        } else {
            collapsed.push(ch);
            prev_slash = false;
        }
    }

    let relative = collapsed.trim_start_matches('/');
    format!("{}/{}{}", origin, relative, suffix)
}
