//! SSDP message construction and response parsing.
//!
//! Discovery sends an M-SEARCH to the SSDP multicast group and receives
//! HTTP-style header blocks back via unicast. Only the `location` header is
//! required by the engine; everything else rides along in the header map.

use std::collections::HashMap;
use std::net::SocketAddr;

use rand::Rng;

use crate::protocol_constants::{SSDP_MX_RANGE, SSDP_SEARCH_TARGET};

/// Builds the M-SEARCH message.
///
/// The HOST header always uses the multicast address per SSDP spec, even
/// when the message is sent via broadcast.
pub fn build_msearch_message(mx: u64) -> String {
    format!(
        "M-SEARCH * HTTP/1.1\r\n\
         HOST: 239.255.255.250:1900\r\n\
         MAN: \"ssdp:discover\"\r\n\
         MX: {}\r\n\
         ST: {}\r\n\r\n",
        mx, SSDP_SEARCH_TARGET
    )
}

/// Picks the MX value for one scan.
///
/// Randomized within the allowed range so responder replies spread out
/// instead of bursting at a fixed offset.
pub fn random_mx() -> u64 {
    rand::thread_rng().gen_range(SSDP_MX_RANGE)
}

/// One SSDP datagram parsed into a case-insensitive header map.
///
/// Consumed immediately by the discovery engine; never stored.
#[derive(Debug, Clone)]
pub struct RawAnnouncement {
    /// Address the datagram came from.
    pub source: SocketAddr,
    /// Header map with lower-cased keys and trimmed values.
    pub headers: HashMap<String, String>,
}

impl RawAnnouncement {
    /// Returns the `location` header, if the announcement carried one.
    pub fn location(&self) -> Option<&str> {
        self.headers.get("location").map(String::as_str)
    }
}

/// Parses one SSDP datagram into a [`RawAnnouncement`].
///
/// Each line splits on its first colon (preserving the colons inside URLs);
/// keys are lower-cased and values trimmed. Lines without a colon, the
/// status line included, are discarded.
pub fn parse_announcement(datagram: &str, source: SocketAddr) -> RawAnnouncement {
    let mut headers = HashMap::new();

    for line in datagram.lines() {
        if let Some(idx) = line.find(':') {
            let key = line[..idx].trim().to_ascii_lowercase();
            let value = line[idx + 1..].trim();
            if !key.is_empty() {
                headers.insert(key, value.to_string());
            }
        }
    }

    RawAnnouncement { source, headers }
}
