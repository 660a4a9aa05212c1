//! SSDP-based renderer discovery.
//!
//! One scan owns one UDP socket and one result set. The socket joins the
//! SSDP multicast group, M-SEARCH rounds go out, and every unicast reply is
//! parsed in the receive loop. New locations are claimed immediately and
//! resolved on their own tokio task so a slow description fetch never blocks
//! reception. When the scan deadline fires, in-flight resolutions are
//! aborted, the socket is dropped, and whatever resolved in time is
//! returned. Nothing survives between scans.

use std::collections::HashSet;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tokio::time::timeout;

pub mod ssdp;
pub mod types;

pub use types::{
    AvTransportEndpoint, DeviceDescriptor, DiscoveryConfig, DiscoveryError, DiscoveryResult,
};

use crate::protocol_constants::{
    LIMITED_BROADCAST_ADDR, SSDP_COMPAT_GROUP, SSDP_MULTICAST_ADDR, SSDP_MULTICAST_GROUP,
    SSDP_MULTICAST_TTL,
};
use crate::upnp::description::resolve_location;
use ssdp::{build_msearch_message, parse_announcement, random_mx};

// ─────────────────────────────────────────────────────────────────────────────
// Result Set
// ─────────────────────────────────────────────────────────────────────────────

/// In-progress results for one scan.
///
/// `claimed` is keyed by the exact `location` string (no canonicalization);
/// a location is claimed when its resolution is dispatched, so duplicate
/// announcements racing an in-flight resolution are discarded too.
/// `devices` keeps insertion order.
#[derive(Default)]
struct ResultSet {
    claimed: HashSet<String>,
    devices: Vec<DeviceDescriptor>,
}

impl ResultSet {
    /// Claims a location for resolution. Returns false when already claimed.
    fn claim(&mut self, location: &str) -> bool {
        self.claimed.insert(location.to_string())
    }

    fn insert(&mut self, descriptor: DeviceDescriptor) {
        self.devices.push(descriptor);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Socket Setup
// ─────────────────────────────────────────────────────────────────────────────

/// Creates the scan socket bound to `0.0.0.0:0`.
///
/// Socket options are set via socket2 before the bind:
/// - SO_REUSEADDR for rapid restarts
/// - SO_REUSEPORT on Unix
/// - Multicast TTL of 4 per UPnP spec
/// - SO_BROADCAST for the broadcast fallback sends
fn create_socket() -> DiscoveryResult<UdpSocket> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))
        .map_err(DiscoveryError::SocketBind)?;

    if let Err(e) = socket.set_reuse_address(true) {
        log::warn!("[SSDP] failed to set SO_REUSEADDR: {}", e);
    }

    #[cfg(unix)]
    if let Err(e) = socket.set_reuse_port(true) {
        log::warn!("[SSDP] failed to set SO_REUSEPORT: {}", e);
    }

    if let Err(e) = socket.set_multicast_ttl_v4(SSDP_MULTICAST_TTL) {
        log::warn!("[SSDP] failed to set multicast TTL: {}", e);
    }

    if let Err(e) = socket.set_broadcast(true) {
        log::warn!("[SSDP] failed to set SO_BROADCAST: {}", e);
    }

    // Must be non-blocking before tokio takes the fd
    socket
        .set_nonblocking(true)
        .map_err(DiscoveryError::SocketBind)?;

    let bind_addr: SocketAddr = (Ipv4Addr::UNSPECIFIED, 0).into();
    socket
        .bind(&bind_addr.into())
        .map_err(DiscoveryError::SocketBind)?;

    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket).map_err(DiscoveryError::SocketBind)
}

/// Joins the SSDP multicast group, plus the compat group best-effort.
fn join_multicast(socket: &UdpSocket) -> DiscoveryResult<()> {
    socket
        .join_multicast_v4(SSDP_MULTICAST_GROUP, Ipv4Addr::UNSPECIFIED)
        .map_err(DiscoveryError::MulticastJoin)?;

    if let Err(e) = socket.join_multicast_v4(SSDP_COMPAT_GROUP, Ipv4Addr::UNSPECIFIED) {
        log::debug!("[SSDP] compat group join failed (ignored): {}", e);
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Scan Engine
// ─────────────────────────────────────────────────────────────────────────────

/// Discovers AVTransport-capable renderers within the given timeout.
///
/// Boundary form for the transport layer: transport-setup failures abort
/// the scan and yield an empty list (logged, not raised). Per-device
/// failures never abort a scan.
pub async fn discover(client: &Client, scan_timeout: Duration) -> Vec<DeviceDescriptor> {
    discover_with_config(client, &DiscoveryConfig::with_timeout(scan_timeout)).await
}

/// [`discover`] with full control over the scan parameters.
pub async fn discover_with_config(
    client: &Client,
    config: &DiscoveryConfig,
) -> Vec<DeviceDescriptor> {
    match run_scan(client, config).await {
        Ok(devices) => devices,
        Err(e) => {
            log::warn!("[SSDP] discovery aborted: {}", e);
            Vec::new()
        }
    }
}

/// Runs one scan, surfacing transport-setup errors to the caller.
pub async fn run_scan(
    client: &Client,
    config: &DiscoveryConfig,
) -> DiscoveryResult<Vec<DeviceDescriptor>> {
    let socket = Arc::new(create_socket()?);
    join_multicast(&socket)?;

    let mx = random_mx();
    let msg = build_msearch_message(mx);
    log::debug!(
        "[SSDP] scan starting: timeout={}ms, mx={}, {} send round(s)",
        config.timeout.as_millis(),
        mx,
        config.send_count
    );

    let results = Arc::new(Mutex::new(ResultSet::default()));
    let mut resolvers: JoinSet<()> = JoinSet::new();
    let start = std::time::Instant::now();

    let send_socket = Arc::clone(&socket);
    let send_task = async {
        for attempt in 0..config.send_count {
            if attempt > 0 {
                // Never let a resend round push the scan past its deadline.
                if start.elapsed() + config.retry_delay >= config.timeout {
                    break;
                }
                tokio::time::sleep(config.retry_delay).await;
            }
            send_round(&send_socket, msg.as_bytes(), config.broadcast_fallback, attempt).await;
        }
    };

    let recv_task = async {
        let mut buf = [0u8; 2048];

        while start.elapsed() < config.timeout {
            let remaining = config.timeout.saturating_sub(start.elapsed());
            match timeout(remaining, socket.recv_from(&mut buf)).await {
                Ok(Ok((amt, src))) => {
                    let datagram = String::from_utf8_lossy(&buf[..amt]).to_string();
                    handle_datagram(&datagram, src, client, &results, &mut resolvers).await;
                }
                Ok(Err(e)) => {
                    log::warn!("[SSDP] socket recv error: {}", e);
                }
                Err(_) => break, // Timeout
            }
        }
    };

    tokio::join!(send_task, recv_task);

    // Deadline reached: outstanding resolutions are cancelled, their results
    // discarded. The socket drops with the last Arc clone.
    resolvers.abort_all();
    drop(resolvers);

    let devices = std::mem::take(&mut *results.lock().await).devices;
    log::debug!(
        "[SSDP] scan complete after {}ms: {} renderer(s)",
        start.elapsed().as_millis(),
        devices.len()
    );
    Ok(devices)
}

/// Sends one M-SEARCH round: multicast, plus limited broadcast as fallback.
///
/// Send failures never abort the scan; a listen-only scan still collects
/// unsolicited announcements.
async fn send_round(socket: &UdpSocket, msg: &[u8], broadcast_fallback: bool, attempt: u64) {
    if let Err(e) = socket.send_to(msg, SSDP_MULTICAST_ADDR).await {
        let e = DiscoveryError::SendSearch(e);
        log::warn!("[SSDP] attempt {} to {}: {}", attempt + 1, SSDP_MULTICAST_ADDR, e);
    }

    if broadcast_fallback {
        if let Err(e) = socket.send_to(msg, LIMITED_BROADCAST_ADDR).await {
            log::debug!(
                "[SSDP] broadcast fallback send failed (attempt {}): {}",
                attempt + 1,
                e
            );
        }
    }
}

/// Handles one inbound datagram: parse, dedup on `location`, dispatch
/// resolution. Runs inline in the receive loop, so everything here must be
/// quick; the description fetch happens on the spawned task.
async fn handle_datagram(
    datagram: &str,
    source: SocketAddr,
    client: &Client,
    results: &Arc<Mutex<ResultSet>>,
    resolvers: &mut JoinSet<()>,
) {
    let announcement = parse_announcement(datagram, source);
    let location = match announcement.location() {
        Some(l) => l.to_string(),
        None => {
            log::trace!("[SSDP] announcement from {} without location, discarded", source);
            return;
        }
    };

    if !results.lock().await.claim(&location) {
        log::trace!("[SSDP] duplicate announcement for {}, discarded", location);
        return;
    }

    log::debug!("[SSDP] announcement from {}: {}", source, location);

    let client = client.clone();
    let results = Arc::clone(results);
    let address = source.ip();
    resolvers.spawn(async move {
        match resolve_location(&client, &location, address).await {
            Ok(Some(descriptor)) => {
                log::debug!(
                    "[SSDP] resolved renderer \"{}\" at {}:{}",
                    descriptor.name,
                    descriptor.address,
                    descriptor.port
                );
                results.lock().await.insert(descriptor);
            }
            Ok(None) => {
                log::debug!("[SSDP] {} exposes no AVTransport service, skipped", location);
            }
            Err(e) => {
                log::debug!("[SSDP] failed to resolve {}: {}", location, e);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(location: &str, name: &str) -> DeviceDescriptor {
        DeviceDescriptor {
            location: location.to_string(),
            name: name.to_string(),
            manufacturer: "Tests".into(),
            device_type: "MediaRenderer".into(),
            av_transport: AvTransportEndpoint {
                service_type: "urn:schemas-upnp-org:service:AVTransport:1".into(),
                control_url: format!("{}/ctl", location),
            },
            address: "192.168.1.50".into(),
            port: 49152,
        }
    }

    #[test]
    fn result_set_claims_each_location_once() {
        let mut set = ResultSet::default();
        assert!(set.claim("http://a/desc.xml"));
        assert!(!set.claim("http://a/desc.xml"));
        assert!(set.claim("http://b/desc.xml"));
        // Exact string match: no URL canonicalization at this stage.
        assert!(set.claim("http://A/desc.xml"));
    }

    #[test]
    fn result_set_keys_on_location_not_name() {
        let mut set = ResultSet::default();
        set.claim("http://a/desc.xml");
        set.claim("http://b/desc.xml");
        set.insert(descriptor("http://a/desc.xml", "Same Name"));
        set.insert(descriptor("http://b/desc.xml", "Same Name"));
        assert_eq!(set.devices.len(), 2);
        assert_eq!(set.devices[0].location, "http://a/desc.xml");
        assert_eq!(set.devices[1].location, "http://b/desc.xml");
    }

    #[tokio::test]
    async fn duplicate_announcements_dispatch_one_resolution() {
        let client = Client::new();
        let results = Arc::new(Mutex::new(ResultSet::default()));
        let mut resolvers: JoinSet<()> = JoinSet::new();
        let src: SocketAddr = "192.168.1.50:50000".parse().unwrap();

        // Nothing listens on port 1; the resolutions fail and are dropped.
        let datagram = "HTTP/1.1 200 OK\r\nLOCATION: http://127.0.0.1:1/desc.xml\r\n";
        handle_datagram(datagram, src, &client, &results, &mut resolvers).await;
        handle_datagram(datagram, src, &client, &results, &mut resolvers).await;
        assert_eq!(resolvers.len(), 1);

        // Announcements without a location never dispatch.
        handle_datagram("HTTP/1.1 200 OK\r\nSERVER: x\r\n", src, &client, &results, &mut resolvers)
            .await;
        assert_eq!(resolvers.len(), 1);

        resolvers.abort_all();
    }

    #[tokio::test]
    async fn empty_scan_times_out_and_socket_rebinds() {
        let client = Client::new();
        let config = DiscoveryConfig {
            timeout: Duration::from_millis(300),
            send_count: 1,
            retry_delay: Duration::from_millis(50),
            broadcast_fallback: false,
        };

        let start = std::time::Instant::now();
        let first = discover_with_config(&client, &config).await;
        // Restart-safe: a second scan reopens a fresh socket immediately.
        let second = discover_with_config(&client, &config).await;
        let elapsed = start.elapsed();

        assert!(first.is_empty());
        assert!(second.is_empty());
        // Two 300ms scans plus scheduling slack.
        assert!(elapsed < Duration::from_secs(3), "scans took {:?}", elapsed);
    }
}
