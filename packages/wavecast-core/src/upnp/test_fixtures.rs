//! Shared test fixtures for device-description documents.
//!
//! These constants are used by multiple test modules to avoid duplication.

/// Standard MediaRenderer description: `root` wrapper, three services,
/// relative control URL.
pub const RENDERER_DESCRIPTION: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<root xmlns="urn:schemas-upnp-org:device-1-0">
  <specVersion><major>1</major><minor>0</minor></specVersion>
  <device>
    <deviceType>urn:schemas-upnp-org:device:MediaRenderer:1</deviceType>
    <friendlyName>  Living Room TV </friendlyName>
    <manufacturer>Acme Displays</manufacturer>
    <UDN>uuid:3f2a</UDN>
    <serviceList>
      <service>
        <serviceType>urn:schemas-upnp-org:service:ConnectionManager:1</serviceType>
        <controlURL>/upnp/control/ConnectionManager</controlURL>
      </service>
      <service>
        <serviceType>urn:schemas-upnp-org:service:RenderingControl:1</serviceType>
        <controlURL>/upnp/control/RenderingControl</controlURL>
      </service>
      <service>
        <serviceType>urn:schemas-upnp-org:service:AVTransport:1</serviceType>
        <serviceId>urn:upnp-org:serviceId:AVTransport</serviceId>
        <controlURL>/upnp//control//AVTransport</controlURL>
        <eventSubURL>/upnp/event/AVTransport</eventSubURL>
      </service>
    </serviceList>
  </device>
</root>"#;

/// Same document shape but every element carries a vendor namespace prefix.
pub const RENDERER_DESCRIPTION_PREFIXED: &str = r#"<?xml version="1.0"?>
<ns:root xmlns:ns="urn:schemas-upnp-org:device-1-0">
  <ns:device>
    <ns:deviceType>urn:schemas-upnp-org:device:MediaRenderer:2</ns:deviceType>
    <ns:friendlyName>Bedroom Speaker</ns:friendlyName>
    <ns:manufacturer>Acme Audio</ns:manufacturer>
    <ns:serviceList>
      <ns:service>
        <ns:serviceType>urn:schemas-upnp-org:service:AVTransport:2</ns:serviceType>
        <ns:controlURL>/ctl/av</ns:controlURL>
      </ns:service>
    </ns:serviceList>
  </ns:device>
</ns:root>"#;

/// A device exposing no AVTransport service (not a renderer).
pub const NON_RENDERER_DESCRIPTION: &str = r#"<?xml version="1.0"?>
<root>
  <device>
    <deviceType>urn:schemas-upnp-org:device:MediaServer:1</deviceType>
    <friendlyName>NAS</friendlyName>
    <manufacturer>Acme Storage</manufacturer>
    <serviceList>
      <service>
        <serviceType>urn:schemas-upnp-org:service:ContentDirectory:1</serviceType>
        <controlURL>/upnp/control/ContentDirectory</controlURL>
      </service>
      <service>
        <serviceType>urn:schemas-upnp-org:service:ConnectionManager:1</serviceType>
        <controlURL>/upnp/control/ConnectionManager</controlURL>
      </service>
    </serviceList>
  </device>
</root>"#;

/// Bare `device` root (no `root` wrapper), absolute control URL, and a
/// deviceType URN too short to decompose.
pub const BARE_DEVICE_DESCRIPTION: &str = r#"<device>
  <deviceType>renderer</deviceType>
  <serviceList>
    <service>
      <serviceType>urn:schemas-upnp-org:service:AVTransport:2</serviceType>
      <controlURL>http://192.168.1.77:49152/av/control</controlURL>
    </service>
  </serviceList>
</device>"#;

/// Renderer embedded below a server root device (nested deviceList).
pub const EMBEDDED_RENDERER_DESCRIPTION: &str = r#"<root>
  <device>
    <deviceType>urn:schemas-upnp-org:device:MediaServer:1</deviceType>
    <friendlyName>Combo Box</friendlyName>
    <manufacturer>Acme Hybrid</manufacturer>
    <serviceList>
      <service>
        <serviceType>urn:schemas-upnp-org:service:ContentDirectory:1</serviceType>
        <controlURL>/cd/control</controlURL>
      </service>
    </serviceList>
    <deviceList>
      <device>
        <deviceType>urn:schemas-upnp-org:device:MediaRenderer:1</deviceType>
        <friendlyName>Combo Renderer</friendlyName>
        <serviceList>
          <service>
            <serviceType>urn:schemas-upnp-org:service:AVTransport:1</serviceType>
            <controlURL>/embedded/av/control</controlURL>
          </service>
        </serviceList>
      </device>
    </deviceList>
  </device>
</root>"#;

/// Document with no `device` element anywhere.
pub const NO_DEVICE_DESCRIPTION: &str = r#"<root><specVersion><major>1</major></specVersion></root>"#;
