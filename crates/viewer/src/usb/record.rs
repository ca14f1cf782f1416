//! Per-device record: one summary line plus the full descriptor dump.

use crate::usb::host::{bcd, HostContext, HostDevice};
use descriptors::{bos, config, device, hub};

/// Snapshot of one enumerated device. The summary feeds the list pane and
/// the details feed the dump pane; both are computed at enumeration time so
/// the TUI never touches the bus.
#[derive(Debug, Clone)]
pub struct DeviceRecord {
    pub bus: u8,
    pub address: u8,
    pub vendor_id: u16,
    pub product_id: u16,
    pub summary: String,
    pub details: Vec<String>,
}

impl DeviceRecord {
    /// Build the record for one host device.
    pub fn from_host(host: &HostDevice) -> crate::Result<Self> {
        let desc = host.descriptor()?;
        let ctx = HostContext::new(host);
        let bcd_usb = bcd(desc.usb_version());
        let super_speed = bcd_usb >= 0x0300;
        let is_hub = desc.class_code() == 0x09;

        // Summary names resolve from the ID tables first; device strings
        // only fill in for IDs the tables do not know.
        let manufacturer = names::vendor(desc.vendor_id())
            .map(str::to_string)
            .or_else(|| host.string_descriptor(desc.manufacturer_string_index().unwrap_or(0)))
            .unwrap_or_default();
        let product = names::product(desc.vendor_id(), desc.product_id())
            .map(str::to_string)
            .or_else(|| host.string_descriptor(desc.product_string_index().unwrap_or(0)))
            .unwrap_or_default();

        let summary = format!(
            "Bus {:03} Device {:03}: ID {:04x}:{:04x}\t{} {}",
            host.bus_number(),
            host.address(),
            desc.vendor_id(),
            desc.product_id(),
            manufacturer,
            product
        );

        // Device descriptor first, then every deeper dump the device type
        // and link speed call for.
        let raw = host.device_bytes(&desc);
        let mut details = device::device_descriptor(&raw, &ctx);

        if bcd_usb == 0x0250 {
            if let Some((power, mas)) = host.wireless_status() {
                details.extend(device::wireless_status(&power, &mas));
            }
        }

        let mut otg = false;
        for index in 0..desc.num_configurations() {
            match host.config_bytes(index) {
                Some(bytes) => {
                    otg |= config::has_otg(&bytes);
                    details.extend(config::config_descriptor(&bytes, &ctx));
                }
                None => {
                    details.push(format!("Couldn't get configuration descriptor {}", index));
                }
            }
        }

        if is_hub {
            // SuperSpeed hubs use the 0x2a descriptor and a distinct layout;
            // earlier hubs report their TT arrangement via bDeviceProtocol.
            let tt_type = if super_speed { 3 } else { desc.protocol_code() };
            match host.hub_bytes(super_speed) {
                Some(Ok(bytes)) => details.extend(hub_section(
                    &bytes,
                    tt_type,
                    super_speed,
                    |port| host.hub_port_status(port),
                )),
                Some(Err(e)) => details.push(format!("can't get hub descriptor, {}", e)),
                None => {}
            }
        }

        if bcd_usb >= 0x0201 {
            if let Some(bytes) = host.bos_bytes() {
                details.extend(bos::bos_descriptor(&bytes, &ctx));
            }
        }

        if bcd_usb == 0x0200 {
            if let Some(bytes) = host.qualifier_bytes() {
                if bytes.len() >= 2 && bytes[1] == 0x06 {
                    details.extend(device::device_qualifier(&bytes));
                }
            }
        }

        if let Some(bytes) = host.debug_bytes() {
            if bytes.len() >= 2 && bytes[1] == 0x0a {
                details.extend(device::debug_descriptor(&bytes));
            }
        }

        if let Some(status) = host.device_status() {
            details.extend(device::device_status(
                status,
                otg,
                bcd_usb == 0x0250,
                super_speed,
            ));
        }

        Ok(Self {
            bus: host.bus_number(),
            address: host.address(),
            vendor_id: desc.vendor_id(),
            product_id: desc.product_id(),
            summary,
            details,
        })
    }
}

/// Hub descriptor dump followed by the per-port status walk.
///
/// The port loop queries each port in turn and stops on the first
/// failure, leaving an inline warning so the reader sees how far the
/// walk got.
fn hub_section(
    bytes: &[u8],
    tt_type: u8,
    super_speed: bool,
    mut port_status: impl FnMut(u8) -> Option<[u8; 4]>,
) -> Vec<String> {
    if bytes.len() < 9 {
        return vec![format!("incomplete hub descriptor, {} bytes", bytes.len())];
    }

    let mut out = hub::hub_descriptor(bytes, tt_type);
    out.push(" Hub Port Status:".to_string());
    for port in 1..=hub::port_count(bytes) {
        match port_status(port) {
            Some(status) => out.push(hub::port_status_line(port, status, super_speed)),
            None => {
                out.push(format!("cannot read port {} status", port));
                break;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_format_is_stable() {
        let record = DeviceRecord {
            bus: 1,
            address: 4,
            vendor_id: 0x1d6b,
            product_id: 0x0002,
            summary: format!(
                "Bus {:03} Device {:03}: ID {:04x}:{:04x}\t{} {}",
                1, 4, 0x1d6b, 0x0002, "Linux Foundation", "2.0 root hub"
            ),
            details: vec![],
        };
        assert_eq!(
            record.summary,
            "Bus 001 Device 004: ID 1d6b:0002\tLinux Foundation 2.0 root hub"
        );
    }

    fn four_port_hub() -> Vec<u8> {
        vec![9, 0x29, 4, 0x09, 0x00, 50, 100, 0x00, 0xff]
    }

    #[test]
    fn hub_section_walks_every_port() {
        let lines = hub_section(&four_port_hub(), 0, false, |_| Some([0x03, 0x01, 0, 0]));

        assert!(lines.contains(&" Hub Port Status:".to_string()));
        for port in 1..=4 {
            assert!(lines.iter().any(|l| l.starts_with(&format!("   Port {}:", port))));
        }
    }

    #[test]
    fn hub_port_walk_stops_at_the_first_failure() {
        let lines = hub_section(&four_port_hub(), 0, false, |port| {
            if port < 3 {
                Some([0x03, 0x01, 0, 0])
            } else {
                None
            }
        });

        let header = lines
            .iter()
            .position(|l| l == " Hub Port Status:")
            .expect("port status header");
        assert!(lines[header + 1].starts_with("   Port 1:"));
        assert!(lines[header + 2].starts_with("   Port 2:"));
        assert_eq!(lines[header + 3], "cannot read port 3 status");
        assert_eq!(lines.len(), header + 4);
        assert!(!lines.iter().any(|l| l.starts_with("   Port 4:")));
    }

    #[test]
    fn short_hub_descriptor_renders_a_placeholder() {
        let lines = hub_section(&[9, 0x29, 4, 0x09], 0, false, |_| Some([0, 0, 0, 0]));
        assert_eq!(lines, vec!["incomplete hub descriptor, 4 bytes"]);
    }
}
