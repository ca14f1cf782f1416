//! Hub class descriptor and per-port status decoding.
//!
//! USB 2.x and USB 3.x hubs use different descriptor layouts and different
//! port status bit assignments; the device's bDeviceProtocol (the TT type,
//! 3 for SuperSpeed hubs) selects between them. The control transfers that
//! fetch these bytes live in the viewer; everything here is pure.

use crate::cursor::{byte, le16};
use crate::too_short;

/// Max bytes in the DeviceRemovable / PortPwrCtrlMask bitmaps (23 ports).
pub const HUB_STATUS_BYTELEN: usize = 3;

/// USB 3.x link states, indexed by the port link state field (bits 8:5).
const LINK_STATE: [&str; 12] = [
    "U0",
    "U1",
    "U2",
    "suspend",
    "SS.disabled",
    "Rx.Detect",
    "SS.Inactive",
    "Polling",
    "Recovery",
    "Hot Reset",
    "Compliance",
    "Loopback",
];

/// Format a hub descriptor. `tt_type` is the hub's bDeviceProtocol; 3 means
/// a SuperSpeed hub with the USB 3.x layout.
pub fn hub_descriptor(buf: &[u8], tt_type: u8) -> Vec<String> {
    let mut out = Vec::new();
    if buf.len() < 9 || usize::from(byte(buf, 0)) < 7 {
        too_short("  ", &mut out);
    }

    let hub_char = le16(buf, 3);

    out.push(" ".to_string());
    out.push("Hub Descriptor:".to_string());
    out.push(format!("  bLength             {:3}", byte(buf, 0)));
    out.push(format!("  bDescriptorType     {:3}", byte(buf, 1)));
    out.push(format!("  nNbrPorts           {:3}", byte(buf, 2)));
    out.push(format!("  wHubCharacteristic 0x{hub_char:04x}"));

    match hub_char & 0x03 {
        0 => out.push("    Ganged power switching".to_string()),
        1 => out.push("    Per-port power switching".to_string()),
        _ => out.push("    No power switching (usb 1.0)".to_string()),
    }
    if hub_char & 0x04 != 0 {
        out.push("    Compound device".to_string());
    }
    match (hub_char >> 3) & 0x03 {
        0 => out.push("    Ganged overcurrent protection".to_string()),
        1 => out.push("    Per-port overcurrent protection".to_string()),
        _ => out.push("    No overcurrent protection".to_string()),
    }
    // USB 3.0 hubs have no TT and no port indicators.
    if (1..3).contains(&tt_type) {
        let think_time = (hub_char >> 5) & 0x03;
        out.push(format!("    TT think time {} FS bits", (think_time + 1) * 8));
    }
    if tt_type != 3 && hub_char & (1 << 7) != 0 {
        out.push("    Port indicators".to_string());
    }
    out.push(format!("  bPwrOn2PwrGood      {:3} * 2 milli seconds", byte(buf, 5)));

    // USB 3.0 hubs report control current in units of 4 mA.
    if tt_type == 3 {
        out.push(format!(
            "  bHubContrCurrent   {:4} milli Ampere",
            u16::from(byte(buf, 6)) * 4
        ));
        out.push(format!("  bHubDecLat          0.{:1} micro seconds", byte(buf, 7)));
        out.push(format!(
            "  wHubDelay          {:4} nano seconds",
            (u16::from(byte(buf, 8)) << 4) + u16::from(byte(buf, 7))
        ));
    } else {
        out.push(format!("  bHubContrCurrent    {:3} milli Ampere", byte(buf, 6)));
    }
    let offset = if tt_type == 3 { 10 } else { 7 };

    // One bit per port (plus bit 0), so nNbrPorts determines the bitmap size.
    let l = (usize::from(byte(buf, 2)) >> 3) + 1;
    let l = l.min(HUB_STATUS_BYTELEN);
    let mut removable = "  DeviceRemovable   ".to_string();
    for i in 0..l {
        removable.push_str(&format!(" 0x{:02x}", byte(buf, offset + i)));
    }
    out.push(removable);

    if tt_type != 3 {
        let mut pwr_mask = "  PortPwrCtrlMask   ".to_string();
        for j in 0..l {
            pwr_mask.push_str(&format!(" 0x{:02x}", byte(buf, offset + l + j)));
        }
        out.push(pwr_mask);
    }
    out
}

/// The number of ports the hub descriptor claims.
pub fn port_count(buf: &[u8]) -> u8 {
    byte(buf, 2)
}

/// Format one port's 4-byte GET_STATUS result as a single line. Transient
/// change bits render in caps, steady states in lowercase.
pub fn port_status_line(port: u8, status: [u8; 4], super_speed: bool) -> String {
    let mut line = format!(
        "   Port {}: {:02x}{:02x}.{:02x}{:02x}",
        port, status[3], status[2], status[1], status[0]
    );

    if !super_speed {
        for (bit, label) in [
            (0x10, " C_RESET"),
            (0x08, " C_OC"),
            (0x04, " C_SUSPEND"),
            (0x02, " C_ENABLE"),
            (0x01, " C_CONNECT"),
        ] {
            if status[2] & bit != 0 {
                line.push_str(label);
            }
        }
        for (byte_idx, bit, label) in [
            (1, 0x10, " indicator"),
            (1, 0x08, " test"),
            (1, 0x04, " highspeed"),
            (1, 0x02, " lowspeed"),
            (1, 0x01, " power"),
            (0, 0x20, " L1"),
            (0, 0x10, " RESET"),
            (0, 0x08, " oc"),
            (0, 0x04, " suspend"),
            (0, 0x02, " enable"),
            (0, 0x01, " connect"),
        ] {
            if status[byte_idx] & bit != 0 {
                line.push_str(label);
            }
        }
    } else {
        for (bit, label) in [
            (0x80, " C_CONFIG_ERROR"),
            (0x40, " C_LINK_STATE"),
            (0x20, " C_BH_RESET"),
            (0x10, " C_RESET"),
            (0x08, " C_OC"),
            (0x01, " C_CONNECT"),
        ] {
            if status[2] & bit != 0 {
                line.push_str(label);
            }
        }
        if status[1] & 0x1c == 0 {
            line.push_str(" 5Gbps");
        } else {
            line.push_str(" Unknown Speed");
        }
        if status[1] & 0x02 != 0 {
            line.push_str(" power");
        }
        // Link state is bits 8:5.
        let link_state = usize::from((status[0] & 0xe0) >> 5) + (usize::from(status[1] & 0x1) << 3);
        if let Some(name) = LINK_STATE.get(link_state) {
            line.push_str(&format!(" {name}"));
        }
        for (bit, label) in [
            (0x10, " RESET"),
            (0x08, " oc"),
            (0x02, " enable"),
            (0x01, " connect"),
        ] {
            if status[0] & bit != 0 {
                line.push_str(label);
            }
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    // 4-port USB 2.0 hub, per-port power switching, per-port overcurrent.
    const HUB2: [u8; 9] = [9, 0x29, 4, 0x09, 0x00, 50, 100, 0x1e, 0xff];

    #[test]
    fn usb2_hub_descriptor() {
        let lines = hub_descriptor(&HUB2, 1);
        assert_eq!(lines[1], "Hub Descriptor:");
        assert_eq!(lines[4], "  nNbrPorts             4");
        assert!(lines.contains(&"    Per-port power switching".to_string()));
        assert!(lines.contains(&"    Per-port overcurrent protection".to_string()));
        assert!(lines.contains(&"    TT think time 8 FS bits".to_string()));
        assert!(lines.contains(&"  bHubContrCurrent    100 milli Ampere".to_string()));
        assert!(lines.iter().any(|l| l.starts_with("  DeviceRemovable     0x1e")));
        assert!(lines.iter().any(|l| l.starts_with("  PortPwrCtrlMask     0xff")));
    }

    #[test]
    fn usb3_hub_layout() {
        // USB 3.x hub: bHubDecLat and wHubDelay present, no power mask.
        let buf = [10, 0x2a, 4, 0x00, 0x00, 50, 25, 1, 2, 0x00, 0x1e, 0x00];
        let lines = hub_descriptor(&buf, 3);
        assert!(lines.contains(&"  bHubContrCurrent    100 milli Ampere".to_string()));
        assert!(lines.contains(&"  bHubDecLat          0.1 micro seconds".to_string()));
        assert!(lines.iter().any(|l| l.starts_with("  wHubDelay")));
        assert!(!lines.iter().any(|l| l.starts_with("  PortPwrCtrlMask")));
        assert!(!lines.iter().any(|l| l.contains("TT think time")));
    }

    #[test]
    fn short_hub_descriptor_warns() {
        let lines = hub_descriptor(&[9, 0x29, 4], 1);
        assert_eq!(lines[0], "  Warning: Descriptor too short");
        // Still renders the port count it can see.
        assert!(lines.iter().any(|l| l.contains("nNbrPorts")));
    }

    #[test]
    fn port_status_usb2_connected_enabled() {
        let line = port_status_line(1, [0x03, 0x01, 0x00, 0x00], false);
        assert_eq!(line, "   Port 1: 0000.0103 power enable connect");
    }

    #[test]
    fn port_status_usb2_change_bits_in_caps() {
        let line = port_status_line(2, [0x01, 0x01, 0x01, 0x00], false);
        assert!(line.contains(" C_CONNECT"));
        assert!(line.contains(" power"));
        assert!(line.contains(" connect"));
    }

    #[test]
    fn port_status_usb3_link_state() {
        // Connected, enabled, U0, 5Gbps, powered.
        let line = port_status_line(3, [0x03, 0x02, 0x00, 0x00], true);
        assert_eq!(line, "   Port 3: 0000.0203 5Gbps power U0 enable connect");
    }
}
