//! CCID (chip card interface device) class descriptor.

use crate::cursor::{byte, hex_bytes, junk, le32};

const CCID_LENGTH: usize = 54;

/// Format a CCID class descriptor, emitted from the extra bytes of a
/// smart-card interface (class 0x0b).
pub fn ccid_descriptor(buf: &[u8]) -> Vec<String> {
    let mut out = Vec::new();
    if buf.len() < CCID_LENGTH {
        out.push(format!(
            "      Warning: Descriptor too short: {}",
            hex_bytes(buf)
        ));
        return out;
    }

    out.push("      ChipCard Interface Descriptor:".to_string());
    out.push(format!("        bLength             {:5}", byte(buf, 0)));
    out.push(format!("        bDescriptorType     {:5}", byte(buf, 1)));
    out.push(format!(
        "        bcdCCID             {:2x}.{:02x}",
        byte(buf, 3),
        byte(buf, 2)
    ));
    if byte(buf, 3) != 1 || byte(buf, 2) != 0 {
        out.push("          (Warning: Only accurate for version 1.0)".to_string());
    }
    out.push(format!("        nMaxSlotIndex       {:5}", byte(buf, 4)));
    let voltage = match byte(buf, 5) {
        1 => "5.0V ",
        2 => "3.0V ",
        4 => "1.8V ",
        _ => "",
    };
    out.push(format!(
        "        bVoltageSupport     {:5} {}",
        byte(buf, 5),
        voltage
    ));

    let protocols = le32(buf, 6);
    let mut proto_line = format!("        dwProtocols         {:5} ", protocols & 0xffff);
    if protocols & 1 != 0 {
        proto_line.push_str(" T=0");
    }
    if protocols & 2 != 0 {
        proto_line.push_str(" T=1");
    }
    if protocols & !3 != 0 {
        proto_line.push_str(" (Invalid values detected)");
    }
    out.push(proto_line);

    out.push(format!("        dwDefaultClock      {:5}", le32(buf, 10)));
    out.push(format!("        dwMaxiumumClock     {:5}", le32(buf, 14)));
    out.push(format!("        bNumClockSupported  {:5}", byte(buf, 18)));
    out.push(format!("        dwDataRate      {:9} bps", le32(buf, 19)));
    out.push(format!("        dwMaxDataRate   {:9} bps", le32(buf, 23)));
    out.push(format!("        bNumDataRatesSupp.  {:5}", byte(buf, 27)));
    out.push(format!("        dwMaxIFSD           {:5}", le32(buf, 28)));
    out.push(format!("        dwSyncProtocols  {:08X} ", le32(buf, 32)));
    let sync = le32(buf, 32);
    if sync & 1 != 0 {
        out.push("          2-wire".to_string());
    }
    if sync & 2 != 0 {
        out.push("          3-wire".to_string());
    }
    if sync & 4 != 0 {
        out.push("          I2C".to_string());
    }
    out.push(format!("        dwMechanical     {:08X} ", le32(buf, 36)));
    let mech = le32(buf, 36);
    if mech & 1 != 0 {
        out.push("          accept".to_string());
    }
    if mech & 2 != 0 {
        out.push("          eject".to_string());
    }
    if mech & 4 != 0 {
        out.push("          capture".to_string());
    }
    if mech & 8 != 0 {
        out.push("          lock".to_string());
    }

    let features = le32(buf, 40);
    out.push(format!("        dwFeatures       {:08X}", features));
    for (bit, label) in [
        (0x0002u32, "          Auto configuration based on ATR"),
        (0x0004, "          Auto activation on insert"),
        (0x0008, "          Auto voltage selection"),
        (0x0010, "          Auto clock change"),
        (0x0020, "          Auto baud rate change"),
        (0x0040, "          Auto parameter negotiation made by CCID"),
        (0x0080, "          Auto PPS made by CCID"),
        (0x0100, "          CCID can set ICC in clock stop mode"),
        (0x0200, "          NAD value other than 0x00 accepted"),
        (0x0400, "          Auto IFSD exchange"),
    ] {
        if features & bit != 0 {
            out.push(label.to_string());
        }
    }
    if features & 0x0040 != 0 && features & 0x0080 != 0 {
        out.push("        WARNING: conflicting negotiation features".to_string());
    }
    match features & 0x00070000 {
        0x00010000 => out.push("          TPDU level exchange".to_string()),
        0x00020000 => out.push("          Short APDU level exchange".to_string()),
        0x00040000 => out.push("          Short and extended APDU level exchange".to_string()),
        0 => out.push("          Character level exchange".to_string()),
        _ => out.push("        WARNING: conflicting exchange levels".to_string()),
    }

    out.push(format!("        dwMaxCCIDMsgLen     {:5}", le32(buf, 44)));
    match byte(buf, 48) {
        0xff => out.push("        bClassGetResponse    echo".to_string()),
        b => out.push(format!("        bClassGetResponse    {:02X}", b)),
    }
    match byte(buf, 49) {
        0xff => out.push("        bClassEnvelope       echo".to_string()),
        b => out.push(format!("        bClassEnvelope       {:02X}", b)),
    }
    if byte(buf, 50) != 0 || byte(buf, 51) != 0 {
        out.push(format!(
            "        wlcdLayout           {} cols {} lines",
            byte(buf, 50),
            byte(buf, 51)
        ));
    } else {
        out.push("        wlcdLayout           none".to_string());
    }
    match byte(buf, 52) {
        0 => out.push("        bPINSupport          0 ".to_string()),
        b => {
            let mut line = format!("        bPINSupport          {} ", b);
            if b & 1 != 0 {
                line.push_str(" verification");
            }
            if b & 2 != 0 {
                line.push_str(" modification");
            }
            out.push(line);
        }
    }
    out.push(format!("        bMaxCCIDBusySlots   {:5}", byte(buf, 53)));

    if buf.len() > CCID_LENGTH {
        out.push(format!("        junk             {}", hex_bytes(&buf[CCID_LENGTH..])));
    } else if let Some(line) = junk(buf, "        ", CCID_LENGTH) {
        out.push(line);
    }
    out
}
