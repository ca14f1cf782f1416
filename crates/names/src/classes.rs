//! Class, subclass, and protocol names per the USB class code tables.

/// Name for a bDeviceClass / bInterfaceClass value.
pub fn class(class: u8) -> Option<&'static str> {
    Some(match class {
        0x00 => "(Defined at Interface level)",
        0x01 => "Audio",
        0x02 => "Communications",
        0x03 => "Human Interface Device",
        0x05 => "Physical Interface Device",
        0x06 => "Imaging",
        0x07 => "Printer",
        0x08 => "Mass Storage",
        0x09 => "Hub",
        0x0a => "CDC Data",
        0x0b => "Chip/SmartCard",
        0x0d => "Content Security",
        0x0e => "Video",
        0x0f => "Personal Healthcare",
        0x10 => "Audio/Video",
        0x11 => "Billboard",
        0x12 => "USB Type-C Bridge",
        0x3c => "I3C",
        0x58 => "Xbox",
        0xdc => "Diagnostic",
        0xe0 => "Wireless",
        0xef => "Miscellaneous Device",
        0xfe => "Application Specific Interface",
        0xff => "Vendor Specific Class",
        _ => return None,
    })
}

/// Name for a (class, subclass) pair.
pub fn subclass(class: u8, subclass: u8) -> Option<&'static str> {
    Some(match (class, subclass) {
        (0x01, 0x01) => "Control Device",
        (0x01, 0x02) => "Streaming",
        (0x01, 0x03) => "MIDI Streaming",

        (0x02, 0x01) => "Direct Line",
        (0x02, 0x02) => "Abstract (modem)",
        (0x02, 0x03) => "Telephone",
        (0x02, 0x04) => "Multi-Channel",
        (0x02, 0x05) => "CAPI Control",
        (0x02, 0x06) => "Ethernet Networking",
        (0x02, 0x07) => "ATM Networking",
        (0x02, 0x08) => "Wireless Handset Control",
        (0x02, 0x09) => "Device Management",
        (0x02, 0x0a) => "Mobile Direct Line",
        (0x02, 0x0b) => "OBEX",
        (0x02, 0x0c) => "Ethernet Emulation",
        (0x02, 0x0d) => "Network Control Model",
        (0x02, 0x0e) => "Mobile Broadband Interface Model",

        (0x03, 0x00) => "No Subclass",
        (0x03, 0x01) => "Boot Interface Subclass",

        (0x06, 0x01) => "Still Image Capture",

        (0x07, 0x01) => "Printer",

        (0x08, 0x01) => "RBC (typically Flash)",
        (0x08, 0x02) => "SFF-8020i, MMC-2 (ATAPI)",
        (0x08, 0x03) => "QIC-157",
        (0x08, 0x04) => "Floppy (UFI)",
        (0x08, 0x05) => "SFF-8070i",
        (0x08, 0x06) => "SCSI",

        (0x09, 0x00) => "Unused",

        (0x0a, 0x00) => "Unused",

        (0x0e, 0x00) => "Undefined",
        (0x0e, 0x01) => "Video Control",
        (0x0e, 0x02) => "Video Streaming",
        (0x0e, 0x03) => "Video Interface Collection",

        (0x10, 0x01) => "AVControl Interface",
        (0x10, 0x02) => "AVData Video Streaming Interface",
        (0x10, 0x03) => "AVData Audio Streaming Interface",

        (0xdc, 0x01) => "Reprogrammable Diagnostics",

        (0xe0, 0x01) => "Radio Frequency",
        (0xe0, 0x02) => "Wireless USB Wire Adapter",

        (0xef, 0x01) => "Active Sync",
        (0xef, 0x02) => "?",
        (0xef, 0x03) => "Cable Based Association",
        (0xef, 0x04) => "RNDIS",
        (0xef, 0x05) => "USB3 Vision",

        (0xfe, 0x01) => "Device Firmware Update",
        (0xfe, 0x02) => "IRDA Bridge",
        (0xfe, 0x03) => "Test and Measurement",

        _ => return None,
    })
}

/// Name for a (class, subclass, protocol) triple.
pub fn protocol(class: u8, subclass: u8, protocol: u8) -> Option<&'static str> {
    Some(match (class, subclass, protocol) {
        (0x01, 0x01, 0x20) | (0x01, 0x02, 0x20) => "Audio Class 2.0",
        (0x01, 0x01, 0x30) | (0x01, 0x02, 0x30) => "Audio Class 3.0",

        (0x02, 0x02, 0x01) => "AT-commands (v.25ter)",
        (0x02, 0x02, 0x02) => "AT-commands (PCCA101)",
        (0x02, 0x02, 0x03) => "AT-commands (PCCA101 + wakeup)",
        (0x02, 0x02, 0x04) => "AT-commands (GSM)",
        (0x02, 0x02, 0x05) => "AT-commands (3G)",
        (0x02, 0x02, 0x06) => "AT-commands (CDMA)",
        (0x02, 0x02, 0xfe) => "Defined by command set descriptor",
        (0x02, 0x02, 0xff) => "Vendor Specific (MSFT RNDIS?)",

        (0x03, 0x01, 0x01) => "Keyboard",
        (0x03, 0x01, 0x02) => "Mouse",

        (0x07, 0x01, 0x01) => "Unidirectional",
        (0x07, 0x01, 0x02) => "Bidirectional",
        (0x07, 0x01, 0x03) => "IEEE 1284.4 compatible bidirectional",
        (0x07, 0x01, 0xff) => "Vendor Specific",

        (0x08, _, 0x00) => "Control/Bulk/Interrupt",
        (0x08, _, 0x01) => "Control/Bulk",
        (0x08, _, 0x50) => "Bulk-Only",
        (0x08, _, 0x62) => "UAS",

        (0x09, 0x00, 0x00) => "Full speed (or root) hub",
        (0x09, 0x00, 0x01) => "Single TT",
        (0x09, 0x00, 0x02) => "TT per port",
        (0x09, 0x00, 0x03) => "Super speed hub",

        (0x0e, 0x01, 0x01) | (0x0e, 0x02, 0x01) => "Protocol 15",

        (0xe0, 0x01, 0x01) => "Bluetooth",
        (0xe0, 0x01, 0x02) => "UWB Radio Control",
        (0xe0, 0x01, 0x03) => "RNDIS",
        (0xe0, 0x01, 0x04) => "Bluetooth AMP Controller",
        (0xe0, 0x02, 0x01) => "Host Wire Adapter Control/Data Streaming",
        (0xe0, 0x02, 0x02) => "Device Wire Adapter Control/Data Streaming",
        (0xe0, 0x02, 0x03) => "Device Wire Adapter Isochronous Streaming",

        (0xef, 0x01, 0x01) => "Microsoft ActiveSync",
        (0xef, 0x02, 0x01) => "Interface Association",
        (0xef, 0x02, 0x02) => "Wire Adapter Multifunction Peripheral",
        (0xef, 0x03, 0x01) => "Cable Based Association",

        (0xfe, 0x01, 0x00) => "Device Firmware Update",
        (0xfe, 0x01, 0x01) => "Device Firmware Update",
        (0xfe, 0x02, 0x00) => "IRDA Bridge",
        (0xfe, 0x03, 0x00) => "Test and Measurement",
        (0xfe, 0x03, 0x01) => "USB488",

        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_classes_resolve() {
        assert_eq!(class(0x03), Some("Human Interface Device"));
        assert_eq!(class(0x09), Some("Hub"));
        assert_eq!(class(0xff), Some("Vendor Specific Class"));
        assert_eq!(class(0x42), None);
    }

    #[test]
    fn subclass_requires_matching_class() {
        assert_eq!(subclass(0x01, 0x01), Some("Control Device"));
        assert_eq!(subclass(0x02, 0x02), Some("Abstract (modem)"));
        assert_eq!(subclass(0x01, 0x7f), None);
    }

    #[test]
    fn protocol_triples() {
        assert_eq!(protocol(0x03, 0x01, 0x01), Some("Keyboard"));
        assert_eq!(protocol(0x09, 0x00, 0x03), Some("Super speed hub"));
        assert_eq!(protocol(0x08, 0x06, 0x50), Some("Bulk-Only"));
        assert_eq!(protocol(0x03, 0x01, 0x7f), None);
    }
}
