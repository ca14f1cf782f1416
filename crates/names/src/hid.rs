//! HID descriptor types, report item tags, usage pages/usages, and the
//! HID country code table.

/// Name for a HID class descriptor type (bDescriptorType in the HID
/// descriptor's sub-descriptor list).
pub fn hid_descriptor_type(ty: u8) -> Option<&'static str> {
    Some(match ty {
        0x21 => "HID",
        0x22 => "Report",
        0x23 => "Physical",
        _ => return None,
    })
}

/// Name for a report descriptor item tag (the item prefix byte with the two
/// size bits masked off).
pub fn report_tag(tag: u8) -> Option<&'static str> {
    Some(match tag {
        // Main items
        0x80 => "Input",
        0x90 => "Output",
        0xb0 => "Feature",
        0xa0 => "Collection",
        0xc0 => "End Collection",
        // Global items
        0x04 => "Usage Page",
        0x14 => "Logical Minimum",
        0x24 => "Logical Maximum",
        0x34 => "Physical Minimum",
        0x44 => "Physical Maximum",
        0x54 => "Unit Exponent",
        0x64 => "Unit",
        0x74 => "Report Size",
        0x84 => "Report ID",
        0x94 => "Report Count",
        0xa4 => "Push",
        0xb4 => "Pop",
        // Local items
        0x08 => "Usage",
        0x18 => "Usage Minimum",
        0x28 => "Usage Maximum",
        0x38 => "Designator Index",
        0x48 => "Designator Minimum",
        0x58 => "Designator Maximum",
        0x78 => "String Index",
        0x88 => "String Minimum",
        0x98 => "String Maximum",
        0xa8 => "Delimiter",
        _ => return None,
    })
}

/// Name for a usage page (upper 16 bits of an extended usage).
pub fn usage_page(page: u16) -> Option<&'static str> {
    Some(match page {
        0x00 => "Undefined",
        0x01 => "Generic Desktop Controls",
        0x02 => "Simulation Controls",
        0x03 => "VR Controls",
        0x04 => "Sport Controls",
        0x05 => "Game Controls",
        0x06 => "Generic Device Controls",
        0x07 => "Keyboard/Keypad",
        0x08 => "LEDs",
        0x09 => "Buttons",
        0x0a => "Ordinal",
        0x0b => "Telephony",
        0x0c => "Consumer",
        0x0d => "Digitizer",
        0x0f => "PID Page",
        0x10 => "Unicode",
        0x14 => "Alphanumeric Display",
        0x40 => "Medical Instruments",
        0x80 => "Monitor",
        0x81 => "Monitor Enumerated Values",
        0x82 => "VESA Virtual Controls",
        0x83 => "VESA Command",
        0x84 => "Power Device",
        0x85 => "Battery System",
        0x8c => "Bar Code Scanner",
        0x8d => "Scale",
        0x8e => "Magnetic Stripe Reading Devices",
        0x90 => "Camera Control",
        0x91 => "Arcade",
        0xf0 => "Cash Device",
        0xff00..=0xffff => "Vendor Defined Page",
        _ => return None,
    })
}

/// Name for an extended usage: `(page << 16) | usage_id`.
pub fn usage(extended: u32) -> Option<&'static str> {
    let page = (extended >> 16) as u16;
    let id = (extended & 0xffff) as u16;
    Some(match (page, id) {
        // Generic Desktop
        (0x01, 0x01) => "Pointer",
        (0x01, 0x02) => "Mouse",
        (0x01, 0x04) => "Joystick",
        (0x01, 0x05) => "Gamepad",
        (0x01, 0x06) => "Keyboard",
        (0x01, 0x07) => "Keypad",
        (0x01, 0x08) => "Multi-Axis Controller",
        (0x01, 0x30) => "X",
        (0x01, 0x31) => "Y",
        (0x01, 0x32) => "Z",
        (0x01, 0x33) => "Rx",
        (0x01, 0x34) => "Ry",
        (0x01, 0x35) => "Rz",
        (0x01, 0x36) => "Slider",
        (0x01, 0x37) => "Dial",
        (0x01, 0x38) => "Wheel",
        (0x01, 0x39) => "Hat Switch",
        (0x01, 0x3a) => "Counted Buffer",
        (0x01, 0x3b) => "Byte Count",
        (0x01, 0x3c) => "Motion Wakeup",
        (0x01, 0x3d) => "Start",
        (0x01, 0x3e) => "Select",
        (0x01, 0x80) => "System Control",
        (0x01, 0x81) => "System Power Down",
        (0x01, 0x82) => "System Sleep",
        (0x01, 0x83) => "System Wake Up",

        // LEDs
        (0x08, 0x01) => "Num Lock",
        (0x08, 0x02) => "Caps Lock",
        (0x08, 0x03) => "Scroll Lock",
        (0x08, 0x04) => "Compose",
        (0x08, 0x05) => "Kana",

        // Consumer
        (0x0c, 0x01) => "Consumer Control",
        (0x0c, 0xb0) => "Play",
        (0x0c, 0xb1) => "Pause",
        (0x0c, 0xb5) => "Scan Next Track",
        (0x0c, 0xb6) => "Scan Previous Track",
        (0x0c, 0xb7) => "Stop",
        (0x0c, 0xcd) => "Play/Pause",
        (0x0c, 0xe0) => "Volume",
        (0x0c, 0xe2) => "Mute",
        (0x0c, 0xe9) => "Volume Increment",
        (0x0c, 0xea) => "Volume Decrement",

        // Digitizer
        (0x0d, 0x01) => "Digitizer",
        (0x0d, 0x02) => "Pen",
        (0x0d, 0x04) => "Touch Screen",
        (0x0d, 0x05) => "Touch Pad",
        (0x0d, 0x20) => "Stylus",
        (0x0d, 0x22) => "Finger",
        (0x0d, 0x30) => "Tip Pressure",
        (0x0d, 0x32) => "In Range",
        (0x0d, 0x42) => "Tip Switch",

        // Buttons and ordinals carry their index in the usage
        (0x09, n) => return button_name(n),
        (0x0a, n) => return ordinal_name(n),

        _ => return None,
    })
}

fn button_name(n: u16) -> Option<&'static str> {
    Some(match n {
        0x00 => "No Button",
        0x01 => "Button 1 (Primary)",
        0x02 => "Button 2 (Secondary)",
        0x03 => "Button 3 (Tertiary)",
        _ => "Button",
    })
}

fn ordinal_name(n: u16) -> Option<&'static str> {
    if n == 0 { None } else { Some("Instance") }
}

/// Name for a HID bCountryCode value.
pub fn country_code(code: u8) -> Option<&'static str> {
    Some(match code {
        0 => "Not supported",
        1 => "Arabic",
        2 => "Belgian",
        3 => "Canadian-Bilingual",
        4 => "Canadian-French",
        5 => "Czech Republic",
        6 => "Danish",
        7 => "Finnish",
        8 => "French",
        9 => "German",
        10 => "Greek",
        11 => "Hebrew",
        12 => "Hungary",
        13 => "ISO International",
        14 => "Italian",
        15 => "Japan (Katakana)",
        16 => "Korean",
        17 => "Latin American",
        18 => "Netherlands/Dutch",
        19 => "Norwegian",
        20 => "Persian (Farsi)",
        21 => "Poland",
        22 => "Portuguese",
        23 => "Russia",
        24 => "Slovakia",
        25 => "Spanish",
        26 => "Swedish",
        27 => "Swiss/French",
        28 => "Swiss/German",
        29 => "Switzerland",
        30 => "Taiwan",
        31 => "Turkish-Q",
        32 => "UK",
        33 => "US",
        34 => "Yugoslavia",
        35 => "Turkish-F",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_tags_cover_main_items() {
        assert_eq!(report_tag(0x80), Some("Input"));
        assert_eq!(report_tag(0xa0), Some("Collection"));
        assert_eq!(report_tag(0xc0), Some("End Collection"));
        assert_eq!(report_tag(0x0c), None);
    }

    #[test]
    fn extended_usages() {
        assert_eq!(usage(0x0001_0002), Some("Mouse"));
        assert_eq!(usage(0x0001_0030), Some("X"));
        assert_eq!(usage(0x0007_1234), None);
        assert_eq!(usage(0x0009_0001), Some("Button 1 (Primary)"));
    }

    #[test]
    fn country_codes_bounded() {
        assert_eq!(country_code(33), Some("US"));
        assert_eq!(country_code(36), None);
    }

    #[test]
    fn vendor_defined_pages() {
        assert_eq!(usage_page(0xff00), Some("Vendor Defined Page"));
        assert_eq!(usage_page(0xffab), Some("Vendor Defined Page"));
    }
}
