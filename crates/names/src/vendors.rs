//! Vendor and product ID names.
//!
//! A curated subset of the usb.ids database covering the vendors most likely
//! to show up on a development host. Unknown IDs resolve to `None` and are
//! rendered numerically by callers, the same fallback the full database has
//! for unregistered IDs.

/// Name for a vendor ID.
pub fn vendor(vendor_id: u16) -> Option<&'static str> {
    Some(match vendor_id {
        0x0403 => "Future Technology Devices International, Ltd",
        0x0424 => "Microchip Technology, Inc. (formerly SMSC)",
        0x045e => "Microsoft Corp.",
        0x046d => "Logitech, Inc.",
        0x04b3 => "IBM Corp.",
        0x04b4 => "Cypress Semiconductor Corp.",
        0x04ca => "Lite-On Technology Corp.",
        0x04d8 => "Microchip Technology, Inc.",
        0x04d9 => "Holtek Semiconductor, Inc.",
        0x04e8 => "Samsung Electronics Co., Ltd",
        0x04f2 => "Chicony Electronics Co., Ltd",
        0x04f3 => "Elan Microelectronics Corp.",
        0x0506 => "3Com Corp.",
        0x054c => "Sony Corp.",
        0x057e => "Nintendo Co., Ltd",
        0x058f => "Alcor Micro Corp.",
        0x05c6 => "Qualcomm, Inc.",
        0x05ac => "Apple, Inc.",
        0x05e3 => "Genesys Logic, Inc.",
        0x064e => "Suyin Corp.",
        0x067b => "Prolific Technology, Inc.",
        0x06cb => "Synaptics, Inc.",
        0x0781 => "SanDisk Corp.",
        0x07ca => "AVerMedia Technologies, Inc.",
        0x0801 => "MagTek",
        0x0846 => "NetGear, Inc.",
        0x08bb => "Texas Instruments",
        0x090c => "Silicon Motion, Inc. - Taiwan (formerly Feiya Technology Corp.)",
        0x093a => "Pixart Imaging, Inc.",
        0x0951 => "Kingston Technology",
        0x0a5c => "Broadcom Corp.",
        0x0b05 => "ASUSTek Computer, Inc.",
        0x0b95 => "ASIX Electronics Corp.",
        0x0bb4 => "HTC (High Tech Computer Corp.)",
        0x0bda => "Realtek Semiconductor Corp.",
        0x0c45 => "Microdia",
        0x0cf3 => "Qualcomm Atheros Communications",
        0x0d8c => "C-Media Electronics, Inc.",
        0x0e8d => "MediaTek Inc.",
        0x1038 => "SteelSeries ApS",
        0x10c4 => "Silicon Labs",
        0x1199 => "Sierra Wireless, Inc.",
        0x12d1 => "Huawei Technologies Co., Ltd.",
        0x13d3 => "IMC Networks",
        0x1532 => "Razer USA, Ltd",
        0x15a2 => "Freescale Semiconductor, Inc.",
        0x1686 => "ZOOM Corporation",
        0x17ef => "Lenovo",
        0x18d1 => "Google Inc.",
        0x1915 => "Nordic Semiconductor ASA",
        0x1d50 => "OpenMoko, Inc.",
        0x1d6b => "Linux Foundation",
        0x2109 => "VIA Labs, Inc.",
        0x2341 => "Arduino SA",
        0x2357 => "TP-Link",
        0x239a => "Adafruit",
        0x2e8a => "Raspberry Pi",
        0x3434 => "Keychron",
        0x413c => "Dell Computer Corp.",
        0x8086 => "Intel Corp.",
        _ => return None,
    })
}

/// Name for a (vendor, product) pair.
pub fn product(vendor_id: u16, product_id: u16) -> Option<&'static str> {
    Some(match (vendor_id, product_id) {
        (0x0403, 0x6001) => "FT232 Serial (UART) IC",
        (0x0403, 0x6010) => "FT2232C/D/H Dual UART/FIFO IC",
        (0x0403, 0x6014) => "FT232H Single HS USB-UART/FIFO IC",
        (0x046d, 0x082d) => "HD Pro Webcam C920",
        (0x046d, 0xc077) => "M105 Optical Mouse",
        (0x046d, 0xc31c) => "Keyboard K120",
        (0x046d, 0xc52b) => "Unifying Receiver",
        (0x0781, 0x5567) => "Cruzer Blade",
        (0x067b, 0x2303) => "PL2303 Serial Port",
        (0x05ac, 0x024f) => "Aluminium Keyboard (ANSI)",
        (0x0bda, 0x8153) => "RTL8153 Gigabit Ethernet Adapter",
        (0x10c4, 0xea60) => "CP210x UART Bridge",
        (0x18d1, 0x4ee1) => "Nexus/Pixel Device (MTP)",
        (0x1d50, 0x6018) => "Black Magic Debug Probe",
        (0x1d6b, 0x0001) => "1.1 root hub",
        (0x1d6b, 0x0002) => "2.0 root hub",
        (0x1d6b, 0x0003) => "3.0 root hub",
        (0x2109, 0x3431) => "Hub",
        (0x2341, 0x0043) => "Uno R3 (CDC ACM)",
        (0x2e8a, 0x0005) => "RP2 Boot",
        (0x2e8a, 0x000a) => "Raspberry Pi Pico SDK CDC UART",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vendors() {
        assert_eq!(vendor(0x1d6b), Some("Linux Foundation"));
        assert_eq!(vendor(0x046d), Some("Logitech, Inc."));
        assert_eq!(vendor(0x0000), None);
    }

    #[test]
    fn known_products() {
        assert_eq!(product(0x1d6b, 0x0002), Some("2.0 root hub"));
        assert_eq!(product(0x1d6b, 0x9999), None);
        assert_eq!(product(0x9999, 0x0002), None);
    }
}
