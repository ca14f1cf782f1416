//! Host-side USB access.
//!
//! Wraps one rusb device together with a best-effort handle. Descriptor
//! dumps work from raw byte images, so this module either reads those
//! images over the control pipe or, for devices we cannot open, re-encodes
//! them from rusb's parsed view.

use descriptors::DumpContext;
use rusb::constants::{
    LIBUSB_DT_BOS, LIBUSB_DT_CONFIG, LIBUSB_REQUEST_GET_DESCRIPTOR, LIBUSB_REQUEST_GET_STATUS,
};
use rusb::{ConfigDescriptor, Context, Device, DeviceDescriptor, DeviceHandle};
use std::time::Duration;
use tracing::debug;

/// Timeout for every control transfer issued by the viewer.
pub const CTRL_TIMEOUT: Duration = Duration::from_millis(5000);

const DT_DEVICE_QUALIFIER: u8 = 0x06;
const DT_DEBUG: u8 = 0x0a;
const DT_REPORT: u16 = 0x22;
const DT_HUB: u16 = 0x29;
const DT_SUPERSPEED_HUB: u16 = 0x2a;

/// Pack a rusb version triple back into its bcd wire form.
pub fn bcd(v: rusb::Version) -> u16 {
    (u16::from(v.major()) << 8) | (u16::from(v.minor()) << 4) | u16::from(v.sub_minor())
}

/// One enumerated device plus an optional open session.
pub struct HostDevice {
    device: Device<Context>,
    handle: Option<DeviceHandle<Context>>,
}

impl HostDevice {
    /// Wrap a device, opening it if the host allows. Devices that refuse
    /// to open still get a descriptor dump from re-encoded images.
    pub fn new(device: Device<Context>) -> Self {
        let handle = match device.open() {
            Ok(h) => Some(h),
            Err(e) => {
                debug!(
                    "could not open device {:03}:{:03}: {}",
                    device.bus_number(),
                    device.address(),
                    e
                );
                None
            }
        };
        Self { device, handle }
    }

    pub fn bus_number(&self) -> u8 {
        self.device.bus_number()
    }

    pub fn address(&self) -> u8 {
        self.device.address()
    }

    pub fn descriptor(&self) -> rusb::Result<DeviceDescriptor> {
        self.device.device_descriptor()
    }

    /// Raw 18-byte device descriptor image.
    pub fn device_bytes(&self, desc: &DeviceDescriptor) -> Vec<u8> {
        let usb = bcd(desc.usb_version());
        let dev = bcd(desc.device_version());
        let mut buf = Vec::with_capacity(18);
        buf.push(18);
        buf.push(0x01);
        buf.extend_from_slice(&usb.to_le_bytes());
        buf.push(desc.class_code());
        buf.push(desc.sub_class_code());
        buf.push(desc.protocol_code());
        buf.push(desc.max_packet_size());
        buf.extend_from_slice(&desc.vendor_id().to_le_bytes());
        buf.extend_from_slice(&desc.product_id().to_le_bytes());
        buf.extend_from_slice(&dev.to_le_bytes());
        buf.push(desc.manufacturer_string_index().unwrap_or(0));
        buf.push(desc.product_string_index().unwrap_or(0));
        buf.push(desc.serial_number_string_index().unwrap_or(0));
        buf.push(desc.num_configurations());
        buf
    }

    /// Full configuration image for the given index, wire order.
    pub fn config_bytes(&self, index: u8) -> Option<Vec<u8>> {
        if let Some(buf) = self.read_config_raw(index) {
            return Some(buf);
        }
        let config = self.device.config_descriptor(index).ok()?;
        Some(encode_config(&config))
    }

    fn read_config_raw(&self, index: u8) -> Option<Vec<u8>> {
        let handle = self.handle.as_ref()?;
        let mut header = [0u8; 9];
        let n = handle
            .read_control(
                0x80,
                LIBUSB_REQUEST_GET_DESCRIPTOR,
                (u16::from(LIBUSB_DT_CONFIG) << 8) | u16::from(index),
                0,
                &mut header,
                CTRL_TIMEOUT,
            )
            .ok()?;
        if n < 9 {
            return None;
        }
        let total = usize::from(u16::from_le_bytes([header[2], header[3]]));
        let mut buf = vec![0u8; total.max(9)];
        let n = handle
            .read_control(
                0x80,
                LIBUSB_REQUEST_GET_DESCRIPTOR,
                (u16::from(LIBUSB_DT_CONFIG) << 8) | u16::from(index),
                0,
                &mut buf,
                CTRL_TIMEOUT,
            )
            .ok()?;
        buf.truncate(n);
        Some(buf)
    }

    pub fn string_descriptor(&self, index: u8) -> Option<String> {
        if index == 0 {
            return None;
        }
        let handle = self.handle.as_ref()?;
        handle.read_string_descriptor_ascii(index).ok()
    }

    /// Standard GET_STATUS on the device.
    pub fn device_status(&self) -> Option<u16> {
        let handle = self.handle.as_ref()?;
        let mut buf = [0u8; 2];
        let n = handle
            .read_control(0x80, LIBUSB_REQUEST_GET_STATUS, 0, 0, &mut buf, CTRL_TIMEOUT)
            .ok()?;
        if n < 2 {
            return None;
        }
        Some(u16::from_le_bytes(buf))
    }

    /// Wireless status blocks for WUSB devices: transmit power followed by
    /// the MAS availability bitmap, both via GET_STATUS selectors.
    pub fn wireless_status(&self) -> Option<(Vec<u8>, Vec<u8>)> {
        let handle = self.handle.as_ref()?;
        let mut power = [0u8; 2];
        let n = handle
            .read_control(0x80, LIBUSB_REQUEST_GET_STATUS, 0, 1, &mut power, CTRL_TIMEOUT)
            .ok()?;
        let power = power[..n].to_vec();
        let mut mas = [0u8; 32];
        let n = handle
            .read_control(0x80, LIBUSB_REQUEST_GET_STATUS, 0, 2, &mut mas, CTRL_TIMEOUT)
            .ok()?;
        Some((power, mas[..n].to_vec()))
    }

    fn read_descriptor(&self, dtype: u8, len: usize) -> Option<Vec<u8>> {
        let handle = self.handle.as_ref()?;
        let mut buf = vec![0u8; len];
        let n = handle
            .read_control(
                0x80,
                LIBUSB_REQUEST_GET_DESCRIPTOR,
                u16::from(dtype) << 8,
                0,
                &mut buf,
                CTRL_TIMEOUT,
            )
            .ok()?;
        buf.truncate(n);
        Some(buf)
    }

    pub fn qualifier_bytes(&self) -> Option<Vec<u8>> {
        self.read_descriptor(DT_DEVICE_QUALIFIER, 10)
    }

    pub fn debug_bytes(&self) -> Option<Vec<u8>> {
        self.read_descriptor(DT_DEBUG, 4)
    }

    /// BOS blob. The header is read first to learn wTotalLength.
    pub fn bos_bytes(&self) -> Option<Vec<u8>> {
        let header = self.read_descriptor(LIBUSB_DT_BOS, 5)?;
        if header.len() < 5 {
            return None;
        }
        let total = usize::from(u16::from_le_bytes([header[2], header[3]]));
        let blob = self.read_descriptor(LIBUSB_DT_BOS, total.max(5))?;
        if blob.len() < 5 {
            return None;
        }
        Some(blob)
    }

    /// Class-specific hub descriptor.
    ///
    /// `None` means the device is not open and the dump skips the hub
    /// section entirely; a failed transfer on an open device comes back as
    /// `Some(Err)` so the caller can render the error inline.
    pub fn hub_bytes(&self, super_speed: bool) -> Option<rusb::Result<Vec<u8>>> {
        let handle = self.handle.as_ref()?;
        let value = (if super_speed { DT_SUPERSPEED_HUB } else { DT_HUB }) << 8;
        let mut buf = [0u8; 256];
        let result = handle
            .read_control(
                0xa0,
                LIBUSB_REQUEST_GET_DESCRIPTOR,
                value,
                0,
                &mut buf,
                CTRL_TIMEOUT,
            )
            .map(|n| buf[..n].to_vec());
        Some(result)
    }

    /// GET_STATUS on one hub port, four bytes of wPortStatus/wPortChange.
    pub fn hub_port_status(&self, port: u8) -> Option<[u8; 4]> {
        let handle = self.handle.as_ref()?;
        let mut buf = [0u8; 4];
        let n = handle
            .read_control(
                0xa3,
                LIBUSB_REQUEST_GET_STATUS,
                0,
                u16::from(port),
                &mut buf,
                CTRL_TIMEOUT,
            )
            .ok()?;
        if n < 4 {
            return None;
        }
        Some(buf)
    }

    /// HID report descriptor for an interface.
    pub fn report_descriptor(&self, interface_number: u8, length: u16) -> Option<Vec<u8>> {
        let handle = self.handle.as_ref()?;
        let mut buf = vec![0u8; usize::from(length)];
        let n = handle
            .read_control(
                0x81,
                LIBUSB_REQUEST_GET_DESCRIPTOR,
                DT_REPORT << 8,
                u16::from(interface_number),
                &mut buf,
                CTRL_TIMEOUT,
            )
            .ok()?;
        buf.truncate(n);
        Some(buf)
    }
}

/// Re-encode a parsed configuration into its wire image, header first,
/// then each interface alternate with its endpoints and class-specific
/// extra bytes in bus order.
fn encode_config(config: &ConfigDescriptor) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut attrs = 0x80u8;
    if config.self_powered() {
        attrs |= 0x40;
    }
    if config.remote_wakeup() {
        attrs |= 0x20;
    }
    buf.push(9);
    buf.push(0x02);
    buf.extend_from_slice(&[0, 0]); // wTotalLength patched below
    buf.push(config.num_interfaces());
    buf.push(config.number());
    buf.push(config.description_string_index().unwrap_or(0));
    buf.push(attrs);
    buf.push((config.max_power() / 2) as u8);
    buf.extend_from_slice(config.extra());

    for interface in config.interfaces() {
        for alt in interface.descriptors() {
            buf.push(9);
            buf.push(0x04);
            buf.push(alt.interface_number());
            buf.push(alt.setting_number());
            buf.push(alt.num_endpoints());
            buf.push(alt.class_code());
            buf.push(alt.sub_class_code());
            buf.push(alt.protocol_code());
            buf.push(alt.description_string_index().unwrap_or(0));
            buf.extend_from_slice(alt.extra());
            for endpoint in alt.endpoint_descriptors() {
                let attrs = endpoint.transfer_type() as u8
                    | (endpoint.sync_type() as u8) << 2
                    | (endpoint.usage_type() as u8) << 4;
                buf.push(7);
                buf.push(0x05);
                buf.push(endpoint.address());
                buf.push(attrs);
                buf.extend_from_slice(&endpoint.max_packet_size().to_le_bytes());
                buf.push(endpoint.interval());
                buf.extend_from_slice(endpoint.extra().unwrap_or(&[]));
            }
        }
    }

    let total = buf.len() as u16;
    buf[2..4].copy_from_slice(&total.to_le_bytes());
    buf
}

/// Formatter-facing view of a host device: resolves string indices and
/// fetches report descriptors over the control pipe.
pub struct HostContext<'a> {
    device: &'a HostDevice,
}

impl<'a> HostContext<'a> {
    pub fn new(device: &'a HostDevice) -> Self {
        Self { device }
    }
}

impl DumpContext for HostContext<'_> {
    fn string_descriptor(&self, index: u8) -> Option<String> {
        self.device.string_descriptor(index)
    }

    fn report_descriptor(&self, interface_number: u8, length: u16) -> Option<Vec<u8>> {
        self.device.report_descriptor(interface_number, length)
    }
}
