use bit_field::BitField;
use log::warn;

/// Standard descriptor type codes (USB 2.0 §9.4, plus the interface association code from the
/// ECN and the class-specific codes shared by the audio-family classes).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum DescriptorType {
    Device = 1,
    Configuration = 2,
    String = 3,
    Interface = 4,
    Endpoint = 5,
    DeviceQualifier = 6,
    OtherSpeedConfiguration = 7,
    InterfacePower = 8,
    Otg = 9,
    Debug = 10,
    InterfaceAssociation = 11,
    ClassInterface = 0x24,
    ClassEndpoint = 0x25,
}

impl DescriptorType {
    pub fn from_byte(byte: u8) -> Option<DescriptorType> {
        Some(match byte {
            1 => Self::Device,
            2 => Self::Configuration,
            3 => Self::String,
            4 => Self::Interface,
            5 => Self::Endpoint,
            6 => Self::DeviceQualifier,
            7 => Self::OtherSpeedConfiguration,
            8 => Self::InterfacePower,
            9 => Self::Otg,
            10 => Self::Debug,
            11 => Self::InterfaceAssociation,
            0x24 => Self::ClassInterface,
            0x25 => Self::ClassEndpoint,
            _ => return None,
        })
    }
}

/// The two bus speeds a USB 2.0 high-speed-capable device can enumerate at. Descriptor
/// contents that depend on the negotiated speed (packet sizes, polling intervals) are
/// parameterized by this.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Speed {
    Full,
    High,
}

pub const LANGID_ENGLISH_US: u16 = 0x0409;

pub const ENDPOINT_DIRECTION_IN: u8 = 0x80;

/// Form the `bEndpointAddress` of an IN (device-to-host) endpoint.
pub const fn endpoint_address_in(number: u8) -> u8 {
    number | ENDPOINT_DIRECTION_IN
}

pub fn is_in_endpoint(address: u8) -> bool {
    address.get_bit(7)
}

pub fn endpoint_number(address: u8) -> u8 {
    address.get_bits(0..4)
}

/// `bmAttributes` values for endpoint descriptors, including the isochronous
/// synchronization-type variants used by streaming audio.
pub mod endpoint_attributes {
    pub const CONTROL: u8 = 0x00;
    pub const ISOCHRONOUS_ASYNCHRONOUS: u8 = 0x05;
    pub const ISOCHRONOUS_ADAPTIVE: u8 = 0x09;
    pub const ISOCHRONOUS_FEEDBACK: u8 = 0x11;
    pub const BULK: u8 = 0x02;
    pub const INTERRUPT: u8 = 0x03;
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TransferType {
    Control,
    Isochronous,
    Bulk,
    Interrupt,
}

impl TransferType {
    pub fn from_attributes(attributes: u8) -> TransferType {
        match attributes.get_bits(0..2) {
            0b00 => TransferType::Control,
            0b01 => TransferType::Isochronous,
            0b10 => TransferType::Bulk,
            0b11 => TransferType::Interrupt,
            _ => unreachable!(),
        }
    }
}

bitflags::bitflags! {
    /// `bmAttributes` of a configuration descriptor. Bit 7 is reserved and must be set on
    /// every device; bus-powered devices set nothing else.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct ConfigAttributes: u8 {
        const RESERVED = 1 << 7;
        const SELF_POWERED = 1 << 6;
        const REMOTE_WAKEUP = 1 << 5;
    }
}

#[derive(Clone, Copy, Default, Debug)]
#[repr(C)]
pub struct DeviceDescriptor {
    pub length: u8,
    pub typ: u8,
    /// Binary-Coded Decimal representation of the USB Spec version the device supports.
    /// E.g. `2.10` is represented by `0x210`.
    pub bcd_usb: u16,
    pub class: u8,
    pub sub_class: u8,
    pub protocol: u8,
    /// Maximum packet size for endpoint 0 (only 8, 16, 32, and 64 are valid values)
    pub max_control_packet_size: u8,
    pub vendor_id: u16,
    pub product_id: u16,
    pub bcd_device: u16,
    /// Index of string descriptor describing the device's manufacturer.
    pub manufacturer_index: u8,
    pub product_index: u8,
    pub serial_number: u8,
    pub num_configurations: u8,
}

impl DeviceDescriptor {
    pub const SIZE: usize = 18;

    pub fn from_bytes(bytes: &[u8]) -> Option<DeviceDescriptor> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(DeviceDescriptor {
            length: bytes[0],
            typ: bytes[1],
            bcd_usb: u16::from_le_bytes([bytes[2], bytes[3]]),
            class: bytes[4],
            sub_class: bytes[5],
            protocol: bytes[6],
            max_control_packet_size: bytes[7],
            vendor_id: u16::from_le_bytes([bytes[8], bytes[9]]),
            product_id: u16::from_le_bytes([bytes[10], bytes[11]]),
            bcd_device: u16::from_le_bytes([bytes[12], bytes[13]]),
            manufacturer_index: bytes[14],
            product_index: bytes[15],
            serial_number: bytes[16],
            num_configurations: bytes[17],
        })
    }
}

#[derive(Clone, Copy, Default, Debug)]
#[repr(C)]
pub struct DeviceQualifierDescriptor {
    pub length: u8,
    pub typ: u8,
    pub bcd_usb: u16,
    pub class: u8,
    pub sub_class: u8,
    pub protocol: u8,
    pub max_control_packet_size: u8,
    pub num_configurations: u8,
    pub reserved: u8,
}

impl DeviceQualifierDescriptor {
    pub const SIZE: usize = 10;

    pub fn from_bytes(bytes: &[u8]) -> Option<DeviceQualifierDescriptor> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(DeviceQualifierDescriptor {
            length: bytes[0],
            typ: bytes[1],
            bcd_usb: u16::from_le_bytes([bytes[2], bytes[3]]),
            class: bytes[4],
            sub_class: bytes[5],
            protocol: bytes[6],
            max_control_packet_size: bytes[7],
            num_configurations: bytes[8],
            reserved: bytes[9],
        })
    }
}

#[derive(Clone, Copy, Default, Debug)]
#[repr(C)]
pub struct ConfigurationDescriptor {
    pub length: u8,
    pub typ: u8,
    /// Total length of this descriptor plus every interface, endpoint, and class-specific
    /// descriptor concatenated after it.
    pub total_length: u16,
    pub num_interfaces: u8,
    pub configuration_value: u8,
    pub configuration_index: u8,
    pub attributes: u8,
    /// Maximum bus power the device will draw in this configuration, in 2mA units.
    pub max_power: u8,
}

impl ConfigurationDescriptor {
    pub const SIZE: usize = 9;

    pub fn from_bytes(bytes: &[u8]) -> Option<ConfigurationDescriptor> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(ConfigurationDescriptor {
            length: bytes[0],
            typ: bytes[1],
            total_length: u16::from_le_bytes([bytes[2], bytes[3]]),
            num_interfaces: bytes[4],
            configuration_value: bytes[5],
            configuration_index: bytes[6],
            attributes: bytes[7],
            max_power: bytes[8],
        })
    }
}

#[derive(Clone, Copy, Default, Debug)]
#[repr(C)]
pub struct InterfaceDescriptor {
    pub length: u8,
    pub typ: u8,
    pub interface_number: u8,
    pub alternate_setting: u8,
    pub num_endpoints: u8,
    pub class: u8,
    pub sub_class: u8,
    pub protocol: u8,
    pub interface_index: u8,
}

impl InterfaceDescriptor {
    pub const SIZE: usize = 9;

    pub fn from_bytes(bytes: &[u8]) -> Option<InterfaceDescriptor> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(InterfaceDescriptor {
            length: bytes[0],
            typ: bytes[1],
            interface_number: bytes[2],
            alternate_setting: bytes[3],
            num_endpoints: bytes[4],
            class: bytes[5],
            sub_class: bytes[6],
            protocol: bytes[7],
            interface_index: bytes[8],
        })
    }
}

#[derive(Clone, Copy, Default, Debug)]
#[repr(C)]
pub struct EndpointDescriptor {
    pub length: u8,
    pub typ: u8,
    pub address: u8,
    pub attributes: u8,
    pub max_packet_size: u16,
    pub interval: u8,
}

impl EndpointDescriptor {
    pub const SIZE: usize = 7;

    pub fn from_bytes(bytes: &[u8]) -> Option<EndpointDescriptor> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(EndpointDescriptor {
            length: bytes[0],
            typ: bytes[1],
            address: bytes[2],
            attributes: bytes[3],
            max_packet_size: u16::from_le_bytes([bytes[4], bytes[5]]),
            interval: bytes[6],
        })
    }

    pub fn transfer_type(&self) -> TransferType {
        TransferType::from_attributes(self.attributes)
    }

    pub fn is_in(&self) -> bool {
        is_in_endpoint(self.address)
    }
}

/// Iterator over the `(bLength, bDescriptorType)`-framed sub-descriptors of a configuration
/// blob. Yields the raw type byte and the full bytes of each sub-descriptor, starting with
/// the configuration descriptor itself.
#[derive(Clone)]
pub struct DescriptorIter<'a> {
    bytes: &'a [u8],
}

impl<'a> DescriptorIter<'a> {
    pub fn new(bytes: &'a [u8]) -> DescriptorIter<'a> {
        DescriptorIter { bytes }
    }
}

impl<'a> Iterator for DescriptorIter<'a> {
    type Item = (u8, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.bytes.is_empty() {
            return None;
        }
        let length = self.bytes[0] as usize;
        if length < 2 || length > self.bytes.len() {
            warn!("descriptor chain is malformed: length byte {} with {} bytes left", length, self.bytes.len());
            self.bytes = &[];
            return None;
        }
        let (descriptor, rest) = self.bytes.split_at(length);
        self.bytes = rest;
        Some((descriptor[1], descriptor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_type_codes() {
        assert_eq!(DescriptorType::from_byte(2), Some(DescriptorType::Configuration));
        assert_eq!(DescriptorType::from_byte(11), Some(DescriptorType::InterfaceAssociation));
        assert_eq!(DescriptorType::from_byte(0x24), Some(DescriptorType::ClassInterface));
        assert_eq!(DescriptorType::from_byte(0x42), None);
    }

    #[test]
    fn test_endpoint_addresses() {
        assert_eq!(endpoint_address_in(3), 0x83);
        assert!(is_in_endpoint(0x83));
        assert!(!is_in_endpoint(0x03));
        assert_eq!(endpoint_number(0x83), 3);
    }

    #[test]
    fn test_transfer_type_decode() {
        assert_eq!(TransferType::from_attributes(endpoint_attributes::BULK), TransferType::Bulk);
        assert_eq!(TransferType::from_attributes(endpoint_attributes::INTERRUPT), TransferType::Interrupt);
        // The isochronous synchronization bits don't change the transfer type.
        assert_eq!(
            TransferType::from_attributes(endpoint_attributes::ISOCHRONOUS_FEEDBACK),
            TransferType::Isochronous
        );
    }

    #[test]
    fn test_config_attributes() {
        let attributes = ConfigAttributes::RESERVED.union(ConfigAttributes::SELF_POWERED);
        assert_eq!(attributes.bits(), 0xc0);
    }

    #[test]
    fn test_descriptor_iter() {
        let blob: &[u8] = &[
            5, 0x24, 0x00, 0x10, 0x01, // class-specific interface descriptor
            7, 5, 0x81, 0x02, 0x00, 0x02, 0, // endpoint descriptor
        ];
        let mut iter = DescriptorIter::new(blob);
        let (typ, bytes) = iter.next().unwrap();
        assert_eq!(typ, DescriptorType::ClassInterface as u8);
        assert_eq!(bytes.len(), 5);
        let (typ, bytes) = iter.next().unwrap();
        assert_eq!(typ, DescriptorType::Endpoint as u8);
        assert_eq!(bytes.len(), 7);
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_descriptor_iter_truncated() {
        // The length byte of the second descriptor overruns the blob.
        let blob: &[u8] = &[5, 0x24, 0x00, 0x10, 0x01, 9, 4, 0];
        let mut iter = DescriptorIter::new(blob);
        assert!(iter.next().is_some());
        assert!(iter.next().is_none());
    }
}
