//! String descriptors. Everything except the serial number is fixed at compile time; the
//! serial number is formatted from the hardware-unique ID when the table is built.

use core::fmt::{self, Write};
use heapless::String;
use usb::{descriptor::DescriptorType, string_descriptor};

// String descriptor indices, as referenced from the device and interface descriptors.
pub const MANUFACTURER_INDEX: u8 = 1;
pub const PRODUCT_INDEX: u8 = 2;
pub const SERIAL_NUMBER_INDEX: u8 = 3;
pub const MTP_LABEL_INDEX: u8 = 4;

/// String descriptor 0: the language IDs the other strings are available in (US English).
pub const LANGUAGE_IDS: [u8; 4] = [4, DescriptorType::String as u8, 0x09, 0x04];

pub const MANUFACTURER_NAME: [u8; 14] = string_descriptor!(b"Poplar");
pub const PRODUCT_NAME: [u8; 28] = string_descriptor!(b"Poplar Gadget");

/// Interface label Windows shows for the MTP function.
#[cfg(feature = "mtp")]
pub const MTP_LABEL: [u8; 8] = string_descriptor!(b"MTP");

/// The magic string descriptor at index 0xee that tells Windows the device answers
/// GET_MS_DESCRIPTOR, using vendor request code 0xf8.
#[cfg(feature = "experimental")]
pub const MICROSOFT_OS_STRING: [u8; 18] = [
    18, 3, //
    b'M', 0, b'S', 0, b'F', 0, b'T', 0, b'1', 0, b'0', 0, b'0', 0, // "MSFT100"
    0xf8, 0, // bMS_VendorCode
];

/// Microsoft extended compatible ID descriptor binding the vendor interface to WINUSB.
#[cfg(feature = "experimental")]
pub const MICROSOFT_COMPATIBLE_ID: [u8; 40] = [
    40, 0, 0, 0, // dwLength: 16 byte header + one 24 byte function section
    0, 1, 4, 0, // version 1.00, wIndex 4 (extended compat ID)
    1, 0, 0, 0, 0, 0, 0, 0, // one function section
    crate::config::EXPERIMENTAL_INTERFACE,
    1,
    b'W', b'I', b'N', b'U', b'S', b'B', 0, 0, // compatibleID
    0, 0, 0, 0, 0, 0, 0, 0, // subCompatibleID
    0, 0, 0, 0, 0, 0,
];

pub const SERIAL_NUMBER_MAX_DIGITS: usize = 10;

/// The serial-number string descriptor, the one descriptor that isn't known at compile
/// time. Its backing buffer is sized for the longest possible value; the length byte
/// selects the formatted prefix.
pub struct SerialNumber {
    bytes: [u8; 2 + 2 * SERIAL_NUMBER_MAX_DIGITS],
}

impl SerialNumber {
    /// Format the descriptor from the hardware's unique ID (of which the low 24 bits are
    /// fused), as a decimal string with one UTF-16 code unit per digit.
    pub fn from_hardware_id(hardware_id: u32) -> SerialNumber {
        let mut value = hardware_id & 0xff_ffff;
        /*
         * Pad short serial numbers with an extra trailing zero: the macOS CDC-ACM driver
         * mishandles devices whose serial numbers have too few digits.
         */
        if value < 10_000_000 {
            value *= 10;
        }

        // Can't overflow the buffer: a padded 24-bit value is at most 9 digits.
        let mut digits: String<SERIAL_NUMBER_MAX_DIGITS> = String::new();
        write!(digits, "{}", value).unwrap();

        let mut bytes = [0; 2 + 2 * SERIAL_NUMBER_MAX_DIGITS];
        bytes[0] = (2 + 2 * digits.len()) as u8;
        bytes[1] = DescriptorType::String as u8;
        for (i, digit) in digits.as_bytes().iter().enumerate() {
            bytes[2 + 2 * i] = *digit;
        }
        SerialNumber { bytes }
    }

    /// The descriptor as it goes on the wire: the formatted prefix of the backing buffer,
    /// selected by the length byte.
    pub fn descriptor_bytes(&self) -> &[u8] {
        &self.bytes[..self.bytes[0] as usize]
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut i = 2;
        while i < self.bytes[0] as usize {
            f.write_char(self.bytes[i] as char)?;
            i += 2;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_serial_is_padded() {
        let serial = SerialNumber::from_hardware_id(1234);
        assert_eq!(serial.descriptor_bytes(), [12, 3, b'1', 0, b'2', 0, b'3', 0, b'4', 0, b'0', 0]);
    }

    #[test]
    fn test_long_serial_is_unchanged() {
        let serial = SerialNumber::from_hardware_id(12_345_678);
        assert_eq!(serial.descriptor_bytes().len(), 2 + 2 * 8);
        assert_eq!(serial.descriptor_bytes()[2], b'1');
        assert_eq!(serial.descriptor_bytes()[16], b'8');
    }

    #[test]
    fn test_hardware_id_is_masked_to_24_bits() {
        let serial = SerialNumber::from_hardware_id(0x0100_0001);
        // Masked to 1, then padded.
        assert_eq!(serial.descriptor_bytes(), [6, 3, b'1', 0, b'0', 0]);
    }

    #[test]
    fn test_largest_id_fits() {
        let serial = SerialNumber::from_hardware_id(0x00ff_ffff);
        assert_eq!(serial.descriptor_bytes().len(), 2 + 2 * 8);
    }

    #[test]
    fn test_display() {
        let mut rendered: String<16> = String::new();
        write!(rendered, "{}", SerialNumber::from_hardware_id(1234)).unwrap();
        assert_eq!(rendered.as_str(), "12340");
    }

    #[test]
    fn test_fixed_strings() {
        assert_eq!(LANGUAGE_IDS[0] as usize, LANGUAGE_IDS.len());
        assert_eq!(MANUFACTURER_NAME[0] as usize, MANUFACTURER_NAME.len());
        assert_eq!(PRODUCT_NAME[0] as usize, PRODUCT_NAME.len());
        assert_eq!(&MANUFACTURER_NAME[2..6], [b'P', 0, b'o', 0]);
    }
}
