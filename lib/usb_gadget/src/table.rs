//! The descriptor table: an ordered list mapping the `wValue`/`wIndex` pair of a
//! GetDescriptor request to the bytes that answer it. The device-controller driver owns a
//! [`DescriptorTable`] and resolves every request through [`DescriptorTable::lookup`].

use crate::{
    config, descriptors,
    strings::{self, SerialNumber},
};
use log::debug;
use usb::descriptor::LANGID_ENGLISH_US;

#[derive(Clone, Copy)]
enum Payload {
    Static(&'static [u8]),
    /// Served from the table's serial-number slot, which is only known at runtime.
    SerialNumber,
}

#[derive(Clone, Copy)]
struct Entry {
    value: u16,
    index: u16,
    payload: Payload,
}

const ENTRY_COUNT: usize = 8
    + if config::MTP_ENABLED { 1 } else { 0 }
    + if config::EXPERIMENTAL_ENABLED { 2 } else { 0 };

const ENTRIES: [Entry; ENTRY_COUNT] = build_entries();

const fn build_entries() -> [Entry; ENTRY_COUNT] {
    const PLACEHOLDER: Entry = Entry { value: 0, index: 0, payload: Payload::SerialNumber };
    let mut entries = [PLACEHOLDER; ENTRY_COUNT];
    let mut i = 0;

    entries[i] = Entry { value: 0x0100, index: 0x0000, payload: Payload::Static(&descriptors::DEVICE_DESCRIPTOR) };
    i += 1;
    entries[i] =
        Entry { value: 0x0600, index: 0x0000, payload: Payload::Static(&descriptors::DEVICE_QUALIFIER_DESCRIPTOR) };
    i += 1;
    entries[i] =
        Entry { value: 0x0200, index: 0x0000, payload: Payload::Static(&descriptors::CONFIG_DESCRIPTOR_HIGH_SPEED) };
    i += 1;
    // Other-speed configuration: what the device would offer had it enumerated at full
    // speed.
    entries[i] =
        Entry { value: 0x0700, index: 0x0000, payload: Payload::Static(&descriptors::CONFIG_DESCRIPTOR_FULL_SPEED) };
    i += 1;

    #[cfg(feature = "mtp")]
    {
        entries[i] = Entry {
            value: 0x0300 | strings::MTP_LABEL_INDEX as u16,
            index: LANGID_ENGLISH_US,
            payload: Payload::Static(&strings::MTP_LABEL),
        };
        i += 1;
    }

    #[cfg(feature = "experimental")]
    {
        entries[i] = Entry { value: 0x03ee, index: 0x0000, payload: Payload::Static(&strings::MICROSOFT_OS_STRING) };
        i += 1;
        entries[i] =
            Entry { value: 0x0000, index: 0xee04, payload: Payload::Static(&strings::MICROSOFT_COMPATIBLE_ID) };
        i += 1;
    }

    entries[i] = Entry { value: 0x0300, index: 0x0000, payload: Payload::Static(&strings::LANGUAGE_IDS) };
    i += 1;
    entries[i] = Entry {
        value: 0x0300 | strings::MANUFACTURER_INDEX as u16,
        index: LANGID_ENGLISH_US,
        payload: Payload::Static(&strings::MANUFACTURER_NAME),
    };
    i += 1;
    entries[i] = Entry {
        value: 0x0300 | strings::PRODUCT_INDEX as u16,
        index: LANGID_ENGLISH_US,
        payload: Payload::Static(&strings::PRODUCT_NAME),
    };
    i += 1;
    entries[i] = Entry {
        value: 0x0300 | strings::SERIAL_NUMBER_INDEX as u16,
        index: LANGID_ENGLISH_US,
        payload: Payload::SerialNumber,
    };
    i += 1;

    assert!(i == ENTRY_COUNT, "descriptor table population drifted from its computed size");
    entries
}

/// The descriptors the gadget serves, ready for the host. Built once by the
/// device-controller driver during initialization - before the bus is attached, so requests
/// can never observe a half-initialized serial number.
pub struct DescriptorTable {
    serial_number: SerialNumber,
}

impl DescriptorTable {
    pub fn new(hardware_id: u32) -> DescriptorTable {
        let serial_number = SerialNumber::from_hardware_id(hardware_id);
        debug!("USB descriptor table ready: {} entries, serial number '{}'", ENTRY_COUNT, serial_number);
        DescriptorTable { serial_number }
    }

    /// Resolve the `wValue`/`wIndex` pair of a GetDescriptor request. `None` means the
    /// device doesn't carry the requested descriptor and the request should be stalled.
    pub fn lookup(&self, value: u16, index: u16) -> Option<&[u8]> {
        let entry = ENTRIES.iter().find(|entry| entry.value == value && entry.index == index)?;
        Some(match entry.payload {
            Payload::Static(bytes) => bytes,
            Payload::SerialNumber => self.serial_number.descriptor_bytes(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_lookups() {
        let table = DescriptorTable::new(0);
        assert_eq!(table.lookup(0x0100, 0x0000).unwrap(), descriptors::DEVICE_DESCRIPTOR);
        assert_eq!(table.lookup(0x0600, 0x0000).unwrap(), descriptors::DEVICE_QUALIFIER_DESCRIPTOR);
        assert_eq!(table.lookup(0x0200, 0x0000).unwrap(), descriptors::CONFIG_DESCRIPTOR_HIGH_SPEED);
        assert_eq!(table.lookup(0x0700, 0x0000).unwrap(), descriptors::CONFIG_DESCRIPTOR_FULL_SPEED);
        assert_eq!(table.lookup(0x0300, 0x0000).unwrap(), strings::LANGUAGE_IDS);
        assert_eq!(table.lookup(0x0301, 0x0409).unwrap(), strings::MANUFACTURER_NAME);
        assert_eq!(table.lookup(0x0302, 0x0409).unwrap(), strings::PRODUCT_NAME);
    }

    #[test]
    fn test_unknown_selectors_are_not_found() {
        let table = DescriptorTable::new(0);
        assert!(table.lookup(0x0800, 0x0000).is_none());
        // Right string, wrong language.
        assert!(table.lookup(0x0301, 0x0000).is_none());
    }

    #[test]
    fn test_serial_number_lookup() {
        let table = DescriptorTable::new(1234);
        let serial = table.lookup(0x0303, 0x0409).unwrap();
        assert_eq!(serial, [12, 3, b'1', 0, b'2', 0, b'3', 0, b'4', 0, b'0', 0]);
    }

    #[cfg(feature = "mtp")]
    #[test]
    fn test_mtp_label_lookup() {
        let table = DescriptorTable::new(0);
        assert_eq!(table.lookup(0x0304, 0x0409).unwrap(), strings::MTP_LABEL);
    }

    #[cfg(feature = "experimental")]
    #[test]
    fn test_microsoft_os_lookups() {
        let table = DescriptorTable::new(0);
        assert_eq!(table.lookup(0x03ee, 0x0000).unwrap(), strings::MICROSOFT_OS_STRING);
        assert_eq!(table.lookup(0x0000, 0xee04).unwrap(), strings::MICROSOFT_COMPATIBLE_ID);
    }
}
