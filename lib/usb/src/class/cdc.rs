//! Communications Device Class (CDC), Abstract Control Model. The functional descriptors
//! follow CDC 1.1 §5.2.3; they sit between the communications interface descriptor and its
//! notification endpoint.

use super::CS_INTERFACE;

pub const CLASS_COMMUNICATIONS: u8 = 0x02;
pub const SUBCLASS_ACM: u8 = 0x02;
/// AT-command (V.250) protocol, the conventional value for virtual serial ports.
pub const PROTOCOL_AT_COMMANDS: u8 = 0x01;

pub const CLASS_CDC_DATA: u8 = 0x0a;

const SUBTYPE_HEADER: u8 = 0x00;
const SUBTYPE_CALL_MANAGEMENT: u8 = 0x01;
const SUBTYPE_ACM: u8 = 0x02;
const SUBTYPE_UNION: u8 = 0x06;

/// Total size of the four functional descriptors emitted for one ACM port.
pub const FUNCTIONAL_DESCRIPTORS_LEN: usize = 5 + 5 + 4 + 5;

/// Header functional descriptor (CDC 1.1 Table 26). `bcd_cdc` is the spec release the
/// function complies with, e.g. `0x0110`.
pub const fn header(bcd_cdc: u16) -> [u8; 5] {
    let bcd = bcd_cdc.to_le_bytes();
    [5, CS_INTERFACE, SUBTYPE_HEADER, bcd[0], bcd[1]]
}

/// Call management functional descriptor (CDC 1.1 Table 27).
pub const fn call_management(capabilities: u8, data_interface: u8) -> [u8; 5] {
    [5, CS_INTERFACE, SUBTYPE_CALL_MANAGEMENT, capabilities, data_interface]
}

/// Abstract control management functional descriptor (CDC 1.1 Table 28).
pub const fn abstract_control_management(capabilities: u8) -> [u8; 4] {
    [4, CS_INTERFACE, SUBTYPE_ACM, capabilities]
}

/// Union functional descriptor (CDC 1.1 Table 33), naming the controlling communications
/// interface and the subordinate data interface.
pub const fn union_interfaces(control_interface: u8, subordinate_interface: u8) -> [u8; 5] {
    [5, CS_INTERFACE, SUBTYPE_UNION, control_interface, subordinate_interface]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_functional_descriptors() {
        assert_eq!(header(0x0110), [5, 0x24, 0x00, 0x10, 0x01]);
        assert_eq!(call_management(0x01, 1), [5, 0x24, 0x01, 0x01, 1]);
        assert_eq!(abstract_control_management(0x06), [4, 0x24, 0x02, 0x06]);
        assert_eq!(union_interfaces(0, 1), [5, 0x24, 0x06, 0, 1]);

        let total = header(0).len()
            + call_management(0, 0).len()
            + abstract_control_management(0).len()
            + union_interfaces(0, 0).len();
        assert_eq!(total, FUNCTIONAL_DESCRIPTORS_LEN);
    }
}
