//! USB-MIDI (audio class, MIDI streaming subclass), per the USB Device Class Definition for
//! MIDI Devices 1.0. A MIDI streaming interface multiplexes up to sixteen virtual "cables"
//! over one bulk endpoint pair; each cable is modelled as a quad of jacks (embedded and
//! external, in and out) wired together.

use super::{CS_ENDPOINT, CS_INTERFACE};

pub const SUBCLASS_MIDI_STREAMING: u8 = 0x03;

const SUBTYPE_MS_HEADER: u8 = 0x01;
const SUBTYPE_MIDI_IN_JACK: u8 = 0x02;
const SUBTYPE_MIDI_OUT_JACK: u8 = 0x03;
const SUBTYPE_MS_GENERAL: u8 = 0x01;

pub const JACK_EMBEDDED: u8 = 0x01;
pub const JACK_EXTERNAL: u8 = 0x02;

pub const MS_HEADER_LEN: usize = 7;
pub const IN_JACK_LEN: usize = 6;
pub const OUT_JACK_LEN: usize = 9;
/// One cable contributes two in jacks and two out jacks.
pub const JACK_QUAD_LEN: usize = 2 * IN_JACK_LEN + 2 * OUT_JACK_LEN;

// Jack IDs are assigned per cable: 4k+1 embedded in, 4k+2 external in, 4k+3 embedded out,
// 4k+4 external out.

pub const fn embedded_in_jack_id(cable: u8) -> u8 {
    4 * cable + 1
}

pub const fn external_in_jack_id(cable: u8) -> u8 {
    4 * cable + 2
}

pub const fn embedded_out_jack_id(cable: u8) -> u8 {
    4 * cable + 3
}

pub const fn external_out_jack_id(cable: u8) -> u8 {
    4 * cable + 4
}

/// Class-specific MS interface header (MIDI 1.0 Table 6-2). `total_length` covers this
/// header plus all jack descriptors that follow it.
pub const fn ms_header(total_length: u16) -> [u8; MS_HEADER_LEN] {
    let total = total_length.to_le_bytes();
    [MS_HEADER_LEN as u8, CS_INTERFACE, SUBTYPE_MS_HEADER, 0x00, 0x01, total[0], total[1]]
}

/// MIDI in jack descriptor (MIDI 1.0 Tables B-7/B-8).
pub const fn in_jack(jack_type: u8, id: u8) -> [u8; IN_JACK_LEN] {
    [IN_JACK_LEN as u8, CS_INTERFACE, SUBTYPE_MIDI_IN_JACK, jack_type, id, 0]
}

/// MIDI out jack descriptor with a single input pin (MIDI 1.0 Tables B-9/B-10).
pub const fn out_jack(jack_type: u8, id: u8, source_id: u8, source_pin: u8) -> [u8; OUT_JACK_LEN] {
    [OUT_JACK_LEN as u8, CS_INTERFACE, SUBTYPE_MIDI_OUT_JACK, jack_type, id, 1, source_id, source_pin, 0]
}

/// First four bytes of a class-specific MS bulk endpoint descriptor (MIDI 1.0 Table B-12).
/// The caller appends `num_jacks` embedded jack IDs, making the full descriptor
/// `4 + num_jacks` bytes as declared in the length byte here.
pub const fn cs_bulk_endpoint_header(num_jacks: u8) -> [u8; 4] {
    [4 + num_jacks, CS_ENDPOINT, SUBTYPE_MS_GENERAL, num_jacks]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jack_ids() {
        assert_eq!(embedded_in_jack_id(0), 1);
        assert_eq!(external_in_jack_id(0), 2);
        assert_eq!(embedded_out_jack_id(0), 3);
        assert_eq!(external_out_jack_id(0), 4);
        // The second cable's quad continues where the first left off.
        assert_eq!(embedded_in_jack_id(1), 5);
        assert_eq!(external_out_jack_id(15), 64);
    }

    #[test]
    fn test_descriptor_layouts() {
        assert_eq!(ms_header(7 + 30), [7, 0x24, 0x01, 0x00, 0x01, 37, 0]);
        assert_eq!(in_jack(JACK_EMBEDDED, 1), [6, 0x24, 0x02, 0x01, 1, 0]);
        assert_eq!(out_jack(JACK_EMBEDDED, 3, 2, 1), [9, 0x24, 0x03, 0x01, 3, 1, 2, 1, 0]);
        assert_eq!(cs_bulk_endpoint_header(2), [6, 0x25, 0x01, 2]);
    }

    #[test]
    fn test_quad_len() {
        let quad = in_jack(JACK_EMBEDDED, 1).len()
            + in_jack(JACK_EXTERNAL, 2).len()
            + out_jack(JACK_EMBEDDED, 3, 2, 1).len()
            + out_jack(JACK_EXTERNAL, 4, 1, 1).len();
        assert_eq!(quad, JACK_QUAD_LEN);
    }
}
