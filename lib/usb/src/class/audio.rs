//! USB Audio 1.0 class-specific descriptors, per the USB Device Class Definition for Audio
//! Devices 1.0. An audio function is an AudioControl interface describing a terminal/unit
//! topology, plus AudioStreaming interfaces that move the samples.

use super::CS_INTERFACE;

pub const SUBCLASS_AUDIO_CONTROL: u8 = 0x01;
pub const SUBCLASS_AUDIO_STREAMING: u8 = 0x02;

const SUBTYPE_AC_HEADER: u8 = 0x01;
const SUBTYPE_INPUT_TERMINAL: u8 = 0x02;
const SUBTYPE_OUTPUT_TERMINAL: u8 = 0x03;
const SUBTYPE_FEATURE_UNIT: u8 = 0x06;

const SUBTYPE_AS_GENERAL: u8 = 0x01;
const SUBTYPE_FORMAT_TYPE: u8 = 0x02;
const SUBTYPE_EP_GENERAL: u8 = 0x01;

pub const TERMINAL_USB_STREAMING: u16 = 0x0101;
pub const TERMINAL_DIGITAL_AUDIO: u16 = 0x0602;

/// Front left and front right (Audio 1.0 §3.7.2.3 channel config bits).
pub const CHANNELS_LEFT_RIGHT_FRONT: u16 = 0x0003;

pub const FORMAT_PCM: u16 = 0x0001;

pub const AC_HEADER_LEN: usize = 10;
pub const INPUT_TERMINAL_LEN: usize = 12;
pub const OUTPUT_TERMINAL_LEN: usize = 9;
pub const FEATURE_UNIT_STEREO_LEN: usize = 10;
pub const AS_GENERAL_LEN: usize = 7;
pub const FORMAT_TYPE_I_LEN: usize = 11;
pub const CS_ISO_ENDPOINT_LEN: usize = 7;

/// Class-specific AC interface header (Audio 1.0 Table 4-2) for a function with two
/// streaming interfaces in its collection. `total_length` covers the header and every
/// terminal/unit descriptor after it.
pub const fn ac_header(total_length: u16, streaming_interface_a: u8, streaming_interface_b: u8) -> [u8; AC_HEADER_LEN] {
    let total = total_length.to_le_bytes();
    [
        AC_HEADER_LEN as u8,
        CS_INTERFACE,
        SUBTYPE_AC_HEADER,
        0x00,
        0x01, // bcdADC 1.00
        total[0],
        total[1],
        2,
        streaming_interface_a,
        streaming_interface_b,
    ]
}

/// Input terminal descriptor (Audio 1.0 Table 4-3).
pub const fn input_terminal(id: u8, terminal_type: u16, channels: u8, channel_config: u16) -> [u8; INPUT_TERMINAL_LEN] {
    let terminal = terminal_type.to_le_bytes();
    let config = channel_config.to_le_bytes();
    [
        INPUT_TERMINAL_LEN as u8,
        CS_INTERFACE,
        SUBTYPE_INPUT_TERMINAL,
        id,
        terminal[0],
        terminal[1],
        0,
        channels,
        config[0],
        config[1],
        0,
        0,
    ]
}

/// Output terminal descriptor (Audio 1.0 Table 4-4).
pub const fn output_terminal(id: u8, terminal_type: u16, source_id: u8) -> [u8; OUTPUT_TERMINAL_LEN] {
    let terminal = terminal_type.to_le_bytes();
    [OUTPUT_TERMINAL_LEN as u8, CS_INTERFACE, SUBTYPE_OUTPUT_TERMINAL, id, terminal[0], terminal[1], 0, source_id, 0]
}

/// Feature unit descriptor for a stereo stream with one-byte control bitmaps (Audio 1.0
/// Table 4-7): a master control set plus one per channel.
pub const fn feature_unit_stereo(
    id: u8,
    source_id: u8,
    master_controls: u8,
    left_controls: u8,
    right_controls: u8,
) -> [u8; FEATURE_UNIT_STEREO_LEN] {
    [
        FEATURE_UNIT_STEREO_LEN as u8,
        CS_INTERFACE,
        SUBTYPE_FEATURE_UNIT,
        id,
        source_id,
        1, // bControlSize
        master_controls,
        left_controls,
        right_controls,
        0,
    ]
}

/// Class-specific AS interface descriptor (Audio 1.0 Table 4-19). `delay_frames` is the
/// internal pipeline delay the host should account for.
pub const fn as_general(terminal_link: u8, delay_frames: u8, format_tag: u16) -> [u8; AS_GENERAL_LEN] {
    let format = format_tag.to_le_bytes();
    [AS_GENERAL_LEN as u8, CS_INTERFACE, SUBTYPE_AS_GENERAL, terminal_link, delay_frames, format[0], format[1]]
}

/// Type I format descriptor with a single discrete sampling frequency (Audio Data Formats
/// 1.0 Table 2-1).
pub const fn format_type_i(channels: u8, subframe_size: u8, bit_resolution: u8, rate_hz: u32) -> [u8; FORMAT_TYPE_I_LEN] {
    assert!(rate_hz < 1 << 24);
    let rate = rate_hz.to_le_bytes();
    [
        FORMAT_TYPE_I_LEN as u8,
        CS_INTERFACE,
        SUBTYPE_FORMAT_TYPE,
        1, // bFormatType = FORMAT_TYPE_I
        channels,
        subframe_size,
        bit_resolution,
        1, // bSamFreqType = 1 discrete frequency
        rate[0],
        rate[1],
        rate[2],
    ]
}

/// Class-specific isochronous data endpoint descriptor (Audio 1.0 Table 4-21).
pub const fn cs_iso_endpoint(attributes: u8, lock_delay_units: u8, lock_delay: u16) -> [u8; CS_ISO_ENDPOINT_LEN] {
    let delay = lock_delay.to_le_bytes();
    [CS_ISO_ENDPOINT_LEN as u8, super::CS_ENDPOINT, SUBTYPE_EP_GENERAL, attributes, lock_delay_units, delay[0], delay[1]]
}
