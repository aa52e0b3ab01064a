//! Numeric configuration for the gadget: identity, packet sizes, polling intervals, and the
//! compile-time assignment of interface and endpoint numbers to the enabled functions.
//!
//! Functions are laid out in a fixed order - serial ports, MIDI, MTP, audio, vendor - and
//! both interface and endpoint numbers are allocated sequentially along it, so disabling a
//! function shifts everything after it down. All of this is `const` arithmetic: the numbers
//! are baked into the descriptor blobs at compile time.

use usb::descriptor::Speed;

pub const VENDOR_ID: u16 = 0x16c0;
pub const PRODUCT_ID: u16 = 0x0483;
/// BCD device release; the host-side tooling uses this to tell board revisions apart.
pub const DEVICE_RELEASE: u16 = 0x0279;
pub const USB_RELEASE: u16 = 0x0200;

pub const EP0_MAX_PACKET_SIZE: u8 = 64;
pub const MAX_POWER_MA: u16 = 100;

pub const CDC_PORT_COUNT: usize = if cfg!(feature = "triple_serial") {
    3
} else if cfg!(feature = "dual_serial") {
    2
} else if cfg!(feature = "cdc") {
    1
} else {
    0
};

pub const MIDI_ENABLED: bool = cfg!(feature = "midi");
pub const MTP_ENABLED: bool = cfg!(feature = "mtp");
pub const AUDIO_ENABLED: bool = cfg!(feature = "audio");
pub const EXPERIMENTAL_ENABLED: bool = cfg!(feature = "experimental");

/// Number of virtual MIDI cables multiplexed over the MIDI endpoint pair.
pub const MIDI_CABLE_COUNT: usize = if cfg!(feature = "midi16") { 16 } else { 1 };

const _: () = assert!(MIDI_CABLE_COUNT >= 1 && MIDI_CABLE_COUNT <= 16, "the MIDI cable count must be between 1 and 16");

/// Device class triple. With a CDC function on board the device presents as an IAD-grouped
/// composite (Misc/Common/IAD), so the host binds drivers per interface-association rather
/// than per device; otherwise class 0 defers everything to the interfaces.
pub const DEVICE_CLASS: u8 = if CDC_PORT_COUNT > 0 { 0xef } else { 0x00 };
pub const DEVICE_SUB_CLASS: u8 = if CDC_PORT_COUNT > 0 { 0x02 } else { 0x00 };
pub const DEVICE_PROTOCOL: u8 = if CDC_PORT_COUNT > 0 { 0x01 } else { 0x00 };

// Interface numbering. Each CDC port takes two interfaces (status + data), audio takes
// three (control + two streaming), everything else takes one.

pub const fn cdc_status_interface(port: usize) -> u8 {
    (2 * port) as u8
}

pub const fn cdc_data_interface(port: usize) -> u8 {
    cdc_status_interface(port) + 1
}

pub const MIDI_INTERFACE: u8 = (2 * CDC_PORT_COUNT) as u8;
pub const MTP_INTERFACE: u8 = MIDI_INTERFACE + if MIDI_ENABLED { 1 } else { 0 };
pub const AUDIO_CONTROL_INTERFACE: u8 = MTP_INTERFACE + if MTP_ENABLED { 1 } else { 0 };
pub const AUDIO_STREAM_IN_INTERFACE: u8 = AUDIO_CONTROL_INTERFACE + 1;
pub const AUDIO_STREAM_OUT_INTERFACE: u8 = AUDIO_CONTROL_INTERFACE + 2;
pub const EXPERIMENTAL_INTERFACE: u8 = AUDIO_CONTROL_INTERFACE + if AUDIO_ENABLED { 3 } else { 0 };

pub const INTERFACE_COUNT: u8 = EXPERIMENTAL_INTERFACE + if EXPERIMENTAL_ENABLED { 1 } else { 0 };

const _: () = assert!(INTERFACE_COUNT > 0, "at least one USB function must be enabled");

// Endpoint numbering. The vendor interface sits on fixed endpoint 1; everything else is
// allocated from 2 upwards, one number per endpoint, in function order.

pub const EXPERIMENTAL_ENDPOINT: u8 = 1;

pub const fn cdc_acm_endpoint(port: usize) -> u8 {
    (2 + 3 * port) as u8
}

pub const fn cdc_rx_endpoint(port: usize) -> u8 {
    cdc_acm_endpoint(port) + 1
}

pub const fn cdc_tx_endpoint(port: usize) -> u8 {
    cdc_acm_endpoint(port) + 2
}

const ENDPOINTS_AFTER_CDC: u8 = (2 + 3 * CDC_PORT_COUNT) as u8;

pub const MIDI_RX_ENDPOINT: u8 = ENDPOINTS_AFTER_CDC;
pub const MIDI_TX_ENDPOINT: u8 = MIDI_RX_ENDPOINT + 1;
const ENDPOINTS_AFTER_MIDI: u8 = ENDPOINTS_AFTER_CDC + if MIDI_ENABLED { 2 } else { 0 };

pub const MTP_TX_ENDPOINT: u8 = ENDPOINTS_AFTER_MIDI;
pub const MTP_RX_ENDPOINT: u8 = MTP_TX_ENDPOINT + 1;
pub const MTP_EVENT_ENDPOINT: u8 = MTP_TX_ENDPOINT + 2;
const ENDPOINTS_AFTER_MTP: u8 = ENDPOINTS_AFTER_MIDI + if MTP_ENABLED { 3 } else { 0 };

pub const AUDIO_TX_ENDPOINT: u8 = ENDPOINTS_AFTER_MTP;
pub const AUDIO_RX_ENDPOINT: u8 = AUDIO_TX_ENDPOINT + 1;
pub const AUDIO_SYNC_ENDPOINT: u8 = AUDIO_TX_ENDPOINT + 2;
const ENDPOINTS_END: u8 = ENDPOINTS_AFTER_MTP + if AUDIO_ENABLED { 3 } else { 0 };

const _: () = assert!(ENDPOINTS_END <= 16, "the enabled functions need more endpoint numbers than USB provides");

// Packet sizes and polling intervals. Interrupt and isochronous sizes are the same at both
// speeds; bulk pipes use the speed's maximum.

pub const CDC_ACM_PACKET_SIZE: u16 = 16;
pub const MTP_EVENT_PACKET_SIZE: u16 = 32;
pub const AUDIO_STREAM_PACKET_SIZE: u16 = 180;
pub const AUDIO_SAMPLE_RATE_HZ: u32 = 44100;

pub const fn bulk_packet_size(speed: Speed) -> u16 {
    match speed {
        Speed::High => 512,
        Speed::Full => 64,
    }
}

/// The notification endpoint of the first serial port polls faster than the others so that
/// line-state changes on the primary console are picked up promptly.
pub const fn cdc_acm_interval(speed: Speed, port: usize) -> u8 {
    match speed {
        Speed::High => 5,
        Speed::Full => {
            if port == 0 {
                16
            } else {
                64
            }
        }
    }
}

pub const fn mtp_event_interval(speed: Speed) -> u8 {
    match speed {
        Speed::High => 7,
        Speed::Full => 10,
    }
}

/// High speed expresses the interval in 125us microframes (4 = every 8 microframes); full
/// speed in 1ms frames.
pub const fn audio_interval(speed: Speed) -> u8 {
    match speed {
        Speed::High => 4,
        Speed::Full => 1,
    }
}

pub const fn audio_sync_packet_size(speed: Speed) -> u16 {
    match speed {
        Speed::High => 4,
        Speed::Full => 3,
    }
}

pub const fn audio_sync_refresh(speed: Speed) -> u8 {
    match speed {
        Speed::High => 7,
        Speed::Full => 5,
    }
}

pub const EXPERIMENTAL_SUB_CLASS: u8 = 0x6a;

pub const fn experimental_protocol(speed: Speed) -> u8 {
    match speed {
        Speed::High => 0xc7,
        Speed::Full => 0xff,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdc_numbering() {
        assert_eq!(cdc_status_interface(0), 0);
        assert_eq!(cdc_data_interface(0), 1);
        assert_eq!(cdc_status_interface(2), 4);
        assert_eq!(cdc_acm_endpoint(0), 2);
        assert_eq!(cdc_tx_endpoint(1), 7);
    }

    #[test]
    fn test_functions_do_not_share_endpoints() {
        // Endpoint 1 is reserved for the vendor interface; the allocator starts above it.
        assert!(cdc_acm_endpoint(0) > EXPERIMENTAL_ENDPOINT);
        assert!(MIDI_RX_ENDPOINT >= cdc_acm_endpoint(CDC_PORT_COUNT.saturating_sub(1)));
        assert!(MTP_TX_ENDPOINT >= MIDI_RX_ENDPOINT);
        assert!(AUDIO_TX_ENDPOINT >= MTP_TX_ENDPOINT);
    }

    #[test]
    fn test_audio_interfaces_are_contiguous() {
        assert_eq!(AUDIO_STREAM_IN_INTERFACE, AUDIO_CONTROL_INTERFACE + 1);
        assert_eq!(AUDIO_STREAM_OUT_INTERFACE, AUDIO_CONTROL_INTERFACE + 2);
    }

    #[test]
    fn test_full_speed_acm_polls_primary_port_faster() {
        assert_eq!(cdc_acm_interval(Speed::Full, 0), 16);
        assert_eq!(cdc_acm_interval(Speed::Full, 1), 64);
        assert_eq!(cdc_acm_interval(Speed::High, 1), 5);
    }
}
