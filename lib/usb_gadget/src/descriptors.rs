//! The descriptor blobs the host reads during enumeration. The configuration descriptor is
//! assembled function-by-function into a writer whose capacity is the `const`-computed total
//! length, so the length arithmetic and the emitted bytes can never disagree: a mismatch is
//! a compile error, not a broken enumeration.

use crate::{config, strings};
use usb::{
    class::{self, audio, cdc, midi, mtp},
    descriptor::{endpoint_address_in, endpoint_attributes, ConfigAttributes, DescriptorType, Speed},
    writer::DescriptorWriter,
};

pub const DEVICE_DESCRIPTOR: [u8; 18] = DescriptorWriter::new()
    .byte(18)
    .byte(DescriptorType::Device as u8)
    .u16_le(config::USB_RELEASE)
    .byte(config::DEVICE_CLASS)
    .byte(config::DEVICE_SUB_CLASS)
    .byte(config::DEVICE_PROTOCOL)
    .byte(config::EP0_MAX_PACKET_SIZE)
    .u16_le(config::VENDOR_ID)
    .u16_le(config::PRODUCT_ID)
    .u16_le(config::DEVICE_RELEASE)
    .byte(strings::MANUFACTURER_INDEX)
    .byte(strings::PRODUCT_INDEX)
    .byte(strings::SERIAL_NUMBER_INDEX)
    .byte(1)
    .finish();

/// Device qualifier (USB 2.0 §9.6.2): what the device descriptor would look like at the
/// other speed. Same identity, same control endpoint.
pub const DEVICE_QUALIFIER_DESCRIPTOR: [u8; 10] = DescriptorWriter::new()
    .byte(10)
    .byte(DescriptorType::DeviceQualifier as u8)
    .u16_le(config::USB_RELEASE)
    .byte(config::DEVICE_CLASS)
    .byte(config::DEVICE_SUB_CLASS)
    .byte(config::DEVICE_PROTOCOL)
    .byte(config::EP0_MAX_PACKET_SIZE)
    .byte(1)
    .byte(0)
    .finish();

const CONFIG_HEADER_LEN: usize = 9;

/// One serial port: IAD, status interface with its four functional descriptors and
/// notification endpoint, then the data interface with its bulk pair.
const CDC_PORT_LEN: usize = 8 + 9 + cdc::FUNCTIONAL_DESCRIPTORS_LEN + 7 + 9 + 7 + 7;

const fn midi_function_len(cables: usize) -> usize {
    9 + midi::MS_HEADER_LEN + midi::JACK_QUAD_LEN * cables + 2 * (9 + 4 + cables)
}

const MTP_FUNCTION_LEN: usize = 9 + 7 + 7 + 7;

/// Total length of the class-specific AC descriptors: header, the two terminal pairs, and
/// the feature unit. Goes into the AC header's `wTotalLength`.
const AUDIO_CONTROL_TOTAL_LEN: usize = audio::AC_HEADER_LEN
    + 2 * audio::INPUT_TERMINAL_LEN
    + 2 * audio::OUTPUT_TERMINAL_LEN
    + audio::FEATURE_UNIT_STEREO_LEN;

const AUDIO_FUNCTION_LEN: usize = 8
    + 9
    + AUDIO_CONTROL_TOTAL_LEN
    + 9
    + 9
    + audio::AS_GENERAL_LEN
    + audio::FORMAT_TYPE_I_LEN
    + 9
    + audio::CS_ISO_ENDPOINT_LEN
    + 9
    + 9
    + audio::AS_GENERAL_LEN
    + audio::FORMAT_TYPE_I_LEN
    + 9
    + audio::CS_ISO_ENDPOINT_LEN
    + 9;

const EXPERIMENTAL_FUNCTION_LEN: usize = 9 + 7 + 7;

pub const CONFIG_TOTAL_LEN: usize = CONFIG_HEADER_LEN
    + config::CDC_PORT_COUNT * CDC_PORT_LEN
    + if config::MIDI_ENABLED { midi_function_len(config::MIDI_CABLE_COUNT) } else { 0 }
    + if config::MTP_ENABLED { MTP_FUNCTION_LEN } else { 0 }
    + if config::AUDIO_ENABLED { AUDIO_FUNCTION_LEN } else { 0 }
    + if config::EXPERIMENTAL_ENABLED { EXPERIMENTAL_FUNCTION_LEN } else { 0 };

pub const CONFIG_DESCRIPTOR_HIGH_SPEED: [u8; CONFIG_TOTAL_LEN] = build_config_descriptor(Speed::High);
pub const CONFIG_DESCRIPTOR_FULL_SPEED: [u8; CONFIG_TOTAL_LEN] = build_config_descriptor(Speed::Full);

type ConfigWriter = DescriptorWriter<CONFIG_TOTAL_LEN>;

const fn build_config_descriptor(speed: Speed) -> [u8; CONFIG_TOTAL_LEN] {
    let mut writer: ConfigWriter = DescriptorWriter::new().configuration_header(
        CONFIG_TOTAL_LEN as u16,
        config::INTERFACE_COUNT,
        1,
        ConfigAttributes::RESERVED.union(ConfigAttributes::SELF_POWERED).bits(),
        config::MAX_POWER_MA,
    );

    let mut port = 0;
    while port < config::CDC_PORT_COUNT {
        writer = cdc_port_function(writer, speed, port);
        port += 1;
    }
    if config::MIDI_ENABLED {
        writer = midi_function(writer, speed);
    }
    if config::MTP_ENABLED {
        writer = mtp_function(writer, speed);
    }
    if config::AUDIO_ENABLED {
        writer = audio_function(writer, speed);
    }
    if config::EXPERIMENTAL_ENABLED {
        writer = experimental_function(writer, speed);
    }

    writer.finish()
}

const fn cdc_port_function(writer: ConfigWriter, speed: Speed, port: usize) -> ConfigWriter {
    let status = config::cdc_status_interface(port);
    let data = config::cdc_data_interface(port);
    let bulk_size = config::bulk_packet_size(speed);

    writer
        .interface_association(status, 2, cdc::CLASS_COMMUNICATIONS, cdc::SUBCLASS_ACM, cdc::PROTOCOL_AT_COMMANDS, 0)
        .interface(status, 0, 1, cdc::CLASS_COMMUNICATIONS, cdc::SUBCLASS_ACM, cdc::PROTOCOL_AT_COMMANDS, 0)
        .bytes(&cdc::header(0x0110))
        .bytes(&cdc::call_management(0x01, data))
        .bytes(&cdc::abstract_control_management(0x06))
        .bytes(&cdc::union_interfaces(status, data))
        .endpoint(
            endpoint_address_in(config::cdc_acm_endpoint(port)),
            endpoint_attributes::INTERRUPT,
            config::CDC_ACM_PACKET_SIZE,
            config::cdc_acm_interval(speed, port),
        )
        .interface(data, 0, 2, cdc::CLASS_CDC_DATA, 0, 0, 0)
        .endpoint(config::cdc_rx_endpoint(port), endpoint_attributes::BULK, bulk_size, 0)
        .endpoint(endpoint_address_in(config::cdc_tx_endpoint(port)), endpoint_attributes::BULK, bulk_size, 0)
}

const fn midi_function(mut writer: ConfigWriter, speed: Speed) -> ConfigWriter {
    let cables = config::MIDI_CABLE_COUNT as u8;
    let bulk_size = config::bulk_packet_size(speed);

    writer = writer
        .interface(config::MIDI_INTERFACE, 0, 2, class::CLASS_AUDIO, midi::SUBCLASS_MIDI_STREAMING, 0, 0)
        .bytes(&midi::ms_header((midi::MS_HEADER_LEN + midi::JACK_QUAD_LEN * config::MIDI_CABLE_COUNT) as u16));

    let mut cable = 0;
    while cable < cables {
        writer = writer
            .bytes(&midi::in_jack(midi::JACK_EMBEDDED, midi::embedded_in_jack_id(cable)))
            .bytes(&midi::in_jack(midi::JACK_EXTERNAL, midi::external_in_jack_id(cable)))
            .bytes(&midi::out_jack(
                midi::JACK_EMBEDDED,
                midi::embedded_out_jack_id(cable),
                midi::external_in_jack_id(cable),
                1,
            ))
            .bytes(&midi::out_jack(
                midi::JACK_EXTERNAL,
                midi::external_out_jack_id(cable),
                midi::embedded_in_jack_id(cable),
                1,
            ));
        cable += 1;
    }

    // Host-to-device pipe, fed by the embedded in jacks.
    writer = writer
        .endpoint_with_sync(config::MIDI_RX_ENDPOINT, endpoint_attributes::BULK, bulk_size, 0, 0, 0)
        .bytes(&midi::cs_bulk_endpoint_header(cables));
    let mut cable = 0;
    while cable < cables {
        writer = writer.byte(midi::embedded_in_jack_id(cable));
        cable += 1;
    }

    // Device-to-host pipe, fed by the embedded out jacks.
    writer = writer
        .endpoint_with_sync(
            endpoint_address_in(config::MIDI_TX_ENDPOINT),
            endpoint_attributes::BULK,
            bulk_size,
            0,
            0,
            0,
        )
        .bytes(&midi::cs_bulk_endpoint_header(cables));
    let mut cable = 0;
    while cable < cables {
        writer = writer.byte(midi::embedded_out_jack_id(cable));
        cable += 1;
    }

    writer
}

const fn mtp_function(writer: ConfigWriter, speed: Speed) -> ConfigWriter {
    let bulk_size = config::bulk_packet_size(speed);

    writer
        .interface(
            config::MTP_INTERFACE,
            0,
            3,
            mtp::CLASS_STILL_IMAGE,
            mtp::SUBCLASS_STILL_IMAGE_CAPTURE,
            mtp::PROTOCOL_PIMA_15740,
            strings::MTP_LABEL_INDEX,
        )
        .endpoint(endpoint_address_in(config::MTP_TX_ENDPOINT), endpoint_attributes::BULK, bulk_size, 0)
        .endpoint(config::MTP_RX_ENDPOINT, endpoint_attributes::BULK, bulk_size, 0)
        .endpoint(
            endpoint_address_in(config::MTP_EVENT_ENDPOINT),
            endpoint_attributes::INTERRUPT,
            config::MTP_EVENT_PACKET_SIZE,
            config::mtp_event_interval(speed),
        )
}

const fn audio_function(writer: ConfigWriter, speed: Speed) -> ConfigWriter {
    let control = config::AUDIO_CONTROL_INTERFACE;
    let stream_in = config::AUDIO_STREAM_IN_INTERFACE;
    let stream_out = config::AUDIO_STREAM_OUT_INTERFACE;
    let interval = config::audio_interval(speed);

    /*
     * The control interface describes two unidirectional paths through the function:
     * digital audio in (terminal 1) -> USB streaming out (terminal 2) towards the host, and
     * USB streaming in (terminal 3) -> feature unit 0x31 -> digital audio out (terminal 4)
     * from the host, with mute/volume on the playback path.
     */
    let writer = writer
        .interface_association(control, 3, class::CLASS_AUDIO, audio::SUBCLASS_AUDIO_CONTROL, 0, 0)
        .interface(control, 0, 0, class::CLASS_AUDIO, audio::SUBCLASS_AUDIO_CONTROL, 0, 0)
        .bytes(&audio::ac_header(AUDIO_CONTROL_TOTAL_LEN as u16, stream_in, stream_out))
        .bytes(&audio::input_terminal(1, audio::TERMINAL_DIGITAL_AUDIO, 2, audio::CHANNELS_LEFT_RIGHT_FRONT))
        .bytes(&audio::output_terminal(2, audio::TERMINAL_USB_STREAMING, 1))
        .bytes(&audio::input_terminal(3, audio::TERMINAL_USB_STREAMING, 2, audio::CHANNELS_LEFT_RIGHT_FRONT))
        .bytes(&audio::feature_unit_stereo(0x31, 3, 0x01, 0x02, 0x02))
        .bytes(&audio::output_terminal(4, audio::TERMINAL_DIGITAL_AUDIO, 0x31));

    // Streaming towards the host: zero-bandwidth alternate 0, then the streaming alternate.
    let writer = writer
        .interface(stream_in, 0, 0, class::CLASS_AUDIO, audio::SUBCLASS_AUDIO_STREAMING, 0, 0)
        .interface(stream_in, 1, 1, class::CLASS_AUDIO, audio::SUBCLASS_AUDIO_STREAMING, 0, 0)
        .bytes(&audio::as_general(2, 3, audio::FORMAT_PCM))
        .bytes(&audio::format_type_i(2, 2, 16, config::AUDIO_SAMPLE_RATE_HZ))
        .endpoint_with_sync(
            endpoint_address_in(config::AUDIO_TX_ENDPOINT),
            endpoint_attributes::ISOCHRONOUS_ADAPTIVE,
            config::AUDIO_STREAM_PACKET_SIZE,
            interval,
            0,
            0,
        )
        .bytes(&audio::cs_iso_endpoint(0, 0, 0));

    // Streaming from the host, rate-matched through the feedback endpoint.
    writer
        .interface(stream_out, 0, 0, class::CLASS_AUDIO, audio::SUBCLASS_AUDIO_STREAMING, 0, 0)
        .interface(stream_out, 1, 2, class::CLASS_AUDIO, audio::SUBCLASS_AUDIO_STREAMING, 0, 0)
        .bytes(&audio::as_general(3, 3, audio::FORMAT_PCM))
        .bytes(&audio::format_type_i(2, 2, 16, config::AUDIO_SAMPLE_RATE_HZ))
        .endpoint_with_sync(
            config::AUDIO_RX_ENDPOINT,
            endpoint_attributes::ISOCHRONOUS_ASYNCHRONOUS,
            config::AUDIO_STREAM_PACKET_SIZE,
            interval,
            0,
            endpoint_address_in(config::AUDIO_SYNC_ENDPOINT),
        )
        .bytes(&audio::cs_iso_endpoint(0, 0, 0))
        .endpoint_with_sync(
            endpoint_address_in(config::AUDIO_SYNC_ENDPOINT),
            endpoint_attributes::ISOCHRONOUS_FEEDBACK,
            config::audio_sync_packet_size(speed),
            interval,
            config::audio_sync_refresh(speed),
            0,
        )
}

const fn experimental_function(writer: ConfigWriter, speed: Speed) -> ConfigWriter {
    let bulk_size = config::bulk_packet_size(speed);

    writer
        .interface(
            config::EXPERIMENTAL_INTERFACE,
            0,
            2,
            class::CLASS_VENDOR,
            config::EXPERIMENTAL_SUB_CLASS,
            config::experimental_protocol(speed),
            0,
        )
        .endpoint(endpoint_address_in(config::EXPERIMENTAL_ENDPOINT), endpoint_attributes::BULK, bulk_size, 1)
        .endpoint(config::EXPERIMENTAL_ENDPOINT, endpoint_attributes::BULK, bulk_size, 1)
}
