//! Static USB descriptors for a high-speed composite device ("gadget") built from a set of
//! compile-time-selected functions: up to three CDC-ACM serial ports, a multi-cable MIDI
//! streaming interface, MTP, bidirectional streaming audio, and a vendor bulk interface.
//!
//! Everything the host reads during enumeration is assembled into `const` byte blobs here,
//! sized and cross-referenced by `const` arithmetic over the enabled Cargo features - the
//! blobs for a given feature set either assemble byte-exact or fail to compile. The one
//! piece of runtime state is the serial number string descriptor, which [`DescriptorTable`]
//! formats from a hardware-unique ID when the consuming device-controller driver constructs
//! it, before the bus is attached.
//!
//! This crate only *serves* bytes: the control-transfer state machine that requests them
//! lives in the device-controller driver, which resolves each `GetDescriptor` request
//! through [`DescriptorTable::lookup`].

#![no_std]

pub mod config;
pub mod descriptors;
pub mod strings;
pub mod table;

pub use table::DescriptorTable;
