//! Media Transfer Protocol. MTP devices enumerate under the still-image capture class with
//! the PIMA 15740 protocol; the protocol itself runs over the bulk pipes.

pub const CLASS_STILL_IMAGE: u8 = 0x06;
pub const SUBCLASS_STILL_IMAGE_CAPTURE: u8 = 0x01;
pub const PROTOCOL_PIMA_15740: u8 = 0x01;
