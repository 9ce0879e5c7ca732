//! Schunk WSG command protocol
//!
//! This crate implements the binary framing used to command Schunk
//! WSG-series grippers over a serial or TCP link: the command and status
//! vocabulary from the WSG Command Set Reference Manual, the CRC-16
//! checksum, and the command-message encoder.

pub mod checksum;
pub mod commands;
pub mod message;
pub mod types;

pub use checksum::{compute_crc16, Crc16};
pub use commands::CommandId;
pub use message::{CommandMessage, FrameDecoder, LengthField};
pub use types::*;
