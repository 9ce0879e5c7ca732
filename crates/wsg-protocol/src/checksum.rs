//! CRC-16 used by the WSG frame checksum
//!
//! The lookup table is the one printed in the WSG Command Set Reference
//! Manual (CCITT polynomial 0x1021, MSB-first table). The update step
//! indexes it with the low byte of the register and shifts right, which is
//! what the gripper firmware does, so both halves must stay exactly as they
//! are for frames to be accepted.

/// CCITT polynomial
const CRC_POLYNOMIAL: u16 = 0x1021;

/// Initial register value
pub const CRC_INITIAL: u16 = 0xFFFF;

const fn build_crc16_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            if (crc & 0x8000) != 0 {
                crc = (crc << 1) ^ CRC_POLYNOMIAL;
            } else {
                crc <<= 1;
            }
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Checksum lookup table, built at compile time
pub const CRC_TABLE: [u16; 256] = build_crc16_table();

/// Streaming CRC-16 accumulator
///
/// Lets the encoder hash the header and the payload separately without
/// first concatenating them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc16 {
    crc: u16,
}

impl Default for Crc16 {
    fn default() -> Self {
        Self::new()
    }
}

impl Crc16 {
    #[must_use]
    pub const fn new() -> Self {
        Self { crc: CRC_INITIAL }
    }

    /// Feed more bytes into the register
    #[must_use]
    pub fn update(mut self, data: &[u8]) -> Self {
        for &byte in data {
            let idx = ((self.crc ^ u16::from(byte)) & 0x00FF) as usize;
            self.crc = CRC_TABLE[idx] ^ (self.crc >> 8);
        }
        self
    }

    /// Current register value (no final XOR is applied)
    #[must_use]
    pub const fn finish(self) -> u16 {
        self.crc
    }
}

/// Compute the frame checksum over `data`
///
/// Returns `0xFFFF` for an empty slice.
#[must_use]
pub fn compute_crc16(data: &[u8]) -> u16 {
    Crc16::new().update(data).finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_manual() {
        // Spot checks against the table printed in the command set manual
        assert_eq!(CRC_TABLE[0x00], 0x0000);
        assert_eq!(CRC_TABLE[0x01], 0x1021);
        assert_eq!(CRC_TABLE[0x02], 0x2042);
        assert_eq!(CRC_TABLE[0x10], 0x1231);
        assert_eq!(CRC_TABLE[0x80], 0x9188);
        assert_eq!(CRC_TABLE[0xFF], 0x1EF0);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(compute_crc16(&[]), 0xFFFF);
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(compute_crc16(&[0xAA, 0xAA, 0xAA, 0x25, 0x00, 0x00]), 0x4071);
        assert_eq!(compute_crc16(b"123456789"), 0x6EB4);
    }

    #[test]
    fn test_deterministic() {
        let data = [0xAA, 0xAA, 0xAA, 0x21, 0x06, 0x00, 1, 2, 3, 4, 5, 6];
        assert_eq!(compute_crc16(&data), compute_crc16(&data));
        assert_eq!(compute_crc16(&data), 0x448A);
    }

    #[test]
    fn test_streaming_matches_one_shot() {
        let data = b"\xAA\xAA\xAA\x21\x06\x00\x01\x02\x03\x04\x05\x06";
        let (head, tail) = data.split_at(6);
        let streamed = Crc16::new().update(head).update(tail).finish();
        assert_eq!(streamed, compute_crc16(data));
    }
}
