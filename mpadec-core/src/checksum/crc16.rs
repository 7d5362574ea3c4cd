// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// The CRC-16 generator polynomial, x^16 + x^15 + x^2 + 1.
const CRC16_POLYNOMIAL: u16 = 0x8005;

/// The initial value of the CRC register.
const CRC16_INIT: u16 = 0xffff;

/// `Crc16` implements the MSB-first CRC-16 (polynomial 0x8005, initial value 0xffff) used to
/// protect MPEG audio frame headers and side information.
///
/// Unlike most checksums, the protected region of an MPEG audio frame is not byte aligned. Bits may
/// therefore be fed in arbitrary widths with [`Crc16::process_bits`].
#[derive(Copy, Clone, Debug)]
pub struct Crc16 {
    state: u16,
}

impl Crc16 {
    /// Instantiate a new CRC-16 with the register set to its initial value.
    pub fn new() -> Self {
        Crc16 { state: CRC16_INIT }
    }

    /// Feed the lower `width` bits of `value` into the CRC, most-significant bit first.
    pub fn process_bits(&mut self, value: u32, width: u32) {
        debug_assert!(width <= 32);

        let mut crc = self.state;

        for i in (0..width).rev() {
            let bit = (value >> i) & 1 != 0;

            crc = if (crc & 0x8000 != 0) ^ bit { (crc << 1) ^ CRC16_POLYNOMIAL } else { crc << 1 };
        }

        self.state = crc;
    }

    /// Returns the current CRC. Reading the CRC does not reset it.
    pub fn crc(&self) -> u16 {
        self.state
    }

    /// Reset the CRC register to its initial value.
    pub fn reset(&mut self) {
        self.state = CRC16_INIT;
    }
}

impl Default for Crc16 {
    fn default() -> Self {
        Crc16::new()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::util::bits::mask_lower_u32;

    const TEST_STRING: &[u8] = b"123456789";

    fn crc_of_bytes(buf: &[u8]) -> u16 {
        let mut crc = Crc16::new();
        for &byte in buf {
            crc.process_bits(u32::from(byte), 8);
        }
        crc.crc()
    }

    #[test]
    fn verify_crc16_check_value() {
        assert_eq!(crc_of_bytes(TEST_STRING), 0xaee7);
    }

    #[test]
    fn verify_crc16_unaligned_widths() {
        // Feed the same message in odd widths that straddle byte boundaries.
        let mut acc = 0u128;
        for &b in TEST_STRING {
            acc = (acc << 8) | u128::from(b);
        }
        let mut by_bits = Crc16::new();
        let mut remaining = 72u32;
        for width in [3u32, 13, 1, 32, 7, 16].iter().copied() {
            remaining -= width;
            let value = (acc >> remaining) as u32 & mask_lower_u32(width);
            by_bits.process_bits(value, width);
        }

        assert_eq!(remaining, 0);
        assert_eq!(by_bits.crc(), 0xaee7);
    }

    #[test]
    fn verify_crc16_random_splits() {
        let mut rng = SmallRng::seed_from_u64(0x6d70_6164);

        for len in [1, 2, 17, 255] {
            let mut buf = vec![0u8; len];
            rng.fill(&mut buf[..]);

            let mut by_bits = Crc16::new();
            for &byte in &buf {
                let split = rng.random_range(0..=8);
                by_bits.process_bits(u32::from(byte) >> (8 - split), split);
                by_bits.process_bits(u32::from(byte) & mask_lower_u32(8 - split), 8 - split);
            }

            assert_eq!(by_bits.crc(), crc_of_bytes(&buf), "{} bytes", len);
        }
    }

    #[test]
    fn verify_crc16_read_is_non_destructive() {
        let mut crc = Crc16::new();
        crc.process_bits(0xf00d, 16);
        let first = crc.crc();
        assert_eq!(crc.crc(), first);

        crc.reset();
        assert_eq!(crc.crc(), 0xffff);
    }
}
