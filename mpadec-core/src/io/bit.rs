// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::util::bits::mask_lower_u32;

use super::vlc::Codebook;

/// `ReadBitsLtr` reads bits most-significant bit first.
///
/// Reads are infallible. Once the underlying buffer is exhausted every read yields zero bits, and
/// the reader stays within its buffer. Callers that must distinguish a genuine zero from running
/// out of data query [`FiniteBitStream`].
pub trait ReadBitsLtr {
    /// Read up-to 32 bits and return them as a right-aligned `u32`.
    fn read_bits_leq32(&mut self, bit_width: u32) -> u32;

    /// Read a single bit as a boolean value.
    #[inline(always)]
    fn read_bit(&mut self) -> bool {
        self.read_bits_leq32(1) != 0
    }

    /// Ignores the specified number of bits.
    fn ignore_bits(&mut self, mut num_bits: u32) {
        while num_bits > 0 {
            let n = num_bits.min(32);
            self.read_bits_leq32(n);
            num_bits -= n;
        }
    }

    /// Reads and decodes one codeword using the provided codebook. Returns the decoded value and
    /// the length of the codeword in bits, or `None` if the bits read do not form a codeword.
    #[inline(always)]
    fn read_codebook<E: Copy>(&mut self, codebook: &Codebook<E>) -> Option<(E, u32)> {
        codebook.read(self)
    }
}

/// A `FiniteBitStream` is a bit stream that has a known length in bits.
pub trait FiniteBitStream {
    /// Gets the number of bits left unread.
    fn bits_left(&self) -> u64;
}

/// `BitReaderLtr` reads bits from a borrowed byte buffer, most-significant bit first.
pub struct BitReaderLtr<'a> {
    buf: &'a [u8],
    pos: u64,
}

impl<'a> BitReaderLtr<'a> {
    /// Instantiate a new `BitReaderLtr` with the given buffer.
    pub fn new(buf: &'a [u8]) -> Self {
        BitReaderLtr { buf, pos: 0 }
    }

    fn bit_at(&self, pos: u64) -> u32 {
        let byte = (pos >> 3) as usize;

        match self.buf.get(byte) {
            Some(b) => u32::from(b >> (7 - (pos & 7))) & 1,
            None => 0,
        }
    }
}

impl ReadBitsLtr for BitReaderLtr<'_> {
    fn read_bits_leq32(&mut self, bit_width: u32) -> u32 {
        debug_assert!(bit_width <= 32);

        let total = 8 * self.buf.len() as u64;

        let mut value = 0;

        for _ in 0..bit_width {
            value = (value << 1) | self.bit_at(self.pos);
            self.pos = (self.pos + 1).min(total);
        }

        value & mask_lower_u32(bit_width)
    }
}

impl FiniteBitStream for BitReaderLtr<'_> {
    fn bits_left(&self) -> u64 {
        8 * self.buf.len() as u64 - self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_bitreaderltr_read_bits_leq32() {
        let mut bs = BitReaderLtr::new(&[0b1010_0101, 0b0111_1110, 0b1101_0011]);

        assert_eq!(bs.read_bits_leq32(4), 0b0000_0000_0000_1010);
        assert_eq!(bs.read_bits_leq32(4), 0b0000_0000_0000_0101);
        assert_eq!(bs.read_bits_leq32(13), 0b0000_1111_1101_1010);
        assert_eq!(bs.bits_left(), 3);
        assert_eq!(bs.read_bits_leq32(3), 0b011);
        assert_eq!(bs.bits_left(), 0);
    }

    #[test]
    fn verify_bitreaderltr_reads_zeros_when_exhausted() {
        let mut bs = BitReaderLtr::new(&[0xff]);

        assert_eq!(bs.read_bits_leq32(4), 0xf);
        assert_eq!(bs.read_bits_leq32(8), 0xf0);
        assert_eq!(bs.read_bits_leq32(32), 0);
        assert!(!bs.read_bit());
        assert_eq!(bs.bits_left(), 0);
    }

    #[test]
    fn verify_bitreaderltr_ignore_bits() {
        let mut bs = BitReaderLtr::new(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x80]);

        bs.ignore_bits(40);
        assert!(bs.read_bit());
        assert_eq!(bs.bits_left(), 7);
    }
}
