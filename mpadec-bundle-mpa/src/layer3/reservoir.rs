// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use mpadec_core::io::ReadBitsLtr;

/// The capacity of the reservoir in bytes. Must be a power of 2.
pub(super) const RESERVOIR_LEN: usize = 4096;

/// The capacity of the reservoir in bits.
const RESERVOIR_BITS: usize = 8 * RESERVOIR_LEN;

/// `BitReservoir` is a circular buffer of layer 3 main data.
///
/// The main data of a granule may begin in the main data of a previous frame. Each frame appends
/// its main data to the reservoir, and the decoder then positions the read cursor where the first
/// granule of the frame begins. Bits are read most-significant bit first.
///
/// The reservoir tracks the total number of bits read, which is never reduced by the wrap-around
/// of the underlying buffer.
pub struct BitReservoir {
    buf: Box<[u8]>,
    /// Write position in bytes.
    write_pos: usize,
    /// Read position in bits.
    read_pos: usize,
    /// Total bits read, less any bits rewound.
    total_bits: u64,
}

impl BitReservoir {
    pub fn new() -> Self {
        BitReservoir {
            buf: vec![0; RESERVOIR_LEN].into_boxed_slice(),
            write_pos: 0,
            read_pos: 0,
            total_bits: 0,
        }
    }

    /// Append a byte of main data.
    #[inline(always)]
    pub fn append_byte(&mut self, byte: u8) {
        self.buf[self.write_pos] = byte;
        self.write_pos = (self.write_pos + 1) & (RESERVOIR_LEN - 1);
    }

    /// Append main data.
    pub fn append(&mut self, buf: &[u8]) {
        for &byte in buf {
            self.append_byte(byte);
        }
    }

    /// Read a single bit.
    #[inline(always)]
    pub fn read_bit(&mut self) -> u32 {
        let byte = self.buf[self.read_pos >> 3];
        let bit = (byte >> (7 - (self.read_pos & 7))) & 1;

        self.read_pos = (self.read_pos + 1) & (RESERVOIR_BITS - 1);
        self.total_bits += 1;

        u32::from(bit)
    }

    /// Read `n`, 0 to 32, bits.
    pub fn read_bits(&mut self, n: u32) -> u32 {
        debug_assert!(n <= 32);

        let mut value = 0u64;

        for _ in 0..n {
            value = (value << 1) | u64::from(self.read_bit());
        }

        value as u32
    }

    /// Advance the read cursor by `n` bits.
    pub fn skip_bits(&mut self, n: u64) {
        let n_bits = (n % RESERVOIR_BITS as u64) as usize;

        self.read_pos = (self.read_pos + n_bits) & (RESERVOIR_BITS - 1);
        self.total_bits += n;
    }

    /// Move the read cursor back by `n` bits.
    pub fn rewind_bits(&mut self, n: u64) {
        let n = n.min(self.total_bits);

        let n_bits = (n % RESERVOIR_BITS as u64) as usize;

        self.read_pos = (self.read_pos + RESERVOIR_BITS - n_bits) & (RESERVOIR_BITS - 1);
        self.total_bits -= n;
    }

    /// Move the read cursor back by `n` bytes.
    pub fn rewind_bytes(&mut self, n: u64) {
        self.rewind_bits(8 * n);
    }

    /// Gets the total number of bits read.
    pub fn total_bits_read(&self) -> u64 {
        self.total_bits
    }

    /// Discard all main data and reset the cursors.
    pub fn reset(&mut self) {
        self.buf.iter_mut().for_each(|b| *b = 0);
        self.write_pos = 0;
        self.read_pos = 0;
        self.total_bits = 0;
    }
}

impl Default for BitReservoir {
    fn default() -> Self {
        BitReservoir::new()
    }
}

impl ReadBitsLtr for BitReservoir {
    #[inline(always)]
    fn read_bits_leq32(&mut self, bit_width: u32) -> u32 {
        self.read_bits(bit_width)
    }

    #[inline(always)]
    fn read_bit(&mut self) -> bool {
        BitReservoir::read_bit(self) != 0
    }

    fn ignore_bits(&mut self, num_bits: u32) {
        self.skip_bits(u64::from(num_bits));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_read_bits() {
        let mut reservoir = BitReservoir::new();
        reservoir.append(&[0b1011_0001, 0xff, 0x00]);

        assert_eq!(reservoir.read_bits(0), 0);
        assert_eq!(reservoir.read_bits(3), 0b101);
        assert_eq!(reservoir.read_bit(), 1);
        assert_eq!(reservoir.read_bits(8), 0b0001_1111);
        assert_eq!(reservoir.total_bits_read(), 12);

        reservoir.rewind_bits(8);
        assert_eq!(reservoir.read_bits(4), 0b0001);
        assert_eq!(reservoir.total_bits_read(), 8);

        reservoir.rewind_bytes(1);
        assert_eq!(reservoir.total_bits_read(), 0);
        assert_eq!(reservoir.read_bits(8), 0b1011_0001);
        reservoir.skip_bits(8);
        assert_eq!(reservoir.read_bits(8), 0);
    }

    #[test]
    fn verify_wrap_around() {
        let mut reservoir = BitReservoir::new();

        // Fill to 3 bytes before the end of the buffer.
        reservoir.append(&vec![0; RESERVOIR_LEN - 3]);
        reservoir.skip_bits(8 * (RESERVOIR_LEN as u64 - 3));

        reservoir.append(&[0x12, 0x34, 0x56, 0x78, 0x9a]);

        assert_eq!(reservoir.read_bits(32), 0x1234_5678);
        assert_eq!(reservoir.read_bits(8), 0x9a);
        assert_eq!(reservoir.total_bits_read(), 8 * RESERVOIR_LEN as u64 + 16);

        // Rewinding crosses the start of the buffer.
        reservoir.rewind_bytes(3);
        assert_eq!(reservoir.read_bits(16), 0x5678);
    }

    #[test]
    fn verify_read_codebook_bits() {
        let mut reservoir = BitReservoir::new();
        reservoir.append(&[0x80]);

        assert!(ReadBitsLtr::read_bit(&mut reservoir));
        reservoir.ignore_bits(7);
        assert_eq!(reservoir.total_bits_read(), 8);
    }
}
