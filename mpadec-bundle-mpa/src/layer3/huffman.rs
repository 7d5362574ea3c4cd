// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use mpadec_core::errors::{decode_error, Result};
use mpadec_core::io::ReadBitsLtr;

use lazy_static::lazy_static;
use log::debug;

use super::codebooks::{codebook, LINBITS, QUADS_CODEBOOKS};
use super::GranuleChannel;

/// The largest magnitude a big value may take: 15 plus 13 linbits.
const MAX_BIG_VALUE: usize = 15 + (1 << 13);

lazy_static! {
    /// `x^(4/3)` for every magnitude a big value may take.
    pub(super) static ref POW43: Box<[f32]> =
        (0..=MAX_BIG_VALUE).map(|x| (x as f64).powf(4.0 / 3.0) as f32).collect();
}

/// Complete a big value magnitude, `x`, with its linbits and sign bit. Returns the unscaled sample
/// and the number of bits read.
#[inline(always)]
fn read_big_value<B: ReadBitsLtr>(bs: &mut B, x: usize, linbits: u32, pow43: &[f32]) -> (f32, u32) {
    if x == 0 {
        return (0.0, 0);
    }

    let (x, bits) = if x == 15 && linbits > 0 {
        (x + bs.read_bits_leq32(linbits) as usize, linbits + 1)
    }
    else {
        (x, 1)
    };

    let magnitude = pow43[x];

    if bs.read_bit() {
        (-magnitude, bits)
    }
    else {
        (magnitude, bits)
    }
}

/// Huffman decode the part 3 bits of a granule channel into `buf`, as signed `x^(4/3)` values.
///
/// Returns the index of the first sample of the rzero partition. All samples from that index
/// onwards are 0.
pub(super) fn read_huffman_samples<B: ReadBitsLtr>(
    bs: &mut B,
    channel: &GranuleChannel,
    part3_bits: u32,
    buf: &mut [f32; 576],
) -> Result<usize> {
    buf.fill(0.0);

    if part3_bits == 0 {
        return Ok(0);
    }

    let pow43: &[f32] = &POW43;

    let big_values_end = 2 * usize::from(channel.big_values);

    let region_ends = [
        channel.region1_start.min(big_values_end),
        channel.region2_start.min(big_values_end),
        big_values_end,
    ];

    let mut bits_read = 0;
    let mut i = 0;

    for (&region_end, &table_select) in region_ends.iter().zip(channel.table_select.iter()) {
        let table = codebook(table_select);

        // Samples coded with an empty table are all 0.
        if table.is_empty() {
            i = i.max(region_end);
            continue;
        }

        let linbits = LINBITS[usize::from(table_select)];

        while i < region_end && bits_read < part3_bits {
            let (value, code_len) = match bs.read_codebook(table) {
                Some(code) => code,
                None => return decode_error("mpa: invalid big values huffman code"),
            };

            let (x, x_bits) = read_big_value(bs, usize::from(value >> 4), linbits, pow43);
            let (y, y_bits) = read_big_value(bs, usize::from(value & 0xf), linbits, pow43);

            buf[i] = x;
            buf[i + 1] = y;

            bits_read += code_len + x_bits + y_bits;
            i += 2;
        }
    }

    let quads = &QUADS_CODEBOOKS[usize::from(channel.count1table_select)];

    while i <= 576 - 4 && bits_read < part3_bits {
        let (value, code_len) = match bs.read_codebook(quads) {
            Some(code) => code,
            None => return decode_error("mpa: invalid count1 huffman code"),
        };

        bits_read += code_len;

        // Samples v, w, x, y, from the most significant bit down. Each set sample is followed by
        // its sign bit.
        for (j, sample) in buf[i..i + 4].iter_mut().enumerate() {
            if value & (0x8 >> j) != 0 {
                *sample = if bs.read_bit() { -1.0 } else { 1.0 };
                bits_read += 1;
            }
        }

        i += 4;
    }

    if bits_read < part3_bits {
        // Stuffing bits.
        bs.ignore_bits(part3_bits - bits_read);
    }
    else if bits_read > part3_bits && i > big_values_end {
        // The last quadruple ran past the end of part 3, it is not real data.
        debug!("mpa: count1 overrun by {} bits", bits_read - part3_bits);
        i -= 4;
        buf[i..i + 4].fill(0.0);
    }
    else if bits_read > part3_bits {
        debug!("mpa: big values overrun by {} bits", bits_read - part3_bits);
    }

    Ok(i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer3::reservoir::BitReservoir;
    use crate::testing::BitWriter;

    fn reservoir_from(bw: BitWriter) -> BitReservoir {
        let len = (bw.len() + 7) / 8;
        let mut reservoir = BitReservoir::new();
        reservoir.append(&bw.into_bytes(len + 8));
        reservoir
    }

    #[test]
    fn verify_pow43() {
        assert_eq!(POW43[0], 0.0);
        assert_eq!(POW43[1], 1.0);
        assert!((POW43[8] - 16.0).abs() < 1e-4);
        assert_eq!(POW43.len(), 8207 + 1);
    }

    #[test]
    fn verify_big_values_and_count1() {
        let channel = GranuleChannel {
            big_values: 2,
            table_select: [1, 1, 1],
            region1_start: 576,
            region2_start: 576,
            ..Default::default()
        };

        let mut bw = BitWriter::new();
        // Table 1: (1, 0) with a negative sign, then (1, 1) with signs +, -.
        bw.write(0b01, 2);
        bw.write(1, 1);
        bw.write(0b000, 3);
        bw.write(0b01, 2);
        // Count1 table A: 0101 -> y = 1, positive.
        bw.write(0b0101, 4);
        bw.write(0, 1);

        let part3_bits = bw.len() as u32;
        let mut reservoir = reservoir_from(bw);

        let mut buf = [1.0; 576];
        let rzero = read_huffman_samples(&mut reservoir, &channel, part3_bits, &mut buf).unwrap();

        assert_eq!(rzero, 8);
        assert_eq!(buf[..8], [-1.0, 0.0, 1.0, -1.0, 0.0, 0.0, 0.0, 1.0]);
        assert!(buf[8..].iter().all(|&s| s == 0.0));
        assert_eq!(reservoir.total_bits_read(), u64::from(part3_bits));
    }

    #[test]
    fn verify_linbits() {
        let channel = GranuleChannel {
            big_values: 1,
            table_select: [16, 0, 0],
            region1_start: 576,
            region2_start: 576,
            ..Default::default()
        };

        // Table 16 codes (0, 15) as 0_0001_0001, followed by 1 linbit and the sign of y.
        let mut bw = BitWriter::new();
        bw.write(0x11, 9);
        bw.write(1, 1);
        bw.write(0, 1);

        let part3_bits = bw.len() as u32;
        let mut reservoir = reservoir_from(bw);

        let mut buf = [0.0; 576];
        let rzero = read_huffman_samples(&mut reservoir, &channel, part3_bits, &mut buf).unwrap();

        assert_eq!(rzero, 2);
        assert_eq!(buf[0], 0.0);
        assert_eq!(buf[1], POW43[16]);
    }

    #[test]
    fn verify_count1_overrun_is_discarded() {
        let channel = GranuleChannel::default();

        let mut bw = BitWriter::new();
        // Count1 table A: 1 -> 0000, then 0101 -> y = 1 and its sign bit.
        bw.write(1, 1);
        bw.write(0b0101, 4);
        bw.write(0, 1);

        let mut reservoir = reservoir_from(bw);

        let mut buf = [0.0; 576];
        let rzero = read_huffman_samples(&mut reservoir, &channel, 3, &mut buf).unwrap();

        assert_eq!(rzero, 4);
        assert!(buf.iter().all(|&s| s == 0.0));
    }
}
