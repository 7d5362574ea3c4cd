// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use mpadec_core::io::ReadBitsLtr;

use super::bands::BlockType;
use super::{FrameData, GranuleChannel};

/// Bit lengths of the two MPEG1 scalefactor partitions, indexed by `scalefac_compress`.
const MPEG1_SLEN: [(u32, u32); 16] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (0, 3),
    (3, 0),
    (1, 1),
    (1, 2),
    (1, 3),
    (2, 1),
    (2, 2),
    (2, 3),
    (3, 1),
    (3, 2),
    (3, 3),
    (4, 2),
    (4, 3),
];

/// The long scalefactor bands of each of the four MPEG1 scfsi groups.
const MPEG1_SCFSI_GROUPS: [(usize, usize); 4] = [(0, 6), (6, 11), (11, 16), (16, 21)];

/// The number of scalefactors in each of the four MPEG2 partitions. Indexed by the partition
/// table, then by the block index (long, short, mixed).
const MPEG2_NSFB: [[[usize; 4]; 3]; 6] = [
    [[6, 5, 5, 5], [9, 9, 9, 9], [6, 9, 9, 9]],
    [[6, 5, 7, 3], [9, 9, 12, 6], [6, 9, 12, 6]],
    [[11, 10, 0, 0], [18, 18, 0, 0], [15, 18, 0, 0]],
    // Right channel of intensity stereo frames.
    [[7, 7, 7, 0], [12, 12, 12, 0], [6, 15, 12, 0]],
    [[6, 6, 6, 3], [12, 9, 9, 6], [6, 12, 9, 6]],
    [[8, 8, 5, 0], [15, 12, 9, 0], [6, 18, 9, 0]],
];

/// Read `count` scalefactors of `slen` bits each into `scalefacs`. Returns the number of bits read.
#[inline(always)]
fn read_partition<B: ReadBitsLtr>(bs: &mut B, slen: u32, scalefacs: &mut [u8]) -> u32 {
    // Scalefactors are zero-initialized, a zero length partition leaves them as is.
    if slen > 0 {
        for sf in scalefacs.iter_mut() {
            *sf = bs.read_bits_leq32(slen) as u8;
        }
    }

    slen * scalefacs.len() as u32
}

/// Reads the scalefactors of channel `ch` of granule `gr` of a MPEG1 frame. Returns the number of
/// bits read, the part 2 length.
pub(super) fn read_scale_factors_mpeg1<B: ReadBitsLtr>(
    bs: &mut B,
    gr: usize,
    ch: usize,
    frame_data: &mut FrameData,
) -> u32 {
    let scfsi = frame_data.scfsi[ch];
    let (first, rest) = frame_data.granules.split_at_mut(1);

    let (prev, channel) = match gr {
        0 => (None, &mut first[0].channels[ch]),
        _ => (Some(&first[0].channels[ch]), &mut rest[0].channels[ch]),
    };

    let (slen1, slen2) = MPEG1_SLEN[usize::from(channel.scalefac_compress)];

    match channel.block_type {
        BlockType::Short { is_mixed } => {
            // A mixed block starts with 8 long bands followed by short bands 3 to 5. Otherwise
            // short bands 0 to 5 come first. Short bands 6 to 11 follow in both cases.
            let split = if is_mixed { 8 + 3 * 3 } else { 6 * 3 };

            let mut bits = read_partition(bs, slen1, &mut channel.scalefacs[..split]);
            bits += read_partition(bs, slen2, &mut channel.scalefacs[split..split + 6 * 3]);
            bits
        }
        _ => {
            let mut bits = 0;

            for (group, &(start, end)) in MPEG1_SCFSI_GROUPS.iter().enumerate() {
                let slen = if group < 2 { slen1 } else { slen2 };

                match prev {
                    // Reuse the scalefactors of the first granule.
                    Some(prev) if scfsi[group] => {
                        channel.scalefacs[start..end].copy_from_slice(&prev.scalefacs[start..end]);
                    }
                    _ => bits += read_partition(bs, slen, &mut channel.scalefacs[start..end]),
                }
            }

            bits
        }
    }
}

/// Decodes a MPEG2 `scalefac_compress` value into the bit lengths of the four scalefactor
/// partitions and the partition table index.
fn mpeg2_slen(scalefac_compress: u16, is_intensity_channel: bool) -> ([u32; 4], usize) {
    let sfc = u32::from(scalefac_compress);

    if is_intensity_channel {
        let sfc = sfc >> 1;

        match sfc {
            0..=179 => ([sfc / 36, (sfc % 36) / 6, (sfc % 36) % 6, 0], 3),
            180..=243 => {
                let sfc = sfc - 180;
                ([(sfc % 64) >> 4, (sfc % 16) >> 2, sfc % 4, 0], 4)
            }
            _ => {
                let sfc = sfc - 244;
                ([sfc / 3, sfc % 3, 0, 0], 5)
            }
        }
    }
    else {
        match sfc {
            0..=399 => ([(sfc >> 4) / 5, (sfc >> 4) % 5, (sfc % 16) >> 2, sfc % 4], 0),
            400..=499 => {
                let sfc = sfc - 400;
                ([(sfc >> 2) / 5, (sfc >> 2) % 5, sfc % 4, 0], 1)
            }
            _ => {
                let sfc = sfc - 500;
                ([sfc / 3, sfc % 3, 0, 0], 2)
            }
        }
    }
}

/// Reads the scalefactors of a granule channel of a MPEG2 or MPEG2.5 frame. Returns the number of
/// bits read, the part 2 length.
///
/// `is_intensity_channel` is true for the right channel of an intensity stereo frame.
pub(super) fn read_scale_factors_mpeg2<B: ReadBitsLtr>(
    bs: &mut B,
    is_intensity_channel: bool,
    channel: &mut GranuleChannel,
) -> u32 {
    let block_idx = match channel.block_type {
        BlockType::Short { is_mixed: false } => 1,
        BlockType::Short { is_mixed: true } => 2,
        _ => 0,
    };

    // The preflag is implied by the largest scalefac_compress values.
    if !is_intensity_channel {
        channel.preflag = channel.scalefac_compress >= 500;
    }

    let (slen, table) = mpeg2_slen(channel.scalefac_compress, is_intensity_channel);

    let mut start = 0;
    let mut bits = 0;

    for (&slen, &count) in slen.iter().zip(MPEG2_NSFB[table][block_idx].iter()) {
        bits += read_partition(bs, slen, &mut channel.scalefacs[start..start + count]);
        start += count;
    }

    bits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer3::reservoir::BitReservoir;

    #[test]
    fn verify_mpeg1_long_scalefactors_with_scfsi() {
        let mut frame_data = FrameData::default();
        frame_data.scfsi[0] = [true, false, false, true];
        frame_data.granules[0].channels[0].scalefac_compress = 15;
        frame_data.granules[1].channels[0].scalefac_compress = 15;

        let mut reservoir = BitReservoir::new();
        reservoir.append(&[0xff; 64]);

        // Granule 0 reads 11 scalefactors of 4 bits, and 10 of 3 bits.
        assert_eq!(read_scale_factors_mpeg1(&mut reservoir, 0, 0, &mut frame_data), 74);
        assert_eq!(frame_data.granules[0].channels[0].scalefacs[..6], [15; 6]);
        assert_eq!(frame_data.granules[0].channels[0].scalefacs[20], 7);

        // Modify granule 0 to observe the copy.
        frame_data.granules[0].channels[0].scalefacs[..6].copy_from_slice(&[1, 2, 3, 4, 5, 6]);

        // Granule 1 reuses groups 0 and 3.
        assert_eq!(read_scale_factors_mpeg1(&mut reservoir, 1, 0, &mut frame_data), 5 * 4 + 5 * 3);

        let scalefacs = &frame_data.granules[1].channels[0].scalefacs;
        assert_eq!(scalefacs[..6], [1, 2, 3, 4, 5, 6]);
        assert_eq!(scalefacs[6..11], [15; 5]);
        assert_eq!(scalefacs[11..16], [7; 5]);
        assert_eq!(scalefacs[16..21], [7; 5]);
    }

    #[test]
    fn verify_mpeg1_short_scalefactors() {
        let mut frame_data = FrameData::default();
        let channel = &mut frame_data.granules[0].channels[0];
        channel.block_type = BlockType::Short { is_mixed: true };
        channel.scalefac_compress = 4;

        let mut reservoir = BitReservoir::new();
        reservoir.append(&[0xff; 64]);

        // Only the first 17 scalefactors are coded, with 3 bits each.
        assert_eq!(read_scale_factors_mpeg1(&mut reservoir, 0, 0, &mut frame_data), 17 * 3);

        let scalefacs = &frame_data.granules[0].channels[0].scalefacs;
        assert_eq!(scalefacs[..17], [7; 17]);
        assert_eq!(scalefacs[17..35], [0; 18]);
    }

    #[test]
    fn verify_mpeg2_slen() {
        assert_eq!(mpeg2_slen(0, false), ([0, 0, 0, 0], 0));
        assert_eq!(mpeg2_slen(399, false), ([4, 4, 3, 3], 0));
        assert_eq!(mpeg2_slen(455, false), ([2, 3, 3, 0], 1));
        assert_eq!(mpeg2_slen(511, false), ([3, 2, 0, 0], 2));
        assert_eq!(mpeg2_slen(2 * 100, true), ([2, 4, 4, 0], 3));
        assert_eq!(mpeg2_slen(2 * 200, true), ([1, 1, 0, 0], 4));
        assert_eq!(mpeg2_slen(2 * 250, true), ([2, 0, 0, 0], 5));
    }

    #[test]
    fn verify_mpeg2_preflag() {
        let mut reservoir = BitReservoir::new();
        reservoir.append(&[0x00; 64]);

        let mut channel = GranuleChannel { scalefac_compress: 500, ..Default::default() };
        assert_eq!(read_scale_factors_mpeg2(&mut reservoir, false, &mut channel), 0);
        assert!(channel.preflag);

        // 11 scalefactors of 1 bit, and 10 of 2 bits.
        let mut channel = GranuleChannel { scalefac_compress: 505, ..Default::default() };
        assert_eq!(read_scale_factors_mpeg2(&mut reservoir, false, &mut channel), 31);
    }
}
