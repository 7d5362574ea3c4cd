// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use mpadec_core::errors::{decode_error, Result};
use mpadec_core::io::ReadBitsLtr;

use crate::common::ChannelMode;
use crate::header::FrameHeader;

use super::bands::{BlockType, SFB_LONG_BANDS};
use super::{FrameData, GranuleChannel};

/// Reads the side information of one channel of a granule.
fn read_granule_channel<B: ReadBitsLtr>(
    bs: &mut B,
    header: &FrameHeader,
    channel: &mut GranuleChannel,
) -> Result<()> {
    channel.part2_3_length = bs.read_bits_leq32(12) as u16;
    channel.big_values = bs.read_bits_leq32(9) as u16;

    // Each big value codes 2 of the 576 samples in a granule.
    if channel.big_values > 288 {
        return decode_error("mpa: granule big_values > 288");
    }

    channel.global_gain = bs.read_bits_leq32(8) as u8;

    channel.scalefac_compress = if header.is_mpeg1() {
        bs.read_bits_leq32(4) as u16
    }
    else {
        bs.read_bits_leq32(9) as u16
    };

    let sfb_long = &SFB_LONG_BANDS[header.sample_rate_idx()];

    if bs.read_bit() {
        // Window switching.
        let block_type_enc = bs.read_bits_leq32(2);
        let is_mixed = bs.read_bit();

        channel.block_type = match block_type_enc {
            0b01 => BlockType::Start,
            0b10 => BlockType::Short { is_mixed },
            0b11 => BlockType::End,
            _ => return decode_error("mpa: invalid block_type"),
        };

        // Two regions, so two table selectors.
        channel.table_select[0] = bs.read_bits_leq32(5) as u8;
        channel.table_select[1] = bs.read_bits_leq32(5) as u8;
        channel.table_select[2] = 0;

        for gain in channel.subblock_gain.iter_mut() {
            *gain = bs.read_bits_leq32(3) as u8;
        }

        // Region boundaries are implicit with window switching. Region 0 always spans 36 samples,
        // except for long transitional blocks in MPEG2, and for MPEG2.5 where region 0 is counted
        // in long bands.
        channel.region1_start = if header.is_mpeg2p5() {
            match channel.block_type {
                BlockType::Short { is_mixed: false } => sfb_long[6],
                _ => sfb_long[8],
            }
        }
        else if header.is_mpeg1() || block_type_enc == 0b10 {
            36
        }
        else {
            54
        };

        // Region 2 is empty.
        channel.region2_start = 576;
    }
    else {
        channel.block_type = BlockType::Long;

        for select in channel.table_select.iter_mut() {
            *select = bs.read_bits_leq32(5) as u8;
        }

        // The band counts of regions 0 and 1 are transmitted less 1.
        let region0_count = bs.read_bits_leq32(4) as usize + 1;
        let region1_count = bs.read_bits_leq32(3) as usize + 1;

        channel.region1_start = sfb_long[region0_count];
        channel.region2_start = sfb_long.get(region0_count + region1_count).copied().unwrap_or(576);
    }

    // The MPEG2 preflag is implied by scalefac_compress.
    channel.preflag = header.is_mpeg1() && bs.read_bit();
    channel.scalefac_scale = bs.read_bit();
    channel.count1table_select = bs.read_bits_leq32(1) as u8;

    Ok(())
}

/// Reads the side information of a layer 3 frame.
pub(super) fn read_side_info<B: ReadBitsLtr>(
    bs: &mut B,
    header: &FrameHeader,
    frame_data: &mut FrameData,
) -> Result<()> {
    let num_channels = header.n_channels();

    if header.is_mpeg1() {
        frame_data.main_data_begin = bs.read_bits_leq32(9) as u16;

        // Private bits.
        match header.channel_mode {
            ChannelMode::Mono => bs.ignore_bits(5),
            _ => bs.ignore_bits(3),
        }

        for scfsi in frame_data.scfsi[..num_channels].iter_mut() {
            for band in scfsi.iter_mut() {
                *band = bs.read_bit();
            }
        }
    }
    else {
        frame_data.main_data_begin = bs.read_bits_leq32(8) as u16;

        // Private bits.
        match header.channel_mode {
            ChannelMode::Mono => bs.ignore_bits(1),
            _ => bs.ignore_bits(2),
        }
    }

    for granule in frame_data.granules[..header.n_granules()].iter_mut() {
        for channel in granule.channels[..num_channels].iter_mut() {
            read_granule_channel(bs, header, channel)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitstream::FrameBits;
    use crate::testing::BitWriter;

    /// Writes the side information of a long block channel.
    fn write_long_channel(bw: &mut BitWriter, part2_3_length: u32, big_values: u32) {
        bw.write(part2_3_length, 12);
        bw.write(big_values, 9);
        bw.write(210, 8);
        bw.write(0, 4);
        bw.write(0, 1);
        bw.write(1, 5);
        bw.write(2, 5);
        bw.write(3, 5);
        bw.write(3, 4);
        bw.write(2, 3);
        bw.write(0, 3);
    }

    #[test]
    fn verify_mpeg1_mono_side_info() {
        // MPEG1, layer 3, 128 kbit/s, 44.1 kHz, mono.
        let header = FrameHeader::parse(0xfffb_90c4).unwrap();

        let mut bw = BitWriter::new();
        bw.write(300, 9);
        bw.write(0, 5);
        bw.write(0b1010, 4);
        write_long_channel(&mut bw, 1000, 100);

        // Granule 1, short blocks.
        bw.write(500, 12);
        bw.write(50, 9);
        bw.write(200, 8);
        bw.write(5, 4);
        bw.write(1, 1);
        bw.write(0b10, 2);
        bw.write(0, 1);
        bw.write(7, 5);
        bw.write(8, 5);
        bw.write(1, 3);
        bw.write(2, 3);
        bw.write(3, 3);
        bw.write(0b011, 3);

        assert_eq!(bw.len(), 8 * header.side_info_len());

        let mut bits = FrameBits::from_bytes(&bw.into_bytes(header.side_info_len()));
        let mut frame_data = FrameData::default();
        read_side_info(&mut bits, &header, &mut frame_data).unwrap();

        assert_eq!(frame_data.main_data_begin, 300);
        assert_eq!(frame_data.scfsi[0], [true, false, true, false]);

        let long = &frame_data.granules[0].channels[0];
        assert_eq!(long.part2_3_length, 1000);
        assert_eq!(long.big_values, 100);
        assert_eq!(long.block_type, BlockType::Long);
        assert_eq!(long.table_select, [1, 2, 3]);
        // Region 0 spans 4 bands, region 1 spans 3.
        assert_eq!(long.region1_start, 16);
        assert_eq!(long.region2_start, 30);

        let short = &frame_data.granules[1].channels[0];
        assert_eq!(short.block_type, BlockType::Short { is_mixed: false });
        assert_eq!(short.subblock_gain, [1, 2, 3]);
        assert_eq!(short.region1_start, 36);
        assert_eq!(short.region2_start, 576);
        assert!(!short.preflag);
        assert!(short.scalefac_scale);
        assert_eq!(short.count1table_select, 1);
    }

    #[test]
    fn verify_invalid_side_info() {
        let header = FrameHeader::parse(0xfffb_90c4).unwrap();

        // big_values > 288.
        let mut bw = BitWriter::new();
        bw.write(0, 18);
        write_long_channel(&mut bw, 0, 289);
        let mut bits = FrameBits::from_bytes(&bw.into_bytes(header.side_info_len()));
        assert!(read_side_info(&mut bits, &header, &mut FrameData::default()).is_err());

        // Window switching with a block type of 0.
        let mut bw = BitWriter::new();
        bw.write(0, 18);
        bw.write(0, 12 + 9 + 8 + 4);
        bw.write(1, 1);
        bw.write(0, 2);
        let mut bits = FrameBits::from_bytes(&bw.into_bytes(header.side_info_len()));
        assert!(read_side_info(&mut bits, &header, &mut FrameData::default()).is_err());
    }
}
