// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use mpadec_core::errors::{decode_error, Result};

use log::warn;

use crate::bitstream::{CrcBits, FrameBits};
use crate::common::*;
use crate::header::FrameHeader;
use crate::synthesis::FilterBank;

mod bands;
mod codebooks;
mod huffman;
mod hybrid_synthesis;
mod requantize;
pub mod reservoir;
mod scalefactors;
mod side_info;
mod stereo;

use bands::BlockType;
use reservoir::BitReservoir;

/// The side information of a frame, and the scalefactors decoded from its main data.
#[derive(Default, Debug)]
struct FrameData {
    /// Negative offset in bytes from the first byte of this frame's main data to the first bit of
    /// the main data of granule 0.
    main_data_begin: u16,
    /// MPEG1 only. Per channel, set if the second granule reuses the first granule's scalefactors
    /// for long band groups 0..6, 6..11, 11..16, and 16..21.
    scfsi: [[bool; 4]; 2],
    /// Granules. MPEG2 and MPEG2.5 frames only use the first.
    granules: [Granule; 2],
}

#[derive(Default, Debug)]
struct Granule {
    channels: [GranuleChannel; 2],
}

#[derive(Debug)]
struct GranuleChannel {
    /// Bits of scalefactors (part 2) and Huffman coded samples (part 3).
    part2_3_length: u16,
    /// Pairs of samples in the big values partition.
    big_values: u16,
    global_gain: u8,
    /// Selects the bit lengths of the scalefactors. 4 bits for MPEG1, 9 bits otherwise.
    scalefac_compress: u16,
    block_type: BlockType,
    /// Gain offset of each short window.
    subblock_gain: [u8; 3],
    /// Huffman table of each big values region.
    table_select: [u8; 3],
    /// First sample of big values region 1.
    region1_start: usize,
    /// First sample of big values region 2.
    region2_start: usize,
    preflag: bool,
    /// Scalefactors are multiplied by 1 if set, or 0.5 otherwise.
    scalefac_scale: bool,
    /// Count1 table A (0) or B (1).
    count1table_select: u8,
    /// Scalefactors, laid out by block type:
    ///
    /// - Long: long bands 0..21.
    /// - Short: 3 windows of short bands 0..12, `scalefacs[3 * sfb + win]`.
    /// - Mixed: the long bands below the switch point, then the windows of the short bands above
    ///   it.
    ///
    /// The last short band and long band 21 are not coded. For the right channel of an intensity
    /// stereo frame the scalefactors are intensity positions.
    scalefacs: [u8; 40],
    /// First sample of the rzero partition. All samples from here on are 0.
    rzero: usize,
}

impl Default for GranuleChannel {
    fn default() -> Self {
        GranuleChannel {
            part2_3_length: 0,
            big_values: 0,
            global_gain: 0,
            scalefac_compress: 0,
            block_type: BlockType::Long,
            subblock_gain: [0; 3],
            table_select: [0; 3],
            region1_start: 0,
            region2_start: 0,
            preflag: false,
            scalefac_scale: false,
            count1table_select: 0,
            scalefacs: [0; 40],
            rzero: 0,
        }
    }
}

/// Layer 3 decoder state.
pub struct Layer3 {
    verify_crc: bool,
    reservoir: BitReservoir,
    /// Total bytes of main data appended to the reservoir.
    main_data_len: u64,
    /// Frequency lines, then time samples, of each granule and channel.
    samples: [[[f32; 576]; 2]; 2],
    /// IMDCT overlap of each channel.
    overlap: [[[f32; 18]; 32]; 2],
}

impl Layer3 {
    pub fn new(verify_crc: bool) -> Self {
        Layer3 {
            verify_crc,
            reservoir: BitReservoir::new(),
            main_data_len: 0,
            samples: [[[0.0; 576]; 2]; 2],
            overlap: [[[0.0; 18]; 32]; 2],
        }
    }

    /// Discard buffered main data and IMDCT overlap.
    pub fn reset(&mut self) {
        self.reservoir.reset();
        self.main_data_len = 0;
        self.overlap = [[[0.0; 18]; 32]; 2];
    }

    /// Moves the reservoir read cursor to the first bit of the frame's main data. Returns false if
    /// that bit is no longer, or never was, in the reservoir.
    fn seek_main_data(&mut self, frame_start: u64, main_data_begin: u16) -> bool {
        let begin = match frame_start.checked_sub(u64::from(main_data_begin)) {
            Some(begin) => begin,
            None => return false,
        };

        // Older main data was overwritten.
        if self.main_data_len - begin > reservoir::RESERVOIR_LEN as u64 {
            return false;
        }

        let target = 8 * begin;
        let pos = self.reservoir.total_bits_read();

        if target >= pos {
            self.reservoir.skip_bits(target - pos);
        }
        else {
            self.reservoir.rewind_bits(pos - target);
        }

        true
    }

    /// Decode the scalefactors and Huffman coded samples of every granule channel.
    fn read_main_data(&mut self, header: &FrameHeader, frame_data: &mut FrameData) -> Result<()> {
        for gr in 0..header.n_granules() {
            for ch in 0..header.n_channels() {
                let start = self.reservoir.total_bits_read();

                let part2_len = if header.is_mpeg1() {
                    scalefactors::read_scale_factors_mpeg1(&mut self.reservoir, gr, ch, frame_data)
                }
                else {
                    scalefactors::read_scale_factors_mpeg2(
                        &mut self.reservoir,
                        ch > 0 && header.is_intensity_stereo(),
                        &mut frame_data.granules[gr].channels[ch],
                    )
                };

                let channel = &mut frame_data.granules[gr].channels[ch];
                let part2_3_length = u32::from(channel.part2_3_length);

                if part2_len > part2_3_length {
                    return decode_error("mpa: part2_3_length is not valid");
                }

                channel.rzero = huffman::read_huffman_samples(
                    &mut self.reservoir,
                    channel,
                    part2_3_length - part2_len,
                    &mut self.samples[gr][ch],
                )?;

                // Realign with the end of part 3, whether decoding under or overran it.
                let end = start + u64::from(part2_3_length);
                let pos = self.reservoir.total_bits_read();

                if pos > end {
                    self.reservoir.rewind_bits(pos - end);
                }
                else {
                    self.reservoir.skip_bits(end - pos);
                }
            }
        }

        Ok(())
    }
}

impl Layer for Layer3 {
    fn decode(
        &mut self,
        frame: &mut FrameBits,
        header: &FrameHeader,
        bank: &mut FilterBank<'_>,
    ) -> Result<()> {
        let mut frame_data = FrameData::default();

        // Side information starts at the current position, after any CRC.
        let side_info_start = (frame.position() >> 3) as usize;

        let side_info = {
            let mut bs = CrcBits::new(frame, header);

            side_info::read_side_info(&mut bs, header, &mut frame_data).and_then(|_| {
                if self.verify_crc {
                    bs.verify(header)
                }
                else {
                    Ok(())
                }
            })
        };

        // Main data is buffered even if the side information is unusable, later frames may
        // reference it.
        let main_data_start = side_info_start + header.side_info_len();
        let main_data = frame.bytes().get(main_data_start..).unwrap_or(&[]);
        let main_data = &main_data[..main_data.len().min(header.main_data_size)];

        let frame_start = self.main_data_len;

        self.reservoir.append(main_data);
        self.main_data_len += main_data.len() as u64;

        side_info?;

        if !self.seek_main_data(frame_start, frame_data.main_data_begin) {
            warn!(
                "mpa: main_data_begin={} references missing main data, skipping frame",
                frame_data.main_data_begin
            );
            return Ok(());
        }

        self.read_main_data(header, &mut frame_data)?;

        let n_channels = header.n_channels();

        for gr in 0..header.n_granules() {
            let granule = &mut frame_data.granules[gr];

            for ch in 0..n_channels {
                requantize::requantize(header, &granule.channels[ch], &mut self.samples[gr][ch]);
            }

            if n_channels == 2 {
                stereo::stereo(header, granule, &mut self.samples[gr])?;
            }

            for ch in 0..n_channels {
                let channel = &granule.channels[ch];
                let samples = &mut self.samples[gr][ch];

                hybrid_synthesis::reorder(header, channel, samples);
                hybrid_synthesis::antialias(channel, samples);
                hybrid_synthesis::hybrid_synthesis(channel, &mut self.overlap[ch], samples);
                hybrid_synthesis::frequency_inversion(samples);
            }

            bank.synthesize_granule(&self.samples[gr], n_channels);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mpadec_core::errors::Error;

    use super::*;
    use crate::testing::{BitWriter, Output};

    /// Layer 3, MPEG1, 128 kbit/s, 44.1 kHz, mono. 413 byte frame body with 17 bytes of side
    /// information.
    const MONO: u32 = 0xfffb_90c4;
    /// As above, protected by a CRC.
    const MONO_CRC: u32 = 0xfffa_90c4;

    /// Writes the side information of a long block granule channel using table 1 for all of the
    /// big values.
    fn write_channel(bw: &mut BitWriter, part2_3_length: u32, big_values: u32) {
        bw.write(part2_3_length, 12);
        bw.write(big_values, 9);
        bw.write(210, 8);
        bw.write(0, 4);
        bw.write(0, 1);
        bw.write(1, 5);
        bw.write(0, 5);
        bw.write(0, 5);
        bw.write(15, 4);
        bw.write(7, 3);
        bw.write(0, 3);
    }

    /// Writes a mono frame whose first granule codes a single sample in `main_data_begin` bytes of
    /// earlier main data, or this frame's main data.
    fn tone_frame(header: &FrameHeader, main_data_begin: u32) -> FrameBits {
        let mut bw = BitWriter::new();
        bw.write(main_data_begin, 9);
        bw.write(0, 5 + 4);
        write_channel(&mut bw, 3, 1);
        write_channel(&mut bw, 0, 0);

        // Table 1: 01 -> (1, 0), positive.
        if main_data_begin == 0 {
            bw.write(0b010, 3);
        }

        FrameBits::from_bytes(&bw.into_bytes(header.frame_size))
    }

    #[test]
    fn verify_silent_frame() {
        let header = FrameHeader::parse(MONO).unwrap();
        let mut frame = FrameBits::from_bytes(&vec![0; header.frame_size]);

        let mut out = Output::new(1);
        Layer3::new(true).decode(&mut frame, &header, &mut out.bank()).unwrap();

        assert_eq!(out.buffer.frames(), 1152);
        assert!(out.buffer.samples().iter().all(|&s| s == 0));
    }

    #[test]
    fn verify_decode_tone() {
        let header = FrameHeader::parse(MONO).unwrap();

        let mut out = Output::new(1);
        Layer3::new(true).decode(&mut tone_frame(&header, 0), &header, &mut out.bank()).unwrap();

        assert_eq!(out.buffer.frames(), 1152);
        assert!(out.buffer.samples().iter().any(|&s| s != 0));
    }

    #[test]
    fn verify_missing_main_data_skips_frame() {
        let header = FrameHeader::parse(MONO).unwrap();

        let mut layer = Layer3::new(true);

        let mut out = Output::new(1);
        layer.decode(&mut tone_frame(&header, 10), &header, &mut out.bank()).unwrap();
        assert!(out.buffer.is_empty());

        // The main data of the skipped frame is buffered all the same.
        assert_eq!(layer.main_data_len, header.main_data_size as u64);
    }

    #[test]
    fn verify_main_data_from_reservoir() {
        let header = FrameHeader::parse(MONO).unwrap();

        // The first frame is silent, and ends with the main data of the second.
        let mut bw = BitWriter::new();
        bw.write(0, 8 * 17);
        bw.write(0, 8 * (header.main_data_size - 4) as u32);
        bw.write(0b010, 3);
        let mut first = FrameBits::from_bytes(&bw.into_bytes(header.frame_size));

        let mut layer = Layer3::new(true);

        let mut out = Output::new(1);
        layer.decode(&mut first, &header, &mut out.bank()).unwrap();
        assert!(out.buffer.samples().iter().all(|&s| s == 0));

        let mut out = Output::new(1);
        layer.decode(&mut tone_frame(&header, 4), &header, &mut out.bank()).unwrap();

        assert_eq!(out.buffer.frames(), 1152);
        assert!(out.buffer.samples().iter().any(|&s| s != 0));
    }

    #[test]
    fn verify_part2_3_length_too_short() {
        let header = FrameHeader::parse(MONO).unwrap();

        let mut bw = BitWriter::new();
        bw.write(0, 18);
        // scalefac_compress 15 codes 74 bits of scalefactors.
        bw.write(10, 12);
        bw.write(0, 9 + 8);
        bw.write(15, 4);

        let mut frame = FrameBits::from_bytes(&bw.into_bytes(header.frame_size));

        let mut out = Output::new(1);
        let result = Layer3::new(true).decode(&mut frame, &header, &mut out.bank());

        assert!(matches!(result, Err(Error::DecodeError(_))));
        assert!(out.buffer.is_empty());
    }

    #[test]
    fn verify_crc_mismatch() {
        let mut header = FrameHeader::parse(MONO_CRC).unwrap();
        header.crc = Some(0);

        let body = vec![0; header.frame_size];

        let mut layer = Layer3::new(true);

        let mut out = Output::new(1);
        let result = layer.decode(&mut FrameBits::from_bytes(&body), &header, &mut out.bank());

        assert!(matches!(result, Err(Error::ChecksumMismatch { transmitted: 0, .. })));
        assert!(out.buffer.is_empty());
        assert_eq!(layer.main_data_len, header.main_data_size as u64);

        // Without verification the frame decodes.
        let mut out = Output::new(1);
        Layer3::new(false)
            .decode(&mut FrameBits::from_bytes(&body), &header, &mut out.bank())
            .unwrap();
        assert_eq!(out.buffer.frames(), 1152);
    }
}
