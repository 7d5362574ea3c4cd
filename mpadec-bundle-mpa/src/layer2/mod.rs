// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use mpadec_core::errors::Result;
use mpadec_core::io::ReadBitsLtr;
use mpadec_core::util::bits::sign_extend_leq32_to_i32;

use crate::bitstream::{CrcBits, FrameBits};
use crate::common::*;
use crate::header::FrameHeader;
use crate::layer12::{subband_modes, SubbandMode, LAYER12_SCALEFACTORS};
use crate::synthesis::FilterBank;

/// The number of granules in a layer 2 frame. Each granule codes 3 samples per sub-band.
const GRANULES: usize = 12;

struct QuantClass {
    /// C constant.
    c: f32,
    /// D constant.
    d: f32,
    /// Is grouping used?
    grouping: bool,
    /// Bits per raw sample (if grouping is false) or codeword (if grouping is true).
    bits: u8,
    /// Number of levels in a sample.
    nlevels: u16,
}

struct SbQuantInfo {
    /// Bit allocation for the sub-band.
    nbal: u8,
    /// Indicies into quantization class table. Valid for classes 0..2^nbal.
    classes: [u8; 16],
}

struct SbInfo {
    /// The maximum number of sub-bands.
    sblimit: usize,
    /// An index into the sub-band information table for each sub-band. Valid for sub-bands between
    /// 0..sblimit.
    bands: [u8; 32],
}

/// Quantization classes. Derived from ISO/IEC 11172-3 Table 3-B.4.
const QUANT_CLASS: [QuantClass; 17] = [
    QuantClass { c: 1.33333333333, d: 0.50000000000, grouping: true, bits: 5, nlevels: 3 },
    QuantClass { c: 1.60000000000, d: 0.50000000000, grouping: true, bits: 7, nlevels: 5 },
    QuantClass { c: 1.14285714286, d: 0.25000000000, grouping: false, bits: 3, nlevels: 7 },
    QuantClass { c: 1.77777777777, d: 0.50000000000, grouping: true, bits: 10, nlevels: 9 },
    QuantClass { c: 1.06666666666, d: 0.12500000000, grouping: false, bits: 4, nlevels: 15 },
    QuantClass { c: 1.03225806452, d: 0.06250000000, grouping: false, bits: 5, nlevels: 31 },
    QuantClass { c: 1.01587301587, d: 0.03125000000, grouping: false, bits: 6, nlevels: 63 },
    QuantClass { c: 1.00787401575, d: 0.01562500000, grouping: false, bits: 7, nlevels: 127 },
    QuantClass { c: 1.00392156863, d: 0.00781250000, grouping: false, bits: 8, nlevels: 255 },
    QuantClass { c: 1.00195694716, d: 0.00390625000, grouping: false, bits: 9, nlevels: 511 },
    QuantClass { c: 1.00097751711, d: 0.00195312500, grouping: false, bits: 10, nlevels: 1023 },
    QuantClass { c: 1.00048851979, d: 0.00097656250, grouping: false, bits: 11, nlevels: 2047 },
    QuantClass { c: 1.00024420024, d: 0.00048828125, grouping: false, bits: 12, nlevels: 4095 },
    QuantClass { c: 1.00012208522, d: 0.00024414063, grouping: false, bits: 13, nlevels: 8191 },
    QuantClass { c: 1.00006103888, d: 0.00012207031, grouping: false, bits: 14, nlevels: 16383 },
    QuantClass { c: 1.00003051851, d: 0.00006103516, grouping: false, bits: 15, nlevels: 32767 },
    QuantClass { c: 1.00001525902, d: 0.00003051758, grouping: false, bits: 16, nlevels: 65535 },
];

/// Sub-band quantization class information. Derived from ISO/IEC 11172-3 Tables 3-B.2a-d.
const SB_QUANT_INFO: [SbQuantInfo; 8] = [
    SbQuantInfo { nbal: 2, classes: [0, 0, 1, 16, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0] },
    SbQuantInfo { nbal: 2, classes: [0, 0, 1, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0] },
    SbQuantInfo { nbal: 3, classes: [0, 0, 1, 3, 4, 5, 6, 7, 0, 0, 0, 0, 0, 0, 0, 0] },
    SbQuantInfo { nbal: 3, classes: [0, 0, 1, 2, 3, 4, 5, 16, 0, 0, 0, 0, 0, 0, 0, 0] },
    SbQuantInfo { nbal: 4, classes: [0, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14] },
    SbQuantInfo { nbal: 4, classes: [0, 0, 1, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15] },
    SbQuantInfo { nbal: 4, classes: [0, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 16] },
    SbQuantInfo { nbal: 4, classes: [0, 0, 2, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16] },
];

/// Sub-band information table.
#[rustfmt::skip]
const SB_INFO: [SbInfo; 5] = [
    // Derived from ISO/IEC 11172-3 Table 3-B.2a.
    SbInfo {
        sblimit: 27,
        bands: [
            7, 7, 7, 6, 6, 6, 6, 6, 6, 6, 6, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 0, 0, 0, 0, 0, 0,
            0, 0, 0,
        ],
    },
    // Derived from ISO/IEC 11172-3 Table 3-B.2b.
    SbInfo {
        sblimit: 30,
        bands: [
            7, 7, 7, 6, 6, 6, 6, 6, 6, 6, 6, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 0, 0, 0, 0, 0, 0,
            0, 0, 0,
        ],
    },
    // Derived from ISO/IEC 11172-3 Table 3-B.2c.
    SbInfo {
        sblimit: 8,
        bands: [
            5, 5, 2, 2, 2, 2, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0,
        ],
    },
    // Derived from ISO/IEC 11172-3 Table 3-B.2d.
    SbInfo {
        sblimit: 12,
        bands: [
            5, 5, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0,
        ],
    },
    // Derived from ISO/IEC 13818-3 Table 3-B.1.
    SbInfo {
        sblimit: 30,
        bands: [
            4, 4, 4, 4, 2, 2, 2, 2, 2, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
            1, 0, 0,
        ],
    },
];

#[inline(always)]
fn find_quant_class(sb_quant_info: &SbQuantInfo, class: u8) -> &'static QuantClass {
    &QUANT_CLASS[usize::from(sb_quant_info.classes[usize::from(class)])]
}

#[inline(always)]
fn find_sb_quant_info(sb_info: &SbInfo, sb: usize) -> &'static SbQuantInfo {
    &SB_QUANT_INFO[usize::from(sb_info.bands[sb])]
}

/// Get the allocation table for a frame. The header selects a table by its sub-band count, which
/// MPEG1 derives from the bit-rate per channel and the sample rate.
fn find_sb_info(header: &FrameHeader) -> &'static SbInfo {
    let idx = if header.is_mpeg1() {
        match header.subband_count {
            8 => 2,
            12 => 3,
            27 => 0,
            _ => 1,
        }
    }
    else {
        // MPEG2 & MPEG2.5 use a single table.
        4
    };

    &SB_INFO[idx]
}

/// Read and dequantize the next three samples of a sub-band.
#[inline]
fn dequantize<B: ReadBitsLtr>(bs: &mut B, class: &QuantClass) -> [f32; 3] {
    let mut raw = [0; 3];

    let bits = if class.grouping {
        // A grouped codeword packs three samples as base-nlevels digits, least significant first.
        let mut c = bs.read_bits_leq32(u32::from(class.bits));

        let nlevels = u32::from(class.nlevels);

        for item in &mut raw {
            *item = c % nlevels;
            c /= nlevels;
        }

        // The width of one unpacked sample.
        nlevels.next_power_of_two().trailing_zeros()
    }
    else {
        let bits = u32::from(class.bits);

        for item in &mut raw {
            *item = bs.read_bits_leq32(bits);
        }

        bits
    };

    let divisor = (1 << (bits - 1)) as f32;

    raw.map(|raw| {
        // Invert the most significant bit, then read the sample as a signed fraction.
        let s = sign_extend_leq32_to_i32(raw ^ 1 << (bits - 1), bits) as f32 / divisor;

        class.c * (s + class.d)
    })
}

/// Layer 2 decoder.
pub struct Layer2 {
    verify_crc: bool,
}

impl Layer2 {
    pub fn new(verify_crc: bool) -> Self {
        Layer2 { verify_crc }
    }
}

impl Layer for Layer2 {
    fn decode(
        &mut self,
        frame: &mut FrameBits,
        header: &FrameHeader,
        bank: &mut FilterBank<'_>,
    ) -> Result<()> {
        let mut alloc = [[0u8; 32]; 2];
        let mut scfsi = [[0u8; 32]; 2];
        let mut scalefacs = [[[0u8; 3]; 32]; 2];

        let num_channels = header.n_channels();

        let sb_info = find_sb_info(header);
        let sblimit = sb_info.sblimit;

        let modes = subband_modes(header, sblimit);

        // The allocations and scalefactor selection information are protected by the CRC.
        let checksum = {
            let mut bs = CrcBits::new(frame, header);

            for (sb, mode) in modes.iter().enumerate().take(sblimit) {
                let nbal = u32::from(find_sb_quant_info(sb_info, sb).nbal);

                match mode {
                    SubbandMode::Mono => alloc[0][sb] = bs.read_bits_leq32(nbal) as u8,
                    SubbandMode::Stereo => {
                        alloc[0][sb] = bs.read_bits_leq32(nbal) as u8;
                        alloc[1][sb] = bs.read_bits_leq32(nbal) as u8;
                    }
                    SubbandMode::Intensity => {
                        let value = bs.read_bits_leq32(nbal) as u8;

                        alloc[0][sb] = value;
                        alloc[1][sb] = value;
                    }
                }
            }

            for sb in 0..sblimit {
                for ch in 0..num_channels {
                    if alloc[ch][sb] != 0 {
                        scfsi[ch][sb] = bs.read_bits_leq32(2) as u8;
                    }
                }
            }

            if self.verify_crc {
                bs.verify(header)
            }
            else {
                Ok(())
            }
        };

        // Each sub-band is split into three parts of 12 samples. The selection information picks
        // which parts transmit their own scalefactor, and which repeat the previous one.
        for sb in 0..sblimit {
            for ch in 0..num_channels {
                if alloc[ch][sb] == 0 {
                    continue;
                }

                let first = frame.get_bits(6) as u8;

                scalefacs[ch][sb] = match scfsi[ch][sb] {
                    0 => [first, frame.get_bits(6) as u8, frame.get_bits(6) as u8],
                    1 => [first, first, frame.get_bits(6) as u8],
                    2 => [first; 3],
                    _ => {
                        let second = frame.get_bits(6) as u8;
                        [first, second, second]
                    }
                };
            }
        }

        // Samples of a frame failing the CRC are discarded.
        checksum?;

        for gr in 0..GRANULES {
            let mut triplets = [[[0f32; 3]; 32]; 2];

            // The scalefactor part of the granule.
            let part = gr / 4;

            let scalefactor =
                |ch: usize, sb: usize| LAYER12_SCALEFACTORS[usize::from(scalefacs[ch][sb][part])];

            for (sb, mode) in modes.iter().enumerate().take(sblimit) {
                let sb_quant_info = find_sb_quant_info(sb_info, sb);

                match mode {
                    SubbandMode::Mono | SubbandMode::Stereo => {
                        for ch in 0..num_channels {
                            let class_idx = alloc[ch][sb];

                            if class_idx == 0 {
                                continue;
                            }

                            let class = find_quant_class(sb_quant_info, class_idx);
                            let triplet = dequantize(frame, class);
                            let scalefac = scalefactor(ch, sb);

                            triplets[ch][sb] = triplet.map(|s| scalefac * s);
                        }
                    }
                    // Intensity coded sub-bands transmit one triplet, scaled per channel.
                    SubbandMode::Intensity if alloc[0][sb] != 0 => {
                        let class = find_quant_class(sb_quant_info, alloc[0][sb]);
                        let triplet = dequantize(frame, class);

                        for (ch, samples) in triplets.iter_mut().enumerate() {
                            let scalefac = scalefactor(ch, sb);

                            samples[sb] = triplet.map(|s| scalefac * s);
                        }
                    }
                    SubbandMode::Intensity => (),
                }
            }

            for i in 0..3 {
                for (sb, mode) in modes.iter().enumerate().take(sblimit) {
                    match mode {
                        SubbandMode::Mono => bank.input_mono(sb, triplets[0][sb][i]),
                        _ => bank.input_stereo(sb, triplets[0][sb][i], triplets[1][sb][i]),
                    }
                }

                bank.flush();
            }
        }

        Ok(())
    }
}
