// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use mpadec_core::errors::{decode_error, unsupported_error, Result};

use crate::common::*;
use crate::vbr::VbrInfo;

/// The length in bytes of a MPEG frame header word.
pub const MPEG_HEADER_LEN: usize = 4;

/// Bit-rate lookup table indexed by [is MPEG1][layer - 1][bit-rate index]. MPEG 2 and 2.5 share
/// the low sampling frequency bit-rates.
#[rustfmt::skip]
const BIT_RATES: [[[u32; 15]; 3]; 2] = [
    // MPEG 2 & 2.5
    [
        [0, 32_000, 48_000, 56_000, 64_000, 80_000, 96_000, 112_000, 128_000, 144_000, 160_000,
         176_000, 192_000, 224_000, 256_000],
        [0, 8_000, 16_000, 24_000, 32_000, 40_000, 48_000, 56_000, 64_000, 80_000, 96_000,
         112_000, 128_000, 144_000, 160_000],
        [0, 8_000, 16_000, 24_000, 32_000, 40_000, 48_000, 56_000, 64_000, 80_000, 96_000,
         112_000, 128_000, 144_000, 160_000],
    ],
    // MPEG 1
    [
        [0, 32_000, 64_000, 96_000, 128_000, 160_000, 192_000, 224_000, 256_000, 288_000, 320_000,
         352_000, 384_000, 416_000, 448_000],
        [0, 32_000, 48_000, 56_000, 64_000, 80_000, 96_000, 112_000, 128_000, 160_000, 192_000,
         224_000, 256_000, 320_000, 384_000],
        [0, 32_000, 40_000, 48_000, 56_000, 64_000, 80_000, 96_000, 112_000, 128_000, 160_000,
         192_000, 224_000, 256_000, 320_000],
    ],
];

/// Sample rate lookup table indexed by [version][sample rate index].
const SAMPLE_RATES: [[u32; 3]; 3] = [
    // MPEG 1
    [44_100, 48_000, 32_000],
    // MPEG 2
    [22_050, 24_000, 16_000],
    // MPEG 2.5
    [11_025, 12_000, 8_000],
];

/// Milliseconds per frame of a constant bit-rate stream, indexed by [layer - 1][sample rate index].
#[rustfmt::skip]
const MS_PER_FRAME: [[f32; 3]; 3] = [
    [8.707483, 8.0, 12.0],
    [26.12245, 24.0, 36.0],
    [26.12245, 24.0, 36.0],
];

/// Samples per frame of a variable bit-rate stream, indexed by layer.
const VBR_TIME_PER_FRAME: [f64; 4] = [0.0, 384.0, 1152.0, 1152.0];

/// The synchronization state of a [`Bitstream`](crate::Bitstream).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SyncMode {
    /// Any header with 11 leading sync bits and no reserved fields is accepted.
    Initial,
    /// The non-volatile fields of the header must equal those of the first frame.
    Strict {
        /// The first frame's header masked to the fields that may not change between frames.
        syncword: u32,
        /// True if the first frame was single channel.
        single_channel: bool,
    },
}

impl SyncMode {
    /// Lock synchronization to the fields of the provided header word.
    pub fn strict_from(header: u32) -> SyncMode {
        SyncMode::Strict {
            syncword: header & 0xfff8_0cc0 & 0xffff_ff3f,
            single_channel: header & 0xc0 == 0xc0,
        }
    }
}

/// Returns true if `header` is a plausible frame header word in the given synchronization mode.
///
/// Headers with a reserved version, layer, or sample rate are never accepted. Free-format (index 0)
/// and reserved (index 15) bit-rates are rejected too, since a frame size cannot be derived from
/// them.
#[inline]
pub fn is_sync_mark(header: u32, mode: SyncMode) -> bool {
    let synced = match mode {
        SyncMode::Initial => header & 0xffe0_0000 == 0xffe0_0000,
        SyncMode::Strict { syncword, single_channel } => {
            (header & 0xfff8_0c00 == syncword) && ((header & 0xc0 == 0xc0) == single_channel)
        }
    };

    synced
        // Sample rate (0x3 is reserved).
        && (header >> 10) & 0x3 != 0x3
        // Layer (0x0 is reserved).
        && (header >> 17) & 0x3 != 0x0
        // Version (0x1 is reserved).
        && (header >> 19) & 0x3 != 0x1
        // Bit-rate (0x0 is free-format, 0xf is reserved).
        && (header >> 12) & 0xf != 0x0
        && (header >> 12) & 0xf != 0xf
}

/// A MPEG 1, 2, or 2.5 audio frame header.
///
/// A header is parsed fresh for every frame and never mutated afterwards, apart from the
/// transmitted CRC and VBR information which the bitstream attaches while reading the frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameHeader {
    /// The raw header word.
    pub word: u32,
    pub version: MpegVersion,
    pub layer: MpegLayer,
    pub bitrate_index: u32,
    pub bitrate: u32,
    pub sample_rate_index: u32,
    pub sample_rate: u32,
    pub channel_mode: ChannelMode,
    pub mode_extension: u32,
    pub emphasis: Emphasis,
    pub is_copyrighted: bool,
    pub is_original: bool,
    pub has_padding: bool,
    pub has_crc: bool,
    /// The frame size in bytes, excluding the 4 byte header.
    pub frame_size: usize,
    /// The number of main data bytes in a layer 3 frame. Zero for other layers.
    pub main_data_size: usize,
    /// The number of sub-bands coded in the frame.
    pub subband_count: usize,
    /// The CRC transmitted with the frame, if protected.
    pub crc: Option<u16>,
    /// VBR information. Only present for the first frame of a stream.
    pub vbr: Option<VbrInfo>,
}

impl FrameHeader {
    /// Parse a frame header word.
    pub fn parse(header: u32) -> Result<FrameHeader> {
        // The MPEG audio header is structured as follows:
        //
        // 0b1111_1111 0b111v_vlly 0brrrr_hhpx 0bmmmm_coee
        // where:
        //     vv   = version, ll = layer      , y = crc
        //     rrrr = bitrate, hh = sample rate, p = padding , x  = private bit
        //     mmmm = mode   , c  = copyright  , o = original, ee = emphasis
        if header & 0xffe0_0000 != 0xffe0_0000 {
            return decode_error("mpa: missing frame sync");
        }

        let version = match (header >> 19) & 0x3 {
            0b00 => MpegVersion::Mpeg2p5,
            0b10 => MpegVersion::Mpeg2,
            0b11 => MpegVersion::Mpeg1,
            _ => return decode_error("mpa: invalid MPEG version"),
        };

        let layer = match (header >> 17) & 0x3 {
            0b01 => MpegLayer::Layer3,
            0b10 => MpegLayer::Layer2,
            0b11 => MpegLayer::Layer1,
            _ => return decode_error("mpa: invalid MPEG layer"),
        };

        let bitrate_index = (header >> 12) & 0xf;

        let bitrate = match bitrate_index {
            // "Free" bit-rate. Note, this is NOT variable bit-rate and is not a mandatory feature
            // of MP3 decoders.
            0b0000 => return unsupported_error("mpa: free bit-rate is not supported"),
            0b1111 => return decode_error("mpa: invalid bit-rate"),
            i => {
                let table = usize::from(version == MpegVersion::Mpeg1);
                BIT_RATES[table][layer.number() as usize - 1][i as usize]
            }
        };

        let sample_rate_index = (header >> 10) & 0x3;

        if sample_rate_index == 0x3 {
            return decode_error("mpa: invalid sample rate");
        }

        let sample_rate = SAMPLE_RATES[version_idx(version)][sample_rate_index as usize];

        let has_padding = header & 0x200 != 0;
        let has_crc = header & 0x1_0000 == 0;
        let mode_extension = (header >> 4) & 0x3;

        let subband_count = subband_count(version, layer, bitrate_index, sample_rate_index, header);

        let channel_mode = match (header >> 6) & 0x3 {
            // Stereo, for layers 1, 2, and 3.
            0b00 => ChannelMode::Stereo,
            // Dual mono, for layers 1, 2, and 3.
            0b10 => ChannelMode::DualMono,
            // Mono, for layers 1, 2, and 3.
            0b11 => ChannelMode::Mono,
            // Joint stereo mode for layer 3 supports a combination of Mid-Side and Intensity
            // Stereo depending on the mode extension bits.
            _ if layer == MpegLayer::Layer3 => ChannelMode::JointStereo(Mode::Layer3 {
                mid_side: mode_extension & 0x2 != 0x0,
                intensity: mode_extension & 0x1 != 0x0,
            }),
            // Joint stereo mode for layers 1 and 2 only supports Intensity Stereo. The mode
            // extension bits indicate from which sub-band intensity stereo coding is applied.
            _ => ChannelMode::JointStereo(Mode::Intensity {
                bound: (((mode_extension as usize) << 2) + 4).min(subband_count),
            }),
        };

        let emphasis = match header & 0x3 {
            0b01 => Emphasis::Fifty15,
            0b11 => Emphasis::CcitJ17,
            _ => Emphasis::None,
        };

        let mut frame = FrameHeader {
            word: header,
            version,
            layer,
            bitrate_index,
            bitrate,
            sample_rate_index,
            sample_rate,
            channel_mode,
            mode_extension,
            emphasis,
            is_copyrighted: header & 0x8 != 0x0,
            is_original: header & 0x4 != 0x0,
            has_padding,
            has_crc,
            frame_size: 0,
            main_data_size: 0,
            subband_count,
            crc: None,
            vbr: None,
        };

        frame.calculate_frame_size();

        Ok(frame)
    }

    /// Compute the frame size, and for layer 3 the main data size, from the bit-rate, sample rate,
    /// and padding.
    fn calculate_frame_size(&mut self) {
        let bitrate = self.bitrate as usize;
        let sample_rate = self.sample_rate as usize;
        let padding = usize::from(self.has_padding);

        let (frame_size, main_data_size) = match self.layer {
            // A layer 1 slot is 4 bytes.
            MpegLayer::Layer1 => (((12 * bitrate / sample_rate) + padding) << 2, 0),
            _ => {
                let mut size = 144 * bitrate / sample_rate;

                if self.version.is_lsf() {
                    size >>= 1;
                }

                size += padding;

                let main_data_size = if self.layer == MpegLayer::Layer3 {
                    size.saturating_sub(
                        self.side_info_len() + if self.has_crc { 2 } else { 0 } + MPEG_HEADER_LEN,
                    )
                }
                else {
                    0
                };

                (size, main_data_size)
            }
        };

        self.frame_size = frame_size - MPEG_HEADER_LEN;
        self.main_data_size = main_data_size;
    }

    /// Returns true if this a MPEG1 frame, false otherwise.
    #[inline(always)]
    pub fn is_mpeg1(&self) -> bool {
        self.version == MpegVersion::Mpeg1
    }

    /// Returns true if this a MPEG2.5 frame, false otherwise.
    #[inline(always)]
    pub fn is_mpeg2p5(&self) -> bool {
        self.version == MpegVersion::Mpeg2p5
    }

    /// Returns the number of granules in the frame.
    #[inline(always)]
    pub fn n_granules(&self) -> usize {
        match self.version {
            MpegVersion::Mpeg1 => 2,
            _ => 1,
        }
    }

    /// Returns the number of channels per granule.
    #[inline(always)]
    pub fn n_channels(&self) -> usize {
        self.channel_mode.count()
    }

    /// Returns the combined index, 0..9, of the version and sample rate.
    #[inline(always)]
    pub fn sample_rate_idx(&self) -> usize {
        3 * version_idx(self.version) + self.sample_rate_index as usize
    }

    /// Returns the first sub-band coded with intensity stereo in layers 1 and 2, or 0 if
    /// intensity stereo is not used.
    pub fn intensity_stereo_bound(&self) -> usize {
        match self.channel_mode {
            ChannelMode::JointStereo(Mode::Intensity { bound }) => bound,
            _ => 0,
        }
    }

    /// Returns true if Intensity Stereo encoding is used, false otherwise.
    #[inline(always)]
    pub fn is_intensity_stereo(&self) -> bool {
        match self.channel_mode {
            ChannelMode::JointStereo(Mode::Intensity { .. }) => true,
            ChannelMode::JointStereo(Mode::Layer3 { intensity, .. }) => intensity,
            _ => false,
        }
    }

    /// Get the layer 3 side information length.
    #[inline(always)]
    pub fn side_info_len(&self) -> usize {
        match (self.version, self.channel_mode) {
            (MpegVersion::Mpeg1, ChannelMode::Mono) => 17,
            (MpegVersion::Mpeg1, _) => 32,
            (_, ChannelMode::Mono) => 9,
            (_, _) => 17,
        }
    }

    /// Returns true if the stream is variable bit-rate.
    pub fn is_vbr(&self) -> bool {
        self.vbr.is_some()
    }

    /// Gets the bit-rate of this frame in bits per second.
    pub fn bitrate_instant(&self) -> u32 {
        self.bitrate
    }

    /// Gets the average bit-rate of the stream in bits per second. For variable bit-rate streams
    /// this is derived from the VBR header.
    pub fn bitrate_average(&self) -> u32 {
        match self.vbr.as_ref().and_then(|vbr| vbr.frames.zip(vbr.bytes)) {
            Some((frames, bytes)) if frames > 0 => {
                let ms = f64::from(self.ms_per_frame()) * f64::from(frames);
                ((f64::from(bytes) * 8.0 / ms) as u32) * 1000
            }
            _ => self.bitrate,
        }
    }

    /// Gets the duration of a frame in milliseconds.
    pub fn ms_per_frame(&self) -> f32 {
        if self.is_vbr() {
            let samples = VBR_TIME_PER_FRAME[self.layer.number() as usize];
            let mut tpf = samples / f64::from(self.sample_rate);

            if self.version.is_lsf() {
                tpf /= 2.0;
            }

            (tpf * 1000.0) as f32
        }
        else {
            let layer = self.layer.number() as usize - 1;
            let ms = MS_PER_FRAME[layer][self.sample_rate_index as usize];

            // The table is given for MPEG 1 & 2. MPEG 2.5 sample rates are half of MPEG 2.
            if self.is_mpeg2p5() {
                2.0 * ms
            }
            else {
                ms
            }
        }
    }

    /// Gets the maximum number of frames in a stream of `stream_size` bytes.
    pub fn max_number_of_frames(&self, stream_size: u64) -> u64 {
        match self.vbr.as_ref().and_then(|vbr| vbr.frames) {
            Some(frames) => u64::from(frames),
            None => {
                let size =
                    (self.frame_size + MPEG_HEADER_LEN - usize::from(self.has_padding)) as u64;
                if size == 0 {
                    0
                }
                else {
                    stream_size / size
                }
            }
        }
    }

    /// Gets the minimum number of frames in a stream of `stream_size` bytes.
    pub fn min_number_of_frames(&self, stream_size: u64) -> u64 {
        match self.vbr.as_ref().and_then(|vbr| vbr.frames) {
            Some(frames) => u64::from(frames),
            None => {
                let size =
                    (self.frame_size + MPEG_HEADER_LEN + 1 - usize::from(self.has_padding)) as u64;
                stream_size / size
            }
        }
    }

    /// Gets the duration in milliseconds of a stream of `stream_size` bytes.
    pub fn total_ms(&self, stream_size: u64) -> f32 {
        self.max_number_of_frames(stream_size) as f32 * self.ms_per_frame()
    }

    /// Gets a human readable bit-rate, such as "128 kb/s".
    pub fn bitrate_string(&self) -> String {
        if self.is_vbr() {
            format!("{} kb/s", self.bitrate_average() / 1000)
        }
        else {
            format!("{} kb/s", self.bitrate / 1000)
        }
    }

    /// Gets a human readable sample rate, such as "44 kHz".
    pub fn sample_rate_string(&self) -> String {
        if self.sample_rate >= 1000 {
            format!("{} kHz", self.sample_rate / 1000)
        }
        else {
            format!("{} Hz", self.sample_rate)
        }
    }
}

impl fmt::Display for FrameHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Layer {} frame {} {}{} checksums, {}, {}",
            self.layer,
            self.channel_mode,
            self.version,
            if self.has_crc { "" } else { " no" },
            self.sample_rate_string(),
            self.bitrate_string(),
        )
    }
}

#[inline(always)]
fn version_idx(version: MpegVersion) -> usize {
    match version {
        MpegVersion::Mpeg1 => 0,
        MpegVersion::Mpeg2 => 1,
        MpegVersion::Mpeg2p5 => 2,
    }
}

/// Gets the number of coded sub-bands.
///
/// Layer 1 and layer 3 frames code all 32 sub-bands. The sub-band limit of a layer 2 frame
/// depends on the allocation table in use, which is selected by the per-channel bit-rate and
/// sample rate for MPEG 1, and is fixed for MPEG 2 & 2.5.
fn subband_count(
    version: MpegVersion,
    layer: MpegLayer,
    bitrate_index: u32,
    sample_rate_index: u32,
    header: u32,
) -> usize {
    if layer != MpegLayer::Layer2 {
        return 32;
    }

    if version.is_lsf() {
        return 30;
    }

    let mut channel_bitrate = bitrate_index;

    // Convert the total bit-rate index into a per-channel bit-rate index.
    if header & 0xc0 != 0xc0 {
        channel_bitrate = if channel_bitrate == 4 { 1 } else { channel_bitrate.saturating_sub(4) };
    }

    if channel_bitrate == 1 || channel_bitrate == 2 {
        if sample_rate_index == 2 {
            12
        }
        else {
            8
        }
    }
    else if sample_rate_index == 1 || (channel_bitrate >= 3 && channel_bitrate <= 5) {
        27
    }
    else {
        30
    }
}
