// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use mpadec_core::errors::Result;

use crate::bitstream::FrameBits;
use crate::header::FrameHeader;
use crate::synthesis::FilterBank;

/// The MPEG audio version.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MpegVersion {
    /// Version 2.5, low sampling frequencies.
    Mpeg2p5,
    /// Version 2, low sampling frequencies.
    Mpeg2,
    /// Version 1
    Mpeg1,
}

impl MpegVersion {
    /// Returns true for the low sampling frequency (LSF) extensions, MPEG 2 and MPEG 2.5.
    #[inline(always)]
    pub fn is_lsf(&self) -> bool {
        *self != MpegVersion::Mpeg1
    }
}

impl fmt::Display for MpegVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MpegVersion::Mpeg1 => "MPEG-1",
            MpegVersion::Mpeg2 => "MPEG-2 LSF",
            MpegVersion::Mpeg2p5 => "MPEG-2.5 LSF",
        })
    }
}

/// The MPEG audio layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MpegLayer {
    /// Layer 1
    Layer1,
    /// Layer 2
    Layer2,
    /// Layer 3
    Layer3,
}

impl MpegLayer {
    /// Gets the layer number, 1 through 3.
    #[inline(always)]
    pub fn number(&self) -> u32 {
        match self {
            MpegLayer::Layer1 => 1,
            MpegLayer::Layer2 => 2,
            MpegLayer::Layer3 => 3,
        }
    }
}

impl fmt::Display for MpegLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MpegLayer::Layer1 => "I",
            MpegLayer::Layer2 => "II",
            MpegLayer::Layer3 => "III",
        })
    }
}

/// For Joint Stereo channel mode, the mode extension describes the features and parameters of the
/// stereo encoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Joint Stereo in layer 3 may use both Mid-Side and Intensity encoding.
    Layer3 { mid_side: bool, intensity: bool },
    /// Joint Stereo in layers 1 and 2 may only use Intensity encoding on a set of bands. The range
    /// of bands using intensity encoding is bound..32.
    Intensity { bound: usize },
}

/// The channel mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChannelMode {
    /// Single mono audio channel.
    Mono,
    /// Dual mono audio channels.
    DualMono,
    /// Stereo channels.
    Stereo,
    /// Joint Stereo encoded channels (decodes to Stereo).
    JointStereo(Mode),
}

impl ChannelMode {
    /// Gets the number of channels.
    #[inline(always)]
    pub fn count(&self) -> usize {
        match self {
            ChannelMode::Mono => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChannelMode::Stereo => "Stereo",
            ChannelMode::JointStereo(_) => "Joint stereo",
            ChannelMode::DualMono => "Dual channel",
            ChannelMode::Mono => "Single channel",
        })
    }
}

/// The emphasis applied during encoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Emphasis {
    /// No emphasis
    None,
    /// 50/15us
    Fifty15,
    /// CCIT J.17
    CcitJ17,
}

/// A layer-specific decode algorithm.
///
/// Implementations read the frame's side information and samples from `frame`, and feed
/// dequantized sub-band samples to the synthesis filters of `bank`, which in turn fill the sample
/// sink.
pub trait Layer {
    fn decode(
        &mut self,
        frame: &mut FrameBits,
        header: &FrameHeader,
        bank: &mut FilterBank<'_>,
    ) -> Result<()>;
}
