// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use crate::common::{ChannelMode, MpegLayer, MpegVersion};
use crate::header::FrameHeader;

/// A summary of a stream derived from its first frame header, the VBR header of that frame if
/// present, and the length of the stream if known.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamInfo {
    pub version: MpegVersion,
    pub layer: MpegLayer,
    pub channel_mode: ChannelMode,
    pub sample_rate: u32,
    /// The average bit-rate for VBR streams, otherwise the bit-rate of the first frame.
    pub bitrate: u32,
    pub is_vbr: bool,
    pub ms_per_frame: f32,
    /// The maximum and minimum number of frames, if the stream length or frame count is known.
    pub max_frames: Option<u64>,
    pub min_frames: Option<u64>,
    /// The duration in milliseconds, if the stream length or frame count is known.
    pub duration_ms: Option<f32>,
    bitrate_string: String,
    sample_rate_string: String,
}

impl StreamInfo {
    /// Summarize the stream starting with `header`. The size of the stream in bytes, `stream_size`,
    /// should exclude any leading tags.
    pub fn new(header: &FrameHeader, stream_size: Option<u64>) -> Self {
        // A frame count from the VBR header does not need the stream size.
        let size = match header.vbr.as_ref().and_then(|vbr| vbr.frames) {
            Some(_) => Some(stream_size.unwrap_or(0)),
            None => stream_size,
        };

        StreamInfo {
            version: header.version,
            layer: header.layer,
            channel_mode: header.channel_mode,
            sample_rate: header.sample_rate,
            bitrate: header.bitrate_average(),
            is_vbr: header.is_vbr(),
            ms_per_frame: header.ms_per_frame(),
            max_frames: size.map(|size| header.max_number_of_frames(size)),
            min_frames: size.map(|size| header.min_number_of_frames(size)),
            duration_ms: size.map(|size| header.total_ms(size)),
            bitrate_string: header.bitrate_string(),
            sample_rate_string: header.sample_rate_string(),
        }
    }

    /// Gets the version, such as "MPEG-1".
    pub fn version_string(&self) -> String {
        self.version.to_string()
    }

    /// Gets the layer, such as "III".
    pub fn layer_string(&self) -> String {
        self.layer.to_string()
    }

    /// Gets the channel mode, such as "Joint stereo".
    pub fn mode_string(&self) -> String {
        self.channel_mode.to_string()
    }

    /// Gets the bit-rate, such as "128 kb/s".
    pub fn bitrate_string(&self) -> &str {
        &self.bitrate_string
    }

    /// Gets the sample rate, such as "44 kHz".
    pub fn sample_rate_string(&self) -> &str {
        &self.sample_rate_string
    }

    /// Gets the number of output channels at full decode.
    pub fn channels(&self) -> usize {
        self.channel_mode.count()
    }
}

impl fmt::Display for StreamInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Layer {}, {}, {}, {}{}",
            self.version,
            self.layer,
            self.channel_mode,
            self.sample_rate_string,
            self.bitrate_string,
            if self.is_vbr { " VBR" } else { "" },
        )?;

        if let Some(ms) = self.duration_ms {
            let secs = (ms / 1000.0) as u64;
            write!(f, ", {}:{:02}", secs / 60, secs % 60)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vbr::{VbrFlags, VbrInfo, VbrKind};

    /// Layer 3, MPEG1, 128 kbit/s, 44.1 kHz, joint stereo. 417 byte frames.
    const JOINT_STEREO: u32 = 0xfffb_9064;

    #[test]
    fn verify_cbr_info() {
        let header = FrameHeader::parse(JOINT_STEREO).unwrap();
        let info = StreamInfo::new(&header, Some(417 * 10));

        assert_eq!(info.version_string(), "MPEG-1");
        assert_eq!(info.layer_string(), "III");
        assert_eq!(info.mode_string(), "Joint stereo");
        assert_eq!(info.bitrate_string(), "128 kb/s");
        assert_eq!(info.sample_rate_string(), "44 kHz");
        assert_eq!(info.channels(), 2);
        assert!(!info.is_vbr);

        assert_eq!(info.max_frames, Some(10));
        assert_eq!(info.min_frames, Some(9));
        assert!((info.ms_per_frame - 26.12245).abs() < 1e-4);
        assert!((info.duration_ms.unwrap() - 261.2245).abs() < 1e-2);

        assert_eq!(info.to_string(), "MPEG-1 Layer III, Joint stereo, 44 kHz, 128 kb/s, 0:00");
    }

    #[test]
    fn verify_unknown_length() {
        let header = FrameHeader::parse(JOINT_STEREO).unwrap();
        let info = StreamInfo::new(&header, None);

        assert_eq!(info.max_frames, None);
        assert_eq!(info.duration_ms, None);
        assert_eq!(info.to_string(), "MPEG-1 Layer III, Joint stereo, 44 kHz, 128 kb/s");
    }

    #[test]
    fn verify_vbr_info() {
        let mut header = FrameHeader::parse(JOINT_STEREO).unwrap();
        header.vbr = Some(VbrInfo {
            kind: VbrKind::Xing,
            flags: VbrFlags::FRAMES | VbrFlags::BYTES,
            frames: Some(2297),
            bytes: Some(2297 * 300),
            toc: None,
            scale: None,
        });

        let info = StreamInfo::new(&header, None);

        assert!(info.is_vbr);
        assert_eq!(info.max_frames, Some(2297));
        assert_eq!(info.min_frames, Some(2297));

        // 2297 frames of 1152 samples at 44.1 kHz last 60 seconds.
        let duration = info.duration_ms.unwrap();
        assert!((duration - 60_003.0).abs() < 5.0, "{}", duration);
    }
}
