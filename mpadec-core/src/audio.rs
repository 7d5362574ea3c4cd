// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `audio` module provides the PCM sample sinks decoded audio is written into.

use std::fmt;

/// The maximum number of channels of a decoded MPEG audio stream.
pub const MAX_CHANNELS: usize = 2;

/// The capacity in samples of a [`SampleBuffer`]. This holds one frame of up-to 1152 samples for
/// each of two channels.
pub const SAMPLE_BUFFER_SIZE: usize = 2 * 1152;

/// The largest magnitude a PCM sample is clipped to.
const SAMPLE_CLIP: f32 = 32767.0;

/// `OutputChannels` selects which decoded channels are written to the sample sink.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputChannels {
    /// Both channels of a two channel stream, or the single channel of a mono stream.
    #[default]
    Both,
    /// The left channel only.
    Left,
    /// The right channel only.
    Right,
    /// The average of the left and right channels, as one channel.
    Downmix,
}

impl OutputChannels {
    /// Gets the number of channels output for a stream of `stream_channels` channels.
    pub fn count(&self, stream_channels: usize) -> usize {
        match self {
            OutputChannels::Both => stream_channels,
            _ => 1,
        }
    }
}

impl fmt::Display for OutputChannels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputChannels::Both => "both",
            OutputChannels::Left => "left",
            OutputChannels::Right => "right",
            OutputChannels::Downmix => "downmix",
        };
        f.write_str(name)
    }
}

/// A `SampleSink` receives 16-bit PCM samples, one channel at a time.
pub trait SampleSink {
    /// Append one sample to a channel.
    fn append(&mut self, channel: usize, value: i16);

    /// Append a block of 32 synthesized samples to a channel. Samples are clipped to the 16-bit
    /// range.
    fn append_samples(&mut self, channel: usize, samples: &[f32; 32]) {
        for &sample in samples {
            self.append(channel, clip(sample));
        }
    }

    /// Discard all samples in the sink.
    fn clear(&mut self);
}

/// Converts a floating point sample in the range of a 16-bit integer to the nearest 16-bit integer
/// towards zero, clipping it to +/-32767.
#[inline(always)]
pub fn clip(sample: f32) -> i16 {
    sample.clamp(-SAMPLE_CLIP, SAMPLE_CLIP) as i16
}

/// `SampleBuffer` is a [`SampleSink`] that stores up-to one frame of interleaved 16-bit samples.
#[derive(Debug)]
pub struct SampleBuffer {
    buf: Box<[i16]>,
    written: [usize; MAX_CHANNELS],
    channels: usize,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Instantiate a new `SampleBuffer` for the given sample rate and number of channels.
    pub fn new(sample_rate: u32, channels: usize) -> Self {
        assert!(channels > 0 && channels <= MAX_CHANNELS);

        SampleBuffer {
            buf: vec![0; SAMPLE_BUFFER_SIZE].into_boxed_slice(),
            written: [0; MAX_CHANNELS],
            channels,
            sample_rate,
        }
    }

    /// Gets the number of interleaved channels.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Gets the sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Gets the number of complete sample frames (one sample per channel) in the buffer.
    pub fn frames(&self) -> usize {
        self.written[..self.channels].iter().copied().min().unwrap_or(0)
    }

    /// Gets the interleaved samples of all complete sample frames.
    pub fn samples(&self) -> &[i16] {
        &self.buf[..self.frames() * self.channels]
    }

    /// Returns true if the buffer contains no complete sample frames.
    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }

    /// Returns true if no more samples can be appended to any channel.
    pub fn is_full(&self) -> bool {
        self.frames() * self.channels >= SAMPLE_BUFFER_SIZE
    }

    /// Converts the samples into 16-bit PCM bytes of the requested endianess.
    pub fn to_pcm_bytes(&self, little_endian: bool) -> Vec<u8> {
        let samples = self.samples();

        let mut bytes = Vec::with_capacity(2 * samples.len());

        for &sample in samples {
            if little_endian {
                bytes.extend_from_slice(&sample.to_le_bytes());
            }
            else {
                bytes.extend_from_slice(&sample.to_be_bytes());
            }
        }

        bytes
    }
}

impl SampleSink for SampleBuffer {
    fn append(&mut self, channel: usize, value: i16) {
        if channel >= self.channels {
            return;
        }

        let pos = self.written[channel] * self.channels + channel;

        // Samples past the capacity of the buffer are dropped.
        if pos < SAMPLE_BUFFER_SIZE {
            self.buf[pos] = value;
            self.written[channel] += 1;
        }
    }

    fn clear(&mut self) {
        self.buf.iter_mut().for_each(|s| *s = 0);
        self.written = [0; MAX_CHANNELS];
    }
}
