// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io::Read;

use mpadec_core::audio::{OutputChannels, SampleBuffer, SampleSink};
use mpadec_core::errors::{unsupported_error, Error, Result};

use log::{debug, warn};

use crate::bitstream::{Bitstream, FrameBits};
use crate::common::{Layer, MpegLayer};
use crate::equalizer::Equalizer;
use crate::header::FrameHeader;
use crate::synthesis::{FilterBank, SynthesisFilter, DEFAULT_SCALE};

#[cfg(feature = "mp1")]
use crate::layer1::Layer1;
#[cfg(feature = "mp2")]
use crate::layer2::Layer2;
#[cfg(feature = "mp3")]
use crate::layer3::Layer3;

/// `DecoderOptions` is a common set of options that all decoders use.
#[derive(Clone, Debug)]
pub struct DecoderOptions {
    /// The channels to output. Default: both.
    pub output_channels: OutputChannels,
    /// The equalizer applied to the sub-band samples. Default: flat.
    pub equalizer: Equalizer,
    /// Verify the CRC of protected frames and drop the frames that fail. Default: `true`.
    pub verify_crc: bool,
}

impl DecoderOptions {
    pub fn with_output_channels(mut self, output_channels: OutputChannels) -> Self {
        self.output_channels = output_channels;
        self
    }

    pub fn with_equalizer(mut self, equalizer: Equalizer) -> Self {
        self.equalizer = equalizer;
        self
    }

    pub fn with_verify_crc(mut self, verify_crc: bool) -> Self {
        self.verify_crc = verify_crc;
        self
    }
}

impl Default for DecoderOptions {
    fn default() -> Self {
        DecoderOptions {
            output_channels: Default::default(),
            equalizer: Default::default(),
            verify_crc: true,
        }
    }
}

/// The layer-specific decoder state.
enum State {
    #[cfg(feature = "mp1")]
    Layer1(Layer1),
    #[cfg(feature = "mp2")]
    Layer2(Layer2),
    #[cfg(feature = "mp3")]
    Layer3(Box<Layer3>),
}

impl State {
    // Layers with their feature disabled fall through to the last arm.
    #[allow(unreachable_patterns)]
    fn new(layer: MpegLayer, verify_crc: bool) -> Result<State> {
        match layer {
            #[cfg(feature = "mp1")]
            MpegLayer::Layer1 => Ok(State::Layer1(Layer1::new(verify_crc))),
            #[cfg(feature = "mp2")]
            MpegLayer::Layer2 => Ok(State::Layer2(Layer2::new(verify_crc))),
            #[cfg(feature = "mp3")]
            MpegLayer::Layer3 => Ok(State::Layer3(Box::new(Layer3::new(verify_crc)))),
            _ => unsupported_error("mpa: layer support is disabled"),
        }
    }

    #[allow(unreachable_patterns)]
    fn decode(
        &mut self,
        frame: &mut FrameBits,
        header: &FrameHeader,
        bank: &mut FilterBank<'_>,
    ) -> Result<()> {
        match self {
            #[cfg(feature = "mp1")]
            State::Layer1(layer) => layer.decode(frame, header, bank),
            #[cfg(feature = "mp2")]
            State::Layer2(layer) => layer.decode(frame, header, bank),
            #[cfg(feature = "mp3")]
            State::Layer3(layer) => layer.decode(frame, header, bank),
            _ => unsupported_error("mpa: layer support is disabled"),
        }
    }

    #[allow(unreachable_patterns)]
    fn reset(&mut self) {
        match self {
            #[cfg(feature = "mp3")]
            State::Layer3(layer) => layer.reset(),
            _ => (),
        }
    }
}

/// The decoder state of a stream with a fixed layer, sample rate, and channel count.
struct StreamState {
    layer: MpegLayer,
    sample_rate: u32,
    channels: usize,
    state: State,
    filters: Vec<SynthesisFilter>,
}

impl StreamState {
    fn new(header: &FrameHeader, options: &DecoderOptions) -> Result<StreamState> {
        let channels = header.n_channels();
        let eq = options.equalizer.band_factors();

        let filters = (0..options.output_channels.count(channels))
            .map(|ch| SynthesisFilter::new(ch, DEFAULT_SCALE, &eq))
            .collect();

        Ok(StreamState {
            layer: header.layer,
            sample_rate: header.sample_rate,
            channels,
            state: State::new(header.layer, options.verify_crc)?,
            filters,
        })
    }

    fn accepts(&self, header: &FrameHeader) -> bool {
        self.layer == header.layer
            && self.sample_rate == header.sample_rate
            && self.channels == header.n_channels()
    }
}

/// MPEG 1, 2, and 2.5 layer 1, 2, and 3 decoder.
///
/// The decoder is initialized by the first frame it decodes. It is re-initialized, dropping all
/// synthesis and bit reservoir history, whenever the layer, sample rate, or number of channels of
/// the stream changes.
pub struct Decoder {
    options: DecoderOptions,
    stream: Option<StreamState>,
    buf: SampleBuffer,
    frames_decoded: u64,
    error_count: u64,
}

impl Decoder {
    pub fn new(options: DecoderOptions) -> Self {
        Decoder {
            options,
            stream: None,
            buf: SampleBuffer::new(0, 1),
            frames_decoded: 0,
            error_count: 0,
        }
    }

    fn decode_inner(&mut self, header: &FrameHeader, frame: &mut FrameBits) -> Result<()> {
        let stream = match self.stream.take() {
            Some(stream) if stream.accepts(header) => stream,
            _ => {
                debug!(
                    "mpa: initializing decoder for layer {} {} at {} Hz to {} output",
                    header.layer,
                    header.channel_mode,
                    header.sample_rate,
                    self.options.output_channels
                );

                let stream = StreamState::new(header, &self.options)?;
                self.buf = SampleBuffer::new(stream.sample_rate, stream.filters.len());
                stream
            }
        };

        let stream = self.stream.insert(stream);

        self.buf.clear();

        let mut bank =
            FilterBank::new(&mut stream.filters, &mut self.buf, self.options.output_channels);

        stream.state.decode(frame, header, &mut bank)
    }

    /// Decode the frame described by `header` from the bits of `frame`.
    ///
    /// On error the returned sample buffer is cleared, and the decoder remains usable for the
    /// next frame.
    pub fn decode_frame(
        &mut self,
        header: &FrameHeader,
        frame: &mut FrameBits,
    ) -> Result<&SampleBuffer> {
        match self.decode_inner(header, frame) {
            Ok(()) => {
                self.frames_decoded += 1;
                Ok(&self.buf)
            }
            Err(err) => {
                self.error_count += 1;
                self.buf.clear();

                // Checksum mismatches are logged when they are detected.
                if !matches!(err, Error::ChecksumMismatch { .. }) {
                    warn!("mpa: dropped frame, {}", err);
                }

                Err(err)
            }
        }
    }

    /// Read the next frame from `stream` and decode it. Returns `None` at the end of the stream.
    pub fn decode_next_frame<R: Read>(
        &mut self,
        stream: &mut Bitstream<R>,
    ) -> Result<Option<&SampleBuffer>> {
        let header = match stream.read_frame() {
            Ok(Some(header)) => header,
            Ok(None) => return Ok(None),
            Err(err) => {
                self.error_count += 1;
                return Err(err);
            }
        };

        let result = self.decode_frame(&header, stream.frame_mut());

        stream.close_frame();

        result.map(Some)
    }

    /// Gets the samples of the last decoded frame.
    pub fn last_decoded(&self) -> &SampleBuffer {
        &self.buf
    }

    /// Gets the number of frames decoded without error.
    pub fn frames_decoded(&self) -> u64 {
        self.frames_decoded
    }

    /// Gets the number of frames that failed to read or decode.
    pub fn error_count(&self) -> u64 {
        self.error_count
    }

    pub fn reset_statistics(&mut self) {
        self.frames_decoded = 0;
        self.error_count = 0;
    }

    /// Returns true once a frame of a supported layer initialized the decoder.
    pub fn is_initialized(&self) -> bool {
        self.stream.is_some()
    }

    /// Gets the output sample rate, if initialized.
    pub fn output_frequency(&self) -> Option<u32> {
        self.stream.as_ref().map(|stream| stream.sample_rate)
    }

    /// Gets the number of output channels, if initialized.
    pub fn output_channels(&self) -> Option<usize> {
        self.stream.as_ref().map(|stream| stream.filters.len())
    }

    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Replace the equalizer. Takes effect from the next synthesized time slot.
    pub fn set_equalizer(&mut self, equalizer: Equalizer) {
        let eq = equalizer.band_factors();

        if let Some(stream) = self.stream.as_mut() {
            for filter in stream.filters.iter_mut() {
                filter.set_eq(&eq);
            }
        }

        self.options.equalizer = equalizer;
    }

    /// Discard all synthesis and bit reservoir history, as required after a discontinuity in the
    /// stream such as a seek.
    pub fn reset(&mut self) {
        if let Some(stream) = self.stream.as_mut() {
            stream.state.reset();

            for filter in stream.filters.iter_mut() {
                filter.reset();
            }
        }

        self.buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::testing::BitWriter;

    /// Layer 3, MPEG1, 128 kbit/s, 44.1 kHz, mono.
    const L3_MONO: u32 = 0xfffb_90c4;
    /// As above, 48 kHz.
    const L3_MONO_48K: u32 = 0xfffb_94c4;
    /// Layer 3, MPEG1, 128 kbit/s, 44.1 kHz, joint stereo with mid-side stereo.
    const L3_JOINT_MS: u32 = 0xfffb_9064;
    /// Layer 1, MPEG1, 32 kbit/s, 44.1 kHz, mono.
    const L1_MONO: u32 = 0xffff_10c0;

    fn silent_frame(word: u32) -> (FrameHeader, FrameBits) {
        let header = FrameHeader::parse(word).unwrap();
        let frame = FrameBits::from_bytes(&vec![0; header.frame_size]);
        (header, frame)
    }

    #[test]
    fn verify_decode_initializes() {
        let mut decoder = Decoder::new(Default::default());
        assert!(!decoder.is_initialized());
        assert_eq!(decoder.output_frequency(), None);

        let (header, mut frame) = silent_frame(L3_MONO);
        let pcm = decoder.decode_frame(&header, &mut frame).unwrap();

        assert_eq!(pcm.frames(), 1152);
        assert_eq!(pcm.channels(), 1);
        assert_eq!(pcm.sample_rate(), 44_100);
        assert!(pcm.samples().iter().all(|&s| s == 0));

        assert!(decoder.is_initialized());
        assert_eq!(decoder.output_frequency(), Some(44_100));
        assert_eq!(decoder.output_channels(), Some(1));
        assert_eq!(decoder.frames_decoded(), 1);
        assert_eq!(decoder.error_count(), 0);
    }

    #[test]
    fn verify_output_channel_selection() {
        let (header, _) = silent_frame(L3_JOINT_MS);

        for (output, channels) in [
            (OutputChannels::Both, 2),
            (OutputChannels::Left, 1),
            (OutputChannels::Right, 1),
            (OutputChannels::Downmix, 1),
        ] {
            let options = DecoderOptions::default().with_output_channels(output);
            let mut decoder = Decoder::new(options);

            let mut frame = FrameBits::from_bytes(&vec![0; header.frame_size]);
            let pcm = decoder.decode_frame(&header, &mut frame).unwrap();

            assert_eq!(pcm.channels(), channels);
            assert_eq!(pcm.frames(), 1152);
            assert_eq!(pcm.samples().len(), 1152 * channels);
        }
    }

    #[test]
    fn verify_reinitialize_on_change() {
        let mut decoder = Decoder::new(Default::default());

        let (header, mut frame) = silent_frame(L3_MONO);
        decoder.decode_frame(&header, &mut frame).unwrap();

        let (header, mut frame) = silent_frame(L3_MONO_48K);
        let pcm = decoder.decode_frame(&header, &mut frame).unwrap();
        assert_eq!(pcm.sample_rate(), 48_000);

        let (header, mut frame) = silent_frame(L1_MONO);
        let pcm = decoder.decode_frame(&header, &mut frame).unwrap();
        assert_eq!(pcm.frames(), 384);

        assert_eq!(decoder.output_frequency(), Some(44_100));
        assert_eq!(decoder.frames_decoded(), 3);
    }

    #[test]
    fn verify_failed_frame_is_counted() {
        let mut decoder = Decoder::new(Default::default());

        let header = FrameHeader::parse(L1_MONO).unwrap();

        // Sub-band 1 uses the reserved allocation.
        let mut bw = BitWriter::new();
        bw.write(0, 4);
        bw.write(15, 4);
        let mut frame = FrameBits::from_bytes(&bw.into_bytes(header.frame_size));

        let err = decoder.decode_frame(&header, &mut frame).unwrap_err();
        assert!(matches!(err, Error::IllegalSubbandAllocation { subband: 1, allocation: 15 }));
        assert!(err.is_recoverable());
        assert_eq!(decoder.error_count(), 1);
        assert!(decoder.last_decoded().is_empty());

        let (header, mut frame) = silent_frame(L1_MONO);
        assert_eq!(decoder.decode_frame(&header, &mut frame).unwrap().frames(), 384);
        assert_eq!(decoder.frames_decoded(), 1);

        decoder.reset_statistics();
        assert_eq!(decoder.frames_decoded(), 0);
        assert_eq!(decoder.error_count(), 0);
    }

    #[test]
    fn verify_decode_next_frame() {
        let header = FrameHeader::parse(L3_MONO).unwrap();

        let mut data = Vec::new();
        for _ in 0..3 {
            data.extend_from_slice(&L3_MONO.to_be_bytes());
            data.extend(std::iter::repeat(0).take(header.frame_size));
        }

        let mut stream = Bitstream::new(Cursor::new(data));
        let mut decoder = Decoder::new(Default::default());

        let mut frames = 0;
        while let Some(pcm) = decoder.decode_next_frame(&mut stream).unwrap() {
            assert_eq!(pcm.frames(), 1152);
            frames += 1;
        }

        assert_eq!(frames, 3);
        assert_eq!(decoder.frames_decoded(), 3);
        assert!(stream.is_eof());
    }

    #[test]
    fn verify_set_equalizer() {
        let mut decoder = Decoder::new(Default::default());

        let (header, mut frame) = silent_frame(L1_MONO);
        decoder.decode_frame(&header, &mut frame).unwrap();

        let eq = Equalizer::from_settings(&[-1.0; 32]);
        decoder.set_equalizer(eq.clone());
        assert_eq!(decoder.options().equalizer, eq);

        decoder.reset();
        assert!(decoder.is_initialized());
        assert!(decoder.last_decoded().is_empty());
    }

    #[test]
    fn verify_options() {
        let options = DecoderOptions::default();
        assert!(options.verify_crc);
        assert_eq!(options.output_channels, OutputChannels::Both);

        let options = options.with_verify_crc(false).with_output_channels(OutputChannels::Left);
        assert!(!options.verify_crc);
        assert_eq!(options.output_channels, OutputChannels::Left);
    }
}
