// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Test helpers for building frames bit by bit.

use mpadec_core::audio::{OutputChannels, SampleBuffer};

use crate::equalizer::Equalizer;
use crate::synthesis::{FilterBank, SynthesisFilter, DEFAULT_SCALE};

/// Writes bits most-significant bit first.
#[derive(Default)]
pub struct BitWriter {
    buf: Vec<u8>,
    len: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn write(&mut self, value: u32, width: u32) {
        for i in (0..width).rev() {
            if self.len % 8 == 0 {
                self.buf.push(0);
            }
            if value.checked_shr(i).unwrap_or(0) & 1 != 0 {
                let last = self.buf.len() - 1;
                self.buf[last] |= 0x80 >> (self.len % 8);
            }
            self.len += 1;
        }
    }

    /// Gets the number of bits written.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the written bytes, zero padded to `size` bytes.
    pub fn into_bytes(mut self, size: usize) -> Vec<u8> {
        assert!(self.buf.len() <= size, "{} bytes written to {} byte frame", self.buf.len(), size);
        self.buf.resize(size, 0);
        self.buf
    }
}

/// Synthesis filters and an output buffer for a stream of `channels` channels.
pub struct Output {
    pub filters: Vec<SynthesisFilter>,
    pub buffer: SampleBuffer,
}

impl Output {
    pub fn new(channels: usize) -> Self {
        let eq = Equalizer::new().band_factors();
        let filters =
            (0..channels).map(|ch| SynthesisFilter::new(ch, DEFAULT_SCALE, &eq)).collect();
        Output { filters, buffer: SampleBuffer::new(44_100, channels) }
    }

    pub fn bank(&mut self) -> FilterBank<'_> {
        FilterBank::new(&mut self.filters, &mut self.buffer, OutputChannels::Both)
    }
}
