// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A pure Rust MPEG-1, MPEG-2, and MPEG-2.5 audio layer I, II, and III decoder.
//!
//! Decoding is split between two types. A [`Bitstream`] owns the byte source. It locates and
//! validates frames, and exposes the bits of the current frame. A [`Decoder`] decodes the current
//! frame of a `Bitstream` into a [`SampleBuffer`](mpadec_core::audio::SampleBuffer) of 16-bit PCM.
//!
//! ```no_run
//! use std::fs::File;
//!
//! use mpadec_bundle_mpa::{Bitstream, Decoder, DecoderOptions};
//!
//! # fn main() -> mpadec_core::errors::Result<()> {
//! let mut stream = Bitstream::new(File::open("track.mp3")?);
//! let mut decoder = Decoder::new(DecoderOptions::default());
//!
//! loop {
//!     match decoder.decode_next_frame(&mut stream) {
//!         Ok(Some(pcm)) => println!("{} samples", pcm.samples().len()),
//!         Ok(None) => break,
//!         Err(err) if err.is_recoverable() => continue,
//!         Err(err) => return Err(err),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]
// The following lints are allowed in all mpadec crates. Please see the workspace Cargo.toml for
// their justification.
#![allow(clippy::comparison_chain)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::identity_op)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::needless_range_loop)]

// Shared modules.
mod bitstream;
mod common;
mod header;
mod info;
mod vbr;

// Decoder modules.
mod decoder;
mod equalizer;
mod synthesis;

// Shared layer 1 & 2 decoder support module.
#[cfg(any(feature = "mp1", feature = "mp2"))]
mod layer12;

// Layer-specific decoder support modules.
#[cfg(feature = "mp1")]
mod layer1;
#[cfg(feature = "mp2")]
mod layer2;
#[cfg(feature = "mp3")]
mod layer3;

#[cfg(test)]
mod testing;

pub use bitstream::{Bitstream, FrameBits};
pub use common::{ChannelMode, Emphasis, Mode, MpegLayer, MpegVersion};
pub use decoder::{Decoder, DecoderOptions};
pub use equalizer::Equalizer;
pub use header::{is_sync_mark, FrameHeader, SyncMode};
pub use info::StreamInfo;
pub use synthesis::SynthesisFilter;
pub use vbr::{VbrFlags, VbrInfo, VbrKind};

#[cfg(feature = "mp3")]
pub use layer3::reservoir::BitReservoir;
