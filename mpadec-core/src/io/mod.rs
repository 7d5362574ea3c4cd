// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `io` module implements bit-level reading and byte-level push-back over the raw stream.

mod bit;
mod pushback;
pub mod vlc;

pub use bit::{BitReaderLtr, FiniteBitStream, ReadBitsLtr};
pub use pushback::PushbackReader;
