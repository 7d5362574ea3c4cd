// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared infrastructure for the mpadec MPEG audio decoder: the error type, checksums, bit-level
//! readers, and PCM sample sinks. Nothing in this crate knows about MPEG audio framing.

pub mod audio;
pub mod checksum;
pub mod errors;
pub mod io;
pub mod util;
