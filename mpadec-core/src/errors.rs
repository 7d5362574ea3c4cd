// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `errors` module defines the common error type.

use std::error;
use std::fmt;
use std::io;
use std::result;

/// `ErrorKind` describes how far the damage of an [`Error`] reaches.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The stream lost synchronization. Scanning for the next sync word recovers from it.
    Resync,
    /// The current frame cannot be decoded, but the next frame may be.
    FrameFatal,
    /// No further frames can be produced from the stream.
    StreamFatal,
}

/// `Error` provides an enumeration of all possible errors reported by mpadec.
#[derive(Debug)]
pub enum Error {
    /// An IO error occured while reading the stream.
    IoError(io::Error),
    /// The stream contained malformed data and could not be decoded.
    DecodeError(&'static str),
    /// A frame body was shorter than its header announced.
    InvalidFrame,
    /// A sub-band allocation used a reserved value.
    IllegalSubbandAllocation { subband: usize, allocation: u32 },
    /// The CRC-16 transmitted with a frame did not match the one computed over the protected bits.
    ChecksumMismatch { transmitted: u16, computed: u16 },
    /// An unsupported stream feature was encounted.
    Unsupported(&'static str),
}

impl Error {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Error::IoError(_) => ErrorKind::StreamFatal,
            Error::InvalidFrame => ErrorKind::Resync,
            Error::DecodeError(_) => ErrorKind::FrameFatal,
            Error::IllegalSubbandAllocation { .. } => ErrorKind::FrameFatal,
            Error::ChecksumMismatch { .. } => ErrorKind::FrameFatal,
            Error::Unsupported(_) => ErrorKind::FrameFatal,
        }
    }

    /// Returns true if decoding may continue with the next frame after this error.
    pub fn is_recoverable(&self) -> bool {
        self.kind() != ErrorKind::StreamFatal
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::IoError(ref err) => err.fmt(f),
            Error::DecodeError(msg) => {
                write!(f, "malformed stream: {}", msg)
            }
            Error::InvalidFrame => {
                write!(f, "malformed stream: frame shorter than its header")
            }
            Error::IllegalSubbandAllocation { subband, allocation } => {
                write!(
                    f,
                    "malformed stream: illegal allocation {} in sub-band {}",
                    allocation, subband
                )
            }
            Error::ChecksumMismatch { transmitted, computed } => {
                write!(
                    f,
                    "checksum mismatch: transmitted {:#06x}, computed {:#06x}",
                    transmitted, computed
                )
            }
            Error::Unsupported(feature) => {
                write!(f, "unsupported feature: {}", feature)
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::IoError(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::IoError(err)
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Convenience function to create a decode error.
pub fn decode_error<T>(desc: &'static str) -> Result<T> {
    Err(Error::DecodeError(desc))
}

/// Convenience function to create an unsupport feature error.
pub fn unsupported_error<T>(feature: &'static str) -> Result<T> {
    Err(Error::Unsupported(feature))
}

/// Convenience function to create an invalid frame error.
pub fn invalid_frame_error<T>() -> Result<T> {
    Err(Error::InvalidFrame)
}

/// Convenience function to create an illegal allocation error.
pub fn allocation_error<T>(subband: usize, allocation: u32) -> Result<T> {
    Err(Error::IllegalSubbandAllocation { subband, allocation })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_error_kinds() {
        let io = Error::from(io::Error::new(io::ErrorKind::Other, "gone"));
        assert_eq!(io.kind(), ErrorKind::StreamFatal);
        assert!(!io.is_recoverable());

        assert_eq!(Error::InvalidFrame.kind(), ErrorKind::Resync);

        let crc = Error::ChecksumMismatch { transmitted: 0x1234, computed: 0x4321 };
        assert_eq!(crc.kind(), ErrorKind::FrameFatal);
        assert!(crc.is_recoverable());

        let alloc = Error::IllegalSubbandAllocation { subband: 3, allocation: 15 };
        assert_eq!(alloc.kind(), ErrorKind::FrameFatal);
        assert_eq!(alloc.to_string(), "malformed stream: illegal allocation 15 in sub-band 3");
    }
}
