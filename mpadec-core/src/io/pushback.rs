// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io;
use std::io::{BufReader, Read};

/// `PushbackReader` is a buffered byte reader that allows consumed bytes to be pushed back onto
/// the front of the stream.
///
/// Pushed back bytes are returned by subsequent reads before any new bytes from the inner reader.
pub struct PushbackReader<R: Read> {
    inner: BufReader<R>,
    /// Pushed back bytes in reverse order. The last element is the next byte to be read.
    pushback: Vec<u8>,
    /// The number of bytes consumed and not pushed back.
    pos: u64,
}

impl<R: Read> PushbackReader<R> {
    /// Instantiate a new `PushbackReader`.
    pub fn new(inner: R) -> Self {
        PushbackReader { inner: BufReader::new(inner), pushback: Vec::new(), pos: 0 }
    }

    /// Reads a single byte, or `None` at the end of the stream.
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];

        match self.read_buf(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }

    /// Reads bytes until the buffer is full or the stream ends. Returns the number of bytes read.
    ///
    /// If the inner reader fails, the bytes read by this call are pushed back before the error is
    /// returned.
    pub fn read_buf(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut count = 0;

        // Drain pushed back bytes first.
        while count < buf.len() {
            match self.pushback.pop() {
                Some(byte) => {
                    buf[count] = byte;
                    count += 1;
                }
                None => break,
            }
        }

        while count < buf.len() {
            match self.inner.read(&mut buf[count..]) {
                Ok(0) => break,
                Ok(n) => count += n,
                Err(ref err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    // Nothing is consumed by a failed read.
                    self.pushback.extend(buf[..count].iter().rev());
                    return Err(err);
                }
            }
        }

        self.pos += count as u64;

        Ok(count)
    }

    /// Push `buf` back onto the stream such that `buf[0]` is the next byte read.
    pub fn unread(&mut self, buf: &[u8]) {
        self.pushback.extend(buf.iter().rev());
        self.pos = self.pos.saturating_sub(buf.len() as u64);
    }

    /// Gets the number of bytes consumed from the stream.
    pub fn pos(&self) -> u64 {
        self.pos
    }
}

impl<R: Read> Read for PushbackReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read_buf(buf)
    }
}
