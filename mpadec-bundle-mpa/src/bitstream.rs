// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io::Read;

use mpadec_core::checksum::Crc16;
use mpadec_core::errors::{invalid_frame_error, Error, Result};
use mpadec_core::io::{FiniteBitStream, PushbackReader, ReadBitsLtr};
use mpadec_core::util::bits::mask_lower_u32;

use log::{debug, trace, warn};

use crate::header::{is_sync_mark, FrameHeader, SyncMode, MPEG_HEADER_LEN};
use crate::vbr::parse_vbr;

/// The length of an ID3v2 tag header.
const ID3V2_HEADER_LEN: usize = 10;

/// `FrameBits` holds the body of the current frame and reads bits from it, most-significant bit
/// first.
///
/// The body is packed into big-endian 32-bit words. The word cursor never passes the last word
/// holding frame data. Once a read reaches the last byte of the frame, the reader is exhausted and
/// every further read returns 0.
#[derive(Default)]
pub struct FrameBits {
    bytes: Vec<u8>,
    words: Vec<u32>,
    word: usize,
    bit: u32,
    exhausted: bool,
    parsed: bool,
}

impl FrameBits {
    /// Instantiate a `FrameBits` reading the provided frame body.
    pub fn from_bytes(body: &[u8]) -> Self {
        let mut frame = FrameBits::default();
        frame.load(body.len()).copy_from_slice(body);
        frame.parse();
        frame
    }

    /// Resize the body buffer for a frame of `size` bytes and return it for filling.
    fn load(&mut self, size: usize) -> &mut [u8] {
        self.bytes.clear();
        self.bytes.resize(size, 0);
        self.parsed = false;
        &mut self.bytes
    }

    /// Pack the body into words and rewind the cursor.
    fn parse(&mut self) {
        self.words.clear();
        self.words.extend(self.bytes.chunks(4).map(|chunk| {
            let mut word = [0; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            u32::from_be_bytes(word)
        }));

        self.word = 0;
        self.bit = 0;
        self.exhausted = false;
        self.parsed = true;
    }

    /// Release the frame.
    fn clear(&mut self) {
        self.bytes.clear();
        self.words.clear();
        self.word = 0;
        self.bit = 0;
        self.exhausted = false;
        self.parsed = false;
    }

    /// Gets the frame body.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Gets the size of the frame body in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if no frame is loaded.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns true if a read reached the end of the frame.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Gets the number of bits consumed from the frame.
    pub fn position(&self) -> u64 {
        if self.exhausted {
            8 * self.bytes.len() as u64
        }
        else {
            32 * self.word as u64 + u64::from(self.bit)
        }
    }

    /// Read `n`, 0 to 32, bits from the frame.
    pub fn get_bits(&mut self, n: u32) -> u32 {
        debug_assert!(n <= 32);

        let max_words = self.words.len();

        if n == 0 || max_words == 0 || self.exhausted {
            return 0;
        }

        let next = if self.word + 1 < max_words { self.words[self.word + 1] } else { 0 };
        let window = (u64::from(self.words[self.word]) << 32) | u64::from(next);

        let value = (window >> (64 - self.bit - n)) as u32 & mask_lower_u32(n);

        self.bit += n;
        self.word += (self.bit >> 5) as usize;
        self.bit &= 31;

        // The last word may be zero padded past the end of the frame.
        if 32 * self.word as u64 + u64::from(self.bit) >= 8 * self.bytes.len() as u64 {
            self.word = max_words - 1;
            self.bit = 0;
            self.exhausted = true;
        }

        value
    }

    /// Read one bit from the frame.
    #[inline(always)]
    pub fn get_bit(&mut self) -> u32 {
        self.get_bits(1)
    }
}

impl ReadBitsLtr for FrameBits {
    #[inline(always)]
    fn read_bits_leq32(&mut self, bit_width: u32) -> u32 {
        self.get_bits(bit_width)
    }
}

impl FiniteBitStream for FrameBits {
    fn bits_left(&self) -> u64 {
        (8 * self.bytes.len() as u64).saturating_sub(self.position())
    }
}

/// `CrcBits` reads bits from a frame while feeding them into a CRC-16.
///
/// The CRC is seeded with the last two bytes of the frame header, the bits following the sync word
/// that the checksum protects.
pub struct CrcBits<'a> {
    bits: &'a mut FrameBits,
    crc: Crc16,
}

impl<'a> CrcBits<'a> {
    pub fn new(bits: &'a mut FrameBits, header: &FrameHeader) -> Self {
        let mut crc = Crc16::new();
        crc.process_bits(header.word & 0xffff, 16);
        CrcBits { bits, crc }
    }

    /// Gets the CRC of the bits read so far.
    pub fn crc(&self) -> u16 {
        self.crc.crc()
    }

    /// Compare the computed CRC against the one transmitted with the frame, if any.
    pub fn verify(&self, header: &FrameHeader) -> Result<()> {
        match header.crc {
            Some(transmitted) if transmitted != self.crc() => {
                let computed = self.crc();
                warn!(
                    "mpa: crc mismatch, transmitted={:#06x}, computed={:#06x}",
                    transmitted, computed
                );
                Err(Error::ChecksumMismatch { transmitted, computed })
            }
            _ => Ok(()),
        }
    }
}

impl ReadBitsLtr for CrcBits<'_> {
    #[inline(always)]
    fn read_bits_leq32(&mut self, bit_width: u32) -> u32 {
        let value = self.bits.get_bits(bit_width);
        self.crc.process_bits(value, bit_width);
        value
    }
}

/// `Bitstream` reads MPEG audio frames from a byte source.
///
/// On construction a leading ID3v2 tag is captured. Frames are then read one at a time with
/// [`Bitstream::read_frame`]. A candidate frame is only accepted if the bytes following it are
/// either the end of the stream or the header of a frame with the same version, sample rate, and
/// channel count. The first accepted frame locks the synchronization to those fields.
pub struct Bitstream<R: Read> {
    source: Option<PushbackReader<R>>,
    sync_mode: SyncMode,
    frame: FrameBits,
    /// The header word of the current frame, if a frame is loaded.
    header_word: Option<u32>,
    id3v2: Option<Box<[u8]>>,
    header_pos: u64,
    frames_read: u64,
    bytes_read: u64,
    eof: bool,
}

impl<R: Read> Bitstream<R> {
    /// Open a bitstream over `source`, consuming a leading ID3v2 tag if one is present.
    pub fn new(source: R) -> Self {
        let mut source = PushbackReader::new(source);

        let (id3v2, header_pos) = match read_id3v2(&mut source) {
            Ok(Some(tag)) => {
                debug!("mpa: skipped id3v2 tag of {} bytes", tag.len());
                let pos = source.pos();
                (Some(tag), pos)
            }
            Ok(None) => (None, 0),
            Err(err) => {
                debug!("mpa: failed to read id3v2 tag, {}", err);
                (None, 0)
            }
        };

        Bitstream {
            source: Some(source),
            sync_mode: SyncMode::Initial,
            frame: FrameBits::default(),
            header_word: None,
            id3v2,
            header_pos,
            frames_read: 0,
            bytes_read: 0,
            eof: false,
        }
    }

    /// Read the next frame. Returns `None` at the end of the stream.
    ///
    /// A frame truncated by the end of the stream is reported as [`Error::InvalidFrame`] once,
    /// after which reading is retried.
    pub fn read_frame(&mut self) -> Result<Option<FrameHeader>> {
        let mut header = match self.read_header() {
            Err(Error::InvalidFrame) => {
                self.close_frame();
                self.read_header()
            }
            result => result,
        }?;

        if let Some(header) = header.as_mut() {
            if self.frames_read == 0 {
                header.vbr = parse_vbr(header, self.frame.bytes());
            }

            self.frames_read += 1;
            self.bytes_read += (MPEG_HEADER_LEN + header.frame_size) as u64;

            trace!("mpa: frame {}, {}", self.frames_read, header);
        }

        Ok(header)
    }

    fn read_header(&mut self) -> Result<Option<FrameHeader>> {
        let source = match self.source.as_mut() {
            Some(source) => source,
            None => return Ok(None),
        };

        let mut truncated = false;

        loop {
            let word = match sync(source, self.sync_mode)? {
                Some(word) => word,
                None => {
                    self.eof = true;

                    if truncated {
                        self.frame.clear();
                        return invalid_frame_error();
                    }

                    return Ok(None);
                }
            };

            let mut header = FrameHeader::parse(word)?;

            let body = self.frame.load(header.frame_size);
            let read = source.read_buf(body)?;

            // A candidate running past the end of the stream may be a false sync hiding a frame.
            let confirmed = if read < body.len() {
                debug!("mpa: frame {:#010x} truncated to {} bytes", word, read);
                truncated = true;
                source.unread(&body[..read]);
                false
            }
            else {
                let mut next = [0u8; MPEG_HEADER_LEN];
                let peeked = source.read_buf(&mut next)?;
                source.unread(&next[..peeked]);

                let confirmed = match peeked {
                    0 => true,
                    MPEG_HEADER_LEN => {
                        is_sync_mark(u32::from_be_bytes(next), SyncMode::strict_from(word))
                    }
                    _ => false,
                };

                if !confirmed {
                    warn!("mpa: rejected false sync word {:#010x}", word);
                    source.unread(body);
                }

                confirmed
            };

            if !confirmed {
                // Resume the search one byte after the rejected sync word.
                source.unread(&word.to_be_bytes()[1..]);
                continue;
            }

            if self.sync_mode == SyncMode::Initial {
                let pos = source.pos() - (MPEG_HEADER_LEN + header.frame_size) as u64;
                debug!("mpa: locked sync to {:#010x} at byte {}", word, pos);
                self.sync_mode = SyncMode::strict_from(word);
            }

            self.frame.parse();
            self.header_word = Some(word);

            if header.has_crc {
                header.crc = Some(self.frame.get_bits(16) as u16);
            }

            return Ok(Some(header));
        }
    }

    /// Push the current frame back onto the source if none of its bits were consumed. The next
    /// call to [`Bitstream::read_frame`] returns the same frame again.
    pub fn unread_frame(&mut self) {
        let word = match self.header_word {
            Some(word) => word,
            None => return,
        };

        // A protected frame has had its checksum read on load.
        let untouched = match self.frame.position() {
            0 => true,
            16 => FrameHeader::parse(word).map(|header| header.has_crc).unwrap_or(false),
            _ => false,
        };

        if !untouched || !self.frame.parsed {
            return;
        }

        if let Some(source) = self.source.as_mut() {
            source.unread(self.frame.bytes());
            source.unread(&word.to_be_bytes());

            self.frames_read = self.frames_read.saturating_sub(1);
            self.bytes_read =
                self.bytes_read.saturating_sub((MPEG_HEADER_LEN + self.frame.len()) as u64);
            self.eof = false;
        }

        self.close_frame();
    }

    /// Release the current frame.
    pub fn close_frame(&mut self) {
        self.frame.clear();
        self.header_word = None;
    }

    /// Close the bitstream and release the source. Closing more than once has no effect.
    pub fn close(&mut self) {
        self.close_frame();
        self.source = None;
        self.eof = true;
    }

    /// Gets the bits of the current frame.
    pub fn frame(&self) -> &FrameBits {
        &self.frame
    }

    /// Gets the bits of the current frame for reading.
    pub fn frame_mut(&mut self) -> &mut FrameBits {
        &mut self.frame
    }

    /// Read `n`, 0 to 32, bits from the current frame.
    pub fn get_bits(&mut self, n: u32) -> u32 {
        self.frame.get_bits(n)
    }

    /// Read one bit from the current frame.
    pub fn get_bit(&mut self) -> u32 {
        self.frame.get_bit()
    }

    /// Gets the raw ID3v2 tag, including its 10 byte header, if the stream began with one. A tag
    /// truncated by the end of the stream is returned as read.
    pub fn id3v2_tag(&self) -> Option<&[u8]> {
        self.id3v2.as_deref()
    }

    /// Gets the byte position of the first byte after the ID3v2 tag.
    pub fn header_pos(&self) -> u64 {
        self.header_pos
    }

    /// Gets the current synchronization mode.
    pub fn sync_mode(&self) -> SyncMode {
        self.sync_mode
    }

    /// Gets the number of frames read.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Gets the number of frame bytes read, including headers.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Returns true once the end of the source was reached.
    pub fn is_eof(&self) -> bool {
        self.eof
    }
}

/// Scan for a sync word. Returns `None` if the source ends first.
fn sync<R: Read>(source: &mut PushbackReader<R>, mode: SyncMode) -> Result<Option<u32>> {
    let mut buf = [0u8; 3];

    if source.read_buf(&mut buf)? < buf.len() {
        return Ok(None);
    }

    let mut word = u32::from_be_bytes([0, buf[0], buf[1], buf[2]]);
    let mut skipped = 0u64;

    loop {
        let byte = match source.read_byte()? {
            Some(byte) => byte,
            None => return Ok(None),
        };

        word = (word << 8) | u32::from(byte);

        if is_sync_mark(word, mode) {
            if skipped > 0 {
                debug!("mpa: skipped {} bytes to sync", skipped);
            }
            return Ok(Some(word));
        }

        skipped += 1;
    }
}

/// Read an ID3v2 tag from the start of the source. If the source does not begin with a tag, or the
/// tag cannot be read, the consumed bytes are returned to it.
fn read_id3v2<R: Read>(source: &mut PushbackReader<R>) -> Result<Option<Box<[u8]>>> {
    let mut header = [0u8; ID3V2_HEADER_LEN];
    let read = source.read_buf(&mut header)?;

    if read < ID3V2_HEADER_LEN || &header[..3] != b"ID3" {
        source.unread(&header[..read]);
        return Ok(None);
    }

    // The size is a 28-bit synchsafe integer.
    let size = (u64::from(header[6] & 0x7f) << 21)
        | (u64::from(header[7] & 0x7f) << 14)
        | (u64::from(header[8] & 0x7f) << 7)
        | u64::from(header[9] & 0x7f);

    // The tag grows only with the bytes actually present.
    let mut tag = header.to_vec();

    match source.by_ref().take(size).read_to_end(&mut tag) {
        Ok(read) if (read as u64) < size => warn!("mpa: id3v2 tag is truncated"),
        Ok(_) => (),
        Err(err) => {
            source.unread(&tag);
            return Err(err.into());
        }
    }

    Ok(Some(tag.into_boxed_slice()))
}
