// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parsing of the Xing/Info and VBRI variable bit-rate headers embedded in the first frame of a
//! stream.

use bitflags::bitflags;
use log::{debug, warn};

use crate::header::FrameHeader;

/// The byte offset of the VBRI header within the frame body.
const VBRI_OFFSET: usize = 36;

/// The length of the Xing/Info seek table.
pub const XING_TOC_LEN: usize = 100;

bitflags! {
    /// The fields present in a Xing/Info header.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct VbrFlags: u32 {
        const FRAMES = 0x1;
        const BYTES  = 0x2;
        const TOC    = 0x4;
        const SCALE  = 0x8;
    }
}

/// The convention used to encode the VBR header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VbrKind {
    /// A Xing header.
    Xing,
    /// A Xing header written by LAME for a constant bit-rate stream.
    Info,
    /// A Fraunhofer VBRI header.
    Vbri,
}

/// Information from a VBR header.
#[derive(Clone, Debug, PartialEq)]
pub struct VbrInfo {
    pub kind: VbrKind,
    /// Fields present in the header. VBRI headers always carry frames and bytes.
    pub flags: VbrFlags,
    /// The total number of frames in the stream.
    pub frames: Option<u32>,
    /// The total number of bytes in the stream.
    pub bytes: Option<u32>,
    /// The seek table. Entry `i` is the position, in 1/256ths of the stream, at `i`% of the
    /// duration.
    pub toc: Option<[u8; XING_TOC_LEN]>,
    /// The encoder quality indicator.
    pub scale: Option<u32>,
}

/// Parse a VBR header from the body (excluding the 4 byte frame header) of the first frame of a
/// stream. A Xing/Info header is tried first, then a VBRI header.
pub fn parse_vbr(header: &FrameHeader, body: &[u8]) -> Option<VbrInfo> {
    let info = parse_xing(header, body).or_else(|| parse_vbri(body));

    if let Some(info) = &info {
        debug!(
            "mpa: found {:?} header, frames={:?}, bytes={:?}, scale={:?}",
            info.kind, info.frames, info.bytes, info.scale
        );
    }

    info
}

fn read_be_u32(buf: &[u8], offset: usize) -> Option<u32> {
    let bytes = buf.get(offset..offset + 4)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn parse_xing(header: &FrameHeader, body: &[u8]) -> Option<VbrInfo> {
    // The Xing header immediately follows the side information of a layer 3 frame.
    let mut offset = header.side_info_len() + if header.has_crc { 2 } else { 0 };

    let kind = match body.get(offset..offset + 4)? {
        b"Xing" => VbrKind::Xing,
        b"Info" => VbrKind::Info,
        _ => return None,
    };

    let flags = VbrFlags::from_bits_truncate(read_be_u32(body, offset + 4)?);

    offset += 8;

    let mut info = VbrInfo { kind, flags, frames: None, bytes: None, toc: None, scale: None };

    // Each present field follows the previous one. A header truncated by the end of the frame is
    // ignored.
    let truncated = || {
        warn!("mpa: {:?} header is truncated", kind);
        None
    };

    if flags.contains(VbrFlags::FRAMES) {
        match read_be_u32(body, offset) {
            Some(frames) => info.frames = Some(frames),
            None => return truncated(),
        }
        offset += 4;
    }

    if flags.contains(VbrFlags::BYTES) {
        match read_be_u32(body, offset) {
            Some(bytes) => info.bytes = Some(bytes),
            None => return truncated(),
        }
        offset += 4;
    }

    if flags.contains(VbrFlags::TOC) {
        match body.get(offset..offset + XING_TOC_LEN) {
            Some(toc) => {
                let mut table = [0; XING_TOC_LEN];
                table.copy_from_slice(toc);
                info.toc = Some(table);
            }
            None => return truncated(),
        }
        offset += XING_TOC_LEN;
    }

    if flags.contains(VbrFlags::SCALE) {
        match read_be_u32(body, offset) {
            Some(scale) => info.scale = Some(scale),
            None => return truncated(),
        }
    }

    Some(info)
}

fn parse_vbri(body: &[u8]) -> Option<VbrInfo> {
    if body.get(VBRI_OFFSET..VBRI_OFFSET + 4)? != b"VBRI" {
        return None;
    }

    // Skip the marker and version (6), the delay (2), and the quality indicator (2).
    let offset = VBRI_OFFSET + 6 + 2 + 2;

    let bytes = read_be_u32(body, offset)?;
    let frames = read_be_u32(body, offset + 4)?;

    Some(VbrInfo {
        kind: VbrKind::Vbri,
        flags: VbrFlags::FRAMES | VbrFlags::BYTES,
        frames: Some(frames),
        bytes: Some(bytes),
        toc: None,
        scale: None,
    })
}
