// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io::Cursor;

use mpadec_bundle_mpa::{
    BitReservoir, Bitstream, Decoder, DecoderOptions, FrameBits, FrameHeader, StreamInfo,
    VbrKind,
};
use mpadec_core::checksum::Crc16;
use mpadec_core::errors::{Error, ErrorKind};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Layer 1, MPEG1, 32 kbit/s, 44.1 kHz, mono. 32 byte frames.
const L1_MONO: u32 = 0xffff_10c0;
/// As above, with the padding bit set. 36 byte frames.
const L1_MONO_PADDED: u32 = 0xffff_12c0;
/// As above, protected by a CRC.
const L1_MONO_CRC: u32 = 0xfffe_10c0;
/// Layer 3, MPEG1, 128 kbit/s, 44.1 kHz, joint stereo. 417 byte frames.
const L3_JOINT_STEREO: u32 = 0xfffb_9064;

/// Writes bits most-significant bit first.
#[derive(Default)]
struct BitWriter {
    buf: Vec<u8>,
    len: usize,
}

impl BitWriter {
    fn write(&mut self, value: u32, width: u32) {
        for i in (0..width).rev() {
            if self.len % 8 == 0 {
                self.buf.push(0);
            }
            if (value >> i) & 1 != 0 {
                let last = self.buf.len() - 1;
                self.buf[last] |= 0x80 >> (self.len % 8);
            }
            self.len += 1;
        }
    }
}

/// Builds a layer 1 mono frame. Sub-band 0 is allocated 4 bits with a scalefactor of 1.0 and
/// carries a constant sample. All other sub-bands are silent.
fn l1_tone_frame(word: u32, crc: Option<u16>) -> Vec<u8> {
    let header = FrameHeader::parse(word).unwrap();

    let mut bw = BitWriter::default();
    if let Some(crc) = crc {
        bw.write(u32::from(crc), 16);
    }
    bw.write(3, 4);
    for _ in 1..32 {
        bw.write(0, 4);
    }
    bw.write(3, 6);
    for _ in 0..12 {
        bw.write(14, 4);
    }

    let mut body = bw.buf;
    body.resize(header.frame_size, 0);

    let mut frame = word.to_be_bytes().to_vec();
    frame.extend(body);
    frame
}

/// The CRC of a protected layer 1 frame built by `l1_tone_frame`.
fn l1_tone_crc() -> u16 {
    let mut crc = Crc16::new();
    crc.process_bits(L1_MONO_CRC & 0xffff, 16);
    crc.process_bits(3, 4);
    for _ in 1..32 {
        crc.process_bits(0, 4);
    }
    crc.crc()
}

/// Builds a silent frame with an all zero body.
fn silent_frame(word: u32) -> Vec<u8> {
    let header = FrameHeader::parse(word).unwrap();
    let mut frame = word.to_be_bytes().to_vec();
    frame.resize(4 + header.frame_size, 0);
    frame
}

/// Decodes every frame of `data`, returning the number of PCM frames of each audio frame.
fn decode_all(decoder: &mut Decoder, data: Vec<u8>) -> Vec<usize> {
    let mut stream = Bitstream::new(Cursor::new(data));
    let mut frames = Vec::new();

    while let Some(pcm) = decoder.decode_next_frame(&mut stream).unwrap() {
        frames.push(pcm.frames());
    }

    frames
}

#[test]
fn verify_sync_after_garbage() {
    for seed in 0..64 {
        let mut rng = SmallRng::seed_from_u64(seed);

        for n in [0, 1, 17, 4096] {
            let mut data: Vec<u8> = (0..n).map(|_| rng.random::<u8>()).collect();
            data.extend(l1_tone_frame(L1_MONO, None));

            let mut decoder = Decoder::new(Default::default());
            let frames = decode_all(&mut decoder, data);

            assert_eq!(frames, vec![384], "seed {}, {} bytes of garbage", seed, n);
            assert_eq!(decoder.error_count(), 0);
        }
    }
}

#[test]
fn verify_padded_frames() {
    let mut data = l1_tone_frame(L1_MONO, None);
    data.extend(l1_tone_frame(L1_MONO_PADDED, None));
    data.extend(l1_tone_frame(L1_MONO, None));

    let mut stream = Bitstream::new(Cursor::new(data));

    let sizes: Vec<usize> = std::iter::from_fn(|| {
        let header = stream.read_frame().unwrap()?;
        stream.close_frame();
        Some(header.frame_size)
    })
    .collect();

    assert_eq!(sizes, vec![28, 32, 28]);
    assert_eq!(stream.bytes_read(), 32 + 36 + 32);
}

#[test]
fn verify_false_sync_is_skipped() {
    // A sync word that announces a 28 byte body, but is not followed by another sync word.
    let mut data = L1_MONO.to_be_bytes().to_vec();
    data.extend([0u8; 10]);
    data.extend(silent_frame(L1_MONO));
    data.extend(silent_frame(L1_MONO));

    let mut decoder = Decoder::new(Default::default());
    let frames = decode_all(&mut decoder, data);

    assert_eq!(frames, vec![384, 384]);
    assert_eq!(decoder.error_count(), 0);
}

#[test]
fn verify_tone_is_not_silent() {
    let mut data = l1_tone_frame(L1_MONO, None);
    data.extend(l1_tone_frame(L1_MONO, None));

    let mut stream = Bitstream::new(Cursor::new(data));
    let mut decoder = Decoder::new(Default::default());

    let pcm = decoder.decode_next_frame(&mut stream).unwrap().unwrap();
    assert_eq!(pcm.sample_rate(), 44_100);
    assert_eq!(pcm.channels(), 1);
    assert!(pcm.samples().iter().any(|&s| s != 0));

    let bytes = pcm.to_pcm_bytes(true);
    assert_eq!(bytes.len(), 2 * 384);
}

#[test]
fn verify_reservoir_wraparound() {
    let mut rng = SmallRng::seed_from_u64(0xfeed);
    let mut reservoir = BitReservoir::new();

    // Six chunks of 1000 bytes pass through a 4096 byte reservoir.
    for _ in 0..6 {
        let mut chunk = vec![0u8; 1000];
        rng.fill(&mut chunk[..]);

        reservoir.append(&chunk);

        for &byte in &chunk {
            let hi = reservoir.read_bits(3);
            let lo = reservoir.read_bits(5);
            assert_eq!((hi << 5) | lo, u32::from(byte));
        }
    }

    assert_eq!(reservoir.total_bits_read(), 6 * 8000);

    // Rewinding re-reads the most recent bytes.
    reservoir.rewind_bytes(2);
    let a = reservoir.read_bits(16);
    reservoir.rewind_bits(16);
    assert_eq!(reservoir.read_bits(16), a);
}

#[test]
fn verify_short_frame_reads_are_clamped() {
    let mut frame = FrameBits::from_bytes(&[0xab, 0xcd, 0xef]);

    assert_eq!(frame.get_bits(16), 0xabcd);
    assert_eq!(frame.get_bits(16), 0xef00);
    assert!(frame.is_exhausted());

    assert_eq!(frame.get_bits(32), 0);
    assert_eq!(frame.get_bit(), 0);
    assert_eq!(frame.position(), 24);
}

#[test]
fn verify_xing_header() {
    let header = FrameHeader::parse(L3_JOINT_STEREO).unwrap();

    let mut first = silent_frame(L3_JOINT_STEREO);
    let offset = 4 + header.side_info_len();
    first[offset..offset + 4].copy_from_slice(b"Xing");
    first[offset + 4..offset + 8].copy_from_slice(&3u32.to_be_bytes());
    first[offset + 8..offset + 12].copy_from_slice(&1000u32.to_be_bytes());
    first[offset + 12..offset + 16].copy_from_slice(&418_000u32.to_be_bytes());

    let mut data = first;
    data.extend(silent_frame(L3_JOINT_STEREO));

    let mut stream = Bitstream::new(Cursor::new(data));

    let header = stream.read_frame().unwrap().unwrap();
    assert!(header.is_vbr());

    let vbr = header.vbr.as_ref().unwrap();
    assert_eq!(vbr.kind, VbrKind::Xing);
    assert_eq!(vbr.frames, Some(1000));
    assert_eq!(vbr.bytes, Some(418_000));

    let info = StreamInfo::new(&header, None);
    assert_eq!(info.max_frames, Some(1000));
    assert_eq!(info.bitrate_string(), "128 kb/s");
    stream.close_frame();

    // Only the first frame is checked for a VBR header.
    let header = stream.read_frame().unwrap().unwrap();
    assert!(!header.is_vbr());
}

#[test]
fn verify_no_xing_header() {
    let mut stream = Bitstream::new(Cursor::new(silent_frame(L3_JOINT_STEREO)));

    let header = stream.read_frame().unwrap().unwrap();
    assert!(!header.is_vbr());
    assert!(header.vbr.is_none());
}

#[test]
fn verify_crc_mismatch_skips_frame() {
    let crc = l1_tone_crc();

    let mut data = l1_tone_frame(L1_MONO_CRC, Some(crc));
    data.extend(l1_tone_frame(L1_MONO_CRC, Some(crc ^ 0x0100)));
    data.extend(l1_tone_frame(L1_MONO_CRC, Some(crc)));

    let mut stream = Bitstream::new(Cursor::new(data.clone()));
    let mut decoder = Decoder::new(Default::default());

    let mut results = Vec::new();

    loop {
        match decoder.decode_next_frame(&mut stream) {
            Ok(Some(pcm)) => results.push(Some(pcm.frames())),
            Ok(None) => break,
            Err(err) => {
                assert!(matches!(err, Error::ChecksumMismatch { .. }));
                assert_eq!(err.kind(), ErrorKind::FrameFatal);
                assert!(decoder.last_decoded().is_empty());
                results.push(None);
            }
        }
    }

    assert_eq!(results, vec![Some(384), None, Some(384)]);
    assert_eq!(decoder.frames_decoded(), 2);
    assert_eq!(decoder.error_count(), 1);

    // Without verification every frame decodes.
    let mut decoder = Decoder::new(DecoderOptions::default().with_verify_crc(false));
    assert_eq!(decode_all(&mut decoder, data), vec![384, 384, 384]);
}
