// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use mpadec_core::errors::{allocation_error, Result};
use mpadec_core::io::ReadBitsLtr;

use crate::bitstream::{CrcBits, FrameBits};
use crate::common::*;
use crate::header::FrameHeader;
use crate::layer12::{subband_modes, SubbandMode, LAYER12_SCALEFACTORS};
use crate::synthesis::FilterBank;

use lazy_static::lazy_static;

/// The number of samples per sub-band in a layer 1 frame.
const SAMPLES_PER_SUBBAND: usize = 12;

lazy_static! {
    /// Dequantization factor and offset indexed by bit allocation.
    ///
    /// A sample of `nb = allocation + 1` bits, `raw`, is dequantized as follows:
    ///
    /// (2^nb / (2^nb - 1)) * (raw / 2^(nb - 1) - 1 + 1 / 2^(nb - 1))
    ///
    /// Which factors into `raw * factor + offset`.
    static ref FACTOR_OFFSET: [(f32, f32); 15] = {
        let mut table = [(0f32, 0f32); 15];

        for (allocation, entry) in table.iter_mut().enumerate().skip(1) {
            let step = 1.0 / f64::from(1u32 << allocation);
            let levels = f64::from(1u32 << (allocation + 1));
            let scale = levels / (levels - 1.0);

            *entry = ((step * scale) as f32, ((step - 1.0) * scale) as f32);
        }

        table
    };
}

/// Dequantize a raw sample read with the given bit allocation.
#[inline(always)]
fn dequantize(allocation: u32, raw: u32) -> f32 {
    let (factor, offset) = FACTOR_OFFSET[allocation as usize];
    raw as f32 * factor + offset
}

/// Read a bit allocation. An allocation of 15 is forbidden.
#[inline(always)]
fn read_allocation<B: ReadBitsLtr>(bs: &mut B, subband: usize) -> Result<u32> {
    match bs.read_bits_leq32(4) {
        15 => allocation_error(subband, 15),
        allocation => Ok(allocation),
    }
}

/// Read and scale a sample. Sub-bands without an allocation are silent.
#[inline(always)]
fn read_sample(frame: &mut FrameBits, allocation: u32, scalefactor: f32) -> f32 {
    if allocation == 0 {
        return 0.0;
    }

    dequantize(allocation, frame.get_bits(allocation + 1)) * scalefactor
}

/// Layer 1 decoder.
pub struct Layer1 {
    verify_crc: bool,
}

impl Layer1 {
    pub fn new(verify_crc: bool) -> Self {
        Layer1 { verify_crc }
    }
}

impl Layer for Layer1 {
    fn decode(
        &mut self,
        frame: &mut FrameBits,
        header: &FrameHeader,
        bank: &mut FilterBank<'_>,
    ) -> Result<()> {
        let num_channels = header.n_channels();

        let modes = subband_modes(header, 32);

        let mut alloc = [[0u32; 32]; 2];
        let mut scalefacs = [[0f32; 32]; 2];

        // The bit allocations are protected by the CRC.
        let checksum = {
            let mut bs = CrcBits::new(frame, header);

            for (sb, mode) in modes.iter().enumerate() {
                match mode {
                    SubbandMode::Mono => alloc[0][sb] = read_allocation(&mut bs, sb)?,
                    SubbandMode::Stereo => {
                        alloc[0][sb] = read_allocation(&mut bs, sb)?;
                        alloc[1][sb] = read_allocation(&mut bs, sb)?;
                    }
                    SubbandMode::Intensity => {
                        let allocation = read_allocation(&mut bs, sb)?;

                        alloc[0][sb] = allocation;
                        alloc[1][sb] = allocation;
                    }
                }
            }

            if self.verify_crc {
                bs.verify(header)
            }
            else {
                Ok(())
            }
        };

        // Read scalefactors for each sub-band. Intensity coded sub-bands have a scalefactor per
        // channel.
        for sb in 0..32 {
            for ch in 0..num_channels {
                if alloc[ch][sb] != 0 {
                    let index = frame.get_bits(6) as usize;

                    scalefacs[ch][sb] = LAYER12_SCALEFACTORS[index];
                }
            }
        }

        // Samples of a frame failing the CRC are discarded.
        checksum?;

        for _ in 0..SAMPLES_PER_SUBBAND {
            for (sb, mode) in modes.iter().enumerate() {
                match mode {
                    SubbandMode::Mono if alloc[0][sb] != 0 => {
                        bank.input_mono(sb, read_sample(frame, alloc[0][sb], scalefacs[0][sb]));
                    }
                    SubbandMode::Stereo => {
                        let left = read_sample(frame, alloc[0][sb], scalefacs[0][sb]);
                        let right = read_sample(frame, alloc[1][sb], scalefacs[1][sb]);

                        bank.input_stereo(sb, left, right);
                    }
                    SubbandMode::Intensity if alloc[0][sb] != 0 => {
                        // Dequantize once, then scale for each channel.
                        let sample = dequantize(alloc[0][sb], frame.get_bits(alloc[0][sb] + 1));

                        bank.input_stereo(sb, sample * scalefacs[0][sb], sample * scalefacs[1][sb]);
                    }
                    _ => (),
                }
            }

            bank.flush();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mpadec_core::checksum::Crc16;
    use mpadec_core::errors::Error;

    use super::*;
    use crate::testing::{BitWriter, Output};

    /// Layer 1, MPEG1, 32 kbit/s, 44.1 kHz, mono. 28 byte frame body.
    const MONO: u32 = 0xffff_10c0;
    /// As above, protected by a CRC.
    const MONO_CRC: u32 = 0xfffe_10c0;

    /// Writes a mono frame with sub-band 0 allocated 4 bits, scalefactor 1.0, and all samples set
    /// to `raw`.
    fn mono_frame(bw: &mut BitWriter, raw: u32) {
        bw.write(3, 4);
        for _ in 1..32 {
            bw.write(0, 4);
        }
        bw.write(3, 6);
        for _ in 0..12 {
            bw.write(raw, 4);
        }
    }

    #[test]
    fn verify_dequantize() {
        // A 2 bit sample spans -2/3 to 2/3. The all ones code is not used.
        assert!((dequantize(1, 0) + 2.0 / 3.0).abs() < 1e-6);
        assert!(dequantize(1, 1).abs() < 1e-6);
        assert!((dequantize(1, 2) - 2.0 / 3.0).abs() < 1e-6);
        // A 4 bit sample spans -14/15 to 14/15.
        assert!((dequantize(3, 0) + 14.0 / 15.0).abs() < 1e-6);
        assert!(dequantize(3, 7).abs() < 1e-6);
        assert!((dequantize(3, 14) - 14.0 / 15.0).abs() < 1e-6);
    }

    #[test]
    fn verify_decode_mono() {
        let header = FrameHeader::parse(MONO).unwrap();

        let mut bw = BitWriter::new();
        mono_frame(&mut bw, 14);
        let mut frame = FrameBits::from_bytes(&bw.into_bytes(header.frame_size));

        let mut out = Output::new(1);
        Layer1::new(true).decode(&mut frame, &header, &mut out.bank()).unwrap();

        assert_eq!(out.buffer.frames(), 384);
        assert!(out.buffer.samples().iter().any(|&s| s != 0));
    }

    #[test]
    fn verify_silent_frame() {
        let header = FrameHeader::parse(MONO).unwrap();
        let mut frame = FrameBits::from_bytes(&vec![0; header.frame_size]);

        let mut out = Output::new(1);
        Layer1::new(true).decode(&mut frame, &header, &mut out.bank()).unwrap();

        assert_eq!(out.buffer.frames(), 384);
        assert!(out.buffer.samples().iter().all(|&s| s == 0));
    }

    #[test]
    fn verify_forbidden_allocation() {
        let header = FrameHeader::parse(MONO).unwrap();

        let mut bw = BitWriter::new();
        bw.write(0, 4);
        bw.write(15, 4);
        let mut frame = FrameBits::from_bytes(&bw.into_bytes(header.frame_size));

        let mut out = Output::new(1);
        let result = Layer1::new(true).decode(&mut frame, &header, &mut out.bank());

        assert!(matches!(
            result,
            Err(Error::IllegalSubbandAllocation { subband: 1, allocation: 15 })
        ));
        assert!(out.buffer.is_empty());
    }

    #[test]
    fn verify_crc() {
        let mut header = FrameHeader::parse(MONO_CRC).unwrap();

        let mut bw = BitWriter::new();
        mono_frame(&mut bw, 14);
        let body = bw.into_bytes(header.frame_size);

        // The CRC covers the last 16 bits of the header and the 128 allocation bits.
        let mut crc = Crc16::new();
        crc.process_bits(MONO_CRC & 0xffff, 16);
        crc.process_bits(3, 4);
        for _ in 1..32 {
            crc.process_bits(0, 4);
        }

        header.crc = Some(crc.crc());
        let mut frame = FrameBits::from_bytes(&body);
        let mut out = Output::new(1);
        Layer1::new(true).decode(&mut frame, &header, &mut out.bank()).unwrap();
        assert_eq!(out.buffer.frames(), 384);

        header.crc = Some(crc.crc() ^ 0x8000);
        let mut frame = FrameBits::from_bytes(&body);
        let mut out = Output::new(1);
        let result = Layer1::new(true).decode(&mut frame, &header, &mut out.bank());
        assert!(matches!(result, Err(Error::ChecksumMismatch { .. })));
        assert!(out.buffer.is_empty());

        // Verification may be disabled.
        let mut frame = FrameBits::from_bytes(&body);
        let mut out = Output::new(1);
        Layer1::new(false).decode(&mut frame, &header, &mut out.bank()).unwrap();
        assert_eq!(out.buffer.frames(), 384);
    }
}
