// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use lazy_static::lazy_static;

use crate::header::FrameHeader;

lazy_static! {
    /// Layer 1 and 2 shared scale factors, `2^(1 - i/3)`. Derived from ISO/IEC 11172-3 Table
    /// 3-B.1.
    ///
    /// Index 63 is not defined by the standard, but some encoders use it. It maps to silence.
    pub static ref LAYER12_SCALEFACTORS: [f32; 64] = {
        let mut scalefactors = [0f32; 64];

        for (i, scalefactor) in scalefactors.iter_mut().enumerate().take(63) {
            *scalefactor = 2f64.powf(1.0 - i as f64 / 3.0) as f32;
        }

        scalefactors
    };
}

/// The coding of a sub-band's samples.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubbandMode {
    /// The frame has a single channel.
    Mono,
    /// Each channel codes its own allocation and samples.
    Stereo,
    /// Both channels share an allocation and samples, and are scaled separately.
    Intensity,
}

/// Gets the coding of each of the first `sblimit` sub-bands of a frame. Intensity stereo applies
/// from the bound given by the mode extension.
pub fn subband_modes(header: &FrameHeader, sblimit: usize) -> [SubbandMode; 32] {
    if header.n_channels() == 1 {
        return [SubbandMode::Mono; 32];
    }

    let bound = if header.is_intensity_stereo() {
        header.intensity_stereo_bound().min(sblimit)
    }
    else {
        sblimit
    };

    let mut modes = [SubbandMode::Stereo; 32];

    for mode in &mut modes[bound..] {
        *mode = SubbandMode::Intensity;
    }

    modes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_scalefactors() {
        assert_eq!(LAYER12_SCALEFACTORS[0], 2.0);
        assert_eq!(LAYER12_SCALEFACTORS[3], 1.0);
        assert!((LAYER12_SCALEFACTORS[1] - 1.587_401_1).abs() < 1e-6);
        assert!((LAYER12_SCALEFACTORS[62] - 0.000_001_201_554_3).abs() < 1e-10);
        assert_eq!(LAYER12_SCALEFACTORS[63], 0.0);
    }

    #[test]
    fn verify_subband_modes() {
        use SubbandMode::*;

        // Layer 1, joint stereo, mode extension 2.
        let header = FrameHeader::parse(0xffff_1060).unwrap();
        let modes = subband_modes(&header, 32);
        assert!(modes[..12].iter().all(|&mode| mode == Stereo));
        assert!(modes[12..].iter().all(|&mode| mode == Intensity));

        // Layer 1, stereo.
        let header = FrameHeader::parse(0xffff_1000).unwrap();
        assert_eq!(subband_modes(&header, 32), [Stereo; 32]);

        // Layer 1, mono.
        let header = FrameHeader::parse(0xffff_10c0).unwrap();
        assert_eq!(subband_modes(&header, 32), [Mono; 32]);

        // Layer 2, joint stereo, mode extension 3. The bound lies past the sub-band limit.
        let header = FrameHeader::parse(0xfffd_a074).unwrap();
        assert_eq!(header.intensity_stereo_bound(), 16);
        assert!(subband_modes(&header, 8)[..8].iter().all(|&mode| mode == Stereo));
    }
}
