// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::f32::consts::FRAC_1_SQRT_2;
use std::f64;

use mpadec_core::errors::{decode_error, Result};

use lazy_static::lazy_static;

use crate::common::{ChannelMode, Mode};
use crate::header::FrameHeader;

use super::bands::{
    BlockType, SFB_LONG_BANDS, SFB_MIXED_BANDS, SFB_MIXED_SWITCH_POINT, SFB_SHORT_BANDS,
};
use super::Granule;

lazy_static! {
    /// MPEG1 (left, right) intensity stereo gains for positions 0 to 6. Position 7 is invalid.
    ///
    /// With `r = tan(is_pos * PI / 12)`, the gains are `r / (1 + r)` and `1 / (1 + r)`.
    static ref INTENSITY_MPEG1: [(f32, f32); 7] = {
        let mut gains = [(0.0, 0.0); 7];

        for (is_pos, gain) in gains.iter_mut().enumerate() {
            let r = (is_pos as f64 * f64::consts::PI / 12.0).tan();
            *gain = ((r / (1.0 + r)) as f32, (1.0 / (1.0 + r)) as f32);
        }

        // tan(PI / 2) is infinite.
        gains[6] = (1.0, 0.0);
        gains
    };

    /// MPEG2 (left, right) intensity stereo gains for positions 0 to 30, indexed first by the
    /// least significant bit of `scalefac_compress`. Position 31 is invalid.
    ///
    /// Odd positions attenuate the left channel by `i0^((is_pos + 1) / 2)`, even positions the
    /// right channel by `i0^(is_pos / 2)`.
    static ref INTENSITY_MPEG2: [[(f32, f32); 31]; 2] = {
        let i0 = [f64::consts::SQRT_2.sqrt().recip(), f64::consts::FRAC_1_SQRT_2];

        let mut gains = [[(0.0, 0.0); 31]; 2];

        for (gains, i0) in gains.iter_mut().zip(i0) {
            for (is_pos, gain) in gains.iter_mut().enumerate() {
                *gain = if is_pos & 1 == 1 {
                    (i0.powi((is_pos as i32 + 1) / 2) as f32, 1.0)
                }
                else {
                    (1.0, i0.powi(is_pos as i32 / 2) as f32)
                };
            }
        }

        gains
    };
}

/// Convert mid and side channels to left and right channels.
fn process_mid_side(mid: &mut [f32], side: &mut [f32]) {
    for (m, s) in mid.iter_mut().zip(side.iter_mut()) {
        let left = (*m + *s) * FRAC_1_SQRT_2;
        let right = (*m - *s) * FRAC_1_SQRT_2;
        *m = left;
        *s = right;
    }
}

#[inline(always)]
fn is_zero_band(band: &[f32]) -> bool {
    band.iter().all(|&s| s == 0.0)
}

/// Intensity stereo decoding of a granule's channel pair.
struct Intensity<'a> {
    /// Gains of the valid intensity positions.
    gains: &'a [(f32, f32)],
    /// Bands with an invalid intensity position fall back to mid-side stereo if set.
    mid_side: bool,
}

impl Intensity<'_> {
    fn new(header: &FrameHeader, granule: &Granule, mid_side: bool) -> Self {
        let gains: &[(f32, f32)] = if header.is_mpeg1() {
            &INTENSITY_MPEG1[..]
        }
        else {
            &INTENSITY_MPEG2[usize::from(granule.channels[1].scalefac_compress & 1)][..]
        };

        Intensity { gains, mid_side }
    }

    /// Derive the left and right channels of a band from the left channel alone.
    fn process(&self, is_pos: u8, left: &mut [f32], right: &mut [f32]) {
        match self.gains.get(usize::from(is_pos)) {
            Some(&(gain_l, gain_r)) => {
                for (l, r) in left.iter_mut().zip(right.iter_mut()) {
                    *r = gain_r * *l;
                    *l *= gain_l;
                }
            }
            None if self.mid_side => process_mid_side(left, right),
            None => (),
        }
    }
}

/// Intensity decode the upper zero bands of the right channel of a long block. Returns the first
/// sample that was intensity decoded.
fn intensity_long_block(
    header: &FrameHeader,
    granule: &Granule,
    intensity: &Intensity<'_>,
    end: usize,
    ch0: &mut [f32; 576],
    ch1: &mut [f32; 576],
) -> usize {
    let bands = &SFB_LONG_BANDS[header.sample_rate_idx()];
    let right = &granule.channels[1];

    let mut bound = end;

    for sfb in (0..22).rev() {
        let (start, band_end) = (bands[sfb], bands[sfb + 1]);

        if start < right.rzero && !is_zero_band(&ch1[start..band_end]) {
            break;
        }

        // Band 21 has no scalefactor and uses the position of band 20.
        let is_pos = right.scalefacs[sfb.min(20)];

        intensity.process(is_pos, &mut ch0[start..band_end], &mut ch1[start..band_end]);
        bound = start;
    }

    bound
}

/// Intensity decode the zero windows at the top of each of the three short windows of the right
/// channel. Windows below the first non-zero window of their sub-block are mid-side decoded when
/// enabled. Returns the first sample below which no window was processed.
fn intensity_short_block(
    header: &FrameHeader,
    granule: &Granule,
    intensity: &Intensity<'_>,
    is_mixed: bool,
    end: usize,
    ch0: &mut [f32; 576],
    ch1: &mut [f32; 576],
) -> usize {
    let sr_idx = header.sample_rate_idx();

    // Window boundaries. A mixed block starts with long bands up to the switch point.
    let (bands, switch) = if is_mixed {
        (SFB_MIXED_BANDS[sr_idx], SFB_MIXED_SWITCH_POINT[sr_idx])
    }
    else {
        (&SFB_SHORT_BANDS[sr_idx][..], 0)
    };

    let n_windows = bands.len() - 1;
    let scalefacs = &granule.channels[1].scalefacs;

    // The windows of the last band have no scalefactors and use those of the band before it.
    let is_pos = |w: usize| if w + 3 >= n_windows { scalefacs[w - 3] } else { scalefacs[w] };

    let mut zero = [true; 3];
    let mut bound = end;
    let mut w = n_windows;

    while w > switch {
        for win in (0..3).rev() {
            w -= 1;

            let (start, win_end) = (bands[w], bands[w + 1]);

            zero[win] = zero[win] && is_zero_band(&ch1[start..win_end]);

            if zero[win] {
                intensity.process(is_pos(w), &mut ch0[start..win_end], &mut ch1[start..win_end]);
            }
            else if intensity.mid_side {
                process_mid_side(&mut ch0[start..win_end], &mut ch1[start..win_end]);
            }
        }

        bound = bands[w];

        // Every sub-block found its first non-zero window.
        if zero.iter().all(|&z| !z) {
            return bound;
        }
    }

    // The long bands of a mixed block continue the search as a long block does.
    while w > 0 {
        w -= 1;

        let (start, band_end) = (bands[w], bands[w + 1]);

        if !is_zero_band(&ch1[start..band_end]) {
            break;
        }

        intensity.process(is_pos(w), &mut ch0[start..band_end], &mut ch1[start..band_end]);
        bound = start;
    }

    bound
}

/// Joint stereo decode the channel pair of a granule.
pub(super) fn stereo(
    header: &FrameHeader,
    granule: &mut Granule,
    samples: &mut [[f32; 576]; 2],
) -> Result<()> {
    let (mid_side, intensity) = match header.channel_mode {
        ChannelMode::JointStereo(Mode::Layer3 { mid_side, intensity }) => (mid_side, intensity),
        _ => return Ok(()),
    };

    if granule.channels[0].block_type != granule.channels[1].block_type {
        return decode_error("mpa: stereo channel pair block_type mismatch");
    }

    let [ch0, ch1] = samples;

    let end = granule.channels[0].rzero.max(granule.channels[1].rzero);

    let bound = if intensity {
        let intensity = Intensity::new(header, granule, mid_side);

        match granule.channels[1].block_type {
            BlockType::Short { is_mixed } => {
                intensity_short_block(header, granule, &intensity, is_mixed, end, ch0, ch1)
            }
            _ => intensity_long_block(header, granule, &intensity, end, ch0, ch1),
        }
    }
    else {
        end
    };

    if mid_side {
        let bound = bound.min(end);
        process_mid_side(&mut ch0[..bound], &mut ch1[..bound]);
    }

    // Both channels now carry samples up to the same point.
    granule.channels[0].rzero = end;
    granule.channels[1].rzero = end;

    Ok(())
}
