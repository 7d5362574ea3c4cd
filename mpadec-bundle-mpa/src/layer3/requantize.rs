// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::header::FrameHeader;

use super::bands::{
    BlockType, SFB_LONG_BANDS, SFB_MIXED_BANDS, SFB_MIXED_SWITCH_POINT, SFB_SHORT_BANDS,
};
use super::GranuleChannel;

/// Pre-emphasis added to the long band scalefactors when the preflag is set.
const PRETAB: [u8; 22] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 3, 3, 3, 2, 0];

/// Gets `2^(exp / 4)`.
#[inline(always)]
fn pow2_quarter(exp: i32) -> f32 {
    f64::powf(2.0, 0.25 * f64::from(exp)) as f32
}

/// Scale the samples `start..end` below `rzero` by `gain`.
#[inline(always)]
fn scale_band(buf: &mut [f32; 576], start: usize, end: usize, rzero: usize, gain: f32) {
    for sample in buf[start..end.min(rzero)].iter_mut() {
        *sample *= gain;
    }
}

/// Requantize the long bands given by the boundaries in `bands`.
///
/// `xr = sign(s) * |s|^(4/3) * 2^((global_gain - 210) / 4) * 2^-(scale * (sf + preflag * pretab))`
fn requantize_long(channel: &GranuleChannel, bands: &[usize], buf: &mut [f32; 576]) {
    let global = i32::from(channel.global_gain) - 210;
    let shift = if channel.scalefac_scale { 2 } else { 1 };

    for (sfb, band) in bands.windows(2).enumerate() {
        if band[0] >= channel.rzero {
            break;
        }

        let mut sf = i32::from(channel.scalefacs[sfb]);

        if channel.preflag {
            sf += i32::from(PRETAB[sfb]);
        }

        // Both exponents are in quarters: the scalefactor term is scaled by 4 through the shift.
        let gain = pow2_quarter(global - (sf << shift));

        scale_band(buf, band[0], band[1], channel.rzero, gain);
    }
}

/// Requantize the short band windows given by the boundaries in `bands`. The scalefactor of the
/// first window is `scalefacs[first_sf]`. Windows rotate through the three sub-blocks.
fn requantize_short(
    channel: &GranuleChannel,
    bands: &[usize],
    first_sf: usize,
    buf: &mut [f32; 576],
) {
    let global = i32::from(channel.global_gain) - 210;
    let shift = if channel.scalefac_scale { 2 } else { 1 };

    let mut window_gain = [0; 3];

    for (gain, &subblock_gain) in window_gain.iter_mut().zip(channel.subblock_gain.iter()) {
        *gain = global - 8 * i32::from(subblock_gain);
    }

    for (win, band) in bands.windows(2).enumerate() {
        if band[0] >= channel.rzero {
            break;
        }

        // The last band has no scalefactors of its own.
        let sf = channel.scalefacs.get(first_sf + win).copied().unwrap_or(0);

        let gain = pow2_quarter(window_gain[win % 3] - (i32::from(sf) << shift));

        scale_band(buf, band[0], band[1], channel.rzero, gain);
    }
}

/// Requantize the Huffman decoded samples of a granule channel in place.
pub(super) fn requantize(header: &FrameHeader, channel: &GranuleChannel, buf: &mut [f32; 576]) {
    let sr_idx = header.sample_rate_idx();

    match channel.block_type {
        BlockType::Short { is_mixed: false } => {
            requantize_short(channel, &SFB_SHORT_BANDS[sr_idx], 0, buf);
        }
        BlockType::Short { is_mixed: true } => {
            // Long bands up to the switch point, short band windows after it.
            let bands = SFB_MIXED_BANDS[sr_idx];
            let switch = SFB_MIXED_SWITCH_POINT[sr_idx];

            requantize_long(channel, &bands[..=switch], buf);
            requantize_short(channel, &bands[switch..], switch, buf);
        }
        _ => {
            requantize_long(channel, &SFB_LONG_BANDS[sr_idx], buf);
        }
    }
}
