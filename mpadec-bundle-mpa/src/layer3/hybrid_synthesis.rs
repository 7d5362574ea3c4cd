// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::f64::consts::PI;

use lazy_static::lazy_static;

use crate::header::FrameHeader;

use super::bands::{BlockType, SFB_MIXED_BANDS, SFB_MIXED_SWITCH_POINT, SFB_SHORT_BANDS};
use super::GranuleChannel;

/// Alias reduction coefficients `c[i]` from ISO/IEC 11172-3 table B.9.
const ANTIALIAS_C: [f64; 8] = [-0.6, -0.535, -0.33, -0.185, -0.095, -0.041, -0.0142, -0.0037];

lazy_static! {
    /// Alias reduction butterfly coefficients, `(cs, ca)`.
    static ref ANTIALIAS: [(f32, f32); 8] = {
        let mut coeffs = [(0.0, 0.0); 8];

        for (coeff, &c) in coeffs.iter_mut().zip(ANTIALIAS_C.iter()) {
            let norm = (1.0 + c * c).sqrt();
            *coeff = ((1.0 / norm) as f32, (c / norm) as f32);
        }

        coeffs
    };

    /// The 36 point IMDCT windows for the long, start, short, and end block types. The short
    /// window only uses the first 12 points.
    static ref IMDCT_WINDOWS: [[f32; 36]; 4] = {
        let long = |i: usize| (PI / 36.0 * (i as f64 + 0.5)).sin();
        let short = |i: usize| (PI / 12.0 * (i as f64 + 0.5)).sin();

        let mut windows = [[0.0; 36]; 4];

        for i in 0..36 {
            windows[0][i] = long(i) as f32;

            windows[1][i] = match i {
                0..=17 => long(i),
                18..=23 => 1.0,
                24..=29 => short(i - 18),
                _ => 0.0,
            } as f32;

            windows[3][i] = match i {
                0..=5 => 0.0,
                6..=11 => short(i - 6),
                12..=17 => 1.0,
                _ => long(i),
            } as f32;
        }

        for i in 0..12 {
            windows[2][i] = short(i) as f32;
        }

        windows
    };

    /// `cos(PI / 72 * (2i + 1 + 18) * (2k + 1))` for the 36 point IMDCT.
    static ref IMDCT36_COS: [[f32; 18]; 36] = {
        let mut table = [[0.0; 18]; 36];

        for (i, row) in table.iter_mut().enumerate() {
            for (k, cos) in row.iter_mut().enumerate() {
                *cos = (PI / 72.0 * (2 * i + 1 + 18) as f64 * (2 * k + 1) as f64).cos() as f32;
            }
        }

        table
    };

    /// `cos(PI / 24 * (2i + 1 + 6) * (2k + 1))` for the 12 point IMDCT.
    static ref IMDCT12_COS: [[f32; 6]; 12] = {
        let mut table = [[0.0; 6]; 12];

        for (i, row) in table.iter_mut().enumerate() {
            for (k, cos) in row.iter_mut().enumerate() {
                *cos = (PI / 24.0 * (2 * i + 1 + 6) as f64 * (2 * k + 1) as f64).cos() as f32;
            }
        }

        table
    };
}

/// Interleave the three windows of each short band so that the six frequency lines of each window
/// in a sub-band are adjacent. Long bands of a mixed block are left in place.
pub(super) fn reorder(header: &FrameHeader, channel: &GranuleChannel, buf: &mut [f32; 576]) {
    let sr_idx = header.sample_rate_idx();

    let bands = match channel.block_type {
        BlockType::Short { is_mixed: false } => &SFB_SHORT_BANDS[sr_idx][..],
        BlockType::Short { is_mixed: true } => {
            &SFB_MIXED_BANDS[sr_idx][SFB_MIXED_SWITCH_POINT[sr_idx]..]
        }
        _ => return,
    };

    let mut scratch = [0.0; 576];

    for band in bands.windows(4).step_by(3) {
        let (start, width) = (band[0], band[1] - band[0]);

        // Window w, line i, moves to 3 * i + w.
        for (w, win) in band[..3].iter().enumerate() {
            for i in 0..width {
                scratch[3 * i + w] = buf[win + i];
            }
        }

        buf[start..start + 3 * width].copy_from_slice(&scratch[..3 * width]);
    }
}

/// Apply the alias reduction butterflies to the sub-band boundaries of long blocks. For mixed
/// blocks only the boundary between the two long sub-bands is processed.
pub(super) fn antialias(channel: &GranuleChannel, buf: &mut [f32; 576]) {
    let boundaries = match channel.block_type {
        BlockType::Short { is_mixed: false } => return,
        BlockType::Short { is_mixed: true } => 1,
        _ => 31,
    };

    for sb in 1..=boundaries {
        let edge = 18 * sb;

        for (i, &(cs, ca)) in ANTIALIAS.iter().enumerate() {
            let lower = buf[edge - 1 - i];
            let upper = buf[edge + i];

            buf[edge - 1 - i] = lower * cs - upper * ca;
            buf[edge + i] = upper * cs + lower * ca;
        }
    }
}

/// 36 point IMDCT of the 18 frequency lines of a sub-band, windowed.
fn imdct36(x: &[f32], window: &[f32; 36], out: &mut [f32; 36]) {
    for ((y, cos), &win) in out.iter_mut().zip(IMDCT36_COS.iter()).zip(window.iter()) {
        let sum: f32 = x.iter().zip(cos.iter()).map(|(&x, &c)| x * c).sum();
        *y = sum * win;
    }
}

/// Three 12 point IMDCTs of the interleaved short windows of a sub-band, windowed and overlapped
/// into the middle of a 36 point block.
fn imdct12x3(x: &[f32], window: &[f32; 36], out: &mut [f32; 36]) {
    out.fill(0.0);

    for w in 0..3 {
        for (i, cos) in IMDCT12_COS.iter().enumerate() {
            let sum: f32 = (0..6).map(|k| x[3 * k + w] * cos[k]).sum();
            out[6 + 6 * w + i] += sum * window[i];
        }
    }
}

/// Transform each sub-band of a granule channel from frequency lines to time samples and overlap
/// the result with the tail of the previous granule.
///
/// `overlap` holds the second half of the previous granule's IMDCT output per sub-band.
pub(super) fn hybrid_synthesis(
    channel: &GranuleChannel,
    overlap: &mut [[f32; 18]; 32],
    buf: &mut [f32; 576],
) {
    let windows: &[[f32; 36]; 4] = &IMDCT_WINDOWS;

    let mut block = [0.0; 36];

    for (sb, (lines, prev)) in buf.chunks_exact_mut(18).zip(overlap.iter_mut()).enumerate() {
        match channel.block_type {
            // The lowest 2 sub-bands of a mixed block are long.
            BlockType::Short { is_mixed } if !is_mixed || sb >= 2 => {
                imdct12x3(lines, &windows[2], &mut block);
            }
            BlockType::Short { .. } => imdct36(lines, &windows[0], &mut block),
            block_type => imdct36(lines, &windows[block_type.window_idx()], &mut block),
        }

        for (i, sample) in lines.iter_mut().enumerate() {
            *sample = block[i] + prev[i];
            prev[i] = block[18 + i];
        }
    }
}

/// Negate the odd time samples of the odd sub-bands.
pub(super) fn frequency_inversion(buf: &mut [f32; 576]) {
    for sb in (1..32).step_by(2) {
        for ts in (1..18).step_by(2) {
            buf[18 * sb + ts] = -buf[18 * sb + ts];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imdct_analytical(x: &[f32], n: usize) -> Vec<f64> {
        let half = n / 2;
        (0..n)
            .map(|i| {
                (0..half)
                    .map(|k| {
                        let phase = PI / (2 * n) as f64
                            * (2 * i + 1 + half) as f64
                            * (2 * k + 1) as f64;
                        f64::from(x[k]) * phase.cos()
                    })
                    .sum()
            })
            .collect()
    }

    #[test]
    fn verify_imdct36() {
        let x: Vec<f32> = (0..18).map(|i| (i as f32 * 0.37).sin()).collect();
        let ones = [1.0; 36];

        let mut out = [0.0; 36];
        imdct36(&x, &ones, &mut out);

        for (&actual, expected) in out.iter().zip(imdct_analytical(&x, 36)) {
            assert!((f64::from(actual) - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn verify_imdct12x3() {
        // Only window 1 carries data.
        let mut x = [0.0; 18];
        let lines = [0.5, -0.25, 1.0, 0.0, 0.75, -1.0];
        for (k, &line) in lines.iter().enumerate() {
            x[3 * k + 1] = line;
        }

        let mut window = [0.0; 36];
        window[..12].fill(1.0);

        let mut out = [0.0; 36];
        imdct12x3(&x, &window, &mut out);

        assert!(out[..12].iter().all(|&s| s == 0.0));
        assert!(out[24..].iter().all(|&s| s == 0.0));

        for (&actual, expected) in out[12..24].iter().zip(imdct_analytical(&lines, 12)) {
            assert!((f64::from(actual) - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn verify_windows() {
        let windows: &[[f32; 36]; 4] = &IMDCT_WINDOWS;

        // The long window is symmetric, the start and end windows mirror each other.
        for i in 0..36 {
            assert!((windows[0][i] - windows[0][35 - i]).abs() < 1e-6);
            assert!((windows[1][i] - windows[3][35 - i]).abs() < 1e-6);
        }

        assert!(windows[2][12..].iter().all(|&w| w == 0.0));
    }

    #[test]
    fn verify_antialias_butterflies() {
        for &(cs, ca) in ANTIALIAS.iter() {
            assert!((cs * cs + ca * ca - 1.0).abs() < 1e-6);
        }

        let channel = GranuleChannel {
            block_type: BlockType::Short { is_mixed: false },
            ..Default::default()
        };

        let mut buf = [1.0; 576];
        antialias(&channel, &mut buf);
        assert!(buf.iter().all(|&s| s == 1.0));

        let channel = GranuleChannel::default();

        let mut buf = [0.0; 576];
        buf[17] = 1.0;
        antialias(&channel, &mut buf);

        assert_eq!(buf[17], ANTIALIAS[0].0);
        assert_eq!(buf[18], ANTIALIAS[0].1);
    }

    #[test]
    fn verify_overlap() {
        let channel = GranuleChannel::default();
        let mut overlap = [[0.0; 18]; 32];
        overlap[3][5] = 0.5;

        let mut buf = [0.0; 576];
        hybrid_synthesis(&channel, &mut overlap, &mut buf);

        assert_eq!(buf[18 * 3 + 5], 0.5);
        assert!(overlap.iter().flatten().all(|&s| s == 0.0));
    }

    #[test]
    fn verify_frequency_inversion() {
        let mut buf = [1.0; 576];
        frequency_inversion(&mut buf);

        assert_eq!(buf[0], 1.0);
        assert_eq!(buf[19], -1.0);
        assert_eq!(buf[20], 1.0);
        assert_eq!(buf[18 * 30 + 1], 1.0);
        assert_eq!(buf[18 * 31 + 17], -1.0);
    }

    #[test]
    fn verify_reorder() {
        // MPEG1, layer 3, 44.1 kHz, mono.
        let header = FrameHeader::parse(0xfffb_90c4).unwrap();
        let channel = GranuleChannel {
            block_type: BlockType::Short { is_mixed: false },
            ..Default::default()
        };

        let mut buf = [0.0; 576];
        for (i, sample) in buf.iter_mut().enumerate() {
            *sample = i as f32;
        }

        reorder(&header, &channel, &mut buf);

        // Band 0 has windows of 4 lines at 0, 4, and 8.
        assert_eq!(buf[..6], [0.0, 4.0, 8.0, 1.0, 5.0, 9.0]);
        assert_eq!(buf[9..12], [3.0, 7.0, 11.0]);
        // Band 1 starts at 12.
        assert_eq!(buf[12..15], [12.0, 16.0, 20.0]);
    }
}
