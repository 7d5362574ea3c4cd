// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.


//! The `synthesis` module implements the polyphase synthesis filterbank of the MPEG audio standard,
//! and routes dequantized sub-band samples from the layer decoders to the filters.

use std::f64;

use lazy_static::lazy_static;

use mpadec_core::audio::{OutputChannels, SampleSink};

use crate::equalizer::NUM_BANDS;

/// The default scale applied to synthesized samples. Full-scale sub-band input maps to just
/// below the 16-bit PCM limit.
pub const DEFAULT_SCALE: f32 = 32700.0;

/// Synthesis window D[i], defined in Table B.3 of ISO/IEC 11172-3.
#[allow(clippy::unreadable_literal)]
#[rustfmt::skip]
const SYNTHESIS_D: [f32; 512] = [
     0.000000000, -0.000015259, -0.000015259, -0.000015259,
    -0.000015259, -0.000015259, -0.000015259, -0.000030518,
    -0.000030518, -0.000030518, -0.000030518, -0.000045776,
    -0.000045776, -0.000061035, -0.000061035, -0.000076294,
    -0.000076294, -0.000091553, -0.000106812, -0.000106812,
    -0.000122070, -0.000137329, -0.000152588, -0.000167847,
    -0.000198364, -0.000213623, -0.000244141, -0.000259399,
    -0.000289917, -0.000320435, -0.000366211, -0.000396729,
    -0.000442505, -0.000473022, -0.000534058, -0.000579834,
    -0.000625610, -0.000686646, -0.000747681, -0.000808716,
    -0.000885010, -0.000961304, -0.001037598, -0.001113892,
    -0.001205444, -0.001296997, -0.001388550, -0.001480103,
    -0.001586914, -0.001693726, -0.001785278, -0.001907349,
    -0.002014160, -0.002120972, -0.002243042, -0.002349854,
    -0.002456665, -0.002578735, -0.002685547, -0.002792358,
    -0.002899170, -0.002990723, -0.003082275, -0.003173828,
     0.003250122,  0.003326416,  0.003387451,  0.003433228,
     0.003463745,  0.003479004,  0.003479004,  0.003463745,
     0.003417969,  0.003372192,  0.003280640,  0.003173828,
     0.003051758,  0.002883911,  0.002700806,  0.002487183,
     0.002227783,  0.001937866,  0.001617432,  0.001266479,
     0.000869751,  0.000442505, -0.000030518, -0.000549316,
    -0.001098633, -0.001693726, -0.002334595, -0.003005981,
    -0.003723145, -0.004486084, -0.005294800, -0.006118774,
    -0.007003784, -0.007919312, -0.008865356, -0.009841919,
    -0.010848999, -0.011886597, -0.012939453, -0.014022827,
    -0.015121460, -0.016235352, -0.017349243, -0.018463135,
    -0.019577026, -0.020690918, -0.021789551, -0.022857666,
    -0.023910522, -0.024932861, -0.025909424, -0.026840210,
    -0.027725220, -0.028533936, -0.029281616, -0.029937744,
    -0.030532837, -0.031005859, -0.031387329, -0.031661987,
    -0.031814575, -0.031845093, -0.031738281, -0.031478882,
     0.031082153,  0.030517578,  0.029785156,  0.028884888,
     0.027801514,  0.026535034,  0.025085449,  0.023422241,
     0.021575928,  0.019531250,  0.017257690,  0.014801025,
     0.012115479,  0.009231567,  0.006134033,  0.002822876,
    -0.000686646, -0.004394531, -0.008316040, -0.012420654,
    -0.016708374, -0.021179199, -0.025817871, -0.030609131,
    -0.035552979, -0.040634155, -0.045837402, -0.051132202,
    -0.056533813, -0.061996460, -0.067520142, -0.073059082,
    -0.078628540, -0.084182739, -0.089706421, -0.095169067,
    -0.100540161, -0.105819702, -0.110946655, -0.115921021,
    -0.120697021, -0.125259399, -0.129562378, -0.133590698,
    -0.137298584, -0.140670776, -0.143676758, -0.146255493,
    -0.148422241, -0.150115967, -0.151306152, -0.151962280,
    -0.152069092, -0.151596069, -0.150497437, -0.148773193,
    -0.146362305, -0.143264771, -0.139450073, -0.134887695,
    -0.129577637, -0.123474121, -0.116577148, -0.108856201,
     0.100311279,  0.090927124,  0.080688477,  0.069595337,
     0.057617187,  0.044784546,  0.031082153,  0.016510010,
     0.001068115, -0.015228271, -0.032379150, -0.050354004,
    -0.069168091, -0.088775635, -0.109161377, -0.130310059,
    -0.152206421, -0.174789429, -0.198059082, -0.221984863,
    -0.246505737, -0.271591187, -0.297210693, -0.323318481,
    -0.349868774, -0.376800537, -0.404083252, -0.431655884,
    -0.459472656, -0.487472534, -0.515609741, -0.543823242,
    -0.572036743, -0.600219727, -0.628295898, -0.656219482,
    -0.683914185, -0.711318970, -0.738372803, -0.765029907,
    -0.791213989, -0.816864014, -0.841949463, -0.866363525,
    -0.890090942, -0.913055420, -0.935195923, -0.956481934,
    -0.976852417, -0.996246338, -1.014617920, -1.031936646,
    -1.048156738, -1.063217163, -1.077117920, -1.089782715,
    -1.101211548, -1.111373901, -1.120223999, -1.127746582,
    -1.133926392, -1.138763428, -1.142211914, -1.144287109,
     1.144989014,  1.144287109,  1.142211914,  1.138763428,
     1.133926392,  1.127746582,  1.120223999,  1.111373901,
     1.101211548,  1.089782715,  1.077117920,  1.063217163,
     1.048156738,  1.031936646,  1.014617920,  0.996246338,
     0.976852417,  0.956481934,  0.935195923,  0.913055420,
     0.890090942,  0.866363525,  0.841949463,  0.816864014,
     0.791213989,  0.765029907,  0.738372803,  0.711318970,
     0.683914185,  0.656219482,  0.628295898,  0.600219727,
     0.572036743,  0.543823242,  0.515609741,  0.487472534,
     0.459472656,  0.431655884,  0.404083252,  0.376800537,
     0.349868774,  0.323318481,  0.297210693,  0.271591187,
     0.246505737,  0.221984863,  0.198059082,  0.174789429,
     0.152206421,  0.130310059,  0.109161377,  0.088775635,
     0.069168091,  0.050354004,  0.032379150,  0.015228271,
    -0.001068115, -0.016510010, -0.031082153, -0.044784546,
    -0.057617187, -0.069595337, -0.080688477, -0.090927124,
     0.100311279,  0.108856201,  0.116577148,  0.123474121,
     0.129577637,  0.134887695,  0.139450073,  0.143264771,
     0.146362305,  0.148773193,  0.150497437,  0.151596069,
     0.152069092,  0.151962280,  0.151306152,  0.150115967,
     0.148422241,  0.146255493,  0.143676758,  0.140670776,
     0.137298584,  0.133590698,  0.129562378,  0.125259399,
     0.120697021,  0.115921021,  0.110946655,  0.105819702,
     0.100540161,  0.095169067,  0.089706421,  0.084182739,
     0.078628540,  0.073059082,  0.067520142,  0.061996460,
     0.056533813,  0.051132202,  0.045837402,  0.040634155,
     0.035552979,  0.030609131,  0.025817871,  0.021179199,
     0.016708374,  0.012420654,  0.008316040,  0.004394531,
     0.000686646, -0.002822876, -0.006134033, -0.009231567,
    -0.012115479, -0.014801025, -0.017257690, -0.019531250,
    -0.021575928, -0.023422241, -0.025085449, -0.026535034,
    -0.027801514, -0.028884888, -0.029785156, -0.030517578,
     0.031082153,  0.031478882,  0.031738281,  0.031845093,
     0.031814575,  0.031661987,  0.031387329,  0.031005859,
     0.030532837,  0.029937744,  0.029281616,  0.028533936,
     0.027725220,  0.026840210,  0.025909424,  0.024932861,
     0.023910522,  0.022857666,  0.021789551,  0.020690918,
     0.019577026,  0.018463135,  0.017349243,  0.016235352,
     0.015121460,  0.014022827,  0.012939453,  0.011886597,
     0.010848999,  0.009841919,  0.008865356,  0.007919312,
     0.007003784,  0.006118774,  0.005294800,  0.004486084,
     0.003723145,  0.003005981,  0.002334595,  0.001693726,
     0.001098633,  0.000549316,  0.000030518, -0.000442505,
    -0.000869751, -0.001266479, -0.001617432, -0.001937866,
    -0.002227783, -0.002487183, -0.002700806, -0.002883911,
    -0.003051758, -0.003173828, -0.003280640, -0.003372192,
    -0.003417969, -0.003463745, -0.003479004, -0.003479004,
    -0.003463745, -0.003433228, -0.003387451, -0.003326416,
     0.003250122,  0.003173828,  0.003082275,  0.002990723,
     0.002899170,  0.002792358,  0.002685547,  0.002578735,
     0.002456665,  0.002349854,  0.002243042,  0.002120972,
     0.002014160,  0.001907349,  0.001785278,  0.001693726,
     0.001586914,  0.001480103,  0.001388550,  0.001296997,
     0.001205444,  0.001113892,  0.001037598,  0.000961304,
     0.000885010,  0.000808716,  0.000747681,  0.000686646,
     0.000625610,  0.000579834,  0.000534058,  0.000473022,
     0.000442505,  0.000396729,  0.000366211,  0.000320435,
     0.000289917,  0.000259399,  0.000244141,  0.000213623,
     0.000198364,  0.000167847,  0.000152588,  0.000137329,
     0.000122070,  0.000106812,  0.000106812,  0.000091553,
     0.000076294,  0.000076294,  0.000061035,  0.000061035,
     0.000045776,  0.000045776,  0.000030518,  0.000030518,
     0.000030518,  0.000030518,  0.000015259,  0.000015259,
     0.000015259,  0.000015259,  0.000015259,  0.000015259,
];

lazy_static! {
    /// The butterfly coefficients of the fast DCT. For each transform length N in 2, 4, .., 32, the
    /// coefficients for that length are stored at [N/2..N), where:
    ///
    /// c[N/2 + i] = 1.0 / [2.0 * cos((PI / N) * (i + 0.5))]    for i = 0..N/2
    static ref DCT_COEFFS: [f32; 32] = {
        let mut coeffs = [0f32; 32];

        let mut n = 2;
        while n <= 32 {
            for i in 0..n / 2 {
                let c = (f64::consts::PI / n as f64 * (i as f64 + 0.5)).cos();
                coeffs[n / 2 + i] = (0.5 / c) as f32;
            }
            n <<= 1;
        }

        coeffs
    };
}

/// `SynthesisFilter` is the polyphase synthesis filterbank of one output channel.
///
/// Sub-band samples are written one at a time with [`SynthesisFilter::input_sample`]. Once all 32
/// sub-band samples of a time slot are written, [`SynthesisFilter::calculate_pcm_samples`] emits
/// 32 PCM samples to the sink and clears the input vector for the next time slot.
pub struct SynthesisFilter {
    channel: usize,
    scale: f32,
    eq: [f32; NUM_BANDS],
    samples: [f32; 32],
    v_vec: [[f32; 64]; 16],
    v_front: usize,
}

impl SynthesisFilter {
    /// Instantiate a filter that writes to `channel` of the sample sink.
    pub fn new(channel: usize, scale: f32, eq: &[f32; NUM_BANDS]) -> Self {
        SynthesisFilter {
            channel,
            scale,
            eq: *eq,
            samples: [0.0; 32],
            v_vec: [[0.0; 64]; 16],
            v_front: 0,
        }
    }

    /// Replace the equalizer band factors.
    pub fn set_eq(&mut self, eq: &[f32; NUM_BANDS]) {
        self.eq = *eq;
    }

    /// Write the sample of one sub-band for the current time slot.
    #[inline(always)]
    pub fn input_sample(&mut self, subband: usize, sample: f32) {
        self.samples[subband] = self.eq[subband] * sample;
    }

    /// Clear all filter history.
    pub fn reset(&mut self) {
        self.samples = [0.0; 32];
        self.v_vec = [[0.0; 64]; 16];
        self.v_front = 0;
    }

    /// Synthesize the current time slot into 32 PCM samples and append them to the sink.
    pub fn calculate_pcm_samples(&mut self, sink: &mut dyn SampleSink) {
        let mut d_vec = self.samples;
        let mut scratch = [0f32; 32];

        // Matrixing is a 32-point MDCT of the sub-band samples. Only points [16..48) of the MDCT
        // are unique, and those map onto a 32-point DCT of the input, so a fast DCT is used
        // instead (K. Konstantinides, "Fast subband filtering in MPEG audio coding", 1994).
        dct32(&mut d_vec, &mut scratch);

        let v_vec = &mut self.v_vec[self.v_front];

        for (d, s) in v_vec[48 - 15..48 + 0].iter_mut().rev().zip(&d_vec[1..16]) {
            *d = -s;
        }
        for (d, s) in v_vec[48 + 1..48 + 16].iter_mut().zip(&d_vec[1..16]) {
            *d = -s;
        }
        for (d, s) in v_vec[16 + 1..16 + 16].iter_mut().rev().zip(&d_vec[17..32]) {
            *d = -s;
        }
        for (d, s) in v_vec[1..16].iter_mut().zip(&d_vec[17..32]) {
            *d = *s;
        }

        // Boundary samples do not follow the quadrant mapping.
        v_vec[0] = d_vec[16];
        v_vec[32] = -d_vec[16];
        v_vec[48] = -d_vec[0];
        v_vec[16] = 0.0;

        // Window the first half of even slots and the second half of odd slots, accumulating the
        // i-th sample of each slot into the i-th output sample.
        let mut o_vec = [0f32; 32];

        for j in 0..8 {
            let v_start = self.v_front + (j << 1);

            let v0 = &self.v_vec[(v_start + 0) & 0xf][0..32];
            let v1 = &self.v_vec[(v_start + 1) & 0xf][32..64];

            let k = j << 6;

            for i in 0..32 {
                o_vec[i] += v0[i] * SYNTHESIS_D[k + i + 0];
                o_vec[i] += v1[i] * SYNTHESIS_D[k + i + 32];
            }
        }

        for o in o_vec.iter_mut() {
            *o *= self.scale;
        }

        sink.append_samples(self.channel, &o_vec);

        // The front of the FIFO moves back by one slot, so the oldest slot is overwritten next.
        self.v_front = (self.v_front + 15) & 0xf;

        self.samples = [0.0; 32];
    }
}

/// Performs a DCT-II without output scaling using Byeong Gi Lee's fast recursive algorithm
/// ("A new algorithm to compute the discrete cosine transform", IEEE Transactions on Acoustics,
/// Speech, and Signal Processing, vol. 32, no. 6, 1984).
///
/// The transform is computed in-place in `x`. The length of `x` must be a power of two, and
/// `scratch` must be at least as long as `x`.
fn dct_lee(x: &mut [f32], scratch: &mut [f32]) {
    let n = x.len();

    if n == 1 {
        return;
    }

    let half = n >> 1;
    let coeffs = &DCT_COEFFS[half..n];

    let (even, odd) = scratch[..n].split_at_mut(half);

    for i in 0..half {
        let a = x[i];
        let b = x[n - 1 - i];
        even[i] = a + b;
        odd[i] = (a - b) * coeffs[i];
    }

    {
        let (x_even, x_odd) = x.split_at_mut(half);
        dct_lee(even, x_even);
        dct_lee(odd, x_odd);
    }

    for i in 0..half - 1 {
        x[(i << 1) + 0] = even[i];
        x[(i << 1) + 1] = odd[i] + odd[i + 1];
    }

    x[n - 2] = even[half - 1];
    x[n - 1] = odd[half - 1];
}

/// Performs a 32-point DCT in-place.
#[inline(always)]
fn dct32(x: &mut [f32; 32], scratch: &mut [f32; 32]) {
    dct_lee(x, scratch);
}

/// `FilterBank` routes the dequantized sub-band samples produced by a layer decoder to the
/// synthesis filters of the requested output channels.
pub struct FilterBank<'a> {
    filters: &'a mut [SynthesisFilter],
    sink: &'a mut dyn SampleSink,
    output: OutputChannels,
}

impl<'a> FilterBank<'a> {
    pub fn new(
        filters: &'a mut [SynthesisFilter],
        sink: &'a mut dyn SampleSink,
        output: OutputChannels,
    ) -> Self {
        debug_assert!(!filters.is_empty());
        FilterBank { filters, sink, output }
    }

    /// Input the sample of a single channel stream.
    #[inline(always)]
    pub fn input_mono(&mut self, subband: usize, sample: f32) {
        self.filters[0].input_sample(subband, sample);
    }

    /// Input the left and right samples of a two channel stream.
    ///
    /// With a single output channel only filter 0 exists. The right channel, or the average of
    /// both channels for a downmix, is then written to filter 0.
    #[inline(always)]
    pub fn input_stereo(&mut self, subband: usize, left: f32, right: f32) {
        match self.output {
            OutputChannels::Both => {
                self.filters[0].input_sample(subband, left);
                if let Some(filter) = self.filters.get_mut(1) {
                    filter.input_sample(subband, right);
                }
            }
            OutputChannels::Left => self.filters[0].input_sample(subband, left),
            OutputChannels::Right => self.filters[0].input_sample(subband, right),
            OutputChannels::Downmix => self.filters[0].input_sample(subband, 0.5 * (left + right)),
        }
    }

    /// Synthesize the current time slot of every filter.
    pub fn flush(&mut self) {
        for filter in self.filters.iter_mut() {
            filter.calculate_pcm_samples(&mut *self.sink);
        }
    }

    /// Input 18 time slots of 32 sub-bands each, `samples[ch][18 * sb + ts]`, and synthesize them.
    #[cfg(feature = "mp3")]
    pub fn synthesize_granule(&mut self, samples: &[[f32; 576]; 2], channels: usize) {
        log::trace!("synthesis: granule of {} channel(s) to {} output", channels, self.output);

        for ts in 0..18 {
            for sb in 0..32 {
                if channels == 1 {
                    self.input_mono(sb, samples[0][18 * sb + ts]);
                }
                else {
                    self.input_stereo(sb, samples[0][18 * sb + ts], samples[1][18 * sb + ts]);
                }
            }
            self.flush();
        }
    }
}
