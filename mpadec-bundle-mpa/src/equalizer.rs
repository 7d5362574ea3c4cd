// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A 32 band equalizer applied to the sub-band samples before synthesis.

/// The number of equalizer bands, one per sub-band.
pub const NUM_BANDS: usize = 32;

/// `Equalizer` holds one gain setting per sub-band.
///
/// A setting is a base-2 exponent in the range [-1.0, 1.0]. The band factor applied to the
/// samples of a sub-band is `2^setting`, so a setting of 0 passes the band unchanged. A setting of
/// negative infinity mutes the band.
#[derive(Clone, Debug, PartialEq)]
pub struct Equalizer {
    settings: [f32; NUM_BANDS],
}

impl Equalizer {
    /// Instantiate a flat equalizer.
    pub fn new() -> Self {
        Equalizer { settings: [0.0; NUM_BANDS] }
    }

    /// Instantiate an equalizer from up-to 32 band settings. Missing bands are flat.
    pub fn from_settings(settings: &[f32]) -> Self {
        let mut eq = Equalizer::new();
        eq.set_from(settings);
        eq
    }

    /// Replace the band settings. Bands beyond the length of `settings` are reset to flat.
    pub fn set_from(&mut self, settings: &[f32]) {
        self.reset();

        for (band, &value) in settings.iter().take(NUM_BANDS).enumerate() {
            self.settings[band] = limit(value);
        }
    }

    /// Reset all bands to flat.
    pub fn reset(&mut self) {
        self.settings = [0.0; NUM_BANDS];
    }

    /// Set a single band. Returns the previous setting, or `None` if the band does not exist.
    pub fn set_band(&mut self, band: usize, value: f32) -> Option<f32> {
        let slot = self.settings.get_mut(band)?;
        let prev = *slot;
        *slot = limit(value);
        Some(prev)
    }

    /// Get the setting of a band.
    pub fn band(&self, band: usize) -> Option<f32> {
        self.settings.get(band).copied()
    }

    /// Gets the factors applied to the samples of each sub-band.
    pub fn band_factors(&self) -> [f32; NUM_BANDS] {
        let mut factors = [0.0; NUM_BANDS];

        for (factor, &setting) in factors.iter_mut().zip(&self.settings) {
            *factor = band_factor(setting);
        }

        factors
    }
}

impl Default for Equalizer {
    fn default() -> Self {
        Equalizer::new()
    }
}

fn limit(value: f32) -> f32 {
    if value == f32::NEG_INFINITY {
        value
    }
    else if value.is_nan() {
        0.0
    }
    else {
        value.clamp(-1.0, 1.0)
    }
}

fn band_factor(setting: f32) -> f32 {
    if setting == f32::NEG_INFINITY {
        0.0
    }
    else {
        setting.exp2()
    }
}
