//! Lookup tables for envelopes, filter coefficients and waveforms.
//!
//! The tables are computed once on first access and shared by every voice.
//! [`crate::drummer::Drummer::init`] warms them up front so the audio path
//! never pays for the initialization. Every table carries one guard entry
//! past its covered range, as required by the interpolation helpers.

// Based on MIT-licensed code (c) 2013 by Olivier Gillet (ol.gillet@gmail.com)

#[allow(unused_imports)]
use num_traits::float::Float;

use spin::Once;

use crate::SAMPLE_RATE;

static TABLES: Once<Tables> = Once::new();

/// Returns the shared lookup tables, computing them on first call.
pub fn tables() -> &'static Tables {
    TABLES.call_once(Tables::compute)
}

pub struct Tables {
    /// SVF cutoff coefficient per semitone, `2*sin(pi*f/sr) * 32767`.
    pub svf_cutoff: [u16; 257],
    /// SVF damping coefficient over the resonance range.
    pub svf_damp: [u16; 257],
    /// Rising exponential, 0 to 65535 over the full phase range.
    pub env_expo: [u16; 257],
    /// 32-bit envelope phase increments, fast to slow.
    pub env_increments: [u32; 257],
    /// One octave of oscillator phase increments, notes 116..=128 in 1/8
    /// semitone steps.
    pub oscillator_increments: [u32; 97],
    /// One cycle of a sine wave.
    pub sine: [i16; 1025],
    /// Soft-clipping transfer curve over the full sample range.
    pub overdrive: [i16; 1025],
}

impl Tables {
    fn compute() -> Self {
        let sr = SAMPLE_RATE as f64;
        let pi = core::f64::consts::PI;

        let mut svf_cutoff = [0u16; 257];
        for (i, entry) in svf_cutoff.iter_mut().enumerate() {
            let cutoff = 440.0 * Float::powf(2.0, (i as f64 - 69.0) / 12.0);
            let f = Float::min(cutoff / sr, 0.125);
            *entry = (2.0 * Float::sin(pi * f) * 32767.0) as u16;
        }

        let mut svf_damp = [0u16; 257];
        for (i, entry) in svf_damp.iter_mut().enumerate() {
            let resonance = i as f64 / 260.0;
            *entry = (2.0 * (1.0 - Float::powf(resonance, 0.25)) * 32767.0) as u16;
        }

        let mut env_expo = [0u16; 257];
        for (i, entry) in env_expo.iter_mut().enumerate() {
            let x = i.min(255) as f64 / 256.0;
            *entry = (65535.0 * (1.0 - Float::exp(-4.0 * x)) / (1.0 - Float::exp(-4.0))) as u16;
        }

        // Envelope times spread exponentially from 62.5 us to 12 s.
        let mut env_increments = [0u32; 257];
        let min_time = 3.0 / sr;
        let max_time = 12.0;
        for (i, entry) in env_increments.iter_mut().enumerate() {
            let time = min_time * Float::powf(max_time / min_time, i as f64 / 256.0);
            *entry = (4294967296.0 / (time * sr)) as u32;
        }

        let mut oscillator_increments = [0u32; 97];
        for (i, entry) in oscillator_increments.iter_mut().enumerate() {
            let note = 116.0 + i as f64 / 8.0;
            let frequency = 440.0 * Float::powf(2.0, (note - 69.0) / 12.0);
            *entry = (4294967296.0 * frequency / sr + 0.5) as u32;
        }

        let mut sine = [0i16; 1025];
        for (i, entry) in sine.iter_mut().enumerate() {
            *entry = (Float::sin(2.0 * pi * i as f64 / 1024.0) * 32767.0) as i16;
        }

        let mut overdrive = [0i16; 1025];
        for (i, entry) in overdrive.iter_mut().enumerate() {
            let x = i as f64 / 512.0 - 1.0;
            *entry = (Float::atan(4.0 * x) / Float::atan(4.0) * 32767.0) as i16;
        }

        Self {
            svf_cutoff,
            svf_damp,
            env_expo,
            env_increments,
            oscillator_increments,
            sine,
            overdrive,
        }
    }
}
