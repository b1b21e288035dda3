//! Hi-hat.
//!
//! Six fixed-frequency phase accumulators approximate the metallic noise of
//! a stack of square oscillators; their top bits are summed, band-pass
//! filtered (the SVF runs twice per sample for stability), amplified by a
//! positive-half VCA with an excitation envelope, then high-pass colored.
//! The envelope decay differs between the open and closed state.

// Based on MIT-licensed code (c) 2013 by Olivier Gillet (ol.gillet@gmail.com)

use crate::drums::{Configurable, ControlState, PARAM_MAX};
use crate::envelope::Excitation;
use crate::utils::clip;
use crate::utils::filter::{Svf, SvfMode};

const NOISE_INCREMENTS: [u32; 6] = [
    48318382, 71582788, 37044092, 54313440, 66214079, 93952409,
];

#[derive(Debug, Clone, Default)]
pub struct HighHat {
    noise: Svf,
    vca_coloration: Svf,
    vca_envelope: Excitation,

    phase: [u32; 6],

    open: bool,
    freq_param: u16,
    tone_param: u16,
    closed_decay_param: u16,
    open_decay_param: u16,
}

impl HighHat {
    /// 8 kHz, in the 0..=65535 parameter range.
    pub const DEFAULT_FREQUENCY: u16 = 105 << 9;
    /// Roughly 13 kHz coloration cutoff.
    pub const DEFAULT_TONE: u16 = 47104;
    pub const DEFAULT_CLOSED_DECAY: u16 = 32768;
    pub const DEFAULT_OPEN_DECAY: u16 = 65535;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self) {
        self.noise.init();
        self.noise.set_resonance(24000);
        self.noise.set_mode(SvfMode::BandPass);
        self.set_frequency(Self::DEFAULT_FREQUENCY);

        self.vca_coloration.init();
        self.vca_coloration.set_resonance(0);
        self.vca_coloration.set_mode(SvfMode::HighPass);
        self.set_tone(Self::DEFAULT_TONE);

        self.vca_envelope.init();
        self.vca_envelope.set_delay(0);
        self.closed_decay_param = Self::DEFAULT_CLOSED_DECAY;
        self.open_decay_param = Self::DEFAULT_OPEN_DECAY;
        self.open = false;
        self.set_decay(Self::DEFAULT_CLOSED_DECAY);

        self.phase = [0; 6];
    }

    #[inline]
    pub fn process_single_sample(&mut self, control: &mut ControlState) -> i16 {
        if control.rising() {
            self.vca_envelope.trigger(32768 * 15);
        }
        control.settle();

        let mut noise = 0i32;
        for (phase, increment) in self.phase.iter_mut().zip(NOISE_INCREMENTS) {
            *phase = phase.wrapping_add(increment);
            noise += (*phase >> 31) as i32;
        }
        noise <<= 12;

        // Run the SVF at double the sample rate for stability.
        let mut filtered_noise = 0i32;
        filtered_noise += self.noise.process(noise);
        filtered_noise += self.noise.process(noise);

        // The 808-style VCA amplifies only the positive section of the
        // signal.
        filtered_noise = filtered_noise.clamp(0, 32767);

        let envelope = self.vca_envelope.process() >> 4;
        let vca_noise = clip(envelope as i64 * filtered_noise as i64 >> 14);

        let mut hh = 0i32;
        hh += self.vca_coloration.process(vca_noise);
        hh += self.vca_coloration.process(vca_noise);
        hh <<= 1;

        clip(hh as i64) as i16
    }

    pub fn set_frequency(&mut self, frequency: u16) {
        self.freq_param = frequency;
        self.noise.set_frequency((frequency >> 2) as i16);
    }

    pub fn set_tone(&mut self, tone: u16) {
        self.tone_param = tone;
        self.vca_coloration.set_frequency(8192 + (tone >> 3) as i16);
    }

    /// Selects which of the two decay settings drives the envelope.
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
        if open {
            self.set_decay(self.open_decay_param);
        } else {
            self.set_decay(self.closed_decay_param);
        }
    }

    fn set_decay(&mut self, decay: u16) {
        self.vca_envelope.set_decay(4092 + (decay >> 14) as u32);
    }
}

impl Configurable for HighHat {
    fn param_count(&self) -> usize {
        4
    }

    fn param_name(&self, index: usize) -> &'static str {
        match index {
            0 => "Frequency",
            1 => "Tone",
            2 => "Cl. Decay",
            3 => "Op. Decay",
            _ => "?",
        }
    }

    fn params_fetch_current(&self, target: &mut [u16; PARAM_MAX]) {
        target[0] = self.freq_param;
        target[1] = self.tone_param;
        target[2] = self.closed_decay_param;
        target[3] = self.open_decay_param;
    }

    fn params_fetch_default(&self, target: &mut [u16; PARAM_MAX]) {
        target[0] = Self::DEFAULT_FREQUENCY;
        target[1] = Self::DEFAULT_TONE;
        target[2] = Self::DEFAULT_CLOSED_DECAY;
        target[3] = Self::DEFAULT_OPEN_DECAY;
    }

    fn params_set(&mut self, params: &[u16; PARAM_MAX]) {
        self.set_frequency(params[0]);
        self.set_tone(params[1]);

        self.closed_decay_param = params[2];
        self.open_decay_param = params[3];
        self.set_open(self.open);
    }
}
