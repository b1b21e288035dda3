//! Hand clap.
//!
//! A repeater-driven amplitude envelope — three quick repeats, then a long
//! tail — modulating white noise through a band-pass filter run twice per
//! sample.

// Based on MIT-licensed code (c) 2013 by Olivier Gillet (ol.gillet@gmail.com)

use crate::drums::{Configurable, ControlState, PARAM_MAX};
use crate::envelope::Repeater;
use crate::utils::clip;
use crate::utils::filter::{Svf, SvfMode};
use crate::utils::random::Random;

#[derive(Debug, Clone, Default)]
pub struct Clap {
    vca_envelope: Repeater,
    vca_filter: Svf,

    freq_param: u16,
    resonance_param: u16,
    fast_decay_param: u16,
    long_decay_param: u16,
}

impl Clap {
    pub const DEFAULT_FREQUENCY: u16 = 42976;
    pub const DEFAULT_RESONANCE: u16 = 65535;
    pub const DEFAULT_FAST_DECAY: u16 = 8960;
    pub const DEFAULT_LONG_DECAY: u16 = 49151;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self) {
        self.vca_envelope.init();
        self.vca_envelope.set_repeats(3);

        self.set_fast_decay(Self::DEFAULT_FAST_DECAY);
        self.set_long_decay(Self::DEFAULT_LONG_DECAY);

        self.vca_filter.init();
        self.vca_filter.set_resonance(1000);
        self.vca_filter.set_mode(SvfMode::BandPass);
        self.set_frequency(Self::DEFAULT_FREQUENCY);
        self.set_resonance(Self::DEFAULT_RESONANCE);
    }

    #[inline]
    pub fn process_single_sample(&mut self, control: &mut ControlState, rng: &mut Random) -> i16 {
        if control.rising() {
            self.vca_envelope.trigger(32768 * 13);
        }
        control.settle();

        let noise = rng.get_sample() as i32;

        let mut filtered_noise = 0i32;
        filtered_noise += self.vca_filter.process(noise);
        filtered_noise += self.vca_filter.process(noise);

        let envelope = self.vca_envelope.process() >> 4;
        let vca_noise = clip(envelope as i64 * filtered_noise as i64 >> 14);

        vca_noise as i16
    }

    pub fn set_frequency(&mut self, frequency: u16) {
        self.freq_param = frequency;
        self.vca_filter.set_frequency((frequency >> 2) as i16);
    }

    pub fn set_resonance(&mut self, resonance: u16) {
        self.resonance_param = resonance;
        self.vca_filter.set_resonance((resonance >> 2) as i16);
    }

    /// Decay rate of the repeat pulses.
    pub fn set_fast_decay(&mut self, decay: u16) {
        self.fast_decay_param = decay;
        self.vca_envelope.set_decay(3968 + (decay >> 9) as u32);
    }

    /// Decay rate of the final tail.
    pub fn set_long_decay(&mut self, decay: u16) {
        self.long_decay_param = decay;
        self.vca_envelope.set_decay_term(4092 + (decay >> 14) as u32);
    }
}

impl Configurable for Clap {
    fn param_count(&self) -> usize {
        4
    }

    fn param_name(&self, index: usize) -> &'static str {
        match index {
            0 => "Frequency",
            1 => "Resonance",
            2 => "Fast Decay",
            3 => "Long Decay",
            _ => "?",
        }
    }

    fn params_fetch_current(&self, target: &mut [u16; PARAM_MAX]) {
        target[0] = self.freq_param;
        target[1] = self.resonance_param;
        target[2] = self.fast_decay_param;
        target[3] = self.long_decay_param;
    }

    fn params_fetch_default(&self, target: &mut [u16; PARAM_MAX]) {
        target[0] = Self::DEFAULT_FREQUENCY;
        target[1] = Self::DEFAULT_RESONANCE;
        target[2] = Self::DEFAULT_FAST_DECAY;
        target[3] = Self::DEFAULT_LONG_DECAY;
    }

    fn params_set(&mut self, params: &[u16; PARAM_MAX]) {
        self.set_frequency(params[0]);
        self.set_resonance(params[1]);
        self.set_fast_decay(params[2]);
        self.set_long_decay(params[3]);
    }
}
