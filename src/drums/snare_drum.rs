//! Snare drum.
//!
//! Two independently tuned band-pass bodies excited by short pulses, summed
//! with enveloped white noise. The tone parameter redistributes energy
//! between the two bodies in opposite directions.

// Based on MIT-licensed code (c) 2013 by Olivier Gillet (ol.gillet@gmail.com)

use crate::drums::{Configurable, ControlState, PARAM_MAX};
use crate::envelope::Excitation;
use crate::utils::clip;
use crate::utils::filter::{Svf, SvfMode};
use crate::utils::random::Random;
use crate::SAMPLE_RATE;

#[derive(Debug, Clone, Default)]
pub struct SnareDrum {
    excitation_1_up: Excitation,
    excitation_1_down: Excitation,
    excitation_2: Excitation,
    excitation_noise: Excitation,
    body_1: Svf,
    body_2: Svf,
    noise: Svf,

    gain_1: i32,
    gain_2: i32,

    snappy: u16,

    freq_param: i16,
    tone_param: u16,
    snappy_param: u16,
    decay_param: u16,
}

impl SnareDrum {
    pub const DEFAULT_TONE: u16 = 0;
    pub const DEFAULT_SNAPPY: u16 = 32768;
    pub const DEFAULT_DECAY: u16 = 32768;
    pub const DEFAULT_FREQUENCY: u16 = 0;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self) {
        self.excitation_1_up.init();
        self.excitation_1_up.set_delay(0);
        self.excitation_1_up.set_decay(1536);

        self.excitation_1_down.init();
        self.excitation_1_down.set_delay(SAMPLE_RATE / 1000);
        self.excitation_1_down.set_decay(3072);

        self.excitation_2.init();
        self.excitation_2.set_delay(SAMPLE_RATE / 1000);
        self.excitation_2.set_decay(1200);

        self.excitation_noise.init();
        self.excitation_noise.set_delay(0);

        self.body_1.init();
        self.body_2.init();

        self.noise.init();
        self.noise.set_resonance(2000);
        self.noise.set_mode(SvfMode::BandPass);

        self.set_tone(Self::DEFAULT_TONE);
        self.set_snappy(Self::DEFAULT_SNAPPY);
        self.set_decay(Self::DEFAULT_DECAY);
        self.set_frequency(Self::DEFAULT_FREQUENCY as i16);
    }

    #[inline]
    pub fn process_single_sample(&mut self, control: &mut ControlState, rng: &mut Random) -> i16 {
        if control.rising() {
            self.excitation_1_up.trigger(15 * 32768);
            self.excitation_1_down.trigger(-32768);
            self.excitation_2.trigger(13107);
            self.excitation_noise.trigger(self.snappy as i32);
        }
        control.settle();

        let mut excitation_1 = 0i32;
        excitation_1 += self.excitation_1_up.process();
        excitation_1 += self.excitation_1_down.process();
        excitation_1 += if !self.excitation_1_down.done() { 2621 } else { 0 };

        let body_1 = self.body_1.process(excitation_1) + (excitation_1 >> 4);

        let mut excitation_2 = 0i32;
        excitation_2 += self.excitation_2.process();
        excitation_2 += if !self.excitation_2.done() { 13107 } else { 0 };

        let body_2 = self.body_2.process(excitation_2) + (excitation_2 >> 4);

        let noise_sample = rng.get_sample() as i32;
        let noise = self.noise.process(noise_sample);
        let noise_envelope = self.excitation_noise.process();

        let mut sd = 0i64;
        sd += (body_1 as i64 * self.gain_1 as i64) >> 15;
        sd += (body_2 as i64 * self.gain_2 as i64) >> 15;
        sd += (noise_envelope as i64 * noise as i64) >> 15;

        clip(sd) as i16
    }

    pub fn set_tone(&mut self, tone: u16) {
        self.tone_param = tone;
        self.gain_1 = 22000 - (tone >> 2) as i32;
        self.gain_2 = 22000 + (tone >> 2) as i32;
    }

    pub fn set_snappy(&mut self, snappy: u16) {
        self.snappy_param = snappy;
        self.snappy = 512 + (snappy >> 1).min(28672);
    }

    pub fn set_decay(&mut self, decay: u16) {
        self.decay_param = decay;
        self.body_1.set_resonance(29000 + (decay >> 5) as i16);
        self.body_2.set_resonance(26500 + (decay >> 5) as i16);
        self.excitation_noise.set_decay(4092 + (decay >> 14) as u32);
    }

    pub fn set_frequency(&mut self, frequency: i16) {
        self.freq_param = frequency;
        let base_note = (52 << 7) + ((frequency as i32 * 896) >> 15);
        self.body_1.set_frequency(base_note as i16);
        self.body_2.set_frequency((base_note + (12 << 7)) as i16);
        self.noise.set_frequency((base_note + (48 << 7)) as i16);
    }
}

impl Configurable for SnareDrum {
    fn param_count(&self) -> usize {
        4
    }

    fn param_name(&self, index: usize) -> &'static str {
        match index {
            0 => "Frequency",
            1 => "Decay",
            2 => "Tone",
            3 => "Snappy",
            _ => "?",
        }
    }

    fn params_fetch_current(&self, target: &mut [u16; PARAM_MAX]) {
        target[0] = (self.freq_param as u16).wrapping_add(32768);
        target[1] = self.decay_param;
        target[2] = self.tone_param;
        target[3] = self.snappy_param;
    }

    fn params_fetch_default(&self, target: &mut [u16; PARAM_MAX]) {
        target[0] = Self::DEFAULT_FREQUENCY;
        target[1] = Self::DEFAULT_DECAY;
        target[2] = Self::DEFAULT_TONE;
        target[3] = Self::DEFAULT_SNAPPY;
    }

    fn params_set(&mut self, params: &[u16; PARAM_MAX]) {
        self.set_frequency(params[0].wrapping_sub(32768) as i16);
        self.set_decay(params[1]);
        self.set_tone(params[2]);
        self.set_snappy(params[3]);
    }
}
