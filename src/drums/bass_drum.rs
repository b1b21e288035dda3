//! 808-style bass drum.
//!
//! Two opposite-polarity excitation pulses plus a short FM attack pulse
//! drive a band-pass resonator whose pitch is briefly detuned upward while
//! the attack pulse is still active. The resonator output is smoothed by a
//! one-pole low-pass whose coefficient is the tone parameter.

// Based on MIT-licensed code (c) 2013 by Olivier Gillet (ol.gillet@gmail.com)

use crate::drums::{Configurable, ControlState, PARAM_MAX};
use crate::envelope::Excitation;
use crate::utils::clip;
use crate::utils::filter::{Svf, SvfMode};
use crate::SAMPLE_RATE;

#[derive(Debug, Clone, Default)]
pub struct BassDrum {
    pulse_up: Excitation,
    pulse_down: Excitation,
    attack_fm: Excitation,
    resonator: Svf,

    freq_param: i16,
    punch_param: u16,
    tone_param: u16,
    decay_param: u16,

    frequency: i16,
    lp_coefficient: i32,
    lp_state: i32,
}

impl BassDrum {
    pub const DEFAULT_FREQUENCY: u16 = 0;
    pub const DEFAULT_DECAY: u16 = 32768;
    pub const DEFAULT_TONE: u16 = 32768;
    pub const DEFAULT_PUNCH: u16 = 65535;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self) {
        self.pulse_up.init();
        self.pulse_down.init();
        self.attack_fm.init();
        self.resonator.init();

        self.pulse_up.set_delay(0);
        self.pulse_up.set_decay(3340);

        self.pulse_down.set_delay(SAMPLE_RATE / 1000);
        self.pulse_down.set_decay(3072);

        self.attack_fm.set_delay(4 * SAMPLE_RATE / 1000);
        self.attack_fm.set_decay(4093);

        self.resonator.set_punch(32768);
        self.resonator.set_mode(SvfMode::BandPass);

        self.set_frequency(Self::DEFAULT_FREQUENCY as i16);
        self.set_decay(Self::DEFAULT_DECAY);
        self.set_tone(Self::DEFAULT_TONE);
        self.set_punch(Self::DEFAULT_PUNCH);

        self.lp_state = 0;
    }

    #[inline]
    pub fn process_single_sample(&mut self, control: &mut ControlState) -> i16 {
        if control.rising() {
            self.pulse_up.trigger(12 * 32768 * 7 / 10);
            self.pulse_down.trigger(-19662 * 7 / 10);
            self.attack_fm.trigger(18000);
        }
        control.settle();

        let mut excitation = 0i32;
        excitation += self.pulse_up.process();
        excitation += if !self.pulse_down.done() { 16384 } else { 0 };
        excitation += self.pulse_down.process();
        self.attack_fm.process();
        self.resonator.set_frequency(
            self.frequency + if self.attack_fm.done() { 0 } else { 17 << 7 },
        );

        let resonator_output = (excitation >> 4) + self.resonator.process(excitation);
        self.lp_state +=
            (((resonator_output - self.lp_state) as i64 * self.lp_coefficient as i64) >> 15) as i32;

        clip(self.lp_state as i64) as i16
    }

    pub fn set_frequency(&mut self, frequency: i16) {
        self.freq_param = frequency;
        self.frequency = ((31 << 7) + ((frequency as i32 * 896) >> 15)) as i16;
    }

    pub fn set_decay(&mut self, decay: u16) {
        self.decay_param = decay;
        let scaled = 65535 - decay as u32;
        let squared = (scaled * scaled) >> 16;
        let scaled = (squared * scaled) >> 18;
        self.resonator.set_resonance((32768 - 128 - scaled) as i16);
    }

    pub fn set_tone(&mut self, tone: u16) {
        self.tone_param = tone;
        let coefficient = (tone as u32 * tone as u32) >> 16;
        self.lp_coefficient = 512 + ((coefficient >> 2) * 3) as i32;
    }

    pub fn set_punch(&mut self, punch: u16) {
        self.punch_param = punch;
        self.resonator
            .set_punch(((punch as u32 * punch as u32) >> 16) as u16);
    }
}

impl Configurable for BassDrum {
    fn param_count(&self) -> usize {
        4
    }

    fn param_name(&self, index: usize) -> &'static str {
        match index {
            0 => "Frequency",
            1 => "Punch",
            2 => "Tone",
            3 => "Decay",
            _ => "?",
        }
    }

    fn params_fetch_current(&self, target: &mut [u16; PARAM_MAX]) {
        target[0] = (self.freq_param as u16).wrapping_add(32768);
        target[1] = self.punch_param;
        target[2] = self.tone_param;
        target[3] = self.decay_param;
    }

    fn params_fetch_default(&self, target: &mut [u16; PARAM_MAX]) {
        target[0] = Self::DEFAULT_FREQUENCY;
        target[1] = Self::DEFAULT_PUNCH;
        target[2] = Self::DEFAULT_TONE;
        target[3] = Self::DEFAULT_DECAY;
    }

    fn params_set(&mut self, params: &[u16; PARAM_MAX]) {
        self.set_frequency(params[0].wrapping_sub(32768) as i16);
        self.set_punch(params[1]);
        self.set_tone(params[2]);
        self.set_decay(params[3]);
    }
}
