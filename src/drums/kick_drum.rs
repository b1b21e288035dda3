//! 909-style kick drum.
//!
//! Separate tonal and click layers: a sine oscillator with an enveloped
//! pitch sweep, and an excitation pulse shaped by a low-pass filter. The
//! tonal pitch and its excitation are only updated every 4th sample. The
//! mixed result is optionally waveshaped through the overdrive table.

// Based on MIT-licensed code (c) 2013 by Olivier Gillet (ol.gillet@gmail.com)

use crate::drums::{Configurable, ControlState, PARAM_MAX};
use crate::envelope::Excitation;
use crate::resources;
use crate::utils::{clip, compute_phase_increment, interpolate_1022, mix};
use crate::utils::filter::{Svf, SvfMode};

#[derive(Debug, Clone, Default)]
pub struct KickDrum {
    tone_envelope: Excitation,
    peak_envelope: Excitation,
    ps_envelope: Excitation,
    peak_filter: Svf,

    frequency: u16,
    overdrive: u16,
    tone_decay: u16,
    pitch_sweep: i32,

    phase: u32,
    state: u32,
    phase_increment: u32,
    tone_excitation: i32,

    freq_param: u16,
    tone_param: u16,
    attack_param: u16,
    decay_param: u16,
    overdrive_param: u16,
    tone_decay_param: u16,
}

impl KickDrum {
    pub const DEFAULT_FREQUENCY: u16 = 16000;
    pub const DEFAULT_TONE: u16 = 36000;
    pub const DEFAULT_ATTACK: u16 = 40000;
    pub const DEFAULT_DECAY: u16 = 45535;
    pub const DEFAULT_OVERDRIVE: u16 = 42384;
    pub const DEFAULT_TONE_DECAY: u16 = 32767;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self) {
        self.tone_envelope.init();
        self.peak_envelope.init();
        self.ps_envelope.init();

        self.peak_envelope.set_decay(4000);

        self.peak_filter.init();
        self.peak_filter.set_resonance(36384u16 as i16);
        self.peak_filter.set_mode(SvfMode::LowPass);

        self.set_frequency(Self::DEFAULT_FREQUENCY);
        self.set_attack(Self::DEFAULT_ATTACK);
        self.set_tone(Self::DEFAULT_TONE);
        self.set_decay(Self::DEFAULT_DECAY);
        self.set_overdrive(Self::DEFAULT_OVERDRIVE);
        self.set_tone_decay(Self::DEFAULT_TONE_DECAY);

        self.phase = 0;
        self.state = 0;
        self.phase_increment = 0;
        self.tone_excitation = 0;
        self.pitch_sweep = 0;
    }

    #[inline]
    pub fn process_single_sample(&mut self, control: &mut ControlState) -> i16 {
        if control.rising() {
            self.tone_envelope.trigger(32768 * 2);
            self.peak_envelope.trigger(32768 * 6);
            self.ps_envelope.trigger(32768);
            self.phase = 0;
            self.state = 0;
            self.phase_increment = 0;
            self.tone_excitation = 0;
        }
        control.settle();

        let tables = resources::tables();

        // The initial click: the excitation pulse is used directly, noise
        // only added inconsistency here.
        let envelope = self.peak_envelope.process() >> 4;

        let mut filtered_noise = 0i32;
        filtered_noise += self.peak_filter.process(envelope);
        filtered_noise += self.peak_filter.process(envelope);

        let vca_noise = ((filtered_noise as i64 * self.attack_param as i64) >> 16) as i32;

        // Tone layer, updated every 4th sample.
        if self.state & 0x03 == 0 {
            // This makes the tone excitation 4x longer.
            self.tone_excitation = self.tone_envelope.process() >> 4;
            // Ramp up to limit clicking.
            let ramp = tables.env_expo[self.state.min(255) as usize] as i32;
            self.tone_excitation = ((self.tone_excitation as i64 * ramp as i64) >> 16) as i32;
            self.pitch_sweep = self.ps_envelope.process();
            self.phase_increment = compute_phase_increment(
                self.frequency as i32
                    + ((self.frequency as i32 * (65535 - self.tone_decay as i32)) >> 16)
                    + ((self.tone_decay as i32 * self.pitch_sweep) >> 16),
            );
        }

        self.state = self.state.wrapping_add(1);

        let tone = interpolate_1022(&tables.sine, self.phase);
        self.phase = self.phase.wrapping_add(self.phase_increment);

        let vca_tone = (self.tone_excitation * tone as i32) >> 15;

        let mut mixed = vca_noise + vca_tone;

        if self.overdrive > 0 {
            let phi = ((mixed as u32) << 16).wrapping_add(1 << 31);
            let overdriven = interpolate_1022(&tables.overdrive, phi);
            mixed = mix(mixed as i16, overdriven, self.overdrive) as i32;
        }

        clip(mixed as i64) as i16
    }

    pub fn set_frequency(&mut self, frequency: u16) {
        self.freq_param = frequency;
        self.frequency = ((24 << 6) + (((72 << 5) * frequency as u32) >> 16)) as u16;
    }

    /// Cutoff of the click's low-pass filter.
    pub fn set_tone(&mut self, tone: u16) {
        self.tone_param = tone;
        self.peak_filter.set_frequency((tone >> 2) as i16);
    }

    /// Level of the click layer.
    pub fn set_attack(&mut self, attack: u16) {
        self.attack_param = attack;
    }

    pub fn set_decay(&mut self, decay: u16) {
        self.decay_param = decay;
        self.tone_envelope.set_decay(4080 + (decay >> 12) as u32);
        self.ps_envelope.set_decay(4080 + (decay >> 12) as u32);
    }

    pub fn set_overdrive(&mut self, overdrive: u16) {
        self.overdrive_param = overdrive;
        self.overdrive = overdrive;
    }

    /// Depth of the pitch sweep applied to the tone layer.
    pub fn set_tone_decay(&mut self, decay: u16) {
        self.tone_decay_param = decay;
        self.tone_decay = decay >> 3;
    }
}

impl Configurable for KickDrum {
    fn param_count(&self) -> usize {
        6
    }

    fn param_name(&self, index: usize) -> &'static str {
        match index {
            0 => "Frequency",
            1 => "Tone",
            2 => "Attack",
            3 => "Decay",
            4 => "Overdrive",
            5 => "Tone Decay",
            _ => "?",
        }
    }

    fn params_fetch_current(&self, target: &mut [u16; PARAM_MAX]) {
        target[0] = self.freq_param;
        target[1] = self.tone_param;
        target[2] = self.attack_param;
        target[3] = self.decay_param;
        target[4] = self.overdrive_param;
        target[5] = self.tone_decay_param;
    }

    fn params_fetch_default(&self, target: &mut [u16; PARAM_MAX]) {
        target[0] = Self::DEFAULT_FREQUENCY;
        target[1] = Self::DEFAULT_TONE;
        target[2] = Self::DEFAULT_ATTACK;
        target[3] = Self::DEFAULT_DECAY;
        target[4] = Self::DEFAULT_OVERDRIVE;
        target[5] = Self::DEFAULT_TONE_DECAY;
    }

    fn params_set(&mut self, params: &[u16; PARAM_MAX]) {
        self.set_frequency(params[0]);
        self.set_tone(params[1]);
        self.set_attack(params[2]);
        self.set_decay(params[3]);
        self.set_overdrive(params[4]);
        self.set_tone_decay(params[5]);
    }
}
