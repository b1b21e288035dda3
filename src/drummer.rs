//! The engine driver.
//!
//! Owns the six voices, their gate latches, the mixer and the random
//! generator. An external event source calls [`Drummer::trigger`]; an
//! external scheduler calls [`Drummer::render`] to move samples into the
//! audio sink at its own rate. Everything is synchronous and allocation
//! free; the driver never suspends.

use crate::drums::bass_drum::BassDrum;
use crate::drums::clap::Clap;
use crate::drums::fm_drum::FmDrum;
use crate::drums::hihat::HighHat;
use crate::drums::kick_drum::KickDrum;
use crate::drums::snare_drum::SnareDrum;
use crate::drums::{Configurable, ControlState};
use crate::fx::FxUnit;
use crate::mixer::{Channel, Mixer};
use crate::resources;
use crate::utils::random::Random;

/// Trigger identifiers accepted by [`Drummer::trigger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Percussion {
    BassDrum,
    KickDrum,
    Snare,
    HihatClosed,
    HihatOpen,
    Fm,
    Clap,
}

impl Percussion {
    /// Maps a General MIDI percussion note to a trigger identifier.
    /// Unknown notes map to `None` and are simply ignored by the caller.
    pub fn from_midi_note(note: u8) -> Option<Self> {
        match note {
            35 => Some(Self::KickDrum),      // Acoustic Bass Drum
            36 => Some(Self::BassDrum),      // Bass Drum 1
            38 => Some(Self::Snare),         // Acoustic Snare
            39 => Some(Self::Clap),          // Hand Clap
            40 => Some(Self::Fm),            // Electric Snare
            42 => Some(Self::HihatClosed),   // Closed Hi-Hat
            46 => Some(Self::HihatOpen),     // Open Hi-Hat
            _ => None,
        }
    }
}

/// Consumer of the rendered sample stream.
///
/// Frames are interleaved stereo 16-bit pairs packed as
/// `right << 16 | left`. `try_write` returns `false` under backpressure; the
/// driver then retains the frame and retries it on the next render call, so
/// samples are never dropped.
pub trait AudioSink {
    fn try_write(&mut self, frame: u32) -> bool;
}

#[derive(Debug)]
pub struct Drummer {
    bass: BassDrum,
    kick: KickDrum,
    snare: SnareDrum,
    hihat: HighHat,
    fm: FmDrum,
    clap: Clap,

    bass_control: ControlState,
    kick_control: ControlState,
    snare_control: ControlState,
    hihat_control: ControlState,
    fm_control: ControlState,
    clap_control: ControlState,

    mixer: Mixer,
    rng: Random,

    left: i16,
    right: i16,
}

impl Default for Drummer {
    fn default() -> Self {
        Self::new(0x21)
    }
}

impl Drummer {
    pub fn new(seed: u32) -> Self {
        Self::with_fx(seed, FxUnit::Bypass)
    }

    pub fn with_fx(seed: u32, fx: FxUnit) -> Self {
        Self {
            bass: BassDrum::new(),
            kick: KickDrum::new(),
            snare: SnareDrum::new(),
            hihat: HighHat::new(),
            fm: FmDrum::new(),
            clap: Clap::new(),
            bass_control: ControlState::new(),
            kick_control: ControlState::new(),
            snare_control: ControlState::new(),
            hihat_control: ControlState::new(),
            fm_control: ControlState::new(),
            clap_control: ControlState::new(),
            mixer: Mixer::new(fx),
            rng: Random::new(seed),
            left: 0,
            right: 0,
        }
    }

    /// Sets every voice to its documented defaults, zeroes the run state and
    /// warms the lookup tables so the audio path never pays for their
    /// initialization.
    pub fn init(&mut self) {
        resources::tables();

        self.bass.init();
        self.kick.init();
        self.snare.init();
        self.hihat.init();
        self.fm.init();
        self.clap.init();
    }

    /// Latches a trigger for the addressed voice.
    ///
    /// The velocity is clamped to 0..=127 and applied as the mixer channel
    /// velocity; there is no separate accent boost inside the voices. A
    /// second trigger arriving before the next sample overwrites the latch.
    pub fn trigger(&mut self, percussion: Percussion, velocity: u8) {
        let velocity = velocity.min(127);
        match percussion {
            Percussion::BassDrum => {
                self.mixer.set_velocity(Channel::BassDrum, velocity);
                self.bass_control.trigger();
            }
            Percussion::KickDrum => {
                self.mixer.set_velocity(Channel::KickDrum, velocity);
                self.kick_control.trigger();
            }
            Percussion::Snare => {
                self.mixer.set_velocity(Channel::Snare, velocity);
                self.snare_control.trigger();
            }
            Percussion::HihatClosed => {
                self.mixer.set_velocity(Channel::HiHat, velocity);
                self.hihat.set_open(false);
                self.hihat_control.trigger();
            }
            Percussion::HihatOpen => {
                self.mixer.set_velocity(Channel::HiHat, velocity);
                self.hihat.set_open(true);
                self.hihat_control.trigger();
            }
            Percussion::Fm => {
                self.mixer.set_velocity(Channel::Fm, velocity);
                self.fm_control.trigger();
            }
            Percussion::Clap => {
                self.mixer.set_velocity(Channel::Clap, velocity);
                self.clap_control.trigger();
            }
        }
    }

    /// Synthesizes one sample from every voice and mixes them.
    ///
    /// The voices run in a fixed order; this pins the sequence of random
    /// generator calls, so the output is bit-exact for a given seed.
    pub fn next_sample(&mut self) -> (i16, i16) {
        let bass = self.bass.process_single_sample(&mut self.bass_control);
        let kick = self.kick.process_single_sample(&mut self.kick_control);
        let snare = self
            .snare
            .process_single_sample(&mut self.snare_control, &mut self.rng);
        let hihat = self.hihat.process_single_sample(&mut self.hihat_control);
        let fm = self
            .fm
            .process_single_sample(&mut self.fm_control, &mut self.rng);
        let clap = self
            .clap
            .process_single_sample(&mut self.clap_control, &mut self.rng);

        self.mixer.set_sample(Channel::BassDrum, bass);
        self.mixer.set_sample(Channel::KickDrum, kick);
        self.mixer.set_sample(Channel::Snare, snare);
        self.mixer.set_sample(Channel::HiHat, hihat);
        self.mixer.set_sample(Channel::Fm, fm);
        self.mixer.set_sample(Channel::Clap, clap);

        let mut left = 0i16;
        let mut right = 0i16;
        self.mixer.mix(&mut left, &mut right);
        (left, right)
    }

    /// Moves up to `max_frames` frames into the sink and returns how many
    /// were accepted. On backpressure the pending frame is retained for the
    /// next call; generation stalls rather than dropping samples.
    pub fn render(&mut self, sink: &mut impl AudioSink, max_frames: usize) -> usize {
        let mut written = 0;
        for _ in 0..max_frames {
            let frame = ((self.right as u16 as u32) << 16) | self.left as u16 as u32;
            if !sink.try_write(frame) {
                break;
            }
            written += 1;
            let (left, right) = self.next_sample();
            self.left = left;
            self.right = right;
        }
        written
    }

    /// Number of editable percussion voices.
    pub fn percussion_count(&self) -> usize {
        6
    }

    /// Display name of the voice at `index`.
    pub fn percussion_name(&self, index: usize) -> Option<&'static str> {
        match index {
            0 => Some("Bass Drum"),
            1 => Some("Kick Drum"),
            2 => Some("Snare Drum"),
            3 => Some("Hi-Hat"),
            4 => Some("FM Drum"),
            5 => Some("Clap"),
            _ => None,
        }
    }

    /// Editor access to the voice at `index`.
    pub fn percussion_mut(&mut self, index: usize) -> Option<&mut dyn Configurable> {
        match index {
            0 => Some(&mut self.bass),
            1 => Some(&mut self.kick),
            2 => Some(&mut self.snare),
            3 => Some(&mut self.hihat),
            4 => Some(&mut self.fm),
            5 => Some(&mut self.clap),
            _ => None,
        }
    }

    /// Editor access to the mixer channel settings.
    pub fn mixer_mut(&mut self) -> &mut Mixer {
        &mut self.mixer
    }
}
