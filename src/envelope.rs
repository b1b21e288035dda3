//! Decaying-pulse excitation generators.

// Based on MIT-licensed code (c) 2013 by Olivier Gillet (ol.gillet@gmail.com)

/// One-shot, delayed, exponentially decaying impulse.
///
/// `trigger` arms a sample down-counter; when it reaches zero the level is
/// added into the accumulator exactly once, and the accumulator decays by a
/// 12-bit fixed multiplier on every call. The level's sign is applied only
/// at output, so retriggering mid-decay never flips the internal state.
#[derive(Debug, Clone)]
pub struct Excitation {
    delay: u32,
    decay: u32,
    counter: u32,
    state: i32,
    level: i32,
}

impl Default for Excitation {
    fn default() -> Self {
        Self {
            delay: 0,
            decay: 4093,
            counter: 0,
            state: 0,
            level: 0,
        }
    }
}

impl Excitation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self) {
        *self = Self::default();
    }

    /// Delay before the pulse fires, in samples.
    pub fn set_delay(&mut self, delay: u32) {
        self.delay = delay;
    }

    /// Per-sample decay multiplier, 12-bit (4095 is the slowest decay).
    pub fn set_decay(&mut self, decay: u32) {
        self.decay = decay;
    }

    pub fn trigger(&mut self, level: i32) {
        self.level = level;
        self.counter = self.delay + 1;
        // This breaks continuity, but without it bass drum repetitions break.
        self.state = 0;
    }

    /// The delay counter has elapsed and the single-sample pulse has fired.
    #[inline]
    pub fn done(&self) -> bool {
        self.counter == 0
    }

    /// The pulse has fired and the accumulator has decayed back to zero.
    #[inline]
    pub fn finished(&self) -> bool {
        self.state == 0 && self.counter == 0
    }

    #[inline]
    pub fn process(&mut self) -> i32 {
        self.state = ((self.state as i64 * self.decay as i64) >> 12) as i32;
        if self.counter > 0 {
            self.counter -= 1;
            if self.counter == 0 {
                self.state += self.level.abs();
            }
        }
        if self.level < 0 {
            -self.state
        } else {
            self.state
        }
    }
}

/// Repeated excitation: a configured number of fast-decay pulses, then one
/// final pulse at a longer terminal decay.
#[derive(Debug, Clone)]
pub struct Repeater {
    ex: Excitation,

    level: i32,
    rep_counter: u32,
    decay: u32,
    decay_term: u32,
    repeats: u32,
}

impl Default for Repeater {
    fn default() -> Self {
        let mut ex = Excitation::new();
        ex.set_decay(3340);
        Self {
            ex,
            level: 0,
            rep_counter: 0,
            decay: 3340,
            decay_term: 4095,
            repeats: 0,
        }
    }
}

impl Repeater {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self) {
        self.decay = 3340;
        self.decay_term = 4095;
        self.rep_counter = 0;
        self.level = 0;

        self.ex.init();
        self.ex.set_delay(0);
        self.ex.set_decay(self.decay);
    }

    pub fn set_repeats(&mut self, repeats: u32) {
        self.repeats = repeats;
    }

    /// Decay rate used while repeat pulses are still pending.
    pub fn set_decay(&mut self, decay: u32) {
        self.decay = decay;
    }

    /// Decay rate of the final, long tail pulse.
    pub fn set_decay_term(&mut self, decay: u32) {
        self.decay_term = decay;
    }

    pub fn trigger(&mut self, level: i32) {
        self.rep_counter = 0;
        self.level = level;
        // With a repeat target of zero the single pulse is the tail itself.
        self.ex.set_decay(if self.repeats == 0 {
            self.decay_term
        } else {
            self.decay
        });
        self.ex.trigger(self.level);
    }

    #[inline]
    pub fn process(&mut self) -> i32 {
        let exc = self.ex.process();
        if self.ex.finished() && self.rep_counter <= self.repeats {
            self.rep_counter += 1;
            if self.rep_counter == self.repeats {
                self.ex.set_decay(self.decay_term);
                self.ex.trigger(self.level);
            } else if self.rep_counter < self.repeats {
                self.ex.trigger(self.level);
            }
        }

        exc
    }
}
