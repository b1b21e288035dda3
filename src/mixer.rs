//! Stereo mixer with a send-bus effect.
//!
//! Each channel combines the raw voice sample with its velocity and volume
//! settings, pans the result over the stereo bus, and routes a send-scaled
//! copy of the post-pan contribution to the fx bus. The fx bus is processed
//! by the active effect once per sample and added back into the main bus
//! before final clipping.

use crate::fx::FxUnit;
use crate::utils::clip;

/// Mixer channel indices, one per voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    BassDrum = 0,
    KickDrum,
    Snare,
    HiHat,
    Fm,
    Clap,
}

pub const CHANNEL_MAX: usize = 6;

/// Maximum channel volume (9 bit). A single full-scale channel at maximum
/// volume and velocity stays within the output range; several will clip.
pub const VOL_MAX: u16 = (1 << 9) - 1;

#[derive(Debug, Clone)]
struct ChannelState {
    /// 0..=127, written by the trigger source.
    velocity: u8,
    /// 0..=VOL_MAX.
    volume: u16,
    /// -32768 is hard left, 0 is center.
    panning: i16,
    /// Fx-send level, 0..=65535.
    send: u16,

    /// Raw sample written by the owning voice this tick.
    sample: i16,
}

impl Default for ChannelState {
    fn default() -> Self {
        Self {
            velocity: 120,
            volume: VOL_MAX >> 3,
            panning: 0,
            send: 0,
            sample: 0,
        }
    }
}

#[derive(Debug, Default)]
pub struct Mixer {
    channels: [ChannelState; CHANNEL_MAX],
    fx: FxUnit,
}

impl Mixer {
    pub fn new(fx: FxUnit) -> Self {
        Self {
            channels: Default::default(),
            fx,
        }
    }

    pub fn set_velocity(&mut self, channel: Channel, velocity: u8) {
        self.channels[channel as usize].velocity = velocity.min(127);
    }

    pub fn set_volume(&mut self, channel: Channel, volume: u16) {
        self.channels[channel as usize].volume = volume.min(VOL_MAX);
    }

    pub fn set_panning(&mut self, channel: Channel, panning: i16) {
        self.channels[channel as usize].panning = panning;
    }

    pub fn set_send(&mut self, channel: Channel, send: u16) {
        self.channels[channel as usize].send = send;
    }

    /// Writes the voice sample for this tick.
    #[inline]
    pub fn set_sample(&mut self, channel: Channel, sample: i16) {
        self.channels[channel as usize].sample = sample;
    }

    #[inline]
    pub fn mix(&mut self, left: &mut i16, right: &mut i16) {
        let mut lt = 0i64;
        let mut rt = 0i64;
        let mut fx_l = 0i64;
        let mut fx_r = 0i64;

        for channel in &self.channels {
            let mixed = (channel.velocity as i64 * channel.volume as i64 * channel.sample as i64)
                >> 16;
            // Split energy between the two sides; minimum panning puts the
            // whole contribution on the left.
            let pan = channel.panning as i64 + 32768;
            let l = mixed * (65535 - pan) >> 16;
            let r = mixed * pan >> 16;
            lt += l;
            rt += r;
            fx_l += l * channel.send as i64 >> 16;
            fx_r += r * channel.send as i64 >> 16;
        }

        let mut bus_l = clip(fx_l) as i16;
        let mut bus_r = clip(fx_r) as i16;
        self.fx.process(&mut bus_l, &mut bus_r);
        lt += bus_l as i64;
        rt += bus_r as i64;

        *left = clip(lt) as i16;
        *right = clip(rt) as i16;
    }

    pub fn fx_mut(&mut self) -> &mut FxUnit {
        &mut self.fx
    }
}
