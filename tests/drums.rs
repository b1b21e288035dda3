//! Tests for the percussion voices


use drumkit_dsp::drums::bass_drum::BassDrum;
use drumkit_dsp::drums::clap::Clap;
use drumkit_dsp::drums::fm_drum::FmDrum;
use drumkit_dsp::drums::hihat::HighHat;
use drumkit_dsp::drums::kick_drum::KickDrum;
use drumkit_dsp::drums::snare_drum::SnareDrum;
use drumkit_dsp::drums::{Configurable, ControlState, PARAM_MAX};
use drumkit_dsp::utils::random::Random;

/// Peak absolute value over consecutive windows.
fn window_peaks(samples: &[i16], window: usize) -> Vec<i32> {
    samples
        .chunks(window)
        .map(|chunk| chunk.iter().map(|s| (*s as i32).abs()).max().unwrap())
        .collect()
}

/// Index of the last sample whose magnitude exceeds `threshold`.
fn audible_length(samples: &[i16], threshold: i16) -> usize {
    samples
        .iter()
        .rposition(|s| s.abs() > threshold)
        .unwrap_or(0)
}

#[test]
fn bass_drum_decays_after_single_trigger() {
    let mut drum = BassDrum::new();
    drum.init();

    let mut control = ControlState::new();
    control.trigger();

    let out: Vec<i16> = (0..8000)
        .map(|_| drum.process_single_sample(&mut control))
        .collect();

    // Windows longer than one cycle of the ~49 Hz fundamental, so the peak
    // tracks the amplitude envelope rather than the oscillation phase.
    let peaks = window_peaks(&out, 1000);
    let attack = peaks[0];
    assert!(attack > 2000, "no attack transient");

    // One attack, then a strictly decaying tail with no re-growth.
    for pair in peaks.windows(2) {
        assert!(pair[1] <= pair[0] + pair[0] / 16, "envelope re-grew");
    }
    assert!(*peaks.last().unwrap() < attack / 2);

    wav_writer::write_mono("drums/bass_drum.wav", &out).ok();
}

#[test]
fn bass_drum_output_is_silent_without_trigger() {
    let mut drum = BassDrum::new();
    drum.init();

    let mut control = ControlState::new();
    for _ in 0..100 {
        assert_eq!(drum.process_single_sample(&mut control), 0);
    }
}

#[test]
fn kick_drum_renders() {
    let mut drum = KickDrum::new();
    drum.init();

    let mut control = ControlState::new();
    control.trigger();

    let out: Vec<i16> = (0..24000)
        .map(|_| drum.process_single_sample(&mut control))
        .collect();

    let peak = out.iter().map(|s| (*s as i32).abs()).max().unwrap();
    assert!(peak > 1000, "kick produced no energy");

    // The tail dies down.
    let late_peak = out[20000..]
        .iter()
        .map(|s| (*s as i32).abs())
        .max()
        .unwrap();
    assert!(late_peak < peak / 4);

    wav_writer::write_mono("drums/kick_drum.wav", &out).ok();
}

#[test]
fn snare_drum_renders() {
    let mut drum = SnareDrum::new();
    drum.init();
    let mut rng = Random::new(0x21);

    let mut control = ControlState::new();
    control.trigger();

    let out: Vec<i16> = (0..24000)
        .map(|_| drum.process_single_sample(&mut control, &mut rng))
        .collect();

    let peak = out.iter().map(|s| (*s as i32).abs()).max().unwrap();
    assert!(peak > 1000, "snare produced no energy");

    wav_writer::write_mono("drums/snare_drum.wav", &out).ok();
}

#[test]
fn hihat_closed_decays_faster_than_open() {
    let render = |open: bool| -> Vec<i16> {
        let mut drum = HighHat::new();
        drum.init();
        drum.set_open(open);

        let mut control = ControlState::new();
        control.trigger();

        (0..48000)
            .map(|_| drum.process_single_sample(&mut control))
            .collect()
    };

    let closed = render(false);
    let open = render(true);

    let closed_length = audible_length(&closed, 300);
    let open_length = audible_length(&open, 300);
    assert!(
        closed_length < open_length,
        "closed {closed_length} not shorter than open {open_length}"
    );

    wav_writer::write_mono("drums/hihat_closed.wav", &closed).ok();
    wav_writer::write_mono("drums/hihat_open.wav", &open).ok();
}

#[test]
fn fm_drum_renders() {
    let mut drum = FmDrum::new();
    drum.init();
    let mut rng = Random::new(0x21);

    let mut control = ControlState::new();
    control.trigger();

    let out: Vec<i16> = (0..24000)
        .map(|_| drum.process_single_sample(&mut control, &mut rng))
        .collect();

    let peak = out.iter().map(|s| (*s as i32).abs()).max().unwrap();
    assert!(peak > 1000, "fm drum produced no energy");

    wav_writer::write_mono("drums/fm_drum.wav", &out).ok();
}

#[test]
fn fm_drum_morph_interpolates_presets() {
    let mut drum = FmDrum::new();
    drum.init();

    // Corner positions return map rows unmodified.
    let corner = drum.morph(0, 0);
    assert_ne!(corner, [0, 0, 0, 0]);

    // Intermediate positions stay within the preset value range.
    for &(x, y) in &[(10000u16, 20000u16), (33000, 50000), (65535, 65535)] {
        for value in drum.morph(x, y) {
            assert!(value < 65535);
        }
    }

    drum.set_sd_range(true);
    let sd_corner = drum.morph(0, 0);
    assert_ne!(corner, sd_corner);
}

#[test]
fn clap_repeats_then_tails_off() {
    let mut drum = Clap::new();
    drum.init();
    let mut rng = Random::new(0x21);

    let mut control = ControlState::new();
    control.trigger();

    let out: Vec<i16> = (0..48000)
        .map(|_| drum.process_single_sample(&mut control, &mut rng))
        .collect();

    let peak = out.iter().map(|s| (*s as i32).abs()).max().unwrap();
    assert!(peak > 1000, "clap produced no energy");

    // The late tail is well below the initial burst.
    let late_peak = out[40000..]
        .iter()
        .map(|s| (*s as i32).abs())
        .max()
        .unwrap();
    assert!(late_peak < peak / 4);

    wav_writer::write_mono("drums/clap.wav", &out).ok();
}

#[test]
fn defaults_are_stable_fixed_points() {
    let mut voices: Vec<Box<dyn Configurable>> = vec![
        Box::new({
            let mut v = BassDrum::new();
            v.init();
            v
        }),
        Box::new({
            let mut v = KickDrum::new();
            v.init();
            v
        }),
        Box::new({
            let mut v = SnareDrum::new();
            v.init();
            v
        }),
        Box::new({
            let mut v = HighHat::new();
            v.init();
            v
        }),
        Box::new({
            let mut v = FmDrum::new();
            v.init();
            v
        }),
        Box::new({
            let mut v = Clap::new();
            v.init();
            v
        }),
    ];

    for voice in voices.iter_mut() {
        let mut defaults = [0u16; PARAM_MAX];
        voice.params_fetch_default(&mut defaults);
        voice.params_set(&defaults);

        let mut current = [0u16; PARAM_MAX];
        voice.params_fetch_current(&mut current);

        for i in 0..voice.param_count() {
            assert_eq!(
                current[i], defaults[i],
                "parameter '{}' did not round-trip",
                voice.param_name(i)
            );
        }
    }
}

#[test]
fn param_names_are_stable() {
    let voice = {
        let mut v = BassDrum::new();
        v.init();
        v
    };
    for i in 0..voice.param_count() {
        assert_ne!(voice.param_name(i), "?");
    }
    assert_eq!(voice.param_name(100), "?");
}

#[test]
fn retrigger_restarts_the_attack() {
    let mut drum = BassDrum::new();
    drum.init();
    let mut control = ControlState::new();

    control.trigger();
    for _ in 0..4000 {
        drum.process_single_sample(&mut control);
    }

    // The voice has decayed; a new rising edge must produce a fresh
    // transient comparable to the first one.
    control.trigger();
    let out: Vec<i16> = (0..2000)
        .map(|_| drum.process_single_sample(&mut control))
        .collect();

    let peak = out.iter().map(|s| (*s as i32).abs()).max().unwrap();
    assert!(peak > 2000, "retrigger produced no transient");
}
