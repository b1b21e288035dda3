//! Tests for the fixed-point math utilities

use drumkit_dsp::utils::random::Random;
use drumkit_dsp::utils::{
    clip, compute_phase_increment, interpolate_1022, interpolate_824, mix, OCTAVE,
    PITCH_TABLE_START,
};

#[test]
fn clip_bounds() {
    assert_eq!(clip(0), 0);
    assert_eq!(clip(32767), 32767);
    assert_eq!(clip(32768), 32767);
    assert_eq!(clip(-32768), -32768);
    assert_eq!(clip(-32769), -32768);
    assert_eq!(clip(i64::MAX), 32767);
    assert_eq!(clip(i64::MIN), -32768);
}

#[test]
fn interpolate_824_exact_on_entries() {
    let table: [u16; 5] = [0, 1000, 2000, 65535, 65535];
    for (i, entry) in table.iter().enumerate().take(4) {
        let phase = (i as u32) << 24;
        assert_eq!(interpolate_824(&table, phase), *entry);
    }
}

#[test]
fn interpolate_824_linear_between_entries() {
    let table: [u16; 3] = [1000, 2000, 3000];
    // Halfway between the first two entries.
    let phase = 0x8000u32 << 8;
    assert_eq!(interpolate_824(&table, phase), 1500);
    // A quarter.
    let phase = 0x4000u32 << 8;
    assert_eq!(interpolate_824(&table, phase), 1250);
}

#[test]
fn interpolate_824_decreasing_table() {
    let table: [u16; 3] = [3000, 1000, 1000];
    let phase = 0x8000u32 << 8;
    assert_eq!(interpolate_824(&table, phase), 2000);
}

#[test]
fn interpolate_1022_exact_on_entries() {
    let table: [i16; 5] = [-32768, -1000, 0, 1000, 32767];
    for (i, entry) in table.iter().enumerate().take(4) {
        let phase = (i as u32) << 22;
        assert_eq!(interpolate_1022(&table, phase), *entry);
    }
}

#[test]
fn interpolate_1022_linear_between_entries() {
    let table: [i16; 3] = [-1000, 1000, 1000];
    // Halfway: fractional part of the 10.22 phase at 0.5.
    let phase = 1u32 << 21;
    assert_eq!(interpolate_1022(&table, phase), 0);
}

#[test]
fn mix_endpoints() {
    for (a, b) in [(32767i16, -32768i16), (-32768, 32767), (1000, -1000)] {
        let at_a = mix(a, b, 0);
        let at_b = mix(a, b, 65535);
        assert!((at_a as i32 - a as i32).abs() <= 1);
        assert!((at_b as i32 - b as i32).abs() <= 1);
    }
}

#[test]
fn mix_midpoint() {
    let mid = mix(-10000, 10000, 32768);
    assert!(mid.abs() <= 1);
}

#[test]
fn phase_increment_monotonic_across_octave() {
    // Sweep from two octaves below the table start up into the covered
    // octave; the increment must never decrease, in particular not at the
    // folding boundary.
    let mut previous = 0u32;
    let mut pitch = PITCH_TABLE_START - 2 * OCTAVE;
    while pitch < PITCH_TABLE_START + OCTAVE {
        let increment = compute_phase_increment(pitch);
        assert!(
            increment >= previous,
            "increment decreased at pitch {pitch}"
        );
        previous = increment;
        pitch += 16;
    }
}

#[test]
fn phase_increment_octave_doubles() {
    let low = compute_phase_increment(PITCH_TABLE_START - OCTAVE) as f64;
    let high = compute_phase_increment(PITCH_TABLE_START) as f64;
    assert!((high / low - 2.0).abs() < 0.001);
}

#[test]
fn phase_increment_clamps_high_pitches() {
    let highest = compute_phase_increment(128 * 128 - 1);
    assert_eq!(compute_phase_increment(128 * 128), highest);
    assert_eq!(compute_phase_increment(i32::MAX), highest);
}

#[test]
fn random_is_deterministic() {
    let mut a = Random::new(0x21);
    let mut b = Random::new(0x21);
    for _ in 0..1000 {
        assert_eq!(a.get_word(), b.get_word());
    }

    let mut c = Random::new(1);
    assert_eq!(c.get_word(), 1u32.wrapping_mul(1664525).wrapping_add(1013904223));
}

#[test]
fn random_sample_is_high_word() {
    let mut rng = Random::new(12345);
    let mut check = Random::new(12345);
    let word = rng.get_word();
    assert_eq!(check.get_sample(), (word >> 16) as i16);
}
