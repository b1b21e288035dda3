//! Tests for the excitation generators

use drumkit_dsp::envelope::{Excitation, Repeater};

#[test]
fn excitation_done_after_delay() {
    for decay in [0, 2048, 4095] {
        let mut ex = Excitation::new();
        ex.set_delay(10);
        ex.set_decay(decay);
        ex.trigger(32768);

        for _ in 0..10 {
            ex.process();
            assert!(!ex.done());
        }
        ex.process();
        assert!(ex.done());
    }
}

#[test]
fn excitation_fires_once() {
    let mut ex = Excitation::new();
    ex.set_delay(0);
    ex.set_decay(4095);
    ex.trigger(32768);

    let first = ex.process();
    assert_eq!(first, 32768);

    // The pulse fired; from here on the state only decays.
    let mut previous = first;
    for _ in 0..100 {
        let out = ex.process();
        assert!(out <= previous);
        previous = out;
    }
}

#[test]
fn excitation_finished_not_before_done() {
    let mut ex = Excitation::new();
    ex.set_delay(5);
    ex.set_decay(2048);
    ex.trigger(1000);

    let mut done_at = None;
    let mut finished_at = None;
    for n in 0..1000 {
        ex.process();
        if ex.done() && done_at.is_none() {
            done_at = Some(n);
        }
        if ex.finished() && finished_at.is_none() {
            finished_at = Some(n);
        }
    }
    let done_at = done_at.unwrap();
    let finished_at = finished_at.unwrap();
    assert!(finished_at >= done_at);
}

#[test]
fn excitation_sign_applied_at_output() {
    let mut ex = Excitation::new();
    ex.set_delay(0);
    ex.set_decay(4000);
    ex.trigger(-20000);

    let first = ex.process();
    assert_eq!(first, -20000);
    for _ in 0..50 {
        assert!(ex.process() <= 0);
    }
}

/// Counts the upward output jumps, each of which is one fired pulse.
fn count_pulses(out: &[i32]) -> usize {
    let mut pulses = 0;
    let mut previous = 0;
    for &sample in out {
        if sample - previous > 20000 {
            pulses += 1;
        }
        previous = sample;
    }
    pulses
}

#[test]
fn repeater_pulse_counts() {
    for repeats in [0u32, 1, 3] {
        let mut repeater = Repeater::new();
        repeater.init();
        repeater.set_repeats(repeats);
        repeater.set_decay(2000);
        repeater.set_decay_term(3000);
        repeater.trigger(32768);

        let out: Vec<i32> = (0..20000).map(|_| repeater.process()).collect();

        // The configured repeats at the fast rate, then exactly one
        // terminal-decay tail.
        assert_eq!(
            count_pulses(&out),
            repeats as usize + 1,
            "repeats = {repeats}"
        );

        // Quiescent again at the end.
        assert_eq!(out[out.len() - 1], 0);
        assert_eq!(out[out.len() - 100], 0);
    }
}

#[test]
fn repeater_terminal_tail_is_longer() {
    let mut repeater = Repeater::new();
    repeater.init();
    repeater.set_repeats(2);
    repeater.set_decay(2000);
    repeater.set_decay_term(3800);
    repeater.trigger(32768);

    let out: Vec<i32> = (0..40000).map(|_| repeater.process()).collect();

    // Gaps between pulses: all but the last are fast decays.
    let mut pulse_starts = Vec::new();
    let mut previous = 0;
    for (n, &sample) in out.iter().enumerate() {
        if sample - previous > 20000 {
            pulse_starts.push(n);
        }
        previous = sample;
    }
    assert_eq!(pulse_starts.len(), 3);

    let last_pulse = *pulse_starts.last().unwrap();
    let last_nonzero = out.iter().rposition(|&s| s != 0).unwrap();
    let fast_gap = pulse_starts[1] - pulse_starts[0];
    let tail_length = last_nonzero - last_pulse;
    assert!(tail_length > fast_gap);
}
