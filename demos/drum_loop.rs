//! Renders a short drum pattern through the full engine into a WAV file.

use simple_logger::SimpleLogger;

use drumkit_dsp::drummer::{AudioSink, Drummer, Percussion};
use drumkit_dsp::fx::reverb::Reverb;
use drumkit_dsp::fx::FxUnit;
use drumkit_dsp::mixer::Channel;
use drumkit_dsp::SAMPLE_RATE;

const BPM: u32 = 120;
const STEPS_PER_BEAT: u32 = 4;
const BARS: u32 = 4;

struct WavSink {
    writer: hound::WavWriter<std::io::BufWriter<std::fs::File>>,
}

impl AudioSink for WavSink {
    fn try_write(&mut self, frame: u32) -> bool {
        let left = (frame & 0xffff) as i16;
        let right = (frame >> 16) as i16;
        self.writer.write_sample(left).unwrap();
        self.writer.write_sample(right).unwrap();
        true
    }
}

// One bar of each voice, sixteen steps.
const PATTERN: [(Percussion, [u8; 16]); 5] = [
    (
        Percussion::BassDrum,
        [127, 0, 0, 0, 0, 0, 0, 0, 127, 0, 0, 0, 0, 0, 90, 0],
    ),
    (
        Percussion::Snare,
        [0, 0, 0, 0, 127, 0, 0, 0, 0, 0, 0, 0, 127, 0, 0, 64],
    ),
    (
        Percussion::HihatClosed,
        [100, 0, 80, 0, 100, 0, 80, 0, 100, 0, 80, 0, 100, 0, 0, 0],
    ),
    (
        Percussion::HihatOpen,
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 90, 0],
    ),
    (
        Percussion::Clap,
        [0, 0, 0, 0, 127, 0, 0, 0, 0, 0, 0, 0, 127, 0, 0, 0],
    ),
];

fn main() {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    std::fs::create_dir_all("out").ok();
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut sink = WavSink {
        writer: hound::WavWriter::create("out/drum_loop.wav", spec).unwrap(),
    };

    let mut drummer = Drummer::with_fx(0x21, FxUnit::Reverb(Reverb::new()));
    drummer.init();
    drummer.mixer_mut().set_send(Channel::Snare, 24000);
    drummer.mixer_mut().set_send(Channel::Clap, 32000);
    drummer.mixer_mut().set_panning(Channel::HiHat, 12000);
    drummer.mixer_mut().set_panning(Channel::Clap, -12000);

    let samples_per_step = (SAMPLE_RATE * 60 / BPM / STEPS_PER_BEAT) as usize;

    for bar in 0..BARS {
        log::info!("rendering bar {}", bar + 1);
        for step in 0..16 {
            for (percussion, velocities) in PATTERN {
                if velocities[step] > 0 {
                    drummer.trigger(percussion, velocities[step]);
                }
            }
            drummer.render(&mut sink, samples_per_step);
        }
    }

    // Let the reverb tail ring out.
    drummer.render(&mut sink, SAMPLE_RATE as usize);

    sink.writer.finalize().unwrap();
    log::info!("wrote out/drum_loop.wav");
}
