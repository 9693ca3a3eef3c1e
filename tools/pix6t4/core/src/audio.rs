//! Beeper model.
//!
//! Games ask for a [`Tone`]; a [`Speaker`] plays it. A new tone always
//! cuts off the one in flight, tones are never queued behind each other.
//! Emulated speakers render tones with a [`ToneGenerator`], usually on the
//! other side of an `rtrb` ring of [`ToneCommand`]s.

use log::warn;
use rtrb::{Consumer, Producer, RingBuffer};

pub const DEFAULT_FREQUENCY_HZ: u32 = 440;
pub const DEFAULT_DURATION_MS: u32 = 100;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration_ms: u32,
}

impl Tone {
    pub const fn new(frequency_hz: u32, duration_ms: u32) -> Self {
        Self { frequency_hz, duration_ms }
    }
}

impl Default for Tone {
    fn default() -> Self {
        Self::new(DEFAULT_FREQUENCY_HZ, DEFAULT_DURATION_MS)
    }
}

/// Audio sink. `play` supersedes whatever is still sounding.
pub trait Speaker {
    fn play(&mut self, tone: Tone);
    fn stop(&mut self) {}
}

/// A speaker with nothing attached.
#[derive(Copy, Clone, Debug, Default)]
pub struct Silent;

impl Speaker for Silent {
    fn play(&mut self, _tone: Tone) {}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ToneCommand {
    Play(Tone),
    Stop,
}

/// Speaker half of a tone ring; the consumer half feeds a [`ToneGenerator`].
pub struct RingSpeaker {
    producer: Producer<ToneCommand>,
}

pub fn tone_ring(capacity: usize) -> (RingSpeaker, Consumer<ToneCommand>) {
    let (producer, consumer) = RingBuffer::new(capacity);
    (RingSpeaker { producer }, consumer)
}

impl RingSpeaker {
    fn send(&mut self, command: ToneCommand) {
        if self.producer.push(command).is_err() {
            warn!("tone ring full, dropping {command:?}");
        }
    }
}

impl Speaker for RingSpeaker {
    fn play(&mut self, tone: Tone) {
        self.send(ToneCommand::Play(tone));
    }

    fn stop(&mut self) {
        self.send(ToneCommand::Stop);
    }
}

/// Square wave source: the low half of each period, then the high half.
#[derive(Clone, Debug)]
pub struct ToneGenerator {
    sample_rate: u32,
    volume: f32,
    period: u32,
    phase: u32,
    remaining: u64,
}

impl ToneGenerator {
    pub fn new(sample_rate: u32, volume: f32) -> Self {
        Self {
            sample_rate,
            volume: volume.clamp(0.0, 1.0),
            period: 1,
            phase: 0,
            remaining: 0,
        }
    }

    pub fn play(&mut self, tone: Tone) {
        if tone.frequency_hz == 0 {
            self.stop();
            return;
        }
        self.period = (self.sample_rate / tone.frequency_hz).max(1);
        self.phase = 0;
        self.remaining = tone.duration_ms as u64 * self.sample_rate as u64 / 1000;
    }

    pub fn stop(&mut self) {
        self.remaining = 0;
    }

    pub fn apply(&mut self, command: ToneCommand) {
        match command {
            ToneCommand::Play(tone) => self.play(tone),
            ToneCommand::Stop => self.stop(),
        }
    }

    /// Applies every command waiting in the ring; the last one wins.
    pub fn drain(&mut self, commands: &mut Consumer<ToneCommand>) {
        while let Ok(command) = commands.pop() {
            self.apply(command);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.remaining > 0
    }

    pub fn next_sample(&mut self) -> f32 {
        if self.remaining == 0 {
            return 0.0;
        }
        self.remaining -= 1;

        let sample = if self.phase < self.period / 2 { -self.volume } else { self.volume };
        self.phase = (self.phase + 1) % self.period;
        sample
    }

    pub fn fill(&mut self, out: &mut [f32]) {
        for sample in out {
            *sample = self.next_sample();
        }
    }
}
