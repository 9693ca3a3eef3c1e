use std::io::Write;
use pix6t4_core::audio::{Speaker, Tone};
use tracing::{debug, warn};

/// Rings the terminal bell for every tone. Used when real audio is off.
#[derive(Debug, Default)]
pub struct Bell;

impl Speaker for Bell {
    fn play(&mut self, tone: Tone) {
        debug!("beep {} Hz for {} ms", tone.frequency_hz, tone.duration_ms);
        let mut out = std::io::stdout();
        if let Err(e) = out.write_all(b"\x07").and_then(|_| out.flush()) {
            warn!("bell failed: {e}");
        }
    }
}

/// Whatever is producing sound, pumped from the main loop.
pub struct AudioOut {
    #[cfg(feature = "sound")]
    engine: Option<tones::ToneAudio>,
}

impl AudioOut {
    /// The speaker to hand to the console, plus the output it drives.
    /// Without an output device the terminal bell stands in.
    #[cfg(feature = "sound")]
    pub fn open(volume: f32) -> (Self, Box<dyn Speaker>) {
        match tones::ToneAudio::new(volume) {
            Some((engine, speaker)) => (Self { engine: Some(engine) }, Box::new(speaker)),
            None => {
                warn!("no audio output device, falling back to the terminal bell");
                (Self { engine: None }, Box::new(Bell))
            }
        }
    }

    #[cfg(feature = "sound")]
    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    #[cfg(not(feature = "sound"))]
    pub fn open(_volume: f32) -> (Self, Box<dyn Speaker>) {
        (Self {}, Box::new(Bell))
    }

    #[cfg(not(feature = "sound"))]
    pub fn has_engine(&self) -> bool {
        false
    }

    /// Renders audio up to the current time. Call it often.
    pub fn pump(&mut self) {
        #[cfg(feature = "sound")]
        if let Some(engine) = self.engine.as_mut() {
            engine.process_audio();
        }
    }
}

#[cfg(feature = "sound")]
mod tones {
    use std::time::Instant;
    use dasp_graph::{Buffer, Input};
    use klingt::{AudioNode, CpalDevice, Handle, Klingt, ProcessContext};
    use pix6t4_core::audio::{tone_ring, RingSpeaker, ToneCommand, ToneGenerator};
    use rtrb::Consumer;

    /// Frames per klingt block.
    const BLOCK: f64 = 64.0;
    /// Blocks rendered ahead of real time.
    const LEAD_BLOCKS: u64 = 4;

    /// A source node that plays the square wave the console asks for.
    pub struct ToneSource {
        generator: ToneGenerator,
        commands: Consumer<ToneCommand>,
    }

    /// ToneSource is steered through its ring, not through klingt messages.
    #[derive(Clone, Copy, Debug)]
    pub enum ToneSourceMessage {}

    impl AudioNode for ToneSource {
        type Message = ToneSourceMessage;

        fn process(
            &mut self,
            _ctx: &ProcessContext,
            _messages: impl Iterator<Item = ToneSourceMessage>,
            _inputs: &[Input],
            outputs: &mut [Buffer],
        ) {
            self.generator.drain(&mut self.commands);
            if let Some(output) = outputs.first_mut() {
                self.generator.fill(output);
            }
        }

        fn num_outputs(&self) -> usize {
            1
        }
    }

    pub struct ToneAudio {
        klingt: Klingt,
        sample_rate: u32,
        #[allow(dead_code)]
        source_handle: Handle<ToneSourceMessage>,
        start_time: Instant,
        blocks_processed: u64,
    }

    impl ToneAudio {
        pub fn new(volume: f32) -> Option<(Self, RingSpeaker)> {
            let device = CpalDevice::default_output()?;
            let sample_rate = device.sample_rate();
            let mut klingt = Klingt::new(sample_rate).with_output(device.create_sink());

            let (speaker, commands) = tone_ring(64);
            let source = ToneSource {
                generator: ToneGenerator::new(sample_rate, volume),
                commands,
            };
            let source_handle = klingt.add(source);
            klingt.output(&source_handle);

            let audio = Self {
                klingt,
                sample_rate,
                source_handle,
                start_time: Instant::now(),
                blocks_processed: 0,
            };
            Some((audio, speaker))
        }

        pub fn process_audio(&mut self) {
            let elapsed = self.start_time.elapsed().as_secs_f64();
            let target_blocks = (elapsed * self.sample_rate as f64 / BLOCK) as u64 + LEAD_BLOCKS;

            while self.blocks_processed < target_blocks {
                self.klingt.process();
                self.blocks_processed += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_always_yields_a_speaker() {
        let (mut out, mut speaker) = AudioOut::open(0.0);
        speaker.stop();
        out.pump();
        if !cfg!(feature = "sound") {
            assert!(!out.has_engine());
        }
    }
}
