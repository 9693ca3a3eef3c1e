mod app;
mod audio;
mod matrix;

use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::{select, Sender};
use pix6t4_core::games::builtin_games;
use pix6t4_core::Console;
use ratatui::crossterm::event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags};
use ratatui::crossterm::{execute, terminal};
use ratatui::DefaultTerminal;
use tracing::{info, warn, Level};
use tracing_subscriber::util::SubscriberInitExt;

use crate::app::Emulator;
use crate::audio::AudioOut;
use crate::matrix::MatrixScreen;

/// How often the audio graph is topped up.
const AUDIO_PUMP: Duration = Duration::from_millis(5);

#[derive(Parser)]
#[command(name = "pix6t4")]
#[command(version, about = "PIX6T4 Color emulator for the terminal", long_about = None)]
struct Cli {
    /// Console ticks per second
    #[arg(long, default_value_t = 20.0)]
    fps: f64,

    /// Initial LED brightness, 0.0 to 1.0
    #[arg(long, default_value_t = 1.0)]
    brightness: f32,

    /// Start with sound off
    #[arg(long)]
    mute: bool,

    /// Square wave volume, 0.0 to 1.0 (only with the `sound` feature)
    #[arg(long, default_value_t = 0.2)]
    volume: f32,

    /// Seed for the games' dice; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here; the terminal is busy drawing
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long, default_value_t = Level::WARN)]
    log_level: Level,
}

fn setup_logging(cli: &Cli) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_ansi(false)
        .compact();

    match &cli.log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).finish().init();
        }
        None => builder.with_writer(std::io::sink).finish().init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    anyhow::ensure!(cli.fps.is_finite() && cli.fps > 0.0, "--fps must be a positive number");
    setup_logging(&cli)?;

    let seed = cli.seed.unwrap_or_else(|| {
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_nanos() as u64)
    });
    info!("seed {seed}");

    let (audio, speaker) = AudioOut::open(cli.volume);
    info!("speaker: {}", if audio.has_engine() { "square wave" } else { "terminal bell" });
    let mut console = Console::new(MatrixScreen::new(), speaker, builtin_games(seed));
    console.device_mut().set_brightness(cli.brightness);
    console.device_mut().enable_sound(!cli.mute);

    let terminal = ratatui::init();
    let key_releases = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
        && execute!(stdout(), PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)).is_ok();
    if !key_releases {
        warn!("terminal does not report key releases, releasing keys after one tick");
    }

    let result = run(terminal, Emulator::new(console, key_releases), audio, cli.fps);

    if key_releases {
        if let Err(e) = execute!(stdout(), PopKeyboardEnhancementFlags) {
            warn!("could not restore keyboard flags: {e}");
        }
    }
    ratatui::restore();
    result
}

fn run(mut terminal: DefaultTerminal, mut app: Emulator, mut audio: AudioOut, fps: f64) -> Result<()> {
    let (tx, rx) = crossbeam_channel::unbounded();
    thread::spawn(move || read_events(tx));

    let ticker = crossbeam_channel::tick(Duration::from_secs_f64(1.0 / fps));
    let pump = crossbeam_channel::tick(AUDIO_PUMP);

    loop {
        select! {
            recv(rx) -> event => app.handle_event(&event?),
            recv(ticker) -> _ => {
                app.tick();
                terminal.draw(|f| app.render(f))?;
            }
            recv(pump) -> _ => audio.pump(),
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

fn read_events(tx: Sender<Event>) {
    loop {
        match event::read() {
            Ok(event) => {
                if tx.send(event).is_err() {
                    return;
                }
            }
            Err(e) => {
                warn!("terminal input failed: {e}");
                return;
            }
        }
    }
}
