use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use log::{debug, info, warn};
use crate::audio::Speaker;
use crate::device::Device;
use crate::error::Error;
use crate::frame::{Display, Frame};
use crate::game::{Game, GameFactory};
use crate::inputs::Button;

/// The console run-time.
///
/// Browsing: the current game paints its title screen every tick; SELECT
/// and d-pad releases move through the game list, START starts the game.
/// Playing: the current game ticks and receives every button event except
/// SELECT, which returns to browsing. The START press that begins a game is
/// its first event. Held-button state is tracked in both.
pub struct Console<D: Display> {
    device: Device,
    display: D,
    games: Vec<Box<dyn Game>>,
    current: usize,
    running: bool,
}

impl<D: Display> Console<D> {
    /// Games are ordered by ascending priority; equal priorities keep the given order.
    pub fn new(display: D, speaker: Box<dyn Speaker>, mut games: Vec<Box<dyn Game>>) -> Self {
        games.sort_by_key(|game| game.priority());
        info!("console up with {} games", games.len());
        for (i, game) in games.iter().enumerate() {
            debug!(" - {i}: {} (priority {})", game.name(), game.priority());
        }

        Self {
            device: Device::new(speaker),
            display,
            games,
            current: 0,
            running: false,
        }
    }

    pub fn from_factories(display: D, speaker: Box<dyn Speaker>, factories: &[GameFactory]) -> Self {
        Self::new(display, speaker, factories.iter().map(|make| make()).collect())
    }

    /// One frame: run the current game (or its title screen), then hand
    /// the frame to the display.
    ///
    /// A failing game is dropped back to browsing; the error is returned
    /// after the frame has been shown.
    pub fn tick(&mut self) -> Result<(), Error> {
        let result = match self.games.get_mut(self.current) {
            None => Ok(()),
            Some(game) if self.running => game.tick(&mut self.device),
            Some(game) => game.title_screen(&mut self.device),
        };

        if let Err(e) = &result {
            if self.running {
                warn!("{} failed, back to the title screens: {e}", self.games[self.current].name());
                self.running = false;
            }
        }

        self.display.show(&self.device.frame, self.device.brightness());
        result
    }

    pub fn button_pressed(&mut self, button: Button) -> Result<(), Error> {
        self.device.gamepad.press(button);
        if self.games.is_empty() {
            return Ok(());
        }

        match button {
            Button::Select => {
                if self.running {
                    debug!("leaving {}", self.games[self.current].name());
                    self.running = false;
                } else {
                    self.step(1);
                }
                Ok(())
            }
            Button::Start if !self.running => {
                self.start_current()?;
                self.games[self.current].button_pressed(button, &mut self.device)
            }
            _ if self.running => self.games[self.current].button_pressed(button, &mut self.device),
            _ => Ok(()),
        }
    }

    pub fn button_released(&mut self, button: Button) -> Result<(), Error> {
        self.device.gamepad.release(button);
        if self.games.is_empty() {
            return Ok(());
        }

        match button {
            Button::Select => Ok(()),
            _ if self.running => self.games[self.current].button_released(button, &mut self.device),
            Button::Up | Button::Left => {
                self.step(-1);
                Ok(())
            }
            Button::Down | Button::Right => {
                self.step(1);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Moves to the next game while browsing. Returns false while playing.
    pub fn next_game(&mut self) -> bool {
        !self.running && self.step(1)
    }

    /// Moves to the previous game while browsing. Returns false while playing.
    pub fn previous_game(&mut self) -> bool {
        !self.running && self.step(-1)
    }

    fn step(&mut self, offset: isize) -> bool {
        let count = self.games.len();
        if count == 0 {
            return false;
        }
        self.current = (self.current as isize + offset).rem_euclid(count as isize) as usize;
        debug!("selected {}", self.games[self.current].name());
        true
    }

    fn start_current(&mut self) -> Result<(), Error> {
        let game = &mut self.games[self.current];
        info!("starting {}", game.name());
        game.start(&mut self.device)?;
        self.running = true;
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_game(&self) -> Option<&dyn Game> {
        self.games.get(self.current).map(|game| game.as_ref())
    }

    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    pub fn game_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.games.iter().map(|game| game.name())
    }

    pub fn frame(&self) -> &Frame {
        &self.device.frame
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut Device {
        &mut self.device
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}

impl<D: Display> Debug for Console<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Console")
            .field("device", &self.device)
            .field("current", &self.current)
            .field("running", &self.running)
            .field("games", &self.games.len())
            .finish()
    }
}
