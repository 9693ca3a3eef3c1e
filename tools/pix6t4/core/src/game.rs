use alloc::boxed::Box;
use crate::color::Color;
use crate::device::Device;
use crate::error::Error;
use crate::frame::{HEIGHT, WIDTH};
use crate::inputs::Button;

pub const DEFAULT_PRIORITY: i32 = 1000;

/// Builds a fresh game instance. The host resolves the list of factories;
/// the console only orders what it is given.
pub type GameFactory = fn() -> Box<dyn Game>;

/// A cartridge, in spirit.
///
/// While the console is browsing it repeatedly asks the current game for
/// its [`Game::title_screen`]. START calls [`Game::start`] once and from
/// then on [`Game::tick`] runs every frame until SELECT drops back to
/// browsing. `tick` must return promptly; nothing else runs until it does.
pub trait Game {
    fn name(&self) -> &'static str;

    /// Lower sorts first in the game list.
    fn priority(&self) -> i32 {
        DEFAULT_PRIORITY
    }

    /// Paints a static screen. Called every tick while browsing.
    fn title_screen(&mut self, device: &mut Device) -> Result<(), Error> {
        checkerboard(device);
        Ok(())
    }

    /// Resets all game state for a new round of play.
    fn start(&mut self, _device: &mut Device) -> Result<(), Error> {
        Ok(())
    }

    /// One frame of play. Every game has to provide this.
    fn tick(&mut self, _device: &mut Device) -> Result<(), Error> {
        Err(Error::Unimplemented { game: self.name(), method: "tick" })
    }

    fn button_pressed(&mut self, _button: Button, _device: &mut Device) -> Result<(), Error> {
        Ok(())
    }

    fn button_released(&mut self, _button: Button, _device: &mut Device) -> Result<(), Error> {
        Ok(())
    }
}

/// The fallback title screen.
pub fn checkerboard(device: &mut Device) {
    for y in 0..HEIGHT as i32 {
        for x in 0..WIDTH as i32 {
            let color = if (x + y) % 2 == 0 { Color::WHITE } else { Color::BLACK };
            device.plot(x, y, color);
        }
    }
}
