use log::debug;
use crate::bitmap::Bitmap;
use crate::color::Color;
use crate::device::Device;
use crate::error::Error;
use crate::frame::{HEIGHT, WIDTH};
use crate::game::Game;
use crate::inputs::Button;

const BRIGHTNESS_STEP: f32 = 0.1;

const LIGHT_GREY: Color = Color::rgb(0xB4, 0xB4, 0xB4);
const DARK_GREY: Color = Color::rgb(0x46, 0x46, 0x46);

const TITLE: &str = concat!(
    " . .O . \n",
    ".O.Oo.O.\n",
    " .oooo. \n",
    "Ooo..oO.\n",
    ".Oo..ooO\n",
    " .oooo. \n",
    ".O.oO.O.\n",
    " . O. . \n",
);

const SUN: &str = concat!(
    "o  @   o\n",
    " @ o  @ \n",
    "  o@@o  \n",
    "  @@@@o@\n",
    "@o@@@@  \n",
    "  o@@o  \n",
    " @  o @ \n",
    "o   @  o\n",
);

const SPEAKER_ON: &str = concat!(
    "   o o. \n",
    "  @@  o.\n",
    "@@ @. .o\n",
    "@@ @ o o\n",
    "@@ @ o o\n",
    "@@ @. .o\n",
    "  @@  o \n",
    "   o o. \n",
);

const SPEAKER_OFF: &str = concat!(
    "   o   X\n",
    "  @@  X \n",
    "@@ @ X  \n",
    "@@ @X   \n",
    "@@ X    \n",
    "@@X@    \n",
    " X@@    \n",
    "X  o    \n",
);

/// One page of the settings app.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Brightness,
    Volume,
}

impl Screen {
    pub const ALL: [Screen; 2] = [Screen::Brightness, Screen::Volume];

    fn draw(self, device: &mut Device) {
        let bitmap = match self {
            Screen::Brightness => Bitmap::from_ascii_art(
                SUN,
                &[('@', Color::from_u32(0xFFF200FF)), ('o', Color::from_u32(0xFFF9BDFF))],
            ),
            Screen::Volume => Bitmap::from_ascii_art(
                if device.sound_enabled() { SPEAKER_ON } else { SPEAKER_OFF },
                &[('@', Color::BLACK), ('o', DARK_GREY), ('.', LIGHT_GREY), ('X', Color::RED)],
            ),
        };
        bitmap.blit(0, 0, WIDTH, HEIGHT, &mut device.frame);
    }

    fn up(self, device: &mut Device) {
        match self {
            Screen::Brightness => device.set_brightness(device.brightness() + BRIGHTNESS_STEP),
            Screen::Volume => {
                device.enable_sound(true);
                device.beep(440, 100);
            }
        }
    }

    fn down(self, device: &mut Device) {
        match self {
            Screen::Brightness => device.set_brightness(device.brightness() - BRIGHTNESS_STEP),
            Screen::Volume => device.enable_sound(false),
        }
    }

    fn toggle(self, device: &mut Device) {
        match self {
            Screen::Brightness => {}
            Screen::Volume => {
                device.enable_sound(!device.sound_enabled());
                device.beep(440, 100);
            }
        }
    }
}

/// Console settings: brightness and sound. LEFT/RIGHT flip pages.
#[derive(Debug, Default)]
pub struct Settings {
    screen: usize,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        Screen::ALL[self.screen]
    }
}

impl Game for Settings {
    fn name(&self) -> &'static str {
        "Settings"
    }

    fn priority(&self) -> i32 {
        9000
    }

    fn title_screen(&mut self, device: &mut Device) -> Result<(), Error> {
        Bitmap::from_ascii_art(TITLE, &[('.', LIGHT_GREY), ('o', DARK_GREY), ('O', Color::BLACK)])
            .blit(0, 0, WIDTH, HEIGHT, &mut device.frame);
        Ok(())
    }

    fn start(&mut self, device: &mut Device) -> Result<(), Error> {
        self.screen = 0;
        self.screen().draw(device);
        Ok(())
    }

    fn tick(&mut self, _device: &mut Device) -> Result<(), Error> {
        Ok(())
    }

    fn button_pressed(&mut self, button: Button, device: &mut Device) -> Result<(), Error> {
        let screens = Screen::ALL.len();
        match button {
            Button::Right => self.screen = (self.screen + 1) % screens,
            Button::Left => self.screen = (self.screen + screens - 1) % screens,
            Button::Up => self.screen().up(device),
            Button::Down => self.screen().down(device),
            Button::A => self.screen().toggle(device),
            _ => return Ok(()),
        }
        debug!(
            "settings: {:?}, brightness {:.1}, sound {}",
            self.screen(),
            device.brightness(),
            device.sound_enabled()
        );
        self.screen().draw(device);
        Ok(())
    }
}
