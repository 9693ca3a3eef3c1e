use alloc::boxed::Box;
use core::fmt::{Debug, Formatter};
use crate::audio::{Silent, Speaker, Tone};
use crate::color::Color;
use crate::frame::Frame;
use crate::inputs::{Button, Direction, Gamepad};

/// What a game gets to touch: the frame buffer, the held buttons, and the
/// console-wide brightness and sound settings.
pub struct Device {
    pub frame: Frame,
    pub gamepad: Gamepad,
    brightness: f32,
    sound_enabled: bool,
    speaker: Box<dyn Speaker>,
}

impl Device {
    pub fn new(speaker: Box<dyn Speaker>) -> Self {
        Self {
            frame: Frame::new(),
            gamepad: Gamepad::default(),
            brightness: 1.0,
            sound_enabled: true,
            speaker,
        }
    }

    pub fn cls(&mut self, color: Color) {
        self.frame.cls(color);
    }

    pub fn plot(&mut self, x: i32, y: i32, color: Color) {
        self.frame.plot(x, y, color);
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.frame.pixel(x, y)
    }

    pub fn direction(&self) -> Direction {
        self.gamepad.direction
    }

    pub fn is_held(&self, button: Button) -> bool {
        self.gamepad.is_held(button)
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn set_brightness(&mut self, brightness: f32) {
        self.brightness = if brightness.is_nan() { 0.0 } else { brightness.clamp(0.0, 1.0) };
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn enable_sound(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
        if !enabled {
            self.speaker.stop();
        }
    }

    /// Fire and forget; silently dropped while sound is off.
    pub fn beep(&mut self, frequency_hz: u32, duration_ms: u32) {
        if self.sound_enabled {
            self.speaker.play(Tone::new(frequency_hz, duration_ms));
        }
    }
}

impl Default for Device {
    fn default() -> Self {
        Self::new(Box::new(Silent))
    }
}

impl Debug for Device {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Device")
            .field("gamepad", &self.gamepad)
            .field("brightness", &self.brightness)
            .field("sound_enabled", &self.sound_enabled)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    #[derive(Default, Clone)]
    struct Log(Rc<RefCell<Vec<Option<Tone>>>>);

    impl Speaker for Log {
        fn play(&mut self, tone: Tone) {
            self.0.borrow_mut().push(Some(tone));
        }

        fn stop(&mut self) {
            self.0.borrow_mut().push(None);
        }
    }

    #[test]
    fn beeps_are_dropped_while_muted() {
        let log = Log::default();
        let mut device = Device::new(Box::new(log.clone()));

        device.beep(440, 100);
        device.enable_sound(false);
        device.beep(880, 100);
        device.enable_sound(true);
        device.beep(220, 50);

        assert_eq!(
            *log.0.borrow(),
            [Some(Tone::new(440, 100)), None, Some(Tone::new(220, 50))]
        );
    }

    #[test]
    fn brightness_is_clamped() {
        let mut device = Device::default();
        device.set_brightness(1.2);
        assert_eq!(device.brightness(), 1.0);
        device.set_brightness(-0.3);
        assert_eq!(device.brightness(), 0.0);
    }
}
