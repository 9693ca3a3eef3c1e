use pix6t4_core::frame::{Display, Frame, HEIGHT, WIDTH};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

/// Terminal cells per LED, horizontally. Cells are roughly twice as tall as wide.
pub const LED_WIDTH: u16 = 2;
pub const MATRIX_WIDTH: u16 = WIDTH as u16 * LED_WIDTH;
pub const MATRIX_HEIGHT: u16 = HEIGHT as u16;

/// The unlit board between the LEDs.
pub const BACKGROUND: Color = Color::Rgb(32, 32, 32);

/// Console display that keeps the last frame around for the next redraw.
#[derive(Debug)]
pub struct MatrixScreen {
    frame: Frame,
    brightness: f32,
    frames_shown: u64,
}

impl MatrixScreen {
    pub fn new() -> Self {
        Self {
            frame: Frame::new(),
            brightness: 1.0,
            frames_shown: 0,
        }
    }

    pub fn frames_shown(&self) -> u64 {
        self.frames_shown
    }

    pub fn widget(&self) -> LedMatrix<'_> {
        LedMatrix { frame: &self.frame, brightness: self.brightness }
    }
}

impl Display for MatrixScreen {
    fn show(&mut self, frame: &Frame, brightness: f32) {
        self.frame = *frame;
        self.brightness = brightness;
        self.frames_shown += 1;
    }
}

pub struct LedMatrix<'a> {
    frame: &'a Frame,
    brightness: f32,
}

impl Widget for LedMatrix<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(BACKGROUND));

        for (i, lit) in self.frame.dimmed(self.brightness).enumerate() {
            let (x, y) = ((i % WIDTH) as u16, (i / WIDTH) as u16);
            let led = Rect::new(area.x + x * LED_WIDTH, area.y + y, LED_WIDTH, 1);
            if led.right() > area.right() || led.bottom() > area.bottom() {
                continue;
            }
            buf.set_style(led, Style::default().bg(Color::from_u32(lit.rgb24())));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pix6t4_core::Color as Led;

    #[test]
    fn leds_are_two_cells_wide_and_dimmed() {
        let mut screen = MatrixScreen::new();
        let mut frame = Frame::new();
        frame.plot(1, 2, Led::WHITE);
        screen.show(&frame, 0.5);

        let area = Rect::new(0, 0, MATRIX_WIDTH, MATRIX_HEIGHT);
        let mut buf = Buffer::empty(area);
        screen.widget().render(area, &mut buf);

        let grey = Color::Rgb(127, 127, 127);
        assert_eq!(buf[(2, 2)].bg, grey);
        assert_eq!(buf[(3, 2)].bg, grey);
        assert_eq!(buf[(4, 2)].bg, Color::Rgb(0, 0, 0));
        assert_eq!(screen.frames_shown(), 1);
    }

    #[test]
    fn small_areas_are_clipped() {
        let screen = MatrixScreen::new();
        let area = Rect::new(0, 0, 5, 3);
        let mut buf = Buffer::empty(area);
        screen.widget().render(area, &mut buf);

        assert_eq!(buf[(3, 0)].bg, Color::Rgb(0, 0, 0));
        assert_eq!(buf[(4, 0)].bg, BACKGROUND);
    }
}
