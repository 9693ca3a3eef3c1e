use crate::bitmap::Canvas;
use crate::color::Color;

pub const WIDTH: usize = 8;
pub const HEIGHT: usize = 8;
pub const PIXELS: usize = WIDTH * HEIGHT;

/// The 8×8 LED matrix, stored row-major as `pixels[y][x]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pixels: [[Color; WIDTH]; HEIGHT],
}

/// Render sink: receives the whole frame once per tick.
pub trait Display {
    /// Implementations scale every pixel by `brightness` before showing it.
    fn show(&mut self, frame: &Frame, brightness: f32);
}

impl Frame {
    pub const fn new() -> Self {
        Self::filled(Color::BLACK)
    }

    pub const fn filled(color: Color) -> Self {
        Self { pixels: [[color; WIDTH]; HEIGHT] }
    }

    pub fn cls(&mut self, color: Color) {
        self.pixels = [[color; WIDTH]; HEIGHT];
    }

    pub fn plot(&mut self, x: i32, y: i32, color: Color) {
        if let Some((x, y)) = Self::cell(x, y) {
            self.pixels[y][x] = color;
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        Self::cell(x, y).map(|(x, y)| self.pixels[y][x])
    }

    pub fn rows(&self) -> &[[Color; WIDTH]; HEIGHT] {
        &self.pixels
    }

    /// Pixels scaled by `brightness`, in LED order (row by row).
    pub fn dimmed(&self, brightness: f32) -> impl Iterator<Item = Color> + '_ {
        self.pixels.iter().flatten().map(move |c| c.dimmed(brightness))
    }

    fn cell(x: i32, y: i32) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok().filter(|&x| x < WIDTH)?;
        let y = usize::try_from(y).ok().filter(|&y| y < HEIGHT)?;
        Some((x, y))
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for Frame {
    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.plot(x, y, color);
    }
}
