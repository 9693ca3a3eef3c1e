//! Tiny sprites decoded from ASCII art.
//!
//! One character per pixel, rows separated by newlines. Characters are
//! looked up in the caller's palette first, then in [`DEFAULT_PALETTE`];
//! anything else decodes to opaque black.

use alloc::vec;
use alloc::vec::Vec;
use crate::color::Color;

/// Character to color mapping used by [`Bitmap::from_ascii_art`].
pub type Palette<'a> = &'a [(char, Color)];

pub const DEFAULT_PALETTE: Palette<'static> = &[
    (' ', Color::WHITE),
    ('R', Color::RED),
    ('G', Color::GREEN),
    ('B', Color::BLUE),
    ('.', Color::GREY),
    ('Y', Color::YELLOW),
    ('C', Color::CYAN),
    ('M', Color::MAGENTA),
    ('r', Color::rgb(128, 0, 0)),
    ('g', Color::rgb(0, 128, 0)),
    ('b', Color::rgb(0, 0, 128)),
    ('y', Color::rgb(128, 128, 0)),
    ('c', Color::rgb(0, 128, 128)),
    ('m', Color::rgb(128, 0, 128)),
    ('P', Color::PINK),
    ('#', Color::BLACK),
];

/// Anything pixels can be written into. Writes outside the surface are ignored.
pub trait Canvas {
    fn set_pixel(&mut self, x: i32, y: i32, color: Color);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width * height],
        }
    }

    /// Decodes `art` with `palette` layered over the default palette.
    ///
    /// Empty lines before the first and after the last row are dropped; a
    /// line of spaces is a row of white pixels. Rows shorter than the
    /// widest one leave their missing cells black.
    pub fn from_ascii_art(art: &str, palette: Palette) -> Self {
        let mut lines: Vec<&str> = art.split('\n').map(|l| l.trim_end_matches('\r')).collect();
        while lines.first().is_some_and(|l| l.is_empty()) {
            lines.remove(0);
        }
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let mut bitmap = Bitmap::new(width, lines.len());

        for (y, line) in lines.iter().enumerate() {
            for (x, c) in line.chars().enumerate() {
                bitmap.put(x, y, lookup(palette, c));
            }
        }

        bitmap
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Copies the `width`×`height` region at (`x`, `y`) into `target` at its origin.
    pub fn blit<C: Canvas + ?Sized>(&self, x: usize, y: usize, width: usize, height: usize, target: &mut C) {
        self.blit_at(x, y, width, height, target, 0, 0);
    }

    /// Copies the `width`×`height` region at (`x`, `y`) into `target` at
    /// (`dest_x`, `dest_y`). The region is clamped to the bitmap; cells
    /// landing outside `target` are dropped.
    #[allow(clippy::too_many_arguments)]
    pub fn blit_at<C: Canvas + ?Sized>(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        target: &mut C,
        dest_x: i32,
        dest_y: i32,
    ) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);

        for (row, src_y) in (y..y_end).enumerate() {
            for (col, src_x) in (x..x_end).enumerate() {
                let color = self.pixels[src_x + src_y * self.width];
                target.set_pixel(dest_x + col as i32, dest_y + row as i32, color);
            }
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        (x < self.width && y < self.height).then_some(x + y * self.width)
    }

    fn put(&mut self, x: usize, y: usize, color: Color) {
        self.pixels[x + y * self.width] = color;
    }
}

impl Canvas for Bitmap {
    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }
}

fn lookup(palette: Palette, c: char) -> Color {
    palette
        .iter()
        .chain(DEFAULT_PALETTE)
        .find(|(key, _)| *key == c)
        .map_or(Color::BLACK, |(_, color)| *color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_with_default_palette() {
        let bitmap = Bitmap::from_ascii_art("R G", &[]);
        assert_eq!((bitmap.width(), bitmap.height()), (3, 1));
        assert_eq!(bitmap.pixel(0, 0), Some(Color::RED));
        assert_eq!(bitmap.pixel(1, 0), Some(Color::WHITE));
        assert_eq!(bitmap.pixel(2, 0), Some(Color::GREEN));
    }

    #[test]
    fn strips_surrounding_empty_lines_and_pads_short_rows() {
        let bitmap = Bitmap::from_ascii_art("\n\nYY\nY\n\n", &[]);
        assert_eq!((bitmap.width(), bitmap.height()), (2, 2));
        assert_eq!(bitmap.pixel(1, 1), Some(Color::BLACK));
        assert_eq!(bitmap.pixel(0, 1), Some(Color::YELLOW));
    }

    #[test]
    fn custom_palette_overrides_default() {
        let bitmap = Bitmap::from_ascii_art("#.@", &[('#', Color::ORANGE), ('@', Color::CYAN)]);
        assert_eq!(bitmap.pixel(0, 0), Some(Color::ORANGE));
        assert_eq!(bitmap.pixel(1, 0), Some(Color::GREY));
        assert_eq!(bitmap.pixel(2, 0), Some(Color::CYAN));
    }

    #[test]
    fn unknown_characters_are_black() {
        let bitmap = Bitmap::from_ascii_art("?z", &[]);
        assert_eq!(bitmap.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(bitmap.pixel(1, 0), Some(Color::BLACK));
    }

    #[test]
    fn empty_art_is_empty() {
        let bitmap = Bitmap::from_ascii_art("\n\n", &[]);
        assert_eq!((bitmap.width(), bitmap.height()), (0, 0));
    }

    #[test]
    fn set_pixel_ignores_out_of_bounds() {
        let mut bitmap = Bitmap::new(2, 2);
        bitmap.set_pixel(-1, 0, Color::RED);
        bitmap.set_pixel(2, 1, Color::RED);
        bitmap.set_pixel(1, 1, Color::BLUE);
        assert_eq!(bitmap, {
            let mut expected = Bitmap::new(2, 2);
            expected.put(1, 1, Color::BLUE);
            expected
        });
        assert_eq!(bitmap.pixel(5, 5), None);
    }

    #[test]
    fn blit_copies_sub_region() {
        let source = Bitmap::from_ascii_art("RGB\nCMY\nrgb", &[]);
        let mut target = Bitmap::new(2, 2);
        source.blit(1, 1, 2, 2, &mut target);
        assert_eq!(target.pixel(0, 0), Some(Color::MAGENTA));
        assert_eq!(target.pixel(1, 0), Some(Color::YELLOW));
        assert_eq!(target.pixel(0, 1), Some(Color::rgb(0, 128, 0)));
        assert_eq!(target.pixel(1, 1), Some(Color::rgb(0, 0, 128)));
    }

    #[test]
    fn blit_clamps_oversized_region() {
        let source = Bitmap::from_ascii_art("RG", &[]);
        let mut target = Bitmap::new(4, 4);
        source.blit(1, 0, 10, 10, &mut target);
        assert_eq!(target.pixel(0, 0), Some(Color::GREEN));
        assert_eq!(target.pixel(1, 0), Some(Color::BLACK));
        assert_eq!(target.pixel(0, 1), Some(Color::BLACK));

        // starting past the edge copies nothing
        source.blit(7, 7, 2, 2, &mut target);
        assert_eq!(target.pixel(0, 0), Some(Color::GREEN));
    }

    #[test]
    fn blit_at_offsets_and_drops_outside_cells() {
        let source = Bitmap::from_ascii_art("RG\nBY", &[]);
        let mut target = Bitmap::new(2, 2);
        source.blit_at(0, 0, 2, 2, &mut target, 1, -1);
        assert_eq!(target.pixel(1, 0), Some(Color::BLUE));
        assert_eq!(target.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(target.pixel(0, 1), Some(Color::BLACK));
    }
}
