//! RGBA color value packed as `0xRRGGBBAA`.
//!
//! Every transform returns a new value. Red, green and blue are `0..=255`,
//! alpha is exposed as a float in `0.0..=1.0` and stored as a byte.

use core::fmt::{Debug, Formatter};
use crate::error::DomainError;

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Color(u32);

/// Hue in degrees `[0, 360)`, saturation and lightness in percent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hsla {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

impl Color {
    pub const BLACK: Color = Color(0x000000FF);
    pub const RED: Color = Color(0xFF0000FF);
    pub const GREEN: Color = Color(0x00FF00FF);
    pub const BLUE: Color = Color(0x0000FFFF);
    pub const YELLOW: Color = Color(0xFFFF00FF);
    pub const CYAN: Color = Color(0x00FFFFFF);
    pub const MAGENTA: Color = Color(0xFF00FFFF);
    pub const WHITE: Color = Color(0xFFFFFFFF);
    pub const GREY: Color = Color(0x808080FF);
    pub const ORANGE: Color = Color(0xFFA500FF);
    pub const PURPLE: Color = Color(0x800080FF);
    pub const BROWN: Color = Color(0xA52A2AFF);
    pub const PINK: Color = Color(0xFFC0CBFF);
    pub const LIGHT_BLUE: Color = Color(0xADD8E6FF);
    pub const TRANSPARENT: Color = Color(0xFFFFFF00);

    #[inline(always)]
    pub const fn from_u32(value: u32) -> Self {
        Color(value)
    }

    /// Opaque color, usable in const tables.
    #[inline(always)]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Color((red as u32) << 24 | (green as u32) << 16 | (blue as u32) << 8 | 0xFF)
    }

    pub fn from_rgba(red: u8, green: u8, blue: u8, alpha: f32) -> Result<Self, DomainError> {
        let alpha = alpha_byte(alpha).ok_or(DomainError::Alpha(alpha))?;
        Ok(Color(Self::rgb(red, green, blue).0 & 0xFFFFFF00 | alpha as u32))
    }

    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(red, green, blue)
    }

    #[inline(always)]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// `0xRRGGBB`, the word an LED driver consumes.
    #[inline(always)]
    pub const fn rgb24(self) -> u32 {
        self.0 >> 8
    }

    #[inline(always)]
    pub const fn red(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline(always)]
    pub const fn green(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline(always)]
    pub const fn blue(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline(always)]
    pub const fn alpha_byte(self) -> u8 {
        self.0 as u8
    }

    pub fn alpha(self) -> f32 {
        self.alpha_byte() as f32 / 255.0
    }

    pub const fn is_opaque(self) -> bool {
        self.alpha_byte() == 0xFF
    }

    pub fn to_rgba(self) -> (u8, u8, u8, f32) {
        (self.red(), self.green(), self.blue(), self.alpha())
    }

    pub fn with_transparency(self, alpha: f32) -> Result<Self, DomainError> {
        let alpha = alpha_byte(alpha).ok_or(DomainError::Alpha(alpha))?;
        Ok(Color(self.0 & 0xFFFFFF00 | alpha as u32))
    }

    /// Scales red, green and blue by `brightness`, truncating. Alpha is kept.
    pub fn with_brightness(self, brightness: f32) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&brightness) {
            return Err(DomainError::Brightness(brightness));
        }
        Ok(self.scaled(brightness))
    }

    /// Like [`Color::with_brightness`], but clamps instead of failing.
    pub fn dimmed(self, brightness: f32) -> Self {
        let brightness = if brightness.is_nan() { 0.0 } else { brightness.clamp(0.0, 1.0) };
        self.scaled(brightness)
    }

    fn scaled(self, brightness: f32) -> Self {
        let scale = |c: u8| (c as f32 * brightness) as u8;
        Color(
            Self::rgb(scale(self.red()), scale(self.green()), scale(self.blue())).0 & 0xFFFFFF00
                | self.alpha_byte() as u32,
        )
    }

    /// Alpha-composites `self` over an opaque `background`.
    pub fn paint_on(self, background: Color) -> Result<Self, DomainError> {
        if !background.is_opaque() {
            return Err(DomainError::TranslucentBackground(background));
        }
        if self.is_opaque() {
            return Ok(self);
        }

        let a = self.alpha_byte() as u32;
        let mix = |fg: u8, bg: u8| ((fg as u32 * a + bg as u32 * (0xFF - a)) / 0xFF) as u8;
        Ok(Self::rgb(
            mix(self.red(), background.red()),
            mix(self.green(), background.green()),
            mix(self.blue(), background.blue()),
        ))
    }

    pub const fn solidify(self) -> Self {
        Color(self.0 | 0xFF)
    }

    pub fn to_hsla(self) -> Hsla {
        let r = self.red() as f64 / 255.0;
        let g = self.green() as f64 / 255.0;
        let b = self.blue() as f64 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let hue = if delta == 0.0 {
            0.0
        } else if max == r {
            libm::fmod(60.0 * ((g - b) / delta) + 360.0, 360.0)
        } else if max == g {
            libm::fmod(60.0 * ((b - r) / delta) + 120.0, 360.0)
        } else {
            libm::fmod(60.0 * ((r - g) / delta) + 240.0, 360.0)
        };

        let lightness = (max + min) / 2.0;
        let saturation = if delta == 0.0 {
            0.0
        } else {
            delta / (1.0 - libm::fabs(2.0 * lightness - 1.0))
        };

        // f32 rounding may land a hue of 359.99.. on 360
        let hue = hue as f32;
        Hsla {
            hue: if hue >= 360.0 { 0.0 } else { hue },
            saturation: ((saturation * 100.0) as f32).clamp(0.0, 100.0),
            lightness: ((lightness * 100.0) as f32).clamp(0.0, 100.0),
            alpha: self.alpha(),
        }
    }

    pub fn from_hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Result<Self, DomainError> {
        if !(0.0..360.0).contains(&hue) {
            return Err(DomainError::Hue(hue));
        }
        if !(0.0..=100.0).contains(&saturation) {
            return Err(DomainError::Saturation(saturation));
        }
        if !(0.0..=100.0).contains(&lightness) {
            return Err(DomainError::Lightness(lightness));
        }

        let (h, s, l) = (hue as f64, saturation as f64 / 100.0, lightness as f64 / 100.0);
        let c = (1.0 - libm::fabs(2.0 * l - 1.0)) * s;
        let x = c * (1.0 - libm::fabs(libm::fmod(h / 60.0, 2.0) - 1.0));
        let m = l - c / 2.0;

        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let channel = |v: f64| ((v + m) * 255.0) as u8;
        Self::from_rgba(channel(r), channel(g), channel(b), alpha)
    }

    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Result<Self, DomainError> {
        Self::from_hsla(hue, saturation, lightness, 1.0)
    }
}

impl Hsla {
    pub fn to_color(self) -> Result<Color, DomainError> {
        Color::from_hsla(self.hue, self.saturation, self.lightness, self.alpha)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl Debug for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Color(#{:08X})", self.0)
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Color(value)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

fn alpha_byte(alpha: f32) -> Option<u8> {
    (0.0..=1.0).contains(&alpha).then(|| (alpha * 255.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32, eps: f32) -> bool {
        libm::fabsf(a - b) < eps
    }

    #[test]
    fn color_from_integer() {
        let color = Color::from_u32(0xFF102080);
        assert_eq!(color.red(), 255);
        assert_eq!(color.green(), 16);
        assert_eq!(color.blue(), 32);
        assert!(close(color.alpha(), 0.5, 0.01));
    }

    #[test]
    fn components_from_rgba() {
        let color = Color::from_rgba(100, 200, 255, 0.5).unwrap();
        assert_eq!((color.red(), color.green(), color.blue()), (100, 200, 255));
        assert!(close(color.alpha(), 0.5, 0.01));
        assert_eq!(color, Color::from_rgba(100, 200, 255, 0.5).unwrap());
    }

    #[test]
    fn alpha_round_trips_within_one_step() {
        for step in 0..=100 {
            let alpha = step as f32 / 100.0;
            let color = Color::from_rgba(1, 2, 3, alpha).unwrap();
            assert!(close(color.alpha(), alpha, 1.0 / 255.0 + 1e-6), "alpha {alpha}");
        }
    }

    #[test]
    fn rejects_out_of_range_alpha() {
        assert_eq!(Color::from_rgba(0, 0, 0, 1.5), Err(DomainError::Alpha(1.5)));
        assert_eq!(Color::from_rgba(0, 0, 0, -0.1), Err(DomainError::Alpha(-0.1)));
        assert!(Color::from_rgba(0, 0, 0, f32::NAN).is_err());
        assert!(Color::WHITE.with_transparency(2.0).is_err());
    }

    #[test]
    fn from_rgb_is_opaque() {
        let color = Color::from_rgb(100, 200, 255);
        assert_eq!(color.to_rgba(), (100, 200, 255, 1.0));
    }

    #[test]
    fn transparency_replaces_alpha_only() {
        let color = Color::from_rgba(100, 200, 255, 0.1).unwrap();
        let transparent = color.with_transparency(0.5).unwrap();
        assert!(close(transparent.alpha(), 0.5, 0.01));
        assert_eq!((transparent.red(), transparent.green(), transparent.blue()), (100, 200, 255));
    }

    #[test]
    fn solidify_keeps_rgb() {
        let color = Color::from_rgba(100, 200, 255, 0.5).unwrap();
        let solid = color.solidify();
        assert_eq!(solid.alpha(), 1.0);
        assert_eq!(solid.rgb24(), color.rgb24());
    }

    #[test]
    fn painting_opaque_color_replaces_background() {
        let background = Color::from_rgb(100, 200, 255);
        let color = Color::from_rgb(50, 100, 150);
        assert_eq!(color.paint_on(background), Ok(color));
    }

    #[test]
    fn painting_translucent_color_blends() {
        let color = Color::from_rgba(100, 200, 255, 0.75).unwrap();
        let blended = color.paint_on(Color::from_rgb(50, 100, 150)).unwrap();
        assert_eq!(blended.to_rgba(), (87, 174, 228, 1.0));
    }

    #[test]
    fn painting_on_translucent_background_fails() {
        let background = Color::from_rgba(1, 2, 3, 0.5).unwrap();
        assert_eq!(
            Color::RED.paint_on(background),
            Err(DomainError::TranslucentBackground(background))
        );
    }

    #[test]
    fn brightness_truncates() {
        let color = Color::from_rgb(100, 200, 255).with_brightness(0.5).unwrap();
        assert_eq!((color.red(), color.green(), color.blue()), (50, 100, 127));
        assert!(color.is_opaque());
        assert_eq!(Color::WHITE.with_brightness(1.1), Err(DomainError::Brightness(1.1)));
    }

    #[test]
    fn brightness_keeps_alpha_byte() {
        let color = Color::from_u32(0x102030BF);
        assert_eq!(color.with_brightness(0.25).unwrap().alpha_byte(), 0xBF);
        assert_eq!(color.dimmed(7.0), color);
        assert_eq!(color.dimmed(-1.0).rgb24(), 0);
    }

    #[test]
    fn to_hsla() {
        let hsla = Color::from_rgba(24, 98, 118, 0.5).unwrap().to_hsla();
        assert!(close(hsla.hue, 192.8, 0.1), "{hsla:?}");
        assert!(close(hsla.saturation, 66.2, 0.1), "{hsla:?}");
        assert!(close(hsla.lightness, 27.9, 0.1), "{hsla:?}");
        assert!(close(hsla.alpha, 0.5, 0.01), "{hsla:?}");
    }

    #[test]
    fn achromatic_has_no_hue() {
        let hsla = Color::GREY.to_hsla();
        assert_eq!((hsla.hue, hsla.saturation), (0.0, 0.0));
        assert_eq!(Color::WHITE.to_hsla().lightness, 100.0);
    }

    #[test]
    fn from_hsla() {
        let color = Color::from_hsla(192.8, 66.2, 27.9, 0.5).unwrap();
        assert_eq!((color.red(), color.green(), color.blue()), (24, 98, 118));
        assert!(close(color.alpha(), 0.5, 0.01));
    }

    #[test]
    fn from_hsla_validates() {
        assert_eq!(Color::from_hsla(360.0, 50.0, 50.0, 1.0), Err(DomainError::Hue(360.0)));
        assert_eq!(Color::from_hsla(0.0, 101.0, 50.0, 1.0), Err(DomainError::Saturation(101.0)));
        assert_eq!(Color::from_hsla(0.0, 50.0, -1.0, 1.0), Err(DomainError::Lightness(-1.0)));
        assert_eq!(Color::from_hsla(0.0, 50.0, 50.0, 2.0), Err(DomainError::Alpha(2.0)));
    }

    #[test]
    fn primary_hues() {
        assert_eq!(Color::from_hsl(0.0, 100.0, 50.0), Ok(Color::RED));
        assert_eq!(Color::from_hsl(120.0, 100.0, 50.0), Ok(Color::GREEN));
        assert_eq!(Color::from_hsl(240.0, 100.0, 50.0), Ok(Color::BLUE));
    }

    #[test]
    fn hsla_round_trip_is_within_one_per_channel() {
        let mut value: u32 = 0x1234_5678;
        for _ in 0..2000 {
            // xorshift, good enough to wander the cube
            value ^= value << 13;
            value ^= value >> 17;
            value ^= value << 5;
            let color = Color::from_u32(value).solidify();
            let back = color.to_hsla().to_color().unwrap();
            for (a, b) in [
                (color.red(), back.red()),
                (color.green(), back.green()),
                (color.blue(), back.blue()),
            ] {
                assert!(a.abs_diff(b) <= 1, "{color:?} came back as {back:?}");
            }
        }
    }
}
