use core::fmt::{Display, Formatter};
use crate::color::Color;

/// A numeric argument fell outside its documented range.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DomainError {
    /// Alpha must be within `0.0..=1.0`.
    Alpha(f32),
    /// Brightness must be within `0.0..=1.0`.
    Brightness(f32),
    /// Hue must be within `0.0..360.0`.
    Hue(f32),
    /// Saturation must be within `0.0..=100.0`.
    Saturation(f32),
    /// Lightness must be within `0.0..=100.0`.
    Lightness(f32),
    /// `paint_on` needs a fully opaque background.
    TranslucentBackground(Color),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            DomainError::Alpha(v) => write!(f, "alpha {v} is outside 0..=1"),
            DomainError::Brightness(v) => write!(f, "brightness {v} is outside 0..=1"),
            DomainError::Hue(v) => write!(f, "hue {v} is outside 0..360"),
            DomainError::Saturation(v) => write!(f, "saturation {v} is outside 0..=100"),
            DomainError::Lightness(v) => write!(f, "lightness {v} is outside 0..=100"),
            DomainError::TranslucentBackground(c) => {
                write!(f, "cannot paint on translucent background {c:?}")
            }
        }
    }
}

impl core::error::Error for DomainError {}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Error {
    Domain(DomainError),
    /// A game left a mandatory method at its default.
    Unimplemented { game: &'static str, method: &'static str },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Domain(e) => Display::fmt(e, f),
            Error::Unimplemented { game, method } => {
                write!(f, "{game} does not implement `{method}`")
            }
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::Domain(e) => Some(e),
            Error::Unimplemented { .. } => None,
        }
    }
}

impl From<DomainError> for Error {
    fn from(e: DomainError) -> Self {
        Error::Domain(e)
    }
}
