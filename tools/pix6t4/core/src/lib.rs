#![no_std]
extern crate alloc;

pub mod error;
pub mod color;
pub mod bitmap;
pub mod inputs;
pub mod frame;
pub mod audio;
pub mod device;
pub mod game;
pub mod console;
pub mod animation;
pub mod games;

pub use color::Color;
pub use console::Console;
pub use device::Device;
pub use error::{DomainError, Error};
pub use game::Game;
pub use inputs::{Button, Direction};
