//! The games that ship with the console.

use alloc::boxed::Box;
use alloc::vec::Vec;
use crate::game::Game;

pub mod attract_mode;
pub mod ms_pixman;
pub mod settings;
pub mod snake;

pub use attract_mode::AttractMode;
pub use ms_pixman::MsPixMan;
pub use settings::Settings;
pub use snake::Snake;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    AttractMode,
    MsPixMan,
    Settings,
    Snake,
}

impl Builtin {
    /// Discovery order; the console sorts by priority afterwards.
    pub const ALL: [Builtin; 4] = [
        Builtin::AttractMode,
        Builtin::MsPixMan,
        Builtin::Settings,
        Builtin::Snake,
    ];

    /// `seed` feeds the games that roll dice.
    pub fn create(self, seed: u64) -> Box<dyn Game> {
        match self {
            Builtin::AttractMode => Box::new(AttractMode::new(seed)),
            Builtin::MsPixMan => Box::new(MsPixMan::new()),
            Builtin::Settings => Box::new(Settings::new()),
            Builtin::Snake => Box::new(Snake::new(seed)),
        }
    }
}

pub fn builtin_games(seed: u64) -> Vec<Box<dyn Game>> {
    Builtin::ALL.iter().map(|builtin| builtin.create(seed)).collect()
}
