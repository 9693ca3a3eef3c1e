use bitflags::bitflags;

/// The ten buttons of the console, in keypad order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Y,
    B,
    X,
    A,
    Select,
    Start,
}

impl Button {
    pub const ALL: [Button; 10] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Y,
        Button::B,
        Button::X,
        Button::A,
        Button::Select,
        Button::Start,
    ];

    /// The d-pad direction this button contributes, empty for the other buttons.
    pub const fn direction(self) -> Direction {
        match self {
            Button::Up => Direction::NORTH,
            Button::Down => Direction::SOUTH,
            Button::Left => Direction::WEST,
            Button::Right => Direction::EAST,
            _ => Direction::empty(),
        }
    }

    pub const fn is_dpad(self) -> bool {
        matches!(self, Button::Up | Button::Down | Button::Left | Button::Right)
    }
}

bitflags! {
    /// Directions currently held on the d-pad. Diagonals are unions; opposite
    /// directions may be held together and are left to games to resolve.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Direction: u8 {
        const NORTH = 0x01;
        const SOUTH = 0x02;
        const EAST  = 0x04;
        const WEST  = 0x08;

        const NORTH_EAST = Self::NORTH.bits() | Self::EAST.bits();
        const NORTH_WEST = Self::NORTH.bits() | Self::WEST.bits();
        const SOUTH_EAST = Self::SOUTH.bits() | Self::EAST.bits();
        const SOUTH_WEST = Self::SOUTH.bits() | Self::WEST.bits();
    }
}

impl Direction {
    /// Unit step as `(dx, dy)`, with y growing downwards. Opposites cancel.
    pub fn delta(self) -> (i32, i32) {
        let axis = |neg: Direction, pos: Direction| {
            self.contains(pos) as i32 - self.contains(neg) as i32
        };
        (axis(Direction::WEST, Direction::EAST), axis(Direction::NORTH, Direction::SOUTH))
    }
}

/// Held state of the d-pad and the four face buttons.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Gamepad {
    pub direction: Direction,
    pub y: bool,
    pub b: bool,
    pub x: bool,
    pub a: bool,
}

impl Gamepad {
    pub fn press(&mut self, button: Button) {
        self.set(button, true);
    }

    pub fn release(&mut self, button: Button) {
        self.set(button, false);
    }

    fn set(&mut self, button: Button, held: bool) {
        match button {
            Button::Y => self.y = held,
            Button::B => self.b = held,
            Button::X => self.x = held,
            Button::A => self.a = held,
            Button::Select | Button::Start => {}
            dpad => self.direction.set(dpad.direction(), held),
        }
    }

    /// Select and start are edge-only; they never read as held.
    pub fn is_held(&self, button: Button) -> bool {
        match button {
            Button::Y => self.y,
            Button::B => self.b,
            Button::X => self.x,
            Button::A => self.a,
            Button::Select | Button::Start => false,
            dpad => self.direction.contains(dpad.direction()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonals_are_unions() {
        let mut pad = Gamepad::default();
        pad.press(Button::Up);
        pad.press(Button::Right);
        assert_eq!(pad.direction, Direction::NORTH_EAST);
        assert_eq!(pad.direction.delta(), (1, -1));

        pad.release(Button::Up);
        assert_eq!(pad.direction, Direction::EAST);
    }

    #[test]
    fn opposite_directions_may_be_held_together() {
        let mut pad = Gamepad::default();
        pad.press(Button::Up);
        pad.press(Button::Down);
        assert_eq!(pad.direction, Direction::NORTH | Direction::SOUTH);
        assert_eq!(pad.direction.delta(), (0, 0));
        assert!(pad.is_held(Button::Up) && pad.is_held(Button::Down));
    }

    #[test]
    fn face_buttons_latch() {
        let mut pad = Gamepad::default();
        pad.press(Button::A);
        pad.press(Button::Start);
        assert!(pad.a && !pad.b);
        assert!(!pad.is_held(Button::Start));
        pad.release(Button::A);
        assert_eq!(pad, Gamepad::default());
    }
}
