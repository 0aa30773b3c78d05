//! Logical input
//!
//! Platform layers translate device events into these keys. The simulation
//! never sees physical key codes.

use serde::{Deserialize, Serialize};

/// Game keys after binding (A/Left, D/Right, W/Up, S/Down, Space)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
}

impl Key {
    pub const ALL: [Key; 5] = [Key::Left, Key::Right, Key::Up, Key::Down, Key::Space];

    fn bit(self) -> u8 {
        match self {
            Key::Left => 1,
            Key::Right => 1 << 1,
            Key::Up => 1 << 2,
            Key::Down => 1 << 3,
            Key::Space => 1 << 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
}

/// Snapshot of which keys are currently held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeldKeys(u8);

impl HeldKeys {
    pub fn none() -> Self {
        Self(0)
    }

    pub fn with(mut self, key: Key) -> Self {
        self.press(key);
        self
    }

    pub fn press(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn release(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.into_iter().filter(|k| self.is_held(*k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut held = HeldKeys::none();
        held.press(Key::Left);
        held.press(Key::Down);
        assert!(held.is_held(Key::Left));
        assert!(!held.is_held(Key::Right));
        held.release(Key::Left);
        assert!(!held.is_held(Key::Left));
        assert_eq!(held.iter().collect::<Vec<_>>(), vec![Key::Down]);
    }
}
