//! Shared entity interface and the ordered roster
//!
//! Each stage keeps its entities in typed fields and a `Roster` of slots that
//! fixes the update and draw order. Sprites added later draw on top.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::sprite::SpriteKind;

/// One item of a rendered frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Sprite { kind: SpriteKind, rect: Rect },
    Text { text: String, center: IVec2 },
}

/// Behaviour common to everything a stage advances and draws
pub trait Entity {
    /// Advance one simulation tick
    fn tick(&mut self);

    /// Collision box in screen space
    fn bounds(&self) -> Rect;

    /// False once the entity should leave the roster
    fn is_alive(&self) -> bool {
        true
    }

    /// Append this entity's visuals to the frame
    fn draw(&self, out: &mut Vec<DrawCommand>);
}

/// Roster entry naming an entity owned by the stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    Score,
    HighScore,
    Lives,
    StartPortal,
    EndPortal,
    Dragon,
    Treasure(usize),
    Fireball(u32),
    Player,
}

/// Ordered set of active slots
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    slots: Vec<Slot>,
}

impl Roster {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Append a slot; a slot already present keeps its position
    pub fn push(&mut self, slot: Slot) {
        if !self.contains(slot) {
            self.slots.push(slot);
        }
    }

    pub fn remove(&mut self, slot: Slot) {
        self.slots.retain(|s| *s != slot);
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.slots.contains(&slot)
    }

    pub fn retain(&mut self, keep: impl FnMut(&Slot) -> bool) {
        self.slots.retain(keep);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Snapshot of the current order (the roster may change while iterating)
    pub fn order(&self) -> Vec<Slot> {
        self.slots.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_insertion_order() {
        let mut roster = Roster::new();
        roster.push(Slot::Score);
        roster.push(Slot::StartPortal);
        roster.push(Slot::Player);
        roster.push(Slot::Fireball(1));
        assert_eq!(
            roster.order(),
            vec![Slot::Score, Slot::StartPortal, Slot::Player, Slot::Fireball(1)]
        );
    }

    #[test]
    fn test_readded_slot_goes_to_the_end() {
        let mut roster = Roster::new();
        roster.push(Slot::Player);
        roster.push(Slot::Fireball(3));
        roster.remove(Slot::Player);
        roster.push(Slot::Player);
        assert_eq!(roster.order(), vec![Slot::Fireball(3), Slot::Player]);
    }

    #[test]
    fn test_duplicate_push_is_ignored() {
        let mut roster = Roster::new();
        roster.push(Slot::Dragon);
        roster.push(Slot::Dragon);
        assert_eq!(roster.len(), 1);
    }
}
