//! Axis-aligned rectangles in screen space
//!
//! Screen coordinates grow right and down. Every entity's collision box is a
//! `Rect`; overlap is the standard AABB test where touching edges don't count.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Integer rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub pos: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            pos: IVec2::new(left, top),
            size: IVec2::new(width, height),
        }
    }

    /// Build a rect of `size` whose bottom-left corner sits at `anchor`
    pub fn from_left_bottom(anchor: IVec2, size: IVec2) -> Self {
        Self {
            pos: IVec2::new(anchor.x, anchor.y - size.y),
            size,
        }
    }

    /// Build a rect of `size` centred on `center`
    pub fn from_center(center: IVec2, size: IVec2) -> Self {
        Self {
            pos: center - size / 2,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.size.y
    }

    pub fn center(&self) -> IVec2 {
        self.pos + self.size / 2
    }

    pub fn set_left(&mut self, left: i32) {
        self.pos.x = left;
    }

    pub fn set_right(&mut self, right: i32) {
        self.pos.x = right - self.size.x;
    }

    pub fn set_top(&mut self, top: i32) {
        self.pos.y = top;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.pos.y = bottom - self.size.y;
    }

    /// Swap in a new size, keeping the bottom-left corner fixed
    pub fn resize_from_bottom_left(&mut self, size: IVec2) {
        let bottom = self.bottom();
        self.size = size;
        self.set_bottom(bottom);
    }

    /// AABB overlap test (shared edges are not an overlap)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_from_left_bottom() {
        let r = Rect::from_left_bottom(IVec2::new(599, 312), IVec2::new(20, 35));
        assert_eq!(r.left(), 599);
        assert_eq!(r.right(), 619);
        assert_eq!(r.top(), 277);
        assert_eq!(r.bottom(), 312);
        assert_eq!(r.center(), IVec2::new(609, 294));
    }

    #[test]
    fn test_intersects_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let right_neighbour = Rect::new(10, 0, 10, 10);
        let below = Rect::new(0, 10, 10, 10);
        assert!(!a.intersects(&right_neighbour));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_resize_keeps_bottom_left() {
        let mut r = Rect::from_left_bottom(IVec2::new(40, 312), IVec2::new(26, 42));
        r.resize_from_bottom_left(IVec2::new(30, 26));
        assert_eq!(r.left(), 40);
        assert_eq!(r.bottom(), 312);
        assert_eq!(r.height(), 26);
    }

    #[test]
    fn test_setters() {
        let mut r = Rect::new(0, 0, 26, 42);
        r.set_right(598);
        r.set_bottom(312);
        assert_eq!(r.left(), 572);
        assert_eq!(r.top(), 270);
    }
}
