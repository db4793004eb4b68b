//! Axis-aligned rectangles for bounding boxes and the arena
//!
//! Screen space: x grows right, y grows down. `x, y` is the top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            x: center.x - size.x / 2.0,
            y: center.y - size.y / 2.0,
            w: size.x,
            h: size.y,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn midright(&self) -> Vec2 {
        Vec2::new(self.right(), self.y + self.h / 2.0)
    }

    pub fn midbottom(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.bottom())
    }

    pub fn midleft(&self) -> Vec2 {
        Vec2::new(self.x, self.y + self.h / 2.0)
    }

    pub fn midtop(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y)
    }

    /// True if the two rectangles overlap by a positive area (touching edges don't count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// True if `other` lies entirely inside this rectangle
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Move this rectangle the minimum distance needed to lie inside `bounds`.
    /// On an axis where it is larger than `bounds` it is centered instead.
    pub fn clamp_inside(&self, bounds: &Rect) -> Rect {
        Rect {
            x: clamp_axis(self.x, self.w, bounds.x, bounds.w),
            y: clamp_axis(self.y, self.h, bounds.y, bounds.h),
            w: self.w,
            h: self.h,
        }
    }
}

fn clamp_axis(start: f32, len: f32, min: f32, span: f32) -> f32 {
    if len >= span {
        min + (span - len) / 2.0
    } else if start < min {
        min
    } else if start + len > min + span {
        min + span - len
    } else {
        start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARENA: Rect = Rect::new(0.0, 0.0, 640.0, 480.0);

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(Vec2::new(100.0, 50.0), Vec2::splat(41.0));
        assert_eq!(r.center(), Vec2::new(100.0, 50.0));
        assert_eq!(r.x, 79.5);
        assert_eq!(r.w, 41.0);
    }

    #[test]
    fn test_intersects_excludes_touching() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(9.0, 9.0, 5.0, 5.0)));
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 5.0, 5.0)));
        assert!(!a.intersects(&Rect::new(-20.0, -20.0, 5.0, 5.0)));
    }

    #[test]
    fn test_clamp_inside() {
        let r = Rect::new(630.0, -5.0, 41.0, 41.0).clamp_inside(&ARENA);
        assert_eq!(r.x, 599.0);
        assert_eq!(r.y, 0.0);
        assert!(ARENA.contains(&r));

        let inside = Rect::new(100.0, 100.0, 41.0, 41.0);
        assert_eq!(inside.clamp_inside(&ARENA), inside);
    }

    #[test]
    fn test_clamp_oversized_centers() {
        let r = Rect::new(0.0, 0.0, 700.0, 10.0).clamp_inside(&ARENA);
        assert_eq!(r.x, -30.0);
    }

    #[test]
    fn test_anchors() {
        assert_eq!(ARENA.center(), Vec2::new(320.0, 240.0));
        assert_eq!(ARENA.midright(), Vec2::new(640.0, 240.0));
        assert_eq!(ARENA.midbottom(), Vec2::new(320.0, 480.0));
        assert_eq!(ARENA.midleft(), Vec2::new(0.0, 240.0));
        assert_eq!(ARENA.midtop(), Vec2::new(320.0, 0.0));
    }
}
