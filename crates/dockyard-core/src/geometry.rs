use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Axis-aligned rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Inclusive containment test on all four edges.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True when the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Position of `point` relative to this rectangle, in the 0..1 range when inside.
    pub fn relative(&self, point: Vec2) -> Option<Vec2> {
        if self.is_empty() {
            return None;
        }
        Some(Vec2::new(
            (point.x - self.x) / self.width,
            (point.y - self.y) / self.height,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let rect = Rect::new(10.0, 10.0, 100.0, 50.0);
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(110.0, 60.0)));
        assert!(!rect.contains(Vec2::new(110.1, 60.0)));
    }

    #[test]
    fn test_relative_position() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        let rel = rect.relative(Vec2::new(50.0, 75.0)).unwrap();
        assert!((rel.x - 0.25).abs() < f32::EPSILON);
        assert!((rel.y - 0.75).abs() < f32::EPSILON);

        assert!(Rect::new(0.0, 0.0, 0.0, 10.0).relative(Vec2::ZERO).is_none());
    }
}
