use serde::{Deserialize, Serialize};

/// A position on the overlay, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in overlay pixels, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ScreenRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl ScreenRect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_origin_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Edges are inclusive. An inverted rect contains nothing.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right
            && point.y >= self.top
            && point.y <= self.bottom
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_inclusive_edges() {
        let rect = ScreenRect::new(10.0, 20.0, 30.0, 40.0);
        assert!(rect.contains(Point::new(10.0, 20.0)));
        assert!(rect.contains(Point::new(30.0, 40.0)));
        assert!(rect.contains(Point::new(15.0, 35.0)));
        assert!(!rect.contains(Point::new(9.9, 25.0)));
        assert!(!rect.contains(Point::new(20.0, 40.1)));
    }

    #[test]
    fn test_inverted_rect_is_empty() {
        let rect = ScreenRect::new(30.0, 40.0, 10.0, 20.0);
        assert!(!rect.contains(Point::new(20.0, 30.0)));
        assert!(rect.width() < 0.0);
    }

    #[test]
    fn test_from_origin_size() {
        let rect = ScreenRect::from_origin_size(820.0, 95.0, 200.0, 90.0);
        assert_eq!(rect.right, 1020.0);
        assert_eq!(rect.bottom, 185.0);
        assert_eq!(rect.height(), 90.0);
        assert_eq!(rect.origin(), Point::new(820.0, 95.0));
    }
}
