//! Conversion from the game's metadata space to overlay pixels.
//!
//! The game reports positions in a 0..10000 range with y growing upward. The
//! overlay is a fixed-size canvas whose top and bottom bands are covered by
//! the video player's letterbox, so vertical positions are mapped into the
//! remaining strip.

use serde::{Deserialize, Serialize};

use crate::rect::{Point, ScreenRect};

pub const DEFAULT_CANVAS_WIDTH: f32 = 1024.0;
pub const DEFAULT_CANVAS_HEIGHT: f32 = 768.0;
pub const DEFAULT_LETTERBOX: f32 = 96.0;
pub const METADATA_RANGE: f32 = 10000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenMapping {
    pub width: f32,
    pub height: f32,
    /// Height of each of the top and bottom bands hidden by the player.
    pub letterbox: f32,
    pub range: f32,
}

impl Default for ScreenMapping {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            letterbox: DEFAULT_LETTERBOX,
            range: METADATA_RANGE,
        }
    }
}

impl ScreenMapping {
    pub fn screen_x(&self, value: f32) -> f32 {
        value / self.range * self.width
    }

    pub fn screen_y(&self, value: f32) -> f32 {
        (1.0 - value / self.range) * (self.height - 2.0 * self.letterbox)
    }

    pub fn to_screen(&self, x: f32, y: f32) -> Point {
        Point::new(self.screen_x(x), self.screen_y(y))
    }

    /// Screen rect of an entity whose top-left corner is `(x, y)` in metadata
    /// space. Metadata y points up, so the bottom edge sits at `y - scale_y`.
    pub fn entity_rect(&self, x: f32, y: f32, scale_x: f32, scale_y: f32) -> ScreenRect {
        ScreenRect::new(
            self.screen_x(x),
            self.screen_y(y),
            self.screen_x(x + scale_x),
            self.screen_y(y - scale_y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_mapping() {
        let mapping = ScreenMapping::default();
        assert_eq!(mapping.screen_x(0.0), 0.0);
        assert_eq!(mapping.screen_x(5000.0), 512.0);
        assert_eq!(mapping.screen_x(10000.0), 1024.0);
    }

    #[test]
    fn test_vertical_mapping_flips_and_skips_letterbox() {
        let mapping = ScreenMapping::default();
        // 768 - 2 * 96 = 576 visible rows.
        assert_eq!(mapping.screen_y(10000.0), 0.0);
        assert_eq!(mapping.screen_y(0.0), 576.0);
        assert_eq!(mapping.screen_y(5000.0), 288.0);
    }

    #[test]
    fn test_entity_rect_orientation() {
        let mapping = ScreenMapping::default();
        let rect = mapping.entity_rect(1000.0, 6000.0, 500.0, 1000.0);
        assert!((rect.left - 102.4).abs() < 1e-3);
        assert!((rect.right - 153.6).abs() < 1e-3);
        assert!((rect.top - 230.4).abs() < 1e-3);
        assert!((rect.bottom - 288.0).abs() < 1e-3);
        assert!(rect.contains(Point::new(120.0, 250.0)));
    }
}
