use serde::{Deserialize, Serialize};

use crate::rect::Point;

/// Bars are drawn from a unit rectangle sprite scaled to the stat value.
pub const BAR_THICKNESS: f32 = 0.6;

pub const TINT_RED: u32 = 0xFF6961;
pub const TINT_YELLOW: u32 = 0xE6C76A;
pub const TINT_BLUE: u32 = 0x3299FF;

/// A horizontal stat bar attached to a parent sprite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatBar {
    /// Offset from the parent sprite's position.
    pub offset: Point,
    /// Horizontal scale of the bar sprite.
    pub length: f32,
    /// Vertical scale of the bar sprite.
    pub thickness: f32,
    pub tint: u32,
}

impl StatBar {
    pub fn new(offset: Point, tint: u32) -> Self {
        Self {
            offset,
            length: BAR_THICKNESS,
            thickness: BAR_THICKNESS,
            tint,
        }
    }

    pub fn set_value(&mut self, value: f32, factor: f32) {
        self.length = value * factor;
        self.thickness = BAR_THICKNESS;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_scales_with_value() {
        let mut bar = StatBar::new(Point::new(-10.0, -63.0), TINT_RED);
        assert_eq!(bar.length, BAR_THICKNESS);

        bar.set_value(4.0, 0.5);
        assert_eq!(bar.length, 2.0);
        assert_eq!(bar.thickness, BAR_THICKNESS);
        assert_eq!(bar.tint, TINT_RED);
    }
}
