use serde::{Deserialize, Serialize};

use crate::rect::Point;

/// Pointer state sampled once per overlay tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Pointer {
    pub position: Point,
    /// Button went down since the previous tick.
    pub clicked: bool,
}

impl Pointer {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Point::new(x, y),
            clicked: false,
        }
    }

    pub fn clicking(mut self) -> Self {
        self.clicked = true;
        self
    }
}
