#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or scene space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pan offset applied uniformly to every element when the scene is drawn.
///
/// `pan_x` / `pan_y` are in CSS pixels. Stored element coordinates never
/// include the pan; only the screen/scene conversions do.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Camera {
    /// Shift the pan offset by the given delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Return to the origin.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The pan offset as a point.
    #[must_use]
    pub fn offset(&self) -> Point {
        Point::new(self.pan_x, self.pan_y)
    }

    /// Convert a screen-space point (CSS pixels) to scene coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: screen.x - self.pan_x,
            y: screen.y - self.pan_y,
        }
    }

    /// Convert a scene point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x + self.pan_x,
            y: world.y + self.pan_y,
        }
    }
}
