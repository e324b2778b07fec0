//! Unit-grid screen locations.
//!
//! Intersection `(row, col)` sits at `x = col, y = row`.  Renderers scale and
//! translate; the core never deals in pixels.

use crate::Direction;

#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Location of the grid cell `(row, col)`.
    #[inline]
    pub fn of_cell(row: i32, col: i32) -> Self {
        Self::new(col as f32, row as f32)
    }

    /// Move `dist` grid units towards `dir`.
    #[inline]
    pub fn step(self, dir: Direction, dist: f32) -> Self {
        let (dr, dc) = dir.offset();
        Self::new(self.x + dist * dc as f32, self.y + dist * dr as f32)
    }

    /// Linear interpolation; `t = 0` is `self`, `t = 1` is `other`.
    #[inline]
    pub fn lerp(self, other: Point, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Angle in radians of the vector `self → other`, measured from +x
    /// towards +y (screen coordinates, y down).
    #[inline]
    pub fn heading_to(self, other: Point) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
