use super::Rect;

/// A pair of solid columns with a passable gap between them.
///
/// The gap height is shared by all obstacles and owned by the world, so an
/// obstacle only stores its horizontal position and the top of its gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    x: f64,
    gap_top: f64,
}

impl Obstacle {
    #[must_use]
    pub const fn new(x: f64, gap_top: f64) -> Self {
        Self { x, gap_top }
    }

    /// Left edge.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub const fn gap_top(&self) -> f64 {
        self.gap_top
    }

    #[must_use]
    pub fn gap_bottom(&self, gap_height: f64) -> f64 {
        self.gap_top + gap_height
    }

    pub(crate) fn advance(&mut self, distance: f64) {
        self.x -= distance;
    }

    /// Returns the upper and lower solid rectangles.
    #[must_use]
    pub fn solids(&self, width: f64, gap_height: f64, screen_height: f64) -> [Rect; 2] {
        let left = self.x;
        let right = self.x + width;
        [
            Rect::new(left, right, 0.0, self.gap_top),
            Rect::new(left, right, self.gap_bottom(gap_height), screen_height),
        ]
    }
}
