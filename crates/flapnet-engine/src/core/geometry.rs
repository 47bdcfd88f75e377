/// Axis-aligned rectangle in screen coordinates (`y` grows downwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Returns `true` if the interiors of the two rectangles intersect.
    ///
    /// Rectangles that only share an edge do not overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use flapnet_engine::core::Rect;
    ///
    /// let a = Rect::new(0.0, 10.0, 0.0, 10.0);
    /// assert!(a.overlaps(&Rect::new(5.0, 15.0, 5.0, 15.0)));
    /// assert!(!a.overlaps(&Rect::new(10.0, 20.0, 0.0, 10.0)));
    /// ```
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.right > other.left
            && self.left < other.right
            && self.top < other.bottom
            && self.bottom > other.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOX: Rect = Rect::new(15.0, 45.0, 100.0, 130.0);

    #[test]
    fn test_overlap_is_symmetric() {
        let other = Rect::new(40.0, 100.0, 0.0, 105.0);
        assert!(BOX.overlaps(&other));
        assert!(other.overlaps(&BOX));
    }

    #[test]
    fn test_tangent_edges_do_not_overlap() {
        // touching on each side in turn
        assert!(!BOX.overlaps(&Rect::new(45.0, 105.0, 0.0, 500.0)));
        assert!(!BOX.overlaps(&Rect::new(-45.0, 15.0, 0.0, 500.0)));
        assert!(!BOX.overlaps(&Rect::new(0.0, 100.0, 0.0, 100.0)));
        assert!(!BOX.overlaps(&Rect::new(0.0, 100.0, 130.0, 500.0)));
    }

    #[test]
    fn test_barely_overlapping_edges() {
        assert!(BOX.overlaps(&Rect::new(44.999, 105.0, 0.0, 500.0)));
        assert!(BOX.overlaps(&Rect::new(0.0, 100.0, 0.0, 100.001)));
    }

    #[test]
    fn test_disjoint() {
        assert!(!BOX.overlaps(&Rect::new(200.0, 260.0, 0.0, 500.0)));
    }
}
