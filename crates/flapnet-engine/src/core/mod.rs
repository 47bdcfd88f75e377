//! Plain geometric building blocks of the play field.
//!
//! - [`Rect`] - axis-aligned bounding boxes with strict overlap testing
//! - [`Obstacle`] - a column pair with a gap, positioned by its left edge

pub use self::{geometry::*, obstacle::*};

mod geometry;
mod obstacle;
