//! Board coordinates.

use serde::{Deserialize, Serialize};

/// A 0-indexed board coordinate. `x` is the column, `y` the row.
///
/// All engine APIs speak this convention; source-format decoders normalize
/// their own conventions (the compact format is 1-indexed) before a `Point`
/// is ever constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Row-major flat index on a board of the given size.
    #[must_use]
    pub const fn index(self, size: usize) -> usize {
        self.y * size + self.x
    }

    /// Whether the point lies on a board of the given size.
    #[must_use]
    pub const fn in_bounds(self, size: usize) -> bool {
        self.x < size && self.y < size
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
