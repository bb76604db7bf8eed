//! Flat feature tensors.

use serde::{Deserialize, Serialize};

/// Number of feature planes per position.
pub const PLANE_COUNT: usize = 3;

/// Row-major flat action index for a 0-indexed move target.
#[must_use]
pub const fn action_index(x: usize, y: usize, size: usize) -> usize {
    y * size + x
}

/// An encoded board position: flat `f32` tensor plus its shape.
///
/// For this pipeline the shape is always `[3, size, size]`; the type keeps
/// the shape explicit so downstream consumers can reinterpret the buffer
/// without guessing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeaturePlanes {
    /// Flattened tensor data (row-major order).
    pub tensor: Vec<f32>,

    /// Tensor shape, e.g. `[channels, height, width]`.
    pub shape: Vec<usize>,
}

impl FeaturePlanes {
    /// Create from a tensor and shape.
    pub fn new(tensor: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(
            tensor.len(),
            shape.iter().product::<usize>(),
            "tensor length must match shape product"
        );
        Self { tensor, shape }
    }

    /// Zero-filled tensor with the given shape.
    #[must_use]
    pub fn zeros(shape: Vec<usize>) -> Self {
        let len = shape.iter().product();
        Self {
            tensor: vec![0.0; len],
            shape,
        }
    }

    /// Total number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    /// Whether the tensor has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    /// One plane of a `[planes, h, w]` tensor as a flat slice.
    ///
    /// # Panics
    ///
    /// Panics if the shape is not three-dimensional or the index is out of
    /// range.
    #[must_use]
    pub fn plane(&self, index: usize) -> &[f32] {
        assert_eq!(self.shape.len(), 3, "plane() requires a [c, h, w] shape");
        let area = self.shape[1] * self.shape[2];
        &self.tensor[index * area..(index + 1) * area]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_index_row_major() {
        assert_eq!(action_index(0, 0, 9), 0);
        assert_eq!(action_index(3, 3, 9), 30);
        assert_eq!(action_index(8, 8, 9), 80);
    }

    #[test]
    fn test_zeros_shape() {
        let planes = FeaturePlanes::zeros(vec![3, 9, 9]);
        assert_eq!(planes.len(), 243);
        assert!(planes.tensor.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_plane_slicing() {
        let mut planes = FeaturePlanes::zeros(vec![3, 2, 2]);
        planes.tensor[4] = 1.0;
        assert_eq!(planes.plane(0), &[0.0, 0.0, 0.0, 0.0]);
        assert_eq!(planes.plane(1), &[1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_serde_roundtrip() {
        let planes = FeaturePlanes::new(vec![1.0, 0.0, 0.0, 1.0], vec![1, 2, 2]);
        let json = serde_json::to_string(&planes).unwrap();
        let back: FeaturePlanes = serde_json::from_str(&json).unwrap();
        assert_eq!(planes, back);
    }
}
