//! Feature encoding for neural network consumers.
//!
//! The pipeline never depends on a tensor framework: positions are encoded
//! as plain `f32` buffers with an explicit shape, `[3, size, size]` (black
//! stones, white stones, to-play indicator), and move targets as flat
//! row-major action indices in `[0, size * size)`.

pub mod planes;

pub use planes::{action_index, FeaturePlanes, PLANE_COUNT};
