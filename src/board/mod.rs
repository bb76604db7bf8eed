//! Go board engine: colors, points, and the mutable board state.
//!
//! [`BoardState`] owns a single square grid and applies moves with full
//! capture and suicide resolution. Every worker in the streaming pipeline
//! holds its own instance (one live board per game, recreated per game);
//! nothing here is shared or synchronized.

pub mod color;
pub mod point;
pub mod state;

pub use color::Color;
pub use point::Point;
pub use state::{BoardState, MAX_BOARD_SIZE};
