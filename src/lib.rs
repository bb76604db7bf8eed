//! # go-replay
//!
//! A Go board-rules engine plus the streaming pipeline that replays
//! recorded games through it, producing `(feature planes, action label)`
//! samples for move-prediction training.
//!
//! ## Design Principles
//!
//! 1. **Owned, unshared state**: each worker holds its own [`BoardState`]
//!    (one live board per game). No shared mutable state, no locking;
//!    worker coordination is a pure function of the game index.
//!
//! 2. **Maximize usable samples**: large recorded corpora contain corrupt
//!    games. Per-move anomalies skip the move, per-game decode failures
//!    skip the game, and illegal recorded moves stop that game's replay.
//!    Only structural misconfiguration (bad board size, unreadable source
//!    path) aborts a stream.
//!
//! 3. **Framework-free output**: samples are plain `f32` buffers with an
//!    explicit `[3, size, size]` shape and an integer label; no tensor
//!    framework types anywhere in this crate.
//!
//! ## Modules
//!
//! - `board`: colors, points, and the board engine (capture, suicide,
//!   liberty counting, feature encoding)
//! - `features`: flat feature tensors and action indexing
//! - `replay`: normalized game records and the lazy per-move replayer
//! - `source`: train/val splitting, worker sharding, and the two source
//!   format decoders (compact JSON lines, SGF)
//! - `error`: the error taxonomy and its recovery policies

pub mod board;
pub mod error;
pub mod features;
pub mod replay;
pub mod source;

// Re-export commonly used types
pub use crate::board::{BoardState, Color, Point, MAX_BOARD_SIZE};
pub use crate::error::{BoardError, DecodeError, SourceError};
pub use crate::features::{action_index, FeaturePlanes, PLANE_COUNT};
pub use crate::replay::{GameRecord, GameReplayer, MoveRecord, Sample};
pub use crate::source::{SampleStream, Split, StreamConfig, WorkerShard};
