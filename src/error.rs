//! Error taxonomy for the board engine and streaming pipeline.
//!
//! Three tiers, with very different recovery policies:
//!
//! - [`BoardError`]: legality failures. `InvalidSize` is a configuration
//!   error and fatal; `OccupiedPoint`/`SuicideMove` are expected during
//!   replay of recorded games and mean "stop replaying this game" (or, for
//!   interactive callers, "reject this move and try another").
//! - [`DecodeError`]: one game record could not be decoded. Always recovered
//!   by skipping the whole game; never surfaced past the stream source.
//! - [`SourceError`]: structural problems (unreadable source file, bad board
//!   size). Surfaced to the caller and aborts the stream.
//!
//! Per-move anomalies inside an otherwise valid game (a malformed move entry,
//! an out-of-range coordinate) are not errors at all: they are skip paths in
//! the decoder and replayer, deliberately kept separate from the per-game
//! class above.

use thiserror::Error;

use crate::board::Point;

/// Board-level failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Requested board size outside the supported [1, 25] range.
    #[error("unsupported board size: {0}")]
    InvalidSize(usize),

    /// Attempt to play on a non-empty point.
    #[error("point {0} is already occupied")]
    OccupiedPoint(Point),

    /// The move would leave the mover's own group with zero liberties and
    /// captures nothing.
    #[error("move at {0} is suicide")]
    SuicideMove(Point),
}

/// Per-game decode failures. Recovered by skipping the game.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The game container itself is malformed (bad JSON line, unparseable
    /// SGF, truncated file).
    #[error("malformed game record: {0}")]
    MalformedGameRecord(String),

    /// An SGF file declares a board size other than the requested one.
    #[error("board size mismatch: file declares {declared}, requested {requested}")]
    SizeMismatch { declared: usize, requested: usize },
}

/// Structural stream failures. Surfaced to the caller.
#[derive(Error, Debug)]
pub enum SourceError {
    /// A source file could not be opened or read.
    #[error("source I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Board construction rejected the configured size.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Crate-wide result alias for stream-level operations.
pub type Result<T> = std::result::Result<T, SourceError>;
