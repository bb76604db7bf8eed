//! Partitioned streaming source: files in, labeled samples out.
//!
//! The source enumerates games across one or more files, deterministically
//! assigns each game to a train/val split and to one parallel worker, and
//! flattens each owned, in-scope game through a [`crate::replay::GameReplayer`].
//!
//! Partitioning is a pure function of `(game index, worker id, worker
//! count, val_ratio)`: no locking, no message passing. The index unit is
//! format-dependent and deliberately stays that way (unifying would
//! silently re-split existing corpora): the compact format indexes by line
//! number within the lexically-ordered concatenated stream, the SGF format
//! by file index within the file list.

pub mod compact;
pub mod config;
pub mod sgf;
pub mod stream;

pub use compact::decode_game_line;
pub use config::{Split, StreamConfig, WorkerShard};
pub use sgf::decode_sgf;
pub use stream::SampleStream;
