//! Game replay: normalized move records and the lazy sample iterator.
//!
//! Both source formats (compact JSON lines and SGF) normalize into the same
//! logical [`GameRecord`] before replay. [`GameReplayer`] then drives a
//! fresh [`crate::board::BoardState`] move by move, yielding one labeled
//! [`Sample`] per placement, and stops a game early when the record turns
//! out to be inconsistent with the rules.

pub mod record;
pub mod replayer;

pub use record::{GameRecord, MoveRecord, Sample};
pub use replayer::GameReplayer;
