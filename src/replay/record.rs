//! Normalized move records and training samples.

use serde::{Deserialize, Serialize};

use crate::board::Color;
use crate::features::FeaturePlanes;

/// One recorded move, normalized to 0-indexed coordinates.
///
/// Coordinates are `i32` rather than `usize` on purpose: recorded corpora
/// contain out-of-range moves, and normalization (the compact format is
/// 1-indexed) must not panic or wrap. The replayer applies the range check
/// and skips offenders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveRecord {
    /// A stone placement.
    Play { color: Color, x: i32, y: i32 },

    /// A pass: no board effect, no sample.
    Pass { color: Color },
}

impl MoveRecord {
    /// The moving player.
    #[must_use]
    pub fn color(&self) -> Color {
        match *self {
            MoveRecord::Play { color, .. } | MoveRecord::Pass { color } => color,
        }
    }

    /// Whether this is a pass.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, MoveRecord::Pass { .. })
    }
}

/// An ordered move sequence for one game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Moves in game order.
    pub moves: Vec<MoveRecord>,
}

impl GameRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a move list.
    #[must_use]
    pub fn from_moves(moves: Vec<MoveRecord>) -> Self {
        Self { moves }
    }

    /// Append a move.
    pub fn push(&mut self, mv: MoveRecord) {
        self.moves.push(mv);
    }

    /// Number of recorded moves (including passes).
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Whether the record holds no moves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// One labeled training sample.
///
/// `features` is the position *before* the labeled move was applied;
/// `action` is the move's row-major flat index in `[0, size * size)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub features: FeaturePlanes,
    pub action: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_record_accessors() {
        let play = MoveRecord::Play {
            color: Color::Black,
            x: 3,
            y: 4,
        };
        let pass = MoveRecord::Pass {
            color: Color::White,
        };
        assert_eq!(play.color(), Color::Black);
        assert!(!play.is_pass());
        assert_eq!(pass.color(), Color::White);
        assert!(pass.is_pass());
    }

    #[test]
    fn test_game_record_push() {
        let mut record = GameRecord::new();
        assert!(record.is_empty());
        record.push(MoveRecord::Pass {
            color: Color::Black,
        });
        assert_eq!(record.len(), 1);
    }
}
