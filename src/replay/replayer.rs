//! Lazy per-move sample emission.

use log::debug;

use crate::board::{BoardState, Color, Point};
use crate::error::BoardError;
use crate::features::action_index;

use super::record::{GameRecord, MoveRecord, Sample};

/// Replays one game record through a fresh board, yielding one [`Sample`]
/// per placement.
///
/// Pull-based: consumers may stop at any point and the rest of the game is
/// simply never replayed. Per-move behavior:
///
/// - passes emit nothing and do not touch the board;
/// - out-of-range coordinates are skipped, replay continues;
/// - placements emit the sample from the *pre-move* position, then apply
///   the move. If the board rejects it (occupied point or suicide, which
///   recorded corpora do contain), the game stops there; samples already
///   yielded stay valid.
pub struct GameReplayer {
    board: BoardState,
    moves: std::vec::IntoIter<MoveRecord>,
    halted: bool,
}

impl GameReplayer {
    /// Start replaying `record` on an empty board of the given size.
    ///
    /// Fails only on an invalid board size.
    pub fn new(record: GameRecord, board_size: usize) -> Result<Self, BoardError> {
        Ok(Self {
            board: BoardState::new(board_size)?,
            moves: record.moves.into_iter(),
            halted: false,
        })
    }

    /// The board as reconstructed so far.
    #[must_use]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    fn emit(&mut self, color: Color, point: Point) -> Sample {
        let features = self.board.feature_planes(color);
        let action = action_index(point.x, point.y, self.board.size());
        if let Err(err) = self.board.play_move(color, point) {
            debug!("stopping game replay on illegal recorded move: {err}");
            self.halted = true;
        }
        Sample { features, action }
    }
}

impl Iterator for GameReplayer {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.halted {
            return None;
        }
        let size = self.board.size();
        loop {
            match self.moves.next()? {
                MoveRecord::Pass { .. } => continue,
                MoveRecord::Play { color, x, y } => {
                    if x < 0 || y < 0 {
                        debug!("skipping out-of-range move at ({x}, {y})");
                        continue;
                    }
                    let point = Point::new(x as usize, y as usize);
                    if !point.in_bounds(size) {
                        debug!("skipping out-of-range move at {point}");
                        continue;
                    }
                    return Some(self.emit(color, point));
                }
            }
        }
    }
}
