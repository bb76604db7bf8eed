//! Mutable board state with capture and suicide resolution.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::error::BoardError;
use crate::features::{FeaturePlanes, PLANE_COUNT};

use super::{Color, Point};

/// Hard ceiling on supported board sizes.
pub const MAX_BOARD_SIZE: usize = 25;

/// A mutable square Go board.
///
/// Owned value with explicit mutation; concurrent workers each hold their
/// own instance. The grid is a row-major `Vec<Option<Color>>` where `None`
/// is an empty intersection.
///
/// Invariant: every occupied cell belongs to exactly one maximal
/// 4-connected same-color group; [`BoardState::group_and_liberties`]
/// computes a group and its liberty count on demand (no persistent
/// union-find, boards top out at 625 cells).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardState {
    size: usize,
    grid: Vec<Option<Color>>,
}

impl BoardState {
    /// Create an empty board.
    ///
    /// Fails with [`BoardError::InvalidSize`] for sizes outside [1, 25].
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self {
            size,
            grid: vec![None; size * size],
        })
    }

    /// Board side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The stone at a point, or `None` for empty.
    ///
    /// `point` must be on the board; an off-board point must not silently
    /// alias another cell through the flat index.
    #[must_use]
    pub fn stone_at(&self, point: Point) -> Option<Color> {
        debug_assert!(point.in_bounds(self.size), "point {point} off the board");
        self.grid[point.index(self.size)]
    }

    /// Total number of stones on the board.
    #[must_use]
    pub fn stone_count(&self) -> usize {
        self.grid.iter().filter(|c| c.is_some()).count()
    }

    /// Force-set stones of one color at the given 1-indexed coordinates.
    ///
    /// No legality checks; used for handicap/position setup. Out-of-range
    /// coordinates are ignored.
    pub fn apply_setup(&mut self, color: Color, coords: &[(usize, usize)]) {
        for &(x, y) in coords {
            if (1..=self.size).contains(&x) && (1..=self.size).contains(&y) {
                self.grid[(y - 1) * self.size + (x - 1)] = Some(color);
            }
        }
    }

    /// Force-clear the given 1-indexed coordinates.
    ///
    /// Counterpart of [`BoardState::apply_setup`]; out-of-range coordinates
    /// are ignored.
    pub fn apply_empty(&mut self, coords: &[(usize, usize)]) {
        for &(x, y) in coords {
            if (1..=self.size).contains(&x) && (1..=self.size).contains(&y) {
                self.grid[(y - 1) * self.size + (x - 1)] = None;
            }
        }
    }

    /// Play a stone at `point`, resolving captures and suicide.
    ///
    /// Returns the captured points (possibly empty) on success. The order of
    /// resolution matters: opponent captures are removed *before* the
    /// mover's own group is checked, so a move that captures and would
    /// otherwise be suicidal is legal.
    ///
    /// On [`BoardError::OccupiedPoint`] or [`BoardError::SuicideMove`] the
    /// board is left bit-for-bit in its pre-call state.
    ///
    /// # Panics
    ///
    /// Panics if `point` is off the board. Callers (interactive or
    /// otherwise) convert to this 0-indexed convention and range-check
    /// before calling; an unchecked off-board point would alias another
    /// cell through the flat index.
    pub fn play_move(&mut self, color: Color, point: Point) -> Result<Vec<Point>, BoardError> {
        assert!(point.in_bounds(self.size), "point {point} off the board");
        let idx = point.index(self.size);
        if self.grid[idx].is_some() {
            return Err(BoardError::OccupiedPoint(point));
        }
        self.grid[idx] = Some(color);

        // Collect opponent groups left with zero liberties. Two neighbors
        // may belong to the same group; the set keeps the capture list
        // duplicate-free.
        let opponent = color.opponent();
        let mut captured: Vec<Point> = Vec::new();
        let mut captured_set: FxHashSet<Point> = FxHashSet::default();
        for n in self.neighbors(point) {
            if self.stone_at(n) == Some(opponent) && !captured_set.contains(&n) {
                let (group, liberties) = self.group_and_liberties(n);
                if liberties == 0 {
                    for q in group {
                        if captured_set.insert(q) {
                            captured.push(q);
                        }
                    }
                }
            }
        }
        for &q in &captured {
            self.grid[q.index(self.size)] = None;
        }

        let (_, own_liberties) = self.group_and_liberties(point);
        if own_liberties == 0 {
            // Suicide: restore captures, lift the stone, reject.
            for &q in &captured {
                self.grid[q.index(self.size)] = Some(opponent);
            }
            self.grid[idx] = None;
            return Err(BoardError::SuicideMove(point));
        }

        Ok(captured)
    }

    /// The maximal same-color group containing `point` and its liberty
    /// count (distinct empty neighbors, never double-counted).
    ///
    /// Iterative worklist traversal; returns an empty group for an empty
    /// point.
    #[must_use]
    pub fn group_and_liberties(&self, point: Point) -> (Vec<Point>, usize) {
        let color = match self.stone_at(point) {
            Some(c) => c,
            None => return (Vec::new(), 0),
        };

        let mut worklist: Vec<Point> = vec![point];
        let mut visited: FxHashSet<Point> = FxHashSet::default();
        visited.insert(point);
        let mut group: Vec<Point> = Vec::new();
        let mut liberties: FxHashSet<Point> = FxHashSet::default();

        while let Some(current) = worklist.pop() {
            group.push(current);
            for n in self.neighbors(current) {
                match self.stone_at(n) {
                    None => {
                        liberties.insert(n);
                    }
                    Some(c) if c == color && visited.insert(n) => {
                        worklist.push(n);
                    }
                    Some(_) => {}
                }
            }
        }

        (group, liberties.len())
    }

    /// Encode the current position as feature planes for the given player
    /// to move. Pure; does not mutate.
    ///
    /// Shape `[3, size, size]`: plane 0 marks black stones, plane 1 white
    /// stones, plane 2 is all-ones iff Black is to play.
    #[must_use]
    pub fn feature_planes(&self, to_play: Color) -> FeaturePlanes {
        let area = self.size * self.size;
        let mut tensor = vec![0.0f32; PLANE_COUNT * area];
        for (i, cell) in self.grid.iter().enumerate() {
            match cell {
                Some(Color::Black) => tensor[i] = 1.0,
                Some(Color::White) => tensor[area + i] = 1.0,
                None => {}
            }
        }
        if to_play == Color::Black {
            for v in &mut tensor[2 * area..] {
                *v = 1.0;
            }
        }
        FeaturePlanes::new(tensor, vec![PLANE_COUNT, self.size, self.size])
    }

    fn neighbors(&self, point: Point) -> SmallVec<[Point; 4]> {
        let mut out = SmallVec::new();
        if point.x > 0 {
            out.push(Point::new(point.x - 1, point.y));
        }
        if point.x + 1 < self.size {
            out.push(Point::new(point.x + 1, point.y));
        }
        if point.y > 0 {
            out.push(Point::new(point.x, point.y - 1));
        }
        if point.y + 1 < self.size {
            out.push(Point::new(point.x, point.y + 1));
        }
        out
    }
}

impl std::fmt::Display for BoardState {
    /// ASCII diagram: `X` black, `O` white, `.` empty, one row per line.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.size {
            for x in 0..self.size {
                let ch = match self.grid[y * self.size + x] {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, "{}", ch)?;
                if x + 1 < self.size {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
