use serde::{Deserialize, Serialize};

use crate::{Direction, InvalidBoard, PIECES_PER_COLOR};

/// Towers of this height are capped: nobody can build on them or step onto them.
pub const MAX_HEIGHT: u8 = 4;

/// Raising a tower to exactly this height scores a point for the builder.
pub const SCORING_HEIGHT: u8 = 3;

/// Boards are square with between `MIN_SIZE` and `MAX_SIZE` cells per side.
pub const MIN_SIZE: usize = 2;
pub const MAX_SIZE: usize = u8::MAX as usize;

/// The two sides of the game.
///
/// On the board, pieces of [`Color::White`] are positive and pieces of
/// [`Color::Black`] are negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn sign(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The color of a signed value, or `None` for zero.
    pub fn from_sign(value: i8) -> Option<Self> {
        match value.signum() {
            1 => Some(Color::White),
            -1 => Some(Color::Black),
            _ => None,
        }
    }

    #[must_use]
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl std::ops::Neg for Color {
    type Output = Color;

    fn neg(self) -> Self::Output {
        self.opponent()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// The full game state: three co-indexed `size` x `size` grids.
///
/// Cells are addressed as `(x, y)`, with `x` the column and `y` the row.
/// Any coordinate outside of `[0, size)` is a bug in the caller and panics.
#[cfg_attr(feature = "python", pyo3::pyclass)]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr", into = "BoardRepr")]
pub struct Board {
    size: usize,
    // All three are indexed by [x * size + y].
    heights: Vec<u8>,
    occupants: Vec<i8>,
    scores: Vec<i8>,
}

/// The wire format of a [`Board`], checked on the way in.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct BoardRepr {
    size: usize,
    heights: Vec<u8>,
    occupants: Vec<i8>,
    scores: Vec<i8>,
}

// !!!!!! NOTE: Keep in sync with pymethods impl block !!!!!!
impl Board {
    /// Creates the starting position: no towers, no score, and one piece per
    /// color on the two diagonal cells next to the center.
    ///
    /// Panics if `size` is not in [`MIN_SIZE`]`..=`[`MAX_SIZE`].
    pub fn new(size: usize) -> Self {
        assert!(
            (MIN_SIZE..=MAX_SIZE).contains(&size),
            "A board needs between {} and {} cells per side, got {}",
            MIN_SIZE,
            MAX_SIZE,
            size
        );
        let cells = size * size;
        let mut board = Self {
            size,
            heights: vec![0; cells],
            occupants: vec![0; cells],
            scores: vec![0; cells],
        };
        let center = size / 2;
        board.set_occupant(center - 1, center - 1, Color::White.sign());
        board.set_occupant(center, center, Color::Black.sign());
        board
    }

    /// Builds a board from raw grids in `[x * size + y]` order.
    pub fn from_grids(
        size: usize,
        heights: Vec<u8>,
        occupants: Vec<i8>,
        scores: Vec<i8>,
    ) -> Result<Self, InvalidBoard> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(InvalidBoard::UnsupportedSize { size });
        }
        let expected = size * size;
        for (grid, actual) in [
            ("heights", heights.len()),
            ("occupants", occupants.len()),
            ("scores", scores.len()),
        ] {
            if actual != expected {
                return Err(InvalidBoard::WrongGridLength {
                    grid,
                    expected,
                    actual,
                });
            }
        }
        let board = Self {
            size,
            heights,
            occupants,
            scores,
        };
        let mut seen_pieces = Vec::new();
        for (x, y) in board.cells() {
            let height = board.height(x, y);
            if height > MAX_HEIGHT {
                return Err(InvalidBoard::HeightOutOfRange { x, y, height });
            }
            let occupant = board.occupant(x, y);
            if occupant.unsigned_abs() > PIECES_PER_COLOR {
                return Err(InvalidBoard::UnsupportedPiece { x, y, occupant });
            }
            // Actions address pieces by occupant, so each one may only appear once
            if occupant != 0 {
                if seen_pieces.contains(&occupant) {
                    return Err(InvalidBoard::DuplicatePiece { x, y, occupant });
                }
                seen_pieces.push(occupant);
            }
        }
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.size && y < self.size,
            "({}, {}) is outside of the {}x{} board",
            x,
            y,
            self.size,
            self.size
        );
        x * self.size + y
    }

    pub fn height(&self, x: usize, y: usize) -> u8 {
        self.heights[self.idx(x, y)]
    }

    /// The signed piece on a cell: 0 if empty, the sign is the [`Color`]
    /// and the magnitude is the piece selector plus one.
    pub fn occupant(&self, x: usize, y: usize) -> i8 {
        self.occupants[self.idx(x, y)]
    }

    pub fn score(&self, x: usize, y: usize) -> i8 {
        self.scores[self.idx(x, y)]
    }

    pub fn piece_at(&self, x: usize, y: usize) -> Option<Color> {
        Color::from_sign(self.occupant(x, y))
    }

    pub fn set_height(&mut self, x: usize, y: usize, height: u8) {
        assert!(height <= MAX_HEIGHT, "Tower height {} is too high", height);
        let idx = self.idx(x, y);
        self.heights[idx] = height;
    }

    pub fn set_occupant(&mut self, x: usize, y: usize, occupant: i8) {
        assert!(
            occupant.unsigned_abs() <= PIECES_PER_COLOR,
            "No piece selector for occupant {}",
            occupant
        );
        let idx = self.idx(x, y);
        self.occupants[idx] = occupant;
    }

    pub fn set_score(&mut self, x: usize, y: usize, score: i8) {
        let idx = self.idx(x, y);
        self.scores[idx] = score;
    }

    /// Adds one level to the tower at `(x, y)` and returns the new height.
    ///
    /// Panics if the tower is already capped.
    pub fn build_up(&mut self, x: usize, y: usize) -> u8 {
        let idx = self.idx(x, y);
        assert!(
            self.heights[idx] < MAX_HEIGHT,
            "Cannot build on the capped tower at ({}, {})",
            x,
            y
        );
        self.heights[idx] += 1;
        self.heights[idx]
    }

    /// Moves whatever occupies `from` to `to`, leaving `from` empty.
    pub(crate) fn move_occupant(&mut self, from: (usize, usize), to: (usize, usize)) {
        let occupant = self.occupant(from.0, from.1);
        self.set_occupant(from.0, from.1, 0);
        self.set_occupant(to.0, to.1, occupant);
    }

    /// The neighbor of `(x, y)` in direction `dir`.
    ///
    /// Panics if it is off the board.
    pub(crate) fn neighbor(&self, x: usize, y: usize, dir: Direction) -> (usize, usize) {
        dir.step(x, y, self.size).unwrap_or_else(|| {
            panic!(
                "Stepping {} from ({}, {}) leaves the {}x{} board",
                dir, x, y, self.size, self.size
            )
        })
    }

    /// All cells in scan order: rows (`y`) outermost, columns (`x`) within a row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| (x, y)))
    }

    /// The cells holding a piece of `color`, in scan order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells()
            .filter(move |&(x, y)| self.piece_at(x, y) == Some(color))
    }

    /// The first cell in scan order holding exactly `occupant`.
    pub fn find_occupant(&self, occupant: i8) -> Option<(usize, usize)> {
        self.cells().find(|&(x, y)| self.occupant(x, y) == occupant)
    }

    /// Sum over the score grid. Positive means white is ahead.
    pub fn total_score(&self) -> i32 {
        self.scores.iter().map(|&s| i32::from(s)).sum()
    }

    /// The score total from the point of view of `color`.
    pub fn score_for(&self, color: Color) -> i32 {
        self.total_score() * i32::from(color.sign())
    }

    /// The same position with the roles of the colors swapped if `color` is
    /// black, so that `color` is always represented as white.
    ///
    /// Towers are shared by both sides and stay as they are.
    #[must_use]
    pub fn canonical_form(&self, color: Color) -> Board {
        let sign = color.sign();
        Board {
            size: self.size,
            heights: self.heights.clone(),
            occupants: self.occupants.iter().map(|&o| o * sign).collect(),
            scores: self.scores.iter().map(|&s| s * sign).collect(),
        }
    }

    pub(crate) fn heights(&self) -> &[u8] {
        &self.heights
    }

    pub(crate) fn occupants(&self) -> &[i8] {
        &self.occupants
    }

    pub(crate) fn scores(&self) -> &[i8] {
        &self.scores
    }

    /// An empty board of the same size, for building transformed copies.
    pub(crate) fn blank(size: usize) -> Self {
        let cells = size * size;
        Self {
            size,
            heights: vec![0; cells],
            occupants: vec![0; cells],
            scores: vec![0; cells],
        }
    }
}

impl TryFrom<BoardRepr> for Board {
    type Error = InvalidBoard;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        Board::from_grids(repr.size, repr.heights, repr.occupants, repr.scores)
    }
}

impl From<Board> for BoardRepr {
    fn from(board: Board) -> Self {
        BoardRepr {
            size: board.size,
            heights: board.heights,
            occupants: board.occupants,
            scores: board.scores,
        }
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::ReachableBoard;

    quickcheck! {
        fn canonical_form_is_an_involution(input: ReachableBoard, color: Color) -> bool {
            let board = input.board;
            board.canonical_form(color).canonical_form(-color) == board
                && board.canonical_form(color).canonical_form(color) == board
        }

        fn canonical_form_keeps_towers(input: ReachableBoard) -> bool {
            let board = input.board;
            let canonical = board.canonical_form(Color::Black);
            canonical.heights() == board.heights()
                && canonical.score_for(Color::White) == board.score_for(Color::Black)
        }

        fn heights_stay_in_range(input: ReachableBoard) -> bool {
            input.board.heights().iter().all(|&h| h <= MAX_HEIGHT)
        }

        fn serde_keeps_reachable_boards(input: ReachableBoard) -> bool {
            let json = serde_json::to_string(&input.board).unwrap();
            serde_json::from_str::<Board>(&json).unwrap() == input.board
        }
    }

    #[test]
    fn initial_layout() {
        let board = Board::new(6);
        assert_eq!(board.size(), 6);
        assert_eq!(board.occupant(2, 2), 1);
        assert_eq!(board.occupant(3, 3), -1);
        assert_eq!(board.pieces(Color::White).collect::<Vec<_>>(), vec![(2, 2)]);
        assert_eq!(board.pieces(Color::Black).collect::<Vec<_>>(), vec![(3, 3)]);
        assert_eq!(board.cells().filter(|&(x, y)| board.occupant(x, y) != 0).count(), 2);
        assert!(board.heights().iter().all(|&h| h == 0));
        assert_eq!(board.total_score(), 0);

        let odd = Board::new(5);
        assert_eq!(odd.piece_at(1, 1), Some(Color::White));
        assert_eq!(odd.piece_at(2, 2), Some(Color::Black));
    }

    #[test]
    fn scan_order_is_row_major() {
        let board = Board::new(3);
        let cells: Vec<_> = board.cells().take(4).collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (2, 0), (0, 1)]);
    }

    #[test]
    fn score_for_is_signed() {
        let mut board = Board::new(6);
        board.set_score(0, 0, 1);
        board.set_score(1, 0, 1);
        board.set_score(5, 5, -1);
        assert_eq!(board.total_score(), 1);
        assert_eq!(board.score_for(Color::White), 1);
        assert_eq!(board.score_for(Color::Black), -1);
    }

    #[test]
    fn build_up_until_capped() {
        let mut board = Board::new(4);
        assert_eq!(board.build_up(0, 3), 1);
        assert_eq!(board.build_up(0, 3), 2);
        assert_eq!(board.build_up(0, 3), 3);
        assert_eq!(board.build_up(0, 3), 4);
        assert_eq!(board.height(0, 3), MAX_HEIGHT);
    }

    #[test]
    #[should_panic]
    fn build_on_capped_tower_panics() {
        let mut board = Board::new(4);
        board.set_height(1, 1, MAX_HEIGHT);
        board.build_up(1, 1);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_access_panics() {
        Board::new(4).height(4, 0);
    }

    #[test]
    fn from_grids_validates() {
        assert!(matches!(
            Board::from_grids(1, vec![0], vec![0], vec![0]),
            Err(InvalidBoard::UnsupportedSize { size: 1 })
        ));
        assert!(matches!(
            Board::from_grids(2, vec![0; 4], vec![0; 3], vec![0; 4]),
            Err(InvalidBoard::WrongGridLength {
                grid: "occupants",
                expected: 4,
                actual: 3
            })
        ));
        assert!(matches!(
            Board::from_grids(2, vec![0, 5, 0, 0], vec![0; 4], vec![0; 4]),
            Err(InvalidBoard::HeightOutOfRange {
                x: 0,
                y: 1,
                height: 5
            })
        ));
        assert!(matches!(
            Board::from_grids(2, vec![0; 4], vec![0, 0, -2, 0], vec![0; 4]),
            Err(InvalidBoard::UnsupportedPiece {
                x: 1,
                y: 0,
                occupant: -2
            })
        ));
        // A second white piece on (3, 3) would share the action ids of the one on (0, 0)
        let mut twins = vec![0; 16];
        twins[0] = 1;
        twins[6] = -1;
        twins[15] = 1;
        assert!(matches!(
            Board::from_grids(4, vec![0; 16], twins, vec![0; 16]),
            Err(InvalidBoard::DuplicatePiece {
                x: 3,
                y: 3,
                occupant: 1
            })
        ));
        assert!(matches!(
            Board::from_grids(256, vec![], vec![], vec![]),
            Err(InvalidBoard::UnsupportedSize { size: 256 })
        ));
        let board = Board::from_grids(2, vec![1, 2, 3, 4], vec![1, 0, 0, -1], vec![0, 0, 1, 0])
            .unwrap();
        assert_eq!(board.height(1, 0), 3);
        assert_eq!(board.score(1, 0), 1);
        assert_eq!(board.occupant(1, 1), -1);
    }

    #[test]
    fn deserialization_rejects_invalid_grids() {
        let json = r#"{"size":2,"heights":[0,0,0,9],"occupants":[1,0,0,-1],"scores":[0,0,0,0]}"#;
        assert!(serde_json::from_str::<Board>(json).is_err());
        let json = r#"{"size":2,"heights":[0,0,0,0],"occupants":[-1,0,0,-1],"scores":[0,0,0,0]}"#;
        assert!(serde_json::from_str::<Board>(json).is_err());
    }

    #[test]
    fn largest_board_survives_serde() {
        let board = Board::new(MAX_SIZE);
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);
    }

    #[test]
    #[should_panic]
    fn oversized_board_panics() {
        Board::new(MAX_SIZE + 1);
    }
}
