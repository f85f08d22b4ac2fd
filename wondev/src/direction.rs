use serde::{Deserialize, Serialize};

/// One of the eight unit steps a piece can move or build in.
///
/// The discriminant is the index used by the action encoding. The table goes
/// around the compass clockwise (with `x` growing east and `y` growing north),
/// so adding one to an index turns by 45°.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    North,
}

pub const NUM_DIRECTIONS: usize = 8;

impl Direction {
    /// All directions, in index order.
    pub const ALL: [Direction; NUM_DIRECTIONS] = [
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::North,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(idx: u8) -> Option<Self> {
        Self::ALL.get(usize::from(idx)).copied()
    }

    /// The `(dx, dy)` step.
    pub fn offset(self) -> (i8, i8) {
        match self {
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
            Direction::North => (0, 1),
        }
    }

    pub fn from_offset(dx: i8, dy: i8) -> Option<Self> {
        Self::ALL.into_iter().find(|dir| dir.offset() == (dx, dy))
    }

    /// Turns clockwise by `steps` eighths of a full turn (counter-clockwise if negative).
    #[must_use]
    pub fn rotated(self, steps: i8) -> Self {
        let idx = (i16::from(self as u8) + i16::from(steps)).rem_euclid(NUM_DIRECTIONS as i16);
        Self::ALL[idx as usize]
    }

    /// The cell one step away from `(x, y)`, if it is on a `size` x `size` board.
    pub fn step(self, x: usize, y: usize, size: usize) -> Option<(usize, usize)> {
        let (dx, dy) = self.offset();
        let x = x.checked_add_signed(isize::from(dx))?;
        let y = y.checked_add_signed(isize::from(dy))?;
        (x < size && y < size).then_some((x, y))
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Direction::NorthEast => "NE",
            Direction::East => "E",
            Direction::SouthEast => "SE",
            Direction::South => "S",
            Direction::SouthWest => "SW",
            Direction::West => "W",
            Direction::NorthWest => "NW",
            Direction::North => "N",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    quickcheck! {
        fn quarter_turn_is_two_steps(dir: Direction) -> bool {
            // Clockwise quarter turn with x east, y north: (dx, dy) -> (dy, -dx)
            let (dx, dy) = dir.offset();
            dir.rotated(2).offset() == (dy, -dx)
        }

        fn rotation_roundtrip(dir: Direction, steps: i8) -> bool {
            dir.rotated(steps).rotated(-(steps % 8)) == dir
        }
    }

    #[test]
    fn index_and_offset_roundtrip() {
        for (idx, dir) in Direction::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(dir.index()), idx);
            assert_eq!(Direction::from_index(idx as u8), Some(dir));
            let (dx, dy) = dir.offset();
            assert_eq!(Direction::from_offset(dx, dy), Some(dir));
        }
        assert_eq!(Direction::from_index(8), None);
        assert_eq!(Direction::from_offset(0, 0), None);
        assert_eq!(Direction::from_offset(2, 0), None);
    }

    #[test]
    fn step_stays_on_board() {
        assert_eq!(Direction::SouthWest.step(0, 0, 6), None);
        assert_eq!(Direction::NorthEast.step(0, 0, 6), Some((1, 1)));
        assert_eq!(Direction::East.step(5, 3, 6), None);
        assert_eq!(Direction::North.step(3, 5, 6), None);
        assert_eq!(Direction::South.step(3, 5, 6), Some((3, 4)));
    }
}
