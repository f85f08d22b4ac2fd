use crate::{Action, Board, DecodedAction, Direction, ACTION_SPACE_SIZE};

/// One of the eight symmetries of the square board.
///
/// The board is first turned by a quarter turn `rotations` times, then
/// optionally mirrored. In `(x, y)` index space, a quarter turn sends
/// `(x, y)` to `(size - 1 - y, x)` and the mirror sends `(x, y)` to
/// `(x, size - 1 - y)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Symmetry {
    pub rotations: u8,
    pub flipped: bool,
}

impl Symmetry {
    pub const IDENTITY: Symmetry = Symmetry {
        rotations: 0,
        flipped: false,
    };

    /// All symmetries, starting with the identity.
    pub const ALL: [Symmetry; 8] = [
        Symmetry::IDENTITY,
        Symmetry { rotations: 0, flipped: true },
        Symmetry { rotations: 1, flipped: false },
        Symmetry { rotations: 1, flipped: true },
        Symmetry { rotations: 2, flipped: false },
        Symmetry { rotations: 2, flipped: true },
        Symmetry { rotations: 3, flipped: false },
        Symmetry { rotations: 3, flipped: true },
    ];

    /// Where the cell `(x, y)` ends up.
    pub fn map_cell(self, x: usize, y: usize, size: usize) -> (usize, usize) {
        let (mut x, mut y) = (x, y);
        for _ in 0..self.rotations % 4 {
            (x, y) = (size - 1 - y, x);
        }
        if self.flipped {
            y = size - 1 - y;
        }
        (x, y)
    }

    /// Where a step in direction `dir` points after the transformation.
    ///
    /// A quarter turn sends `(dx, dy)` to `(-dy, dx)`, which moves two entries
    /// back in the table. The mirror negates `dy`.
    pub fn map_direction(self, dir: Direction) -> Direction {
        let turned = dir.rotated(-2 * (self.rotations % 4) as i8);
        if !self.flipped {
            return turned;
        }
        let (dx, dy) = turned.offset();
        // Mirroring a unit step gives a unit step
        Direction::from_offset(dx, -dy).unwrap()
    }

    /// The action that does on the transformed board what `action` does on
    /// the untransformed one. Pass stays pass.
    pub fn map_action(self, action: Action) -> Action {
        if action.is_pass() {
            return action;
        }
        let decoded = action.decode();
        DecodedAction {
            move_dir: self.map_direction(decoded.move_dir),
            build_dir: self.map_direction(decoded.build_dir),
            ..decoded
        }
        .encode()
    }

    pub fn apply_to_board(self, board: &Board) -> Board {
        let size = board.size();
        let mut result = Board::blank(size);
        for (x, y) in board.cells() {
            let (tx, ty) = self.map_cell(x, y, size);
            result.set_height(tx, ty, board.height(x, y));
            result.set_occupant(tx, ty, board.occupant(x, y));
            result.set_score(tx, ty, board.score(x, y));
        }
        result
    }

    /// Moves every entry of `policy` to the id of its mapped action.
    ///
    /// Panics if `policy` does not have exactly [`ACTION_SPACE_SIZE`] entries.
    pub fn apply_to_policy(self, policy: &[f32]) -> Vec<f32> {
        assert_eq!(
            policy.len(),
            ACTION_SPACE_SIZE,
            "A policy needs one entry per action"
        );
        let mut result = vec![0.0; ACTION_SPACE_SIZE];
        for (id, &p) in policy.iter().enumerate() {
            // Ids below the pass id fit into u16
            let mapped = self.map_action(Action(id as u16));
            result[mapped.id()] = p;
        }
        result
    }
}
