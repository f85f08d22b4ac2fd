use crate::{ActionKind, ActionSet, Board, Color, DecodedAction, Direction, MAX_HEIGHT};

impl Board {
    /// Where the piece on `(x, y)` would end up when stepping in `dir`, if it may.
    ///
    /// A piece may step onto an empty neighbor that is not capped, climbing at
    /// most one level but dropping any number of levels.
    pub fn move_target(&self, x: usize, y: usize, dir: Direction) -> Option<(usize, usize)> {
        let (tx, ty) = dir.step(x, y, self.size())?;
        let target_height = self.height(tx, ty);
        let admissible = self.occupant(tx, ty) == 0
            && target_height < MAX_HEIGHT
            && target_height <= self.height(x, y) + 1;
        admissible.then_some((tx, ty))
    }

    /// The cell a piece standing on `(x, y)` would build on in direction `dir`,
    /// if that tower is not capped.
    ///
    /// Occupied cells are fine to build on.
    pub fn build_target(&self, x: usize, y: usize, dir: Direction) -> Option<(usize, usize)> {
        let (tx, ty) = dir.step(x, y, self.size())?;
        (self.height(tx, ty) < MAX_HEIGHT).then_some((tx, ty))
    }

    /// All build actions `color` can currently play.
    ///
    /// If this is empty, the only thing left to do is to pass.
    pub fn legal_moves(&self, color: Color) -> ActionSet {
        let mut moves = ActionSet::new();
        for (x, y) in self.pieces(color) {
            let piece_selector = self.occupant(x, y).unsigned_abs() - 1;
            for move_dir in Direction::ALL {
                let Some((mx, my)) = self.move_target(x, y, move_dir) else {
                    continue;
                };
                for build_dir in Direction::ALL {
                    // The moved piece has left (x, y), but the height there
                    // is unchanged, so the board itself can be queried.
                    if self.build_target(mx, my, build_dir).is_some() {
                        let action = DecodedAction {
                            piece_selector,
                            kind: ActionKind::Build,
                            move_dir,
                            build_dir,
                        }
                        .encode();
                        moves = moves.insert(action);
                    }
                }
            }
        }
        moves
    }

    /// Can any piece of `color` step somewhere?
    ///
    /// Unlike [`Board::legal_moves`], this does not require a build to be
    /// possible afterwards, so a color can have "legal moves" according to
    /// this function and still have to pass.
    pub fn has_legal_moves(&self, color: Color) -> bool {
        self.pieces(color).any(|(x, y)| {
            Direction::ALL
                .into_iter()
                .any(|dir| self.move_target(x, y, dir).is_some())
        })
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::ReachableBoard;
    use crate::Action;

    quickcheck! {
        fn legal_moves_follow_the_rules(input: ReachableBoard, color: Color) -> bool {
            let board = input.board;
            board.legal_moves(color).into_iter().all(|action| {
                let decoded = action.decode();
                if decoded.kind != ActionKind::Build || decoded.piece_selector != 0 {
                    return false;
                }
                let Some((x, y)) = board.pieces(color).next() else {
                    return false;
                };
                let Some((mx, my)) = decoded.move_dir.step(x, y, board.size()) else {
                    return false;
                };
                let Some((bx, by)) = decoded.build_dir.step(mx, my, board.size()) else {
                    return false;
                };
                board.occupant(mx, my) == 0
                    && board.height(mx, my) < MAX_HEIGHT
                    && board.height(mx, my) <= board.height(x, y) + 1
                    && board.height(bx, by) < MAX_HEIGHT
            })
        }

        fn legal_moves_imply_mobility(input: ReachableBoard, color: Color) -> bool {
            let board = input.board;
            board.legal_moves(color).is_empty() || board.has_legal_moves(color)
        }
    }

    #[test]
    fn opening_moves_on_six_by_six() {
        let board = Board::new(6);
        let moves = board.legal_moves(Color::White);
        // The white piece on (2, 2) may step in every direction but north-east,
        // where the black piece stands. Nothing is near an edge, so every
        // build direction is available after each step.
        assert_eq!(moves.len(), 7 * 8);
        for move_dir in Direction::ALL {
            for build_dir in Direction::ALL {
                let action = DecodedAction::build(move_dir, build_dir).encode();
                assert_eq!(moves.contains(action), move_dir != Direction::NorthEast);
            }
        }
        assert_eq!(board.legal_moves(Color::Black).len(), 7 * 8);
        assert_eq!(moves.to_mask()[Action::PASS.id()], 0);
    }

    #[test]
    fn edges_prune_moves_and_builds() {
        let mut board = Board::new(6);
        board.set_occupant(2, 2, 0);
        board.set_occupant(0, 0, 1);
        let moves = board.legal_moves(Color::White);
        // Only N, NE and E stay on the board.
        // From (0, 1): 5 build directions, from (1, 1): 8, from (1, 0): 5.
        assert_eq!(moves.len(), 5 + 8 + 5);
        assert!(moves.contains(DecodedAction::build(Direction::North, Direction::South).encode()));
        assert!(!moves.contains(DecodedAction::build(Direction::North, Direction::West).encode()));
        assert!(!moves.contains(DecodedAction::build(Direction::West, Direction::East).encode()));
    }

    #[test]
    fn climbing_is_limited_to_one_level() {
        let mut board = Board::new(6);
        board.set_height(2, 3, 1);
        board.set_height(1, 2, 2);
        board.set_height(3, 2, 4);
        assert!(board.move_target(2, 2, Direction::North).is_some());
        assert!(board.move_target(2, 2, Direction::West).is_none());
        assert!(board.move_target(2, 2, Direction::East).is_none());
        // Dropping down is always fine
        board.set_height(2, 2, 3);
        assert!(board.move_target(2, 2, Direction::West).is_some());
        assert!(board.move_target(2, 2, Direction::East).is_none());
    }

    #[test]
    fn builds_skip_capped_towers_but_not_pieces() {
        let mut board = Board::new(6);
        board.set_height(2, 1, 4);
        // Step south to (2, 1) is blocked by the capped tower.
        assert!(board.move_target(2, 2, Direction::South).is_none());
        // Step west to (1, 2), then build south-east on the capped (2, 1).
        assert!(board.build_target(1, 2, Direction::SouthEast).is_none());
        // Stepping north to (2, 3) and building east puts a level below the black piece.
        let moves = board.legal_moves(Color::White);
        assert!(moves.contains(DecodedAction::build(Direction::North, Direction::East).encode()));
        assert!(!moves.contains(DecodedAction::build(Direction::West, Direction::SouthEast).encode()));
    }

    #[test]
    fn surrounded_piece_passes() {
        let mut board = Board::new(4);
        // White on (1, 1): cap every neighbor except the one black stands on.
        for dir in Direction::ALL {
            if let Some((x, y)) = dir.step(1, 1, 4) {
                if board.occupant(x, y) == 0 {
                    board.set_height(x, y, MAX_HEIGHT);
                }
            }
        }
        assert!(!board.has_legal_moves(Color::White));
        assert!(board.legal_moves(Color::White).is_empty());
        assert_eq!(board.legal_moves(Color::White).or_pass(), vec![Action::PASS]);
    }

    #[test]
    fn mobility_without_builds() {
        // 2x2: white stands on a capped tower at (0, 0), black on a capped tower
        // at (1, 1), and (0, 1) is capped too. White can step east to (1, 0),
        // but every neighbor of (1, 0) is capped, so there is nothing to build.
        let board =
            Board::from_grids(2, vec![4, 4, 0, 4], vec![1, 0, 0, -1], vec![0; 4]).unwrap();
        assert!(board.has_legal_moves(Color::White));
        assert!(board.legal_moves(Color::White).is_empty());
        assert_eq!(board.legal_moves(Color::White).to_mask()[Action::PASS.id()], 1);
        // Black can only step south to (1, 0), where the same holds.
        assert!(board.has_legal_moves(Color::Black));
        assert!(board.legal_moves(Color::Black).is_empty());
    }
}
