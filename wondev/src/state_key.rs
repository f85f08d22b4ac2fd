use crate::Board;

/// A compact byte string that identifies a board, suitable as a hash map key
/// for search tables.
///
/// Two boards have the same key exactly when they are equal. The layout is the
/// size as two little-endian bytes, followed by the height, occupant and score
/// grids, one byte per cell each.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateKey(Box<[u8]>);

impl StateKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Board {
    pub fn state_key(&self) -> StateKey {
        let cells = self.size() * self.size();
        let mut bytes = Vec::with_capacity(2 + 3 * cells);
        // Boards are at most 255 cells wide, see `Board::from_grids`
        bytes.extend_from_slice(&(self.size() as u16).to_le_bytes());
        bytes.extend_from_slice(self.heights());
        bytes.extend(self.occupants().iter().map(|&o| o as u8));
        bytes.extend(self.scores().iter().map(|&s| s as u8));
        StateKey(bytes.into_boxed_slice())
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::ReachableBoard;
    use crate::Color;

    quickcheck! {
        fn equal_keys_for_equal_boards(input: ReachableBoard) -> bool {
            input.board.state_key() == input.board.clone().state_key()
        }

        fn canonical_forms_differ_when_pieces_do(input: ReachableBoard) -> bool {
            let white = input.board.canonical_form(Color::White);
            let black = input.board.canonical_form(Color::Black);
            (white == black) == (white.state_key() == black.state_key())
        }
    }

    #[test]
    fn layout() {
        let board = Board::new(2);
        let key = board.state_key();
        assert_eq!(
            key.as_bytes(),
            &[2u8, 0, 0, 0, 0, 0, 1, 0, 0, 255, 0, 0, 0, 0]
        );
    }

    #[test]
    fn single_cell_changes_the_key() {
        let board = Board::new(6);
        let mut higher = board.clone();
        higher.set_height(0, 5, 1);
        let mut scored = board.clone();
        scored.set_score(0, 5, -1);
        assert_ne!(board.state_key(), higher.state_key());
        assert_ne!(board.state_key(), scored.state_key());
        assert_ne!(higher.state_key(), scored.state_key());
        // Sizes are part of the key
        assert_ne!(Board::new(4).state_key(), Board::new(5).state_key());
    }
}
