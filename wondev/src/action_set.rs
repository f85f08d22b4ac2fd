use std::iter::FusedIterator;

use crate::{Action, ACTION_SPACE_SIZE};

/// A compact set of the non-pass [`Action`]s of the action space.
///
/// Pass is not a member of any set; instead, it is what an agent plays when
/// the set of legal moves is empty (see [`ActionSet::to_mask`] and
/// [`ActionSet::or_pass`]).
///
/// ```
/// use wondev::{Action, ActionSet};
/// let set = ActionSet::new().insert(Action(9)).insert(Action(2)).insert(Action(9));
/// assert_eq!(Vec::from_iter(set), vec![Action(2), Action(9)]);
/// assert_eq!(set.or_pass(), vec![Action(2), Action(9)]);
/// assert_eq!(ActionSet::new().or_pass(), vec![Action::PASS]);
/// ```
///
/// Like the action ids themselves, this is an immutable [`Copy`] value, so its
/// "mutating" methods return a new set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ActionSet {
    // Bit i is action i. There are exactly 128 non-pass actions.
    bits: u128,
}

const _: () = assert!(ACTION_SPACE_SIZE - 1 == u128::BITS as usize);

impl ActionSet {
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn len(self) -> u32 {
        self.bits.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Always `false` for [`Action::PASS`] and ids outside of the action space.
    pub fn contains(self, action: Action) -> bool {
        action.id() < ACTION_SPACE_SIZE - 1 && self.bits & (1u128 << action.0) != 0
    }

    /// Panics for [`Action::PASS`] and ids outside of the action space.
    #[must_use] // Because users might expect this to be a mutating method
    pub fn insert(self, action: Action) -> Self {
        assert!(
            action.id() < ACTION_SPACE_SIZE - 1,
            "Action {} cannot be stored in an ActionSet",
            action.0
        );
        Self {
            bits: self.bits | (1u128 << action.0),
        }
    }

    #[must_use] // Because users might expect this to be a mutating method
    pub fn remove(self, action: Action) -> Self {
        if !self.contains(action) {
            return self;
        }
        Self {
            bits: self.bits & !(1u128 << action.0),
        }
    }

    /// The actions an agent may choose from: the members of this set, or just
    /// [`Action::PASS`] if it is empty.
    pub fn or_pass(self) -> Vec<Action> {
        if self.is_empty() {
            vec![Action::PASS]
        } else {
            self.into_iter().collect()
        }
    }

    /// A 0/1 vector over the whole action space, of length [`ACTION_SPACE_SIZE`].
    ///
    /// The pass entry is 1 if and only if the set is empty.
    pub fn to_mask(self) -> Vec<u8> {
        let mut mask = vec![0u8; ACTION_SPACE_SIZE];
        for action in self {
            mask[action.id()] = 1;
        }
        if self.is_empty() {
            mask[Action::PASS.id()] = 1;
        }
        mask
    }
}

impl std::ops::BitOr for ActionSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl std::ops::BitAnd for ActionSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self {
            bits: self.bits & rhs.bits,
        }
    }
}

impl std::ops::BitOrAssign for ActionSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<T: IntoIterator<Item = Action>>(iter: T) -> Self {
        iter.into_iter().fold(Self::new(), Self::insert)
    }
}

impl IntoIterator for ActionSet {
    type Item = Action;

    type IntoIter = ActionSetIter;

    fn into_iter(self) -> Self::IntoIter {
        ActionSetIter { bits: self.bits }
    }
}

/// Iterator for an [`ActionSet`] that returns actions by ascending id.
#[derive(Clone, Copy, Debug)]
pub struct ActionSetIter {
    bits: u128,
}

impl Iterator for ActionSetIter {
    type Item = Action;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            // At most 127, so the cast can't truncate
            let id = self.bits.trailing_zeros() as u16;
            self.bits &= self.bits - 1;
            Some(Action(id))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bits.count_ones() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for ActionSetIter {}

impl FusedIterator for ActionSetIter {}
