//! Shuffling the options of a single question.
//!
//! The correct option is followed through the permutation by its original
//! position, so questions with repeated option texts still report the right
//! letter.

use rand::{Rng, seq::SliceRandom};

use crate::domain::Letter;

/// A reordering of the four options of a question.
///
/// `order[new]` is the original index of the option that ends up at position
/// `new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permutation {
    order: [usize; 4],
}

impl Permutation {
    /// The permutation that leaves every option in place.
    pub const IDENTITY: Self = Self {
        order: [0, 1, 2, 3],
    };

    /// Draws one of the 24 permutations uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut order = Self::IDENTITY.order;
        order.shuffle(rng);
        Self { order }
    }

    /// Builds a permutation from an explicit order.
    ///
    /// Returns `None` unless `order` contains each of `0..4` exactly once.
    #[must_use]
    pub fn from_order(order: [usize; 4]) -> Option<Self> {
        let mut seen = [false; 4];
        for &index in &order {
            if index >= 4 || seen[index] {
                return None;
            }
            seen[index] = true;
        }
        Some(Self { order })
    }

    /// Whether every option stays where it was.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// The letter that the option originally at `original` moves to.
    #[must_use]
    pub fn destination(&self, original: Letter) -> Letter {
        Letter::ALL
            .into_iter()
            .find(|new| self.order[new.index()] == original.index())
            .unwrap_or(original)
    }

    /// The letter whose option moves to `new`.
    #[must_use]
    pub const fn source(&self, new: Letter) -> Letter {
        match Letter::from_index(self.order[new.index()]) {
            Some(letter) => letter,
            None => new,
        }
    }

    /// Reorders four values according to the permutation.
    #[must_use]
    pub fn apply<T: Clone>(&self, values: &[T; 4]) -> [T; 4] {
        self.order.map(|index| values[index].clone())
    }
}

/// The result of shuffling one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shuffled {
    /// The option texts in their new letter order.
    pub options: [String; 4],
    /// The letter under which the originally-correct option now sits.
    pub correct: Letter,
}

/// Reorders `options` by `permutation` and reports the new position of the
/// option currently marked `correct`.
#[must_use]
pub fn shuffle_options(
    options: [&str; 4],
    correct: Letter,
    permutation: &Permutation,
) -> Shuffled {
    Shuffled {
        options: permutation.apply(&options).map(str::to_string),
        correct: permutation.destination(correct),
    }
}
