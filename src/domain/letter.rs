use std::{fmt, str::FromStr};

/// The label of one of the four options of a question.
///
/// Letters are ordered `A < B < C < D`, which is also the order the options
/// appear in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Letter {
    /// The first option.
    A,
    /// The second option.
    B,
    /// The third option.
    C,
    /// The fourth option.
    D,
}

impl Letter {
    /// All letters, in document order.
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Zero-based position of the letter (`A` is `0`).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    /// Returns the letter at the given zero-based position, if any.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::A),
            1 => Some(Self::B),
            2 => Some(Self::C),
            3 => Some(Self::D),
            _ => None,
        }
    }

    /// The option marker that starts an option line, e.g. `"A)"`.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::A => "A)",
            Self::B => "B)",
            Self::C => "C)",
            Self::D => "D)",
        }
    }

    const fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl TryFrom<char> for Letter {
    type Error = LetterError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'A' => Ok(Self::A),
            'B' => Ok(Self::B),
            'C' => Ok(Self::C),
            'D' => Ok(Self::D),
            other => Err(LetterError(other.to_string())),
        }
    }
}

impl FromStr for Letter {
    type Err = LetterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c),
            _ => Err(LetterError(s.to_string())),
        }
    }
}

/// Error returned when a string is not one of the option letters `A`-`D`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid option letter '{0}': expected one of A, B, C, D")]
pub struct LetterError(String);
