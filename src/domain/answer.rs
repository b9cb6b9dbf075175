use std::sync::LazyLock;

use regex::Regex;

use crate::domain::Letter;

static ANSWER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.\s+\*\*([A-D])\*\*\s+-\s+(.+)").expect("answer pattern is valid")
});

/// An entry of the answer key: `3. **B** - because ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    number: usize,
    letter: Letter,
    explanation: String,
    line: usize,
}

impl AnswerRecord {
    /// Parses an answer-key line.
    ///
    /// The line is trimmed before matching. Returns `None` for anything that is
    /// not an answer entry, such as blank lines or continuation text.
    #[must_use]
    pub fn parse(line: &str, index: usize) -> Option<Self> {
        let captures = ANSWER_LINE.captures(line.trim())?;

        let number = captures[1].parse().ok()?;
        let letter = captures[2].parse().ok()?;

        Some(Self {
            number,
            letter,
            explanation: captures[3].to_string(),
            line: index,
        })
    }

    /// The question number this entry answers.
    #[must_use]
    pub const fn number(&self) -> usize {
        self.number
    }

    /// The letter currently marked correct.
    #[must_use]
    pub const fn letter(&self) -> Letter {
        self.letter
    }

    /// The explanation text following the separator.
    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Index of the source line in the document.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Renders the entry with a different correct letter, keeping the
    /// explanation verbatim. No line terminator is included.
    #[must_use]
    pub fn render(&self, letter: Letter) -> String {
        format!("{}. **{letter}** - {}", self.number, self.explanation)
    }
}
