use crate::domain::Letter;

/// One labelled option line of a question, as found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionLine {
    line: usize,
    indent: String,
    text: String,
}

impl OptionLine {
    /// Creates an option line record.
    ///
    /// `indent` is the exact leading whitespace of the source line and `text`
    /// is the option text with the marker removed.
    #[must_use]
    pub const fn new(line: usize, indent: String, text: String) -> Self {
        Self { line, indent, text }
    }

    /// Index of the line in the document.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Leading whitespace of the source line.
    #[must_use]
    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// The option text, without marker or surrounding whitespace.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A multiple-choice question with exactly four options.
///
/// Questions are only ever constructed from a block that yielded all four
/// option lines, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    number: usize,
    ordinal: usize,
    prompt: String,
    options: [OptionLine; 4],
    start: usize,
    end: usize,
}

impl Question {
    /// Creates a question.
    ///
    /// `number` is the integer in the question heading, `ordinal` the 1-based
    /// position among the valid questions of the document. `start` is the
    /// heading line and `end` the line just after the last option.
    #[must_use]
    pub const fn new(
        number: usize,
        ordinal: usize,
        prompt: String,
        options: [OptionLine; 4],
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            number,
            ordinal,
            prompt,
            options,
            start,
            end,
        }
    }

    /// The number written in the question heading (`### 3.` is `3`).
    #[must_use]
    pub const fn number(&self) -> usize {
        self.number
    }

    /// 1-based position among the valid questions of the document.
    #[must_use]
    pub const fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Free text between the heading and the first option.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The option labelled with `letter`.
    #[must_use]
    pub const fn option(&self, letter: Letter) -> &OptionLine {
        &self.options[letter.index()]
    }

    /// All four options in letter order.
    #[must_use]
    pub const fn options(&self) -> &[OptionLine; 4] {
        &self.options
    }

    /// The four option texts in letter order.
    #[must_use]
    pub fn texts(&self) -> [&str; 4] {
        self.options.each_ref().map(OptionLine::text)
    }

    /// The range of document lines covered by the question block.
    #[must_use]
    pub const fn lines(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}
