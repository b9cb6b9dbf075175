//! The line buffer of a quiz document and the patches applied to it.

use std::{
    fmt,
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

/// The text of a quiz document as an ordered list of lines.
///
/// Each line keeps its own terminator (`\n`, `\r\n`, or nothing for an
/// unterminated final line), so the original bytes can be reproduced exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Splits `content` into lines.
    #[must_use]
    pub fn new(content: &str) -> Self {
        Self {
            lines: content.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    /// Reads a document from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid UTF-8.
    pub fn read(path: &Path) -> io::Result<Self> {
        std::fs::read_to_string(path).map(|content| Self::new(&content))
    }

    /// Overwrites the file at `path` with the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written to.
    pub fn write(&self, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        for line in &self.lines {
            writer.write_all(line.as_bytes())?;
        }
        writer.flush()
    }

    /// The lines of the document, terminators included.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document has no lines at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Applies every edit of `patch` in one pass.
    ///
    /// Each replaced line keeps the terminator of the line it replaces; a line
    /// that had none gets `\n`.
    pub fn apply(&mut self, patch: Patch) {
        for Edit { line, text } in patch.edits {
            let Some(current) = self.lines.get_mut(line) else {
                tracing::debug!("Ignoring edit past the end of the document (line {line})");
                continue;
            };
            let terminator = match terminator(current) {
                "" => "\n",
                other => other,
            };
            *current = format!("{text}{terminator}");
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            f.write_str(line)?;
        }
        Ok(())
    }
}

fn terminator(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

/// The leading whitespace of a line.
pub(crate) fn indentation(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// A replacement of one whole line, terminator excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    line: usize,
    text: String,
}

impl Edit {
    /// Replaces line `line` with `text`.
    #[must_use]
    pub const fn new(line: usize, text: String) -> Self {
        Self { line, text }
    }

    /// The index of the line to replace.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// The replacement text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A set of line replacements computed against an unchanged document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    edits: Vec<Edit>,
}

impl Patch {
    /// Adds an edit. Later edits to the same line win.
    pub fn push(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Number of edits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// The edits in the order they will be applied.
    pub fn iter(&self) -> impl Iterator<Item = &Edit> {
        self.edits.iter()
    }
}
