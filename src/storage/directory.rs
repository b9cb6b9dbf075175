//! Discovering quiz documents and shuffling them on disk.
//!
//! The [`Directory`] finds quiz documents below a root, and
//! [`shuffle_documents`] runs the scan, shuffle and rewrite pipeline over
//! them one at a time.

use std::{
    fmt, io,
    path::{Path, PathBuf},
};

use nonempty::NonEmpty;
use rand::Rng;
use walkdir::WalkDir;

use crate::{
    domain::{Config, Correspondence},
    storage::{
        document::Document,
        rewrite::plan,
        scanner::{ScanError, scan},
    },
};

/// A directory tree containing quiz documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    root: PathBuf,
    config: Config,
}

impl Directory {
    /// Opens a directory, reading `quickfire.toml` from its root if present.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        let config = Config::load_or_default(&root);
        Self { root, config }
    }

    /// Opens a directory with an explicit configuration.
    #[must_use]
    pub const fn with_config(root: PathBuf, config: Config) -> Self {
        Self { root, config }
    }

    /// The root of the directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// All quiz documents below the root, sorted by path.
    ///
    /// Unreadable directory entries are skipped.
    #[must_use]
    pub fn documents(&self) -> Vec<PathBuf> {
        let mut paths: Vec<_> = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(self.config.max_depth)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {e}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| entry.file_name() == self.config.file_name.as_str())
            .map(walkdir::DirEntry::into_path)
            .collect();

        paths.sort();
        paths
    }
}

/// Settings for a shuffle run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// How questions are paired with answers.
    pub correspondence: Correspondence,
    /// Compute the changes without writing them.
    pub dry_run: bool,
}

/// What happened to a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The document was shuffled (and written, unless this is a dry run).
    Shuffled {
        /// Number of questions shuffled.
        questions: usize,
        /// Number of answer-key entries whose letter changed.
        changed: usize,
    },
    /// The document could not be parsed and was left untouched.
    Skipped(ScanError),
}

/// Counts of what a shuffle run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Documents shuffled.
    pub shuffled: usize,
    /// Documents skipped because they could not be parsed.
    pub skipped: usize,
    /// Answer-key entries changed across all documents.
    pub changed: usize,
}

impl Summary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Shuffled { changed, .. } => {
                self.shuffled += 1;
                self.changed += changed;
            }
            Outcome::Skipped(_) => self.skipped += 1,
        }
    }
}

/// Shuffles the questions of a single document in place.
///
/// A document that cannot be parsed is reported as [`Outcome::Skipped`] and
/// not written.
///
/// # Errors
///
/// Returns an error if the document cannot be read, or cannot be written back.
pub fn shuffle_document<R: Rng + ?Sized>(
    path: &Path,
    options: Options,
    rng: &mut R,
) -> io::Result<Outcome> {
    let mut document = Document::read(path)?;

    let quiz = match scan(&document) {
        Ok(quiz) => quiz,
        Err(e) => {
            tracing::warn!("Could not parse {}: {e}", path.display());
            return Ok(Outcome::Skipped(e));
        }
    };

    let plan = plan(&quiz, options.correspondence, rng);
    let outcome = Outcome::Shuffled {
        questions: plan.shuffled,
        changed: plan.changes.len(),
    };

    if options.dry_run {
        tracing::info!(
            "Dry run: {} edits not written to {}",
            plan.patch.len(),
            path.display()
        );
        return Ok(outcome);
    }

    if !plan.patch.is_empty() {
        document.apply(plan.patch);
        document.write(path)?;
    }
    tracing::info!(
        "Shuffled {} questions in {}",
        plan.shuffled,
        path.display()
    );

    Ok(outcome)
}

/// Shuffles each document in turn.
///
/// `observer` is called with the path and result of every document, in order,
/// before the next document is opened.
///
/// # Errors
///
/// This function does *not* fail fast. Every document is attempted, and the
/// paths that could not be read or written are returned together.
pub fn shuffle_documents<R, F>(
    paths: &[PathBuf],
    options: Options,
    rng: &mut R,
    mut observer: F,
) -> Result<Summary, ShuffleError>
where
    R: Rng + ?Sized,
    F: FnMut(&Path, &io::Result<Outcome>),
{
    let mut summary = Summary::default();
    let mut failures = Vec::new();

    for path in paths {
        let result = shuffle_document(path, options, &mut *rng);
        observer(path, &result);
        match result {
            Ok(outcome) => summary.record(outcome),
            Err(e) => failures.push((path.clone(), e)),
        }
    }

    NonEmpty::from_vec(failures).map_or(Ok(summary), |failures| {
        Err(ShuffleError { summary, failures })
    })
}

/// Some documents could not be read or written.
#[derive(Debug, thiserror::Error)]
pub struct ShuffleError {
    summary: Summary,
    failures: NonEmpty<(PathBuf, io::Error)>,
}

impl ShuffleError {
    /// What was done for the documents that did not fail.
    #[must_use]
    pub const fn summary(&self) -> &Summary {
        &self.summary
    }

    /// The documents that failed, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = &(PathBuf, io::Error)> {
        self.failures.iter()
    }
}

impl fmt::Display for ShuffleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MAX_DISPLAY: usize = 5;

        write!(f, "failed to shuffle: ")?;

        let total = self.failures.len();

        let displayed_paths: Vec<String> = self
            .failures
            .iter()
            .take(MAX_DISPLAY)
            .map(|(p, e)| format!("{} ({e})", p.display()))
            .collect();

        let msg = displayed_paths.join(", ");

        if total <= MAX_DISPLAY {
            write!(f, "{msg}")
        } else {
            write!(f, "{msg}... (and {} more)", total - MAX_DISPLAY)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rand::{SeedableRng, rngs::StdRng};
    use tempfile::TempDir;

    use super::*;
    use crate::domain::CONFIG_FILE;

    const QUIZ: &str = "\
# Quickfire

## Questions

### 1. What is the capital of France?
A) Paris
B) Berlin
C) Madrid
D) Rome

### 2. Which number is prime?
A) 4
B) 6
C) 7
D) 9

### 3. Which is a primary colour?
A) Green
B) Red
C) Orange
D) Purple

## Answers

1. **A** - Paris.
2. **C** - Seven.
3. **B** - Red.

## Study Resources

- [Atlas](https://example.com)
";

    fn write_quiz(root: &Path, lab: &str, content: &str) -> PathBuf {
        let dir = root.join(lab);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("quickfire.md");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn discovers_documents_below_root() {
        let tmp = TempDir::new().unwrap();
        let b = write_quiz(tmp.path(), "lab-b", QUIZ);
        let a = write_quiz(tmp.path(), "lab-a", QUIZ);
        write_quiz(tmp.path(), "too/deep", QUIZ);
        fs::write(tmp.path().join("lab-a/notes.md"), QUIZ).unwrap();

        let directory = Directory::new(tmp.path().to_path_buf());

        assert_eq!(directory.documents(), [a, b]);
    }

    #[test]
    fn config_changes_discovery() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "_version = \"1\"\nfile_name = \"quiz.md\"\nmax_depth = 3\n",
        )
        .unwrap();
        let dir = tmp.path().join("a/b");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("quiz.md"), QUIZ).unwrap();
        write_quiz(tmp.path(), "c", QUIZ);

        let directory = Directory::new(tmp.path().to_path_buf());

        assert_eq!(directory.documents(), [dir.join("quiz.md")]);
    }

    #[test]
    fn shuffles_document_in_place() {
        let tmp = TempDir::new().unwrap();
        let path = write_quiz(tmp.path(), "lab", QUIZ);
        let mut rng = StdRng::seed_from_u64(1);

        let outcome = shuffle_document(&path, Options::default(), &mut rng).unwrap();

        let Outcome::Shuffled { questions, changed } = outcome else {
            panic!("expected the document to be shuffled, got {outcome:?}");
        };
        assert_eq!(questions, 3);
        assert!(changed <= 3);

        let rewritten = fs::read_to_string(&path).unwrap();
        assert!(rewritten.starts_with("# Quickfire\n\n## Questions\n"));
        assert!(rewritten.ends_with("## Study Resources\n\n- [Atlas](https://example.com)\n"));

        let quiz = scan(&Document::new(&rewritten)).unwrap();
        let correct: Vec<_> = quiz
            .pairs(Correspondence::Heading)
            .map(|(question, answer)| question.option(answer.letter()).text().to_string())
            .collect();
        assert_eq!(correct, ["Paris", "7", "Red"]);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let path = write_quiz(tmp.path(), "lab", QUIZ);
        let mut rng = StdRng::seed_from_u64(3);
        let options = Options {
            dry_run: true,
            ..Options::default()
        };

        let outcome = shuffle_document(&path, options, &mut rng).unwrap();

        assert!(matches!(outcome, Outcome::Shuffled { questions: 3, .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), QUIZ);
    }

    #[test]
    fn unparseable_document_is_skipped_and_run_continues() {
        let tmp = TempDir::new().unwrap();
        let notes = "# Notes\n\nNo quiz here.\n";
        let first = write_quiz(tmp.path(), "a", notes);
        let second = write_quiz(tmp.path(), "b", QUIZ);
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = Vec::new();

        let summary = shuffle_documents(
            &[first.clone(), second.clone()],
            Options::default(),
            &mut rng,
            |path, result| seen.push((path.to_path_buf(), result.is_ok())),
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&first).unwrap(), notes);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.shuffled, 1);
        assert_eq!(seen, [(first, true), (second, true)]);
    }

    #[test]
    fn io_failures_do_not_stop_the_run() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing/quickfire.md");
        let present = write_quiz(tmp.path(), "present", QUIZ);
        let mut rng = StdRng::seed_from_u64(9);

        let error = shuffle_documents(
            &[missing.clone(), present],
            Options::default(),
            &mut rng,
            |_, _| {},
        )
        .unwrap_err();

        assert_eq!(error.summary().shuffled, 1);
        let failed: Vec<_> = error.failures().map(|(path, _)| path.clone()).collect();
        assert_eq!(failed, [missing]);
        assert!(error.to_string().starts_with("failed to shuffle: "));
    }

    #[test]
    fn repeated_runs_spread_correct_answers() {
        let tmp = TempDir::new().unwrap();
        let path = write_quiz(tmp.path(), "lab", QUIZ);
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 4];

        for _ in 0..30 {
            shuffle_document(&path, Options::default(), &mut rng).unwrap();
            let quiz = scan(&Document::read(&path).unwrap()).unwrap();
            for (_, answer) in quiz.pairs(Correspondence::Heading) {
                seen[answer.letter().index()] = true;
            }
        }

        assert_eq!(seen, [true; 4]);
    }
}
