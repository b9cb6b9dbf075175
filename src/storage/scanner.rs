//! Scanning quiz documents for questions and answer-key entries.
//!
//! A quiz document looks like this:
//!
//! ```markdown
//! ## Questions
//!
//! ### 1. What is the capital of France?
//!
//! A) Paris
//! B) Berlin
//! C) Madrid
//! D) Rome
//!
//! ## Answers
//!
//! 1. **A** - Paris has been the capital since 987.
//!
//! ## Study Resources
//! ```
//!
//! Scanning stops at the study resources heading; nothing after it is read.

use std::{
    collections::{BTreeMap, HashSet},
    sync::LazyLock,
};

use regex::Regex;

use crate::{
    domain::{AnswerRecord, Correspondence, Letter, OptionLine, Question},
    storage::document::{Document, indentation},
};

/// Heading that opens the questions section.
pub const QUESTIONS_HEADING: &str = "## Questions";
/// Heading that opens the answer key.
pub const ANSWERS_HEADING: &str = "## Answers";
/// Heading after which nothing is scanned.
pub const STUDY_RESOURCES_HEADING: &str = "## Study Resources";

static QUESTION_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^###\s+(\d+)\.").expect("question heading pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Questions,
    Answers,
    StudyResources,
}

impl Section {
    fn of(line: &str) -> Option<Self> {
        match line.trim() {
            QUESTIONS_HEADING => Some(Self::Questions),
            ANSWERS_HEADING => Some(Self::Answers),
            STUDY_RESOURCES_HEADING => Some(Self::StudyResources),
            _ => None,
        }
    }
}

/// The questions and answer key found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    questions: Vec<Question>,
    answers: BTreeMap<usize, AnswerRecord>,
}

impl Quiz {
    /// The valid questions, in document order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The answer-key entries, keyed by question number.
    #[must_use]
    pub const fn answers(&self) -> &BTreeMap<usize, AnswerRecord> {
        &self.answers
    }

    /// Pairs each question with its answer-key entry.
    ///
    /// Questions without an entry are left out. An entry is paired with at
    /// most one question; with [`Correspondence::Heading`] a repeated heading
    /// number only pairs the first question carrying it.
    pub fn pairs(
        &self,
        correspondence: Correspondence,
    ) -> impl Iterator<Item = (&Question, &AnswerRecord)> {
        let mut used = HashSet::new();
        self.questions.iter().filter_map(move |question| {
            let key = match correspondence {
                Correspondence::Heading => question.number(),
                Correspondence::Ordinal => question.ordinal(),
            };
            let Some(answer) = self.answers.get(&key) else {
                tracing::debug!("No answer recorded for question {key}");
                return None;
            };
            if !used.insert(key) {
                tracing::debug!("Answer {key} is already paired with an earlier question");
                return None;
            }
            Some((question, answer))
        })
    }

    /// How many paired answers are marked with each letter, in letter order.
    #[must_use]
    pub fn letter_counts(&self, correspondence: Correspondence) -> [usize; 4] {
        let mut counts = [0; 4];
        for (_, answer) in self.pairs(correspondence) {
            counts[answer.letter().index()] += 1;
        }
        counts
    }
}

/// Errors that make a document unusable for shuffling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// No question with four options was found in a questions section.
    #[error("no questions with four options found")]
    NoQuestions,
    /// No answer-key entry was found in an answers section.
    #[error("no answers found")]
    NoAnswers,
}

/// Finds the questions and answer-key entries of a document.
///
/// # Errors
///
/// Returns an error if the document has no valid question or no answer-key
/// entry.
pub fn scan(document: &Document) -> Result<Quiz, ScanError> {
    let lines = document.lines();
    let mut section = None;
    let mut questions = Vec::new();
    let mut answers = BTreeMap::new();

    for (index, line) in lines.iter().enumerate() {
        match Section::of(line) {
            Some(Section::StudyResources) => break,
            Some(heading) => {
                section = Some(heading);
                continue;
            }
            None => {}
        }

        match section {
            Some(Section::Questions) => {
                let Some(number) = question_number(line) else {
                    continue;
                };
                match parse_question_block(lines, index, number, questions.len() + 1) {
                    Some(question) => questions.push(question),
                    None => tracing::debug!(
                        "Skipping question {number} at line {}: four options not found",
                        index + 1
                    ),
                }
            }
            Some(Section::Answers) => {
                if let Some(record) = AnswerRecord::parse(line, index) {
                    answers.insert(record.number(), record);
                }
            }
            _ => {}
        }
    }

    if questions.is_empty() {
        return Err(ScanError::NoQuestions);
    }
    if answers.is_empty() {
        return Err(ScanError::NoAnswers);
    }

    Ok(Quiz { questions, answers })
}

fn question_number(line: &str) -> Option<usize> {
    QUESTION_HEADING
        .captures(line.trim())
        .and_then(|captures| captures[1].parse().ok())
}

fn is_block_boundary(line: &str) -> bool {
    Section::of(line).is_some() || question_number(line).is_some()
}

/// Parses the question whose heading is at `start`.
///
/// Returns `None` unless the prompt is followed by `A)`, `B)`, `C)` and `D)`
/// option lines, in that order, before the next question heading.
fn parse_question_block(
    lines: &[String],
    start: usize,
    number: usize,
    ordinal: usize,
) -> Option<Question> {
    let mut prompt = String::new();
    let mut index = start + 1;

    loop {
        let line = lines.get(index)?;
        let trimmed = line.trim();
        if trimmed.starts_with(Letter::A.marker()) {
            break;
        }
        if is_block_boundary(line) {
            return None;
        }
        if !trimmed.is_empty() && !trimmed.starts_with("###") {
            prompt.push_str(line);
        }
        index += 1;
    }

    let mut options = Vec::with_capacity(Letter::ALL.len());
    for letter in Letter::ALL {
        let Some(option) = lines
            .get(index)
            .and_then(|line| parse_option_line(line, letter, index))
        else {
            break;
        };
        options.push(option);
        index += 1;
    }

    let options: [OptionLine; 4] = options.try_into().ok()?;
    Some(Question::new(number, ordinal, prompt, options, start, index))
}

fn parse_option_line(line: &str, letter: Letter, index: usize) -> Option<OptionLine> {
    let text = line.trim().strip_prefix(letter.marker())?.trim();
    Some(OptionLine::new(
        index,
        indentation(line).to_string(),
        text.to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIZ: &str = "\
# Lab 1 Quickfire

Intro text.

## Questions

### 1. What is the capital of France?

A) Paris
B) Berlin
C) Madrid
D) Rome

### 2. Which of these is a prime?
Pick one.
   A) 4
   B) 6
   C) 7
   D) 9

## Answers

1. **A** - Paris.
Some continuation.

2. **C** - Seven is prime.

## Study Resources

3. **B** - Not an answer, after the study resources heading.
";

    #[test]
    fn scans_questions_and_answers() {
        let quiz = scan(&Document::new(QUIZ)).unwrap();

        assert_eq!(quiz.questions().len(), 2);
        let first = &quiz.questions()[0];
        assert_eq!(first.number(), 1);
        assert_eq!(first.ordinal(), 1);
        assert_eq!(first.texts(), ["Paris", "Berlin", "Madrid", "Rome"]);
        assert_eq!(first.option(Letter::A).line(), 8);
        assert_eq!(first.lines(), 6..12);

        let second = &quiz.questions()[1];
        assert_eq!(second.prompt(), "Pick one.\n");
        assert_eq!(second.option(Letter::C).indent(), "   ");
        assert_eq!(second.texts(), ["4", "6", "7", "9"]);

        let answers: Vec<_> = quiz.answers().keys().copied().collect();
        assert_eq!(answers, [1, 2]);
        assert_eq!(quiz.answers()[&2].letter(), Letter::C);
    }

    #[test]
    fn missing_sections_fail() {
        let error = scan(&Document::new("# Just notes\n\nNothing here.\n")).unwrap_err();
        assert_eq!(error, ScanError::NoQuestions);

        let no_answers = QUIZ.replace(ANSWERS_HEADING, "## Solutions");
        let error = scan(&Document::new(&no_answers)).unwrap_err();
        assert_eq!(error, ScanError::NoAnswers);
    }

    #[test]
    fn questions_outside_section_are_ignored() {
        let content = "\
### 1. Not in a questions section
A) a
B) b
C) c
D) d
## Answers
1. **A** - a
";
        assert_eq!(
            scan(&Document::new(content)).unwrap_err(),
            ScanError::NoQuestions
        );
    }

    #[test]
    fn skips_block_with_three_options() {
        let content = "\
## Questions
### 1. Three options only
A) a
B) b
C) c

### 2. Complete
A) w
B) x
C) y
D) z
## Answers
1. **A** - a
2. **B** - x
";
        let quiz = scan(&Document::new(content)).unwrap();

        assert_eq!(quiz.questions().len(), 1);
        let question = &quiz.questions()[0];
        assert_eq!(question.number(), 2);
        assert_eq!(question.ordinal(), 1);
    }

    #[test]
    fn options_out_of_order_are_rejected() {
        let content = "\
## Questions
### 1. Skips B
A) a
C) c
B) b
D) d
## Answers
1. **A** - a
";
        assert_eq!(
            scan(&Document::new(content)).unwrap_err(),
            ScanError::NoQuestions
        );
    }

    #[test]
    fn prompt_scan_stops_at_next_question() {
        let content = "\
## Questions
### 1. No options at all

### 2. Has options
A) w
B) x
C) y
D) z
## Answers
2. **D** - z
";
        let quiz = scan(&Document::new(content)).unwrap();

        assert_eq!(quiz.questions().len(), 1);
        assert_eq!(quiz.questions()[0].number(), 2);
    }

    #[test]
    fn last_duplicate_answer_wins() {
        let content = "\
## Questions
### 1. Q
A) a
B) b
C) c
D) d
## Answers
1. **A** - first
1. **D** - second
";
        let quiz = scan(&Document::new(content)).unwrap();

        let answer = &quiz.answers()[&1];
        assert_eq!(answer.letter(), Letter::D);
        assert_eq!(answer.explanation(), "second");
        assert_eq!(answer.line(), 8);
    }

    #[test]
    fn pairing_policies_differ_after_skipped_question() {
        let content = "\
## Questions
### 1. Broken
A) a
### 2. Fine
A) w
B) x
C) y
D) z
## Answers
1. **A** - a
2. **C** - y
";
        let quiz = scan(&Document::new(content)).unwrap();

        let by_heading: Vec<_> = quiz
            .pairs(Correspondence::Heading)
            .map(|(q, a)| (q.number(), a.number()))
            .collect();
        assert_eq!(by_heading, [(2, 2)]);

        let by_ordinal: Vec<_> = quiz
            .pairs(Correspondence::Ordinal)
            .map(|(q, a)| (q.number(), a.number()))
            .collect();
        assert_eq!(by_ordinal, [(2, 1)]);
    }

    #[test]
    fn counts_correct_letters() {
        let quiz = scan(&Document::new(QUIZ)).unwrap();
        assert_eq!(quiz.letter_counts(Correspondence::Heading), [1, 0, 1, 0]);
    }
}
