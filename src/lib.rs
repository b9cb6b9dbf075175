//! Rebalancing the answer key of markdown quickfire quizzes.
//!
//! A quickfire quiz is a markdown document with a `## Questions` section of
//! four-option questions and a `## Answers` section recording the correct
//! letter of each. This crate shuffles the options of every question and
//! rewrites the answer key to match, leaving the rest of the document as it
//! was.

pub mod domain;
pub use domain::{
    AnswerRecord, Config, Correspondence, Letter, OptionLine, Permutation, Question,
};

/// Reading, shuffling and rewriting quiz documents on disk.
pub mod storage;
pub use storage::{Directory, Document, Quiz, ScanError, ShuffleError, scan};
