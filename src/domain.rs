//! Domain models for quickfire quizzes.
//!
//! This module contains the option letters, parsed questions and answer-key
//! entries, the shuffle engine and configuration.

mod answer;
pub use answer::AnswerRecord;

mod config;
pub use config::{CONFIG_FILE, Config, ConfigError, Correspondence};

mod letter;
pub use letter::{Letter, LetterError};

mod question;
pub use question::{OptionLine, Question};

pub mod shuffle;
pub use shuffle::{Permutation, Shuffled, shuffle_options};
