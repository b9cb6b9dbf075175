pub mod directory;
pub mod document;
pub mod rewrite;
pub mod scanner;

pub use directory::{
    Directory, Options, Outcome, ShuffleError, Summary, shuffle_document, shuffle_documents,
};
pub use document::{Document, Edit, Patch};
pub use rewrite::{AnswerChange, Plan, plan, plan_with};
pub use scanner::{Quiz, ScanError, scan};
