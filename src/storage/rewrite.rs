//! Turning shuffled questions into line edits.

use rand::Rng;

use crate::{
    domain::{Correspondence, Letter, Permutation, Question, shuffle_options},
    storage::{
        document::{Edit, Patch},
        scanner::Quiz,
    },
};

/// An answer-key entry whose correct letter moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerChange {
    /// The question number of the entry.
    pub number: usize,
    /// The letter before shuffling.
    pub from: Letter,
    /// The letter after shuffling.
    pub to: Letter,
}

/// The edits needed to shuffle every paired question of a quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    /// Line replacements for option lines and answer-key lines.
    pub patch: Patch,
    /// Number of questions that were shuffled.
    pub shuffled: usize,
    /// Answer-key entries whose letter changed.
    pub changes: Vec<AnswerChange>,
}

/// Shuffles every question that has an answer-key entry, drawing each
/// permutation from `rng`.
pub fn plan<R: Rng + ?Sized>(quiz: &Quiz, correspondence: Correspondence, rng: &mut R) -> Plan {
    plan_with(quiz, correspondence, |_| Permutation::random(&mut *rng))
}

/// Shuffles every question that has an answer-key entry, using the
/// permutation returned by `permutation_for`.
///
/// Option lines whose text does not change and answer lines whose letter does
/// not change are left out of the patch, so they stay byte-identical.
pub fn plan_with<F>(quiz: &Quiz, correspondence: Correspondence, mut permutation_for: F) -> Plan
where
    F: FnMut(&Question) -> Permutation,
{
    let mut plan = Plan::default();

    for (question, answer) in quiz.pairs(correspondence) {
        let permutation = permutation_for(question);
        let shuffled = shuffle_options(question.texts(), answer.letter(), &permutation);

        for (letter, (option, text)) in Letter::ALL
            .into_iter()
            .zip(question.options().iter().zip(&shuffled.options))
        {
            if option.text() == text {
                continue;
            }
            plan.patch.push(Edit::new(
                option.line(),
                format!("{}{} {text}", option.indent(), letter.marker()),
            ));
        }

        if shuffled.correct != answer.letter() {
            tracing::debug!(
                "Question {}: correct answer moved from {} to {}",
                answer.number(),
                answer.letter(),
                shuffled.correct
            );
            plan.patch
                .push(Edit::new(answer.line(), answer.render(shuffled.correct)));
            plan.changes.push(AnswerChange {
                number: answer.number(),
                from: answer.letter(),
                to: shuffled.correct,
            });
        }

        plan.shuffled += 1;
    }

    plan
}
