// src/store.rs
use async_trait::async_trait;

use crate::error::PollResult;
use crate::models::{Choice, NewChoice, NewQuestion, Question};

/// Persistence for questions and their choices.
///
/// Implementations must make `increment_votes` a single indivisible update
/// and must delete a question's choices together with the question.
#[async_trait]
pub trait PollStore: Send + Sync {
    async fn create_question(&self, new: NewQuestion) -> PollResult<Question>;

    /// Fails with `UnknownQuestion` if the owning question does not exist.
    async fn create_choice(&self, new: NewChoice) -> PollResult<Choice>;

    async fn question(&self, id: i64) -> PollResult<Option<Question>>;

    /// Every stored question, published or not, in no particular order.
    async fn questions(&self) -> PollResult<Vec<Question>>;

    /// Choices of a question ordered by id.
    async fn choices(&self, question_id: i64) -> PollResult<Vec<Choice>>;

    /// Adds one vote to `choice_id` if it belongs to `question_id`.
    ///
    /// Returns the updated choice, or `None` when no such pairing exists.
    async fn increment_votes(&self, question_id: i64, choice_id: i64) -> PollResult<Option<Choice>>;

    /// Returns whether a question was deleted.
    async fn delete_question(&self, id: i64) -> PollResult<bool>;
}

#[cfg(test)]
mod memory;

#[cfg(test)]
pub use memory::MemoryStore;
