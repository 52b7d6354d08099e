// src/poll.rs
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::{PollError, PollResult};
use crate::models::{Choice, Question};
use crate::store::PollStore;

/// Questions published at or before `now`, most recent first.
pub fn select_published(questions: Vec<Question>, now: DateTime<Utc>) -> Vec<Question> {
    let mut published: Vec<Question> = questions
        .into_iter()
        .filter(|question| question.is_published(now))
        .collect();
    published.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));
    published
}

pub async fn latest_questions(store: &dyn PollStore, now: DateTime<Utc>) -> PollResult<Vec<Question>> {
    Ok(select_published(store.questions().await?, now))
}

/// Looks up a question, treating unpublished questions as missing.
pub async fn published_question(store: &dyn PollStore, id: i64, now: DateTime<Utc>) -> PollResult<Question> {
    match store.question(id).await? {
        Some(question) if question.is_published(now) => Ok(question),
        Some(_) => {
            debug!(question_id = id, "question not yet published");
            Err(PollError::NotFound)
        }
        None => Err(PollError::NotFound),
    }
}

pub async fn question_with_choices(
    store: &dyn PollStore,
    id: i64,
    now: DateTime<Utc>,
) -> PollResult<(Question, Vec<Choice>)> {
    let question = published_question(store, id, now).await?;
    let choices = store.choices(question.id).await?;
    Ok((question, choices))
}

/// Adds one vote to `choice_id` of a published question.
pub async fn record_vote(
    store: &dyn PollStore,
    question_id: i64,
    choice_id: Option<i64>,
    now: DateTime<Utc>,
) -> PollResult<Choice> {
    let question = published_question(store, question_id, now).await?;
    let Some(choice_id) = choice_id else {
        warn!(question_id, "vote submitted without a choice");
        return Err(PollError::InvalidSelection);
    };

    store
        .increment_votes(question.id, choice_id)
        .await?
        .ok_or_else(|| {
            warn!(question_id, choice_id, "vote for a choice outside the question");
            PollError::InvalidSelection
        })
}
