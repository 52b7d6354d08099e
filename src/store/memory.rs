// src/store/memory.rs
use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{PollError, PollResult};
use crate::models::{Choice, NewChoice, NewQuestion, Question};
use crate::store::PollStore;

#[derive(Default)]
struct Tables {
    questions: BTreeMap<i64, Question>,
    choices: BTreeMap<i64, Choice>,
    last_question_id: i64,
    last_choice_id: i64,
}

/// In-process store backing the logic and handler tests.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PollStore for MemoryStore {
    async fn create_question(&self, new: NewQuestion) -> PollResult<Question> {
        let mut tables = self.tables.lock().await;
        tables.last_question_id += 1;
        let question = Question {
            id: tables.last_question_id,
            question_text: new.question_text,
            pub_date: new.pub_date,
        };
        tables.questions.insert(question.id, question.clone());
        Ok(question)
    }

    async fn create_choice(&self, new: NewChoice) -> PollResult<Choice> {
        let mut tables = self.tables.lock().await;
        if !tables.questions.contains_key(&new.question_id) {
            return Err(PollError::UnknownQuestion(new.question_id));
        }
        tables.last_choice_id += 1;
        let choice = Choice {
            id: tables.last_choice_id,
            question_id: new.question_id,
            choice_text: new.choice_text,
            votes: new.votes,
        };
        tables.choices.insert(choice.id, choice.clone());
        Ok(choice)
    }

    async fn question(&self, id: i64) -> PollResult<Option<Question>> {
        Ok(self.tables.lock().await.questions.get(&id).cloned())
    }

    async fn questions(&self) -> PollResult<Vec<Question>> {
        Ok(self.tables.lock().await.questions.values().cloned().collect())
    }

    async fn choices(&self, question_id: i64) -> PollResult<Vec<Choice>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .choices
            .values()
            .filter(|choice| choice.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn increment_votes(&self, question_id: i64, choice_id: i64) -> PollResult<Option<Choice>> {
        let mut tables = self.tables.lock().await;
        let Some(choice) = tables
            .choices
            .get_mut(&choice_id)
            .filter(|choice| choice.question_id == question_id)
        else {
            return Ok(None);
        };
        choice.votes = choice
            .votes
            .checked_add(1)
            .ok_or(PollError::VoteLimit(choice_id))?;
        Ok(Some(choice.clone()))
    }

    async fn delete_question(&self, id: i64) -> PollResult<bool> {
        let mut tables = self.tables.lock().await;
        if tables.questions.remove(&id).is_none() {
            return Ok(false);
        }
        tables.choices.retain(|_, choice| choice.question_id != id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Arc;

    async fn store_with_question() -> (MemoryStore, Question) {
        let store = MemoryStore::new();
        let question = store
            .create_question(NewQuestion::new("Question with choices", Utc::now()))
            .await
            .unwrap();
        (store, question)
    }

    #[tokio::test]
    async fn test_question_without_choices() {
        let (store, question) = store_with_question().await;
        assert!(store.choices(question.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_question_has_correct_number_of_choices() {
        let (store, question) = store_with_question().await;
        for text in ["Choice 1", "Choice 2", "Choice 3"] {
            store.create_choice(NewChoice::new(question.id, text)).await.unwrap();
        }
        let choices = store.choices(question.id).await.unwrap();
        let texts: Vec<_> = choices.iter().map(|c| c.choice_text.as_str()).collect();
        assert_eq!(texts, ["Choice 1", "Choice 2", "Choice 3"]);
    }

    #[tokio::test]
    async fn test_default_vote_count() {
        let (store, question) = store_with_question().await;
        let choice = store.create_choice(NewChoice::new(question.id, "Choice 1")).await.unwrap();
        assert_eq!(choice.votes, 0);
    }

    #[tokio::test]
    async fn test_creation_skips_validation() {
        let store = MemoryStore::new();
        let question = store
            .create_question(NewQuestion::new("x".repeat(201), Utc::now()))
            .await
            .unwrap();
        assert_eq!(question.question_text.len(), 201);
    }

    #[tokio::test]
    async fn test_choice_for_unknown_question() {
        let store = MemoryStore::new();
        let err = store.create_choice(NewChoice::new(42, "Orphan")).await.unwrap_err();
        assert!(matches!(err, PollError::UnknownQuestion(42)));
    }

    #[tokio::test]
    async fn test_increment_votes_checks_owner() {
        let (store, question) = store_with_question().await;
        let other = store
            .create_question(NewQuestion::new("Other", Utc::now()))
            .await
            .unwrap();
        let choice = store.create_choice(NewChoice::new(question.id, "Choice 1")).await.unwrap();

        assert!(store.increment_votes(other.id, choice.id).await.unwrap().is_none());
        let voted = store.increment_votes(question.id, choice.id).await.unwrap().unwrap();
        assert_eq!(voted.votes, 1);
        assert_eq!(store.choices(question.id).await.unwrap()[0].votes, 1);
    }

    #[tokio::test]
    async fn test_delete_question_cascades() {
        let (store, question) = store_with_question().await;
        store.create_choice(NewChoice::new(question.id, "Choice 1")).await.unwrap();

        assert!(store.delete_question(question.id).await.unwrap());
        assert!(store.question(question.id).await.unwrap().is_none());
        assert!(store.choices(question.id).await.unwrap().is_empty());
        assert!(!store.delete_question(question.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_increment_votes_stops_at_counter_limit() {
        let (store, question) = store_with_question().await;
        let choice = store
            .create_choice(NewChoice::new(question.id, "Saturated").with_votes(i32::MAX))
            .await
            .unwrap();

        let err = store.increment_votes(question.id, choice.id).await.unwrap_err();
        assert!(matches!(err, PollError::VoteLimit(id) if id == choice.id));
        assert_eq!(store.choices(question.id).await.unwrap()[0].votes, i32::MAX);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_votes_are_not_lost() {
        let (store, question) = store_with_question().await;
        let choice = store.create_choice(NewChoice::new(question.id, "Popular")).await.unwrap();
        let store = Arc::new(store);
        let (question_id, choice_id) = (question.id, choice.id);

        let tasks: Vec<_> = (0..100)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.increment_votes(question_id, choice_id).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(store.choices(question_id).await.unwrap()[0].votes, 100);
    }
}
