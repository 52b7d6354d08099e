// models.rs
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Validate, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    #[validate(length(max = 200))]
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

impl Question {
    /// True when `pub_date` falls within the day leading up to `now`.
    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        now - Duration::days(1) <= self.pub_date && self.pub_date <= now
    }

    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        self.pub_date <= now
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.question_text)
    }
}

impl fmt::Debug for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Question: {}>", self.question_text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, sqlx::FromRow)]
pub struct Choice {
    pub id: i64,
    pub question_id: i64,
    #[validate(length(max = 200))]
    pub choice_text: String,
    pub votes: i32,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.choice_text)
    }
}

#[derive(Debug, Clone, Validate)]
pub struct NewQuestion {
    #[validate(length(max = 200))]
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

impl NewQuestion {
    pub fn new(question_text: impl Into<String>, pub_date: DateTime<Utc>) -> Self {
        Self {
            question_text: question_text.into(),
            pub_date,
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct NewChoice {
    pub question_id: i64,
    #[validate(length(max = 200))]
    pub choice_text: String,
    #[validate(range(min = 0))]
    pub votes: i32,
}

impl NewChoice {
    /// A choice with no votes yet.
    pub fn new(question_id: i64, choice_text: impl Into<String>) -> Self {
        Self {
            question_id,
            choice_text: choice_text.into(),
            votes: 0,
        }
    }

    pub fn with_votes(mut self, votes: i32) -> Self {
        self.votes = votes;
        self
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct VoteForm {
    pub choice: Option<String>,
}

impl VoteForm {
    /// Reads the `choice` field of a url-encoded body. When the field repeats the
    /// last value wins; a malformed body yields no selection.
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let choice = serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)
            .unwrap_or_default()
            .into_iter()
            .filter(|(name, _)| name == "choice")
            .map(|(_, value)| value)
            .last();
        Self { choice }
    }

    /// The selected choice id, if one was submitted and it parses.
    pub fn choice_id(&self) -> Option<i64> {
        self.choice.as_deref().and_then(|raw| raw.trim().parse().ok())
    }
}
