// src/db.rs
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

use crate::config::Config;
use crate::error::{PollError, PollResult};
use crate::models::{Choice, NewChoice, NewQuestion, Question};
use crate::store::PollStore;

pub async fn create_pool(database_url: &str, config: &Config) -> Result<Pool<Postgres>, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}

pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PollStore for PgStore {
    async fn create_question(&self, new: NewQuestion) -> PollResult<Question> {
        let question = sqlx::query_as::<_, Question>(
            "INSERT INTO questions (question_text, pub_date) VALUES ($1, $2)
             RETURNING id, question_text, pub_date",
        )
        .bind(&new.question_text)
        .bind(new.pub_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(question)
    }

    async fn create_choice(&self, new: NewChoice) -> PollResult<Choice> {
        sqlx::query_as::<_, Choice>(
            "INSERT INTO choices (question_id, choice_text, votes) VALUES ($1, $2, $3)
             RETURNING id, question_id, choice_text, votes",
        )
        .bind(new.question_id)
        .bind(&new.choice_text)
        .bind(new.votes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                PollError::UnknownQuestion(new.question_id)
            }
            e => PollError::Database(e),
        })
    }

    async fn question(&self, id: i64) -> PollResult<Option<Question>> {
        let question = sqlx::query_as::<_, Question>(
            "SELECT id, question_text, pub_date FROM questions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(question)
    }

    async fn questions(&self) -> PollResult<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>("SELECT id, question_text, pub_date FROM questions")
            .fetch_all(&self.pool)
            .await?;
        Ok(questions)
    }

    async fn choices(&self, question_id: i64) -> PollResult<Vec<Choice>> {
        let choices = sqlx::query_as::<_, Choice>(
            "SELECT id, question_id, choice_text, votes FROM choices
             WHERE question_id = $1 ORDER BY id",
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(choices)
    }

    async fn increment_votes(&self, question_id: i64, choice_id: i64) -> PollResult<Option<Choice>> {
        // The increment happens inside the UPDATE so concurrent votes serialize on the row.
        let choice = sqlx::query_as::<_, Choice>(
            "UPDATE choices SET votes = votes + 1
             WHERE id = $1 AND question_id = $2
             RETURNING id, question_id, choice_text, votes",
        )
        .bind(choice_id)
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(choice)
    }

    async fn delete_question(&self, id: i64) -> PollResult<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
