// src/views.rs
use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};

use crate::error::PollResult;
use crate::models::{Choice, Question};
use crate::routes;

pub const INDEX_TEMPLATE: &str = "polls/index.html";
pub const DETAIL_TEMPLATE: &str = "polls/detail.html";
pub const RESULTS_TEMPLATE: &str = "polls/results.html";

/// Page templates, compiled once at startup.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> PollResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("polls/base.html", include_str!("../templates/polls/base.html")),
            (INDEX_TEMPLATE, include_str!("../templates/polls/index.html")),
            (DETAIL_TEMPLATE, include_str!("../templates/polls/detail.html")),
            (RESULTS_TEMPLATE, include_str!("../templates/polls/results.html")),
        ])?;
        Ok(Self { tera })
    }

    pub fn render<T: Serialize>(&self, template: &str, page: &T) -> PollResult<Html<String>> {
        let context = Context::from_serialize(page)?;
        Ok(Html(self.tera.render(template, &context)?))
    }
}

#[derive(Debug, Serialize)]
pub struct QuestionLink {
    pub id: i64,
    pub question_text: String,
    pub url: String,
}

impl From<Question> for QuestionLink {
    fn from(question: Question) -> Self {
        Self {
            url: routes::detail_url(question.id),
            id: question.id,
            question_text: question.question_text,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IndexPage {
    pub latest_question_list: Vec<QuestionLink>,
}

impl IndexPage {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            latest_question_list: questions.into_iter().map(QuestionLink::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DetailPage {
    pub vote_url: String,
    pub question: Question,
    pub choices: Vec<Choice>,
    pub error_message: Option<String>,
}

impl DetailPage {
    pub fn new(question: Question, choices: Vec<Choice>) -> Self {
        Self {
            vote_url: routes::vote_url(question.id),
            question,
            choices,
            error_message: None,
        }
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }
}

#[derive(Debug, Serialize)]
pub struct ResultsPage {
    pub detail_url: String,
    pub question: Question,
    pub choices: Vec<Choice>,
}

impl ResultsPage {
    pub fn new(question: Question, choices: Vec<Choice>) -> Self {
        Self {
            detail_url: routes::detail_url(question.id),
            question,
            choices,
        }
    }
}
