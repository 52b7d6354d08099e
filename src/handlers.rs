// handlers.rs
use std::sync::Arc;

use axum::{
    extract::{rejection::RawFormRejection, FromRequestParts, Path, RawForm, State},
    http::{request::Parts, StatusCode},
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use http::header::LOCATION;
use tracing::info;

use crate::error::{PollError, PollResult};
use crate::models::VoteForm;
use crate::poll;
use crate::routes;
use crate::store::PollStore;
use crate::views::{DetailPage, IndexPage, ResultsPage, Templates, DETAIL_TEMPLATE, INDEX_TEMPLATE, RESULTS_TEMPLATE};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PollStore>,
    pub templates: Arc<Templates>,
}

impl AppState {
    pub fn new(store: Arc<dyn PollStore>) -> PollResult<Self> {
        Ok(Self {
            store,
            templates: Arc::new(Templates::new()?),
        })
    }
}

/// Question id from the route. Ids that do not parse as `i64` are reported as
/// missing questions rather than bad requests.
pub struct QuestionId(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for QuestionId {
    type Rejection = PollError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| PollError::NotFound)?;
        Ok(Self(id))
    }
}

/// List published questions, newest first
pub async fn index(State(state): State<AppState>) -> PollResult<Html<String>> {
    let questions = poll::latest_questions(state.store.as_ref(), Utc::now()).await?;
    state.templates.render(INDEX_TEMPLATE, &IndexPage::new(questions))
}

/// Show a question and its voting form
pub async fn detail(State(state): State<AppState>, QuestionId(question_id): QuestionId) -> PollResult<Html<String>> {
    let (question, choices) = poll::question_with_choices(state.store.as_ref(), question_id, Utc::now()).await?;
    state.templates.render(DETAIL_TEMPLATE, &DetailPage::new(question, choices))
}

/// Show vote counts for every choice of a question
pub async fn results(State(state): State<AppState>, QuestionId(question_id): QuestionId) -> PollResult<Html<String>> {
    let (question, choices) = poll::question_with_choices(state.store.as_ref(), question_id, Utc::now()).await?;
    state.templates.render(RESULTS_TEMPLATE, &ResultsPage::new(question, choices))
}

/// Vote for a choice, then redirect to the results page
pub async fn vote(
    State(state): State<AppState>,
    QuestionId(question_id): QuestionId,
    body: Result<RawForm, RawFormRejection>,
) -> PollResult<Response> {
    // A body that is not url-encoded carries no usable selection.
    let form = match body {
        Ok(RawForm(bytes)) => VoteForm::from_urlencoded(&bytes),
        Err(_) => VoteForm::default(),
    };
    let now = Utc::now();
    match poll::record_vote(state.store.as_ref(), question_id, form.choice_id(), now).await {
        Ok(choice) => {
            info!(question_id, choice_id = choice.id, votes = choice.votes, "vote recorded");
            Ok((StatusCode::FOUND, [(LOCATION, routes::results_url(question_id))]).into_response())
        }
        Err(PollError::InvalidSelection) => {
            let (question, choices) = poll::question_with_choices(state.store.as_ref(), question_id, now).await?;
            let page = DetailPage::new(question, choices).with_error(PollError::InvalidSelection.to_string());
            Ok(state.templates.render(DETAIL_TEMPLATE, &page)?.into_response())
        }
        Err(e) => Err(e),
    }
}
