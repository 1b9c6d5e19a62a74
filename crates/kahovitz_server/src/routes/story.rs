//! Story planning and generation endpoints.

use crate::{ApiError, AppState, SessionSink, SessionStore};
use axum::Json;
use axum::extract::{Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use kahovitz_core::StoryPlan;
use kahovitz_error::KahovitzError;
use kahovitz_interface::{NullProgress, SessionStatus};
use kahovitz_story::{StoryOutcome, StoryRequest};
use serde::Deserialize;
use serde_json::{Value, json};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct PlanRequest {
    rough_idea: Option<String>,
}

#[instrument(skip_all)]
pub(crate) async fn plan(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<StoryPlan>, ApiError> {
    let idea = request.rough_idea.unwrap_or_default();
    let plan = state.planner().plan(&idea).await?;
    info!("Plan generated");
    Ok(Json(plan))
}

#[instrument(skip_all)]
pub(crate) async fn generate_story(
    State(state): State<AppState>,
    Json(request): Json<StoryRequest>,
) -> Result<Json<Value>, ApiError> {
    let options = request.validate(&state.config().story)?;
    info!(
        total = options.total_utterances,
        interval = options.summary_interval,
        "Generating story"
    );

    if !request.stream {
        let outcome: StoryOutcome = state.orchestrator().run(&options, &NullProgress).await?;
        return Ok(Json(serde_json::to_value(outcome).map_err(json_error)?));
    }

    let sessions = state.sessions().clone();
    let session_id = sessions.create();
    let sink = SessionSink::new(sessions.clone(), session_id.clone());
    let orchestrator = state.orchestrator().clone();
    let task_id = session_id.clone();

    let task = tokio::spawn(async move {
        if let Err(e) = orchestrator.run(&options, &sink).await {
            warn!(session = %task_id, error = %e, "Streaming story failed");
        }
    });
    sessions.attach_task(&session_id, task.abort_handle());

    Ok(Json(json!({ "sessionId": session_id, "status": "started" })))
}

fn json_error(e: serde_json::Error) -> ApiError {
    ApiError(KahovitzError::from(kahovitz_error::JsonError::new(e.to_string())))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct StreamQuery {
    session_id: Option<String>,
}

/// Cancels the session's run if the stream is dropped before it finished.
struct DisconnectGuard {
    store: Arc<SessionStore>,
    id: String,
    armed: bool,
}

impl Drop for DisconnectGuard {
    fn drop(&mut self) {
        if self.armed && self.store.cancel(&self.id) {
            info!(session = %self.id, "Stream consumer left, run cancelled");
        }
    }
}

fn event(value: Value) -> Result<Event, Infallible> {
    Ok(Event::default().data(value.to_string()))
}

pub(crate) async fn generate_story_stream(
    State(state): State<AppState>,
    Query(query): Query<StreamQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let store = state.sessions().clone();
    let poll = Duration::from_millis(state.config().sessions.poll_interval_ms.max(1));
    let id = query.session_id.unwrap_or_default();

    let stream = async_stream::stream! {
        let mut guard = DisconnectGuard {
            store: store.clone(),
            id: id.clone(),
            armed: true,
        };
        let mut ticker = tokio::time::interval(poll);

        loop {
            ticker.tick().await;

            if let Some(done) = store.take_if_finished(&id) {
                guard.armed = false;
                if *done.status() == SessionStatus::Complete {
                    yield event(json!({
                        "type": "complete",
                        "story": done.story(),
                        "markdown": done.markdown(),
                    }));
                } else {
                    yield event(json!({ "error": done.error() }));
                }
                break;
            }

            match store.get(&id) {
                Some(progress) => {
                    yield event(json!({
                        "type": "progress",
                        "status": progress.status(),
                        "percentage": progress.progress(),
                        "message": progress.message(),
                    }));
                }
                None => {
                    guard.armed = false;
                    yield event(json!({ "error": "Session not found" }));
                    break;
                }
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}
