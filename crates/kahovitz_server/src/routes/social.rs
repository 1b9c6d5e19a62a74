//! Posting-service endpoints.

use crate::{ApiError, AppState};
use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kahovitz_rate_limit::post_with_retry;
use kahovitz_social::{ContentCategory, XCredentialStatus, auto_post, sanitize_post_text};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, instrument};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TextQuery {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ContentQuery {
    category: Option<String>,
    prompt: Option<String>,
}

impl ContentQuery {
    fn category(&self) -> ContentCategory {
        self.category
            .as_deref()
            .map(ContentCategory::lenient)
            .unwrap_or(ContentCategory::Random)
    }

    fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PromptQuery {
    prompt: Option<String>,
}

#[instrument(skip_all)]
pub(crate) async fn post(
    State(state): State<AppState>,
    Query(query): Query<TextQuery>,
) -> Result<Response, ApiError> {
    let Some(text) = query.text.filter(|t| !t.trim().is_empty()) else {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Text parameter is required" })),
        )
            .into_response());
    };

    let poster = state.poster()?;
    let text = sanitize_post_text(&text);
    let status = post_with_retry(state.retry(), || poster.post(&text)).await?;
    info!(id = %status.id, "Custom post published");

    Ok(Json(json!({ "success": true, "tweet": status })).into_response())
}

#[instrument(skip_all)]
pub(crate) async fn auto_tweet(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<Value>, ApiError> {
    let agent = state.agent()?;
    let poster = state.poster()?;

    let post = auto_post(
        agent,
        poster.as_ref(),
        state.retry(),
        query.category(),
        query.prompt(),
    )
    .await?;

    Ok(Json(json!({
        "success": true,
        "tweet": post.status,
        "generatedContent": post.generated_content,
        "prompt": post.prompt,
        "category": post.category,
        "xvitzMemory": agent.history().len(),
    })))
}

#[instrument(skip_all)]
pub(crate) async fn generate(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<Value>, ApiError> {
    let agent = state.agent()?;
    let category = query.category();
    let prompt = match query.prompt() {
        Some(prompt) => prompt.to_string(),
        None => category.random_prompt().to_string(),
    };

    let reply = agent.chat(&prompt).await?;

    Ok(Json(json!({
        "success": true,
        "generatedContent": sanitize_post_text(&reply),
        "prompt": prompt,
        "category": category,
        "xvitzMemory": agent.history().len(),
    })))
}

#[instrument(skip_all)]
pub(crate) async fn test_xvitz(
    State(state): State<AppState>,
    Query(query): Query<PromptQuery>,
) -> Result<Json<Value>, ApiError> {
    let agent = state.agent()?;
    let prompt = query
        .prompt
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| "Hello! Tell me about yourself".to_string());

    let response = agent.chat(&prompt).await?;
    let history = agent.history();

    Ok(Json(json!({
        "success": true,
        "response": response,
        "prompt": prompt,
        "xvitzMemory": history.len(),
        "memoryHistory": history,
    })))
}

pub(crate) async fn memory(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let history = state.agent()?.history();
    Ok(Json(json!({
        "success": true,
        "xvitzMemory": history.len(),
        "memoryHistory": history,
    })))
}

pub(crate) async fn clear_memory(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let agent = state.agent()?;
    agent.clear_history();
    info!("Agent memory cleared");
    Ok(Json(json!({
        "success": true,
        "message": format!("{} memory cleared", agent.name()),
        "xvitzMemory": agent.history().len(),
    })))
}

pub(crate) async fn diagnose(State(state): State<AppState>) -> Json<Value> {
    let credentials = XCredentialStatus::from_env();
    let agent = state.agent_if_configured().map(|agent| {
        json!({
            "name": agent.name(),
            "platform": agent.platform(),
            "memoryCount": agent.history().len(),
        })
    });

    Json(json!({
        "hasProxy": credentials.has_proxy,
        "hasBearerToken": credentials.has_bearer_token,
        "usingOAuth": credentials.using_oauth(),
        "credentials": {
            "hasAppKey": credentials.has_app_key,
            "hasAppSecret": credentials.has_app_secret,
            "hasAccessToken": credentials.has_access_token,
            "hasAccessSecret": credentials.has_access_secret,
        },
        "xvitzAgent": agent,
        "groqApiKey": std::env::var("GROQ_API_KEY").is_ok_and(|v| !v.trim().is_empty()),
        "availableCategories": ContentCategory::names(),
        "message": "Check your X app settings and ensure credentials are correct",
    }))
}

#[instrument(skip_all)]
pub(crate) async fn test(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let account = state.poster()?.verify_credentials().await?;
    info!(username = %account.username, "Posting client authenticated");
    Ok(Json(json!({
        "success": true,
        "user": account,
        "message": "Client is properly configured and authenticated",
    })))
}
