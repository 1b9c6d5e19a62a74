use crate::AppState;
use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

fn has_env(var: &str) -> bool {
    std::env::var(var).is_ok_and(|v| !v.trim().is_empty())
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "Kahovitz Story Pipeline v2",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "groqKeys": {
            "char1": has_env("GROQ_1"),
            "char2": has_env("GROQ_2"),
            "asd": has_env("GROQ_3"),
            "b": has_env("GROQ_4"),
            "c": has_env("GROQ_5"),
        },
        "personasWithoutDriver": state.personas_without_driver(),
        "activeSessions": state.sessions().len(),
    }))
}
