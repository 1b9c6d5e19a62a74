//! Shared test drivers for the story pipeline.

#![allow(dead_code)]

use async_trait::async_trait;
use kahovitz_core::{GenerateRequest, GenerateResponse, Output};
use kahovitz_error::{GenerationError, GenerationErrorKind, KahovitzResult};
use kahovitz_interface::{KahovitzDriver, NarrationClassifier, ProgressSink, ProgressUpdate};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Driver answering "{label} {n}" and recording every request.
pub struct MockDriver {
    label: String,
    fail_on: Option<usize>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl MockDriver {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            fail_on: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail the nth call (1-based).
    pub fn failing_on(label: &str, call: usize) -> Self {
        Self {
            fail_on: Some(call),
            ..Self::new(label)
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    /// User prompt of every recorded request.
    pub fn user_prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .iter()
            .map(|r| r.messages()[1].content().clone())
            .collect()
    }

    /// System prompt of every recorded request.
    pub fn system_prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .iter()
            .map(|r| r.messages()[0].content().clone())
            .collect()
    }
}

#[async_trait]
impl KahovitzDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> KahovitzResult<GenerateResponse> {
        let call = {
            let mut requests = self.requests.lock();
            requests.push(req.clone());
            requests.len()
        };

        if self.fail_on == Some(call) {
            return Err(GenerationError::new(GenerationErrorKind::Api {
                status: 500,
                message: "upstream exploded".to_string(),
            })
            .into());
        }

        Ok(GenerateResponse::new(vec![Output::Text(format!(
            "{} {}",
            self.label, call
        ))]))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Driver that always returns a fixed text.
pub struct FixedDriver(pub String);

#[async_trait]
impl KahovitzDriver for FixedDriver {
    async fn generate(&self, _req: &GenerateRequest) -> KahovitzResult<GenerateResponse> {
        Ok(GenerateResponse::new(vec![Output::Text(self.0.clone())]))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Classifier answering from a script, then `false`.
pub struct ScriptedClassifier {
    answers: Mutex<VecDeque<bool>>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedClassifier {
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().clone()
    }
}

#[async_trait]
impl NarrationClassifier for ScriptedClassifier {
    async fn classify(&self, summary: &str) -> bool {
        self.seen.lock().push(summary.to_string());
        self.answers.lock().pop_front().unwrap_or(false)
    }
}

/// Sink keeping every report.
#[derive(Default)]
pub struct RecordingSink {
    updates: Mutex<Vec<ProgressUpdate>>,
}

impl RecordingSink {
    pub fn updates(&self) -> Vec<ProgressUpdate> {
        self.updates.lock().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn report(&self, update: ProgressUpdate) {
        self.updates.lock().push(update);
    }
}
