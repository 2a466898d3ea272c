//! Mock reply generator for testing.
//!
//! Configurable stand-in for the generator port so tests never touch a
//! real model API.
//!
//! # Features
//!
//! - Pre-configured replies, consumed in order
//! - Error injection for degradation testing
//! - Simulated latency
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let generator = MockReplyGenerator::new()
//!     .with_response(r#"{"reply":"Здравствуйте","intent":"smalltalk","state":"idle"}"#);
//!
//! let raw = generator.generate(request).await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{GenerateError, GenerateRequest, ReplyGenerator};

/// Frame returned once the scripted replies run out.
const EXHAUSTED_FRAME: &str = r#"{"reply":"Мок-ответ.","intent":"smalltalk","state":"qa"}"#;

/// A scripted generation outcome.
#[derive(Debug)]
pub enum MockOutcome {
    /// Return this raw completion text.
    Reply(String),
    /// Fail with this error.
    Failure(GenerateError),
}

/// Mock generator for testing.
///
/// Clones share the script and the call log, so a test can keep a
/// handle on the mock after moving a clone into the engine.
#[derive(Debug, Clone)]
pub struct MockReplyGenerator {
    /// Scripted outcomes (consumed in order).
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl Default for MockReplyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockReplyGenerator {
    /// Creates a mock with an empty script.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a raw completion to the script.
    pub fn with_response(self, raw: impl Into<String>) -> Self {
        let mut outcomes = self.outcomes.lock().unwrap();
        outcomes.push_back(MockOutcome::Reply(raw.into()));
        drop(outcomes);
        self
    }

    /// Adds an error to the script.
    pub fn with_error(self, error: GenerateError) -> Self {
        let mut outcomes = self.outcomes.lock().unwrap();
        outcomes.push_back(MockOutcome::Failure(error));
        drop(outcomes);
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this generator.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<GenerateRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Pops the next outcome, or a schema-valid default.
    fn next_outcome(&self) -> MockOutcome {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockOutcome::Reply(EXHAUSTED_FRAME.to_string()))
    }
}

#[async_trait]
impl ReplyGenerator for MockReplyGenerator {
    async fn generate(&self, request: GenerateRequest) -> Result<String, GenerateError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_outcome() {
            MockOutcome::Reply(raw) => Ok(raw),
            MockOutcome::Failure(error) => Err(error),
        }
    }
}
