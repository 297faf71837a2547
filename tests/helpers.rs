// Shared test helpers: a scripted in-process transport and test configuration.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use bing_webmaster::error_handling::{TransportError, TransportErrorKind};
use bing_webmaster::transport::{Transport, TransportRequest, TransportResponse};
use bing_webmaster::{BingWebmaster, Config};

/// One scripted transport reaction.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Not every test file uses every variant
pub enum Step {
    Respond(u16, Value),
    Fail(TransportErrorKind),
}

/// Plays back `Step`s in call order, then answers 200 with `fallback`.
pub struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    fallback: Value,
    requests: Mutex<Vec<TransportRequest>>,
}

#[allow(dead_code)] // Used by other test files
impl ScriptedTransport {
    pub fn new(steps: Vec<Step>, fallback: Value) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.into()),
            fallback,
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Always answers 200 with `body`.
    pub fn always(body: Value) -> Arc<Self> {
        Self::new(Vec::new(), body)
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().expect("lock not poisoned").len()
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().expect("lock not poisoned").clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &TransportRequest) -> Result<TransportResponse, TransportError> {
        self.requests
            .lock()
            .expect("lock not poisoned")
            .push(request.clone());
        let step = self.steps.lock().expect("lock not poisoned").pop_front();
        match step {
            Some(Step::Respond(status, body)) => Ok(TransportResponse { status, body }),
            Some(Step::Fail(kind)) => Err(TransportError::new(kind, "scripted failure")),
            None => Ok(TransportResponse {
                status: 200,
                body: self.fallback.clone(),
            }),
        }
    }
}

/// Default configuration with millisecond retry delays.
#[allow(dead_code)]
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.retry.initial_delay_ms = 1;
    config
}

#[allow(dead_code)]
pub fn client_with(transport: Arc<ScriptedTransport>, config: Config) -> BingWebmaster {
    BingWebmaster::with_transport(Some("test-token".to_string()), config, transport)
}
