//! Axum-based mock verifier for integration tests
//!
//! Each test spawns its own server on an ephemeral port and scripts the
//! response it wants; the server records every request body it receives so
//! tests can assert on call counts and wire shape.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde_json::Value;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use rest_auth_provider::CHECK_CREDENTIALS_PATH;

#[derive(Debug)]
struct MockState {
    /// Scripted `(status, body)` returned to every request
    response: Mutex<(StatusCode, Value)>,
    /// Body of the most recent request
    last_request: Mutex<Option<Value>>,
    requests: AtomicUsize,
}

/// Handle to a running mock verifier
pub struct MockVerifier {
    base_url: String,
    state: Arc<MockState>,
}

impl MockVerifier {
    /// Start a mock verifier on an ephemeral port. The default script
    /// answers 401 until a test sets something else.
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState {
            response: Mutex::new((StatusCode::UNAUTHORIZED, Value::Null)),
            last_request: Mutex::new(None),
            requests: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route(CHECK_CREDENTIALS_PATH, post(check_credentials))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("should bind an ephemeral port");
        let addr = listener.local_addr().expect("listener should have an address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("mock verifier server failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Script the response for subsequent requests.
    pub fn respond_with(&self, status: StatusCode, body: Value) {
        *self.state.response.lock().expect("mock state lock") = (status, body);
    }

    /// Script a 200 response with the given body.
    pub fn respond_ok(&self, body: Value) {
        self.respond_with(StatusCode::OK, body);
    }

    /// Number of credential checks received so far.
    pub fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    /// Body of the most recent credential check, if any.
    pub fn last_request(&self) -> Option<Value> {
        self.state.last_request.lock().expect("mock state lock").clone()
    }
}

async fn check_credentials(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.requests.fetch_add(1, Ordering::SeqCst);
    *state.last_request.lock().expect("mock state lock") = Some(body);

    let (status, response) = state.response.lock().expect("mock state lock").clone();
    (status, Json(response))
}
