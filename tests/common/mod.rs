//! Stub SIEM services for integration tests.
//!
//! The stub runs on its own thread with its own tokio runtime so the
//! blocking client under test can be driven from a plain `#[test]`.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use serde_json::Value;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use tokio::sync::oneshot;

#[derive(Clone)]
struct StubState {
    ingest_status: StatusCode,
    alarms_status: StatusCode,
    alarms_body: String,
    received: Arc<Mutex<Vec<Value>>>,
    alarm_headers: Arc<Mutex<Vec<(Option<String>, Option<String>)>>>,
}

pub struct StubServer {
    pub base_url: String,
    received: Arc<Mutex<Vec<Value>>>,
    alarm_headers: Arc<Mutex<Vec<(Option<String>, Option<String>)>>>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl StubServer {
    /// Start a stub answering `POST /api/logs` with `ingest_status` and
    /// `GET /api/alarms` with `alarms_status` + `alarms_body`.
    pub fn start(ingest_status: u16, alarms_status: u16, alarms_body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        listener.set_nonblocking(true).expect("non-blocking listener");
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let received = Arc::new(Mutex::new(Vec::new()));
        let alarm_headers = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            ingest_status: StatusCode::from_u16(ingest_status).unwrap(),
            alarms_status: StatusCode::from_u16(alarms_status).unwrap(),
            alarms_body: alarms_body.to_string(),
            received: received.clone(),
            alarm_headers: alarm_headers.clone(),
        };

        let (tx, rx) = oneshot::channel::<()>();
        let handle = thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("stub runtime");

            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                let app = Router::new()
                    .route("/api/logs", post(ingest))
                    .route("/api/alarms", get(alarms))
                    .with_state(state);

                axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = rx.await;
                    })
                    .await
                    .unwrap();
            });
        });

        Self {
            base_url,
            received,
            alarm_headers,
            shutdown: Some(tx),
            handle: Some(handle),
        }
    }

    pub fn received(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }

    /// (Authorization, X-User-Id) for every alarm request seen
    pub fn alarm_headers(&self) -> Vec<(Option<String>, Option<String>)> {
        self.alarm_headers.lock().unwrap().clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

async fn ingest(State(state): State<StubState>, Json(body): Json<Value>) -> StatusCode {
    state.received.lock().unwrap().push(body);
    state.ingest_status
}

async fn alarms(State(state): State<StubState>, headers: HeaderMap) -> (StatusCode, String) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state
        .alarm_headers
        .lock()
        .unwrap()
        .push((header("authorization"), header("x-user-id")));

    (state.alarms_status, state.alarms_body.clone())
}
