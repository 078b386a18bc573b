//! A mock ledger node answering JSON-RPC requests from a fixed script.

use {
    axum::{
        Json,
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Response},
    },
    reqwest::Url,
    serde_json::{Value, json},
    std::{
        collections::VecDeque,
        net::SocketAddr,
        sync::{Arc, Mutex},
        time::Duration,
    },
};

#[derive(Debug, Clone)]
pub enum Reply {
    /// Wraps the value in the `result` envelope.
    Result(Value),
    /// Replies with the result only after the delay elapsed.
    Delayed(Duration, Value),
    Status(StatusCode),
    Raw(&'static str),
    /// Drops the connection without answering.
    Abort,
}

#[derive(Debug, Clone)]
pub struct Expectation {
    pub method: &'static str,
    pub params: Value,
    pub reply: Reply,
}

impl Expectation {
    pub fn new(method: &'static str, params: Value, result: Value) -> Self {
        Self {
            method,
            params,
            reply: Reply::Result(result),
        }
    }

    pub fn server_info() -> Self {
        Self::new(
            "server_info",
            json!({}),
            json!({
                "info": {
                    "build_version": "2024.11.18-release+1120",
                    "network_id": 21337,
                    "server_state": "full",
                    "validated_ledger": { "seq": 8_512_034 },
                },
                "status": "success",
            }),
        )
    }
}

type Expectations = Arc<Mutex<VecDeque<Expectation>>>;

pub struct MockNode {
    addr: SocketAddr,
    expectations: Expectations,
}

impl MockNode {
    /// Starts serving the expectations in order.
    pub async fn start(expectations: Vec<Expectation>) -> Self {
        let expectations: Expectations = Arc::new(Mutex::new(expectations.into()));
        let app = axum::Router::new()
            .route("/", axum::routing::post(handle))
            .with_state(expectations.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        Self { addr, expectations }
    }

    pub fn url(&self) -> Url {
        format!("http://{}/", self.addr).parse().unwrap()
    }

    pub fn assert_exhausted(&self) {
        let remaining = self.expectations.lock().unwrap();
        assert!(
            remaining.is_empty(),
            "node did not receive expected requests: {remaining:?}"
        );
    }
}

async fn handle(State(expectations): State<Expectations>, Json(request): Json<Value>) -> Response {
    let expectation = expectations
        .lock()
        .unwrap()
        .pop_front()
        .expect("got another request, but didn't expect any more");
    assert_eq!(
        request,
        json!({ "method": expectation.method, "params": [expectation.params] }),
        "request has unexpected body"
    );

    match expectation.reply {
        Reply::Result(result) => Json(json!({ "result": result })).into_response(),
        Reply::Delayed(delay, result) => {
            tokio::time::sleep(delay).await;
            Json(json!({ "result": result })).into_response()
        }
        Reply::Status(status) => status.into_response(),
        Reply::Raw(body) => body.into_response(),
        Reply::Abort => std::panic::resume_unwind(Box::new("connection aborted")),
    }
}

/// An address nothing listens on.
pub async fn closed_port() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/").parse().unwrap()
}
