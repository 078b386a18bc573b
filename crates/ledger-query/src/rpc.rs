//! JSON-RPC over HTTP as spoken by rippled-family ledger nodes.
//!
//! Requests are `{"method": ..., "params": [{...}]}`. Responses wrap the
//! payload in a `result` object whose `status` is either `success` or `error`.
//! Errors are reported in-band with an HTTP 200 status.

use {
    reqwest::{Client, StatusCode, Url, header},
    serde::{Deserialize, Serialize},
    serde_json::Value,
    std::{
        fmt::{self, Debug, Formatter},
        sync::atomic::{AtomicUsize, Ordering},
    },
    thiserror::Error,
};

pub struct HttpTransport {
    client: Client,
    url: Url,
    id: AtomicUsize,
}

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to send request: {0}")]
    Send(#[source] reqwest::Error),
    #[error("HTTP error {0}")]
    Status(StatusCode),
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("{error}")]
    Rejected {
        error: String,
        code: Option<i64>,
        message: Option<String>,
    },
}

#[derive(Serialize)]
struct Request<'a> {
    method: &'a str,
    params: [&'a Value; 1],
}

#[derive(Deserialize)]
struct Response {
    result: Value,
}

impl HttpTransport {
    pub fn new(client: Client, url: Url) -> Self {
        Self {
            client,
            url,
            id: AtomicUsize::new(0),
        }
    }

    fn next_id(&self) -> usize {
        self.id.fetch_add(1, Ordering::SeqCst)
    }

    /// Executes a single command and returns its `result` object.
    pub async fn execute(&self, method: &str, params: &Value) -> Result<Value, RpcError> {
        let id = self.next_id();
        let body = serde_json::to_string(&Request {
            method,
            params: [params],
        })
        .map_err(RpcError::Encode)?;
        tracing::trace!(%id, %body, "executing request");

        let response = self
            .client
            .post(self.url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .header("X-RPC-REQUEST-ID", id.to_string())
            .header("X-RPC-METHOD", method)
            .body(body)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(%id, %method, %err, "failed to send request");
                RpcError::Send(err)
            })?;
        let status = response.status();
        let text = response.text().await.map_err(|err| {
            tracing::warn!(%id, %method, %err, "failed to get response body");
            RpcError::Send(err)
        })?;
        // Log the raw text before decoding to get more information on responses
        // that aren't valid json.
        tracing::trace!(%id, body = %text.trim(), "received response");
        if !status.is_success() {
            return Err(RpcError::Status(status));
        }

        let Response { result } = serde_json::from_str(&text).map_err(|err| {
            RpcError::Decode(format!("{err}, raw response: {}", text.trim()))
        })?;
        check_status(result)
    }
}

fn check_status(result: Value) -> Result<Value, RpcError> {
    let failed = result.get("status").and_then(Value::as_str) == Some("error")
        || result.get("error").is_some();
    if !failed {
        return Ok(result);
    }
    let text = |key: &str| result.get(key).and_then(Value::as_str).map(str::to_owned);
    Err(RpcError::Rejected {
        error: text("error").unwrap_or_else(|| "unknown".to_owned()),
        code: result.get("error_code").and_then(Value::as_i64),
        message: text("error_message"),
    })
}

impl Debug for HttpTransport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("url", &self.url)
            .finish()
    }
}
