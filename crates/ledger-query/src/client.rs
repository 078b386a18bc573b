//! Read-only access to a ledger node.

use {
    crate::{
        error::{ConnectionError, Error, RemoteQueryError},
        http_client::HttpClientFactory,
        rpc::{HttpTransport, RpcError},
    },
    model::AccountId,
    reqwest::Url,
    serde::{Serialize, Serializer},
    serde_json::{Value, json},
    std::{fmt, str::FromStr},
    thiserror::Error,
};

/// Ledger version a query is answered from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LedgerIndex {
    /// Most recent ledger the node considers final.
    #[default]
    Validated,
    /// The node's in-progress ledger.
    Current,
    /// Most recently closed, not necessarily validated, ledger.
    Closed,
    Sequence(u32),
}

#[derive(Debug, Error)]
#[error("ledger index must be validated, current, closed or a sequence number, got {0:?}")]
pub struct InvalidLedgerIndex(String);

impl FromStr for LedgerIndex {
    type Err = InvalidLedgerIndex;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "validated" => Ok(Self::Validated),
            "current" => Ok(Self::Current),
            "closed" => Ok(Self::Closed),
            _ => s
                .parse()
                .map(Self::Sequence)
                .map_err(|_| InvalidLedgerIndex(s.to_owned())),
        }
    }
}

impl fmt::Display for LedgerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validated => f.write_str("validated"),
            Self::Current => f.write_str("current"),
            Self::Closed => f.write_str("closed"),
            Self::Sequence(sequence) => write!(f, "{sequence}"),
        }
    }
}

/// Shortcuts are sent as strings, sequence numbers as JSON numbers.
impl Serialize for LedgerIndex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Sequence(sequence) => serializer.serialize_u32(*sequence),
            other => serializer.collect_str(other),
        }
    }
}

/// A connection to a ledger node. Results are forwarded as returned by the
/// node without imposing any structure on them.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait LedgerClient: Send + Sync {
    /// Establishes the connection. No query may be issued before this
    /// succeeded.
    async fn connect(&mut self) -> Result<(), ConnectionError>;

    /// `account_info` for `account` at `ledger_index`.
    async fn account_info(
        &self,
        account: &AccountId,
        ledger_index: &LedgerIndex,
    ) -> Result<Value, Error>;

    /// `account_hooks`: metadata of the hooks installed on `account`.
    async fn account_hooks(&self, account: &AccountId) -> Result<Value, Error>;

    /// Releases the connection. Subsequent queries fail with
    /// [`ConnectionError::NotConnected`].
    async fn disconnect(&mut self);
}

/// [`LedgerClient`] talking JSON-RPC over HTTP(S).
///
/// HTTP is connectionless from the caller's point of view, so `connect`
/// creates the HTTP client and performs a `server_info` handshake proving
/// that the endpoint is a responsive ledger node.
#[derive(Debug)]
pub struct HttpLedgerClient {
    factory: HttpClientFactory,
    url: Url,
    transport: Option<HttpTransport>,
}

impl HttpLedgerClient {
    pub fn new(factory: HttpClientFactory, url: Url) -> Self {
        Self {
            factory,
            url,
            transport: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    fn transport(&self) -> Result<&HttpTransport, ConnectionError> {
        self.transport.as_ref().ok_or(ConnectionError::NotConnected)
    }

    async fn query(&self, command: &'static str, params: Value) -> Result<Value, Error> {
        let transport = self.transport()?;
        tracing::debug!(%command, %params, "querying node");
        transport
            .execute(command, &params)
            .await
            .map_err(|err| query_error(command, err))
    }
}

fn query_error(command: &'static str, err: RpcError) -> Error {
    match err {
        RpcError::Send(err) if err.is_timeout() => RemoteQueryError::Timeout { command }.into(),
        RpcError::Send(source) => RemoteQueryError::Transport { command, source }.into(),
        RpcError::Encode(source) => RemoteQueryError::Encode { command, source }.into(),
        RpcError::Status(status) => RemoteQueryError::InvalidResponse {
            command,
            reason: format!("HTTP error {status}"),
        }
        .into(),
        RpcError::Decode(reason) => RemoteQueryError::InvalidResponse { command, reason }.into(),
        RpcError::Rejected {
            error,
            code,
            message,
        } => RemoteQueryError::Rejected {
            command,
            error,
            code,
            message,
        }
        .into(),
    }
}

#[async_trait::async_trait]
impl LedgerClient for HttpLedgerClient {
    async fn connect(&mut self) -> Result<(), ConnectionError> {
        let client = self.factory.create().map_err(ConnectionError::Client)?;
        let transport = HttpTransport::new(client, self.url.clone());

        let result = transport
            .execute("server_info", &json!({}))
            .await
            .map_err(|err| match err {
                RpcError::Send(source) => ConnectionError::Unreachable {
                    url: self.url.clone(),
                    source,
                },
                err => ConnectionError::Handshake {
                    url: self.url.clone(),
                    reason: err.to_string(),
                },
            })?;
        let Some(info) = result.get("info") else {
            return Err(ConnectionError::Handshake {
                url: self.url.clone(),
                reason: "server_info response carries no info object".to_owned(),
            });
        };
        tracing::info!(
            url = %self.url,
            build_version = ?info.get("build_version"),
            network_id = ?info.get("network_id"),
            validated_ledger = ?info.pointer("/validated_ledger/seq"),
            "connected to ledger node"
        );

        self.transport = Some(transport);
        Ok(())
    }

    async fn account_info(
        &self,
        account: &AccountId,
        ledger_index: &LedgerIndex,
    ) -> Result<Value, Error> {
        self.query(
            "account_info",
            json!({ "account": account, "ledger_index": ledger_index }),
        )
        .await
    }

    async fn account_hooks(&self, account: &AccountId) -> Result<Value, Error> {
        self.query("account_hooks", json!({ "account": account }))
            .await
    }

    async fn disconnect(&mut self) {
        if self.transport.take().is_some() {
            tracing::debug!(url = %self.url, "disconnected from ledger node");
        }
    }
}
