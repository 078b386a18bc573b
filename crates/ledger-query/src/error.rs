use {reqwest::Url, thiserror::Error};

/// The node could not be reached or did not complete the handshake.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("node {url} is unreachable: {source}")]
    Unreachable {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("handshake with node {url} failed: {reason}")]
    Handshake { url: Url, reason: String },
    #[error("not connected to a node")]
    NotConnected,
}

/// The node is reachable but did not answer a specific request.
#[derive(Debug, Error)]
pub enum RemoteQueryError {
    #[error(
        "{command} rejected by node: {error} ({})",
        .message.as_deref().unwrap_or("no details")
    )]
    Rejected {
        command: &'static str,
        error: String,
        code: Option<i64>,
        message: Option<String>,
    },
    #[error("{command} returned an invalid response: {reason}")]
    InvalidResponse {
        command: &'static str,
        reason: String,
    },
    #[error("{command} timed out")]
    Timeout { command: &'static str },
    /// The connection to the node failed while the command was in flight.
    #[error("{command} failed in transport: {source}")]
    Transport {
        command: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to encode {command} request: {source}")]
    Encode {
        command: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl RemoteQueryError {
    pub fn command(&self) -> &'static str {
        match self {
            Self::Rejected { command, .. }
            | Self::InvalidResponse { command, .. }
            | Self::Timeout { command }
            | Self::Transport { command, .. }
            | Self::Encode { command, .. } => command,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error(transparent)]
    RemoteQuery(#[from] RemoteQueryError),
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    /// Name of the step of the query flow that failed.
    pub fn step(&self) -> &'static str {
        match self {
            Self::Connection(_) => "connection",
            Self::RemoteQuery(err) => err.command(),
            Self::Output(_) => "output",
        }
    }
}
