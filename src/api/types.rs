use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The uniform success shape every API call resolves to.
///
/// Mirrors the server contract: the payload under `data`, the status the
/// server reports for itself, and an optional human-readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The uniform failure shape every API call rejects with.
///
/// Exactly two fields. Whatever went wrong (server error body, timeout,
/// unreachable network, undecodable reply), callers match on this and
/// nothing else.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message} (status {status})")]
pub struct ApiError {
    pub message: String,
    pub status: u16,
}

/// One outbound call, assembled by the client and finished by the
/// interceptor stages before it reaches the transport.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Endpoint path relative to the configured base address.
    pub path: String,
    /// Raw query suffix, appended to the path verbatim.
    pub query: Option<String>,
    pub body: Option<Value>,
    /// Per-request headers; the transport supplies the default set.
    pub headers: HeaderMap,
}

impl ApiRequest {
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            query: None,
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn with_query(mut self, query: Option<&str>) -> Self {
        self.query = query.map(str::to_string);
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Request target relative to the base address: path plus the raw
    /// query suffix, if any.
    pub fn target(&self) -> String {
        match &self.query {
            Some(query) => format!("{}{}", self.path, query),
            None => self.path.clone(),
        }
    }
}

/// A response the server actually produced, success or not.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReply {
    pub status: u16,
    /// Reason phrase of the status line; empty for nonstandard codes.
    pub status_text: String,
    /// Decoded JSON body. `None` when the body was empty or not JSON.
    pub body: Option<Value>,
}

impl RawReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A call that produced no response at all.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportFault {
    /// True when the call hit the per-request timeout ceiling.
    pub timed_out: bool,
    /// The transport's own description of what went wrong.
    pub message: String,
    /// Status the transport attributes to the failure, when it has one.
    pub status: Option<u16>,
}

impl TransportFault {
    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            timed_out: true,
            message: message.into(),
            status: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            timed_out: false,
            message: message.into(),
            status: None,
        }
    }
}

impl From<reqwest::Error> for TransportFault {
    fn from(error: reqwest::Error) -> Self {
        Self {
            timed_out: error.is_timeout(),
            message: error.to_string(),
            status: error.status().map(|status| status.as_u16()),
        }
    }
}

/// A failed call as seen at the rejection point, response or not.
///
/// The normalization stages read this one shape instead of poking at
/// transport-specific error objects.
#[derive(Debug, Clone, PartialEq)]
pub struct CallFailure {
    /// The error response, when the server answered.
    pub response: Option<RawReply>,
    pub timed_out: bool,
    /// Transport message, for failures the transport itself described.
    pub transport_message: Option<String>,
    /// Status carried on the error itself rather than on a response.
    pub error_status: Option<u16>,
}

impl CallFailure {
    /// Failure for a non-success response.
    pub fn from_reply(reply: RawReply) -> Self {
        Self {
            response: Some(reply),
            timed_out: false,
            transport_message: None,
            error_status: None,
        }
    }

    /// Failure for a call the transport could not complete.
    pub fn from_fault(fault: TransportFault) -> Self {
        Self {
            response: None,
            timed_out: fault.timed_out,
            transport_message: Some(fault.message),
            error_status: fault.status,
        }
    }
}
