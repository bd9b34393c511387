//! The interceptor stages: credential injection on the way out,
//! message and status normalization on the way back.
//!
//! Each stage is a plain function over plain data, so every rule here
//! is testable without a client or a network.

use reqwest::header::{HeaderValue, AUTHORIZATION};
use serde_json::Value;
use tracing::warn;

use crate::constants::FALLBACK_ERROR_MESSAGE;

use super::traits::StateAccess;
use super::types::{ApiRequest, CallFailure};

/// Attach `Authorization: Bearer <token>` when the store holds a
/// non-empty credential. Otherwise the request passes through untouched,
/// and the server decides what anonymous callers may do.
pub fn attach_auth(mut request: ApiRequest, state: &dyn StateAccess) -> ApiRequest {
    if let Some(token) = state.credential().filter(|token| !token.is_empty()) {
        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(value) => {
                request.headers.insert(AUTHORIZATION, value);
            }
            Err(_) => {
                warn!("stored credential is not a valid header value; sending unauthenticated");
            }
        }
    }
    request
}

/// Message extractors in precedence order. The first stage to produce a
/// candidate wins; adding a source is inserting a function here.
const MESSAGE_EXTRACTORS: &[fn(&CallFailure) -> Option<String>] = &[
    nested_error_message,
    top_level_message,
    status_line_text,
    transport_message,
];

/// Derive the one human-readable message for a failed call.
pub fn derive_message(failure: &CallFailure) -> String {
    MESSAGE_EXTRACTORS
        .iter()
        .find_map(|extract| extract(failure))
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}

/// Derive the status for a failed call: the response status when the
/// server answered, the error's own status when it did not, zero when
/// nobody knows.
pub fn derive_status(failure: &CallFailure) -> u16 {
    failure
        .response
        .as_ref()
        .map(|reply| reply.status)
        .or(failure.error_status)
        .unwrap_or(0)
}

fn body_of(failure: &CallFailure) -> Option<&Value> {
    failure.response.as_ref()?.body.as_ref()
}

/// `body.error.message`, the nested application-level error field.
fn nested_error_message(failure: &CallFailure) -> Option<String> {
    non_empty(body_of(failure)?.get("error")?.get("message")?.as_str()?)
}

/// `body.message`, the top-level application-level field.
fn top_level_message(failure: &CallFailure) -> Option<String> {
    non_empty(body_of(failure)?.get("message")?.as_str()?)
}

/// Reason phrase of the response status line.
fn status_line_text(failure: &CallFailure) -> Option<String> {
    non_empty(&failure.response.as_ref()?.status_text)
}

/// The transport's own description of the failure.
fn transport_message(failure: &CallFailure) -> Option<String> {
    non_empty(failure.transport_message.as_deref()?)
}

/// Empty strings never win a precedence slot; the next stage runs.
fn non_empty(candidate: &str) -> Option<String> {
    if candidate.is_empty() {
        None
    } else {
        Some(candidate.to_string())
    }
}
