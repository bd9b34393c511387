use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::app::AppConfig;
use crate::constants::{
    HTTP_REQUEST_TIMEOUT, HTTP_UNAUTHORIZED, NETWORK_ERROR_MESSAGE, ROOT_LOCATION,
    TIMEOUT_ERROR_MESSAGE,
};
use crate::utils::GangwayError;

use super::interceptor::{attach_auth, derive_message, derive_status};
use super::traits::{Navigator, Notifier, StateAccess, Transport};
use super::transport::HttpTransport;
use super::types::{ApiEnvelope, ApiError, ApiRequest, CallFailure, RawReply};

/// The single point of outbound API access.
///
/// Built once at startup from its capabilities (transport, state access,
/// notifier, navigator) and shared from there; it keeps no per-call
/// state, so concurrent calls are independent. Every call resolves to an
/// [`ApiEnvelope`] or rejects with an [`ApiError`], never anything else.
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    state: Arc<dyn StateAccess>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Build the client over the real HTTP transport.
    pub fn new(
        config: &AppConfig,
        state: Arc<dyn StateAccess>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, GangwayError> {
        let transport = Arc::new(HttpTransport::new(config)?);
        Ok(Self::with_transport(transport, state, notifier, navigator))
    }

    /// Build the client over any transport. Tests script one.
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        state: Arc<dyn StateAccess>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            transport,
            state,
            notifier,
            navigator,
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&str>,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        self.dispatch(ApiRequest::new(Method::GET, path).with_query(query))
            .await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        self.dispatch(ApiRequest::new(Method::POST, path).with_body(body))
            .await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        self.dispatch(ApiRequest::new(Method::PUT, path).with_body(body))
            .await
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        self.dispatch(ApiRequest::new(Method::PATCH, path).with_body(body))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        self.dispatch(ApiRequest::new(Method::DELETE, path)).await
    }

    /// Run one call through the pipeline: credential injection, the wire
    /// call, then either envelope decoding or failure normalization.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let request = attach_auth(request, self.state.as_ref());
        debug!("{} {}", request.method, request.target());

        match self.transport.execute(request).await {
            Ok(reply) if reply.is_success() => decode_envelope(reply),
            Ok(reply) => Err(self.reject(CallFailure::from_reply(reply))),
            Err(fault) => Err(self.reject(CallFailure::from_fault(fault))),
        }
    }

    /// Normalize a failed call into an [`ApiError`] and fire the side
    /// effects the failure class demands.
    fn reject(&self, failure: CallFailure) -> ApiError {
        match &failure.response {
            // No response, and the clock ran out.
            None if failure.timed_out => {
                self.notifier.show_error(TIMEOUT_ERROR_MESSAGE);
                ApiError {
                    message: TIMEOUT_ERROR_MESSAGE.to_string(),
                    status: HTTP_REQUEST_TIMEOUT,
                }
            }
            // No response for any other reason: the network is the
            // prime suspect.
            None => {
                self.notifier.show_no_internet();
                ApiError {
                    message: NETWORK_ERROR_MESSAGE.to_string(),
                    status: 0,
                }
            }
            // The server answered with an error.
            Some(reply) => {
                let expired = reply.status == HTTP_UNAUTHORIZED;
                let error = ApiError {
                    message: derive_message(&failure),
                    status: derive_status(&failure),
                };
                if expired {
                    self.expire_session();
                }
                error
            }
        }
    }

    /// Session expiry: wipe local state, then send the client home.
    /// Unconditional; there is no refresh flow to attempt first.
    fn expire_session(&self) {
        warn!("session expired (401), clearing local state");
        self.state.clear_all();
        self.navigator.replace(ROOT_LOCATION);
    }
}

/// Decode a success reply into the typed envelope. The body passes
/// through unchanged; an empty body (204 and friends) stands in for
/// `data: null` so bodiless successes still resolve.
fn decode_envelope<T: DeserializeOwned>(reply: RawReply) -> Result<ApiEnvelope<T>, ApiError> {
    let status = reply.status;
    let value = reply
        .body
        .unwrap_or_else(|| json!({ "data": null, "status": status }));
    serde_json::from_value(value).map_err(|error| ApiError {
        message: format!("invalid response body: {}", error),
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::traits::{MockNavigator, MockNotifier};
    use crate::api::types::TransportFault;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use reqwest::header::AUTHORIZATION;

    /// Transport that replays scripted outcomes and records what was
    /// sent, one call at a time.
    struct FakeTransport {
        outcomes: Mutex<VecDeque<Result<RawReply, TransportFault>>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl FakeTransport {
        fn scripted(outcomes: Vec<Result<RawReply, TransportFault>>) -> Arc<Self> {
            Arc::new(Self {
                outcomes: Mutex::new(outcomes.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn sent(&self) -> Vec<ApiRequest> {
            self.requests.lock().clone()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn execute(&self, request: ApiRequest) -> Result<RawReply, TransportFault> {
            self.requests.lock().push(request);
            self.outcomes
                .lock()
                .pop_front()
                .expect("transport called more times than scripted")
        }
    }

    struct FakeStore {
        token: Option<&'static str>,
        cleared: AtomicUsize,
    }

    impl FakeStore {
        fn with_token(token: Option<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                token,
                cleared: AtomicUsize::new(0),
            })
        }

        fn cleared(&self) -> usize {
            self.cleared.load(Ordering::SeqCst)
        }
    }

    impl StateAccess for FakeStore {
        fn credential(&self) -> Option<String> {
            self.token.map(str::to_string)
        }

        fn clear_all(&self) {
            self.cleared.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn reply(
        status: u16,
        status_text: &str,
        body: Option<Value>,
    ) -> Result<RawReply, TransportFault> {
        Ok(RawReply {
            status,
            status_text: status_text.to_string(),
            body,
        })
    }

    fn client(
        transport: &Arc<FakeTransport>,
        store: &Arc<FakeStore>,
        notifier: MockNotifier,
        navigator: MockNavigator,
    ) -> ApiClient {
        ApiClient::with_transport(
            transport.clone(),
            store.clone(),
            Arc::new(notifier),
            Arc::new(navigator),
        )
    }

    #[tokio::test]
    async fn success_envelope_passes_through_unchanged() {
        let transport = FakeTransport::scripted(vec![reply(
            200,
            "OK",
            Some(json!({"data": {"id": 7}, "status": 200, "message": "done"})),
        )]);
        let store = FakeStore::with_token(None);
        let api = client(&transport, &store, MockNotifier::new(), MockNavigator::new());

        let envelope: ApiEnvelope<Value> = api.get("/items/7", None).await.unwrap();
        assert_eq!(
            envelope,
            ApiEnvelope {
                data: json!({"id": 7}),
                status: 200,
                message: Some("done".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn bearer_header_rides_along_when_logged_in() {
        let transport = FakeTransport::scripted(vec![reply(
            200,
            "OK",
            Some(json!({"data": null, "status": 200})),
        )]);
        let store = FakeStore::with_token(Some("tok-123"));
        let api = client(&transport, &store, MockNotifier::new(), MockNavigator::new());

        let _: ApiEnvelope<Value> = api.get("/profile", None).await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].headers.get(AUTHORIZATION).unwrap(), "Bearer tok-123");
    }

    #[tokio::test]
    async fn anonymous_requests_carry_no_auth_header() {
        let transport = FakeTransport::scripted(vec![reply(
            200,
            "OK",
            Some(json!({"data": null, "status": 200})),
        )]);
        let store = FakeStore::with_token(None);
        let api = client(&transport, &store, MockNotifier::new(), MockNavigator::new());

        let _: ApiEnvelope<Value> = api.get("/public", None).await.unwrap();
        assert!(transport.sent()[0].headers.get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn timeout_becomes_408_with_an_error_toast() {
        let transport =
            FakeTransport::scripted(vec![Err(TransportFault::timeout("operation timed out"))]);
        let store = FakeStore::with_token(Some("tok"));

        let mut notifier = MockNotifier::new();
        notifier
            .expect_show_error()
            .withf(|message| message == TIMEOUT_ERROR_MESSAGE)
            .times(1)
            .return_const(());

        let api = client(&transport, &store, notifier, MockNavigator::new());
        let error = api.get::<Value>("/slow", None).await.unwrap_err();

        assert_eq!(
            error,
            ApiError {
                message: TIMEOUT_ERROR_MESSAGE.to_string(),
                status: 408,
            }
        );
        assert_eq!(store.cleared(), 0);
    }

    #[tokio::test]
    async fn network_failure_becomes_status_zero_with_internet_toast() {
        let transport =
            FakeTransport::scripted(vec![Err(TransportFault::network("dns lookup failed"))]);
        let store = FakeStore::with_token(None);

        let mut notifier = MockNotifier::new();
        notifier.expect_show_no_internet().times(1).return_const(());

        let api = client(&transport, &store, notifier, MockNavigator::new());
        let error = api
            .post::<Value>("/items", json!({"name": "x"}))
            .await
            .unwrap_err();

        assert_eq!(
            error,
            ApiError {
                message: NETWORK_ERROR_MESSAGE.to_string(),
                status: 0,
            }
        );
    }

    #[tokio::test]
    async fn expired_session_clears_state_and_navigates_home() {
        let transport = FakeTransport::scripted(vec![reply(
            401,
            "Unauthorized",
            Some(json!({"message": "expired"})),
        )]);
        // Empty credential: request goes out anonymous and comes back 401.
        let store = FakeStore::with_token(Some(""));

        let mut navigator = MockNavigator::new();
        navigator
            .expect_replace()
            .withf(|location| location == "/")
            .times(1)
            .return_const(());

        // No toast on 401; an unexpected notifier call would panic here.
        let api = client(&transport, &store, MockNotifier::new(), navigator);
        let error = api.get::<Value>("/profile", None).await.unwrap_err();

        assert!(transport.sent()[0].headers.get(AUTHORIZATION).is_none());
        assert_eq!(
            error,
            ApiError {
                message: "expired".to_string(),
                status: 401,
            }
        );
        assert_eq!(store.cleared(), 1);
    }

    #[tokio::test]
    async fn server_errors_normalize_without_side_effects() {
        let transport = FakeTransport::scripted(vec![reply(
            500,
            "Internal Server Error",
            Some(json!({"error": {"message": "boom"}})),
        )]);
        let store = FakeStore::with_token(Some("tok"));

        let api = client(&transport, &store, MockNotifier::new(), MockNavigator::new());
        let error = api.delete::<Value>("/items/9").await.unwrap_err();

        assert_eq!(
            error,
            ApiError {
                message: "boom".to_string(),
                status: 500,
            }
        );
        assert_eq!(store.cleared(), 0);
    }

    #[tokio::test]
    async fn every_call_reaches_the_transport() {
        let transport = FakeTransport::scripted(vec![
            reply(200, "OK", Some(json!({"data": [1], "status": 200}))),
            reply(200, "OK", Some(json!({"data": [1], "status": 200}))),
        ]);
        let store = FakeStore::with_token(None);
        let api = client(&transport, &store, MockNotifier::new(), MockNavigator::new());

        let _: ApiEnvelope<Value> = api.get("/items", Some("?page=1")).await.unwrap();
        let _: ApiEnvelope<Value> = api.get("/items", Some("?page=1")).await.unwrap();

        // Identical calls still go out twice; nothing is cached.
        assert_eq!(transport.sent().len(), 2);
    }

    #[tokio::test]
    async fn bodiless_success_resolves_with_null_data() {
        let transport = FakeTransport::scripted(vec![reply(204, "No Content", None)]);
        let store = FakeStore::with_token(Some("tok"));
        let api = client(&transport, &store, MockNotifier::new(), MockNavigator::new());

        let envelope: ApiEnvelope<Value> = api.delete("/items/3").await.unwrap();
        assert_eq!(envelope.data, Value::Null);
        assert_eq!(envelope.status, 204);
        assert_eq!(envelope.message, None);
    }

    #[tokio::test]
    async fn undecodable_success_body_rejects_with_response_status() {
        let transport = FakeTransport::scripted(vec![reply(200, "OK", Some(json!(["a", "b"])))]);
        let store = FakeStore::with_token(None);
        let api = client(&transport, &store, MockNotifier::new(), MockNavigator::new());

        let error = api.get::<Value>("/weird", None).await.unwrap_err();
        assert_eq!(error.status, 200);
        assert!(error.message.starts_with("invalid response body"));
    }

    #[tokio::test]
    async fn query_suffix_reaches_the_transport_verbatim() {
        let transport = FakeTransport::scripted(vec![reply(
            200,
            "OK",
            Some(json!({"data": [], "status": 200})),
        )]);
        let store = FakeStore::with_token(None);
        let api = client(&transport, &store, MockNotifier::new(), MockNavigator::new());

        let _: ApiEnvelope<Value> = api.get("/items", Some("?page=2&size=10")).await.unwrap();
        assert_eq!(transport.sent()[0].target(), "/items?page=2&size=10");
    }
}
