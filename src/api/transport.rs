use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use tracing::trace;

use crate::app::AppConfig;
use crate::constants::{HEADER_IP_ADDRESS, HEADER_LANGUAGE, HEADER_PLATFORM, HEADER_VERSION};
use crate::utils::GangwayError;

use super::traits::Transport;
use super::types::{ApiRequest, RawReply, TransportFault};

/// The real HTTP transport, one long-lived client per process.
///
/// The timeout ceiling and the default header contract are baked in at
/// construction; per-request headers from the interceptor stages layer
/// on top.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &AppConfig) -> Result<Self, GangwayError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(HEADER_LANGUAGE, header_value(HEADER_LANGUAGE, &config.language)?);
        headers.insert(HEADER_PLATFORM, header_value(HEADER_PLATFORM, &config.platform)?);
        headers.insert(HEADER_VERSION, header_value(HEADER_VERSION, &config.version)?);
        headers.insert(
            HEADER_IP_ADDRESS,
            header_value(HEADER_IP_ADDRESS, &config.ip_address)?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, GangwayError> {
    HeaderValue::from_str(value)
        .map_err(|_| GangwayError::ConfigError(format!("invalid value for header '{}'", name)))
}

/// Joins the base address and a request target, inserting the path
/// separator when a non-empty base meets a target without one.
fn join_url(base: &str, target: &str) -> String {
    if base.is_empty() || target.starts_with('/') {
        format!("{}{}", base, target)
    } else {
        format!("{}/{}", base, target)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawReply, TransportFault> {
        let url = join_url(&self.base_url, &request.target());
        trace!("{} {}", request.method, url);

        let mut builder = self
            .client
            .request(request.method, &url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.json(&body);
        }

        let response = builder.send().await.map_err(TransportFault::from)?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        // Non-JSON text counts as no body, but a failed read is a
        // transport fault: the timeout ceiling also covers the body, so
        // a stalled read must keep its `is_timeout` marker.
        let body = match response.text().await {
            Ok(text) if !text.is_empty() => serde_json::from_str(&text).ok(),
            Ok(_) => None,
            Err(error) => return Err(TransportFault::from(error)),
        };

        Ok(RawReply {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}
