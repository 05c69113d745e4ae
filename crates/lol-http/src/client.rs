use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::transport::{RawResponse, ReqwestTransport, Request, Transport, REQUEST_TIMEOUT};
use crate::HttpError;

/// First retry waits this long; each later retry waits one more multiple of it.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(100);

/// Successful response body: JSON when it parses, the raw bytes otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Json(Value),
    Raw { status: u16, body: String },
}

impl Reply {
    fn from_response(response: RawResponse) -> Self {
        match serde_json::from_slice(&response.body) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Raw {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            },
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Raw { .. } => None,
        }
    }

    /// Validate the reply into a typed record.
    pub fn decode<T: DeserializeOwned>(self, url: &str) -> Result<T, HttpError> {
        match self {
            Self::Json(value) => serde_json::from_value(value).map_err(|e| HttpError::Protocol {
                url: url.to_string(),
                reason: e.to_string(),
            }),
            Self::Raw { status, body } => Err(HttpError::Protocol {
                url: url.to_string(),
                reason: format!("expected JSON, got {} byte(s) with status {status}", body.len()),
            }),
        }
    }
}

/// Sends requests with a bounded retry budget.
///
/// A 404 fails immediately; any other failure (transport error or
/// non-success status) is retried until `retries + 1` attempts were made.
#[derive(Clone)]
pub struct RequestClient {
    transport: Arc<dyn Transport>,
    base_delay: Duration,
}

impl RequestClient {
    /// Client backed by reqwest with certificate validation disabled.
    pub fn new() -> Result<Self, HttpError> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::new(
            REQUEST_TIMEOUT,
        )?)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub async fn send(&self, request: Request, retries: u32) -> Result<Reply, HttpError> {
        let attempts = retries.saturating_add(1);
        let mut last_status = None;
        let mut last_reason = String::new();

        for attempt in 1..=attempts {
            match self.transport.execute(&request).await {
                Ok(response) if response.status == 404 => {
                    debug!("{} {} -> 404", request.method(), request.url());
                    return Err(HttpError::NotFound {
                        url: request.url().to_string(),
                    });
                }
                Ok(response) if response.is_success() => {
                    return Ok(Reply::from_response(response));
                }
                Ok(response) => {
                    last_status = Some(response.status);
                    last_reason = format!("HTTP {}", response.status);
                }
                Err(failure) => {
                    last_status = None;
                    last_reason = failure.0;
                }
            }

            if attempt < attempts {
                let delay = self.base_delay * attempt;
                debug!(
                    "{} {} failed ({}), retrying in {:?} ({} retries left)",
                    request.method(),
                    request.url(),
                    last_reason,
                    delay,
                    attempts - attempt
                );
                sleep(delay).await;
            }
        }

        warn!(
            "{} {} gave up after {} attempt(s): {}",
            request.method(),
            request.url(),
            attempts,
            last_reason
        );
        Err(HttpError::Transport {
            url: request.url().to_string(),
            status: last_status,
            attempts,
            reason: last_reason,
        })
    }

    /// `send` then decode the JSON body into `T`.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: Request,
        retries: u32,
    ) -> Result<T, HttpError> {
        let url = request.url().to_string();
        self.send(request, retries).await?.decode(&url)
    }
}
