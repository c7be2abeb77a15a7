use super::StepExtractor;
use super::step::{ExtractionRequest, ExtractionResponse, Step};
use crate::error::ExtractionError;
use futures::future::BoxFuture;
use reqwest::Client;
use std::time::Duration;

/// Calls an extraction endpoint with `POST {"message": ...}`.
pub struct HttpStepExtractor {
    http: Client,
    endpoint: String,
}

impl HttpStepExtractor {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    /// Builds an extractor whose requests give up after `timeout`.
    pub fn with_timeout(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ExtractionError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExtractionError::Request(e.to_string()))?;
        Ok(Self::with_client(http, endpoint))
    }

    pub fn with_client(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl StepExtractor for HttpStepExtractor {
    fn extract<'a>(&'a self, message: &'a str) -> BoxFuture<'a, Result<Vec<Step>, ExtractionError>> {
        Box::pin(async move {
            tracing::debug!(endpoint = %self.endpoint, "requesting step extraction");
            let response = self
                .http
                .post(&self.endpoint)
                .json(&ExtractionRequest {
                    message: message.to_string(),
                })
                .send()
                .await
                .map_err(|e| ExtractionError::Request(e.to_string()))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| ExtractionError::Request(e.to_string()))?;

            if !status.is_success() {
                let detail = match serde_json::from_str::<ExtractionResponse>(&body) {
                    Ok(ExtractionResponse::Failure { error }) => error,
                    _ => body,
                };
                return Err(ExtractionError::Status {
                    status: status.as_u16(),
                    message: detail,
                });
            }

            parse_response(&body)
        })
    }
}

/// Interprets an extraction response body.
pub fn parse_response(body: &str) -> Result<Vec<Step>, ExtractionError> {
    match serde_json::from_str::<ExtractionResponse>(body) {
        Ok(ExtractionResponse::Steps { steps }) => Ok(steps),
        Ok(ExtractionResponse::Failure { error }) => Err(ExtractionError::Service(error)),
        Err(e) => Err(ExtractionError::Malformed(e.to_string())),
    }
}
