//! HTTP client for the resume parsing service.
//!
//! The parser is an external collaborator: it receives the uploaded file
//! and returns a structured object (name, email, skills, experience,
//! education). The response is stored verbatim and never interpreted here.
//! The call is bounded by a request timeout; a timeout counts as a parse
//! failure and the caller must not create any resume row.

use std::time::Duration;

use serde_json::Value as JsonValue;

use crate::error::{AppError, AppResult};

/// Client for the resume parsing service.
#[derive(Clone)]
pub struct ParserClient {
    client: reqwest::Client,
    base_url: String,
}

impl ParserClient {
    /// Create a new parser client with the configured timeout.
    pub fn new(base_url: &str, timeout_secs: u64) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Upstream(format!("Failed to build parser client: {}", e)))?;

        Ok(ParserClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Parse a resume file, returning the parser's structured output.
    pub async fn parse(
        &self,
        file_bytes: Vec<u8>,
        mime_type: &str,
        filename: &str,
    ) -> AppResult<JsonValue> {
        let part = reqwest::multipart::Part::bytes(file_bytes)
            .file_name(filename.to_string())
            .mime_str(mime_type)
            .map_err(|e| AppError::Upstream(format!("Invalid MIME type for parser: {}", e)))?;

        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/parse-resume", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Upstream("Resume parsing timed out".to_string())
                } else {
                    AppError::Upstream(format!("Resume parsing service unreachable: {}", e))
                }
            })?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "Resume parsing failed with status {}",
                response.status()
            )));
        }

        let parsed = response
            .json::<JsonValue>()
            .await
            .map_err(|e| AppError::Upstream(format!("Invalid parser response: {}", e)))?;

        Ok(parsed)
    }
}
