//! Remote question-answering client
//!
//! One request per question: `POST {base_url}/ask` with `{"question": ...}`,
//! expecting `{"answer": ...}`. No history accompanies the request; the
//! backend sees only the latest question.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default backend address when none is configured
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Assistant text used when the response carries no `answer` field
pub const FALLBACK_ANSWER: &str = "No response";

#[derive(Debug, Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

#[derive(Debug, Deserialize)]
struct AskResponse {
    answer: Option<String>,
}

/// HTTP client for the Q&A backend
#[derive(Debug, Clone)]
pub struct AskClient {
    client: reqwest::Client,
    base_url: String,
}

impl AskClient {
    /// Create a client for the given base URL (no trailing slash)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// The configured base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask a single question and return the assistant's answer
    ///
    /// Falls back to [`FALLBACK_ANSWER`] when the response omits the
    /// `answer` field. No retries, no cancellation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Backend`] on any transport failure, non-success
    /// status, or malformed response body. All failure modes are a uniform
    /// connectivity error to the caller.
    pub async fn ask(&self, question: &str) -> Result<String> {
        tracing::debug!(url = %self.base_url, "sending question to backend");

        let response = self
            .client
            .post(format!("{}/ask", self.base_url))
            .json(&AskRequest { question })
            .send()
            .await
            .map_err(|e| Error::Backend(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Backend(format!("backend returned {status}: {body}")));
        }

        let body: AskResponse = response
            .json()
            .await
            .map_err(|e| Error::Backend(e.to_string()))?;

        Ok(body.answer.unwrap_or_else(|| FALLBACK_ANSWER.to_string()))
    }
}
