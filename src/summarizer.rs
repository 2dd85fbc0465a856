//! Remote summarization client
//!
//! Sends a staged document to the summarization service as a multipart POST
//! and decodes the JSON reply into a tagged result. The service reports
//! domain errors in the body (with a 4xx/5xx status), so the status code is
//! not consulted; only the body shape matters.

use crate::error::SummarizeError;
use crate::input::{StagedFile, SummaryLength};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

/// Connect timeout for the HTTP client. In-flight requests carry no overall
/// deadline; a dispatched summarization runs to settlement.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Remote collaborator that turns a document into a summary
#[async_trait]
pub(crate) trait Summarize {
    async fn summarize(
        &self,
        file: &StagedFile,
        length: SummaryLength,
    ) -> Result<String, SummarizeError>;
}

/// Reply body from the summarization service
///
/// Exactly one of the fields is expected; a body carrying neither is
/// classified as malformed rather than silently yielding an empty summary.
#[derive(Debug, Deserialize)]
struct SummarizeReply {
    summary: Option<String>,
    error: Option<String>,
}

/// Turn a decoded reply into a summary or a classified error
fn classify_reply(reply: SummarizeReply) -> Result<String, SummarizeError> {
    if let Some(error) = reply.error {
        return Err(SummarizeError::Application(error));
    }
    match reply.summary {
        Some(summary) => Ok(summary),
        None => Err(SummarizeError::MalformedResponse(
            "Reply carries neither summary nor error".to_string(),
        )),
    }
}

/// HTTP client for the summarization service
pub(crate) struct SummarizerClient {
    endpoint: Url,
    client: reqwest::Client,
}

impl SummarizerClient {
    /// Create a client for the configured endpoint
    pub(crate) fn new(endpoint: &str) -> anyhow::Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("Invalid summarizer URL: {}", endpoint))?;
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client for SummarizerClient")?;

        Ok(Self { endpoint, client })
    }
}

#[async_trait]
impl Summarize for SummarizerClient {
    /// Upload a document and await its summary
    ///
    /// The multipart form carries the file bytes under `file` with the
    /// original filename preserved, and the length under `length`.
    #[instrument(skip(self, file), fields(file_name = %file.name, file_len = file.bytes.len()))]
    async fn summarize(
        &self,
        file: &StagedFile,
        length: SummaryLength,
    ) -> Result<String, SummarizeError> {
        let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = Form::new()
            .part("file", part)
            .text("length", length.as_str());

        info!("Uploading document to summarizer");
        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        // A non-JSON body surfaces here as a decode error, i.e. transport
        // failure, same as an unreachable endpoint.
        let reply: SummarizeReply = response.json().await?;
        classify_reply(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> SummarizeReply {
        serde_json::from_str(json).expect("Failed to deserialize")
    }

    #[test]
    fn test_summary_reply_is_used_verbatim() {
        let reply = decode(r#"{ "summary": "Report discusses Q3 results." }"#);
        let summary = classify_reply(reply).expect("summary reply");
        assert_eq!(summary, "Report discusses Q3 results.");
    }

    #[test]
    fn test_error_reply_becomes_application_error() {
        let reply = decode(r#"{ "error": "bad file" }"#);
        match classify_reply(reply) {
            Err(SummarizeError::Application(message)) => assert_eq!(message, "bad file"),
            other => panic!("Expected application error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_field_wins_over_summary() {
        // The service never sends both, but error must take precedence
        let reply = decode(r#"{ "summary": "ignored", "error": "extraction failed" }"#);
        assert!(matches!(
            classify_reply(reply),
            Err(SummarizeError::Application(m)) if m == "extraction failed"
        ));
    }

    #[test]
    fn test_empty_reply_is_malformed() {
        let reply = decode("{}");
        assert!(matches!(
            classify_reply(reply),
            Err(SummarizeError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_unknown_fields_without_summary_are_malformed() {
        let reply = decode(r#"{ "message": "AI Document Summarizer Backend Running" }"#);
        assert!(matches!(
            classify_reply(reply),
            Err(SummarizeError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_client_rejects_invalid_endpoint() {
        assert!(SummarizerClient::new("not a url").is_err());
    }
}
