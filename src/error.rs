use thiserror::Error;

/// Input-capture errors, handled locally as blocking alerts.
/// These never produce a transcript entry.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("No document selected")]
    MissingFile,
}

/// Errors returned by the orchestrator before a submission is dispatched.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("A summarization is already in flight")]
    InFlight,
}

/// Settlement outcomes of a remote summarization call that are not a summary.
///
/// All variants are terminal at the orchestrator boundary: each becomes a
/// single bot transcript entry and none propagate further up.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Summarizer reported an error: {0}")]
    Application(String),

    #[error("Malformed response from summarizer: {0}")]
    MalformedResponse(String),
}
