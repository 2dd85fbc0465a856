//! Upload orchestration
//!
//! Owns the request lifecycle for a submission: appends the user turn,
//! tracks the in-flight busy flag, dispatches the remote call, and appends
//! exactly one bot turn on settlement. All remote failures are terminal
//! here; they become transcript entries and never propagate to the caller.

use crate::error::{SubmitError, SummarizeError};
use crate::input::PendingSubmission;
use crate::summarizer::Summarize;
use crate::transcript::{TranscriptEntry, TranscriptStore};
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Fixed message shown when the service cannot be reached or returns a
/// body that is not JSON. The underlying cause is logged, never surfaced.
const TRANSPORT_ERROR_MESSAGE: &str = "❌ Backend error. Try again.";

/// Fixed message shown when the service returns JSON that carries neither
/// a summary nor an error.
const MALFORMED_REPLY_MESSAGE: &str = "❌ Unexpected reply from the summarizer.";

/// Drives submissions through their two states: idle and submitting.
///
/// Exclusive owner of the transcript and the busy flag; the view reads
/// both through the accessors and mutates neither.
pub(crate) struct UploadOrchestrator<S: Summarize> {
    client: S,
    transcript: TranscriptStore,
    busy: Arc<AtomicBool>,
}

impl<S: Summarize> UploadOrchestrator<S> {
    pub(crate) fn new(client: S) -> Self {
        Self {
            client,
            transcript: TranscriptStore::default(),
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Dispatch a submission and await its settlement
    ///
    /// Appends the user turn immediately, then the bot turn (summary or
    /// error text) once the remote call settles. The busy flag is set for
    /// exactly the span between dispatch and settlement.
    ///
    /// Only one submission may be in flight: while busy, further calls are
    /// rejected with `SubmitError::InFlight` and append nothing.
    pub(crate) async fn submit(&mut self, submission: PendingSubmission) -> Result<(), SubmitError> {
        if self.busy.load(Ordering::SeqCst) {
            warn!("Submission rejected: another summarization is in flight");
            return Err(SubmitError::InFlight);
        }

        let PendingSubmission { file, length } = submission;
        let ts = Utc::now().timestamp_millis();

        info!(file_name = %file.name, %length, "Dispatching summarization");
        self.transcript
            .append(TranscriptEntry::user(ts, format!("📄 Uploaded: {}", file.name)));
        self.busy.store(true, Ordering::SeqCst);

        let entry = match self.client.summarize(&file, length).await {
            Ok(summary) => {
                info!(summary_len = summary.len(), "Summarization settled with a summary");
                TranscriptEntry::bot(ts + 1, summary)
            }
            Err(SummarizeError::Application(message)) => {
                warn!(%message, "Summarizer reported an error");
                TranscriptEntry::bot(ts + 1, format!("❌ Error: {}", message))
            }
            Err(SummarizeError::Network(e)) => {
                error!(cause = %e, "Summarization failed in transport");
                TranscriptEntry::bot(ts + 2, TRANSPORT_ERROR_MESSAGE)
            }
            Err(SummarizeError::MalformedResponse(detail)) => {
                error!(%detail, "Summarizer reply matched no known shape");
                TranscriptEntry::bot(ts + 2, MALFORMED_REPLY_MESSAGE)
            }
        };

        self.transcript.append(entry);
        self.busy.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// Snapshot of the transcript in insertion order
    pub(crate) fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.all()
    }

    pub(crate) fn transcript_len(&self) -> usize {
        self.transcript.len()
    }

    /// Whether a submission is currently in flight
    pub(crate) fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Shared handle to the busy flag for the view's "thinking" indicator
    pub(crate) fn busy_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.busy)
    }
}
