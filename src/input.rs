//! Document input capture
//!
//! Resolves a single staged file plus a summary length from either a file
//! picker or a drag-and-drop gesture, and hands the pair off to the
//! orchestrator as a `PendingSubmission`.

use crate::error::InputError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// File extensions the picker offers (soft constraint; not re-validated
/// downstream)
const PICKER_EXTENSIONS: &[&str] = &[
    "pdf", "png", "jpg", "jpeg", "gif", "bmp", "tiff", "webp",
];

/// Desired summary length, sent to the service as its lowercase wire value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl SummaryLength {
    /// Wire value for the multipart `length` field
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            SummaryLength::Short => "short",
            SummaryLength::Medium => "medium",
            SummaryLength::Long => "long",
        }
    }
}

impl fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(SummaryLength::Short),
            "medium" => Ok(SummaryLength::Medium),
            "long" => Ok(SummaryLength::Long),
            other => Err(format!("Unknown summary length: {}", other)),
        }
    }
}

/// A selected document: original filename plus its raw bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StagedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl StagedFile {
    pub(crate) fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a document from disk, preserving its filename
    pub(crate) fn from_path(path: &Path) -> anyhow::Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("No filename in path {:?}", path))?;
        let bytes = std::fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
        Ok(Self::new(name, bytes))
    }
}

/// Whether the picker filter offers a file with this name.
/// Checked at selection time only; the service does its own validation.
pub(crate) fn picker_accepts(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_ascii_lowercase();
            PICKER_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// A finalized file/length pair, ready to dispatch.
/// Ephemeral: consumed by the orchestrator at dispatch time.
#[derive(Debug)]
pub(crate) struct PendingSubmission {
    pub file: StagedFile,
    pub length: SummaryLength,
}

/// Input state for the upload bar: staged file, length selector, drag flag
#[derive(Debug, Default)]
pub(crate) struct InputCapture {
    staged: Option<StagedFile>,
    length: SummaryLength,
    dragging: bool,
}

impl InputCapture {
    /// Stage a file chosen through the picker, replacing any prior candidate
    pub(crate) fn select_from_picker(&mut self, file: StagedFile) {
        self.staged = Some(file);
    }

    /// Stage the first file of a drop gesture
    ///
    /// An empty drop is a no-op; extra files beyond the first are discarded
    /// silently. The drag highlight is cleared either way.
    pub(crate) fn select_from_drop(&mut self, mut files: Vec<StagedFile>) {
        self.dragging = false;
        if files.is_empty() {
            return;
        }
        self.staged = Some(files.swap_remove(0));
    }

    pub(crate) fn set_length(&mut self, length: SummaryLength) {
        self.length = length;
    }

    pub(crate) fn length(&self) -> SummaryLength {
        self.length
    }

    /// Toggle the drag-over highlight. Purely visual: entering drag state
    /// while a file is already staged does not clear it.
    pub(crate) fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub(crate) fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Name of the currently staged file, for display in the upload bar
    pub(crate) fn staged_file_name(&self) -> Option<&str> {
        self.staged.as_ref().map(|f| f.name.as_str())
    }

    /// Hand off the staged file and current length for dispatch
    ///
    /// Clears the staged file on success so the same selection cannot be
    /// submitted twice. With no file staged this fails with `MissingFile`,
    /// surfaced to the user as a blocking alert rather than a transcript
    /// entry.
    pub(crate) fn finalize(&mut self) -> Result<PendingSubmission, InputError> {
        let file = self.staged.take().ok_or(InputError::MissingFile)?;
        Ok(PendingSubmission {
            file,
            length: self.length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged(name: &str) -> StagedFile {
        StagedFile::new(name, vec![1, 2, 3])
    }

    #[test]
    fn test_finalize_without_file_is_missing_file() {
        let mut input = InputCapture::default();
        let result = input.finalize();
        assert!(matches!(result, Err(InputError::MissingFile)));
    }

    #[test]
    fn test_finalize_clears_staged_file() {
        let mut input = InputCapture::default();
        input.select_from_picker(staged("report.pdf"));

        let submission = input.finalize().expect("file was staged");
        assert_eq!(submission.file.name, "report.pdf");

        // A second submit without reselecting must fail
        assert!(matches!(input.finalize(), Err(InputError::MissingFile)));
    }

    #[test]
    fn test_default_length_is_medium() {
        let input = InputCapture::default();
        assert_eq!(input.length(), SummaryLength::Medium);
    }

    #[test]
    fn test_finalize_carries_selected_length() {
        let mut input = InputCapture::default();
        input.select_from_picker(staged("scan.png"));
        input.set_length(SummaryLength::Long);

        let submission = input.finalize().expect("file was staged");
        assert_eq!(submission.length, SummaryLength::Long);
    }

    #[test]
    fn test_empty_drop_is_noop() {
        let mut input = InputCapture::default();
        input.set_dragging(true);
        input.select_from_drop(Vec::new());

        assert!(!input.is_dragging());
        assert!(input.staged_file_name().is_none());
    }

    #[test]
    fn test_drop_stages_only_first_file() {
        let mut input = InputCapture::default();
        input.select_from_drop(vec![staged("first.pdf"), staged("second.pdf")]);

        assert_eq!(input.staged_file_name(), Some("first.pdf"));
    }

    #[test]
    fn test_dragging_does_not_clear_staged_file() {
        let mut input = InputCapture::default();
        input.select_from_picker(staged("kept.pdf"));
        input.set_dragging(true);

        assert!(input.is_dragging());
        assert_eq!(input.staged_file_name(), Some("kept.pdf"));
    }

    #[test]
    fn test_summary_length_wire_values() {
        assert_eq!(SummaryLength::Short.as_str(), "short");
        assert_eq!(SummaryLength::Medium.as_str(), "medium");
        assert_eq!(SummaryLength::Long.as_str(), "long");
    }

    #[test]
    fn test_summary_length_from_str() {
        assert_eq!("long".parse::<SummaryLength>(), Ok(SummaryLength::Long));
        assert_eq!(" Short ".parse::<SummaryLength>(), Ok(SummaryLength::Short));
        assert!("huge".parse::<SummaryLength>().is_err());
    }

    #[test]
    fn test_picker_accepts_documents_and_images() {
        assert!(picker_accepts("report.pdf"));
        assert!(picker_accepts("scan.JPG"));
        assert!(!picker_accepts("notes.txt"));
        assert!(!picker_accepts("no_extension"));
    }

    #[test]
    fn test_staged_file_from_missing_path_fails() {
        let result = StagedFile::from_path(Path::new("/nonexistent/doc.pdf"));
        assert!(result.is_err());
    }
}
