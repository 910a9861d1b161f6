//! Upload acceptance and text decoding for applicant documents.
//!
//! Decoding may be slow or fail outright (scanned images carry no text layer). Callers go
//! through [`extract_with_timeout`], which never fails: anything other than decoded text
//! degrades to an empty string so the document still contributes its metadata.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use mime::Mime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::record::DocumentRecord;
use super::DocumentKind;

const ID_FORMATS: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
];
const INCOME_FORMATS: &[&str] = &["application/pdf", "image/jpeg", "image/png"];

/// A file submitted as an ID or income document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpload {
    pub kind: DocumentKind,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub last_modified: DateTime<Utc>,
    #[serde(default)]
    pub image_width: Option<u32>,
    #[serde(default)]
    pub image_height: Option<u32>,
    /// Text already decoded by the client, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl DocumentUpload {
    /// Check format and size against what the document kind accepts.
    pub fn validate(&self, max_bytes: u64) -> Result<(), UploadRejected> {
        let mime: Mime =
            self.content_type
                .parse()
                .map_err(|_| UploadRejected::UnsupportedFormat {
                    kind: self.kind,
                    content_type: self.content_type.clone(),
                })?;

        let allowed = match self.kind {
            DocumentKind::Id => ID_FORMATS,
            DocumentKind::Income => INCOME_FORMATS,
        };
        if !allowed.contains(&mime.essence_str()) {
            return Err(UploadRejected::UnsupportedFormat {
                kind: self.kind,
                content_type: self.content_type.clone(),
            });
        }

        if self.size_bytes == 0 {
            return Err(UploadRejected::Empty {
                file_name: self.file_name.clone(),
            });
        }
        if self.size_bytes > max_bytes {
            return Err(UploadRejected::TooLarge {
                file_name: self.file_name.clone(),
                size_bytes: self.size_bytes,
                max_bytes,
            });
        }

        Ok(())
    }

    pub fn is_image(&self) -> bool {
        self.content_type
            .parse::<Mime>()
            .map(|parsed| parsed.type_() == mime::IMAGE)
            .unwrap_or(false)
    }

    /// Pair the upload with its decoded text.
    pub fn into_record(self, raw_text: String) -> DocumentRecord {
        DocumentRecord {
            kind: self.kind,
            raw_text,
            file_name: self.file_name,
            content_type: self.content_type,
            file_size_bytes: self.size_bytes,
            last_modified: self.last_modified,
            image_width: self.image_width,
            image_height: self.image_height,
        }
    }
}

/// Reasons an upload is refused before any decoding happens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejected {
    #[error("{} does not accept files of type '{}'", .kind.label(), .content_type)]
    UnsupportedFormat {
        kind: DocumentKind,
        content_type: String,
    },
    #[error("'{file_name}' is {size_bytes} bytes, above the {max_bytes} byte limit")]
    TooLarge {
        file_name: String,
        size_bytes: u64,
        max_bytes: u64,
    },
    #[error("'{file_name}' is empty")]
    Empty { file_name: String },
}

/// Decoding collaborator turning an upload into plain text.
///
/// Implementations run on the blocking pool and may take as long as they need; the caller
/// enforces the deadline.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, upload: &DocumentUpload) -> Result<String, ExtractionError>;
}

/// Error raised by a [`TextExtractor`].
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("no text layer in '{file_name}'")]
    NoTextLayer { file_name: String },
    #[error("unable to decode '{file_name}': {reason}")]
    Unreadable { file_name: String, reason: String },
}

/// Uses the text the client decoded before upload. Images without supplied text decode to
/// nothing, so only their metadata is reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuppliedTextExtractor;

impl TextExtractor for SuppliedTextExtractor {
    fn extract_text(&self, upload: &DocumentUpload) -> Result<String, ExtractionError> {
        match &upload.text {
            Some(text) => Ok(text.clone()),
            None if upload.is_image() => Ok(String::new()),
            None => Err(ExtractionError::NoTextLayer {
                file_name: upload.file_name.clone(),
            }),
        }
    }
}

/// Run the extractor on the blocking pool, giving up after `timeout`.
pub async fn extract_with_timeout<X>(
    extractor: Arc<X>,
    upload: &DocumentUpload,
    timeout: Duration,
) -> String
where
    X: TextExtractor + 'static,
{
    let job = upload.clone();
    let task = tokio::task::spawn_blocking(move || extractor.extract_text(&job));

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(Ok(text))) => {
            debug!(file = %upload.file_name, chars = text.len(), "document text extracted");
            text
        }
        Ok(Ok(Err(err))) => {
            warn!(file = %upload.file_name, error = %err, "text extraction failed");
            String::new()
        }
        Ok(Err(err)) => {
            warn!(file = %upload.file_name, error = %err, "text extraction task aborted");
            String::new()
        }
        Err(_) => {
            warn!(
                file = %upload.file_name,
                timeout_ms = timeout.as_millis() as u64,
                "text extraction timed out"
            );
            String::new()
        }
    }
}
