//! Document text normalization, field extraction, and per-document field maps.

mod fields;
pub mod intake;
mod normalizer;
mod parser;
mod patterns;
mod record;

pub use fields::{DisplayRow, ExtractedFields, FieldKey, FieldValue};
pub use intake::{
    extract_with_timeout, DocumentUpload, ExtractionError, SuppliedTextExtractor, TextExtractor,
    UploadRejected,
};
pub use normalizer::normalize_text;
pub use parser::FieldParser;
pub use record::{format_file_size, DocumentRecord, DocumentRecordBuilder};

use serde::{Deserialize, Serialize};

/// The two documents an applicant may upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Id,
    Income,
}

impl DocumentKind {
    pub const fn label(self) -> &'static str {
        match self {
            DocumentKind::Id => "Government ID",
            DocumentKind::Income => "Income Statement",
        }
    }
}
