use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::fields::{ExtractedFields, FieldKey, FieldValue};
use super::parser::FieldParser;
use super::DocumentKind;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// An accepted upload paired with the text the decoding collaborator produced for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub kind: DocumentKind,
    /// Decoded text, empty when decoding failed or the file carries no text layer.
    #[serde(default)]
    pub raw_text: String,
    pub file_name: String,
    pub content_type: String,
    pub file_size_bytes: u64,
    pub last_modified: DateTime<Utc>,
    #[serde(default)]
    pub image_width: Option<u32>,
    #[serde(default)]
    pub image_height: Option<u32>,
}

impl DocumentRecord {
    /// Upper-cased extension of the file name, or the whole name when it has none.
    pub fn file_format(&self) -> String {
        self.file_name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_uppercase()
    }
}

/// Merges parsed content fields with file metadata into the per-document field map.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentRecordBuilder {
    parser: FieldParser,
}

impl DocumentRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(&self, record: &DocumentRecord) -> ExtractedFields {
        let mut fields = if record.raw_text.is_empty() {
            ExtractedFields::new()
        } else {
            self.parser.extract(&record.raw_text, record.kind)
        };

        fields.extend(metadata_fields(record));
        fields
    }
}

fn metadata_fields(record: &DocumentRecord) -> ExtractedFields {
    let mut fields = ExtractedFields::new();
    fields.insert(
        FieldKey::FileName,
        FieldValue::Text(record.file_name.clone()),
    );
    fields.insert(FieldKey::FileFormat, FieldValue::Text(record.file_format()));
    fields.insert(
        FieldKey::FileSize,
        FieldValue::Text(format_file_size(record.file_size_bytes)),
    );
    fields.insert(
        FieldKey::LastModified,
        FieldValue::Text(record.last_modified.format("%-m/%-d/%Y").to_string()),
    );

    // A zero width means the image could not be measured.
    if let Some(width) = record.image_width.filter(|width| *width > 0) {
        let height = record.image_height.unwrap_or(0);
        fields.insert(
            FieldKey::Dimensions,
            FieldValue::Text(format!("{width} × {height}px")),
        );
    }

    fields
}

/// Human-readable size: bytes below 1 KiB, then KB and MB with one decimal.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < MIB {
        format!("{} KB", one_decimal(bytes, KIB))
    } else {
        format!("{} MB", one_decimal(bytes, MIB))
    }
}

/// `bytes / unit` to one decimal place, exact halves rounding up.
fn one_decimal(bytes: u64, unit: u64) -> String {
    let tenths = (u128::from(bytes) * 10 + u128::from(unit) / 2) / u128::from(unit);
    format!("{}.{}", tenths / 10, tenths % 10)
}
