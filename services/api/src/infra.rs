use chrono::{DateTime, Utc};
use lendvista::assessment::AssessmentRequest;
use lendvista::documents::{DocumentKind, DocumentRecord};
use lendvista::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_kind(raw: &str) -> Result<DocumentKind, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "id" => Ok(DocumentKind::Id),
        "income" => Ok(DocumentKind::Income),
        other => Err(format!("unknown document kind '{other}' (expected id or income)")),
    }
}

pub(crate) fn read_request(path: &Path) -> Result<AssessmentRequest, AppError> {
    let file = fs::File::open(path)?;
    let request = serde_json::from_reader(BufReader::new(file))?;
    Ok(request)
}

/// Build a document record from a decoded-text file on disk. Size, modified time and
/// content type come from the filesystem; bytes that are not UTF-8 are replaced.
pub(crate) fn record_from_path(path: &Path, kind: DocumentKind) -> Result<DocumentRecord, AppError> {
    let metadata = fs::metadata(path)?;
    let bytes = fs::read(path)?;
    let last_modified: DateTime<Utc> = metadata.modified()?.into();

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(DocumentRecord {
        kind,
        raw_text: String::from_utf8_lossy(&bytes).into_owned(),
        file_name,
        content_type,
        file_size_bytes: metadata.len(),
        last_modified,
        image_width: None,
        image_height: None,
    })
}
