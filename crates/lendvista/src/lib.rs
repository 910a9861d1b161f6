//! Loan pre-qualification core.
//!
//! - `documents`: whitespace normalization, regex field extraction, and per-document field maps.
//! - `scoring`: the six-component weighted score mapped onto the 300-850 range.
//! - `offer`: loan amount, APR, term, and amortized monthly payment derived from a score.
//! - `assessment`: the service and HTTP router tying applicant input, uploads, and scoring together.

pub mod applicant;
pub mod assessment;
pub mod config;
pub mod documents;
pub mod error;
pub mod offer;
pub mod scoring;
pub mod telemetry;
