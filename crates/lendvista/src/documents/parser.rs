use regex::Regex;

use super::fields::{ExtractedFields, FieldKey, FieldValue};
use super::normalizer::{normalize_text, tokens};
use super::patterns::document_patterns;
use super::DocumentKind;

/// Normalized text shorter than this produces an empty field map.
const MIN_TEXT_CHARS: usize = 5;
const MAX_AMOUNTS: usize = 5;

/// Stateless extractor turning decoded document text into structured fields.
///
/// Singular fields take the first pattern that matches; `dates` and `amounts` collect from
/// every pattern and keep distinct values. Nothing here fails: a pattern that does not match
/// leaves its field out.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldParser;

impl FieldParser {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str, kind: DocumentKind) -> ExtractedFields {
        let mut fields = ExtractedFields::new();
        let normalized = normalize_text(text);
        if normalized.chars().count() < MIN_TEXT_CHARS {
            return fields;
        }

        let patterns = document_patterns();

        if let Some(name) = first_capture(&patterns.names, &normalized) {
            fields.insert(FieldKey::Name, FieldValue::Text(name.trim().to_string()));
        }

        let mut dates: Vec<String> = Vec::new();
        for pattern in &patterns.dates {
            if let Some(date) = capture(pattern, &normalized) {
                if !dates.iter().any(|seen| seen == date) {
                    dates.push(date.to_string());
                }
            }
        }
        if !dates.is_empty() {
            fields.insert(FieldKey::Dates, FieldValue::List(dates));
        }

        if let Some(expiry) = capture(&patterns.expiry, &normalized) {
            fields.insert(FieldKey::ExpiryDate, FieldValue::Text(expiry.to_string()));
        }

        if let Some(number) = first_capture(&patterns.document_numbers, &normalized) {
            fields.insert(
                FieldKey::DocumentNumber,
                FieldValue::Text(number.to_string()),
            );
        }

        if let Some(address) = capture(&patterns.address, &normalized) {
            fields.insert(
                FieldKey::Address,
                FieldValue::Text(address.trim().to_string()),
            );
        }

        match kind {
            DocumentKind::Id => extract_identity(&normalized, &mut fields),
            DocumentKind::Income => extract_income(&normalized, &mut fields),
        }

        fields.insert(
            FieldKey::TextLength,
            FieldValue::Count(text.chars().count() as u64),
        );
        let word_count = tokens(text).filter(|word| word.chars().count() > 1).count();
        fields.insert(FieldKey::WordCount, FieldValue::Count(word_count as u64));

        fields
    }
}

fn extract_identity(normalized: &str, fields: &mut ExtractedFields) {
    let patterns = document_patterns();

    if let Some(nationality) = capture(&patterns.nationality, normalized) {
        fields.insert(
            FieldKey::Nationality,
            FieldValue::Text(nationality.trim().to_string()),
        );
    }

    if let Some(gender) = capture(&patterns.gender, normalized) {
        fields.insert(FieldKey::Gender, FieldValue::Text(gender.to_string()));
    }
}

fn extract_income(normalized: &str, fields: &mut ExtractedFields) {
    let patterns = document_patterns();

    let amounts = collect_amounts(
        normalized,
        [&patterns.dollar_amount, &patterns.keyword_amount],
    );
    if let Some(largest) = amounts.first().copied() {
        fields.insert(
            FieldKey::Amounts,
            FieldValue::Amounts(amounts.into_iter().take(MAX_AMOUNTS).collect()),
        );
        fields.insert(FieldKey::LargestAmount, FieldValue::Number(largest));
    }

    if let Some(employer) = capture(&patterns.employer, normalized) {
        fields.insert(
            FieldKey::Employer,
            FieldValue::Text(employer.trim().to_string()),
        );
    }

    if let Some(period) = capture(&patterns.pay_period, normalized) {
        fields.insert(
            FieldKey::PayPeriod,
            FieldValue::Text(period.trim().to_string()),
        );
    }
}

/// Every positive amount any scanner finds, distinct and sorted largest first.
fn collect_amounts<'a>(text: &str, scanners: impl IntoIterator<Item = &'a Regex>) -> Vec<f64> {
    let mut amounts: Vec<f64> = scanners
        .into_iter()
        .flat_map(|pattern| pattern.captures_iter(text))
        .filter_map(|captures| captures.get(1))
        .filter_map(|raw| parse_amount(raw.as_str()))
        .collect();

    amounts.sort_by(|left, right| right.total_cmp(left));
    amounts.dedup();
    amounts
}

fn parse_amount(raw: &str) -> Option<f64> {
    let value: f64 = raw.replace(',', "").parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

fn capture<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|group| group.as_str())
}

fn first_capture<'t>(patterns: &[Regex], text: &'t str) -> Option<&'t str> {
    patterns.iter().find_map(|pattern| capture(pattern, text))
}
