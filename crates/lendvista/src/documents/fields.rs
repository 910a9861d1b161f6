use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::DocumentKind;

/// The fixed set of keys a document field map can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    FileName,
    FileFormat,
    FileSize,
    LastModified,
    Dimensions,
    Name,
    Dates,
    ExpiryDate,
    DocumentNumber,
    Address,
    Nationality,
    Gender,
    Amounts,
    LargestAmount,
    Employer,
    PayPeriod,
    TextLength,
    WordCount,
}

/// Value stored under a field key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Count(u64),
    Number(f64),
    List(Vec<String>),
    Amounts(Vec<f64>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_count(&self) -> Option<u64> {
        match self {
            FieldValue::Count(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            FieldValue::Count(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_amounts(&self) -> Option<&[f64]> {
        match self {
            FieldValue::Amounts(values) => Some(values),
            _ => None,
        }
    }
}

/// Field map derived from one document. Recomputed whenever the document changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedFields {
    fields: BTreeMap<FieldKey, FieldValue>,
}

impl ExtractedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: FieldKey, value: FieldValue) {
        self.fields.insert(key, value);
    }

    pub fn get(&self, key: FieldKey) -> Option<&FieldValue> {
        self.fields.get(&key)
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.fields.contains_key(&key)
    }

    pub fn text(&self, key: FieldKey) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &FieldValue)> {
        self.fields.iter()
    }

    /// Merge `other` into `self`, overwriting keys present in both.
    pub fn extend(&mut self, other: ExtractedFields) {
        self.fields.extend(other.fields);
    }

    /// Character count of the source text, zero when no text was parsed.
    pub fn text_length(&self) -> u64 {
        self.get(FieldKey::TextLength)
            .and_then(FieldValue::as_count)
            .unwrap_or(0)
    }

    /// Whitespace-delimited tokens longer than one character, zero when no text was parsed.
    pub fn word_count(&self) -> u64 {
        self.get(FieldKey::WordCount)
            .and_then(FieldValue::as_count)
            .unwrap_or(0)
    }

    pub fn amounts(&self) -> &[f64] {
        self.get(FieldKey::Amounts)
            .and_then(FieldValue::as_amounts)
            .unwrap_or(&[])
    }

    pub fn largest_amount(&self) -> Option<f64> {
        self.get(FieldKey::LargestAmount)
            .and_then(FieldValue::as_number)
    }

    pub fn dates(&self) -> &[String] {
        self.get(FieldKey::Dates)
            .and_then(FieldValue::as_list)
            .unwrap_or(&[])
    }

    /// Labeled rows in display order, ending with a text-quality line.
    pub fn display_rows(&self, kind: DocumentKind) -> Vec<DisplayRow> {
        let mut rows = Vec::new();

        for (key, label) in [
            (FieldKey::FileName, "File Name"),
            (FieldKey::FileFormat, "Format"),
            (FieldKey::FileSize, "File Size"),
            (FieldKey::LastModified, "Last Modified"),
            (FieldKey::Dimensions, "Dimensions"),
            (FieldKey::Name, "Name Detected"),
            (FieldKey::DocumentNumber, "Document No."),
            (FieldKey::Nationality, "Nationality"),
            (FieldKey::Gender, "Gender"),
            (FieldKey::Address, "Address"),
        ] {
            if let Some(value) = self.text(key) {
                rows.push(DisplayRow::new(label, value));
            }
        }

        if !self.dates().is_empty() {
            rows.push(DisplayRow::new("Date(s) Found", self.dates().join(", ")));
        }
        if let Some(expiry) = self.text(FieldKey::ExpiryDate) {
            rows.push(DisplayRow::new("Expiry Date", expiry));
        }

        if kind == DocumentKind::Income {
            if let Some(employer) = self.text(FieldKey::Employer) {
                rows.push(DisplayRow::new("Employer", employer));
            }
            if let Some(period) = self.text(FieldKey::PayPeriod) {
                rows.push(DisplayRow::new("Pay Period", period));
            }
            if let Some(largest) = self.largest_amount() {
                rows.push(DisplayRow::new("Largest Amount", format_currency(largest)));
            }
            let amounts = self.amounts();
            if amounts.len() > 1 {
                let others = amounts
                    .iter()
                    .skip(1)
                    .take(3)
                    .map(|amount| format_currency(*amount))
                    .collect::<Vec<_>>()
                    .join(", ");
                rows.push(DisplayRow::new("Other Amounts", others));
            }
        }

        match self.word_count() {
            0 => rows.push(DisplayRow::new(
                "Text Extraction",
                "No text found (image-based)",
            )),
            words => rows.push(DisplayRow::new("Words Extracted", group_thousands(words))),
        }

        rows
    }
}

/// Label/value pair for rendering a field map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub label: &'static str,
    pub value: String,
}

impl DisplayRow {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// `$` prefix with thousands separators; the fraction keeps only significant digits.
pub(crate) fn format_currency(amount: f64) -> String {
    let cents = (amount * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    match cents % 100 {
        0 => format!("${whole}"),
        fraction if fraction % 10 == 0 => format!("${whole}.{}", fraction / 10),
        fraction => format!("${whole}.{fraction:02}"),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands_and_trims_zero_cents() {
        assert_eq!(format_currency(4500.0), "$4,500");
        assert_eq!(format_currency(1234567.5), "$1,234,567.5");
        assert_eq!(format_currency(999.0), "$999");
    }

    #[test]
    fn currency_drops_trailing_fraction_zero() {
        assert_eq!(format_currency(120.1), "$120.1");
        assert_eq!(format_currency(2310.44), "$2,310.44");
        assert_eq!(format_currency(7.05), "$7.05");
    }

    #[test]
    fn quality_metrics_default_to_zero() {
        let fields = ExtractedFields::new();
        assert_eq!(fields.text_length(), 0);
        assert_eq!(fields.word_count(), 0);
        assert!(fields.amounts().is_empty());
        assert!(fields.largest_amount().is_none());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut fields = ExtractedFields::new();
        fields.insert(FieldKey::LargestAmount, FieldValue::Number(4500.0));
        fields.insert(
            FieldKey::Dates,
            FieldValue::List(vec!["01/02/1990".to_string()]),
        );
        let json = serde_json::to_value(&fields).expect("serializes");
        assert_eq!(json["largestAmount"], 4500.0);
        assert_eq!(json["dates"][0], "01/02/1990");
    }

    #[test]
    fn display_rows_report_missing_text() {
        let mut fields = ExtractedFields::new();
        fields.insert(FieldKey::FileName, FieldValue::Text("id.png".to_string()));
        let rows = fields.display_rows(DocumentKind::Id);
        assert_eq!(rows[0], DisplayRow::new("File Name", "id.png"));
        assert_eq!(
            rows.last().map(|row| row.value.as_str()),
            Some("No text found (image-based)")
        );
    }
}
