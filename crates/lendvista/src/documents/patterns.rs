use regex::Regex;
use std::sync::OnceLock;

// Character classes are spelled out in ASCII so matches do not widen to other scripts.
const DATE: &str = r"([0-9]{1,2}[/-][0-9]{1,2}[/-][0-9]{2,4})";
const MONEY: &str = r"([0-9,]+(?:\.[0-9]{2})?)";
const CAPITALIZED_NAME: &str = r"([A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,3})";
const EXPIRY_LABEL: &str = r"(?:expir(?:y|ation)|exp\.? date|valid until|vencimiento)";

/// Compiled extraction heuristics. Each ordered list is tried front to back.
pub(crate) struct DocumentPatterns {
    pub(crate) names: [Regex; 2],
    pub(crate) dates: [Regex; 4],
    pub(crate) expiry: Regex,
    pub(crate) document_numbers: [Regex; 2],
    pub(crate) address: Regex,
    pub(crate) nationality: Regex,
    pub(crate) gender: Regex,
    pub(crate) dollar_amount: Regex,
    pub(crate) keyword_amount: Regex,
    pub(crate) employer: Regex,
    pub(crate) pay_period: Regex,
}

static DOCUMENT_PATTERNS: OnceLock<DocumentPatterns> = OnceLock::new();

pub(crate) fn document_patterns() -> &'static DocumentPatterns {
    DOCUMENT_PATTERNS.get_or_init(|| DocumentPatterns {
        names: [
            compile(&format!(r"(?i)(?:name|nombre|nom)[:\s]+{CAPITALIZED_NAME}")),
            compile(&format!(
                r"(?i)(?:issued to|applicant|holder)[:\s]+{CAPITALIZED_NAME}"
            )),
        ],
        dates: [
            compile(&format!(
                r"(?i)(?:date of birth|dob|birth date|fecha)[:\s]+{DATE}"
            )),
            compile(&format!(r"(?i)(?:issue date|issued|date)[:\s]+{DATE}")),
            compile(&format!(r"(?i){EXPIRY_LABEL}[:\s]+{DATE}")),
            compile(r"([0-9]{2}[/-][0-9]{2}[/-][0-9]{4})"),
        ],
        expiry: compile(&format!(r"(?i){EXPIRY_LABEL}[:\s]+{DATE}")),
        document_numbers: [
            compile(
                r"(?i)(?:document|license|id|passport|no\.?|number|num\.?|#)[:\s]*([A-Z0-9]{5,20})",
            ),
            compile(r"\b([A-Z]{1,3}[0-9]{5,12})\b"),
        ],
        // The terminator is consumed rather than looked ahead; only the capture is used.
        address: compile(
            r"(?i)(?:address|domicilio|direcci[oó]n)[:\s]+(.{10,80}?)(?:\.|,\s*[A-Z]|$)",
        ),
        nationality: compile(r"(?i)(?:nationality|country|nation|pa[ií]s)[:\s]+([A-Za-z\s]{2,30})"),
        gender: compile(r"(?i)(?:sex|gender|sexo)[:\s]+(male|female|m|f|masculino|femenino)"),
        dollar_amount: compile(&format!(r"\$\s?{MONEY}")),
        keyword_amount: compile(&format!(
            r"(?i)(?:gross|net|total|salary|income|earnings|pay|compensation|wages)[:\s]*\$?{MONEY}"
        )),
        employer: compile(
            r"(?i)(?:employer|company|organization|empresa|from)[:\s]+([A-Z][A-Za-z0-9_\s&.,]{2,40})",
        ),
        pay_period: compile(r"(?i)(?:pay period|period|per[ií]odo)[:\s]+(.{5,40}?)(?:\s*\||$|\n)"),
    })
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("document extraction pattern compiles")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_patterns_compile() {
        let patterns = document_patterns();
        assert_eq!(patterns.names.len(), 2);
        assert_eq!(patterns.dates.len(), 4);
        assert!(patterns.expiry.is_match("Valid Until: 01/02/2031"));
    }

    #[test]
    fn address_stops_before_comma_and_capital() {
        let captures = document_patterns()
            .address
            .captures("Address: 12 Harbor Lane, Springfield")
            .expect("address matches");
        assert_eq!(&captures[1], "12 Harbor Lane");
    }

    #[test]
    fn pay_period_stops_at_pipe() {
        let captures = document_patterns()
            .pay_period
            .captures("Pay Period: 03/01/2024 - 03/15/2024 | Employee ID 7731")
            .expect("period matches");
        assert_eq!(&captures[1], "03/01/2024 - 03/15/2024");
    }
}
