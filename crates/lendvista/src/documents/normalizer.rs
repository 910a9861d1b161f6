/// Collapse every whitespace run (byte-order marks included) to a single space and trim both ends.
pub fn normalize_text(value: &str) -> String {
    tokens(value).collect::<Vec<_>>().join(" ")
}

/// Tokens separated by whitespace, as counted by the word-count quality metric.
pub(crate) fn tokens(value: &str) -> impl Iterator<Item = &str> {
    value.split(is_separator).filter(|token| !token.is_empty())
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}
