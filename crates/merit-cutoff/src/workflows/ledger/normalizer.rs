use crate::workflows::merit::domain::Category;

/// Decodes a raw field as UTF-8, falling back to Latin-1 for legacy exports.
pub(crate) fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(value) => value.to_string(),
        Err(_) => bytes.iter().map(|&byte| char::from(byte)).collect(),
    }
}

pub(crate) fn normalize_header(value: &str) -> String {
    value.replace('\u{feff}', "").trim().to_string()
}

/// Numeric cell parsing; blanks, text and non-finite values are treated as missing.
pub(crate) fn parse_score(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|score| score.is_finite())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CategoryField {
    Missing,
    Known(Category),
    Unrecognised,
}

pub(crate) fn parse_category(value: &str) -> CategoryField {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return CategoryField::Missing;
    }
    match Category::parse(trimmed) {
        Some(category) => CategoryField::Known(category),
        None => CategoryField::Unrecognised,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_bytes_are_decoded() {
        assert_eq!(decode_field(b"Ren\xe9"), "René");
        assert_eq!(decode_field("plain".as_bytes()), "plain");
    }

    #[test]
    fn header_strips_bom_and_whitespace() {
        assert_eq!(normalize_header("\u{feff} Roll Number "), "Roll Number");
    }

    #[test]
    fn score_parsing_rejects_blank_and_text() {
        assert_eq!(parse_score(" 245.5 "), Some(245.5));
        assert_eq!(parse_score(""), None);
        assert_eq!(parse_score("AB"), None);
        assert_eq!(parse_score("NaN"), None);
    }

    #[test]
    fn category_field_distinguishes_missing_from_unknown() {
        assert_eq!(parse_category(" sc"), CategoryField::Known(Category::Sc));
        assert_eq!(parse_category("  "), CategoryField::Missing);
        assert_eq!(parse_category("ESM"), CategoryField::Unrecognised);
    }
}
