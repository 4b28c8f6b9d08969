//! Document Numbering
//!
//! Quote numbers are bare digits; invoice numbers carry a fixed prefix.
//! Incrementing works off the first run of digits in the displayed text.

use super::document_type::DocumentType;
use super::error::{DocumentError, DocumentResult};

/// First contiguous run of ASCII digits, if any
pub fn first_digit_run(text: &str) -> Option<&str> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..len])
}

/// Render a sequence value in the mode's canonical format
pub fn format_number(doc_type: DocumentType, value: u64, invoice_prefix: &str) -> String {
    match doc_type {
        DocumentType::Quote => value.to_string(),
        DocumentType::Invoice => format!("{}{}", invoice_prefix, value),
    }
}

/// Compute the number that follows `current`
///
/// Fails without side effects when `current` is blank or has no digits.
pub fn next_number(doc_type: DocumentType, current: &str, invoice_prefix: &str) -> DocumentResult<String> {
    let current = current.trim();
    if current.is_empty() {
        return Err(DocumentError::EmptyNumber);
    }

    let next = first_digit_run(current)
        .and_then(|digits| digits.parse::<u64>().ok())
        .and_then(|value| value.checked_add(1))
        .ok_or_else(|| DocumentError::MalformedNumber(current.to_string()))?;

    Ok(format_number(doc_type, next, invoice_prefix))
}

/// Whether an invoice number typed by hand is missing its prefix
pub fn needs_prefix(text: &str, invoice_prefix: &str) -> bool {
    let text = text.trim();
    !text.is_empty() && !text.starts_with(invoice_prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "INV-";

    #[test]
    fn test_first_digit_run() {
        assert_eq!(first_digit_run("INV-2508"), Some("2508"));
        assert_eq!(first_digit_run("Q12-34"), Some("12"));
        assert_eq!(first_digit_run("INV-"), None);
    }

    #[test]
    fn test_increment_quote() {
        assert_eq!(next_number(DocumentType::Quote, "2508", PREFIX).unwrap(), "2509");
        assert_eq!(next_number(DocumentType::Quote, " 0099 ", PREFIX).unwrap(), "100");
    }

    #[test]
    fn test_increment_invoice() {
        assert_eq!(next_number(DocumentType::Invoice, "INV-2508", PREFIX).unwrap(), "INV-2509");
        // Digits without the prefix are re-rendered canonically
        assert_eq!(next_number(DocumentType::Invoice, "2510", PREFIX).unwrap(), "INV-2511");
    }

    #[test]
    fn test_increment_rejects_numberless() {
        assert_eq!(
            next_number(DocumentType::Invoice, "DRAFT", PREFIX),
            Err(DocumentError::MalformedNumber("DRAFT".to_string()))
        );
        assert_eq!(next_number(DocumentType::Quote, "   ", PREFIX), Err(DocumentError::EmptyNumber));
    }

    #[test]
    fn test_increment_rejects_overflow() {
        let huge = u64::MAX.to_string();
        assert!(matches!(
            next_number(DocumentType::Quote, &huge, PREFIX),
            Err(DocumentError::MalformedNumber(_))
        ));
    }

    #[test]
    fn test_needs_prefix() {
        assert!(needs_prefix("2508", PREFIX));
        assert!(!needs_prefix("INV-2508", PREFIX));
        assert!(!needs_prefix("  ", PREFIX));
    }
}
