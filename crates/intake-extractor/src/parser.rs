//! Turn raw service responses into candidates

use crate::profile::Normalization;
use intake_domain::Candidate;

/// Normalize a service response into a [`Candidate`]
///
/// Trims whitespace, unwraps a markdown code block and one pair of
/// surrounding quotes, then applies the field's [`Normalization`]. The
/// result is not validated here.
pub fn normalize_response(response: &str, normalization: Normalization) -> Candidate {
    let unwrapped = strip_quotes(strip_code_block(response.trim()));

    let value = match normalization {
        Normalization::Verbatim => unwrapped.to_string(),
        Normalization::Uppercase => unwrapped.to_uppercase(),
        Normalization::FirstNumber => first_number(unwrapped).unwrap_or(unwrapped).to_string(),
    };

    Candidate::new(value)
}

/// Content of a markdown code block, or the input unchanged
fn strip_code_block(text: &str) -> &str {
    if !text.starts_with("```") || !text.ends_with("```") || text.len() < 6 {
        return text;
    }

    let inner = &text[3..text.len() - 3];
    // Skip an info string such as ```text
    match inner.find('\n') {
        Some(newline) if !inner[..newline].trim().contains(' ') => inner[newline + 1..].trim(),
        _ => inner.trim(),
    }
}

fn strip_quotes(text: &str) -> &str {
    for quote in ['"', '\'', '`'] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return text[1..text.len() - 1].trim();
        }
    }
    text
}

fn first_number(text: &str) -> Option<&str> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_whitespace() {
        let candidate = normalize_response("  03207673078\n", Normalization::Verbatim);
        assert_eq!(candidate.as_str(), "03207673078");
    }

    #[test]
    fn test_inner_whitespace_kept() {
        let candidate = normalize_response("+92 320 737 3878", Normalization::Verbatim);
        assert_eq!(candidate.as_str(), "+92 320 737 3878");
    }

    #[test]
    fn test_strips_code_block() {
        let candidate = normalize_response("```\n03207673078\n```", Normalization::Verbatim);
        assert_eq!(candidate.as_str(), "03207673078");

        let candidate = normalize_response("```text\nInvalid\n```", Normalization::Verbatim);
        assert_eq!(candidate.as_str(), "Invalid");

        let candidate = normalize_response("```03207673078```", Normalization::Verbatim);
        assert_eq!(candidate.as_str(), "03207673078");
    }

    #[test]
    fn test_strips_one_pair_of_quotes() {
        let candidate = normalize_response("\"03207673078\"", Normalization::Verbatim);
        assert_eq!(candidate.as_str(), "03207673078");

        let candidate = normalize_response("'Invalid'", Normalization::Verbatim);
        assert!(candidate.is_sentinel());
    }

    #[test]
    fn test_inner_apostrophe_kept() {
        let candidate = normalize_response("Sinéad O'Brien", Normalization::Verbatim);
        assert_eq!(candidate.as_str(), "Sinéad O'Brien");
    }

    #[test]
    fn test_uppercase() {
        let candidate = normalize_response(" f ", Normalization::Uppercase);
        assert_eq!(candidate.as_str(), "F");
    }

    #[test]
    fn test_first_number() {
        assert_eq!(
            normalize_response("The age is 34 years, not 43", Normalization::FirstNumber).as_str(),
            "34"
        );
        assert_eq!(
            normalize_response("Invalid", Normalization::FirstNumber).as_str(),
            "Invalid"
        );
    }

    #[test]
    fn test_empty_response() {
        assert!(normalize_response("   ", Normalization::Verbatim).is_empty());
        assert!(normalize_response("\"\"", Normalization::Verbatim).is_empty());
    }
}
