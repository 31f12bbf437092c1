//! Lenient numeric input parsing
//!
//! Calculator fields arrive as free text. Anything that does not start with a
//! number is treated as zero rather than rejected, and trailing junk after a
//! numeric prefix is ignored (`"1500rs"` reads as 1500).

/// Parse a monetary amount or rate, falling back to 0.0
pub fn parse_amount(text: &str) -> f64 {
    let prefix = numeric_prefix(text.trim_start(), true);
    match prefix.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Parse a whole count (years, months), falling back to 0
///
/// Fractions are truncated and negative values clamp to zero.
pub fn parse_count(text: &str) -> u32 {
    let prefix = numeric_prefix(text.trim_start(), false);
    match prefix.parse::<i64>() {
        Ok(value) if value > 0 => u32::try_from(value).unwrap_or(u32::MAX),
        _ => 0,
    }
}

/// Parse a comma-separated list of amounts, coercing each entry
pub fn parse_amount_list(text: &str) -> Vec<f64> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.split(',').map(parse_amount).collect()
}

/// Longest leading slice that looks like a number
fn numeric_prefix(text: &str, allow_fraction: bool) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > digits_start;

    if allow_fraction && end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if has_digits || frac_end > frac_start {
            has_digits = true;
            end = frac_end;
        }
    }

    if !has_digits {
        return "";
    }

    // Exponent only counts when followed by at least one digit
    if allow_fraction && end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_plain_and_garbage() {
        assert_eq!(parse_amount("10000"), 10000.0);
        assert_eq!(parse_amount("  12.5"), 12.5);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("-"), 0.0);
        assert_eq!(parse_amount("."), 0.0);
    }

    #[test]
    fn test_parse_amount_ignores_trailing_text() {
        assert_eq!(parse_amount("1500rs"), 1500.0);
        assert_eq!(parse_amount(".5x"), 0.5);
        assert_eq!(parse_amount("3."), 3.0);
        assert_eq!(parse_amount("1e3"), 1000.0);
        assert_eq!(parse_amount("2e"), 2.0);
        assert_eq!(parse_amount("-4.25"), -4.25);
    }

    #[test]
    fn test_parse_count_truncates_and_clamps() {
        assert_eq!(parse_count("5"), 5);
        assert_eq!(parse_count("5.9"), 5);
        assert_eq!(parse_count("-3"), 0);
        assert_eq!(parse_count("years"), 0);
        assert_eq!(parse_count(" 12 months"), 12);
    }

    #[test]
    fn test_parse_amount_list() {
        assert_eq!(parse_amount_list("1000, 2000,x"), vec![1000.0, 2000.0, 0.0]);
        assert!(parse_amount_list("  ").is_empty());
    }
}
