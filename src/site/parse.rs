/// Parse a free-text size field the way a form does: leading number wins,
/// anything unreadable is 0.
///
/// `"1200"`, `" 1200 "`, `"1200 sq ft"` and `"1.2e3"` all read as 1200.
/// Blank, non-numeric and non-finite input reads as 0. Negative values are
/// returned as-is; the subdivider treats them as zero-sized.
pub fn parse_size(text: &str) -> f64 {
    let prefix = numeric_prefix(text.trim());
    match prefix.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Longest leading slice shaped like `[+-]digits[.digits][e[+-]digits]`.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }

    if digits == 0 {
        return "";
    }
    let mut end = i;

    // Exponent only counts if it has at least one digit.
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    &s[..end]
}
