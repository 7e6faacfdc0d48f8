//! Coercion helpers between literal text and Values.
//! Parsing is permissive: bad tokens read as zero and are reported, never rejected.

use crate::Value;

/// Outcome of [`parse_tuple`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedTuple {
    pub value: Value,
    /// Tokens that were not entirely numeric. Their numeric prefix (or 0.0) was used.
    pub malformed: Vec<String>,
    /// Tokens past the fourth component, ignored.
    pub extra: usize,
}

impl ParsedTuple {
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty() && self.extra == 0
    }
}

/// Parse a whitespace-delimited tuple of up to four numbers.
/// Rules:
/// - each token is read like C `atof`: the longest numeric prefix wins, no prefix reads as 0.0
/// - missing trailing components become 0.0
/// - tokens past the fourth are counted and ignored
pub fn parse_tuple(text: &str) -> ParsedTuple {
    let mut parsed = ParsedTuple::default();
    for (i, token) in text.split_ascii_whitespace().enumerate() {
        if i >= 4 {
            parsed.extra += 1;
            continue;
        }
        let (v, consumed) = atof_prefix(token);
        if consumed != token.len() {
            parsed.malformed.push(token.to_string());
        }
        parsed.value.0[i] = v;
    }
    parsed
}

/// Read the longest decimal float prefix of `token`.
/// Returns the value and the number of bytes that formed it.
fn atof_prefix(token: &str) -> (f32, usize) {
    let bytes = token.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return (0.0, 0);
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    match token[..end].parse::<f32>() {
        Ok(v) => (v, end),
        Err(_) => (0.0, 0),
    }
}

/// Clamp a scalar into `[0, 1]`, mapping NaN to 0.
pub fn unit_clamp(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}
