//! Numeric strings and the numeric view of values.
//!
//! Loose comparison and the arithmetic aggregates treat strings such as
//! `"42"`, `" 1.5"` or `"1e3"` as numbers. This module decides which strings
//! qualify and carries the resulting integer-or-float [`Number`].

use std::cmp::Ordering;
use std::fmt;

/// An integer or floating point number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(n) => n == 0,
            Number::Float(f) => f == 0.0,
        }
    }

    /// Add, promoting to float on overflow or when either side is a float.
    pub fn add(self, other: Number) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_add(b)
                .map(Number::Int)
                .unwrap_or(Number::Float(a as f64 + b as f64)),
            (a, b) => Number::Float(a.as_f64() + b.as_f64()),
        }
    }

    /// Multiply, promoting to float on overflow or when either side is a float.
    pub fn mul(self, other: Number) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_mul(b)
                .map(Number::Int)
                .unwrap_or(Number::Float(a as f64 * b as f64)),
            (a, b) => Number::Float(a.as_f64() * b.as_f64()),
        }
    }

    /// Total comparison. Integers and floats compare by exact value, so
    /// `2^53 + 1` sorts above `2^53 as f64`. NaN sorts after every other
    /// number and equals itself.
    pub fn compare(self, other: Number) -> Ordering {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a.cmp(&b),
            (Number::Int(a), Number::Float(b)) => int_float_cmp(a, b),
            (Number::Float(a), Number::Int(b)) => int_float_cmp(b, a).reverse(),
            (Number::Float(a), Number::Float(b)) => match (a.is_nan(), b.is_nan()) {
                (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
                (x, y) => x.cmp(&y),
            },
        }
    }
}

/// Exact ordering of an integer against a float.
fn int_float_cmp(i: i64, f: f64) -> Ordering {
    // 2^63, the first float above every i64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() || f >= LIMIT {
        return Ordering::Less;
    }
    if f < -LIMIT {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        // Same integer part: the fraction decides.
        Ordering::Equal => whole.partial_cmp(&f).unwrap_or(Ordering::Equal),
        other => other,
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Int(n)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::Int(n.into())
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::Float(f)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(x) => f.write_str(&format_float(*x)),
        }
    }
}

/// Render a float the way it reads back: shortest round-trip digits,
/// exponent form for very large or very small magnitudes.
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "NAN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    let abs = x.abs();
    if abs != 0.0 && !(1e-4..1e15).contains(&abs) {
        let s = format!("{:E}", x);
        let (mantissa, exp) = s.split_once('E').unwrap_or((&s, "0"));
        let mantissa = if mantissa.contains('.') {
            mantissa.to_string()
        } else {
            format!("{}.0", mantissa)
        };
        let exp = if exp.starts_with('-') {
            exp.to_string()
        } else {
            format!("+{}", exp)
        };
        return format!("{}E{}", mantissa, exp);
    }
    format!("{}", x)
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Length of the longest numeric prefix of `bytes` and whether it has a
/// fraction or exponent. A length of zero means no number was found.
fn scan_number(bytes: &[u8]) -> (usize, bool) {
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    let mut is_float = false;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
            is_float = true;
        }
    }
    if digits == 0 {
        return (0, false);
    }

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
            i = j;
            is_float = true;
        }
    }
    (i, is_float)
}

fn to_number(text: &str, is_float: bool) -> Option<Number> {
    if !is_float {
        if let Ok(n) = text.parse::<i64>() {
            return Some(Number::Int(n));
        }
    }
    text.parse::<f64>().ok().map(Number::Float)
}

/// Parse a whole string as a number. Surrounding whitespace is allowed,
/// anything else is not.
pub fn parse_numeric(s: &str) -> Option<Number> {
    let bytes = s.as_bytes();
    let start = bytes.iter().position(|b| !is_space(*b))?;
    let (len, is_float) = scan_number(&bytes[start..]);
    if len == 0 || !bytes[start + len..].iter().all(|b| is_space(*b)) {
        return None;
    }
    to_number(&s[start..start + len], is_float)
}

/// Numeric value of the leading number in `s`, or zero when there is none.
///
/// Used by the arithmetic aggregates, which coerce every scalar.
pub fn leading_number(s: &str) -> Number {
    let bytes = s.as_bytes();
    let start = bytes
        .iter()
        .position(|b| !is_space(*b))
        .unwrap_or(bytes.len());
    let (len, is_float) = scan_number(&bytes[start..]);
    if len == 0 {
        return Number::Int(0);
    }
    to_number(&s[start..start + len], is_float).unwrap_or(Number::Int(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_numeric_accepts() {
        assert_eq!(parse_numeric("42"), Some(Number::Int(42)));
        assert_eq!(parse_numeric("  -7 "), Some(Number::Int(-7)));
        assert_eq!(parse_numeric("+3"), Some(Number::Int(3)));
        assert_eq!(parse_numeric("1.5"), Some(Number::Float(1.5)));
        assert_eq!(parse_numeric(".5"), Some(Number::Float(0.5)));
        assert_eq!(parse_numeric("1."), Some(Number::Float(1.0)));
        assert_eq!(parse_numeric("1e3"), Some(Number::Float(1000.0)));
    }

    #[test]
    fn test_parse_numeric_rejects() {
        for s in ["", " ", "abc", "12abc", "1e", ".", "-", "inf", "NaN", "0x1A", "1 2"] {
            assert_eq!(parse_numeric(s), None, "{:?}", s);
        }
    }

    #[test]
    fn test_integer_overflow_becomes_float() {
        assert_eq!(
            parse_numeric("9223372036854775808"),
            Some(Number::Float(9223372036854775808.0))
        );
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("12abc"), Number::Int(12));
        assert_eq!(leading_number(" 2.5kg"), Number::Float(2.5));
        assert_eq!(leading_number("abc"), Number::Int(0));
    }

    #[test]
    fn test_arithmetic_promotes_on_overflow() {
        assert_eq!(Number::Int(2).add(Number::Int(3)), Number::Int(5));
        assert_eq!(
            Number::Int(i64::MAX).add(Number::Int(1)),
            Number::Float(i64::MAX as f64 + 1.0)
        );
        assert_eq!(Number::Int(2).mul(Number::Float(1.5)), Number::Float(3.0));
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(1.5), "1.5");
        assert_eq!(format_float(2.0), "2");
        assert_eq!(format_float(1e20), "1.0E+20");
        assert_eq!(format_float(1.5e-7), "1.5E-7");
        assert_eq!(format_float(f64::INFINITY), "INF");
        assert_eq!(format_float(f64::NAN), "NAN");
    }

    #[test]
    fn test_compare_is_total_over_nan() {
        let nan = Number::Float(f64::NAN);
        assert_eq!(nan.compare(nan), Ordering::Equal);
        assert_eq!(nan.compare(Number::Float(f64::INFINITY)), Ordering::Greater);
        assert_eq!(nan.compare(Number::Int(i64::MAX)), Ordering::Greater);
        assert_eq!(Number::Int(0).compare(nan), Ordering::Less);
        assert_eq!(Number::Float(-0.0).compare(Number::Float(0.0)), Ordering::Equal);
    }

    #[test]
    fn test_compare_int_against_float_exactly() {
        let big = 1i64 << 53;
        assert_eq!(Number::Int(big + 1).compare(Number::Float(big as f64)), Ordering::Greater);
        assert_eq!(Number::Int(i64::MAX).compare(Number::Float(i64::MAX as f64)), Ordering::Less);
        assert_eq!(Number::Int(i64::MIN).compare(Number::Float(i64::MIN as f64)), Ordering::Equal);
        assert_eq!(Number::Int(1).compare(Number::Float(1.5)), Ordering::Less);
        assert_eq!(Number::Int(-1).compare(Number::Float(-1.5)), Ordering::Greater);
        assert_eq!(Number::Int(0).compare(Number::Float(-0.5)), Ordering::Greater);
        assert_eq!(Number::Float(2.0).compare(Number::Int(2)), Ordering::Equal);
        assert_eq!(
            Number::Float(f64::NEG_INFINITY).compare(Number::Int(i64::MIN)),
            Ordering::Less
        );
    }

    proptest! {
        #[test]
        fn test_compare_antisymmetric(
            a in prop_oneof![any::<i64>().prop_map(Number::Int), any::<f64>().prop_map(Number::Float)],
            b in prop_oneof![any::<i64>().prop_map(Number::Int), any::<f64>().prop_map(Number::Float)],
        ) {
            prop_assert_eq!(a.compare(b), b.compare(a).reverse());
        }

        #[test]
        fn test_integers_roundtrip_through_strings(n in any::<i64>()) {
            prop_assert_eq!(parse_numeric(&n.to_string()), Some(Number::Int(n)));
        }
    }
}
