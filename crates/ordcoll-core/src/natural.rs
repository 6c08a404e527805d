//! Natural-order string comparison.
//!
//! Runs of digits are compared by numeric value rather than byte by byte, so
//! `"img2.png"` sorts before `"img10.png"`. Runs that start with a zero are
//! treated as fractional parts and compared digit by digit from the left.
//! Whitespace between tokens is ignored.

use std::cmp::Ordering;

fn byte_at(s: &[u8], i: usize) -> u8 {
    s.get(i).copied().unwrap_or(0)
}

fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// Compare two right-aligned digit runs: the longer run is larger, and
/// for equal lengths the first differing digit decides.
fn compare_right(a: &[u8], ai: &mut usize, b: &[u8], bi: &mut usize) -> Ordering {
    let mut bias = Ordering::Equal;
    loop {
        let (ca, cb) = (byte_at(a, *ai), byte_at(b, *bi));
        match (is_digit(ca), is_digit(cb)) {
            (false, false) => return bias,
            (false, true) => return Ordering::Less,
            (true, false) => return Ordering::Greater,
            (true, true) => {
                if bias == Ordering::Equal {
                    bias = ca.cmp(&cb);
                }
            }
        }
        *ai += 1;
        *bi += 1;
    }
}

/// Compare two left-aligned (fractional) digit runs: the first differing
/// digit decides, and a shorter run that is a prefix is smaller.
fn compare_left(a: &[u8], ai: &mut usize, b: &[u8], bi: &mut usize) -> Ordering {
    loop {
        let (ca, cb) = (byte_at(a, *ai), byte_at(b, *bi));
        match (is_digit(ca), is_digit(cb)) {
            (false, false) => return Ordering::Equal,
            (false, true) => return Ordering::Less,
            (true, false) => return Ordering::Greater,
            (true, true) => match ca.cmp(&cb) {
                Ordering::Equal => {}
                other => return other,
            },
        }
        *ai += 1;
        *bi += 1;
    }
}

/// Skip leading zeros that are followed by another digit.
fn skip_leading_zeros(s: &[u8]) -> usize {
    let mut i = 0;
    while byte_at(s, i) == b'0' && is_digit(byte_at(s, i + 1)) {
        i += 1;
    }
    i
}

/// Compare two strings in natural order.
///
/// With `ignore_case`, ASCII letters are folded before comparison.
pub fn compare(a: &str, b: &str, ignore_case: bool) -> Ordering {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.is_empty() || b.is_empty() {
        return a.len().cmp(&b.len());
    }

    let mut ai = skip_leading_zeros(a);
    let mut bi = skip_leading_zeros(b);

    loop {
        while byte_at(a, ai).is_ascii_whitespace() {
            ai += 1;
        }
        while byte_at(b, bi).is_ascii_whitespace() {
            bi += 1;
        }

        let (mut ca, mut cb) = (byte_at(a, ai), byte_at(b, bi));

        if is_digit(ca) && is_digit(cb) {
            let fractional = ca == b'0' || cb == b'0';
            let result = if fractional {
                compare_left(a, &mut ai, b, &mut bi)
            } else {
                compare_right(a, &mut ai, b, &mut bi)
            };
            if result != Ordering::Equal {
                return result;
            }
            if ai >= a.len() && bi >= b.len() {
                return Ordering::Equal;
            }
            continue;
        }

        if ai >= a.len() && bi >= b.len() {
            return Ordering::Equal;
        }
        if ai >= a.len() {
            return Ordering::Less;
        }
        if bi >= b.len() {
            return Ordering::Greater;
        }

        if ignore_case {
            ca = ca.to_ascii_uppercase();
            cb = cb.to_ascii_uppercase();
        }
        match ca.cmp(&cb) {
            Ordering::Equal => {}
            other => return other,
        }
        ai += 1;
        bi += 1;
    }
}
