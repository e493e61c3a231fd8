//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

pub mod error;

use std::sync::OnceLock;
use std::time::Duration;

use md5::{Digest, Md5};
use regex::Regex;

use self::error::ParseError;

/// Stable identifier for a string (URL or domain): lowercase hex MD5
///
/// Matches the ids of articles already in the store.
pub fn hash_id(input: &str) -> String {
    format!("{:x}", Md5::digest(input.as_bytes()))
}

/// Decode a query-escaped string
///
/// `%XX` sequences are decoded and `+` becomes a space. A `%` not followed
/// by two hex digits, or a result that is not valid UTF-8, is an error.
pub fn query_unescape(input: &str) -> Result<String, ParseError> {
    let bytes = input.as_bytes();
    if let Some((i, _)) = input.match_indices('%').find(|(i, _)| {
        !bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
    }) {
        let end = (i + 3).min(bytes.len());
        return Err(ParseError::Unescape(format!(
            "invalid escape {:?}",
            String::from_utf8_lossy(&bytes[i..end])
        )));
    }

    urlencoding::decode(&input.replace('+', " "))
        .map(|decoded| decoded.into_owned())
        .map_err(|e| ParseError::Unescape(e.to_string()))
}

/// Parse a Go-style duration string such as `"30s"`, `"1m30s"` or `"1.5h"`
///
/// Supported units: `ns`, `us`, `µs`, `ms`, `s`, `m`, `h`. A bare `"0"` is
/// accepted; anything else without a unit is rejected.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    static TERM: OnceLock<Regex> = OnceLock::new();
    let re = TERM.get_or_init(|| {
        Regex::new(r"(\d+(?:\.\d*)?|\.\d+)(ns|us|µs|ms|s|m|h)").expect("Invalid regex pattern")
    });

    let s = input.trim();
    if s.is_empty() {
        return Err("empty duration".to_string());
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.starts_with('-') {
        return Err(format!("negative duration {input:?}"));
    }
    let body = s.strip_prefix('+').unwrap_or(s);

    let mut total_nanos: u128 = 0;
    let mut consumed = 0;
    for caps in re.captures_iter(body) {
        let whole = caps.get(0).ok_or_else(|| format!("invalid duration {input:?}"))?;
        if whole.start() != consumed {
            return Err(format!("invalid duration {input:?}"));
        }
        consumed = whole.end();

        let unit_nanos: u128 = match &caps[2] {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60 * 1_000_000_000,
            "h" => 3_600 * 1_000_000_000,
            unit => return Err(format!("unknown unit {unit:?} in duration {input:?}")),
        };

        let (int_part, frac_part) = caps[1].split_once('.').unwrap_or((&caps[1], ""));
        let whole_units: u128 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| format!("invalid duration {input:?}"))?
        };
        total_nanos += whole_units * unit_nanos;

        // fractional digits beyond nanosecond precision are dropped
        let mut scale = unit_nanos;
        for digit in frac_part.chars().filter_map(|c| c.to_digit(10)) {
            scale /= 10;
            total_nanos += u128::from(digit) * scale;
        }
    }

    if consumed != body.len() || consumed == 0 {
        return Err(format!("invalid duration {input:?}"));
    }

    u64::try_from(total_nanos)
        .map(Duration::from_nanos)
        .map_err(|_| format!("duration {input:?} overflows"))
}
