//! Value grammars for annotation values.
//!
//! These are the policy tables behind the annotation rules: which strings
//! count as booleans, integers, NGINX time literals and load-balancing
//! methods for each tier.

use std::sync::LazyLock;

use crate::config::Tier;
use crate::field::quote;

/// Load-balancing methods available on every tier
pub const BASE_LB_METHODS: &[&str] = &[
    "round_robin",
    "least_conn",
    "ip_hash",
    "random",
    "random two",
    "random two least_conn",
];

/// Methods only available with NGINX Plus
pub const PLUS_LB_METHODS: &[&str] = &[
    "least_time header",
    "least_time last_byte",
    "least_time header inflight",
    "least_time last_byte inflight",
    "random two least_time=header",
    "random two least_time=last_byte",
];

/// Parse a boolean literal.
///
/// Accepts `1 t T TRUE true True 0 f F FALSE false False`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Check for a non-negative integer that fits in 64 bits
pub fn is_non_negative_integer(value: &str) -> bool {
    value.parse::<u64>().is_ok()
}

/// Check an NGINX time literal such as `60s`, `1m 30s` or `500ms`
pub fn is_valid_time(value: &str) -> bool {
    // Groups may be separated by spaces, never led or trailed by them
    static TIME_RE: LazyLock<Option<regex::Regex>> = LazyLock::new(|| {
        regex::Regex::new(r"^[0-9]+(?:ms|s|m|h|d|w|M|y)?(?: *[0-9]+(?:ms|s|m|h|d|w|M|y)?)*$").ok()
    });
    TIME_RE.as_ref().is_some_and(|re| re.is_match(value))
}

/// Validate a load-balancing method for the given tier.
///
/// The error carries the message reported to the user.
pub fn validate_lb_method(method: &str, tier: Tier) -> Result<(), String> {
    let method = method.trim();

    let valid = if method.starts_with("hash") {
        is_valid_hash_method(method)
    } else {
        BASE_LB_METHODS.contains(&method) || (tier.is_plus() && PLUS_LB_METHODS.contains(&method))
    };

    if valid {
        Ok(())
    } else {
        Err(format!("Invalid load balancing method: {}", quote(method)))
    }
}

/// `hash <key>` or `hash <key> consistent`
fn is_valid_hash_method(method: &str) -> bool {
    let words: Vec<&str> = method.split_whitespace().collect();
    matches!(words.as_slice(), ["hash", _] | ["hash", _, "consistent"])
}
