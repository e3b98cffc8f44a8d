//! MQTT-style topic matching for state paths and request paths.
//!
//! Paths use `/` as the level separator. Patterns may contain:
//! - `+`: exactly one level
//! - `#`: any number of remaining levels, including zero (last segment only)

/// Check whether a concrete `topic` matches `pattern`.
///
/// ```ignore
/// assert!(matches("orders/+", "orders/list"));
/// assert!(matches("orders/#", "orders"));
/// assert!(!matches("orders/+", "orders/list/extra"));
/// ```
pub fn matches(pattern: &str, topic: &str) -> bool {
    let mut pat = pattern.split('/');
    let mut top = topic.split('/');

    loop {
        match (pat.next(), top.next()) {
            (Some("#"), _) => return true,
            (Some("+"), Some(_)) => continue,
            (Some(p), Some(t)) if p == t => continue,
            (None, None) => return true,
            _ => return false,
        }
    }
}

/// A pattern is valid when `#` only appears as the final segment and no
/// segment is empty.
pub fn is_valid_pattern(pattern: &str) -> bool {
    let segments: Vec<&str> = pattern.split('/').collect();
    let last = segments.len() - 1;
    segments.iter().enumerate().all(|(i, seg)| {
        !seg.is_empty() && (*seg != "#" || i == last)
    })
}
