//! Glob matching for cache key patterns.
//!
//! Only `*` is special; it matches any run of characters, including none.

/// Checks if a cache key matches a glob pattern.
///
/// # Examples
///
/// ```
/// use courtsync_core::cache::pattern_matches;
///
/// assert!(pattern_matches("club:1:courts", "club:1:courts"));
/// assert!(pattern_matches("club:1:court:*", "club:1:court:10:slots:2024-03-01"));
/// assert!(pattern_matches("club:*:courts", "club:42:courts"));
/// assert!(!pattern_matches("club:1:court:*", "club:1:courts"));
/// ```
pub fn pattern_matches(pattern: &str, key: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == key;
    }

    let segments: Vec<&str> = pattern.split('*').collect();
    let last = segments.len() - 1;
    let mut remaining = key;

    for (i, segment) in segments.iter().enumerate() {
        if i == 0 {
            // Anchored at the start
            match remaining.strip_prefix(segment) {
                Some(rest) => remaining = rest,
                None => return false,
            }
        } else if i == last {
            // Anchored at the end
            return remaining.ends_with(segment);
        } else if !segment.is_empty() {
            match remaining.find(segment) {
                Some(pos) => remaining = &remaining[pos + segment.len()..],
                None => return false,
            }
        }
    }

    true
}
