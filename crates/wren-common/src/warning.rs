//! Engine warnings, deduplicated per document load.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the HTML, CSS and loading components to report input they had to
//! repair or skip. Messages are emitted through the [`log`] facade so the
//! embedding binary decides where they go.

use std::collections::HashSet;
use std::sync::Mutex;

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recovered condition (emitted once per unique message)
///
/// # Example
/// ```
/// wren_common::warning::warn_once("CSS", "dropped malformed declaration");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_emit = WARNED
        .lock()
        .map(|mut guard| guard.get_or_insert_with(HashSet::new).insert(key))
        // A poisoned set only loses deduplication, never the message.
        .unwrap_or(true);

    if should_emit {
        log::warn!(target: "wren", "[{component}] {message}");
    }
}

/// Clear all recorded warnings (call when loading a new document)
pub fn clear_warnings() {
    if let Ok(mut guard) = WARNED.lock()
        && let Some(set) = guard.as_mut()
    {
        set.clear();
    }
}

/// Number of distinct warnings recorded since the last [`clear_warnings`].
#[must_use]
pub fn warning_count() -> usize {
    WARNED
        .lock()
        .map(|guard| guard.as_ref().map_or(0, HashSet::len))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_deduplicates() {
        let before = warning_count();
        warn_once("TEST", "dedup-check unique message");
        warn_once("TEST", "dedup-check unique message");
        assert_eq!(warning_count(), before + 1);
    }
}
