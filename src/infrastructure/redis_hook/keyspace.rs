use crate::domain::KeyspaceExtractor;
use once_cell::sync::Lazy;
use regex::Regex;

/// One or more `/segment` runs of lower-case letters and dashes.
static KEYSPACE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(/[a-z-]+)+").expect("keyspace pattern is a valid regex"));

/// Extracts the keyspace from keys shaped `app-name/keyspace/...`.
///
/// The leading application segment is dropped (it is already the constant
/// `service` label), so `myapp/orders/42` yields `/orders`. Keys without a
/// path-like segment yield an empty keyspace.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathKeyspaceExtractor;

impl KeyspaceExtractor for PathKeyspaceExtractor {
    // ---
    fn extract(&self, key: &str) -> String {
        // ---
        KEYSPACE_PATTERN
            .find(key)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }
}
