//! Test helpers for generating unique test data

use ulid::Ulid;

/// Generate a unique string in the format `{prefix}-{ulid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("bin");
/// let b = unique_str("bin");
/// assert_ne!(a, b);
/// assert!(a.starts_with("bin-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique article number such as `ART-01J...`
pub fn unique_article_number() -> String {
    format!("ART-{}", Ulid::new())
}
