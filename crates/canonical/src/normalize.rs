use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::NormalizeConfig;

// scheme, host with at least one dot, optional path/query ending on a
// non-punctuation character so trailing sentence punctuation is kept
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(https|http|ftp)://([\w_-]+(?:(?:\.[\w_-]+)+))([\w.,@?^=%&:/~+#-]*[\w@?^=%&/~+#-])?",
    )
    .expect("URL pattern is valid")
});

/// Normalize free text for k-gram hashing.
///
/// URLs are removed first, then every character that is not an ASCII letter,
/// digit or underscore is deleted (spaces survive only when
/// [`NormalizeConfig::allow_space`] is set). The result is ASCII-lowercased.
///
/// Any input is valid; the output may be empty.
///
/// ```rust
/// use canonical::{normalize, NormalizeConfig};
///
/// let cfg = NormalizeConfig::default();
/// assert_eq!(normalize("Hello, World!", &cfg), "helloworld");
/// assert_eq!(normalize("see https://example.com/x?y=1 now", &cfg), "seenow");
/// ```
pub fn normalize(text: &str, cfg: &NormalizeConfig) -> String {
    let without_urls = URL_RE.replace_all(text, "");
    let mut out = String::with_capacity(without_urls.len());
    out.extend(
        without_urls
            .chars()
            .filter(|&ch| is_retained(ch, cfg.allow_space))
            .map(|ch| ch.to_ascii_lowercase()),
    );
    out
}

#[inline]
fn is_retained(ch: char, allow_space: bool) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || (allow_space && ch == ' ')
}

/// Count non-overlapping occurrences of `needle` in `haystack`.
///
/// An empty needle never matches.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}
