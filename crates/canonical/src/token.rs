/// True when `text` holds at most one whitespace-delimited token.
///
/// Callers use this to route a phrase to exact substring counting instead of
/// fingerprint matching.
pub fn is_single_token(text: &str) -> bool {
    text.split_whitespace().nth(1).is_none()
}
