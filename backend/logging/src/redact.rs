//! Log Redaction Layer
//!
//! Scrubs API keys, bearer tokens, and URL credentials from strings prior to logging.

use regex::Regex;
use std::sync::LazyLock;

static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(sk-[a-zA-Z0-9_\-]{16,})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)").expect("valid api key pattern")
});
static URL_CREDENTIALS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-z][a-z0-9+.-]*://)[^\s/@:]*:[^\s/@]*@").expect("valid url credentials pattern")
});

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = API_KEY_RE.replace_all(input, "[REDACTED_TOKEN]");
    URL_CREDENTIALS_RE
        .replace_all(&redacted, "${1}[REDACTED]@")
        .into_owned()
}
