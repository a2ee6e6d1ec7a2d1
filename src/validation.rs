use std::sync::LazyLock;

use regex::Regex;

/// Accepted email shape: local part, `@`, domain, `.`, alphabetic TLD of at least two letters
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("Email pattern is a valid regex")
});

/// Anything that looks like an HTML tag
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Tag pattern is a valid regex"));

/// Check that `email` is syntactically an email address
///
/// The whole string must match, so surrounding whitespace makes it invalid.
/// No DNS or mailbox verification is attempted.
pub fn validate_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Strip tag-like substrings from `text` and trim surrounding whitespace
///
/// This is a best-effort cleanup, not an HTML encoder: characters such as `&`,
/// `"` or a lone `<` survive untouched, so output must still be escaped for
/// whatever context it is rendered into.
pub fn sanitize_input(text: Option<&str>) -> String {
    match text {
        None | Some("") => String::new(),
        Some(text) => TAG_PATTERN.replace_all(text, "").trim().to_string(),
    }
}
