//! Relative URL check used to guard against unvalidated redirects.
//!
//! See the OWASP "Unvalidated Redirects and Forwards" cheat sheet.

/// Returns `true` if `url` is a same-origin relative reference.
///
/// A relative reference has no scheme and no network-path authority. The
/// check is deliberately strict about the forms browsers normalize into an
/// absolute URL:
///
/// - `//host/path` and its backslash variants (`\\host`, `/\host`, `\/host`)
/// - ASCII control characters anywhere, since browsers drop tab and newline
///   from URLs (`/\t/host` becomes `//host`)
/// - a leading space, which browsers trim
///
/// The empty string is relative (it refers to the current document).
///
/// # Examples
///
/// ```
/// use cgi_core::is_relative;
///
/// assert!(is_relative("/account/settings?tab=1"));
/// assert!(is_relative("page.html#top"));
/// assert!(!is_relative("https://evil.example/"));
/// assert!(!is_relative("//evil.example/"));
/// assert!(!is_relative("javascript:alert(1)"));
/// ```
pub fn is_relative(url: &str) -> bool {
    if url.bytes().any(|b| b.is_ascii_control()) || url.starts_with(' ') {
        return false;
    }

    let bytes = url.as_bytes();
    if bytes.len() >= 2 && matches!(bytes[0], b'/' | b'\\') && matches!(bytes[1], b'/' | b'\\') {
        return false;
    }

    !has_scheme(url)
}

/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`, terminated by `:`
/// before any `/`, `?` or `#`.
fn has_scheme(url: &str) -> bool {
    let Some(end) = url.find([':', '/', '?', '#']) else {
        return false;
    };
    if url.as_bytes()[end] != b':' {
        return false;
    }

    let scheme = &url[..end];
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
