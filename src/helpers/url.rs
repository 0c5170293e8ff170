//! URL helper functions

use lazy_static::lazy_static;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

/// Characters `encodeURIComponent` leaves alone
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

lazy_static! {
    static ref SLUG_DISALLOWED: Regex =
        Regex::new(r"[^a-z0-9\x{4e00}-\x{9fa5}-]").expect("slug regex is valid");
    static ref DASH_RUN: Regex = Regex::new(r"-+").expect("dash regex is valid");
}

/// Percent-encode a single path or query component
///
/// # Examples
/// ```ignore
/// encode_component("你好 world.md") // -> "%E4%BD%A0%E5%A5%BD%20world.md"
/// ```
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

/// Whether a location is an absolute http(s) URL
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Join a relative path onto a base location, avoiding double slashes
///
/// # Examples
/// ```ignore
/// join_url("https://example.com/site/", "/blogs/index.json")
/// // -> "https://example.com/site/blogs/index.json"
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    if is_remote(path) || base.is_empty() {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Link to the single-post page for a post id
pub fn post_url(post_page: &str, id: &str) -> String {
    format!("{}?post={}", post_page, encode_component(id))
}

/// Post id and file stem for a title: lowercase ASCII letters and digits,
/// common CJK ideographs and single dashes
///
/// # Examples
/// ```ignore
/// slugify("Hello, World!")  // -> "hello-world"
/// slugify("Rust 入门 (1)")   // -> "rust-入门-1"
/// ```
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let replaced = SLUG_DISALLOWED.replace_all(&lowered, "-");
    DASH_RUN
        .replace_all(&replaced, "-")
        .trim_matches('-')
        .to_string()
}
