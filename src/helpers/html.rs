//! HTML helper functions

/// Escape text placed in title and excerpt positions
///
/// # Examples
/// ```ignore
/// html_escape("<b>&'\"</b>") // -> "&lt;b&gt;&amp;&#039;&quot;&lt;/b&gt;"
/// ```
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Escape an optional value, treating absence as the empty string
pub fn html_escape_opt(s: Option<&str>) -> String {
    s.map(html_escape).unwrap_or_default()
}

/// Truncate a string to a number of characters, appending the omission
/// marker when anything was cut
pub fn truncate(s: &str, length: usize, omission: Option<&str>) -> String {
    let omission = omission.unwrap_or("...");

    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(length).collect();
        format!("{}{}", truncated, omission)
    }
}
