//! Front-matter parsing

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

lazy_static! {
    /// A `---` line, the block body, then a closing `---` line with its newline
    static ref FRONT_MATTER_RE: Regex =
        Regex::new(r"^---\s*\n([\s\S]*?)\n---\s*\n").expect("front-matter regex is valid");
}

/// Key/value metadata from the leading `---` block of a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrontMatter {
    fields: HashMap<String, String>,
}

impl FrontMatter {
    /// Split a raw document into its metadata and the remaining body.
    ///
    /// Documents without a terminated block come back unchanged with empty
    /// metadata.
    pub fn extract(markdown: &str) -> (Self, &str) {
        let Some(found) = FRONT_MATTER_RE.captures(markdown) else {
            return (Self::default(), markdown);
        };

        let whole = found.get(0).map_or(0, |m| m.end());
        let block = found.get(1).map_or("", |m| m.as_str());

        let mut front_matter = Self::default();
        for line in block.split('\n') {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once(':') {
                front_matter.insert(key.trim(), unquote(value.trim()));
            }
        }

        (front_matter, &markdown[whole..])
    }

    /// Set a field, replacing any earlier value
    pub fn insert(&mut self, key: &str, value: &str) {
        self.fields.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn date(&self) -> Option<&str> {
        self.get("date")
    }

    pub fn tags(&self) -> Option<&str> {
        self.get("tags")
    }

    pub fn excerpt(&self) -> Option<&str> {
        self.get("excerpt")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Drop one quote character from each end when both ends are quotes.
/// Quotes elsewhere in the value are kept.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    let is_quote = |b: u8| b == b'"' || b == b'\'';
    if bytes.len() >= 2 && is_quote(bytes[0]) && is_quote(bytes[bytes.len() - 1]) {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
