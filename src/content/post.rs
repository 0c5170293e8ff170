//! Post models

use serde::{Deserialize, Serialize};

use super::FrontMatter;

/// A manifest entry describing one post for listing purposes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Unique id used in `blog.html?post=<id>`
    pub id: String,

    /// Source document name under the raw base URL
    pub filename: String,

    pub title: String,

    /// Publication date, usually `YYYY-MM-DD`
    pub date: String,

    #[serde(default)]
    pub excerpt: String,

    /// Comma-joined tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

impl PostSummary {
    pub fn new(id: &str, filename: &str, title: &str, date: &str, excerpt: &str) -> Self {
        Self {
            id: id.to_string(),
            filename: filename.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            excerpt: excerpt.to_string(),
            tags: None,
        }
    }
}

/// A fetched document split into metadata and rendered HTML
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub metadata: FrontMatter,
    pub html_content: String,
}

/// A post resolved from the index together with its document
#[derive(Debug, Clone)]
pub struct LoadedPost {
    pub summary: PostSummary,
    pub document: ParsedDocument,
}
