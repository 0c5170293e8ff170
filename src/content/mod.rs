//! Content module - front matter, markdown, the blog index and post loading

mod frontmatter;
pub mod highlight;
mod index;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use index::{fallback_posts, sort_by_date_desc, BlogIndex};
pub use loader::{parse_markdown, BlogLoader, FetchFailure, PostOutcome};
pub use markdown::{MarkdownRenderer, RenderOptions};
pub use post::{LoadedPost, ParsedDocument, PostSummary};
