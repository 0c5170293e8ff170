//! Blog content fetcher - resolves a post id and loads its document

use thiserror::Error;

use super::{BlogIndex, FrontMatter, LoadedPost, MarkdownRenderer, ParsedDocument, PostSummary};
use crate::helpers::encode_component;
use crate::transport::{Transport, TransportError};

/// Why a document could not be retrieved
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Result of loading a single post
#[derive(Debug)]
pub enum PostOutcome {
    Ok(LoadedPost),
    /// No id was given (`None`) or the index has no such id
    NotFound(Option<String>),
    FetchError(FetchFailure),
    /// The document was fetched but no markdown renderer is configured
    ParseDegraded {
        summary: PostSummary,
        metadata: FrontMatter,
    },
}

/// Split front matter off a raw document and render the trimmed body.
///
/// The HTML is `None` when no renderer is available.
pub fn parse_markdown(
    markdown: &str,
    renderer: Option<&MarkdownRenderer>,
) -> (FrontMatter, Option<String>) {
    let (metadata, content) = FrontMatter::extract(markdown);
    let html = renderer.map(|renderer| renderer.render(content.trim()));
    (metadata, html)
}

/// Loads posts through the index and the raw document store
pub struct BlogLoader<'a, T: Transport> {
    transport: &'a T,
    index: &'a BlogIndex,
    raw_base_url: &'a str,
    renderer: Option<&'a MarkdownRenderer>,
}

impl<'a, T: Transport> BlogLoader<'a, T> {
    pub fn new(
        transport: &'a T,
        index: &'a BlogIndex,
        raw_base_url: &'a str,
        renderer: Option<&'a MarkdownRenderer>,
    ) -> Self {
        Self {
            transport,
            index,
            raw_base_url,
            renderer,
        }
    }

    /// Load the post with the given id
    pub async fn load(&self, id: Option<&str>) -> PostOutcome {
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            return PostOutcome::NotFound(None);
        };

        let posts = self.index.resolve(self.transport).await;
        let Some(summary) = posts.into_iter().find(|post| post.id == id) else {
            tracing::debug!("Post {} is not in the index", id);
            return PostOutcome::NotFound(Some(id.to_string()));
        };

        let markdown = match self.fetch(&summary.filename).await {
            Ok(markdown) => markdown,
            Err(e) => {
                tracing::error!("Failed to load post {}: {}", id, e);
                return PostOutcome::FetchError(e);
            }
        };

        match parse_markdown(&markdown, self.renderer) {
            (metadata, Some(html_content)) => PostOutcome::Ok(LoadedPost {
                summary,
                document: ParsedDocument {
                    metadata,
                    html_content,
                },
            }),
            (metadata, None) => PostOutcome::ParseDegraded { summary, metadata },
        }
    }

    async fn fetch(&self, filename: &str) -> Result<String, FetchFailure> {
        let url = format!("{}{}", self.raw_base_url, encode_component(filename));
        let response = self.transport.get(&url).await?;
        if !response.is_success() {
            return Err(FetchFailure::Status(response.status));
        }
        Ok(response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::RenderOptions;
    use crate::transport::testing::MemoryTransport;

    const MANIFEST: &str = "blogs/index.json";
    const RAW: &str = "https://raw.example.com/blogs/";

    fn renderer() -> MarkdownRenderer {
        MarkdownRenderer::new(RenderOptions::default())
    }

    #[test]
    fn test_parse_markdown() {
        let renderer = renderer();
        let (metadata, html) = parse_markdown("---\ntitle: \"Hello\"\n---\n# Hi\n", Some(&renderer));
        assert_eq!(metadata.title(), Some("Hello"));
        assert!(html.unwrap().contains("<h1>Hi</h1>"));
    }

    #[test]
    fn test_parse_markdown_without_renderer() {
        let (metadata, html) = parse_markdown("---\ntitle: T\n---\nbody", None);
        assert_eq!(metadata.title(), Some("T"));
        assert!(html.is_none());
    }

    #[tokio::test]
    async fn test_missing_id_skips_network() {
        let transport = MemoryTransport::new();
        let index = BlogIndex::new(MANIFEST);
        let renderer = renderer();
        let loader = BlogLoader::new(&transport, &index, RAW, Some(&renderer));

        assert!(matches!(loader.load(None).await, PostOutcome::NotFound(None)));
        assert!(matches!(loader.load(Some("")).await, PostOutcome::NotFound(None)));
        assert!(transport.requested().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_id_only_touches_index() {
        let transport = MemoryTransport::new();
        let index = BlogIndex::new(MANIFEST);
        let renderer = renderer();
        let loader = BlogLoader::new(&transport, &index, RAW, Some(&renderer));

        match loader.load(Some("no-such-post")).await {
            PostOutcome::NotFound(Some(id)) => assert_eq!(id, "no-such-post"),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(transport.requested(), vec![MANIFEST]);
    }

    #[tokio::test]
    async fn test_loads_post_with_encoded_filename() {
        let manifest = r#"[{"id":"ni-hao","filename":"你好 世界.md","title":"你好","date":"2024-01-01","excerpt":""}]"#;
        let url = format!("{}%E4%BD%A0%E5%A5%BD%20%E4%B8%96%E7%95%8C.md", RAW);
        let transport = MemoryTransport::new()
            .with(MANIFEST, 200, manifest)
            .with(&url, 200, "---\ntitle: \"Hello\"\n---\n\n# Hi\n");
        let index = BlogIndex::new(MANIFEST);
        let renderer = renderer();
        let loader = BlogLoader::new(&transport, &index, RAW, Some(&renderer));

        match loader.load(Some("ni-hao")).await {
            PostOutcome::Ok(post) => {
                assert_eq!(post.summary.title, "你好");
                assert_eq!(post.document.metadata.title(), Some("Hello"));
                assert!(post.document.html_content.contains("<h1>Hi</h1>"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(transport.requested(), vec![MANIFEST.to_string(), url]);
    }

    #[tokio::test]
    async fn test_error_status_is_fetch_error() {
        let url = format!("{}welcome.md", RAW);
        let transport = MemoryTransport::new().with(&url, 500, "boom");
        let index = BlogIndex::new(MANIFEST);
        let renderer = renderer();
        let loader = BlogLoader::new(&transport, &index, RAW, Some(&renderer));

        match loader.load(Some("welcome")).await {
            PostOutcome::FetchError(FetchFailure::Status(status)) => assert_eq!(status, 500),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_fetch_error() {
        let transport = MemoryTransport::new();
        let index = BlogIndex::new(MANIFEST);
        let loader = BlogLoader::new(&transport, &index, RAW, None);

        assert!(matches!(
            loader.load(Some("getting-started")).await,
            PostOutcome::FetchError(FetchFailure::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_renderer_degrades() {
        let url = format!("{}welcome.md", RAW);
        let transport = MemoryTransport::new().with(&url, 200, "---\ntags: a,b\n---\nbody");
        let index = BlogIndex::new(MANIFEST);
        let loader = BlogLoader::new(&transport, &index, RAW, None);

        match loader.load(Some("welcome")).await {
            PostOutcome::ParseDegraded { summary, metadata } => {
                assert_eq!(summary.id, "welcome");
                assert_eq!(metadata.tags(), Some("a,b"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
