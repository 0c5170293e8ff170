//! Blog index resolution: remote manifest with a compiled-in fallback

use std::cmp::Reverse;

use super::PostSummary;
use crate::helpers::parse_date;
use crate::transport::Transport;

/// Resolves the ordered list of available posts
#[derive(Debug, Clone)]
pub struct BlogIndex {
    manifest_path: String,
}

impl BlogIndex {
    pub fn new(manifest_path: &str) -> Self {
        Self {
            manifest_path: manifest_path.to_string(),
        }
    }

    /// Fetch the manifest, falling back to the built-in list on any failure.
    /// The result is always sorted newest first.
    pub async fn resolve<T: Transport>(&self, transport: &T) -> Vec<PostSummary> {
        let mut posts = match self.load_manifest(transport).await {
            Some(posts) => posts,
            None => fallback_posts(),
        };
        sort_by_date_desc(&mut posts);
        posts
    }

    async fn load_manifest<T: Transport>(&self, transport: &T) -> Option<Vec<PostSummary>> {
        let response = match transport.get(&self.manifest_path).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Could not load blog index, using fallback list: {}", e);
                return None;
            }
        };

        if !response.is_success() {
            tracing::warn!(
                "Blog index {} returned HTTP {}, using fallback list",
                self.manifest_path,
                response.status
            );
            return None;
        }

        match serde_json::from_str::<Vec<PostSummary>>(&response.body) {
            Ok(posts) => {
                tracing::debug!("Loaded {} posts from {}", posts.len(), self.manifest_path);
                Some(posts)
            }
            Err(e) => {
                tracing::warn!("Blog index is malformed, using fallback list: {}", e);
                None
            }
        }
    }
}

/// Posts shown when the manifest is unavailable
pub fn fallback_posts() -> Vec<PostSummary> {
    vec![
        PostSummary::new(
            "welcome",
            "welcome.md",
            "欢迎来到我的博客",
            "2024-01-15",
            "这是我的第一篇博客文章，欢迎阅读！",
        ),
        PostSummary::new(
            "getting-started",
            "getting-started.md",
            "开始使用GitHub Pages",
            "2024-01-10",
            "学习如何使用GitHub Pages搭建静态博客网站",
        ),
    ]
}

/// Stable sort by calendar date, newest first; unparseable dates go last
pub fn sort_by_date_desc(posts: &mut [PostSummary]) {
    posts.sort_by_key(|post| Reverse(parse_date(&post.date)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::MemoryTransport;

    const MANIFEST: &str = "blogs/index.json";

    fn ids(posts: &[PostSummary]) -> Vec<&str> {
        posts.iter().map(|p| p.id.as_str()).collect()
    }

    fn assert_sorted(posts: &[PostSummary]) {
        for pair in posts.windows(2) {
            assert!(parse_date(&pair[0].date) >= parse_date(&pair[1].date));
        }
    }

    #[tokio::test]
    async fn test_manifest_is_sorted_newest_first() {
        let manifest = r#"[
            {"id":"old","filename":"old.md","title":"Old","date":"2023-05-01","excerpt":""},
            {"id":"new","filename":"new.md","title":"New","date":"2024-03-09","excerpt":""},
            {"id":"mid","filename":"mid.md","title":"Mid","date":"2023-12-31","excerpt":""}
        ]"#;
        let transport = MemoryTransport::new().with(MANIFEST, 200, manifest);

        let posts = BlogIndex::new(MANIFEST).resolve(&transport).await;
        assert_eq!(ids(&posts), vec!["new", "mid", "old"]);
        assert_sorted(&posts);
    }

    #[tokio::test]
    async fn test_network_failure_uses_fallback() {
        let transport = MemoryTransport::new();
        let posts = BlogIndex::new(MANIFEST).resolve(&transport).await;
        assert_eq!(ids(&posts), vec!["welcome", "getting-started"]);
        assert_sorted(&posts);
        assert_eq!(transport.requested(), vec![MANIFEST]);
    }

    #[tokio::test]
    async fn test_error_status_uses_fallback() {
        let transport = MemoryTransport::new().with(MANIFEST, 404, "not found");
        let posts = BlogIndex::new(MANIFEST).resolve(&transport).await;
        assert_eq!(posts, {
            let mut expected = fallback_posts();
            sort_by_date_desc(&mut expected);
            expected
        });
    }

    #[tokio::test]
    async fn test_malformed_manifest_uses_fallback() {
        let transport = MemoryTransport::new().with(MANIFEST, 200, "{ not json");
        let posts = BlogIndex::new(MANIFEST).resolve(&transport).await;
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "welcome");
    }

    #[test]
    fn test_mixed_date_formats_and_garbage() {
        let mut posts = vec![
            PostSummary::new("bad", "bad.md", "Bad", "someday", ""),
            PostSummary::new("a", "a.md", "A", "2024/01/02", ""),
            PostSummary::new("b", "b.md", "B", "2024-01-03 08:00", ""),
        ];
        sort_by_date_desc(&mut posts);
        assert_eq!(ids(&posts), vec!["b", "a", "bad"]);
    }

    #[test]
    fn test_equal_dates_keep_manifest_order() {
        let mut posts = vec![
            PostSummary::new("first", "1.md", "1", "2024-01-01", ""),
            PostSummary::new("second", "2.md", "2", "2024-01-01", ""),
        ];
        sort_by_date_desc(&mut posts);
        assert_eq!(ids(&posts), vec!["first", "second"]);
    }
}
