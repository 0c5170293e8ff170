//! Page controller - picks the page type and drives the content pipeline

use crate::config::SiteConfig;
use crate::content::{BlogIndex, BlogLoader, MarkdownRenderer, PostOutcome, PostSummary};
use crate::i18n::I18n;
use crate::templates::{PageKind, PageShell, CONTENT_CONTAINER, LIST_CONTAINER};
use crate::transport::Transport;
use crate::view::ViewComposer;

/// Fragment for the single-post container plus the title to show, if any
#[derive(Debug, Clone)]
pub struct PostPage {
    pub title: Option<String>,
    pub html: String,
}

/// Renders list and post pages from remote content
pub struct PageController<T: Transport> {
    transport: T,
    index: BlogIndex,
    raw_base_url: String,
    renderer: Option<MarkdownRenderer>,
    views: ViewComposer,
}

impl<T: Transport> PageController<T> {
    pub fn new(transport: T, config: &SiteConfig, renderer: Option<MarkdownRenderer>) -> Self {
        let views = ViewComposer::new(
            I18n::new(&config.language),
            &config.title,
            &config.post_page_name(),
        );
        Self {
            transport,
            index: BlogIndex::new(&config.manifest_path),
            raw_base_url: config.raw_base_url.clone(),
            renderer,
            views,
        }
    }

    /// Fill the shell's container. `post_id` is the decoded `post` query
    /// parameter, read on post pages only.
    pub async fn render(&self, mut shell: PageShell, post_id: Option<&str>) -> PageShell {
        if self.renderer.is_none() {
            tracing::error!("Markdown renderer is not configured");
            let banner = self
                .views
                .error_banner(&self.views.i18n().get("error.dependency_missing"));
            for id in [LIST_CONTAINER, CONTENT_CONTAINER] {
                if shell.write_container(id, &banner) {
                    break;
                }
            }
            return shell;
        }

        match shell.kind() {
            Some(PageKind::List) => {
                let html = self.render_list().await;
                shell.write_container(LIST_CONTAINER, &html);
            }
            Some(PageKind::Post) => {
                let page = self.render_post(post_id).await;
                if let Some(title) = &page.title {
                    shell.set_title(title);
                }
                shell.write_container(CONTENT_CONTAINER, &page.html);
            }
            None => tracing::warn!("Page has no blog container, nothing to render"),
        }
        shell
    }

    /// Fragment for the list container
    pub async fn render_list(&self) -> String {
        let posts = self.posts().await;
        tracing::debug!("Rendering list of {} posts", posts.len());
        self.views.render_blog_list(&posts)
    }

    /// Fragment and title for the post container
    pub async fn render_post(&self, id: Option<&str>) -> PostPage {
        let loader = BlogLoader::new(
            &self.transport,
            &self.index,
            &self.raw_base_url,
            self.renderer.as_ref(),
        );
        let i18n = self.views.i18n();

        match loader.load(id).await {
            PostOutcome::Ok(post) => {
                let rendered = self.views.render_blog_post(
                    &post.document.metadata,
                    &post.document.html_content,
                    &post.summary,
                );
                PostPage {
                    title: Some(rendered.document_title),
                    html: rendered.html,
                }
            }
            PostOutcome::ParseDegraded { summary, metadata } => {
                let fallback = self
                    .views
                    .error_content(&i18n.get("error.renderer_missing"));
                let rendered = self.views.render_blog_post(&metadata, &fallback, &summary);
                PostPage {
                    title: Some(rendered.document_title),
                    html: rendered.html,
                }
            }
            PostOutcome::NotFound(None) => PostPage {
                title: None,
                html: self.views.not_found(None),
            },
            PostOutcome::NotFound(Some(id)) => PostPage {
                title: None,
                html: self.views.post_not_found(&id),
            },
            PostOutcome::FetchError(_) => PostPage {
                title: None,
                html: self.views.error_content(&i18n.get("error.post_load_failed")),
            },
        }
    }

    /// The resolved, sorted index
    pub async fn posts(&self) -> Vec<PostSummary> {
        self.index.resolve(&self.transport).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::RenderOptions;
    use crate::transport::testing::MemoryTransport;

    fn config() -> SiteConfig {
        SiteConfig {
            title: "My Blog".to_string(),
            language: "en".to_string(),
            raw_base_url: "https://raw.example.com/".to_string(),
            ..SiteConfig::default()
        }
    }

    fn controller(transport: MemoryTransport) -> PageController<MemoryTransport> {
        let renderer = MarkdownRenderer::new(RenderOptions::default());
        PageController::new(transport, &config(), Some(renderer))
    }

    #[tokio::test]
    async fn test_list_page_uses_fallback() {
        let controller = controller(MemoryTransport::new());
        let shell = controller
            .render(PageShell::builtin(PageKind::List), None)
            .await;
        let html = shell.html();
        assert!(html.contains(r#"href="blog.html?post=welcome""#));
        assert!(html.contains(r#"href="blog.html?post=getting-started""#));
        assert!(html.find("post=welcome") < html.find("post=getting-started"));
        assert!(!html.contains("class=\"loading\""));
    }

    #[tokio::test]
    async fn test_post_page_renders_document() {
        let transport = MemoryTransport::new().with(
            "https://raw.example.com/welcome.md",
            200,
            "---\ntitle: \"Hello\"\n---\n\n# Hi\n",
        );
        let controller = controller(transport);
        let shell = controller
            .render(PageShell::builtin(PageKind::Post), Some("welcome"))
            .await;
        let html = shell.html();
        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains("<title>欢迎来到我的博客 - My Blog</title>"));
    }

    #[tokio::test]
    async fn test_post_page_without_id() {
        let transport = MemoryTransport::new();
        let controller = controller(transport);
        let shell = controller
            .render(PageShell::builtin(PageKind::Post), None)
            .await;
        assert!(shell.html().contains("The requested post could not be found"));
        assert!(controller.transport.requested().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_post() {
        let controller = controller(MemoryTransport::new());
        let page = controller.render_post(Some("no-such-post")).await;
        assert!(page.title.is_none());
        assert!(page.html.contains("no-such-post"));
        assert!(page.html.contains("Post not found"));
        assert_eq!(controller.transport.requested(), vec!["blogs/index.json"]);
    }

    #[tokio::test]
    async fn test_fetch_error_fragment() {
        let transport =
            MemoryTransport::new().with("https://raw.example.com/welcome.md", 404, "");
        let controller = controller(transport);
        let page = controller.render_post(Some("welcome")).await;
        assert!(page.html.contains("Failed to load"));
        assert!(page.html.contains("could not be loaded"));
    }

    #[tokio::test]
    async fn test_missing_renderer_is_fatal_for_the_page() {
        let controller = PageController::new(MemoryTransport::new(), &config(), None);
        let shell = controller
            .render(PageShell::builtin(PageKind::List), None)
            .await;
        assert!(shell
            .html()
            .contains(r#"<div class="error">A required component failed to load."#));
        assert!(controller.transport.requested().is_empty());
    }

    #[tokio::test]
    async fn test_missing_renderer_degrades_post_body() {
        let transport =
            MemoryTransport::new().with("https://raw.example.com/welcome.md", 200, "# Hi");
        let controller = PageController::new(transport, &config(), None);
        let page = controller.render_post(Some("welcome")).await;
        assert!(page.html.contains("The markdown renderer is not available."));
        assert!(page.html.contains("欢迎来到我的博客"));
    }
}
