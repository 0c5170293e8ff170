//! View composer - turns summaries, metadata and rendered HTML into fragments

use crate::content::{FrontMatter, PostSummary};
use crate::helpers::{html_escape, post_url};
use crate::i18n::I18n;

/// A single-post fragment together with the document title it implies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPost {
    pub document_title: String,
    pub html: String,
}

/// Builds the HTML written into page containers
#[derive(Debug, Clone)]
pub struct ViewComposer {
    i18n: I18n,
    site_title: String,
    post_page: String,
}

impl ViewComposer {
    pub fn new(i18n: I18n, site_title: &str, post_page: &str) -> Self {
        Self {
            i18n,
            site_title: site_title.to_string(),
            post_page: post_page.to_string(),
        }
    }

    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    /// One card per post; the date is trusted and written as-is
    pub fn render_blog_list(&self, posts: &[PostSummary]) -> String {
        if posts.is_empty() {
            return format!(
                r#"<div class="loading">{}</div>"#,
                self.i18n.get("list.empty")
            );
        }

        let published_on = self.i18n.get("published_on");
        posts
            .iter()
            .map(|post| {
                format!(
                    r#"
<article class="blog-card">
    <h4>
        <a href="{href}">
            {title}
        </a>
    </h4>
    <div class="blog-meta">{published_on} {date}</div>
    <div class="blog-excerpt">{excerpt}</div>
</article>
"#,
                    href = post_url(&self.post_page, &post.id),
                    title = html_escape(&post.title),
                    published_on = published_on,
                    date = post.date,
                    excerpt = html_escape(&post.excerpt),
                )
            })
            .collect()
    }

    /// Full post markup. Index fields win over front matter so the two never
    /// disagree on screen.
    pub fn render_blog_post(
        &self,
        metadata: &FrontMatter,
        html_content: &str,
        summary: &PostSummary,
    ) -> RenderedPost {
        let untitled = self.i18n.get("untitled");
        let unknown_date = self.i18n.get("unknown_date");

        let title = first_present(&[Some(summary.title.as_str()), metadata.title()])
            .unwrap_or(untitled.as_str());
        let date = first_present(&[Some(summary.date.as_str()), metadata.date()])
            .unwrap_or(unknown_date.as_str());
        let tags = summary
            .tags
            .as_deref()
            .filter(|tags| !tags.is_empty())
            .map(|tags| {
                format!(
                    r#"<span class="blog-tags"> | {}: {}</span>"#,
                    self.i18n.get("tags"),
                    tags
                )
            })
            .unwrap_or_default();

        let html = format!(
            r#"
<article class="blog-post">
    <header class="blog-header">
        <h1 class="blog-title">{title}</h1>
        <div class="blog-meta">
            <span class="publish-date">{published_on} {date}</span>
            {tags}
        </div>
    </header>

    <div class="blog-content">
        {html_content}
    </div>
</article>
"#,
            title = html_escape(title),
            published_on = self.i18n.get("published_on"),
        );

        RenderedPost {
            document_title: format!("{} - {}", title, self.site_title),
            html,
        }
    }

    /// Failure fragment with the "failed to load" heading
    pub fn error_content(&self, message: &str) -> String {
        format!(
            r#"
<div class="error">
    <h2>{}</h2>
    <p>{}</p>
</div>
"#,
            self.i18n.get("error.load_failed_title"),
            message
        )
    }

    /// Not-found fragment, with the generic message when none is given
    pub fn not_found(&self, message: Option<&str>) -> String {
        let message = message
            .map(str::to_string)
            .unwrap_or_else(|| self.i18n.get("error.not_found"));
        format!(
            r#"
<div class="error">
    <h2>{}</h2>
    <p>{}</p>
</div>
"#,
            self.i18n.get("error.not_found_title"),
            message
        )
    }

    /// Not-found fragment naming the missing id
    pub fn post_not_found(&self, id: &str) -> String {
        let message = self.i18n.format("error.post_not_found", &html_escape(id));
        self.not_found(Some(&message))
    }

    /// Bare one-line error, used when the page cannot render at all
    pub fn error_banner(&self, message: &str) -> String {
        format!(r#"<div class="error">{}</div>"#, message)
    }
}

/// First value that is present and non-empty
fn first_present<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|value| !value.is_empty())
}
