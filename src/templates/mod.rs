//! Page shells
//!
//! A shell is a complete HTML page exposing one container element. The page
//! type is decided by which container id it carries, and rendered fragments
//! replace the container's inner HTML wholesale.

use anyhow::Result;
use lazy_static::lazy_static;
use regex::{NoExpand, Regex};
use std::fs;
use std::path::Path;

use crate::helpers::html_escape;

/// Container id of the post list page
pub const LIST_CONTAINER: &str = "blog-list-container";
/// Container id of the single-post page
pub const CONTENT_CONTAINER: &str = "blog-content-container";

const LIST_SHELL: &str = include_str!("shell/index.html");
const POST_SHELL: &str = include_str!("shell/blog.html");

const DEFAULT_SITE_TITLE: &str = "我的博客";
const DEFAULT_LANGUAGE: &str = "zh-CN";

lazy_static! {
    static ref TITLE_RE: Regex =
        Regex::new(r"(?is)<title>.*?</title>").expect("title regex is valid");
}

/// Which page a shell renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    List,
    Post,
}

impl PageKind {
    pub fn container_id(self) -> &'static str {
        match self {
            PageKind::List => LIST_CONTAINER,
            PageKind::Post => CONTENT_CONTAINER,
        }
    }
}

/// An HTML page with a container to fill
#[derive(Debug, Clone)]
pub struct PageShell {
    html: String,
}

impl PageShell {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// Built-in shell for a page type, with the default site title
    pub fn builtin(kind: PageKind) -> Self {
        Self::builtin_for(kind, DEFAULT_SITE_TITLE, DEFAULT_LANGUAGE)
    }

    /// Built-in shell carrying the site title and page language
    pub fn builtin_for(kind: PageKind, site_title: &str, language: &str) -> Self {
        let template = match kind {
            PageKind::List => LIST_SHELL,
            PageKind::Post => POST_SHELL,
        };
        Self::new(
            template
                .replace("{{ site_title }}", &html_escape(site_title))
                .replace("{{ language }}", &html_escape(language)),
        )
    }

    /// Load a shell from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(fs::read_to_string(path.as_ref())?))
    }

    /// Page type, by which container the shell exposes (list wins)
    pub fn kind(&self) -> Option<PageKind> {
        [PageKind::List, PageKind::Post]
            .into_iter()
            .find(|kind| self.has_container(kind.container_id()))
    }

    pub fn has_container(&self, id: &str) -> bool {
        self.container_span(id).is_some()
    }

    /// Replace the inner HTML of the element with the given id.
    /// Returns false when the shell has no such element.
    pub fn write_container(&mut self, id: &str, fragment: &str) -> bool {
        match self.container_span(id) {
            Some((start, end)) => {
                self.html.replace_range(start..end, fragment);
                true
            }
            None => false,
        }
    }

    /// Replace the document title
    pub fn set_title(&mut self, title: &str) {
        let replacement = format!("<title>{}</title>", html_escape(title));
        self.html = TITLE_RE
            .replace(&self.html, NoExpand(&replacement))
            .into_owned();
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    /// Byte range of the inner HTML of the element with `id`
    fn container_span(&self, id: &str) -> Option<(usize, usize)> {
        let open = Regex::new(&format!(
            r#"<([A-Za-z][A-Za-z0-9-]*)(?:\s[^>]*)?\sid\s*=\s*["']{}["'][^>]*>"#,
            regex::escape(id)
        ))
        .ok()?;
        let found = open.captures(&self.html)?;
        let start = found.get(0)?.end();
        let tag = found.get(1)?.as_str();

        // Skip nested elements with the same tag name
        let tags = Regex::new(&format!(r"(?i)<(/?){}\b[^>]*>", regex::escape(tag))).ok()?;
        let mut depth = 1usize;
        for m in tags.captures_iter(&self.html[start..]) {
            let closing = m.get(1).is_some_and(|slash| !slash.as_str().is_empty());
            if closing {
                depth -= 1;
                if depth == 0 {
                    return Some((start, start + m.get(0)?.start()));
                }
            } else {
                depth += 1;
            }
        }
        None
    }
}
