//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub language: String,

    // Remote sources
    /// Base for relative paths such as the manifest. Either an http(s) URL
    /// or a local directory.
    pub site_root: String,
    pub manifest_path: String,
    pub raw_base_url: String,

    // Local content
    pub blogs_dir: String,

    // Page shells
    pub list_page: Option<String>,
    pub post_page: Option<String>,

    #[serde(default)]
    pub markdown: MarkdownConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "我的博客".to_string(),
            language: "zh-CN".to_string(),

            site_root: ".".to_string(),
            manifest_path: "blogs/index.json".to_string(),
            raw_base_url: "https://raw.githubusercontent.com/rechardjay/Nlob/master/blogs/"
                .to_string(),

            blogs_dir: "blogs".to_string(),

            list_page: None,
            post_page: None,

            markdown: MarkdownConfig::default(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// File name the post page is served under and linked to
    pub fn post_page_name(&self) -> String {
        self.post_page
            .as_deref()
            .and_then(|path| Path::new(path).file_name())
            .and_then(|name| name.to_str())
            .unwrap_or("blog.html")
            .to_string()
    }
}

/// Markdown conversion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    pub gfm: bool,
    pub breaks: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            breaks: true,
        }
    }
}

/// Code highlighting settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub lang_prefix: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "InspiredGitHub".to_string(),
            lang_prefix: "hljs language-".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.language, "zh-CN");
        assert_eq!(config.manifest_path, "blogs/index.json");
        assert!(config.markdown.breaks);
        assert!(config.highlight.enable);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
language: en
raw_base_url: https://example.com/raw/
highlight:
  enable: false
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.language, "en");
        assert_eq!(config.raw_base_url, "https://example.com/raw/");
        assert!(!config.highlight.enable);
        assert_eq!(config.highlight.lang_prefix, "hljs language-");
        assert_eq!(config.manifest_path, "blogs/index.json");
    }

    #[test]
    fn test_post_page_name() {
        let mut config = SiteConfig::default();
        assert_eq!(config.post_page_name(), "blog.html");
        config.post_page = Some("site/article.html".to_string());
        assert_eq!(config.post_page_name(), "article.html");
    }
}
