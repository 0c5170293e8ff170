//! nlob: a markdown blog front end
//!
//! Posts live as markdown files with a small front-matter block in a remote
//! repository, listed by a JSON manifest. This crate resolves the manifest,
//! fetches and renders posts, and writes the result into HTML page shells,
//! either on demand from a local server or once from the command line.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod i18n;
pub mod page;
pub mod server;
pub mod templates;
pub mod transport;
pub mod view;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::MarkdownRenderer;
use page::PageController;
use templates::{PageKind, PageShell};
use transport::SiteTransport;

/// The main application
#[derive(Clone)]
pub struct Nlob {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Local markdown sources
    pub blogs_dir: PathBuf,
}

impl Nlob {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let blogs_dir = base_dir.join(&config.blogs_dir);
        Self {
            config,
            base_dir,
            blogs_dir,
        }
    }

    /// Site root as a location: the configured URL, or a directory under the
    /// base directory
    pub fn site_root(&self) -> String {
        if helpers::is_remote(&self.config.site_root) {
            self.config.site_root.clone()
        } else {
            self.base_dir
                .join(&self.config.site_root)
                .to_string_lossy()
                .into_owned()
        }
    }

    pub fn transport(&self) -> SiteTransport {
        SiteTransport::new(&self.site_root())
    }

    pub fn renderer(&self) -> MarkdownRenderer {
        MarkdownRenderer::from_config(&self.config)
    }

    pub fn controller(&self) -> PageController<SiteTransport> {
        PageController::new(self.transport(), &self.config, Some(self.renderer()))
    }

    /// The configured shell for a page type, or the built-in one titled
    /// after the site
    pub fn page_shell(&self, kind: PageKind) -> Result<PageShell> {
        let path = match kind {
            PageKind::List => self.config.list_page.as_ref(),
            PageKind::Post => self.config.post_page.as_ref(),
        };
        match path {
            Some(path) => PageShell::load(self.base_dir.join(path)),
            None => Ok(PageShell::builtin_for(
                kind,
                &self.config.title,
                &self.config.language,
            )),
        }
    }

    /// Rebuild the manifest from the local markdown sources
    pub fn build_index(&self) -> Result<PathBuf> {
        commands::index::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, tags: &[String]) -> Result<PathBuf> {
        commands::new::create_post(self, title, tags)
    }
}
