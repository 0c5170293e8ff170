//! Markdown rendering with pluggable syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

use super::highlight::{Highlighter, SyntectHighlighter};
use crate::config::SiteConfig;
use crate::helpers::html_escape;

/// Settings handed to every render call
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// GitHub-flavored tables, strikethrough, task lists and alerts
    pub gfm: bool,
    /// Render soft line breaks as `<br />`
    pub breaks: bool,
    /// Class prefix for the declared language of a code block
    pub lang_prefix: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            breaks: true,
            lang_prefix: "hljs language-".to_string(),
        }
    }
}

impl RenderOptions {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            gfm: config.markdown.gfm,
            breaks: config.markdown.breaks,
            lang_prefix: config.highlight.lang_prefix.clone(),
        }
    }

    fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }
}

/// Markdown renderer; raw HTML in the source is passed through untouched
pub struct MarkdownRenderer {
    options: RenderOptions,
    highlighter: Option<Box<dyn Highlighter>>,
}

impl MarkdownRenderer {
    /// Create a renderer without a highlighter
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            highlighter: None,
        }
    }

    /// Register a code highlighter
    pub fn with_highlighter<H: Highlighter + 'static>(mut self, highlighter: H) -> Self {
        self.highlighter = Some(Box::new(highlighter));
        self
    }

    /// Build the renderer described by the site configuration
    pub fn from_config(config: &SiteConfig) -> Self {
        let renderer = Self::new(RenderOptions::from_config(config));
        if config.highlight.enable {
            renderer.with_highlighter(SyntectHighlighter::new(&config.highlight.theme))
        } else {
            renderer
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options.parser_options());

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            if let Some((lang, code)) = code_block.as_mut() {
                match event {
                    Event::Text(text) => code.push_str(&text),
                    Event::End(TagEnd::CodeBlock) => {
                        let block = self.code_block(code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(block)));
                        code_block = None;
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => {
                            info.split_whitespace().next().map(str::to_string)
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::SoftBreak if self.options.breaks => events.push(Event::HardBreak),
                event => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    fn code_block(&self, code: &str, lang: Option<&str>) -> String {
        let Some(lang) = lang else {
            return format!("<pre><code>{}</code></pre>\n", html_escape(code));
        };

        let body = self
            .highlight(code, lang)
            .unwrap_or_else(|| html_escape(code));
        format!(
            "<pre><code class=\"{}{}\">{}</code></pre>\n",
            self.options.lang_prefix,
            html_escape(lang),
            body
        )
    }

    /// Highlighted HTML, or `None` when no highlighter applies or it failed
    fn highlight(&self, code: &str, lang: &str) -> Option<String> {
        let highlighter = self.highlighter.as_ref()?;
        if !highlighter.supports(lang) {
            return None;
        }
        match highlighter.highlight(code, lang) {
            Ok(html) => Some(html),
            Err(e) => {
                tracing::warn!("Code highlighting failed for `{}`: {}", lang, e);
                None
            }
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}
