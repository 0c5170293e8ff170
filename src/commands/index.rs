//! Build the blog manifest from local markdown sources

use anyhow::Result;
use chrono::Local;
use pulldown_cmark::{Event, Parser, TagEnd};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::content::{sort_by_date_desc, FrontMatter, PostSummary};
use crate::helpers::{manifest_date, parse_date, slugify, truncate};
use crate::i18n::I18n;
use crate::Nlob;

/// Characters of body text used when a post has no excerpt
const EXCERPT_LENGTH: usize = 100;

/// Scan the blogs directory and write `index.json` next to the posts
pub fn run(nlob: &Nlob) -> Result<PathBuf> {
    let i18n = I18n::new(&nlob.config.language);
    let posts = collect_posts(&nlob.blogs_dir, &i18n)?;
    let index_path = nlob.blogs_dir.join("index.json");

    fs::write(&index_path, serde_json::to_string_pretty(&posts)?)?;
    tracing::info!("Wrote {} posts to {:?}", posts.len(), index_path);

    Ok(index_path)
}

/// Summaries for every markdown file under `dir`, newest first
pub fn collect_posts(dir: &Path, i18n: &I18n) -> Result<Vec<PostSummary>> {
    if !dir.exists() {
        anyhow::bail!("Blogs directory not found: {:?}", dir);
    }

    let mut posts = Vec::new();
    let mut seen = HashSet::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || !is_markdown_file(path) {
            continue;
        }

        match load_summary(dir, path, i18n) {
            Ok(post) => {
                if !seen.insert(post.id.clone()) {
                    tracing::warn!("Duplicate post id {} from {:?}", post.id, path);
                }
                posts.push(post);
            }
            Err(e) => tracing::warn!("Skipping {:?}: {}", path, e),
        }
    }

    sort_by_date_desc(&mut posts);
    Ok(posts)
}

fn load_summary(dir: &Path, path: &Path, i18n: &I18n) -> Result<PostSummary> {
    let raw = fs::read_to_string(path)?;
    let (fm, body) = FrontMatter::extract(&raw);

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled")
        .to_string();

    let filename = path
        .strip_prefix(dir)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    let title = fm
        .title()
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| stem.clone());

    let id = match slugify(&title) {
        slug if slug.is_empty() => stem,
        slug => slug,
    };

    let date = match fm.date().and_then(parse_date) {
        Some(date) => manifest_date(&date),
        None => {
            let modified = fs::metadata(path)?.modified()?;
            chrono::DateTime::<Local>::from(modified)
                .format("%Y-%m-%d")
                .to_string()
        }
    };

    let excerpt = match fm.excerpt().filter(|e| !e.is_empty()) {
        Some(excerpt) => excerpt.to_string(),
        None => match plain_text(body) {
            text if text.is_empty() => i18n.get("no_excerpt"),
            text => truncate(&text, EXCERPT_LENGTH, None),
        },
    };

    let mut post = PostSummary::new(&id, &filename, &title, &date, &excerpt);
    post.tags = fm.tags().filter(|t| !t.is_empty()).map(str::to_string);
    Ok(post)
}

/// Visible text of a markdown body on one line, without markup
fn plain_text(markdown: &str) -> String {
    let mut text = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak
            | Event::HardBreak
            | Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => {
                text.push(' ')
            }
            _ => {}
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
