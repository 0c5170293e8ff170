//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::helpers::slugify;
use crate::Nlob;

/// Write a markdown file with a front-matter block into the blogs directory
pub fn create_post(nlob: &Nlob, title: &str, tags: &[String]) -> Result<PathBuf> {
    let now = chrono::Local::now();

    fs::create_dir_all(&nlob.blogs_dir)?;

    let slug = match slugify(title) {
        slug if slug.is_empty() => "untitled".to_string(),
        slug => slug,
    };
    let file_path = nlob.blogs_dir.join(format!("{}.md", slug));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let tags = tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(",");

    let content = format!(
        "---\ntitle: \"{}\"\ndate: \"{}\"\ntags: \"{}\"\n---\n\n",
        title,
        now.format("%Y-%m-%d"),
        tags
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
