//! Render a page once and print it

use anyhow::Result;

use crate::templates::PageKind;
use crate::Nlob;

/// Render the list page
pub async fn list(nlob: &Nlob) -> Result<String> {
    let shell = nlob.page_shell(PageKind::List)?;
    let page = nlob.controller().render(shell, None).await;
    Ok(page.into_html())
}

/// Render the post page for one post id
pub async fn post(nlob: &Nlob, id: &str) -> Result<String> {
    let shell = nlob.page_shell(PageKind::Post)?;
    let page = nlob.controller().render(shell, Some(id)).await;
    Ok(page.into_html())
}
