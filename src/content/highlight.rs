//! Pluggable code-block highlighting

use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("no syntax for language `{0}`")]
    UnknownLanguage(String),
    #[error("unknown theme `{0}`")]
    UnknownTheme(String),
    #[error(transparent)]
    Syntect(#[from] syntect::Error),
}

/// Turns the source of a fenced code block into highlighted HTML
pub trait Highlighter: Send + Sync {
    /// Whether `lang` (the fence info string) is a language this highlighter knows
    fn supports(&self, lang: &str) -> bool;

    /// Highlighted inner HTML for a `<code>` element
    fn highlight(&self, code: &str, lang: &str) -> Result<String, HighlightError>;
}

/// Class-based highlighter backed by syntect's default syntaxes
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl SyntectHighlighter {
    pub fn new(theme: &str) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
        }
    }

    /// Stylesheet matching the classes emitted by [`Highlighter::highlight`]
    pub fn css(&self) -> Result<String, HighlightError> {
        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .ok_or_else(|| HighlightError::UnknownTheme(self.theme_name.clone()))?;
        Ok(css_for_theme_with_class_style(theme, ClassStyle::Spaced)?)
    }
}

impl Highlighter for SyntectHighlighter {
    fn supports(&self, lang: &str) -> bool {
        self.syntax_set.find_syntax_by_token(lang).is_some()
    }

    fn highlight(&self, code: &str, lang: &str) -> Result<String, HighlightError> {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .ok_or_else(|| HighlightError::UnknownLanguage(lang.to_string()))?;

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, ClassStyle::Spaced);
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }
        Ok(generator.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supports_known_language() {
        let highlighter = SyntectHighlighter::new("InspiredGitHub");
        assert!(highlighter.supports("rust"));
        assert!(highlighter.supports("rs"));
        assert!(!highlighter.supports("definitely-not-a-language"));
    }

    #[test]
    fn test_highlight_emits_classes() {
        let highlighter = SyntectHighlighter::new("InspiredGitHub");
        let html = highlighter.highlight("fn main() {}\n", "rust").unwrap();
        assert!(html.contains("<span class=\""));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_unknown_language_is_an_error() {
        let highlighter = SyntectHighlighter::new("InspiredGitHub");
        assert!(matches!(
            highlighter.highlight("x", "nope"),
            Err(HighlightError::UnknownLanguage(_))
        ));
    }

    #[test]
    fn test_css_for_theme() {
        assert!(SyntectHighlighter::new("InspiredGitHub").css().is_ok());
        assert!(matches!(
            SyntectHighlighter::new("missing-theme").css(),
            Err(HighlightError::UnknownTheme(_))
        ));
    }
}
