//! Internationalization (i18n) support
//!
//! User-facing messages ship as embedded language tables. Lookups fall back
//! to English, then to the key itself.

use std::collections::HashMap;

/// Built-in language tables: (language, YAML source)
const LANGUAGES: &[(&str, &str)] = &[
    ("en", include_str!("languages/en.yml")),
    ("zh-CN", include_str!("languages/zh-CN.yml")),
];

/// Internationalization handler
#[derive(Debug, Clone)]
pub struct I18n {
    /// Current language
    language: String,
    /// Language data: lang -> key -> translation
    translations: HashMap<String, HashMap<String, serde_yaml::Value>>,
}

impl I18n {
    /// Create a handler for `language` with the built-in tables loaded
    pub fn new(language: &str) -> Self {
        let mut translations = HashMap::new();
        for (lang, source) in LANGUAGES {
            match serde_yaml::from_str(source) {
                Ok(data) => {
                    translations.insert(lang.to_string(), data);
                }
                Err(e) => tracing::warn!("Failed to parse built-in language {}: {}", lang, e),
            }
        }

        if !translations.contains_key(language) {
            tracing::warn!("No messages for language {}, using en", language);
        }

        Self {
            language: language.to_string(),
            translations,
        }
    }

    /// Get the current language
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Get a translation by key; nested keys use dots, like "error.not_found"
    pub fn get(&self, key: &str) -> String {
        self.get_for_lang(&self.language, key)
    }

    /// Get a translation with `%s` replaced by `arg`
    pub fn format(&self, key: &str, arg: &str) -> String {
        self.get(key).replacen("%s", arg, 1)
    }

    /// Look a key up in `lang`, then in English, then give the key back
    pub fn get_for_lang(&self, lang: &str, key: &str) -> String {
        [lang, "en"]
            .iter()
            .filter_map(|l| self.translations.get(*l))
            .find_map(|table| lookup(table, key))
            .map(message_text)
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new("zh-CN")
    }
}

/// Walk a dotted key such as `error.not_found` through nested tables
fn lookup<'a>(
    table: &'a HashMap<String, serde_yaml::Value>,
    key: &str,
) -> Option<&'a serde_yaml::Value> {
    let mut parts = key.split('.');
    let first = table.get(parts.next()?)?;
    parts.try_fold(first, |value, part| value.as_mapping()?.get(part))
}

fn message_text(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}
