//! Translation tables and per player locale selection.

use crate::cache::IdentityCache;
use anyhow::{Context, Result};
use mcsapi_api::PlayerUuid;
use mcsapi_text::{MessageNode, Translator, render};
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

type Table = FxHashMap<String, String>;

/// Translation strings keyed by locale, then by key.
///
/// Lookups fall back to the default language and finally to the key itself.
pub struct Translations {
    default_language: String,
    tables: RwLock<FxHashMap<String, Table>>,
}

impl Translations {
    pub fn new(default_language: impl Into<String>) -> Translations {
        Translations {
            default_language: default_language.into(),
            tables: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn insert(&self, locale: &str, key: impl Into<String>, value: impl Into<String>) {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        tables
            .entry(locale.to_string())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Merges a flat JSON object of translations into `locale`. Entries
    /// already present are overwritten.
    pub fn load_str(&self, locale: &str, json: &str) -> Result<usize> {
        let object: serde_json::Map<String, Value> =
            serde_json::from_str(json).with_context(|| format!("Invalid translations for {}", locale))?;

        let mut loaded = Table::default();
        for (key, value) in object {
            match value {
                Value::String(value) => {
                    loaded.insert(key, value);
                }
                other => warn!("Skipping non-string translation {}.{}: {}", locale, key, other),
            }
        }

        let count = loaded.len();
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        tables.entry(locale.to_string()).or_default().extend(loaded);
        Ok(count)
    }

    /// Loads every `<locale>.json` file in `dir`.
    pub fn load_dir(&self, dir: impl AsRef<Path>) -> Result<usize> {
        let dir = dir.as_ref();
        let mut total = 0;
        let entries =
            fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(locale) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let json = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let count = self.load_str(&locale.to_lowercase(), &json)?;
            debug!("Loaded {} translations from {}", count, path.display());
            total += count;
        }
        Ok(total)
    }

    pub fn languages(&self) -> Vec<String> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        let mut languages: Vec<String> = tables.keys().cloned().collect();
        languages.sort();
        languages
    }

    fn lookup(&self, locale: &str, key: &str) -> Option<String> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        tables
            .get(locale)
            .and_then(|table| table.get(key))
            .or_else(|| tables.get(&self.default_language)?.get(key))
            .cloned()
    }
}

impl Translator for Translations {
    fn translate(&self, locale: &str, key: &str, substitutes: &[String]) -> String {
        match self.lookup(locale, key) {
            Some(template) => format_template(&template, substitutes),
            None => key.to_string(),
        }
    }

    fn has_translation(&self, locale: &str, key: &str) -> bool {
        self.lookup(locale, key).is_some()
    }
}

/// Substitutes `%s` placeholders in order and `%N$s` by 1-based index.
/// `%%` is a literal percent sign. Placeholders without a substitute are
/// kept as written.
pub fn format_template(template: &str, substitutes: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut next = 0;
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 1..];

        if let Some(tail) = rest.strip_prefix('%') {
            out.push('%');
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix('s') {
            match substitutes.get(next) {
                Some(sub) => out.push_str(sub),
                None => out.push_str("%s"),
            }
            next += 1;
            rest = tail;
        } else {
            let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
            let indexed = rest[digits..].strip_prefix("$s").filter(|_| digits > 0);
            match indexed {
                Some(tail) => {
                    let spec = &rest[..digits + 2];
                    let sub = rest[..digits]
                        .parse::<usize>()
                        .ok()
                        .and_then(|n| n.checked_sub(1))
                        .and_then(|i| substitutes.get(i));
                    match sub {
                        Some(sub) => out.push_str(sub),
                        None => {
                            out.push('%');
                            out.push_str(spec);
                        }
                    }
                    rest = tail;
                }
                None => out.push('%'),
            }
        }
    }

    out.push_str(rest);
    out
}

/// Picks the locale to render in for a player: the network language when
/// one is set, otherwise the client's own.
pub struct PlayerTranslations {
    cache: Arc<IdentityCache>,
    translations: Arc<Translations>,
}

impl PlayerTranslations {
    pub fn new(cache: Arc<IdentityCache>, translations: Arc<Translations>) -> PlayerTranslations {
        PlayerTranslations {
            cache,
            translations,
        }
    }

    pub fn preferred_language(&self, player: PlayerUuid) -> Option<String> {
        self.cache.get(player)?.language
    }

    pub fn locale_for(&self, player: PlayerUuid, client_locale: Option<&str>) -> String {
        self.preferred_language(player)
            .or_else(|| client_locale.map(str::to_lowercase))
            .unwrap_or_else(|| self.translations.default_language.clone())
    }

    pub fn translate_for(
        &self,
        player: PlayerUuid,
        client_locale: Option<&str>,
        key: &str,
        substitutes: &[String],
    ) -> String {
        let locale = self.locale_for(player, client_locale);
        self.translations.translate(&locale, key, substitutes)
    }

    /// Renders to a `§`-coded string in the player's locale.
    pub fn render_for(
        &self,
        player: PlayerUuid,
        client_locale: Option<&str>,
        message: &MessageNode,
    ) -> String {
        let locale = self.locale_for(player, client_locale);
        render::render_legacy(message, &locale, self.translations.as_ref())
    }
}
