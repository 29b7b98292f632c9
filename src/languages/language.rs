//! Validated language value.
//!
//! A `Language` can only be constructed through registry lookups, so a value
//! in hand always carries a code both external services accept.

use crate::languages::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};

/// A language validated against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    code: &'static str,
}

impl Language {
    /// The source language every phrase is translated from.
    pub const ENGLISH: Language = Language { code: "en" };

    /// Create a Language from a provider code string.
    pub fn from_code(code: &str) -> Result<Language> {
        match LanguageRegistry::get().get_by_code(code) {
            Some(config) => Ok(Language { code: config.code }),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Resolve free-text user input into a Language.
    ///
    /// Applies the display-alias remap first, then matches canonical names
    /// case-insensitively. Returns the resolved language together with the
    /// display name to show the user (the alias form, when one was typed).
    pub fn resolve_name(input: &str) -> Option<(Language, String)> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        let (lookup_name, display): (&str, String) =
            match LanguageRegistry::remap_alias(trimmed) {
                Some(canonical) => (canonical, title_case(trimmed)),
                None => (trimmed, String::new()),
            };

        let config = LanguageRegistry::get().get_by_name(lookup_name)?;
        let display = if display.is_empty() {
            config.name.to_string()
        } else {
            display
        };

        Some((Language { code: config.code }, display))
    }

    /// Provider language code (e.g. "es").
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Full registry entry for this language.
    ///
    /// # Panics
    /// Panics if the code is missing from the registry, which cannot happen
    /// for a properly constructed value.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Canonical display name (e.g. "Spanish").
    pub fn name(&self) -> &'static str {
        self.config().name
    }
}

/// Capitalize each space-separated word, for echoing alias input back.
fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
