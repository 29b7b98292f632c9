//! Language registry: single source of truth for the supported languages.
//!
//! The set is the intersection of the languages the translation service and
//! the speech-synthesis service both accept, keyed by the synthesis service's
//! display names. Initialized once behind `OnceLock` and immutable after.

use std::sync::OnceLock;

/// Metadata for one supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Provider language code sent to the external services (e.g. "es")
    pub code: &'static str,

    /// Canonical display name (e.g. "Spanish", "Chinese (Simplified)")
    pub name: &'static str,
}

/// Display names that differ between the two providers' language lists.
/// Each alias maps to the canonical name used by the registry.
pub const DISPLAY_ALIASES: &[(&str, &str)] = &[
    ("Mandarin Chinese", "Chinese (Simplified)"),
    ("Traditional Taiwan", "Chinese (Traditional)"),
    ("Burmese", "Myanmar (Burmese)"),
];

pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: supported_languages(),
        })
    }

    /// Look up a language by its provider code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Look up a language by canonical display name, case-insensitively.
    pub fn get_by_name(&self, name: &str) -> Option<&LanguageConfig> {
        self.languages
            .iter()
            .find(|lang| lang.name.eq_ignore_ascii_case(name))
    }

    /// All supported languages, in listing order.
    pub fn list_all(&self) -> &[LanguageConfig] {
        &self.languages
    }

    /// Resolve a display alias to its canonical name, if the input is one.
    pub fn remap_alias(name: &str) -> Option<&'static str> {
        DISPLAY_ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
            .map(|(_, canonical)| *canonical)
    }
}

/// The curated intersection of the two providers' language sets.
fn supported_languages() -> Vec<LanguageConfig> {
    macro_rules! lang {
        ($code:literal, $name:literal) => {
            LanguageConfig {
                code: $code,
                name: $name,
            }
        };
    }

    vec![
        lang!("af", "Afrikaans"),
        lang!("sq", "Albanian"),
        lang!("ar", "Arabic"),
        lang!("bn", "Bengali"),
        lang!("bs", "Bosnian"),
        lang!("ca", "Catalan"),
        lang!("zh-cn", "Chinese (Simplified)"),
        lang!("zh-tw", "Chinese (Traditional)"),
        lang!("hr", "Croatian"),
        lang!("cs", "Czech"),
        lang!("da", "Danish"),
        lang!("nl", "Dutch"),
        lang!("en", "English"),
        lang!("et", "Estonian"),
        lang!("tl", "Filipino"),
        lang!("fi", "Finnish"),
        lang!("fr", "French"),
        lang!("de", "German"),
        lang!("el", "Greek"),
        lang!("gu", "Gujarati"),
        lang!("hi", "Hindi"),
        lang!("hu", "Hungarian"),
        lang!("is", "Icelandic"),
        lang!("id", "Indonesian"),
        lang!("it", "Italian"),
        lang!("ja", "Japanese"),
        lang!("jw", "Javanese"),
        lang!("kn", "Kannada"),
        lang!("km", "Khmer"),
        lang!("ko", "Korean"),
        lang!("la", "Latin"),
        lang!("lv", "Latvian"),
        lang!("ml", "Malayalam"),
        lang!("ms", "Malay"),
        lang!("mr", "Marathi"),
        lang!("my", "Myanmar (Burmese)"),
        lang!("ne", "Nepali"),
        lang!("no", "Norwegian"),
        lang!("pl", "Polish"),
        lang!("pt", "Portuguese"),
        lang!("ro", "Romanian"),
        lang!("ru", "Russian"),
        lang!("sr", "Serbian"),
        lang!("si", "Sinhala"),
        lang!("sk", "Slovak"),
        lang!("es", "Spanish"),
        lang!("su", "Sundanese"),
        lang!("sw", "Swahili"),
        lang!("sv", "Swedish"),
        lang!("ta", "Tamil"),
        lang!("te", "Telugu"),
        lang!("th", "Thai"),
        lang!("tr", "Turkish"),
        lang!("uk", "Ukrainian"),
        lang!("ur", "Urdu"),
        lang!("vi", "Vietnamese"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_spanish() {
        let registry = LanguageRegistry::get();
        let config = registry.get_by_code("es").expect("Spanish should exist");

        assert_eq!(config.code, "es");
        assert_eq!(config.name, "Spanish");
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        let registry = LanguageRegistry::get();
        assert!(registry.get_by_code("xx").is_none());
    }

    #[test]
    fn test_get_by_name_case_insensitive() {
        let registry = LanguageRegistry::get();

        assert!(registry.get_by_name("spanish").is_some());
        assert!(registry.get_by_name("SPANISH").is_some());
        assert!(registry.get_by_name("Spanish").is_some());
        assert_eq!(registry.get_by_name("spanish").unwrap().code, "es");
    }

    #[test]
    fn test_get_by_name_parenthesized() {
        let registry = LanguageRegistry::get();
        let config = registry
            .get_by_name("chinese (simplified)")
            .expect("Simplified Chinese should exist");
        assert_eq!(config.code, "zh-cn");
    }

    #[test]
    fn test_list_all_nonempty_and_has_codes() {
        let registry = LanguageRegistry::get();
        let all = registry.list_all();

        assert!(all.len() > 30);
        assert!(all.iter().all(|lang| !lang.code.is_empty()));
        assert!(all.iter().any(|lang| lang.code == "en"));
        assert!(all.iter().any(|lang| lang.code == "es"));
    }

    #[test]
    fn test_codes_are_unique() {
        let registry = LanguageRegistry::get();
        let all = registry.list_all();

        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.code, b.code, "duplicate code {}", a.code);
                assert_ne!(a.name, b.name, "duplicate name {}", a.name);
            }
        }
    }

    #[test]
    fn test_every_alias_resolves_to_registry_entry() {
        let registry = LanguageRegistry::get();

        for (alias, canonical) in DISPLAY_ALIASES {
            let resolved = LanguageRegistry::remap_alias(alias)
                .unwrap_or_else(|| panic!("alias {} should remap", alias));
            assert_eq!(resolved, *canonical);
            assert!(
                registry.get_by_name(resolved).is_some(),
                "canonical name {} should be in the registry",
                resolved
            );
        }
    }

    #[test]
    fn test_alias_remap_documented_targets() {
        assert_eq!(
            LanguageRegistry::remap_alias("Mandarin Chinese"),
            Some("Chinese (Simplified)")
        );
        assert_eq!(
            LanguageRegistry::remap_alias("Traditional Taiwan"),
            Some("Chinese (Traditional)")
        );
        assert_eq!(
            LanguageRegistry::remap_alias("Burmese"),
            Some("Myanmar (Burmese)")
        );
    }

    #[test]
    fn test_alias_remap_is_case_insensitive() {
        assert_eq!(
            LanguageRegistry::remap_alias("mandarin chinese"),
            Some("Chinese (Simplified)")
        );
        assert_eq!(LanguageRegistry::remap_alias("French"), None);
    }
}
