//! Fluent bundle loading with lazy static initialization.

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::FluentResource;
use once_cell::sync::Lazy;
use rustmon_common::{Result, RustmonError};
use std::collections::HashMap;
use tracing::{debug, error};
use unic_langid::LanguageIdentifier;

/// Language used when a requested language has no bundle.
pub const FALLBACK_LANGUAGE: &str = "en-US";

/// Embedded locale sources.
const LOCALES: &[(&str, &str)] = &[
    ("en-US", include_str!("../locales/en-US.ftl")),
    ("de-DE", include_str!("../locales/de-DE.ftl")),
];

/// A thread-safe bundle for one language.
pub type Bundle = FluentBundle<FluentResource>;

/// All embedded bundles keyed by language tag.
pub static FLUENT_BUNDLES: Lazy<HashMap<&'static str, Bundle>> = Lazy::new(|| {
    LOCALES
        .iter()
        .filter_map(|(tag, source)| match FluentLoader::load_bundle(tag, source) {
            Ok(bundle) => {
                debug!(language = tag, "Loaded fluent bundle");
                Some((*tag, bundle))
            }
            Err(e) => {
                error!(language = tag, error = %e, "Failed to load fluent bundle");
                None
            }
        })
        .collect()
});

/// Fluent bundle loader.
pub struct FluentLoader;

impl FluentLoader {
    /// Builds a bundle for `language` from Fluent source text.
    pub fn load_bundle(language: &str, source: &str) -> Result<Bundle> {
        let langid: LanguageIdentifier = language
            .parse()
            .map_err(|e| RustmonError::config(format!("invalid language '{language}': {e}")))?;

        let resource = FluentResource::try_new(source.to_string()).map_err(|(_, errors)| {
            RustmonError::Serialization(format!("invalid fluent source for {language}: {errors:?}"))
        })?;

        let mut bundle = FluentBundle::new_concurrent(vec![langid]);
        // Discord renders the Unicode isolation marks literally
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).map_err(|errors| {
            RustmonError::Serialization(format!("conflicting messages for {language}: {errors:?}"))
        })?;

        Ok(bundle)
    }

    /// Languages with an embedded bundle.
    pub fn available_languages() -> Vec<&'static str> {
        let mut languages: Vec<_> = FLUENT_BUNDLES.keys().copied().collect();
        languages.sort_unstable();
        languages
    }

    /// Maps a requested language to an embedded one.
    ///
    /// Exact tags win, then a bundle with the same primary language subtag,
    /// then [`FALLBACK_LANGUAGE`].
    pub fn resolve_language(requested: &str) -> &'static str {
        if let Some((tag, _)) = FLUENT_BUNDLES.get_key_value(requested) {
            return *tag;
        }

        if let Ok(wanted) = requested.parse::<LanguageIdentifier>() {
            let same_language = LOCALES.iter().map(|(tag, _)| *tag).find(|tag| {
                tag.parse::<LanguageIdentifier>()
                    .is_ok_and(|candidate| candidate.language == wanted.language)
            });
            if let Some(tag) = same_language {
                return tag;
            }
        }

        FALLBACK_LANGUAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_embedded_bundles_load() {
        assert_eq!(FluentLoader::available_languages(), vec!["de-DE", "en-US"]);
    }

    #[test]
    fn test_resolve_language() {
        assert_eq!(FluentLoader::resolve_language("de-DE"), "de-DE");
        assert_eq!(FluentLoader::resolve_language("de"), "de-DE");
        assert_eq!(FluentLoader::resolve_language("en-GB"), "en-US");
        assert_eq!(FluentLoader::resolve_language("fr-FR"), FALLBACK_LANGUAGE);
        assert_eq!(FluentLoader::resolve_language("???"), FALLBACK_LANGUAGE);
    }

    #[test]
    fn test_invalid_source_is_rejected() {
        assert!(FluentLoader::load_bundle("en-US", "broken = { $").is_err());
        assert!(FluentLoader::load_bundle("not a tag!", "a = b").is_err());
    }
}
