//! Message lookup and formatting.

use crate::loader::{FluentLoader, FLUENT_BUNDLES};
use fluent_bundle::FluentArgs;
use tracing::warn;

/// Message accessor for localized replies.
pub struct Messages;

impl Messages {
    /// Gets a localized message.
    pub fn get(key: &str, language: &str) -> String {
        Self::get_with_args(key, language, &[])
    }

    /// Gets a localized message with arguments.
    ///
    /// Unknown languages fall back to English; unknown keys render as the key.
    pub fn get_with_args(key: &str, language: &str, args: &[(&str, &str)]) -> String {
        let language = FluentLoader::resolve_language(language);
        let Some(bundle) = FLUENT_BUNDLES.get(language) else {
            warn!(language, "No fluent bundle available");
            return key.to_string();
        };

        let Some(pattern) = bundle.get_message(key).and_then(|message| message.value()) else {
            warn!(key, language, "Missing fluent message");
            return key.to_string();
        };

        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, *value);
        }

        let mut errors = Vec::new();
        let text = bundle.format_pattern(pattern, Some(&fluent_args), &mut errors);
        if !errors.is_empty() {
            warn!(key, language, ?errors, "Fluent formatting errors");
        }

        text.into_owned()
    }
}
