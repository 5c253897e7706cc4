//! Build script for rustmon-i18n.
//!
//! Validates every Fluent locale file at compile time: each file must parse
//! and every locale must define the same message keys as the fallback.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::process;

use fluent_syntax::ast::Entry;
use fluent_syntax::parser::parse;

const LOCALES_DIR: &str = "locales";
const FALLBACK: &str = "en-US";

fn message_keys(path: &Path) -> Result<BTreeSet<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let resource = parse(content.as_str())
        .map_err(|(_, errors)| format!("Parse errors in {}: {:?}", path.display(), errors))?;

    Ok(resource
        .body
        .iter()
        .filter_map(|entry| match entry {
            Entry::Message(message) => Some(message.id.name.to_string()),
            _ => None,
        })
        .collect())
}

fn main() {
    println!("cargo:rerun-if-changed={LOCALES_DIR}");

    let mut locales = Vec::new();
    let entries = match fs::read_dir(LOCALES_DIR) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("error: cannot read {LOCALES_DIR}: {e}");
            process::exit(1);
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("ftl") {
            continue;
        }
        println!("cargo:rerun-if-changed={}", path.display());

        let Some(name) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };
        match message_keys(&path) {
            Ok(keys) => locales.push((name, keys)),
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        }
    }

    let Some((_, reference)) = locales.iter().find(|(name, _)| name == FALLBACK) else {
        eprintln!("error: fallback locale {FALLBACK}.ftl is missing");
        process::exit(1);
    };

    for (name, keys) in &locales {
        let missing: Vec<_> = reference.difference(keys).collect();
        let extra: Vec<_> = keys.difference(reference).collect();
        if !missing.is_empty() || !extra.is_empty() {
            eprintln!("error: locale {name} is out of sync with {FALLBACK}: missing {missing:?}, extra {extra:?}");
            process::exit(1);
        }
    }
}
