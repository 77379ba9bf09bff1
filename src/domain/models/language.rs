#[cfg(test)]
#[path = "language_test.rs"]
mod tests;

use std::path::Path;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumIter,
    EnumVariantNames,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    Javascript,
    Typescript,
    Python,
    Java,
    Cpp,
    Go,
    Rust,
    #[default]
    Other,
}

impl Language {
    pub fn parse(text: &str) -> Option<Language> {
        return Language::iter().find(|e| return e.to_string() == text);
    }

    /// Infers the language from a file extension, falling back to `Other`.
    pub fn from_path(path: &Path) -> Language {
        let ext = path
            .extension()
            .map(|e| return e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "js" | "mjs" | "cjs" | "jsx" => return Language::Javascript,
            "ts" | "mts" | "cts" | "tsx" => return Language::Typescript,
            "py" => return Language::Python,
            "java" => return Language::Java,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "h" => return Language::Cpp,
            "go" => return Language::Go,
            "rs" => return Language::Rust,
            _ => return Language::Other,
        }
    }
}
