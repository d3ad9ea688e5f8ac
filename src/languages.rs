use once_cell::sync::Lazy;
use serde::Deserialize;

/// A language and the file suffixes that identify it.
#[derive(Debug, Deserialize)]
pub struct Language {
    pub name: String,
    pub extensions: Vec<String>,
}

static LANGUAGES: Lazy<Vec<Language>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../data/languages.json"))
        .expect("embedded language table is valid JSON")
});

/// Extensions for a language name, compared case-insensitively.
/// `None` for a language the table does not know.
pub fn extensions_for(language: &str) -> Option<&'static [String]> {
    let wanted = language.trim().to_lowercase();
    LANGUAGES
        .iter()
        .find(|l| l.name.to_lowercase() == wanted)
        .map(|l| l.extensions.as_slice())
}
