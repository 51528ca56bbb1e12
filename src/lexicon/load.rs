use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::entry::LexicalEntry;

const BUILTIN_DATASET: &str = include_str!("../../data/shared_words.json");

/// The immutable word list shown by the chart.
#[derive(Clone, Debug)]
pub struct Lexicon {
    entries: Vec<LexicalEntry>,
}

impl Lexicon {
    pub fn from_entries(entries: Vec<LexicalEntry>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if entry.latin.trim().is_empty() {
                bail!("entry {index} has an empty canonical form");
            }
            if entry.langs.is_empty() {
                bail!("entry {index} ({}) lists no languages", entry.latin);
            }
            if !seen.insert(entry.latin.as_str()) {
                bail!("canonical form {} appears more than once", entry.latin);
            }
        }

        Ok(Self { entries })
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let entries: Vec<LexicalEntry> =
            serde_json::from_str(raw).context("invalid word list JSON")?;
        Self::from_entries(entries)
    }

    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_DATASET).context("built-in word list is malformed")
    }

    pub fn entries(&self) -> &[LexicalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn load_lexicon(path: Option<&Path>) -> Result<Lexicon> {
    let lexicon = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read word list {}", path.display()))?;
            Lexicon::parse(&raw)
                .with_context(|| format!("failed to parse word list {}", path.display()))?
        }
        None => Lexicon::builtin()?,
    };

    if lexicon.is_empty() {
        log::warn!("word list is empty, the chart will have no bubbles");
    } else {
        log::info!("loaded {} shared words", lexicon.len());
    }
    Ok(lexicon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Language;

    #[test]
    fn builtin_dataset_is_valid() {
        let lexicon = Lexicon::builtin().unwrap();
        assert!(!lexicon.is_empty());
        assert!(
            lexicon
                .entries()
                .iter()
                .all(|entry| !entry.langs.is_empty() && entry.language_count() <= 7)
        );
    }

    #[test]
    fn parses_records_in_order() {
        let raw = r#"[
            {"latin": "pāter", "gloss": "father", "langs": {"hindi": "pitā", "urdu": "pitar"}},
            {"latin": "nām", "gloss": "name", "langs": {"nepali": "नाम"}}
        ]"#;
        let lexicon = Lexicon::parse(raw).unwrap();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.entries()[0].latin, "pāter");
        assert_eq!(lexicon.entries()[0].form(Language::Urdu), Some("pitar"));
        assert_eq!(lexicon.entries()[1].form(Language::Nepali), Some("नाम"));
    }

    #[test]
    fn empty_word_list_parses_as_empty() {
        let lexicon = Lexicon::parse("[]").unwrap();
        assert!(lexicon.is_empty());
        assert_eq!(lexicon.len(), 0);
    }

    #[test]
    fn rejects_entry_without_languages() {
        let raw = r#"[{"latin": "x", "gloss": "nothing", "langs": {}}]"#;
        assert!(Lexicon::parse(raw).is_err());
    }

    #[test]
    fn rejects_duplicate_canonical_forms() {
        let raw = r#"[
            {"latin": "ek", "gloss": "one", "langs": {"hindi": "एक"}},
            {"latin": "ek", "gloss": "one", "langs": {"nepali": "एक"}}
        ]"#;
        assert!(Lexicon::parse(raw).is_err());
    }

    #[test]
    fn rejects_unknown_language_codes() {
        let raw = r#"[{"latin": "pater", "gloss": "father", "langs": {"latin": "pater"}}]"#;
        assert!(Lexicon::parse(raw).is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let error = load_lexicon(Some(Path::new("/nonexistent/words.json"))).unwrap_err();
        assert!(format!("{error:#}").contains("/nonexistent/words.json"));
    }
}
