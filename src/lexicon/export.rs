use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use super::entry::LexicalEntry;
use super::filter::{LanguageSelection, is_active};

pub const EXPORT_FILE_NAME: &str = "shared_words.json";

/// Receives exported artifacts from the view. The host decides where the
/// bytes end up.
pub trait ArtifactSink {
    /// Stores `bytes` under a name derived from `suggested_name` and returns a
    /// human-readable location.
    fn deliver(&mut self, suggested_name: &str, bytes: &[u8]) -> Result<String>;
}

pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ArtifactSink for DirectorySink {
    fn deliver(&mut self, suggested_name: &str, bytes: &[u8]) -> Result<String> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create export directory {}", self.dir.display()))?;
        let path = self.dir.join(suggested_name);
        fs::write(&path, bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path.display().to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportReport {
    pub entry_count: usize,
    pub location: String,
}

/// Writes the entries that pass both the search filter (`visible`) and the
/// language selection as pretty-printed JSON.
pub fn export_active(
    entries: &[LexicalEntry],
    visible: &[usize],
    selection: &LanguageSelection,
    sink: &mut dyn ArtifactSink,
) -> Result<ExportReport> {
    let active = visible
        .iter()
        .filter_map(|&index| entries.get(index))
        .filter(|entry| is_active(entry, selection))
        .collect::<Vec<_>>();

    let bytes = serde_json::to_vec_pretty(&active).context("failed to serialize shared words")?;
    let location = sink.deliver(EXPORT_FILE_NAME, &bytes)?;
    log::info!("exported {} shared words to {location}", active.len());

    Ok(ExportReport {
        entry_count: active.len(),
        location,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::lexicon::{Language, filter_entries};

    #[derive(Default)]
    struct MemorySink {
        name: String,
        bytes: Vec<u8>,
    }

    impl ArtifactSink for MemorySink {
        fn deliver(&mut self, suggested_name: &str, bytes: &[u8]) -> Result<String> {
            self.name = suggested_name.to_owned();
            self.bytes = bytes.to_vec();
            Ok(format!("memory:{suggested_name}"))
        }
    }

    fn entry(latin: &str, gloss: &str, langs: &[(Language, &str)]) -> LexicalEntry {
        LexicalEntry {
            latin: latin.to_owned(),
            gloss: gloss.to_owned(),
            langs: langs
                .iter()
                .map(|(language, form)| (*language, (*form).to_owned()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn sample() -> Vec<LexicalEntry> {
        vec![
            entry("pitā", "father", &[(Language::Hindi, "पिता"), (Language::Nepali, "पिता")]),
            entry("dil", "heart", &[(Language::Hindi, "दिल"), (Language::Urdu, "دل")]),
            entry("ṛta", "cosmic order", &[(Language::Sanskrit, "ऋत")]),
            entry("din", "day", &[(Language::Hindi, "दिन"), (Language::Urdu, "دن")]),
        ]
    }

    #[test]
    fn export_round_trips_the_active_subset() {
        let entries = sample();
        let visible = filter_entries(&entries, "d");
        let mut selection = LanguageSelection::default();
        selection.toggle(Language::Urdu);

        let mut sink = MemorySink::default();
        let report = export_active(&entries, &visible, &selection, &mut sink).unwrap();

        let parsed: Vec<LexicalEntry> = serde_json::from_slice(&sink.bytes).unwrap();
        let expected = visible
            .iter()
            .map(|&index| entries[index].clone())
            .filter(|entry| is_active(entry, &selection))
            .collect::<Vec<_>>();

        assert_eq!(sink.name, EXPORT_FILE_NAME);
        assert_eq!(parsed, expected);
        assert_eq!(report.entry_count, 2);
        assert_eq!(
            parsed.iter().map(|entry| entry.latin.as_str()).collect::<Vec<_>>(),
            vec!["dil", "din"]
        );
    }

    #[test]
    fn export_is_pretty_printed_records() {
        let entries = sample();
        let visible = vec![2];
        let mut sink = MemorySink::default();
        export_active(&entries, &visible, &LanguageSelection::default(), &mut sink).unwrap();

        let text = String::from_utf8(sink.bytes).unwrap();
        assert!(text.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["latin"], "ṛta");
        assert_eq!(value[0]["langs"]["sanskrit"], "ऋत");
    }

    #[test]
    fn empty_active_set_exports_empty_array() {
        let entries = sample();
        let mut selection = LanguageSelection::default();
        selection.toggle(Language::Marathi);
        let mut sink = MemorySink::default();
        let report = export_active(&entries, &[0, 1, 2, 3], &selection, &mut sink).unwrap();

        let parsed: Vec<LexicalEntry> = serde_json::from_slice(&sink.bytes).unwrap();
        assert!(parsed.is_empty());
        assert_eq!(report.entry_count, 0);
    }
}
