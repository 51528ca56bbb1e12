use std::collections::BTreeSet;

use super::entry::{Language, LexicalEntry};

/// Which script bubble labels are drawn in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScriptMode {
    #[default]
    Canonical,
    Native(Language),
}

impl ScriptMode {
    pub fn label_for<'a>(self, entry: &'a LexicalEntry) -> &'a str {
        match self {
            Self::Canonical => entry.latin.as_str(),
            Self::Native(language) => entry.form(language).unwrap_or(entry.latin.as_str()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LanguageSelection {
    selected: BTreeSet<Language>,
}

impl LanguageSelection {
    pub fn toggle(&mut self, language: Language) {
        if !self.selected.remove(&language) {
            self.selected.insert(language);
        }
    }

    pub fn contains(&self, language: Language) -> bool {
        self.selected.contains(&language)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Language> + '_ {
        self.selected.iter().copied()
    }
}

/// An entry is active when it has a form for every selected language.
pub fn is_active(entry: &LexicalEntry, selection: &LanguageSelection) -> bool {
    selection.iter().all(|language| entry.langs.contains_key(&language))
}

/// Indices of the entries whose key, gloss or forms contain `query`, in
/// dataset order.
pub fn filter_entries(entries: &[LexicalEntry], query: &str) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return (0..entries.len()).collect();
    }

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| haystack(entry).contains(&needle).then_some(index))
        .collect()
}

fn haystack(entry: &LexicalEntry) -> String {
    let mut text = String::with_capacity(entry.latin.len() + entry.gloss.len() + 32);
    text.push_str(&entry.latin);
    text.push(' ');
    text.push_str(&entry.gloss);
    for form in entry.langs.values() {
        text.push(' ');
        text.push_str(form);
    }
    text.to_lowercase()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;

    use super::*;

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
            entry(
                "pāter",
                "father",
                &[(Language::Hindi, "pitā"), (Language::Urdu, "pitar")],
            ),
            entry("nām", "name", &[(Language::Hindi, "नाम"), (Language::Urdu, "نام")]),
            entry("ṛta", "cosmic order", &[(Language::Sanskrit, "ऋत")]),
        ]
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let entries = sample();
        assert_eq!(filter_entries(&entries, ""), vec![0, 1, 2]);
        assert_eq!(filter_entries(&entries, "   "), vec![0, 1, 2]);
    }

    #[test]
    fn gloss_substring_matches() {
        let entries = sample();
        assert_eq!(filter_entries(&entries, "fath"), vec![0]);
        assert!(filter_entries(&entries, "xyz").is_empty());
    }

    #[test]
    fn query_is_trimmed_and_case_insensitive() {
        let entries = sample();
        assert_eq!(filter_entries(&entries, "  FATHER "), vec![0]);
        assert_eq!(filter_entries(&entries, "PITAR"), vec![0]);
    }

    #[test]
    fn native_forms_are_searchable() {
        let entries = sample();
        assert_eq!(filter_entries(&entries, "नाम"), vec![1]);
        assert_eq!(filter_entries(&entries, "ऋत"), vec![2]);
    }

    #[test]
    fn empty_selection_activates_everything() {
        let selection = LanguageSelection::default();
        assert!(sample().iter().all(|entry| is_active(entry, &selection)));
    }

    #[test]
    fn missing_language_makes_entry_inactive() {
        let entries = sample();
        let mut selection = LanguageSelection::default();
        selection.toggle(Language::Hindi);

        assert!(is_active(&entries[0], &selection));
        assert!(!is_active(&entries[2], &selection));
    }

    #[test]
    fn toggling_off_restores_membership() {
        let entries = sample();
        let mut selection = LanguageSelection::default();
        let before = entries
            .iter()
            .map(|entry| is_active(entry, &selection))
            .collect::<Vec<_>>();

        selection.toggle(Language::Urdu);
        assert!(!is_active(&entries[2], &selection));
        selection.toggle(Language::Urdu);

        let after = entries
            .iter()
            .map(|entry| is_active(entry, &selection))
            .collect::<Vec<_>>();
        assert_eq!(before, after);
        assert!(selection.is_empty());
    }

    #[test]
    fn script_label_falls_back_to_canonical() {
        let entries = sample();
        let hindi = ScriptMode::Native(Language::Hindi);
        assert_eq!(hindi.label_for(&entries[1]), "नाम");
        assert_eq!(hindi.label_for(&entries[2]), "ṛta");
        assert_eq!(ScriptMode::Canonical.label_for(&entries[1]), "nām");
    }

    proptest! {
        #[test]
        fn filtering_is_idempotent(query in "[a-zāī ]{0,4}") {
            let entries = sample();
            let first = filter_entries(&entries, &query);
            let subset = first.iter().map(|&index| entries[index].clone()).collect::<Vec<_>>();
            let second = filter_entries(&subset, &query);
            prop_assert_eq!(second, (0..subset.len()).collect::<Vec<_>>());
        }
    }
}
