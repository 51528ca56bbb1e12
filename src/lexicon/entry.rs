use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const MIN_RADIUS: f32 = 24.0;
const MAX_RADIUS: f32 = 72.0;
const RADIUS_PER_LANGUAGE: f32 = 6.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Sanskrit,
    Hindi,
    Urdu,
    Bengali,
    Punjabi,
    Marathi,
    Nepali,
}

impl Language {
    pub const ALL: [Self; 7] = [
        Self::Sanskrit,
        Self::Hindi,
        Self::Urdu,
        Self::Bengali,
        Self::Punjabi,
        Self::Marathi,
        Self::Nepali,
    ];

    #[cfg(test)]
    pub fn code(self) -> &'static str {
        match self {
            Self::Sanskrit => "sanskrit",
            Self::Hindi => "hindi",
            Self::Urdu => "urdu",
            Self::Bengali => "bengali",
            Self::Punjabi => "punjabi",
            Self::Marathi => "marathi",
            Self::Nepali => "nepali",
        }
    }

    /// Translation key for the language's display name.
    pub fn locale_key(self) -> &'static str {
        match self {
            Self::Sanskrit => "lang.sanskrit",
            Self::Hindi => "lang.hindi",
            Self::Urdu => "lang.urdu",
            Self::Bengali => "lang.bengali",
            Self::Punjabi => "lang.punjabi",
            Self::Marathi => "lang.marathi",
            Self::Nepali => "lang.nepali",
        }
    }
}

/// One cognate set: a canonical Latin-script key, its meaning and the
/// word-forms of every language that shares it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalEntry {
    pub latin: String,
    pub gloss: String,
    pub langs: BTreeMap<Language, String>,
}

impl LexicalEntry {
    pub fn language_count(&self) -> usize {
        self.langs.len()
    }

    pub fn form(&self, language: Language) -> Option<&str> {
        self.langs.get(&language).map(String::as_str)
    }

    pub fn radius(&self) -> f32 {
        bubble_radius(self.language_count())
    }
}

pub fn bubble_radius(language_count: usize) -> f32 {
    (MIN_RADIUS + RADIUS_PER_LANGUAGE * language_count as f32).clamp(MIN_RADIUS, MAX_RADIUS)
}
