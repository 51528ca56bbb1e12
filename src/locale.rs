use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::{Context, Result};

pub const DEFAULT_LOCALE: &str = "en";

const BUILTIN_LOCALES: &str = include_str!("../data/locales.json");

type Table = HashMap<String, String>;

/// Snapshot of the UI strings for one locale, falling back to the default
/// locale and then to the empty string.
#[derive(Clone, Debug, Default)]
pub struct Strings {
    code: String,
    primary: Option<Arc<Table>>,
    fallback: Option<Arc<Table>>,
}

impl Strings {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn get(&self, key: &str) -> &str {
        self.primary
            .as_ref()
            .and_then(|table| table.get(key))
            .or_else(|| self.fallback.as_ref().and_then(|table| table.get(key)))
            .map(String::as_str)
            .unwrap_or_else(|| {
                log::trace!("no translation for {key} in {}", self.code);
                ""
            })
    }
}

pub struct LocaleProvider {
    tables: HashMap<String, Arc<Table>>,
    current: String,
    snapshot: Strings,
    subscribers: Vec<Sender<Strings>>,
}

impl LocaleProvider {
    pub fn new(tables: HashMap<String, Table>, initial: &str) -> Self {
        let tables: HashMap<String, Arc<Table>> = tables
            .into_iter()
            .map(|(code, table)| (code, Arc::new(table)))
            .collect();
        let snapshot = build_strings(&tables, initial);
        Self {
            tables,
            current: initial.to_owned(),
            snapshot,
            subscribers: Vec::new(),
        }
    }

    pub fn builtin(initial: &str) -> Result<Self> {
        let tables: HashMap<String, Table> =
            serde_json::from_str(BUILTIN_LOCALES).context("built-in locale tables are malformed")?;
        Ok(Self::new(tables, initial))
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn available(&self) -> Vec<&str> {
        let mut codes = self.tables.keys().map(String::as_str).collect::<Vec<_>>();
        codes.sort_unstable();
        codes
    }

    /// The strings for the current locale. The snapshot is built once per
    /// locale change.
    pub fn strings(&self) -> Strings {
        self.snapshot.clone()
    }

    /// Returns a channel that receives a fresh [`Strings`] on every locale
    /// change.
    pub fn subscribe(&mut self) -> Receiver<Strings> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn set_locale(&mut self, code: &str) {
        if self.current == code {
            return;
        }

        self.current = code.to_owned();
        self.snapshot = build_strings(&self.tables, code);
        let strings = &self.snapshot;
        self.subscribers
            .retain(|subscriber| subscriber.send(strings.clone()).is_ok());
    }
}

fn build_strings(tables: &HashMap<String, Arc<Table>>, code: &str) -> Strings {
    let primary = tables.get(code).cloned();
    if primary.is_none() {
        log::debug!("locale {code} unavailable, falling back to {DEFAULT_LOCALE}");
    }

    Strings {
        code: code.to_owned(),
        primary,
        fallback: tables.get(DEFAULT_LOCALE).cloned(),
    }
}
