mod entry;
mod export;
mod filter;
mod load;

pub use entry::{Language, LexicalEntry};
pub use export::{ArtifactSink, DirectorySink, ExportReport, export_active};
pub use filter::{LanguageSelection, ScriptMode, filter_entries, is_active};
pub use load::{Lexicon, load_lexicon};
