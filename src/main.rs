mod app;
mod lexicon;
mod locale;

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;

use crate::locale::{DEFAULT_LOCALE, LocaleProvider};

/// Bubble chart of words shared across South Asian languages.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON dataset to load instead of the built-in word list.
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Initial UI locale.
    #[arg(long, default_value = DEFAULT_LOCALE)]
    locale: String,

    /// Directory that receives exported selections.
    #[arg(long, default_value = ".")]
    export_dir: PathBuf,

    /// Seed for the initial bubble placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Extra font files, e.g. for Devanagari or Nastaliq glyphs.
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let locale = LocaleProvider::builtin(&args.locale).unwrap_or_else(|error| {
        log::warn!("built-in locales unavailable: {error:#}");
        LocaleProvider::new(HashMap::new(), &args.locale)
    });
    let config = app::AppConfig {
        dataset: args.dataset,
        export_dir: args.export_dir,
        seed: args.seed,
        fonts: args.fonts,
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Shared Words",
        options,
        Box::new(move |cc| Ok(Box::new(app::SharedWordsApp::new(cc, config, locale)))),
    )
}
