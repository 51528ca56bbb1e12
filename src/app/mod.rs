use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use eframe::egui::{self, Context};

use crate::lexicon::{
    ArtifactSink, ExportReport, LanguageSelection, Lexicon, ScriptMode, load_lexicon,
};
use crate::locale::{LocaleProvider, Strings};

mod graph;
mod physics;
mod render_utils;
mod scene;
mod ui;

use physics::Simulation;

/// Startup settings, taken from the command line.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub dataset: Option<PathBuf>,
    pub export_dir: PathBuf,
    pub seed: Option<u64>,
    pub fonts: Vec<PathBuf>,
}

pub struct SharedWordsApp {
    config: AppConfig,
    locale: LocaleProvider,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Lexicon, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    lexicon: Lexicon,
    strings: Strings,
    locale_rx: Receiver<Strings>,
    search: String,
    selection: LanguageSelection,
    script: ScriptMode,
    visible: Vec<usize>,
    filter_dirty: bool,
    simulation: Simulation,
    hovered: Option<usize>,
    glossary_hovered: Option<usize>,
    dragging: Option<String>,
    sink: Box<dyn ArtifactSink>,
    last_export: Option<Result<ExportReport, String>>,
}

impl SharedWordsApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig, locale: LocaleProvider) -> Self {
        install_fonts(&cc.egui_ctx, &config.fonts);
        let state = Self::start_load(config.dataset.clone());
        Self {
            config,
            locale,
            state,
        }
    }

    fn start_load(dataset: Option<PathBuf>) -> AppState {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_lexicon(dataset.as_deref()).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        AppState::Loading { rx }
    }

    fn ready(&mut self, lexicon: Lexicon) -> AppState {
        let sink = Box::new(crate::lexicon::DirectorySink::new(
            self.config.export_dir.clone(),
        ));
        AppState::Ready(Box::new(ViewModel::new(
            lexicon,
            self.locale.strings(),
            self.locale.subscribe(),
            sink,
            self.config.seed,
        )))
    }
}

impl eframe::App for SharedWordsApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;
        let strings = self.locale.strings();

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(result);
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading(strings.get("loading"));
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(error) => {
                let mut retry = false;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading(strings.get("load_failed"));
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    retry = ui.button(strings.get("retry")).clicked();
                });
                if retry {
                    self.state = Self::start_load(self.config.dataset.clone());
                }
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                model.show(ctx, &mut self.locale, &mut reload_requested);
                if reload_requested {
                    model.simulation.stop();
                    self.state = Self::start_load(self.config.dataset.clone());
                }
            }
        }

        if let Some(result) = transition {
            self.state = match result {
                Ok(lexicon) => self.ready(lexicon),
                Err(error) => AppState::Error(error),
            };
        }
    }
}

fn install_fonts(ctx: &Context, paths: &[PathBuf]) {
    if paths.is_empty() {
        return;
    }

    let mut fonts = egui::FontDefinitions::default();
    let mut installed = 0usize;
    for path in paths {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(error) => {
                log::warn!("skipping font {}: {error}", path.display());
                continue;
            }
        };

        let name = format!("extra-{}", path.display());
        fonts
            .font_data
            .insert(name.clone(), Arc::new(egui::FontData::from_owned(data)));
        for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
            fonts.families.entry(family).or_default().push(name.clone());
        }
        installed += 1;
    }

    if installed > 0 {
        ctx.set_fonts(fonts);
    }
}
