use std::sync::mpsc::Receiver;

use eframe::egui::{self, Align, Context, Layout};

use crate::lexicon::{ArtifactSink, LanguageSelection, Lexicon, ScriptMode};
use crate::locale::{LocaleProvider, Strings};

use super::super::physics::{Simulation, SimulationConfig};
use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) const GLOSSARY_ROW_HEIGHT: f32 = 20.0;

    pub(in crate::app) fn new(
        lexicon: Lexicon,
        strings: Strings,
        locale_rx: Receiver<Strings>,
        sink: Box<dyn ArtifactSink>,
        seed: Option<u64>,
    ) -> Self {
        Self {
            lexicon,
            strings,
            locale_rx,
            search: String::new(),
            selection: LanguageSelection::default(),
            script: ScriptMode::Canonical,
            visible: Vec::new(),
            filter_dirty: true,
            simulation: Simulation::new(SimulationConfig::default(), seed),
            hovered: None,
            glossary_hovered: None,
            dragging: None,
            sink,
            last_export: None,
        }
    }

    fn poll_locale(&mut self) {
        while let Ok(strings) = self.locale_rx.try_recv() {
            log::debug!("switched UI strings to {}", strings.code());
            self.strings = strings;
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        locale: &mut LocaleProvider,
        reload_requested: &mut bool,
    ) {
        self.poll_locale();
        if self.filter_dirty {
            self.rebuild_visible();
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(self.strings.get("title"));
                    ui.separator();
                    ui.label(self.strings.get("subtitle"));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button(self.strings.get("reload")).clicked() {
                            *reload_requested = true;
                        }

                        let mut current = locale.current().to_owned();
                        egui::ComboBox::from_id_salt("locale")
                            .selected_text(current.as_str())
                            .show_ui(ui, |ui| {
                                for code in locale.available() {
                                    ui.selectable_value(&mut current, code.to_owned(), code);
                                }
                            });
                        ui.label(self.strings.get("locale"));
                        if current != locale.current() {
                            locale.set_locale(&current);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_chart(ui));
    }
}
