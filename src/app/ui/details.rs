use eframe::egui::{self, Color32, RichText, Ui};

use crate::lexicon::{Language, export_active};

use super::super::ViewModel;
use super::super::scene::EntryCard;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading(self.strings.get("summary"));
        ui.separator();

        ui.label(format!("{}: {}", self.strings.get("visible"), self.visible.len()));
        ui.label(format!("{}: {}", self.strings.get("active"), self.active_count()));
        egui::Grid::new("language_counts")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                for language in Language::ALL {
                    ui.label(self.strings.get(language.locale_key()));
                    ui.label(self.language_count(language).to_string());
                    ui.end_row();
                }
            });

        ui.add_space(6.0);
        if ui.button(self.strings.get("export")).clicked() {
            self.export();
        }
        match &self.last_export {
            Some(Ok(report)) => {
                ui.small(format!(
                    "{} {} ({})",
                    self.strings.get("exported_to"),
                    report.location,
                    report.entry_count
                ));
            }
            Some(Err(error)) => {
                ui.colored_label(
                    Color32::from_rgb(235, 110, 100),
                    format!("{}: {error}", self.strings.get("export_failed")),
                );
            }
            None => {}
        }

        ui.separator();
        self.draw_hover_card(ui);

        ui.separator();
        ui.label(RichText::new(self.strings.get("glossary")).strong());
        self.draw_glossary(ui);
    }

    fn export(&mut self) {
        let result = export_active(
            self.lexicon.entries(),
            &self.visible,
            &self.selection,
            self.sink.as_mut(),
        );
        self.last_export = Some(result.map_err(|error| {
            log::error!("export failed: {error:#}");
            format!("{error:#}")
        }));
    }

    fn draw_hover_card(&self, ui: &mut Ui) {
        let Some(entry) = self
            .hovered
            .or(self.glossary_hovered)
            .and_then(|index| self.lexicon.entries().get(index))
        else {
            ui.label(self.strings.get("hover_hint"));
            return;
        };

        let card = EntryCard::new(entry, &self.strings);
        ui.label(RichText::new(card.title.as_str()).strong());
        for (language, form) in &card.forms {
            ui.label(format!("{language}: {form}"));
        }
        ui.small(card.shared_by.as_str());
    }

    fn draw_glossary(&mut self, ui: &mut Ui) {
        let mut hovered_row = None;

        egui::ScrollArea::vertical()
            .id_salt("glossary_scroll")
            .auto_shrink([false, false])
            .show_rows(
                ui,
                Self::GLOSSARY_ROW_HEIGHT,
                self.visible.len(),
                |ui, row_range| {
                    for row in row_range {
                        let Some(&index) = self.visible.get(row) else {
                            continue;
                        };
                        let Some(entry) = self.lexicon.entries().get(index) else {
                            continue;
                        };

                        let mut text = RichText::new(format!("{} — {}", entry.latin, entry.gloss));
                        if !self.entry_active(index) {
                            text = text.weak();
                        }
                        if self.hovered == Some(index) {
                            text = text.strong();
                        }

                        if ui.label(text).hovered() {
                            hovered_row = Some(index);
                        }
                    }
                },
            );

        self.glossary_hovered = hovered_row;
    }
}
