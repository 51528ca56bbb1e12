use eframe::egui::{self, Ui};

use crate::lexicon::{Language, ScriptMode};

use super::super::ViewModel;

impl ViewModel {
    fn script_label(&self, script: ScriptMode) -> &str {
        match script {
            ScriptMode::Canonical => self.strings.get("canonical"),
            ScriptMode::Native(language) => self.strings.get(language.locale_key()),
        }
    }

    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading(self.strings.get("search"));
        ui.separator();
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            let search_response = ui.add(
                egui::TextEdit::singleline(&mut self.search)
                    .hint_text(self.strings.get("search_hint"))
                    .desired_width(180.0),
            );
            if search_response.changed() {
                self.filter_dirty = true;
            }
            if ui
                .add_enabled(!self.search.is_empty(), egui::Button::new(self.strings.get("clear")))
                .clicked()
            {
                self.search.clear();
                self.filter_dirty = true;
            }
        });

        ui.add_space(8.0);
        ui.label(self.strings.get("filter_languages"));
        ui.horizontal_wrapped(|ui| {
            for language in Language::ALL {
                let selected = self.selection.contains(language);
                if ui
                    .selectable_label(selected, self.strings.get(language.locale_key()))
                    .clicked()
                {
                    self.selection.toggle(language);
                }
            }
        });
        if ui
            .add_enabled(
                !self.selection.is_empty(),
                egui::Button::new(self.strings.get("clear")),
            )
            .clicked()
        {
            self.selection.clear();
        }

        ui.add_space(8.0);
        ui.label(self.strings.get("display_script"));
        let mut script = self.script;
        egui::ComboBox::from_id_salt("display_script")
            .selected_text(self.script_label(script).to_owned())
            .show_ui(ui, |ui| {
                ui.selectable_value(
                    &mut script,
                    ScriptMode::Canonical,
                    self.script_label(ScriptMode::Canonical).to_owned(),
                );
                for language in Language::ALL {
                    let option = ScriptMode::Native(language);
                    ui.selectable_value(&mut script, option, self.script_label(option).to_owned());
                }
            });
        self.script = script;

        ui.separator();

        let mut live = !self.simulation.is_stopped();
        if ui
            .checkbox(&mut live, self.strings.get("live_layout"))
            .changed()
        {
            if live {
                self.simulation.resume();
            } else {
                self.simulation.stop();
            }
        }

        if ui.button(self.strings.get("shuffle")).clicked()
            && let Some(bounds) = self.simulation.bounds()
        {
            self.simulation.reseed(bounds);
            self.dragging = None;
        }

        ui.weak(format!(
            "{:?} · α {:.2}",
            self.simulation.phase(),
            self.simulation.alpha()
        ));
    }
}
