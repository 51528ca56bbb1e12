use eframe::egui::{self, Rect, Ui};

use super::super::ViewModel;
use super::super::scene::{BubbleShape, bubble_at};

impl ViewModel {
    /// Primary-button drags pin the grabbed bubble to the pointer until
    /// release.
    pub(in crate::app) fn handle_bubble_drag(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
        shapes: &[BubbleShape],
    ) {
        if response.drag_started_by(egui::PointerButton::Primary) {
            let press = ui.input(|input| input.pointer.press_origin());
            let grabbed = press
                .and_then(|pointer| bubble_at(shapes, pointer))
                .and_then(|shape| self.lexicon.entries().get(shape.entry_index))
                .map(|entry| entry.latin.clone());

            if let (Some(key), Some(pointer)) = (grabbed, response.interact_pointer_pos()) {
                self.simulation.begin_drag(&key, pointer - rect.min);
                self.dragging = Some(key);
            }
        }

        if response.dragged_by(egui::PointerButton::Primary)
            && let Some(key) = &self.dragging
            && let Some(pointer) = response.interact_pointer_pos()
        {
            self.simulation.pin(key, pointer - rect.min);
        }

        if response.drag_stopped()
            && let Some(key) = self.dragging.take()
        {
            self.simulation.end_drag(&key);
        }
    }

    pub(in crate::app) fn update_hover(&mut self, ui: &Ui, shapes: &[BubbleShape]) {
        if let Some(key) = &self.dragging {
            self.hovered = self
                .simulation
                .node_index(key)
                .map(|index| self.simulation.nodes()[index].entry_index);
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::Grabbing;
            });
            return;
        }

        self.hovered = ui
            .input(|input| input.pointer.hover_pos())
            .and_then(|pointer| bubble_at(shapes, pointer))
            .map(|shape| shape.entry_index);

        if self.hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }
    }
}
