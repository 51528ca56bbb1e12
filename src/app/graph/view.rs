use eframe::egui::{
    Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Stroke, StrokeKind, Ui, vec2,
};

use crate::lexicon::is_active;

use super::super::ViewModel;
use super::super::render_utils::{draw_background, tooltip_rect};
use super::super::scene::{BubbleShape, EntryCard, build_scene};

const TOOLTIP_PADDING: f32 = 8.0;
const TOOLTIP_MAX_WIDTH: f32 = 260.0;

fn paint_bubble(painter: &Painter, shape: &BubbleShape) {
    painter.circle_filled(shape.center, shape.glow_radius, shape.glow);
    painter.circle_filled(shape.center, shape.radius, shape.fill);
    painter.text(
        shape.center,
        Align2::CENTER_CENTER,
        shape.label.as_str(),
        FontId::proportional(shape.font_size),
        shape.label_color,
    );
}

fn paint_tooltip(painter: &Painter, viewport: Rect, pointer: Pos2, text: String) {
    let galley = painter.layout(
        text,
        FontId::proportional(13.0),
        Color32::from_gray(238),
        TOOLTIP_MAX_WIDTH,
    );
    let size = galley.size() + vec2(TOOLTIP_PADDING, TOOLTIP_PADDING) * 2.0;
    let rect = tooltip_rect(pointer, size, viewport);

    painter.rect_filled(rect, 6.0, Color32::from_rgba_unmultiplied(28, 32, 40, 235));
    painter.rect_stroke(
        rect,
        6.0,
        Stroke::new(1.0, Color32::from_rgba_unmultiplied(120, 130, 145, 160)),
        StrokeKind::Inside,
    );
    painter.galley(
        rect.min + vec2(TOOLTIP_PADDING, TOOLTIP_PADDING),
        galley,
        Color32::from_gray(238),
    );
}

impl ViewModel {
    fn chart_scene(&self, rect: Rect) -> Vec<BubbleShape> {
        let highlighted = self.hovered.or(self.glossary_hovered);
        build_scene(
            self.simulation.nodes(),
            self.lexicon.entries(),
            |entry| is_active(entry, &self.selection),
            self.script,
            rect,
            highlighted,
        )
    }

    pub(in crate::app) fn draw_chart(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);

        self.simulation.resize(rect.size());
        if self.simulation.bounds().is_none() {
            return;
        }

        if self.visible.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                self.strings.get("no_matches"),
                FontId::proportional(16.0),
                Color32::from_gray(190),
            );
            self.hovered = None;
            return;
        }

        let pre_step = self.chart_scene(rect);
        self.handle_bubble_drag(ui, rect, &response, &pre_step);

        let frame_delta_seconds = ui
            .ctx()
            .input(|input| input.stable_dt)
            .clamp(1.0 / 240.0, 1.0 / 20.0);
        let moving = self.simulation.step(frame_delta_seconds);
        if moving || self.dragging.is_some() {
            ui.ctx().request_repaint();
        }

        let shapes = self.chart_scene(rect);
        self.update_hover(ui, &shapes);

        for shape in &shapes {
            paint_bubble(&painter, shape);
        }

        if let Some(index) = self.hovered
            && let Some(entry) = self.lexicon.entries().get(index)
            && let Some(pointer) = ui.input(|input| input.pointer.hover_pos())
        {
            let card = EntryCard::new(entry, &self.strings);
            paint_tooltip(&painter, rect, pointer, card.to_text());
        }
    }
}
