use eframe::egui::{Color32, Pos2, Rect};

use crate::lexicon::{Language, LexicalEntry, ScriptMode};
use crate::locale::Strings;

use super::physics::{BubbleNode, clamp_center};
use super::render_utils::{
    INACTIVE_OPACITY, blend_color, label_font_size, language_color, with_opacity,
};

const GLOW_SPREAD: f32 = 6.0;
const HIGHLIGHT_COLOR: Color32 = Color32::from_rgb(255, 164, 101);

#[derive(Clone, Debug, PartialEq)]
pub(super) struct BubbleShape {
    pub entry_index: usize,
    pub center: Pos2,
    pub radius: f32,
    pub glow_radius: f32,
    pub fill: Color32,
    pub glow: Color32,
    pub label: String,
    pub label_color: Color32,
    pub font_size: f32,
    pub opacity: f32,
    pub active: bool,
}

/// Turns the simulated nodes into drawable bubbles, smallest first so the
/// widely shared words paint on top. Centers are clamped into `viewport`.
pub(super) fn build_scene(
    nodes: &[BubbleNode],
    entries: &[LexicalEntry],
    is_active: impl Fn(&LexicalEntry) -> bool,
    script: ScriptMode,
    viewport: Rect,
    highlighted: Option<usize>,
) -> Vec<BubbleShape> {
    let mut shapes = nodes
        .iter()
        .filter_map(|node| {
            let entry = entries.get(node.entry_index)?;
            let active = is_active(entry);
            let opacity = if active { 1.0 } else { INACTIVE_OPACITY };

            let base = language_color(entry.language_count());
            let base = if highlighted == Some(node.entry_index) {
                blend_color(base, HIGHLIGHT_COLOR, 0.65)
            } else {
                base
            };

            let center = viewport.min + clamp_center(node.position, node.radius, viewport.size());
            Some(BubbleShape {
                entry_index: node.entry_index,
                center,
                radius: node.radius,
                glow_radius: node.radius + GLOW_SPREAD,
                fill: with_opacity(base, opacity * 0.92),
                glow: with_opacity(base, opacity * 0.22),
                label: script.label_for(entry).to_owned(),
                label_color: with_opacity(Color32::from_gray(245), opacity),
                font_size: label_font_size(node.radius),
                opacity,
                active,
            })
        })
        .collect::<Vec<_>>();

    shapes.sort_by(|a, b| a.radius.total_cmp(&b.radius));
    shapes
}

/// The bubble under `pointer`, preferring the one whose center is nearest.
pub(super) fn bubble_at(shapes: &[BubbleShape], pointer: Pos2) -> Option<&BubbleShape> {
    shapes
        .iter()
        .filter_map(|shape| {
            let distance = shape.center.distance(pointer);
            (distance <= shape.radius).then_some((shape, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(shape, _)| shape)
}

/// Text shared by the hover tooltip and the side panel's hover card.
pub(super) struct EntryCard {
    pub title: String,
    pub forms: Vec<(String, String)>,
    pub shared_by: String,
}

impl EntryCard {
    pub(super) fn new(entry: &LexicalEntry, strings: &Strings) -> Self {
        let forms = Language::ALL
            .iter()
            .filter_map(|language| {
                entry
                    .form(*language)
                    .map(|form| (strings.get(language.locale_key()).to_owned(), form.to_owned()))
            })
            .collect();

        Self {
            title: format!("{} · {}", entry.latin, entry.gloss),
            forms,
            shared_by: format!(
                "{} {} {}",
                strings.get("shared_by"),
                entry.language_count(),
                strings.get("languages")
            ),
        }
    }

    pub(super) fn to_text(&self) -> String {
        let mut text = self.title.clone();
        for (language, form) in &self.forms {
            text.push('\n');
            text.push_str(language);
            text.push_str(": ");
            text.push_str(form);
        }
        text.push('\n');
        text.push_str(&self.shared_by);
        text
    }
}
