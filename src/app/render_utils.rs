use eframe::egui::{Color32, Painter, Pos2, Rect, Vec2, vec2};

pub(super) const INACTIVE_OPACITY: f32 = 0.28;
const TOOLTIP_OFFSET: Vec2 = vec2(14.0, 14.0);

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let opacity = opacity.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (color.a() as f32 * opacity) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = 48.0;
    let dot = Color32::from_rgba_unmultiplied(60, 70, 80, 90);
    let mut y = rect.top() + step * 0.5;
    while y < rect.bottom() {
        let mut x = rect.left() + step * 0.5;
        while x < rect.right() {
            painter.circle_filled(Pos2::new(x, y), 1.0, dot);
            x += step;
        }
        y += step;
    }
}

/// Bubble color by how many languages share the word: cool for rare, warm
/// for widely shared.
pub(super) fn language_color(language_count: usize) -> Color32 {
    let t = (language_count.saturating_sub(1) as f32 / 6.0).clamp(0.0, 1.0);
    let r = (55.0 + (190.0 * t)) as u8;
    let g = (150.0 - (40.0 * t)) as u8;
    let b = (215.0 - (155.0 * t)) as u8;
    Color32::from_rgb(r, g, b)
}

pub(super) fn label_font_size(radius: f32) -> f32 {
    (radius / 3.0).clamp(10.0, 22.0)
}

/// Places a tooltip of `size` beside the pointer, flipping to the other side
/// near an edge and never leaving `viewport`.
pub(super) fn tooltip_rect(pointer: Pos2, size: Vec2, viewport: Rect) -> Rect {
    let mut min = pointer + TOOLTIP_OFFSET;
    if min.x + size.x > viewport.right() {
        min.x = pointer.x - TOOLTIP_OFFSET.x - size.x;
    }
    if min.y + size.y > viewport.bottom() {
        min.y = pointer.y - TOOLTIP_OFFSET.y - size.y;
    }

    min.x = min
        .x
        .min(viewport.right() - size.x)
        .max(viewport.left());
    min.y = min
        .y
        .min(viewport.bottom() - size.y)
        .max(viewport.top());
    Rect::from_min_size(min, size)
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;

    fn viewport() -> Rect {
        Rect::from_min_size(pos2(100.0, 50.0), vec2(600.0, 400.0))
    }

    #[test]
    fn tooltip_sits_beside_pointer_when_room() {
        let rect = tooltip_rect(pos2(200.0, 100.0), vec2(120.0, 60.0), viewport());
        assert_eq!(rect.min, pos2(214.0, 114.0));
    }

    #[test]
    fn tooltip_flips_near_bottom_right() {
        let rect = tooltip_rect(pos2(680.0, 430.0), vec2(120.0, 60.0), viewport());
        assert_eq!(rect.min, pos2(546.0, 356.0));
        assert!(viewport().contains_rect(rect));
    }

    #[test]
    fn oversized_tooltip_pins_to_top_left() {
        let rect = tooltip_rect(pos2(300.0, 200.0), vec2(900.0, 500.0), viewport());
        assert_eq!(rect.min, pos2(100.0, 50.0));
    }

    #[test]
    fn tooltip_stays_inside_for_pointer_grid() {
        let viewport = viewport();
        let size = vec2(150.0, 90.0);
        for x in (100..=700).step_by(50) {
            for y in (50..=450).step_by(50) {
                let rect = tooltip_rect(pos2(x as f32, y as f32), size, viewport);
                assert!(viewport.contains_rect(rect), "{x},{y} -> {rect:?}");
            }
        }
    }

    #[test]
    fn font_size_is_clamped() {
        assert_eq!(label_font_size(24.0), 10.0);
        assert_eq!(label_font_size(45.0), 15.0);
        assert_eq!(label_font_size(72.0), 22.0);
    }

    #[test]
    fn wider_sharing_warms_color() {
        let rare = language_color(1);
        let common = language_color(7);
        assert!(common.r() > rare.r());
        assert!(common.b() < rare.b());
    }
}
