use raylib::prelude::*;
use crate::slide::{RenderFit, layout_image};

pub const TEXT_COLOR: Color = Color::new(240, 240, 240, 255);
pub const MUTED_COLOR: Color = Color::new(156, 163, 175, 255);
pub const PANEL_COLOR: Color = Color::new(31, 41, 55, 255);
pub const PANEL_HOVER_COLOR: Color = Color::new(55, 65, 81, 255);
pub const BACKGROUND_COLOR: Color = Color::new(17, 24, 39, 255);
pub const ACCENT_COLOR: Color = Color::new(21, 128, 61, 255);
pub const DANGER_COLOR: Color = Color::new(185, 28, 28, 255);

pub fn contains(rect: &Rectangle, point: Vector2) -> bool {
    point.x >= rect.x
        && point.x <= rect.x + rect.width
        && point.y >= rect.y
        && point.y <= rect.y + rect.height
}

pub fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, (color.a as f32 * alpha.clamp(0.0, 1.0)) as u8)
}

/// Cuts `text` so it roughly fits `max_width` pixels of the default font.
pub fn fit_text(text: &str, max_width: f32, font_size: i32) -> String {
    // The default font averages a little over half its size per glyph
    let max_chars = (max_width / (font_size as f32 * 0.6)).max(1.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Approximate pixel width of `text` in the default font.
pub fn text_width(text: &str, font_size: i32) -> f32 {
    text.chars().count() as f32 * font_size as f32 * 0.55
}

pub fn draw_button<D: RaylibDraw>(d: &mut D, rect: Rectangle, label: &str, fill: Color, hovered: bool, alpha: f32) {
    let fill = if hovered { brighten(fill) } else { fill };
    d.draw_rectangle_rec(rect, with_alpha(fill, alpha));
    d.draw_rectangle_lines(
        rect.x as i32,
        rect.y as i32,
        rect.width as i32,
        rect.height as i32,
        with_alpha(Color::new(255, 255, 255, 60), alpha),
    );
    let font_size = 20;
    let label_width = text_width(label, font_size);
    d.draw_text(
        label,
        (rect.x + (rect.width - label_width) * 0.5) as i32,
        (rect.y + (rect.height - font_size as f32) * 0.5) as i32,
        font_size,
        with_alpha(TEXT_COLOR, alpha),
    );
}

pub fn draw_checkbox<D: RaylibDraw>(d: &mut D, rect: Rectangle, label: &str, checked: bool) {
    d.draw_rectangle_lines(rect.x as i32, rect.y as i32, rect.height as i32, rect.height as i32, MUTED_COLOR);
    if checked {
        d.draw_rectangle(
            rect.x as i32 + 4,
            rect.y as i32 + 4,
            rect.height as i32 - 8,
            rect.height as i32 - 8,
            ACCENT_COLOR,
        );
    }
    d.draw_text(label, (rect.x + rect.height + 8.0) as i32, rect.y as i32 + 2, 16, MUTED_COLOR);
}

/// Draws `texture` inside `frame` following `fit`.
pub fn draw_texture_fit<D: RaylibDraw>(d: &mut D, texture: &Texture2D, frame: Rectangle, fit: RenderFit, tint: Color) {
    let (source, dest) = layout_image(texture.width() as f32, texture.height() as f32, frame, fit);
    d.draw_texture_pro(texture, source, dest, Vector2::new(0.0, 0.0), 0.0, tint);
}

fn brighten(color: Color) -> Color {
    let lift = |c: u8| c.saturating_add(30);
    Color::new(lift(color.r), lift(color.g), lift(color.b), color.a)
}
