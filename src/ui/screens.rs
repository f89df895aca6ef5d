use raylib::prelude::*;
use crate::constants::IMAGE_EXTENSIONS;
use crate::ui::widgets::*;

fn draw_centered_lines<D: RaylibDraw>(d: &mut D, lines: &[(&str, i32, Color)], screen_width: f32, screen_height: f32) {
    let total: i32 = lines.iter().map(|(_, size, _)| size + 12).sum();
    let mut y = (screen_height as i32 - total) / 2;
    for (text, size, color) in lines {
        let text = fit_text(text, screen_width - 64.0, *size);
        let width = text_width(&text, *size) as i32;
        d.draw_text(&text, (screen_width as i32 - width) / 2, y, *size, *color);
        y += size + 12;
    }
}

pub fn draw_loading<D: RaylibDraw>(d: &mut D, screen_width: f32, screen_height: f32) {
    d.clear_background(Color::BLACK);
    draw_centered_lines(d, &[("Loading presentation...", 24, MUTED_COLOR)], screen_width, screen_height);
}

/// Button that rescans the image directory from the fallback screen.
pub fn rescan_button(screen_width: f32, screen_height: f32) -> Rectangle {
    Rectangle::new((screen_width - 320.0) * 0.5, screen_height - 110.0, 320.0, 44.0)
}

/// Shown when the image directory holds nothing displayable.
pub fn draw_fallback<D: RaylibDraw>(d: &mut D, image_dir: &str, mouse: Vector2, screen_width: f32, screen_height: f32) {
    d.clear_background(BACKGROUND_COLOR);
    let location = format!("Add your portfolio images to {image_dir}.");
    let formats = format!("Images can be {} files.", IMAGE_EXTENSIONS.join(", ").to_uppercase());
    draw_centered_lines(
        d,
        &[
            ("Add Your Portfolio Images", 32, TEXT_COLOR),
            (&location, 20, MUTED_COLOR),
            ("Name files as \"ClientName - ProjectDescription.jpg\", for example:", 20, MUTED_COLOR),
            ("Microsoft - Brochure Design for MS Office.jpg", 18, ACCENT_COLOR),
            ("shows \"Microsoft\" as the title and \"Brochure Design for MS Office\" below it.", 18, MUTED_COLOR),
            (&formats, 18, MUTED_COLOR),
            ("Use \"Configure Slides\" afterwards to choose which images to show and in what order.", 18, MUTED_COLOR),
        ],
        screen_width,
        screen_height,
    );

    let button = rescan_button(screen_width, screen_height);
    draw_button(d, button, "Scan Again (R)", ACCENT_COLOR, contains(&button, mouse), 1.0);
}

pub fn draw_empty<D: RaylibDraw>(d: &mut D, screen_width: f32, screen_height: f32) {
    d.clear_background(Color::BLACK);
    draw_centered_lines(
        d,
        &[
            ("No slides selected", 28, TEXT_COLOR),
            ("Press C or use Configure Slides to pick images.", 20, MUTED_COLOR),
        ],
        screen_width,
        screen_height,
    );
}
