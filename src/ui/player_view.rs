use raylib::prelude::*;
use crate::player::SlideshowPlayer;
use crate::slide::{layout_image, slide_frame};
use crate::texture_loader::Textures;
use crate::ui::widgets::*;

const BUTTON_SIZE: f32 = 48.0;
const BUTTON_GAP: f32 = 16.0;
const CONTROLS_FADE_RATE: f32 = 1.0 / 0.3; // full fade in 0.3 s

/// Clickable areas of the player controls.
pub struct PlayerLayout {
    pub previous: Rectangle,
    pub play_pause: Rectangle,
    pub next: Rectangle,
}

impl PlayerLayout {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        let y = screen_height - 24.0 - BUTTON_SIZE;
        let center = screen_width * 0.5;
        let button = |x: f32| Rectangle::new(x, y, BUTTON_SIZE, BUTTON_SIZE);
        Self {
            previous: button(center - BUTTON_SIZE * 1.5 - BUTTON_GAP),
            play_pause: button(center - BUTTON_SIZE * 0.5),
            next: button(center + BUTTON_SIZE * 0.5 + BUTTON_GAP),
        }
    }
}

/// Presentation-only state of the player screen.
pub struct PlayerView {
    controls_alpha: f32,
}

impl PlayerView {
    pub fn new() -> Self {
        Self { controls_alpha: 1.0 }
    }

    pub fn reset(&mut self) {
        self.controls_alpha = 1.0;
    }

    pub fn handle_input(&mut self, rl: &mut RaylibHandle, player: &mut SlideshowPlayer) {
        let mouse_delta = rl.get_mouse_delta();
        if mouse_delta.x != 0.0 || mouse_delta.y != 0.0 {
            player.pointer_moved();
        }

        if rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
            player.toggle_play_pause();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
            player.next();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
            player.previous();
        }

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            let layout = PlayerLayout::new(rl.get_screen_width() as f32, rl.get_screen_height() as f32);
            let mouse = rl.get_mouse_position();
            if contains(&layout.previous, mouse) {
                player.previous();
            } else if contains(&layout.play_pause, mouse) {
                player.toggle_play_pause();
            } else if contains(&layout.next, mouse) {
                player.next();
            }
        }
    }

    pub fn update(&mut self, dt: f32, player: &SlideshowPlayer) {
        let target = if player.controls_visible() { 1.0 } else { 0.0 };
        let step = CONTROLS_FADE_RATE * dt;
        self.controls_alpha = if self.controls_alpha < target {
            (self.controls_alpha + step).min(target)
        } else {
            (self.controls_alpha - step).max(target)
        };
    }

    pub fn draw<D: RaylibDraw>(&self, d: &mut D, player: &SlideshowPlayer, textures: &Textures, mouse: Vector2, screen_width: f32, screen_height: f32) {
        d.clear_background(Color::BLACK);

        let slide = player.current_slide();
        let style = player.slide_style();

        // Slide image, shifted and scaled around its centre by the transition style
        let frame = slide_frame(screen_width, screen_height);
        let styled = Rectangle::new(
            frame.x + frame.width * (1.0 - style.scale) * 0.5 + style.offset_x * screen_width,
            frame.y + frame.height * (1.0 - style.scale) * 0.5,
            frame.width * style.scale,
            frame.height * style.scale,
        );
        if let Some(texture) = textures.get(&slide.image) {
            draw_texture_fit(d, texture, styled, slide.fit(), with_alpha(Color::WHITE, style.opacity));
            if style.brightness > 1.0 {
                let (_, dest) = layout_image(texture.width() as f32, texture.height() as f32, styled, slide.fit());
                let wash = ((style.brightness - 1.0) * style.opacity).clamp(0.0, 1.0);
                d.draw_rectangle_rec(dest, with_alpha(Color::WHITE, wash));
            }
        }

        // Caption
        let caption_y = screen_height - 150.0;
        let caption_x = 24.0 + style.offset_x * screen_width;
        d.draw_rectangle(0, caption_y as i32, screen_width as i32, 150, with_alpha(Color::BLACK, 0.6 * style.opacity));
        d.draw_text(
            &fit_text(&slide.title, screen_width - 48.0, 32),
            caption_x as i32,
            caption_y as i32 + 24,
            32,
            with_alpha(TEXT_COLOR, style.opacity),
        );
        d.draw_text(
            &fit_text(&slide.subtitle, screen_width - 48.0, 22),
            caption_x as i32,
            caption_y as i32 + 64,
            22,
            with_alpha(TEXT_COLOR, 0.8 * style.opacity),
        );

        // Progress bar
        d.draw_rectangle(0, 0, screen_width as i32, 4, Color::new(31, 41, 55, 255));
        d.draw_rectangle(0, 0, (screen_width * player.progress()) as i32, 4, Color::WHITE);

        if self.controls_alpha <= 0.0 {
            return;
        }
        let alpha = self.controls_alpha;
        let state = player.state();

        // Counter and effect badge
        let counter = format!("{} / {}", state.current_index + 1, player.len());
        let effect = format!("Effect: {}", state.active_transition.name());
        let badge_x = screen_width as i32 - 260;
        d.draw_rectangle(badge_x, 16, 244, 28, with_alpha(Color::BLACK, 0.5 * alpha));
        d.draw_text(&counter, badge_x + 12, 20, 20, with_alpha(TEXT_COLOR, 0.8 * alpha));
        d.draw_rectangle(badge_x, 52, 244, 28, with_alpha(Color::BLACK, 0.5 * alpha));
        d.draw_text(&effect, badge_x + 12, 56, 18, with_alpha(TEXT_COLOR, 0.8 * alpha));

        // Playback controls; previous/next are greyed out while a transition runs
        let layout = PlayerLayout::new(screen_width, screen_height);
        let nav_alpha = if state.is_transitioning { alpha * 0.4 } else { alpha };
        let panel = Color::new(0, 0, 0, 128);
        draw_button(d, layout.previous, "<", panel, contains(&layout.previous, mouse), nav_alpha);
        draw_button(
            d,
            layout.play_pause,
            if state.is_playing { "||" } else { ">" },
            panel,
            contains(&layout.play_pause, mouse),
            alpha,
        );
        draw_button(d, layout.next, ">", panel, contains(&layout.next, mouse), nav_alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controls_are_centred_and_ordered() {
        let layout = PlayerLayout::new(1000.0, 800.0);
        assert!(layout.previous.x < layout.play_pause.x);
        assert!(layout.play_pause.x < layout.next.x);
        let middle = layout.play_pause.x + layout.play_pause.width * 0.5;
        assert!((middle - 500.0).abs() < 1e-3);
        assert!(layout.next.y + layout.next.height < 800.0);
    }
}
