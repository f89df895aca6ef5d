pub mod editor_view;
pub mod player_view;
pub mod screens;
pub mod widgets;

use raylib::prelude::*;
use crate::presenter::Presenter;
use crate::state::Screen;
use crate::texture_loader::Textures;
use self::editor_view::EditorView;
use self::player_view::PlayerView;
use self::widgets::*;

const TOGGLE_BUTTON: Rectangle = Rectangle {
    x: 16.0,
    y: 16.0,
    width: 180.0,
    height: 36.0,
};

/// Window-side state layered over the presenter: input routing and the
/// per-screen views.
pub struct View {
    player: PlayerView,
    editor: EditorView,
    image_dir: String,
    last_screen: Screen,
}

impl View {
    pub fn new(image_dir: String, screen: Screen) -> Self {
        Self {
            player: PlayerView::new(),
            editor: EditorView::new(),
            image_dir,
            last_screen: screen,
        }
    }

    pub fn handle_input(&mut self, rl: &mut RaylibHandle, presenter: &mut Presenter) {
        if rl.is_key_pressed(KeyboardKey::KEY_F11) {
            rl.toggle_fullscreen();
        }

        let toggle_clicked = presenter.toggle_label().is_some()
            && rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT)
            && contains(&TOGGLE_BUTTON, rl.get_mouse_position());

        if toggle_clicked || rl.is_key_pressed(KeyboardKey::KEY_C) {
            presenter.toggle_configure();
        } else {
            match presenter.screen() {
                Screen::Player => {
                    if let Some(player) = presenter.player_mut() {
                        self.player.handle_input(rl, player);
                    }
                }
                Screen::Editor => self.editor.handle_input(rl, presenter),
                Screen::Empty | Screen::Fallback => {}
            }
        }

        self.sync_screen(presenter.screen());
    }

    /// True when the fallback screen asks for the image directory to be
    /// scanned again.
    pub fn rescan_requested(&self, rl: &RaylibHandle, presenter: &Presenter) -> bool {
        if presenter.screen() != Screen::Fallback {
            return false;
        }
        let button = screens::rescan_button(rl.get_screen_width() as f32, rl.get_screen_height() as f32);
        rl.is_key_pressed(KeyboardKey::KEY_R)
            || (rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) && contains(&button, rl.get_mouse_position()))
    }

    pub fn update(&mut self, dt: f32, presenter: &Presenter) {
        if let Some(player) = presenter.player() {
            self.player.update(dt, player);
        }
    }

    pub fn draw<D: RaylibDraw>(&self, d: &mut D, presenter: &Presenter, textures: &Textures, mouse: Vector2, screen_width: f32, screen_height: f32) {
        match presenter.screen() {
            Screen::Fallback => screens::draw_fallback(d, &self.image_dir, mouse, screen_width, screen_height),
            Screen::Empty => screens::draw_empty(d, screen_width, screen_height),
            Screen::Player => {
                if let Some(player) = presenter.player() {
                    self.player.draw(d, player, textures, mouse, screen_width, screen_height);
                }
            }
            Screen::Editor => {
                if let Some(editor) = presenter.editor() {
                    self.editor.draw(d, editor, textures, mouse, screen_width, screen_height);
                }
            }
        }

        if let Some(label) = presenter.toggle_label() {
            draw_button(d, TOGGLE_BUTTON, label, PANEL_COLOR, contains(&TOGGLE_BUTTON, mouse), 0.9);
        }
    }

    /// Views start fresh whenever the presenter switches screens.
    fn sync_screen(&mut self, screen: Screen) {
        if screen == self.last_screen {
            return;
        }
        match screen {
            Screen::Player => self.player.reset(),
            Screen::Editor => self.editor = EditorView::new(),
            Screen::Empty | Screen::Fallback => {}
        }
        self.last_screen = screen;
    }
}
