use raylib::prelude::*;
use crate::config::ImageRef;
use crate::filename::extract_title_and_subtitle;
use crate::presenter::Presenter;
use crate::selection::{DragEnd, DropZone, EditorState, OptionField, SelectionEditor};
use crate::slide::RenderFit;
use crate::texture_loader::Textures;
use crate::ui::widgets::*;

const HEADER_HEIGHT: f32 = 80.0;
const COLUMN_HEADER_HEIGHT: f32 = 64.0;
const MARGIN: f32 = 24.0;
const ROW_HEIGHT: f32 = 88.0;
const ROW_PITCH: f32 = ROW_HEIGHT + 8.0;
const THUMB_SIZE: f32 = 64.0;
const SCROLL_SPEED: f32 = 48.0;

/// Screen areas of the editor for a given window size.
pub struct EditorLayout {
    pub cancel: Rectangle,
    pub save: Rectangle,
    pub selected_column: Rectangle,
    pub available_column: Rectangle,
}

impl EditorLayout {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        let column_width = (screen_width - MARGIN * 3.0) * 0.5;
        let list_top = HEADER_HEIGHT + COLUMN_HEADER_HEIGHT;
        let list_height = (screen_height - list_top - MARGIN).max(ROW_HEIGHT);
        Self {
            cancel: Rectangle::new(screen_width - MARGIN - 220.0, 20.0, 100.0, 40.0),
            save: Rectangle::new(screen_width - MARGIN - 110.0, 20.0, 110.0, 40.0),
            selected_column: Rectangle::new(MARGIN, list_top, column_width, list_height),
            available_column: Rectangle::new(MARGIN * 2.0 + column_width, list_top, column_width, list_height),
        }
    }

    pub fn row_rect(column: &Rectangle, index: usize, scroll: f32) -> Rectangle {
        Rectangle::new(column.x, column.y + index as f32 * ROW_PITCH - scroll, column.width, ROW_HEIGHT)
    }

    /// Row under `y`, if any.
    pub fn row_at(column: &Rectangle, y: f32, scroll: f32, len: usize) -> Option<usize> {
        let offset = y - column.y + scroll;
        if offset < 0.0 {
            return None;
        }
        let index = (offset / ROW_PITCH) as usize;
        let within_row = offset - index as f32 * ROW_PITCH <= ROW_HEIGHT;
        (index < len && within_row).then_some(index)
    }

    /// Position a dragged row lands on, clamped to the list.
    pub fn drop_index(column: &Rectangle, y: f32, scroll: f32, len: usize) -> usize {
        let offset = (y - column.y + scroll).max(0.0);
        ((offset / ROW_PITCH) as usize).min(len.saturating_sub(1))
    }

    pub fn max_scroll(column: &Rectangle, len: usize) -> f32 {
        (len as f32 * ROW_PITCH - column.height).max(0.0)
    }

    pub fn toggle_button(row: &Rectangle) -> Rectangle {
        Rectangle::new(row.x + row.width - 44.0, row.y + (row.height - 32.0) * 0.5, 32.0, 32.0)
    }

    pub fn full_width_box(row: &Rectangle) -> Rectangle {
        Rectangle::new(row.x + THUMB_SIZE + 24.0, row.y + 60.0, 120.0, 20.0)
    }

    pub fn crop_box(row: &Rectangle) -> Rectangle {
        Rectangle::new(row.x + THUMB_SIZE + 160.0, row.y + 60.0, 140.0, 20.0)
    }
}

enum EditorAction {
    Save,
    Cancel,
    Toggle(ImageRef),
    SetOption(ImageRef, OptionField, bool),
    Drop(DragEnd),
}

struct Drag {
    source_index: usize,
    grab_offset_y: f32,
}

/// Scroll and drag state of the open editor.
pub struct EditorView {
    selected_scroll: f32,
    available_scroll: f32,
    drag: Option<Drag>,
}

impl EditorView {
    pub fn new() -> Self {
        Self {
            selected_scroll: 0.0,
            available_scroll: 0.0,
            drag: None,
        }
    }

    pub fn handle_input(&mut self, rl: &mut RaylibHandle, presenter: &mut Presenter) {
        let Some(editor) = presenter.editor() else {
            return;
        };
        if editor.state() != EditorState::Editing {
            self.drag = None;
            return;
        }
        let layout = EditorLayout::new(rl.get_screen_width() as f32, rl.get_screen_height() as f32);
        let mouse = rl.get_mouse_position();

        self.clamp_scroll(&layout, editor);
        self.scroll(rl.get_mouse_wheel_move(), mouse, &layout, editor);

        let action = if rl.is_key_pressed(KeyboardKey::KEY_ENTER) {
            Some(EditorAction::Save)
        } else if rl.is_key_pressed(KeyboardKey::KEY_ESCAPE) {
            Some(EditorAction::Cancel)
        } else {
            let pressed = rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT);
            let released = rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT);
            self.pointer(pressed, released, mouse, &layout, editor)
        };
        // A release can be missed, e.g. when the window loses focus mid-drag
        if !rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT) {
            self.drag = None;
        }

        match action {
            Some(EditorAction::Save) => presenter.save_editor(),
            Some(EditorAction::Cancel) => presenter.cancel_editor(),
            Some(EditorAction::Toggle(image)) => {
                if let Some(editor) = presenter.editor_mut() {
                    editor.toggle_select(&image);
                }
            }
            Some(EditorAction::SetOption(image, field, value)) => {
                if let Some(editor) = presenter.editor_mut() {
                    editor.set_option(&image, field, value);
                }
            }
            Some(EditorAction::Drop(drag)) => {
                if let Some(editor) = presenter.editor_mut() {
                    editor.finish_drag(drag);
                }
            }
            None => {}
        }

        // Rows may have moved out of a list scrolled near its end
        if let Some(editor) = presenter.editor() {
            self.clamp_scroll(&layout, editor);
        }
    }

    fn clamp_scroll(&mut self, layout: &EditorLayout, editor: &SelectionEditor) {
        let max = EditorLayout::max_scroll(&layout.selected_column, editor.selected().len());
        self.selected_scroll = self.selected_scroll.clamp(0.0, max);
        let max = EditorLayout::max_scroll(&layout.available_column, editor.available().len());
        self.available_scroll = self.available_scroll.clamp(0.0, max);
    }

    // Press and release are handled independently so a click that starts
    // and ends within one frame still closes its drag.
    fn pointer(&mut self, pressed: bool, released: bool, mouse: Vector2, layout: &EditorLayout, editor: &SelectionEditor) -> Option<EditorAction> {
        let mut action = None;
        if pressed {
            action = self.press(mouse, layout, editor);
        }
        if released {
            if let Some(dropped) = self.release(mouse, layout, editor) {
                action = action.or(Some(dropped));
            }
        }
        action
    }

    fn scroll(&mut self, wheel: f32, mouse: Vector2, layout: &EditorLayout, editor: &SelectionEditor) {
        if wheel == 0.0 {
            return;
        }
        if contains(&layout.selected_column, mouse) {
            let max = EditorLayout::max_scroll(&layout.selected_column, editor.selected().len());
            self.selected_scroll = (self.selected_scroll - wheel * SCROLL_SPEED).clamp(0.0, max);
        } else if contains(&layout.available_column, mouse) {
            let max = EditorLayout::max_scroll(&layout.available_column, editor.available().len());
            self.available_scroll = (self.available_scroll - wheel * SCROLL_SPEED).clamp(0.0, max);
        }
    }

    fn press(&mut self, mouse: Vector2, layout: &EditorLayout, editor: &SelectionEditor) -> Option<EditorAction> {
        if contains(&layout.save, mouse) {
            return Some(EditorAction::Save);
        }
        if contains(&layout.cancel, mouse) {
            return Some(EditorAction::Cancel);
        }

        if contains(&layout.selected_column, mouse) {
            let column = &layout.selected_column;
            let index = EditorLayout::row_at(column, mouse.y, self.selected_scroll, editor.selected().len())?;
            let image = &editor.selected()[index];
            let options = editor.options_for(image);
            let row = EditorLayout::row_rect(column, index, self.selected_scroll);

            if contains(&EditorLayout::toggle_button(&row), mouse) {
                return Some(EditorAction::Toggle(image.clone()));
            }
            if contains(&EditorLayout::full_width_box(&row), mouse) {
                return Some(EditorAction::SetOption(image.clone(), OptionField::FullWidth, !options.full_width));
            }
            if options.full_width && contains(&EditorLayout::crop_box(&row), mouse) {
                return Some(EditorAction::SetOption(image.clone(), OptionField::CropFromTop, !options.crop_from_top));
            }

            self.drag = Some(Drag {
                source_index: index,
                grab_offset_y: mouse.y - row.y,
            });
            return None;
        }

        if contains(&layout.available_column, mouse) {
            let column = &layout.available_column;
            let index = EditorLayout::row_at(column, mouse.y, self.available_scroll, editor.available().len())?;
            return Some(EditorAction::Toggle(editor.available()[index].clone()));
        }

        None
    }

    fn release(&mut self, mouse: Vector2, layout: &EditorLayout, editor: &SelectionEditor) -> Option<EditorAction> {
        let drag = self.drag.take()?;
        let destination = if contains(&layout.selected_column, mouse) {
            let index = EditorLayout::drop_index(&layout.selected_column, mouse.y, self.selected_scroll, editor.selected().len());
            Some((DropZone::Selected, index))
        } else if contains(&layout.available_column, mouse) {
            let index = EditorLayout::drop_index(&layout.available_column, mouse.y, self.available_scroll, editor.available().len());
            Some((DropZone::Available, index))
        } else {
            None
        };
        Some(EditorAction::Drop(DragEnd {
            source_index: drag.source_index,
            destination,
        }))
    }

    pub fn draw<D: RaylibDraw>(&self, d: &mut D, editor: &SelectionEditor, textures: &Textures, mouse: Vector2, screen_width: f32, screen_height: f32) {
        let layout = EditorLayout::new(screen_width, screen_height);
        d.clear_background(BACKGROUND_COLOR);

        // Lists first; the headers are painted over rows scrolled out of view
        let dragging = self.drag.as_ref().map(|drag| drag.source_index);
        for (index, image) in editor.selected().iter().enumerate() {
            let row = EditorLayout::row_rect(&layout.selected_column, index, self.selected_scroll);
            if !row_visible(&row, &layout.selected_column) {
                continue;
            }
            let dimmed = dragging == Some(index);
            draw_row(d, row, image, textures, mouse, true, dimmed);
            draw_options(d, row, editor, image);
        }
        for (index, image) in editor.available().iter().enumerate() {
            let row = EditorLayout::row_rect(&layout.available_column, index, self.available_scroll);
            if !row_visible(&row, &layout.available_column) {
                continue;
            }
            draw_row(d, row, image, textures, mouse, false, false);
        }

        if editor.selected().is_empty() {
            draw_placeholder(d, &layout.selected_column, "No images selected for the presentation");
        }
        if editor.available().is_empty() {
            draw_placeholder(d, &layout.available_column, "All images are already in the presentation");
        }

        // Header band and column titles
        d.draw_rectangle(0, 0, screen_width as i32, (HEADER_HEIGHT + COLUMN_HEADER_HEIGHT) as i32, BACKGROUND_COLOR);
        d.draw_text("Configure Presentation", 220, 26, 28, TEXT_COLOR);
        draw_button(d, layout.cancel, "Cancel", PANEL_HOVER_COLOR, contains(&layout.cancel, mouse), 1.0);
        draw_button(d, layout.save, "Save", ACCENT_COLOR, contains(&layout.save, mouse), 1.0);

        let columns = [
            (
                &layout.selected_column,
                format!("Selected Images ({})", editor.selected().len()),
                "Drag to reorder. Click to remove from presentation.",
            ),
            (
                &layout.available_column,
                format!("Available Images ({})", editor.available().len()),
                "Click to add to presentation.",
            ),
        ];
        for (column, title, hint) in columns {
            let top = (HEADER_HEIGHT - 4.0) as i32;
            d.draw_text(&title, column.x as i32, top, 22, TEXT_COLOR);
            d.draw_text(hint, column.x as i32, top + 30, 16, MUTED_COLOR);
        }

        // Row being dragged follows the pointer
        if let Some(drag) = &self.drag {
            if let Some(image) = editor.selected().get(drag.source_index) {
                let row = Rectangle::new(
                    layout.selected_column.x,
                    mouse.y - drag.grab_offset_y,
                    layout.selected_column.width,
                    ROW_HEIGHT,
                );
                draw_row(d, row, image, textures, mouse, true, false);
            }
        }
    }
}

fn row_visible(row: &Rectangle, column: &Rectangle) -> bool {
    row.y + row.height >= column.y && row.y <= column.y + column.height
}

fn draw_row<D: RaylibDraw>(d: &mut D, row: Rectangle, image: &ImageRef, textures: &Textures, mouse: Vector2, selected: bool, dimmed: bool) {
    let fill = if contains(&row, mouse) { PANEL_HOVER_COLOR } else { PANEL_COLOR };
    let alpha = if dimmed { 0.4 } else { 1.0 };
    d.draw_rectangle_rec(row, with_alpha(fill, alpha));

    let thumb = Rectangle::new(row.x + 12.0, row.y + (row.height - THUMB_SIZE) * 0.5, THUMB_SIZE, THUMB_SIZE);
    if let Some(texture) = textures.get(image) {
        draw_texture_fit(d, texture, thumb, RenderFit::Cover { from_top: true }, with_alpha(Color::WHITE, alpha));
    }

    let parsed = extract_title_and_subtitle(image.file_name());
    let text_x = thumb.x + THUMB_SIZE + 12.0;
    let text_width = row.width - THUMB_SIZE - 80.0;
    d.draw_text(&fit_text(&parsed.title, text_width, 20), text_x as i32, row.y as i32 + 12, 20, with_alpha(TEXT_COLOR, alpha));
    d.draw_text(&fit_text(&parsed.subtitle, text_width, 16), text_x as i32, row.y as i32 + 36, 16, with_alpha(MUTED_COLOR, alpha));

    let button = EditorLayout::toggle_button(&row);
    let (label, color) = if selected { ("x", DANGER_COLOR) } else { ("+", ACCENT_COLOR) };
    let fill = if contains(&button, mouse) { color } else { PANEL_HOVER_COLOR };
    draw_button(d, button, label, fill, false, alpha);
}

fn draw_options<D: RaylibDraw>(d: &mut D, row: Rectangle, editor: &SelectionEditor, image: &ImageRef) {
    let options = editor.options_for(image);
    draw_checkbox(d, EditorLayout::full_width_box(&row), "Full width", options.full_width);
    // Crop anchor only matters for full width images
    if options.full_width {
        draw_checkbox(d, EditorLayout::crop_box(&row), "Crop from top", options.crop_from_top);
    }
}

fn draw_placeholder<D: RaylibDraw>(d: &mut D, column: &Rectangle, text: &str) {
    d.draw_rectangle_lines(column.x as i32, column.y as i32, column.width as i32, 120, PANEL_HOVER_COLOR);
    d.draw_text(&fit_text(text, column.width - 32.0, 18), column.x as i32 + 16, column.y as i32 + 50, 18, MUTED_COLOR);
}
