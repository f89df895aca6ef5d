//! Wires the discovered images, the configuration store, the selection
//! editor and the slideshow player together and decides what is shown.

use std::collections::HashMap;
use tracing::{info, warn};

use crate::config::{ImageOptions, ImageRef, SlideConfig};
use crate::player::SlideshowPlayer;
use crate::selection::{EditorOutcome, SelectionEditor};
use crate::slide::Slide;
use crate::state::Screen;
use crate::store::ConfigStore;
use crate::transition::TransitionFactory;

pub struct Presenter {
    universe: Vec<ImageRef>,
    selected: Vec<ImageRef>,
    options: HashMap<ImageRef, ImageOptions>,

    store: Box<dyn ConfigStore>,
    new_transitions: TransitionFactory,

    screen: Screen,
    player: Option<SlideshowPlayer>,
    editor: Option<SelectionEditor>,
}

impl Presenter {
    /// Loads the saved configuration (restricted to `universe`) and starts
    /// playback. Without a usable saved configuration every image is shown
    /// in discovery order with default options.
    pub fn new(universe: Vec<ImageRef>, store: Box<dyn ConfigStore>, new_transitions: TransitionFactory) -> Self {
        let mut presenter = Self {
            universe: Vec::new(),
            selected: Vec::new(),
            options: HashMap::new(),
            store,
            new_transitions,
            screen: Screen::Fallback,
            player: None,
            editor: None,
        };
        presenter.rediscover(universe);
        presenter
    }

    /// Replaces the universe after a rescan and reapplies the saved
    /// configuration to it.
    pub fn rediscover(&mut self, universe: Vec<ImageRef>) {
        self.editor = None;
        let saved = self.store.load().and_then(|config| {
            let restricted = config.restricted_to(&universe);
            if restricted.is_none() {
                info!("Saved configuration has no images left, selecting everything");
            }
            restricted
        });

        let (selected, options) = match saved {
            Some(config) => (config.selected_images, config.image_options),
            None => (universe.clone(), HashMap::new()),
        };
        self.universe = universe;
        self.selected = selected;
        self.options = options;
        self.show_player();
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selected(&self) -> &[ImageRef] {
        &self.selected
    }

    pub fn options_for(&self, image: &ImageRef) -> ImageOptions {
        self.options.get(image).copied().unwrap_or_default()
    }

    pub fn player(&self) -> Option<&SlideshowPlayer> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut SlideshowPlayer> {
        self.player.as_mut()
    }

    pub fn editor(&self) -> Option<&SelectionEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut SelectionEditor> {
        self.editor.as_mut()
    }

    /// Label of the configure toggle, `None` when there is nothing to configure.
    pub fn toggle_label(&self) -> Option<&'static str> {
        match self.screen {
            Screen::Fallback => None,
            Screen::Editor => Some("Hide Selector"),
            Screen::Player | Screen::Empty => Some("Configure Slides"),
        }
    }

    /// Opens the editor, or closes it as a cancel when it is already open.
    pub fn toggle_configure(&mut self) {
        match self.screen {
            Screen::Fallback => {}
            Screen::Editor => self.cancel_editor(),
            Screen::Player | Screen::Empty => self.open_editor(),
        }
    }

    pub fn open_editor(&mut self) {
        if self.universe.is_empty() {
            warn!("No images to configure");
            return;
        }
        if let Some(mut player) = self.player.take() {
            player.stop();
        }
        self.editor = Some(SelectionEditor::new(&self.universe, &self.selected, &self.options));
        self.screen = Screen::Editor;
    }

    pub fn save_editor(&mut self) {
        if let Some(outcome) = self.editor.as_mut().and_then(SelectionEditor::save) {
            self.apply(outcome);
        }
    }

    pub fn cancel_editor(&mut self) {
        if let Some(outcome) = self.editor.as_mut().and_then(SelectionEditor::cancel) {
            self.apply(outcome);
        }
    }

    pub fn update(&mut self, dt: f32) {
        if let Some(player) = self.player.as_mut() {
            player.update(dt);
        }
    }

    fn apply(&mut self, outcome: EditorOutcome) {
        self.editor = None;
        self.selected = outcome.selected;
        self.options = outcome.options;

        let config = SlideConfig::new(self.selected.clone(), self.options.clone());
        self.store.save(&config);
        info!(kind = ?outcome.kind, selected = self.selected.len(), "Editor closed");

        self.show_player();
    }

    fn show_player(&mut self) {
        if let Some(mut player) = self.player.take() {
            player.stop();
        }

        if self.universe.is_empty() {
            self.screen = Screen::Fallback;
            return;
        }

        let slides: Vec<Slide> = self
            .selected
            .iter()
            .map(|image| Slide::new(image.clone(), self.options_for(image)))
            .collect();

        self.player = SlideshowPlayer::new(slides, (self.new_transitions)());
        self.screen = if self.player.is_some() { Screen::Player } else { Screen::Empty };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::OptionField;
    use crate::store::MemoryStore;
    use crate::transition::{Transition, TransitionSource};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Store handle that stays inspectable after the presenter takes ownership.
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryStore>>);

    impl ConfigStore for SharedStore {
        fn save(&mut self, config: &SlideConfig) {
            self.0.borrow_mut().save(config);
        }

        fn load(&self) -> Option<SlideConfig> {
            self.0.borrow().load()
        }
    }

    struct AlwaysFade;

    impl TransitionSource for AlwaysFade {
        fn next_transition(&mut self) -> Transition {
            Transition::Fade
        }
    }

    fn refs(names: &[&str]) -> Vec<ImageRef> {
        names.iter().map(|name| ImageRef::new(*name)).collect()
    }

    fn presenter(universe: &[&str], store: &SharedStore) -> Presenter {
        Presenter::new(refs(universe), Box::new(store.clone()), Box::new(|| Box::new(AlwaysFade) as Box<dyn TransitionSource>))
    }

    #[test]
    fn test_no_saved_config_selects_everything() {
        let store = SharedStore::default();
        let presenter = presenter(&["a.png", "b.png", "c.png"], &store);

        assert_eq!(presenter.screen(), Screen::Player);
        assert_eq!(presenter.selected(), refs(&["a.png", "b.png", "c.png"]).as_slice());
        assert_eq!(presenter.player().unwrap().len(), 3);
        assert_eq!(presenter.toggle_label(), Some("Configure Slides"));
    }

    #[test]
    fn test_empty_universe_shows_fallback() {
        let store = SharedStore::default();
        let mut presenter = presenter(&[], &store);

        assert_eq!(presenter.screen(), Screen::Fallback);
        assert!(presenter.player().is_none());
        assert_eq!(presenter.toggle_label(), None);

        presenter.toggle_configure();
        assert_eq!(presenter.screen(), Screen::Fallback);
        assert!(presenter.editor().is_none());
    }

    #[test]
    fn test_saved_config_is_restricted_to_universe() {
        let store = SharedStore::default();
        let mut options = HashMap::new();
        options.insert(ImageRef::new("gone.png"), ImageOptions { full_width: true, crop_from_top: true });
        options.insert(ImageRef::new("b.png"), ImageOptions { full_width: true, crop_from_top: false });
        store
            .clone()
            .save(&SlideConfig::new(refs(&["gone.png", "b.png", "a.png"]), options));

        let presenter = presenter(&["a.png", "b.png", "c.png"], &store);
        assert_eq!(presenter.selected(), refs(&["b.png", "a.png"]).as_slice());
        assert!(presenter.options_for(&ImageRef::new("b.png")).full_width);
        assert_eq!(presenter.options_for(&ImageRef::new("gone.png")), ImageOptions::default());

        let slide = presenter.player().unwrap().current_slide();
        assert_eq!(slide.image, ImageRef::new("b.png"));
        assert!(!slide.options.crop_from_top);
    }

    #[test]
    fn test_duplicate_saved_entries_play_once() {
        let store = SharedStore::default();
        store
            .clone()
            .save(&SlideConfig::new(refs(&["a.png", "a.png", "b.png"]), HashMap::new()));

        let mut presenter = presenter(&["a.png", "b.png"], &store);
        assert_eq!(presenter.selected(), refs(&["a.png", "b.png"]).as_slice());
        assert_eq!(presenter.player().unwrap().len(), 2);

        // Closing the editor unchanged keeps the same order on disk
        presenter.open_editor();
        presenter.cancel_editor();
        assert_eq!(store.load().unwrap().selected_images, refs(&["a.png", "b.png"]));
    }

    #[test]
    fn test_rescan_leaves_fallback_once_images_appear() {
        let store = SharedStore::default();
        let mut presenter = presenter(&[], &store);
        assert_eq!(presenter.screen(), Screen::Fallback);

        presenter.rediscover(refs(&["a.png", "b.png"]));
        assert_eq!(presenter.screen(), Screen::Player);
        assert_eq!(presenter.selected(), refs(&["a.png", "b.png"]).as_slice());
        assert_eq!(presenter.player().unwrap().len(), 2);
    }

    #[test]
    fn test_rescan_applies_saved_config_to_new_universe() {
        let store = SharedStore::default();
        store.clone().save(&SlideConfig::new(refs(&["c.png", "a.png"]), HashMap::new()));

        let mut presenter = presenter(&["a.png"], &store);
        assert_eq!(presenter.selected(), refs(&["a.png"]).as_slice());

        presenter.rediscover(refs(&["a.png", "b.png", "c.png"]));
        assert_eq!(presenter.selected(), refs(&["c.png", "a.png"]).as_slice());
    }

    #[test]
    fn test_fully_stale_config_selects_everything() {
        let store = SharedStore::default();
        store.clone().save(&SlideConfig::new(refs(&["old.png"]), HashMap::new()));

        let presenter = presenter(&["a.png", "b.png"], &store);
        assert_eq!(presenter.selected(), refs(&["a.png", "b.png"]).as_slice());
    }

    #[test]
    fn test_open_editor_discards_player() {
        let store = SharedStore::default();
        let mut presenter = presenter(&["a.png", "b.png"], &store);

        presenter.toggle_configure();
        assert_eq!(presenter.screen(), Screen::Editor);
        assert!(presenter.player().is_none());
        assert_eq!(presenter.toggle_label(), Some("Hide Selector"));
        assert_eq!(presenter.editor().unwrap().selected(), refs(&["a.png", "b.png"]).as_slice());
    }

    #[test]
    fn test_save_persists_and_restarts_player() {
        let store = SharedStore::default();
        let mut presenter = presenter(&["a.png", "b.png", "c.png"], &store);

        // Move the show along so the restart is observable
        presenter.player_mut().unwrap().next();
        presenter.update(1.0);
        assert_eq!(presenter.player().unwrap().state().current_index, 1);

        presenter.open_editor();
        let editor = presenter.editor_mut().unwrap();
        editor.toggle_select(&ImageRef::new("a.png"));
        editor.reorder(1, 0);
        editor.set_option(&ImageRef::new("c.png"), OptionField::FullWidth, true);
        presenter.save_editor();

        assert_eq!(presenter.screen(), Screen::Player);
        assert!(presenter.editor().is_none());
        assert_eq!(presenter.selected(), refs(&["c.png", "b.png"]).as_slice());

        let player = presenter.player().unwrap();
        assert_eq!(player.state().current_index, 0);
        assert_eq!(player.current_slide().image, ImageRef::new("c.png"));
        assert!(player.current_slide().options.full_width);

        let saved = store.load().unwrap();
        assert_eq!(saved.selected_images, refs(&["c.png", "b.png"]));
        assert!(saved.image_options[&ImageRef::new("c.png")].full_width);
        assert!(saved.last_updated > 0);
    }

    #[test]
    fn test_saved_config_survives_restart() {
        let store = SharedStore::default();
        let mut first = presenter(&["a.png", "b.png", "c.png"], &store);
        first.open_editor();
        let editor = first.editor_mut().unwrap();
        editor.reorder(2, 0);
        editor.set_option(&ImageRef::new("a.png"), OptionField::CropFromTop, false);
        first.save_editor();

        let second = presenter(&["a.png", "b.png", "c.png"], &store);
        assert_eq!(second.selected(), first.selected());
        assert_eq!(second.options_for(&ImageRef::new("a.png")), first.options_for(&ImageRef::new("a.png")));
    }

    #[test]
    fn test_hide_selector_cancels_but_keeps_option_edits() {
        let store = SharedStore::default();
        let mut presenter = presenter(&["a.png", "b.png"], &store);

        presenter.toggle_configure();
        let editor = presenter.editor_mut().unwrap();
        editor.toggle_select(&ImageRef::new("a.png"));
        editor.set_option(&ImageRef::new("b.png"), OptionField::FullWidth, true);
        presenter.toggle_configure();

        assert_eq!(presenter.screen(), Screen::Player);
        assert_eq!(presenter.selected(), refs(&["a.png", "b.png"]).as_slice());
        assert!(presenter.options_for(&ImageRef::new("b.png")).full_width);
        assert!(store.load().unwrap().image_options[&ImageRef::new("b.png")].full_width);
    }

    #[test]
    fn test_saving_empty_selection_shows_empty_screen() {
        let store = SharedStore::default();
        let mut presenter = presenter(&["a.png", "b.png"], &store);

        presenter.open_editor();
        let editor = presenter.editor_mut().unwrap();
        editor.toggle_select(&ImageRef::new("a.png"));
        editor.toggle_select(&ImageRef::new("b.png"));
        presenter.save_editor();

        assert_eq!(presenter.screen(), Screen::Empty);
        assert!(presenter.player().is_none());
        assert_eq!(presenter.toggle_label(), Some("Configure Slides"));

        // An empty saved selection reads back as "select everything"
        let restarted = self::presenter(&["a.png", "b.png"], &store);
        assert_eq!(restarted.selected(), refs(&["a.png", "b.png"]).as_slice());
    }
}
