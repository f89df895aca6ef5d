//! Editing session over which images are shown, in what order, and how.

use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

use crate::config::{ImageOptions, ImageRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Editing,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionField {
    FullWidth,
    CropFromTop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropZone {
    Selected,
    Available,
}

/// End of a drag that started on row `source_index` of the selected list.
/// `destination` is `None` when the row was released outside any list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEnd {
    pub source_index: usize,
    pub destination: Option<(DropZone, usize)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Saved,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorOutcome {
    pub kind: OutcomeKind,
    pub selected: Vec<ImageRef>,
    pub options: HashMap<ImageRef, ImageOptions>,
}

// `selected` and `available` stay disjoint and together cover the universe.
pub struct SelectionEditor {
    universe: HashSet<ImageRef>,
    initial_selected: Vec<ImageRef>,
    initial_available: Vec<ImageRef>,
    selected: Vec<ImageRef>,
    available: Vec<ImageRef>,
    options: HashMap<ImageRef, ImageOptions>,
    state: EditorState,
}

impl SelectionEditor {
    pub fn new(
        universe: &[ImageRef],
        initial_selected: &[ImageRef],
        initial_options: &HashMap<ImageRef, ImageOptions>,
    ) -> Self {
        let known: HashSet<ImageRef> = universe.iter().cloned().collect();

        let mut seen = HashSet::new();
        let selected: Vec<ImageRef> = initial_selected
            .iter()
            .filter(|image| known.contains(*image) && seen.insert((*image).clone()))
            .cloned()
            .collect();

        let available: Vec<ImageRef> = universe
            .iter()
            .filter(|image| !seen.contains(*image))
            .cloned()
            .collect();

        let mut options: HashMap<ImageRef, ImageOptions> =
            universe.iter().map(|image| (image.clone(), ImageOptions::default())).collect();
        for (image, image_options) in initial_options {
            if known.contains(image) {
                options.insert(image.clone(), *image_options);
            }
        }

        Self {
            universe: known,
            initial_selected: selected.clone(),
            initial_available: available.clone(),
            selected,
            available,
            options,
            state: EditorState::Editing,
        }
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn selected(&self) -> &[ImageRef] {
        &self.selected
    }

    pub fn available(&self) -> &[ImageRef] {
        &self.available
    }

    pub fn options_for(&self, image: &ImageRef) -> ImageOptions {
        self.options.get(image).copied().unwrap_or_default()
    }

    pub fn toggle_select(&mut self, image: &ImageRef) -> bool {
        if !self.check_editable("toggle") || !self.check_known(image) {
            return false;
        }

        if let Some(position) = self.selected.iter().position(|i| i == image) {
            let removed = self.selected.remove(position);
            self.available.push(removed);
        } else if let Some(position) = self.available.iter().position(|i| i == image) {
            let added = self.available.remove(position);
            self.selected.push(added);
        }
        true
    }

    // A move, not a swap
    pub fn reorder(&mut self, source: usize, destination: usize) -> bool {
        if !self.check_editable("reorder") {
            return false;
        }
        let len = self.selected.len();
        if source >= len || destination >= len {
            warn!(source, destination, len, "Reorder index out of range");
            return false;
        }

        let moved = self.selected.remove(source);
        self.selected.insert(destination, moved);
        true
    }

    // Only drops back onto the selected list reorder anything
    pub fn finish_drag(&mut self, drag: DragEnd) -> bool {
        match drag.destination {
            Some((DropZone::Selected, destination)) => self.reorder(drag.source_index, destination),
            _ => false,
        }
    }

    pub fn set_option(&mut self, image: &ImageRef, field: OptionField, value: bool) -> bool {
        if !self.check_editable("set option") || !self.check_known(image) {
            return false;
        }

        let options = self.options.entry(image.clone()).or_default();
        match field {
            OptionField::FullWidth => options.full_width = value,
            OptionField::CropFromTop => options.crop_from_top = value,
        }
        true
    }

    pub fn save(&mut self) -> Option<EditorOutcome> {
        if !self.check_editable("save") {
            return None;
        }
        self.state = EditorState::Closed;
        info!(selected = self.selected.len(), "Selection saved");
        Some(EditorOutcome {
            kind: OutcomeKind::Saved,
            selected: self.selected.clone(),
            options: self.options.clone(),
        })
    }

    /// Restores both lists to how this session started. Option edits made
    /// during the session are kept and handed back as they are.
    pub fn cancel(&mut self) -> Option<EditorOutcome> {
        if !self.check_editable("cancel") {
            return None;
        }
        self.state = EditorState::Closed;
        self.selected = self.initial_selected.clone();
        self.available = self.initial_available.clone();
        info!("Selection edit cancelled");
        Some(EditorOutcome {
            kind: OutcomeKind::Cancelled,
            selected: self.selected.clone(),
            options: self.options.clone(),
        })
    }

    fn check_editable(&self, operation: &str) -> bool {
        if self.state == EditorState::Closed {
            warn!(operation, "Editor already closed");
            return false;
        }
        true
    }

    fn check_known(&self, image: &ImageRef) -> bool {
        if !self.universe.contains(image) {
            warn!(image = %image, "Image is not part of the current universe");
            return false;
        }
        true
    }
}
