//! Selection and display-option records shared by the editor, the player
//! and the configuration store.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Stable identifier of a discovered image (its path).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn from_path(path: &Path) -> Self {
        Self(path.to_string_lossy().into_owned())
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit(['/', '\\']).next().unwrap_or("")
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// `crop_from_top` only matters while `full_width` is set, but is stored either way
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOptions {
    pub full_width: bool,
    pub crop_from_top: bool,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            full_width: false,
            crop_from_top: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideConfig {
    pub selected_images: Vec<ImageRef>,
    #[serde(default)]
    pub image_options: HashMap<ImageRef, ImageOptions>,
    #[serde(default)]
    pub last_updated: u64, // epoch millis
}

impl SlideConfig {
    pub fn new(selected_images: Vec<ImageRef>, image_options: HashMap<ImageRef, ImageOptions>) -> Self {
        Self {
            selected_images,
            image_options,
            last_updated: now_millis(),
        }
    }

    /// Drops entries outside `universe` and repeated selections; `None` when
    /// nothing selected survives.
    pub fn restricted_to(&self, universe: &[ImageRef]) -> Option<SlideConfig> {
        let known: HashSet<&ImageRef> = universe.iter().collect();
        let mut seen: HashSet<&ImageRef> = HashSet::new();

        let selected_images: Vec<ImageRef> = self
            .selected_images
            .iter()
            .filter(|image| {
                if !known.contains(image) {
                    debug!(image = %image, "dropping stale selection entry");
                    return false;
                }
                if !seen.insert(*image) {
                    debug!(image = %image, "dropping duplicate selection entry");
                    return false;
                }
                true
            })
            .cloned()
            .collect();

        if selected_images.is_empty() {
            return None;
        }

        let image_options = self
            .image_options
            .iter()
            .filter(|(image, _)| known.contains(image))
            .map(|(image, options)| (image.clone(), *options))
            .collect();

        Some(SlideConfig {
            selected_images,
            image_options,
            last_updated: self.last_updated,
        })
    }
}

pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
