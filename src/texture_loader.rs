use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result, anyhow};
use raylib::prelude::*;
use exif::{Reader, Tag, Value, In};
use tracing::{debug, error, info, warn};

use crate::config::ImageRef;
use crate::constants::IMAGE_EXTENSIONS;

pub type Textures = HashMap<ImageRef, Texture2D>;

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let entries = fs::read_dir(dir_path)
        .with_context(|| format!("Failed to read directory {:?}", dir_path))?;

    for entry in entries {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();
        if path.is_file() && has_image_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Textures for every image that could be loaded, keyed by reference.
/// The returned universe keeps directory order and skips failed images.
pub fn load_gallery(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    paths: &[PathBuf],
) -> (Vec<ImageRef>, Textures) {
    let mut universe = Vec::new();
    let mut textures = HashMap::new();

    for path in paths {
        match load_texture_with_exif_rotation(rl, thread, path) {
            Ok(texture) => {
                let image = ImageRef::from_path(path);
                universe.push(image.clone());
                textures.insert(image, texture);
            }
            Err(e) => error!("Error processing image {:?}: {e:#}", path.file_name().unwrap_or(path.as_os_str())),
        }
    }

    info!(loaded = universe.len(), found = paths.len(), "Images loaded");
    (universe, textures)
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D> {
    let file_bytes = fs::read(image_path)
        .with_context(|| format!("Failed to read file {:?}", image_path))?;

    let extension = image_path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();
    let orientation = if extension == "jpg" || extension == "jpeg" {
        read_orientation(image_path, &file_bytes)
    } else {
        1
    };

    // Provide extension hint for loading from memory
    let mut image = Image::load_image_from_mem(&(".".to_string() + &extension), &file_bytes)
        .map_err(|e| anyhow!("Failed to load image data for {:?}: {}", image_path, e))?;

    // 1 = Top-left (Normal)
    // 3 = Bottom-right (180 deg)
    // 6 = Top-right (90 deg clockwise)
    // 8 = Bottom-left (270 deg clockwise / 90 deg counter-clockwise)
    // Others involve flips, ignored.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
            debug!(path = ?image_path, "Applied 180 deg rotation");
        }
        6 => {
            image.rotate_cw();
            debug!(path = ?image_path, "Applied 90 deg CW rotation");
        }
        8 => {
            image.rotate_ccw();
            debug!(path = ?image_path, "Applied 90 deg CCW rotation");
        }
        _ => {}
    }

    let texture = rl.load_texture_from_image(thread, &image)
        .map_err(|e| anyhow!("Failed to create texture for {:?}: {}", image_path, e))?;

    // Unload the Image data from CPU memory
    drop(image);

    Ok(texture)
}

/// EXIF orientation tag, 1 when absent or unreadable.
fn read_orientation(image_path: &Path, file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| match &field.value {
                Value::Short(values) => values.first().copied(),
                _ => None,
            })
            .unwrap_or(1),
        Err(e) => {
            // Non-critical: proceed without rotation
            warn!("Could not read EXIF data for {:?}: {}", image_path.file_name().unwrap_or(image_path.as_os_str()), e);
            1
        }
    }
}
