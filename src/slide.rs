use raylib::prelude::*;
use crate::config::{ImageOptions, ImageRef};
use crate::constants::*;
use crate::filename::extract_title_and_subtitle;

/// One entry of the playback sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub image: ImageRef,
    pub title: String,
    pub subtitle: String,
    pub options: ImageOptions,
}

impl Slide {
    pub fn new(image: ImageRef, options: ImageOptions) -> Self {
        let parsed = extract_title_and_subtitle(image.file_name());
        Self {
            image,
            title: parsed.title,
            subtitle: parsed.subtitle,
            options,
        }
    }

    pub fn fit(&self) -> RenderFit {
        RenderFit::from_options(&self.options)
    }
}

/// How an image fills its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFit {
    /// Scaled down to fit entirely, letterboxed.
    Contain,
    /// Scaled to fill the frame, cropped around the anchor.
    Cover { from_top: bool },
}

impl RenderFit {
    pub fn from_options(options: &ImageOptions) -> Self {
        if options.full_width {
            RenderFit::Cover { from_top: options.crop_from_top }
        } else {
            RenderFit::Contain
        }
    }
}

/// Area the current slide image is drawn into: at most `MAX_FRAME_WIDTH`
/// wide and `MAX_FRAME_HEIGHT_RATIO` of the screen high, centred.
pub fn slide_frame(screen_width: f32, screen_height: f32) -> Rectangle {
    let width = screen_width.min(MAX_FRAME_WIDTH);
    let height = screen_height * MAX_FRAME_HEIGHT_RATIO;
    Rectangle::new(
        (screen_width - width) * 0.5,
        (screen_height - height) * 0.5,
        width,
        height,
    )
}

/// Source rectangle within the texture and destination rectangle on screen.
pub fn layout_image(tex_width: f32, tex_height: f32, frame: Rectangle, fit: RenderFit) -> (Rectangle, Rectangle) {
    if tex_width <= 0.0 || tex_height <= 0.0 || frame.width <= 0.0 || frame.height <= 0.0 {
        return (Rectangle::new(0.0, 0.0, 0.0, 0.0), Rectangle::new(frame.x, frame.y, 0.0, 0.0));
    }

    match fit {
        RenderFit::Contain => {
            let scale = (frame.width / tex_width).min(frame.height / tex_height);
            let scaled_width = tex_width * scale;
            let scaled_height = tex_height * scale;
            (
                Rectangle::new(0.0, 0.0, tex_width, tex_height),
                Rectangle::new(
                    frame.x + (frame.width - scaled_width) * 0.5,
                    frame.y + (frame.height - scaled_height) * 0.5,
                    scaled_width,
                    scaled_height,
                ),
            )
        }
        RenderFit::Cover { from_top } => {
            let scale = (frame.width / tex_width).max(frame.height / tex_height);
            // Portion of the texture that lands inside the frame
            let source_width = frame.width / scale;
            let source_height = frame.height / scale;
            let source_x = (tex_width - source_width) * 0.5;
            let source_y = if from_top { 0.0 } else { tex_height - source_height };
            (
                Rectangle::new(source_x, source_y, source_width, source_height),
                frame,
            )
        }
    }
}
