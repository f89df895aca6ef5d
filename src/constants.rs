pub const WINDOW_WIDTH: i32 = 1280;           // Initial window width
pub const WINDOW_HEIGHT: i32 = 720;           // Initial window height
pub const FPS: u32 = 60;                      // Frames per second

pub const TRANSITION_DURATION: f32 = 0.3;     // Duration of a slide transition effect (seconds)
pub const DISPLAY_DURATION: f32 = 4.0;        // Time a slide stays up before auto-advance (seconds)
pub const IDLE_TIMEOUT: f32 = 3.0;            // Pointer inactivity before controls fade (seconds)

pub const MAX_FRAME_WIDTH: f32 = 1200.0;      // Widest the slide image may be drawn
pub const MAX_FRAME_HEIGHT_RATIO: f32 = 0.8;  // Tallest the slide image may be, relative to the window

pub const APP_DIR: &str = "portfolio-slides";
pub const CONFIG_FILENAME: &str = "slide-presentation-config.json";

pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];
