#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Screen {
    Fallback, // No images were discovered
    Empty,    // Images exist but none are selected
    Player,   // Slideshow running
    Editor,   // Selection editor open
}
