/// One-shot countdown driven by frame time.
///
/// At most one deadline is pending per timer; scheduling again replaces it.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Timer {
    remaining: Option<f32>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, seconds: f32) {
        self.remaining = Some(seconds);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> Option<f32> {
        self.remaining
    }

    /// Advances the countdown. Returns true exactly once, on the frame the
    /// deadline passes; the timer is disarmed afterwards.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.remaining.as_mut() else {
            return false;
        };
        *remaining -= dt;
        if *remaining <= 0.0 {
            self.remaining = None;
            true
        } else {
            false
        }
    }
}
