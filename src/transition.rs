use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use raylib::prelude::*;

/// Named cosmetic effect played when the slideshow moves to another slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Fade,
    WipeLeftToRight,
    WipeRightToLeft,
    ShrinkGrow,
    FadeThroughWhite,
}

impl Transition {
    pub const ALL: [Transition; 5] = [
        Transition::Fade,
        Transition::WipeLeftToRight,
        Transition::WipeRightToLeft,
        Transition::ShrinkGrow,
        Transition::FadeThroughWhite,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Transition::Fade => "fade",
            Transition::WipeLeftToRight => "wipe-left-to-right",
            Transition::WipeRightToLeft => "wipe-right-to-left",
            Transition::ShrinkGrow => "shrink-grow",
            Transition::FadeThroughWhite => "fade-through-white",
        }
    }

    /// Style a slide starts from when it comes in.
    pub fn entering(self) -> SlideStyle {
        match self {
            Transition::Fade => SlideStyle { opacity: 0.0, ..SlideStyle::REST },
            Transition::WipeLeftToRight => SlideStyle { offset_x: 1.0, ..SlideStyle::REST },
            Transition::WipeRightToLeft => SlideStyle { offset_x: -1.0, ..SlideStyle::REST },
            Transition::ShrinkGrow => SlideStyle { scale: 0.5, opacity: 0.0, ..SlideStyle::REST },
            Transition::FadeThroughWhite => SlideStyle { opacity: 0.0, brightness: 2.0, ..SlideStyle::REST },
        }
    }

    /// Style a slide ends on when it goes out.
    pub fn exiting(self) -> SlideStyle {
        match self {
            Transition::WipeLeftToRight => SlideStyle { offset_x: -1.0, ..SlideStyle::REST },
            Transition::WipeRightToLeft => SlideStyle { offset_x: 1.0, ..SlideStyle::REST },
            other => other.entering(),
        }
    }

    /// Outgoing slide style, `progress` in `0.0..=1.0`.
    pub fn exit_style(self, progress: f32) -> SlideStyle {
        SlideStyle::REST.lerp(self.exiting(), eased(progress))
    }

    /// Incoming slide style, `progress` in `0.0..=1.0`.
    pub fn enter_style(self, progress: f32) -> SlideStyle {
        self.entering().lerp(SlideStyle::REST, eased(progress))
    }
}

fn eased(progress: f32) -> f32 {
    ease::cubic_in_out(progress.clamp(0.0, 1.0), 0.0, 1.0, 1.0)
}

/// Visual state of the slide being drawn.
///
/// `offset_x` is a fraction of the screen width, `brightness` above 1.0
/// washes the image towards white.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideStyle {
    pub offset_x: f32,
    pub scale: f32,
    pub opacity: f32,
    pub brightness: f32,
}

impl SlideStyle {
    pub const REST: SlideStyle = SlideStyle {
        offset_x: 0.0,
        scale: 1.0,
        opacity: 1.0,
        brightness: 1.0,
    };

    pub fn lerp(self, to: SlideStyle, t: f32) -> SlideStyle {
        SlideStyle {
            offset_x: lerp(self.offset_x, to.offset_x, t),
            scale: lerp(self.scale, to.scale, t),
            opacity: lerp(self.opacity, to.opacity, t),
            brightness: lerp(self.brightness, to.brightness, t),
        }
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Picks the effect for each advance.
pub trait TransitionSource {
    fn next_transition(&mut self) -> Transition;
}

/// Uniform pick over the whole palette.
pub struct RandomTransitions<R> {
    rng: R,
}

impl<R: Rng> RandomTransitions<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> TransitionSource for RandomTransitions<R> {
    fn next_transition(&mut self) -> Transition {
        Transition::ALL[self.rng.random_range(0..Transition::ALL.len())]
    }
}

/// Produces a fresh source for every player the shell starts.
pub type TransitionFactory = Box<dyn FnMut() -> Box<dyn TransitionSource>>;

/// Thread-local randomness, or a reproducible sequence when `seed` is given.
pub fn transition_factory(seed: Option<u64>) -> TransitionFactory {
    match seed {
        Some(seed) => {
            let mut run = 0u64;
            Box::new(move || {
                let rng = StdRng::seed_from_u64(seed.wrapping_add(run));
                run += 1;
                Box::new(RandomTransitions::new(rng)) as Box<dyn TransitionSource>
            })
        }
        None => Box::new(|| Box::new(RandomTransitions::new(rand::rng())) as Box<dyn TransitionSource>),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_distinct() {
        let names: std::collections::HashSet<_> = Transition::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(names.len(), Transition::ALL.len());
    }

    #[test]
    fn test_styles_start_and_end_at_rest() {
        for transition in Transition::ALL {
            assert_eq!(transition.exit_style(0.0), SlideStyle::REST);
            assert_eq!(transition.enter_style(1.0), SlideStyle::REST);
            assert_eq!(transition.exit_style(1.0), transition.exiting());
            assert_eq!(transition.enter_style(0.0), transition.entering());
        }
    }

    #[test]
    fn test_wipes_move_in_opposite_directions() {
        assert!(Transition::WipeLeftToRight.entering().offset_x > 0.0);
        assert!(Transition::WipeLeftToRight.exiting().offset_x < 0.0);
        assert!(Transition::WipeRightToLeft.entering().offset_x < 0.0);
        assert!(Transition::WipeRightToLeft.exiting().offset_x > 0.0);
    }

    #[test]
    fn test_fade_through_white_brightens() {
        let halfway = Transition::FadeThroughWhite.exit_style(0.5);
        assert!(halfway.brightness > 1.0);
        assert!(halfway.opacity < 1.0);
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(Transition::Fade.exit_style(3.0), Transition::Fade.exiting());
        assert_eq!(Transition::Fade.enter_style(-1.0), Transition::Fade.entering());
    }

    #[test]
    fn test_random_source_covers_palette() {
        let mut source = RandomTransitions::new(StdRng::seed_from_u64(7));
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(source.next_transition());
        }
        assert_eq!(seen.len(), Transition::ALL.len());
    }

    #[test]
    fn test_seeded_factory_is_reproducible() {
        let mut first = transition_factory(Some(42));
        let mut second = transition_factory(Some(42));
        let mut a = first();
        let mut b = second();
        for _ in 0..20 {
            assert_eq!(a.next_transition(), b.next_transition());
        }
    }
}
