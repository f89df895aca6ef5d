use tracing::{debug, info};
use crate::constants::*;
use crate::slide::Slide;
use crate::timer::Timer;
use crate::transition::{SlideStyle, Transition, TransitionSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub current_index: usize,
    pub next_index: usize,
    pub is_playing: bool,
    pub active_transition: Transition,
    pub is_transitioning: bool,
}

// Time only moves through `update`; each concern owns a single timer.
pub struct SlideshowPlayer {
    slides: Vec<Slide>,
    playback: PlaybackState,
    pending_direction: Direction,

    advance_timer: Timer,
    transition_timer: Timer,
    idle_timer: Timer,

    controls_visible: bool,
    // Time since the last transition landed, while the new slide animates in
    entering: Option<f32>,

    transitions: Box<dyn TransitionSource>,
}

impl SlideshowPlayer {
    pub fn new(slides: Vec<Slide>, transitions: Box<dyn TransitionSource>) -> Option<Self> {
        if slides.is_empty() {
            return None;
        }

        let mut player = Self {
            playback: PlaybackState {
                current_index: 0,
                next_index: 1 % slides.len(),
                is_playing: true,
                active_transition: Transition::ALL[0],
                is_transitioning: false,
            },
            slides,
            pending_direction: Direction::Forward,
            advance_timer: Timer::new(),
            transition_timer: Timer::new(),
            idle_timer: Timer::new(),
            controls_visible: true,
            entering: None,
            transitions,
        };
        player.reschedule_advance();
        info!(slides = player.slides.len(), "Slideshow started");
        Some(player)
    }

    pub fn state(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn current_slide(&self) -> &Slide {
        &self.slides[self.playback.current_index]
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn progress(&self) -> f32 {
        self.playback.current_index as f32 / self.slides.len() as f32
    }

    /// Ignored while another transition is in flight; the request is
    /// dropped, not queued.
    pub fn advance(&mut self, direction: Direction) -> bool {
        if self.playback.is_transitioning {
            debug!(?direction, "Advance ignored, transition in flight");
            return false;
        }

        let transition = self.transitions.next_transition();
        debug!(?direction, effect = transition.name(), "Starting transition");

        self.playback.active_transition = transition;
        self.playback.is_transitioning = true;
        self.pending_direction = direction;
        self.entering = None;

        self.advance_timer.cancel();
        self.transition_timer.schedule(TRANSITION_DURATION);
        true
    }

    pub fn next(&mut self) -> bool {
        self.advance(Direction::Forward)
    }

    pub fn previous(&mut self) -> bool {
        self.advance(Direction::Backward)
    }

    // Resuming waits a full display duration again
    pub fn toggle_play_pause(&mut self) {
        self.playback.is_playing = !self.playback.is_playing;
        info!(playing = self.playback.is_playing, "Playback toggled");
        self.reschedule_advance();
    }

    pub fn pointer_moved(&mut self) {
        self.controls_visible = true;
        self.idle_timer.schedule(IDLE_TIMEOUT);
    }

    pub fn update(&mut self, dt: f32) {
        if self.idle_timer.tick(dt) {
            self.controls_visible = false;
        }

        if let Some(elapsed) = self.entering.as_mut() {
            *elapsed += dt;
            if *elapsed >= TRANSITION_DURATION {
                self.entering = None;
            }
        }

        // Both timers are never armed together, but sample them before acting
        // so a freshly scheduled countdown does not lose this frame's dt.
        let transition_done = self.transition_timer.tick(dt);
        let advance_due = self.advance_timer.tick(dt);

        if transition_done {
            self.finish_transition();
        }
        if advance_due {
            self.advance(Direction::Forward);
        }
    }

    pub fn stop(&mut self) {
        debug!(
            advance_pending = self.advance_timer.is_armed(),
            transitioning = self.playback.is_transitioning,
            "Slideshow stopped"
        );
        self.advance_timer.cancel();
        self.transition_timer.cancel();
        self.idle_timer.cancel();
        self.playback.is_transitioning = false;
        self.entering = None;
    }

    pub fn slide_style(&self) -> SlideStyle {
        let transition = self.playback.active_transition;
        if self.playback.is_transitioning {
            let remaining = self.transition_timer.remaining().unwrap_or(0.0);
            transition.exit_style(1.0 - remaining / TRANSITION_DURATION)
        } else if let Some(elapsed) = self.entering {
            transition.enter_style(elapsed / TRANSITION_DURATION)
        } else {
            SlideStyle::REST
        }
    }

    fn finish_transition(&mut self) {
        let len = self.slides.len();
        let step = |index: usize| match self.pending_direction {
            Direction::Forward => (index + 1) % len,
            Direction::Backward => (index + len - 1) % len,
        };
        self.playback.current_index = step(self.playback.current_index);
        self.playback.next_index = step(self.playback.next_index);
        self.playback.is_transitioning = false;
        self.entering = Some(0.0);

        debug!(index = self.playback.current_index, "Transition finished");
        self.reschedule_advance();
    }

    fn reschedule_advance(&mut self) {
        self.advance_timer.cancel();
        if self.playback.is_playing && !self.playback.is_transitioning {
            self.advance_timer.schedule(DISPLAY_DURATION);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ImageOptions, ImageRef};
    use std::collections::VecDeque;

    /// Replays a fixed list of effects, cycling when exhausted.
    struct ScriptedTransitions {
        script: VecDeque<Transition>,
    }

    impl ScriptedTransitions {
        fn boxed(script: &[Transition]) -> Box<dyn TransitionSource> {
            Box::new(Self { script: script.iter().copied().collect() })
        }
    }

    impl TransitionSource for ScriptedTransitions {
        fn next_transition(&mut self) -> Transition {
            let next = self.script.pop_front().unwrap_or(Transition::Fade);
            self.script.push_back(next);
            next
        }
    }

    fn slides(count: usize) -> Vec<Slide> {
        (0..count)
            .map(|i| Slide::new(ImageRef::new(format!("images/Client {i} - Project.png")), ImageOptions::default()))
            .collect()
    }

    fn player(count: usize) -> SlideshowPlayer {
        SlideshowPlayer::new(slides(count), ScriptedTransitions::boxed(&[Transition::Fade])).unwrap()
    }

    fn finish_transition(player: &mut SlideshowPlayer) {
        player.update(TRANSITION_DURATION);
    }

    #[test]
    fn test_empty_sequence_has_no_player() {
        assert!(SlideshowPlayer::new(Vec::new(), ScriptedTransitions::boxed(&[])).is_none());
    }

    #[test]
    fn test_initial_state() {
        let player = player(3);
        let state = player.state();
        assert_eq!(state.current_index, 0);
        assert_eq!(state.next_index, 1);
        assert!(state.is_playing);
        assert!(!state.is_transitioning);
        assert!(player.controls_visible());
    }

    #[test]
    fn test_single_slide_wraps_to_itself() {
        let mut player = player(1);
        assert_eq!(player.state().next_index, 0);
        assert!(player.next());
        finish_transition(&mut player);
        assert_eq!(player.state().current_index, 0);
        assert_eq!(player.state().next_index, 0);
    }

    #[test]
    fn test_forward_wraparound_after_three_advances() {
        let mut player = player(3);
        for _ in 0..3 {
            assert!(player.advance(Direction::Forward));
            finish_transition(&mut player);
        }
        assert_eq!(player.state().current_index, 0);
        assert_eq!(player.state().next_index, 1);
    }

    #[test]
    fn test_backward_from_first_goes_to_last() {
        let mut player = player(3);
        assert!(player.previous());
        finish_transition(&mut player);
        assert_eq!(player.state().current_index, 2);
        assert_eq!(player.state().next_index, 0);
    }

    #[test]
    fn test_advance_during_transition_is_ignored() {
        let mut player = player(4);
        assert!(player.next());
        let before = *player.state();

        assert!(!player.next());
        assert!(!player.previous());
        assert!(!player.advance(Direction::Forward));
        assert_eq!(player.state().current_index, before.current_index);
        assert_eq!(player.state().next_index, before.next_index);

        finish_transition(&mut player);
        assert_eq!(player.state().current_index, 1);
    }

    #[test]
    fn test_index_changes_only_after_transition_duration() {
        let mut player = player(3);
        player.next();
        player.update(TRANSITION_DURATION * 0.5);
        assert_eq!(player.state().current_index, 0);
        assert!(player.state().is_transitioning);
        player.update(TRANSITION_DURATION * 0.5);
        assert_eq!(player.state().current_index, 1);
        assert!(!player.state().is_transitioning);
    }

    #[test]
    fn test_auto_advance_after_display_duration() {
        let mut player = player(3);
        player.update(DISPLAY_DURATION - 0.5);
        assert!(!player.state().is_transitioning);
        player.update(0.5);
        assert!(player.state().is_transitioning);
        finish_transition(&mut player);
        assert_eq!(player.state().current_index, 1);

        // The next slide gets a full display window again
        player.update(DISPLAY_DURATION - 0.5);
        assert!(!player.state().is_transitioning);
        player.update(0.5);
        assert!(player.state().is_transitioning);
    }

    #[test]
    fn test_pause_stops_auto_advance() {
        let mut player = player(3);
        player.toggle_play_pause();
        assert!(!player.state().is_playing);
        player.update(DISPLAY_DURATION * 5.0);
        assert!(!player.state().is_transitioning);
        assert_eq!(player.state().current_index, 0);
    }

    #[test]
    fn test_resume_waits_full_display_window() {
        let mut player = player(3);
        player.update(DISPLAY_DURATION - 0.5);
        player.toggle_play_pause();
        player.toggle_play_pause();

        player.update(DISPLAY_DURATION - 0.5);
        assert!(!player.state().is_transitioning);
        player.update(0.5);
        assert!(player.state().is_transitioning);
    }

    #[test]
    fn test_pause_does_not_cancel_in_flight_transition() {
        let mut player = player(3);
        player.next();
        player.toggle_play_pause();
        assert!(player.state().is_transitioning);
        finish_transition(&mut player);
        assert_eq!(player.state().current_index, 1);

        // Still paused: no further advance is scheduled
        player.update(DISPLAY_DURATION * 2.0);
        assert_eq!(player.state().current_index, 1);
        assert!(!player.state().is_transitioning);
    }

    #[test]
    fn test_manual_next_restarts_display_window() {
        let mut player = player(3);
        player.update(DISPLAY_DURATION - 0.5);
        player.next();
        finish_transition(&mut player);

        player.update(DISPLAY_DURATION - 0.5);
        assert!(!player.state().is_transitioning);
        assert_eq!(player.state().current_index, 1);
    }

    #[test]
    fn test_transitions_come_from_source() {
        let script = [Transition::WipeLeftToRight, Transition::ShrinkGrow];
        let mut player = SlideshowPlayer::new(slides(3), ScriptedTransitions::boxed(&script)).unwrap();

        player.next();
        assert_eq!(player.state().active_transition, Transition::WipeLeftToRight);
        finish_transition(&mut player);

        player.next();
        assert_eq!(player.state().active_transition, Transition::ShrinkGrow);
    }

    #[test]
    fn test_transition_does_not_change_ordering() {
        let script = [Transition::FadeThroughWhite, Transition::WipeRightToLeft, Transition::Fade];
        let mut player = SlideshowPlayer::new(slides(5), ScriptedTransitions::boxed(&script)).unwrap();
        for expected in 1..=4 {
            player.next();
            finish_transition(&mut player);
            assert_eq!(player.state().current_index, expected);
        }
    }

    #[test]
    fn test_controls_hide_after_idle_and_reappear() {
        let mut player = player(2);
        player.toggle_play_pause();

        player.pointer_moved();
        player.update(IDLE_TIMEOUT - 0.5);
        assert!(player.controls_visible());
        player.pointer_moved();
        player.update(IDLE_TIMEOUT - 0.5);
        assert!(player.controls_visible());
        player.update(0.5);
        assert!(!player.controls_visible());

        player.pointer_moved();
        assert!(player.controls_visible());
    }

    #[test]
    fn test_idle_timer_independent_of_advance() {
        let mut player = player(3);
        player.pointer_moved();
        player.update(IDLE_TIMEOUT);
        assert!(!player.controls_visible());
        assert!(player.advance_timer.is_armed());
        player.update(DISPLAY_DURATION - IDLE_TIMEOUT);
        assert!(player.state().is_transitioning);
    }

    #[test]
    fn test_stop_clears_all_timers() {
        let mut player = player(3);
        player.pointer_moved();
        player.next();
        player.stop();
        assert!(!player.advance_timer.is_armed());
        assert!(!player.transition_timer.is_armed());
        assert!(!player.idle_timer.is_armed());

        player.update(DISPLAY_DURATION * 3.0);
        assert_eq!(player.state().current_index, 0);
    }

    #[test]
    fn test_slide_style_follows_transition() {
        let mut player = SlideshowPlayer::new(slides(2), ScriptedTransitions::boxed(&[Transition::Fade])).unwrap();
        assert_eq!(player.slide_style(), SlideStyle::REST);

        player.next();
        player.update(TRANSITION_DURATION * 0.5);
        let outgoing = player.slide_style();
        assert!(outgoing.opacity < 1.0 && outgoing.opacity > 0.0);

        player.update(TRANSITION_DURATION * 0.5);
        let incoming = player.slide_style();
        assert!(incoming.opacity < 1.0);

        player.update(TRANSITION_DURATION);
        assert_eq!(player.slide_style(), SlideStyle::REST);
    }

    #[test]
    fn test_progress_fraction() {
        let mut player = player(4);
        assert_eq!(player.progress(), 0.0);
        player.next();
        finish_transition(&mut player);
        assert_eq!(player.progress(), 0.25);
    }
}
