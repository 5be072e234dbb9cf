//! Presentation lifecycle state machine.
//!
//! One controller drives one bar through
//! Hidden -> Showing -> Shown -> Dismissing -> Hidden. Time is injected
//! explicitly (`show_at`, `dismiss_at`, `tick_at`) so transitions are
//! deterministic under test; the `Flashbar` facade supplies `Instant::now()`
//! for interactive use.
//!
//! Single-threaded by design: callers serialize `show`/`dismiss`/`tick`, and
//! every listener callback runs inline on the calling thread.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::anim::AnimSpec;
use crate::bar::config::{DismissEvent, Vibration};
use crate::bar::listener::EventDispatcher;

/// Lifecycle state of one presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationState {
    Hidden,
    Showing,
    Shown,
    Dismissing,
}

/// Owns the lifecycle of a single bar presentation.
pub struct PresentationController {
    state: PresentationState,
    enter: AnimSpec,
    exit: AnimSpec,
    duration: Option<Duration>,
    vibrate_on: Vec<Vibration>,
    dispatcher: EventDispatcher,
    /// Start of the transition currently in flight.
    transition_started: Option<Instant>,
    /// Armed auto-dismiss deadline; disarmed by any explicit dismissal.
    deadline: Option<Instant>,
    /// Cause of the dismissal currently in flight.
    pending_event: Option<DismissEvent>,
    /// Progress fraction already reported for the current transition.
    last_progress: f32,
    /// While a swipe gesture is active the auto-dismiss deadline is held.
    swiping: bool,
    pending_vibration: Option<Vibration>,
}

impl PresentationController {
    pub fn new(
        enter: AnimSpec,
        exit: AnimSpec,
        duration: Option<Duration>,
        vibrate_on: Vec<Vibration>,
        dispatcher: EventDispatcher,
    ) -> Self {
        Self {
            state: PresentationState::Hidden,
            enter,
            exit,
            duration,
            vibrate_on,
            dispatcher,
            transition_started: None,
            deadline: None,
            pending_event: None,
            last_progress: 0.0,
            swiping: false,
            pending_vibration: None,
        }
    }

    pub fn state(&self) -> PresentationState {
        self.state
    }

    /// True while the bar is animating in (partial appearance).
    pub fn is_showing(&self) -> bool {
        self.state == PresentationState::Showing
    }

    /// True once the bar has completely appeared.
    pub fn is_shown(&self) -> bool {
        self.state == PresentationState::Shown
    }

    pub fn is_hidden(&self) -> bool {
        self.state == PresentationState::Hidden
    }

    /// Fraction of the bar still off-surface, for placement by the renderer.
    /// 1.0 when hidden, 0.0 when fully shown.
    pub fn offset_fraction(&self) -> f32 {
        match self.state {
            PresentationState::Hidden => 1.0,
            PresentationState::Showing => 1.0 - self.last_progress,
            PresentationState::Shown => 0.0,
            PresentationState::Dismissing => self.last_progress,
        }
    }

    /// Starts the enter transition. No-op unless the bar is hidden.
    ///
    /// The auto-dismiss deadline (if a duration is configured) is armed here,
    /// from the moment of the `show` call.
    pub fn show_at(&mut self, now: Instant) {
        if self.state != PresentationState::Hidden {
            debug!(state = ?self.state, "show ignored");
            return;
        }

        self.state = PresentationState::Showing;
        self.transition_started = Some(now);
        self.last_progress = 0.0;
        self.deadline = self.duration.map(|d| now + d);
        self.dispatcher.emit_showing();
        self.advance(now);
    }

    /// Starts the exit transition with the given cause. No-op unless the bar
    /// is completely shown; in particular a second `dismiss` while one is
    /// already in flight does nothing.
    pub fn dismiss_at(&mut self, now: Instant, event: DismissEvent) {
        if self.state != PresentationState::Shown {
            debug!(state = ?self.state, event = %event, "dismiss ignored");
            return;
        }

        self.start_dismiss(event);
        self.transition_started = Some(now);
        self.advance(now);
    }

    /// Advances the active transition and fires the auto-dismiss deadline.
    /// Hosts call this from their frame tick.
    pub fn tick_at(&mut self, now: Instant) {
        if self.state == PresentationState::Shown && !self.swiping {
            if let Some(deadline) = self.deadline {
                if now >= deadline {
                    self.start_dismiss(DismissEvent::Timeout);
                    self.transition_started = Some(now);
                }
            }
        }
        self.advance(now);
    }

    /// Holds or releases the auto-dismiss deadline while a swipe gesture is
    /// in flight. A deadline that elapses during the hold fires on the first
    /// tick after release.
    pub fn set_swiping(&mut self, swiping: bool) {
        self.swiping = swiping;
    }

    /// Takes the feedback request produced by the latest transition, if any.
    pub fn take_vibration(&mut self) -> Option<Vibration> {
        self.pending_vibration.take()
    }

    fn start_dismiss(&mut self, event: DismissEvent) {
        debug!(event = %event, "dismissing bar");
        self.state = PresentationState::Dismissing;
        self.last_progress = 0.0;
        self.deadline = None;
        self.pending_event = Some(event);
        self.dispatcher
            .emit_dismissing(event == DismissEvent::Swipe);
    }

    fn advance(&mut self, now: Instant) {
        match self.state {
            PresentationState::Showing => {
                let progress = Self::fraction(self.transition_started, now, self.enter.duration);
                if progress > self.last_progress {
                    self.last_progress = progress;
                    self.dispatcher.emit_show_progress(progress);
                }
                if progress >= 1.0 {
                    self.state = PresentationState::Shown;
                    self.transition_started = None;
                    if self.vibrate_on.contains(&Vibration::Show) {
                        self.pending_vibration = Some(Vibration::Show);
                    }
                    self.dispatcher.emit_shown();
                }
            }
            PresentationState::Dismissing => {
                let progress = Self::fraction(self.transition_started, now, self.exit.duration);
                if progress > self.last_progress {
                    self.last_progress = progress;
                    self.dispatcher.emit_dismiss_progress(progress);
                }
                if progress >= 1.0 {
                    self.state = PresentationState::Hidden;
                    self.transition_started = None;
                    let event = self.pending_event.take().unwrap_or(DismissEvent::Manual);
                    if self.vibrate_on.contains(&Vibration::Dismiss) {
                        self.pending_vibration = Some(Vibration::Dismiss);
                    }
                    self.dispatcher.emit_dismissed(event);
                }
            }
            PresentationState::Hidden | PresentationState::Shown => {}
        }
    }

    /// Linear progress of a transition. Zero-length transitions complete
    /// immediately.
    fn fraction(started: Option<Instant>, now: Instant, total: Duration) -> f32 {
        let Some(started) = started else {
            return 1.0;
        };
        if total.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(started);
        (elapsed.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
    }
}
