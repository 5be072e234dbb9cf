//! Swipe-to-dismiss gesture tracking.
//!
//! Tracks a single pointer gesture (mouse press, drags, release) over the
//! bar. A drag becomes a swipe once its horizontal travel exceeds the touch
//! slop and dominates the vertical travel; on release the gesture either
//! dismisses (past half the bar width, or a fast enough fling in the travel
//! direction) or settles back to rest.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::trace;

/// Horizontal travel (in cells) before a drag is treated as a swipe.
const TOUCH_SLOP: f32 = 1.0;
/// Minimum horizontal fling velocity (cells per second) that dismisses.
const MIN_FLING_VELOCITY: f32 = 40.0;
/// Only movement samples this recent count towards the fling velocity.
const VELOCITY_WINDOW: Duration = Duration::from_millis(100);

/// Pointer input routed to the tracker, in surface cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    Cancel,
}

/// What a pointer event amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// Nothing to report.
    None,
    /// The drag crossed the slop and is now a swipe.
    SwipeStarted,
    /// An active swipe moved; `translation()` changed.
    SwipeMoved,
    /// The gesture ended without dismissing; the bar settles back to rest.
    Settled,
    /// Press and release without meaningful travel.
    Tap,
    /// The swipe passed the distance or velocity threshold.
    Dismissed,
}

struct Gesture {
    down_x: f32,
    down_y: f32,
    swiping: bool,
    samples: VecDeque<(Instant, f32)>,
}

/// Tracks one swipe gesture over a bar of known width.
pub struct SwipeTracker {
    width: f32,
    gesture: Option<Gesture>,
    translation: f32,
}

impl SwipeTracker {
    pub fn new(width: f32) -> Self {
        Self {
            width: width.max(1.0),
            gesture: None,
            translation: 0.0,
        }
    }

    /// Updates the bar width used for the distance threshold and alpha.
    /// Called by the facade after each render.
    pub fn set_width(&mut self, width: f32) {
        self.width = width.max(1.0);
    }

    /// Current horizontal displacement of the bar, in cells.
    pub fn translation(&self) -> f32 {
        self.translation
    }

    /// Opacity of the bar under the current displacement: fades out as the
    /// bar travels towards half its width.
    pub fn alpha(&self) -> f32 {
        (1.0 - 2.0 * self.translation.abs() / self.width).clamp(0.0, 1.0)
    }

    pub fn is_swiping(&self) -> bool {
        self.gesture.as_ref().is_some_and(|g| g.swiping)
    }

    /// Feeds one pointer event into the tracker.
    pub fn handle_at(&mut self, event: PointerEvent, now: Instant) -> SwipeOutcome {
        match event {
            PointerEvent::Down { x, y } => {
                let mut samples = VecDeque::new();
                samples.push_back((now, x));
                self.gesture = Some(Gesture {
                    down_x: x,
                    down_y: y,
                    swiping: false,
                    samples,
                });
                self.translation = 0.0;
                SwipeOutcome::None
            }
            PointerEvent::Move { x, y } => self.on_move(x, y, now),
            PointerEvent::Up { x, y } => self.on_up(x, y, now),
            PointerEvent::Cancel => {
                let was_swiping = self.is_swiping();
                self.gesture = None;
                self.translation = 0.0;
                if was_swiping {
                    SwipeOutcome::Settled
                } else {
                    SwipeOutcome::None
                }
            }
        }
    }

    fn on_move(&mut self, x: f32, y: f32, now: Instant) -> SwipeOutcome {
        let Some(gesture) = self.gesture.as_mut() else {
            return SwipeOutcome::None;
        };

        gesture.samples.push_back((now, x));
        Self::prune_samples(&mut gesture.samples, now);

        let dx = x - gesture.down_x;
        let dy = y - gesture.down_y;

        let mut started = false;
        if !gesture.swiping && dx.abs() > TOUCH_SLOP && dy.abs() < dx.abs() / 2.0 {
            gesture.swiping = true;
            started = true;
            trace!(dx, "swipe started");
        }

        if gesture.swiping {
            self.translation = dx - TOUCH_SLOP * dx.signum();
            if started {
                SwipeOutcome::SwipeStarted
            } else {
                SwipeOutcome::SwipeMoved
            }
        } else {
            SwipeOutcome::None
        }
    }

    fn on_up(&mut self, x: f32, y: f32, now: Instant) -> SwipeOutcome {
        let Some(mut gesture) = self.gesture.take() else {
            return SwipeOutcome::None;
        };

        gesture.samples.push_back((now, x));
        Self::prune_samples(&mut gesture.samples, now);

        let dx = x - gesture.down_x;
        let dy = y - gesture.down_y;
        self.translation = 0.0;

        if gesture.swiping {
            let velocity = Self::velocity(&gesture.samples);
            let past_distance = dx.abs() > self.width / 2.0;
            let fling =
                velocity.abs() >= MIN_FLING_VELOCITY && (velocity < 0.0) == (dx < 0.0);
            trace!(dx, velocity, past_distance, fling, "swipe released");
            if past_distance || fling {
                SwipeOutcome::Dismissed
            } else {
                SwipeOutcome::Settled
            }
        } else if dx.abs() <= TOUCH_SLOP && dy.abs() <= TOUCH_SLOP {
            SwipeOutcome::Tap
        } else {
            SwipeOutcome::None
        }
    }

    fn prune_samples(samples: &mut VecDeque<(Instant, f32)>, now: Instant) {
        while let Some(&(t, _)) = samples.front() {
            if now.saturating_duration_since(t) > VELOCITY_WINDOW && samples.len() > 1 {
                samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Horizontal velocity over the retained sample window, cells per second.
    fn velocity(samples: &VecDeque<(Instant, f32)>) -> f32 {
        let (Some(&(t0, x0)), Some(&(t1, x1))) = (samples.front(), samples.back()) else {
            return 0.0;
        };
        let dt = t1.saturating_duration_since(t0).as_secs_f32();
        if dt <= f32::EPSILON {
            return 0.0;
        }
        (x1 - x0) / dt
    }
}
