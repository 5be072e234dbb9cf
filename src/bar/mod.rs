//! The flashbar component: configuration, lifecycle, gestures, callbacks.

pub mod builder;
pub mod config;
pub mod controller;
pub mod gesture;
pub mod listener;

use std::time::{Duration, Instant};

use ratatui::layout::Position;
use ratatui::Frame;

pub use builder::{ConfigError, FlashbarBuilder};
pub use config::{
    Action, ActionKind, Callbacks, DismissEvent, FlashbarConfig, Gravity, Icon, ProgressPosition,
    Text, Vibration,
};
pub use controller::{PresentationController, PresentationState};
pub use gesture::{PointerEvent, SwipeOutcome, SwipeTracker};
pub use listener::{BarDismissListener, BarShowListener, EventDispatcher, TapHandler};

use crate::tui::ui::{self, BarLayout, BarView};

/// Preset duration for short-lived bars.
pub const DURATION_SHORT: Duration = Duration::from_millis(1000);
/// Preset duration for longer-lived bars.
pub const DURATION_LONG: Duration = Duration::from_millis(2500);

/// Bar width assumed before the first render supplies the real one.
const DEFAULT_TRACK_WIDTH: f32 = 80.0;

/// A single flashbar presentation.
///
/// Owns the immutable configuration, the lifecycle controller, and (when
/// swipe-to-dismiss is enabled) the gesture tracker. The host drives it from
/// its event loop: route pointer events through
/// [`handle_pointer`](Flashbar::handle_pointer), call
/// [`tick`](Flashbar::tick) once per frame, and [`render`](Flashbar::render)
/// into the frame being drawn.
///
/// One active instance per surface; each `show` should consume a fresh
/// builder result.
pub struct Flashbar {
    config: FlashbarConfig,
    controller: PresentationController,
    dispatcher: EventDispatcher,
    tracker: Option<SwipeTracker>,
    layout: BarLayout,
    phase: usize,
}

impl Flashbar {
    /// Starts a new configuration.
    pub fn builder() -> FlashbarBuilder {
        FlashbarBuilder::new()
    }

    /// Wraps a validated configuration into a presentable bar.
    pub fn new(config: FlashbarConfig) -> Self {
        let dispatcher = EventDispatcher::new(
            config.callbacks.on_show.clone(),
            config.callbacks.on_dismiss.clone(),
            config.callbacks.on_tap.clone(),
            config.callbacks.on_tap_outside.clone(),
        );
        let controller = PresentationController::new(
            config.enter_anim,
            config.exit_anim,
            config.duration,
            config.vibrate_on.clone(),
            dispatcher.clone(),
        );
        let tracker = config
            .swipe_to_dismiss
            .then(|| SwipeTracker::new(DEFAULT_TRACK_WIDTH));
        Self {
            config,
            controller,
            dispatcher,
            tracker,
            layout: BarLayout::default(),
            phase: 0,
        }
    }

    pub fn config(&self) -> &FlashbarConfig {
        &self.config
    }

    /// Hit-test layout from the most recent render.
    pub fn layout(&self) -> &BarLayout {
        &self.layout
    }

    pub fn state(&self) -> PresentationState {
        self.controller.state()
    }

    /// True while the bar is animating in (partial appearance).
    pub fn is_showing(&self) -> bool {
        self.controller.is_showing()
    }

    /// True once the bar has completely appeared.
    pub fn is_shown(&self) -> bool {
        self.controller.is_shown()
    }

    pub fn show(&mut self) {
        self.show_at(Instant::now());
    }

    pub fn show_at(&mut self, now: Instant) {
        self.controller.show_at(now);
    }

    pub fn dismiss(&mut self) {
        self.dismiss_at(Instant::now());
    }

    pub fn dismiss_at(&mut self, now: Instant) {
        self.controller.dismiss_at(now, DismissEvent::Manual);
    }

    /// Advances animations and the auto-dismiss timer. Call once per frame.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        self.phase = self.phase.wrapping_add(1);
        self.controller.tick_at(now);
    }

    /// Takes the surface-feedback request from the latest transition.
    pub fn take_vibration(&mut self) -> Option<Vibration> {
        self.controller.take_vibration()
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        self.handle_pointer_at(event, Instant::now())
    }

    /// Routes a pointer event. Returns whether the bar consumed it.
    ///
    /// Input only lands on a completely shown bar; events arriving while the
    /// bar is hidden or animating cancel any gesture in flight and fall
    /// through to the host.
    pub fn handle_pointer_at(&mut self, event: PointerEvent, now: Instant) -> bool {
        if !self.controller.is_shown() {
            if let Some(tracker) = self.tracker.as_mut() {
                tracker.handle_at(PointerEvent::Cancel, now);
            }
            self.controller.set_swiping(false);
            return false;
        }

        match event {
            PointerEvent::Down { x, y } => {
                let position = Position::new(x as u16, y as u16);
                if let Some(kind) = self.layout.action_at(position) {
                    if let Some(handler) =
                        self.config.action(kind).and_then(|a| a.on_tap.as_ref())
                    {
                        handler();
                    }
                    self.controller.dismiss_at(now, DismissEvent::ActionTap);
                    return true;
                }
                if self.layout.contains(position) {
                    match self.tracker.as_mut() {
                        Some(tracker) => {
                            tracker.handle_at(event, now);
                        }
                        None => self.dispatcher.emit_bar_tap(),
                    }
                    true
                } else {
                    self.dispatcher.emit_tap_outside();
                    if self.config.dismiss_on_tap_outside {
                        self.controller.dismiss_at(now, DismissEvent::TapOutside);
                    }
                    self.config.overlay.is_some() && self.config.overlay_blockable
                }
            }
            PointerEvent::Move { .. } | PointerEvent::Up { .. } | PointerEvent::Cancel => {
                let Some(tracker) = self.tracker.as_mut() else {
                    return false;
                };
                match tracker.handle_at(event, now) {
                    SwipeOutcome::SwipeStarted => {
                        self.controller.set_swiping(true);
                        true
                    }
                    SwipeOutcome::SwipeMoved => true,
                    SwipeOutcome::Settled => {
                        self.controller.set_swiping(false);
                        true
                    }
                    SwipeOutcome::Tap => {
                        self.dispatcher.emit_bar_tap();
                        true
                    }
                    SwipeOutcome::Dismissed => {
                        self.controller.set_swiping(false);
                        self.controller.dismiss_at(now, DismissEvent::Swipe);
                        true
                    }
                    SwipeOutcome::None => false,
                }
            }
        }
    }

    /// Draws the bar into the frame and refreshes the hit-test layout.
    pub fn render(&mut self, frame: &mut Frame<'_>) {
        let view = BarView {
            config: &self.config,
            state: self.controller.state(),
            offset: self.controller.offset_fraction(),
            translation: self
                .tracker
                .as_ref()
                .map(|t| t.translation())
                .unwrap_or(0.0),
            swipe_alpha: self.tracker.as_ref().map(|t| t.alpha()).unwrap_or(1.0),
            phase: self.phase,
        };
        self.layout = ui::render_bar(frame, &view);
        if let Some(tracker) = self.tracker.as_mut() {
            if self.layout.bar.width > 0 {
                tracker.set_width(self.layout.bar.width as f32);
            }
        }
    }
}
