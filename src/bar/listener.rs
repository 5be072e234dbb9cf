//! Lifecycle and interaction callbacks.
//!
//! Listener registration is optional everywhere; an absent listener is a
//! no-op, never an error. Callback panics are not caught and propagate to
//! the host.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::bar::config::DismissEvent;

/// Receives bar appearance events, in order:
/// `on_showing` -> `on_show_progress(0..=1, monotonic)` -> `on_shown`.
pub trait BarShowListener {
    fn on_showing(&self) {}
    fn on_show_progress(&self, _progress: f32) {}
    fn on_shown(&self) {}
}

/// Receives bar disappearance events, in order:
/// `on_dismissing(is_swiped)` -> `on_dismiss_progress(0..=1, monotonic)` ->
/// `on_dismissed(event)`.
pub trait BarDismissListener {
    fn on_dismissing(&self, _is_swiped: bool) {}
    fn on_dismiss_progress(&self, _progress: f32) {}
    fn on_dismissed(&self, _event: DismissEvent) {}
}

/// Callback invoked on a bar tap or an outside tap.
pub type TapHandler = Arc<dyn Fn()>;

/// Routes lifecycle and interaction events to the registered listeners.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    show: Option<Arc<dyn BarShowListener>>,
    dismiss: Option<Arc<dyn BarDismissListener>>,
    tap: Option<TapHandler>,
    tap_outside: Option<TapHandler>,
}

impl EventDispatcher {
    pub fn new(
        show: Option<Arc<dyn BarShowListener>>,
        dismiss: Option<Arc<dyn BarDismissListener>>,
        tap: Option<TapHandler>,
        tap_outside: Option<TapHandler>,
    ) -> Self {
        Self {
            show,
            dismiss,
            tap,
            tap_outside,
        }
    }

    pub(crate) fn emit_showing(&self) {
        trace!("bar showing");
        if let Some(listener) = &self.show {
            listener.on_showing();
        }
    }

    pub(crate) fn emit_show_progress(&self, progress: f32) {
        if let Some(listener) = &self.show {
            listener.on_show_progress(progress);
        }
    }

    pub(crate) fn emit_shown(&self) {
        trace!("bar shown");
        if let Some(listener) = &self.show {
            listener.on_shown();
        }
    }

    pub(crate) fn emit_dismissing(&self, is_swiped: bool) {
        trace!(is_swiped, "bar dismissing");
        if let Some(listener) = &self.dismiss {
            listener.on_dismissing(is_swiped);
        }
    }

    pub(crate) fn emit_dismiss_progress(&self, progress: f32) {
        if let Some(listener) = &self.dismiss {
            listener.on_dismiss_progress(progress);
        }
    }

    pub(crate) fn emit_dismissed(&self, event: DismissEvent) {
        trace!(event = %event, "bar dismissed");
        if let Some(listener) = &self.dismiss {
            listener.on_dismissed(event);
        }
    }

    pub(crate) fn emit_bar_tap(&self) {
        trace!("bar tapped");
        if let Some(handler) = &self.tap {
            handler();
        }
    }

    pub(crate) fn emit_tap_outside(&self) {
        trace!("tap outside bar");
        if let Some(handler) = &self.tap_outside {
            handler();
        }
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("show", &self.show.is_some())
            .field("dismiss", &self.dismiss.is_some())
            .field("tap", &self.tap.is_some())
            .field("tap_outside", &self.tap_outside.is_some())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every delivered event as a string, for order assertions.
    pub(crate) struct RecordingListener {
        pub events: RefCell<Vec<String>>,
    }

    impl RecordingListener {
        pub(crate) fn new() -> Arc<Self> {
            Arc::new(Self {
                events: RefCell::new(Vec::new()),
            })
        }

        pub(crate) fn events(&self) -> Vec<String> {
            self.events.borrow().clone()
        }
    }

    impl BarShowListener for RecordingListener {
        fn on_showing(&self) {
            self.events.borrow_mut().push("showing".to_string());
        }

        fn on_show_progress(&self, progress: f32) {
            self.events
                .borrow_mut()
                .push(format!("show-progress {progress:.2}"));
        }

        fn on_shown(&self) {
            self.events.borrow_mut().push("shown".to_string());
        }
    }

    impl BarDismissListener for RecordingListener {
        fn on_dismissing(&self, is_swiped: bool) {
            self.events
                .borrow_mut()
                .push(format!("dismissing swiped={is_swiped}"));
        }

        fn on_dismiss_progress(&self, progress: f32) {
            self.events
                .borrow_mut()
                .push(format!("dismiss-progress {progress:.2}"));
        }

        fn on_dismissed(&self, event: DismissEvent) {
            self.events.borrow_mut().push(format!("dismissed {event}"));
        }
    }

    #[test]
    fn test_absent_listeners_are_noops() {
        let dispatcher = EventDispatcher::default();
        dispatcher.emit_showing();
        dispatcher.emit_show_progress(0.5);
        dispatcher.emit_shown();
        dispatcher.emit_dismissing(false);
        dispatcher.emit_dismiss_progress(0.5);
        dispatcher.emit_dismissed(DismissEvent::Manual);
        dispatcher.emit_bar_tap();
        dispatcher.emit_tap_outside();
    }

    #[test]
    fn test_events_delivered_in_order() {
        let listener = RecordingListener::new();
        let dispatcher = EventDispatcher::new(
            Some(listener.clone() as Arc<dyn BarShowListener>),
            Some(listener.clone() as Arc<dyn BarDismissListener>),
            None,
            None,
        );

        dispatcher.emit_showing();
        dispatcher.emit_show_progress(0.5);
        dispatcher.emit_shown();
        dispatcher.emit_dismissing(true);
        dispatcher.emit_dismissed(DismissEvent::Swipe);

        assert_eq!(
            listener.events(),
            vec![
                "showing",
                "show-progress 0.50",
                "shown",
                "dismissing swiped=true",
                "dismissed swipe",
            ]
        );
    }

    #[test]
    fn test_tap_handlers_invoked() {
        let taps = Arc::new(RefCell::new(0));
        let counted = taps.clone();
        let dispatcher = EventDispatcher::new(
            None,
            None,
            Some(Arc::new(move || {
                *counted.borrow_mut() += 1;
            })),
            None,
        );

        dispatcher.emit_bar_tap();
        dispatcher.emit_bar_tap();
        assert_eq!(*taps.borrow(), 2);
    }
}
