//! Immutable presentation configuration for a flashbar.
//!
//! A `FlashbarConfig` is produced once by [`FlashbarBuilder::build`] and never
//! mutated afterwards. Each presentation consumes a fresh builder result.
//!
//! [`FlashbarBuilder::build`]: crate::bar::builder::FlashbarBuilder::build

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use ratatui::style::Style;
use ratatui::style::Color;

use crate::anim::AnimSpec;
use crate::bar::listener::{BarDismissListener, BarShowListener, TapHandler};

/// Vertical placement of the bar on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gravity {
    Top,
    Bottom,
}

/// Cause of a dismissal, reported through `on_dismissed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissEvent {
    /// An explicit `dismiss()` call.
    Manual,
    /// A completed swipe gesture.
    Swipe,
    /// The configured duration elapsed.
    Timeout,
    /// A tap on one of the action buttons.
    ActionTap,
    /// A tap outside the bar while dismiss-on-tap-outside is enabled.
    TapOutside,
}

impl DismissEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            DismissEvent::Manual => "manual",
            DismissEvent::Swipe => "swipe",
            DismissEvent::Timeout => "timeout",
            DismissEvent::ActionTap => "action-tap",
            DismissEvent::TapOutside => "tap-outside",
        }
    }
}

impl fmt::Display for DismissEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Side of the bar on which the indeterminate progress indicator sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressPosition {
    Left,
    Right,
}

/// Transition on which surface feedback (terminal bell) is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vibration {
    Show,
    Dismiss,
}

/// Which of the three action slots a button belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Primary,
    Positive,
    Negative,
}

/// A piece of styled text (title or message).
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub content: String,
    pub style: Style,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: Style::default(),
        }
    }
}

/// A tappable action button on the bar.
#[derive(Clone)]
pub struct Action {
    pub label: String,
    pub style: Style,
    pub on_tap: Option<TapHandler>,
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("label", &self.label)
            .field("style", &self.style)
            .field("on_tap", &self.on_tap.is_some())
            .finish()
    }
}

/// Icon glyph shown at the left edge of the bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    pub symbol: String,
    pub style: Style,
    /// Pulse the icon (alternate dim/normal) while the bar is shown.
    pub pulse: bool,
}

/// Optional listener registrations carried alongside the visual options.
///
/// Every slot is optional; an absent listener is a no-op.
#[derive(Clone, Default)]
pub struct Callbacks {
    pub on_show: Option<Arc<dyn BarShowListener>>,
    pub on_dismiss: Option<Arc<dyn BarDismissListener>>,
    pub on_tap: Option<TapHandler>,
    pub on_tap_outside: Option<TapHandler>,
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_show", &self.on_show.is_some())
            .field("on_dismiss", &self.on_dismiss.is_some())
            .field("on_tap", &self.on_tap.is_some())
            .field("on_tap_outside", &self.on_tap_outside.is_some())
            .finish()
    }
}

/// The complete, immutable configuration of one flashbar presentation.
#[derive(Debug, Clone)]
pub struct FlashbarConfig {
    pub gravity: Gravity,
    /// Auto-dismiss delay; `None` keeps the bar up indefinitely.
    pub duration: Option<Duration>,
    pub title: Option<Text>,
    pub message: Option<Text>,
    pub background: Option<Color>,
    /// Overlay color dimming the rest of the surface while the bar is up.
    pub overlay: Option<Color>,
    /// Blockable overlays consume taps that land outside the bar.
    pub overlay_blockable: bool,
    pub icon: Option<Icon>,
    pub progress: Option<ProgressPosition>,
    pub progress_style: Style,
    pub primary: Option<Action>,
    pub positive: Option<Action>,
    pub negative: Option<Action>,
    pub enter_anim: AnimSpec,
    pub exit_anim: AnimSpec,
    pub swipe_to_dismiss: bool,
    pub cast_shadow: bool,
    /// Shade level of the shadow row, 1..=3.
    pub shadow_strength: u8,
    pub vibrate_on: Vec<Vibration>,
    pub dismiss_on_tap_outside: bool,
    pub callbacks: Callbacks,
}

impl FlashbarConfig {
    /// Returns the action configured for the given slot, if any.
    pub fn action(&self, kind: ActionKind) -> Option<&Action> {
        match kind {
            ActionKind::Primary => self.primary.as_ref(),
            ActionKind::Positive => self.positive.as_ref(),
            ActionKind::Negative => self.negative.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dismiss_event_display() {
        assert_eq!(format!("{}", DismissEvent::Manual), "manual");
        assert_eq!(format!("{}", DismissEvent::Swipe), "swipe");
        assert_eq!(format!("{}", DismissEvent::Timeout), "timeout");
        assert_eq!(format!("{}", DismissEvent::ActionTap), "action-tap");
        assert_eq!(format!("{}", DismissEvent::TapOutside), "tap-outside");
    }

    #[test]
    fn test_gravity_serde_roundtrip() {
        let json = serde_json::to_string(&Gravity::Bottom).unwrap();
        assert_eq!(json, "\"bottom\"");
        let back: Gravity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Gravity::Bottom);
    }

    #[test]
    fn test_action_debug_hides_handler() {
        let action = Action {
            label: "UNDO".to_string(),
            style: Style::default(),
            on_tap: Some(Arc::new(|| {})),
        };
        let rendered = format!("{:?}", action);
        assert!(rendered.contains("UNDO"));
        assert!(rendered.contains("on_tap: true"));
    }
}
