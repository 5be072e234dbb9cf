//! Fluent configuration builder.
//!
//! Every setter takes and returns the builder; nothing happens until
//! [`build`](FlashbarBuilder::build), which validates option combinations
//! and produces the immutable configuration. Identical inputs always
//! produce an identical configuration.

use std::sync::Arc;
use std::time::Duration;

use ratatui::style::{Color, Style};
use thiserror::Error;

use crate::anim::AnimBuilder;
use crate::bar::config::{
    Action, Callbacks, FlashbarConfig, Gravity, Icon, ProgressPosition, Text, Vibration,
};
use crate::bar::listener::{BarDismissListener, BarShowListener, TapHandler};
use crate::bar::Flashbar;

/// Rejected option combinations, reported by [`FlashbarBuilder::build`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cannot show progress on the left if an icon is configured")]
    ProgressConflictsWithIcon,
    #[error("cannot show progress on the right if a primary action is configured")]
    ProgressConflictsWithAction,
    #[error("duration must be greater than zero")]
    ZeroDuration,
    #[error("shadow strength must be greater than zero")]
    ZeroShadowStrength,
}

/// Accumulates presentation options for one flashbar.
#[derive(Debug, Clone)]
pub struct FlashbarBuilder {
    gravity: Option<Gravity>,
    duration: Option<Duration>,
    title: Option<Text>,
    message: Option<Text>,
    background: Option<Color>,
    overlay: Option<Color>,
    overlay_blockable: bool,
    icon: Option<Icon>,
    progress: Option<ProgressPosition>,
    progress_style: Option<Style>,
    primary: Option<Action>,
    positive: Option<Action>,
    negative: Option<Action>,
    enter_anim: Option<AnimBuilder>,
    exit_anim: Option<AnimBuilder>,
    swipe_to_dismiss: bool,
    cast_shadow: bool,
    shadow_strength: Option<u8>,
    vibrate_on: Vec<Vibration>,
    dismiss_on_tap_outside: bool,
    callbacks: Callbacks,
}

impl FlashbarBuilder {
    pub fn new() -> Self {
        Self {
            gravity: None,
            duration: None,
            title: None,
            message: None,
            background: None,
            overlay: None,
            overlay_blockable: false,
            icon: None,
            progress: None,
            progress_style: None,
            primary: None,
            positive: None,
            negative: None,
            enter_anim: None,
            exit_anim: None,
            swipe_to_dismiss: false,
            cast_shadow: true,
            shadow_strength: None,
            vibrate_on: Vec::new(),
            dismiss_on_tap_outside: false,
            callbacks: Callbacks::default(),
        }
    }

    /// Edge of the surface the bar is shown on. Default is top.
    pub fn gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = Some(gravity);
        self
    }

    /// How long the bar stays up before dismissing itself. By default the
    /// bar stays up indefinitely.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        let style = self.title.take().map(|t| t.style).unwrap_or_default();
        self.title = Some(Text {
            content: title.into(),
            style,
        });
        self
    }

    pub fn title_style(mut self, style: Style) -> Self {
        match self.title.as_mut() {
            Some(text) => text.style = style,
            None => {
                self.title = Some(Text {
                    content: String::new(),
                    style,
                })
            }
        }
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        let style = self.message.take().map(|t| t.style).unwrap_or_default();
        self.message = Some(Text {
            content: message.into(),
            style,
        });
        self
    }

    pub fn message_style(mut self, style: Style) -> Self {
        match self.message.as_mut() {
            Some(text) => text.style = style,
            None => {
                self.message = Some(Text {
                    content: String::new(),
                    style,
                })
            }
        }
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Dims the rest of the surface with the given color while the bar is
    /// up. Setting a color is what enables the overlay.
    pub fn overlay_color(mut self, color: Color) -> Self {
        self.overlay = Some(color);
        self
    }

    /// Blockable overlays consume taps outside the bar instead of letting
    /// them through to the host.
    pub fn overlay_blockable(mut self, blockable: bool) -> Self {
        self.overlay_blockable = blockable;
        self
    }

    pub fn icon(mut self, symbol: impl Into<String>) -> Self {
        let previous = self.icon.take();
        self.icon = Some(Icon {
            symbol: symbol.into(),
            style: previous.as_ref().map(|i| i.style).unwrap_or_default(),
            pulse: previous.map(|i| i.pulse).unwrap_or(false),
        });
        self
    }

    pub fn icon_style(mut self, style: Style) -> Self {
        if let Some(icon) = self.icon.as_mut() {
            icon.style = style;
        }
        self
    }

    /// Pulses the icon while the bar is shown.
    pub fn icon_pulse(mut self) -> Self {
        if let Some(icon) = self.icon.as_mut() {
            icon.pulse = true;
        }
        self
    }

    /// Shows an indeterminate progress indicator on the given side.
    pub fn show_progress(mut self, position: ProgressPosition) -> Self {
        self.progress = Some(position);
        self
    }

    pub fn progress_style(mut self, style: Style) -> Self {
        self.progress_style = Some(style);
        self
    }

    pub fn primary_action(mut self, label: impl Into<String>) -> Self {
        self.primary = Some(relabeled(self.primary.take(), label));
        self
    }

    pub fn primary_action_style(mut self, style: Style) -> Self {
        if let Some(action) = self.primary.as_mut() {
            action.style = style;
        }
        self
    }

    pub fn primary_action_tap(mut self, handler: impl Fn() + 'static) -> Self {
        if let Some(action) = self.primary.as_mut() {
            action.on_tap = Some(Arc::new(handler));
        }
        self
    }

    pub fn positive_action(mut self, label: impl Into<String>) -> Self {
        self.positive = Some(relabeled(self.positive.take(), label));
        self
    }

    pub fn positive_action_style(mut self, style: Style) -> Self {
        if let Some(action) = self.positive.as_mut() {
            action.style = style;
        }
        self
    }

    pub fn positive_action_tap(mut self, handler: impl Fn() + 'static) -> Self {
        if let Some(action) = self.positive.as_mut() {
            action.on_tap = Some(Arc::new(handler));
        }
        self
    }

    pub fn negative_action(mut self, label: impl Into<String>) -> Self {
        self.negative = Some(relabeled(self.negative.take(), label));
        self
    }

    pub fn negative_action_style(mut self, style: Style) -> Self {
        if let Some(action) = self.negative.as_mut() {
            action.style = style;
        }
        self
    }

    pub fn negative_action_tap(mut self, handler: impl Fn() + 'static) -> Self {
        if let Some(action) = self.negative.as_mut() {
            action.on_tap = Some(Arc::new(handler));
        }
        self
    }

    pub fn enter_animation(mut self, anim: AnimBuilder) -> Self {
        self.enter_anim = Some(anim);
        self
    }

    pub fn exit_animation(mut self, anim: AnimBuilder) -> Self {
        self.exit_anim = Some(anim);
        self
    }

    pub fn enable_swipe_to_dismiss(mut self) -> Self {
        self.swipe_to_dismiss = true;
        self
    }

    pub fn cast_shadow(mut self, shadow: bool) -> Self {
        self.cast_shadow = shadow;
        self
    }

    /// Shade level of the shadow row; higher is darker.
    pub fn shadow_strength(mut self, strength: u8) -> Self {
        self.shadow_strength = Some(strength);
        self
    }

    /// Requests surface feedback (terminal bell) on the given transition.
    pub fn vibrate_on(mut self, vibration: Vibration) -> Self {
        if !self.vibrate_on.contains(&vibration) {
            self.vibrate_on.push(vibration);
        }
        self
    }

    /// Dismisses the bar when a tap lands outside of it.
    pub fn dismiss_on_tap_outside(mut self) -> Self {
        self.dismiss_on_tap_outside = true;
        self
    }

    pub fn bar_show_listener(mut self, listener: impl BarShowListener + 'static) -> Self {
        self.callbacks.on_show = Some(Arc::new(listener));
        self
    }

    pub fn bar_dismiss_listener(mut self, listener: impl BarDismissListener + 'static) -> Self {
        self.callbacks.on_dismiss = Some(Arc::new(listener));
        self
    }

    pub fn bar_tap_listener(mut self, handler: impl Fn() + 'static) -> Self {
        self.callbacks.on_tap = Some(Arc::new(handler) as TapHandler);
        self
    }

    pub fn tap_outside_listener(mut self, handler: impl Fn() + 'static) -> Self {
        self.callbacks.on_tap_outside = Some(Arc::new(handler) as TapHandler);
        self
    }

    /// Validates the accumulated options and produces a presentable bar.
    pub fn build(self) -> Result<Flashbar, ConfigError> {
        Ok(Flashbar::new(self.build_config()?))
    }

    /// Validates and produces the bare configuration.
    pub fn build_config(self) -> Result<FlashbarConfig, ConfigError> {
        if let Some(duration) = self.duration {
            if duration.is_zero() {
                return Err(ConfigError::ZeroDuration);
            }
        }
        match self.progress {
            Some(ProgressPosition::Left) if self.icon.is_some() => {
                return Err(ConfigError::ProgressConflictsWithIcon);
            }
            Some(ProgressPosition::Right) if self.primary.is_some() => {
                return Err(ConfigError::ProgressConflictsWithAction);
            }
            _ => {}
        }
        let shadow_strength = self.shadow_strength.unwrap_or(1);
        if self.cast_shadow && shadow_strength == 0 {
            return Err(ConfigError::ZeroShadowStrength);
        }

        let gravity = self.gravity.unwrap_or(Gravity::Top);
        let enter_anim = self.enter_anim.unwrap_or_default().build_for(gravity);
        let exit_anim = self.exit_anim.unwrap_or_default().build_for(gravity);

        Ok(FlashbarConfig {
            gravity,
            duration: self.duration,
            title: self.title,
            message: self.message,
            background: self.background,
            overlay: self.overlay,
            overlay_blockable: self.overlay_blockable,
            icon: self.icon,
            progress: self.progress,
            progress_style: self.progress_style.unwrap_or_default(),
            primary: self.primary,
            positive: self.positive,
            negative: self.negative,
            enter_anim,
            exit_anim,
            swipe_to_dismiss: self.swipe_to_dismiss,
            cast_shadow: self.cast_shadow,
            shadow_strength,
            vibrate_on: self.vibrate_on,
            dismiss_on_tap_outside: self.dismiss_on_tap_outside,
            callbacks: self.callbacks,
        })
    }
}

impl Default for FlashbarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn relabeled(previous: Option<Action>, label: impl Into<String>) -> Action {
    let (style, on_tap) = previous
        .map(|a| (a.style, a.on_tap))
        .unwrap_or((Style::default(), None));
    Action {
        label: label.into(),
        style,
        on_tap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::Slide;
    use ratatui::style::Modifier;

    #[test]
    fn test_defaults() {
        let config = FlashbarBuilder::new().build_config().unwrap();
        assert_eq!(config.gravity, Gravity::Top);
        assert_eq!(config.duration, None);
        assert!(config.cast_shadow);
        assert_eq!(config.shadow_strength, 1);
        assert!(!config.swipe_to_dismiss);
        assert!(!config.dismiss_on_tap_outside);
        assert_eq!(config.enter_anim.slide, Slide::FromTop);
        assert_eq!(config.exit_anim.slide, Slide::FromTop);
    }

    #[test]
    fn test_build_is_deterministic() {
        let make = || {
            FlashbarBuilder::new()
                .gravity(Gravity::Bottom)
                .duration(Duration::from_millis(1500))
                .title("Hello")
                .title_style(Style::default().add_modifier(Modifier::BOLD))
                .message("World")
                .background_color(Color::Blue)
                .enable_swipe_to_dismiss()
                .vibrate_on(Vibration::Show)
                .build_config()
                .unwrap()
        };
        let a = make();
        let b = make();

        assert_eq!(a.gravity, b.gravity);
        assert_eq!(a.duration, b.duration);
        assert_eq!(a.title, b.title);
        assert_eq!(a.message, b.message);
        assert_eq!(a.background, b.background);
        assert_eq!(a.enter_anim, b.enter_anim);
        assert_eq!(a.exit_anim, b.exit_anim);
        assert_eq!(a.swipe_to_dismiss, b.swipe_to_dismiss);
        assert_eq!(a.vibrate_on, b.vibrate_on);
    }

    #[test]
    fn test_gravity_drives_default_animations() {
        let config = FlashbarBuilder::new()
            .gravity(Gravity::Bottom)
            .build_config()
            .unwrap();
        assert_eq!(config.enter_anim.slide, Slide::FromBottom);
        assert_eq!(config.exit_anim.slide, Slide::FromBottom);
    }

    #[test]
    fn test_explicit_animation_overrides_gravity() {
        let config = FlashbarBuilder::new()
            .gravity(Gravity::Top)
            .enter_animation(AnimBuilder::new().slide_from_left())
            .build_config()
            .unwrap();
        assert_eq!(config.enter_anim.slide, Slide::FromLeft);
        // Exit animation still follows gravity.
        assert_eq!(config.exit_anim.slide, Slide::FromTop);
    }

    #[test]
    fn test_left_progress_conflicts_with_icon() {
        let err = FlashbarBuilder::new()
            .icon("!")
            .show_progress(ProgressPosition::Left)
            .build_config()
            .unwrap_err();
        assert_eq!(err, ConfigError::ProgressConflictsWithIcon);
    }

    #[test]
    fn test_right_progress_conflicts_with_primary_action() {
        let err = FlashbarBuilder::new()
            .primary_action("UNDO")
            .show_progress(ProgressPosition::Right)
            .build_config()
            .unwrap_err();
        assert_eq!(err, ConfigError::ProgressConflictsWithAction);
    }

    #[test]
    fn test_right_progress_allows_positive_action() {
        let config = FlashbarBuilder::new()
            .positive_action("YES")
            .show_progress(ProgressPosition::Right)
            .build_config()
            .unwrap();
        assert_eq!(config.progress, Some(ProgressPosition::Right));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let err = FlashbarBuilder::new()
            .duration(Duration::ZERO)
            .build_config()
            .unwrap_err();
        assert_eq!(err, ConfigError::ZeroDuration);
    }

    #[test]
    fn test_zero_shadow_strength_rejected() {
        let err = FlashbarBuilder::new()
            .shadow_strength(0)
            .build_config()
            .unwrap_err();
        assert_eq!(err, ConfigError::ZeroShadowStrength);

        // A zero strength is fine when the shadow is disabled.
        let config = FlashbarBuilder::new()
            .cast_shadow(false)
            .shadow_strength(0)
            .build_config()
            .unwrap();
        assert!(!config.cast_shadow);
    }

    #[test]
    fn test_no_side_effects_before_build() {
        // Conflicting options can be staged freely; only build rejects them.
        let builder = FlashbarBuilder::new()
            .icon("!")
            .show_progress(ProgressPosition::Left);
        assert!(builder.build_config().is_err());
    }

    #[test]
    fn test_action_style_and_handler_attach_to_label() {
        let config = FlashbarBuilder::new()
            .primary_action("UNDO")
            .primary_action_style(Style::default().add_modifier(Modifier::BOLD))
            .primary_action_tap(|| {})
            .build_config()
            .unwrap();
        let action = config.primary.unwrap();
        assert_eq!(action.label, "UNDO");
        assert!(action.on_tap.is_some());
        assert!(action.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_vibrate_on_deduplicates() {
        let config = FlashbarBuilder::new()
            .vibrate_on(Vibration::Show)
            .vibrate_on(Vibration::Show)
            .vibrate_on(Vibration::Dismiss)
            .build_config()
            .unwrap();
        assert_eq!(config.vibrate_on, vec![Vibration::Show, Vibration::Dismiss]);
    }
}
