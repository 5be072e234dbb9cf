//! Declarative enter/exit animation specs.
//!
//! A spec only names the transition: how long it runs, which edge the bar
//! slides from, and whether it fades. The controller turns elapsed time into
//! a linear progress fraction and the surface maps that fraction to an
//! offset; there is no easing machinery here.

use std::time::Duration;

use crate::bar::config::Gravity;

/// Default length of an enter/exit transition.
pub const DEFAULT_ANIM_DURATION: Duration = Duration::from_millis(250);

/// Edge the bar slides from (enter) or towards (exit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slide {
    FromTop,
    FromBottom,
    FromLeft,
    FromRight,
}

/// Resolved animation spec, ready to drive one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimSpec {
    pub duration: Duration,
    pub slide: Slide,
    /// Dim the bar through the first half of the slide.
    pub fade: bool,
}

impl AnimSpec {
    /// Spec that completes instantly. Useful for tests and for hosts that
    /// want the bar to snap in place.
    pub fn instant(slide: Slide) -> Self {
        Self {
            duration: Duration::ZERO,
            slide,
            fade: false,
        }
    }
}

/// Fluent builder for an [`AnimSpec`].
///
/// The slide edge defaults to the bar's gravity edge and is resolved at
/// [`build_for`](AnimBuilder::build_for) time; `slide_from_left` /
/// `slide_from_right` override it for horizontal entrances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimBuilder {
    duration: Duration,
    slide: Option<Slide>,
    fade: bool,
}

impl AnimBuilder {
    pub fn new() -> Self {
        Self {
            duration: DEFAULT_ANIM_DURATION,
            slide: None,
            fade: false,
        }
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn slide_from_left(mut self) -> Self {
        self.slide = Some(Slide::FromLeft);
        self
    }

    pub fn slide_from_right(mut self) -> Self {
        self.slide = Some(Slide::FromRight);
        self
    }

    pub fn fade(mut self) -> Self {
        self.fade = true;
        self
    }

    /// Resolves the spec against the bar's gravity: when no horizontal slide
    /// was requested, the bar slides from its own edge.
    pub fn build_for(self, gravity: Gravity) -> AnimSpec {
        let slide = self.slide.unwrap_or(match gravity {
            Gravity::Top => Slide::FromTop,
            Gravity::Bottom => Slide::FromBottom,
        });
        AnimSpec {
            duration: self.duration,
            slide,
            fade: self.fade,
        }
    }
}

impl Default for AnimBuilder {
    fn default() -> Self {
        Self::new()
    }
}
