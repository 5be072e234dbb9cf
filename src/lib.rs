//! Flashbar - transient notification bars for terminal UIs.
//!
//! A flashbar is a short-lived notification bar presented at the top or
//! bottom edge of a terminal surface. Configuration is accumulated through a
//! fluent builder, validated once at build time, and then drives a small
//! lifecycle state machine (hidden, showing, shown, dismissing) with
//! optional swipe-to-dismiss mouse gestures, timed auto-dismiss, and
//! lifecycle/interaction callbacks.
//!
//! ```no_run
//! use flashbar::{Flashbar, Gravity, DURATION_LONG};
//!
//! let mut bar = Flashbar::builder()
//!     .gravity(Gravity::Top)
//!     .title("Saved")
//!     .message("Your changes are safe")
//!     .duration(DURATION_LONG)
//!     .enable_swipe_to_dismiss()
//!     .build()
//!     .expect("valid configuration");
//! bar.show();
//! ```

pub mod anim;
pub mod bar;
pub mod preset;
pub mod tui;

pub use anim::{AnimBuilder, AnimSpec, Slide};
pub use bar::{
    Action, ActionKind, BarDismissListener, BarShowListener, Callbacks, ConfigError, DismissEvent,
    EventDispatcher, Flashbar, FlashbarBuilder, FlashbarConfig, Gravity, Icon, PointerEvent,
    PresentationController, PresentationState, ProgressPosition, SwipeOutcome, SwipeTracker,
    TapHandler, Text, Vibration, DURATION_LONG, DURATION_SHORT,
};
pub use preset::BarPreset;
pub use tui::{BarLayout, BarView, DemoOptions};
