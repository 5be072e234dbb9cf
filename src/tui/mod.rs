//! Terminal surface integration: rendering, input mapping, demo shell.

pub mod app;
pub mod event;
pub mod ui;

pub use app::{build_bar, init_terminal, restore_terminal, run, App, AppResult, DemoOptions, Tui};
pub use event::{pointer_event, poll_event, TuiEvent};
pub use ui::{render_bar, BarLayout, BarView};
