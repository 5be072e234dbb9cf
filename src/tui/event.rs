//! Terminal event handling.
//!
//! Maps crossterm input to component-level events: key presses for the demo
//! controls and left-button mouse gestures for the bar's pointer events.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};

use crate::bar::PointerEvent;

/// Input events the demo loop cares about.
#[derive(Debug)]
pub enum TuiEvent {
    Key(KeyEvent),
    Pointer(PointerEvent),
}

/// Polls for the next input event, waiting at most `timeout`.
pub fn poll_event(timeout: Duration) -> Result<Option<TuiEvent>> {
    if event::poll(timeout)? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                return Ok(Some(TuiEvent::Key(key)));
            }
            Event::Mouse(mouse) => {
                if let Some(pointer) = pointer_event(&mouse) {
                    return Ok(Some(TuiEvent::Pointer(pointer)));
                }
            }
            _ => {}
        }
    }
    Ok(None)
}

/// Maps a left-button mouse event to a bar pointer event.
pub fn pointer_event(mouse: &MouseEvent) -> Option<PointerEvent> {
    let x = mouse.column as f32;
    let y = mouse.row as f32;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::Down { x, y }),
        MouseEventKind::Drag(MouseButton::Left) => Some(PointerEvent::Move { x, y }),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Up { x, y }),
        _ => None,
    }
}
