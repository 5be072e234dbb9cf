//! End-to-end lifecycle tests, driven through the public `Flashbar` API.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use flashbar::{
    AnimBuilder, BarDismissListener, BarShowListener, DismissEvent, Flashbar, PointerEvent,
    PresentationState,
};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

/// Shared event recorder registered as both show and dismiss listener.
#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<String>>>);

impl Recorder {
    fn events(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl BarShowListener for Recorder {
    fn on_showing(&self) {
        self.0.borrow_mut().push("showing".to_string());
    }

    fn on_show_progress(&self, progress: f32) {
        self.0.borrow_mut().push(format!("show {progress:.2}"));
    }

    fn on_shown(&self) {
        self.0.borrow_mut().push("shown".to_string());
    }
}

impl BarDismissListener for Recorder {
    fn on_dismissing(&self, is_swiped: bool) {
        self.0
            .borrow_mut()
            .push(format!("dismissing swiped={is_swiped}"));
    }

    fn on_dismiss_progress(&self, progress: f32) {
        self.0.borrow_mut().push(format!("dismiss {progress:.2}"));
    }

    fn on_dismissed(&self, event: DismissEvent) {
        self.0.borrow_mut().push(format!("dismissed {event}"));
    }
}

fn instant_anims(builder: flashbar::FlashbarBuilder) -> flashbar::FlashbarBuilder {
    builder
        .enter_animation(AnimBuilder::new().duration(Duration::ZERO))
        .exit_animation(AnimBuilder::new().duration(Duration::ZERO))
}

fn render(bar: &mut Flashbar) {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|frame| bar.render(frame)).unwrap();
}

#[test]
fn test_timeout_scenario_reaches_hidden() {
    // Given: a bar with a 500 ms duration and instant animations
    let recorder = Recorder::default();
    let mut bar = instant_anims(
        Flashbar::builder()
            .message("will time out")
            .duration(Duration::from_millis(500))
            .bar_show_listener(recorder.clone())
            .bar_dismiss_listener(recorder.clone()),
    )
    .build()
    .unwrap();
    let t0 = Instant::now();

    // When: shown and left alone past the duration
    bar.show_at(t0);
    assert!(bar.is_shown());
    bar.tick_at(t0 + Duration::from_millis(499));
    assert!(bar.is_shown());
    bar.tick_at(t0 + Duration::from_millis(500));

    // Then: the bar is hidden and the timeout cause was reported
    assert_eq!(bar.state(), PresentationState::Hidden);
    assert!(recorder.events().contains(&"dismissed timeout".to_string()));
}

#[test]
fn test_double_dismiss_fires_one_callback() {
    let recorder = Recorder::default();
    let mut bar = Flashbar::builder()
        .message("dismiss me twice")
        .enter_animation(AnimBuilder::new().duration(Duration::ZERO))
        .exit_animation(AnimBuilder::new().duration(Duration::from_millis(100)))
        .bar_dismiss_listener(recorder.clone())
        .build()
        .unwrap();
    let t0 = Instant::now();

    bar.show_at(t0);
    bar.dismiss_at(t0 + Duration::from_millis(10));
    bar.dismiss_at(t0 + Duration::from_millis(20));
    bar.tick_at(t0 + Duration::from_millis(200));

    let dismissed = recorder
        .events()
        .iter()
        .filter(|e| e.starts_with("dismissed"))
        .count();
    assert_eq!(dismissed, 1);
    assert_eq!(bar.state(), PresentationState::Hidden);
}

#[test]
fn test_show_progress_monotonic_through_facade() {
    let recorder = Recorder::default();
    let mut bar = Flashbar::builder()
        .message("animated")
        .enter_animation(AnimBuilder::new().duration(Duration::from_millis(200)))
        .bar_show_listener(recorder.clone())
        .build()
        .unwrap();
    let t0 = Instant::now();

    bar.show_at(t0);
    for ms in [40, 80, 120, 160, 200] {
        bar.tick_at(t0 + Duration::from_millis(ms));
    }
    assert!(bar.is_shown());

    let progresses: Vec<f32> = recorder
        .events()
        .iter()
        .filter_map(|e| e.strip_prefix("show "))
        .map(|p| p.parse().unwrap())
        .collect();
    assert!(!progresses.is_empty());
    assert!(progresses.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(*progresses.last().unwrap(), 1.0);
}

#[test]
fn test_swipe_past_threshold_dismisses_with_swipe_event() {
    // Given: a shown, swipeable bar rendered on an 80-column surface
    let recorder = Recorder::default();
    let mut bar = Flashbar::builder()
        .message("swipe me")
        .enable_swipe_to_dismiss()
        .enter_animation(AnimBuilder::new().duration(Duration::ZERO))
        .exit_animation(AnimBuilder::new().duration(Duration::from_millis(100)))
        .bar_dismiss_listener(recorder.clone())
        .build()
        .unwrap();
    let t0 = Instant::now();
    bar.show_at(t0);
    render(&mut bar);

    // When: dragged 45 cells, past half the bar width
    bar.handle_pointer_at(PointerEvent::Down { x: 10.0, y: 0.0 }, t0);
    bar.handle_pointer_at(
        PointerEvent::Move { x: 30.0, y: 0.0 },
        t0 + Duration::from_millis(50),
    );
    bar.handle_pointer_at(
        PointerEvent::Up { x: 55.0, y: 0.0 },
        t0 + Duration::from_millis(100),
    );

    // Then: the bar is dismissing and the cause is the swipe
    assert_eq!(bar.state(), PresentationState::Dismissing);
    bar.tick_at(t0 + Duration::from_millis(300));
    let events = recorder.events();
    assert!(events.contains(&"dismissing swiped=true".to_string()));
    assert!(events.contains(&"dismissed swipe".to_string()));
}

#[test]
fn test_swipe_below_threshold_keeps_bar_shown() {
    let recorder = Recorder::default();
    let mut bar = instant_anims(
        Flashbar::builder()
            .message("not far enough")
            .enable_swipe_to_dismiss()
            .bar_dismiss_listener(recorder.clone()),
    )
    .build()
    .unwrap();
    let t0 = Instant::now();
    bar.show_at(t0);
    render(&mut bar);

    // A slow 20-cell drag: under half the width and far too slow to fling.
    bar.handle_pointer_at(PointerEvent::Down { x: 10.0, y: 0.0 }, t0);
    bar.handle_pointer_at(
        PointerEvent::Move { x: 25.0, y: 0.0 },
        t0 + Duration::from_millis(500),
    );
    bar.handle_pointer_at(
        PointerEvent::Up { x: 30.0, y: 0.0 },
        t0 + Duration::from_millis(1000),
    );

    assert_eq!(bar.state(), PresentationState::Shown);
    assert!(!recorder
        .events()
        .iter()
        .any(|e| e.starts_with("dismissed")));
}

#[test]
fn test_tap_outside_dismisses_when_configured() {
    let recorder = Recorder::default();
    let outside_taps = Rc::new(Cell::new(0));
    let counted = outside_taps.clone();
    let mut bar = instant_anims(
        Flashbar::builder()
            .message("tap away")
            .dismiss_on_tap_outside()
            .tap_outside_listener(move || counted.set(counted.get() + 1))
            .bar_dismiss_listener(recorder.clone()),
    )
    .build()
    .unwrap();
    let t0 = Instant::now();
    bar.show_at(t0);
    render(&mut bar);

    bar.handle_pointer_at(PointerEvent::Down { x: 10.0, y: 20.0 }, t0);

    assert_eq!(outside_taps.get(), 1);
    assert_eq!(bar.state(), PresentationState::Hidden);
    assert!(recorder
        .events()
        .contains(&"dismissed tap-outside".to_string()));
}

#[test]
fn test_action_tap_runs_handler_and_dismisses() {
    let recorder = Recorder::default();
    let undone = Rc::new(Cell::new(false));
    let flag = undone.clone();
    let mut bar = instant_anims(
        Flashbar::builder()
            .message("action packed")
            .primary_action("UNDO")
            .primary_action_tap(move || flag.set(true))
            .bar_dismiss_listener(recorder.clone()),
    )
    .build()
    .unwrap();
    let t0 = Instant::now();
    bar.show_at(t0);
    render(&mut bar);

    let (_, rect) = bar.layout().actions[0];
    bar.handle_pointer_at(
        PointerEvent::Down {
            x: rect.x as f32 + 1.0,
            y: rect.y as f32,
        },
        t0,
    );

    assert!(undone.get());
    assert_eq!(bar.state(), PresentationState::Hidden);
    assert!(recorder
        .events()
        .contains(&"dismissed action-tap".to_string()));
}

#[test]
fn test_bar_tap_without_swipe_enabled() {
    let taps = Rc::new(Cell::new(0));
    let counted = taps.clone();
    let mut bar = instant_anims(
        Flashbar::builder()
            .message("tappable")
            .bar_tap_listener(move || counted.set(counted.get() + 1)),
    )
    .build()
    .unwrap();
    let t0 = Instant::now();
    bar.show_at(t0);
    render(&mut bar);

    let consumed = bar.handle_pointer_at(PointerEvent::Down { x: 20.0, y: 0.0 }, t0);
    assert!(consumed);
    assert_eq!(taps.get(), 1);
    assert_eq!(bar.state(), PresentationState::Shown);
}

#[test]
fn test_swipe_settle_releases_timeout_hold() {
    // A held swipe must not let the duration fire; once settled, it does.
    let recorder = Recorder::default();
    let mut bar = instant_anims(
        Flashbar::builder()
            .message("held")
            .duration(Duration::from_millis(100))
            .enable_swipe_to_dismiss()
            .bar_dismiss_listener(recorder.clone()),
    )
    .build()
    .unwrap();
    let t0 = Instant::now();
    bar.show_at(t0);
    render(&mut bar);

    // Start a swipe and hold it past the deadline.
    bar.handle_pointer_at(PointerEvent::Down { x: 10.0, y: 0.0 }, t0);
    bar.handle_pointer_at(
        PointerEvent::Move { x: 20.0, y: 0.0 },
        t0 + Duration::from_millis(50),
    );
    bar.tick_at(t0 + Duration::from_millis(200));
    assert_eq!(bar.state(), PresentationState::Shown);

    // Release without dismissing: the deferred timeout now fires.
    bar.handle_pointer_at(
        PointerEvent::Up { x: 21.0, y: 0.0 },
        t0 + Duration::from_millis(700),
    );
    bar.tick_at(t0 + Duration::from_millis(710));
    assert_eq!(bar.state(), PresentationState::Hidden);
    assert!(recorder.events().contains(&"dismissed timeout".to_string()));
}
