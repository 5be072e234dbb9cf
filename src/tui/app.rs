//! Demo application state and main loop.
//!
//! Mirrors the classic flashbar sample: a mostly empty screen with two
//! triggers wired to `show` and `dismiss`, lifecycle callbacks logged, and
//! the bar itself rendered over the top. Runs on a current-thread tokio
//! loop; the fixed-interval tick is what drives animation progress and the
//! auto-dismiss timer.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use tracing::{debug, info};

use crate::bar::{
    BarDismissListener, BarShowListener, DismissEvent, Flashbar, Gravity, ProgressPosition,
};
use crate::preset::BarPreset;
use crate::tui::event::{poll_event, TuiEvent};

pub type AppResult<T> = Result<T>;
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Frame interval of the demo loop (about 30 fps).
const TICK_INTERVAL: Duration = Duration::from_millis(33);

/// Options assembled by the CLI for the demo bar.
#[derive(Debug, Clone)]
pub struct DemoOptions {
    pub gravity: Gravity,
    pub duration: Option<Duration>,
    pub swipe: bool,
    pub progress: Option<ProgressPosition>,
    pub overlay: bool,
    pub title: Option<String>,
    pub message: Option<String>,
    pub preset: Option<BarPreset>,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            gravity: Gravity::Top,
            duration: None,
            swipe: false,
            progress: None,
            overlay: false,
            title: None,
            message: None,
            preset: None,
        }
    }
}

/// Logs appearance events, the way the original sample logged its callbacks.
struct LogShowListener;

impl BarShowListener for LogShowListener {
    fn on_showing(&self) {
        info!("flashbar showing");
    }

    fn on_show_progress(&self, progress: f32) {
        debug!(progress, "show progress");
    }

    fn on_shown(&self) {
        info!("flashbar shown");
    }
}

struct LogDismissListener;

impl BarDismissListener for LogDismissListener {
    fn on_dismissing(&self, is_swiped: bool) {
        info!(is_swiped, "flashbar dismissing");
    }

    fn on_dismiss_progress(&self, progress: f32) {
        debug!(progress, "dismiss progress");
    }

    fn on_dismissed(&self, event: DismissEvent) {
        info!(event = %event, "flashbar dismissed");
    }
}

/// Builds a fresh bar from the demo options. Each presentation gets its own
/// configuration; preset fields override the flag-derived ones.
pub fn build_bar(options: &DemoOptions) -> Result<Flashbar> {
    let mut builder = Flashbar::builder()
        .gravity(options.gravity)
        .title(options.title.clone().unwrap_or_else(|| "Flashbar".to_string()))
        .message(
            options
                .message
                .clone()
                .unwrap_or_else(|| "This is a transient notification bar.".to_string()),
        )
        .bar_show_listener(LogShowListener)
        .bar_dismiss_listener(LogDismissListener)
        .bar_tap_listener(|| info!("flashbar tapped"))
        .tap_outside_listener(|| info!("tapped outside the flashbar"));

    if let Some(duration) = options.duration {
        builder = builder.duration(duration);
    }
    if options.swipe {
        builder = builder.enable_swipe_to_dismiss();
    }
    if let Some(position) = options.progress {
        builder = builder.show_progress(position);
    }
    if options.overlay {
        builder = builder.overlay_color(Color::Black);
    }
    if let Some(preset) = &options.preset {
        builder = preset.apply(builder)?;
    }

    builder.build().context("invalid flashbar configuration")
}

/// Demo application state.
pub struct App {
    options: DemoOptions,
    pub bar: Option<Flashbar>,
    pub should_quit: bool,
}

impl App {
    pub fn new(options: DemoOptions) -> Self {
        Self {
            options,
            bar: None,
            should_quit: false,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn handle_event(&mut self, event: TuiEvent, now: Instant) -> Result<()> {
        match event {
            TuiEvent::Key(key) => self.handle_key(key, now)?,
            TuiEvent::Pointer(pointer) => {
                if let Some(bar) = self.bar.as_mut() {
                    bar.handle_pointer_at(pointer, now);
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char('s') => self.show_bar(now)?,
            KeyCode::Char('d') => {
                if let Some(bar) = self.bar.as_mut() {
                    bar.dismiss_at(now);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn show_bar(&mut self, now: Instant) -> Result<()> {
        let needs_fresh = self
            .bar
            .as_ref()
            .map_or(true, |bar| bar.state() == crate::bar::PresentationState::Hidden);
        if needs_fresh {
            self.bar = Some(build_bar(&self.options)?);
        }
        if let Some(bar) = self.bar.as_mut() {
            bar.show_at(now);
        }
        Ok(())
    }

    /// Per-frame advance: animations, auto-dismiss, surface feedback.
    pub fn tick(&mut self, now: Instant) {
        if let Some(bar) = self.bar.as_mut() {
            bar.tick_at(now);
            if bar.take_vibration().is_some() {
                ring_bell();
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame<'_>) {
        let area = frame.area();

        let state = self
            .bar
            .as_ref()
            .map(|bar| format!("{:?}", bar.state()))
            .unwrap_or_else(|| "none".to_string());
        let help = Paragraph::new(vec![
            Line::from("flashbar demo"),
            Line::from(""),
            Line::from("s  show the bar"),
            Line::from("d  dismiss the bar"),
            Line::from("q  quit"),
            Line::from(""),
            Line::from("drag the bar sideways to swipe it away"),
            Line::from(format!("bar state: {state}")),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
        let band = Rect {
            x: area.x,
            y: area.y + area.height / 3,
            width: area.width,
            height: 8,
        }
        .intersection(area);
        frame.render_widget(help, band);

        if let Some(bar) = self.bar.as_mut() {
            bar.render(frame);
        }
    }
}

/// Terminal bell, standing in for haptic feedback.
fn ring_bell() {
    let mut stdout = io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}

pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    Ok(terminal)
}

pub fn restore_terminal() -> Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    disable_raw_mode()?;
    Ok(())
}

/// Runs the demo until quit, restoring the terminal on the way out.
pub async fn run(options: DemoOptions) -> Result<()> {
    let mut terminal = init_terminal()?;
    let result = event_loop(&mut terminal, options).await;
    restore_terminal()?;
    result
}

async fn event_loop(terminal: &mut Tui, options: DemoOptions) -> Result<()> {
    let mut app = App::new(options);
    let mut ticker = tokio::time::interval(TICK_INTERVAL);

    while !app.should_quit {
        ticker.tick().await;
        let now = Instant::now();
        while let Some(event) = poll_event(Duration::ZERO)? {
            app.handle_event(event, now)?;
        }
        app.tick(now);
        terminal.draw(|frame| app.render(frame))?;
    }
    Ok(())
}
