//! Bar rendering.
//!
//! Draws one flashbar into a ratatui frame and returns the hit-test layout
//! (bar rect plus action-button rects) used to route pointer events. All
//! placement is derived from the controller's offset fraction and the
//! gesture tracker's displacement; there is no layout state kept here.

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::anim::Slide;
use crate::bar::config::{ActionKind, FlashbarConfig, Gravity, ProgressPosition};
use crate::bar::controller::PresentationState;

/// Bar background when none is configured.
const DEFAULT_BACKGROUND: Color = Color::DarkGray;

/// Frames of the indeterminate progress indicator.
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Everything the renderer needs to draw one frame of a bar.
pub struct BarView<'a> {
    pub config: &'a FlashbarConfig,
    pub state: PresentationState,
    /// Fraction of the bar still off-surface (1.0 hidden, 0.0 at rest).
    pub offset: f32,
    /// Horizontal swipe displacement, in cells.
    pub translation: f32,
    /// Bar opacity under the current swipe displacement.
    pub swipe_alpha: f32,
    /// Frame counter driving the spinner and icon pulse.
    pub phase: usize,
}

/// Hit-test geometry produced by the last render.
#[derive(Debug, Clone, Default)]
pub struct BarLayout {
    /// Rest-position rect of the bar (untranslated, full height).
    pub bar: Rect,
    pub actions: Vec<(ActionKind, Rect)>,
}

impl BarLayout {
    pub fn contains(&self, position: Position) -> bool {
        self.bar.contains(position)
    }

    pub fn action_at(&self, position: Position) -> Option<ActionKind> {
        self.actions
            .iter()
            .find(|(_, rect)| rect.contains(position))
            .map(|(kind, _)| *kind)
    }
}

/// Draws the bar (and overlay/shadow) into the frame.
pub fn render_bar(frame: &mut Frame<'_>, view: &BarView<'_>) -> BarLayout {
    let area = frame.area();
    if view.state == PresentationState::Hidden || area.width == 0 || area.height == 0 {
        return BarLayout::default();
    }
    let config = view.config;

    if let Some(color) = config.overlay {
        frame
            .buffer_mut()
            .set_style(area, Style::default().bg(color));
    }

    let content_rows: u16 = match (&config.title, &config.message) {
        (Some(_), Some(_)) => 2,
        _ => 1,
    };
    let home = home_rect(area, config.gravity, content_rows);

    let spec = match view.state {
        PresentationState::Dismissing => &config.exit_anim,
        _ => &config.enter_anim,
    };
    let drawn = offset_rect(
        area,
        home,
        config.gravity,
        spec.slide,
        view.offset,
        view.translation,
    );

    let dim = (spec.fade && view.offset > 0.5) || view.swipe_alpha < 0.5;
    let mut bar_style = Style::default()
        .bg(config.background.unwrap_or(DEFAULT_BACKGROUND))
        .fg(Color::White);
    if dim {
        bar_style = bar_style.add_modifier(Modifier::DIM);
    }

    let mut actions = Vec::new();
    if drawn.width > 0 && drawn.height > 0 {
        frame.buffer_mut().set_style(drawn, bar_style);

        let left_width: u16 =
            if config.icon.is_some() || config.progress == Some(ProgressPosition::Left) {
                3
            } else {
                1
            };
        let right_width: u16 = if config.progress == Some(ProgressPosition::Right) {
            3
        } else {
            1
        };
        let actions_width = configured_actions(config)
            .map(|(_, action)| action_width(&action.label) + 1)
            .sum::<u16>();

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(left_width),
                Constraint::Min(0),
                Constraint::Length(actions_width),
                Constraint::Length(right_width),
            ])
            .split(drawn);

        if config.progress == Some(ProgressPosition::Left) {
            render_spinner(
                frame,
                chunks[0],
                view.phase,
                bar_style.patch(config.progress_style),
            );
        } else if let Some(icon) = &config.icon {
            let mut style = bar_style.patch(icon.style);
            if icon.pulse && (view.phase / 4) % 2 == 1 {
                style = style.add_modifier(Modifier::DIM);
            }
            let glyph = Paragraph::new(Span::styled(format!(" {}", icon.symbol), style));
            frame.render_widget(glyph, chunks[0]);
        }

        let mut lines = Vec::new();
        if let Some(title) = &config.title {
            lines.push(Line::from(Span::styled(
                title.content.clone(),
                bar_style.patch(title.style).add_modifier(Modifier::BOLD),
            )));
        }
        if let Some(message) = &config.message {
            lines.push(Line::from(Span::styled(
                message.content.clone(),
                bar_style.patch(message.style),
            )));
        }
        frame.render_widget(Paragraph::new(lines), chunks[1]);

        // Action buttons, left to right, on the bar's last row.
        let mut x = chunks[2].x;
        let y = chunks[2].y + chunks[2].height.saturating_sub(1);
        for (kind, action) in configured_actions(config) {
            let width = action_width(&action.label);
            let rect = Rect {
                x,
                y,
                width,
                height: 1,
            }
            .intersection(chunks[2]);
            x = x.saturating_add(width + 1);
            if rect.width == 0 {
                continue;
            }
            let label = format!("[{}]", action.label);
            let button = Paragraph::new(Span::styled(label, bar_style.patch(action.style)));
            frame.render_widget(button, rect);
            actions.push((kind, rect));
        }

        if config.progress == Some(ProgressPosition::Right) {
            render_spinner(
                frame,
                chunks[3],
                view.phase,
                bar_style.patch(config.progress_style),
            );
        }
    }

    if config.cast_shadow && view.state == PresentationState::Shown {
        render_shadow(frame, area, home, config);
    }

    BarLayout { bar: home, actions }
}

fn home_rect(area: Rect, gravity: Gravity, content_rows: u16) -> Rect {
    let height = content_rows.min(area.height);
    match gravity {
        Gravity::Top => Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        },
        Gravity::Bottom => Rect {
            x: area.x,
            y: area.y + area.height - height,
            width: area.width,
            height,
        },
    }
}

/// Applies the slide offset and the swipe displacement to the home rect.
fn offset_rect(
    area: Rect,
    home: Rect,
    gravity: Gravity,
    slide: Slide,
    offset: f32,
    translation: f32,
) -> Rect {
    let mut drawn = home;

    match slide {
        Slide::FromTop | Slide::FromBottom => {
            let visible = ((home.height as f32) * (1.0 - offset)).round() as u16;
            drawn.height = visible.min(home.height);
            if gravity == Gravity::Bottom {
                drawn.y = home.y + home.height - drawn.height;
            }
        }
        Slide::FromLeft | Slide::FromRight => {
            let hidden = ((home.width as f32) * offset).round() as u16;
            drawn.width = home.width.saturating_sub(hidden);
            if slide == Slide::FromRight {
                drawn.x = home.x + hidden;
            }
        }
    }

    if translation != 0.0 {
        let t = translation.round() as i32;
        let shifted = drawn.x as i32 + t;
        let clipped_left = (area.x as i32 - shifted).max(0) as u16;
        drawn.x = shifted.max(area.x as i32).min(u16::MAX as i32) as u16;
        drawn.width = drawn.width.saturating_sub(clipped_left);
    }

    drawn.intersection(area)
}

fn configured_actions(
    config: &FlashbarConfig,
) -> impl Iterator<Item = (ActionKind, &crate::bar::config::Action)> {
    [
        (ActionKind::Negative, config.negative.as_ref()),
        (ActionKind::Positive, config.positive.as_ref()),
        (ActionKind::Primary, config.primary.as_ref()),
    ]
    .into_iter()
    .filter_map(|(kind, action)| action.map(|a| (kind, a)))
}

fn action_width(label: &str) -> u16 {
    label.chars().count() as u16 + 2
}

fn render_spinner(frame: &mut Frame<'_>, rect: Rect, phase: usize, style: Style) {
    let glyph = SPINNER_FRAMES[phase % SPINNER_FRAMES.len()];
    frame.render_widget(Paragraph::new(Span::styled(format!(" {glyph}"), style)), rect);
}

fn render_shadow(frame: &mut Frame<'_>, area: Rect, home: Rect, config: &FlashbarConfig) {
    let shade = match config.shadow_strength {
        0 | 1 => "░",
        2 => "▒",
        _ => "▓",
    };
    let row = match config.gravity {
        Gravity::Top => Rect {
            x: home.x,
            y: home.y + home.height,
            width: home.width,
            height: 1,
        },
        Gravity::Bottom => {
            if home.y == area.y {
                return;
            }
            Rect {
                x: home.x,
                y: home.y - 1,
                width: home.width,
                height: 1,
            }
        }
    }
    .intersection(area);
    if row.height == 0 || row.width == 0 {
        return;
    }
    let shadow = Paragraph::new(shade.repeat(row.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(shadow, row);
}
