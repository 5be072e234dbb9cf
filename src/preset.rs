//! Declarative bar presets.
//!
//! A preset is a small JSON document describing a bar (text, colors,
//! duration, flags) that the demo loads with `--preset`. Color fields accept
//! anything ratatui's color parser does: names like `red`, indexed colors,
//! or `#rrggbb` hex.

use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use ratatui::style::{Color, Style};
use serde::{Deserialize, Serialize};

use crate::bar::{FlashbarBuilder, Gravity, ProgressPosition};

/// Serializable description of a bar configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BarPreset {
    pub title: Option<String>,
    pub message: Option<String>,
    pub gravity: Option<Gravity>,
    pub duration_ms: Option<u64>,
    pub background: Option<String>,
    pub title_color: Option<String>,
    pub message_color: Option<String>,
    pub overlay: Option<String>,
    pub swipe_to_dismiss: bool,
    pub dismiss_on_tap_outside: bool,
    pub progress: Option<ProgressPosition>,
    pub icon: Option<String>,
}

impl BarPreset {
    /// Reads a preset from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading preset {}", path.display()))?;
        let preset: BarPreset = serde_json::from_str(&content)
            .with_context(|| format!("parsing preset {}", path.display()))?;
        Ok(preset)
    }

    /// Applies the preset's fields on top of an existing builder. Absent
    /// fields leave the builder untouched.
    pub fn apply(&self, mut builder: FlashbarBuilder) -> Result<FlashbarBuilder> {
        if let Some(title) = &self.title {
            builder = builder.title(title.clone());
        }
        if let Some(message) = &self.message {
            builder = builder.message(message.clone());
        }
        if let Some(gravity) = self.gravity {
            builder = builder.gravity(gravity);
        }
        if let Some(ms) = self.duration_ms {
            builder = builder.duration(Duration::from_millis(ms));
        }
        if let Some(background) = &self.background {
            builder = builder.background_color(parse_color(background)?);
        }
        if let Some(color) = &self.title_color {
            builder = builder.title_style(Style::default().fg(parse_color(color)?));
        }
        if let Some(color) = &self.message_color {
            builder = builder.message_style(Style::default().fg(parse_color(color)?));
        }
        if let Some(color) = &self.overlay {
            builder = builder.overlay_color(parse_color(color)?);
        }
        if self.swipe_to_dismiss {
            builder = builder.enable_swipe_to_dismiss();
        }
        if self.dismiss_on_tap_outside {
            builder = builder.dismiss_on_tap_outside();
        }
        if let Some(position) = self.progress {
            builder = builder.show_progress(position);
        }
        if let Some(icon) = &self.icon {
            builder = builder.icon(icon.clone());
        }
        Ok(builder)
    }
}

fn parse_color(name: &str) -> Result<Color> {
    Color::from_str(name).map_err(|_| anyhow!("unrecognized color: {name}"))
}
