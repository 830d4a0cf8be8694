//! Rendering configuration.
//!
//! Front ends load these sections from TOML; every field has a default so
//! an empty document is a valid configuration.

use serde::Deserialize;

use crate::{
    color::Color,
    layout::{DEFAULT_CANVAS_PADDING, LayoutEngine},
};

/// Application configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Style configuration section
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Layout configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Placement engine
    #[serde(default)]
    pub engine: LayoutEngine,

    /// Cells added per box when deriving the canvas size
    #[serde(default = "default_canvas_padding")]
    pub canvas_padding: u32,

    /// Cap on full placement attempts; unbounded when unset
    #[serde(default)]
    pub max_attempts: Option<usize>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            engine: LayoutEngine::default(),
            canvas_padding: DEFAULT_CANVAS_PADDING,
            max_attempts: None,
        }
    }
}

fn default_canvas_padding() -> u32 {
    DEFAULT_CANVAS_PADDING
}

/// Style configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<String>,

    #[serde(default)]
    stroke_color: Option<String>,

    #[serde(default)]
    fill_color: Option<String>,

    #[serde(default = "default_stroke_width")]
    stroke_width: f64,

    #[serde(default = "default_font_size")]
    font_size: u32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            stroke_color: None,
            fill_color: None,
            stroke_width: default_stroke_width(),
            font_size: default_font_size(),
        }
    }
}

fn default_stroke_width() -> f64 {
    1.0
}

fn default_font_size() -> u32 {
    16
}

impl StyleConfig {
    /// Canvas background, white unless configured
    pub fn background_color(&self) -> Result<Color, String> {
        parse_color("background", self.background_color.as_deref(), Color::white)
    }

    /// Color of borders, dividers and connectors, black unless configured
    pub fn stroke_color(&self) -> Result<Color, String> {
        parse_color("stroke", self.stroke_color.as_deref(), Color::default)
    }

    /// Fill of class boxes, white unless configured
    pub fn fill_color(&self) -> Result<Color, String> {
        parse_color("fill", self.fill_color.as_deref(), Color::white)
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    /// Checks every configured color.
    pub fn validate(&self) -> Result<(), String> {
        self.background_color()?;
        self.stroke_color()?;
        self.fill_color()?;
        Ok(())
    }
}

fn parse_color(
    role: &str,
    configured: Option<&str>,
    fallback: impl FnOnce() -> Color,
) -> Result<Color, String> {
    configured
        .map(Color::new)
        .transpose()
        .map(|color| color.unwrap_or_else(fallback))
        .map_err(|err| format!("Invalid {role} color in config: {err}"))
}
