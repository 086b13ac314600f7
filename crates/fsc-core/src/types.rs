//! Shared domain types for the FSC dashboard.
//!
//! Chart identifiers, themes, and the embed-route options are used across
//! the data, chart, embed, and web crates. Everything here is plain data:
//! serializable, cheap to clone, and free of I/O.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key under which a chart's backing dataset is stored.
pub type DatasetKey = String;

// ── Chart identifier ───────────────────────────────────────────────

/// Shape every chart identifier must have: lowercase kebab-case, starting
/// with a letter. Identifiers appear in URLs, element ids, and wire
/// messages, so the shape is enforced at construction.
static CHART_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9-]*$").expect("chart id pattern"));

/// Stable string key identifying which dataset/visualization to render.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartId(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartIdError {
    #[error("chart id is empty")]
    Empty,
    #[error("chart id {0:?} is not lowercase kebab-case")]
    BadShape(String),
}

impl ChartId {
    /// Validate and wrap a raw identifier.
    pub fn parse(raw: &str) -> Result<Self, ChartIdError> {
        if raw.is_empty() {
            return Err(ChartIdError::Empty);
        }
        if !CHART_ID_RE.is_match(raw) {
            return Err(ChartIdError::BadShape(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ChartId {
    type Err = ChartIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ── Theme ──────────────────────────────────────────────────────────

/// Color theme for dashboard and embed pages.
///
/// `System` defers to the viewer's `prefers-color-scheme`; resolution
/// happens client-side through a media-query subscription, never by
/// observing DOM attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

impl FromStr for Theme {
    type Err = ();

    /// Unknown values are an error; callers decide whether to fall back.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Embed options ──────────────────────────────────────────────────

/// Options recognized on the embed route and carried in generated
/// snippet URLs. Field defaults match the embed page's behavior when
/// the parameter is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedOptions {
    /// Chart-specific filter key (e.g. a company segment).
    pub filter: Option<String>,
    /// Chart-specific view mode (e.g. `female-share`).
    pub view: Option<String>,
    /// Render the chart title above the figure.
    pub show_title: bool,
    /// Render the source attribution below the figure.
    pub show_source: bool,
    /// Forced theme; `None` lets the embed default to `system`.
    pub theme: Option<Theme>,
    /// Tighter paddings and a smaller title, for narrow column embeds.
    pub compact: bool,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            filter: None,
            view: None,
            show_title: true,
            show_source: true,
            theme: None,
            compact: false,
        }
    }
}

/// Parse a `{0,1}` query flag. Anything other than the two literal
/// values is `None` so callers fall back to the flag's default.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw {
        "0" => Some(false),
        "1" => Some(true),
        _ => None,
    }
}

/// Encode a flag the way the embed route expects it.
pub fn flag_str(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

// ── Chart kind ─────────────────────────────────────────────────────

/// Figure family a chart renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Area,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Area => "area",
        }
    }
}
