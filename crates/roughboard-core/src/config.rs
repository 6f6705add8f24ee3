//! Board configuration.
//!
//! Every field has a default, so a partial JSON document is a valid
//! configuration.

use crate::error::BoardResult;
use crate::shapes::ShapeStyle;
use serde::{Deserialize, Serialize};

/// Default distance (per axis) within which a point grabs a handle.
pub const HANDLE_TOLERANCE: f64 = 5.0;
/// Default slack allowed when testing whether a point lies on a line.
pub const LINE_SLACK: f64 = 1.0;

/// Tolerances used by hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitTolerance {
    /// A point grabs a handle when both `|dx|` and `|dy|` are below this.
    pub handle: f64,
    /// A point is on a line segment when the detour through it is shorter
    /// than this.
    pub line_slack: f64,
}

impl Default for HitTolerance {
    fn default() -> Self {
        Self {
            handle: HANDLE_TOLERANCE,
            line_slack: LINE_SLACK,
        }
    }
}

/// Which shape wins when several shapes contain the hit point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HitPrecedence {
    /// The earliest drawn shape wins.
    #[default]
    FirstMatch,
    /// The most recently drawn shape wins.
    TopMost,
}

/// Configuration for a [`Board`](crate::Board).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub tolerance: HitTolerance,
    pub hit_precedence: HitPrecedence,
    /// Maximum number of history snapshots kept (None = unbounded).
    pub max_history: Option<usize>,
    /// Style given to new shapes until the caller picks another one.
    pub default_style: ShapeStyle,
}

impl BoardConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> BoardResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> BoardResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
