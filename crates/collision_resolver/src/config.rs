//! Resolution policy configuration
//!
//! Tunables for the placement search: step sizing, search radius, pattern
//! selection, vertical-search policy, category exclusion, and grid
//! snapping. Validation clamps rather than rejects: out-of-range numbers
//! are floored to safe minimums and unrecognized pattern or priority
//! names fall back to the defaults with a warning, so a bad config file
//! can degrade behavior but never break the editor.
//!
//! Configs load from and save to TOML or RON files, selected by file
//! extension.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Grid-snap unit applied to resolved positions when `respect_grid_snap`
/// is set.
pub const GRID_SNAP_UNIT: f32 = 0.5;

/// Smallest accepted horizontal or vertical step size.
pub const MIN_STEP_SIZE: f32 = 0.01;

/// Smallest accepted search radius.
pub const MIN_SEARCH_DISTANCE: f32 = 1.0;

/// Candidate enumeration order used by the search phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SearchPattern {
    /// Expanding square spiral in the horizontal plane
    #[default]
    Spiral,
    /// Concentric rings of 8 angular points
    Radial,
    /// Expanding square rings of a fixed grid
    Grid,
}

impl SearchPattern {
    /// Parse a pattern name, falling back to the default on unrecognized
    /// input.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "spiral" => Self::Spiral,
            "radial" => Self::Radial,
            "grid" => Self::Grid,
            other => {
                log::warn!("unrecognized search pattern '{}', using spiral", other);
                Self::Spiral
            }
        }
    }

    /// Canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Spiral => "spiral",
            Self::Radial => "radial",
            Self::Grid => "grid",
        }
    }
}

impl From<String> for SearchPattern {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<SearchPattern> for String {
    fn from(pattern: SearchPattern) -> Self {
        pattern.name().to_string()
    }
}

impl fmt::Display for SearchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which direction the search favors when both are available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResolutionPriority {
    /// Search the horizontal plane only
    #[default]
    Horizontal,
    /// Search stacked vertical offsets instead of the in-plane pass
    Vertical,
    /// Search in-plane first, then vertical offsets
    Nearest,
}

impl ResolutionPriority {
    /// Parse a priority name, falling back to the default on unrecognized
    /// input.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "horizontal" => Self::Horizontal,
            "vertical" => Self::Vertical,
            "nearest" => Self::Nearest,
            other => {
                log::warn!("unrecognized resolution priority '{}', using horizontal", other);
                Self::Horizontal
            }
        }
    }

    /// Canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Nearest => "nearest",
        }
    }
}

impl From<String> for ResolutionPriority {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<ResolutionPriority> for String {
    fn from(priority: ResolutionPriority) -> Self {
        priority.name().to_string()
    }
}

impl fmt::Display for ResolutionPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tunable parameters for detection and resolution
///
/// Constructed from [`ResolutionConfig::default`], a named preset, or a
/// config file, then adjusted with [`ConfigPatch`] overlays. The resolver
/// validates on every write, so a held config is always clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Master switch; when false, `resolve` returns immediately
    pub enabled: bool,
    /// Distance between candidate positions in the horizontal plane
    pub search_step_size: f32,
    /// Radius at which a search gives up
    pub max_search_distance: f32,
    /// Candidate enumeration order
    pub search_pattern: SearchPattern,
    /// Whether vertical offsets are searched at all
    pub search_vertical: bool,
    /// Distance between vertical offsets
    pub vertical_step_size: f32,
    /// Direction preference when vertical search is enabled
    pub resolution_priority: ResolutionPriority,
    /// Category labels whose objects never count as collisions
    pub exclude_types: HashSet<String>,
    /// Snap resolved positions to multiples of [`GRID_SNAP_UNIT`]
    pub respect_grid_snap: bool,
    /// Suggested placement-animation length for callers, in milliseconds.
    /// Carried for the host application; the search itself ignores it.
    pub animation_duration_ms: f32,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            search_step_size: 0.5,
            max_search_distance: 10.0,
            search_pattern: SearchPattern::Spiral,
            search_vertical: true,
            vertical_step_size: 1.0,
            resolution_priority: ResolutionPriority::Horizontal,
            exclude_types: HashSet::from(["ground".to_string()]),
            respect_grid_snap: false,
            animation_duration_ms: 150.0,
        }
    }
}

impl ResolutionConfig {
    /// Clamp all numeric fields to their safe minimums and normalize
    /// excluded categories to lowercase.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.search_step_size = self.search_step_size.max(MIN_STEP_SIZE);
        self.vertical_step_size = self.vertical_step_size.max(MIN_STEP_SIZE);
        self.max_search_distance = self.max_search_distance.max(MIN_SEARCH_DISTANCE);
        self.animation_duration_ms = self.animation_duration_ms.max(0.0);
        let normalized = self
            .exclude_types
            .iter()
            .map(|category| category.to_ascii_lowercase())
            .collect();
        self.exclude_types = normalized;
        self
    }

    /// Shallow-merge a patch over this config: every `Some` field in the
    /// patch replaces the corresponding field wholesale.
    #[must_use]
    pub fn merged(&self, patch: &ConfigPatch) -> Self {
        let mut merged = self.clone();
        if let Some(enabled) = patch.enabled {
            merged.enabled = enabled;
        }
        if let Some(step) = patch.search_step_size {
            merged.search_step_size = step;
        }
        if let Some(distance) = patch.max_search_distance {
            merged.max_search_distance = distance;
        }
        if let Some(pattern) = patch.search_pattern {
            merged.search_pattern = pattern;
        }
        if let Some(vertical) = patch.search_vertical {
            merged.search_vertical = vertical;
        }
        if let Some(step) = patch.vertical_step_size {
            merged.vertical_step_size = step;
        }
        if let Some(priority) = patch.resolution_priority {
            merged.resolution_priority = priority;
        }
        if let Some(ref types) = patch.exclude_types {
            merged.exclude_types = types.clone();
        }
        if let Some(snap) = patch.respect_grid_snap {
            merged.respect_grid_snap = snap;
        }
        if let Some(duration) = patch.animation_duration_ms {
            merged.animation_duration_ms = duration;
        }
        merged
    }

    /// Whether a category label is excluded from collision checks.
    pub fn excludes_type(&self, category: &str) -> bool {
        self.exclude_types.contains(category)
    }

    /// Build a config from a named preset, merged over the defaults.
    ///
    /// Known presets: `"editor"` (grid snapping on), `"fine"` (quarter
    /// steps), `"coarse"` (full steps, wide radius, no vertical search).
    /// Unknown names fall back to the plain defaults with a warning.
    pub fn preset(name: &str) -> Self {
        let base = Self::default();
        match preset_patch(name) {
            Some(patch) => base.merged(&patch).validated(),
            None => {
                log::warn!("unknown config preset '{}', using defaults", name);
                base
            }
        }
    }
}

/// Shallow overlay for [`ResolutionConfig`]
///
/// Used for runtime config updates, per-call overrides, and named
/// presets. `None` fields leave the base value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigPatch {
    /// Override for `enabled`
    pub enabled: Option<bool>,
    /// Override for `search_step_size`
    pub search_step_size: Option<f32>,
    /// Override for `max_search_distance`
    pub max_search_distance: Option<f32>,
    /// Override for `search_pattern`
    pub search_pattern: Option<SearchPattern>,
    /// Override for `search_vertical`
    pub search_vertical: Option<bool>,
    /// Override for `vertical_step_size`
    pub vertical_step_size: Option<f32>,
    /// Override for `resolution_priority`
    pub resolution_priority: Option<ResolutionPriority>,
    /// Override for `exclude_types` (replaces the whole set)
    pub exclude_types: Option<HashSet<String>>,
    /// Override for `respect_grid_snap`
    pub respect_grid_snap: Option<bool>,
    /// Override for `animation_duration_ms`
    pub animation_duration_ms: Option<f32>,
}

fn preset_patch(name: &str) -> Option<ConfigPatch> {
    match name {
        "editor" => Some(ConfigPatch {
            respect_grid_snap: Some(true),
            search_step_size: Some(GRID_SNAP_UNIT),
            ..ConfigPatch::default()
        }),
        "fine" => Some(ConfigPatch {
            search_step_size: Some(0.25),
            vertical_step_size: Some(0.25),
            ..ConfigPatch::default()
        }),
        "coarse" => Some(ConfigPatch {
            search_step_size: Some(1.0),
            max_search_distance: Some(20.0),
            search_vertical: Some(false),
            ..ConfigPatch::default()
        }),
        _ => None,
    }
}

/// Configuration file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported file extension
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// File persistence for configuration types
///
/// Supports TOML and RON, selected by file extension. Loaded values are
/// clamped when handed to the resolver, not at parse time.
pub trait ConfigFile: Serialize + for<'de> Deserialize<'de> + Sized {
    /// Load configuration from a `.toml` or `.ron` file.
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to a `.toml` or `.ron` file.
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

impl ConfigFile for ResolutionConfig {}
impl ConfigFile for ConfigPatch {}
