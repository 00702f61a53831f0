use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::regression::{ModelKind, RegressionModel};

/// Environment variable naming an explicit settings file.
pub const SETTINGS_ENV: &str = "RUSTY_FIT_SETTINGS";

/// Settings file looked up in the working directory when the variable is unset.
pub const DEFAULT_SETTINGS_FILE: &str = "rusty-fit.json";

// ---------------------------------------------------------------------------
// Numeric tolerances
// ---------------------------------------------------------------------------

/// Near-zero thresholds used to reject degenerate systems.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Smallest accepted `|n·Σx² − (Σx)²|` for the closed-form line fit.
    pub linear_denominator: f64,
    /// Smallest accepted pivot magnitude during elimination.
    pub pivot: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            linear_denominator: 1e-10,
            pivot: 1e-12,
        }
    }
}

// ---------------------------------------------------------------------------
// Application settings
// ---------------------------------------------------------------------------

/// Persisted front-end settings. Every field falls back to its default when
/// absent from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tolerances: Tolerances,
    pub model: ModelKind,
    pub degree: usize,
    /// Number of intervals used when sampling the fitted curve.
    pub curve_samples: usize,
    /// Draw the fitted curve progressively after each fit.
    pub animate_curve: bool,
    pub last_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tolerances: Tolerances::default(),
            model: ModelKind::Linear,
            degree: 2,
            curve_samples: 200,
            animate_curve: false,
            last_file: None,
        }
    }
}

impl Settings {
    /// The regression model currently selected.
    pub fn regression_model(&self) -> RegressionModel {
        self.model.with_degree(self.degree)
    }

    /// Where settings are read from and written to.
    pub fn location() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        let settings = serde_json::from_str(&text)
            .with_context(|| format!("parsing settings file {}", path.display()))?;
        Ok(settings)
    }

    /// Load from [`Settings::location`]; a missing or unreadable file yields
    /// the defaults.
    pub fn load_or_default() -> Self {
        let path = Self::location();
        if !path.exists() {
            log::debug!("No settings file at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::error!("Failed to load settings: {e:#}");
                Self::default()
            }
        }
    }

    /// Write settings as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self).context("serializing settings")?;
        std::fs::write(path, text)
            .with_context(|| format!("writing settings file {}", path.display()))?;
        Ok(())
    }
}
