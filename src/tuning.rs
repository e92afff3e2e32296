//! Data-driven game balance
//!
//! Every field has a default, so a tuning file only needs to name the values
//! it overrides.

use std::path::Path;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Balance knobs for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Delay before the very first batch (seconds)
    pub first_batch_delay: f32,
    /// Pause between the screen clearing and the next batch (seconds)
    pub popup_delay: f32,
    /// Time span over which a chain launches its five enemies (seconds)
    pub chain_delay: f32,
    /// Physics world speed multiplier at session start
    pub simulation_speed: f32,
    /// Per-batch multiplier applied to `popup_delay`
    pub popup_decay: f32,
    /// Per-batch multiplier applied to `chain_delay`
    pub chain_decay: f32,
    /// Per-batch multiplier applied to `simulation_speed`
    pub speed_growth: f32,
    /// Vertical gravity in m/s² (negative pulls down)
    pub gravity: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            first_batch_delay: 2.0,
            popup_delay: 0.9,
            chain_delay: 3.0,
            simulation_speed: 0.85,
            popup_decay: 0.991,
            chain_decay: 0.99,
            speed_growth: 1.02,
            gravity: -6.0,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall or reverse the difficulty ramp
    pub fn validate(&self) -> Result<()> {
        let delays = [
            ("first_batch_delay", self.first_batch_delay),
            ("popup_delay", self.popup_delay),
            ("chain_delay", self.chain_delay),
        ];
        for (name, value) in delays {
            if !(value.is_finite() && value >= 0.0) {
                bail!("{name} must be a finite, non-negative number of seconds (got {value})");
            }
        }
        for (name, value) in [("popup_decay", self.popup_decay), ("chain_decay", self.chain_decay)] {
            if !(value > 0.0 && value < 1.0) {
                bail!("{name} must be in (0, 1) (got {value})");
            }
        }
        if !(self.simulation_speed.is_finite() && self.simulation_speed > 0.0) {
            bail!("simulation_speed must be positive (got {})", self.simulation_speed);
        }
        if !(self.speed_growth.is_finite() && self.speed_growth > 1.0) {
            bail!("speed_growth must be greater than 1 (got {})", self.speed_growth);
        }
        if !self.gravity.is_finite() {
            bail!("gravity must be finite (got {})", self.gravity);
        }
        Ok(())
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Serialize to pretty JSON (for writing a starter tuning file)
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
