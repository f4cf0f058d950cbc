//! Engine configuration supplied by the host at mount time.
//!
//! Every field is optional on the wire; missing fields fall back to the
//! constants in [`crate::consts`]. Hosts pass a JSON object such as
//! `{"stroke_size": 3, "zoom_max": 4}` and receive a [`ConfigError`] if it
//! does not parse or fails validation.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::camera::ZoomBounds;
use crate::consts::{
    DECIMATION_STEP, DEFAULT_STROKE_COLOR, DEFAULT_STROKE_SIZE, ERASE_RADIUS, PAN_KEY, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Initial stroke width.
    pub stroke_size: f64,
    /// CSS colour for ink.
    pub stroke_color: String,
    /// Logical-space eraser radius.
    pub erase_radius: f64,
    /// Minimum per-axis movement before a new point is captured.
    pub decimation_step: f64,
    /// Zoom multiplier per accelerated wheel tick. Must exceed 1.
    pub zoom_step: f64,
    pub zoom_min: f64,
    pub zoom_max: f64,
    /// `KeyboardEvent.code` that switches primary drags to panning.
    pub pan_key: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stroke_size: DEFAULT_STROKE_SIZE,
            stroke_color: DEFAULT_STROKE_COLOR.to_owned(),
            erase_radius: ERASE_RADIUS,
            decimation_step: DECIMATION_STEP,
            zoom_step: ZOOM_STEP,
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            pan_key: PAN_KEY.to_owned(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config object.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields and
    /// [`ConfigError::Invalid`] when a value is out of range.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("stroke_size", self.stroke_size)?;
        positive("erase_radius", self.erase_radius)?;
        positive("zoom_min", self.zoom_min)?;
        positive("zoom_max", self.zoom_max)?;
        if !self.decimation_step.is_finite() || self.decimation_step < 0.0 {
            return Err(ConfigError::Invalid { field: "decimation_step", reason: "must be a finite non-negative number" });
        }
        if !self.zoom_step.is_finite() || self.zoom_step <= 1.0 {
            return Err(ConfigError::Invalid { field: "zoom_step", reason: "must be greater than 1" });
        }
        if self.zoom_min > self.zoom_max {
            return Err(ConfigError::Invalid { field: "zoom_min", reason: "must not exceed zoom_max" });
        }
        if !(self.zoom_min..=self.zoom_max).contains(&1.0) {
            return Err(ConfigError::Invalid { field: "zoom_min", reason: "zoom range must include 1.0" });
        }
        if self.stroke_color.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "stroke_color", reason: "must not be empty" });
        }
        if self.pan_key.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "pan_key", reason: "must not be empty" });
        }
        Ok(())
    }

    #[must_use]
    pub fn zoom_bounds(&self) -> ZoomBounds {
        ZoomBounds { min: self.zoom_min, max: self.zoom_max }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: "must be a finite positive number" })
    }
}
