//! Tunable engine parameters.
//!
//! Every struct has a [`Default`] carrying the values the editor ships with,
//! and a `validate` method for values loaded from elsewhere.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Standard purchased length of straight duct stock, in millimetres.
pub const DEFAULT_STANDARD_LENGTH: f64 = 4000.0;

/// On-screen snap catch radius in pixels.
pub const DEFAULT_SNAP_THRESHOLD_PX: f64 = 15.0;

/// Number of undo snapshots kept by a session.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Whether connectors of different diameters may snap together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapPolicy {
    /// Any two connectors in range may join; mismatches are left for the user to see.
    #[default]
    AnyDiameter,
    /// Only connectors with equal diameters may join.
    MatchingDiameter,
}

impl SnapPolicy {
    pub(crate) fn allows(self, a: crate::part::Diameter, b: crate::part::Diameter) -> bool {
        match self {
            Self::AnyDiameter => true,
            Self::MatchingDiameter => a == b,
        }
    }
}

/// Snapping parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapConfig {
    /// Catch radius in screen pixels; divided by the camera zoom before use.
    pub threshold_px: f64,
    #[serde(default)]
    pub policy: SnapPolicy,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            threshold_px: DEFAULT_SNAP_THRESHOLD_PX,
            policy: SnapPolicy::AnyDiameter,
        }
    }
}

impl SnapConfig {
    /// # Errors
    ///
    /// Returns an error if the threshold is not positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("threshold_px", self.threshold_px)
    }
}

/// Takeoff parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TakeoffConfig {
    /// Length of one purchased stock bar in millimetres.
    pub standard_length: f64,
}

impl Default for TakeoffConfig {
    fn default() -> Self {
        Self {
            standard_length: DEFAULT_STANDARD_LENGTH,
        }
    }
}

impl TakeoffConfig {
    /// # Errors
    ///
    /// Returns an error if the standard length is not positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("standard_length", self.standard_length)
    }
}

/// Editing-session parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub snap: SnapConfig,
    #[serde(default)]
    pub takeoff: TakeoffConfig,
    /// Degrees added by one rotate command.
    pub rotate_step_deg: f64,
    /// Maximum number of history snapshots.
    pub history_limit: usize,
    /// Distance in millimetres a disconnected part is nudged along x and y.
    pub disconnect_offset: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            snap: SnapConfig::default(),
            takeoff: TakeoffConfig::default(),
            rotate_step_deg: 45.0,
            history_limit: DEFAULT_HISTORY_LIMIT,
            disconnect_offset: 10.0,
        }
    }
}

impl SessionConfig {
    /// # Errors
    ///
    /// Returns an error if any nested value is out of range or the history
    /// cannot hold at least one snapshot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.snap.validate()?;
        self.takeoff.validate()?;
        if self.history_limit < 1 {
            return Err(ConfigError::TooSmall {
                parameter: "history_limit",
                value: self.history_limit,
                min: 1,
            });
        }
        Ok(())
    }
}

fn positive(parameter: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { parameter, value })
    }
}
