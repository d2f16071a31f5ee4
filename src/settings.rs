//! Game settings
//!
//! The five tunables a host can expose: paddle speed, ball speed, max score
//! and paddle size. Loaded from JSON and validated here, so the simulation
//! can assume every value it reads is finite and sane.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::GameState;

/// Rejected settings input
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for {field}: {value}")]
    Invalid { field: &'static str, value: String },
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Paddle step per key press / pursuit tick
    pub paddle_speed: f32,
    /// Ball travel per tick on each axis
    pub ball_speed: f32,
    /// Points needed to win a round
    pub max_score: u32,
    pub paddle_width: f32,
    pub paddle_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            paddle_speed: PADDLE_SPEED,
            ball_speed: BALL_SPEED,
            max_score: MAX_SCORE,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Every speed and size must be a finite positive number, and a round
    /// needs at least one point to win
    pub fn validate(&self) -> Result<(), SettingsError> {
        let scalars = [
            ("paddle_speed", self.paddle_speed),
            ("ball_speed", self.ball_speed),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
        ];
        for (field, value) in scalars {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::Invalid {
                    field,
                    value: value.to_string(),
                });
            }
        }
        if self.max_score == 0 {
            return Err(SettingsError::Invalid {
                field: "max_score",
                value: self.max_score.to_string(),
            });
        }
        Ok(())
    }

    /// Push every value into a running game; each takes effect next tick
    pub fn apply(&self, state: &GameState) {
        state.set_paddle_speed(self.paddle_speed);
        state.set_ball_speed(self.ball_speed);
        state.set_max_score(self.max_score);
        state.set_paddle_width(self.paddle_width);
        state.set_paddle_height(self.paddle_height);
        log::debug!("Applied settings {:?}", self);
    }
}
