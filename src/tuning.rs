//! Data-driven game balance
//!
//! Every knob the shift uses lives here so a JSON file can rebalance the game
//! without touching code. Missing fields fall back to the defaults in `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating tuning
#[derive(Debug, Error)]
pub enum TuningError {
    /// The tuning file could not be read.
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    /// The tuning file is not valid JSON for `Tuning`.
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range.
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Per-topping probabilities used by the order generator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToppingOdds {
    pub sauce: f64,
    pub cheese: f64,
    pub pepperoni: f64,
    pub corn: f64,
    pub olives: f64,
}

impl Default for ToppingOdds {
    fn default() -> Self {
        Self {
            sauce: 0.9,
            cheese: 0.85,
            pepperoni: 0.5,
            corn: 0.5,
            olives: 0.5,
        }
    }
}

impl ToppingOdds {
    fn as_array(&self) -> [(&'static str, f64); 5] {
        [
            ("sauce", self.sauce),
            ("cheese", self.cheese),
            ("pepperoni", self.pepperoni),
            ("corn", self.corn),
            ("olives", self.olives),
        ]
    }
}

/// Game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Customers ===
    /// Patience a customer starts with (seconds)
    pub max_patience: f32,
    /// Seconds between spawn attempts
    pub spawn_interval: f32,
    /// Seconds a customer lingers after reacting
    pub reaction_delay: f32,

    // === Orders ===
    pub odds: ToppingOdds,
    /// Inclusive tip range
    pub tip_min: u32,
    pub tip_max: u32,

    // === Money ===
    pub base_payment: u32,
    pub fail_penalty: u32,
    pub max_time_bonus: u32,
    pub goal_money: u32,

    // === Kitchen ===
    pub pizza_radius: f32,
    pub sauce_spacing: f32,
    pub cook_time: f32,
    pub burn_time: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_patience: MAX_PATIENCE,
            spawn_interval: SPAWN_INTERVAL,
            reaction_delay: REACTION_DELAY,

            odds: ToppingOdds::default(),
            tip_min: 1,
            tip_max: 5,

            base_payment: BASE_PAYMENT,
            fail_penalty: FAIL_PENALTY,
            max_time_bonus: MAX_TIME_BONUS,
            goal_money: GOAL_MONEY,

            pizza_radius: PIZZA_RADIUS,
            sauce_spacing: SAUCE_SPACING,
            cook_time: COOK_TIME,
            burn_time: BURN_TIME,
        }
    }
}

impl Tuning {
    /// Parse tuning from a JSON string and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load tuning, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, TuningError> {
        if !path.exists() {
            log::warn!("Tuning file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        for (name, p) in self.odds.as_array() {
            if !(0.0..=1.0).contains(&p) {
                return Err(TuningError::Invalid(format!(
                    "{name} probability {p} outside [0, 1]"
                )));
            }
        }
        let positive = [
            ("max_patience", self.max_patience),
            ("spawn_interval", self.spawn_interval),
            ("pizza_radius", self.pizza_radius),
            ("cook_time", self.cook_time),
        ];
        for (name, v) in positive {
            if v.is_nan() || v <= 0.0 {
                return Err(TuningError::Invalid(format!("{name} must be positive, got {v}")));
            }
        }
        if self.reaction_delay < 0.0 || self.sauce_spacing < 0.0 {
            return Err(TuningError::Invalid(
                "reaction_delay and sauce_spacing must not be negative".into(),
            ));
        }
        if self.tip_min > self.tip_max {
            return Err(TuningError::Invalid(format!(
                "tip range {}..={} is empty",
                self.tip_min, self.tip_max
            )));
        }
        // Goal is only checked when money goes up, so zero would never fire
        if self.goal_money == 0 {
            return Err(TuningError::Invalid("goal_money must be at least 1".into()));
        }
        if self.burn_time <= self.cook_time {
            return Err(TuningError::Invalid(format!(
                "burn_time {} must exceed cook_time {}",
                self.burn_time, self.cook_time
            )));
        }
        Ok(())
    }

    /// Serialize to pretty JSON (for writing a starter tuning file)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.base_payment, 10);
        assert_eq!(tuning.fail_penalty, 5);
        assert_eq!(tuning.odds.sauce, 0.9);
        assert_eq!(tuning.odds.cheese, 0.85);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "goal_money": 50, "odds": { "corn": 0.1 } }"#)
            .expect("valid json");
        assert_eq!(tuning.goal_money, 50);
        assert_eq!(tuning.odds.corn, 0.1);
        assert_eq!(tuning.odds.sauce, 0.9);
        assert_eq!(tuning.max_patience, MAX_PATIENCE);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = Tuning::from_json(r#"{ "odds": { "olives": 1.5 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
        assert!(err.to_string().contains("olives"));
    }

    #[test]
    fn test_rejects_empty_tip_range() {
        let err = Tuning::from_json(r#"{ "tip_min": 6, "tip_max": 2 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_goal() {
        let err = Tuning::from_json(r#"{ "goal_money": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("goal_money"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("/definitely/not/here/tuning.json");
        let tuning = Tuning::load_or_default(path).expect("defaults");
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_json_roundtrip_preserves_values() {
        let mut tuning = Tuning::default();
        tuning.goal_money = 42;
        let json = tuning.to_json().expect("serialize");
        assert_eq!(Tuning::from_json(&json).expect("parse"), tuning);
    }
}
