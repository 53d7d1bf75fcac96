//! Pizza Rush - A casual pizza shop simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (orders, patience, pizza workbench, session controller)
//! - `tuning`: Data-driven game balance loaded from JSON
//! - `feedback`: Capability traits for audio/particle collaborators
//! - `ledger`: Per-visit shift record and end-of-shift report
//! - `autopilot`: Scripted chef that plays a shift headlessly

pub mod autopilot;
pub mod feedback;
pub mod ledger;
pub mod sim;
pub mod tuning;

pub use autopilot::Autopilot;
pub use ledger::{ShiftLedger, ShiftReport};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz is plenty for a countdown game)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Flat payment for any accepted pizza
    pub const BASE_PAYMENT: u32 = 10;
    /// Money lost on a wrong order or timeout
    pub const FAIL_PENALTY: u32 = 5;
    /// Largest bonus paid for serving with full patience left
    pub const MAX_TIME_BONUS: u32 = 5;

    /// Customer patience (seconds)
    pub const MAX_PATIENCE: f32 = 30.0;
    /// Seconds between spawn attempts
    pub const SPAWN_INTERVAL: f32 = 8.0;
    /// Seconds a reacting customer lingers before leaving
    pub const REACTION_DELAY: f32 = 2.0;
    /// Money needed to finish the shift
    pub const GOAL_MONEY: u32 = 100;

    /// Pizza dough radius in workbench units
    pub const PIZZA_RADIUS: f32 = 1.0;
    /// Minimum distance between two sauce stamps
    pub const SAUCE_SPACING: f32 = 0.1;
    /// Oven seconds until the pizza is cooked
    pub const COOK_TIME: f32 = 6.0;
    /// Oven seconds until the pizza is burnt
    pub const BURN_TIME: f32 = 12.0;
}

/// Linear interpolation between two scalars, `t` clamped to [0, 1]
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Ratio of `value` to `max`, clamped to [0, 1] (0 when `max` is not positive)
#[inline]
pub fn fraction(value: f32, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    (value / max).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_clamps() {
        assert_eq!(fraction(15.0, 30.0), 0.5);
        assert_eq!(fraction(-1.0, 30.0), 0.0);
        assert_eq!(fraction(45.0, 30.0), 1.0);
        assert_eq!(fraction(1.0, 0.0), 0.0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 2.0), 10.0);
    }
}
