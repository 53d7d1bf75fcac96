//! Customers and their patience

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::order::Order;
use crate::fraction;

/// Names customers are drawn from
pub const NAME_POOL: [&str; 10] = [
    "Marco", "Giulia", "Luca", "Sofia", "Paolo", "Chiara", "Enzo", "Bianca", "Tony", "Rosa",
];

/// Patience timer phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatienceState {
    /// Not started
    Idle,
    /// Counting down
    Waiting,
    /// Pizza handed over before running out (terminal)
    Served,
    /// Ran out before being served (terminal)
    TimedOut,
}

/// How the customer feels, for the UI patience bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Calm,
    Impatient,
    Furious,
}

const CALM_COLOR: Vec3 = Vec3::new(0.2, 0.8, 0.25);
const IMPATIENT_COLOR: Vec3 = Vec3::new(0.95, 0.8, 0.1);
const FURIOUS_COLOR: Vec3 = Vec3::new(0.9, 0.15, 0.1);

/// Linear countdown from a fixed maximum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatienceTimer {
    pub max: f32,
    pub remaining: f32,
    pub state: PatienceState,
}

impl PatienceTimer {
    pub fn new(max: f32) -> Self {
        Self {
            max,
            remaining: max,
            state: PatienceState::Idle,
        }
    }

    /// Idle -> Waiting, refilling patience
    pub fn start(&mut self) {
        if self.state == PatienceState::Idle {
            self.remaining = self.max;
            self.state = PatienceState::Waiting;
        }
    }

    /// Count down by `dt`. Returns true on the tick patience runs out.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.state != PatienceState::Waiting {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.state = PatienceState::TimedOut;
            return true;
        }
        false
    }

    /// Waiting -> Served. Returns false if the customer was not waiting.
    pub fn serve(&mut self) -> bool {
        if self.state != PatienceState::Waiting {
            return false;
        }
        self.state = PatienceState::Served;
        true
    }

    /// Remaining share of patience in [0, 1]
    pub fn fraction(&self) -> f32 {
        fraction(self.remaining, self.max)
    }

    pub fn mood(&self) -> Mood {
        let f = self.fraction();
        if f > 0.5 {
            Mood::Calm
        } else if f > 0.25 {
            Mood::Impatient
        } else {
            Mood::Furious
        }
    }

    /// Patience bar color: green at full, yellow at half, red when empty
    pub fn color(&self) -> Vec3 {
        let f = self.fraction();
        if f > 0.5 {
            IMPATIENT_COLOR.lerp(CALM_COLOR, (f - 0.5) * 2.0)
        } else {
            FURIOUS_COLOR.lerp(IMPATIENT_COLOR, f * 2.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, PatienceState::Served | PatienceState::TimedOut)
    }
}

/// How a visit ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reaction {
    /// Got the right pizza
    Happy,
    /// Waited too long
    AngryTimeout,
    /// Got the wrong pizza
    AngryWrongOrder,
}

impl Reaction {
    pub fn is_happy(&self) -> bool {
        matches!(self, Reaction::Happy)
    }
}

/// One customer visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: u32,
    pub name: String,
    pub order: Order,
    pub patience: PatienceTimer,
    /// Cleared the moment the customer reacts
    pub active: bool,
}

impl Customer {
    /// Spawn a customer with a random name and the given order, already waiting
    pub fn spawn<R: Rng>(id: u32, rng: &mut R, order: Order, max_patience: f32) -> Self {
        let name = NAME_POOL[rng.random_range(0..NAME_POOL.len())].to_string();
        let mut patience = PatienceTimer::new(max_patience);
        patience.start();
        Self {
            id,
            name,
            order,
            patience,
            active: true,
        }
    }
}
