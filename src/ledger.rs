//! Shift ledger
//!
//! Keeps one record per finished visit and builds the end-of-shift report.

use serde::{Deserialize, Serialize};

use crate::sim::{GameEvent, GamePhase, GameState, Reaction};

/// A single finished visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub customer_id: u32,
    pub name: String,
    pub reaction: Reaction,
    /// Money change from this visit
    pub delta: i64,
    /// Money after the visit
    pub money_after: u32,
    /// Shift time (seconds) when the customer reacted
    pub time: f32,
}

/// Every visit of the shift, in order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShiftLedger {
    pub visits: Vec<VisitRecord>,
}

impl ShiftLedger {
    pub fn new() -> Self {
        Self { visits: Vec::new() }
    }

    /// Record the reactions among `events`. Returns how many visits were added.
    pub fn observe(&mut self, events: &[GameEvent], time: f32) -> usize {
        let before = self.visits.len();
        for event in events {
            if let GameEvent::CustomerReacted {
                id,
                name,
                reaction,
                delta,
                money,
                ..
            } = event
            {
                self.visits.push(VisitRecord {
                    customer_id: *id,
                    name: name.clone(),
                    reaction: *reaction,
                    delta: *delta,
                    money_after: *money,
                    time,
                });
            }
        }
        self.visits.len() - before
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Largest single payment (if any happy customer)
    pub fn best_payment(&self) -> Option<u32> {
        self.visits
            .iter()
            .filter(|v| v.reaction.is_happy())
            .map(|v| v.delta as u32)
            .max()
    }

    /// Money taken in from happy customers
    pub fn total_earned(&self) -> u64 {
        self.visits
            .iter()
            .filter(|v| v.delta > 0)
            .map(|v| v.delta as u64)
            .sum()
    }

    /// Money actually lost to penalties (after clamping at zero)
    pub fn total_penalties(&self) -> u64 {
        self.visits
            .iter()
            .filter(|v| v.delta < 0)
            .map(|v| v.delta.unsigned_abs())
            .sum()
    }

    pub fn count(&self, reaction: Reaction) -> usize {
        self.visits.iter().filter(|v| v.reaction == reaction).count()
    }

    /// Summarize the shift
    pub fn report(&self, state: &GameState) -> ShiftReport {
        ShiftReport {
            seed: state.seed,
            money: state.money,
            completed: state.completed,
            failed: state.failed,
            timeouts: self.count(Reaction::AngryTimeout),
            wrong_orders: self.count(Reaction::AngryWrongOrder),
            goal_reached: state.phase == GamePhase::GoalReached,
            elapsed: format_time(state.elapsed),
            best_payment: self.best_payment(),
            visits: self.visits.clone(),
        }
    }
}

/// End-of-shift summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftReport {
    pub seed: u64,
    pub money: u32,
    pub completed: u32,
    pub failed: u32,
    pub timeouts: usize,
    pub wrong_orders: usize,
    pub goal_reached: bool,
    /// Shift length as `m:ss`
    pub elapsed: String,
    pub best_payment: Option<u32>,
    pub visits: Vec<VisitRecord>,
}

/// Format seconds as a clock string (`m:ss`)
pub fn format_time(seconds: f32) -> String {
    let total = seconds.max(0.0).floor() as u32;
    format!("{}:{:02}", total / 60, total % 60)
}
