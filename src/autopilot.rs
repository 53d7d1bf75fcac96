//! Autopilot chef
//!
//! Plays the shift headlessly: reads the waiting customer's order, decorates a
//! pizza, bakes it, and serves it. A mistake chance makes it occasionally flip
//! a topping so the angry path gets exercised too.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::lerp;
use crate::sim::{CookState, GameState, TickInput, Tool, Topping, ToppingSet};

/// Sauce dabs per pizza
const SAUCE_DABS: usize = 12;
/// Pieces dropped per non-sauce topping
const PIECES_PER_TOPPING: usize = 3;

#[derive(Debug, Clone, PartialEq)]
enum ChefPhase {
    /// Nothing to do
    Idle,
    /// Reading the order
    Prepping { customer_id: u32, remaining: f32 },
    /// Working through queued tool actions
    Decorating { customer_id: u32 },
    /// Pizza in the oven
    Baking { customer_id: u32 },
}

/// Scripted chef producing tick inputs
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Chance (0-1) of getting one topping wrong
    pub mistake_chance: f64,
    /// Seconds spent reading an order before decorating
    pub prep_delay: f32,
    rng: Pcg32,
    phase: ChefPhase,
    actions: VecDeque<(Tool, Vec2)>,
    last_served: Option<u32>,
}

impl Autopilot {
    pub fn new(seed: u64, mistake_chance: f64) -> Self {
        Self {
            mistake_chance: if mistake_chance.is_nan() {
                0.0
            } else {
                mistake_chance.clamp(0.0, 1.0)
            },
            prep_delay: 1.5,
            rng: Pcg32::seed_from_u64(seed),
            phase: ChefPhase::Idle,
            actions: VecDeque::new(),
            last_served: None,
        }
    }

    /// Decide what to press this tick
    pub fn next_input(&mut self, state: &GameState, dt: f32) -> TickInput {
        let waiting = state
            .customer
            .as_ref()
            .filter(|c| c.active)
            .map(|c| (c.id, c.order.toppings));

        // Customer left while we were working: bin the pizza
        if let Some(working_on) = self.working_on() {
            if waiting.map(|(id, _)| id) != Some(working_on) {
                log::debug!("Chef: customer {} gone, trashing pizza", working_on);
                self.phase = ChefPhase::Idle;
                self.actions.clear();
                return TickInput {
                    select_tool: Some(Tool::Trash),
                    apply_at: Some(Vec2::ZERO),
                    ..Default::default()
                };
            }
        }

        match self.phase.clone() {
            ChefPhase::Idle => {
                if let Some((id, _)) = waiting.filter(|(id, _)| Some(*id) != self.last_served) {
                    self.phase = ChefPhase::Prepping {
                        customer_id: id,
                        remaining: self.prep_delay,
                    };
                }
                TickInput::default()
            }
            ChefPhase::Prepping {
                customer_id,
                remaining,
            } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.phase = ChefPhase::Prepping {
                        customer_id,
                        remaining,
                    };
                } else if let Some((_, wanted)) = waiting {
                    let plan = self.plan_toppings(wanted);
                    self.queue_actions(plan);
                    self.phase = ChefPhase::Decorating { customer_id };
                }
                TickInput::default()
            }
            ChefPhase::Decorating { customer_id } => match self.actions.pop_front() {
                Some((tool, pos)) => TickInput {
                    select_tool: Some(tool),
                    apply_at: Some(pos),
                    ..Default::default()
                },
                None => {
                    self.phase = ChefPhase::Baking { customer_id };
                    TickInput {
                        in_oven: true,
                        ..Default::default()
                    }
                }
            },
            ChefPhase::Baking { customer_id } => {
                if state.workbench.cook_state() == CookState::Cooked {
                    self.phase = ChefPhase::Idle;
                    self.last_served = Some(customer_id);
                    TickInput {
                        serve: true,
                        ..Default::default()
                    }
                } else {
                    TickInput {
                        in_oven: true,
                        ..Default::default()
                    }
                }
            }
        }
    }

    fn working_on(&self) -> Option<u32> {
        match self.phase {
            ChefPhase::Idle => None,
            ChefPhase::Prepping { customer_id, .. }
            | ChefPhase::Decorating { customer_id }
            | ChefPhase::Baking { customer_id } => Some(customer_id),
        }
    }

    /// The toppings the chef will actually put on, possibly with one flipped
    fn plan_toppings(&mut self, wanted: ToppingSet) -> ToppingSet {
        let mut plan = wanted;
        if self.rng.random_bool(self.mistake_chance) {
            let topping = Topping::ALL[self.rng.random_range(0..Topping::ALL.len())];
            plan.set(topping, !plan.contains(topping));
            log::debug!("Chef: fumbled {}", topping.as_str());
        }
        plan
    }

    fn queue_actions(&mut self, plan: ToppingSet) {
        self.actions.clear();
        for topping in plan.iter() {
            match topping {
                Topping::Sauce => {
                    // Spiral outward so consecutive dabs stay well apart
                    for i in 0..SAUCE_DABS {
                        let t = i as f32 / SAUCE_DABS as f32;
                        let r = lerp(0.2, 0.7, t);
                        let theta = t * std::f32::consts::TAU * 2.0;
                        self.actions
                            .push_back((Tool::SauceBrush, Vec2::from_angle(theta) * r));
                    }
                }
                other => {
                    for _ in 0..PIECES_PER_TOPPING {
                        let r = self.rng.random_range(0.0..0.8f32);
                        let theta = self.rng.random_range(0.0..std::f32::consts::TAU);
                        self.actions
                            .push_back((Tool::Place(other), Vec2::from_angle(theta) * r));
                    }
                }
            }
        }
    }
}
