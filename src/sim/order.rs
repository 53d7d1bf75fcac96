//! Orders: generation, validation, and payment

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::topping::{Topping, ToppingSet};
use crate::fraction;
use crate::tuning::Tuning;

/// What a customer wants. Immutable once generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub toppings: ToppingSet,
    /// Always true for generated orders
    pub requires_cooked: bool,
    pub tip: u32,
    pub base_payment: u32,
}

/// The pizza handed over at serve time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PizzaState {
    pub toppings: ToppingSet,
    pub cooked: bool,
}

/// Why a served pizza does not match an order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDiff {
    pub missing: Vec<Topping>,
    pub extra: Vec<Topping>,
    pub undercooked: bool,
}

impl OrderDiff {
    pub fn is_match(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty() && !self.undercooked
    }
}

impl std::fmt::Display for OrderDiff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            let names: Vec<&str> = self.missing.iter().map(|t| t.as_str()).collect();
            parts.push(format!("missing {}", names.join(", ")));
        }
        if !self.extra.is_empty() {
            let names: Vec<&str> = self.extra.iter().map(|t| t.as_str()).collect();
            parts.push(format!("extra {}", names.join(", ")));
        }
        if self.undercooked {
            parts.push("not cooked right".to_string());
        }
        if parts.is_empty() {
            write!(f, "ok")
        } else {
            write!(f, "{}", parts.join("; "))
        }
    }
}

impl Order {
    /// Roll a new order with independent per-topping coin flips
    pub fn generate<R: Rng>(rng: &mut R, tuning: &Tuning) -> Self {
        let odds = &tuning.odds;
        let mut toppings = ToppingSet::new();
        toppings.set(Topping::Sauce, rng.random_bool(odds.sauce));
        toppings.set(Topping::Cheese, rng.random_bool(odds.cheese));
        toppings.set(Topping::Pepperoni, rng.random_bool(odds.pepperoni));
        toppings.set(Topping::Corn, rng.random_bool(odds.corn));
        toppings.set(Topping::Olives, rng.random_bool(odds.olives));

        let tip = rng.random_range(tuning.tip_min..=tuning.tip_max);

        Self {
            toppings,
            requires_cooked: true,
            tip,
            base_payment: tuning.base_payment,
        }
    }

    /// Exact match: same topping set (no extras, none missing) and cooked flag
    pub fn matches(&self, pizza: &PizzaState) -> bool {
        pizza.cooked == self.requires_cooked && pizza.toppings == self.toppings
    }

    /// Itemized comparison, used to explain a rejection
    pub fn diff(&self, pizza: &PizzaState) -> OrderDiff {
        let mut diff = OrderDiff {
            undercooked: pizza.cooked != self.requires_cooked,
            ..Default::default()
        };
        for topping in Topping::ALL {
            match (self.toppings.contains(topping), pizza.toppings.contains(topping)) {
                (true, false) => diff.missing.push(topping),
                (false, true) => diff.extra.push(topping),
                _ => {}
            }
        }
        diff
    }

    /// Base + tip + bonus for the share of patience left
    pub fn payment(&self, remaining_patience: f32, max_patience: f32, max_time_bonus: u32) -> u32 {
        let ratio = fraction(remaining_patience, max_patience);
        let bonus = (ratio * max_time_bonus as f32).floor() as u32;
        self.base_payment
            .saturating_add(self.tip)
            .saturating_add(bonus.min(max_time_bonus))
    }
}
