//! Pizza workbench: decorating and baking
//!
//! Produces the `PizzaState` handed to a customer at serve time.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::order::PizzaState;
use super::topping::{Topping, ToppingSet};
use crate::fraction;
use crate::tuning::Tuning;

/// Doneness of the pizza
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CookState {
    Raw,
    Cooked,
    Burnt,
}

const RAW_TINT: Vec3 = Vec3::new(0.96, 0.87, 0.7);
const COOKED_TINT: Vec3 = Vec3::new(0.86, 0.6, 0.3);
const BURNT_TINT: Vec3 = Vec3::new(0.25, 0.15, 0.1);

/// Selected workbench tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tool {
    /// Paint sauce in spaced dabs
    SauceBrush,
    /// Drop a single topping
    Place(Topping),
    /// Throw the pizza away and start over
    Trash,
}

/// Result of using a tool on the pizza
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolResult {
    /// A stamp was added
    Stamped,
    /// Too close to the previous sauce dab
    TooClose,
    /// Outside the dough
    OffPizza,
    /// The pizza has already been in the oven
    Locked,
    /// The pizza was reset
    Trashed,
}

/// One dab of sauce or piece of topping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stamp {
    pub topping: Topping,
    pub pos: Vec2,
}

/// A pizza being assembled
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pizza {
    pub stamps: Vec<Stamp>,
    /// Seconds spent in the oven
    pub oven_time: f32,
    last_sauce: Option<Vec2>,
}

impl Pizza {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set of toppings with at least one stamp
    pub fn toppings(&self) -> ToppingSet {
        self.stamps.iter().map(|s| s.topping).collect()
    }

    pub fn stamp_count(&self, topping: Topping) -> usize {
        self.stamps.iter().filter(|s| s.topping == topping).count()
    }

    /// Decorating stops once the pizza has seen the oven
    pub fn is_locked(&self) -> bool {
        self.oven_time > 0.0
    }
}

/// Workbench holding the current pizza, the selected tool, and the oven
#[derive(Debug, Clone)]
pub struct Workbench {
    pub pizza: Pizza,
    pub tool: Tool,
    radius: f32,
    sauce_spacing: f32,
    cook_time: f32,
    burn_time: f32,
}

impl Workbench {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pizza: Pizza::new(),
            tool: Tool::SauceBrush,
            radius: tuning.pizza_radius,
            sauce_spacing: tuning.sauce_spacing,
            cook_time: tuning.cook_time,
            burn_time: tuning.burn_time,
        }
    }

    /// Pick a tool (button press)
    pub fn select(&mut self, tool: Tool) {
        if self.tool != tool {
            log::debug!("Selected tool {:?}", tool);
        }
        self.tool = tool;
    }

    /// Use the selected tool at `pos` (pizza-centered coordinates)
    pub fn apply(&mut self, pos: Vec2) -> ToolResult {
        match self.tool {
            Tool::Trash => {
                self.trash();
                ToolResult::Trashed
            }
            Tool::SauceBrush => self.paint_sauce(pos),
            Tool::Place(topping) => self.place(topping, pos),
        }
    }

    /// Add a sauce dab if it is far enough from the last one
    pub fn paint_sauce(&mut self, pos: Vec2) -> ToolResult {
        if let Some(result) = self.check_placement(pos) {
            return result;
        }
        if let Some(last) = self.pizza.last_sauce {
            if last.distance(pos) < self.sauce_spacing {
                return ToolResult::TooClose;
            }
        }
        self.pizza.stamps.push(Stamp {
            topping: Topping::Sauce,
            pos,
        });
        self.pizza.last_sauce = Some(pos);
        ToolResult::Stamped
    }

    /// Drop a topping piece on the pizza
    pub fn place(&mut self, topping: Topping, pos: Vec2) -> ToolResult {
        if topping == Topping::Sauce {
            return self.paint_sauce(pos);
        }
        if let Some(result) = self.check_placement(pos) {
            return result;
        }
        self.pizza.stamps.push(Stamp { topping, pos });
        ToolResult::Stamped
    }

    fn check_placement(&self, pos: Vec2) -> Option<ToolResult> {
        if self.pizza.is_locked() {
            Some(ToolResult::Locked)
        } else if pos.length() > self.radius {
            Some(ToolResult::OffPizza)
        } else {
            None
        }
    }

    /// Start over with fresh dough
    pub fn trash(&mut self) {
        log::debug!("Trashed pizza with {} stamps", self.pizza.stamps.len());
        self.pizza = Pizza::new();
    }

    /// Leave the pizza in the oven for `dt`. Returns the new state if it changed.
    pub fn bake(&mut self, dt: f32) -> Option<CookState> {
        let before = self.cook_state();
        self.pizza.oven_time += dt.max(0.0);
        let after = self.cook_state();
        (before != after).then_some(after)
    }

    pub fn cook_state(&self) -> CookState {
        let t = self.pizza.oven_time;
        if t >= self.burn_time {
            CookState::Burnt
        } else if t >= self.cook_time {
            CookState::Cooked
        } else {
            CookState::Raw
        }
    }

    /// Crust color: dough -> golden over the cook time, golden -> charred after
    pub fn tint(&self) -> Vec3 {
        let t = self.pizza.oven_time;
        if t < self.cook_time {
            RAW_TINT.lerp(COOKED_TINT, fraction(t, self.cook_time))
        } else {
            let over = t - self.cook_time;
            COOKED_TINT.lerp(BURNT_TINT, fraction(over, self.burn_time - self.cook_time))
        }
    }

    /// Snapshot for serving; burnt counts as not cooked
    pub fn served_state(&self) -> PizzaState {
        PizzaState {
            toppings: self.pizza.toppings(),
            cooked: self.cook_state() == CookState::Cooked,
        }
    }

    /// Hand the pizza over and start a fresh one
    pub fn take(&mut self) -> PizzaState {
        let state = self.served_state();
        self.pizza = Pizza::new();
        state
    }
}
