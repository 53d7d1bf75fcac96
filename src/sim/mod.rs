//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Timers advance only when ticked
//! - No rendering, audio, or platform dependencies

pub mod customer;
pub mod order;
pub mod pizza;
pub mod state;
pub mod tick;
pub mod timer;
pub mod topping;

pub use customer::{Customer, Mood, NAME_POOL, PatienceState, PatienceTimer, Reaction};
pub use order::{Order, OrderDiff, PizzaState};
pub use pizza::{CookState, Pizza, Stamp, Tool, ToolResult, Workbench};
pub use state::{GameEvent, GamePhase, GameState, ServeOutcome};
pub use tick::{TickInput, tick};
pub use timer::{IntervalTimer, Scheduler};
pub use topping::{Topping, ToppingSet};
