//! Fixed timestep simulation tick
//!
//! Core game loop that advances the shift deterministically.

use glam::Vec2;

use super::pizza::{CookState, Tool, ToolResult};
use super::state::{GameEvent, GameState, ServeOutcome};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tool button pressed this tick
    pub select_tool: Option<Tool>,
    /// Use the selected tool at this point (pizza-centered)
    pub apply_at: Option<Vec2>,
    /// Pizza sits in the oven during this tick
    pub in_oven: bool,
    /// Serve button pressed
    pub serve: bool,
}

/// Advance the shift by one fixed timestep.
/// Returns the serve outcome if serve was pressed this tick.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Option<ServeOutcome> {
    // Workbench first so a pizza finished this tick can be served this tick
    if let Some(tool) = input.select_tool {
        state.workbench.select(tool);
    }
    if let Some(pos) = input.apply_at {
        let result = state.workbench.apply(pos);
        if !matches!(result, ToolResult::Stamped | ToolResult::Trashed) {
            log::trace!("Tool {:?} at {:?}: {:?}", state.workbench.tool, pos, result);
        }
    }
    if input.in_oven {
        match state.workbench.bake(dt) {
            Some(CookState::Cooked) => state.events.push(GameEvent::PizzaCooked),
            Some(CookState::Burnt) => state.events.push(GameEvent::PizzaBurnt),
            _ => {}
        }
    }

    let outcome = input.serve.then(|| {
        // Nobody to take it, so the pizza stays on the bench
        let pizza = if state.has_active_customer() {
            state.workbench.take()
        } else {
            state.workbench.served_state()
        };
        state.serve(pizza)
    });

    state.time_ticks += 1;
    state.elapsed += dt;

    state.tick_patience(dt);
    state.tick_timers(dt);

    outcome
}
