//! Shift state and the session controller
//!
//! Owns every service the shift needs (RNG, timers, workbench, customers) so
//! nothing is looked up globally.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::customer::{Customer, Reaction};
use super::order::{Order, OrderDiff, PizzaState};
use super::pizza::Workbench;
use super::timer::{IntervalTimer, Scheduler};
use crate::tuning::Tuning;

/// Current phase of the shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Customers keep coming
    Open,
    /// Money goal met, no more spawns
    GoalReached,
}

/// Something the feedback collaborators (audio, particles, UI) should know about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new customer walked in
    CustomerArrived { id: u32, name: String, order: Order },
    /// A customer reacted to a pizza or to running out of patience
    CustomerReacted {
        id: u32,
        name: String,
        reaction: Reaction,
        /// Money change applied (negative on penalty, may be less than the
        /// penalty when clamped at zero)
        delta: i64,
        /// Money after the change
        money: u32,
        /// What was wrong with the pizza, for wrong orders
        diff: Option<OrderDiff>,
    },
    /// A reacting customer finished their display delay and left
    CustomerLeft { id: u32, name: String },
    /// Serve pressed with nobody at the counter
    ServeIgnored,
    /// The pizza in the oven just became cooked
    PizzaCooked,
    /// The pizza in the oven just burnt
    PizzaBurnt,
    /// Money goal met (emitted once per shift)
    GoalReached { money: u32 },
}

/// What happened when a pizza was served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeOutcome {
    /// Right pizza, customer paid
    Accepted { payment: u32 },
    /// Wrong pizza, penalty applied
    Rejected { penalty: u32 },
    /// Nobody was waiting
    NoCustomer,
}

/// Delayed work queued on the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Depart { customer_id: u32 },
}

/// Complete shift state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub money: u32,
    /// Customers served correctly
    pub completed: u32,
    /// Customers lost to wrong orders or timeouts
    pub failed: u32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulated seconds since the shift opened
    pub elapsed: f32,
    /// The one customer waiting at the counter
    pub customer: Option<Customer>,
    /// Customers showing their reaction before leaving
    pub departing: Vec<Customer>,
    pub workbench: Workbench,
    /// Events produced since the last `drain_events`
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    spawn_timer: IntervalTimer,
    scheduler: Scheduler<Pending>,
    next_id: u32,
}

impl GameState {
    /// Open a new shift
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            money: 0,
            completed: 0,
            failed: 0,
            phase: GamePhase::Open,
            time_ticks: 0,
            elapsed: 0.0,
            customer: None,
            departing: Vec::new(),
            workbench: Workbench::new(&tuning),
            events: Vec::new(),
            spawn_timer: IntervalTimer::new(tuning.spawn_interval),
            scheduler: Scheduler::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Throw away the shift, abandoning pending timers
    pub fn reset(&mut self) {
        log::info!("Shift reset (seed {})", self.seed);
        *self = Self::new(self.seed, self.tuning.clone());
    }

    /// Allocate a new customer ID
    pub fn next_customer_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn has_active_customer(&self) -> bool {
        self.customer.as_ref().is_some_and(|c| c.active)
    }

    /// Seconds until the spawn timer next fires
    pub fn next_spawn_in(&self) -> f32 {
        self.spawn_timer.remaining()
    }

    /// Take every event produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spawn a customer unless one is already waiting or the goal is met.
    /// Returns true if a customer was spawned.
    pub fn try_spawn(&mut self) -> bool {
        if self.phase == GamePhase::GoalReached {
            log::debug!("Spawn skipped: goal reached");
            return false;
        }
        if self.has_active_customer() {
            log::debug!("Spawn skipped: customer already waiting");
            return false;
        }

        let id = self.next_customer_id();
        let order = Order::generate(&mut self.rng, &self.tuning);
        let customer = Customer::spawn(id, &mut self.rng, order, self.tuning.max_patience);
        log::info!(
            "{} arrives wanting {} (tip {})",
            customer.name,
            order.toppings,
            order.tip
        );
        self.events.push(GameEvent::CustomerArrived {
            id,
            name: customer.name.clone(),
            order,
        });
        self.customer = Some(customer);
        true
    }

    /// Hand a pizza to the waiting customer
    pub fn serve(&mut self, pizza: PizzaState) -> ServeOutcome {
        let Some(mut customer) = self.customer.take().filter(|c| c.active) else {
            log::debug!("Serve ignored: nobody waiting");
            self.events.push(GameEvent::ServeIgnored);
            return ServeOutcome::NoCustomer;
        };
        if !customer.patience.serve() {
            // Timer already finished; put it back untouched
            self.customer = Some(customer);
            self.events.push(GameEvent::ServeIgnored);
            return ServeOutcome::NoCustomer;
        }

        let order = customer.order;
        if order.matches(&pizza) {
            let payment = order.payment(
                customer.patience.remaining,
                customer.patience.max,
                self.tuning.max_time_bonus,
            );
            self.money = self.money.saturating_add(payment);
            self.completed += 1;
            log::info!("{} is happy, paid {} (money {})", customer.name, payment, self.money);
            self.react(&mut customer, Reaction::Happy, payment as i64, None);
            self.check_goal();
            ServeOutcome::Accepted { payment }
        } else {
            let diff = order.diff(&pizza);
            let delta = self.apply_penalty();
            self.failed += 1;
            log::info!("{} got the wrong pizza: {}", customer.name, diff);
            self.react(&mut customer, Reaction::AngryWrongOrder, delta, Some(diff));
            ServeOutcome::Rejected {
                penalty: delta.unsigned_abs() as u32,
            }
        }
    }

    /// Count down the waiting customer's patience
    pub(crate) fn tick_patience(&mut self, dt: f32) {
        let timed_out = match self.customer.as_mut() {
            Some(c) if c.active => c.patience.tick(dt),
            _ => false,
        };
        if !timed_out {
            return;
        }
        if let Some(mut customer) = self.customer.take() {
            let delta = self.apply_penalty();
            self.failed += 1;
            log::info!("{} ran out of patience", customer.name);
            self.react(&mut customer, Reaction::AngryTimeout, delta, None);
        }
    }

    /// Fire due departures and spawn attempts
    pub(crate) fn tick_timers(&mut self, dt: f32) {
        for pending in self.scheduler.advance(dt) {
            match pending {
                Pending::Depart { customer_id } => self.depart(customer_id),
            }
        }
        for _ in 0..self.spawn_timer.tick(dt) {
            self.try_spawn();
        }
    }

    fn apply_penalty(&mut self) -> i64 {
        let before = self.money;
        self.money = self.money.saturating_sub(self.tuning.fail_penalty);
        self.money as i64 - before as i64
    }

    /// Free the counter and schedule the customer's exit after the reaction delay
    fn react(
        &mut self,
        customer: &mut Customer,
        reaction: Reaction,
        delta: i64,
        diff: Option<OrderDiff>,
    ) {
        customer.active = false;
        self.events.push(GameEvent::CustomerReacted {
            id: customer.id,
            name: customer.name.clone(),
            reaction,
            delta,
            money: self.money,
            diff,
        });
        self.scheduler.schedule_after(
            self.tuning.reaction_delay,
            Pending::Depart {
                customer_id: customer.id,
            },
        );
        self.departing.push(customer.clone());
    }

    fn depart(&mut self, customer_id: u32) {
        if let Some(idx) = self.departing.iter().position(|c| c.id == customer_id) {
            let customer = self.departing.remove(idx);
            log::debug!("{} left the shop", customer.name);
            self.events.push(GameEvent::CustomerLeft {
                id: customer.id,
                name: customer.name,
            });
        }
    }

    fn check_goal(&mut self) {
        if self.phase == GamePhase::Open && self.money >= self.tuning.goal_money {
            self.phase = GamePhase::GoalReached;
            log::info!("Goal reached with {} money", self.money);
            self.events.push(GameEvent::GoalReached { money: self.money });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::customer::PatienceState;
    use crate::sim::topping::{Topping, ToppingSet};

    fn with_order(state: &mut GameState, toppings: ToppingSet, tip: u32) {
        assert!(state.try_spawn());
        let customer = state.customer.as_mut().expect("spawned");
        customer.order = Order {
            toppings,
            requires_cooked: true,
            tip,
            base_payment: 10,
        };
    }

    #[test]
    fn test_single_active_customer() {
        let mut state = GameState::new(1, Tuning::default());
        assert!(state.try_spawn());
        assert!(!state.try_spawn());
        assert_eq!(state.next_id, 2);
    }

    #[test]
    fn test_accept_pays_base_tip_bonus() {
        let mut state = GameState::new(1, Tuning::default());
        let wanted = ToppingSet::new().with(Topping::Sauce).with(Topping::Cheese);
        with_order(&mut state, wanted, 3);

        let outcome = state.serve(PizzaState {
            toppings: wanted,
            cooked: true,
        });
        // Full patience: 10 + 3 + 5
        assert_eq!(outcome, ServeOutcome::Accepted { payment: 18 });
        assert_eq!(state.money, 18);
        assert_eq!(state.completed, 1);
        assert!(!state.has_active_customer());
        assert_eq!(state.departing.len(), 1);
        assert_eq!(state.departing[0].patience.state, PatienceState::Served);
    }

    #[test]
    fn test_reject_extra_topping_clamps_money() {
        let mut state = GameState::new(1, Tuning::default());
        with_order(&mut state, ToppingSet::new().with(Topping::Sauce), 1);
        let outcome = state.serve(PizzaState {
            toppings: ToppingSet::new().with(Topping::Sauce).with(Topping::Pepperoni),
            cooked: true,
        });
        assert_eq!(outcome, ServeOutcome::Rejected { penalty: 0 });
        assert_eq!(state.money, 0);
        assert_eq!(state.failed, 1);
        let event = state.drain_events().pop().expect("reaction event");
        match event {
            GameEvent::CustomerReacted { reaction, diff, delta, .. } => {
                assert_eq!(reaction, Reaction::AngryWrongOrder);
                assert_eq!(delta, 0);
                assert_eq!(diff.expect("diff").extra, vec![Topping::Pepperoni]);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_penalty_subtracts_five() {
        let mut state = GameState::new(1, Tuning::default());
        state.money = 12;
        with_order(&mut state, ToppingSet::new().with(Topping::Sauce), 1);
        let outcome = state.serve(PizzaState::default());
        assert_eq!(outcome, ServeOutcome::Rejected { penalty: 5 });
        assert_eq!(state.money, 7);
    }

    #[test]
    fn test_serve_without_customer() {
        let mut state = GameState::new(1, Tuning::default());
        assert_eq!(state.serve(PizzaState::default()), ServeOutcome::NoCustomer);
        assert_eq!(state.drain_events(), vec![GameEvent::ServeIgnored]);
    }

    #[test]
    fn test_timeout_at_exactly_zero() {
        let mut state = GameState::new(1, Tuning::default());
        state.money = 3;
        assert!(state.try_spawn());
        state.tick_patience(15.0);
        assert!(state.has_active_customer());
        state.tick_patience(15.0);
        assert!(!state.has_active_customer());
        assert_eq!(state.money, 0);
        assert_eq!(state.failed, 1);
        assert_eq!(state.departing[0].patience.state, PatienceState::TimedOut);
    }

    #[test]
    fn test_goal_triggers_once_and_freezes_spawning() {
        let mut tuning = Tuning::default();
        tuning.goal_money = 20;
        let mut state = GameState::new(1, tuning);
        let wanted = ToppingSet::new().with(Topping::Cheese);
        let pizza = PizzaState {
            toppings: wanted,
            cooked: true,
        };

        with_order(&mut state, wanted, 1);
        state.serve(pizza);
        assert_eq!(state.phase, GamePhase::Open);
        with_order(&mut state, wanted, 1);
        state.serve(pizza);
        assert_eq!(state.phase, GamePhase::GoalReached);
        assert!(!state.try_spawn());

        let goals = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::GoalReached { .. }))
            .count();
        assert_eq!(goals, 1);
    }

    #[test]
    fn test_departure_after_reaction_delay() {
        let mut state = GameState::new(1, Tuning::default());
        assert!(state.try_spawn());
        state.serve(PizzaState::default());
        state.drain_events();

        state.tick_timers(1.0);
        assert_eq!(state.departing.len(), 1);
        state.tick_timers(1.0);
        assert!(state.departing.is_empty());
        assert!(matches!(
            state.drain_events().as_slice(),
            [GameEvent::CustomerLeft { .. }]
        ));
    }

    #[test]
    fn test_reset_clears_shift() {
        let mut state = GameState::new(9, Tuning::default());
        state.try_spawn();
        state.serve(PizzaState::default());
        state.reset();
        assert_eq!(state.money, 0);
        assert!(state.customer.is_none());
        assert!(state.departing.is_empty());
        assert!(state.scheduler.is_empty());
        assert!(state.events.is_empty());
    }
}
