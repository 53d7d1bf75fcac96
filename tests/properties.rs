use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use pizza_rush::Tuning;
use pizza_rush::sim::{GameEvent, GamePhase, GameState, Order, PizzaState, ServeOutcome, ToppingSet};

fn topping_set() -> impl Strategy<Value = ToppingSet> {
    any::<[bool; 5]>().prop_map(|[sauce, cheese, pepperoni, corn, olives]| ToppingSet {
        sauce,
        cheese,
        pepperoni,
        corn,
        olives,
    })
}

proptest! {
    #[test]
    fn generated_orders_always_require_cooking(seed in any::<u64>()) {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        for _ in 0..20 {
            let order = Order::generate(&mut rng, &tuning);
            prop_assert!(order.requires_cooked);
            prop_assert!(order.tip >= tuning.tip_min && order.tip <= tuning.tip_max);
        }
    }

    #[test]
    fn validator_is_exact_set_equality(
        wanted in topping_set(),
        served in topping_set(),
        cooked in any::<bool>(),
    ) {
        let order = Order { toppings: wanted, requires_cooked: true, tip: 2, base_payment: 10 };
        let pizza = PizzaState { toppings: served, cooked };
        prop_assert_eq!(order.matches(&pizza), wanted == served && cooked);
        prop_assert_eq!(order.diff(&pizza).is_match(), order.matches(&pizza));
    }

    #[test]
    fn payment_stays_within_bonus_range(
        tip in 0u32..10,
        remaining in -10.0f32..60.0,
    ) {
        let order = Order { toppings: ToppingSet::new(), requires_cooked: true, tip, base_payment: 10 };
        let paid = order.payment(remaining, 30.0, 5);
        prop_assert!(paid >= 10 + tip);
        prop_assert!(paid <= 10 + tip + 5);
    }

    #[test]
    fn money_is_clamped_and_goal_fires_once(
        seed in any::<u64>(),
        serves in proptest::collection::vec(any::<bool>(), 1..40),
    ) {
        let mut tuning = Tuning::default();
        tuning.goal_money = 60;
        let mut state = GameState::new(seed, tuning);
        let mut expected: u32 = 0;
        let mut goal_events = 0;

        for correct in serves {
            if !state.try_spawn() {
                prop_assert_eq!(state.phase, GamePhase::GoalReached);
                break;
            }
            let order = state.customer.as_ref().map(|c| c.order).expect("customer");
            let pizza = if correct {
                PizzaState { toppings: order.toppings, cooked: true }
            } else {
                PizzaState { toppings: order.toppings, cooked: false }
            };
            match state.serve(pizza) {
                ServeOutcome::Accepted { payment } => expected += payment,
                ServeOutcome::Rejected { .. } => expected = expected.saturating_sub(5),
                ServeOutcome::NoCustomer => prop_assert!(false, "customer was waiting"),
            }
            prop_assert_eq!(state.money, expected);
            goal_events += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::GoalReached { .. }))
                .count();
        }

        prop_assert!(goal_events <= 1);
        prop_assert_eq!(goal_events == 1, state.phase == GamePhase::GoalReached);
    }
}
