//! Pizza Rush entry point
//!
//! Runs a headless shift with the autopilot chef and prints the shift report.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;

use pizza_rush::consts::*;
use pizza_rush::feedback::{Feedback, LogFeedback};
use pizza_rush::sim::{GamePhase, GameState, TickInput, tick};
use pizza_rush::{Autopilot, ShiftLedger, ShiftReport, Tuning, TuningError};

/// Frame length of the headless "display" driving the fixed-step sim
const FRAME_DT: f32 = 1.0 / 30.0;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Tuning(#[from] TuningError),
    #[error("failed to write report: {0}")]
    Report(#[from] serde_json::Error),
}

/// Run one pizza shop shift with the autopilot chef.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for customers, orders and the chef.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// JSON tuning file (defaults are used when it does not exist).
    #[arg(long, value_name = "PATH")]
    tuning: Option<PathBuf>,
    /// Stop the shift after this many simulated seconds.
    #[arg(long, value_name = "SECONDS", default_value_t = 600.0, value_parser = parse_seconds)]
    max_seconds: f32,
    /// Chance (0-1) that the chef gets one topping wrong.
    #[arg(long, value_name = "CHANCE", default_value_t = 0.2, value_parser = parse_chance)]
    mistakes: f64,
}

fn parse_chance(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{s} is not a chance between 0 and 1"))
    }
}

fn parse_seconds(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("{s} is not a positive number of seconds"))
    }
}

/// Game instance holding all state
struct Game {
    state: GameState,
    chef: Autopilot,
    ledger: ShiftLedger,
    feedback: Feedback<LogFeedback, LogFeedback>,
    accumulator: f32,
}

impl Game {
    fn new(seed: u64, tuning: Tuning, mistakes: f64) -> Self {
        Self {
            state: GameState::new(seed, tuning),
            chef: Autopilot::new(seed.wrapping_add(1), mistakes),
            ledger: ShiftLedger::new(),
            feedback: Feedback::new(LogFeedback, LogFeedback),
            accumulator: 0.0,
        }
    }

    /// Run simulation ticks for one frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input: TickInput = self.chef.next_input(&self.state, SIM_DT);
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            let events = self.state.drain_events();
            self.ledger.observe(&events, self.state.elapsed);
            self.feedback.dispatch(&events);
        }
    }

    /// Goal met and everyone has walked out
    fn finished(&self) -> bool {
        self.state.phase == GamePhase::GoalReached && self.state.departing.is_empty()
    }

    fn report(&self) -> ShiftReport {
        self.ledger.report(&self.state)
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let tuning = match &args.tuning {
        Some(path) => Tuning::load_or_default(path)?,
        None => Tuning::default(),
    };
    tuning.validate()?;

    log::info!(
        "Opening shift: seed {}, goal {}, mistakes {:.0}%",
        args.seed,
        tuning.goal_money,
        args.mistakes * 100.0
    );

    let mut game = Game::new(args.seed, tuning, args.mistakes);
    while !game.finished() && game.state.elapsed < args.max_seconds {
        game.update(FRAME_DT);
    }

    if game.state.phase == GamePhase::GoalReached {
        log::info!("Shift complete in {:.1}s", game.state.elapsed);
    } else {
        log::warn!(
            "Shift stopped at {:.1}s without reaching the goal ({} money)",
            game.state.elapsed,
            game.state.money
        );
    }

    println!("{}", serde_json::to_string_pretty(&game.report())?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(list: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("pizza-rush").chain(list.iter().copied()))
    }

    #[test]
    fn test_parse_defaults() {
        let args = parse(&[]).expect("defaults");
        assert_eq!(args.seed, 42);
        assert!(args.tuning.is_none());
        assert_eq!(args.max_seconds, 600.0);
        assert_eq!(args.mistakes, 0.2);
    }

    #[test]
    fn test_parse_flags() {
        let args = parse(&["--seed", "7", "--mistakes", "0.5", "--max-seconds", "90"])
            .expect("flags");
        assert_eq!(args.seed, 7);
        assert_eq!(args.mistakes, 0.5);
        assert_eq!(args.max_seconds, 90.0);
    }

    #[test]
    fn test_parse_rejects_unknown_and_missing() {
        assert!(parse(&["--bogus"]).is_err());
        assert!(parse(&["--seed"]).is_err());
        assert!(parse(&["--seed", "x"]).is_err());
    }

    #[test]
    fn test_parse_rejects_bad_mistake_chance() {
        for bad in ["NaN", "inf", "-0.1", "1.5"] {
            assert!(parse(&["--mistakes", bad]).is_err(), "accepted {bad}");
        }
        assert_eq!(parse(&["--mistakes", "1"]).expect("edge").mistakes, 1.0);
    }

    #[test]
    fn test_parse_rejects_bad_max_seconds() {
        for bad in ["NaN", "0", "-5"] {
            assert!(parse(&["--max-seconds", bad]).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn test_game_reaches_goal() {
        let mut game = Game::new(3, Tuning::default(), 0.0);
        while !game.finished() && game.state.elapsed < 600.0 {
            game.update(FRAME_DT);
        }
        assert!(game.finished());
        let report = game.report();
        assert!(report.goal_reached);
        assert!(report.money >= 100);
        assert_eq!(report.completed as usize, report.visits.len());
    }
}
