//! Infinite Regatta entry point
//!
//! Native builds run headless: a simulated player sails a number of sessions
//! on the reference 100 ms clock and each result is written to the ledger.
//! The playable game is the wasm build driven by the browser.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::Parser;
    use rand::seq::IndexedRandom;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use infinite_regatta::consts::TICK_DT;
    use infinite_regatta::persistence::{FileStore, KeyValueStore, MemoryStore};
    use infinite_regatta::platform::SessionClock;
    use infinite_regatta::progress::{Progress, today};
    use infinite_regatta::sim::{self, Session, SessionOutcome};

    /// Sail headless regatta sessions with a simulated player
    #[derive(Debug, Parser)]
    #[command(name = "infinite-regatta", version)]
    struct Args {
        /// Seed for questions and the simulated player (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Starting complexity level (clamped to 1-10)
        #[arg(long, default_value_t = 1)]
        level: i32,
        /// Probability the player answers correctly (0.0 - 1.0)
        #[arg(long, default_value_t = 0.8, value_parser = parse_probability)]
        accuracy: f64,
        /// Seconds the player spends on each question
        #[arg(long, default_value_t = 2.0)]
        speed: f32,
        /// Number of sessions to play
        #[arg(long, default_value_t = 1)]
        sessions: u32,
        /// Directory for the progress ledger (in-memory if omitted)
        #[arg(long)]
        save_dir: Option<PathBuf>,
    }

    fn parse_probability(s: &str) -> Result<f64, String> {
        let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
        if (0.0..=1.0).contains(&value) {
            Ok(value)
        } else {
            Err(format!("{value} is not between 0 and 1"))
        }
    }

    /// Play one session to completion
    fn sail(
        session: &mut Session,
        player: &mut Pcg32,
        args: &Args,
    ) -> SessionOutcome {
        let mut clock = SessionClock::new();
        sim::start(session, args.level);
        clock.attach();

        // At least one tick per answer so the clock always runs down
        let think_ticks = ((args.speed.max(0.0) / TICK_DT).round() as u32).max(1);
        loop {
            for _ in 0..think_ticks {
                clock.advance(session, TICK_DT);
            }
            let Some(question) = session.current_question() else {
                break;
            };

            let answer = if player.random_bool(args.accuracy) {
                question.correct_answer
            } else {
                let wrong: Vec<i32> = question
                    .answer_choices
                    .iter()
                    .copied()
                    .filter(|&choice| choice != question.correct_answer)
                    .collect();
                wrong
                    .choose(player)
                    .copied()
                    .unwrap_or(question.correct_answer + 1)
            };
            sim::submit_answer(session, answer);

            for event in session.drain_events() {
                log::debug!("{event:?}");
            }
        }

        // Loop only exits once the session has finished
        session.outcome().unwrap_or(SessionOutcome {
            won: false,
            correct_count: session.correct_count(),
        })
    }

    fn play<S: KeyValueStore>(args: &Args, store: &mut S) -> ExitCode {
        let seed = args.seed.unwrap_or_else(rand::random);
        log::info!("Seed {seed}");

        let mut progress = Progress::load(&*store);
        let mut session = Session::new(seed);
        let mut player = Pcg32::seed_from_u64(seed.rotate_left(17) ^ 0x9E37_79B9_7F4A_7C15);

        for round in 1..=args.sessions {
            let outcome = sail(&mut session, &mut player, args);
            let earned = progress.record_session(&outcome, today());
            println!(
                "Session {round}: {} with {} correct, boat at {}%, +{earned} points",
                if outcome.won { "WON" } else { "lost" },
                outcome.correct_count,
                session.boat_position(),
            );
        }

        println!(
            "Ledger: {} points, {}-day streak",
            progress.points, progress.streak
        );
        match progress.save(store) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("Failed to save progress: {e}");
                ExitCode::FAILURE
            }
        }
    }

    pub fn run() -> ExitCode {
        env_logger::init();
        log::info!("Infinite Regatta (native) starting...");
        let args = Args::parse();

        match &args.save_dir {
            Some(dir) => play(&args, &mut FileStore::new(dir)),
            None => play(&args, &mut MemoryStore::default()),
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
