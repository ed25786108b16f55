//! Flap Arcade entry point
//!
//! Native builds run headless autopilot sessions (soak testing the generator
//! and scoring); the browser build is driven from JavaScript through
//! `flap_arcade::platform::web`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use anyhow::{Context, Result, bail};
    use clap::Parser;

    use flap_arcade::autopilot::Autopilot;
    use flap_arcade::consts::MAX_FRAME_DT;
    use flap_arcade::host::LogHost;
    use flap_arcade::persistence::{BestScoreStore, FileStore};
    use flap_arcade::{Driver, GameMode, MemoryStore, ScoringPolicy, WorldConfig};

    /// Run autopilot sessions without a display
    #[derive(Parser, Debug)]
    #[command(author, version, about, long_about = None)]
    struct Args {
        /// Generator seed
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// World configuration (JSON); defaults apply to missing fields
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the scoring policy (pass_through, per_flap)
        #[arg(long)]
        scoring: Option<String>,
        /// Number of sessions to play
        #[arg(long, default_value_t = 5)]
        sessions: u32,
        /// Frame cap per session
        #[arg(long, default_value_t = 36_000)]
        frames: u32,
        /// Frame delta in seconds (clamped like a real host)
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,
        /// Persist the best score in this JSON file
        #[arg(long)]
        best_file: Option<PathBuf>,
        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    }

    fn init_logging(verbose: bool) {
        let level = if verbose { "debug" } else { "info" };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    }

    fn load_config(args: &Args) -> Result<WorldConfig> {
        let mut config = match &args.config {
            Some(path) => WorldConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => WorldConfig::default(),
        };
        if let Some(name) = &args.scoring {
            let Some(policy) = ScoringPolicy::from_str(name) else {
                bail!("unknown scoring policy {name:?}");
            };
            config.scoring = policy;
        }
        config.validate().context("invalid config")?;
        Ok(config)
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();
        init_logging(args.verbose);

        let config = load_config(&args)?;
        if args.dt > MAX_FRAME_DT {
            log::warn!("Frame delta {} will be clamped to {}", args.dt, MAX_FRAME_DT);
        }
        let store: Box<dyn BestScoreStore> = match &args.best_file {
            Some(path) => Box::new(FileStore::new(path)),
            None => Box::new(MemoryStore::new()),
        };

        log::info!(
            "Flap Arcade (headless): seed {}, {} sessions, scoring {}",
            args.seed,
            args.sessions,
            config.scoring.as_str()
        );

        let mut driver = Driver::new(config, args.seed, store, Box::new(LogHost));
        let pilot = Autopilot {
            auto_start: false,
            ..Default::default()
        };

        let mut total = 0u64;
        for session in 1..=args.sessions {
            driver.handle(flap_arcade::InputEvent::Start);
            let mut frames = 0;
            while driver.mode() == GameMode::Playing && frames < args.frames {
                if let Some(input) = pilot.decide(driver.game().world()) {
                    driver.handle(input);
                }
                driver.frame(args.dt);
                frames += 1;
            }

            let snapshot = driver.snapshot();
            total += u64::from(snapshot.score);
            match driver.game().last_summary().filter(|_| snapshot.mode == GameMode::GameOver) {
                Some(summary) => println!(
                    "session {:>3}: score {:>4}  best {:>4}  {:>6.1}s  {:?} (tier {})",
                    session,
                    summary.score,
                    summary.best,
                    snapshot.elapsed,
                    summary.result,
                    summary.difficulty_tier
                ),
                None => {
                    println!(
                        "session {:>3}: score {:>4}  still alive after {} frames",
                        session, snapshot.score, frames
                    );
                    driver.handle(flap_arcade::InputEvent::Restart);
                }
            }
        }

        let best = driver.game().best();
        println!(
            "{} sessions, mean score {:.1}, best {}",
            args.sessions,
            total as f64 / f64::from(args.sessions.max(1)),
            best
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `platform::web::start`, this is just to satisfy the compiler
}
