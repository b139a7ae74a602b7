//! Slope Rush demo entry point
//!
//! Drives the scoring engine headless with a seeded demo rider and prints
//! trick/milestone popups as they happen.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use slope_rush::consts::{MAX_SUBSTEPS, SIM_DT};
use slope_rush::platform::{DemoInput, DemoRider};
use slope_rush::sim::{CollectibleKind, GameEvent, ObstacleKind};
use slope_rush::{Difficulty, RideEngine, Settings};

/// Host frame rate the demo pretends to render at
const FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings JSON (defaults are used when omitted)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Ride length in seconds
    #[arg(short = 't', long, default_value_t = 60.0)]
    seconds: f32,

    /// relaxed, standard or hardcore (overrides the settings file)
    #[arg(short, long)]
    difficulty: Option<String>,

    /// Print the final snapshot as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Write the effective settings to stdout and exit
    #[arg(long, default_value_t = false)]
    dump_settings: bool,
}

/// Fixed-step host loop around the engine
struct Ride {
    engine: RideEngine<DemoRider, DemoInput>,
    /// Spawns obstacles and pickups in place of level geometry
    spawner: Pcg32,
    accumulator: f32,
    restarts: u32,
}

impl Ride {
    fn new(settings: Settings, seed: u64) -> Self {
        Self {
            engine: RideEngine::with_collaborators(
                settings,
                DemoRider::new(seed),
                DemoInput::new(seed),
            ),
            spawner: Pcg32::seed_from_u64(seed.wrapping_add(1)),
            accumulator: 0.0,
            restarts: 0,
        }
    }

    /// Run simulation ticks for one host frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.spawn();
            self.engine.step(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
            self.handle_events();
        }
    }

    fn spawn(&mut self) {
        let roll: f32 = self.spawner.random_range(0.0..1.0);
        if roll < 0.004 {
            let kind = match self.spawner.random_range(0..4) {
                0 => CollectibleKind::Coin,
                1 => CollectibleKind::SilverCoin,
                2 => CollectibleKind::GoldCoin,
                _ => CollectibleKind::Diamond,
            };
            self.engine.notify_collect(kind);
        } else if roll < 0.0055 {
            let kind = match self.spawner.random_range(0..5) {
                0 => ObstacleKind::Rock,
                1 => ObstacleKind::Tree,
                2 => ObstacleKind::SmallRock,
                3 => ObstacleKind::IcePatch,
                _ => ObstacleKind::SnowPile,
            };
            self.engine.notify_obstacle(kind);
        }
    }

    fn handle_events(&mut self) {
        let mut restart = false;
        for event in self.engine.drain_events() {
            if let Some(text) = event.display_text() {
                println!("[{:>6.2}s] {}", self.engine.clock(), text);
            }
            match event {
                GameEvent::Crashed { count, max } => {
                    println!("[{:>6.2}s] CRASH {}/{}", self.engine.clock(), count, max);
                }
                GameEvent::RestartRequested => restart = true,
                _ => {}
            }
        }

        if restart {
            println!(
                "Level restart! Score this run: {}",
                self.engine.total_score()
            );
            self.engine.restart();
            self.restarts += 1;
        }
    }
}

fn load_settings(cli: &Cli) -> Settings {
    let mut settings = match &cli.settings {
        Some(path) => Settings::load(path).unwrap_or_else(|e| {
            eprintln!("Failed to load settings from {}: {}", path.display(), e);
            process::exit(1);
        }),
        None => Settings::default(),
    };

    if let Some(name) = &cli.difficulty {
        let Some(preset) = Difficulty::from_str(name) else {
            eprintln!("Unknown difficulty '{}'", name);
            process::exit(2);
        };
        settings.apply_preset(preset);
    }
    settings
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let settings = load_settings(&cli);
    if cli.dump_settings {
        match settings.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
        return;
    }

    log::info!(
        "Slope Rush starting (seed {}, {} difficulty, {:.0}s)",
        cli.seed,
        settings.difficulty.as_str(),
        cli.seconds
    );

    let mut ride = Ride::new(settings, cli.seed);
    let frames = (cli.seconds.max(0.0) / FRAME_DT).ceil() as u64;
    for _ in 0..frames {
        ride.update(FRAME_DT);
    }

    let snapshot = ride.engine.snapshot();
    if cli.json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                log::error!("Failed to serialize snapshot: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!(
            "Final score {} | combo x{:.1} ({}) | crashes {} | milestones {} | restarts {}",
            snapshot.total_score,
            snapshot.combo_multiplier,
            snapshot.combo_count,
            snapshot.crash_count,
            snapshot.milestones_reached,
            ride.restarts
        );
    }
}
