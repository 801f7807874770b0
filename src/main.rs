//! The Buggening headless driver
//!
//! Runs the simulation with a fixed-timestep accumulator, optionally letting
//! the autopilot play, and records finished runs on the leaderboard.
//!
//! Usage: `buggening [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use buggening::consts::*;
    use buggening::sim::autopilot;
    use buggening::sim::{GameEvent, Key, Notice, TickInput, World, tick};
    use buggening::{HighScores, Settings};

    /// Sim ticks between autopilot key presses
    const PILOT_COOLDOWN: u32 = 12;

    /// Game instance holding the world and the loop bookkeeping
    struct Game {
        world: World,
        accumulator: f32,
        input: TickInput,
        autopilot: bool,
        pilot_wait: u32,
        highscores: HighScores,
        runs_finished: u32,
    }

    impl Game {
        fn new(settings: &Settings, seed: u64, highscores: HighScores) -> Self {
            Self {
                world: World::new(seed, settings.tuning.clone()),
                accumulator: 0.0,
                input: TickInput::default(),
                autopilot: settings.autopilot,
                pilot_wait: 0,
                highscores,
                runs_finished: 0,
            }
        }

        /// Run simulation ticks for one display frame
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.answer_notice();
                self.steer();
                tick(&mut self.world, &self.input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Keys are one-shot
                self.input.keys.clear();
                self.handle_events();
            }
        }

        /// Stand in for the player at a blocking message
        fn answer_notice(&mut self) {
            let Some(notice) = self.world.notice.clone() else {
                return;
            };
            match notice {
                Notice::CommandPrompt => {
                    self.world.submit_command(None);
                }
                notice => {
                    log::debug!("Dismissing {notice:?}");
                    self.world.dismiss_notice();
                }
            }
        }

        fn steer(&mut self) {
            if !self.autopilot {
                return;
            }
            if self.pilot_wait > 0 {
                self.pilot_wait -= 1;
                return;
            }
            if let Some(direction) = autopilot::next_step(&self.world) {
                self.input.keys.push(Key::Arrow(direction));
                self.pilot_wait = PILOT_COOLDOWN;
            }
        }

        fn handle_events(&mut self) {
            for event in self.world.drain_events() {
                match event {
                    GameEvent::LevelCompleted { level, points } => {
                        log::info!("Cleared level {level} ({points} points)");
                    }
                    GameEvent::LifeLost { lives_left } => {
                        log::info!("Ouch! {lives_left} lives left");
                    }
                    GameEvent::GameOver(summary) => {
                        self.runs_finished += 1;
                        match self.highscores.record(summary, self.world.seed()) {
                            Some(rank) => log::info!("New high score #{rank}: {}", summary.score),
                            None => log::info!("Run over: level {}, score {}", summary.level, summary.score),
                        }
                    }
                    other => log::debug!("{other:?}"),
                }
            }
        }
    }

    pub fn run() {
        let settings_path = std::env::args().nth(1).map(PathBuf::from);
        let loaded = settings_path.as_deref().map(Settings::load);
        let settings = match &loaded {
            Some(Ok(settings)) => settings.clone(),
            _ => Settings::default(),
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&settings.log_filter)).init();
        if let Some(Err(e)) = &loaded {
            log::error!("{e}; using default settings");
        }

        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("The Buggening starting (seed {seed})");

        let highscores = HighScores::load_or_empty(&settings.highscores_path);

        let mut game = Game::new(&settings, seed, highscores);
        for _ in 0..settings.frames {
            game.update(SIM_DT);
        }

        let world = &game.world;
        log::info!(
            "Stopped after {:.0}s of play: level {}, score {}, {} finished runs",
            world.clock,
            world.state.level,
            world.state.score,
            game.runs_finished
        );
        if let Some(best) = game.highscores.top_score() {
            log::info!("Best score on the board: {best}");
        }
        if let Err(e) = game.highscores.save_to(&settings.highscores_path) {
            log::error!("{e}");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on wasm32
}
