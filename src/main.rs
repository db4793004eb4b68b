//! Headless entry point
//!
//! Runs one autopilot session at the configured frame rate and optionally
//! saves the last frame as a PNG. Usage: `arena-shooter [settings.json]`

use std::process::ExitCode;
use std::time::Duration;

use arena_shooter::Settings;
use arena_shooter::autopilot::Autopilot;
use arena_shooter::renderer::Compositor;
use arena_shooter::session::{FixedRate, Session, SessionOutcome};
use arena_shooter::sim::GameState;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Arena shooter (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };
    if let Err(err) = settings.validate() {
        log::error!("{err}");
        return ExitCode::FAILURE;
    }

    let state = GameState::new(&settings);
    let canvas = Compositor::new(
        settings.arena_width as u32,
        settings.arena_height as u32,
        settings.background(),
    );
    let mut session = Session::new(
        state,
        Autopilot::new(settings.seed),
        canvas,
        FixedRate::new(settings.fps),
    )
    .with_frame_limit(settings.max_frames);

    match session.run() {
        SessionOutcome::PlayerDied { frames } => {
            log::info!("Game over after {frames} frames");
            std::thread::sleep(Duration::from_millis(settings.end_delay_ms));
        }
        SessionOutcome::Quit { frames } => {
            log::info!("Quit after {frames} frames");
            return ExitCode::SUCCESS;
        }
        SessionOutcome::FrameLimit { frames } => {
            log::info!(
                "Stopped at frame limit ({frames}); {} enemies left",
                session.state().enemy_count()
            );
        }
    }

    if let Some(path) = &settings.snapshot_path {
        match session.sink().save_png(path) {
            Ok(()) => log::info!("Snapshot written to {}", path.display()),
            Err(err) => {
                log::error!("Failed to write snapshot: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
