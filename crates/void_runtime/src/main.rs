//! Town runtime
//!
//! Runs the simulation headless for a configured span of simulated time and
//! logs what happens. Rendering, audio and input devices are external
//! collaborators and are not part of this binary.
//!
//! Run with: cargo run -p void_runtime
//!       or: TOWN_SECONDS=600 cargo run --bin town

use void_core::Classify;
use void_runtime::prelude::*;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{} ({})", e, e.kind());
        std::process::exit(1);
    }
}

fn run() -> Result<(), RuntimeError> {
    let config = RuntimeConfig::load()?;
    if let Some(source) = &config.source {
        log::info!("config: {}", source.display());
    }

    let mut sim = Simulation::new(&config)?;
    if let Err(e) = sim.start_loading() {
        log::warn!("asset loader unavailable, continuing without assets: {}", e);
    }

    let step = config.clock.step;
    let report_every = 10.0_f64;
    let mut next_report = report_every;
    while sim.clock().current().total < config.run_seconds as f64 {
        let time = sim.tick(step);
        if time.total >= next_report {
            next_report += report_every;
            if let Some(env) = sim.environment() {
                log::info!("frame {} | {} {:?}", time.frame, env.time_string(), env.phase());
            }
        }
    }

    if let Some(stats) = sim.ui().and_then(|ui| ui.stats()) {
        log::info!(
            "player: level {} | {}/{} hp | {} xp",
            stats.level,
            stats.health,
            stats.max_health,
            stats.experience
        );
    }
    if let Some(ui) = sim.ui() {
        match ui.frame().to_json() {
            Ok(json) => log::debug!("hud: {}", json),
            Err(e) => log::warn!("could not serialize hud: {}", e),
        }
    }
    sim.shutdown();
    Ok(())
}
