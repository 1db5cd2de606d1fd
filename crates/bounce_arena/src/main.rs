//! Bounce arena
//!
//! Headless demo of the swept collision pass: fast balls in a walled box,
//! run for a fixed number of steps.
//!
//! Usage: `bounce_arena [config.toml | config.ron]`

mod arena;
mod config;

use sweep_engine::core::Config;
use sweep_engine::foundation::logging;

use arena::Arena;
use config::ArenaConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1);
    let config = ArenaConfig::load_or_default(path.as_deref())?;

    logging::init_with_level(&config.app.engine.log_level);
    log::info!("Starting Bounce Arena");

    let mut arena = Arena::new(&config)?;
    let report_every = config.run.report_every;

    for step in 1..=config.run.steps {
        let stats = arena.step()?;

        let escaped = arena.escaped();
        if !escaped.is_empty() {
            log::error!("Step {}: {} balls left the arena: {:?}", step, escaped.len(), escaped);
        }

        if config.app.engine.debug_mode {
            log::debug!("Step {}: {:?}", step, stats);
        }
        if report_every > 0 && step % report_every == 0 {
            log::info!(
                "Step {}: {} bounces so far, kinetic energy {:.1}",
                step,
                arena.bounces(),
                arena.kinetic_energy()
            );
        }
    }

    log::info!(
        "Finished {} steps with {} balls ({} entities): {} bounces",
        config.run.steps,
        arena.balls().len(),
        arena.world().entity_count(),
        arena.bounces()
    );
    Ok(())
}
