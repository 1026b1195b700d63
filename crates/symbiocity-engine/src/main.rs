//! Simulation engine binary for Symbiocity.
//!
//! This is the main entry point that wires together the virtual clock,
//! the seeded twin and city state, the weather callback, and the run
//! controls. It loads configuration, initializes all subsystems, and
//! runs the simulation loop until a termination condition is met.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `symbiocity-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Seed the simulation state (twin profile, districts, first samples)
//! 4. Install the recurring timers
//! 5. Create run controls from the simulation bounds
//! 6. Run the simulation loop
//! 7. Log the result

mod error;
mod weather_callback;

use std::path::Path;
use std::sync::Arc;

use symbiocity_core::config::SimulationConfig;
use symbiocity_core::control::RunControl;
use symbiocity_core::runner;
use symbiocity_core::tick::SimulationState;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::weather_callback::WeatherCallback;

/// Application entry point for the simulation engine.
///
/// # Errors
///
/// Returns an error if any initialization step or the simulation itself
/// fails.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration first: the default log filter lives in it.
    let (config, config_found) = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins when set.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    if !config_found {
        info!("Config file not found, using defaults");
    }
    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        step_interval_ms = config.world.step_interval_ms,
        "symbiocity-engine starting"
    );

    // 3. Seed the simulation state.
    let mut state = SimulationState::from_config(&config);
    info!(
        districts = state.city.districts().len(),
        recommendations = state.twin.recommendations().len(),
        "Simulation state seeded"
    );

    // 4. Install the recurring timers.
    state.start_timers()?;

    // 5. Create run controls.
    let control = Arc::new(RunControl::new(
        config.world.step_interval_ms,
        &config.simulation,
    ));
    info!(
        max_units = control.max_units(),
        max_real_time_seconds = control.max_real_time_seconds(),
        "Run controls initialized, entering step loop"
    );

    // 6. Run the simulation.
    let mut callback = WeatherCallback::new(config.world.seed);
    let result = runner::run_simulation(&mut state, &control, &mut callback).await?;

    // 7. Log results.
    runner::log_run_end(&result);
    info!(
        end_reason = ?result.end_reason,
        total_units = result.total_units,
        "symbiocity-engine shutdown complete"
    );

    Ok(())
}

/// Load the simulation configuration from `symbiocity-config.yaml`.
///
/// Looks for the config file relative to the current working directory;
/// a missing file falls back to built-in defaults. Returns whether a
/// file was found so `main` can log the fallback once tracing is up.
fn load_config() -> Result<(SimulationConfig, bool), EngineError> {
    let config_path = Path::new("symbiocity-config.yaml");
    if config_path.exists() {
        let config = SimulationConfig::from_file(config_path)?;
        Ok((config, true))
    } else {
        Ok((SimulationConfig::default(), false))
    }
}
