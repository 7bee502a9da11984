//! Service worker inspection.
//!
//! # Usage
//!
//! ```bash
//! # Print the worker the server would serve with the current environment
//! novenapp sw print
//! ```

use novenapp_web::config::AppConfig;
use novenapp_web::routes::service_worker;

use super::CliError;

/// Render `/sw.js` from the environment's offline configuration and print it.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the template fails.
#[allow(clippy::print_stdout)]
pub fn print() -> Result<(), CliError> {
    let config = AppConfig::from_env()?;
    let script = service_worker::render(&config.offline.cache)
        .map_err(|e| CliError::Render(e.to_string()))?;

    tracing::info!(version = %config.offline.cache.version, "Rendered service worker");
    println!("{script}");
    Ok(())
}
