//! City simulation binary.
//!
//! # Examples
//!
//! ```bash
//! # Run the default scenario (city.txt or CITYSIM_INPUT)
//! cargo run -p city-client
//!
//! # Three economy ticks, JSON summaries, logs under ./logs
//! cargo run -p city-client -- demos/city.txt --ticks 3 --format json --log-dir logs
//! ```
//!
//! Exit codes: `0` on success, `1` when the simulation rejected the input
//! or a building, `2` for I/O, configuration and setup failures.

use std::io;
use std::process::ExitCode;

use city_client::logging::setup_logging;
use city_client::{Cli, ClientConfig, EXIT_FAILURE, Session, city_error, exit_code};
use clap::Parser;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ClientConfig::from_env().with_cli(cli);

    let _guard = match setup_logging(config.log_dir.as_deref()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Failed to set up logging: {err:#}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    tracing::info!("Starting citysim");
    tracing::info!("Scenario: {}", config.input.display());

    let result = Session::from_client_config(&config)
        .and_then(|session| session.run(&mut io::stdout().lock()));

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            match city_error(&err) {
                Some(cause) => {
                    tracing::error!(
                        code = cause.error_code(),
                        severity = cause.severity().as_str(),
                        "Simulation failed"
                    );
                    eprintln!("City error: {err:#}");
                }
                None => {
                    tracing::error!("Run failed: {err:#}");
                    eprintln!("Error: {err:#}");
                }
            }
            ExitCode::from(exit_code(&err))
        }
    }
}
