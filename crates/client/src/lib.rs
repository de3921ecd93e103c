//! City simulation client.
//!
//! # Architecture
//!
//! ```text
//! citysim (binary)
//!   ├─→ config   (environment + command-line flags)
//!   ├─→ logging  (tracing subscriber, optional log file)
//!   └─→ Session  (scenario → upgrade passes → economy ticks → summaries)
//!         ├─→ city-content (scenario and TOML loaders)
//!         └─→ city-core    (city, buildings, resources)
//! ```

mod builder;
pub mod config;
pub mod logging;
mod session;

pub use builder::SessionBuilder;
pub use config::{Cli, ClientConfig, SummaryFormat};
pub use session::{EXIT_CITY_ERROR, EXIT_FAILURE, Session, city_error, exit_code};
