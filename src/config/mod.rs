//! Logger configuration.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LOG_LEVEL override (optional)
//!     → LoggerConfig::build → root ContextLogger
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so an empty file is a valid config
//! - The level in the file is a starting point; set_level can change it later
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{LoggerConfig, OutputTarget};
pub use validation::ValidationError;
