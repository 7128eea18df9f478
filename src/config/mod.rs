//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → TriageConfig (validated, immutable)
//!     → handed to subsystems at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable for the process lifetime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - No process-wide mutable secrets: sessions are server-side random
//!   tokens, so the config carries no signing key

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::GeocoderConfig;
pub use schema::RateLimitConfig;
pub use schema::SessionConfig;
pub use schema::TriageConfig;
