//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, middleware stack)
//!     → security::rate_limit (admission, service scope then chat scope)
//!     → handlers.rs (register / login / chat / chat_api / status)
//!     → error.rs (structured fault rendering)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use server::HttpServer;
