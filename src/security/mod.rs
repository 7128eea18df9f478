//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → rate_limit.rs (per-client admission windows, service scope)
//!     → rate_limit.rs (diagnosis scope, /chat_api only)
//!     → Pass to handlers
//! ```
//!
//! # Design Decisions
//! - Admission rejections are control outcomes, not faults
//! - Over-limit requests are rejected before any matching or lookup work runs

pub mod rate_limit;
