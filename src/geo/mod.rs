//! Facility lookup subsystem.
//!
//! # Data Flow
//! ```text
//! location string (client-supplied or configured default)
//!     → resolver.rs (query synthesis, bounded external call)
//!     → Facility list
//!
//! On lookup failure:
//!     WARN log + fixed fallback list referencing the requested location
//! ```
//!
//! # Design Decisions
//! - Resolver failures never propagate; callers always get a usable list
//! - A successful lookup with zero candidates returns an empty list; the
//!   fallback is reserved for failures

pub mod resolver;

pub use resolver::{Facility, GeoResolver};
