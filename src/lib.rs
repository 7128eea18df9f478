//! Demo Symptom Triage Service
//!
//! A small decision-support assistant built with Tokio and Axum. Free-text
//! symptom descriptions are matched against a seeded condition catalog and
//! combined with nearby-facility candidates resolved through an external
//! geocoding service.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                TRIAGE SERVICE                 │
//!                      │                                               │
//!   POST /chat_api     │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!   ──────────────────▶│  │ security │──▶│ catalog  │──▶│   geo    │  │
//!                      │  │ limiter  │   │ matcher  │   │ resolver │──┼──▶ geocoder
//!                      │  └──────────┘   └──────────┘   └────┬─────┘  │
//!                      │                                     │         │
//!   JSON envelope      │                ┌────────────────────▼──────┐  │
//!   ◀──────────────────┼────────────────│  diagnosis + facilities   │  │
//!                      │                └───────────────────────────┘  │
//!                      │                                               │
//!                      │  ┌─────────────────────────────────────────┐  │
//!                      │  │          Cross-Cutting Concerns          │  │
//!                      │  │  ┌────────┐ ┌──────────┐ ┌───────────┐  │  │
//!                      │  │  │ config │ │ accounts │ │ observa-  │  │  │
//!                      │  │  │        │ │ sessions │ │ bility    │  │  │
//!                      │  │  └────────┘ └──────────┘ └───────────┘  │  │
//!                      │  └─────────────────────────────────────────┘  │
//!                      └──────────────────────────────────────────────┘
//! ```
//!
//! The admission controller runs before any matching work; the geocoding call
//! is the only operation in the request path expected to incur latency or
//! fail transiently, and its failures never escape the resolver.

// Core subsystems
pub mod catalog;
pub mod config;
pub mod geo;
pub mod http;

// Accounts and request admission
pub mod accounts;
pub mod security;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::TriageConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
