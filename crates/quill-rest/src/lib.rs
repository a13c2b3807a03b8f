//! # Quill REST
//!
//! HTTP API layer: router, controllers, auth middleware, extractors, and
//! the SSE notification stream.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
