//! # Quill Repository
//!
//! Data access layer: repository traits, PostgreSQL implementations, and
//! in-memory fakes for tests.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository> (and friends)
//! PgUserRepository              ← SQLx / PostgreSQL
//! InMemoryUserRepository        ← HashMap-backed fake, same trait
//! ```
//!
//! The fakes implement the production traits verbatim so tests exercise the
//! same call paths as the server; production code never branches on them.

pub mod memory;
pub mod pool;
pub mod postgres;
pub mod traits;

pub use memory::*;
pub use pool::{DatabasePool, DatabasePoolInterface, DatabasePoolParameters};
pub use postgres::*;
pub use traits::*;
