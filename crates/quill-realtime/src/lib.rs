//! # Quill Realtime
//!
//! In-process fan-out of notification events to connected clients. The hub
//! tracks at most one delivery channel per user and pushes JSON-encoded
//! events to it without ever blocking the sender.

pub mod hub;

pub use hub::{Client, ConnectionGuard, NotificationHub};
