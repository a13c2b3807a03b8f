//! Value objects.

pub mod notification_kind;
pub mod role;

pub use notification_kind::NotificationKind;
pub use role::UserRole;
