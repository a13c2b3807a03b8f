//! Request extractors.

pub mod authenticated_user;
pub mod pagination;

pub use authenticated_user::AuthenticatedUser;
pub use pagination::PaginationQuery;
