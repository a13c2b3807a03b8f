//! # Quill Security
//!
//! JWT issuance/validation and password hashing. The rest of the system
//! treats this crate as the narrow interface to authentication concerns.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, TokenProvider, TokenProviderInterface, TokenProviderParameters};
pub use password::{PasswordHasher, PasswordHasherInterface, PasswordHasherParameters};
