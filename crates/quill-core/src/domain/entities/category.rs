//! Category entity.

use crate::CategoryId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A post category. Names are unique across the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Category {
    /// Unique identifier for the category.
    pub id: CategoryId,

    /// Category name.
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

impl Category {
    /// Creates a new category draft; the id is assigned on save.
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            id: CategoryId::new(0),
            name,
        }
    }
}
