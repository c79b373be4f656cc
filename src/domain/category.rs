//! Category reference data.

// =============================================================================
// Category
// =============================================================================

/// A named tag attached to tasks (many-to-many).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl Category {
    #[must_use]
    pub const fn new(id: i64, name: String) -> Self {
        Self { id, name }
    }
}
