//! Priority reference data.

// =============================================================================
// Priority
// =============================================================================

/// A named urgency level attached to a task.
///
/// Priorities are static reference data seeded at startup. `position` orders
/// them in selection lists (lower comes first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Priority {
    pub id: i64,
    pub name: String,
    pub position: i64,
}

impl Priority {
    #[must_use]
    pub const fn new(id: i64, name: String, position: i64) -> Self {
        Self { id, name, position }
    }

    /// Creates an unresolved priority carrying only a name.
    ///
    /// Task forms submit the priority by name; the task service replaces this
    /// placeholder with the stored row before persisting.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            position: 0,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_keeps_fields() {
        let priority = Priority::new(2, "normal".to_string(), 2);

        assert_eq!(priority.id, 2);
        assert_eq!(priority.name, "normal");
        assert_eq!(priority.position, 2);
    }

    #[rstest]
    fn named_creates_unresolved_placeholder() {
        let priority = Priority::named("urgently");

        assert_eq!(priority.id, 0);
        assert_eq!(priority.name, "urgently");
        assert_eq!(priority.position, 0);
    }
}
