//! Filter criteria definitions

use serde::{Deserialize, Serialize};

/// Criteria for filtering shortcuts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring the display name must contain
    pub name_query: Option<String>,
}

impl FilterCriteria {
    /// Create new empty filter criteria
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if no filters are set
    ///
    /// A blank query counts as no filter.
    pub fn is_empty(&self) -> bool {
        self.name_query.as_deref().map_or(true, str::is_empty)
    }

    /// Set the name query
    pub fn with_name(mut self, query: impl Into<String>) -> Self {
        self.name_query = Some(query.into());
        self
    }
}
