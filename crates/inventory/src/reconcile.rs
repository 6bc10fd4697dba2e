//! Timestamp reconciliation across merged lots.

use chrono::{DateTime, Utc};

/// Creation/update instants of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifespan {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lifespan {
    pub fn new(created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            updated_at,
        }
    }

    /// Earliest creation, latest update.
    pub fn merge(self, other: Lifespan) -> Lifespan {
        Lifespan {
            created_at: self.created_at.min(other.created_at),
            updated_at: self.updated_at.max(other.updated_at),
        }
    }
}
