//! Audit metadata embedded in persisted entities.

use chrono::{DateTime, Utc};

/// Principal recorded by the store layer for rows it writes.
pub const SERVICE_AUDITOR: &str = "ACCOUNTS_MS";

/// Creation and modification metadata carried by every persisted entity.
///
/// The store layer is the only writer: `created_*` is stamped on insert and
/// `updated_*` on each subsequent update. Callers never supply these values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditInfo {
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Principal that created the row.
    pub created_by: String,
    /// Last modification timestamp, absent until the first update.
    pub updated_at: Option<DateTime<Utc>>,
    /// Principal that last modified the row, absent until the first update.
    pub updated_by: Option<String>,
}

impl AuditInfo {
    /// Audit metadata for a freshly inserted row.
    pub fn on_insert(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            created_by: SERVICE_AUDITOR.to_owned(),
            updated_at: None,
            updated_by: None,
        }
    }

    /// Copy of this metadata with the update fields stamped.
    pub fn on_update(&self, now: DateTime<Utc>) -> Self {
        Self {
            updated_at: Some(now),
            updated_by: Some(SERVICE_AUDITOR.to_owned()),
            ..self.clone()
        }
    }
}
