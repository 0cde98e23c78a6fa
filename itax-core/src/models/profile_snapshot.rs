use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TaxProfile;

/// A named, saved copy of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub id: i64,
    /// Unique among saved snapshots; saving under an existing name replaces it.
    pub name: String,
    pub profile: TaxProfile,
    pub saved_at: DateTime<Utc>,
}
