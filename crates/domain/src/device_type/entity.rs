use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::{AttributePatch, Attributes, DeviceTypeId};

/// A persisted device type record.
///
/// `id` and `ordinal_index` are assigned by the store at creation and never
/// change afterwards. Ordinals are not reused once their record is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceType {
    pub id: DeviceTypeId,
    pub ordinal_index: i64,
    pub attributes: Attributes,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DeviceType {
    pub fn new(id: DeviceTypeId, ordinal_index: i64, attributes: Attributes) -> Self {
        let now = Self::now();
        Self {
            id,
            ordinal_index,
            attributes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an attribute patch and bump `updated_at`
    pub fn apply_patch(&mut self, patch: &AttributePatch) {
        self.attributes.apply(patch);
        self.updated_at = Self::now();
    }

    /// Microsecond precision, the finest every supported store keeps
    fn now() -> DateTime<Utc> {
        Utc::now().trunc_subsecs(6)
    }
}
