use super::{AttributePatch, Attributes, DeviceType, DeviceTypeId};
use crate::DomainError;
use async_trait::async_trait;

/// Repository interface for device type persistence
///
/// Callers have already been authorized. Lookups by key or ordinal signal
/// `DomainError::NotFound` when no live record matches; backend failures
/// surface as `DomainError::StorageUnavailable`.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait DeviceTypeRepository: Send + Sync {
    /// Allocate a fresh id and the next ordinal, persist, and return the record
    async fn create(&self, attributes: Attributes) -> Result<DeviceType, DomainError>;

    /// All live records, ordered by ordinal
    async fn find_all(&self) -> Result<Vec<DeviceType>, DomainError>;

    async fn find_by_key(&self, id: &DeviceTypeId) -> Result<DeviceType, DomainError>;

    async fn find_by_ordinal(&self, ordinal: i64) -> Result<DeviceType, DomainError>;

    async fn update_by_key(
        &self,
        id: &DeviceTypeId,
        patch: AttributePatch,
    ) -> Result<DeviceType, DomainError>;

    async fn update_by_ordinal(
        &self,
        ordinal: i64,
        patch: AttributePatch,
    ) -> Result<DeviceType, DomainError>;

    async fn delete_by_key(&self, id: &DeviceTypeId) -> Result<(), DomainError>;

    /// Remaining records keep their ordinals
    async fn delete_by_ordinal(&self, ordinal: i64) -> Result<(), DomainError>;
}
