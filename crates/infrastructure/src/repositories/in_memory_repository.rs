use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use domain::{
    AttributePatch, Attributes, DeviceType, DeviceTypeId, DeviceTypeRepository, DomainError,
};
use tokio::sync::RwLock;

use crate::id::new_device_type_id;

#[derive(Default)]
struct State {
    // ordinal -> record, iteration order is ordinal order
    records: BTreeMap<i64, DeviceType>,
    ordinals: HashMap<DeviceTypeId, i64>,
    last_ordinal: i64,
}

impl State {
    fn ordinal_of(&self, id: &DeviceTypeId) -> Result<i64, DomainError> {
        self.ordinals
            .get(id)
            .copied()
            .ok_or_else(|| DomainError::not_found(id.as_str()))
    }

    fn get_mut(&mut self, ordinal: i64) -> Result<&mut DeviceType, DomainError> {
        self.records
            .get_mut(&ordinal)
            .ok_or_else(|| DomainError::not_found(&ordinal.to_string()))
    }

    fn remove(&mut self, ordinal: i64) -> Result<(), DomainError> {
        let record = self
            .records
            .remove(&ordinal)
            .ok_or_else(|| DomainError::not_found(&ordinal.to_string()))?;
        self.ordinals.remove(&record.id);
        Ok(())
    }
}

/// Process-local device type store.
///
/// All mutations happen under one write lock, so id/ordinal assignment and
/// deletion are atomic with respect to concurrent readers. Ordinals follow a
/// counter that only grows; deleting a record never shifts the others.
#[derive(Default)]
pub struct InMemoryDeviceTypeRepository {
    state: RwLock<State>,
}

impl InMemoryDeviceTypeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl DeviceTypeRepository for InMemoryDeviceTypeRepository {
    async fn create(&self, attributes: Attributes) -> Result<DeviceType, DomainError> {
        let mut state = self.state.write().await;

        let mut id = new_device_type_id();
        while state.ordinals.contains_key(&id) {
            id = new_device_type_id();
        }

        state.last_ordinal += 1;
        let record = DeviceType::new(id, state.last_ordinal, attributes);
        state.ordinals.insert(record.id.clone(), record.ordinal_index);
        state.records.insert(record.ordinal_index, record.clone());
        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<DeviceType>, DomainError> {
        Ok(self.state.read().await.records.values().cloned().collect())
    }

    async fn find_by_key(&self, id: &DeviceTypeId) -> Result<DeviceType, DomainError> {
        let state = self.state.read().await;
        let ordinal = state.ordinal_of(id)?;
        state
            .records
            .get(&ordinal)
            .cloned()
            .ok_or_else(|| DomainError::not_found(id.as_str()))
    }

    async fn find_by_ordinal(&self, ordinal: i64) -> Result<DeviceType, DomainError> {
        self.state
            .read()
            .await
            .records
            .get(&ordinal)
            .cloned()
            .ok_or_else(|| DomainError::not_found(&ordinal.to_string()))
    }

    async fn update_by_key(
        &self,
        id: &DeviceTypeId,
        patch: AttributePatch,
    ) -> Result<DeviceType, DomainError> {
        let mut state = self.state.write().await;
        let ordinal = state.ordinal_of(id)?;
        let record = state.get_mut(ordinal)?;
        record.apply_patch(&patch);
        Ok(record.clone())
    }

    async fn update_by_ordinal(
        &self,
        ordinal: i64,
        patch: AttributePatch,
    ) -> Result<DeviceType, DomainError> {
        let mut state = self.state.write().await;
        let record = state.get_mut(ordinal)?;
        record.apply_patch(&patch);
        Ok(record.clone())
    }

    async fn delete_by_key(&self, id: &DeviceTypeId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let ordinal = state.ordinal_of(id)?;
        state.remove(ordinal)
    }

    async fn delete_by_ordinal(&self, ordinal: i64) -> Result<(), DomainError> {
        self.state.write().await.remove(ordinal)
    }
}
