use std::sync::Arc;

use domain::{
    AccessPolicy, AttributePatch, Attributes, DeviceType, DeviceTypeRepository, DomainError,
    Operation, ResourceRef, Role,
};
use tracing::{debug, info, warn};

type Result<T> = std::result::Result<T, DomainError>;

/// Public CRUD surface over the device type collection.
///
/// Every operation runs authorize -> resolve -> dispatch. A denied caller
/// never reaches the repository, and an identifier that resolves to
/// `ResourceRef::Invalid` is reported as `NotFound` before any store call.
#[derive(Clone)]
pub struct DeviceTypeService {
    repository: Arc<dyn DeviceTypeRepository>,
    policy: AccessPolicy,
}

impl DeviceTypeService {
    pub fn new(repository: Arc<dyn DeviceTypeRepository>, policy: AccessPolicy) -> Self {
        Self { repository, policy }
    }

    pub async fn create(&self, role: Role, attributes: Attributes) -> Result<DeviceType> {
        self.authorize(role, Operation::Create)?;

        let record = self.repository.create(attributes).await?;
        info!(id = %record.id, ordinal = record.ordinal_index, "Device type created");
        Ok(record)
    }

    pub async fn list_all(&self, role: Role) -> Result<Vec<DeviceType>> {
        self.authorize(role, Operation::ListAll)?;
        self.repository.find_all().await
    }

    pub async fn read_one(&self, role: Role, raw: &str) -> Result<DeviceType> {
        self.authorize(role, Operation::ReadOne)?;

        match Self::resolve(raw) {
            ResourceRef::PrimaryKey(id) => self.repository.find_by_key(&id).await,
            ResourceRef::OrdinalIndex(n) => self.repository.find_by_ordinal(n).await,
            ResourceRef::Invalid => Err(DomainError::not_found(raw)),
        }
    }

    pub async fn update(&self, role: Role, raw: &str, patch: AttributePatch) -> Result<DeviceType> {
        self.authorize(role, Operation::Update)?;

        let record = match Self::resolve(raw) {
            ResourceRef::PrimaryKey(id) => self.repository.update_by_key(&id, patch).await?,
            ResourceRef::OrdinalIndex(n) => self.repository.update_by_ordinal(n, patch).await?,
            ResourceRef::Invalid => return Err(DomainError::not_found(raw)),
        };
        info!(id = %record.id, "Device type updated");
        Ok(record)
    }

    pub async fn delete(&self, role: Role, raw: &str) -> Result<()> {
        self.authorize(role, Operation::Delete)?;

        match Self::resolve(raw) {
            ResourceRef::PrimaryKey(id) => self.repository.delete_by_key(&id).await?,
            ResourceRef::OrdinalIndex(n) => self.repository.delete_by_ordinal(n).await?,
            ResourceRef::Invalid => return Err(DomainError::not_found(raw)),
        }
        info!(identifier = raw, "Device type deleted");
        Ok(())
    }

    /// Policy check alone, for callers that must reject before doing other work
    pub fn authorize(&self, role: Role, operation: Operation) -> Result<()> {
        self.policy.require(role, operation).inspect_err(|_| {
            warn!(%role, %operation, "Access denied");
        })
    }

    fn resolve(raw: &str) -> ResourceRef {
        let resolved = ResourceRef::classify(raw);
        debug!(identifier = raw, ?resolved, "Resolved identifier");
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::DeviceTypeId;
    use domain::device_type::MockDeviceTypeRepository;
    use mockall::predicate::eq;
    use serde_json::json;

    const KEY: &str = "65a1f0c2e4b0a1b2c3d4e5f6";

    fn record(ordinal: i64) -> DeviceType {
        DeviceType::new(
            DeviceTypeId::new(KEY).unwrap(),
            ordinal,
            Attributes::try_from(json!({"name": "Gateway"})).unwrap(),
        )
    }

    fn service(repo: MockDeviceTypeRepository) -> DeviceTypeService {
        DeviceTypeService::new(Arc::new(repo), AccessPolicy::default())
    }

    #[tokio::test]
    async fn test_read_one_dispatches_primary_key() {
        let mut repo = MockDeviceTypeRepository::new();
        let expected = record(3);
        let returned = expected.clone();
        repo.expect_find_by_key()
            .with(eq(DeviceTypeId::new(KEY).unwrap()))
            .times(1)
            .returning(move |_| Ok(returned.clone()));
        repo.expect_find_by_ordinal().never();

        let found = service(repo).read_one(Role::Owner, KEY).await.unwrap();
        assert_eq!(found, expected);
    }

    #[tokio::test]
    async fn test_read_one_dispatches_ordinal() {
        let mut repo = MockDeviceTypeRepository::new();
        repo.expect_find_by_key().never();
        repo.expect_find_by_ordinal()
            .with(eq(2))
            .times(1)
            .returning(|n| Ok(record(n)));

        let found = service(repo).read_one(Role::Admin, "2").await.unwrap();
        assert_eq!(found.ordinal_index, 2);
    }

    #[tokio::test]
    async fn test_invalid_identifier_is_not_found_without_store_access() {
        // No expectations: any repository call panics
        let svc = service(MockDeviceTypeRepository::new());

        for raw in ["0", "-1", "abc"] {
            assert!(matches!(
                svc.read_one(Role::Admin, raw).await,
                Err(DomainError::NotFound(_))
            ));
            assert!(matches!(
                svc.update(Role::Admin, raw, AttributePatch::default()).await,
                Err(DomainError::NotFound(_))
            ));
            assert!(matches!(
                svc.delete(Role::Owner, raw).await,
                Err(DomainError::NotFound(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_denied_role_never_reaches_store() {
        let svc = service(MockDeviceTypeRepository::new());

        let err = svc
            .create(Role::User, Attributes::default())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::Forbidden {
                role: Role::User,
                operation: Operation::Create
            }
        );
        assert!(matches!(
            svc.list_all(Role::Owner).await,
            Err(DomainError::Forbidden { .. })
        ));
        assert!(matches!(
            svc.delete(Role::User, KEY).await,
            Err(DomainError::Forbidden { .. })
        ));
    }

    #[tokio::test]
    async fn test_authorization_precedes_resolution() {
        let svc = service(MockDeviceTypeRepository::new());
        // Malformed identifier, but the role check fails first
        assert!(matches!(
            svc.read_one(Role::User, "abc").await,
            Err(DomainError::Forbidden { .. })
        ));
    }

    #[tokio::test]
    async fn test_store_errors_propagate_unchanged() {
        let mut repo = MockDeviceTypeRepository::new();
        repo.expect_update_by_ordinal()
            .returning(|_, _| Err(DomainError::StorageUnavailable("db down".into())));
        repo.expect_delete_by_key()
            .returning(|_| Err(DomainError::NotFound("gone".into())));

        let svc = service(repo);
        assert_eq!(
            svc.update(Role::Owner, "5", AttributePatch::default())
                .await
                .unwrap_err(),
            DomainError::StorageUnavailable("db down".into())
        );
        assert_eq!(
            svc.delete(Role::Owner, KEY).await.unwrap_err(),
            DomainError::NotFound("gone".into())
        );
    }

    #[tokio::test]
    async fn test_custom_policy() {
        let mut repo = MockDeviceTypeRepository::new();
        repo.expect_find_all().times(1).returning(|| Ok(vec![]));

        let policy = AccessPolicy::default().with_rule(Operation::ListAll, [Role::User]);
        let svc = DeviceTypeService::new(Arc::new(repo), policy);

        assert!(svc.list_all(Role::User).await.unwrap().is_empty());
        assert!(svc.list_all(Role::Admin).await.is_err());
    }
}
