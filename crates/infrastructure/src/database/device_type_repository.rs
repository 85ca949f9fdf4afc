use crate::database::entities::{device_types, sequences};
use crate::id::new_device_type_id;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use domain::{
    AttributePatch, Attributes, DeviceType, DeviceTypeId, DeviceTypeRepository, DomainError,
};
use migration::DEVICE_TYPE_SEQUENCE;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::warn;

/// Device type store backed by any sea-orm connection (Postgres or SQLite).
///
/// Ordinals come from the `sequences` counter row, which is incremented in the
/// same transaction as the insert and never decremented. Deleting a record
/// leaves every other ordinal untouched.
///
/// Every write transaction opens with a write statement, so concurrent
/// transactions on the same row queue on the row lock (Postgres) or the
/// database write lock (SQLite) instead of racing a read-modify-write.
pub struct SeaOrmDeviceTypeRepository {
    db: DatabaseConnection,
}

/// Row selector shared by the key and ordinal code paths
enum Selector<'a> {
    Key(&'a DeviceTypeId),
    Ordinal(i64),
}

impl Selector<'_> {
    fn describe(&self) -> String {
        match self {
            Selector::Key(id) => id.to_string(),
            Selector::Ordinal(n) => n.to_string(),
        }
    }

    fn condition(&self) -> sea_orm::sea_query::SimpleExpr {
        match self {
            Selector::Key(id) => device_types::Column::Id.eq(id.as_str()),
            Selector::Ordinal(n) => device_types::Column::OrdinalIndex.eq(*n),
        }
    }
}

impl SeaOrmDeviceTypeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_device_type(model: device_types::Model) -> Result<DeviceType, DomainError> {
        let id = DeviceTypeId::new(model.id).map_err(|e| {
            DomainError::storage(format!("Corrupt device type row: {e}"))
        })?;
        let attributes = Attributes::try_from(model.attributes).map_err(|e| {
            DomainError::storage(format!("Corrupt attributes for {id}: {e}"))
        })?;

        Ok(DeviceType {
            id,
            ordinal_index: model.ordinal_index,
            attributes,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        })
    }

    fn to_offset(dt: DateTime<Utc>) -> DateTime<FixedOffset> {
        dt.fixed_offset()
    }

    fn db_error(e: sea_orm::DbErr) -> DomainError {
        warn!(error = %e, "Device type storage error");
        DomainError::storage(format!("Database error: {e}"))
    }

    async fn find_model<C: ConnectionTrait>(
        conn: &C,
        selector: &Selector<'_>,
    ) -> Result<device_types::Model, DomainError> {
        device_types::Entity::find()
            .filter(selector.condition())
            .one(conn)
            .await
            .map_err(Self::db_error)?
            .ok_or_else(|| DomainError::not_found(&selector.describe()))
    }

    /// Take the write lock on the selected row inside `txn` and read it back.
    ///
    /// The no-op UPDATE comes first so a SQLite deferred transaction asks for
    /// the write lock before holding a read lock, which lets the busy timeout
    /// queue competing writers. `FOR UPDATE` covers Postgres; the SQLite
    /// builder omits it.
    async fn lock_model<C: ConnectionTrait>(
        txn: &C,
        selector: &Selector<'_>,
    ) -> Result<device_types::Model, DomainError> {
        let claimed = device_types::Entity::update_many()
            .col_expr(
                device_types::Column::UpdatedAt,
                Expr::col(device_types::Column::UpdatedAt).into(),
            )
            .filter(selector.condition())
            .exec(txn)
            .await
            .map_err(Self::db_error)?;

        if claimed.rows_affected == 0 {
            return Err(DomainError::not_found(&selector.describe()));
        }

        device_types::Entity::find()
            .filter(selector.condition())
            .lock_exclusive()
            .one(txn)
            .await
            .map_err(Self::db_error)?
            .ok_or_else(|| DomainError::not_found(&selector.describe()))
    }

    /// Advance the ordinal counter inside `txn` and return the new value
    async fn next_ordinal<C: ConnectionTrait>(txn: &C) -> Result<i64, DomainError> {
        let bumped = sequences::Entity::update_many()
            .col_expr(
                sequences::Column::Value,
                Expr::col(sequences::Column::Value).add(1),
            )
            .filter(sequences::Column::Name.eq(DEVICE_TYPE_SEQUENCE))
            .exec(txn)
            .await
            .map_err(Self::db_error)?;

        if bumped.rows_affected == 0 {
            sequences::ActiveModel {
                name: Set(DEVICE_TYPE_SEQUENCE.to_string()),
                value: Set(1),
            }
            .insert(txn)
            .await
            .map_err(Self::db_error)?;
            return Ok(1);
        }

        sequences::Entity::find_by_id(DEVICE_TYPE_SEQUENCE)
            .one(txn)
            .await
            .map_err(Self::db_error)?
            .map(|row| row.value)
            .ok_or_else(|| DomainError::storage("Ordinal sequence vanished"))
    }

    async fn update(
        &self,
        selector: Selector<'_>,
        patch: AttributePatch,
    ) -> Result<DeviceType, DomainError> {
        let txn = self.db.begin().await.map_err(Self::db_error)?;

        let model = Self::lock_model(&txn, &selector).await?;
        let mut record = Self::model_to_device_type(model.clone())?;
        record.apply_patch(&patch);

        let mut active = model.into_active_model();
        active.attributes = Set(record.attributes.clone().into_value());
        active.updated_at = Set(Self::to_offset(record.updated_at));
        active.update(&txn).await.map_err(Self::db_error)?;

        txn.commit().await.map_err(Self::db_error)?;
        Ok(record)
    }

    async fn delete(&self, selector: Selector<'_>) -> Result<(), DomainError> {
        let result = device_types::Entity::delete_many()
            .filter(selector.condition())
            .exec(&self.db)
            .await
            .map_err(Self::db_error)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found(&selector.describe()));
        }
        Ok(())
    }
}

#[async_trait]
impl DeviceTypeRepository for SeaOrmDeviceTypeRepository {
    async fn create(&self, attributes: Attributes) -> Result<DeviceType, DomainError> {
        let txn = self.db.begin().await.map_err(Self::db_error)?;

        let ordinal = Self::next_ordinal(&txn).await?;
        let record = DeviceType::new(new_device_type_id(), ordinal, attributes);

        let active_model = device_types::ActiveModel {
            id: Set(record.id.as_str().to_string()),
            ordinal_index: Set(record.ordinal_index),
            attributes: Set(record.attributes.clone().into_value()),
            created_at: Set(Self::to_offset(record.created_at)),
            updated_at: Set(Self::to_offset(record.updated_at)),
        };

        device_types::Entity::insert(active_model)
            .exec(&txn)
            .await
            .map_err(Self::db_error)?;

        txn.commit().await.map_err(Self::db_error)?;
        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<DeviceType>, DomainError> {
        let models = device_types::Entity::find()
            .order_by_asc(device_types::Column::OrdinalIndex)
            .all(&self.db)
            .await
            .map_err(Self::db_error)?;

        models.into_iter().map(Self::model_to_device_type).collect()
    }

    async fn find_by_key(&self, id: &DeviceTypeId) -> Result<DeviceType, DomainError> {
        let model = Self::find_model(&self.db, &Selector::Key(id)).await?;
        Self::model_to_device_type(model)
    }

    async fn find_by_ordinal(&self, ordinal: i64) -> Result<DeviceType, DomainError> {
        let model = Self::find_model(&self.db, &Selector::Ordinal(ordinal)).await?;
        Self::model_to_device_type(model)
    }

    async fn update_by_key(
        &self,
        id: &DeviceTypeId,
        patch: AttributePatch,
    ) -> Result<DeviceType, DomainError> {
        self.update(Selector::Key(id), patch).await
    }

    async fn update_by_ordinal(
        &self,
        ordinal: i64,
        patch: AttributePatch,
    ) -> Result<DeviceType, DomainError> {
        self.update(Selector::Ordinal(ordinal), patch).await
    }

    async fn delete_by_key(&self, id: &DeviceTypeId) -> Result<(), DomainError> {
        self.delete(Selector::Key(id)).await
    }

    async fn delete_by_ordinal(&self, ordinal: i64) -> Result<(), DomainError> {
        self.delete(Selector::Ordinal(ordinal)).await
    }
}
