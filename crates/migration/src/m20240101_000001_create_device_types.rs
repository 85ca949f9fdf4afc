use sea_orm_migration::prelude::*;

/// Name of the counter row that hands out device type ordinals
pub const DEVICE_TYPE_SEQUENCE: &str = "device_types";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create device_types table
        manager
            .create_table(
                Table::create()
                    .table(DeviceTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DeviceTypes::Id)
                            .string_len(24)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DeviceTypes::OrdinalIndex)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DeviceTypes::Attributes).json().not_null())
                    .col(
                        ColumnDef::new(DeviceTypes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(DeviceTypes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_device_types_ordinal_index")
                    .table(DeviceTypes::Table)
                    .col(DeviceTypes::OrdinalIndex)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Create sequences table (monotonic counters, never decremented)
        manager
            .create_table(
                Table::create()
                    .table(Sequences::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sequences::Name)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Sequences::Value)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        let seed = Query::insert()
            .into_table(Sequences::Table)
            .columns([Sequences::Name, Sequences::Value])
            .values_panic([DEVICE_TYPE_SEQUENCE.into(), 0i64.into()])
            .to_owned();
        manager.exec_stmt(seed).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sequences::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DeviceTypes::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum DeviceTypes {
    Table,
    Id,
    OrdinalIndex,
    Attributes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Sequences {
    Table,
    Name,
    Value,
}
