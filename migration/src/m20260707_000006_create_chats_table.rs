use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `chats` table and its columns.
#[derive(DeriveIden)]
enum Chats {
    Table,
    Id,
    ClientId,
    ChatType,
    ProviderId,
    ProviderName,
    CreatedAt,
    UpdatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Chats::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Chats::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Chats::ClientId).uuid().not_null())
                    .col(ColumnDef::new(Chats::ChatType).string().not_null())
                    .col(ColumnDef::new(Chats::ProviderId).uuid().not_null())
                    .col(ColumnDef::new(Chats::ProviderName).string().not_null())
                    .col(
                        ColumnDef::new(Chats::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Chats::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chats_client_id")
                            .from(Chats::Table, Chats::ClientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chats_provider_id")
                            .from(Chats::Table, Chats::ProviderId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One chat per (client, provider, type). Concurrent create requests
        // race on this index; the loser resolves to the winner's row.
        manager
            .create_index(
                Index::create()
                    .name("idx_chats_participants_unique")
                    .table(Chats::Table)
                    .col(Chats::ClientId)
                    .col(Chats::ProviderId)
                    .col(Chats::ChatType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Listing indexes: chats are listed per participant, newest activity first.
        manager
            .create_index(
                Index::create()
                    .name("idx_chats_client_updated")
                    .table(Chats::Table)
                    .col(Chats::ClientId)
                    .col(Chats::UpdatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_chats_provider_updated")
                    .table(Chats::Table)
                    .col(Chats::ProviderId)
                    .col(Chats::UpdatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Chats::Table).to_owned())
            .await
    }
}
