use super::{Credits, Users};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Credits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Credits::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Credits::UserId).integer().not_null())
                    .col(ColumnDef::new(Credits::IssuanceDate).date().not_null())
                    .col(ColumnDef::new(Credits::ReturnDate).date().not_null())
                    .col(ColumnDef::new(Credits::ActualReturnDate).date().null())
                    .col(ColumnDef::new(Credits::Body).big_integer().not_null())
                    .col(ColumnDef::new(Credits::Percent).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_credits_user_id")
                            .from(Credits::Table, Credits::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_credits_user_id")
                    .table(Credits::Table)
                    .col(Credits::UserId)
                    .to_owned(),
            )
            .await?;

        // Lending performance windows filter on issuance date
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_credits_issuance_date")
                    .table(Credits::Table)
                    .col(Credits::IssuanceDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Credits::Table).to_owned())
            .await
    }
}
