use super::{Credits, Dictionary, Payments};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Payments::Sum).double().not_null())
                    .col(ColumnDef::new(Payments::PaymentDate).date().not_null())
                    .col(ColumnDef::new(Payments::CreditId).integer().not_null())
                    .col(ColumnDef::new(Payments::TypeId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_credit_id")
                            .from(Payments::Table, Payments::CreditId)
                            .to(Credits::Table, Credits::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_type_id")
                            .from(Payments::Table, Payments::TypeId)
                            .to(Dictionary::Table, Dictionary::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_payments_credit_id")
                    .table(Payments::Table)
                    .col(Payments::CreditId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_payments_payment_date")
                    .table(Payments::Table)
                    .col(Payments::PaymentDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await
    }
}
