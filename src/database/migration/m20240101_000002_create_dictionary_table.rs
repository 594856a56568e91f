use super::Dictionary;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Dictionary::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Dictionary::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Dictionary::Name).string_len(150).not_null())
                    .to_owned(),
            )
            .await?;

        // Plan ingestion resolves categories by name
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_dictionary_name")
                    .table(Dictionary::Table)
                    .col(Dictionary::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Dictionary::Table).to_owned())
            .await
    }
}
