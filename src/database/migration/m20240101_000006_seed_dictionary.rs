use super::Dictionary;
use sea_orm_migration::prelude::*;

/// Conventional category rows. Their ids are referenced by reporting code.
const CATEGORIES: [(i32, &str); 4] = [
    (1, "body"),
    (2, "percent"),
    (3, "lending"),
    (4, "payments"),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(Dictionary::Table)
            .columns([Dictionary::Id, Dictionary::Name]);
        for (id, name) in CATEGORIES {
            insert.values_panic([id.into(), name.into()]);
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let ids: Vec<i32> = CATEGORIES.iter().map(|(id, _)| *id).collect();
        let delete = Query::delete()
            .from_table(Dictionary::Table)
            .and_where(Expr::col(Dictionary::Id).is_in(ids))
            .to_owned();

        manager.exec_stmt(delete).await
    }
}
