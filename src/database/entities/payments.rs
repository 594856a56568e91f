use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub sum: f64,
    pub payment_date: NaiveDate,
    pub credit_id: i32,
    /// Dictionary id telling principal and interest repayments apart
    pub type_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::credits::Entity",
        from = "Column::CreditId",
        to = "super::credits::Column::Id"
    )]
    Credit,
    #[sea_orm(
        belongs_to = "super::dictionary::Entity",
        from = "Column::TypeId",
        to = "super::dictionary::Column::Id"
    )]
    Type,
}

impl Related<super::credits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Credit.def()
    }
}

impl Related<super::dictionary::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Type.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
