use crate::database::entities::{CreditRecord, credits};
use crate::database::{DatabaseError, DatabaseResult};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

/// Credits DAO for database operations
#[derive(Clone)]
pub struct CreditsDao {
    db: DatabaseConnection,
}

impl CreditsDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All credits owned by a user, oldest first
    pub async fn find_by_user(&self, user_id: i32) -> DatabaseResult<Vec<CreditRecord>> {
        let credits = credits::Entity::find()
            .filter(credits::Column::UserId.eq(user_id))
            .order_by_asc(credits::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(credits)
    }

    /// Credits issued within `[start, end]`, both ends inclusive
    pub async fn issued_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DatabaseResult<Vec<CreditRecord>> {
        let credits = credits::Entity::find()
            .filter(credits::Column::IssuanceDate.gte(start))
            .filter(credits::Column::IssuanceDate.lte(end))
            .order_by_asc(credits::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(credits)
    }

    /// Insert a credit, returning the assigned ID
    pub async fn create(&self, credit: &CreditRecord) -> DatabaseResult<i32> {
        let active_model = credits::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: Set(credit.user_id),
            issuance_date: Set(credit.issuance_date),
            return_date: Set(credit.return_date),
            actual_return_date: Set(credit.actual_return_date),
            body: Set(credit.body),
            percent: Set(credit.percent),
        };

        let inserted = active_model
            .insert(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(inserted.id)
    }
}
