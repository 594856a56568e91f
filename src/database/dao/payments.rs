use crate::database::entities::{PaymentRecord, payments};
use crate::database::{DatabaseError, DatabaseResult};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

/// Payments DAO for database operations
#[derive(Clone)]
pub struct PaymentsDao {
    db: DatabaseConnection,
}

impl PaymentsDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Payments made against any of the given credits
    pub async fn find_by_credits(&self, credit_ids: &[i32]) -> DatabaseResult<Vec<PaymentRecord>> {
        if credit_ids.is_empty() {
            return Ok(Vec::new());
        }

        let payments = payments::Entity::find()
            .filter(payments::Column::CreditId.is_in(credit_ids.iter().copied()))
            .order_by_asc(payments::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(payments)
    }

    /// Payments made within `[start, end]`, both ends inclusive
    pub async fn made_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DatabaseResult<Vec<PaymentRecord>> {
        let payments = payments::Entity::find()
            .filter(payments::Column::PaymentDate.gte(start))
            .filter(payments::Column::PaymentDate.lte(end))
            .order_by_asc(payments::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(payments)
    }

    /// Insert a payment, returning the assigned ID
    pub async fn create(&self, payment: &PaymentRecord) -> DatabaseResult<i32> {
        let active_model = payments::ActiveModel {
            id: ActiveValue::NotSet,
            sum: Set(payment.sum),
            payment_date: Set(payment.payment_date),
            credit_id: Set(payment.credit_id),
            type_id: Set(payment.type_id),
        };

        let inserted = active_model
            .insert(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(inserted.id)
    }
}
