use crate::database::entities::{CategoryRecord, PlanRecord, dictionary, plans};
use crate::database::{DatabaseError, DatabaseResult};
use chrono::NaiveDate;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use tracing::debug;

/// A validated plan row waiting to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlan {
    /// Row in the source sheet, header excluded
    pub row: usize,
    pub period: NaiveDate,
    pub category_name: String,
    pub sum: i64,
}

/// A stored plan together with its category label
#[derive(Debug, Clone)]
pub struct PlanWithCategory {
    pub plan: PlanRecord,
    pub category: Option<CategoryRecord>,
}

impl From<(PlanRecord, Option<CategoryRecord>)> for PlanWithCategory {
    fn from((plan, category): (PlanRecord, Option<CategoryRecord>)) -> Self {
        Self { plan, category }
    }
}

/// Plans DAO for database operations
#[derive(Clone)]
pub struct PlansDao {
    db: DatabaseConnection,
}

impl PlansDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Plans set for exactly this period
    pub async fn find_by_period(&self, period: NaiveDate) -> DatabaseResult<Vec<PlanWithCategory>> {
        let rows = plans::Entity::find()
            .filter(plans::Column::Period.eq(period))
            .order_by_asc(plans::Column::Id)
            .find_also_related(dictionary::Entity)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(PlanWithCategory::from).collect())
    }

    /// Plans whose period falls within `[start, end]`, ordered by period
    pub async fn find_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DatabaseResult<Vec<PlanWithCategory>> {
        let rows = plans::Entity::find()
            .filter(plans::Column::Period.gte(start))
            .filter(plans::Column::Period.lte(end))
            .order_by_asc(plans::Column::Period)
            .order_by_asc(plans::Column::Id)
            .find_also_related(dictionary::Entity)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(PlanWithCategory::from).collect())
    }

    pub async fn count(&self) -> DatabaseResult<u64> {
        plans::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// Store a batch of plans atomically.
    ///
    /// Every row must name a known category and must not collide with a plan
    /// already stored for the same period and category. The lookups and the
    /// inserts share one transaction; any failure rolls the whole batch back.
    /// A batch that races another upload for the same period and category is
    /// stopped by the unique index on insert.
    pub async fn insert_batch(&self, batch: &[NewPlan]) -> DatabaseResult<usize> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        let mut models = Vec::with_capacity(batch.len());
        for new_plan in batch {
            let category = dictionary::Entity::find()
                .filter(dictionary::Column::Name.eq(new_plan.category_name.as_str()))
                .order_by_asc(dictionary::Column::Id)
                .one(&txn)
                .await
                .map_err(|e| DatabaseError::Database(e.to_string()))?
                .ok_or_else(|| {
                    DatabaseError::Constraint(format!(
                        "Row {}: unknown plan category '{}'",
                        new_plan.row, new_plan.category_name
                    ))
                })?;

            let existing = plans::Entity::find()
                .filter(plans::Column::Period.eq(new_plan.period))
                .filter(plans::Column::CategoryId.eq(category.id))
                .count(&txn)
                .await
                .map_err(|e| DatabaseError::Database(e.to_string()))?;

            if existing > 0 {
                return Err(DatabaseError::Constraint(format!(
                    "Row {}: a plan for {} and category '{}' already exists",
                    new_plan.row,
                    new_plan.period.format("%Y-%m"),
                    new_plan.category_name
                )));
            }

            models.push(plans::ActiveModel {
                id: ActiveValue::NotSet,
                period: Set(new_plan.period),
                sum: Set(new_plan.sum),
                category_id: Set(category.id),
            });
        }

        let inserted = models.len();
        if !models.is_empty() {
            plans::Entity::insert_many(models)
                .exec(&txn)
                .await
                .map_err(insert_error)?;
        }

        txn.commit()
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        debug!(inserted, "Stored plan batch");
        Ok(inserted)
    }
}

fn insert_error(err: DbErr) -> DatabaseError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DatabaseError::Constraint(
            "A plan for the same month and category was stored by another upload".to_string(),
        ),
        _ => DatabaseError::Database(err.to_string()),
    }
}
