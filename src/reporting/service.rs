use crate::database::{DatabaseManager, PlanWithCategory};
use crate::error::AppError;
use crate::reporting::category::Category;
use crate::reporting::credit_status::CreditsReport;
use crate::reporting::ingest::{IngestSummary, parse_plan_sheet};
use crate::reporting::performance::{
    MonthCategoryPerformance, MonthPerformance, PlanPerformance, issued_total, month_end,
    month_start, paid_total,
};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Reports over the credits, payments and plans in the database
pub struct ReportingService {
    database: Arc<dyn DatabaseManager>,
}

impl ReportingService {
    pub fn new(database: Arc<dyn DatabaseManager>) -> Self {
        Self { database }
    }

    /// Status of every credit held by `user_id`, as of `today`
    pub async fn credit_status(
        &self,
        user_id: i32,
        today: NaiveDate,
    ) -> Result<CreditsReport, AppError> {
        let user = self
            .database
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        let credits = self.database.credits().find_by_user(user_id).await?;
        let credit_ids: Vec<i32> = credits.iter().map(|credit| credit.id).collect();
        let payments = self.database.payments().find_by_credits(&credit_ids).await?;

        let report = CreditsReport::build(&user, &credits, &payments, today);
        debug!(
            user_id,
            credits = credits.len(),
            closed = report.closed_count(),
            payments = payments.len(),
            "Built credit status"
        );

        Ok(report)
    }

    /// Parse a plan sheet and store every row, or none of them
    pub async fn ingest_plans(&self, data: &[u8]) -> Result<IngestSummary, AppError> {
        let plans = parse_plan_sheet(data).inspect_err(|e| {
            warn!("Rejected plan sheet: {}", e);
        })?;

        let inserted = self
            .database
            .plans()
            .insert_batch(&plans)
            .await
            .map_err(AppError::from)
            .inspect_err(|e| warn!("Rejected plan batch: {}", e))?;

        info!(inserted, "Plans ingested");
        Ok(IngestSummary::new(inserted))
    }

    /// Plans of the month containing `date`, measured from the first of the
    /// month through `date`
    pub async fn monthly_performance(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<PlanPerformance>, AppError> {
        let period = month_start(date);
        let plans = self.database.plans().find_by_period(period).await?;

        let mut report = Vec::with_capacity(plans.len());
        for entry in &plans {
            match Category::from_id(entry.plan.category_id) {
                Some(Category::LendingPlan) => {
                    let credits = self.database.credits().issued_between(period, date).await?;
                    report.push(PlanPerformance::lending(
                        &entry.plan,
                        category_name(entry)?,
                        &credits,
                    ));
                }
                Some(Category::PaymentPlan) => {
                    let payments = self.database.payments().made_between(period, date).await?;
                    report.push(PlanPerformance::payments(
                        &entry.plan,
                        category_name(entry)?,
                        &payments,
                    ));
                }
                _ => debug!(
                    category_id = entry.plan.category_id,
                    "Skipping plan with unreported category"
                ),
            }
        }

        info!(%period, plans = plans.len(), rows = report.len(), "Monthly performance computed");
        Ok(report)
    }

    /// Month-by-month plan performance over `year`
    pub async fn annual_performance(&self, year: i32) -> Result<Vec<MonthPerformance>, AppError> {
        let (first_day, last_day) = year_bounds(year)?;

        let plans = self
            .database
            .plans()
            .find_in_range(first_day, last_day)
            .await?;

        let year_issued = issued_total(
            &self
                .database
                .credits()
                .issued_between(first_day, last_day)
                .await?,
        );
        let year_paid = paid_total(
            &self
                .database
                .payments()
                .made_between(first_day, last_day)
                .await?,
        );

        let mut months: BTreeMap<u32, Vec<&PlanWithCategory>> = BTreeMap::new();
        for entry in &plans {
            months.entry(entry.plan.period.month()).or_default().push(entry);
        }

        let mut report = Vec::with_capacity(months.len());
        for entries in months.values() {
            let Some(first) = entries.first() else {
                continue;
            };

            let mut rows = Vec::new();
            for entry in entries {
                let window_start = entry.plan.period;
                let window_end = month_end(window_start);

                match Category::from_id(entry.plan.category_id) {
                    Some(Category::LendingPlan) => {
                        let credits = self
                            .database
                            .credits()
                            .issued_between(window_start, window_end)
                            .await?;
                        rows.push(MonthCategoryPerformance::lending(
                            &entry.plan,
                            category_name(entry)?,
                            &credits,
                            year_issued,
                        ));
                    }
                    Some(Category::PaymentPlan) => {
                        let payments = self
                            .database
                            .payments()
                            .made_between(window_start, window_end)
                            .await?;
                        rows.push(MonthCategoryPerformance::payments(
                            &entry.plan,
                            category_name(entry)?,
                            &payments,
                            year_paid,
                        ));
                    }
                    _ => debug!(
                        category_id = entry.plan.category_id,
                        "Skipping plan with unreported category"
                    ),
                }
            }

            report.push(MonthPerformance::new(first.plan.period, rows));
        }

        info!(year, months = report.len(), "Annual performance computed");
        Ok(report)
    }
}

fn category_name(entry: &PlanWithCategory) -> Result<&str, AppError> {
    entry
        .category
        .as_ref()
        .map(|category| category.name.as_str())
        .ok_or_else(|| {
            AppError::NotFound(format!("Category {} not found", entry.plan.category_id))
        })
}

fn year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate), AppError> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1);
    let last = NaiveDate::from_ymd_opt(year, 12, 31);
    first
        .zip(last)
        .ok_or_else(|| AppError::ParseFailed(format!("Year {} is out of range", year)))
}
