use crate::database::entities::{CreditRecord, PaymentRecord, PlanRecord};
use crate::error::AppError;
use crate::reporting::rates::{RATE_DECIMALS, percent_of, round_to, sum_amounts};
use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

const REPORT_DATE_FORMAT: &str = "%d.%m.%Y";

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`
pub fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Parse a `DD.MM.YYYY` report date
pub fn parse_report_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), REPORT_DATE_FORMAT).map_err(|_| {
        AppError::ParseFailed(format!(
            "Invalid date '{}', expected format DD.MM.YYYY",
            value
        ))
    })
}

/// Parse a report year, exactly four digits
pub fn parse_report_year(value: &str) -> Result<i32, AppError> {
    let value = value.trim();
    if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::ParseFailed(format!(
            "Invalid year '{}', expected four digits",
            value
        )));
    }
    value
        .parse()
        .map_err(|_| AppError::ParseFailed(format!("Invalid year '{}'", value)))
}

/// Sum of principal issued across `credits`
pub fn issued_total(credits: &[CreditRecord]) -> i64 {
    credits.iter().map(|credit| credit.body).sum()
}

/// Sum of `payments`, rounded to two decimals
pub fn paid_total(payments: &[PaymentRecord]) -> Decimal {
    round_to(sum_amounts(payments.iter().map(|p| p.sum)), RATE_DECIMALS)
}

/// One row of the monthly report
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PlanPerformance {
    Lending(LendingPerformance),
    Payments(PaymentsPerformance),
}

#[derive(Debug, Clone, Serialize)]
pub struct LendingPerformance {
    pub period: NaiveDate,
    pub category: String,
    pub sum: i64,
    pub amount_loans_issued: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub success_rate: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentsPerformance {
    pub period: NaiveDate,
    pub category: String,
    pub sum: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_of_payments: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub success_rate: Decimal,
}

impl PlanPerformance {
    /// Lending plan against the credits issued in its window
    pub fn lending(plan: &PlanRecord, category: &str, credits: &[CreditRecord]) -> Self {
        let issued = issued_total(credits);
        PlanPerformance::Lending(LendingPerformance {
            period: plan.period,
            category: category.to_string(),
            sum: plan.sum,
            amount_loans_issued: issued,
            success_rate: percent_of(Decimal::from(issued), Decimal::from(plan.sum)),
        })
    }

    /// Payments plan against the payments made in its window
    pub fn payments(plan: &PlanRecord, category: &str, payments: &[PaymentRecord]) -> Self {
        let paid = paid_total(payments);
        PlanPerformance::Payments(PaymentsPerformance {
            period: plan.period,
            category: category.to_string(),
            sum: plan.sum,
            amount_of_payments: paid,
            success_rate: percent_of(paid, Decimal::from(plan.sum)),
        })
    }

    pub fn success_rate(&self) -> Decimal {
        match self {
            PlanPerformance::Lending(p) => p.success_rate,
            PlanPerformance::Payments(p) => p.success_rate,
        }
    }
}

/// One month of the annual report
#[derive(Debug, Clone, Serialize)]
pub struct MonthPerformance {
    pub month_year: String,
    pub category: Vec<MonthCategoryPerformance>,
}

impl MonthPerformance {
    pub fn new(period: NaiveDate, category: Vec<MonthCategoryPerformance>) -> Self {
        Self {
            month_year: format!("Month: {}, year: {}", period.month(), period.year()),
            category,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MonthCategoryPerformance {
    Lending(MonthLendingPerformance),
    Payments(MonthPaymentsPerformance),
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthLendingPerformance {
    pub category: String,
    pub number_of_lending: usize,
    pub sum: i64,
    pub amount_loans_issued: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub success_rate: Decimal,
    /// Share of the year's issued principal
    #[serde(with = "rust_decimal::serde::float")]
    pub month_to_year_percent: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthPaymentsPerformance {
    pub period: NaiveDate,
    pub category: String,
    pub sum: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_of_payments: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub success_rate: Decimal,
    /// Share of the year's payments
    #[serde(with = "rust_decimal::serde::float")]
    pub month_to_year_percent: Decimal,
}

impl MonthCategoryPerformance {
    pub fn lending(
        plan: &PlanRecord,
        category: &str,
        credits: &[CreditRecord],
        year_issued: i64,
    ) -> Self {
        let issued = issued_total(credits);
        MonthCategoryPerformance::Lending(MonthLendingPerformance {
            category: category.to_string(),
            number_of_lending: credits.len(),
            sum: plan.sum,
            amount_loans_issued: issued,
            success_rate: percent_of(Decimal::from(issued), Decimal::from(plan.sum)),
            month_to_year_percent: percent_of(Decimal::from(issued), Decimal::from(year_issued)),
        })
    }

    pub fn payments(
        plan: &PlanRecord,
        category: &str,
        payments: &[PaymentRecord],
        year_paid: Decimal,
    ) -> Self {
        let paid = paid_total(payments);
        MonthCategoryPerformance::Payments(MonthPaymentsPerformance {
            period: plan.period,
            category: category.to_string(),
            sum: plan.sum,
            amount_of_payments: paid,
            success_rate: percent_of(paid, Decimal::from(plan.sum)),
            month_to_year_percent: percent_of(paid, year_paid),
        })
    }
}
