use crate::database::entities::{CreditRecord, PaymentRecord, UserRecord};
use crate::reporting::category::Category;
use crate::reporting::rates::{round_to, sum_amounts};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// Credit overview for one user
#[derive(Debug, Clone, Serialize)]
pub struct CreditsReport {
    pub user_login: String,
    pub credits: Vec<CreditStatus>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CreditStatus {
    Closed(ClosedCredit),
    Open(OpenCredit),
}

#[derive(Debug, Clone, Serialize)]
pub struct ClosedCredit {
    pub issuance_date: NaiveDate,
    pub close: bool,
    /// Actual return date
    pub return_date: NaiveDate,
    pub body: i64,
    pub percent: f64,
    /// All payments, rounded to one decimal
    #[serde(with = "rust_decimal::serde::float")]
    pub sum_payment: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenCredit {
    pub issuance_date: NaiveDate,
    pub close: bool,
    /// Scheduled return date
    pub return_date: NaiveDate,
    /// Negative while the credit is not yet due
    pub days_loan_overdue: i64,
    pub body: i64,
    pub percent: f64,
    #[serde(with = "rust_decimal::serde::float")]
    pub body_payments_sum: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub percent_payments_sum: Decimal,
}

impl CreditStatus {
    pub fn from_credit(
        credit: &CreditRecord,
        payments: &[&PaymentRecord],
        today: NaiveDate,
    ) -> Self {
        match credit.actual_return_date {
            Some(returned) => CreditStatus::Closed(ClosedCredit {
                issuance_date: credit.issuance_date,
                close: true,
                return_date: returned,
                body: credit.body,
                percent: credit.percent,
                sum_payment: round_to(sum_amounts(payments.iter().map(|p| p.sum)), 1),
            }),
            None => CreditStatus::Open(OpenCredit {
                issuance_date: credit.issuance_date,
                close: false,
                return_date: credit.return_date,
                days_loan_overdue: (today - credit.return_date).num_days(),
                body: credit.body,
                percent: credit.percent,
                body_payments_sum: sum_of_type(payments, Category::Principal),
                percent_payments_sum: sum_of_type(payments, Category::Interest),
            }),
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, CreditStatus::Closed(_))
    }
}

fn sum_of_type(payments: &[&PaymentRecord], category: Category) -> Decimal {
    let amounts = payments
        .iter()
        .filter(|p| Category::from_id(p.type_id) == Some(category))
        .map(|p| p.sum);
    round_to(sum_amounts(amounts), 2)
}

impl CreditsReport {
    /// Assemble the report; credits keep their given order
    pub fn build(
        user: &UserRecord,
        credits: &[CreditRecord],
        payments: &[PaymentRecord],
        today: NaiveDate,
    ) -> Self {
        let mut by_credit: HashMap<i32, Vec<&PaymentRecord>> = HashMap::new();
        for payment in payments {
            by_credit.entry(payment.credit_id).or_default().push(payment);
        }

        let credits = credits
            .iter()
            .map(|credit| {
                let paid = by_credit
                    .get(&credit.id)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                CreditStatus::from_credit(credit, paid, today)
            })
            .collect();

        Self {
            user_login: user.login.clone(),
            credits,
        }
    }

    pub fn closed_count(&self) -> usize {
        self.credits.iter().filter(|credit| credit.is_closed()).count()
    }
}
