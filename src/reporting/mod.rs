//! Plan vs. actual reporting over credits and payments.
//!
//! Pure computations live in [`credit_status`], [`ingest`] and
//! [`performance`]; [`service::ReportingService`] feeds them from the
//! database.

pub mod category;
pub mod credit_status;
pub mod ingest;
pub mod performance;
pub mod rates;
pub mod service;

pub use category::Category;
pub use credit_status::{ClosedCredit, CreditStatus, CreditsReport, OpenCredit};
pub use ingest::{IngestSummary, parse_plan_sheet};
pub use performance::{
    LendingPerformance, MonthCategoryPerformance, MonthLendingPerformance, MonthPaymentsPerformance,
    MonthPerformance, PaymentsPerformance, PlanPerformance,
};
pub use service::ReportingService;
