use crate::{
    config::Config,
    database::{
        DatabaseManager, DatabaseManagerImpl, NewPlan,
        entities::{CreditRecord, PaymentRecord, UserRecord},
    },
    reporting::Category,
    server::Server,
};
use chrono::{Duration, NaiveDate};
use std::sync::Arc;

const MEMORY_DATABASE_URL: &str = "sqlite::memory:";

/// Test server builder backed by a migrated in-memory database
pub struct TestServerBuilder {
    config: Config,
}

impl TestServerBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Build the test server on in-memory SQLite with request logging off
    pub async fn build(self) -> Server {
        let mut config = self.config;
        config.database.url = Some(MEMORY_DATABASE_URL.to_string());
        config.logging.log_request = false;

        let server = Server::new(config).await.unwrap();
        server.database.migrate().await.unwrap();
        server
    }
}

impl Default for TestServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Calendar date shorthand for fixtures
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// Migrated in-memory database
pub async fn memory_database() -> Arc<DatabaseManagerImpl> {
    let mut config = Config::default();
    config.database.url = Some(MEMORY_DATABASE_URL.to_string());

    let database = DatabaseManagerImpl::new_from_config(&config).await.unwrap();
    database.migrate().await.unwrap();
    Arc::new(database)
}

/// Create a test user with the given login
pub async fn create_test_user(database: &dyn DatabaseManager, login: &str) -> i32 {
    database.users().create(&UserRecord::new(login)).await.unwrap()
}

/// Create a credit due ninety days after issuance
pub async fn create_test_credit(
    database: &dyn DatabaseManager,
    user_id: i32,
    issuance_date: NaiveDate,
    body: i64,
    actual_return_date: Option<NaiveDate>,
) -> i32 {
    let credit = CreditRecord {
        id: 0,
        user_id,
        issuance_date,
        return_date: issuance_date + Duration::days(90),
        actual_return_date,
        body,
        percent: 10.0,
    };
    database.credits().create(&credit).await.unwrap()
}

/// Create a payment of the given type against a credit
pub async fn create_test_payment(
    database: &dyn DatabaseManager,
    credit_id: i32,
    payment_date: NaiveDate,
    sum: f64,
    category: Category,
) -> i32 {
    let payment = PaymentRecord {
        id: 0,
        sum,
        payment_date,
        credit_id,
        type_id: category.id(),
    };
    database.payments().create(&payment).await.unwrap()
}

/// Store a single plan for a dictionary category name
pub async fn create_test_plan(
    database: &dyn DatabaseManager,
    period: NaiveDate,
    category_name: &str,
    sum: i64,
) {
    let plan = NewPlan {
        row: 1,
        period,
        category_name: category_name.to_string(),
        sum,
    };
    database.plans().insert_batch(&[plan]).await.unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_builder_default() {
        let server = TestServerBuilder::new().build().await;

        assert_eq!(
            server.config.database.url.as_deref(),
            Some(MEMORY_DATABASE_URL)
        );
        assert!(!server.config.logging.log_request);
    }

    #[tokio::test]
    async fn test_create_test_user() {
        let server = TestServerBuilder::new().build().await;
        let user_id = create_test_user(server.database.as_ref(), "alice").await;

        assert!(user_id > 0);
        let user = server.database.users().find_by_id(user_id).await.unwrap();
        assert_eq!(user.unwrap().login, "alice");
    }

    #[tokio::test]
    async fn test_create_test_plan() {
        let database = memory_database().await;
        create_test_plan(database.as_ref(), date(2021, 1, 1), "lending", 10).await;

        let plans = database.plans().find_by_period(date(2021, 1, 1)).await.unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].category.as_ref().unwrap().name, "lending");
    }
}
