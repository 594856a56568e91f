mod common;

use axum::http::StatusCode;
use chrono::{Duration, Local};
use common::TestHarness;
use lending_report::reporting::Category;
use lending_report::test_utils::{
    create_test_credit, create_test_payment, create_test_user, date,
};

#[tokio::test]
async fn test_user_credits_report() {
    let harness = TestHarness::new().await;
    let database = harness.server.database.as_ref();

    let user_id = create_test_user(database, "olena").await;
    let closed =
        create_test_credit(database, user_id, date(2020, 1, 10), 5000, Some(date(2020, 4, 1))).await;
    let issued = Local::now().date_naive() - Duration::days(30);
    let open = create_test_credit(database, user_id, issued, 2000, None).await;

    create_test_payment(database, closed, date(2020, 2, 1), 2500.25, Category::Principal).await;
    create_test_payment(database, closed, date(2020, 3, 1), 2600.0, Category::Interest).await;
    create_test_payment(database, open, issued, 100.0, Category::Principal).await;
    create_test_payment(database, open, issued, 12.5, Category::Interest).await;
    create_test_payment(database, open, issued, 999.0, Category::LendingPlan).await;

    let (status, json) = harness
        .get_json(&format!("/user_credits/{}", user_id))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["user_login"], "olena");

    let credits = json["credits"].as_array().unwrap();
    assert_eq!(credits.len(), 2);

    assert_eq!(credits[0]["close"], true);
    assert_eq!(credits[0]["return_date"], "2020-04-01");
    assert_eq!(credits[0]["sum_payment"], 5100.3);
    assert!(credits[0].get("days_loan_overdue").is_none());

    assert_eq!(credits[1]["close"], false);
    assert_eq!(credits[1]["body"], 2000);
    assert_eq!(credits[1]["days_loan_overdue"], -60);
    assert_eq!(credits[1]["body_payments_sum"], 100.0);
    assert_eq!(credits[1]["percent_payments_sum"], 12.5);
}

#[tokio::test]
async fn test_user_without_credits() {
    let harness = TestHarness::new().await;
    let user_id = create_test_user(harness.server.database.as_ref(), "taras").await;

    let (status, json) = harness
        .get_json(&format!("/user_credits/{}", user_id))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["credits"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_unknown_user() {
    let harness = TestHarness::new().await;

    let (status, json) = harness.get_json("/user_credits/404").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["Error"], "User 404 not found");
}

#[tokio::test]
async fn test_non_numeric_user_id() {
    let harness = TestHarness::new().await;

    let (status, json) = harness.get_json("/user_credits/abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "PARSE_FAILED");
}
