mod common;

use axum::http::StatusCode;
use common::TestHarness;
use lending_report::reporting::Category;
use lending_report::test_utils::{
    create_test_credit, create_test_payment, create_test_plan, create_test_user, date,
};

#[tokio::test]
async fn test_plans_performance_lending() {
    let harness = TestHarness::new().await;
    let database = harness.server.database.as_ref();
    let user_id = create_test_user(database, "ivan").await;

    create_test_plan(database, date(2021, 10, 1), "lending", 1_000_000).await;
    create_test_credit(database, user_id, date(2021, 10, 2), 200_000, None).await;
    create_test_credit(database, user_id, date(2021, 10, 20), 50_000, None).await;
    create_test_credit(database, user_id, date(2021, 10, 21), 700_000, None).await;

    let (status, json) = harness
        .post_form("/plans_performance", "date=20.10.2021")
        .await;

    assert_eq!(status, StatusCode::OK);
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["period"], "2021-10-01");
    assert_eq!(rows[0]["category"], "lending");
    assert_eq!(rows[0]["sum"], 1_000_000);
    assert_eq!(rows[0]["amount_loans_issued"], 250_000);
    assert_eq!(rows[0]["success_rate"], 25.0);
}

#[tokio::test]
async fn test_plans_performance_payments() {
    let harness = TestHarness::new().await;
    let database = harness.server.database.as_ref();
    let user_id = create_test_user(database, "marta").await;
    let credit_id = create_test_credit(database, user_id, date(2021, 9, 1), 1000, None).await;

    create_test_plan(database, date(2021, 10, 1), "payments", 400).await;
    create_test_payment(database, credit_id, date(2021, 10, 5), 100.0, Category::Principal).await;
    create_test_payment(database, credit_id, date(2021, 10, 6), 50.0, Category::Interest).await;
    create_test_payment(database, credit_id, date(2021, 9, 30), 75.0, Category::Interest).await;

    let (status, json) = harness
        .post_form("/plans_performance", "date=31.10.2021")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["amount_of_payments"], 150.0);
    assert_eq!(json[0]["success_rate"], 37.5);
}

#[tokio::test]
async fn test_plans_performance_without_plans() {
    let harness = TestHarness::new().await;

    let (status, json) = harness
        .post_form("/plans_performance", "date=01.01.2021")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn test_plans_performance_bad_date() {
    let harness = TestHarness::new().await;

    let (status, json) = harness
        .post_form("/plans_performance", "date=2021-10-20")
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "PARSE_FAILED");
}

#[tokio::test]
async fn test_performance_requires_post() {
    let harness = TestHarness::new().await;

    for uri in ["/plans_performance", "/year_performance"] {
        let (status, json) = harness.get_json(uri).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(json["Error"], "must use POST");
        assert_eq!(json["code"], "METHOD_NOT_ALLOWED");
    }
}

#[tokio::test]
async fn test_year_performance() {
    let harness = TestHarness::new().await;
    let database = harness.server.database.as_ref();
    let user_id = create_test_user(database, "petro").await;

    create_test_plan(database, date(2021, 5, 1), "lending", 1000).await;
    create_test_plan(database, date(2021, 5, 1), "payments", 500).await;
    create_test_plan(database, date(2021, 8, 1), "lending", 3000).await;

    let may_credit = create_test_credit(database, user_id, date(2021, 5, 10), 500, None).await;
    create_test_credit(database, user_id, date(2021, 8, 31), 1500, None).await;
    create_test_payment(database, may_credit, date(2021, 5, 20), 500.0, Category::Principal).await;

    let (status, json) = harness.post_form("/year_performance", "year=2021").await;

    assert_eq!(status, StatusCode::OK);
    let months = json.as_array().unwrap();
    assert_eq!(months.len(), 2);

    assert_eq!(months[0]["month_year"], "Month: 5, year: 2021");
    let may = months[0]["category"].as_array().unwrap();
    assert_eq!(may.len(), 2);
    assert_eq!(may[0]["category"], "lending");
    assert_eq!(may[0]["number_of_lending"], 1);
    assert_eq!(may[0]["success_rate"], 50.0);
    assert_eq!(may[0]["month_to_year_percent"], 25.0);
    assert_eq!(may[1]["category"], "payments");
    assert_eq!(may[1]["period"], "2021-05-01");
    assert_eq!(may[1]["success_rate"], 100.0);
    assert_eq!(may[1]["month_to_year_percent"], 100.0);

    assert_eq!(months[1]["month_year"], "Month: 8, year: 2021");
    assert_eq!(months[1]["category"][0]["amount_loans_issued"], 1500);
    assert_eq!(months[1]["category"][0]["month_to_year_percent"], 75.0);
}

#[tokio::test]
async fn test_year_performance_bad_year() {
    let harness = TestHarness::new().await;

    let (status, json) = harness.post_form("/year_performance", "year=21").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "PARSE_FAILED");
}

#[tokio::test]
async fn test_plans_performance_multipart_form() {
    let harness = TestHarness::new().await;
    let database = harness.server.database.as_ref();
    let user_id = create_test_user(database, "olena").await;

    create_test_plan(database, date(2021, 10, 1), "lending", 1000).await;
    create_test_credit(database, user_id, date(2021, 10, 3), 250, None).await;

    let (status, json) = harness
        .post_multipart("/plans_performance", &[("date", "20.10.2021")])
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["amount_loans_issued"], 250);
    assert_eq!(json[0]["success_rate"], 25.0);
}

#[tokio::test]
async fn test_year_performance_multipart_form() {
    let harness = TestHarness::new().await;
    create_test_plan(harness.server.database.as_ref(), date(2021, 3, 1), "payments", 100).await;

    let (status, json) = harness
        .post_multipart("/year_performance", &[("note", "ignored"), ("year", "2021")])
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["month_year"], "Month: 3, year: 2021");
}

#[tokio::test]
async fn test_multipart_without_date_field() {
    let harness = TestHarness::new().await;

    let (status, json) = harness
        .post_multipart("/plans_performance", &[("year", "2021")])
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "PARSE_FAILED");
}

#[tokio::test]
async fn test_post_without_content_type() {
    let harness = TestHarness::new().await;

    let (status, json) = harness.post_raw("/year_performance", None, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "PARSE_FAILED");

    let (status, json) = harness
        .post_raw("/year_performance", None, "year=2021")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn test_unsupported_content_type_is_json_error() {
    let harness = TestHarness::new().await;

    let (status, json) = harness
        .post_raw(
            "/plans_performance",
            Some("application/json"),
            r#"{"date": "20.10.2021"}"#,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "PARSE_FAILED");
    assert!(json["Error"].is_string());
}
