mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use common::TestHarness;
use lending_report::database::DatabaseManager;
use lending_report::test_utils::{create_test_plan, date};

#[tokio::test]
async fn test_upload_form() {
    let harness = TestHarness::new().await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/upload")
        .body(Body::empty())
        .unwrap();
    let (status, body) = harness.send(request).await;

    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("multipart/form-data"));
    assert!(html.contains("name=\"file\""));
}

#[tokio::test]
async fn test_upload_plans() {
    let harness = TestHarness::new().await;
    let sheet = "місяць плану,назва категорії плану,сума\n\
                 2021-10-01,lending,1000000\n\
                 2021-10-01,payments,500000\n\
                 2021-11-01,lending,1200000";

    let (status, json) = harness.upload("file", sheet).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["inserted"], 3);
    assert!(json["message"].is_string());
    assert_eq!(harness.server.database.plans().count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_duplicate_of_stored_plan_rejects_batch() {
    let harness = TestHarness::new().await;
    create_test_plan(
        harness.server.database.as_ref(),
        date(2021, 10, 1),
        "payments",
        100,
    )
    .await;

    let sheet = "plan_month,category_name,sum\n\
                 2021-10-01,lending,10\n\
                 2021-10-01,payments,20";
    let (status, json) = harness.upload("file", sheet).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "VALIDATION_FAILED");
    assert!(json["Error"].as_str().unwrap().contains("already exists"));
    assert_eq!(harness.server.database.plans().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_invalid_rows_reject_batch() {
    let harness = TestHarness::new().await;

    for sheet in [
        "plan_month,category_name,sum\n2021-10-01,lending,10\n2021-10-02,payments,20",
        "plan_month,category_name,sum\n2021-10-01,lending,10\n2021-11-01,payments,-1",
    ] {
        let (status, json) = harness.upload("file", sheet).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["Error"].as_str().unwrap().starts_with("Row 2:"));
    }

    assert_eq!(harness.server.database.plans().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let harness = TestHarness::new().await;

    let (status, json) = harness
        .upload("attachment", "plan_month,category_name,sum\n2021-10-01,lending,10")
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "PARSE_FAILED");
}

#[tokio::test]
async fn test_upload_xlsx_workbook() {
    let harness = TestHarness::new().await;
    let workbook = include_bytes!("fixtures/plans.xlsx");

    let (status, json) = harness
        .upload_file(
            "file",
            "plans.xlsx",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            workbook,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["inserted"], 2);
    let stored = harness
        .server
        .database
        .plans()
        .find_by_period(date(2021, 10, 1))
        .await
        .unwrap();
    let sums: Vec<i64> = stored.iter().map(|p| p.plan.sum).collect();
    assert_eq!(sums, vec![1_000_000, 500]);
}

#[tokio::test]
async fn test_unknown_category_names_sheet_row() {
    let harness = TestHarness::new().await;
    let sheet = "plan_month,category_name,sum\n\
                 2021-10-01,lending,10\n\
                 ,,\n\
                 2021-10-01,marketing,5";

    let (status, json) = harness.upload("file", sheet).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let message = json["Error"].as_str().unwrap();
    assert!(message.starts_with("Row 3:"), "{}", message);
    assert!(message.contains("marketing"), "{}", message);
    assert_eq!(harness.server.database.plans().count().await.unwrap(), 0);
}
