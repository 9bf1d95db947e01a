//! `POST /api/priority/preview` against a clock pinned to 2024-06-01.
//!
//! The preview never touches storage, so a lazy pool is enough.

mod common;

use axum::http::StatusCode;
use common::{body_json, lazy_pool, post_json};
use serde_json::json;

async fn preview(body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let app = common::build_test_app(lazy_pool());
    let response = post_json(app, "/api/priority/preview", body).await;
    let status = response.status();
    (status, body_json(response).await)
}

#[tokio::test]
async fn deadline_in_three_days_is_forced_high() {
    let (status, json) = preview(json!({"submissionDate": "2024-06-04", "priority": "Low"})).await;

    assert_eq!(status, StatusCode::OK);
    let data = &json["data"];
    assert_eq!(data["submissionDate"], "2024-06-04");
    assert_eq!(data["daysUntil"], 3);
    assert_eq!(data["daysLabel"], "3 days remaining");
    assert_eq!(data["suggestedPriority"], "High");
    assert_eq!(data["priorityEditable"], false);
    assert_eq!(data["effectivePriority"], "High");
}

#[tokio::test]
async fn seven_days_out_is_still_locked() {
    let (_, json) = preview(json!({"submissionDate": "2024-06-08", "priority": "Medium"})).await;

    assert_eq!(json["data"]["daysUntil"], 7);
    assert_eq!(json["data"]["priorityEditable"], false);
    assert_eq!(json["data"]["effectivePriority"], "High");
}

#[tokio::test]
async fn eight_days_out_honours_the_choice() {
    let (_, json) = preview(json!({"submissionDate": "2024-06-09", "priority": "Low"})).await;

    let data = &json["data"];
    assert_eq!(data["daysUntil"], 8);
    assert_eq!(data["suggestedPriority"], "Medium");
    assert_eq!(data["priorityEditable"], true);
    assert_eq!(data["effectivePriority"], "Low");
}

#[tokio::test]
async fn missing_priority_defaults_to_medium() {
    let (_, json) = preview(json!({"submissionDate": "2024-07-01"})).await;

    assert_eq!(json["data"]["suggestedPriority"], "Low");
    assert_eq!(json["data"]["effectivePriority"], "Medium");
}

#[tokio::test]
async fn overdue_and_due_today_labels() {
    let (_, overdue) = preview(json!({"submissionDate": "2024-05-30"})).await;
    assert_eq!(overdue["data"]["daysUntil"], -2);
    assert_eq!(overdue["data"]["daysLabel"], "2 days overdue");
    assert_eq!(overdue["data"]["effectivePriority"], "High");

    let (_, today) = preview(json!({"submissionDate": "2024-06-01"})).await;
    assert_eq!(today["data"]["daysLabel"], "Due today");

    let (_, tomorrow) = preview(json!({"submissionDate": "2024-06-02"})).await;
    assert_eq!(tomorrow["data"]["daysLabel"], "1 day remaining");
}

#[tokio::test]
async fn timestamp_input_uses_its_calendar_date() {
    let (status, json) = preview(json!({"submissionDate": "2024-06-10T23:30:00Z"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["submissionDate"], "2024-06-10");
    assert_eq!(json["data"]["daysUntil"], 9);
}

#[tokio::test]
async fn malformed_date_is_rejected() {
    let (status, json) = preview(json!({"submissionDate": "next friday"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_DATE");
}

#[tokio::test]
async fn unknown_priority_is_rejected_by_the_extractor() {
    let app = common::build_test_app(lazy_pool());
    let response = post_json(
        app,
        "/api/priority/preview",
        json!({"submissionDate": "2024-07-01", "priority": "Urgent"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
