// ABOUTME: Integration tests for exercise add and log query endpoints
// ABOUTME: Covers date defaulting, range filtering, limit slicing, and error paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0

mod common;

use axum::http::StatusCode;
use common::{add_exercise, create_test_app, get, register_user, response_json};

#[tokio::test]
async fn test_add_then_query_round_trip() {
    let app = create_test_app().await.unwrap();
    let user_id = register_user(&app, "runner").await;

    let response = add_exercise(&app, &user_id, "morning run", "30", Some("2024-05-01")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let added = response_json(response).await;
    assert_eq!(added["username"], "runner");
    assert_eq!(added["description"], "morning run");
    assert_eq!(added["duration"], 30.0);
    assert_eq!(added["date"], "2024-05-01");
    assert_eq!(added["id"], user_id);

    let log = response_json(get(&app, &format!("/api/exercise/log?userId={user_id}")).await).await;
    assert_eq!(log["id"], user_id);
    assert_eq!(log["username"], "runner");
    assert_eq!(log["count"], 1);
    assert_eq!(log["log"][0]["description"], "morning run");
    assert_eq!(log["log"][0]["duration"], 30.0);
    assert_eq!(log["log"][0]["date"], "2024-05-01");
}

#[tokio::test]
async fn test_omitted_date_defaults_to_today() {
    let app = create_test_app().await.unwrap();
    let user_id = register_user(&app, "walker").await;

    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();

    let added = response_json(add_exercise(&app, &user_id, "walk", "15", None).await).await;
    assert_eq!(added["date"], today);

    // Stored as a calendar date string, not a timestamp
    let log = response_json(get(&app, &format!("/api/exercise/log?userId={user_id}")).await).await;
    assert_eq!(log["log"][0]["date"], today);
}

#[tokio::test]
async fn test_malformed_date_falls_back_to_today() {
    let app = create_test_app().await.unwrap();
    let user_id = register_user(&app, "cyclist").await;

    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();

    let response = add_exercise(&app, &user_id, "ride", "45", Some("not-a-date")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let added = response_json(response).await;
    assert_eq!(added["date"], today);
}

#[tokio::test]
async fn test_date_range_filter() {
    let app = create_test_app().await.unwrap();
    let user_id = register_user(&app, "swimmer").await;

    for date in ["2020-01-01", "2020-02-01", "2020-03-01"] {
        let response = add_exercise(&app, &user_id, "swim", "20", Some(date)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let log = response_json(
        get(
            &app,
            &format!("/api/exercise/log?userId={user_id}&from=2020-01-15&to=2020-02-15"),
        )
        .await,
    )
    .await;

    assert_eq!(log["count"], 1);
    assert_eq!(log["log"].as_array().unwrap().len(), 1);
    assert_eq!(log["log"][0]["date"], "2020-02-01");
}

#[tokio::test]
async fn test_unparseable_range_bounds_are_ignored() {
    let app = create_test_app().await.unwrap();
    let user_id = register_user(&app, "rower").await;

    add_exercise(&app, &user_id, "row", "10", Some("2020-01-01")).await;

    let log = response_json(
        get(
            &app,
            &format!("/api/exercise/log?userId={user_id}&from=garbage&to=alsogarbage"),
        )
        .await,
    )
    .await;

    assert_eq!(log["count"], 1);
}

#[tokio::test]
async fn test_limit_slices_in_submission_order() {
    let app = create_test_app().await.unwrap();
    let user_id = register_user(&app, "lifter").await;

    for (i, date) in ["2020-01-01", "2020-01-02", "2020-01-03", "2020-01-04", "2020-01-05"]
        .iter()
        .enumerate()
    {
        let description = format!("set {i}");
        let response = add_exercise(&app, &user_id, &description, "5", Some(date)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let log =
        response_json(get(&app, &format!("/api/exercise/log?userId={user_id}&limit=2")).await)
            .await;

    assert_eq!(log["count"], 2);
    assert_eq!(log["log"][0]["description"], "set 0");
    assert_eq!(log["log"][1]["description"], "set 1");
}

#[tokio::test]
async fn test_limit_applies_before_date_filter() {
    let app = create_test_app().await.unwrap();
    let user_id = register_user(&app, "hiker").await;

    for date in ["2020-01-01", "2020-01-02", "2020-01-03", "2020-01-04", "2020-01-05"] {
        add_exercise(&app, &user_id, "hike", "60", Some(date)).await;
    }

    // Slice to the first three entries, then filter out the first; the
    // fourth and fifth entries never enter the result.
    let log = response_json(
        get(
            &app,
            &format!("/api/exercise/log?userId={user_id}&limit=3&from=2020-01-02"),
        )
        .await,
    )
    .await;

    assert_eq!(log["count"], 2);
    assert_eq!(log["log"][0]["date"], "2020-01-02");
    assert_eq!(log["log"][1]["date"], "2020-01-03");
}

#[tokio::test]
async fn test_add_unknown_user_is_not_found_and_mutates_nothing() {
    let app = create_test_app().await.unwrap();

    let response = add_exercise(&app, "nosuchid", "run", "30", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = response_json(response).await;
    assert_eq!(json["error"]["code"], "RESOURCE_NOT_FOUND");

    // The aborted add never created a log record
    let log_response = get(&app, "/api/exercise/log?userId=nosuchid").await;
    assert_eq!(log_response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_query_unknown_user_is_not_found() {
    let app = create_test_app().await.unwrap();

    let response = get(&app, "/api/exercise/log?userId=nosuchid").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = response_json(response).await;
    assert_eq!(json["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_query_missing_user_id_is_validation_error() {
    let app = create_test_app().await.unwrap();

    let response = get(&app, "/api/exercise/log").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    assert_eq!(json["error"]["code"], "MISSING_REQUIRED_FIELD");
    assert!(json["error"]["message"].as_str().unwrap().contains("userId"));
}

#[tokio::test]
async fn test_add_missing_fields_name_first_offender() {
    let app = create_test_app().await.unwrap();
    let user_id = register_user(&app, "jumper").await;

    let response = common::post_form(&app, "/api/exercise/add", &[("userId", &user_id)]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("description"));
}

#[tokio::test]
async fn test_non_numeric_duration_is_format_error() {
    let app = create_test_app().await.unwrap();
    let user_id = register_user(&app, "skater").await;

    let response = add_exercise(&app, &user_id, "skate", "thirty", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    assert_eq!(json["error"]["code"], "INVALID_FORMAT");
    assert!(json["error"]["message"].as_str().unwrap().contains("duration"));
}

#[tokio::test]
async fn test_malformed_limit_is_format_error() {
    let app = create_test_app().await.unwrap();
    let user_id = register_user(&app, "boxer").await;
    add_exercise(&app, &user_id, "spar", "12", None).await;

    let response = get(&app, &format!("/api/exercise/log?userId={user_id}&limit=abc")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    assert_eq!(json["error"]["code"], "INVALID_FORMAT");
}

#[tokio::test]
async fn test_username_refreshed_on_append() {
    let app = create_test_app().await.unwrap();
    let user_id = register_user(&app, "steady").await;

    add_exercise(&app, &user_id, "first", "10", Some("2021-01-01")).await;
    add_exercise(&app, &user_id, "second", "10", Some("2021-01-02")).await;

    let log = response_json(get(&app, &format!("/api/exercise/log?userId={user_id}")).await).await;
    assert_eq!(log["username"], "steady");
    assert_eq!(log["count"], 2);
}

#[tokio::test]
async fn test_health_and_readiness_endpoints() {
    let app = create_test_app().await.unwrap();

    let health = get(&app, "/health").await;
    assert_eq!(health.status(), StatusCode::OK);
    let json = response_json(health).await;
    assert_eq!(json["status"], "healthy");

    let ready = get(&app, "/ready").await;
    assert_eq!(ready.status(), StatusCode::OK);
    let json = response_json(ready).await;
    assert_eq!(json["status"], "ready");
    assert_eq!(json["database"], true);
}
