use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;

fn json_request(method: &str, uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

fn submit_payload(scores: [u8; 9]) -> Value {
    let responses: Vec<Value> = crate::assessments::AssessmentType::Phq9
        .expected_ids()
        .zip(scores)
        .map(|(id, score)| json!({ "question_id": id, "score": score }))
        .collect();
    json!({
        "user_id": 7,
        "assessment_type": "phq9",
        "responses": responses,
    })
}

#[tokio::test]
async fn submitting_a_questionnaire_returns_the_scored_view() {
    let (service, _, _) = build_service();
    let app = router_with_service(service);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/assessments",
            submit_payload([1, 2, 1, 2, 1, 2, 1, 2, 0]),
        ))
        .await
        .expect("handler responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["user_id"], 7);
    assert_eq!(body["assessment_type"], "phq9");
    assert_eq!(body["total_score"], 12);
    assert_eq!(body["severity_level"], "moderate_depression");
    assert_eq!(body["triggered_by"], "manual");
    // raw item answers are not echoed back
    assert!(body.get("responses").is_none());
}

#[tokio::test]
async fn incomplete_submissions_are_rejected_with_details() {
    let (service, _, _) = build_service();
    let app = router_with_service(service);

    let mut payload = submit_payload([1; 9]);
    payload["responses"]
        .as_array_mut()
        .expect("responses array")
        .remove(8);

    let response = app
        .oneshot(json_request("POST", "/api/v1/assessments", payload))
        .await
        .expect("handler responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("phq9_q9"));
}

#[tokio::test]
async fn triage_reports_a_route_and_per_candidate_decisions() {
    let (service, _, _) = build_service();
    let app = router_with_service(service);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/triage",
            json!({ "user_id": 7, "message": "I feel worthless and keep overthinking" }),
        ))
        .await
        .expect("handler responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let decisions = body["decisions"].as_array().expect("decisions array");
    assert_eq!(decisions.len(), 2);
    assert_eq!(decisions[0]["assessment_type"], "phq9");
    assert_eq!(decisions[0]["reason"], "depressive_symptoms_detected");
    assert_eq!(decisions[0]["triggered"], true);
    assert_eq!(decisions[0]["rule"], "assessment_due");
    assert_eq!(decisions[1]["assessment_type"], "gad7");
    assert!(body["route"].is_string());
}

#[tokio::test]
async fn history_endpoint_honours_the_limit_parameter() {
    let (service, _, _) = build_service();
    for _ in 0..3 {
        service
            .submit(
                7,
                crate::assessments::AssessmentType::Gad7,
                "manual",
                gad7_responses([0; 7]),
            )
            .expect("submission stored");
    }
    let app = router_with_service(service);

    let response = app
        .oneshot(get_request("/api/v1/assessments/7?limit=2"))
        .await
        .expect("handler responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body.as_array().expect("record views").len(), 2);
}

#[tokio::test]
async fn due_endpoint_lists_outstanding_instruments() {
    let (service, _, _) = build_service();
    service
        .submit(
            7,
            crate::assessments::AssessmentType::Phq9,
            "manual",
            phq9_responses([0; 9]),
        )
        .expect("submission stored");
    let app = router_with_service(service);

    let response = app
        .oneshot(get_request("/api/v1/assessments/7/due"))
        .await
        .expect("handler responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["due"], json!(["gad7", "columbia"]));
}

#[tokio::test]
async fn summary_endpoint_reports_the_roll_up() {
    let (service, _, _) = build_service();
    service
        .submit(
            7,
            crate::assessments::AssessmentType::Columbia,
            "manual",
            columbia_responses(&["cssrs_q1"]),
        )
        .expect("submission stored");
    let app = router_with_service(service);

    let response = app
        .oneshot(get_request("/api/v1/assessments/7/summary"))
        .await
        .expect("handler responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["severity_levels"]["columbia"], "low_suicide_risk");
    assert_eq!(body["overall_risk"], "mild");
}

#[tokio::test]
async fn questionnaire_endpoint_serves_the_item_catalog() {
    let (service, _, _) = build_service();
    let app = router_with_service(service);

    let response = app
        .oneshot(get_request("/api/v1/questionnaires/phq-9"))
        .await
        .expect("handler responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["assessment_type"], "phq9");
    assert_eq!(body["questions"].as_array().expect("questions").len(), 9);
}

#[tokio::test]
async fn unknown_questionnaires_are_not_found() {
    let (service, _, _) = build_service();
    let app = router_with_service(service);

    let response = app
        .oneshot(get_request("/api/v1/questionnaires/phq15"))
        .await
        .expect("handler responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
