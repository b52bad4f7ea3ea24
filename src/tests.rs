//! End-to-end tests driving the full router against an in-memory database.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use diesel::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::schema::user_question_flags;
use crate::test_support::{seed_question, test_state};
use crate::{app, AppState};

struct TestApp {
    router: Router,
    state: AppState,
}

impl TestApp {
    fn new() -> Self {
        let state = test_state();
        Self {
            router: app(state.clone()),
            state,
        }
    }

    fn with_questions(answers: &[(i32, &str)]) -> Self {
        let test_app = Self::new();
        {
            let mut conn = test_app.state.pool.get().unwrap();
            for (question_id, answer) in answers {
                seed_question(&mut conn, *question_id, answer);
            }
        }
        test_app
    }

    fn flag_rows(&self) -> i64 {
        let mut conn = self.state.pool.get().unwrap();
        user_question_flags::table
            .count()
            .get_result(&mut conn)
            .unwrap()
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value, Option<String>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body, set_cookie)
    }

    async fn send_raw(&self, method: &str, uri: &str, cookie: &str, body: &str) -> StatusCode {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, cookie)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap().status()
    }

    /// Registers a fresh account and returns its session cookie.
    async fn login_as(&self, email: &str) -> String {
        let (status, _, cookie) = self
            .send(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({"email": email, "password": "correct horse"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        cookie.expect("register sets a session cookie")
    }

    async fn answer(&self, cookie: &str, question_id: i32, answer: &str) -> Value {
        let (status, body, _) = self
            .send(
                "POST",
                "/api/attempts",
                Some(cookie),
                Some(json!({"question_id": question_id, "user_answer": answer})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }
}

#[tokio::test]
async fn flags_require_a_session() {
    let test_app = TestApp::with_questions(&[(1, "A")]);

    let (status, body, _) = test_app
        .send("GET", "/api/wrong-note/flags", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "로그인이 필요합니다.");

    let (status, _, _) = test_app
        .send(
            "PUT",
            "/api/wrong-note/flags/1",
            None,
            Some(json!({"is_bookmarked": true})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(test_app.flag_rows(), 0);
}

#[tokio::test]
async fn fresh_user_has_no_flags() {
    let test_app = TestApp::with_questions(&[(1, "A")]);
    let cookie = test_app.login_as("fresh@example.com").await;

    let (status, body, _) = test_app
        .send("GET", "/api/wrong-note/flags", Some(&cookie), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"flags": {}}));

    let (status, body, _) = test_app
        .send("GET", "/api/wrong-note/flags/1", Some(&cookie), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"question_id": 1, "is_bookmarked": false, "is_important": false, "memo": ""})
    );
}

#[tokio::test]
async fn separate_patches_accumulate_on_one_row() {
    let test_app = TestApp::with_questions(&[(1, "A"), (2, "B")]);
    let cookie = test_app.login_as("flags@example.com").await;

    let (status, body, _) = test_app
        .send(
            "PUT",
            "/api/wrong-note/flags/1",
            Some(&cookie),
            Some(json!({"is_bookmarked": true})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_important"], false);

    let (_, body, _) = test_app
        .send(
            "PUT",
            "/api/wrong-note/flags/1",
            Some(&cookie),
            Some(json!({"is_important": true, "memo": "공식 다시 보기"})),
        )
        .await;
    assert_eq!(body["is_bookmarked"], true);
    assert_eq!(body["is_important"], true);

    let (_, body, _) = test_app
        .send("GET", "/api/wrong-note/flags", Some(&cookie), None)
        .await;
    assert_eq!(
        body,
        json!({"flags": {"1": {"is_bookmarked": true, "is_important": true}}})
    );

    let (_, body, _) = test_app
        .send(
            "GET",
            "/api/wrong-note/bookmarks?kind=bookmarked",
            Some(&cookie),
            None,
        )
        .await;
    assert_eq!(body, json!({"question_ids": [1]}));
}

#[tokio::test]
async fn malformed_patch_leaves_row_untouched() {
    let test_app = TestApp::with_questions(&[(1, "A")]);
    let cookie = test_app.login_as("bad@example.com").await;

    test_app
        .send(
            "PUT",
            "/api/wrong-note/flags/1",
            Some(&cookie),
            Some(json!({"is_bookmarked": true})),
        )
        .await;

    let status = test_app
        .send_raw(
            "PUT",
            "/api/wrong-note/flags/1",
            &cookie,
            r#"{"is_bookmarked": "no"}"#,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = test_app
        .send("PUT", "/api/wrong-note/flags/1", Some(&cookie), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body, _) = test_app
        .send("GET", "/api/wrong-note/flags/1", Some(&cookie), None)
        .await;
    assert_eq!(body["is_bookmarked"], true);
}

#[tokio::test]
async fn flagging_unknown_question_is_not_found() {
    let test_app = TestApp::new();
    let cookie = test_app.login_as("missing@example.com").await;

    let (status, body, _) = test_app
        .send(
            "PUT",
            "/api/wrong-note/flags/99",
            Some(&cookie),
            Some(json!({"is_important": true})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(test_app.flag_rows(), 0);
}

#[tokio::test]
async fn review_lists_questions_at_or_above_threshold() {
    let test_app = TestApp::with_questions(&[(1, "A"), (2, "B")]);
    let cookie = test_app.login_as("review@example.com").await;

    let first = test_app.answer(&cookie, 1, "C").await;
    assert_eq!(first["is_correct"], false);
    test_app.answer(&cookie, 1, "D").await;
    let correct = test_app.answer(&cookie, 1, " A ").await;
    assert_eq!(correct["is_correct"], true);

    test_app.answer(&cookie, 2, "X").await;
    test_app.answer(&cookie, 2, "Y").await;
    test_app.answer(&cookie, 2, "Z").await;

    let (status, body, _) = test_app
        .send("GET", "/api/wrong-note/review?threshold=3", Some(&cookie), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let review = body["review"].as_array().unwrap();
    assert_eq!(review.len(), 1);
    assert_eq!(review[0]["question_id"], 2);
    assert_eq!(review[0]["wrong_count"], 3);
    assert_eq!(review[0]["user_answer"], "Z");
    assert_eq!(review[0]["correct_answer"], "B");
    assert_eq!(review[0]["explanation"], "Explanation 2");

    let (_, body, _) = test_app
        .send("GET", "/api/wrong-note/review?threshold=2", Some(&cookie), None)
        .await;
    let ids: Vec<i64> = body["review"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["question_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn review_without_attempts_is_empty() {
    let test_app = TestApp::new();
    let cookie = test_app.login_as("empty@example.com").await;

    let (status, body, _) = test_app
        .send("GET", "/api/wrong-note/review", Some(&cookie), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"review": []}));
}

#[tokio::test]
async fn review_rejects_zero_threshold_and_anonymous_callers() {
    let test_app = TestApp::new();

    let (status, _, _) = test_app
        .send("GET", "/api/wrong-note/review", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let cookie = test_app.login_as("zero@example.com").await;
    let (status, _, _) = test_app
        .send("GET", "/api/wrong-note/review?threshold=0", Some(&cookie), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_and_logout_control_access() {
    let test_app = TestApp::new();
    test_app.login_as("cycle@example.com").await;

    let (status, _, _) = test_app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "cycle@example.com", "password": "wrong password"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, cookie) = test_app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "cycle@example.com", "password": "correct horse"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let cookie = cookie.unwrap();

    let (status, _, _) = test_app
        .send("GET", "/api/wrong-note/flags", Some(&cookie), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = test_app
        .send("POST", "/api/auth/logout", Some(&cookie), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = test_app
        .send("GET", "/api/wrong-note/flags", Some(&cookie), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let test_app = TestApp::new();
    test_app.login_as("twice@example.com").await;

    let (status, _, _) = test_app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({"email": "twice@example.com", "password": "another pass"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn question_view_hides_the_answer() {
    let test_app = TestApp::with_questions(&[(5, "E")]);

    let (status, body, _) = test_app.send("GET", "/api/questions/5", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"question_id": 5, "text": "Question 5"}));

    let (status, _, _) = test_app.send("GET", "/api/questions/6", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_query_and_path_return_json_validation_errors() {
    let test_app = TestApp::with_questions(&[(1, "A")]);
    let cookie = test_app.login_as("params@example.com").await;

    for uri in [
        "/api/wrong-note/review?threshold=-1",
        "/api/wrong-note/bookmarks?kind=starred",
        "/api/wrong-note/flags/abc",
        "/api/questions/abc",
    ] {
        let (status, body, _) = test_app.send("GET", uri, Some(&cookie), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "validation_error", "{uri}");
        assert_eq!(body["status"], 400, "{uri}");
    }

    let (status, body, _) = test_app
        .send(
            "PUT",
            "/api/wrong-note/flags/abc",
            Some(&cookie),
            Some(json!({"is_bookmarked": true})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(test_app.flag_rows(), 0);
}

#[tokio::test]
async fn body_transport_problems_keep_their_status() {
    let test_app = TestApp::with_questions(&[(1, "A")]);
    let cookie = test_app.login_as("transport@example.com").await;

    let request = Request::builder()
        .method("PUT")
        .uri("/api/wrong-note/flags/1")
        .header(header::COOKIE, &cookie)
        .body(Body::from(r#"{"is_bookmarked": true}"#))
        .unwrap();
    let response = test_app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "request_rejected");

    let oversized = json!({"memo": "a".repeat(70_000)}).to_string();
    let status = test_app
        .send_raw("PUT", "/api/wrong-note/flags/1", &cookie, &oversized)
        .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(test_app.flag_rows(), 0);
}

#[tokio::test]
async fn missing_session_layer_is_an_internal_error() {
    let router = Router::new()
        .route(
            "/flags",
            axum::routing::get(crate::handlers::wrong_note::flags::list_flags),
        )
        .with_state(test_state());

    let response = router
        .oneshot(Request::builder().uri("/flags").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "internal_error");
}

#[tokio::test]
async fn unknown_email_and_wrong_password_look_the_same() {
    let test_app = TestApp::new();
    test_app.login_as("known@example.com").await;

    let (unknown_status, unknown_body, _) = test_app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "nobody@example.com", "password": "correct horse"})),
        )
        .await;
    let (wrong_status, wrong_body, _) = test_app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "known@example.com", "password": "wrong password"})),
        )
        .await;

    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, wrong_status);
    assert_eq!(unknown_body, wrong_body);
}

#[test]
fn dummy_hash_is_a_real_hash_that_never_matches() {
    let state = test_state();
    let matched = crate::data::repositories::UserRepository::verify_password(
        &state.dummy_password_hash,
        "correct horse",
    )
    .unwrap();
    assert!(!matched);
}
