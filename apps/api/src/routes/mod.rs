pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::dashboard::handlers as dashboard;
use crate::events::handlers as events;
use crate::outreach::handlers as outreach;
use crate::reporters::handlers as reporters;
use crate::state::AppState;
use crate::themes::handlers as themes;
use crate::uploads::handlers as uploads;

/// Room for multipart framing on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_body_limit = state.config.upload_max_bytes() as usize + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/dashboard", get(dashboard::handle_dashboard))
        // Reporters
        .route(
            "/api/v1/reporters",
            get(reporters::handle_list_reporters).post(reporters::handle_create_reporter),
        )
        .route(
            "/api/v1/reporters/companies",
            get(reporters::handle_list_companies),
        )
        .route(
            "/api/v1/reporters/:id",
            get(reporters::handle_get_reporter)
                .patch(reporters::handle_update_reporter)
                .delete(reporters::handle_delete_reporter),
        )
        .route(
            "/api/v1/reporters/:id/articles",
            get(reporters::handle_list_articles).post(reporters::handle_create_article),
        )
        .route(
            "/api/v1/reporters/:id/contacts",
            get(reporters::handle_list_reporter_contacts).post(reporters::handle_create_contact),
        )
        .route(
            "/api/v1/reporters/:id/theme-matches",
            get(reporters::handle_theme_matches),
        )
        .route("/api/v1/contacts", get(reporters::handle_list_all_contacts))
        // Themes
        .route(
            "/api/v1/themes",
            get(themes::handle_list_themes).post(themes::handle_create_theme),
        )
        .route(
            "/api/v1/themes/:id",
            get(themes::handle_get_theme)
                .patch(themes::handle_update_theme)
                .delete(themes::handle_delete_theme),
        )
        // Events
        .route(
            "/api/v1/events",
            get(events::handle_list_events).post(events::handle_create_event),
        )
        .route(
            "/api/v1/events/:id",
            get(events::handle_get_event)
                .patch(events::handle_update_event)
                .delete(events::handle_delete_event),
        )
        .route(
            "/api/v1/events/:id/participants",
            get(events::handle_list_participants).post(events::handle_add_participant),
        )
        .route(
            "/api/v1/events/:id/participants/:participant_id",
            delete(events::handle_remove_participant),
        )
        // Uploads
        .route(
            "/api/v1/uploads",
            post(uploads::handle_upload).layer(DefaultBodyLimit::max(upload_body_limit)),
        )
        .route("/api/v1/uploads/:id", get(uploads::handle_get_upload))
        // Outreach (LLM)
        .route("/api/v1/outreach/analyze", post(outreach::handle_analyze))
        .route(
            "/api/v1/outreach/messages",
            post(outreach::handle_generate_message),
        )
        .route(
            "/api/v1/outreach/match-content",
            post(outreach::handle_match_content),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::LlmClient;
    use crate::store::{MemoryStore, Store};

    fn test_state() -> AppState {
        AppState {
            store: Arc::new(MemoryStore::seeded()),
            llm: LlmClient::new("test-key".to_string()),
            s3: None,
            config: Config::for_tests(),
        }
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        app.oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn first_reporter_id(state: &AppState) -> uuid::Uuid {
        state.store.list_reporters().await.unwrap()[0].id
    }

    fn multipart_request(filename: &str, content_type: &str, content: &[u8]) -> Request<Body> {
        let boundary = "reporterdeskboundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
        Request::builder()
            .method(Method::POST)
            .uri("/api/v1/uploads")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = send(build_router(test_state()), Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_reporters_paginates_and_lists_companies() {
        let app = build_router(test_state());
        let response = send(app, Method::GET, "/api/v1/reporters?limit=2&sort=name", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["items"].as_array().unwrap().len(), 2);
        assert_eq!(body["pagination"]["total"], 3);
        assert_eq!(body["pagination"]["has_next_page"], true);
        assert_eq!(body["companies"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_list_reporters_rejects_unknown_sort_key() {
        let app = build_router(test_state());
        let response = send(app, Method::GET, "/api/v1/reporters?sort=age", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_reporter_validates() {
        let app = build_router(test_state());
        let response = send(
            app,
            Method::POST,
            "/api/v1/reporters",
            Some(json!({"name": "鈴木 一郎", "company": "毎日新聞", "email": "broken"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_then_fetch_reporter() {
        let state = test_state();
        let response = send(
            build_router(state.clone()),
            Method::POST,
            "/api/v1/reporters",
            Some(json!({
                "name": "鈴木 一郎",
                "company": "毎日新聞",
                "email": "suzuki@mainichi.jp",
                "interests": ["ESG", "環境経営"]
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        let id = created["id"].as_str().unwrap().to_string();

        let response = send(
            build_router(state),
            Method::GET,
            &format!("/api/v1/reporters/{id}"),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let detail = json_body(response).await;
        assert_eq!(detail["reporter"]["name"], "鈴木 一郎");
        let matched = detail["matched_themes"].as_array().unwrap();
        assert_eq!(matched[0]["theme"]["title"], "サステナビリティ経営");
    }

    #[tokio::test]
    async fn test_unknown_reporter_is_404() {
        let app = build_router(test_state());
        let uri = format!("/api/v1/reporters/{}", uuid::Uuid::new_v4());
        let response = send(app, Method::GET, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_patch_and_delete_reporter() {
        let state = test_state();
        let id = first_reporter_id(&state).await;
        let uri = format!("/api/v1/reporters/{id}");

        let response = send(
            build_router(state.clone()),
            Method::PATCH,
            &uri,
            Some(json!({"position": "編集委員"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["position"], "編集委員");

        let response = send(build_router(state.clone()), Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let response = send(build_router(state), Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_log_contact_for_reporter() {
        let state = test_state();
        let id = first_reporter_id(&state).await;
        let response = send(
            build_router(state.clone()),
            Method::POST,
            &format!("/api/v1/reporters/{id}/contacts"),
            Some(json!({
                "date": "2024-12-01T00:00:00Z",
                "type": "phone",
                "subject": "PayFast 続報",
                "content": "導入事例について電話で説明",
                "outcome": "interested",
                "next_action_date": "2024-12-08T00:00:00Z"
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = send(build_router(state), Method::GET, "/api/v1/contacts", None).await;
        let contacts = json_body(response).await;
        assert_eq!(contacts.as_array().unwrap().len(), 4);
        assert_eq!(contacts[0]["subject"], "PayFast 続報");
    }

    #[tokio::test]
    async fn test_article_for_unknown_reporter_is_404() {
        let app = build_router(test_state());
        let uri = format!("/api/v1/reporters/{}/articles", uuid::Uuid::new_v4());
        let response = send(
            app,
            Method::POST,
            &uri,
            Some(json!({"title": "記事", "published_at": "2024-07-01T00:00:00Z"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_theme_matches_limit() {
        let state = test_state();
        let id = first_reporter_id(&state).await;
        let response = send(
            build_router(state),
            Method::GET,
            &format!("/api/v1/reporters/{id}/theme-matches?limit=1"),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(json_body(response).await.as_array().unwrap().len() <= 1);
    }

    #[tokio::test]
    async fn test_theme_list_filters_by_priority() {
        let app = build_router(test_state());
        let response = send(app, Method::GET, "/api/v1/themes?priority=high", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|t| t["priority"] == "high"));
    }

    #[tokio::test]
    async fn test_theme_detail_lists_matched_reporters() {
        let state = test_state();
        let theme = state.store.list_themes().await.unwrap()[0].clone();
        let response = send(
            build_router(state),
            Method::GET,
            &format!("/api/v1/themes/{}", theme.id),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["title"], theme.title.as_str());
        assert!(!body["matched_reporters"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_event_detail_reports_exposure_rate() {
        let state = test_state();
        let summit = state.store.list_events().await.unwrap()[0].clone();
        let response = send(
            build_router(state),
            Method::GET,
            &format!("/api/v1/events/{}", summit.id),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["participant_count"], 2);
        assert_eq!(body["exposure_rate"], 100);
        assert!(body["participants"][0]["reporter_name"].is_string());
    }

    #[tokio::test]
    async fn test_duplicate_participant_is_rejected() {
        let state = test_state();
        let participant = state.store.list_participants(None).await.unwrap()[0].clone();
        let response = send(
            build_router(state),
            Method::POST,
            &format!("/api/v1/events/{}/participants", participant.event_id),
            Some(json!({"reporter_id": participant.reporter_id})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_event_list_filters_by_type() {
        let app = build_router(test_state());
        let response = send(app, Method::GET, "/api/v1/events?type=seminar", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["items"].as_array().unwrap().len(), 2);
        assert_eq!(body["filters"]["types"], json!(["conference", "seminar"]));
    }

    #[tokio::test]
    async fn test_dashboard_totals() {
        let app = build_router(test_state());
        let response = send(app, Method::GET, "/api/v1/dashboard", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["total_reporters"], 3);
        assert_eq!(body["success_rate"], 67);
    }

    #[tokio::test]
    async fn test_upload_text_file_returns_theme_draft() {
        let state = test_state();
        let request = multipart_request(
            "launch-plan.txt",
            "text/plain",
            "sustainability report sustainability targets".as_bytes(),
        );
        let response = build_router(state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["theme_draft"]["title"], "launch-plan");
        assert_eq!(body["theme_draft"]["keywords"][0], "sustainability");
        assert!(body["upload"]["url"].is_null());

        let id = body["upload"]["id"].as_str().unwrap().to_string();
        let response = send(
            build_router(state),
            Method::GET,
            &format!("/api/v1/uploads/{id}"),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(json_body(response).await["size_label"].is_string());
    }

    #[tokio::test]
    async fn test_upload_rejects_unsupported_type() {
        let request = multipart_request("photo.png", "image/png", b"\x89PNG");
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_rejects_empty_file() {
        let request = multipart_request("empty.txt", "text/plain", b"");
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_match_content_requires_one_source() {
        let app = build_router(test_state());
        let response = send(
            app,
            Method::POST,
            "/api/v1/outreach/match-content",
            Some(json!({})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_unknown_reporter_is_404() {
        let app = build_router(test_state());
        let response = send(
            app,
            Method::POST,
            "/api/v1/outreach/analyze",
            Some(json!({"reporter_id": uuid::Uuid::new_v4()})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_endpoints_accept_max_page_number() {
        for path in ["/api/v1/reporters", "/api/v1/themes", "/api/v1/events"] {
            let app = build_router(test_state());
            let uri = format!("{path}?page={}&limit=1", u32::MAX);
            let response = send(app, Method::GET, &uri, None).await;
            assert_eq!(response.status(), StatusCode::OK, "{path}");
            let body = json_body(response).await;
            assert!(body["items"].as_array().unwrap().is_empty());
            assert_eq!(body["pagination"]["has_next_page"], false);
            assert!(body["pagination"]["next_page"].is_null());
        }
    }

    #[tokio::test]
    async fn test_toggle_flips_active_sort_and_is_echoed() {
        let app = build_router(test_state());
        let response = send(
            app,
            Method::GET,
            "/api/v1/reporters?sort=name&direction=asc&toggle=name",
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["sort"], json!({"sort": "name", "direction": "desc"}));

        let app = build_router(test_state());
        let response = send(
            app,
            Method::GET,
            "/api/v1/themes?sort=title&direction=desc&toggle=priority",
            None,
        )
        .await;
        let body = json_body(response).await;
        assert_eq!(body["sort"], json!({"sort": "priority", "direction": "asc"}));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_participant_adds_create_one() {
        let state = test_state();
        let event_id = state.store.list_events().await.unwrap()[2].id;
        let reporter_id = first_reporter_id(&state).await;
        let uri = format!("/api/v1/events/{event_id}/participants");

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let app = build_router(state.clone());
                let uri = uri.clone();
                tokio::spawn(async move {
                    send(app, Method::POST, &uri, Some(json!({"reporter_id": reporter_id})))
                        .await
                        .status()
                })
            })
            .collect();
        let mut statuses = Vec::new();
        for task in tasks {
            statuses.push(task.await.unwrap());
        }

        let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
        assert_eq!(created, 1);
        assert!(statuses
            .iter()
            .all(|s| *s == StatusCode::CREATED || *s == StatusCode::BAD_REQUEST));
        let rows = state.store.list_participants(Some(event_id)).await.unwrap();
        assert_eq!(rows.iter().filter(|p| p.reporter_id == reporter_id).count(), 1);
    }

    #[tokio::test]
    async fn test_upload_over_size_limit_is_rejected() {
        let state = test_state();
        let max = state.config.upload_max_bytes() as usize;
        let request = multipart_request("large.txt", "text/plain", &vec![b'a'; max + 1]);
        let response = build_router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("too large"));
    }

    #[tokio::test]
    async fn test_upload_at_size_limit_is_accepted() {
        let state = test_state();
        let max = state.config.upload_max_bytes() as usize;
        let request = multipart_request("limit.txt", "text/plain", &vec![b'a'; max]);
        let response = build_router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["upload"]["size"], max);
        assert_eq!(body["upload"]["size_label"], "1 MB");
    }
}
