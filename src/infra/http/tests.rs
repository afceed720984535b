use std::time::Duration;

use clubsite_api_types::{ForumPostCreateRequest, LoginRequest};
use httpmock::MockServer;
use serde_json::json;

use super::*;
use crate::application::ports::{AuthApi, BlogApi, ForumApi, MaintenanceApi, ResourceApi};
use crate::config::normalize_base_url;
use crate::domain::forum::CategoryFilter;
use crate::domain::schema::{EditBuffer, FieldValue};

fn client(server: &MockServer) -> RestClient {
    let settings = ApiSettings {
        base_url: normalize_base_url(&server.url("/api")).expect("base url"),
        timeout: Duration::from_secs(5),
    };
    RestClient::new(&settings).expect("client")
}

#[tokio::test]
async fn resource_list_keeps_server_order() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET").path("/api/achievements");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"[{"id": 9, "title": "Nationals"}, {"id": 3, "title": "Regionals"}]"#);
    });

    let items = client(&server)
        .resource(ResourceKind::Achievements)
        .list()
        .await
        .expect("list");
    mock.assert();
    let ids: Vec<_> = items.iter().map(|item| item.id).collect();
    assert_eq!(ids, [9, 3]);
}

#[tokio::test]
async fn admin_blog_list_asks_for_drafts_and_public_for_published() {
    let server = MockServer::start();
    let drafts = server.mock(|when, then| {
        when.method("GET")
            .path("/api/blog")
            .query_param("published", "false");
        then.status(200).body("[]");
    });
    let published = server.mock(|when, then| {
        when.method("GET")
            .path("/api/blog")
            .query_param("published", "true");
        then.status(200).body("[]");
    });

    let rest = client(&server);
    rest.resource(ResourceKind::Blog).list().await.expect("admin list");
    BlogApi::list_posts(&rest, true).await.expect("public list");
    drafts.assert();
    published.assert();
}

#[tokio::test]
async fn update_sends_buffer_as_json() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("PUT")
            .path("/api/workshops/4")
            .json_body(json!({"title": "ROS", "order": 2}));
        then.status(200).body(r#"{"id": 4, "title": "ROS", "order": 2}"#);
    });

    let buffer: EditBuffer = [
        ("title", FieldValue::text("ROS")),
        ("order", FieldValue::from(2)),
    ]
    .into_iter()
    .collect();
    client(&server)
        .resource(ResourceKind::Workshops)
        .update(4, &buffer)
        .await
        .expect("update");
    mock.assert();
}

#[tokio::test]
async fn status_codes_map_to_api_errors() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/forum/posts/404");
        then.status(404).body("<h1>Not Found</h1>");
    });
    server.mock(|when, then| {
        when.method("DELETE").path("/api/alumni/1");
        then.status(401).body("unauthorized");
    });

    let rest = client(&server);
    assert_eq!(
        ForumApi::get_post(&rest, 404).await,
        Err(ApiError::NotFound)
    );
    let err = rest
        .resource(ResourceKind::Alumni)
        .delete(1)
        .await
        .expect_err("rejected");
    assert_eq!(err, ApiError::rejected(401, "unauthorized"));
}

#[tokio::test]
async fn unreachable_backend_is_transport_failure() {
    let settings = ApiSettings {
        base_url: normalize_base_url("http://127.0.0.1:9/api").expect("url"),
        timeout: Duration::from_secs(2),
    };
    let rest = RestClient::new(&settings).expect("client");
    let err = rest.seed().await.expect_err("nothing listens on port 9");
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn malformed_body_is_decode_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/forum/categories");
        then.status(200).body("not json");
    });
    let err = client(&server)
        .list_categories()
        .await
        .expect_err("decode");
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn category_filter_controls_query() {
    let server = MockServer::start();
    let filtered = server.mock(|when, then| {
        when.method("GET")
            .path("/api/forum/posts")
            .query_param("category_id", "2");
        then.status(200).body("[]");
    });
    let unfiltered = server.mock(|when, then| {
        when.method("GET")
            .path("/api/forum/posts")
            .query_param_missing("category_id");
        then.status(200).body(
            r#"[{"id": 1, "title": "t", "content": "c", "author_name": "a", "category_id": null, "category_name": null, "reply_count": 2, "created_at": "2024-03-01T10:00:00"}]"#,
        );
    });

    let rest = client(&server);
    ForumApi::list_posts(&rest, CategoryFilter::Only(2))
        .await
        .expect("filtered");
    let posts = ForumApi::list_posts(&rest, CategoryFilter::All)
        .await
        .expect("all");
    filtered.assert();
    unfiltered.assert();
    assert_eq!(posts[0].reply_count, 2);
}

#[tokio::test]
async fn create_post_omits_blank_optionals() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST")
            .path("/api/forum/posts")
            .json_body(json!({"title": "t", "content": "c", "author_name": "a"}));
        then.status(201).body("{}");
    });
    client(&server)
        .create_post(&ForumPostCreateRequest {
            title: "t".into(),
            content: "c".into(),
            author_name: "a".into(),
            author_email: None,
            category_id: None,
        })
        .await
        .expect("created");
    mock.assert();
}

#[tokio::test]
async fn login_cookie_rides_along_on_later_calls() {
    let server = MockServer::start();
    let login = server.mock(|when, then| {
        when.method("POST")
            .path("/api/auth/login")
            .json_body(json!({"username": "admin", "password": "pw"}));
        then.status(200)
            .header("set-cookie", "session=abc123; Path=/; HttpOnly")
            .body(r#"{"success": true, "message": "Logged in successfully"}"#);
    });
    let check = server.mock(|when, then| {
        when.method("GET")
            .path("/api/auth/check")
            .header("cookie", "session=abc123");
        then.status(200).body(r#"{"authenticated": true}"#);
    });

    let rest = client(&server);
    let response = rest
        .login(&LoginRequest {
            username: "admin".into(),
            password: "pw".into(),
        })
        .await
        .expect("login");
    assert!(response.granted());
    let status = rest.check().await.expect("check");
    assert!(status.authenticated);
    login.assert();
    check.assert();
}

#[tokio::test]
async fn rejected_login_is_a_denial_not_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path("/api/auth/login");
        then.status(401)
            .body(r#"{"success": false, "message": "Invalid credentials"}"#);
    });
    server.mock(|when, then| {
        when.method("GET").path("/api/auth/check");
        then.status(401).body("");
    });

    let rest = client(&server);
    let response = rest
        .login(&LoginRequest {
            username: "admin".into(),
            password: "wrong".into(),
        })
        .await
        .expect("denial decodes");
    assert!(!response.granted());
    assert!(!rest.check().await.expect("check").authenticated);
}
