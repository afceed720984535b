#![deny(clippy::all, clippy::pedantic)]

use std::time::Duration;

use clubsite::config::{
    ApiSettings, ForumSettings, LogFormat, LoggingSettings, Settings, normalize_base_url,
};
use httpmock::MockServer;
use tempfile::NamedTempFile;
use tracing::level_filters::LevelFilter;

use crate::args::{
    AdminArgs, AdminCmd, CredentialArgs, ForumCmd, ModerationArgs, ModerationCmd, ResourceArgs,
    ResourceCmd,
};
use crate::client::{CliError, Ctx, resolve_credentials};
use crate::handlers::{admin, forum};

fn ctx(server: &MockServer, replies_enabled: bool) -> Ctx {
    let settings = Settings {
        api: ApiSettings {
            base_url: normalize_base_url(&server.url("/api")).expect("base url"),
            timeout: Duration::from_secs(5),
        },
        logging: LoggingSettings {
            level: LevelFilter::WARN,
            format: LogFormat::Compact,
        },
        forum: ForumSettings { replies_enabled },
    };
    Ctx::new(settings).expect("ctx")
}

fn tmp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tmp file");
    std::io::Write::write_all(&mut file, contents.as_bytes()).expect("write tmp");
    file
}

fn credentials() -> CredentialArgs {
    CredentialArgs {
        username: Some("admin".into()),
        password_file: None,
        password_env: Some("secret".into()),
    }
}

/// Login, session check and logout every admin invocation performs.
fn mock_session(server: &MockServer) {
    server.mock(|when, then| {
        when.method("POST").path("/api/auth/login");
        then.status(200)
            .header("content-type", "application/json")
            .header("set-cookie", "session=abc123; Path=/")
            .body(r#"{"success": true}"#);
    });
    server.mock(|when, then| {
        when.method("GET").path("/api/auth/check");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"authenticated": true}"#);
    });
    server.mock(|when, then| {
        when.method("POST").path("/api/auth/logout");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success": true}"#);
    });
}

#[test]
fn password_file_beats_env() -> Result<(), CliError> {
    let file = tmp_file("from-file\n");
    let args = CredentialArgs {
        password_file: Some(file.path().to_path_buf()),
        ..credentials()
    };
    let creds = resolve_credentials(&args)?;
    assert_eq!(creds.password(), "from-file");
    assert!(!format!("{creds:?}").contains("from-file"));
    Ok(())
}

#[test]
fn missing_username_is_rejected() {
    let args = CredentialArgs {
        username: None,
        ..credentials()
    };
    let err = resolve_credentials(&args).expect_err("missing username");
    assert!(matches!(err, CliError::MissingUsername));
}

#[test]
fn missing_password_is_rejected() {
    let args = CredentialArgs {
        password_env: None,
        ..credentials()
    };
    let err = resolve_credentials(&args).expect_err("missing password");
    assert!(matches!(err, CliError::MissingPassword));
}

#[test]
fn assignments_keep_equals_in_values() -> Result<(), CliError> {
    let pairs = crate::io::parse_assignments(&["linkedin=https://x.io/?a=b".into()])?;
    assert_eq!(pairs, [("linkedin".to_string(), "https://x.io/?a=b".to_string())]);
    let err = crate::io::parse_assignments(&["=oops".into()]).expect_err("no name");
    assert!(matches!(err, CliError::InvalidInput(_)));
    Ok(())
}

#[tokio::test]
async fn forum_list_loads_categories_and_posts() -> Result<(), CliError> {
    let server = MockServer::start();
    let categories = server.mock(|when, then| {
        when.method("GET").path("/api/forum/categories");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"[{"id": 1, "name": "General"}]"#);
    });
    let posts = server.mock(|when, then| {
        when.method("GET").path("/api/forum/posts");
        then.status(200)
            .header("content-type", "application/json")
            .body("[]");
    });

    forum::handle(&ctx(&server, false), ForumCmd::List { category: None }).await?;
    categories.assert();
    posts.assert();
    Ok(())
}

#[tokio::test]
async fn reply_is_refused_when_disabled() {
    let server = MockServer::start();
    let thread = server.mock(|when, then| {
        when.method("GET").path("/api/forum/posts/4");
        then.status(200);
    });
    let reply = server.mock(|when, then| {
        when.method("POST").path("/api/forum/posts/4/replies");
        then.status(201);
    });

    let err = forum::handle(
        &ctx(&server, false),
        ForumCmd::Reply {
            post_id: 4,
            content: Some("me too".into()),
            content_file: None,
            author: "Rafi".into(),
            email: None,
        },
    )
    .await
    .expect_err("replies disabled");
    assert!(matches!(err, CliError::RepliesDisabled));
    thread.assert_calls(0);
    reply.assert_calls(0);
}

#[tokio::test]
async fn admin_check_without_session_requires_login() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/auth/check");
        then.status(401)
            .header("content-type", "application/json")
            .body(r#"{"authenticated": false}"#);
    });

    let err = admin::handle(
        &ctx(&server, false),
        AdminArgs {
            credentials: CredentialArgs::default(),
            action: AdminCmd::Check,
        },
    )
    .await
    .expect_err("anonymous");
    assert!(matches!(err, CliError::LoginRequired));
}

#[tokio::test]
async fn admin_delete_with_yes_skips_prompt() -> Result<(), CliError> {
    let server = MockServer::start();
    mock_session(&server);
    server.mock(|when, then| {
        when.method("GET").path("/api/workshops");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"[{"id": 7, "title": "Soldering 101"}]"#);
    });
    let delete = server.mock(|when, then| {
        when.method("DELETE")
            .path("/api/workshops/7")
            .header("cookie", "session=abc123");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success": true}"#);
    });

    admin::handle(
        &ctx(&server, false),
        AdminArgs {
            credentials: credentials(),
            action: AdminCmd::Workshops(ResourceArgs {
                action: ResourceCmd::Delete { id: 7, yes: true },
            }),
        },
    )
    .await?;
    delete.assert();
    Ok(())
}

#[tokio::test]
async fn admin_create_without_required_field_sends_nothing() {
    let server = MockServer::start();
    mock_session(&server);
    server.mock(|when, then| {
        when.method("GET").path("/api/alumni");
        then.status(200)
            .header("content-type", "application/json")
            .body("[]");
    });
    let create = server.mock(|when, then| {
        when.method("POST").path("/api/alumni");
        then.status(201);
    });

    let err = admin::handle(
        &ctx(&server, false),
        AdminArgs {
            credentials: credentials(),
            action: AdminCmd::Alumni(ResourceArgs {
                action: ResourceCmd::Create {
                    set: vec!["batch=2019".into()],
                },
            }),
        },
    )
    .await
    .expect_err("name is required");
    assert!(matches!(err, CliError::App(_)));
    create.assert_calls(0);
}

#[tokio::test]
async fn moderation_add_category_posts_request() -> Result<(), CliError> {
    let server = MockServer::start();
    mock_session(&server);
    server.mock(|when, then| {
        when.method("GET").path("/api/forum/posts");
        then.status(200)
            .header("content-type", "application/json")
            .body("[]");
    });
    let create = server.mock(|when, then| {
        when.method("POST")
            .path("/api/forum/categories")
            .json_body(serde_json::json!({"name": "Help"}));
        then.status(201)
            .header("content-type", "application/json")
            .body(r#"{"success": true}"#);
    });

    admin::handle(
        &ctx(&server, false),
        AdminArgs {
            credentials: credentials(),
            action: AdminCmd::Forum(ModerationArgs {
                action: ModerationCmd::AddCategory {
                    name: "Help".into(),
                    description: None,
                    order: None,
                },
            }),
        },
    )
    .await?;
    create.assert();
    Ok(())
}
