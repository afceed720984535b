//! Request and response shapes for the club website REST API.
//!
//! Shared by the `clubsite` library and the `clubsite-cli` binary so both
//! sides agree on field names and optionality.

#![deny(clippy::all, clippy::pedantic)]

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /auth/login`. The backend answers `{success, message}` and
/// some deployments add `authenticated`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LoginResponse {
    #[must_use]
    pub fn granted(&self) -> bool {
        self.success && self.authenticated.unwrap_or(true)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct SessionStatus {
    #[serde(default)]
    pub authenticated: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Generic `{success, message}` acknowledgement returned by mutations.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OperationAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ForumCategory {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ForumPost {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Denormalized join of the owning category's name.
    #[serde(default)]
    pub category_name: Option<String>,
    /// Number of replies, computed by the backend.
    #[serde(default)]
    pub reply_count: u64,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ForumReply {
    pub id: i64,
    pub post_id: i64,
    pub content: String,
    pub author_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// `GET /forum/posts/{id}`: the post with its replies embedded, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ForumPostDetail {
    #[serde(flatten)]
    pub post: ForumPost,
    #[serde(default)]
    pub replies: Vec<ForumReply>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForumCategoryCreateRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForumPostCreateRequest {
    pub title: String,
    pub content: String,
    pub author_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForumReplyCreateRequest {
    pub content: String,
    pub author_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_detail_flattens_post_fields() {
        let body = r#"{
            "id": 7, "title": "Line follower", "content": "PID tuning?",
            "author_name": "Rafi", "category_id": 2, "category_name": "Help",
            "reply_count": 1, "created_at": "2024-03-01T10:00:00",
            "replies": [{"id": 1, "post_id": 7, "content": "Lower Kd", "author_name": "Mim", "created_at": "2024-03-01T11:00:00"}]
        }"#;
        let detail: ForumPostDetail = serde_json::from_str(body).expect("detail parses");
        assert_eq!(detail.post.id, 7);
        assert_eq!(detail.post.category_name.as_deref(), Some("Help"));
        assert_eq!(detail.replies.len(), 1);
        assert_eq!(detail.replies[0].post_id, 7);
    }

    #[test]
    fn post_without_category_deserializes() {
        let body = r#"{"id": 3, "title": "t", "content": "c", "author_name": "a", "category_id": null, "category_name": null, "reply_count": 0, "created_at": null}"#;
        let post: ForumPost = serde_json::from_str(body).expect("post parses");
        assert!(post.category_id.is_none());
        assert!(post.category_name.is_none());
    }

    #[test]
    fn create_request_omits_blank_optionals() {
        let req = ForumPostCreateRequest {
            title: "t".into(),
            content: "c".into(),
            author_name: "a".into(),
            author_email: None,
            category_id: None,
        };
        let value = serde_json::to_value(req).expect("serialize");
        assert!(value.get("author_email").is_none());
        assert!(value.get("category_id").is_none());
    }

    #[test]
    fn login_response_requires_success() {
        let denied: LoginResponse =
            serde_json::from_str(r#"{"success": false, "message": "Invalid credentials"}"#)
                .expect("parse");
        assert!(!denied.granted());
        let ok: LoginResponse = serde_json::from_str(r#"{"success": true}"#).expect("parse");
        assert!(ok.granted());
    }
}
