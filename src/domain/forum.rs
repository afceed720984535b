//! Forum drafts and the required-field rules for authoring posts and replies.

use clubsite_api_types::{
    ForumCategoryCreateRequest, ForumPostCreateRequest, ForumReplyCreateRequest,
};

use crate::domain::schema::ValidationError;

/// Category filter for the public post list. `All` sends no `category_id`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(i64),
}

impl CategoryFilter {
    pub fn category_id(self) -> Option<i64> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(id) => Some(id),
        }
    }
}

impl From<Option<i64>> for CategoryFilter {
    fn from(value: Option<i64>) -> Self {
        value.map_or(CategoryFilter::All, CategoryFilter::Only)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub author_name: String,
    pub author_email: Option<String>,
    pub category_id: Option<i64>,
}

impl PostDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.author_name, "author_name", "Your Name")?;
        require(&self.title, "title", "Title")?;
        require(&self.content, "content", "Content")
    }

    pub fn into_request(self) -> ForumPostCreateRequest {
        ForumPostCreateRequest {
            title: self.title.trim().to_string(),
            content: self.content,
            author_name: self.author_name.trim().to_string(),
            author_email: non_blank(self.author_email),
            category_id: self.category_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyDraft {
    pub content: String,
    pub author_name: String,
    pub author_email: Option<String>,
}

impl ReplyDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.author_name, "author_name", "Your Name")?;
        require(&self.content, "content", "Reply")
    }

    pub fn into_request(self) -> ForumReplyCreateRequest {
        ForumReplyCreateRequest {
            content: self.content,
            author_name: self.author_name.trim().to_string(),
            author_email: non_blank(self.author_email),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: Option<String>,
    pub order: Option<i64>,
}

impl CategoryDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.name, "name", "Name")
    }

    pub fn into_request(self) -> ForumCategoryCreateRequest {
        ForumCategoryCreateRequest {
            name: self.name.trim().to_string(),
            description: non_blank(self.description),
            order: self.order,
        }
    }
}

fn require(value: &str, field: &str, label: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::required(field, label))
    } else {
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> PostDraft {
        PostDraft {
            title: "Servo jitter".into(),
            content: "Any fix?".into(),
            author_name: "Tahmid".into(),
            author_email: Some("  ".into()),
            category_id: None,
        }
    }

    #[test]
    fn post_requires_title_content_and_author() {
        assert!(post().validate().is_ok());
        for field in ["title", "content", "author_name"] {
            let mut draft = post();
            match field {
                "title" => draft.title = " ".into(),
                "content" => draft.content.clear(),
                _ => draft.author_name.clear(),
            }
            match draft.validate() {
                Err(ValidationError::Required { field: got, .. }) => assert_eq!(got, field),
                other => panic!("expected required error for {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn blank_email_is_dropped_from_request() {
        let request = post().into_request();
        assert!(request.author_email.is_none());
    }

    #[test]
    fn reply_email_is_optional() {
        let draft = ReplyDraft {
            content: "Try a capacitor".into(),
            author_name: "Mim".into(),
            author_email: None,
        };
        assert!(draft.validate().is_ok());
        let missing = ReplyDraft {
            author_name: String::new(),
            ..draft
        };
        assert!(missing.validate().is_err());
    }

    #[test]
    fn none_maps_to_all_categories() {
        assert_eq!(CategoryFilter::from(None), CategoryFilter::All);
        assert_eq!(CategoryFilter::from(Some(3)).category_id(), Some(3));
    }
}
