use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{entities::validation::validate_not_blank, utils::sanitize::sanitize_user_html};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ForumPost {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_name: String,
    pub title: String,
    pub content: String,
    pub posted_at: DateTime<Utc>,
}

/// Row shape of the forum listing query, joined with the author's name.
#[derive(Debug, sqlx::FromRow)]
pub struct ForumPostRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_name: String,
    pub title: String,
    pub content: String,
    pub posted_at: DateTime<Utc>,
    pub author_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumPostWithAuthor {
    #[serde(flatten)]
    pub post: ForumPost,
    pub author: Author,
}

impl From<ForumPostRow> for ForumPostWithAuthor {
    fn from(row: ForumPostRow) -> Self {
        ForumPostWithAuthor {
            post: ForumPost {
                id: row.id,
                user_id: row.user_id,
                company_name: row.company_name,
                title: row.title,
                content: row.content,
                posted_at: row.posted_at,
            },
            author: Author {
                name: row.author_name.unwrap_or_else(|| "Unknown".to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewForumPostRequest {
    #[validate(length(min = 1, max = 120), custom(function = "validate_not_blank"))]
    pub company_name: String,

    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: String,

    #[validate(length(min = 1, max = 20000), custom(function = "validate_not_blank"))]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForumPostInsert {
    pub user_id: Uuid,
    pub company_name: String,
    pub title: String,
    pub content: String,
}

impl NewForumPostRequest {
    pub fn prepare_for_insert(self, user_id: Uuid) -> ForumPostInsert {
        ForumPostInsert {
            user_id,
            company_name: self.company_name.trim().to_string(),
            title: self.title.trim().to_string(),
            content: sanitize_user_html(&self.content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_author_is_reported_as_unknown() {
        let row = ForumPostRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            company_name: "Google".into(),
            title: "Interview".into(),
            content: "Three rounds".into(),
            posted_at: Utc::now(),
            author_name: None,
        };
        let view = ForumPostWithAuthor::from(row);
        assert_eq!(view.author.name, "Unknown");

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["author"]["name"], "Unknown");
        assert_eq!(json["company_name"], "Google");
    }

    #[test]
    fn content_is_sanitized_on_insert() {
        let request = NewForumPostRequest {
            company_name: "Google".into(),
            title: "Round 1".into(),
            content: "<p>DSA</p><script>alert(1)</script>".into(),
        };
        let insert = request.prepare_for_insert(Uuid::new_v4());
        assert!(!insert.content.contains("<script>"));
        assert!(insert.content.contains("DSA"));
    }
}
