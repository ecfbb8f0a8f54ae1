//! Submitted form data, validated before it reaches an entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::EMPTY_COMMENT_TEXT;
use crate::error::DomainError;

const TITLE_MAX_LEN: usize = 256;
const USERNAME_MAX_LEN: usize = 150;
const PASSWORD_MIN_LEN: usize = 8;

/// Collects field-level messages and turns them into a single error.
#[derive(Default)]
struct FieldErrors(Vec<String>);

impl FieldErrors {
    fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.0.push(format!("{field}: {message}"));
        }
    }

    fn finish(self) -> Result<(), DomainError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self.0))
        }
    }
}

fn is_valid_username(username: &str) -> bool {
    username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}

fn is_valid_email(email: &str) -> bool {
    email.is_empty() || email.split_once('@').is_some_and(|(l, d)| !l.is_empty() && d.contains('.'))
}

/// Post form: everything an author may set on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub image: Option<String>,
    pub pub_date: DateTime<Utc>,
    #[serde(default = "published_by_default")]
    pub is_published: bool,
    #[serde(default)]
    pub location_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
}

fn published_by_default() -> bool {
    true
}

impl PostDraft {
    /// Field constraints only; references are checked against the store by the service.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = FieldErrors::default();
        errors.check(!self.title.trim().is_empty(), "title", "this field is required");
        errors.check(
            self.title.chars().count() <= TITLE_MAX_LEN,
            "title",
            "must be at most 256 characters",
        );
        errors.check(!self.text.trim().is_empty(), "text", "this field is required");
        errors.check(self.category_id.is_some(), "category", "this field is required");
        errors.finish()
    }
}

/// Comment form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentDraft {
    #[serde(default)]
    pub text: String,
}

impl CommentDraft {
    /// The text to store; blank submissions become the placeholder.
    pub fn into_text(self) -> String {
        if self.text.trim().is_empty() {
            EMPTY_COMMENT_TEXT.to_string()
        } else {
            self.text
        }
    }
}

/// Profile form for the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl ProfileDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = FieldErrors::default();
        errors.check(!self.username.is_empty(), "username", "this field is required");
        errors.check(
            self.username.chars().count() <= USERNAME_MAX_LEN,
            "username",
            "must be at most 150 characters",
        );
        errors.check(
            is_valid_username(&self.username),
            "username",
            "letters, digits and @/./+/-/_ only",
        );
        errors.check(is_valid_email(&self.email), "email", "enter a valid email address");
        errors.finish()
    }
}

/// Registration form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationDraft {
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub password: String,
}

impl RegistrationDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = FieldErrors::default();
        errors.check(!self.username.is_empty(), "username", "this field is required");
        errors.check(
            self.username.chars().count() <= USERNAME_MAX_LEN,
            "username",
            "must be at most 150 characters",
        );
        errors.check(
            is_valid_username(&self.username),
            "username",
            "letters, digits and @/./+/-/_ only",
        );
        errors.check(is_valid_email(&self.email), "email", "enter a valid email address");
        errors.check(
            self.password.chars().count() >= PASSWORD_MIN_LEN,
            "password",
            "must be at least 8 characters",
        );
        errors.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_draft() -> PostDraft {
        PostDraft {
            title: "Morning at the lake".to_string(),
            text: "Fog over the water.".to_string(),
            image: None,
            pub_date: Utc::now(),
            is_published: true,
            location_id: None,
            category_id: Some(Uuid::new_v4()),
        }
    }

    #[test]
    fn test_valid_post_draft() {
        assert!(post_draft().validate().is_ok());
    }

    #[test]
    fn test_post_draft_reports_every_field() {
        let draft = PostDraft {
            title: " ".to_string(),
            text: String::new(),
            category_id: None,
            ..post_draft()
        };

        let Err(DomainError::Validation(errors)) = draft.validate() else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.starts_with("title")));
        assert!(errors.iter().any(|e| e.starts_with("text")));
        assert!(errors.iter().any(|e| e.starts_with("category")));
    }

    #[test]
    fn test_post_title_length_limit() {
        let draft = PostDraft {
            title: "x".repeat(257),
            ..post_draft()
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_blank_comment_gets_placeholder() {
        let draft = CommentDraft {
            text: "  \n".to_string(),
        };
        assert_eq!(draft.into_text(), EMPTY_COMMENT_TEXT);

        let draft = CommentDraft {
            text: "Nice shot".to_string(),
        };
        assert_eq!(draft.into_text(), "Nice shot");
    }

    #[test]
    fn test_registration_rules() {
        let ok = RegistrationDraft {
            username: "anna.k".to_string(),
            email: String::new(),
            password: "long-enough".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = RegistrationDraft {
            username: "anna k".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };
        let Err(DomainError::Validation(errors)) = bad.validate() else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.len(), 3);
    }
}
