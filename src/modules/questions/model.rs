//! Question bank data models and DTOs.
//!
//! Questions live in the `questions` collection of a tenant's data scope.
//! Rows are document-shaped: a typed DTO is validated at the boundary and
//! stored as the row's JSON document.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A question document from a tenant's scope.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, ToSchema)]
pub struct Question {
    pub id: Uuid,
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateQuestionDto {
    #[validate(length(min = 1, message = "prompt must not be empty"))]
    pub prompt: String,
    #[validate(length(min = 2, message = "at least two options are required"))]
    pub options: Vec<String>,
    #[validate(length(min = 1, message = "answer must not be empty"))]
    pub answer: String,
    pub subject: Option<String>,
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateQuestionDto {
    #[validate(length(min = 1, message = "prompt must not be empty"))]
    pub prompt: Option<String>,
    #[validate(length(min = 2, message = "at least two options are required"))]
    pub options: Option<Vec<String>>,
    #[validate(length(min = 1, message = "answer must not be empty"))]
    pub answer: Option<String>,
    pub subject: Option<String>,
}

impl UpdateQuestionDto {
    /// JSON patch of only the provided fields, for merging into the
    /// stored document.
    pub fn into_patch(self) -> serde_json::Value {
        let mut patch = serde_json::Map::new();
        if let Some(prompt) = self.prompt {
            patch.insert("prompt".to_string(), prompt.into());
        }
        if let Some(options) = self.options {
            patch.insert("options".to_string(), options.into());
        }
        if let Some(answer) = self.answer {
            patch.insert("answer".to_string(), answer.into());
        }
        if let Some(subject) = self.subject {
            patch.insert("subject".to_string(), subject.into());
        }
        serde_json::Value::Object(patch)
    }
}
