use sqlx::PgPool;
use tracing::{debug, error, instrument};
use uuid::Uuid;

use crate::modules::tenants::model::TenantScope;
use crate::utils::errors::AppError;

use super::model::{CreateQuestionDto, Question, UpdateQuestionDto};

pub struct QuestionService;

impl QuestionService {
    #[instrument(skip(db, scope, dto), fields(schema = %scope.schema()))]
    pub async fn create_question(
        db: &PgPool,
        scope: &TenantScope,
        dto: CreateQuestionDto,
    ) -> Result<Question, AppError> {
        let document = serde_json::to_value(&dto).map_err(|e| {
            error!(error = %e, "Failed to serialize question document");
            AppError::from(e)
        })?;

        let question = sqlx::query_as::<_, Question>(&format!(
            "INSERT INTO {} (data) VALUES ($1)
             RETURNING id, data, created_at, updated_at",
            scope.collection("questions")
        ))
        .bind(&document)
        .fetch_one(db)
        .await
        .map_err(|e| {
            error!(error = %e, schema = %scope.schema(), "Database error creating question");
            AppError::from(e)
        })?;

        debug!(question.id = %question.id, "Question created");

        Ok(question)
    }

    #[instrument(skip(db, scope), fields(schema = %scope.schema()))]
    pub async fn fetch_questions(
        db: &PgPool,
        scope: &TenantScope,
    ) -> Result<Vec<Question>, AppError> {
        sqlx::query_as::<_, Question>(&format!(
            "SELECT id, data, created_at, updated_at FROM {} ORDER BY created_at DESC",
            scope.collection("questions")
        ))
        .fetch_all(db)
        .await
        .map_err(|e| {
            error!(error = %e, schema = %scope.schema(), "Database error fetching questions");
            AppError::from(e)
        })
    }

    #[instrument(skip(db, scope), fields(schema = %scope.schema(), question.id = %question_id))]
    pub async fn fetch_question(
        db: &PgPool,
        scope: &TenantScope,
        question_id: Uuid,
    ) -> Result<Question, AppError> {
        sqlx::query_as::<_, Question>(&format!(
            "SELECT id, data, created_at, updated_at FROM {} WHERE id = $1",
            scope.collection("questions")
        ))
        .bind(question_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, schema = %scope.schema(), "Database error fetching question");
            AppError::from(e)
        })?
        .ok_or_else(|| {
            debug!(question.id = %question_id, "Question not found");
            AppError::not_found(anyhow::anyhow!("Question not found"))
        })
    }

    #[instrument(skip(db, scope, dto), fields(schema = %scope.schema(), question.id = %question_id))]
    pub async fn update_question(
        db: &PgPool,
        scope: &TenantScope,
        question_id: Uuid,
        dto: UpdateQuestionDto,
    ) -> Result<Question, AppError> {
        let patch = dto.into_patch();

        sqlx::query_as::<_, Question>(&format!(
            "UPDATE {} SET data = data || $2, updated_at = NOW() WHERE id = $1
             RETURNING id, data, created_at, updated_at",
            scope.collection("questions")
        ))
        .bind(question_id)
        .bind(&patch)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, schema = %scope.schema(), "Database error updating question");
            AppError::from(e)
        })?
        .ok_or_else(|| {
            debug!(question.id = %question_id, "Question not found for update");
            AppError::not_found(anyhow::anyhow!("Question not found"))
        })
    }

    #[instrument(skip(db, scope), fields(schema = %scope.schema(), question.id = %question_id))]
    pub async fn delete_question(
        db: &PgPool,
        scope: &TenantScope,
        question_id: Uuid,
    ) -> Result<(), AppError> {
        let result = sqlx::query(&format!(
            "DELETE FROM {} WHERE id = $1",
            scope.collection("questions")
        ))
        .bind(question_id)
        .execute(db)
        .await
        .map_err(|e| {
            error!(error = %e, schema = %scope.schema(), "Database error deleting question");
            AppError::from(e)
        })?;

        if result.rows_affected() == 0 {
            debug!(question.id = %question_id, "Question not found for deletion");
            return Err(AppError::not_found(anyhow::anyhow!("Question not found")));
        }

        Ok(())
    }
}
