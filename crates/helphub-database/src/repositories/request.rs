//! Help request repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use helphub_core::error::{AppError, ErrorKind};
use helphub_core::result::AppResult;
use helphub_core::types::RequestId;
use helphub_entity::request::{HelpRequest, RequestStatus};

use crate::store::RequestStore;

const COLUMNS: &str = "id, title, description, contact_info, location, feedback, \
                       emergency_level, status, creation_date, poster_id, volunteer_id, \
                       applicant_id, version";

/// Repository for help request persistence.
#[derive(Debug, Clone)]
pub struct RequestRepository {
    pool: PgPool,
}

impl RequestRepository {
    /// Create a new request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestStore for RequestRepository {
    async fn find_by_id(&self, id: RequestId) -> AppResult<Option<HelpRequest>> {
        sqlx::query_as::<_, HelpRequest>(&format!(
            "SELECT {COLUMNS} FROM help_requests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find request", e))
    }

    async fn find_all(&self, status: Option<RequestStatus>) -> AppResult<Vec<HelpRequest>> {
        sqlx::query_as::<_, HelpRequest>(&format!(
            "SELECT {COLUMNS} FROM help_requests \
             WHERE ($1::request_status IS NULL OR status = $1) \
             ORDER BY created_at DESC"
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list requests", e))
    }

    async fn create(&self, request: &HelpRequest) -> AppResult<HelpRequest> {
        sqlx::query_as::<_, HelpRequest>(&format!(
            "INSERT INTO help_requests ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {COLUMNS}"
        ))
        .bind(request.id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.contact_info)
        .bind(&request.location)
        .bind(&request.feedback)
        .bind(request.emergency_level)
        .bind(request.status)
        .bind(request.creation_date)
        .bind(request.poster_id)
        .bind(request.volunteer_id)
        .bind(request.applicant_id)
        .bind(request.version)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create request", e))
    }

    async fn update_if_version(
        &self,
        request: &HelpRequest,
        expected_version: i64,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE help_requests SET title = $3, description = $4, contact_info = $5, \
             location = $6, feedback = $7, emergency_level = $8, status = $9, volunteer_id = $10, \
             applicant_id = $11, version = $12 \
             WHERE id = $1 AND version = $2",
        )
        .bind(request.id)
        .bind(expected_version)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.contact_info)
        .bind(&request.location)
        .bind(&request.feedback)
        .bind(request.emergency_level)
        .bind(request.status)
        .bind(request.volunteer_id)
        .bind(request.applicant_id)
        .bind(request.version)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update request", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_if_version(&self, id: RequestId, expected_version: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM help_requests WHERE id = $1 AND version = $2")
            .bind(id)
            .bind(expected_version)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete request", e)
            })?;

        Ok(result.rows_affected() == 1)
    }
}
