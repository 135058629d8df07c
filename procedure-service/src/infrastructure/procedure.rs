use async_trait::async_trait;
use shared::types::{Procedure, ProcedurePayload};
use sqlx::PgPool;

use crate::{domain::procedure::ProcedureRepository, error::RepositoryError};

pub struct PgProcedureRepository {
    pool: PgPool,
}

impl PgProcedureRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProcedureRepository for PgProcedureRepository {
    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Procedure>, RepositoryError> {
        let output = sqlx::query_as::<_, Procedure>(
            r#"
            SELECT id, title, type, content, sort_order, is_expanded, created_at, updated_at
            FROM procedures
            ORDER BY sort_order ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(output)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: i32) -> Result<Procedure, RepositoryError> {
        sqlx::query_as::<_, Procedure>(
            r#"
            SELECT id, title, type, content, sort_order, is_expanded, created_at, updated_at
            FROM procedures
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_type(
        &self,
        procedure_type: String,
    ) -> Result<Vec<Procedure>, RepositoryError> {
        let output = sqlx::query_as::<_, Procedure>(
            r#"
            SELECT id, title, type, content, sort_order, is_expanded, created_at, updated_at
            FROM procedures
            WHERE type = $1
            ORDER BY sort_order ASC, id ASC
            "#,
        )
        .bind(procedure_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(output)
    }

    #[tracing::instrument(skip(self))]
    async fn create(&self, procedure: ProcedurePayload) -> Result<Procedure, RepositoryError> {
        let output = sqlx::query_as::<_, Procedure>(
            r#"
            INSERT INTO procedures (title, type, content, sort_order, is_expanded)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, type, content, sort_order, is_expanded, created_at, updated_at
            "#,
        )
        .bind(procedure.title)
        .bind(procedure.procedure_type)
        .bind(procedure.content)
        .bind(procedure.sort_order)
        .bind(procedure.is_expanded)
        .fetch_one(&self.pool)
        .await?;

        Ok(output)
    }

    #[tracing::instrument(skip(self))]
    async fn update(
        &self,
        id: i32,
        procedure: ProcedurePayload,
    ) -> Result<Procedure, RepositoryError> {
        sqlx::query_as::<_, Procedure>(
            r#"
            UPDATE procedures
            SET title = $2,
                type = $3,
                content = $4,
                sort_order = $5,
                is_expanded = $6,
                updated_at = now()
            WHERE id = $1
            RETURNING id, title, type, content, sort_order, is_expanded, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(procedure.title)
        .bind(procedure.procedure_type)
        .bind(procedure.content)
        .bind(procedure.sort_order)
        .bind(procedure.is_expanded)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let output = sqlx::query(
            r#"
            DELETE FROM procedures
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if output.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
