use async_trait::async_trait;
use shared::types::{Procedure, ProcedurePayload};

use crate::error::RepositoryError;

/// Storage for procedures. Listing methods return rows ordered by
/// `sort_order`; lookups by key signal a miss with [`RepositoryError::NotFound`].
#[cfg_attr(feature = "test-support", mockall::automock)]
#[async_trait]
pub trait ProcedureRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Procedure>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Procedure, RepositoryError>;
    async fn find_by_type(&self, procedure_type: String)
    -> Result<Vec<Procedure>, RepositoryError>;
    async fn create(&self, procedure: ProcedurePayload) -> Result<Procedure, RepositoryError>;
    async fn update(
        &self,
        id: i32,
        procedure: ProcedurePayload,
    ) -> Result<Procedure, RepositoryError>;
    async fn delete(&self, id: i32) -> Result<(), RepositoryError>;
}
