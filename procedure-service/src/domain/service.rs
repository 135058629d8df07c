use std::sync::Arc;

use shared::types::{Procedure, ProcedurePayload};

use crate::domain::procedure::ProcedureRepository;
use crate::error::{ProcedureServiceError, RepositoryError};

const NOT_FOUND_DETAIL: &str = "procedure not found";

/// Validates procedure requests and turns storage failures into classified
/// [`ProcedureServiceError`]s.
pub struct ProcedureService {
    repo: Arc<dyn ProcedureRepository>,
}

impl ProcedureService {
    pub fn new(repo: Arc<dyn ProcedureRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Procedure>, ProcedureServiceError> {
        self.repo
            .find_all()
            .await
            .map_err(|e| server_error("failed to get procedures", e))
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<Procedure, ProcedureServiceError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| reclassify("failed to get procedure", e))
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_type(
        &self,
        procedure_type: String,
    ) -> Result<Vec<Procedure>, ProcedureServiceError> {
        self.repo
            .find_by_type(procedure_type)
            .await
            .map_err(|e| server_error("failed to get procedures by type", e))
    }

    /// Requires `title`, then `type`; the first missing one is reported.
    #[tracing::instrument(skip(self))]
    pub async fn create(
        &self,
        procedure: ProcedurePayload,
    ) -> Result<Procedure, ProcedureServiceError> {
        if procedure.title.is_empty() {
            return Err(ProcedureServiceError::required("title"));
        }
        if procedure.procedure_type.is_empty() {
            return Err(ProcedureServiceError::required("type"));
        }

        self.repo
            .create(procedure)
            .await
            .map_err(|e| server_error("failed to create procedure", e))
    }

    /// Replaces every mutable field of procedure `id`. Only `id` and `title`
    /// are checked here; an empty `type` is accepted on update.
    #[tracing::instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        procedure: ProcedurePayload,
    ) -> Result<Procedure, ProcedureServiceError> {
        if id == 0 {
            return Err(ProcedureServiceError::required("id"));
        }
        if procedure.title.is_empty() {
            return Err(ProcedureServiceError::required("title"));
        }

        self.repo
            .update(id, procedure)
            .await
            .map_err(|e| reclassify("failed to update procedure", e))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ProcedureServiceError> {
        if id == 0 {
            return Err(ProcedureServiceError::required("id"));
        }

        self.repo
            .delete(id)
            .await
            .map_err(|e| reclassify("failed to delete procedure", e))
    }
}

fn reclassify(context: &str, err: RepositoryError) -> ProcedureServiceError {
    match err {
        RepositoryError::NotFound => ProcedureServiceError::NotFound(NOT_FOUND_DETAIL.to_owned()),
        other => server_error(context, other),
    }
}

fn server_error(context: &str, err: RepositoryError) -> ProcedureServiceError {
    ProcedureServiceError::Server(format!("{context}: {err}"))
}
