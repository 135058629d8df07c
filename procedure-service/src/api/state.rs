use std::sync::Arc;

use crate::domain::service::ProcedureService;

pub struct ProcedureAppState {
    pub procedure_service: Arc<ProcedureService>,
}
