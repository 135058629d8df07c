#![allow(dead_code)]

use std::{
    collections::BTreeMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicI32, Ordering},
    },
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Utc;
use http_body_util::BodyExt;
use procedure_service::{
    api::{self, state::ProcedureAppState},
    domain::{procedure::ProcedureRepository, service::ProcedureService},
    error::RepositoryError,
};
use serde_json::Value;
use shared::types::{Procedure, ProcedurePayload};
use tower::ServiceExt;

/// Stateful stand-in for the Postgres repository: assigns ids, stamps
/// timestamps and orders listings the same way the SQL does.
#[derive(Default)]
pub struct InMemoryProcedureRepository {
    last_id: AtomicI32,
    rows: Mutex<BTreeMap<i32, Procedure>>,
}

impl InMemoryProcedureRepository {
    fn sorted(rows: impl Iterator<Item = Procedure>) -> Vec<Procedure> {
        let mut output: Vec<Procedure> = rows.collect();
        output.sort_by_key(|p| (p.sort_order, p.id));
        output
    }
}

#[async_trait]
impl ProcedureRepository for InMemoryProcedureRepository {
    async fn find_all(&self) -> Result<Vec<Procedure>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(Self::sorted(rows.values().cloned()))
    }

    async fn find_by_id(&self, id: i32) -> Result<Procedure, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        rows.get(&id).cloned().ok_or(RepositoryError::NotFound)
    }

    async fn find_by_type(
        &self,
        procedure_type: String,
    ) -> Result<Vec<Procedure>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(Self::sorted(
            rows.values()
                .filter(|p| p.procedure_type == procedure_type)
                .cloned(),
        ))
    }

    async fn create(&self, procedure: ProcedurePayload) -> Result<Procedure, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        let created = Procedure {
            id,
            title: procedure.title,
            procedure_type: procedure.procedure_type,
            content: procedure.content,
            sort_order: procedure.sort_order,
            is_expanded: procedure.is_expanded,
            created_at: now,
            updated_at: now,
        };
        rows.insert(id, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: i32,
        procedure: ProcedurePayload,
    ) -> Result<Procedure, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        row.title = procedure.title;
        row.procedure_type = procedure.procedure_type;
        row.content = procedure.content;
        row.sort_order = procedure.sort_order;
        row.is_expanded = procedure.is_expanded;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        rows.remove(&id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

pub fn build_test_app(repo: impl ProcedureRepository + 'static) -> Router {
    let state = Arc::new(ProcedureAppState {
        procedure_service: Arc::new(ProcedureService::new(Arc::new(repo))),
    });

    api::router(state)
}

pub fn payload(title: &str, procedure_type: &str, sort_order: i32) -> ProcedurePayload {
    ProcedurePayload {
        title: title.to_string(),
        procedure_type: procedure_type.to_string(),
        content: String::new(),
        sort_order,
        is_expanded: false,
    }
}

pub fn make_procedure(id: i32, procedure_type: &str, sort_order: i32) -> Procedure {
    let now = Utc::now();
    Procedure {
        id,
        title: format!("Step {id}"),
        procedure_type: procedure_type.to_string(),
        content: String::new(),
        sort_order,
        is_expanded: false,
        created_at: now,
        updated_at: now,
    }
}

pub fn db_error() -> RepositoryError {
    RepositoryError::Database(sqlx::Error::PoolTimedOut)
}

/// Sends one request through the router and returns the status with the
/// decoded JSON body (`Value::Null` when the body is empty).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    let res = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}
