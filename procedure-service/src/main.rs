use std::{error::Error, process::ExitCode, sync::Arc};

use procedure_service::{
    api::{self, handler::procedure, state::ProcedureAppState},
    config::AppConfig,
    domain::service::ProcedureService,
    infrastructure::procedure::PgProcedureRepository,
};
use shared::{
    responses::{ErrorDetail, ErrorResponse},
    types::{Procedure, ProcedurePayload},
};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quest API",
        description = "Procedures for parcel search and damage or loss claims"
    ),
    paths(
        procedure::find_all,
        procedure::find_by_id,
        procedure::find_by_type,
        procedure::create,
        procedure::update,
        procedure::delete,
    ),
    components(schemas(Procedure, ProcedurePayload, ErrorResponse, ErrorDetail)),
    tags(
        (name = "Procedures", description = "Parcel search and claim procedures"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> ExitCode {
    let guard = shared::telemetry::init_telemetry("procedure-service");
    if guard.exporting() {
        tracing::info!("Exporting spans over OTLP");
    }

    match run().await {
        Ok(()) => {
            tracing::info!("procedure-service shut down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("procedure-service failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_with(config.database.connect_options()?)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    let repo = Arc::new(PgProcedureRepository::new(pool));
    let state = Arc::new(ProcedureAppState {
        procedure_service: Arc::new(ProcedureService::new(repo)),
    });

    let app = api::router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(config.cors.layer()?)
        .layer(CatchPanicLayer::custom(api::panic_response))
        // tracing log (turn request into info level)
        .layer(
            TraceLayer::new_for_http()
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(tower_http::LatencyUnit::Millis),
                ),
        );

    let port = config.server_port;
    let listener = TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    tracing::info!("procedure-service listening on 0.0.0.0:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shared::shutdown::shutdown_signal())
        .await?;

    Ok(())
}
