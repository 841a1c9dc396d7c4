//! Server construction and middleware wiring.

mod config;
mod settings;

pub use config::ServerConfig;
pub use settings::ServerSettings;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, HttpServer, web};
use tracing::warn;

use jobboard::Trace;
use jobboard::domain::TRACE_ID_HEADER;
#[cfg(debug_assertions)]
use jobboard::doc::ApiDoc;
use jobboard::domain::JobService;
use jobboard::domain::ports::FixtureJobRepository;
use jobboard::inbound::http::health::{HealthState, live, ready};
use jobboard::inbound::http::jobs;
use jobboard::inbound::http::state::HttpState;
use jobboard::outbound::persistence::DieselJobRepository;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

/// Build the job ports, backed by PostgreSQL when a pool is configured and by
/// an in-memory fixture otherwise.
fn build_http_state(config: &ServerConfig) -> HttpState {
    let clock = Arc::new(mockable::DefaultClock);
    match &config.db_pool {
        Some(pool) => HttpState::from_service(Arc::new(JobService::new(
            Arc::new(DieselJobRepository::new(pool.clone())),
            clock,
        ))),
        None => {
            warn!("no database configured; serving jobs from an in-memory fixture");
            HttpState::from_service(Arc::new(JobService::new(
                Arc::new(FixtureJobRepository::new()),
                clock,
            )))
        }
    }
}

/// CORS policy for browser clients. An empty `allowed_origins` accepts any
/// origin.
fn cors_policy(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(["GET", "POST", "PUT", "PATCH", "DELETE"])
        .allowed_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([TRACE_ID_HEADER])
        .max_age(3600);
    if allowed_origins.is_empty() {
        return cors.allow_any_origin();
    }
    allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    cors: Cors,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(cors)
        .wrap(Trace)
        .configure(jobs::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is bound.
/// - `config`: pre-built [`ServerConfig`] with the bind address and optional pool.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));
    let ServerConfig {
        bind_addr,
        db_pool: _,
        cors_origins,
    } = config;

    let server = HttpServer::new(move || {
        build_app(
            server_health_state.clone(),
            http_state.clone(),
            cors_policy(&cors_origins),
        )
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
