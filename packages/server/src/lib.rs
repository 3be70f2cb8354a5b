#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the voter reach platform.
//!
//! Serves the role-scoped engagement dashboard and the subordinate
//! account listing. The upstream auth layer resolves the session and
//! forwards the caller's member id in the `X-Member-Id` header; this
//! server loads the member record, resolves their viewer scope, and
//! assembles the rollup.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use switchy_database::Database;
use voter_reach_database::{db, run_migrations};
use voter_reach_engagement::dashboard::DashboardAssembler;
use voter_reach_engagement::placeholder::FixedPlaceholders;
use voter_reach_reference::ReferenceRegistry;

/// Shared application state.
pub struct AppState {
    /// Database connection for member record queries.
    pub db: Arc<dyn Database>,
    /// Dashboard assembler with the reference register and placeholder
    /// policy injected.
    pub assembler: Arc<DashboardAssembler>,
}

/// Starts the voter reach API server.
///
/// Connects to the database, runs migrations, builds the reference
/// registry and dashboard assembler, and starts the Actix-Web HTTP
/// server. This is a regular async function — the caller is responsible
/// for providing the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
///
/// # Panics
///
/// Panics if the database connection fails or migrations fail.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    log::info!("Connecting to database...");
    let db_conn = db::connect_from_env()
        .await
        .expect("Failed to connect to database");

    log::info!("Running migrations...");
    run_migrations(db_conn.as_ref())
        .await
        .expect("Failed to run migrations");

    let registry = Arc::new(ReferenceRegistry::nigeria());
    let assembler = Arc::new(DashboardAssembler::new(
        registry,
        Arc::new(FixedPlaceholders),
    ));

    let state = web::Data::new(AppState {
        db: Arc::from(db_conn),
        assembler,
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/dashboard/data", web::get().to(handlers::dashboard_data))
                    .route(
                        "/dashboard/subordinates",
                        web::get().to(handlers::subordinates),
                    ),
            )
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
