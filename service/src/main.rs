#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use voices_api::{
    build_info::BuildInfo,
    config::Config,
    http::{cors_layer, health_check, with_security_headers},
    pipeline::AdvocacyService,
    represent::{HttpRepresentClient, RepresentativeLookup},
    rest::{self, ApiDoc},
    templates::load_catalog,
};

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load and validate configuration first (fail-fast)
    let config = Config::load().map_err(|e| anyhow::anyhow!("{e}"))?;

    // RUST_LOG wins over the configured level when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "voices-api starting up"
    );

    let build_info = BuildInfo::from_env();
    tracing::info!(
        version = %build_info.version,
        git_sha = %build_info.git_sha,
        build_time = %build_info.build_time,
        "resolved build metadata"
    );

    // Templates are a startup snapshot; an empty set is fatal
    let catalog = Arc::new(load_catalog(&config.templates).await?);
    tracing::info!(
        templates = catalog.len(),
        party_groups = catalog.party_mapping().groups().len(),
        "template catalog ready"
    );

    let directory = Arc::new(HttpRepresentClient::from_config(&config.represent)?);
    tracing::info!(base_url = directory.base_url(), "representative directory configured");
    let service = AdvocacyService::new(RepresentativeLookup::new(directory), catalog);

    let mut app = Router::new()
        .nest("/api/v1", rest::router())
        .route("/health", get(health_check));

    if config.swagger.enabled {
        tracing::info!("Swagger UI enabled at /swagger-ui");
        app = app.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    let app = app
        .layer(Extension(service))
        .layer(Extension(build_info))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors.allowed_origins));
    let app = with_security_headers(app, &config.security_headers);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting server at http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shut down gracefully");
    Ok(())
}
