//! Library Dashboard Backend Server
//!
//! REST API server for the library book collection.

use library_dashboard_backend::api::create_router;
use library_dashboard_backend::config::Config;
use library_dashboard_backend::error::ErrorResponse;
use library_dashboard_backend::state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use library_dashboard_backend::models::{
    Book, BookPatch, CompaniesListResponse, CompanySummary, HealthResponse, MessageResponse,
    NewBook,
};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        library_dashboard_backend::api::handlers::health_check,
        library_dashboard_backend::api::handlers::create_books,
        library_dashboard_backend::api::handlers::list_books,
        library_dashboard_backend::api::handlers::get_book,
        library_dashboard_backend::api::handlers::update_book,
        library_dashboard_backend::api::handlers::delete_book,
        library_dashboard_backend::api::handlers::list_companies,
    ),
    components(
        schemas(
            HealthResponse,
            Book,
            NewBook,
            BookPatch,
            MessageResponse,
            CompanySummary,
            CompaniesListResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Books", description = "Book collection management"),
        (name = "Dashboard", description = "Candle dashboard support"),
    ),
    info(
        title = "Library Dashboard API",
        version = "0.1.0",
        description = "REST API for the library book collection",
        license(name = "MIT")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // A store that cannot be reached at startup is fatal.
    let state = match AppState::from_config(&config).await {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!("Failed to connect to the book store: {:#}", e);
            std::process::exit(1);
        }
    };

    let host = &config.server.host;
    let port = config.server.port;

    info!("Starting Library Dashboard Backend on {}:{}", host, port);
    info!(
        "Swagger UI available at http://{}:{}/swagger-ui/",
        host, port
    );

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = create_router(Arc::clone(&state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start the server
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.shutdown().await;
    info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = signal_or_pending("Ctrl-C", tokio::signal::ctrl_c());

    #[cfg(unix)]
    let terminate = signal_or_pending("SIGTERM", async {
        let mut signal =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
        signal.recv().await;
        Ok::<(), std::io::Error>(())
    });

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}

/// Waits for `signal`. A listener that cannot be installed never fires.
async fn signal_or_pending<F>(name: &str, signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        error!("Failed to listen for {}: {}", name, e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_failed_listener_never_fires() {
        let waited = tokio::time::timeout(
            Duration::from_millis(50),
            signal_or_pending("test", async {
                Err::<(), _>(std::io::Error::other("unsupported"))
            }),
        )
        .await;

        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn test_delivered_signal_fires() {
        let waited = tokio::time::timeout(
            Duration::from_millis(50),
            signal_or_pending("test", async { Ok::<(), std::io::Error>(()) }),
        )
        .await;

        assert!(waited.is_ok());
    }
}
