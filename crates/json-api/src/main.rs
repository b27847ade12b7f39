//! Shopform JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    serve_static::StaticDir,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use shopform_app::{auth::SessionKey, context::AppContext};

use crate::{config::ServerConfig, observability::Observability, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod config;
mod extensions;
mod healthcheck;
mod observability;
mod shutdown;
mod state;
mod submissions;
#[cfg(test)]
mod test_helpers;

/// Shopform JSON API Server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = Observability::init(&config).unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Observability error: {e}");
        }

        process::exit(1);
    });

    let session_key = match SessionKey::new(config.auth.session_signing_key.as_bytes()) {
        Ok(key) => key,
        Err(key_error) => {
            error!("invalid session signing key: {key_error}");

            process::exit(1);
        }
    };

    info!("connecting to {}", config.database.redacted_url());

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        session_key,
        config.uploads.uploads_dir.clone(),
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let state = State::from_app_context(app, config.uploads.public_base_url.clone());

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(observability::request_logging)
        .hoop(remove_slash())
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(
            Router::with_path("uploads/{**path}")
                .get(StaticDir::new([config.uploads.uploads_dir.clone()]).auto_list(false)),
        )
        .push(
            Router::with_path("userdata")
                .hoop(submissions::storefront_errors)
                .hoop(auth::storefront::handler)
                .push(submissions::submit::router(config.uploads.upload_max_bytes))
                .push(Router::with_path("average-rating").get(submissions::average::handler)),
        )
        .push(
            Router::with_path("api")
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("submissions")
                        .get(submissions::index::handler)
                        .push(
                            Router::with_path("{submission}")
                                .get(submissions::get::handler)
                                .delete(submissions::delete::handler),
                        ),
                )
                .push(Router::with_path("admin").get(submissions::admin::handler)),
        );

    let doc = OpenApi::new("Shopform API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;

    observability.shutdown();
}
