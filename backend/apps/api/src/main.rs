//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors are lowered to
//! problem documents inside each module.

mod config;

use auth::application::BootstrapSuperuserUseCase;
use auth::{PgUserRepository, actor_resolver_state, auth_router, middleware::resolve_actor};
use axum::{
    Router, http,
    http::{Method, header},
};
use catalog::{PgCatalogRepository, catalog_router};
use platform::mail::ConfiguredMailer;
use reviews::{PgReviewRepository, reviews_router};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,catalog=info,reviews=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let user_repo = PgUserRepository::new(pool.clone());

    // Superuser bootstrap; a failure here should not prevent server startup
    if let Some((user_name, email)) = &config.superuser {
        let bootstrap = BootstrapSuperuserUseCase::new(Arc::new(user_repo.clone()));
        match bootstrap.execute(user_name, email).await {
            Ok(user) => {
                tracing::info!(user_name = %user.user_name, "Superuser ready");
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Superuser bootstrap failed, continuing anyway"
                );
            }
        }
    }

    let mailer = ConfiguredMailer::from_relay_url(config.mail_relay_url.clone());
    if config.mail_relay_url.is_none() {
        tracing::info!("MAIL_RELAY_URL not set, confirmation codes go to the log");
    }

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let api = auth_router(user_repo.clone(), mailer, config.auth.clone())
        .merge(catalog_router(PgCatalogRepository::new(pool.clone())))
        .merge(reviews_router(PgReviewRepository::new(pool.clone())))
        .layer(axum::middleware::from_fn_with_state(
            actor_resolver_state(user_repo, config.auth.clone()),
            resolve_actor::<PgUserRepository>,
        ));

    let app = Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", config.listen_addr);

    let listener = TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
