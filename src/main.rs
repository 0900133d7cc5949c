use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wren_api::config::Config;
use wren_api::middleware::auth::JwtSecret;
use wren_api::middleware::metrics::count_hit;
use wren_api::{db, routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::from_env()?);

    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;
    info!("Database connected and migrations applied");

    let jwt_secret = JwtSecret(config.jwt_secret.clone());
    let state = AppState::new(pool, config.clone());

    let fileserver = Router::new()
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(axum_middleware::from_fn_with_state(state.clone(), count_hit));

    let app = Router::new()
        .route("/admin/healthz", get(routes::admin::health_check))
        .route("/admin/metrics", get(routes::admin::show_metrics))
        .route("/admin/reset", post(routes::admin::reset))
        // Sessions
        .route("/api/login", post(routes::auth::login))
        .route("/api/refresh", post(routes::auth::refresh))
        .route("/api/revoke", post(routes::auth::revoke))
        // Users
        .route("/api/users", post(routes::users::create_user).put(routes::users::update_credentials))
        // Posts
        .route("/api/posts", post(routes::posts::create_post).get(routes::posts::list_posts))
        .route("/api/posts/{id}", get(routes::posts::get_post).delete(routes::posts::delete_post))
        // Billing webhooks
        .route("/api/webhooks", post(routes::webhooks::handle_webhook))
        .nest_service("/app", fileserver)
        .layer(axum::Extension(jwt_secret))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("wren API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
