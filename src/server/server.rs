use anyhow::Result;
use std::time::{Duration, Instant};

use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;

use axum::{
    extract::State,
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

#[cfg(feature = "slowdown")]
use super::slowdown_request;
use super::{http_cache, log_requests, song_routes::song_routes, state::*, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.build_hash.clone(),
    };
    Json(stats)
}

pub fn make_app(config: ServerConfig, catalog: GuardedCatalogService) -> Result<Router> {
    let state = ServerState {
        config: config.clone(),
        start_time: Instant::now(),
        catalog,
        build_hash: env!("GIT_HASH").to_owned(),
    };

    let song_routes: Router = song_routes(&config)
        .layer(CorsLayer::permissive())
        .with_state(state.clone());

    // Stored assets, served at the prefix the catalog references resolve
    // against.
    let storage_routes: Router = Router::new()
        .fallback_service(ServeDir::new(&config.storage_dir))
        .layer(middleware::from_fn_with_state(
            config.content_cache_age_sec,
            http_cache,
        ))
        .layer(CorsLayer::permissive());

    let home_router: Router = match &config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    let mut app: Router = home_router
        .nest("/songs", song_routes)
        .nest("/storage", storage_routes);

    #[cfg(feature = "slowdown")]
    {
        app = app.layer(middleware::from_fn(slowdown_request));
    }
    app = app.layer(middleware::from_fn_with_state(
        config.requests_logging_level.clone(),
        log_requests,
    ));

    Ok(app)
}

pub async fn run_server(config: ServerConfig, catalog: GuardedCatalogService) -> Result<()> {
    let port = config.port;
    let app = make_app(config, catalog)?;

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    info!("Listening on port {}", port);

    Ok(axum::serve(listener, app).await?)
}
