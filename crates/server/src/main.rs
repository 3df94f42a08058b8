use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use room_editor_lib::project::{FileStore, ProjectStore};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

mod routes;

#[derive(Clone)]
pub struct AppState {
    pub projects: Arc<Mutex<ProjectStore<FileStore>>>,
}

impl AppState {
    pub fn new(store: FileStore) -> Self {
        Self {
            projects: Arc::new(Mutex::new(ProjectStore::new(store))),
        }
    }
}

pub fn app(state: AppState, assets_dir: PathBuf) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route(
            "/api/projects",
            get(routes::list_projects).post(routes::create_project),
        )
        .route(
            "/api/projects/current",
            get(routes::current_project).put(routes::set_current_project),
        )
        .route(
            "/api/projects/{id}",
            get(routes::get_project).put(routes::update_project),
        )
        .route("/api/projects/{id}/favorite", post(routes::toggle_favorite))
        .nest_service("/models", ServeDir::new(assets_dir))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn data_dir() -> Option<FileStore> {
    match std::env::var("ROOM_EDITOR_DATA_DIR") {
        Ok(dir) => Some(FileStore::new(dir)),
        Err(_) => FileStore::default_location(),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,room_editor_lib=info".into()),
        )
        .init();

    let Some(store) = data_dir() else {
        tracing::error!("No data directory; set ROOM_EDITOR_DATA_DIR");
        return;
    };
    tracing::info!("Project store at {}", store.dir().display());

    let assets_dir: PathBuf = std::env::var("ROOM_EDITOR_ASSETS_DIR")
        .unwrap_or_else(|_| "public/models".into())
        .into();
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3001);

    let app = app(AppState::new(store), assets_dir);

    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", port)).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind port {port}: {e}");
            return;
        }
    };
    tracing::info!("Server running on http://localhost:{port}");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {e}");
    }
}
