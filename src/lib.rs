//! madang-rating library - mahjong game record keeping
//!
//! CRUD JSON API over SQLite for individual and team games, CSV
//! export/import for bulk interchange, and an embedded HTML frontend.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod points;
pub mod time;

pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{delete, get};

    // JSON API
    let api = Router::new()
        .route(
            "/api/games",
            get(api::games::list_games).post(api::games::create_game),
        )
        .route("/api/games/:id", delete(api::games::delete_game))
        .route(
            "/api/teams",
            get(api::teams::list_teams).post(api::teams::create_team),
        )
        .route("/api/teams/:id", delete(api::teams::delete_team))
        .route(
            "/api/team_members",
            get(api::teams::list_team_members).post(api::teams::create_team_member),
        )
        .route(
            "/api/team_members/:id",
            delete(api::teams::delete_team_member),
        )
        .route(
            "/api/team_games",
            get(api::teams::list_team_games).post(api::teams::create_team_game),
        )
        .route("/api/team_games/:id", delete(api::teams::delete_team_game))
        .route("/api/team_ranking", get(api::teams::team_ranking));

    // CSV interchange + pages
    let pages = Router::new()
        .route("/export", get(api::export::export_games))
        .route(
            "/import",
            get(api::import::import_form).post(api::import::import_games),
        )
        .route("/", get(api::ui::serve_index))
        .route("/static/style.css", get(api::ui::serve_style_css))
        .merge(api::health::health_routes());

    Router::new()
        .merge(api)
        .merge(pages)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
