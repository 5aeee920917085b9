use axum::routing::get;
use axum::Router;

use crate::app_state::AppState;
use crate::handlers::{catalog, characters, genres, proxy, reader};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/search", get(catalog::search))
        .route("/api/trending", get(catalog::trending))
        .route("/api/manga/:slug", get(catalog::manga_detail))
        .route("/api/manga/:slug/characters", get(characters::manga_characters))
        .route("/api/manga/:slug/chapters", get(catalog::manga_chapters))
        .route("/api/genres", get(genres::list_genres))
        .route("/api/genres/:slug/manga", get(genres::manga_by_genre))
        .route("/api/characters/:id", get(characters::character_detail))
        .route("/api/read/:slug/chapter/:number", get(reader::read_chapter))
        .route("/api/proxy", get(proxy::proxy_handler))
        .with_state(state)
}
