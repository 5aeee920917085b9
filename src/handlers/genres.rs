use axum::extract::{Path, Query, State};
use axum::Json;
use futures::future::join_all;

use crate::app_state::AppState;
use crate::handlers::PageParams;
use crate::models::errors::ApiError;
use crate::models::views;
use crate::models::views::{GenreCard, GenresPage, MangaSummary, Paginated};

pub async fn list_genres(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<GenresPage>, ApiError> {
    let page = params.page();
    let collection = state.kitsu.genres(page, state.config.page_size).await?;
    let has_next = collection.links
        .as_ref()
        .map(|links| links.next.is_some())
        .unwrap_or(false);

    // one banner lookup per genre, issued concurrently; a failed lookup
    // degrades to a card without a banner
    let banners = join_all(collection.data.iter().map(|genre| {
        let kitsu = state.kitsu.clone();
        let name = genre.attributes.name.clone().unwrap_or_default();
        async move { kitsu.genre_banner(&name).await.unwrap_or(None) }
    })).await;

    let genres = collection.data.into_iter()
        .zip(banners)
        .map(|(genre, banner)| GenreCard {
            id: genre.id,
            name: genre.attributes.name.unwrap_or_default(),
            slug: genre.attributes.slug,
            banner,
        })
        .collect();

    Ok(Json(GenresPage { genres, page, has_next }))
}

pub async fn manga_by_genre(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<Paginated<MangaSummary>>, ApiError> {
    let page = params.page();
    let page_size = state.config.page_size;
    let collection = state.kitsu.manga_by_genre(&slug, page, page_size).await?;

    Ok(Json(views::paginate_manga(collection, page, page_size)))
}
