use log::info;
use serde::de::DeserializeOwned;

use crate::models::errors::HttpError;
use crate::models::mangadex::{
    AtHomeChapter, AtHomeResponse, ChapterFeedResponse, MangaListResponse, MangadexChapter,
    MangadexManga,
};
use crate::slug;

const LICENSED_MESSAGE: &str =
    "This manga may not have readable chapters available on MangaDex. It might be a licensed series.";

pub struct MangadexClient {
    client: reqwest::Client,
    base_url: String,
    uploads_url: String,
}

impl MangadexClient {
    pub fn new(client: reqwest::Client, base_url: String, uploads_url: String) -> Self {
        Self { client, base_url, uploads_url }
    }

    /// MangaDex has no slug lookup. The slug becomes a title search; an exact
    /// case-insensitive match against any localized title wins, otherwise the
    /// first result. An unfiltered search is the fallback when the rated
    /// search comes back empty.
    pub async fn find_manga_by_slug(
        &self,
        manga_slug: &str,
    ) -> Result<Option<MangadexManga>, HttpError> {
        let term = slug::search_term(manga_slug);

        let rated = self.search_manga(&term, true).await?;
        if !rated.is_empty() {
            return Ok(best_match(rated, &term));
        }

        let unfiltered = self.search_manga(&term, false).await?;
        Ok(unfiltered.into_iter().next())
    }

    async fn search_manga(
        &self,
        term: &str,
        filter_ratings: bool,
    ) -> Result<Vec<MangadexManga>, HttpError> {
        let mut query: Vec<(&str, String)> = vec![
            ("title", term.to_string()),
            ("limit", "10".to_string()),
            ("includes[]", "cover_art".to_string()),
            ("includes[]", "author".to_string()),
            ("order[relevance]", "desc".to_string()),
        ];
        if filter_ratings {
            for rating in ["safe", "suggestive", "erotica"] {
                query.push(("contentRating[]", rating.to_string()));
            }
        }

        let response: MangaListResponse = self
            .get_json(&format!("{}/manga", self.base_url), &query)
            .await?;
        Ok(response.data)
    }

    /// English chapter feed in reading order, reduced to readable chapters
    /// (a page count and a chapter number). A feed that only contains
    /// unreadable chapters is the licensed-series case.
    pub async fn chapter_feed(&self, manga_id: &str) -> Result<Vec<MangadexChapter>, HttpError> {
        let mut query: Vec<(&str, String)> = vec![
            ("translatedLanguage[]", "en".to_string()),
            ("order[volume]", "asc".to_string()),
            ("order[chapter]", "asc".to_string()),
            ("limit", "500".to_string()),
        ];
        for rating in ["safe", "suggestive", "erotica", "pornographic"] {
            query.push(("contentRating[]", rating.to_string()));
        }

        let feed: ChapterFeedResponse = self
            .get_json(&format!("{}/manga/{}/feed", self.base_url, manga_id), &query)
            .await?;

        if feed.data.is_empty() {
            return Err(HttpError { message: "No chapters found".to_string() });
        }

        let readable: Vec<MangadexChapter> = feed.data.into_iter()
            .filter(|chapter| {
                chapter.attributes.pages > 0 && chapter.attributes.chapter.is_some()
            })
            .collect();

        if readable.is_empty() {
            return Err(HttpError { message: LICENSED_MESSAGE.to_string() });
        }

        Ok(readable)
    }

    /// At-home page-image manifest: a host, a content hash, and the filename
    /// lists for both quality levels.
    pub async fn at_home(&self, chapter_id: &str) -> Result<(String, AtHomeChapter), HttpError> {
        let response: AtHomeResponse = self
            .get_json(&format!("{}/at-home/server/{}", self.base_url, chapter_id), &[])
            .await?;

        match response.chapter {
            Some(chapter) => Ok((response.base_url, chapter)),
            None => Err(HttpError { message: "Chapter pages not found".to_string() }),
        }
    }

    pub fn cover_url(&self, manga: &MangadexManga) -> Option<String> {
        manga.relationships.iter()
            .find(|relationship| relationship.rel_type == "cover_art")
            .and_then(|relationship| relationship.attributes.as_ref())
            .and_then(|attributes| attributes.get("fileName"))
            .and_then(|file_name| file_name.as_str())
            .map(|file_name| format!("{}/covers/{}/{}", self.uploads_url, manga.id, file_name))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, HttpError> {
        let result = self.client.get(url)
            .query(query)
            .header("Accept", "application/json")
            .send().await
            .map_err(|err| HttpError { message: err.to_string() })?;

        info!("GET {} {}", result.url(), result.status());
        if !result.status().is_success() {
            return Err(HttpError { message: format!("{}, {}", result.status(), result.url()) });
        }

        result.json::<T>().await
            .map_err(|err| HttpError { message: err.to_string() })
    }
}

fn best_match(results: Vec<MangadexManga>, term: &str) -> Option<MangadexManga> {
    let needle = term.to_lowercase();
    if let Some(exact) = results.iter().find(|manga| {
        manga.attributes.title.values().any(|title| title.to_lowercase() == needle)
    }) {
        return Some(exact.clone());
    }
    results.into_iter().next()
}

pub fn page_urls(base_url: &str, chapter: &AtHomeChapter, data_saver: bool) -> Vec<String> {
    let (quality, files) = if data_saver {
        ("data-saver", &chapter.data_saver)
    } else {
        ("data", &chapter.data)
    };
    files.iter()
        .map(|file| format!("{}/{}/{}/{}", base_url, quality, chapter.hash, file))
        .collect()
}
