use log::info;
use serde::de::DeserializeOwned;

use crate::models::errors::HttpError;
use crate::models::kitsu::{
    AnimeAttributes, CategoryAttributes, ChapterAttributes, CharacterAttributes, GenreAttributes,
    KitsuCollection, KitsuResource, KitsuSingle, MangaAttributes,
};
use crate::pagination;

const MANGA_FIELDS: &str = "canonicalTitle,coverImage,startDate,endDate,averageRating,synopsis,chapterCount,volumeCount,titles,posterImage,status,ageRating,slug";
const BROWSE_FIELDS: &str = "titles,canonicalTitle,coverImage,posterImage,averageRating,synopsis,chapterCount,startDate,slug";
const CHARACTER_FIELDS: &str = "slug,names,canonicalName,malId,image";
const CHARACTER_DETAIL_FIELDS: &str = "slug,names,canonicalName,malId,image,description,otherNames";

pub struct KitsuClient {
    client: reqwest::Client,
    base_url: String,
}

impl KitsuClient {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    pub async fn search_manga(
        &self,
        text: &str,
        page: u32,
        page_size: u32,
    ) -> Result<KitsuCollection<MangaAttributes>, HttpError> {
        self.get_json(&format!("{}/manga", self.base_url), &[
            ("filter[text]", text.to_string()),
            ("page[limit]", page_size.to_string()),
            ("page[offset]", pagination::offset(page, page_size).to_string()),
            ("fields[manga]", MANGA_FIELDS.to_string()),
        ]).await
    }

    pub async fn find_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<KitsuResource<MangaAttributes>>, HttpError> {
        let collection: KitsuCollection<MangaAttributes> = self
            .get_json(&format!("{}/manga", self.base_url), &[
                ("filter[slug]", slug.to_string()),
                ("fields[manga]", MANGA_FIELDS.to_string()),
            ])
            .await?;

        Ok(collection.data.into_iter().next())
    }

    pub async fn manga_by_genre(
        &self,
        genre: &str,
        page: u32,
        page_size: u32,
    ) -> Result<KitsuCollection<MangaAttributes>, HttpError> {
        self.get_json(&format!("{}/manga", self.base_url), &[
            ("sort", "-userCount".to_string()),
            ("filter[genres]", genre.to_string()),
            ("page[limit]", page_size.to_string()),
            ("page[offset]", pagination::offset(page, page_size).to_string()),
            ("fields[manga]", BROWSE_FIELDS.to_string()),
        ]).await
    }

    pub async fn trending_manga(&self) -> Result<KitsuCollection<MangaAttributes>, HttpError> {
        self.get_json(&format!("{}/trending/manga", self.base_url), &[
            ("limit", "10".to_string()),
            ("fields[manga]", BROWSE_FIELDS.to_string()),
        ]).await
    }

    pub async fn genres(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<KitsuCollection<GenreAttributes>, HttpError> {
        self.get_json(&format!("{}/genres", self.base_url), &[
            ("page[limit]", page_size.to_string()),
            ("page[offset]", pagination::offset(page, page_size).to_string()),
        ]).await
    }

    /// Banner image for a genre card, taken from the first anime in the genre.
    pub async fn genre_banner(&self, genre_name: &str) -> Result<Option<String>, HttpError> {
        let collection: KitsuCollection<AnimeAttributes> = self
            .get_json(&format!("{}/anime", self.base_url), &[
                ("filter[genres]", genre_name.to_string()),
                ("page[limit]", "1".to_string()),
            ])
            .await?;

        Ok(collection.data.into_iter().next().and_then(|anime| {
            anime.attributes.cover_image.as_ref().and_then(|image| image.large.clone())
        }))
    }

    pub async fn manga_genres(
        &self,
        manga_id: &str,
    ) -> Result<Vec<KitsuResource<GenreAttributes>>, HttpError> {
        let collection: KitsuCollection<GenreAttributes> = self
            .get_json(&format!("{}/manga/{}/genres", self.base_url, manga_id), &[])
            .await?;
        Ok(collection.data)
    }

    pub async fn manga_categories(
        &self,
        manga_id: &str,
    ) -> Result<Vec<KitsuResource<CategoryAttributes>>, HttpError> {
        let collection: KitsuCollection<CategoryAttributes> = self
            .get_json(&format!("{}/manga/{}/categories", self.base_url, manga_id), &[])
            .await?;
        Ok(collection.data)
    }

    /// First step of the character join: media-character records for a manga,
    /// only the ids matter.
    pub async fn manga_characters(
        &self,
        manga_id: &str,
    ) -> Result<Vec<KitsuResource<serde_json::Value>>, HttpError> {
        let collection: KitsuCollection<serde_json::Value> = self
            .get_json(&format!("{}/manga/{}/characters", self.base_url, manga_id), &[
                ("sort", "role".to_string()),
                ("page[limit]", "20".to_string()),
                ("fields[characters]", "id".to_string()),
            ])
            .await?;
        Ok(collection.data)
    }

    /// Second step: resolve one media-character record to its character.
    pub async fn media_character(
        &self,
        media_character_id: &str,
    ) -> Result<KitsuSingle<CharacterAttributes>, HttpError> {
        self.get_json(
            &format!("{}/media-characters/{}/character", self.base_url, media_character_id),
            &[("fields[characters]", CHARACTER_FIELDS.to_string())],
        ).await
    }

    pub async fn character(
        &self,
        character_id: &str,
    ) -> Result<KitsuSingle<CharacterAttributes>, HttpError> {
        self.get_json(&format!("{}/characters/{}", self.base_url, character_id), &[
            ("fields[characters]", CHARACTER_DETAIL_FIELDS.to_string()),
            ("include", "mediaCharacters.media".to_string()),
        ]).await
    }

    /// Walks `links.next` until the chapter list is exhausted.
    pub async fn manga_chapters_all(
        &self,
        manga_id: &str,
    ) -> Result<Vec<KitsuResource<ChapterAttributes>>, HttpError> {
        let first: KitsuCollection<ChapterAttributes> = self
            .get_json(&format!("{}/manga/{}/chapters", self.base_url, manga_id), &[
                ("page[limit]", "20".to_string()),
                ("sort", "number".to_string()),
            ])
            .await?;

        let mut chapters = first.data;
        let mut next = first.links.and_then(|links| links.next);
        while let Some(url) = next {
            let page: KitsuCollection<ChapterAttributes> = self.get_json(&url, &[]).await?;
            chapters.extend(page.data);
            next = page.links.and_then(|links| links.next);
        }

        Ok(chapters)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, HttpError> {
        let result = self.client.get(url)
            .query(query)
            .header("Accept", "application/vnd.api+json")
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
