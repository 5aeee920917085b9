use std::collections::HashMap;

use serde_derive::Deserialize;

#[derive(Deserialize, Debug)]
pub struct MangaListResponse {
    #[serde(default)]
    pub data: Vec<MangadexManga>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MangadexManga {
    pub id: String,
    pub attributes: MangadexMangaAttributes,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MangadexMangaAttributes {
    pub title: HashMap<String, String>,
    pub alt_titles: Vec<HashMap<String, String>>,
    pub description: HashMap<String, String>,
    pub status: Option<String>,
    pub year: Option<i32>,
    pub content_rating: Option<String>,
}

impl MangadexMangaAttributes {
    pub fn preferred_title(&self) -> String {
        self.title.get("en").cloned()
            .or_else(|| self.title.values().next().cloned())
            .unwrap_or_default()
    }
}

/// Relationship attributes are expanded by `includes[]` and vary per type,
/// so they stay untyped.
#[derive(Deserialize, Debug, Clone)]
pub struct Relationship {
    pub id: String,
    #[serde(rename = "type")]
    pub rel_type: String,
    #[serde(default)]
    pub attributes: Option<serde_json::Value>,
}

#[derive(Deserialize, Debug)]
pub struct ChapterFeedResponse {
    #[serde(default)]
    pub data: Vec<MangadexChapter>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MangadexChapter {
    pub id: String,
    pub attributes: MangadexChapterAttributes,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MangadexChapterAttributes {
    pub chapter: Option<String>,
    pub volume: Option<String>,
    pub title: Option<String>,
    pub pages: u32,
    pub translated_language: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AtHomeResponse {
    pub base_url: String,
    #[serde(default)]
    pub chapter: Option<AtHomeChapter>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct AtHomeChapter {
    pub hash: String,
    pub data: Vec<String>,
    pub data_saver: Vec<String>,
}
