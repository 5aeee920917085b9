use std::collections::HashMap;

use serde_derive::Deserialize;

/// Kitsu speaks JSON:API. Collections carry `meta.count` and `links.next`,
/// single-resource lookups may carry side-loaded resources in `included`.
#[derive(Deserialize, Debug)]
pub struct KitsuCollection<A> {
    pub data: Vec<KitsuResource<A>>,
    #[serde(default)]
    pub meta: Option<KitsuMeta>,
    #[serde(default)]
    pub links: Option<KitsuLinks>,
}

#[derive(Deserialize, Debug)]
pub struct KitsuSingle<A> {
    pub data: KitsuResource<A>,
    #[serde(default)]
    pub included: Option<Vec<serde_json::Value>>,
}

#[derive(Deserialize, Debug)]
pub struct KitsuResource<A> {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub attributes: A,
}

#[derive(Deserialize, Debug, Default)]
pub struct KitsuMeta {
    #[serde(default)]
    pub count: Option<u64>,
}

#[derive(Deserialize, Debug, Default)]
pub struct KitsuLinks {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
}

/// Sparse fieldsets mean any attribute can be absent, so everything defaults.
/// Title map values can be explicit nulls.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MangaAttributes {
    pub slug: Option<String>,
    pub canonical_title: Option<String>,
    pub titles: HashMap<String, Option<String>>,
    pub synopsis: Option<String>,
    pub average_rating: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub age_rating: Option<String>,
    pub chapter_count: Option<u32>,
    pub volume_count: Option<u32>,
    pub poster_image: Option<ImageSet>,
    pub cover_image: Option<ImageSet>,
}

impl MangaAttributes {
    pub fn preferred_title(&self) -> String {
        self.canonical_title.clone()
            .or_else(|| self.titles.get("en").cloned().flatten())
            .or_else(|| self.titles.get("en_jp").cloned().flatten())
            .or_else(|| self.titles.values().flatten().next().cloned())
            .unwrap_or_default()
    }

    pub fn japanese_title(&self) -> Option<String> {
        self.titles.get("ja_jp").cloned().flatten()
            .or_else(|| self.titles.get("ja").cloned().flatten())
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct ImageSet {
    pub tiny: Option<String>,
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
    pub original: Option<String>,
}

impl ImageSet {
    pub fn best(&self) -> Option<String> {
        self.original.clone()
            .or_else(|| self.large.clone())
            .or_else(|| self.medium.clone())
            .or_else(|| self.small.clone())
            .or_else(|| self.tiny.clone())
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct GenreAttributes {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct CategoryAttributes {
    pub title: Option<String>,
    pub slug: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AnimeAttributes {
    pub cover_image: Option<ImageSet>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ChapterAttributes {
    pub canonical_title: Option<String>,
    pub number: Option<f64>,
    pub volume_number: Option<i64>,
    pub published: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterAttributes {
    pub slug: Option<String>,
    pub canonical_name: Option<String>,
    pub names: Option<HashMap<String, Option<String>>>,
    pub other_names: Option<Vec<String>>,
    pub mal_id: Option<i64>,
    pub description: Option<String>,
    pub image: Option<ImageSet>,
}

impl CharacterAttributes {
    pub fn preferred_name(&self) -> String {
        self.canonical_name.clone()
            .or_else(|| {
                self.names.as_ref()
                    .and_then(|names| names.get("en").cloned().flatten())
            })
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferred_title_falls_back_in_order() {
        let mut attributes = MangaAttributes {
            canonical_title: Some("One Piece".to_string()),
            ..Default::default()
        };
        attributes.titles.insert("en_jp".to_string(), Some("Wan Pisu".to_string()));
        assert_eq!(attributes.preferred_title(), "One Piece");

        attributes.canonical_title = None;
        assert_eq!(attributes.preferred_title(), "Wan Pisu");

        attributes.titles.clear();
        assert_eq!(attributes.preferred_title(), "");
    }

    #[test]
    fn preferred_title_skips_null_title_values() {
        let mut attributes = MangaAttributes::default();
        attributes.titles.insert("en".to_string(), None);
        attributes.titles.insert("en_jp".to_string(), Some("Berserk".to_string()));
        assert_eq!(attributes.preferred_title(), "Berserk");
    }

    #[test]
    fn image_set_prefers_original() {
        let image = ImageSet {
            medium: Some("medium.jpg".to_string()),
            original: Some("original.jpg".to_string()),
            ..Default::default()
        };
        assert_eq!(image.best(), Some("original.jpg".to_string()));

        let image = ImageSet {
            tiny: Some("tiny.jpg".to_string()),
            ..Default::default()
        };
        assert_eq!(image.best(), Some("tiny.jpg".to_string()));
    }

    #[test]
    fn collection_deserializes_sparse_attributes() {
        let json = serde_json::json!({
            "data": [{"id": "1", "type": "manga", "attributes": {"slug": "one-piece"}}],
            "meta": {"count": 57},
            "links": {"next": "https://kitsu.io/api/edge/manga?page[offset]=20"}
        });
        let collection: KitsuCollection<MangaAttributes> =
            serde_json::from_value(json).unwrap();
        assert_eq!(collection.data.len(), 1);
        assert_eq!(collection.meta.unwrap().count, Some(57));
        assert!(collection.links.unwrap().next.is_some());
    }
}
