use std::cmp::Ordering;

use serde_derive::Serialize;

use crate::models::kitsu::{
    CategoryAttributes, ChapterAttributes, CharacterAttributes, GenreAttributes, KitsuCollection,
    KitsuResource, KitsuSingle, MangaAttributes,
};
use crate::pagination;

#[derive(Serialize, Debug)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
    pub count: u64,
}

#[derive(Serialize, Debug)]
pub struct MangaSummary {
    pub id: String,
    pub slug: Option<String>,
    pub title: String,
    pub synopsis: Option<String>,
    pub average_rating: Option<String>,
    pub chapter_count: Option<u32>,
    pub start_date: Option<String>,
    pub poster_image: Option<String>,
    pub cover_image: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct MangaDetail {
    pub id: String,
    pub slug: Option<String>,
    pub title: String,
    pub japanese_title: Option<String>,
    pub synopsis: String,
    pub status: Option<String>,
    pub age_rating: Option<String>,
    pub average_rating: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub chapter_count: Option<u32>,
    pub volume_count: Option<u32>,
    pub poster_image: Option<String>,
    pub cover_image: Option<String>,
    pub genres: Vec<GenreTag>,
    pub categories: Vec<String>,
}

#[derive(Serialize, Debug)]
pub struct GenreTag {
    pub id: String,
    pub name: String,
    pub slug: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct GenresPage {
    pub genres: Vec<GenreCard>,
    pub page: u32,
    pub has_next: bool,
}

#[derive(Serialize, Debug)]
pub struct GenreCard {
    pub id: String,
    pub name: String,
    pub slug: Option<String>,
    pub banner: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct CharacterSummary {
    pub id: String,
    pub name: String,
    pub slug: Option<String>,
    pub mal_id: Option<i64>,
    pub image: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct CharacterDetail {
    pub id: String,
    pub name: String,
    pub slug: Option<String>,
    pub mal_id: Option<i64>,
    pub description: String,
    pub other_names: Vec<String>,
    pub image: Option<String>,
    pub appearances: Vec<Appearance>,
}

#[derive(Serialize, Debug)]
pub struct Appearance {
    pub id: String,
    pub title: String,
    pub slug: Option<String>,
    pub poster_image: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct ChapterListing {
    pub manga: ChapterListingManga,
    pub total_chapters: usize,
    pub volumes: Vec<VolumeGroup>,
}

#[derive(Serialize, Debug)]
pub struct ChapterListingManga {
    pub id: String,
    pub slug: Option<String>,
    pub title: String,
    pub poster_image: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct VolumeGroup {
    pub volume: String,
    pub chapters: Vec<ChapterItem>,
}

#[derive(Serialize, Debug)]
pub struct ChapterItem {
    pub id: String,
    pub number: Option<f64>,
    pub title: Option<String>,
    pub published: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct ReaderView {
    pub manga: ReaderManga,
    pub chapter: ReaderChapter,
    pub page_urls: Vec<String>,
}

#[derive(Serialize, Debug)]
pub struct ReaderManga {
    pub id: String,
    pub title: String,
    pub cover_url: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct ReaderChapter {
    pub id: String,
    pub title: String,
    pub number: String,
    pub volume: Option<String>,
    pub pages: u32,
    pub prev_chapter: Option<String>,
    pub next_chapter: Option<String>,
}

pub fn manga_summary(resource: KitsuResource<MangaAttributes>) -> MangaSummary {
    let title = resource.attributes.preferred_title();
    let attributes = resource.attributes;
    MangaSummary {
        id: resource.id,
        slug: attributes.slug,
        title,
        synopsis: attributes.synopsis,
        average_rating: attributes.average_rating,
        chapter_count: attributes.chapter_count,
        start_date: attributes.start_date,
        poster_image: attributes.poster_image.as_ref().and_then(|image| image.best()),
        cover_image: attributes.cover_image.as_ref().and_then(|image| image.best()),
    }
}

pub fn paginate_manga(
    collection: KitsuCollection<MangaAttributes>,
    page: u32,
    page_size: u32,
) -> Paginated<MangaSummary> {
    let items: Vec<MangaSummary> = collection.data.into_iter().map(manga_summary).collect();
    let count = collection.meta
        .and_then(|meta| meta.count)
        .unwrap_or(items.len() as u64);
    Paginated {
        total_pages: pagination::total_pages(count, page_size),
        items,
        page,
        count,
    }
}

pub fn manga_detail(
    resource: KitsuResource<MangaAttributes>,
    genres: Vec<KitsuResource<GenreAttributes>>,
    categories: Vec<KitsuResource<CategoryAttributes>>,
) -> MangaDetail {
    let title = resource.attributes.preferred_title();
    let japanese_title = resource.attributes.japanese_title();
    let attributes = resource.attributes;
    MangaDetail {
        id: resource.id,
        slug: attributes.slug,
        title,
        japanese_title,
        synopsis: attributes.synopsis
            .unwrap_or_else(|| "No description available".to_string()),
        status: attributes.status,
        age_rating: attributes.age_rating,
        average_rating: attributes.average_rating,
        start_date: attributes.start_date,
        end_date: attributes.end_date,
        chapter_count: attributes.chapter_count,
        volume_count: attributes.volume_count,
        poster_image: attributes.poster_image.as_ref().and_then(|image| image.best()),
        cover_image: attributes.cover_image.as_ref().and_then(|image| image.best()),
        genres: genres.into_iter()
            .map(|genre| GenreTag {
                id: genre.id,
                name: genre.attributes.name.unwrap_or_default(),
                slug: genre.attributes.slug,
            })
            .collect(),
        categories: categories.into_iter()
            .filter_map(|category| category.attributes.title)
            .collect(),
    }
}

pub fn character_summary(resource: KitsuResource<CharacterAttributes>) -> CharacterSummary {
    let name = resource.attributes.preferred_name();
    let attributes = resource.attributes;
    CharacterSummary {
        id: resource.id,
        name,
        slug: attributes.slug,
        mal_id: attributes.mal_id,
        image: attributes.image.as_ref().and_then(|image| image.best()),
    }
}

pub fn character_detail(single: KitsuSingle<CharacterAttributes>) -> CharacterDetail {
    let appearances = single.included.unwrap_or_default().into_iter()
        .filter(|item| item.get("type").and_then(|kind| kind.as_str()) == Some("manga"))
        .map(|item| Appearance {
            id: item.get("id")
                .and_then(|id| id.as_str())
                .unwrap_or_default()
                .to_string(),
            title: item.pointer("/attributes/canonicalTitle")
                .and_then(|title| title.as_str())
                .or_else(|| item.pointer("/attributes/titles/en_jp").and_then(|title| title.as_str()))
                .unwrap_or("Unknown Title")
                .to_string(),
            slug: item.pointer("/attributes/slug")
                .and_then(|slug| slug.as_str())
                .map(str::to_string),
            poster_image: item.pointer("/attributes/posterImage/medium")
                .and_then(|image| image.as_str())
                .map(str::to_string),
        })
        .collect();

    let name = single.data.attributes.preferred_name();
    let attributes = single.data.attributes;
    CharacterDetail {
        id: single.data.id,
        name,
        slug: attributes.slug,
        mal_id: attributes.mal_id,
        description: attributes.description
            .unwrap_or_else(|| "No description available for this character.".to_string()),
        other_names: attributes.other_names.unwrap_or_default(),
        image: attributes.image.as_ref().and_then(|image| image.best()),
        appearances,
    }
}

/// Chapters without a volume number land in a trailing "none" group; numeric
/// volumes sort ascending and chapters within a volume by chapter number.
pub fn group_by_volume(chapters: Vec<KitsuResource<ChapterAttributes>>) -> Vec<VolumeGroup> {
    let mut groups: Vec<VolumeGroup> = Vec::new();
    for chapter in chapters {
        let volume = chapter.attributes.volume_number
            .map(|volume| volume.to_string())
            .unwrap_or_else(|| "none".to_string());
        let item = ChapterItem {
            id: chapter.id,
            number: chapter.attributes.number,
            title: chapter.attributes.canonical_title,
            published: chapter.attributes.published,
        };
        match groups.iter_mut().find(|group| group.volume == volume) {
            Some(group) => group.chapters.push(item),
            None => groups.push(VolumeGroup { volume, chapters: vec![item] }),
        }
    }

    for group in groups.iter_mut() {
        group.chapters.sort_by(|a, b| compare_numbers(a.number, b.number));
    }
    groups.sort_by(|a, b| match (a.volume.as_str(), b.volume.as_str()) {
        ("none", "none") => Ordering::Equal,
        ("none", _) => Ordering::Greater,
        (_, "none") => Ordering::Less,
        (left, right) => compare_numbers(left.parse().ok(), right.parse().ok()),
    });
    groups
}

fn compare_numbers(left: Option<f64>, right: Option<f64>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
