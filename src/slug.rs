/// MangaDex has no slug filter, so slugs turn back into title search terms.
pub fn search_term(slug: &str) -> String {
    slug.replace('-', " ")
}
