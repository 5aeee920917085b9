/// Pagination math for Kitsu collections. Pages are 1-based; the total is
/// derived from the upstream-reported `meta.count`.
pub fn total_pages(count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    ((count + page_size as u64 - 1) / page_size as u64) as u32
}

pub fn offset(page: u32, page_size: u32) -> u32 {
    page.saturating_sub(1) * page_size
}
