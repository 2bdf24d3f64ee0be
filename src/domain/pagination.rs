// Fixed-size paging over an already materialized result set

/// Page size used by the trivia question listings
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Returns the `[(page-1)*per_page, page*per_page)` slice of `items`
///
/// Pages below 1 and pages past the end yield an empty slice.
///
/// # Example
/// ```
/// use fullstack_api::domain::pagination::page_slice;
///
/// let items: Vec<i32> = (1..=25).collect();
/// assert_eq!(page_slice(&items, 3, 10), &[21, 22, 23, 24, 25]);
/// assert!(page_slice(&items, 4, 10).is_empty());
/// ```
pub fn page_slice<T>(items: &[T], page: i64, per_page: usize) -> &[T] {
    if page < 1 || per_page == 0 {
        return &[];
    }

    let start = match usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(per_page))
    {
        Some(start) if start < items.len() => start,
        _ => return &[],
    };
    let end = start.saturating_add(per_page).min(items.len());

    &items[start..end]
}

/// Parses a `page` query value, falling back to the first page
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|p| p.trim().parse().ok()).unwrap_or(1)
}
