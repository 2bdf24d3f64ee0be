// Text matching shared by the search endpoints

/// Substring test after Unicode lowercasing both sides
///
/// # Example
/// ```
/// use fullstack_api::domain::text::contains_ignoring_case;
///
/// assert!(contains_ignoring_case("Café Élysée", "ÉLYSÉE"));
/// assert!(!contains_ignoring_case("Café Élysée", "lyon"));
/// ```
pub fn contains_ignoring_case(text: &str, term: &str) -> bool {
    text.to_lowercase().contains(&term.to_lowercase())
}
