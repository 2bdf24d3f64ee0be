// Genres are kept in a single comma-separated column

/// Joins selected genres into the stored column value
pub fn join_genres(genres: &[String]) -> String {
    genres
        .iter()
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Splits the stored column back into a list
///
/// Tolerates the `{Jazz,Rock}` array-literal form older rows were written in.
pub fn split_genres(column: &str) -> Vec<String> {
    column
        .trim_matches(|c| c == '{' || c == '}' || c == ',')
        .split(',')
        .map(|g| g.trim().trim_matches('"').to_string())
        .filter(|g| !g.is_empty())
        .collect()
}
