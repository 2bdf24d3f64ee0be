use std::collections::BTreeMap;

/// Question category (Science, Art, ...)
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    #[sqlx(rename = "type")]
    pub kind: String,
}

/// Builds the `{id: type}` mapping the trivia endpoints return
pub fn category_map(categories: &[Category]) -> BTreeMap<i64, String> {
    categories
        .iter()
        .map(|c| (c.id, c.kind.clone()))
        .collect()
}
