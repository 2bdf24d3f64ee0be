/// Parsed listings search box input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTerm {
    /// "City, ST": exact match on both columns
    Location { city: String, state: String },
    /// Case-insensitive substring match on the name
    Name(String),
}

impl SearchTerm {
    /// Splits on the first comma into a location search, otherwise a name search
    ///
    /// # Example
    /// ```
    /// use fullstack_api::domain::listing::SearchTerm;
    ///
    /// assert_eq!(
    ///     SearchTerm::parse("San Francisco, CA"),
    ///     SearchTerm::Location { city: "San Francisco".into(), state: "CA".into() }
    /// );
    /// assert_eq!(SearchTerm::parse("Hop"), SearchTerm::Name("Hop".into()));
    /// ```
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(',') {
            Some((city, state)) => SearchTerm::Location {
                city: city.trim().to_string(),
                state: state.trim().to_string(),
            },
            None => SearchTerm::Name(raw.trim().to_string()),
        }
    }
}
