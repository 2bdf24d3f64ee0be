/// Which questions a quiz draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    /// Every category ("ALL" in the quiz picker, sent as id 0)
    All,
    Category(i64),
}

impl QuizScope {
    pub fn from_category_id(id: i64) -> Self {
        if id == 0 {
            QuizScope::All
        } else {
            QuizScope::Category(id)
        }
    }

    pub fn category_id(&self) -> Option<i64> {
        match self {
            QuizScope::All => None,
            QuizScope::Category(id) => Some(*id),
        }
    }
}
