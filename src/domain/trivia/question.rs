use serde::Serialize;

use crate::domain::validation::{require_text, ValidationError};

/// Persisted trivia question
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub difficulty: i64,
    pub category_id: i64,
}

/// Wire shape of a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

impl Question {
    /// Projects the question into its JSON representation
    pub fn format(&self) -> QuestionView {
        QuestionView {
            id: self.id,
            question: self.question.clone(),
            answer: self.answer.clone(),
            category: self.category_id,
            difficulty: self.difficulty,
        }
    }
}

/// Validated payload for inserting a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub difficulty: i64,
    pub category_id: i64,
}

impl NewQuestion {
    /// Checks that every field is present
    ///
    /// The category reference itself is enforced by the store.
    ///
    /// # Example
    /// ```
    /// use fullstack_api::domain::trivia::NewQuestion;
    ///
    /// let q = NewQuestion::new(
    ///     Some("What is love?".to_string()),
    ///     Some("Baby don't hurt me".to_string()),
    ///     Some(5),
    ///     Some(2),
    /// ).expect("valid question");
    /// assert_eq!(q.category_id, 2);
    /// ```
    pub fn new(
        question: Option<String>,
        answer: Option<String>,
        difficulty: Option<i64>,
        category_id: Option<i64>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            question: require_text("question", question)?,
            answer: require_text("answer", answer)?,
            difficulty: difficulty.ok_or_else(|| ValidationError::missing("difficulty"))?,
            category_id: category_id.ok_or_else(|| ValidationError::missing("category"))?,
        })
    }
}
