use async_trait::async_trait;

use super::DbError;
use crate::domain::trivia::{NewQuestion, Question, QuizScope};

/// Repository trait for trivia questions
#[async_trait]
pub trait QuestionRepository: Send {
    /// Insert a question, returning the stored row
    async fn insert(&mut self, question: &NewQuestion) -> Result<Question, DbError>;

    /// Find a question by its ID
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Question>, DbError>;

    /// All questions ordered by id
    async fn list(&mut self) -> Result<Vec<Question>, DbError>;

    /// Questions in one category ordered by id
    async fn list_by_category(&mut self, category_id: i64) -> Result<Vec<Question>, DbError>;

    /// Case-insensitive substring match on the question text
    async fn search(&mut self, term: &str) -> Result<Vec<Question>, DbError>;

    /// One uniformly random question in `scope` whose id is not in `excluded`
    async fn random_excluding(
        &mut self,
        scope: QuizScope,
        excluded: &[i64],
    ) -> Result<Option<Question>, DbError>;

    /// Delete by ID; `NotFound` when no row matched
    async fn delete(&mut self, id: i64) -> Result<(), DbError>;

    /// Total number of questions
    async fn count(&mut self) -> Result<i64, DbError>;
}
