use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::domain::repositories::{DbError, QuestionRepository};
use crate::domain::text::contains_ignoring_case;
use crate::domain::trivia::{NewQuestion, Question, QuizScope};

/// SQLite implementation of QuestionRepository
///
/// Wraps whatever connection the caller holds: a pooled connection for
/// reads, or a transaction for writes.
pub struct SqliteQuestionRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteQuestionRepository<'c> {
    /// Creates a repository over `conn`
    ///
    /// # Arguments
    /// * `conn` - Connection or transaction (both deref to `SqliteConnection`)
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<'c> QuestionRepository for SqliteQuestionRepository<'c> {
    async fn insert(&mut self, question: &NewQuestion) -> Result<Question, DbError> {
        let row = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (question, answer, difficulty, category_id)
            VALUES (?, ?, ?, ?)
            RETURNING id, question, answer, difficulty, category_id
            "#,
        )
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.difficulty)
        .bind(question.category_id)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(row)
    }

    async fn find_by_id(&mut self, id: i64) -> Result<Option<Question>, DbError> {
        let row = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question, answer, difficulty, category_id
            FROM questions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(row)
    }

    async fn list(&mut self) -> Result<Vec<Question>, DbError> {
        let rows = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question, answer, difficulty, category_id
            FROM questions
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows)
    }

    async fn list_by_category(&mut self, category_id: i64) -> Result<Vec<Question>, DbError> {
        let rows = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question, answer, difficulty, category_id
            FROM questions
            WHERE category_id = ?
            ORDER BY id
            "#,
        )
        .bind(category_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows)
    }

    async fn search(&mut self, term: &str) -> Result<Vec<Question>, DbError> {
        let rows = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question, answer, difficulty, category_id
            FROM questions
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows
            .into_iter()
            .filter(|row| contains_ignoring_case(&row.question, term))
            .collect())
    }

    async fn random_excluding(
        &mut self,
        scope: QuizScope,
        excluded: &[i64],
    ) -> Result<Option<Question>, DbError> {
        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT id, question, answer, difficulty, category_id FROM questions WHERE 1 = 1",
        );

        if let Some(category_id) = scope.category_id() {
            query.push(" AND category_id = ").push_bind(category_id);
        }

        if !excluded.is_empty() {
            query.push(" AND id NOT IN (");
            let mut ids = query.separated(", ");
            for id in excluded {
                ids.push_bind(*id);
            }
            ids.push_unseparated(")");
        }

        query.push(" ORDER BY RANDOM() LIMIT 1");

        let row = query
            .build_query_as::<Question>()
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(row)
    }

    async fn delete(&mut self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("question", id));
        }

        Ok(())
    }

    async fn count(&mut self) -> Result<i64, DbError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(total)
    }
}
