use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::extractors::{lenient_i64, EntityId, JsonBody};
use crate::domain::pagination::{page_slice, parse_page, QUESTIONS_PER_PAGE};
use crate::domain::repositories::{CategoryRepository, DbError, QuestionRepository};
use crate::domain::trivia::{category, NewQuestion, QuestionView, QuizScope};
use crate::infrastructure::db::{self, DbPool};
use crate::infrastructure::repositories::{SqliteCategoryRepository, SqliteQuestionRepository};

/// `?page=N`; anything unparseable means page 1
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: BTreeMap<i64, String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionPage {
    pub success: bool,
    pub questions: Vec<QuestionView>,
    pub total_questions: usize,
    pub current_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<BTreeMap<i64, String>>,
}

/// Request body for creating a question
#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub difficulty: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub category: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub created: i64,
    pub total_questions: i64,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: i64,
    pub total_questions: i64,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuizCategory {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Vec<i64>,
    pub quiz_category: Option<QuizCategory>,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<QuestionView>,
}

/// List all categories
///
/// GET /categories
pub async fn get_categories(
    State(pool): State<DbPool>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let mut conn = pool.acquire().await?;
    let categories = SqliteCategoryRepository::new(&mut conn).list().await?;

    Ok(Json(CategoriesResponse {
        success: true,
        categories: category::category_map(&categories),
    }))
}

/// One page of every question, ordered by id
///
/// GET /questions?page=N
pub async fn get_questions(
    State(pool): State<DbPool>,
    Query(query): Query<PageQuery>,
) -> Result<Json<QuestionPage>, ApiError> {
    let page = parse_page(query.page.as_deref());

    let mut conn = pool.acquire().await?;
    let questions = SqliteQuestionRepository::new(&mut conn).list().await?;
    let categories = SqliteCategoryRepository::new(&mut conn).list().await?;

    let current: Vec<QuestionView> = page_slice(&questions, page, QUESTIONS_PER_PAGE)
        .iter()
        .map(|q| q.format())
        .collect();

    if current.is_empty() {
        return Err(ApiError::not_found(format!("question page {}", page)));
    }

    Ok(Json(QuestionPage {
        success: true,
        questions: current,
        total_questions: questions.len(),
        current_category: None,
        categories: Some(category::category_map(&categories)),
    }))
}

/// One page of a category's questions
///
/// GET /categories/:id/questions?page=N
pub async fn get_category_questions(
    State(pool): State<DbPool>,
    EntityId(category_id): EntityId,
    Query(query): Query<PageQuery>,
) -> Result<Json<QuestionPage>, ApiError> {
    let page = parse_page(query.page.as_deref());

    let mut conn = pool.acquire().await?;
    let questions = SqliteQuestionRepository::new(&mut conn)
        .list_by_category(category_id)
        .await?;

    Ok(Json(QuestionPage {
        success: true,
        questions: page_slice(&questions, page, QUESTIONS_PER_PAGE)
            .iter()
            .map(|q| q.format())
            .collect(),
        total_questions: questions.len(),
        current_category: Some(category_id.to_string()),
        categories: None,
    }))
}

/// Create a question
///
/// POST /questions
pub async fn create_question(
    State(pool): State<DbPool>,
    JsonBody(req): JsonBody<CreateQuestionRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let new_question = NewQuestion::new(req.question, req.answer, req.difficulty, req.category)?;

    let mut tx = pool.begin().await?;
    let result = async {
        let mut repo = SqliteQuestionRepository::new(&mut tx);
        let question = repo.insert(&new_question).await?;
        let total = repo.count().await?;
        Ok::<_, DbError>((question, total))
    }
    .await;
    let (question, total_questions) = db::finish(tx, result).await?;

    tracing::info!(question_id = question.id, "question created");

    Ok(Json(CreatedResponse {
        success: true,
        created: question.id,
        total_questions,
    }))
}

/// Delete a question
///
/// DELETE /questions/:id
pub async fn delete_question(
    State(pool): State<DbPool>,
    EntityId(id): EntityId,
) -> Result<Json<DeletedResponse>, ApiError> {
    let mut tx = pool.begin().await?;
    let result = async {
        let mut repo = SqliteQuestionRepository::new(&mut tx);
        repo.delete(id).await?;
        repo.count().await
    }
    .await;
    let total_questions = db::finish(tx, result).await?;

    tracing::info!(question_id = id, "question deleted");

    Ok(Json(DeletedResponse {
        success: true,
        deleted: id,
        total_questions,
    }))
}

/// Case-insensitive substring search over question text
///
/// POST /questions/search
pub async fn search_questions(
    State(pool): State<DbPool>,
    JsonBody(req): JsonBody<SearchRequest>,
) -> Result<Json<QuestionPage>, ApiError> {
    let term = req
        .search_term
        .ok_or_else(|| ApiError::ValidationFailed("searchTerm is required".to_string()))?;

    let mut conn = pool.acquire().await?;
    let questions = SqliteQuestionRepository::new(&mut conn).search(&term).await?;

    Ok(Json(QuestionPage {
        success: true,
        total_questions: questions.len(),
        questions: questions.iter().map(|q| q.format()).collect(),
        current_category: None,
        categories: None,
    }))
}

/// Next quiz question not yet seen by the player
///
/// POST /quizzes
pub async fn next_quiz_question(
    State(pool): State<DbPool>,
    JsonBody(req): JsonBody<QuizRequest>,
) -> Result<Json<QuizResponse>, ApiError> {
    let category_id = req
        .quiz_category
        .ok_or_else(|| ApiError::ValidationFailed("quiz_category is required".to_string()))?
        .id
        .ok_or_else(|| ApiError::ValidationFailed("quiz_category.id is required".to_string()))?;
    let scope = QuizScope::from_category_id(category_id);

    let mut conn = pool.acquire().await?;
    let question = SqliteQuestionRepository::new(&mut conn)
        .random_excluding(scope, &req.previous_questions)
        .await?;

    Ok(Json(QuizResponse {
        success: true,
        question: question.map(|q| q.format()),
    }))
}
