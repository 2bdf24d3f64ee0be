use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::extractors::{EntityId, JsonBody};
use crate::auth::Claims;
use crate::domain::drink::{DrinkDraft, DrinkLong, DrinkPatch, DrinkShort, RecipeInput};
use crate::domain::repositories::{DbError, DrinkRepository};
use crate::infrastructure::db::{self, DbPool};
use crate::infrastructure::repositories::SqliteDrinkRepository;

/// Request body for creating or patching a drink
#[derive(Debug, Deserialize)]
pub struct DrinkRequest {
    pub title: Option<String>,
    pub recipe: Option<RecipeInput>,
}

#[derive(Debug, Serialize)]
pub struct DrinksResponse<T> {
    pub success: bool,
    pub drinks: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct DrinkDeletedResponse {
    pub success: bool,
    pub delete: i64,
}

/// Public menu, recipes reduced to colors and parts
///
/// GET /drinks
pub async fn get_drinks(
    State(pool): State<DbPool>,
) -> Result<Json<DrinksResponse<DrinkShort>>, ApiError> {
    let mut conn = pool.acquire().await?;
    let drinks = SqliteDrinkRepository::new(&mut conn).list().await?;

    if drinks.is_empty() {
        return Err(ApiError::not_found("no drinks on the menu"));
    }

    Ok(Json(DrinksResponse {
        success: true,
        drinks: drinks.iter().map(|d| d.short()).collect(),
    }))
}

/// Full recipes
///
/// GET /drinks-detail (requires `get:drinks-detail`)
pub async fn get_drinks_detail(
    State(pool): State<DbPool>,
) -> Result<Json<DrinksResponse<DrinkLong>>, ApiError> {
    let mut conn = pool.acquire().await?;
    let drinks = SqliteDrinkRepository::new(&mut conn).list().await?;

    if drinks.is_empty() {
        return Err(ApiError::not_found("no drinks on the menu"));
    }

    Ok(Json(DrinksResponse {
        success: true,
        drinks: drinks.iter().map(|d| d.long()).collect(),
    }))
}

/// Create a drink
///
/// POST /drinks (requires `post:drinks`)
pub async fn create_drink(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    JsonBody(req): JsonBody<DrinkRequest>,
) -> Result<Json<DrinksResponse<DrinkLong>>, ApiError> {
    let draft = DrinkDraft::new(req.title, req.recipe)?;

    let mut tx = pool.begin().await?;
    let result = SqliteDrinkRepository::new(&mut tx).insert(&draft).await;
    let drink = db::finish(tx, result).await?;

    tracing::info!(drink_id = drink.id, by = %claims.sub, "drink created");

    Ok(Json(DrinksResponse {
        success: true,
        drinks: vec![drink.long()],
    }))
}

/// Update the title and/or recipe of a drink; omitted fields are kept
///
/// PATCH /drinks/:id (requires `patch:drinks`)
pub async fn update_drink(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    EntityId(id): EntityId,
    JsonBody(req): JsonBody<DrinkRequest>,
) -> Result<Json<DrinksResponse<DrinkLong>>, ApiError> {
    let patch = DrinkPatch {
        title: req.title,
        recipe: req.recipe,
    };

    let mut tx = pool.begin().await?;
    let result = async {
        let mut repo = SqliteDrinkRepository::new(&mut tx);
        let mut drink = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("drink", id))?;
        drink.apply(patch)?;
        repo.update(&drink).await?;
        Ok::<_, ApiError>(drink)
    }
    .await;
    let drink = db::finish(tx, result).await?;

    tracing::info!(drink_id = id, by = %claims.sub, "drink updated");

    Ok(Json(DrinksResponse {
        success: true,
        drinks: vec![drink.long()],
    }))
}

/// Delete a drink
///
/// DELETE /drinks/:id (requires `delete:drinks`)
pub async fn delete_drink(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    EntityId(id): EntityId,
) -> Result<Json<DrinkDeletedResponse>, ApiError> {
    let mut tx = pool.begin().await?;
    let result = SqliteDrinkRepository::new(&mut tx).delete(id).await;
    db::finish(tx, result).await?;

    tracing::info!(drink_id = id, by = %claims.sub, "drink deleted");

    Ok(Json(DrinkDeletedResponse {
        success: true,
        delete: id,
    }))
}
