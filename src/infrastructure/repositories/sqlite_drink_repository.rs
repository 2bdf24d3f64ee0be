use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::SqliteConnection;

use crate::domain::drink::{Drink, DrinkDraft, Ingredient};
use crate::domain::repositories::{DbError, DrinkRepository};

/// Raw drinks row; `recipe` is the JSON-serialized ingredient list
#[derive(sqlx::FromRow)]
struct DrinkRow {
    id: i64,
    title: String,
    recipe: Json<Vec<Ingredient>>,
}

impl From<DrinkRow> for Drink {
    fn from(row: DrinkRow) -> Self {
        Drink {
            id: row.id,
            title: row.title,
            recipe: row.recipe.0,
        }
    }
}

/// SQLite implementation of DrinkRepository
pub struct SqliteDrinkRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteDrinkRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<'c> DrinkRepository for SqliteDrinkRepository<'c> {
    async fn list(&mut self) -> Result<Vec<Drink>, DbError> {
        let rows = sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drinks ORDER BY id")
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(rows.into_iter().map(Drink::from).collect())
    }

    async fn find_by_id(&mut self, id: i64) -> Result<Option<Drink>, DbError> {
        let row = sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drinks WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(row.map(Drink::from))
    }

    async fn insert(&mut self, draft: &DrinkDraft) -> Result<Drink, DbError> {
        let row = sqlx::query_as::<_, DrinkRow>(
            r#"
            INSERT INTO drinks (title, recipe)
            VALUES (?, ?)
            RETURNING id, title, recipe
            "#,
        )
        .bind(&draft.title)
        .bind(Json(&draft.recipe))
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(row.into())
    }

    async fn update(&mut self, drink: &Drink) -> Result<(), DbError> {
        let result = sqlx::query("UPDATE drinks SET title = ?, recipe = ? WHERE id = ?")
            .bind(&drink.title)
            .bind(Json(&drink.recipe))
            .bind(drink.id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("drink", drink.id));
        }

        Ok(())
    }

    async fn delete(&mut self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM drinks WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("drink", id));
        }

        Ok(())
    }

    async fn count(&mut self) -> Result<i64, DbError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM drinks")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(total)
    }
}
