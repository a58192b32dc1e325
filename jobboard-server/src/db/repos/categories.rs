//! Category repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Category, NewCategory};
use crate::store::StoreError;

const CATEGORY_COLUMNS: &str = "id, name, slug, description, created_at, updated_at";

/// Map a unique violation on `slug` to `Conflict`.
fn slug_conflict(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict {
            resource: "category",
            field: "slug",
        },
        _ => StoreError::Sqlx(err),
    }
}

pub struct CategoryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Category>, StoreError> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name, slug");
        let categories = sqlx::query_as::<_, Category>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(categories)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Category>, StoreError> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1");
        let category = sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(category)
    }

    pub async fn create(&self, category: NewCategory) -> Result<Category, StoreError> {
        let sql = format!(
            "INSERT INTO categories (name, slug, description) VALUES ($1, $2, $3) \
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&sql)
            .bind(&category.name)
            .bind(category.slug.as_str())
            .bind(category.description.as_deref())
            .fetch_one(self.pool)
            .await
            .map_err(slug_conflict)
    }

    pub async fn update(&self, id: Uuid, category: NewCategory) -> Result<Category, StoreError> {
        let sql = format!(
            "UPDATE categories SET name = $2, slug = $3, description = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .bind(&category.name)
            .bind(category.slug.as_str())
            .bind(category.description.as_deref())
            .fetch_optional(self.pool)
            .await
            .map_err(slug_conflict)?
            .ok_or_else(|| StoreError::not_found("category", id))
    }

    /// Delete a category. Its jobs stay, uncategorised.
    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("category", id));
        }
        Ok(())
    }
}
