// 用户存储库

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::UserEntity;
use crate::database::{StoreResult, UserStore};
use crate::models::{AreaBounds, NewUser, User};

const USER_COLUMNS: &str =
    "id, name, email, password_hash, lat, lon, created_at, updated_at, deleted_at";

#[derive(Clone)]
pub struct UserOperation {
    db: PgPool,
}

impl UserOperation {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for UserOperation {
    async fn insert(&self, user: NewUser) -> StoreResult<User> {
        let sql = format!(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING {USER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, UserEntity>(&sql)
            .bind(Uuid::new_v4())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&self.db)
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL");
        let row = sqlx::query_as::<_, UserEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let sql =
            format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND deleted_at IS NULL");
        let row = sqlx::query_as::<_, UserEntity>(&sql)
            .bind(email)
            .fetch_optional(&self.db)
            .await?;

        Ok(row.map(User::from))
    }

    async fn update_profile(&self, id: Uuid, name: &str, email: &str) -> StoreResult<Option<User>> {
        let sql = format!(
            r#"
            UPDATE users SET name = $2, email = $3, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {USER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, UserEntity>(&sql)
            .bind(id)
            .bind(name)
            .bind(email)
            .fetch_optional(&self.db)
            .await?;

        Ok(row.map(User::from))
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users SET password_hash = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_coordinates(&self, id: Uuid, lat: f64, lon: f64) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users SET lat = $2, lon = $3, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(lat)
        .bind(lon)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn soft_delete(&self, id: Uuid) -> StoreResult<bool> {
        let result =
            sqlx::query("UPDATE users SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(&self.db)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ids_in_area(&self, bounds: &AreaBounds) -> StoreResult<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id FROM users
            WHERE lat > $1 AND lat < $2 AND lon < $3 AND lon > $4 AND deleted_at IS NULL
            "#,
        )
        .bind(bounds.lat1)
        .bind(bounds.lat2)
        .bind(bounds.lon1)
        .bind(bounds.lon2)
        .fetch_all(&self.db)
        .await?;

        Ok(ids)
    }
}
