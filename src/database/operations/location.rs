// 地点存储库

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::limit_offset;
use crate::database::models::LocationEntity;
use crate::database::{LocationStore, StoreResult};
use crate::models::{AreaBounds, Location, LocationDraft, Page, Pagination};

const LOCATION_COLUMNS: &str = "id, user_id, type, address, title, description, lat, lon, \
                                created_at, updated_at, deleted_at";

// lat1 < lat < lat2 且 lon2 < lon < lon1，不做角点归一化
const IN_AREA: &str = "lat > $1 AND lat < $2 AND lon < $3 AND lon > $4 AND deleted_at IS NULL";

#[derive(Clone)]
pub struct LocationOperation {
    db: PgPool,
}

impl LocationOperation {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LocationStore for LocationOperation {
    async fn insert(&self, user_id: Uuid, draft: LocationDraft) -> StoreResult<Location> {
        let sql = format!(
            r#"
            INSERT INTO locations (
                id, user_id, type, address, title, description, lat, lon, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
            RETURNING {LOCATION_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, LocationEntity>(&sql)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(&draft.kind)
            .bind(&draft.address)
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(draft.lat)
            .bind(draft.lon)
            .fetch_one(&self.db)
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Location>> {
        let sql =
            format!("SELECT {LOCATION_COLUMNS} FROM locations WHERE id = $1 AND deleted_at IS NULL");
        let row = sqlx::query_as::<_, LocationEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(row.map(Location::from))
    }

    async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        draft: LocationDraft,
    ) -> StoreResult<Option<Location>> {
        let sql = format!(
            r#"
            UPDATE locations
            SET type = $3, address = $4, title = $5, description = $6,
                lat = $7, lon = $8, updated_at = NOW()
            WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
            RETURNING {LOCATION_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, LocationEntity>(&sql)
            .bind(id)
            .bind(owner_id)
            .bind(&draft.kind)
            .bind(&draft.address)
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(draft.lat)
            .bind(draft.lon)
            .fetch_optional(&self.db)
            .await?;

        Ok(row.map(Location::from))
    }

    async fn soft_delete(&self, id: Uuid, owner_id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE locations SET deleted_at = NOW()
            WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        pagination: &Pagination,
    ) -> StoreResult<Page<Location>> {
        let (limit, offset) = limit_offset(pagination);

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM locations WHERE user_id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id)
        .fetch_one(&self.db);
        let sql = format!(
            r#"
            SELECT {LOCATION_COLUMNS} FROM locations
            WHERE user_id = $1 AND deleted_at IS NULL
            ORDER BY created_at, id
            LIMIT $2 OFFSET $3
            "#
        );
        let rows = sqlx::query_as::<_, LocationEntity>(&sql)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db);

        let (total, rows) = futures_util::try_join!(total, rows)?;
        let items = rows.into_iter().map(Location::from).collect();
        Ok(Page::new(items, total as u64, pagination))
    }

    async fn find_in_area(
        &self,
        bounds: &AreaBounds,
        user_ids: Option<&[Uuid]>,
        pagination: &Pagination,
    ) -> StoreResult<Page<Location>> {
        let (limit, offset) = limit_offset(pagination);

        // $5 为空时不按用户过滤
        let filter = format!("{IN_AREA} AND ($5::UUID[] IS NULL OR user_id = ANY($5))");
        let count_sql = format!("SELECT COUNT(*) FROM locations WHERE {filter}");
        let sql = format!(
            r#"
            SELECT {LOCATION_COLUMNS} FROM locations
            WHERE {filter}
            ORDER BY created_at, id
            LIMIT $6 OFFSET $7
            "#
        );

        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(bounds.lat1)
            .bind(bounds.lat2)
            .bind(bounds.lon1)
            .bind(bounds.lon2)
            .bind(user_ids)
            .fetch_one(&self.db);
        let rows = sqlx::query_as::<_, LocationEntity>(&sql)
            .bind(bounds.lat1)
            .bind(bounds.lat2)
            .bind(bounds.lon1)
            .bind(bounds.lon2)
            .bind(user_ids)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db);

        let (total, rows) = futures_util::try_join!(total, rows)?;
        let items = rows.into_iter().map(Location::from).collect();
        Ok(Page::new(items, total as u64, pagination))
    }
}
