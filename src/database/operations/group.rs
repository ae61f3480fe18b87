// 群组存储库
// 包含群组相关的数据库操作

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::limit_offset;
use crate::database::models::GroupEntity;
use crate::database::{GroupStore, StoreResult};
use crate::models::{Group, NewGroup, Page, Pagination};

const GROUP_COLUMNS: &str =
    "id, title, description, user_id, access_code, created_at, updated_at, deleted_at";

/// 群组存储库，处理所有与群组相关的数据库操作
#[derive(Clone)]
pub struct GroupOperation {
    db: PgPool,
}

impl GroupOperation {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GroupStore for GroupOperation {
    async fn insert(&self, group: NewGroup) -> StoreResult<Group> {
        // 访问码冲突由 groups_access_code_active_uniq 索引拒绝
        let row = sqlx::query_as::<_, GroupEntity>(&format!(
            r#"
            INSERT INTO groups (id, title, description, user_id, access_code, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING {GROUP_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&group.title)
        .bind(&group.description)
        .bind(group.owner_user_id)
        .bind(&group.access_code)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Group>> {
        let row = sqlx::query_as::<_, GroupEntity>(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(Group::from))
    }

    async fn find_by_access_code(&self, code: &str) -> StoreResult<Option<Group>> {
        let row = sqlx::query_as::<_, GroupEntity>(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups WHERE access_code = $1 AND deleted_at IS NULL"
        ))
        .bind(code)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(Group::from))
    }

    async fn update(&self, id: Uuid, title: &str, description: &str) -> StoreResult<Option<Group>> {
        let row = sqlx::query_as::<_, GroupEntity>(&format!(
            r#"
            UPDATE groups
            SET title = $2, description = $3, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {GROUP_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(title)
        .bind(description)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(Group::from))
    }

    async fn soft_delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut tx = self.db.begin().await?;

        let result = sqlx::query(
            "UPDATE groups SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }

        // 群组删除时一并结束全部成员关系
        sqlx::query(
            "UPDATE group_members SET deleted_at = NOW() WHERE group_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn list(&self, pagination: &Pagination) -> StoreResult<Page<Group>> {
        let (limit, offset) = limit_offset(pagination);

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM groups WHERE deleted_at IS NULL",
        )
        .fetch_one(&self.db);
        let sql = format!(
            r#"
            SELECT {GROUP_COLUMNS} FROM groups
            WHERE deleted_at IS NULL
            ORDER BY created_at, id
            LIMIT $1 OFFSET $2
            "#
        );
        let rows = sqlx::query_as::<_, GroupEntity>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db);

        let (total, rows) = futures_util::try_join!(total, rows)?;
        let items = rows.into_iter().map(Group::from).collect();
        Ok(Page::new(items, total as u64, pagination))
    }
}
