// 区域查询：矩形范围 + 可选群组范围 -> 分页结果

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::database::{LocationStore, MembershipStore, UserStore};
use crate::error::{AppError, StoreResultExt};
use crate::group::GroupAuthority;
use crate::models::{AreaBounds, GroupMember, Location, Page, Pagination};

#[derive(Clone)]
pub struct GeoFilter {
    locations: Arc<dyn LocationStore>,
    users: Arc<dyn UserStore>,
    members: Arc<dyn MembershipStore>,
    authority: GroupAuthority,
}

impl GeoFilter {
    pub fn new(
        locations: Arc<dyn LocationStore>,
        users: Arc<dyn UserStore>,
        members: Arc<dyn MembershipStore>,
        authority: GroupAuthority,
    ) -> Self {
        Self {
            locations,
            users,
            members,
            authority,
        }
    }

    /// 区域内的地点
    ///
    /// 指定 `group_scope` 时只保留群主和群成员创建的地点。
    pub async fn find_in_area(
        &self,
        bounds: &AreaBounds,
        pagination: &Pagination,
        group_scope: Option<Uuid>,
    ) -> Result<Page<Location>, AppError> {
        debug!(?bounds, ?group_scope, "finding locations in area");

        let scope = match group_scope {
            Some(group_id) => Some(self.authority.user_ids_in_scope(group_id).await?),
            None => None,
        };

        self.locations
            .find_in_area(bounds, scope.as_deref(), pagination)
            .await
            .during("find locations in area")
    }

    /// 当前坐标位于区域内的群成员
    pub async fn find_members_in_area(
        &self,
        group_id: Uuid,
        bounds: &AreaBounds,
        pagination: &Pagination,
    ) -> Result<Page<GroupMember>, AppError> {
        debug!(%group_id, ?bounds, "finding members in area");

        let user_ids = self
            .users
            .ids_in_area(bounds)
            .await
            .during("find users in area")?;
        if user_ids.is_empty() {
            return Ok(Page::new(Vec::new(), 0, pagination));
        }

        self.members
            .list_by_group_and_users(group_id, &user_ids, pagination)
            .await
            .during("list members in area")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use crate::models::LocationDraft;

    fn filter(store: &MemoryStore) -> (GroupAuthority, GeoFilter) {
        let authority = GroupAuthority::new(Arc::new(store.clone()), Arc::new(store.clone()));
        let geo = GeoFilter::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            authority.clone(),
        );
        (authority, geo)
    }

    fn draft(lat: f64, lon: f64) -> LocationDraft {
        LocationDraft {
            kind: "poi".into(),
            address: String::new(),
            title: format!("{lat},{lon}"),
            description: String::new(),
            lat,
            lon,
        }
    }

    fn first_page() -> Pagination {
        Pagination::new(1, 10).unwrap()
    }

    #[tokio::test]
    async fn point_inside_oriented_bounds_matches() {
        let store = MemoryStore::new();
        let alice = store.seed_user("alice").await;
        LocationStore::insert(&store, alice.id, draft(10.0, 10.0))
            .await
            .unwrap();
        let (_, geo) = filter(&store);

        let bounds = AreaBounds::new(0.0, 20.0, 20.0, 0.0).unwrap();
        let page = geo.find_in_area(&bounds, &first_page(), None).await.unwrap();
        assert_eq!(page.total, 1);

        let reversed = AreaBounds::new(20.0, 0.0, 0.0, 20.0).unwrap();
        let page = geo
            .find_in_area(&reversed, &first_page(), None)
            .await
            .unwrap();
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn group_scope_keeps_owner_and_members_only() {
        let store = MemoryStore::new();
        let owner = store.seed_user("owner").await;
        let alice = store.seed_user("alice").await;
        let bob = store.seed_user("bob").await;
        let group = store.seed_group(&owner, "Abc123").await;
        let (authority, geo) = filter(&store);
        authority.join("Abc123", alice.id).await.unwrap();
        for user in [&owner, &alice, &bob] {
            LocationStore::insert(&store, user.id, draft(10.0, 10.0))
                .await
                .unwrap();
        }

        let bounds = AreaBounds::new(0.0, 20.0, 20.0, 0.0).unwrap();
        let page = geo
            .find_in_area(&bounds, &first_page(), Some(group.id))
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        assert!(page.items.iter().all(|l| l.user_id != bob.id));
    }

    #[tokio::test]
    async fn unknown_scope_group_is_not_found() {
        let store = MemoryStore::new();
        let (_, geo) = filter(&store);

        let bounds = AreaBounds::new(0.0, 20.0, 20.0, 0.0).unwrap();
        let err = geo
            .find_in_area(&bounds, &first_page(), Some(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound("group")));
    }

    #[tokio::test]
    async fn area_results_are_paginated() {
        let store = MemoryStore::new();
        let alice = store.seed_user("alice").await;
        for i in 0..25 {
            LocationStore::insert(&store, alice.id, draft(1.0 + f64::from(i) * 0.1, 5.0))
                .await
                .unwrap();
        }
        let (_, geo) = filter(&store);
        let bounds = AreaBounds::new(0.0, 20.0, 20.0, 0.0).unwrap();

        let third = geo
            .find_in_area(&bounds, &Pagination::new(3, 10).unwrap(), None)
            .await
            .unwrap();
        assert_eq!(third.items.len(), 5);

        let fourth = geo
            .find_in_area(&bounds, &Pagination::new(4, 10).unwrap(), None)
            .await
            .unwrap();
        assert!(fourth.items.is_empty());
        assert_eq!(fourth.total, 25);
        assert_eq!(fourth.pages, 3);
    }

    #[tokio::test]
    async fn members_in_area_use_current_coordinates() {
        let store = MemoryStore::new();
        let owner = store.seed_user("owner").await;
        let alice = store.seed_user("alice").await;
        let bob = store.seed_user("bob").await;
        let carol = store.seed_user("carol").await;
        let group = store.seed_group(&owner, "Abc123").await;
        let (authority, geo) = filter(&store);
        authority.join("Abc123", alice.id).await.unwrap();
        authority.join("Abc123", bob.id).await.unwrap();
        store.set_coordinates(alice.id, 10.0, 10.0).await.unwrap();
        store.set_coordinates(bob.id, 50.0, 50.0).await.unwrap();
        // 不是成员，即使在区域内也不返回
        store.set_coordinates(carol.id, 10.0, 10.0).await.unwrap();

        let bounds = AreaBounds::new(0.0, 20.0, 20.0, 0.0).unwrap();
        let page = geo
            .find_members_in_area(group.id, &bounds, &first_page())
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].user_id, alice.id);
    }

    #[tokio::test]
    async fn nobody_in_area_gives_empty_page() {
        let store = MemoryStore::new();
        let owner = store.seed_user("owner").await;
        let group = store.seed_group(&owner, "Abc123").await;
        let (_, geo) = filter(&store);

        let bounds = AreaBounds::new(0.0, 20.0, 20.0, 0.0).unwrap();
        let page = geo
            .find_members_in_area(group.id, &bounds, &first_page())
            .await
            .unwrap();
        assert_eq!(page.total, 0);
        assert_eq!(page.pages, 0);
    }
}
