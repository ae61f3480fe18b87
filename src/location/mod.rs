// 地点管理

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::database::LocationStore;
use crate::error::{AppError, StoreResultExt};
use crate::models::{Location, LocationDraft, Page, Pagination};

/// 经纬度必须是有限值且在合法范围内
pub fn validate_coordinates(lat: f64, lon: f64) -> Result<(), AppError> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(AppError::Validation(format!("latitude {lat} out of range")));
    }
    if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
        return Err(AppError::Validation(format!("longitude {lon} out of range")));
    }
    Ok(())
}

#[derive(Clone)]
pub struct LocationService {
    locations: Arc<dyn LocationStore>,
}

impl LocationService {
    pub fn new(locations: Arc<dyn LocationStore>) -> Self {
        Self { locations }
    }

    pub async fn create(&self, user_id: Uuid, draft: LocationDraft) -> Result<Location, AppError> {
        validate_coordinates(draft.lat, draft.lon)?;
        let location = self
            .locations
            .insert(user_id, draft)
            .await
            .during("insert location")?;

        info!(location_id = %location.id, %user_id, "location created");
        Ok(location)
    }

    pub async fn find(&self, location_id: Uuid) -> Result<Location, AppError> {
        self.locations
            .find_by_id(location_id)
            .await
            .during("find location")?
            .ok_or(AppError::NotFound("location"))
    }

    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        pagination: &Pagination,
    ) -> Result<Page<Location>, AppError> {
        self.locations
            .list_by_user(user_id, pagination)
            .await
            .during("list user locations")
    }

    /// 存储层再次按创建者过滤，非创建者的更新视为不存在
    pub async fn update(
        &self,
        location_id: Uuid,
        owner_id: Uuid,
        draft: LocationDraft,
    ) -> Result<Location, AppError> {
        validate_coordinates(draft.lat, draft.lon)?;
        let location = self
            .locations
            .update(location_id, owner_id, draft)
            .await
            .during("update location")?
            .ok_or(AppError::NotFound("location"))?;

        info!(%location_id, "location updated");
        Ok(location)
    }

    pub async fn delete(&self, location_id: Uuid, owner_id: Uuid) -> Result<(), AppError> {
        if !self
            .locations
            .soft_delete(location_id, owner_id)
            .await
            .during("delete location")?
        {
            return Err(AppError::NotFound("location"));
        }

        info!(%location_id, "location deleted");
        Ok(())
    }
}
