use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// 矩形查询区域
///
/// 点满足 lat1 < lat < lat2 且 lon2 < lon < lon1 时落在区域内。坐标不会被归一化：
/// 角点顺序颠倒的矩形不匹配任何点，而不是被自动纠正。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaBounds {
    pub lat1: f64,
    pub lon1: f64,
    pub lat2: f64,
    pub lon2: f64,
}

impl AreaBounds {
    /// 所有坐标必须是有限数值
    pub fn new(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<Self, AppError> {
        if ![lat1, lon1, lat2, lon2].iter().all(|c| c.is_finite()) {
            return Err(AppError::Validation(
                "area coordinates must be finite numbers".into(),
            ));
        }
        Ok(Self {
            lat1,
            lon1,
            lat2,
            lon2,
        })
    }

    /// lat1 < lat < lat2 且 lon2 < lon < lon1，边界不包含
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        self.lat1 < lat && lat < self.lat2 && self.lon2 < lon && lon < self.lon1
    }
}
