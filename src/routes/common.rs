// 各路由共用的请求结构

use serde::Deserialize;

use crate::{
    config::Config,
    error::AppError,
    models::{AreaBounds, Pagination},
};

/// `?page=&count_per_page=`，缺省为第1页和配置的默认页大小
#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u32>,
    pub count_per_page: Option<u32>,
}

impl PaginationQuery {
    pub fn resolve(&self, config: &Config) -> Result<Pagination, AppError> {
        let count = self.count_per_page.unwrap_or(config.default_page_size);
        if count > config.max_page_size {
            return Err(AppError::Validation(format!(
                "count_per_page must not exceed {}",
                config.max_page_size
            )));
        }
        Pagination::new(self.page.unwrap_or(1), count)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

/// 区域查询请求体
///
/// `upper_left_point` 给出 lat1/lon1，`bottom_right_point` 给出 lat2/lon2，坐标按原样使用。
#[derive(Debug, Deserialize)]
pub struct AreaRequest {
    pub upper_left_point: Point,
    pub bottom_right_point: Point,
}

impl AreaRequest {
    pub fn bounds(&self) -> Result<AreaBounds, AppError> {
        AreaBounds::new(
            self.upper_left_point.lat,
            self.upper_left_point.lon,
            self.bottom_right_point.lat,
            self.bottom_right_point.lon,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_limits() {
        let config = Config::for_tests();

        let p = PaginationQuery::default().resolve(&config).unwrap();
        assert_eq!((p.page(), p.count_per_page()), (1, config.default_page_size));

        let too_big = PaginationQuery {
            page: Some(1),
            count_per_page: Some(config.max_page_size + 1),
        };
        assert!(matches!(too_big.resolve(&config), Err(AppError::Validation(_))));

        let zero = PaginationQuery {
            page: Some(0),
            count_per_page: None,
        };
        assert!(matches!(zero.resolve(&config), Err(AppError::Validation(_))));
    }

    #[test]
    fn area_request_maps_corners() {
        let req: AreaRequest = serde_json::from_str(
            r#"{"upper_left_point":{"lat":0,"lon":20},"bottom_right_point":{"lat":20,"lon":0}}"#,
        )
        .unwrap();
        let bounds = req.bounds().unwrap();

        assert_eq!(bounds, AreaBounds::new(0.0, 20.0, 20.0, 0.0).unwrap());
        assert!(bounds.contains(10.0, 10.0));
    }
}
