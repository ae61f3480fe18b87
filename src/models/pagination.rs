use serde::Serialize;

use crate::error::AppError;

/// 分页请求，页码从1开始
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    count_per_page: u32,
}

impl Pagination {
    /// 校验页码与每页数量，两者都必须 >= 1
    pub fn new(page: u32, count_per_page: u32) -> Result<Self, AppError> {
        if page == 0 {
            return Err(AppError::Validation("page must be at least 1".into()));
        }
        if count_per_page == 0 {
            return Err(AppError::Validation(
                "count_per_page must be at least 1".into(),
            ));
        }
        Ok(Self {
            page,
            count_per_page,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn count_per_page(&self) -> u32 {
        self.count_per_page
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.count_per_page)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.count_per_page)
    }

    /// pages = ceil(total / count_per_page)
    pub fn page_count(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.count_per_page))
    }
}

/// 分页结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, pagination: &Pagination) -> Self {
        Self {
            items,
            total,
            pages: pagination.page_count(total),
        }
    }

    /// 对已完整加载的结果集按页截取，超出范围的页返回空列表
    pub fn slice(all: Vec<T>, pagination: &Pagination) -> Self {
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .collect();
        Self::new(items, total, pagination)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            pages: self.pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_page_size() {
        assert!(matches!(
            Pagination::new(1, 0),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            Pagination::new(0, 10),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn offset_and_limit_follow_page() {
        let p = Pagination::new(3, 10).unwrap();
        assert_eq!(p.offset(), 20);
        assert_eq!(p.limit(), 10);
    }

    #[test]
    fn twenty_five_rows_make_three_pages() {
        let rows: Vec<u32> = (1..=25).collect();

        let third = Page::slice(rows.clone(), &Pagination::new(3, 10).unwrap());
        assert_eq!(third.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(third.total, 25);
        assert_eq!(third.pages, 3);

        let fourth = Page::slice(rows, &Pagination::new(4, 10).unwrap());
        assert!(fourth.items.is_empty());
        assert_eq!(fourth.total, 25);
        assert_eq!(fourth.pages, 3);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let page: Page<u32> = Page::slice(Vec::new(), &Pagination::new(1, 10).unwrap());
        assert_eq!(page.total, 0);
        assert_eq!(page.pages, 0);
    }
}
