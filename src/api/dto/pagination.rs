//! Pagination query parameters.

use serde::Deserialize;
use validator::Validate;

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    50
}

/// Standard page/per_page query parameters.
#[derive(Debug, Clone, Copy, Deserialize, Validate, utoipa::IntoParams)]
pub struct PaginationParams {
    /// 1-based page number
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u32,

    /// Rows per page (max 200)
    #[serde(default = "default_per_page")]
    #[validate(range(min = 1, max = 200))]
    pub per_page: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PaginationParams {
    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }

    pub fn offset(&self) -> i64 {
        (self.page.saturating_sub(1) as i64) * self.limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_zero_based() {
        let params = PaginationParams { page: 1, per_page: 50 };
        assert_eq!(params.offset(), 0);

        let params = PaginationParams { page: 3, per_page: 20 };
        assert_eq!(params.offset(), 40);
        assert_eq!(params.limit(), 20);
    }
}
