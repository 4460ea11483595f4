// HTTP handlers, one module per resource

pub mod branches;
pub mod crowd_data;
pub mod health;
pub mod predictions;
pub mod visitor_logs;

use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::domain::repositories::Page;

/// `?skip=&limit=` query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    pub fn page(&self) -> Result<Page, ApiError> {
        Page::new(self.skip, self.limit).map_err(ApiError::bad_request)
    }
}
