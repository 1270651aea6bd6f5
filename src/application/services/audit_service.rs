//! API Call History Service
//!
//! Read side of the audit log. Writes go through the audit worker pool.

use std::sync::Arc;

use async_trait::async_trait;

use super::ServiceError;
use crate::domain::{
    ApiCallFilter, ApiCallRecord, ApiCallRepository, ApiCallSortField, Page, PageRequest,
    SortDirection,
};

#[async_trait]
pub trait ApiCallHistoryService: Send + Sync {
    /// Page of audit records matching `filter`.
    ///
    /// Only the unfiltered listing honours the requested ordering. Filtered
    /// listings are always newest first.
    async fn history(
        &self,
        filter: ApiCallFilter,
        page: PageRequest<ApiCallSortField>,
    ) -> Result<Page<ApiCallRecord>, ServiceError>;
}

pub struct ApiCallHistoryServiceImpl<R>
where
    R: ApiCallRepository + ?Sized,
{
    api_call_repo: Arc<R>,
}

impl<R> ApiCallHistoryServiceImpl<R>
where
    R: ApiCallRepository + ?Sized,
{
    pub fn new(api_call_repo: Arc<R>) -> Self {
        Self { api_call_repo }
    }
}

#[async_trait]
impl<R> ApiCallHistoryService for ApiCallHistoryServiceImpl<R>
where
    R: ApiCallRepository + ?Sized + 'static,
{
    async fn history(
        &self,
        filter: ApiCallFilter,
        mut page: PageRequest<ApiCallSortField>,
    ) -> Result<Page<ApiCallRecord>, ServiceError> {
        if filter != ApiCallFilter::All {
            page.sort_by = ApiCallSortField::Timestamp;
            page.direction = SortDirection::Desc;
        }

        Ok(self.api_call_repo.find_page(&filter, &page).await?)
    }
}
