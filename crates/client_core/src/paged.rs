//! Paged-query client: parameterized list requests against one REST
//! endpoint, normalized into [`PageEnvelope`]s.

use std::marker::PhantomData;

use async_trait::async_trait;
use shared::{
    domain::{FilterParam, SortParam},
    protocol::{PageEnvelope, PagedRecord},
};

use crate::{error::ClientError, transport::ApiTransport};

pub const DEFAULT_LIMIT: u32 = 10;
pub const LIMIT_CHOICES: [u32; 4] = [5, 10, 20, 50];

/// User-editable list request state for one entity. `page` must be reset to
/// 1 whenever any other field changes; [`crate::ListController`] enforces
/// that through its setters.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery<S, F> {
    pub page: u32,
    pub limit: u32,
    pub sort: S,
    pub search: String,
    pub status: Option<F>,
}

impl<S: SortParam, F: FilterParam> Default for ListQuery<S, F> {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            sort: S::default(),
            search: String::new(),
            status: None,
        }
    }
}

impl<S: SortParam, F: FilterParam> ListQuery<S, F> {
    /// Request parameters for this query. Empty search text and an absent
    /// status filter are omitted so the backend applies its own defaults.
    /// `search_param` differs per endpoint (`search` for packages, `q` for
    /// orders and contacts).
    pub fn to_pairs(&self, search_param: &str) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
            ("sort".to_string(), self.sort.as_param().to_string()),
        ];
        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push((search_param.to_string(), search.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status".to_string(), status.as_param().to_string()));
        }
        pairs
    }
}

/// Issues list fetches for one entity. Implemented by [`PagedQueryClient`]
/// and by in-memory doubles in tests.
#[async_trait]
pub trait PageFetcher<T, S: SortParam, F: FilterParam>: Send + Sync {
    async fn fetch_page(&self, query: &ListQuery<S, F>) -> Result<PageEnvelope<T>, ClientError>;
}

#[derive(Clone)]
pub struct PagedQueryClient<T> {
    transport: ApiTransport,
    path: &'static str,
    search_param: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<T: PagedRecord> PagedQueryClient<T> {
    pub fn new(transport: ApiTransport, path: &'static str, search_param: &'static str) -> Self {
        Self {
            transport,
            path,
            search_param,
            _record: PhantomData,
        }
    }

    pub async fn fetch<S: SortParam, F: FilterParam>(
        &self,
        query: &ListQuery<S, F>,
    ) -> Result<PageEnvelope<T>, ClientError> {
        self.transport
            .get_json(self.path, &query.to_pairs(self.search_param))
            .await
    }
}

#[async_trait]
impl<T: PagedRecord, S: SortParam, F: FilterParam> PageFetcher<T, S, F> for PagedQueryClient<T> {
    async fn fetch_page(&self, query: &ListQuery<S, F>) -> Result<PageEnvelope<T>, ClientError> {
        self.fetch(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::{NoFilter, OrderSort, OrderStatus, PackageSort};

    #[test]
    fn omits_empty_search_and_absent_status() {
        let query: ListQuery<PackageSort, NoFilter> = ListQuery::default();
        let pairs = query.to_pairs("search");
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "1".to_string()),
                ("limit".to_string(), "10".to_string()),
                ("sort".to_string(), "az".to_string()),
            ]
        );
    }

    #[test]
    fn includes_trimmed_search_and_status() {
        let query = ListQuery::<OrderSort, OrderStatus> {
            page: 2,
            limit: 20,
            sort: OrderSort::PriceDesc,
            search: "  budi  ".to_string(),
            status: Some(OrderStatus::Pending),
        };
        let pairs = query.to_pairs("q");
        assert!(pairs.contains(&("q".to_string(), "budi".to_string())));
        assert!(pairs.contains(&("status".to_string(), "PENDING".to_string())));
        assert!(pairs.contains(&("sort".to_string(), "price_desc".to_string())));
        assert!(pairs.contains(&("page".to_string(), "2".to_string())));
    }
}
