//! In-memory request store.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use helphub_core::error::AppError;
use helphub_core::result::AppResult;
use helphub_core::types::RequestId;
use helphub_entity::request::{HelpRequest, RequestStatus};

use crate::store::RequestStore;

#[derive(Debug, Clone)]
struct StoredRequest {
    /// Insertion order, used for newest-first listing.
    seq: u64,
    request: HelpRequest,
}

/// `RequestStore` held in a `DashMap`.
///
/// The version compare-and-swap runs under the shard write lock of the
/// entry, so two writers on the same id never both see the old version.
#[derive(Debug, Clone, Default)]
pub struct MemoryRequestStore {
    requests: Arc<DashMap<RequestId, StoredRequest>>,
    next_seq: Arc<AtomicU64>,
}

impl MemoryRequestStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RequestStore for MemoryRequestStore {
    async fn find_by_id(&self, id: RequestId) -> AppResult<Option<HelpRequest>> {
        Ok(self.requests.get(&id).map(|entry| entry.request.clone()))
    }

    async fn find_all(&self, status: Option<RequestStatus>) -> AppResult<Vec<HelpRequest>> {
        let mut rows: Vec<StoredRequest> = self
            .requests
            .iter()
            .filter(|entry| status.is_none_or(|s| entry.request.status == s))
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by(|a, b| b.seq.cmp(&a.seq));
        Ok(rows.into_iter().map(|row| row.request).collect())
    }

    async fn create(&self, request: &HelpRequest) -> AppResult<HelpRequest> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        match self.requests.entry(request.id) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Request {} already exists",
                request.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(StoredRequest {
                    seq,
                    request: request.clone(),
                });
                Ok(request.clone())
            }
        }
    }

    async fn update_if_version(
        &self,
        request: &HelpRequest,
        expected_version: i64,
    ) -> AppResult<bool> {
        match self.requests.get_mut(&request.id) {
            Some(mut entry) if entry.request.version == expected_version => {
                entry.request = request.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_if_version(&self, id: RequestId, expected_version: i64) -> AppResult<bool> {
        Ok(self
            .requests
            .remove_if(&id, |_, entry| entry.request.version == expected_version)
            .is_some())
    }
}
