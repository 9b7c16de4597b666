use crate::error::{Error, Result};
use crate::models::{BucketCollection, SavedConfiguration};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// Body of the save call: upsert when `code` is present, create-new
/// otherwise.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRequest {
    pub buckets: BucketCollection,
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResponse {
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadResponse {
    pub buckets: BucketCollection,
}

/// Remote configuration store consumed by the sync layer. The
/// production implementation sits behind HTTP; tests and offline use
/// run on [`InMemoryRemoteStore`].
pub trait RemoteStore {
    /// Persists a snapshot. Overwrites the record at `code` when one
    /// is given; otherwise the store mints a new opaque code.
    fn save(
        &self,
        buckets: &BucketCollection,
        code: Option<&str>,
    ) -> impl std::future::Future<Output = Result<String>> + Send;

    /// Retrieves a snapshot; a miss is `Error::NotFound`.
    fn load(&self, code: &str) -> impl std::future::Future<Output = Result<BucketCollection>> + Send;
}

impl<T: RemoteStore + Sync> RemoteStore for &T {
    fn save(
        &self,
        buckets: &BucketCollection,
        code: Option<&str>,
    ) -> impl std::future::Future<Output = Result<String>> + Send {
        (**self).save(buckets, code)
    }

    fn load(&self, code: &str) -> impl std::future::Future<Output = Result<BucketCollection>> + Send {
        (**self).load(code)
    }
}

/// Mutex'd map standing in for the remote service.
#[derive(Debug, Default)]
pub struct InMemoryRemoteStore {
    records: Mutex<HashMap<String, SavedConfiguration>>,
}

impl InMemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_count(&self) -> usize {
        self.lock_records().len()
    }

    // A record insert cannot leave the map half-written, so a write
    // interrupted by a panic is still safe to read.
    fn lock_records(&self) -> std::sync::MutexGuard<'_, HashMap<String, SavedConfiguration>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn mint_code() -> String {
        Uuid::new_v4().simple().to_string()[..8].to_string()
    }

    /// Service-side save endpoint: upsert at the requested code, or
    /// mint one.
    fn handle_save(&self, request: SaveRequest) -> SaveResponse {
        let mut records = self.lock_records();
        let code = request.code.unwrap_or_else(Self::mint_code);
        records.insert(
            code.clone(),
            SavedConfiguration {
                code: code.clone(),
                buckets: request.buckets,
            },
        );
        SaveResponse { code }
    }

    /// Service-side load endpoint.
    fn handle_load(&self, code: &str) -> Result<LoadResponse> {
        let records = self.lock_records();
        records
            .get(code)
            .map(|record| LoadResponse {
                buckets: record.buckets.clone(),
            })
            .ok_or_else(|| Error::NotFound(format!("no saved configuration for code {code}")))
    }
}

impl RemoteStore for InMemoryRemoteStore {
    async fn save(&self, buckets: &BucketCollection, code: Option<&str>) -> Result<String> {
        let response = self.handle_save(SaveRequest {
            buckets: buckets.clone(),
            code: code.map(str::to_string),
        });
        Ok(response.code)
    }

    async fn load(&self, code: &str) -> Result<BucketCollection> {
        self.handle_load(code).map(|response| response.buckets)
    }
}
