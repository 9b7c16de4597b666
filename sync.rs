use crate::buckets::BucketStore;
use crate::error::{Error, Result};
use crate::models::BucketCollection;
use crate::persistence::StateStore;
use crate::remote::RemoteStore;

/// Remote half of configuration persistence: owns the share code for
/// one session lineage and keeps it mirrored in the durable state
/// store.
///
/// Calls take `&mut self`, so saves and loads are serialized by
/// construction; callers are expected to disable the save action
/// while one is in flight rather than overlap them.
pub struct SyncSession<R: RemoteStore> {
    remote: R,
    state: StateStore,
    code: Option<String>,
    pending_view: Option<String>,
}

impl<R: RemoteStore> SyncSession<R> {
    /// Resumes a session lineage; `code` is whatever the durable
    /// store restored, `None` for a fresh lineage.
    pub fn resume(remote: R, state: StateStore, code: Option<String>) -> Self {
        Self {
            remote,
            state,
            code,
            pending_view: None,
        }
    }

    /// The code addressing this lineage's remote record, once one has
    /// been minted or adopted.
    pub fn share_code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Pushes the current buckets to the remote store. Reuses the
    /// held code (upsert) so a lineage owns at most one remote
    /// record; a fresh code is minted only when none is held. The
    /// assigned code is adopted and persisted before returning.
    ///
    /// On failure nothing is adopted and local state stays
    /// authoritative.
    pub async fn save(&mut self, store: &BucketStore) -> Result<String> {
        let code = self
            .remote
            .save(store.collection(), self.code.as_deref())
            .await?;
        self.code = Some(code.clone());
        let state = self.state.clone();
        let minted = code.clone();
        tokio::task::spawn_blocking(move || state.persist_share_code(Some(&minted)))
            .await
            .map_err(|e| Error::Init(format!("Task join error: {e}")))??;
        Ok(code)
    }

    /// Loads the snapshot behind a share code (e.g. from a
    /// code-bearing URL) and, on success, adopts it: the code becomes
    /// the held one and the returned buckets overwrite the durable
    /// local state.
    ///
    /// A response that arrives after a newer `open_share` superseded
    /// this one is discarded without touching any state.
    pub async fn open_share(&mut self, code: &str) -> Result<BucketCollection> {
        self.pending_view = Some(code.to_string());
        let result = self.remote.load(code).await;
        if self.pending_view.as_deref() != Some(code) {
            return Err(Error::NotFound(format!("stale load response for {code}")));
        }
        self.pending_view = None;

        let buckets = result?;
        self.code = Some(code.to_string());
        let state = self.state.clone();
        let adopted_code = code.to_string();
        let snapshot = buckets.clone();
        tokio::task::spawn_blocking(move || {
            state.persist(&snapshot, 0)?;
            state.persist_share_code(Some(&adopted_code))
        })
        .await
        .map_err(|e| Error::Init(format!("Task join error: {e}")))??;
        Ok(buckets)
    }

    /// Drops the held code so the next save mints a fresh one. Called
    /// when the user clears all buckets or starts a new share.
    pub fn start_new_share(&mut self) -> Result<()> {
        self.code = None;
        self.pending_view = None;
        self.state.persist_share_code(None)
    }
}
