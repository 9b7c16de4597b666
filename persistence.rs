use crate::buckets::BucketStore;
use crate::db::{self, DbPool};
use crate::error::Result;
use crate::models::{BucketCollection, BUCKET_COUNT};

const SLOT_BUCKETS: &str = "buckets";
const SLOT_ACTIVE_BUCKET: &str = "active_bucket";
const SLOT_SHARE_CODE: &str = "share_code";

/// Snapshot read back at startup. Always well-formed: corrupt or
/// missing slots degrade to defaults instead of propagating.
#[derive(Debug, Clone, Default)]
pub struct PersistedState {
    pub collection: BucketCollection,
    pub active: usize,
    pub share_code: Option<String>,
}

/// Durable local half of the configurator state: the full bucket
/// collection, the active bucket index and the current share code,
/// each in its own named slot, written on every relevant change.
#[derive(Clone)]
pub struct StateStore {
    pool: DbPool,
}

impl StateStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Writes the bucket collection and active index slots.
    pub fn persist(&self, collection: &BucketCollection, active: usize) -> Result<()> {
        let conn = self.pool.get()?;
        let blob = serde_json::to_string(collection)?;
        db::write_slot(&conn, SLOT_BUCKETS, &blob)?;
        db::write_slot(&conn, SLOT_ACTIVE_BUCKET, &active.to_string())?;
        Ok(())
    }

    /// Convenience wrapper persisting the live store.
    pub fn persist_store(&self, store: &BucketStore) -> Result<()> {
        self.persist(store.collection(), store.active_index())
    }

    /// Records the share code minted or adopted for this session
    /// lineage; `None` clears it so the next save mints afresh.
    pub fn persist_share_code(&self, code: Option<&str>) -> Result<()> {
        let conn = self.pool.get()?;
        match code {
            Some(code) => db::write_slot(&conn, SLOT_SHARE_CODE, code),
            None => db::delete_slot(&conn, SLOT_SHARE_CODE),
        }
    }

    /// Reloads the prior session. Never fails: unreadable slots are
    /// logged and replaced by defaults, per the tolerate-corruption
    /// contract.
    pub fn restore(&self) -> PersistedState {
        let conn = match self.pool.get() {
            Ok(conn) => conn,
            Err(err) => {
                log::warn!("State database unavailable, starting fresh: {err}");
                return PersistedState::default();
            }
        };

        let collection = db::read_slot(&conn, SLOT_BUCKETS)
            .ok()
            .flatten()
            .and_then(|blob| match serde_json::from_str::<BucketCollection>(&blob) {
                Ok(collection) if collection.is_consistent() => Some(collection),
                Ok(_) => {
                    log::warn!("Persisted buckets violate invariants, discarding");
                    None
                }
                Err(err) => {
                    log::warn!("Persisted buckets unreadable, discarding: {err}");
                    None
                }
            })
            .unwrap_or_default();

        let active = db::read_slot(&conn, SLOT_ACTIVE_BUCKET)
            .ok()
            .flatten()
            .and_then(|raw| raw.parse::<usize>().ok())
            .filter(|&idx| idx < BUCKET_COUNT)
            .unwrap_or(0);

        let share_code = db::read_slot(&conn, SLOT_SHARE_CODE).ok().flatten();

        PersistedState {
            collection,
            active,
            share_code,
        }
    }
}
