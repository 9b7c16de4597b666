use crate::buckets::{BucketStore, ConfigUpdate, SelectOutcome};
use crate::catalog::CatalogProvider;
use crate::db::DbPool;
use crate::error::Result;
use crate::filter;
use crate::models::{Bucket, FilterState, Photo};
use crate::persistence::StateStore;
use crate::remote::RemoteStore;
use crate::sync::SyncSession;
use crate::taxonomy::TagIndex;

/// Root of the catalog browser + configurator: catalog snapshots, the
/// filter state, the bucket store and both persistence halves, wired
/// so that every bucket mutation is followed by a durable write and a
/// reload restores the prior session.
pub struct Configurator<R: RemoteStore> {
    photos: Vec<Photo>,
    index: TagIndex,
    filter_state: FilterState,
    buckets: BucketStore,
    state_store: StateStore,
    sync: SyncSession<R>,
}

impl<R: RemoteStore> Configurator<R> {
    /// Fetches catalog snapshots and restores whatever the durable
    /// slots hold from the previous session.
    pub fn open(provider: &impl CatalogProvider, pool: DbPool, remote: R) -> Self {
        let state_store = StateStore::new(pool);
        let persisted = state_store.restore();
        Self {
            photos: provider.photos(),
            index: TagIndex::build(provider.tag_groups()),
            filter_state: FilterState::default(),
            buckets: BucketStore::from_parts(persisted.collection, persisted.active),
            sync: SyncSession::resume(remote, state_store.clone(), persisted.share_code),
            state_store,
        }
    }

    /// Re-fetches both snapshots and rebuilds the tag index, e.g.
    /// after a language switch. Bucket state is untouched.
    pub fn refresh_catalog(&mut self, provider: &impl CatalogProvider) {
        self.photos = provider.photos();
        self.index = TagIndex::build(provider.tag_groups());
    }

    pub fn tag_index(&self) -> &TagIndex {
        &self.index
    }

    pub fn buckets(&self) -> &BucketStore {
        &self.buckets
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter_state
    }

    pub fn share_code(&self) -> Option<&str> {
        self.sync.share_code()
    }

    // --- filtering ---------------------------------------------------

    pub fn set_active_tab(&mut self, tab: Option<&str>) {
        self.filter_state.active_tab = tab.map(str::to_string);
    }

    pub fn toggle_facet(&mut self, group_id: &str, tag_id: &str) {
        self.filter_state.facets.toggle(group_id, tag_id);
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.filter_state.search_query = query.to_string();
    }

    /// Current visible set, recomputed in full on every call.
    pub fn visible_photos(&self) -> Vec<&Photo> {
        filter::filter(&self.photos, &self.filter_state, &self.index)
    }

    // --- bucket events (each followed by a durable write) ------------

    pub fn select(&mut self, photo_id: &str) -> Result<SelectOutcome> {
        let outcome = self.buckets.select(photo_id);
        if outcome == SelectOutcome::Added {
            self.state_store.persist_store(&self.buckets)?;
        }
        Ok(outcome)
    }

    pub fn deselect(&mut self, photo_id: &str) -> Result<()> {
        self.buckets.deselect(photo_id);
        self.state_store.persist_store(&self.buckets)
    }

    pub fn switch_active(&mut self, index: usize) -> Result<()> {
        self.buckets.switch_active(index);
        self.state_store.persist_store(&self.buckets)
    }

    pub fn clear_bucket(&mut self, index: usize) -> Result<()> {
        self.buckets.clear(index);
        self.state_store.persist_store(&self.buckets)
    }

    pub fn update_config(&mut self, photo_id: &str, update: ConfigUpdate) -> Result<()> {
        self.buckets.update_config(photo_id, update);
        self.state_store.persist_store(&self.buckets)
    }

    /// Empties every bucket and ends the share lineage; the next save
    /// mints a fresh code.
    pub fn clear_all(&mut self) -> Result<()> {
        for index in 0..crate::models::BUCKET_COUNT {
            self.buckets.clear(index);
        }
        self.state_store.persist_store(&self.buckets)?;
        self.sync.start_new_share()
    }

    // --- remote share ------------------------------------------------

    pub async fn save_share(&mut self) -> Result<String> {
        self.sync.save(&self.buckets).await
    }

    /// Resolves a code-bearing URL: loads the remote snapshot and, on
    /// success, adopts it as current state. On any failure the
    /// in-memory state stays as it was.
    pub async fn open_share(&mut self, code: &str) -> Result<()> {
        let collection = self.sync.open_share(code).await?;
        self.buckets = BucketStore::from_parts(collection, 0);
        Ok(())
    }

    pub fn active_bucket(&self) -> &Bucket {
        self.buckets.active_bucket()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_database;
    use crate::models::{Tag, TagGroup};
    use crate::remote::InMemoryRemoteStore;

    struct FixedCatalog {
        groups: Vec<TagGroup>,
        photos: Vec<Photo>,
    }

    impl CatalogProvider for FixedCatalog {
        fn tag_groups(&self) -> Vec<TagGroup> {
            self.groups.clone()
        }

        fn photos(&self) -> Vec<Photo> {
            self.photos.clone()
        }
    }

    fn tag(id: &str, name: &str) -> Tag {
        Tag {
            id: id.into(),
            name: name.into(),
        }
    }

    fn photo(id: &str, tags: &[&str]) -> Photo {
        Photo {
            id: id.into(),
            url: format!("/{id}.jpg"),
            text: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn catalog() -> FixedCatalog {
        FixedCatalog {
            groups: vec![
                TagGroup {
                    id: "tipo".into(),
                    name: "Tipo".into(),
                    tags: vec![
                        tag("knife", "Cuchillo"),
                        tag("sheath", "Funda"),
                        tag("other1", "Machete"),
                    ],
                },
                TagGroup {
                    id: "acero".into(),
                    name: "Acero".into(),
                    tags: vec![tag("carbon", "Carbono"), tag("stainless", "Inoxidable")],
                },
            ],
            photos: vec![
                photo("p1", &["knife", "carbon"]),
                photo("p2", &["sheath", "stainless"]),
                photo("p3", &["other1", "carbon"]),
            ],
        }
    }

    #[test]
    fn selection_survives_a_reload() {
        let pool = init_memory_database().unwrap();
        {
            let mut configurator =
                Configurator::open(&catalog(), pool.clone(), InMemoryRemoteStore::new());
            configurator.select("p1").unwrap();
            configurator.switch_active(2).unwrap();
            configurator.select("p2").unwrap();
        }

        let reloaded = Configurator::open(&catalog(), pool, InMemoryRemoteStore::new());
        assert!(reloaded.buckets().bucket(0).unwrap().contains("p1"));
        assert_eq!(reloaded.buckets().active_index(), 2);
        assert!(reloaded.active_bucket().contains("p2"));
    }

    #[test]
    fn facet_and_tab_state_drive_the_visible_set() {
        let pool = init_memory_database().unwrap();
        let mut configurator = Configurator::open(&catalog(), pool, InMemoryRemoteStore::new());

        configurator.toggle_facet("acero", "carbon");
        let ids: Vec<&str> = configurator
            .visible_photos()
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["p1", "p3"]);

        configurator.set_active_tab(Some("knife"));
        let ids: Vec<&str> = configurator
            .visible_photos()
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["p1"]);
    }

    #[tokio::test]
    async fn share_round_trip_adopts_remote_buckets() {
        let remote = InMemoryRemoteStore::new();
        let code = {
            let pool = init_memory_database().unwrap();
            let mut sender = Configurator::open(&catalog(), pool, &remote);
            sender.select("p1").unwrap();
            sender.select("p3").unwrap();
            sender.save_share().await.unwrap()
        };

        let pool = init_memory_database().unwrap();
        let mut receiver = Configurator::open(&catalog(), pool, &remote);
        receiver.open_share(&code).await.unwrap();
        assert!(receiver.active_bucket().contains("p1"));
        assert!(receiver.active_bucket().contains("p3"));
        assert_eq!(receiver.share_code(), Some(code.as_str()));
    }

    #[tokio::test]
    async fn clear_all_ends_the_share_lineage() {
        let pool = init_memory_database().unwrap();
        let remote = InMemoryRemoteStore::new();
        let mut configurator = Configurator::open(&catalog(), pool, &remote);
        configurator.select("p1").unwrap();
        let code = configurator.save_share().await.unwrap();

        configurator.clear_all().unwrap();
        assert!(configurator.buckets().collection().is_empty());
        assert_eq!(configurator.share_code(), None);

        configurator.select("p2").unwrap();
        let fresh = configurator.save_share().await.unwrap();
        assert_ne!(fresh, code);
    }

    #[test]
    fn catalog_refresh_rebuilds_the_index_only() {
        let pool = init_memory_database().unwrap();
        let mut configurator = Configurator::open(&catalog(), pool, InMemoryRemoteStore::new());
        configurator.select("p1").unwrap();

        let mut translated = catalog();
        translated.groups[1].name = "Steel".into();
        configurator.refresh_catalog(&translated);

        assert_eq!(configurator.tag_index().group_name("acero"), "Steel");
        assert!(configurator.active_bucket().contains("p1"));
    }
}
