use crate::models::{Bucket, BucketCollection, PhotoConfig, BUCKET_CAPACITY, BUCKET_COUNT};

/// Result of a `select` event. `AtCapacity` is the caller-visible
/// rejection driving transient UI feedback; it leaves the bucket
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Added,
    AlreadySelected,
    AtCapacity,
}

/// One typed field update for a photo's configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigUpdate {
    Forma(bool),
    Acero(bool),
    Encabado(bool),
    Detalle1(bool),
    Detalle2(bool),
    Detalle3(bool),
    Comentarios(String),
}

/// Owns the five selection buckets and routes select/deselect events
/// to the active one. All mutations are synchronous and keep the
/// `photo_configs` keys equal to the `selected_photos` set.
#[derive(Debug, Clone, Default)]
pub struct BucketStore {
    collection: BucketCollection,
    active: usize,
}

impl BucketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrates a store from a persisted or remotely loaded
    /// snapshot.
    pub fn from_parts(collection: BucketCollection, active: usize) -> Self {
        Self {
            collection,
            active: if active < BUCKET_COUNT { active } else { 0 },
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_bucket(&self) -> &Bucket {
        &self.collection.buckets[self.active]
    }

    pub fn bucket(&self, index: usize) -> Option<&Bucket> {
        self.collection.buckets.get(index)
    }

    pub fn collection(&self) -> &BucketCollection {
        &self.collection
    }

    pub fn config_of(&self, photo_id: &str) -> Option<&PhotoConfig> {
        self.active_bucket().photo_configs.get(photo_id)
    }

    /// Appends a photo to the active bucket with a default config.
    pub fn select(&mut self, photo_id: &str) -> SelectOutcome {
        let bucket = &mut self.collection.buckets[self.active];
        if bucket.contains(photo_id) {
            return SelectOutcome::AlreadySelected;
        }
        if bucket.selected_photos.len() >= BUCKET_CAPACITY {
            return SelectOutcome::AtCapacity;
        }
        bucket.selected_photos.push(photo_id.to_string());
        bucket
            .photo_configs
            .insert(photo_id.to_string(), PhotoConfig::default());
        debug_assert!(bucket.is_consistent());
        SelectOutcome::Added
    }

    /// Removes a photo and its config together; a no-op for ids not
    /// in the active bucket.
    pub fn deselect(&mut self, photo_id: &str) {
        let bucket = &mut self.collection.buckets[self.active];
        bucket.selected_photos.retain(|p| p != photo_id);
        bucket.photo_configs.remove(photo_id);
        debug_assert!(bucket.is_consistent());
    }

    /// Retargets subsequent select/deselect events; out-of-range
    /// indexes are ignored. Bucket contents are untouched.
    pub fn switch_active(&mut self, index: usize) {
        if index < BUCKET_COUNT {
            self.active = index;
        } else {
            log::warn!("Ignoring switch to out-of-range bucket {index}");
        }
    }

    /// Resets one bucket to empty. Clearing the active bucket resets
    /// the active index to 0.
    pub fn clear(&mut self, index: usize) {
        let Some(bucket) = self.collection.buckets.get_mut(index) else {
            log::warn!("Ignoring clear of out-of-range bucket {index}");
            return;
        };
        *bucket = Bucket::default();
        if index == self.active {
            self.active = 0;
        }
    }

    /// Mutates one config field of a photo in the active bucket. Ids
    /// outside the current selection are silently absorbed; the UI
    /// should never produce them.
    pub fn update_config(&mut self, photo_id: &str, update: ConfigUpdate) {
        let bucket = &mut self.collection.buckets[self.active];
        let Some(config) = bucket.photo_configs.get_mut(photo_id) else {
            return;
        };
        match update {
            ConfigUpdate::Forma(v) => config.forma = v,
            ConfigUpdate::Acero(v) => config.acero = v,
            ConfigUpdate::Encabado(v) => config.encabado = v,
            ConfigUpdate::Detalle1(v) => config.detalle1 = v,
            ConfigUpdate::Detalle2(v) => config.detalle2 = v,
            ConfigUpdate::Detalle3(v) => config.detalle3 = v,
            ConfigUpdate::Comentarios(v) => config.comentarios = v,
        }
    }
}
