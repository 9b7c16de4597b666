use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::{HashMap, HashSet};

/// Number of selection buckets in a configurator session.
pub const BUCKET_COUNT: usize = 5;

/// Maximum photos per bucket. Exceeding it is a caller-visible
/// rejection, never a silent clamp.
pub const BUCKET_CAPACITY: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagGroup {
    pub id: String,
    pub name: String,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub text: String,
    /// Tag ids; a set in spirit, order carries no meaning.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Photo {
    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tags.iter().any(|t| t == tag_id)
    }
}

/// Per-photo configuration attached while the photo sits in a bucket.
/// Created with defaults on select, destroyed on deselect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoConfig {
    pub forma: bool,
    pub acero: bool,
    pub encabado: bool,
    pub detalle1: bool,
    pub detalle2: bool,
    pub detalle3: bool,
    #[serde(default)]
    pub comentarios: String,
}

/// One of the five selection slots. `photo_configs` keys always equal
/// the `selected_photos` set; mutation goes through `BucketStore`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub selected_photos: Vec<String>,
    pub photo_configs: HashMap<String, PhotoConfig>,
}

impl Bucket {
    pub fn is_empty(&self) -> bool {
        self.selected_photos.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected_photos.len()
    }

    pub fn contains(&self, photo_id: &str) -> bool {
        self.selected_photos.iter().any(|p| p == photo_id)
    }

    /// Checks the selection/config pairing invariant, used when
    /// accepting externally sourced data (persisted or remote blobs).
    pub fn is_consistent(&self) -> bool {
        if self.selected_photos.len() > BUCKET_CAPACITY {
            return false;
        }
        let selected: HashSet<&str> = self.selected_photos.iter().map(String::as_str).collect();
        if selected.len() != self.selected_photos.len() {
            return false;
        }
        self.photo_configs.len() == selected.len()
            && self.photo_configs.keys().all(|k| selected.contains(k.as_str()))
    }
}

/// Fixed array of exactly `BUCKET_COUNT` buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCollection {
    pub buckets: [Bucket; BUCKET_COUNT],
}

impl Default for BucketCollection {
    fn default() -> Self {
        Self {
            buckets: Default::default(),
        }
    }
}

impl BucketCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_consistent(&self) -> bool {
        self.buckets.iter().all(Bucket::is_consistent)
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Bucket::is_empty)
    }
}

/// Durable snapshot addressed by an opaque server-minted share code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedConfiguration {
    pub code: String,
    pub buckets: BucketCollection,
}

/// Selected tag ids per facet group, keyed by group id. An empty or
/// absent set means the facet is inactive. The "tipo" group is not a
/// facet; it is driven by `FilterState::active_tab`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSelections {
    #[serde(default)]
    pub groups: HashMap<String, HashSet<String>>,
}

impl FacetSelections {
    pub fn selected(&self, group_id: &str) -> Option<&HashSet<String>> {
        self.groups.get(group_id).filter(|s| !s.is_empty())
    }

    pub fn toggle(&mut self, group_id: &str, tag_id: &str) {
        let set = self.groups.entry(group_id.to_string()).or_default();
        if !set.remove(tag_id) {
            set.insert(tag_id.to_string());
        }
    }

    pub fn clear_group(&mut self, group_id: &str) {
        self.groups.remove(group_id);
    }

    /// Group ids with at least one selected tag.
    pub fn active_groups(&self) -> impl Iterator<Item = (&str, &HashSet<String>)> {
        self.groups
            .iter()
            .filter(|(_, set)| !set.is_empty())
            .map(|(id, set)| (id.as_str(), set))
    }
}

/// Full filter state driving one evaluation of the filter engine.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// `None` = all tabs; otherwise a "tipo" tag id or the synthetic
    /// other-tab id.
    pub active_tab: Option<String>,
    #[serde(default)]
    pub facets: FacetSelections,
    #[serde(default)]
    pub search_query: String,
}
