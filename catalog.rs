use crate::models::{Photo, TagGroup};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Taxonomy snapshot as delivered by the catalog service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyDocument {
    #[serde(default)]
    pub tag_groups: Vec<TagGroup>,
}

/// Photo catalog snapshot as delivered by the catalog service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhotosDocument {
    #[serde(default)]
    pub photos: Vec<Photo>,
}

/// Read-only catalog source. Snapshots are refreshed on demand, e.g.
/// the taxonomy on a language switch. Fetch failures degrade to empty
/// lists and never block the caller.
pub trait CatalogProvider {
    fn tag_groups(&self) -> Vec<TagGroup>;
    fn photos(&self) -> Vec<Photo>;
}

/// Catalog backed by two JSON documents on disk.
#[derive(Debug, Clone)]
pub struct JsonCatalogProvider {
    taxonomy_path: PathBuf,
    photos_path: PathBuf,
}

impl JsonCatalogProvider {
    pub fn new(taxonomy_path: impl Into<PathBuf>, photos_path: impl Into<PathBuf>) -> Self {
        Self {
            taxonomy_path: taxonomy_path.into(),
            photos_path: photos_path.into(),
        }
    }
}

impl CatalogProvider for JsonCatalogProvider {
    fn tag_groups(&self) -> Vec<TagGroup> {
        read_document::<TaxonomyDocument>(&self.taxonomy_path).tag_groups
    }

    fn photos(&self) -> Vec<Photo> {
        read_document::<PhotosDocument>(&self.photos_path).photos
    }
}

fn read_document<T: DeserializeOwned + Default>(path: &Path) -> T {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            log::warn!("Catalog fetch failed for {}: {err}", path.display());
            return T::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(doc) => doc,
        Err(err) => {
            log::warn!("Catalog document unreadable at {}: {err}", path.display());
            T::default()
        }
    }
}
