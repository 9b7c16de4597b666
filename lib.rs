//! Faceted photo catalog browser and bucket configurator engine.
//!
//! Pure filtering (tabs, facet sets, diacritic-insensitive search)
//! over read-only catalog snapshots, a five-bucket selection state
//! machine with per-photo configuration, SQLite-backed local
//! durability and share-code synchronization against a remote
//! configuration store. Transport, catalog storage and rendering stay
//! behind the traits in [`catalog`] and [`remote`].

mod buckets;
mod catalog;
mod config;
mod db;
mod error;
mod filter;
mod models;
mod normalize;
mod persistence;
mod remote;
mod schema;
mod session;
mod sync;
mod taxonomy;

pub use buckets::{BucketStore, ConfigUpdate, SelectOutcome};
pub use catalog::{CatalogProvider, JsonCatalogProvider, PhotosDocument, TaxonomyDocument};
pub use config::AppPaths;
pub use db::{init_database, init_memory_database, DbConnection, DbPool};
pub use error::{Error, Result};
pub use filter::filter;
pub use models::{
    Bucket, BucketCollection, FacetSelections, FilterState, Photo, PhotoConfig,
    SavedConfiguration, Tag, TagGroup, BUCKET_CAPACITY, BUCKET_COUNT,
};
pub use normalize::normalize;
pub use persistence::{PersistedState, StateStore};
pub use remote::{InMemoryRemoteStore, LoadResponse, RemoteStore, SaveRequest, SaveResponse};
pub use session::Configurator;
pub use sync::SyncSession;
pub use taxonomy::{
    ResolvedTag, TabSpec, TagIndex, OTHER_TAB_ID, PRIMARY_TAB_COUNT, TIPO_GROUP_ID,
    UNKNOWN_GROUP_ID,
};
