use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppPaths {
    pub root: PathBuf,
    pub db_path: PathBuf,
    pub taxonomy_path: PathBuf,
    pub photos_path: PathBuf,
}

impl AppPaths {
    /// Lays out the on-disk locations under an application data root:
    /// the state database plus the two catalog documents.
    pub fn discover(root: impl Into<PathBuf>) -> Result<Self, crate::error::Error> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;

        let db_path = root.join("configurator.db");
        let catalog_dir = root.join("catalog");
        std::fs::create_dir_all(&catalog_dir)?;

        Ok(Self {
            db_path,
            taxonomy_path: catalog_dir.join("taxonomy.json"),
            photos_path: catalog_dir.join("photos.json"),
            root,
        })
    }
}
