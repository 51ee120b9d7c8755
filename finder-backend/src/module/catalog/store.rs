use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::loader::{load_catalog, Catalog, CatalogError};

/// Holds the live catalog snapshot and swaps it on reload.
///
/// Readers get an `Arc<Catalog>` and never hold the lock while resolving.
pub struct CatalogStore {
    path: PathBuf,
    current: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    /// Load the catalog at `path`. Fails if the first load fails.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref().to_path_buf();
        let catalog = load_catalog(&path).await?;

        Ok(Self {
            path,
            current: RwLock::new(Arc::new(catalog)),
        })
    }

    pub fn with_catalog<P: AsRef<Path>>(path: P, catalog: Catalog) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn snapshot(&self) -> Arc<Catalog> {
        self.current.read().await.clone()
    }

    /// Re-read the catalog file. On failure the previous snapshot stays live.
    pub async fn reload(&self) -> Result<usize, CatalogError> {
        let catalog = match load_catalog(&self.path).await {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!("Catalog reload from {:?} failed, keeping previous snapshot: {}", self.path, e);
                return Err(e);
            }
        };

        let count = catalog.len();
        *self.current.write().await = Arc::new(catalog);
        info!("Catalog reloaded: {} creatures", count);

        Ok(count)
    }
}
