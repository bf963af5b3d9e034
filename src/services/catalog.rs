use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::models::Catalog;

/// Errors that can occur when loading the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Catalog server returned status {0}")]
    Status(u16),

    #[error("Invalid catalog format: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the catalog document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Url(url) => f.write_str(url),
        }
    }
}

/// Loads the static, read-only opportunity catalog.
///
/// Every call to [`CatalogStore::load`] reads the source again; nothing is
/// cached between submissions and failures are never retried.
pub struct CatalogStore {
    source: CatalogSource,
    client: Client,
}

impl CatalogStore {
    pub fn new(source: CatalogSource, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { source, client })
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        Self::new(CatalogSource::File(path.into()), Duration::from_secs(30))
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    pub async fn load(&self) -> Result<Catalog, CatalogError> {
        let text = match &self.source {
            CatalogSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| CatalogError::Io {
                        path: path.clone(),
                        source,
                    })?
            }
            CatalogSource::Url(url) => self.fetch(url).await?,
        };

        let catalog = Catalog::from_json(&text)?;

        tracing::debug!(
            "Loaded catalog from {} ({} entries)",
            self.source,
            catalog.total_entries()
        );

        Ok(catalog)
    }

    async fn fetch(&self, url: &str) -> Result<String, CatalogError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
