use restock_core::PhotoRef;
use serde::Deserialize;
use uuid::Uuid;

/// Options for a single object upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    pub content_type: String,
    /// Overwrite an existing object at the same path.
    pub upsert: bool,
    pub cache_control_secs: u32,
}

impl UploadOptions {
    #[must_use]
    pub fn overwrite(content_type: &str) -> Self {
        Self {
            content_type: content_type.to_string(),
            upsert: true,
            cache_control_secs: 3600,
        }
    }
}

/// One entry from a storage listing. Folders come back as entries too, with
/// no `id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObjectEntry {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
}

/// A published item with its embedded photo rows.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishedItem {
    pub sku: Option<String>,
    #[serde(default)]
    pub photos: Option<Vec<PhotoRef>>,
}

impl PublishedItem {
    #[must_use]
    pub fn photos(&self) -> &[PhotoRef] {
        self.photos.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct IdRow {
    pub id: Uuid,
}
