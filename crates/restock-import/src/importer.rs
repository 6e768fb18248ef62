//! The row-by-row import loop.
//!
//! Each row is handled to completion (item, then its photos in order) before
//! the next one starts. Row and photo failures are logged and recorded in the
//! [`ImportReport`]; only an unreadable CSV aborts the run.

use std::path::{Component, Path};
use std::time::Duration;

use restock_core::{price_label, AppConfig, PhotoRole, Schema, NORMALIZED_SCHEMA};
use restock_store::{InventoryStore, UploadOptions};
use serde_json::json;
use uuid::Uuid;

use crate::error::{ImportError, RowError};
use crate::photos::{content_type_for, list_photos, storage_name, storage_prefix, PhotoFile};
use crate::report::{ImportReport, RowStatus};
use crate::row::{normalize_row, read_rows, ItemRow, RawRow};

/// Pause after each upload when none is configured.
pub const DEFAULT_UPLOAD_DELAY: Duration = Duration::from_millis(40);

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub bucket: String,
    /// Fixed pause after every successful upload.
    pub upload_delay: Duration,
    /// Validate rows and resolve photos without calling the store.
    pub dry_run: bool,
    pub schema: Schema,
}

impl ImportOptions {
    #[must_use]
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            upload_delay: DEFAULT_UPLOAD_DELAY,
            dry_run: false,
            schema: NORMALIZED_SCHEMA,
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig, dry_run: bool) -> Self {
        Self {
            upload_delay: Duration::from_millis(config.upload_delay_ms),
            dry_run,
            ..Self::new(config.bucket.clone())
        }
    }
}

pub struct Importer<'a, S: InventoryStore + ?Sized> {
    store: &'a S,
    options: ImportOptions,
}

impl<'a, S: InventoryStore + ?Sized> Importer<'a, S> {
    #[must_use]
    pub fn new(store: &'a S, options: ImportOptions) -> Self {
        Self { store, options }
    }

    /// Imports every row of the CSV at `csv_path`, taking photos from
    /// `<photo_root>/<sku>/`.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError`] only when the CSV itself cannot be read or
    /// lacks a required column. Per-row failures are reported, not returned.
    pub async fn run(
        &self,
        csv_path: &Path,
        photo_root: &Path,
    ) -> Result<ImportReport, ImportError> {
        let rows = read_rows(csv_path)?;
        let mut report = ImportReport::default();

        for source in rows {
            let sku = source.sku_hint();
            let status = self
                .process_row(source.line, sku.as_deref(), source.raw, photo_root)
                .await;
            report.push(source.line, sku, status);
        }

        tracing::info!(
            imported = report.imported(),
            planned = report.planned(),
            skipped = report.skipped(),
            photos = report.photos(),
            photo_failures = report.photo_failures(),
            dry_run = self.options.dry_run,
            "processed {} rows",
            report.processed()
        );
        Ok(report)
    }

    async fn process_row(
        &self,
        line: u64,
        sku_hint: Option<&str>,
        raw: Result<RawRow, String>,
        photo_root: &Path,
    ) -> RowStatus {
        let item = match raw.map_err(RowError::Malformed).and_then(normalize_row) {
            Ok(item) => item,
            Err(e) => {
                tracing::error!(line, sku = sku_hint.unwrap_or("-"), error = %e, "skipping row");
                return RowStatus::Skipped {
                    reason: e.to_string(),
                };
            }
        };

        let photos = resolve_photos(line, &item.sku, photo_root);

        if self.options.dry_run {
            tracing::info!(
                line,
                sku = %item.sku,
                photos = photos.len(),
                price = %price_label(item.price),
                "dry-run: row is valid"
            );
            return RowStatus::Planned {
                photos: photos.len(),
            };
        }

        let item_id = match self.write_item(&item).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(
                    line,
                    sku = %item.sku,
                    error = %e,
                    "item upsert failed; skipping photos"
                );
                return RowStatus::Skipped {
                    reason: e.to_string(),
                };
            }
        };

        let mut synced = 0usize;
        let mut failures = 0usize;
        for (position, photo) in photos.iter().enumerate() {
            match self
                .sync_photo(line, &item.sku, item_id, position, photo)
                .await
            {
                Ok(()) => synced += 1,
                Err(e) => {
                    failures += 1;
                    tracing::error!(
                        line,
                        sku = %item.sku,
                        path = %photo.path.display(),
                        error = %e,
                        "photo failed"
                    );
                }
            }
        }

        tracing::info!(
            line,
            sku = %item.sku,
            photos = synced,
            price = %price_label(item.price),
            "✓ imported"
        );
        RowStatus::Imported {
            photos: synced,
            photo_failures: failures,
        }
    }

    /// Upserts the brand (when named) and then the item; returns the item id.
    async fn write_item(&self, item: &ItemRow) -> Result<Uuid, RowError> {
        let schema = &self.options.schema;

        let brand_id = match &item.brand {
            Some(name) => {
                let mut payload = serde_json::Map::new();
                payload.insert(schema.brand_key.to_string(), json!(name));
                let id = self
                    .store
                    .upsert(
                        schema.brands,
                        schema.brand_key,
                        &serde_json::Value::Object(payload),
                    )
                    .await?;
                Some(id)
            }
            None => None,
        };

        let id = self
            .store
            .upsert(schema.items, schema.item_key, &item.payload(brand_id))
            .await?;
        Ok(id)
    }

    /// Ensures the photo at `position` has both a stored object and a photo
    /// record. Either half that already exists is left alone.
    async fn sync_photo(
        &self,
        line: u64,
        sku: &str,
        item_id: Uuid,
        position: usize,
        photo: &PhotoFile,
    ) -> Result<(), RowError> {
        let bucket = self.options.bucket.as_str();
        let prefix = storage_prefix(item_id);
        let name = storage_name(position, &photo.extension);
        let path = format!("{prefix}/{name}");

        let already_stored = match self.store.list_objects(bucket, &prefix, &name).await {
            Ok(entries) => entries.iter().any(|e| e.name == name),
            Err(e) => {
                tracing::warn!(
                    path = %path,
                    error = %e,
                    "could not list existing objects; uploading anyway"
                );
                false
            }
        };

        if already_stored {
            tracing::debug!(path = %path, "object already stored");
        } else {
            tracing::info!(line, sku = %sku, path = %path, "uploading");
            let bytes = tokio::fs::read(&photo.path)
                .await
                .map_err(|source| RowError::ReadPhoto {
                    path: photo.path.clone(),
                    source,
                })?;
            self.store
                .upload_object(
                    bucket,
                    &path,
                    bytes,
                    &UploadOptions::overwrite(content_type_for(&photo.extension)),
                )
                .await?;
            if !self.options.upload_delay.is_zero() {
                tokio::time::sleep(self.options.upload_delay).await;
            }
        }

        let item_id_str = item_id.to_string();
        let table = self.options.schema.photos;
        let recorded = self
            .store
            .exists(
                table,
                &[("item_id", item_id_str.as_str()), ("path", path.as_str())],
            )
            .await?;
        if !recorded {
            self.store
                .insert(
                    table,
                    &json!({
                        "item_id": item_id,
                        "path": path,
                        "role": PhotoRole::for_position(position),
                        "sort_order": position,
                    }),
                )
                .await?;
        }
        Ok(())
    }
}

/// Photos for `sku` in upload order. A missing, unreadable, or empty folder
/// yields an empty list with a warning.
fn resolve_photos(line: u64, sku: &str, photo_root: &Path) -> Vec<PhotoFile> {
    // A SKU is a single folder name; anything else would escape the root.
    let mut components = Path::new(sku).components();
    if !matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) {
        tracing::warn!(line, sku, "sku is not a plain folder name; skipping photos");
        return Vec::new();
    }

    let dir = photo_root.join(sku);
    if !dir.is_dir() {
        tracing::warn!(line, sku, dir = %dir.display(), "no photo folder");
        return Vec::new();
    }

    match list_photos(&dir) {
        Ok(photos) if photos.is_empty() => {
            tracing::warn!(line, sku, dir = %dir.display(), "photo folder has no images");
            photos
        }
        Ok(photos) => photos,
        Err(e) => {
            tracing::warn!(
                line,
                sku,
                dir = %dir.display(),
                error = %e,
                "could not read photo folder"
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "importer_test.rs"]
mod tests;
