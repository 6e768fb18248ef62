//! `restock probe`: one upload to a throwaway path, to check that the service
//! key and bucket accept writes before a real import.

use std::path::Path;

use restock_core::AppConfig;
use restock_store::{InventoryStore, SupabaseStore, UploadOptions};

pub(crate) fn probe_path(unix_millis: i64) -> String {
    format!("probe-{unix_millis}/original/001.jpg")
}

pub(crate) async fn run_probe(
    store: &SupabaseStore,
    config: &AppConfig,
    file: &Path,
) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(file)
        .await
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", file.display()))?;

    let path = probe_path(chrono::Utc::now().timestamp_millis());
    println!("upload path: {path}");

    let options = UploadOptions {
        upsert: false,
        ..UploadOptions::overwrite("image/jpeg")
    };
    store
        .upload_object(&config.bucket, &path, bytes, &options)
        .await?;

    println!(
        "upload ok: {}",
        store.public_url(&config.bucket, &path, None)
    );
    Ok(())
}
