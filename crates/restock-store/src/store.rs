//! The remote operations the importer depends on.
//!
//! [`SupabaseStore`](crate::SupabaseStore) is the HTTP implementation; tests
//! substitute an in-memory one.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::{ObjectEntry, UploadOptions};

#[async_trait]
pub trait InventoryStore {
    /// Inserts `payload` into `table`, or updates the row whose `key_column`
    /// matches, and returns the row's id.
    async fn upsert(
        &self,
        table: &str,
        key_column: &str,
        payload: &serde_json::Value,
    ) -> Result<Uuid, StoreError>;

    /// Whether at least one row in `table` matches every `(column, value)`
    /// equality filter.
    async fn exists(&self, table: &str, filters: &[(&str, &str)]) -> Result<bool, StoreError>;

    async fn insert(&self, table: &str, payload: &serde_json::Value) -> Result<(), StoreError>;

    /// Lists objects directly under `prefix` whose names contain `search`.
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        search: &str,
    ) -> Result<Vec<ObjectEntry>, StoreError>;

    async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        options: &UploadOptions,
    ) -> Result<(), StoreError>;
}
