//! HTTP client for the hosted backend's row API (`/rest/v1`) and object
//! storage API (`/storage/v1`).
//!
//! Every request carries the service key both as `apikey` and as a bearer
//! token. Non-2xx responses surface as [`StoreError::Api`] with the message
//! the service put in its JSON error body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use uuid::Uuid;

use crate::error::StoreError;
use crate::store::InventoryStore;
use crate::types::{IdRow, ObjectEntry, PublishedItem, UploadOptions};

/// Page size for storage listings. Listings are always scoped to one item's
/// `original/` folder, which never holds this many photos.
const LIST_LIMIT: u32 = 100;

/// Client for one backend project, authenticated with a privileged key.
///
/// Build it once at startup and pass it by reference; it holds a pooled
/// `reqwest::Client`.
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseStore {
    /// Creates a client for the project at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`StoreError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        service_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, StoreError> {
        let trimmed = base_url.trim_end_matches('/');
        Url::parse(trimmed).map_err(|e| StoreError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: trimmed.to_string(),
            service_key: service_key.to_owned(),
        })
    }

    /// Public URL of an object in a public bucket, with optional raw query
    /// parameters (e.g. `width=300&quality=60`).
    #[must_use]
    pub fn public_url(&self, bucket: &str, path: &str, params: Option<&str>) -> String {
        let url = format!(
            "{}/storage/v1/object/public/{bucket}/{}",
            self.base_url,
            path.trim_start_matches('/')
        );
        match params {
            Some(p) if !p.is_empty() => {
                let sep = if url.contains('?') { '&' } else { '?' };
                format!("{url}{sep}{p}")
            }
            _ => url,
        }
    }

    /// Fetches up to `limit` items with `status = Published`, each with its
    /// embedded photo rows from `photos_table`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Api`] if the service rejects the query.
    /// - [`StoreError::Http`] on network failure.
    /// - [`StoreError::Deserialize`] if the rows do not match [`PublishedItem`].
    pub async fn published_items_with_photos(
        &self,
        items_table: &str,
        photos_table: &str,
        limit: usize,
    ) -> Result<Vec<PublishedItem>, StoreError> {
        let select = format!("sku,photos:{photos_table}(path,role,sort_order)");
        let limit = limit.to_string();
        let request = self.client.get(self.rest_url(items_table)).query(&[
            ("select", select.as_str()),
            ("status", "eq.Published"),
            ("limit", limit.as_str()),
        ]);
        let response = self.authed(request).send().await?;
        Self::read_json(response, &format!("select published {items_table}")).await
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn storage_url(&self, tail: &str) -> String {
        format!("{}/storage/v1/{tail}", self.base_url)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    /// Maps a non-2xx response to [`StoreError::Api`], pulling the service's
    /// `message` (row API) or `error`/`msg` (storage API) out of the body.
    async fn check_status(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                ["message", "error", "msg"]
                    .iter()
                    .find_map(|k| v.get(*k).and_then(serde_json::Value::as_str))
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status.to_string()
                } else {
                    body
                }
            });

        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn read_json<T: DeserializeOwned>(
        response: Response,
        context: &str,
    ) -> Result<T, StoreError> {
        let response = Self::check_status(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

#[async_trait]
impl InventoryStore for SupabaseStore {
    async fn upsert(
        &self,
        table: &str,
        key_column: &str,
        payload: &serde_json::Value,
    ) -> Result<Uuid, StoreError> {
        tracing::debug!(table, key_column, "upserting row");
        let request = self
            .client
            .post(self.rest_url(table))
            .query(&[("on_conflict", key_column), ("select", "id")])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&[payload]);
        let response = self.authed(request).send().await?;
        let rows: Vec<IdRow> = Self::read_json(response, &format!("upsert {table}")).await?;

        rows.into_iter()
            .next()
            .map(|row| row.id)
            .ok_or_else(|| StoreError::MissingId {
                table: table.to_string(),
            })
    }

    async fn exists(&self, table: &str, filters: &[(&str, &str)]) -> Result<bool, StoreError> {
        let mut query: Vec<(&str, String)> = vec![("select", "id".to_string())];
        query.extend(filters.iter().map(|(col, val)| (*col, format!("eq.{val}"))));
        query.push(("limit", "1".to_string()));

        let request = self.client.get(self.rest_url(table)).query(&query);
        let response = self.authed(request).send().await?;
        let rows: Vec<serde_json::Value> =
            Self::read_json(response, &format!("exists {table}")).await?;
        Ok(!rows.is_empty())
    }

    async fn insert(&self, table: &str, payload: &serde_json::Value) -> Result<(), StoreError> {
        tracing::debug!(table, "inserting row");
        let request = self
            .client
            .post(self.rest_url(table))
            .header("Prefer", "return=minimal")
            .json(payload);
        let response = self.authed(request).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        search: &str,
    ) -> Result<Vec<ObjectEntry>, StoreError> {
        let body = json!({
            "prefix": prefix,
            "search": search,
            "limit": LIST_LIMIT,
            "offset": 0,
        });
        let request = self
            .client
            .post(self.storage_url(&format!("object/list/{bucket}")))
            .json(&body);
        let response = self.authed(request).send().await?;
        Self::read_json(response, &format!("list {bucket}/{prefix}")).await
    }

    async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        options: &UploadOptions,
    ) -> Result<(), StoreError> {
        tracing::debug!(bucket, path, size = bytes.len(), "uploading object");
        let request = self
            .client
            .post(self.storage_url(&format!("object/{bucket}/{path}")))
            .header(reqwest::header::CONTENT_TYPE, &options.content_type)
            .header(
                reqwest::header::CACHE_CONTROL,
                format!("max-age={}", options.cache_control_secs),
            )
            .header("x-upsert", if options.upsert { "true" } else { "false" })
            .body(bytes);
        let response = self.authed(request).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }
}
