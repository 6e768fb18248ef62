//! `restock warm-cache`: requests each published item's cover at the two
//! sizes the storefront renders, so the image transformer has them cached
//! before the first visitor asks.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use restock_core::{pick_cover, AppConfig, NORMALIZED_SCHEMA};
use restock_store::{PublishedItem, SupabaseStore};

/// Listing thumbnail.
pub(crate) const THUMB_PARAMS: &str = "width=300&quality=60&format=webp";
/// Item page hero.
pub(crate) const FULL_PARAMS: &str = "width=1200&quality=75&format=webp";

/// Both transform URLs for every item that has a cover photo.
pub(crate) fn cover_urls(
    store: &SupabaseStore,
    bucket: &str,
    items: &[PublishedItem],
) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| pick_cover(item.photos()))
        .flat_map(|cover| {
            [THUMB_PARAMS, FULL_PARAMS]
                .map(|params| store.public_url(bucket, &cover.path, Some(params)))
        })
        .collect()
}

pub(crate) async fn run_warm_cache(
    store: &SupabaseStore,
    config: &AppConfig,
    limit: usize,
) -> anyhow::Result<()> {
    let items = store
        .published_items_with_photos(NORMALIZED_SCHEMA.items, NORMALIZED_SCHEMA.photos, limit)
        .await?;
    let urls = cover_urls(store, &config.bucket, &items);

    if urls.is_empty() {
        println!("no published cover photos to warm");
        return Ok(());
    }
    println!("fetching {} URLs to warm cache...", urls.len());

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .user_agent(config.user_agent.as_str())
        .build()?;

    let results = stream::iter(urls.into_iter().map(|url| {
        let client = client.clone();
        async move {
            // Read the body so the transform completes even if the CDN only
            // caches finished responses.
            let result = match client.get(&url).send().await {
                Ok(resp) => {
                    let status = resp.status();
                    resp.bytes().await.map(|_| status)
                }
                Err(e) => Err(e),
            };
            (url, result)
        }
    }))
    .buffer_unordered(config.warm_concurrency.max(1))
    .collect::<Vec<_>>()
    .await;

    let mut failures = 0usize;
    for (url, result) in results {
        match result {
            Ok(status) if status.is_success() => println!("✓ {} {url}", status.as_u16()),
            Ok(status) => {
                failures += 1;
                tracing::warn!(status = status.as_u16(), url = %url, "cache warm failed");
                println!("✗ {} {url}", status.as_u16());
            }
            Err(e) => {
                failures += 1;
                tracing::warn!(error = %e, url = %url, "cache warm failed");
                println!("✗ {e} {url}");
            }
        }
    }

    println!("done. failures: {failures}");
    Ok(())
}
