pub mod client;
pub mod error;
pub mod store;
pub mod types;

pub use client::SupabaseStore;
pub use error::StoreError;
pub use store::InventoryStore;
pub use types::{ObjectEntry, PublishedItem, UploadOptions};
