use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoRole {
    Cover,
    Gallery,
}

impl PhotoRole {
    /// The first photo of an item is its cover; every later one is gallery.
    #[must_use]
    pub fn for_position(position: usize) -> Self {
        if position == 0 {
            PhotoRole::Cover
        } else {
            PhotoRole::Gallery
        }
    }
}

impl std::fmt::Display for PhotoRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhotoRole::Cover => write!(f, "cover"),
            PhotoRole::Gallery => write!(f, "gallery"),
        }
    }
}

/// A photo row as read back from the store. `role` and `sort_order` are
/// nullable in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRef {
    pub path: String,
    pub role: Option<String>,
    pub sort_order: Option<i32>,
}

/// Picks the photo to show first: a `cover` role wins, then the lowest
/// `sort_order` (missing orders sort last).
#[must_use]
pub fn pick_cover(photos: &[PhotoRef]) -> Option<&PhotoRef> {
    photos.iter().min_by_key(|p| {
        let is_cover = p.role.as_deref() == Some("cover");
        (!is_cover, p.sort_order.unwrap_or(i32::MAX))
    })
}
