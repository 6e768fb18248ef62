//! Photo discovery, ordering, and storage naming.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;

use uuid::Uuid;

/// Extensions (lowercase) picked up from an item's photo folder.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// An image file found in an item's photo folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoFile {
    pub path: PathBuf,
    pub file_name: String,
    /// Lowercased extension without the dot.
    pub extension: String,
}

impl PhotoFile {
    fn from_path(path: PathBuf) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?.to_string();
        if file_name.starts_with('.') {
            return None;
        }
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            return None;
        }
        Some(Self {
            path,
            file_name,
            extension,
        })
    }
}

/// Lists the image files directly inside `dir`, in upload order.
///
/// Hidden files, subdirectories, and non-image extensions are skipped.
///
/// # Errors
///
/// Returns the underlying I/O error if `dir` cannot be read.
pub fn list_photos(dir: &Path) -> std::io::Result<Vec<PhotoFile>> {
    let mut photos = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        // Follows symlinks, so linked images are picked up.
        if !entry.path().is_file() {
            continue;
        }
        if let Some(photo) = PhotoFile::from_path(entry.path()) {
            photos.push(photo);
        }
    }
    photos.sort_by(|a, b| compare_photo_names(&a.file_name, &b.file_name));
    Ok(photos)
}

/// Names that should lead the gallery: anything starting with `1` or
/// mentioning `cover`.
#[must_use]
pub fn is_cover_like(file_name: &str) -> bool {
    file_name.starts_with('1') || file_name.to_ascii_lowercase().contains("cover")
}

/// Upload order: cover-like names first, then natural order, then raw bytes
/// so the order is total.
#[must_use]
pub fn compare_photo_names(a: &str, b: &str) -> Ordering {
    is_cover_like(b)
        .cmp(&is_cover_like(a))
        .then_with(|| natural_cmp(a, b))
        .then_with(|| a.cmp(b))
}

/// Case-insensitive comparison where runs of ASCII digits compare by numeric
/// value, so `2.jpg` sorts before `10.jpg`.
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        let ord = match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_run = take_digits(&mut left);
                let r_run = take_digits(&mut right);
                compare_digit_runs(&l_run, &r_run)
            }
            (Some(l), Some(r)) => {
                left.next();
                right.next();
                l.to_lowercase().cmp(r.to_lowercase())
            }
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Content type sent with an upload, keyed by lowercase extension.
#[must_use]
pub fn content_type_for(extension: &str) -> &'static str {
    match extension {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Object name for the photo at `position` (0-based): `001.jpg`, `002.png`, ...
#[must_use]
pub fn storage_name(position: usize, extension: &str) -> String {
    format!("{:03}.{extension}", position + 1)
}

/// Folder holding an item's original uploads, relative to the bucket.
#[must_use]
pub fn storage_prefix(item_id: Uuid) -> String {
    format!("{item_id}/original")
}

/// Bucket-relative object path, as stored in the photo table.
#[must_use]
pub fn storage_path(item_id: Uuid, position: usize, extension: &str) -> String {
    format!(
        "{}/{}",
        storage_prefix(item_id),
        storage_name(position, extension)
    )
}
