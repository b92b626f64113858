//! Page-level types.

use super::StructuredRecord;
use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// One rasterized page submitted for recognition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Path to the page's raster image
    pub image_ref: PathBuf,

    /// Recognition output, absent until recognition completes
    pub structured_data: Option<StructuredRecord>,
}

impl PageRecord {
    /// Create a page with no recognition data yet.
    pub fn new(page_number: u32, image_ref: impl Into<PathBuf>) -> Result<Self> {
        if page_number == 0 {
            return Err(Error::InvalidPageNumber(page_number));
        }
        Ok(Self {
            page_number,
            image_ref: image_ref.into(),
            structured_data: None,
        })
    }

    /// Set recognition data and return self.
    pub fn with_data(mut self, record: StructuredRecord) -> Self {
        self.structured_data = Some(record);
        self
    }

    /// Check whether recognition produced data for this page.
    pub fn has_data(&self) -> bool {
        self.structured_data.is_some()
    }
}

/// Build page records from rasterizer output.
///
/// The result is ordered by page number.
pub fn pages_from_images<P, I>(images: I) -> Result<Vec<PageRecord>>
where
    P: Into<PathBuf>,
    I: IntoIterator<Item = (u32, P)>,
{
    let mut pages = images
        .into_iter()
        .map(|(number, path)| PageRecord::new(number, path))
        .collect::<Result<Vec<_>>>()?;
    pages.sort_by_key(|p| p.page_number);
    Ok(pages)
}

fn page_file_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^page_(\d+)\.(jpe?g|png|tiff?|webp|bmp)$").expect("valid page file regex")
    })
}

/// Scan a directory of rasterized pages named `page_NNN.<ext>`.
///
/// Files that do not follow the naming scheme are ignored.
pub fn pages_from_image_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<PageRecord>> {
    let mut images = Vec::new();
    for entry in fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(caps) = page_file_pattern().captures(name) {
            match caps[1].parse::<u32>() {
                Ok(0) => log::warn!("Skipping page image numbered 0: {}", name),
                Ok(number) => images.push((number, path.clone())),
                Err(_) => log::warn!("Skipping page image with unparsable number: {}", name),
            }
        }
    }
    log::debug!(
        "Found {} page images in {}",
        images.len(),
        dir.as_ref().display()
    );
    pages_from_images(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_rejects_zero() {
        assert!(matches!(
            PageRecord::new(0, "page_000.jpeg"),
            Err(Error::InvalidPageNumber(0))
        ));
        assert!(PageRecord::new(1, "page_001.jpeg").is_ok());
    }

    #[test]
    fn test_page_starts_without_data() {
        let page = PageRecord::new(3, "page_003.jpeg").unwrap();
        assert!(!page.has_data());
        assert_eq!(page.image_ref, PathBuf::from("page_003.jpeg"));
    }

    #[test]
    fn test_pages_from_images_sorted() {
        let pages = pages_from_images([(2, "b.png"), (1, "a.png"), (3, "c.png")]).unwrap();
        let numbers: Vec<u32> = pages.iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_page_file_pattern() {
        assert!(page_file_pattern().is_match("page_001.jpeg"));
        assert!(page_file_pattern().is_match("PAGE_12.PNG"));
        assert!(!page_file_pattern().is_match("cover.jpeg"));
        assert!(!page_file_pattern().is_match("page_001.txt"));
    }

    #[test]
    fn test_pages_from_image_dir() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "page_002.jpeg",
            "page_001.jpeg",
            "page_010.jpeg",
            "page_000.png",
            "notes.txt",
        ] {
            fs::write(dir.path().join(name), b"").unwrap();
        }

        let pages = pages_from_image_dir(dir.path()).unwrap();
        let numbers: Vec<u32> = pages.iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, vec![1, 2, 10]);
        assert!(pages[0].image_ref.ends_with("page_001.jpeg"));
    }
}
