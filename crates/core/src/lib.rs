pub mod catalog;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod store;
pub mod wallpaper;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use catalog::Catalog;
use domain::{ImageRecord, Update};
use error::{Error, Result};
use fetch::Fetch;
use wallpaper::WallpaperSetter;

/// Callback for reporting pipeline progress.
pub enum UpdateProgress {
    /// The download URL has been resolved (after video substitution).
    Resolved { url: String },
    /// Raw bytes have been downloaded.
    Downloaded { bytes: usize },
    /// The content was already cached under an earlier path; nothing written.
    Duplicate { path: PathBuf },
    /// Fresh content was written to disk and recorded in the catalog.
    Stored { path: PathBuf },
    /// The desktop background has been set.
    Applied { path: PathBuf },
}

/// The content-addressed image cache: one directory of downloaded images plus
/// the catalog that deduplicates them by content hash.
#[derive(Debug)]
pub struct Cache {
    image_dir: PathBuf,
    catalog: Catalog,
}

impl Cache {
    /// Open the cache rooted at an existing directory. The directory is
    /// validated before the catalog is created, so a bad argument leaves no
    /// trace on disk.
    pub fn open(image_dir: &Path) -> Result<Self> {
        if !image_dir.exists() {
            return Err(Error::ImageDirNotFound(image_dir.to_path_buf()));
        }
        if !image_dir.is_dir() {
            return Err(Error::ImageDirNotDirectory(image_dir.to_path_buf()));
        }
        let catalog = Catalog::open(image_dir)?;
        Ok(Self {
            image_dir: image_dir.to_path_buf(),
            catalog,
        })
    }

    /// Run the full pipeline for one date: fetch the entry, download its
    /// image, store it unless the content is already cached, and set it as
    /// the desktop background.
    ///
    /// Re-running with the same date is idempotent: the second run sees the
    /// hash in the catalog and skips both the write and the insert. On such a
    /// dedup hit the originally recorded path is applied, which can differ
    /// from the path the current URL would derive.
    pub fn update(
        &self,
        date: NaiveDate,
        fetcher: &dyn Fetch,
        setter: &dyn WallpaperSetter,
        mut progress_cb: Option<&mut dyn FnMut(UpdateProgress)>,
    ) -> Result<Update> {
        let info = fetcher.fetch_info(date)?;
        let image_url = fetch::choose_image_url(&info)?.to_string();
        if let Some(ref mut cb) = progress_cb {
            cb(UpdateProgress::Resolved {
                url: image_url.clone(),
            });
        }

        let derived_path = store::derive_path(&image_url, &self.image_dir)?;
        let bytes = fetcher.download(&image_url)?;
        if let Some(ref mut cb) = progress_cb {
            cb(UpdateProgress::Downloaded { bytes: bytes.len() });
        }

        let hash = store::fingerprint(&bytes);

        let (path, deduplicated) = match self.catalog.find_by_hash(&hash)? {
            Some(existing) => {
                if let Some(ref mut cb) = progress_cb {
                    cb(UpdateProgress::Duplicate {
                        path: existing.path.clone(),
                    });
                }
                (existing.path, true)
            }
            None => {
                // Overwrites any same-named file; only the catalog decides
                // whether content is new.
                fs::write(&derived_path, &bytes)?;
                self.catalog.insert(&ImageRecord {
                    id: 0,
                    path: derived_path.clone(),
                    size: bytes.len() as u64,
                    hash: hash.clone(),
                    downloaded_at: chrono::Utc::now().timestamp(),
                })?;
                if let Some(ref mut cb) = progress_cb {
                    cb(UpdateProgress::Stored {
                        path: derived_path.clone(),
                    });
                }
                (derived_path, false)
            }
        };

        setter.apply(&path)?;
        if let Some(ref mut cb) = progress_cb {
            cb(UpdateProgress::Applied { path: path.clone() });
        }

        Ok(Update {
            url: image_url,
            title: info.title,
            path,
            size: bytes.len() as u64,
            hash,
            deduplicated,
        })
    }

    /// All catalog records in insertion order.
    pub fn records(&self) -> Result<Vec<ImageRecord>> {
        self.catalog.list()
    }
}
