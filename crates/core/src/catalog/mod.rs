pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::ImageRecord;
use crate::error::Result;

/// Fixed catalog file name inside the image directory, distinct from any
/// downloaded image name.
pub const CATALOG_FILE: &str = "skypaper.db";

/// SQLite-backed catalog of every image ever cached, keyed by content hash.
#[derive(Debug)]
pub struct Catalog {
    conn: Connection,
}

impl Catalog {
    /// Open or create the catalog inside the given image directory with WAL
    /// mode. Safe to call on every run.
    pub fn open(image_dir: &Path) -> Result<Self> {
        let conn = Connection::open(image_dir.join(CATALOG_FILE))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory catalog (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    /// The dedup oracle: true iff a record with this exact hash is present.
    /// No other column participates in the lookup.
    pub fn exists(&self, hash: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM images WHERE hash = ?1",
            [hash],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Fetch the record for a hash, if one was ever inserted. When duplicate
    /// rows exist (see `insert`), the earliest wins.
    pub fn find_by_hash(&self, hash: &str) -> Result<Option<ImageRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT id, path, size, hash, date_downloaded FROM images
                 WHERE hash = ?1 ORDER BY id LIMIT 1",
                [hash],
                |row| {
                    Ok(ImageRecord {
                        id: row.get(0)?,
                        path: PathBuf::from(row.get::<_, String>(1)?),
                        size: row.get::<_, i64>(2)? as u64,
                        hash: row.get(3)?,
                        downloaded_at: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    /// Append a record, returning its rowid. The table carries no uniqueness
    /// constraint on `hash`; callers are expected to check `exists` first, so
    /// two concurrent processes can both insert the same hash.
    pub fn insert(&self, record: &ImageRecord) -> Result<i64> {
        let path_str = record.path.to_string_lossy();
        self.conn.execute(
            "INSERT INTO images (path, size, hash, date_downloaded)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                path_str.as_ref(),
                record.size as i64,
                record.hash,
                record.downloaded_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All records in insertion order.
    pub fn list(&self) -> Result<Vec<ImageRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, path, size, hash, date_downloaded FROM images ORDER BY id")?;
        let records = stmt
            .query_map([], |row| {
                Ok(ImageRecord {
                    id: row.get(0)?,
                    path: PathBuf::from(row.get::<_, String>(1)?),
                    size: row.get::<_, i64>(2)? as u64,
                    hash: row.get(3)?,
                    downloaded_at: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM images", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
