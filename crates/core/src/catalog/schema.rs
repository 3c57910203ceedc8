use rusqlite::Connection;

use crate::error::Result;

pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS images (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            path            TEXT NOT NULL,
            size            INTEGER NOT NULL,
            hash            TEXT NOT NULL,
            date_downloaded INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_images_hash ON images(hash);
        ",
    )?;
    Ok(())
}
