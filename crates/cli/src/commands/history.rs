use std::path::Path;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use skypaper_core::Cache;

pub fn run(image_dir: &Path) -> Result<()> {
    let cache = Cache::open(image_dir)?;
    let records = cache.records()?;

    if records.is_empty() {
        println!("No cached images yet. Run 'skypaper update {}' first.", image_dir.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("File"),
        Cell::new("Size"),
        Cell::new("Hash"),
        Cell::new("Downloaded"),
    ]);

    for record in &records {
        let name = record
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| record.path.display().to_string());
        let downloaded = chrono::DateTime::from_timestamp(record.downloaded_at, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        table.add_row(vec![
            Cell::new(&name),
            Cell::new(format_size(record.size)),
            Cell::new(short_hash(&record.hash)),
            Cell::new(downloaded),
        ]);
    }

    println!("{table}");
    println!("{} cached image(s)", records.len());

    Ok(())
}

/// First 12 hex characters of a content hash, enough to eyeball dedup.
fn short_hash(hash: &str) -> &str {
    &hash[..hash.len().min(12)]
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    match bytes {
        b if b >= GB => format!("{:.1} GB", b as f64 / GB as f64),
        b if b >= MB => format!("{:.1} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.1} KB", b as f64 / KB as f64),
        b => format!("{} B", b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── format_size ─────────────────────────────────────────────

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1023), "1023 B");
    }

    #[test]
    fn test_format_size_kilobytes() {
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
    }

    #[test]
    fn test_format_size_megabytes() {
        assert_eq!(format_size(1_048_576), "1.0 MB");
        assert_eq!(format_size(1_500_000), "1.4 MB");
    }

    #[test]
    fn test_format_size_gigabytes() {
        assert_eq!(format_size(1_073_741_824), "1.0 GB");
    }

    // ── short_hash ──────────────────────────────────────────────

    #[test]
    fn test_short_hash_truncates() {
        assert_eq!(
            short_hash("b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"),
            "b94d27b9934d"
        );
    }

    #[test]
    fn test_short_hash_handles_short_input() {
        assert_eq!(short_hash("abc"), "abc");
    }
}
