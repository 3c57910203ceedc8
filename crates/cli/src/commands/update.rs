use std::path::Path;

use anyhow::Result;
use chrono::Local;
use skypaper_core::domain::parse_date;
use skypaper_core::fetch::ApodClient;
use skypaper_core::wallpaper::DesktopWallpaper;
use skypaper_core::{Cache, UpdateProgress};

pub fn run(image_dir: &Path, date: Option<&str>, api_key: &str) -> Result<()> {
    // Validate inputs before anything touches the disk or the network.
    let date = match date {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };
    let cache = Cache::open(image_dir)?;

    println!("Images directory: {}", image_dir.display());
    println!("APOD date: {date}");

    let fetcher = ApodClient::new(api_key);
    let update = cache.update(
        date,
        &fetcher,
        &DesktopWallpaper,
        Some(&mut |progress| match progress {
            UpdateProgress::Resolved { url } => println!("Fetching {url}"),
            UpdateProgress::Downloaded { bytes } => println!("Downloaded {bytes} bytes"),
            UpdateProgress::Duplicate { path } => {
                println!("Image already cached at {}", path.display())
            }
            UpdateProgress::Stored { path } => println!("Saved image to {}", path.display()),
            UpdateProgress::Applied { path } => {
                println!("Desktop background set to {}", path.display())
            }
        }),
    )?;

    println!();
    println!("Title:      {}", update.title);
    println!("Image URL:  {}", update.url);
    println!("Image Path: {}", update.path.display());
    println!("Image Size: {} bytes", update.size);
    println!("Image Hash: {}", update.hash);

    Ok(())
}
