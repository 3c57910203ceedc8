use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("catalog error: {0}")]
    Catalog(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image directory does not exist: {}", .0.display())]
    ImageDirNotFound(PathBuf),

    #[error("image directory is not a directory: {}", .0.display())]
    ImageDirNotDirectory(PathBuf),

    #[error("invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("no file name in URL: {0}")]
    InvalidUrl(String),

    #[error("APOD request failed: {0}")]
    Http(#[from] Box<ureq::Error>),

    #[error("unexpected APOD response: {0}")]
    UnexpectedResponse(String),

    #[error("failed to set desktop background: {0}")]
    Wallpaper(String),
}

pub type Result<T> = std::result::Result<T, Error>;
