use std::io::Read;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Default APOD API endpoint.
pub const APOD_ENDPOINT: &str = "https://api.nasa.gov/planetary/apod";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(60);

/// One APOD entry as returned by the API. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApodInfo {
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub media_type: Option<String>,
    /// Primary content URL: an image, or a video page for video entries.
    pub url: String,
    /// Video thumbnail; present when the request asked for thumbnails and
    /// the entry is a video.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// Pick the URL to download for an entry. Video entries are detected by the
/// `youtube.com` marker in the primary URL and substituted with their
/// thumbnail; everything else downloads the primary URL as-is.
pub fn choose_image_url(info: &ApodInfo) -> Result<&str> {
    if info.url.contains("youtube.com") {
        info.thumbnail_url
            .as_deref()
            .ok_or_else(|| Error::UnexpectedResponse("video entry without thumbnail_url".into()))
    } else {
        Ok(&info.url)
    }
}

/// Collaborator seam for the remote API, so the pipeline can run against a
/// stub in tests.
pub trait Fetch {
    /// Look up the APOD entry for a date.
    fn fetch_info(&self, date: NaiveDate) -> Result<ApodInfo>;

    /// Download raw bytes from a URL.
    fn download(&self, url: &str) -> Result<Vec<u8>>;
}

/// HTTP client for the APOD API.
pub struct ApodClient {
    agent: ureq::Agent,
    endpoint: String,
    api_key: String,
}

impl ApodClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(APOD_ENDPOINT, api_key)
    }

    /// Point the client at a different endpoint (for testing).
    pub fn with_endpoint(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(READ_TIMEOUT)
            .build();
        Self {
            agent,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

impl Fetch for ApodClient {
    fn fetch_info(&self, date: NaiveDate) -> Result<ApodInfo> {
        let response = self
            .agent
            .get(&self.endpoint)
            .query("api_key", &self.api_key)
            .query("thumbs", "true")
            .query("date", &date.format("%Y-%m-%d").to_string())
            .call()
            .map_err(Box::new)?;
        serde_json::from_reader(response.into_reader())
            .map_err(|e| Error::UnexpectedResponse(e.to_string()))
    }

    fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.agent.get(url).call().map_err(Box::new)?;
        let mut bytes = Vec::new();
        response.into_reader().read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_info(url: &str, thumbnail_url: Option<&str>) -> ApodInfo {
        ApodInfo {
            date: "2024-06-15".to_string(),
            title: "Test Entry".to_string(),
            media_type: None,
            url: url.to_string(),
            thumbnail_url: thumbnail_url.map(|s| s.to_string()),
        }
    }

    // ── choose_image_url ────────────────────────────────────────

    #[test]
    fn test_choose_image_url_plain_image() {
        let info = make_info("https://apod.nasa.gov/apod/image/2406/ngc6188.jpg", None);
        assert_eq!(
            choose_image_url(&info).unwrap(),
            "https://apod.nasa.gov/apod/image/2406/ngc6188.jpg"
        );
    }

    #[test]
    fn test_choose_image_url_video_uses_thumbnail() {
        let info = make_info(
            "https://www.youtube.com/embed/abcd1234",
            Some("https://img.youtube.com/vi/abcd1234/0.jpg"),
        );
        assert_eq!(
            choose_image_url(&info).unwrap(),
            "https://img.youtube.com/vi/abcd1234/0.jpg"
        );
    }

    #[test]
    fn test_choose_image_url_video_without_thumbnail_rejected() {
        let info = make_info("https://www.youtube.com/embed/abcd1234", None);
        let err = choose_image_url(&info).unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse(_)));
    }

    #[test]
    fn test_choose_image_url_ignores_thumbnail_for_images() {
        // A thumbnail on a non-video entry must not be preferred
        let info = make_info(
            "https://apod.nasa.gov/apod/image/2406/moon.png",
            Some("https://img.youtube.com/vi/xyz/0.jpg"),
        );
        assert_eq!(
            choose_image_url(&info).unwrap(),
            "https://apod.nasa.gov/apod/image/2406/moon.png"
        );
    }

    // ── ApodInfo deserialization ────────────────────────────────

    #[test]
    fn test_apod_info_from_image_response() {
        let json = r#"{
            "copyright": "Somebody",
            "date": "2024-06-15",
            "explanation": "A nebula.",
            "hdurl": "https://apod.nasa.gov/apod/image/2406/big.jpg",
            "media_type": "image",
            "service_version": "v1",
            "title": "A Nebula",
            "url": "https://apod.nasa.gov/apod/image/2406/small.jpg"
        }"#;
        let info: ApodInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.date, "2024-06-15");
        assert_eq!(info.title, "A Nebula");
        assert_eq!(info.media_type.as_deref(), Some("image"));
        assert_eq!(info.url, "https://apod.nasa.gov/apod/image/2406/small.jpg");
        assert!(info.thumbnail_url.is_none());
    }

    #[test]
    fn test_apod_info_from_video_response() {
        let json = r#"{
            "date": "2024-01-01",
            "media_type": "video",
            "title": "A Launch",
            "url": "https://www.youtube.com/embed/xyz",
            "thumbnail_url": "https://img.youtube.com/vi/xyz/0.jpg"
        }"#;
        let info: ApodInfo = serde_json::from_str(json).unwrap();
        assert_eq!(
            info.thumbnail_url.as_deref(),
            Some("https://img.youtube.com/vi/xyz/0.jpg")
        );
    }

    #[test]
    fn test_apod_info_missing_url_rejected() {
        // API error bodies have no `url`; deserialization must fail so the
        // client reports an unexpected response instead of a bogus entry.
        let json = r#"{"code": 400, "msg": "Date must be between ...", "service_version": "v1"}"#;
        assert!(serde_json::from_str::<ApodInfo>(json).is_err());
    }
}
