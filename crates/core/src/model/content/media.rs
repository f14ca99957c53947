use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MediaValidationError {
    #[error("media reference cannot be empty")]
    EmptyReference,
}

/// Where an image or video referenced by course content lives: an absolute
/// URL, or a path into the bundled assets (e.g. `/images/gastro/...`).
///
/// Serialized as the raw reference string, matching the content data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MediaUri {
    Url(Url),
    AssetPath(PathBuf),
}

impl MediaUri {
    /// Parses a reference string: absolute URLs stay URLs, anything else is
    /// treated as a bundled asset path.
    ///
    /// # Errors
    ///
    /// Returns `MediaValidationError::EmptyReference` for blank input.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, MediaValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(MediaValidationError::EmptyReference);
        }
        match Url::parse(trimmed) {
            Ok(url) => Ok(MediaUri::Url(url)),
            Err(_) => Ok(MediaUri::AssetPath(PathBuf::from(trimmed))),
        }
    }

    #[must_use]
    pub fn as_url(&self) -> Option<&Url> {
        match self {
            MediaUri::Url(url) => Some(url),
            MediaUri::AssetPath(_) => None,
        }
    }

    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            MediaUri::AssetPath(path) => Some(path.as_path()),
            MediaUri::Url(_) => None,
        }
    }
}

impl fmt::Display for MediaUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaUri::Url(url) => write!(f, "{url}"),
            MediaUri::AssetPath(path) => write!(f, "{}", path.display()),
        }
    }
}

impl TryFrom<String> for MediaUri {
    type Error = MediaValidationError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl From<MediaUri> for String {
    fn from(uri: MediaUri) -> Self {
        uri.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_urls_parse_as_urls() {
        let uri = MediaUri::parse("https://example.com/jaundice.jpg").unwrap();
        assert!(uri.as_url().is_some());
        assert_eq!(uri.to_string(), "https://example.com/jaundice.jpg");
    }

    #[test]
    fn bundled_paths_parse_as_asset_paths() {
        let uri = MediaUri::parse("/images/gastro/jaundice/ultrasound.jpg").unwrap();
        assert_eq!(
            uri.as_path(),
            Some(Path::new("/images/gastro/jaundice/ultrasound.jpg"))
        );
    }

    #[test]
    fn blank_references_are_rejected() {
        assert_eq!(
            MediaUri::parse("  "),
            Err(MediaValidationError::EmptyReference)
        );
    }

    #[test]
    fn serde_round_trips_as_plain_string() {
        let uri = MediaUri::parse("https://example.com/a.png").unwrap();
        let json = serde_json::to_string(&uri).unwrap();
        assert_eq!(json, "\"https://example.com/a.png\"");
        let back: MediaUri = serde_json::from_str(&json).unwrap();
        assert_eq!(back, uri);
    }
}
