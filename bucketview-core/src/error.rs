//! Error taxonomy for browse and download operations

use thiserror::Error;

/// Errors surfaced to the HTTP layer
#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("Object not found: {bucket}/{key}")]
    ObjectNotFound { bucket: String, key: String },

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Scratch file error: {0}")]
    Scratch(#[from] std::io::Error),
}

impl BrowseError {
    /// HTTP status the error maps to. A missing object is the only
    /// distinguished failure; everything else surfaces as a 500.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ObjectNotFound { .. } => 404,
            Self::Provider(_) | Self::Scratch(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = BrowseError::ObjectNotFound {
            bucket: "docs".to_string(),
            key: "a/b.txt".to_string(),
        };
        assert_eq!(err.http_status(), 404);
        assert!(err.to_string().contains("docs/a/b.txt"));
    }

    #[test]
    fn test_provider_maps_to_500() {
        let err = BrowseError::Provider("connection refused".to_string());
        assert_eq!(err.http_status(), 500);
    }
}
