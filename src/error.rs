//! Feed error taxonomy.

use thiserror::Error;

/// Errors produced while validating or rendering a feed.
///
/// Only the three `Missing*` feed-level variants and [`FeedError::Xml`] are
/// raised by the renderers. The item-level, URL, date and empty-feed kinds
/// are reserved for callers that want stricter checks.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed title is required")]
    MissingTitle,

    #[error("feed description is required")]
    MissingDescription,

    #[error("feed link is required")]
    MissingLink,

    #[error("item title is required")]
    MissingItemTitle,

    #[error("item link is required")]
    MissingItemLink,

    #[error("invalid URL format")]
    InvalidUrl,

    #[error("invalid date format")]
    InvalidDate,

    #[error("feed contains no items")]
    EmptyFeed,

    #[error("failed to serialize feed XML")]
    Xml(#[from] std::io::Error),
}

impl FeedError {
    /// True for the required-field validation kinds.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingTitle | Self::MissingDescription | Self::MissingLink
        )
    }
}

/// Result type for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_missing_field_display() {
        assert_eq!(FeedError::MissingTitle.to_string(), "feed title is required");
        assert_eq!(
            FeedError::MissingDescription.to_string(),
            "feed description is required"
        );
        assert_eq!(FeedError::MissingLink.to_string(), "feed link is required");
    }

    #[test]
    fn test_reserved_kinds_display() {
        assert_eq!(FeedError::EmptyFeed.to_string(), "feed contains no items");
        assert_eq!(FeedError::InvalidUrl.to_string(), "invalid URL format");
        assert_eq!(FeedError::InvalidDate.to_string(), "invalid date format");
    }

    #[test]
    fn test_xml_error_keeps_source() {
        let err = FeedError::from(Error::new(ErrorKind::WriteZero, "buffer closed"));
        assert_eq!(err.to_string(), "failed to serialize feed XML");
        let source = std::error::Error::source(&err).expect("should have source");
        assert_eq!(source.to_string(), "buffer closed");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_is_validation() {
        assert!(FeedError::MissingTitle.is_validation());
        assert!(FeedError::MissingLink.is_validation());
        assert!(!FeedError::EmptyFeed.is_validation());
    }
}
