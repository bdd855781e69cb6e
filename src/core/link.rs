//! HAL link values

use crate::core::uri::UriRef;
use serde::{Deserialize, Serialize};

/// A single hypermedia link (the value stored under one relation name)
///
/// Only `href` is required. Every other HAL attribute is optional and is
/// left out of the JSON when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HalLink {
    /// Target of the link, or a URI template when `templated` is set
    pub href: UriRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templated: Option<bool>,

    /// Expected media type of the target
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    /// Set when the link is deprecated; points at documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation: Option<UriRef>,

    /// Secondary key when several links share a relation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UriRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hreflang: Option<String>,
}

impl HalLink {
    /// Create a link with only an href
    pub fn new(href: impl Into<UriRef>) -> Self {
        Self {
            href: href.into(),
            templated: None,
            media_type: None,
            deprecation: None,
            name: None,
            profile: None,
            title: None,
            hreflang: None,
        }
    }

    /// Create a templated link (RFC 6570 href)
    pub fn templated(href: impl Into<UriRef>) -> Self {
        Self {
            templated: Some(true),
            ..Self::new(href)
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn is_templated(&self) -> bool {
        self.templated.unwrap_or(false)
    }
}

impl From<&str> for HalLink {
    fn from(href: &str) -> Self {
        HalLink::new(href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_link_creation() {
        let link = HalLink::new("/orders/1");

        assert_eq!(link.href.as_str(), "/orders/1");
        assert!(!link.is_templated());
        assert!(link.title.is_none());
    }

    #[test]
    fn test_minimal_link_serializes_href_only() {
        let value = serde_json::to_value(HalLink::new("/a")).unwrap();
        assert_eq!(value, json!({ "href": "/a" }));
    }

    #[test]
    fn test_link_with_metadata() {
        let link = HalLink::templated("/orders{?page}")
            .with_title("Orders")
            .with_media_type("application/hal+json");

        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(
            value,
            json!({
                "href": "/orders{?page}",
                "templated": true,
                "type": "application/hal+json",
                "title": "Orders"
            })
        );
    }

    #[test]
    fn test_link_deserializes_absolute_and_relative_href() {
        let abs: HalLink = serde_json::from_value(json!({ "href": "http://example.com/x" })).unwrap();
        let rel: HalLink = serde_json::from_value(json!({ "href": "/x", "name": "x" })).unwrap();

        assert!(abs.href.is_absolute());
        assert!(!rel.href.is_absolute());
        assert_eq!(rel.name.as_deref(), Some("x"));
    }

    #[test]
    fn test_link_requires_href() {
        assert!(serde_json::from_value::<HalLink>(json!({ "title": "no href" })).is_err());
    }
}
