//! The feed aggregate and channel image.

use crate::error::Error;
use crate::item::Item;
use crate::serialize::{self, SerializeOption};
use serde::{Deserialize, Serialize};
use url::Url;

/// An RSS 2.0 feed; maps to the `<channel>` element on serialization.
///
/// `items` order is emission order. All `Option` fields follow the
/// "omit the element when absent" contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feed {
    pub title: String,
    pub description: String,
    /// Canonical feed URL; also emitted as the `atom:link rel="self"`
    /// reference. Both links are omitted when absent.
    pub link: Option<Url>,
    /// Omitted when absent or empty.
    pub copyright: Option<String>,
    /// ISO-639 language code, always emitted. Defaults to `"en"`.
    pub language: String,
    pub image: Option<Image>,
    pub items: Vec<Item>,
}

impl Default for Feed {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            link: None,
            copyright: None,
            language: "en".to_string(),
            image: None,
            items: Vec::new(),
        }
    }
}

impl Feed {
    /// Serialize to an XML document string with the default option
    /// (UTF-16 declared encoding).
    pub fn serialize(&self) -> Result<String, Error> {
        self.serialize_with(&SerializeOption::default())
    }

    /// Serialize to an XML document string.
    pub fn serialize_with(&self, option: &SerializeOption) -> Result<String, Error> {
        serialize::serialize(self, option)
    }
}

/// Channel image block; all three fields are required.
///
/// Constructor-validated, so a held `Image` always serializes to a
/// complete `<image>` element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    url: Url,
    title: String,
    link: Url,
}

impl Image {
    /// Build from already-typed values.
    pub fn new(url: Url, title: impl Into<String>, link: Url) -> Self {
        Self {
            url,
            title: title.into(),
            link,
        }
    }

    /// Build from raw strings, rejecting an empty or unparsable `url`
    /// or `link` and an empty `title`. The error names the offending
    /// parameter.
    pub fn from_parts(url: &str, title: &str, link: &str) -> Result<Self, Error> {
        let url = parse_required_url("url", url)?;
        if title.is_empty() {
            return Err(Error::invalid_argument("title", "must not be empty"));
        }
        let link = parse_required_url("link", link)?;
        Ok(Self::new(url, title, link))
    }

    /// URL of the image itself (GIF, JPEG or PNG).
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Image description, used as the ALT text in HTML renderings.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// URL of the site the image links to.
    pub fn link(&self) -> &Url {
        &self.link
    }
}

fn parse_required_url(parameter: &'static str, value: &str) -> Result<Url, Error> {
    if value.is_empty() {
        return Err(Error::invalid_argument(parameter, "must not be empty"));
    }
    Url::parse(value).map_err(|e| Error::invalid_argument(parameter, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_feed_default_language() {
        let feed = Feed::default();
        assert_eq!(feed.language, "en");
        assert!(feed.items.is_empty());
    }

    #[test]
    fn test_image_from_parts_valid() {
        let image = Image::from_parts(
            "https://example.com/logo.png",
            "Example",
            "https://example.com/",
        )
        .unwrap();
        assert_eq!(image.url().as_str(), "https://example.com/logo.png");
        assert_eq!(image.title(), "Example");
        assert_eq!(image.link().as_str(), "https://example.com/");
    }

    #[test]
    fn test_image_from_parts_rejects_each_parameter() {
        let err = Image::from_parts("", "Example", "https://example.com/").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { parameter: "url", .. }));

        let err = Image::from_parts("https://example.com/logo.png", "", "https://example.com/")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { parameter: "title", .. }));

        let err =
            Image::from_parts("https://example.com/logo.png", "Example", "not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { parameter: "link", .. }));
    }
}
