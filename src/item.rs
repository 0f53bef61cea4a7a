//! Feed item value types.

use crate::datetime::DateTimeUtc;
use serde::{Deserialize, Serialize};
use url::Url;

/// A single channel entry.
///
/// Optional fields are omitted from the serialized output entirely
/// rather than emitted empty. `body` maps to `<description>`,
/// `permalink` to `<guid>`, `full_html_content` to a CDATA-wrapped
/// `content:encoded` extension element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    /// HTML or text description of the entry.
    pub body: String,
    pub link: Option<Url>,
    /// Stable identifier emitted verbatim as `<guid>`; skipped when
    /// absent or all-whitespace.
    pub permalink: Option<String>,
    /// Omits `<pubDate>` when `None`.
    pub publish_date: Option<DateTimeUtc>,
    pub author: Option<Author>,
    pub comments: Option<Url>,
    /// Emitted in order, duplicates preserved.
    pub categories: Vec<String>,
    pub enclosures: Vec<Enclosure>,
    /// Full article HTML, serialized unescaped inside a CDATA section.
    pub full_html_content: Option<String>,
}

/// Item author, rendered as `"{email} ({name})"` per RSS convention.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub email: String,
}

impl Author {
    /// The `<author>` element text.
    pub(crate) fn display(&self) -> String {
        format!("{} ({})", self.email, self.name)
    }
}

/// A media file attached to an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Enclosure {
    pub url: Option<Url>,
    /// Size in bytes; zero omits the `length` attribute.
    pub length: u64,
    /// Standard MIME type, e.g. `audio/mpeg`. Trimmed before emission;
    /// blank values omit the `type` attribute.
    pub mime_type: Option<String>,
    /// Extra attributes emitted verbatim on `<enclosure>`, in insertion
    /// order. Use [`Enclosure::set_value`] for last-write-wins updates.
    pub values: Vec<(String, String)>,
}

impl Enclosure {
    /// Set an extra attribute. Overwrites an existing key in place
    /// (order-stable), appends otherwise.
    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.values.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.values.push((name, value)),
        }
    }
}
