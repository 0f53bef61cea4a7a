//! RSS 2.0 feed serialization.
//!
//! Builds an in-memory RSS 2.0 channel — metadata, items, enclosures,
//! an optional image, an Atom self-link and the `content:encoded`
//! full-HTML extension — and serializes it to a well-formed XML
//! document string. This is a domain-object-to-markup mapper only:
//! no parsing, no I/O, no network. Writing the returned string to a
//! file or HTTP response is the caller's job.
//!
//! # Example
//!
//! ```
//! use rss_syndication::{Author, Feed, Item};
//! use url::Url;
//!
//! let mut feed = Feed {
//!     title: "Shawn Wildermuth's Blog".to_string(),
//!     description: "My Favorite Rants and Raves".to_string(),
//!     link: Some(Url::parse("http://wildermuth.com/feed").unwrap()),
//!     copyright: Some("(c) 2016".to_string()),
//!     ..Feed::default()
//! };
//!
//! feed.items.push(Item {
//!     title: "Foo Bar".to_string(),
//!     body: "<p>Foo bar</p>".to_string(),
//!     author: Some(Author {
//!         name: "Shawn Wildermuth".to_string(),
//!         email: "shawn@wildermuth.com".to_string(),
//!     }),
//!     ..Item::default()
//! });
//!
//! let xml = feed.serialize().unwrap();
//! assert!(xml.starts_with("<?xml version"));
//! ```

pub mod datetime;
pub mod error;
pub mod feed;
pub mod item;
pub mod serialize;

pub use datetime::DateTimeUtc;
pub use error::Error;
pub use feed::{Feed, Image};
pub use item::{Author, Enclosure, Item};
pub use serialize::{FeedEncoding, SerializeOption, serialize};
