//! Feed-to-XML serialization.
//!
//! Single-pass, stateless mapping from a [`Feed`] value to an RSS 2.0
//! document string. Element order, conditional inclusion and escaping
//! follow the RSS 2.0 / Atom / content-module conventions exactly;
//! quick-xml's event writer handles all text and attribute escaping,
//! so nothing here escapes by hand.

use crate::error::Error;
use crate::feed::{Feed, Image};
use crate::item::{Enclosure, Item};
use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Write};

/// Atom namespace, declared on `<rss>` for the `atom:link` self
/// reference.
pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// RSS 1.0 content-module namespace, declared on `<rss>` for
/// `content:encoded` full-HTML bodies.
pub const CONTENT_NS: &str = "http://purl.org/rss/1.0/modules/content/";

/// Text encoding named in the output's XML declaration.
///
/// The returned `String` is always UTF-8 in memory; the declaration
/// records the encoding the caller must transcode to when persisting
/// or transmitting the document bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedEncoding {
    /// Declares `encoding="utf-16"`.
    #[default]
    Utf16,
    /// Declares `encoding="utf-8"`.
    Utf8,
}

impl FeedEncoding {
    /// The value written into the XML declaration.
    pub fn declared(self) -> &'static str {
        match self {
            Self::Utf16 => "utf-16",
            Self::Utf8 => "utf-8",
        }
    }
}

/// Serialization options.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SerializeOption {
    pub encoding: FeedEncoding,
}

/// Serialize a feed to a complete XML document string.
///
/// Never fails for absent optional fields; those elements and
/// attributes are simply omitted.
pub fn serialize(feed: &Feed, option: &SerializeOption) -> Result<String, Error> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::with_capacity(1024)), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new(
        "1.0",
        Some(option.encoding.declared()),
        None,
    )))?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:atom", ATOM_NS));
    rss.push_attribute(("xmlns:content", CONTENT_NS));
    writer.write_event(Event::Start(rss))?;

    write_channel(&mut writer, feed)?;

    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8(bytes)?)
}

fn write_channel<W: Write>(writer: &mut Writer<W>, feed: &Feed) -> Result<(), Error> {
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    if let Some(link) = &feed.link {
        let mut self_link = BytesStart::new("atom:link");
        self_link.push_attribute(("rel", "self"));
        self_link.push_attribute(("type", "application/rss+xml"));
        self_link.push_attribute(("href", link.as_str()));
        writer.write_event(Event::Empty(self_link))?;
    }

    write_text_element(writer, "title", &feed.title)?;
    if let Some(link) = &feed.link {
        write_text_element(writer, "link", link.as_str())?;
    }
    write_text_element(writer, "description", &feed.description)?;

    if let Some(copyright) = feed.copyright.as_deref().filter(|c| !c.is_empty()) {
        write_text_element(writer, "copyright", copyright)?;
    }

    write_text_element(writer, "language", &feed.language)?;

    if let Some(image) = &feed.image {
        write_image(writer, image)?;
    }

    for item in &feed.items {
        write_item(writer, item)?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    Ok(())
}

fn write_image<W: Write>(writer: &mut Writer<W>, image: &Image) -> Result<(), Error> {
    writer.write_event(Event::Start(BytesStart::new("image")))?;
    write_text_element(writer, "url", image.url().as_str())?;
    write_text_element(writer, "title", image.title())?;
    write_text_element(writer, "link", image.link().as_str())?;
    writer.write_event(Event::End(BytesEnd::new("image")))?;
    Ok(())
}

fn write_item<W: Write>(writer: &mut Writer<W>, item: &Item) -> Result<(), Error> {
    writer.write_event(Event::Start(BytesStart::new("item")))?;

    write_text_element(writer, "title", &item.title)?;

    if let Some(link) = &item.link {
        write_text_element(writer, "link", link.as_str())?;
    }

    write_text_element(writer, "description", &item.body)?;

    if let Some(author) = &item.author {
        write_text_element(writer, "author", &author.display())?;
    }

    for category in &item.categories {
        write_text_element(writer, "category", category)?;
    }

    if let Some(comments) = &item.comments {
        write_text_element(writer, "comments", comments.as_str())?;
    }

    if let Some(permalink) = item.permalink.as_deref().filter(|p| !p.trim().is_empty()) {
        write_text_element(writer, "guid", permalink)?;
    }

    if let Some(publish_date) = item.publish_date {
        write_text_element(writer, "pubDate", &publish_date.to_rfc2822())?;
    }

    for enclosure in &item.enclosures {
        write_enclosure(writer, enclosure)?;
    }

    if let Some(html) = item.full_html_content.as_deref().filter(|c| !c.trim().is_empty()) {
        writer.write_event(Event::Start(BytesStart::new("content:encoded")))?;
        write_cdata(writer, html)?;
        writer.write_event(Event::End(BytesEnd::new("content:encoded")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

fn write_enclosure<W: Write>(writer: &mut Writer<W>, enclosure: &Enclosure) -> Result<(), Error> {
    let mut element = BytesStart::new("enclosure");

    if enclosure.length > 0 {
        element.push_attribute(("length", enclosure.length.to_string().as_str()));
    }
    if let Some(url) = &enclosure.url {
        element.push_attribute(("url", url.as_str()));
    }
    if let Some(mime_type) = enclosure.mime_type.as_deref().map(str::trim).filter(|m| !m.is_empty())
    {
        element.push_attribute(("type", mime_type));
    }
    for (name, value) in &enclosure.values {
        element.push_attribute((name.as_str(), value.as_str()));
    }

    writer.write_event(Event::Empty(element))?;
    Ok(())
}

/// Write `content` unescaped as one or more CDATA sections.
///
/// A literal `]]>` inside the content would terminate the section
/// early, so it is split across consecutive sections (`]]` ends one,
/// `>` opens the next); parsers concatenate them back verbatim.
fn write_cdata<W: Write>(writer: &mut Writer<W>, content: &str) -> Result<(), Error> {
    let mut rest = content;
    while let Some(index) = rest.find("]]>") {
        writer.write_event(Event::CData(BytesCData::new(&rest[..index + 2])))?;
        rest = &rest[index + 2..];
    }
    writer.write_event(Event::CData(BytesCData::new(rest)))?;
    Ok(())
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), Error> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Author;
    use url::Url;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_declaration_reflects_encoding() {
        let feed = Feed::default();

        let xml = serialize(&feed, &SerializeOption::default()).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="utf-16"?>"#));

        let xml = serialize(
            &feed,
            &SerializeOption {
                encoding: FeedEncoding::Utf8,
            },
        )
        .unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
    }

    #[test]
    fn test_namespaces_always_declared() {
        let xml = Feed::default().serialize().unwrap();
        assert!(xml.contains(r#"xmlns:atom="http://www.w3.org/2005/Atom""#));
        assert!(xml.contains(r#"xmlns:content="http://purl.org/rss/1.0/modules/content/""#));
    }

    #[test]
    fn test_missing_link_omits_both_link_elements() {
        let feed = Feed {
            title: "No Link".to_string(),
            description: "A feed without a canonical URL".to_string(),
            ..Feed::default()
        };
        let xml = feed.serialize().unwrap();

        assert!(!xml.contains("<atom:link"));
        assert!(!xml.contains("<link>"));
    }

    #[test]
    fn test_link_emits_atom_self_reference() {
        let feed = Feed {
            link: Some(url("https://example.com/feed")),
            ..Feed::default()
        };
        let xml = feed.serialize().unwrap();

        assert!(xml.contains(
            r#"<atom:link rel="self" type="application/rss+xml" href="https://example.com/feed"/>"#
        ));
        assert!(xml.contains("<link>https://example.com/feed</link>"));
    }

    #[test]
    fn test_copyright_omitted_when_empty() {
        let mut feed = Feed::default();
        assert!(!feed.serialize().unwrap().contains("<copyright>"));

        feed.copyright = Some(String::new());
        assert!(!feed.serialize().unwrap().contains("<copyright>"));

        feed.copyright = Some("(c) 2016".to_string());
        assert!(feed.serialize().unwrap().contains("<copyright>(c) 2016</copyright>"));
    }

    #[test]
    fn test_language_defaults_to_en() {
        let xml = Feed::default().serialize().unwrap();
        assert!(xml.contains("<language>en</language>"));
    }

    #[test]
    fn test_blank_permalink_omits_guid() {
        let feed = Feed {
            items: vec![Item {
                permalink: Some("   ".to_string()),
                ..Item::default()
            }],
            ..Feed::default()
        };
        assert!(!feed.serialize().unwrap().contains("<guid>"));
    }

    #[test]
    fn test_author_element_format() {
        let feed = Feed {
            items: vec![Item {
                author: Some(Author {
                    name: "Shawn Wildermuth".to_string(),
                    email: "shawn@wildermuth.com".to_string(),
                }),
                ..Item::default()
            }],
            ..Feed::default()
        };
        let xml = feed.serialize().unwrap();
        assert!(xml.contains("<author>shawn@wildermuth.com (Shawn Wildermuth)</author>"));
    }

    #[test]
    fn test_categories_preserve_order_and_duplicates() {
        let feed = Feed {
            items: vec![Item {
                categories: vec![
                    "aspnet".to_string(),
                    "foobar".to_string(),
                    "aspnet".to_string(),
                ],
                ..Item::default()
            }],
            ..Feed::default()
        };
        let xml = feed.serialize().unwrap();

        let positions: Vec<usize> = xml
            .match_indices("<category>")
            .map(|(index, _)| index)
            .collect();
        assert_eq!(positions.len(), 3);
        assert!(xml.contains("<category>foobar</category>"));
        assert_eq!(xml.matches("<category>aspnet</category>").count(), 2);
    }

    #[test]
    fn test_enclosure_attributes_conditional() {
        let mut enclosure = Enclosure {
            url: Some(url("https://example.com/episode.mp3")),
            length: 0,
            mime_type: Some("  audio/mpeg  ".to_string()),
            ..Enclosure::default()
        };
        enclosure.set_value("medium", "audio");

        let feed = Feed {
            items: vec![Item {
                enclosures: vec![enclosure],
                ..Item::default()
            }],
            ..Feed::default()
        };
        let xml = feed.serialize().unwrap();

        assert!(!xml.contains("length="));
        assert!(xml.contains(r#"url="https://example.com/episode.mp3""#));
        // MIME type is trimmed before emission
        assert!(xml.contains(r#"type="audio/mpeg""#));
        assert!(xml.contains(r#"medium="audio""#));
    }

    #[test]
    fn test_enclosure_length_emitted_when_positive() {
        let feed = Feed {
            items: vec![Item {
                enclosures: vec![Enclosure {
                    length: 4096,
                    ..Enclosure::default()
                }],
                ..Item::default()
            }],
            ..Feed::default()
        };
        assert!(feed.serialize().unwrap().contains(r#"<enclosure length="4096"/>"#));
    }

    #[test]
    fn test_text_is_escaped_outside_cdata() {
        let feed = Feed {
            title: "Rants & Raves".to_string(),
            ..Feed::default()
        };
        let xml = feed.serialize().unwrap();
        assert!(xml.contains("<title>Rants &amp; Raves</title>"));
    }

    #[test]
    fn test_full_html_content_is_cdata_wrapped() {
        let feed = Feed {
            items: vec![Item {
                full_html_content: Some("<section></section>".to_string()),
                ..Item::default()
            }],
            ..Feed::default()
        };
        let xml = feed.serialize().unwrap();
        assert!(xml.contains(
            "<content:encoded><![CDATA[<section></section>]]></content:encoded>"
        ));
    }

    #[test]
    fn test_cdata_terminator_split_across_sections() {
        let feed = Feed {
            items: vec![Item {
                full_html_content: Some("<p>before]]>after</p>".to_string()),
                ..Item::default()
            }],
            ..Feed::default()
        };
        let xml = feed.serialize().unwrap();
        assert!(xml.contains("<![CDATA[<p>before]]]]><![CDATA[>after</p>]]>"));
    }

    #[test]
    fn test_blank_full_html_content_omitted() {
        let feed = Feed {
            items: vec![Item {
                full_html_content: Some("  \n ".to_string()),
                ..Item::default()
            }],
            ..Feed::default()
        };
        assert!(!feed.serialize().unwrap().contains("content:encoded"));
    }
}
