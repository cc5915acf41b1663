//! Atom 1.0 feed generation.
//!
//! The feed link doubles as the feed `id`, and `<link>/feed.xml` is the fixed
//! `self` link. Entries take their `id` from the item guid, or from the item
//! link when no guid is set. `updated` and `published` both carry the item
//! date since the model has no separate modification time.

use super::XmlDocument;
use crate::{
    author::Author,
    date::format_rfc3339,
    error::Result,
    model::{Feed, Item},
};
use std::io;

pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// Suffix appended to the feed link for the `rel="self"` link.
pub const SELF_LINK_SUFFIX: &str = "/feed.xml";

const GENERATOR_NAME: &str = env!("CARGO_PKG_NAME");
const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render `feed` as an Atom 1.0 document.
pub fn render(feed: &Feed) -> Result<Vec<u8>> {
    feed.validate()?;
    Ok(AtomFeed { feed }.into_xml()?)
}

struct AtomFeed<'a> {
    feed: &'a Feed,
}

impl AtomFeed<'_> {
    fn into_xml(self) -> io::Result<Vec<u8>> {
        let feed = self.feed;
        let mut doc = XmlDocument::new()?;

        doc.open("feed", &[("xmlns", ATOM_NS)])?;

        doc.text("title", feed.title())?;
        doc.optional("subtitle", feed.description())?;
        doc.text("id", feed.link())?;
        doc.empty(
            "link",
            &[
                ("href", feed.link()),
                ("rel", "alternate"),
                ("type", "text/html"),
            ],
        )?;
        let self_link = format!("{}{SELF_LINK_SUFFIX}", feed.link());
        doc.empty(
            "link",
            &[
                ("href", self_link.as_str()),
                ("rel", "self"),
                ("type", "application/atom+xml"),
            ],
        )?;
        doc.optional("updated", &format_rfc3339(feed.last_build_date()))?;
        doc.optional("rights", feed.copyright())?;
        if !feed.managing_editor().is_empty() {
            write_author(&mut doc, &Author::parse(feed.managing_editor()))?;
        }
        doc.text_with("generator", &[("version", GENERATOR_VERSION)], GENERATOR_NAME)?;

        for item in feed.items() {
            write_entry(&mut doc, item)?;
        }

        doc.close("feed")?;
        Ok(doc.finish())
    }
}

fn write_author(doc: &mut XmlDocument, author: &Author) -> io::Result<()> {
    doc.open("author", &[])?;
    // Atom requires <name>, so it is kept even when only an email was found.
    doc.text("name", &author.name)?;
    doc.optional("email", &author.email)?;
    doc.close("author")
}

fn write_entry(doc: &mut XmlDocument, item: &Item) -> io::Result<()> {
    doc.open("entry", &[])?;

    doc.text("title", &item.title)?;
    doc.text("id", item.identifier())?;
    doc.empty(
        "link",
        &[
            ("href", item.link.as_str()),
            ("rel", "alternate"),
            ("type", "text/html"),
        ],
    )?;

    let date = format_rfc3339(item.pub_date.as_ref());
    doc.optional("updated", &date)?;
    doc.optional("published", &date)?;

    doc.optional("summary", &item.description)?;
    if !item.description.is_empty() {
        doc.text_with("content", &[("type", "html")], &item.description)?;
    }

    if !item.author.is_empty() {
        write_author(doc, &Author::parse(&item.author))?;
    }
    for category in &item.categories {
        doc.empty("category", &[("term", category.as_str())])?;
    }
    if let Some(source) = &item.source {
        doc.empty("source", &[("uri", source.url.as_str())])?;
    }

    doc.close("entry")
}
