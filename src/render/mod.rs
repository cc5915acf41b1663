//! Feed serialization (RSS, Atom).
//!
//! Both renderers map a validated [`Feed`] onto their own XML vocabulary:
//!
//! - **RSS 2.0**: `<rss version="2.0"><channel>...</channel></rss>`
//! - **Atom 1.0**: `<feed xmlns="http://www.w3.org/2005/Atom">...</feed>`
//!
//! Output always starts with the UTF-8 declaration line and uses two-space
//! indentation.

pub mod atom;
pub mod rss;

use crate::{error::Result, model::Feed};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt, io, str::FromStr};

// ============================================================================
// Format
// ============================================================================

/// Feed output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FeedFormat {
    /// RSS 2.0 format (default).
    #[default]
    Rss,
    /// Atom 1.0 format.
    Atom,
}

impl FeedFormat {
    /// Media type adapters should send with the rendered bytes.
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Rss => "application/xml; charset=utf-8",
            Self::Atom => "application/atom+xml; charset=utf-8",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rss => "rss",
            Self::Atom => "atom",
        }
    }

    /// Format from a `?format=` query value. Anything but `atom` is RSS.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("atom") => Self::Atom,
            _ => Self::Rss,
        }
    }

    /// Format from an `Accept` header, `None` if it is not a feed request.
    pub fn from_accept(accept: &str) -> Option<Self> {
        match accept.trim() {
            "application/atom+xml" => Some(Self::Atom),
            "application/xml" | "application/rss+xml" => Some(Self::Rss),
            _ => None,
        }
    }

    pub fn render(self, feed: &Feed) -> Result<Vec<u8>> {
        match self {
            Self::Rss => rss::render(feed),
            Self::Atom => atom::render(feed),
        }
    }
}

impl fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rss" => Ok(Self::Rss),
            "atom" => Ok(Self::Atom),
            other => Err(format!("unknown feed format `{other}` (expected rss or atom)")),
        }
    }
}

// ============================================================================
// XML writer
// ============================================================================

/// Indented XML document under construction.
pub(crate) struct XmlDocument {
    writer: Writer<Vec<u8>>,
}

impl XmlDocument {
    /// Start a document with the UTF-8 declaration.
    pub fn new() -> io::Result<Self> {
        let mut writer = Writer::new_with_indent(Vec::with_capacity(4096), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(Self { writer })
    }

    pub fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> io::Result<()> {
        self.writer.write_event(Event::Start(start(name, attrs)))
    }

    pub fn close(&mut self, name: &str) -> io::Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))
    }

    /// `<name>value</name>`, written even when `value` is empty.
    pub fn text(&mut self, name: &str, value: &str) -> io::Result<()> {
        self.text_with(name, &[], value)
    }

    pub fn text_with(&mut self, name: &str, attrs: &[(&str, &str)], value: &str) -> io::Result<()> {
        self.writer.write_event(Event::Start(start(name, attrs)))?;
        let value = sanitize(value);
        self.writer.write_event(Event::Text(BytesText::new(&value)))?;
        self.close(name)
    }

    /// `<name>value</name>`, skipped when `value` is empty.
    pub fn optional(&mut self, name: &str, value: &str) -> io::Result<()> {
        if value.is_empty() {
            return Ok(());
        }
        self.text(name, value)
    }

    /// `<name attr="..."/>`
    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> io::Result<()> {
        self.writer.write_event(Event::Empty(start(name, attrs)))
    }

    pub fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

fn start<'a>(name: &'a str, attrs: &[(&str, &str)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for &(key, value) in attrs {
        start.push_attribute((key, &*sanitize(value)));
    }
    start
}

/// `Char` production of XML 1.0.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\u{9}' | '\u{A}' | '\u{D}'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Replace characters XML cannot carry with U+FFFD.
fn sanitize(s: &str) -> Cow<'_, str> {
    // Fast path: nothing to replace
    if s.chars().all(is_xml_char) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.chars()
            .map(|c| if is_xml_char(c) { c } else { char::REPLACEMENT_CHARACTER })
            .collect(),
    )
}
