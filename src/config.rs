//! TOML feed definitions.
//!
//! A definition file describes one feed plus how `feedsmith build` writes it.
//!
//! # Example
//!
//! ```toml
//! [feed]
//! title = "Example Podcast"
//! description = "Weekly episodes"
//! link = "https://example.com"
//! managing_editor = "host@example.com (Host)"
//! ttl = 60
//!
//! [feed.image]
//! url = "https://example.com/cover.jpg"
//! title = "Example Podcast"
//! link = "https://example.com"
//!
//! [namespaces]
//! itunes = "http://www.itunes.com/dtds/podcast-1.0.dtd"
//!
//! [[items]]
//! title = "Episode 1"
//! link = "https://example.com/ep1"
//! pub_date = "2025-01-01T12:00:00Z"
//! categories = ["tech"]
//! enclosure = { url = "https://example.com/ep1.mp3", length = "1024", type = "audio/mpeg" }
//!
//! [build]
//! format = "atom"             # rss | atom
//! output = "public/feed.xml"
//! ```
//!
//! Dates are RFC 3339 strings. Unknown keys are rejected.

use crate::{
    date::{Clock, Timestamp, parse_rfc3339},
    model::{Enclosure, Feed, Image, Item, Source},
    render::FeedFormat,
};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use thiserror::Error;

/// Default definition file name looked up by the CLI.
pub const DEFAULT_DEFINITION: &str = "feed.toml";

/// Feed definition loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Feed definition parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("`{field}` is not an RFC 3339 date: `{value}`")]
    InvalidDate { field: String, value: String },
}

// ============================================================================
// Sections
// ============================================================================

/// Root of a feed definition file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedDefinition {
    pub feed: ChannelSection,
    #[serde(default)]
    pub namespaces: BTreeMap<String, String>,
    /// Arbitrary extension elements, stored on the feed but never rendered.
    #[serde(default)]
    pub custom: BTreeMap<String, String>,
    #[serde(default)]
    pub items: Vec<ItemSection>,
    #[serde(default)]
    pub build: BuildSection,
}

/// `[feed]` channel metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChannelSection {
    pub title: String,
    pub description: String,
    pub link: String,
    pub language: String,
    pub copyright: String,
    pub managing_editor: String,
    pub webmaster: String,
    pub ttl: i32,
    pub last_build_date: Option<String>,
    pub image: Option<ImageSection>,
}

/// `[feed.image]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageSection {
    pub url: String,
    pub title: String,
    pub link: String,
    pub description: String,
    pub width: u32,
    pub height: u32,
}

/// One `[[items]]` entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ItemSection {
    pub title: String,
    pub description: String,
    pub link: String,
    pub author: String,
    pub pub_date: Option<String>,
    pub guid: String,
    pub categories: Vec<String>,
    pub comments: String,
    pub enclosure: Option<EnclosureSection>,
    pub source: Option<SourceSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnclosureSection {
    pub url: String,
    pub length: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceSection {
    pub url: String,
    pub value: String,
}

/// `[build]` output options for the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BuildSection {
    pub format: FeedFormat,
    pub output: PathBuf,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            format: FeedFormat::Rss,
            output: "feed.xml".into(),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl FromStr for FeedDefinition {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(content)?)
    }
}

impl FeedDefinition {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        content.parse()
    }

    /// Build the in-memory feed. `clock` supplies the build date when the
    /// definition has none.
    pub fn into_feed(self, clock: &impl Clock) -> Result<Feed, ConfigError> {
        let channel = self.feed;

        let mut feed = match &channel.last_build_date {
            Some(raw) => Feed::built_at(parse_date("feed.last_build_date", raw)?),
            None => Feed::with_clock(clock),
        };

        feed.set_title(channel.title)
            .set_description(channel.description)
            .set_link(channel.link)
            .set_language(channel.language)
            .set_copyright(channel.copyright)
            .set_managing_editor(channel.managing_editor)
            .set_webmaster(channel.webmaster)
            .set_ttl(channel.ttl);

        if let Some(image) = channel.image {
            feed.set_image(image.into());
        }
        for (prefix, uri) in self.namespaces {
            feed.add_namespace(prefix, uri);
        }
        for (name, value) in self.custom {
            feed.add_custom_element(name, value);
        }
        for (index, item) in self.items.into_iter().enumerate() {
            feed.add_item(item.into_item(index)?);
        }

        Ok(feed)
    }
}

impl ItemSection {
    fn into_item(self, index: usize) -> Result<Item, ConfigError> {
        let pub_date = self
            .pub_date
            .as_deref()
            .map(|raw| parse_date(&format!("items[{index}].pub_date"), raw))
            .transpose()?;

        Ok(Item {
            title: self.title,
            description: self.description,
            link: self.link,
            author: self.author,
            pub_date,
            guid: self.guid,
            categories: self.categories,
            comments: self.comments,
            enclosure: self
                .enclosure
                .map(|e| Enclosure::new(e.url, e.length, e.mime_type)),
            source: self.source.map(|s| Source::new(s.url, s.value)),
            ..Item::default()
        })
    }
}

impl From<ImageSection> for Image {
    fn from(section: ImageSection) -> Self {
        Self {
            url: section.url,
            title: section.title,
            link: section.link,
            description: section.description,
            width: section.width,
            height: section.height,
        }
    }
}

fn parse_date(field: &str, raw: &str) -> Result<Timestamp, ConfigError> {
    parse_rfc3339(raw).ok_or_else(|| ConfigError::InvalidDate {
        field: field.to_string(),
        value: raw.to_string(),
    })
}
