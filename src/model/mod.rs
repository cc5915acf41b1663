//! Feed data model.
//!
//! A [`Feed`] is a plain value: the caller fills it in, then hands it to one
//! of the renderers. Nothing is validated while mutating; [`Feed::validate`]
//! runs at render time.
//!
//! ```ignore
//! let mut feed = Feed::new();
//! feed.set_title("Blog")
//!     .set_description("Posts")
//!     .set_link("https://example.com")
//!     .add_item(Item::new("Hello", "https://example.com/hello"));
//! let xml = feed.rss()?;
//! ```

mod image;
mod item;

pub use image::Image;
pub use item::{Enclosure, Item, Source};

use crate::{
    date::{Clock, SystemClock, Timestamp},
    error::{FeedError, Result},
    render::{self, FeedFormat},
};
use std::collections::BTreeMap;

/// Root aggregate of a syndication feed.
#[derive(Debug, Clone, PartialEq)]
pub struct Feed {
    title: String,
    description: String,
    link: String,
    language: String,
    copyright: String,
    managing_editor: String,
    webmaster: String,
    ttl: i32,
    last_build_date: Option<Timestamp>,
    image: Option<Image>,
    items: Vec<Item>,
    namespaces: BTreeMap<String, String>,
    custom_elements: BTreeMap<String, String>,
}

impl Default for Feed {
    fn default() -> Self {
        Self::new()
    }
}

impl Feed {
    /// Empty feed built "now" by the system clock.
    pub fn new() -> Self {
        Self::with_clock(&SystemClock)
    }

    /// Empty feed whose build date comes from `clock`.
    pub fn with_clock(clock: &impl Clock) -> Self {
        Self::built_at(clock.now())
    }

    /// Empty feed with an explicit build date.
    pub fn built_at(last_build_date: impl Into<Timestamp>) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            link: String::new(),
            language: String::new(),
            copyright: String::new(),
            managing_editor: String::new(),
            webmaster: String::new(),
            ttl: 0,
            last_build_date: Some(last_build_date.into()),
            image: None,
            items: Vec::new(),
            namespaces: BTreeMap::new(),
            custom_elements: BTreeMap::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Channel metadata
    // ------------------------------------------------------------------------

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_link(&mut self, link: impl Into<String>) -> &mut Self {
        self.link = link.into();
        self
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn set_language(&mut self, language: impl Into<String>) -> &mut Self {
        self.language = language.into();
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn set_copyright(&mut self, copyright: impl Into<String>) -> &mut Self {
        self.copyright = copyright.into();
        self
    }

    pub fn copyright(&self) -> &str {
        &self.copyright
    }

    /// Conventionally `"email (Name)"`; Atom parses it into the feed author.
    pub fn set_managing_editor(&mut self, editor: impl Into<String>) -> &mut Self {
        self.managing_editor = editor.into();
        self
    }

    pub fn managing_editor(&self) -> &str {
        &self.managing_editor
    }

    pub fn set_webmaster(&mut self, webmaster: impl Into<String>) -> &mut Self {
        self.webmaster = webmaster.into();
        self
    }

    pub fn webmaster(&self) -> &str {
        &self.webmaster
    }

    /// Cache lifetime in minutes. Values `<= 0` are not rendered.
    pub fn set_ttl(&mut self, ttl: i32) -> &mut Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> i32 {
        self.ttl
    }

    pub fn set_last_build_date(&mut self, date: impl Into<Timestamp>) -> &mut Self {
        self.last_build_date = Some(date.into());
        self
    }

    /// Drop the build date so neither format renders one.
    pub fn clear_last_build_date(&mut self) -> &mut Self {
        self.last_build_date = None;
        self
    }

    pub fn last_build_date(&self) -> Option<&Timestamp> {
        self.last_build_date.as_ref()
    }

    pub fn set_image(&mut self, image: Image) -> &mut Self {
        self.image = Some(image);
        self
    }

    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    // ------------------------------------------------------------------------
    // Items
    // ------------------------------------------------------------------------

    /// Append an item from its most common fields.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        link: impl Into<String>,
        author: impl Into<String>,
        pub_date: Option<Timestamp>,
    ) -> &mut Self {
        let item = Item {
            title: title.into(),
            description: description.into(),
            link: link.into(),
            author: author.into(),
            pub_date,
            ..Item::default()
        };
        self.add_item(item)
    }

    pub fn add_item(&mut self, item: Item) -> &mut Self {
        self.items.push(item);
        self
    }

    pub fn add_items(&mut self, items: impl IntoIterator<Item = Item>) -> &mut Self {
        self.items.extend(items);
        self
    }

    /// Items in output order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    // ------------------------------------------------------------------------
    // Extension registries (stored, never rendered)
    // ------------------------------------------------------------------------

    pub fn add_namespace(
        &mut self,
        prefix: impl Into<String>,
        uri: impl Into<String>,
    ) -> &mut Self {
        self.namespaces.insert(prefix.into(), uri.into());
        self
    }

    pub fn namespaces(&self) -> &BTreeMap<String, String> {
        &self.namespaces
    }

    pub fn add_custom_element(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.custom_elements.insert(name.into(), value.into());
        self
    }

    pub fn custom_elements(&self) -> &BTreeMap<String, String> {
        &self.custom_elements
    }

    // ------------------------------------------------------------------------
    // Validation and rendering
    // ------------------------------------------------------------------------

    /// Check the required channel fields. Items are not inspected.
    pub fn validate(&self) -> Result<()> {
        if self.title.is_empty() {
            return Err(FeedError::MissingTitle);
        }
        if self.description.is_empty() {
            return Err(FeedError::MissingDescription);
        }
        if self.link.is_empty() {
            return Err(FeedError::MissingLink);
        }
        Ok(())
    }

    /// Render as RSS 2.0.
    pub fn rss(&self) -> Result<Vec<u8>> {
        render::rss::render(self)
    }

    /// Render as Atom 1.0.
    pub fn atom(&self) -> Result<Vec<u8>> {
        render::atom::render(self)
    }

    pub fn render(&self, format: FeedFormat) -> Result<Vec<u8>> {
        format.render(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::FixedClock;
    use chrono::{TimeZone, Utc};

    fn fixed_time() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap().into()
    }

    fn valid_feed() -> Feed {
        let mut feed = Feed::built_at(fixed_time());
        feed.set_title("T").set_description("D").set_link("https://x/");
        feed
    }

    #[test]
    fn test_new_feed_is_empty() {
        let feed = Feed::new();
        assert_eq!(feed.title(), "");
        assert!(feed.items().is_empty());
        assert!(feed.image().is_none());
        assert!(feed.namespaces().is_empty());
        assert!(feed.custom_elements().is_empty());
        assert!(feed.last_build_date().is_some());
    }

    #[test]
    fn test_with_clock_uses_clock_time() {
        let feed = Feed::with_clock(&FixedClock(fixed_time()));
        assert_eq!(feed.last_build_date(), Some(&fixed_time()));
    }

    #[test]
    fn test_setters_chain() {
        let mut feed = Feed::built_at(fixed_time());
        feed.set_title("Title")
            .set_description("Description")
            .set_link("https://example.com")
            .set_language("en-us")
            .set_copyright("(c) 2025")
            .set_managing_editor("editor@example.com (Editor)")
            .set_webmaster("web@example.com")
            .set_ttl(60)
            .set_image(Image::new("https://example.com/logo.png", "Logo", "https://example.com"));

        assert_eq!(feed.title(), "Title");
        assert_eq!(feed.description(), "Description");
        assert_eq!(feed.link(), "https://example.com");
        assert_eq!(feed.language(), "en-us");
        assert_eq!(feed.copyright(), "(c) 2025");
        assert_eq!(feed.managing_editor(), "editor@example.com (Editor)");
        assert_eq!(feed.webmaster(), "web@example.com");
        assert_eq!(feed.ttl(), 60);
        assert_eq!(feed.image().map(|i| i.title.as_str()), Some("Logo"));
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let mut feed = valid_feed();
        feed.add_item(Item::new("first", "https://x/1"))
            .add("second", "", "https://x/2", "", None)
            .add_items(vec![
                Item::new("third", "https://x/3"),
                Item::new("fourth", "https://x/4"),
            ]);

        let titles: Vec<_> = feed.items().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["first", "second", "third", "fourth"]);
    }

    #[test]
    fn test_validate_order() {
        let mut feed = Feed::built_at(fixed_time());
        assert!(matches!(feed.validate(), Err(FeedError::MissingTitle)));

        feed.set_title("T");
        assert!(matches!(feed.validate(), Err(FeedError::MissingDescription)));

        feed.set_description("D");
        assert!(matches!(feed.validate(), Err(FeedError::MissingLink)));

        feed.set_link("https://x/");
        assert!(feed.validate().is_ok());
    }

    #[test]
    fn test_validate_ignores_items() {
        let mut feed = valid_feed();
        feed.add_item(Item::default());
        assert!(feed.validate().is_ok());
    }

    #[test]
    fn test_extension_registries() {
        let mut feed = valid_feed();
        feed.add_namespace("itunes", "http://www.itunes.com/dtds/podcast-1.0.dtd")
            .add_namespace("itunes", "urn:replaced")
            .add_custom_element("rating", "clean");

        assert_eq!(feed.namespaces().get("itunes").map(String::as_str), Some("urn:replaced"));
        assert_eq!(feed.custom_elements().len(), 1);
    }

    #[test]
    fn test_clear_last_build_date() {
        let mut feed = valid_feed();
        feed.clear_last_build_date();
        assert!(feed.last_build_date().is_none());
    }

    #[test]
    fn test_render_dispatch() {
        let feed = valid_feed();
        assert_eq!(feed.render(FeedFormat::Rss).unwrap(), feed.rss().unwrap());
        assert_eq!(feed.render(FeedFormat::Atom).unwrap(), feed.atom().unwrap());
    }
}
