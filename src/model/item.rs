//! Feed items and their attachments.

use super::Image;
use crate::date::Timestamp;

/// One entry in a feed.
///
/// Fields are public plain data. `Item::new` plus the `with_*` methods cover
/// the common construction path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Item {
    pub title: String,
    pub description: String,
    pub link: String,
    /// Free text, conventionally `"email (Name)"`.
    pub author: String,
    /// `None` means the item has no date and date elements are omitted.
    pub pub_date: Option<Timestamp>,
    pub guid: String,
    /// Rendered in order, duplicates kept.
    pub categories: Vec<String>,
    pub comments: String,
    /// Primary media attachment, the only one RSS and Atom render.
    pub enclosure: Option<Enclosure>,
    /// Secondary attachments, stored but never rendered.
    pub enclosures: Vec<Enclosure>,
    /// Item images, stored but never rendered.
    pub images: Vec<Image>,
    pub source: Option<Source>,
}

impl Item {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_pub_date(mut self, pub_date: impl Into<Timestamp>) -> Self {
        self.pub_date = Some(pub_date.into());
        self
    }

    pub fn with_guid(mut self, guid: impl Into<String>) -> Self {
        self.guid = guid.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories.extend(categories.into_iter().map(Into::into));
        self
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    pub fn with_enclosure(mut self, enclosure: Enclosure) -> Self {
        self.enclosure = Some(enclosure);
        self
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    /// Stable identifier: the guid, or the link when no guid is set.
    pub fn identifier(&self) -> &str {
        if self.guid.is_empty() {
            &self.link
        } else {
            &self.guid
        }
    }
}

/// Media attachment (podcast audio, video, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enclosure {
    pub url: String,
    /// Byte length, kept as text the way RSS writes it.
    pub length: String,
    pub mime_type: String,
}

impl Enclosure {
    pub fn new(
        url: impl Into<String>,
        length: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            length: length.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// Channel an item was republished from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source {
    pub url: String,
    /// Display text; RSS keeps it, Atom drops it.
    pub value: String,
}

impl Source {
    pub fn new(url: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            value: value.into(),
        }
    }
}
