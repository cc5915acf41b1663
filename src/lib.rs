//! Feedsmith - RSS 2.0 and Atom 1.0 feeds from one in-memory model.
//!
//! Populate a [`Feed`], then render it:
//!
//! ```
//! use feedsmith::{Feed, FeedFormat, Item, generate};
//!
//! let mut feed = Feed::new();
//! feed.set_title("Blog")
//!     .set_description("Latest posts")
//!     .set_link("https://example.com")
//!     .add_item(Item::new("Hello", "https://example.com/hello"));
//!
//! let rss = generate(&feed, FeedFormat::Rss).unwrap();
//! assert!(rss.starts_with(br#"<?xml version="1.0" encoding="UTF-8"?>"#));
//! ```
//!
//! # Modules
//!
//! | Module    | Purpose                                         |
//! |-----------|-------------------------------------------------|
//! | `model`   | `Feed`, `Item`, `Image`, `Enclosure`, `Source`  |
//! | `render`  | RSS and Atom serializers, `FeedFormat`          |
//! | `author`  | `"email (Name)"` author parsing                 |
//! | `date`    | RFC 822 / RFC 3339 formatting, clocks           |
//! | `config`  | TOML feed definitions                           |
//! | `serve`   | `tiny_http` adapter                             |
//! | `logger`  | colored terminal logging for the binary         |

pub mod author;
pub mod config;
pub mod date;
pub mod error;
pub mod logger;
pub mod model;
pub mod render;
pub mod serve;

pub use author::Author;
pub use date::{Clock, FixedClock, SystemClock, Timestamp};
pub use error::{FeedError, Result};
pub use model::{Enclosure, Feed, Image, Item, Source};
pub use render::FeedFormat;

/// Render `feed` as RSS 2.0.
pub fn generate_rss(feed: &Feed) -> Result<Vec<u8>> {
    render::rss::render(feed)
}

/// Render `feed` as Atom 1.0.
pub fn generate_atom(feed: &Feed) -> Result<Vec<u8>> {
    render::atom::render(feed)
}

/// Render `feed` in the requested format.
pub fn generate(feed: &Feed, format: FeedFormat) -> Result<Vec<u8>> {
    format.render(feed)
}
