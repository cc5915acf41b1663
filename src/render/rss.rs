//! RSS 2.0 feed generation.
//!
//! Channel and item fields map 1:1 from the model. Empty optional strings,
//! a non-positive TTL and absent dates are left out. Only the primary
//! enclosure is written; secondary enclosures and item images stay in the
//! model.

use super::XmlDocument;
use crate::{
    date::format_rfc822,
    error::Result,
    model::{Feed, Image, Item},
};
use std::io;

/// Render `feed` as an RSS 2.0 document.
pub fn render(feed: &Feed) -> Result<Vec<u8>> {
    feed.validate()?;
    Ok(RssFeed { feed }.into_xml()?)
}

struct RssFeed<'a> {
    feed: &'a Feed,
}

impl RssFeed<'_> {
    fn into_xml(self) -> io::Result<Vec<u8>> {
        let feed = self.feed;
        let mut doc = XmlDocument::new()?;

        doc.open("rss", &[("version", "2.0")])?;
        doc.open("channel", &[])?;

        doc.text("title", feed.title())?;
        doc.text("description", feed.description())?;
        doc.text("link", feed.link())?;
        doc.optional("language", feed.language())?;
        doc.optional("copyright", feed.copyright())?;
        doc.optional("managingEditor", feed.managing_editor())?;
        doc.optional("webMaster", feed.webmaster())?;
        doc.optional("lastBuildDate", &format_rfc822(feed.last_build_date()))?;
        if feed.ttl() > 0 {
            doc.text("ttl", &feed.ttl().to_string())?;
        }

        if let Some(image) = feed.image() {
            write_image(&mut doc, image)?;
        }

        for item in feed.items() {
            write_item(&mut doc, item)?;
        }

        doc.close("channel")?;
        doc.close("rss")?;
        Ok(doc.finish())
    }
}

fn write_image(doc: &mut XmlDocument, image: &Image) -> io::Result<()> {
    doc.open("image", &[])?;
    doc.text("url", &image.url)?;
    doc.text("title", &image.title)?;
    doc.text("link", &image.link)?;
    doc.optional("description", &image.description)?;
    if image.width > 0 {
        doc.text("width", &image.width.to_string())?;
    }
    if image.height > 0 {
        doc.text("height", &image.height.to_string())?;
    }
    doc.close("image")
}

fn write_item(doc: &mut XmlDocument, item: &Item) -> io::Result<()> {
    doc.open("item", &[])?;

    doc.text("title", &item.title)?;
    doc.text("description", &item.description)?;
    doc.text("link", &item.link)?;
    doc.optional("author", &item.author)?;
    for category in &item.categories {
        doc.text("category", category)?;
    }
    doc.optional("comments", &item.comments)?;
    if let Some(enclosure) = &item.enclosure {
        doc.empty(
            "enclosure",
            &[
                ("url", enclosure.url.as_str()),
                ("length", enclosure.length.as_str()),
                ("type", enclosure.mime_type.as_str()),
            ],
        )?;
    }
    // No link fallback here, unlike the Atom entry id.
    doc.optional("guid", &item.guid)?;
    doc.optional("pubDate", &format_rfc822(item.pub_date.as_ref()))?;
    if let Some(source) = &item.source {
        doc.text_with("source", &[("url", source.url.as_str())], &source.value)?;
    }

    doc.close("item")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        date::Timestamp,
        error::FeedError,
        model::{Enclosure, Source},
    };
    use chrono::{TimeZone, Utc};

    fn fixed_time() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap().into()
    }

    fn make_feed() -> Feed {
        let mut feed = Feed::built_at(fixed_time());
        feed.set_title("Test Feed")
            .set_description("Test Description")
            .set_link("https://example.com");
        feed
    }

    fn render_str(feed: &Feed) -> String {
        String::from_utf8(render(feed).expect("should render")).unwrap()
    }

    #[test]
    fn test_minimal_document() {
        let xml = render_str(&make_feed());
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <rss version=\"2.0\">\n  \
             <channel>\n    \
             <title>Test Feed</title>\n    \
             <description>Test Description</description>\n    \
             <link>https://example.com</link>\n    \
             <lastBuildDate>01 Jan 25 12:00 UTC</lastBuildDate>\n  \
             </channel>\n\
             </rss>"
        );
    }

    #[test]
    fn test_validation_blocks_output() {
        let mut feed = make_feed();
        feed.set_description("");
        assert!(matches!(render(&feed), Err(FeedError::MissingDescription)));
    }

    #[test]
    fn test_optional_channel_fields() {
        let mut feed = make_feed();
        feed.set_language("en-us")
            .set_copyright("(c) Example")
            .set_managing_editor("ed@example.com (Ed)")
            .set_webmaster("web@example.com")
            .set_ttl(30);

        let xml = render_str(&feed);
        assert!(xml.contains("<language>en-us</language>"));
        assert!(xml.contains("<copyright>(c) Example</copyright>"));
        assert!(xml.contains("<managingEditor>ed@example.com (Ed)</managingEditor>"));
        assert!(xml.contains("<webMaster>web@example.com</webMaster>"));
        assert!(xml.contains("<ttl>30</ttl>"));
    }

    #[test]
    fn test_non_positive_ttl_omitted() {
        let mut feed = make_feed();
        feed.set_ttl(0);
        assert!(!render_str(&feed).contains("<ttl>"));
        feed.set_ttl(-5);
        assert!(!render_str(&feed).contains("<ttl>"));
    }

    #[test]
    fn test_image_dimensions() {
        let mut feed = make_feed();
        feed.set_image(Image::new(
            "https://example.com/logo.png",
            "Logo",
            "https://example.com",
        ));
        let xml = render_str(&feed);
        assert!(xml.contains("<url>https://example.com/logo.png</url>"));
        assert!(!xml.contains("<width>"));
        assert!(!xml.contains("<height>"));
        assert_eq!(xml.matches("<description>").count(), 1);

        feed.set_image(
            Image::new("https://example.com/logo.png", "Logo", "https://example.com")
                .with_size(144, 0)
                .with_description("Site logo"),
        );
        let xml = render_str(&feed);
        assert!(xml.contains("<width>144</width>"));
        assert!(!xml.contains("<height>"));
        assert!(xml.contains("<description>Site logo</description>"));
    }

    #[test]
    fn test_item_field_order() {
        let mut feed = make_feed();
        feed.add_item(
            Item::new("Episode", "https://example.com/ep1")
                .with_description("First")
                .with_author("host@example.com (Host)")
                .with_categories(["audio", "talk"])
                .with_comments("https://example.com/ep1#comments")
                .with_enclosure(Enclosure::new(
                    "https://example.com/ep1.mp3",
                    "1024",
                    "audio/mpeg",
                ))
                .with_guid("ep-1")
                .with_pub_date(fixed_time())
                .with_source(Source::new("https://origin.example.com/rss", "Origin")),
        );

        let xml = render_str(&feed);
        let expected = "    <item>\n      \
             <title>Episode</title>\n      \
             <description>First</description>\n      \
             <link>https://example.com/ep1</link>\n      \
             <author>host@example.com (Host)</author>\n      \
             <category>audio</category>\n      \
             <category>talk</category>\n      \
             <comments>https://example.com/ep1#comments</comments>\n      \
             <enclosure url=\"https://example.com/ep1.mp3\" length=\"1024\" type=\"audio/mpeg\"/>\n      \
             <guid>ep-1</guid>\n      \
             <pubDate>01 Jan 25 12:00 UTC</pubDate>\n      \
             <source url=\"https://origin.example.com/rss\">Origin</source>\n    \
             </item>";
        assert!(xml.contains(expected), "unexpected item layout:\n{xml}");
    }

    #[test]
    fn test_item_required_elements_written_empty() {
        let mut feed = make_feed();
        feed.add_item(Item::default());
        let xml = render_str(&feed);
        assert!(xml.contains("<item>\n      <title></title>"));
        assert!(xml.contains("<description></description>"));
        assert!(!xml.contains("<author>"));
        assert!(!xml.contains("<guid>"));
        assert!(!xml.contains("<pubDate>"));
    }

    #[test]
    fn test_secondary_media_not_rendered() {
        let mut feed = make_feed();
        let mut item = Item::new("With media", "https://example.com/m");
        item.enclosures
            .push(Enclosure::new("https://example.com/extra.mp4", "9", "video/mp4"));
        item.images.push(Image::new(
            "https://example.com/cover.jpg",
            "Cover",
            "https://example.com/m",
        ));
        feed.add_item(item);

        let xml = render_str(&feed);
        assert!(!xml.contains("extra.mp4"));
        assert!(!xml.contains("cover.jpg"));
        assert!(!xml.contains("<enclosure"));
    }

    #[test]
    fn test_escapes_text() {
        let mut feed = make_feed();
        feed.add_item(Item::new("Fish & <Chips>", "https://example.com/?a=1&b=2"));
        let xml = render_str(&feed);
        assert!(xml.contains("<title>Fish &amp; &lt;Chips&gt;</title>"));
        assert!(xml.contains("<link>https://example.com/?a=1&amp;b=2</link>"));
    }
}
