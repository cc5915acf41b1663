//! `feedsmith check`: load and validate without writing.

use anyhow::{Context, Result};
use feedsmith::{FeedFormat, SystemClock, config::FeedDefinition, debug, log};
use std::path::Path;

/// Validate `config` and render it once per format. Returns the item count.
pub fn check_feed(config: &Path) -> Result<usize> {
    let definition = FeedDefinition::from_path(config)
        .with_context(|| format!("Failed to load {}", config.display()))?;
    let feed = definition.into_feed(&SystemClock)?;
    feed.validate()?;

    for format in [FeedFormat::Rss, FeedFormat::Atom] {
        let xml = feed.render(format)?;
        debug!("check"; "{format}: {} bytes", xml.len());
    }

    let count = feed.items().len();
    log!("check"; "{}: {} item(s)", config.display(), count);
    Ok(count)
}
