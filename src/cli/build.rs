//! `feedsmith build`: render a feed definition to disk or stdout.

use anyhow::{Context, Result};
use feedsmith::{FeedFormat, SystemClock, config::FeedDefinition, log};
use std::{
    fs,
    io::{Write, stdout},
    path::{Path, PathBuf},
};

/// Where the rendered feed goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Stdout,
    File(PathBuf),
}

/// Load `config`, render it and write the result to `target`.
///
/// `format` and `target` default to the definition's `[build]` section. A
/// relative `[build].output` is resolved against the definition's directory.
pub fn build_feed(config: &Path, format: Option<FeedFormat>, target: Option<Target>) -> Result<()> {
    let definition = FeedDefinition::from_path(config)
        .with_context(|| format!("Failed to load {}", config.display()))?;

    let format = format.unwrap_or(definition.build.format);
    let target = target.unwrap_or_else(|| {
        let base = config.parent().unwrap_or_else(|| Path::new(""));
        Target::File(base.join(&definition.build.output))
    });

    let feed = definition.into_feed(&SystemClock)?;
    let xml = feed
        .render(format)
        .with_context(|| format!("Failed to render {format} feed"))?;

    match target {
        Target::Stdout => {
            let mut out = stdout().lock();
            out.write_all(&xml)?;
            out.write_all(b"\n")?;
            out.flush()?;
        }
        Target::File(path) => {
            write_feed(&path, &xml)?;
            log!(format.as_str(); "{}", path.display());
        }
    }
    Ok(())
}

fn write_feed(path: &Path, xml: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, xml).with_context(|| format!("Failed to write feed to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFINITION: &str = r#"
[feed]
title = "Blog"
description = "Posts"
link = "https://example.com"

[[items]]
title = "Hello"
link = "https://example.com/hello"
pub_date = "2025-01-01T12:00:00Z"

[build]
output = "public/feed.xml"
"#;

    fn write_definition(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("feed.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_build_uses_definition_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_definition(dir.path(), DEFINITION);

        build_feed(&config, None, None).unwrap();

        let xml = fs::read_to_string(dir.path().join("public/feed.xml")).unwrap();
        assert!(xml.contains("<rss version=\"2.0\">"));
        assert!(xml.contains("<pubDate>01 Jan 25 12:00 UTC</pubDate>"));
    }

    #[test]
    fn test_build_overrides_format_and_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_definition(dir.path(), DEFINITION);
        let output = dir.path().join("nested/atom.xml");

        build_feed(&config, Some(FeedFormat::Atom), Some(Target::File(output.clone()))).unwrap();

        let xml = fs::read_to_string(output).unwrap();
        assert!(xml.contains("<feed xmlns=\"http://www.w3.org/2005/Atom\">"));
        assert!(!dir.path().join("public/feed.xml").exists());
    }

    #[test]
    fn test_build_reports_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_definition(dir.path(), "[feed]\ntitle = \"Only title\"\n");

        let err = build_feed(&config, None, None).unwrap_err();
        assert!(format!("{err:#}").contains("feed description is required"));
        assert!(!dir.path().join("feed.xml").exists());
    }

    #[test]
    fn test_build_missing_definition() {
        let dir = tempfile::tempdir().unwrap();
        let err = build_feed(&dir.path().join("nope.toml"), None, None).unwrap_err();
        assert!(err.to_string().contains("Failed to load"));
    }
}
