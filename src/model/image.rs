//! Feed and item images.

/// Illustration attached to a feed (rendered in RSS) or an item (stored only).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    pub url: String,
    pub title: String,
    pub link: String,
    pub description: String,
    /// Pixels, 0 means unset.
    pub width: u32,
    /// Pixels, 0 means unset.
    pub height: u32,
}

impl Image {
    pub fn new(url: impl Into<String>, title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            link: link.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}
