use std::fmt;

use serde::{Deserialize, Serialize};

/// An RSS 2.0 channel after parsing and entity decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RssFeed {
    pub title: String,
    pub link: String,
    pub description: String,
    /// Items in document order.
    pub items: Vec<RssItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RssItem {
    pub title: String,
    pub link: String,
    pub description: String,
    /// Raw `<pubDate>` text, not parsed.
    pub pub_date: String,
}

impl fmt::Display for RssFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title:       {}", self.title)?;
        writeln!(f, "Link:        {}", self.link)?;
        writeln!(f, "Description: {}", self.description)?;
        write!(f, "Items:       {}", self.items.len())?;

        for item in &self.items {
            write!(f, "\n{}", item)?;
        }

        Ok(())
    }
}

impl fmt::Display for RssItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  - {}", self.title)?;
        writeln!(f, "    {}", self.link)?;
        if !self.pub_date.is_empty() {
            writeln!(f, "    {}", self.pub_date)?;
        }
        write!(f, "    {}", self.description)
    }
}
