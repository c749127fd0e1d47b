pub mod feed;
pub mod rss;
pub mod user;

pub use feed::{Feed, FeedListing};
pub use rss::{RssFeed, RssItem};
pub use user::User;
