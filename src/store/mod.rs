pub mod sqlite;

use crate::app::Result;
use crate::domain::{Feed, FeedListing, User};

pub use sqlite::SqliteStore;

pub trait Store {
    // User operations
    fn get_user(&self, name: &str) -> Result<Option<User>>;
    fn create_user(&self, user: &User) -> Result<User>;
    fn reset_users(&self) -> Result<()>;
    fn get_users(&self) -> Result<Vec<User>>;

    // Feed operations
    fn create_feed(&self, feed: &Feed) -> Result<Feed>;
    fn get_feeds(&self) -> Result<Vec<FeedListing>>;
}
