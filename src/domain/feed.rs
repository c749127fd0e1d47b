use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub url: String,
    pub user_id: Uuid,
}

impl Feed {
    pub fn new(name: impl Into<String>, url: impl Into<String>, user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            name: name.into(),
            url: url.into(),
            user_id,
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "* ID:            {}", self.id)?;
        writeln!(f, "* Created:       {}", self.created_at)?;
        writeln!(f, "* Updated:       {}", self.updated_at)?;
        writeln!(f, "* Name:          {}", self.name)?;
        writeln!(f, "* URL:           {}", self.url)?;
        write!(f, "* UserID:        {}", self.user_id)
    }
}

/// A feed joined with the name of the user who added it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedListing {
    pub feed_name: String,
    pub feed_url: String,
    pub user_name: String,
}
