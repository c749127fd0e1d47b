use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use rusqlite_migration::{Migrations, M};
use uuid::Uuid;

use crate::app::{GatorError, Result};
use crate::domain::{Feed, FeedListing, User};
use crate::store::Store;

const USER_COLUMNS: &str = "id, created_at, updated_at, name";

fn migrations() -> Migrations<'static> {
    Migrations::new(vec![M::up(include_str!(
        "../../migrations/001-initial/up.sql"
    ))])
}

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open the database named by a config `db_url`.
    ///
    /// Accepts `sqlite://path`, `sqlite:path`, a bare path, or `:memory:`.
    pub fn open(db_url: &str) -> Result<Self> {
        let path = db_url
            .strip_prefix("sqlite://")
            .or_else(|| db_url.strip_prefix("sqlite:"))
            .unwrap_or(db_url);

        let connect_error = |reason: String| GatorError::StoreConnect {
            url: db_url.to_string(),
            reason,
        };

        if path.is_empty() {
            return Err(connect_error("no database path configured".into()));
        }

        let mut conn = if path == ":memory:" {
            Connection::open_in_memory()
        } else {
            Connection::open(Path::new(path))
        }
        .map_err(|e| connect_error(e.to_string()))?;

        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| connect_error(e.to_string()))?;
        migrations()
            .to_latest(&mut conn)
            .map_err(|e| connect_error(e.to_string()))?;

        tracing::debug!("Opened database at {}", db_url);
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn in_memory() -> Result<Self> {
        Self::open(":memory:")
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            GatorError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })
    }

    fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| s.parse::<DateTime<Utc>>().ok())
    }

    fn uuid_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
        let raw: String = row.get(idx)?;
        Uuid::parse_str(&raw)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    }

    fn datetime_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
        let raw: String = row.get(idx)?;
        Self::parse_datetime(&raw).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                Type::Text,
                format!("invalid timestamp: {}", raw).into(),
            )
        })
    }

    fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
        Ok(User {
            id: Self::uuid_column(row, 0)?,
            created_at: Self::datetime_column(row, 1)?,
            updated_at: Self::datetime_column(row, 2)?,
            name: row.get(3)?,
        })
    }
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

impl Store for SqliteStore {
    fn get_user(&self, name: &str) -> Result<Option<User>> {
        let conn = self.conn()?;

        let user = conn
            .query_row(
                &format!("SELECT {} FROM users WHERE name = ?1", USER_COLUMNS),
                params![name],
                Self::user_from_row,
            )
            .optional()?;

        Ok(user)
    }

    fn create_user(&self, user: &User) -> Result<User> {
        let conn = self.conn()?;

        let inserted = conn.execute(
            "INSERT INTO users (id, created_at, updated_at, name) VALUES (?1, ?2, ?3, ?4)",
            params![
                user.id.to_string(),
                user.created_at.to_rfc3339(),
                user.updated_at.to_rfc3339(),
                user.name
            ],
        );

        match inserted {
            Ok(_) => {
                tracing::info!("Created user {} ({})", user.name, user.id);
                Ok(user.clone())
            }
            Err(e) if is_constraint_violation(&e) => {
                Err(GatorError::UserAlreadyExists(user.name.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn reset_users(&self) -> Result<()> {
        let conn = self.conn()?;

        let deleted = conn.execute("DELETE FROM users", [])?;
        tracing::info!("Deleted {} users", deleted);

        Ok(())
    }

    fn get_users(&self) -> Result<Vec<User>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM users ORDER BY rowid",
            USER_COLUMNS
        ))?;

        let users = stmt
            .query_map([], Self::user_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(users)
    }

    fn create_feed(&self, feed: &Feed) -> Result<Feed> {
        let conn = self.conn()?;

        let inserted = conn.execute(
            "INSERT INTO feeds (id, created_at, updated_at, name, url, user_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                feed.id.to_string(),
                feed.created_at.to_rfc3339(),
                feed.updated_at.to_rfc3339(),
                feed.name,
                feed.url,
                feed.user_id.to_string()
            ],
        );

        match inserted {
            Ok(_) => {
                tracing::info!("Created feed {} for user {}", feed.url, feed.user_id);
                Ok(feed.clone())
            }
            // The only constraint a fresh id can trip is the owner foreign key.
            Err(e) if is_constraint_violation(&e) => {
                Err(GatorError::UserNotFound(feed.user_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn get_feeds(&self) -> Result<Vec<FeedListing>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT feeds.name, feeds.url, users.name
             FROM feeds JOIN users ON feeds.user_id = users.id
             ORDER BY feeds.rowid",
        )?;

        let feeds = stmt
            .query_map([], |row| {
                Ok(FeedListing {
                    feed_name: row.get(0)?,
                    feed_url: row.get(1)?,
                    user_name: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(feeds)
    }
}
