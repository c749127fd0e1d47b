use async_trait::async_trait;

use crate::app::{GatorError, Result, Session};
use crate::cli::registry::{Command, CommandHandler, Commands};
use crate::domain::{Feed, FeedListing, User};
use crate::fetcher::fetch_feed;
use crate::store::Store;

/// Feed fetched by `agg`.
pub const AGG_FEED_URL: &str = "https://www.wagslane.dev/index.xml";

/// A registry with every built-in command.
pub fn default_commands() -> Commands {
    let mut commands = Commands::new();
    commands.register("login", Login);
    commands.register("register", Register);
    commands.register("reset", Reset);
    commands.register("users", Users);
    commands.register("agg", Agg);
    commands.register("addfeed", AddFeed);
    commands.register("feeds", Feeds);
    commands
}

/// `login <username>`: switch the current user to an existing one.
pub struct Login;

#[async_trait]
impl CommandHandler for Login {
    async fn handle(&self, session: &mut Session, command: &Command) -> Result<()> {
        command.expect_args(1)?;
        let name = &command.args[0];

        if session.store.get_user(name)?.is_none() {
            return Err(GatorError::UserNotFound(name.clone()));
        }

        session.config.set_current_user(name)?;
        println!("User has been set to {}", name);
        Ok(())
    }
}

/// `register <username>`: create a user and make it current.
pub struct Register;

#[async_trait]
impl CommandHandler for Register {
    async fn handle(&self, session: &mut Session, command: &Command) -> Result<()> {
        command.expect_args(1)?;
        let name = &command.args[0];

        if session.store.get_user(name)?.is_some() {
            return Err(GatorError::UserAlreadyExists(name.clone()));
        }

        // A failed config write leaves the new user in place.
        let user = session.store.create_user(&User::new(name.as_str()))?;
        session.config.set_current_user(&user.name)?;

        println!("Current user set to {}", user.name);
        println!("* ID:      {}", user.id);
        println!("* Created: {}", user.created_at);
        Ok(())
    }
}

/// `reset`: delete every user, and with them every feed.
pub struct Reset;

#[async_trait]
impl CommandHandler for Reset {
    async fn handle(&self, session: &mut Session, command: &Command) -> Result<()> {
        command.expect_args(0)?;

        session.store.reset_users()?;
        println!("Reset user database");
        Ok(())
    }
}

/// `users`: list users, marking the current one.
pub struct Users;

#[async_trait]
impl CommandHandler for Users {
    async fn handle(&self, session: &mut Session, command: &Command) -> Result<()> {
        command.expect_args(0)?;

        let users = session.store.get_users()?;
        for line in render_users(&users, &session.config.current_user_name) {
            println!("{}", line);
        }
        Ok(())
    }
}

/// `agg`: fetch [`AGG_FEED_URL`] and print it.
pub struct Agg;

#[async_trait]
impl CommandHandler for Agg {
    async fn handle(&self, session: &mut Session, command: &Command) -> Result<()> {
        command.expect_args(0)?;

        let feed = fetch_feed(session.fetcher.as_ref(), &session.normalizer, AGG_FEED_URL).await?;
        println!("{}", feed);
        Ok(())
    }
}

/// `addfeed <name> <url>`: add a feed owned by the current user.
pub struct AddFeed;

#[async_trait]
impl CommandHandler for AddFeed {
    async fn handle(&self, session: &mut Session, command: &Command) -> Result<()> {
        command.expect_args(2)?;
        let (name, url) = (&command.args[0], &command.args[1]);

        let current = &session.config.current_user_name;
        let user = session
            .store
            .get_user(current)?
            .ok_or_else(|| GatorError::UserNotFound(current.clone()))?;

        let feed = session
            .store
            .create_feed(&Feed::new(name.as_str(), url.as_str(), user.id))?;
        println!("{}", feed);
        Ok(())
    }
}

/// `feeds`: list every feed with the user who added it.
pub struct Feeds;

#[async_trait]
impl CommandHandler for Feeds {
    async fn handle(&self, session: &mut Session, command: &Command) -> Result<()> {
        command.expect_args(0)?;

        let feeds = session.store.get_feeds()?;
        for line in render_feeds(&feeds) {
            println!("{}", line);
        }
        Ok(())
    }
}

pub fn render_users(users: &[User], current: &str) -> Vec<String> {
    users
        .iter()
        .map(|user| {
            if user.name == current {
                format!("* {} (current)", user.name)
            } else {
                format!("* {}", user.name)
            }
        })
        .collect()
}

pub fn render_feeds(feeds: &[FeedListing]) -> Vec<String> {
    feeds
        .iter()
        .flat_map(|feed| {
            [
                format!("* {}", feed.feed_name),
                format!("  {}", feed.feed_url),
                format!("  added by {}", feed.user_name),
            ]
        })
        .collect()
}
