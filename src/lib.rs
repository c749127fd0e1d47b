//! # Gator
//!
//! A command-line RSS feed aggregator backed by SQLite.
//!
//! ## Architecture
//!
//! ```text
//! argv → Commands → handler → Store / Fetcher → Normalizer
//! ```
//!
//! - [`cli`]: argument capture, the command registry and the built-in handlers
//! - [`fetcher`]: HTTP retrieval of feed documents
//! - [`normalizer`]: RSS 2.0 parsing and HTML entity decoding
//! - [`store`]: SQLite persistence for users and feeds
//!
//! ## Quick Start
//!
//! ```bash
//! # Create a user and make it current
//! gator register alice
//!
//! # Add a feed owned by the current user
//! gator addfeed "Lane's blog" https://www.wagslane.dev/index.xml
//!
//! # List feeds with their owners
//! gator feeds
//!
//! # Fetch and print the aggregation feed
//! gator agg
//! ```

/// Session state and error types.
///
/// The [`Session`](app::Session) struct wires together config, store and
/// fetcher for one process run.
pub mod app;

/// Command-line interface.
///
/// - [`Cli`](cli::Cli): clap parser, purely positional
/// - [`Commands`](cli::Commands): name → handler registry
/// - [`commands`](cli::commands): `login`, `register`, `reset`, `users`,
///   `agg`, `addfeed`, `feeds`
pub mod cli;

/// The `~/.gatorconfig.json` file.
pub mod config;

/// Core domain models.
///
/// - [`User`](domain::User) and [`Feed`](domain::Feed): persisted rows
/// - [`RssFeed`](domain::RssFeed): a parsed channel and its items
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait for feed fetching
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// RSS 2.0 parsing into [`RssFeed`](domain::RssFeed).
pub mod normalizer;

/// SQLite persistence layer.
///
/// - [`Store`](store::Store): trait defining storage operations
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;
