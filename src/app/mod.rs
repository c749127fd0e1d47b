pub mod context;
pub mod error;

pub use context::Session;
pub use error::{GatorError, Result};
