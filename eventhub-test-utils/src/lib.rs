//! Test utilities for the eventhub workspace.
//!
//! Tests are set up in two phases. [`TestBuilder`] declares the environment (tables,
//! providers, mock provider endpoints) and `build()` creates it, returning a [`TestContext`]
//! with an in-memory SQLite database, a mockito server standing in for provider endpoints, and
//! an HTTP client. Fixtures on the context then insert further rows during the test.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{fixtures::factory, TestBuilder, TestContext, TestError};
}
