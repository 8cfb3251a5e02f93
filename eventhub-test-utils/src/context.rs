//! Test context structure and utilities.
//!
//! This module provides the `TestContext` returned by `TestBuilder`. The context holds an
//! in-memory SQLite database, a mock HTTP server playing the provider endpoints, and an HTTP
//! client configured the way the server configures its own.

use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::{
    constant::{TEST_FETCH_TIMEOUT_SECS, TEST_USER_AGENT},
    error::TestError,
};

/// Test context structure returned by `TestBuilder`
///
/// ```ignore
/// let test = TestBuilder::new()
///     .with_ingestion_tables()
///     .with_provider("Provider", "/feed")
///     .with_resource_endpoint("/feed", 200, factory::concert_json(), 1)
///     .build()
///     .await?;
///
/// let provider = &test.providers[0];
/// test.catalog().insert_event(Some(provider.id), "291", "Concert", true).await?;
///
/// // Assert all mocks were called
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
    /// HTTP client for fetching from the mock server
    pub http_client: reqwest::Client,
    /// Providers created by `TestBuilder::with_provider`, in declaration order
    pub providers: Vec<entity::provider::Model>,

    /// Mock HTTP server for provider endpoints
    pub(crate) server: ServerGuard,
    /// Collection of mock HTTP endpoints for assertion
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    /// Convert database and HTTP client into any type that can be constructed from them
    ///
    /// This allows conversion to AppState without creating a circular dependency between the
    /// test-utils crate and the main eventhub crate.
    pub fn to_app_state<T>(&self) -> T
    where
        T: From<(DatabaseConnection, reqwest::Client)>,
    {
        T::from((self.db.clone(), self.http_client.clone()))
    }

    /// Full URL of `path` on the mock provider server.
    pub fn resource_url(&self, path: &str) -> String {
        format!("{}{}", self.server.url(), path)
    }

    /// Create a new test context.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context
    /// - `Err(TestError::ReqwestError)` - HTTP client construction failed
    /// - `Err(TestError::DbErr)` - Database connection failed
    pub(crate) async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;

        let http_client = reqwest::Client::builder()
            .user_agent(TEST_USER_AGENT)
            .timeout(Duration::from_secs(TEST_FETCH_TIMEOUT_SECS))
            .build()?;

        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext {
            db,
            http_client,
            providers: Vec::new(),
            server,
            mocks: Vec::new(),
        })
    }

    /// Create database tables from schema statements.
    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Apply every migration to the test database.
    pub(crate) async fn with_migrations(&self) -> Result<(), TestError> {
        Migrator::up(&self.db, None).await?;

        Ok(())
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
