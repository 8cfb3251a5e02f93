//! Declarative test builder.
//!
//! `TestBuilder` queues tables, provider fixtures and mock provider endpoints, then creates
//! them all in `build()`.

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
pub struct TestBuilder {
    // Tables to create
    tables: Vec<TableCreateStatement>,
    include_ingestion_tables: bool,

    // Providers to insert: (name, resource path on the mock server)
    providers: Vec<(String, String)>,

    // Mock endpoints to create
    resource_endpoints: Vec<(String, usize, String, usize)>, // (path, status, body, expected_requests)
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Create a new TestBuilder with nothing configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_ingestion_tables: false,
            providers: Vec::new(),
            resource_endpoints: Vec::new(),
        }
    }

    /// Add every table used by provider ingestion.
    ///
    /// Runs the production migrations, so Provider, ProviderResource, Event, EventDate and
    /// Zone get the same foreign keys and natural key unique indexes as the deployed schema.
    pub fn with_ingestion_tables(mut self) -> Self {
        self.include_ingestion_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, which will be executed during
    /// `build()`. Chain multiple calls to add multiple tables, parents first.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use eventhub_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), eventhub_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Provider)
    ///     .with_table(ProviderResource)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a provider whose resource lives at `path` on the mock server.
    ///
    /// Requires the Provider and ProviderResource tables. Created providers are available in
    /// `TestContext::providers` in declaration order.
    pub fn with_provider(mut self, name: &str, path: &str) -> Self {
        self.providers.push((name.to_string(), path.to_string()));
        self
    }

    /// Serve `body` with `status` for GET requests to `path`.
    ///
    /// The endpoint must be requested exactly `expected_requests` times for
    /// `TestContext::assert_mocks` to pass.
    pub fn with_resource_endpoint(
        mut self,
        path: &str,
        status: usize,
        body: impl Into<String>,
        expected_requests: usize,
    ) -> Self {
        self.resource_endpoints
            .push((path.to_string(), status, body.into(), expected_requests));
        self
    }

    /// Build the test context, executing every queued operation.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Tables created, providers inserted, mocks registered
    /// - `Err(TestError)` - Database setup failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        // 1. Create tables
        if self.include_ingestion_tables {
            setup.with_migrations().await?;
        }

        setup.with_tables(self.tables).await?;

        // 2. Insert providers
        for (name, path) in self.providers {
            let url = setup.resource_url(&path);
            let (provider, _) = setup.catalog().insert_provider(&name, &url).await?;
            setup.providers.push(provider);
        }

        // 3. Create mock endpoints
        let mut mocks = Vec::new();

        for (path, status, body, expected) in self.resource_endpoints {
            mocks.push(
                setup
                    .create_resource_endpoint(&path, status, body, expected)
                    .await,
            );
        }

        setup.mocks = mocks;

        Ok(setup)
    }
}
