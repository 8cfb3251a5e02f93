//! Mock provider endpoint creation.

use mockito::Mock;

use crate::TestContext;

impl TestContext {
    /// Create a mock GET endpoint at `path` answering `status` with `body`.
    ///
    /// The mock verifies it was called exactly `expected_requests` times.
    pub async fn create_resource_endpoint(
        &mut self,
        path: &str,
        status: usize,
        body: String,
        expected_requests: usize,
    ) -> Mock {
        self.server
            .mock("GET", path)
            .with_status(status)
            .with_body(body)
            .expect(expected_requests)
            .create_async()
            .await
    }
}
