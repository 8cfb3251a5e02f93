pub static TEST_USER_AGENT: &str = "eventhub-test/0.1.0";

/// Request timeout of the test HTTP client, in seconds.
pub const TEST_FETCH_TIMEOUT_SECS: u64 = 5;
