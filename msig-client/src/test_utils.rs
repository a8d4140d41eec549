use crate::client::ProposalsClient;
use crate::limits::ClientLimits;
use crate::transport::HttpTransport;
use log::LevelFilter;
use serde::Serialize;
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test fixture pairing a client with a mock indexing service.
///
/// # Examples
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_endpoint() {
///     let fixture = TestFixture::new().await;
///     fixture
///         .add_mock(endpoints::GET_STATUS, status_json(20, 100), 200, 1)
///         .await;
///
///     assert_eq!(fixture.client.max_proposal_limit().await, 20);
///     fixture.mock.verify().await;
/// }
/// ```
pub struct TestFixture {
    /// Client pointed at the mock server
    pub client: ProposalsClient<HttpTransport>,
    /// Mock indexing service
    pub mock: MockServer,
}

impl TestFixture {
    /// Creates a fixture whose client discovers its limits from the mock.
    pub async fn new() -> Self {
        Self::with_limits(ClientLimits::default()).await
    }

    /// Creates a fixture whose client starts with the given limits.
    pub async fn with_limits(limits: ClientLimits) -> Self {
        Self::setup_logger(LevelFilter::Debug);

        let mock = MockServer::start().await;
        let transport = HttpTransport::new(&mock.uri(), Duration::from_secs(5))
            .expect("Failed to create transport");
        let client = ProposalsClient::with_limits(transport, limits);

        Self { client, mock }
    }

    pub fn setup_logger(level: LevelFilter) {
        let _ = env_logger::builder()
            .filter_level(level)
            .is_test(true)
            .try_init();
    }

    /// Mounts a response for any POST to `path`.
    ///
    /// # Parameters
    ///
    /// - `path`: endpoint path (e.g. `endpoints::GET_STATUS`)
    /// - `response_body`: JSON body to return
    /// - `status_code`: HTTP status of the response
    /// - `expected_calls`: number of calls `verify()` will expect
    pub async fn add_mock(
        &self,
        path: &str,
        response_body: impl Serialize,
        status_code: u16,
        expected_calls: u64,
    ) {
        Mock::given(matchers::method("POST"))
            .and(matchers::path(path))
            .respond_with(ResponseTemplate::new(status_code).set_body_json(response_body))
            .expect(expected_calls)
            .mount(&self.mock)
            .await;
    }

    /// Mounts a 200 response that only matches when the request body equals
    /// `request_body` exactly.
    pub async fn add_mock_with_body(
        &self,
        path: &str,
        request_body: Value,
        response_body: impl Serialize,
        expected_calls: u64,
    ) {
        Mock::given(matchers::method("POST"))
            .and(matchers::path(path))
            .and(matchers::body_json(request_body))
            .respond_with(ResponseTemplate::new(200).set_body_json(response_body))
            .expect(expected_calls)
            .mount(&self.mock)
            .await;
    }
}

/// A status payload reporting the given ceilings.
pub fn status_json(max_proposal_results: u32, max_approval_results: u32) -> Value {
    json!({
        "chain_id": "aca376f206b8fc25a6ed44dbdc66547c36c6c33e3a119ffbeaef943642f0e906",
        "head_block": 350000200,
        "last_indexed_block": 350000195,
        "is_synced": true,
        "max_proposal_results": max_proposal_results,
        "max_approval_results": max_approval_results
    })
}

/// A minimal proposal record.
pub fn proposal_json(proposer: &str, proposal_name: &str, status: &str) -> Value {
    json!({
        "proposer": proposer,
        "proposal_name": proposal_name,
        "status": status,
        "created_at": "2024-05-01T12:00:00.000",
        "created_block": 350000000,
        "created_trx": "6e1f0c53b3a4a3c2",
        "globalseq": 77,
        "expiration": "2024-05-08T12:00:00",
        "action_count": 1
    })
}
