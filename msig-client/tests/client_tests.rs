use async_trait::async_trait;
use log::LevelFilter;
use msig_client::{
    ActiveProposalsOptions, ActivityOptions, ActionKind, ApproverProposalsOptions, ClientError,
    ClientLimits, ListProposalsOptions, Name, PaginationInfo, ProposalHistoryOptions,
    ProposalStatus, ProposalsClient, RequestParams, SearchOptions, Transport, TransportError,
    endpoints,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory transport that records every call and replies with canned bodies.
#[derive(Default)]
struct RecordingTransport {
    calls: Mutex<Vec<(String, RequestParams)>>,
    responses: HashMap<&'static str, Result<Value, u16>>,
}

impl RecordingTransport {
    fn respond(mut self, path: &'static str, body: Value) -> Self {
        self.responses.insert(path, Ok(body));
        self
    }

    fn fail(mut self, path: &'static str, status: u16) -> Self {
        self.responses.insert(path, Err(status));
        self
    }

    fn calls(&self) -> Vec<(String, RequestParams)> {
        self.calls.lock().unwrap().clone()
    }

    fn calls_to(&self, path: &str) -> usize {
        self.calls().iter().filter(|(p, _)| p == path).count()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn call(&self, path: &str, params: &RequestParams) -> Result<Value, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_string(), params.clone()));
        match self.responses.get(path) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(TransportError::ResponseError(
                *status,
                "canned failure".to_string(),
            )),
            None => Err(TransportError::RequestFailed(format!(
                "no response for {path}"
            ))),
        }
    }
}

fn setup_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(LevelFilter::Debug)
        .try_init();
}

fn name(value: &str) -> Name {
    Name::new(value).unwrap()
}

fn empty_list() -> Value {
    json!({ "proposals": [], "total": 0, "more": false })
}

#[tokio::test]
async fn test_unreachable_status_degrades_to_defaults() {
    setup_logger();

    let transport = Arc::new(RecordingTransport::default());
    let client = ProposalsClient::new(transport.clone());

    assert_eq!(client.max_proposal_limit().await, 20);
    assert_eq!(client.max_approval_limit().await, 100);
    assert_eq!(transport.calls_to(endpoints::GET_STATUS), 1);
}

#[tokio::test]
async fn test_explicit_limits_never_call_status() {
    setup_logger();

    let transport =
        Arc::new(RecordingTransport::default().respond(endpoints::GET_PROPOSALS, empty_list()));
    let client = ProposalsClient::with_limits(
        transport.clone(),
        ClientLimits::default()
            .with_max_proposal_limit(50)
            .with_max_approval_limit(200),
    );

    assert_eq!(client.max_proposal_limit().await, 50);
    client
        .get_proposals(ListProposalsOptions::default().with_limit(50))
        .await
        .expect("limit equal to ceiling is allowed");

    assert_eq!(transport.calls_to(endpoints::GET_STATUS), 0);
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test]
async fn test_optional_filters_are_omitted() {
    setup_logger();

    let transport = Arc::new(
        RecordingTransport::default()
            .respond(
                endpoints::GET_PROPOSAL_HISTORY,
                json!({
                    "proposer": "alice",
                    "proposal_name": "upgrade",
                    "versions": [],
                    "total": 0,
                    "more": false
                }),
            )
            .respond(endpoints::GET_APPROVER_PROPOSALS, empty_list()),
    );
    let client = ProposalsClient::new(transport.clone());

    client
        .get_proposal_history(
            &name("alice"),
            &name("upgrade"),
            ProposalHistoryOptions::default(),
        )
        .await
        .unwrap();
    client
        .get_approver_proposals(&name("bob"), ApproverProposalsOptions::default())
        .await
        .unwrap();

    let calls = transport.calls();
    assert_eq!(calls.len(), 2, "no status call without a limit");

    let (path, params) = &calls[0];
    assert_eq!(path, endpoints::GET_PROPOSAL_HISTORY);
    assert_eq!(
        params.keys().collect::<Vec<_>>(),
        vec!["proposal_name", "proposer"]
    );

    let (path, params) = &calls[1];
    assert_eq!(path, endpoints::GET_APPROVER_PROPOSALS);
    assert_eq!(params.clone().into_value(), json!({ "approver": "bob" }));
    for key in ["status", "limit", "offset", "include_approved"] {
        assert!(!params.contains_key(key));
    }
}

#[tokio::test]
async fn test_all_filters_reach_the_wire() {
    setup_logger();

    let transport = Arc::new(
        RecordingTransport::default()
            .respond(endpoints::GET_STATUS, json!({ "max_proposal_results": 25 }))
            .respond(endpoints::GET_ACTIVE, empty_list())
            .respond(
                endpoints::GET_ACTIVITY,
                json!({ "account": "carol", "activities": [], "total": 0, "more": false }),
            )
            .respond(endpoints::GET_APPROVER_PROPOSALS, empty_list()),
    );
    let client = ProposalsClient::new(transport.clone());

    client
        .get_active_proposals(
            ActiveProposalsOptions::default()
                .with_limit(25)
                .with_offset(50)
                .with_sort("expiration"),
        )
        .await
        .unwrap();
    client
        .get_activity(
            &name("carol"),
            ActivityOptions::default()
                .with_limit(5)
                .with_action_type(ActionKind::Approve),
        )
        .await
        .unwrap();
    client
        .get_approver_proposals(
            &name("bob"),
            ApproverProposalsOptions::default()
                .with_status(ProposalStatus::Proposed)
                .with_include_approved(false)
                .with_offset(0),
        )
        .await
        .unwrap();

    let calls = transport.calls();
    let paths: Vec<_> = calls.iter().map(|(p, _)| p.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            endpoints::GET_STATUS,
            endpoints::GET_ACTIVE,
            endpoints::GET_ACTIVITY,
            endpoints::GET_APPROVER_PROPOSALS,
        ]
    );
    assert_eq!(
        calls[1].1.clone().into_value(),
        json!({ "limit": 25, "offset": 50, "sort": "expiration" })
    );
    assert_eq!(
        calls[2].1.clone().into_value(),
        json!({ "account": "carol", "limit": 5, "action_type": "approve" })
    );
    assert_eq!(
        calls[3].1.clone().into_value(),
        json!({
            "approver": "bob",
            "status": "proposed",
            "include_approved": false,
            "offset": 0
        })
    );
}

#[tokio::test]
async fn test_limit_validation_happens_before_sending() {
    setup_logger();

    let transport = Arc::new(RecordingTransport::default().fail(endpoints::GET_STATUS, 500));
    let client = ProposalsClient::new(transport.clone());

    let err = client
        .search_proposals("treasury", Default::default())
        .await
        .unwrap_err();
    // No limit given, so the request went out and its failure is returned as is.
    assert!(matches!(
        err,
        ClientError::Transport(TransportError::RequestFailed(_))
    ));

    let err = client
        .get_proposals(ListProposalsOptions::default().with_limit(21))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Limit cannot exceed 20"));

    let paths: Vec<_> = transport.calls().into_iter().map(|(p, _)| p).collect();
    assert_eq!(
        paths,
        vec![
            endpoints::SEARCH_PROPOSALS.to_string(),
            endpoints::GET_STATUS.to_string(),
        ]
    );
}

#[tokio::test]
async fn test_every_proposal_listing_enforces_the_proposal_ceiling() {
    setup_logger();

    let listing_paths = [
        endpoints::GET_PROPOSAL_HISTORY,
        endpoints::GET_PROPOSALS,
        endpoints::GET_ACTIVE,
        endpoints::GET_ACTIVITY,
        endpoints::GET_APPROVER_PROPOSALS,
        endpoints::SEARCH_PROPOSALS,
    ];
    let transport = listing_paths.iter().fold(
        RecordingTransport::default().respond(
            endpoints::GET_STATUS,
            json!({ "max_proposal_results": 20, "max_approval_results": 100 }),
        ),
        |transport, path| transport.respond(*path, empty_list()),
    );
    let transport = Arc::new(transport);
    let client = ProposalsClient::new(transport.clone());

    let results: Vec<(&str, Result<(), ClientError>)> = vec![
        (
            endpoints::GET_PROPOSAL_HISTORY,
            client
                .get_proposal_history(
                    &name("alice"),
                    &name("upgrade"),
                    ProposalHistoryOptions::default().with_limit(21),
                )
                .await
                .map(drop),
        ),
        (
            endpoints::GET_PROPOSALS,
            client
                .get_proposals(ListProposalsOptions::default().with_limit(21))
                .await
                .map(drop),
        ),
        (
            endpoints::GET_ACTIVE,
            client
                .get_active_proposals(ActiveProposalsOptions::default().with_limit(21))
                .await
                .map(drop),
        ),
        (
            endpoints::GET_ACTIVITY,
            client
                .get_activity(&name("carol"), ActivityOptions::default().with_limit(21))
                .await
                .map(drop),
        ),
        (
            endpoints::GET_APPROVER_PROPOSALS,
            client
                .get_approver_proposals(
                    &name("bob"),
                    ApproverProposalsOptions::default().with_limit(21),
                )
                .await
                .map(drop),
        ),
        (
            endpoints::SEARCH_PROPOSALS,
            client
                .search_proposals("treasury", SearchOptions::default().with_limit(21))
                .await
                .map(drop),
        ),
    ];

    for (path, result) in results {
        match result {
            Err(ClientError::LimitExceeded {
                requested: 21,
                max: 20,
            }) => {}
            other => panic!("{path}: expected the proposal ceiling, got {other:?}"),
        }
    }

    for path in listing_paths {
        assert_eq!(transport.calls_to(path), 0, "{path} must not be called");
    }
    assert_eq!(transport.calls().len(), 1, "only the status call goes out");
}

#[tokio::test]
async fn test_paging_through_results() {
    setup_logger();

    let transport = Arc::new(RecordingTransport::default().respond(
        endpoints::GET_PROPOSALS,
        json!({ "proposals": [], "total": 45, "more": true }),
    ));
    let client = ProposalsClient::with_limits(
        transport,
        ClientLimits::default()
            .with_max_proposal_limit(20)
            .with_max_approval_limit(100),
    );

    let page = client
        .get_proposals(
            ListProposalsOptions::default()
                .with_status(ProposalStatus::Proposed)
                .with_limit(20)
                .with_offset(20),
        )
        .await
        .unwrap();
    let info = PaginationInfo::for_page(&page, 20, 20);
    assert_eq!(info.current_page, 2);
    assert_eq!(info.total_pages, 3);
    assert_eq!(info.next_offset, Some(40));
    assert_eq!(info.previous_offset, Some(0));
}
