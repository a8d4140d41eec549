use crate::config::ClientConfig;
use crate::error::{ClientError, TransportError};
use crate::limits::{
    ClientLimits, DEFAULT_MAX_APPROVAL_RESULTS, DEFAULT_MAX_PROPOSAL_RESULTS, LimitKind,
    LimitState, ResolvedLimits,
};
use crate::models::{
    ActivityResponse, ApprovalsResponse, GetProposalResponse, ProposalHistoryResponse,
    ProposalStatusDebug, ProposalsResponse, StatusResponse,
};
use crate::name::Name;
use crate::options::{
    ActiveProposalsOptions, ActivityOptions, ApprovalsOptions, ApproverProposalsOptions,
    DebugStatusOptions, GetProposalOptions, ListProposalsOptions, Page, ProposalHistoryOptions,
    SearchOptions,
};
use crate::params::RequestParams;
use crate::transport::{HttpTransport, Transport};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

/// Endpoint paths exposed by the indexing service.
pub mod endpoints {
    pub const GET_PROPOSAL: &str = "/v1/proposals/get_proposal";
    pub const GET_PROPOSAL_HISTORY: &str = "/v1/proposals/get_proposal_history";
    pub const GET_PROPOSALS: &str = "/v1/proposals/get_proposals";
    pub const GET_ACTIVE: &str = "/v1/proposals/get_active";
    pub const GET_APPROVALS: &str = "/v1/proposals/get_approvals";
    pub const GET_ACTIVITY: &str = "/v1/proposals/get_activity";
    pub const GET_APPROVER_PROPOSALS: &str = "/v1/proposals/get_approver_proposals";
    pub const SEARCH_PROPOSALS: &str = "/v1/proposals/search_proposals";
    pub const GET_STATUS: &str = "/v1/proposals/get_status";
    pub const DEBUG_PROPOSAL_STATUS: &str = "/v1/proposals/debug_proposal_status";
}

/// Typed client for the multisig proposal indexing service.
///
/// Result-size ceilings that were not supplied at construction are fetched
/// from the status endpoint the first time an operation passes a `limit`.
/// Discovery runs at most once per client; if the status call fails the
/// client falls back to [`DEFAULT_MAX_PROPOSAL_RESULTS`] and
/// [`DEFAULT_MAX_APPROVAL_RESULTS`] without reporting an error.
pub struct ProposalsClient<T> {
    transport: T,
    configured: ClientLimits,
    state: Mutex<LimitState>,
}

impl<T> std::fmt::Debug for ProposalsClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProposalsClient")
            .field("configured", &self.configured)
            .finish_non_exhaustive()
    }
}

impl ProposalsClient<HttpTransport> {
    /// Creates an HTTP-backed client from loaded configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::with_timeouts(
            &config.url,
            config.timeout(),
            config.connect_timeout(),
        )?;
        Ok(Self::with_limits(transport, config.limits()))
    }
}

impl<T: Transport> ProposalsClient<T> {
    /// Creates a client that discovers both ceilings from the service.
    pub fn new(transport: T) -> Self {
        Self::with_limits(transport, ClientLimits::default())
    }

    /// Creates a client with caller-supplied ceilings. When both are set, the
    /// status endpoint is never consulted for them.
    pub fn with_limits(transport: T, limits: ClientLimits) -> Self {
        Self {
            transport,
            configured: limits,
            state: Mutex::new(LimitState::from_configured(&limits)),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolves the ceilings, calling the status endpoint on first use.
    ///
    /// Never fails: a failing status call degrades to the default ceilings.
    pub async fn ensure_limits_initialized(&self) -> ResolvedLimits {
        // Holding the lock across the status call makes concurrent first
        // callers wait for the single discovery.
        let mut state = self.state.lock().await;
        if let Some(limits) = state.resolved() {
            return limits;
        }

        let limits = match self.get_status().await {
            Ok(status) => self
                .configured
                .resolve_with(status.max_proposal_results, status.max_approval_results),
            Err(e) => {
                warn!("Failed to discover limits from service, using defaults: {}", e);
                self.configured
                    .resolve_with(DEFAULT_MAX_PROPOSAL_RESULTS, DEFAULT_MAX_APPROVAL_RESULTS)
            }
        };
        info!(
            "Resolved result limits: proposals={}, approvals={}",
            limits.proposal, limits.approval
        );

        *state = LimitState::Resolved(limits);
        limits
    }

    /// Maximum page size for proposal listings.
    pub async fn max_proposal_limit(&self) -> u32 {
        self.ensure_limits_initialized().await.proposal
    }

    /// Maximum page size for approval timelines.
    pub async fn max_approval_limit(&self) -> u32 {
        self.ensure_limits_initialized().await.approval
    }

    /// Fetches a single proposal, optionally a specific version and its history.
    pub async fn get_proposal(
        &self,
        proposer: &Name,
        proposal_name: &Name,
        options: GetProposalOptions,
    ) -> Result<GetProposalResponse, ClientError> {
        let mut params = proposal_params(proposer, proposal_name);
        params
            .insert_opt("globalseq", options.globalseq)
            .insert_opt("include_history", options.include_history);
        self.call(endpoints::GET_PROPOSAL, &params).await
    }

    /// Lists every indexed version of a proposal.
    pub async fn get_proposal_history(
        &self,
        proposer: &Name,
        proposal_name: &Name,
        options: ProposalHistoryOptions,
    ) -> Result<ProposalHistoryResponse, ClientError> {
        let mut params = proposal_params(proposer, proposal_name);
        params.insert_opt("status", options.status.map(|s| s.as_str()));
        self.apply_page(&mut params, options.page, LimitKind::Proposal).await?;
        self.call(endpoints::GET_PROPOSAL_HISTORY, &params).await
    }

    pub async fn get_proposals(
        &self,
        options: ListProposalsOptions,
    ) -> Result<ProposalsResponse, ClientError> {
        let mut params = RequestParams::new();
        params
            .insert_opt("proposer", options.proposer.map(String::from))
            .insert_opt("status", options.status.map(|s| s.as_str()));
        self.apply_page(&mut params, options.page, LimitKind::Proposal).await?;
        self.call(endpoints::GET_PROPOSALS, &params).await
    }

    /// Lists proposals that are still open for approval.
    pub async fn get_active_proposals(
        &self,
        options: ActiveProposalsOptions,
    ) -> Result<ProposalsResponse, ClientError> {
        let mut params = RequestParams::new();
        self.apply_page(&mut params, options.page, LimitKind::Proposal).await?;
        params.insert_opt("sort", options.sort);
        self.call(endpoints::GET_ACTIVE, &params).await
    }

    /// Fetches the approval timeline of a proposal. The page size is checked
    /// against the approval ceiling rather than the proposal ceiling.
    pub async fn get_approvals(
        &self,
        proposer: &Name,
        proposal_name: &Name,
        options: ApprovalsOptions,
    ) -> Result<ApprovalsResponse, ClientError> {
        let mut params = proposal_params(proposer, proposal_name);
        params.insert_opt("globalseq", options.globalseq);
        self.apply_page(&mut params, options.page, LimitKind::Approval).await?;
        self.call(endpoints::GET_APPROVALS, &params).await
    }

    /// Fetches the multisig activity feed of an account.
    pub async fn get_activity(
        &self,
        account: &Name,
        options: ActivityOptions,
    ) -> Result<ActivityResponse, ClientError> {
        let mut params = RequestParams::new();
        params.insert("account", account.as_str());
        self.apply_page(&mut params, options.page, LimitKind::Proposal).await?;
        params.insert_opt("action_type", options.action_type.map(String::from));
        self.call(endpoints::GET_ACTIVITY, &params).await
    }

    /// Lists proposals that request an approval from `approver`.
    pub async fn get_approver_proposals(
        &self,
        approver: &Name,
        options: ApproverProposalsOptions,
    ) -> Result<ProposalsResponse, ClientError> {
        let mut params = RequestParams::new();
        params
            .insert("approver", approver.as_str())
            .insert_opt("status", options.status.map(|s| s.as_str()))
            .insert_opt("include_approved", options.include_approved);
        self.apply_page(&mut params, options.page, LimitKind::Proposal).await?;
        self.call(endpoints::GET_APPROVER_PROPOSALS, &params).await
    }

    /// Full-text search over proposals.
    pub async fn search_proposals(
        &self,
        query: &str,
        options: SearchOptions,
    ) -> Result<ProposalsResponse, ClientError> {
        let mut params = RequestParams::new();
        params
            .insert("query", query)
            .insert_opt("status", options.status.map(|s| s.as_str()));
        self.apply_page(&mut params, options.page, LimitKind::Proposal).await?;
        self.call(endpoints::SEARCH_PROPOSALS, &params).await
    }

    /// Fetches indexer sync state and the ceilings it enforces.
    pub async fn get_status(&self) -> Result<StatusResponse, ClientError> {
        self.call(endpoints::GET_STATUS, &RequestParams::new()).await
    }

    /// Fetches the service's explanation of how it computed a proposal's status.
    pub async fn debug_proposal_status(
        &self,
        proposer: &Name,
        proposal_name: &Name,
        options: DebugStatusOptions,
    ) -> Result<ProposalStatusDebug, ClientError> {
        let mut params = proposal_params(proposer, proposal_name);
        params.insert_opt("globalseq", options.globalseq);
        self.call(endpoints::DEBUG_PROPOSAL_STATUS, &params).await
    }

    /// Validates and adds `limit`/`offset`. Discovery only happens when a
    /// limit was supplied.
    async fn apply_page(
        &self,
        params: &mut RequestParams,
        page: Page,
        kind: LimitKind,
    ) -> Result<(), ClientError> {
        if let Some(limit) = page.limit {
            let max = self.ensure_limits_initialized().await.ceiling(kind);
            if limit > max {
                return Err(ClientError::LimitExceeded {
                    requested: limit,
                    max,
                });
            }
            params.insert("limit", limit);
        }
        params.insert_opt("offset", page.offset);
        Ok(())
    }

    async fn call<R: DeserializeOwned>(
        &self,
        path: &str,
        params: &RequestParams,
    ) -> Result<R, ClientError> {
        debug!("Sending {} ({} params)", path, params.len());
        let value = self.transport.call(path, params).await?;
        serde_json::from_value(value).map_err(|e| ClientError::Transport(e.into()))
    }
}

fn proposal_params(proposer: &Name, proposal_name: &Name) -> RequestParams {
    let mut params = RequestParams::new();
    params
        .insert("proposer", proposer.as_str())
        .insert("proposal_name", proposal_name.as_str());
    params
}
