//! Optional filters for each service operation.
//!
//! Every field left as `None` is omitted from the request.

use crate::models::{ActionKind, ProposalStatus};
use crate::name::Name;

/// Page window shared by the list operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub limit: Option<u32>,
    pub offset: Option<u64>,
}

impl Page {
    pub fn new(limit: u32, offset: u64) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }
}

/// Builder-style setters for option structs that carry a [`Page`].
macro_rules! page_setters {
    ($($ty:ty),* $(,)?) => {
        $(impl $ty {
            pub fn with_limit(mut self, limit: u32) -> Self {
                self.page.limit = Some(limit);
                self
            }

            pub fn with_offset(mut self, offset: u64) -> Self {
                self.page.offset = Some(offset);
                self
            }
        })*
    };
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetProposalOptions {
    /// Fetch this version instead of the latest one.
    pub globalseq: Option<u64>,
    pub include_history: Option<bool>,
}

impl GetProposalOptions {
    pub fn with_globalseq(mut self, globalseq: u64) -> Self {
        self.globalseq = Some(globalseq);
        self
    }

    pub fn with_history(mut self, include_history: bool) -> Self {
        self.include_history = Some(include_history);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProposalHistoryOptions {
    pub status: Option<ProposalStatus>,
    pub page: Page,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListProposalsOptions {
    pub proposer: Option<Name>,
    pub status: Option<ProposalStatus>,
    pub page: Page,
}

impl ListProposalsOptions {
    pub fn with_proposer(mut self, proposer: Name) -> Self {
        self.proposer = Some(proposer);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveProposalsOptions {
    pub page: Page,
    /// Sort key understood by the service, e.g. `"expiration"`.
    pub sort: Option<String>,
}

impl ActiveProposalsOptions {
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApprovalsOptions {
    /// Restrict the timeline to one proposal version.
    pub globalseq: Option<u64>,
    pub page: Page,
}

impl ApprovalsOptions {
    pub fn with_globalseq(mut self, globalseq: u64) -> Self {
        self.globalseq = Some(globalseq);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityOptions {
    pub page: Page,
    pub action_type: Option<ActionKind>,
}

impl ActivityOptions {
    pub fn with_action_type(mut self, action_type: ActionKind) -> Self {
        self.action_type = Some(action_type);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApproverProposalsOptions {
    pub status: Option<ProposalStatus>,
    /// Also list proposals the approver has already approved.
    pub include_approved: Option<bool>,
    pub page: Page,
}

impl ApproverProposalsOptions {
    pub fn with_include_approved(mut self, include_approved: bool) -> Self {
        self.include_approved = Some(include_approved);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    pub status: Option<ProposalStatus>,
    pub page: Page,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebugStatusOptions {
    pub globalseq: Option<u64>,
}

impl DebugStatusOptions {
    pub fn with_globalseq(mut self, globalseq: u64) -> Self {
        self.globalseq = Some(globalseq);
        self
    }
}

macro_rules! status_setter {
    ($($ty:ty),* $(,)?) => {
        $(impl $ty {
            pub fn with_status(mut self, status: ProposalStatus) -> Self {
                self.status = Some(status);
                self
            }
        })*
    };
}

page_setters!(
    ProposalHistoryOptions,
    ListProposalsOptions,
    ActiveProposalsOptions,
    ApprovalsOptions,
    ActivityOptions,
    ApproverProposalsOptions,
    SearchOptions,
);

status_setter!(
    ProposalHistoryOptions,
    ListProposalsOptions,
    ApproverProposalsOptions,
    SearchOptions,
);
