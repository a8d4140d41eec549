//! Response shapes returned by the indexing service.
//!
//! Values are trusted as the service reports them; nothing here is recomputed
//! on the client side. Account and proposal names are kept as plain strings
//! exactly as sent, unlike the validated [`Name`](crate::Name) used in requests.

use crate::limits::{DEFAULT_MAX_APPROVAL_RESULTS, DEFAULT_MAX_PROPOSAL_RESULTS};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Lifecycle status of a proposal version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Proposed,
    Executed,
    Cancelled,
    Expired,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Proposed => "proposed",
            ProposalStatus::Executed => "executed",
            ProposalStatus::Cancelled => "cancelled",
            ProposalStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of action recorded in an activity or approval timeline.
///
/// Kinds this client does not know are kept verbatim in `Other`, so they
/// survive a round trip and can be sent back as a filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    Propose,
    Approve,
    Unapprove,
    Cancel,
    Exec,
    Invalidate,
    Other(String),
}

impl ActionKind {
    pub fn as_str(&self) -> &str {
        match self {
            ActionKind::Propose => "propose",
            ActionKind::Approve => "approve",
            ActionKind::Unapprove => "unapprove",
            ActionKind::Cancel => "cancel",
            ActionKind::Exec => "exec",
            ActionKind::Invalidate => "invalidate",
            ActionKind::Other(kind) => kind.as_str(),
        }
    }
}

impl From<String> for ActionKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "propose" => ActionKind::Propose,
            "approve" => ActionKind::Approve,
            "unapprove" => ActionKind::Unapprove,
            "cancel" => ActionKind::Cancel,
            "exec" => ActionKind::Exec,
            "invalidate" => ActionKind::Invalidate,
            _ => ActionKind::Other(kind),
        }
    }
}

impl From<ActionKind> for String {
    fn from(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An `actor@permission` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionLevel {
    pub actor: String,
    pub permission: String,
}

/// An approval that has been given, with the time it was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvidedApproval {
    pub actor: String,
    pub permission: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalsSummary {
    #[serde(deserialize_with = "de_u64")]
    pub requested: u64,
    #[serde(deserialize_with = "de_u64")]
    pub provided: u64,
    /// Provided over requested, as reported by the service.
    pub ratio: f64,
}

/// Where and when a proposal was executed or cancelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    pub timestamp: String,
    #[serde(deserialize_with = "de_u64")]
    pub block_num: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trx_id: Option<String>,
}

/// One version of a multisig proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub proposer: String,
    pub proposal_name: String,
    pub status: ProposalStatus,
    pub created_at: String,
    #[serde(deserialize_with = "de_u64")]
    pub created_block: u64,
    pub created_trx: String,
    /// Sequence number assigned when this version was indexed; identifies the version.
    #[serde(deserialize_with = "de_u64")]
    pub globalseq: u64,
    pub expiration: String,
    pub action_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_approvals: Option<Vec<PermissionLevel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provided_approvals: Option<Vec<ProvidedApproval>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approvals_summary: Option<ApprovalsSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executed: Option<ResolutionInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled: Option<ResolutionInfo>,
}

/// A single entry of an account activity feed or approval timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub action: ActionKind,
    pub actor: String,
    pub permission: String,
    pub timestamp: String,
    #[serde(deserialize_with = "de_u64")]
    pub block_num: u64,
    #[serde(deserialize_with = "de_u64")]
    pub globalseq: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposal_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trx_id: Option<String>,
}

/// List responses that report a total and whether more pages exist.
pub trait Paginated {
    fn total(&self) -> u64;
    fn more(&self) -> bool;
}

macro_rules! impl_paginated {
    ($($ty:ty),* $(,)?) => {
        $(impl Paginated for $ty {
            fn total(&self) -> u64 {
                self.total
            }
            fn more(&self) -> bool {
                self.more
            }
        })*
    };
}

/// Response of `get_proposal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetProposalResponse {
    pub proposal: Proposal,
    /// Earlier versions, only present when history was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<Proposal>>,
}

/// Response of `get_proposal_history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalHistoryResponse {
    pub proposer: String,
    pub proposal_name: String,
    pub versions: Vec<Proposal>,
    #[serde(deserialize_with = "de_u64")]
    pub total: u64,
    pub more: bool,
}

/// Response of the proposal list operations (`get_proposals`, `get_active`,
/// `get_approver_proposals` and `search_proposals`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalsResponse {
    pub proposals: Vec<Proposal>,
    #[serde(deserialize_with = "de_u64")]
    pub total: u64,
    pub more: bool,
}

/// Response of `get_approvals`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalsResponse {
    pub proposer: String,
    pub proposal_name: String,
    pub approvals: Vec<ActivityEntry>,
    #[serde(deserialize_with = "de_u64")]
    pub total: u64,
    pub more: bool,
}

/// Response of `get_activity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityResponse {
    pub account: String,
    pub activities: Vec<ActivityEntry>,
    #[serde(deserialize_with = "de_u64")]
    pub total: u64,
    pub more: bool,
}

impl_paginated!(
    ProposalHistoryResponse,
    ProposalsResponse,
    ApprovalsResponse,
    ActivityResponse,
);

/// Indexer sync state and the result ceilings it enforces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<String>,
    #[serde(default, deserialize_with = "de_u64")]
    pub head_block: u64,
    #[serde(default, deserialize_with = "de_u64")]
    pub last_indexed_block: u64,
    #[serde(default)]
    pub is_synced: bool,
    #[serde(default = "default_max_proposal_results")]
    pub max_proposal_results: u32,
    #[serde(default = "default_max_approval_results")]
    pub max_approval_results: u32,
}

fn default_max_proposal_results() -> u32 {
    DEFAULT_MAX_PROPOSAL_RESULTS
}

fn default_max_approval_results() -> u32 {
    DEFAULT_MAX_APPROVAL_RESULTS
}

/// Diagnostic view of how the service computed a proposal's status.
///
/// The layout of the diagnostic fields is not stable, so everything beyond
/// the identifiers is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalStatusDebug {
    pub proposer: String,
    pub proposal_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed_status: Option<ProposalStatus>,
    #[serde(flatten)]
    pub details: HashMap<String, serde_json::Value>,
}

/// Accepts 64-bit integers sent either as JSON numbers or decimal strings.
fn de_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.parse().map_err(serde::de::Error::custom),
    }
}
