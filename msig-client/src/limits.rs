/// Ceiling for proposal listings used when the service does not report one.
pub const DEFAULT_MAX_PROPOSAL_RESULTS: u32 = 20;
/// Ceiling for approval timelines used when the service does not report one.
pub const DEFAULT_MAX_APPROVAL_RESULTS: u32 = 100;

/// Result-size ceilings supplied by the caller.
///
/// Any value left as `None` is discovered from the service status endpoint on
/// first use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientLimits {
    pub max_proposal_limit: Option<u32>,
    pub max_approval_limit: Option<u32>,
}

impl ClientLimits {
    pub fn with_max_proposal_limit(mut self, limit: u32) -> Self {
        self.max_proposal_limit = Some(limit);
        self
    }

    pub fn with_max_approval_limit(mut self, limit: u32) -> Self {
        self.max_approval_limit = Some(limit);
        self
    }

    /// Both ceilings are known, so no discovery is needed.
    pub fn is_complete(&self) -> bool {
        self.max_proposal_limit.is_some() && self.max_approval_limit.is_some()
    }

    /// Fills the ceilings that are still unknown, keeping the supplied ones.
    pub(crate) fn resolve_with(&self, proposal: u32, approval: u32) -> ResolvedLimits {
        ResolvedLimits {
            proposal: self.max_proposal_limit.unwrap_or(proposal),
            approval: self.max_approval_limit.unwrap_or(approval),
        }
    }
}

/// Ceilings in force once discovery is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLimits {
    pub proposal: u32,
    pub approval: u32,
}

/// Which ceiling applies to an operation's `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    Proposal,
    Approval,
}

impl ResolvedLimits {
    pub fn ceiling(&self, kind: LimitKind) -> u32 {
        match kind {
            LimitKind::Proposal => self.proposal,
            LimitKind::Approval => self.approval,
        }
    }
}

/// Lifecycle of the client's ceilings. Moves from `Uninitialized` to
/// `Resolved` once and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitState {
    Uninitialized,
    Resolved(ResolvedLimits),
}

impl LimitState {
    /// Initial state for the supplied limits: already resolved when nothing
    /// is left to discover.
    pub fn from_configured(limits: &ClientLimits) -> Self {
        match (limits.max_proposal_limit, limits.max_approval_limit) {
            (Some(proposal), Some(approval)) => {
                LimitState::Resolved(ResolvedLimits { proposal, approval })
            }
            _ => LimitState::Uninitialized,
        }
    }

    pub fn resolved(&self) -> Option<ResolvedLimits> {
        match self {
            LimitState::Uninitialized => None,
            LimitState::Resolved(limits) => Some(*limits),
        }
    }
}
