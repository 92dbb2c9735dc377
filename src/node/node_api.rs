use crate::node::acceptor::StaleProposal;
use crate::node::membership::{MembershipError, NodeId};
use crate::node::operation::Operation;
use crate::node::proposal_id::ProposalId;
use crate::peer::{AcceptorApi, LearnerApi};
use std::sync::Arc;

#[derive(Debug)]
pub(crate) struct PrepareInput {
    pub(crate) proposal_id: ProposalId,
    pub(crate) operation: Operation,
}

#[derive(Debug)]
pub(crate) struct PrepareOutput {
    pub(crate) proposal_id: ProposalId,
    pub(crate) accepted: Option<Operation>,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum PrepareError {
    #[error("Prepare rejected")]
    StaleProposal(StaleProposal),
    #[error("Node actor is dead RIP")]
    ActorExited,
}

#[derive(Debug)]
pub(crate) struct AcceptInput {
    pub(crate) proposal_id: ProposalId,
    pub(crate) operation: Operation,
}

#[derive(Debug)]
pub(crate) struct AcceptOutput {
    pub(crate) proposal_id: ProposalId,
    pub(crate) operation: Operation,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum AcceptError {
    #[error("Accept rejected")]
    StaleProposal(StaleProposal),
    #[error("Node actor is dead RIP")]
    ActorExited,
}

#[derive(Debug)]
pub(crate) struct LearnInput {
    pub(crate) proposal_id: ProposalId,
    pub(crate) operation: Operation,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum RegisterError {
    #[error("Invalid membership slot")]
    Membership(#[from] MembershipError),
    #[error("Node actor is dead RIP")]
    ActorExited,
}

#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("Node actor is dead RIP")]
pub(crate) struct ActorExited;

/// LeaderSnapshot is the leader a node currently believes in, with the handles it cached when
/// the leader was installed. Handles are absent if the leader's slot was a tombstone.
#[derive(Clone)]
pub(crate) struct LeaderSnapshot {
    pub(crate) leader_id: NodeId,
    pub(crate) acceptor: Option<Arc<dyn AcceptorApi>>,
    pub(crate) learner: Option<Arc<dyn LearnerApi>>,
}

// ------- Conversions --------

impl From<ActorExited> for PrepareError {
    fn from(_: ActorExited) -> Self {
        PrepareError::ActorExited
    }
}

impl From<ActorExited> for AcceptError {
    fn from(_: ActorExited) -> Self {
        AcceptError::ActorExited
    }
}

impl From<ActorExited> for RegisterError {
    fn from(_: ActorExited) -> Self {
        RegisterError::ActorExited
    }
}
