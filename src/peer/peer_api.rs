use crate::api::PaxosMemberInfo;
use crate::node::{NodeId, Operation, OperationKind, ProposalId};
use std::sync::Arc;
use tokio::time::Duration;

/// AcceptorApi is the acceptor role of one node, as seen by its peers. Implemented in-process by
/// the node itself and over gRPC by `GrpcPeerClient`.
#[async_trait::async_trait]
pub trait AcceptorApi: Send + Sync {
    /// Identity probe used by the liveness and election monitors.
    async fn acceptor_id(&self) -> Result<NodeId, PeerError>;

    async fn leader_id(&self) -> Result<Option<NodeId>, PeerError>;

    async fn prepare(&self, proposal_id: ProposalId, operation: Operation) -> Result<PrepareReply, PeerError>;

    async fn accept(&self, proposal_id: ProposalId, operation: Operation) -> Result<AcceptReply, PeerError>;

    async fn request_stop(&self, force: bool, delay: Duration) -> Result<(), PeerError>;

    async fn register_peer(&self, member: PaxosMemberInfo) -> Result<(), PeerError>;

    async fn register_peer_pair(&self, member: PaxosMemberInfo) -> Result<(), PeerError>;
}

/// LearnerApi is the learner role of one node.
#[async_trait::async_trait]
pub trait LearnerApi: Send + Sync {
    async fn learner_id(&self) -> Result<NodeId, PeerError>;

    /// One accept vote for `operation`.
    async fn learn(&self, proposal_id: ProposalId, operation: Operation) -> Result<(), PeerError>;

    async fn log_state(&self) -> Result<(), PeerError>;

    /// Apply directly, without voting.
    async fn update_store(&self, update: StoreUpdate) -> Result<(), PeerError>;

    /// Apply on the leader, then broadcast to every other learner.
    async fn leader_update(&self, update: StoreUpdate) -> Result<(), PeerError>;

    async fn register_learner(&self, member: PaxosMemberInfo) -> Result<(), PeerError>;
}

/// PeerRegistry resolves a member's address into handles for its roles.
#[async_trait::async_trait]
pub trait PeerRegistry: Send + Sync {
    async fn lookup(&self, member: &PaxosMemberInfo) -> Result<PeerHandle, PeerError>;
}

#[derive(Clone)]
pub struct PeerHandle {
    pub acceptor: Arc<dyn AcceptorApi>,
    pub learner: Arc<dyn LearnerApi>,
}

#[derive(Debug, Clone)]
pub struct PrepareReply {
    pub proposal_id: ProposalId,
    /// Previously accepted operation for the same key. It carries the proposal id it was
    /// accepted under.
    pub accepted: Option<Operation>,
}

#[derive(Debug, Clone)]
pub struct AcceptReply {
    pub proposal_id: ProposalId,
    pub operation: Operation,
}

/// StoreUpdate is a mutation on the leader fast path. The key is already a store key.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreUpdate {
    pub kind: OperationKind,
    pub key: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PeerError {
    #[error("Proposal {proposal_id:?} is stale, peer already prepared {last_prepared:?}")]
    StaleProposal {
        proposal_id: ProposalId,
        last_prepared: ProposalId,
    },
    #[error("Peer is unreachable: {0}")]
    Unreachable(String),
    #[error("Peer rejected request: {0}")]
    Rejected(String),
}

// ------- Conversions --------

impl From<Operation> for StoreUpdate {
    fn from(operation: Operation) -> Self {
        StoreUpdate {
            kind: operation.kind,
            key: operation.key,
            value: operation.value,
        }
    }
}
