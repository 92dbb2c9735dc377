use crate::actor::WeakActorClient;
use crate::api::PaxosMemberInfo;
use crate::node::acceptor::StaleProposal;
use crate::node::fault::AcceptFaultHook;
use crate::node::leader::LeaderPath;
use crate::node::lifecycle::{StopRequest, StopRequester};
use crate::node::membership::NodeId;
use crate::node::node_api::{AcceptError, AcceptInput, ActorExited, LearnInput, PrepareError, PrepareInput, RegisterError};
use crate::node::operation::Operation;
use crate::node::proposal_id::ProposalId;
use crate::node::proposer::Proposer;
use crate::node::store::StoreKeyMode;
use crate::peer::{AcceptReply, AcceptorApi, LearnerApi, PeerError, PeerRegistry, PrepareReply, StoreUpdate};
use std::sync::Arc;
use tokio::time::Duration;

/// NodeService is the local node as seen through the peer traits. Peers reach it over gRPC (via
/// `RpcServer`) or in-process, and the node's own membership slot points at it too.
pub(crate) struct NodeService {
    pub(crate) logger: slog::Logger,
    pub(crate) my_node_id: NodeId,
    pub(crate) leader_based: bool,
    pub(crate) store_key_mode: StoreKeyMode,
    pub(crate) actor_client: WeakActorClient,
    pub(crate) proposer: Arc<Proposer>,
    pub(crate) leader_path: LeaderPath,
    registry: Arc<dyn PeerRegistry>,
    accept_fault_hook: Option<Arc<dyn AcceptFaultHook>>,
    stop_requester: StopRequester,
}

impl NodeService {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        logger: slog::Logger,
        my_node_id: NodeId,
        leader_based: bool,
        store_key_mode: StoreKeyMode,
        actor_client: WeakActorClient,
        proposer: Arc<Proposer>,
        leader_path: LeaderPath,
        registry: Arc<dyn PeerRegistry>,
        accept_fault_hook: Option<Arc<dyn AcceptFaultHook>>,
        stop_requester: StopRequester,
    ) -> Self {
        NodeService {
            logger,
            my_node_id,
            leader_based,
            store_key_mode,
            actor_client,
            proposer,
            leader_path,
            registry,
            accept_fault_hook,
            stop_requester,
        }
    }

    /// Returns false if the node already stopped.
    pub(crate) fn stop_node(&self, force: bool, delay: Duration) -> bool {
        self.stop_requester.request_stop(StopRequest { force, delay })
    }

    async fn register(&self, member: PaxosMemberInfo, with_learner: bool) -> Result<(), PeerError> {
        let node_id = NodeId::new(member.node_id);
        let handle = self.registry.lookup(&member).await?;
        let actor_client = self.actor_client.upgrade()?;

        actor_client
            .register_acceptor(node_id, handle.acceptor)
            .await
            .map_err(PeerError::from)?;
        if with_learner {
            actor_client
                .register_learner(node_id, handle.learner)
                .await
                .map_err(PeerError::from)?;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl AcceptorApi for NodeService {
    async fn acceptor_id(&self) -> Result<NodeId, PeerError> {
        // A stopped node must fail identity probes even when reached in-process.
        self.actor_client.upgrade()?;
        Ok(self.my_node_id)
    }

    async fn leader_id(&self) -> Result<Option<NodeId>, PeerError> {
        let leader = self.actor_client.upgrade()?.leader_snapshot().await?;
        Ok(leader.map(|l| l.leader_id))
    }

    async fn prepare(&self, proposal_id: ProposalId, operation: Operation) -> Result<PrepareReply, PeerError> {
        let output = self
            .actor_client
            .upgrade()?
            .prepare(PrepareInput { proposal_id, operation })
            .await
            .map_err(|e| match e {
                PrepareError::StaleProposal(stale) => PeerError::from(stale),
                PrepareError::ActorExited => PeerError::from(ActorExited),
            })?;

        Ok(PrepareReply {
            proposal_id: output.proposal_id,
            accepted: output.accepted,
        })
    }

    async fn accept(&self, proposal_id: ProposalId, operation: Operation) -> Result<AcceptReply, PeerError> {
        if let Some(hook) = self.accept_fault_hook.as_ref() {
            if hook.fail_accept() {
                slog::info!(self.logger, "Injected accept failure for {:?}", proposal_id);
                return Err(PeerError::Rejected("Injected accept failure".to_string()));
            }
        }

        let output = self
            .actor_client
            .upgrade()?
            .accept(AcceptInput { proposal_id, operation })
            .await
            .map_err(|e| match e {
                AcceptError::StaleProposal(stale) => PeerError::from(stale),
                AcceptError::ActorExited => PeerError::from(ActorExited),
            })?;

        Ok(AcceptReply {
            proposal_id: output.proposal_id,
            operation: output.operation,
        })
    }

    async fn request_stop(&self, force: bool, delay: Duration) -> Result<(), PeerError> {
        if self.stop_node(force, delay) {
            Ok(())
        } else {
            Err(PeerError::from(ActorExited))
        }
    }

    async fn register_peer(&self, member: PaxosMemberInfo) -> Result<(), PeerError> {
        self.register(member, false).await
    }

    async fn register_peer_pair(&self, member: PaxosMemberInfo) -> Result<(), PeerError> {
        self.register(member, true).await
    }
}

#[async_trait::async_trait]
impl LearnerApi for NodeService {
    async fn learner_id(&self) -> Result<NodeId, PeerError> {
        self.actor_client.upgrade()?;
        Ok(self.my_node_id)
    }

    async fn learn(&self, proposal_id: ProposalId, operation: Operation) -> Result<(), PeerError> {
        self.actor_client
            .upgrade()?
            .learn(LearnInput { proposal_id, operation })
            .await?;
        Ok(())
    }

    async fn log_state(&self) -> Result<(), PeerError> {
        self.actor_client.upgrade()?.log_state("logState".to_string()).await?;
        Ok(())
    }

    async fn update_store(&self, update: StoreUpdate) -> Result<(), PeerError> {
        self.actor_client.upgrade()?.update_store(update).await?;
        Ok(())
    }

    async fn leader_update(&self, update: StoreUpdate) -> Result<(), PeerError> {
        self.leader_path.apply_and_broadcast(update).await?;
        Ok(())
    }

    async fn register_learner(&self, member: PaxosMemberInfo) -> Result<(), PeerError> {
        let node_id = NodeId::new(member.node_id);
        let handle = self.registry.lookup(&member).await?;
        self.actor_client
            .upgrade()?
            .register_learner(node_id, handle.learner)
            .await
            .map_err(PeerError::from)
    }
}

// ------- Conversions --------

impl From<ActorExited> for PeerError {
    fn from(_: ActorExited) -> Self {
        PeerError::Unreachable("Node has stopped".to_string())
    }
}

impl From<StaleProposal> for PeerError {
    fn from(stale: StaleProposal) -> Self {
        PeerError::StaleProposal {
            proposal_id: stale.proposal_id,
            last_prepared: stale.last_prepared,
        }
    }
}

impl From<RegisterError> for PeerError {
    fn from(e: RegisterError) -> Self {
        match e {
            RegisterError::Membership(e) => PeerError::Rejected(e.to_string()),
            RegisterError::ActorExited => PeerError::from(ActorExited),
        }
    }
}
