use crate::actor::WeakActorClient;
use crate::node::membership::{self, NodeId};
use crate::node::node_api::ActorExited;
use crate::node::operation::Operation;
use crate::node::proposal_id::{ProposalId, ProposalIdGenerator};
use crate::peer::{AcceptReply, AcceptorApi, PrepareReply};
use std::fmt;
use std::sync::Arc;
use tokio::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Prepare,
    Accept,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Prepare => write!(f, "prepare"),
            Phase::Accept => write!(f, "accept"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ProposeError {
    #[error("Quorum not reached in {phase} phase: {granted} of {required} required")]
    QuorumNotReached {
        phase: Phase,
        granted: usize,
        required: usize,
    },
    #[error("Node actor is dead RIP")]
    ActorExited,
}

/// Proposer drives one round for one operation against a snapshot of the live acceptors. It runs
/// outside the node actor, and reaches the local acceptor through the same interface as every
/// remote one.
pub(crate) struct Proposer {
    logger: slog::Logger,
    ids: ProposalIdGenerator,
    actor_client: WeakActorClient,
    rpc_timeout: Duration,
}

impl Proposer {
    pub(crate) fn new(
        logger: slog::Logger,
        my_node_id: NodeId,
        actor_client: WeakActorClient,
        rpc_timeout: Duration,
    ) -> Self {
        Proposer {
            logger,
            ids: ProposalIdGenerator::new(my_node_id),
            actor_client,
            rpc_timeout,
        }
    }

    /// Returns the committed operation. Its kind and value may differ from the proposed ones if an
    /// acceptor reported a newer accepted operation for the key.
    pub(crate) async fn propose(&self, mut operation: Operation) -> Result<Operation, ProposeError> {
        let proposal_id = self.ids.next();
        let logger = self.logger.new(slog::o!("ProposalId" => proposal_id.as_u64()));
        let membership = self.actor_client.upgrade()?.membership_snapshot().await?;
        let num_servers = membership.num_servers;

        slog::debug!(logger, "Proposing {:?} to {:?}", operation, membership);

        let promises = self.prepare_phase(&logger, proposal_id, &operation, &membership.acceptors).await;
        Self::check_quorum(Phase::Prepare, promises.len(), num_servers)?;

        let mut highest = proposal_id;
        for promise in promises {
            if let Some(accepted) = promise.accepted {
                if accepted.proposal_id > highest {
                    highest = accepted.proposal_id;
                    slog::info!(logger, "Adopting previously accepted {:?}", accepted);
                    operation.kind = accepted.kind;
                    operation.value = accepted.value;
                }
            }
        }

        let accepts = self.accept_phase(&logger, proposal_id, &operation, &membership.acceptors).await;
        Self::check_quorum(Phase::Accept, accepts.len(), num_servers)?;

        operation.proposal_id = proposal_id;
        slog::info!(logger, "Committed {:?} with {}/{} accepts", operation, accepts.len(), num_servers);
        Ok(operation)
    }

    async fn prepare_phase(
        &self,
        logger: &slog::Logger,
        proposal_id: ProposalId,
        operation: &Operation,
        acceptors: &[(NodeId, Arc<dyn AcceptorApi>)],
    ) -> Vec<PrepareReply> {
        let mut calls = Vec::with_capacity(acceptors.len());
        for (acceptor_id, acceptor) in acceptors.iter() {
            let acceptor = acceptor.clone();
            let operation = operation.clone();
            let timeout = self.rpc_timeout;
            let call = tokio::task::spawn(async move {
                tokio::time::timeout(timeout, acceptor.prepare(proposal_id, operation)).await
            });
            calls.push((*acceptor_id, call));
        }

        let mut promises = Vec::with_capacity(calls.len());
        for (acceptor_id, call) in calls {
            match call.await {
                Ok(Ok(Ok(promise))) => promises.push(promise),
                Ok(Ok(Err(e))) => slog::debug!(logger, "Acceptor {:?} refused prepare: {}", acceptor_id, e),
                Ok(Err(_)) => slog::debug!(logger, "Acceptor {:?} timed out on prepare", acceptor_id),
                Err(e) => slog::warn!(logger, "Prepare task for {:?} failed: {}", acceptor_id, e),
            }
        }
        promises
    }

    async fn accept_phase(
        &self,
        logger: &slog::Logger,
        proposal_id: ProposalId,
        operation: &Operation,
        acceptors: &[(NodeId, Arc<dyn AcceptorApi>)],
    ) -> Vec<AcceptReply> {
        let mut calls = Vec::with_capacity(acceptors.len());
        for (acceptor_id, acceptor) in acceptors.iter() {
            let acceptor = acceptor.clone();
            let operation = operation.clone();
            let timeout = self.rpc_timeout;
            let call = tokio::task::spawn(async move {
                tokio::time::timeout(timeout, acceptor.accept(proposal_id, operation)).await
            });
            calls.push((*acceptor_id, call));
        }

        let mut accepts = Vec::with_capacity(calls.len());
        for (acceptor_id, call) in calls {
            match call.await {
                Ok(Ok(Ok(accepted))) => accepts.push(accepted),
                Ok(Ok(Err(e))) => slog::debug!(logger, "Acceptor {:?} refused accept: {}", acceptor_id, e),
                Ok(Err(_)) => slog::debug!(logger, "Acceptor {:?} timed out on accept", acceptor_id),
                Err(e) => slog::warn!(logger, "Accept task for {:?} failed: {}", acceptor_id, e),
            }
        }
        accepts
    }

    fn check_quorum(phase: Phase, granted: usize, num_servers: usize) -> Result<(), ProposeError> {
        if membership::is_majority(granted, num_servers) {
            Ok(())
        } else {
            Err(ProposeError::QuorumNotReached {
                phase,
                granted,
                required: membership::majority_count(num_servers),
            })
        }
    }
}

// ------- Conversions --------

impl From<ActorExited> for ProposeError {
    fn from(_: ActorExited) -> Self {
        ProposeError::ActorExited
    }
}
