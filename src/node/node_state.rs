use crate::node::acceptor::AcceptorState;
use crate::node::learn_dispatch::{LearnNotice, LearnQueue};
use crate::node::learner::{LearnOutcome, LearnerState};
use crate::node::membership::{Membership, MembershipSnapshot, NodeId};
use crate::node::node_api::{
    AcceptError, AcceptInput, AcceptOutput, LeaderSnapshot, LearnInput, PrepareError, PrepareInput, PrepareOutput,
    RegisterError,
};
use crate::node::operation::{Operation, OperationKind};
use crate::node::store::{KvStore, StoreKeyMode};
use crate::peer::{AcceptorApi, LearnerApi, StoreUpdate};
use std::sync::Arc;

/// NodeState is everything a node mutates: acceptor slot per key, learner tally, the store,
/// membership, and the leader. It is owned by the node actor, so every method here runs
/// one at a time.
pub(crate) struct NodeState {
    logger: slog::Logger,
    my_node_id: NodeId,
    store_key_mode: StoreKeyMode,
    acceptor: AcceptorState,
    learner: LearnerState,
    store: KvStore,
    membership: Membership,
    leader: Option<LeaderSnapshot>,
    learn_queue: LearnQueue,
}

impl NodeState {
    pub(crate) fn new(
        logger: slog::Logger,
        my_node_id: NodeId,
        store_key_mode: StoreKeyMode,
        membership: Membership,
        learn_queue: LearnQueue,
    ) -> Self {
        NodeState {
            logger,
            my_node_id,
            store_key_mode,
            acceptor: AcceptorState::new(),
            learner: LearnerState::new(),
            store: KvStore::new(),
            membership,
            leader: None,
            learn_queue,
        }
    }

    pub(crate) fn handle_prepare(&mut self, input: PrepareInput) -> Result<PrepareOutput, PrepareError> {
        match self.acceptor.prepare(input.proposal_id, &input.operation) {
            Ok(promise) => {
                slog::debug!(self.logger, "Promised {:?} for {:?}", promise.proposal_id, input.operation);
                Ok(PrepareOutput {
                    proposal_id: promise.proposal_id,
                    accepted: promise.accepted,
                })
            }
            Err(stale) => {
                slog::info!(self.logger, "Rejecting prepare: {}", stale);
                Err(PrepareError::StaleProposal(stale))
            }
        }
    }

    pub(crate) fn handle_accept(&mut self, input: AcceptInput) -> Result<AcceptOutput, AcceptError> {
        let accepted = match self.acceptor.accept(input.proposal_id, input.operation) {
            Ok(accepted) => accepted,
            Err(stale) => {
                slog::info!(self.logger, "Rejecting accept: {}", stale);
                return Err(AcceptError::StaleProposal(stale));
            }
        };
        slog::debug!(self.logger, "Accepted {:?}", accepted);

        let notice = LearnNotice {
            proposal_id: input.proposal_id,
            operation: accepted.clone(),
            learners: self.membership.learners_snapshot(),
        };
        if !self.learn_queue.enqueue(notice) {
            slog::warn!(self.logger, "Learner notification queue is closed, dropping {:?}", accepted);
        }

        Ok(AcceptOutput {
            proposal_id: input.proposal_id,
            operation: accepted,
        })
    }

    pub(crate) fn handle_learn(&mut self, input: LearnInput) {
        let num_servers = self.membership.num_servers();
        match self.learner.learn(input.proposal_id, input.operation, num_servers) {
            LearnOutcome::Pending { votes, num_servers } => {
                slog::debug!(self.logger, "Tally for {:?} at {}/{}", input.proposal_id, votes, num_servers);
            }
            LearnOutcome::AlreadyApplied => {
                slog::debug!(self.logger, "Ignoring vote for already applied {:?}", input.proposal_id);
            }
            LearnOutcome::Apply(operation) => {
                slog::info!(self.logger, "Learned {:?}", operation);
                self.apply_learned(operation);
            }
        }
    }

    pub(crate) fn handle_update_store(&mut self, update: StoreUpdate) {
        slog::debug!(self.logger, "Direct store update {:?}", update);
        match update.kind {
            OperationKind::Put => match update.value {
                Some(value) => self.store.put(update.key, value),
                None => slog::warn!(self.logger, "Ignoring PUT of '{}' without a value", update.key),
            },
            OperationKind::Delete => {
                self.store.delete(&update.key);
            }
            OperationKind::Log => {
                let label = update.value.unwrap_or(update.key);
                self.log_state(&label);
            }
            OperationKind::Elect => match update.value.as_ref().and_then(|v| v.parse::<usize>().ok()) {
                Some(candidate) => self.install_elected_leader(NodeId::new(candidate)),
                None => slog::warn!(self.logger, "Ignoring ELECT update without a candidate"),
            },
        }
    }

    pub(crate) fn read_store(&self, store_key: &str) -> Option<String> {
        self.store.get(store_key)
    }

    pub(crate) fn register_acceptor(
        &mut self,
        node_id: NodeId,
        acceptor: Arc<dyn AcceptorApi>,
    ) -> Result<(), RegisterError> {
        self.membership.set_acceptor(node_id, acceptor)?;
        slog::info!(
            self.logger,
            "Registered acceptor {:?}, {} live servers",
            node_id,
            self.membership.num_servers()
        );
        self.refresh_leader_if(node_id);
        Ok(())
    }

    pub(crate) fn register_learner(&mut self, node_id: NodeId, learner: Arc<dyn LearnerApi>) -> Result<(), RegisterError> {
        self.membership.set_learner(node_id, learner)?;
        slog::info!(self.logger, "Registered learner {:?}", node_id);
        self.refresh_leader_if(node_id);
        Ok(())
    }

    pub(crate) fn tombstone(&mut self, node_id: NodeId) -> bool {
        let was_live = self.membership.tombstone(node_id);
        if was_live {
            slog::warn!(
                self.logger,
                "Tombstoned node {:?}, {} live servers remain",
                node_id,
                self.membership.num_servers()
            );
        }
        was_live
    }

    pub(crate) fn install_leader(&mut self, leader_id: NodeId) {
        self.leader = Some(LeaderSnapshot {
            leader_id,
            acceptor: self.membership.acceptor(leader_id),
            learner: self.membership.learner(leader_id),
        });
        slog::info!(self.logger, "Leader is now {:?}", leader_id);
    }

    pub(crate) fn leader(&self) -> Option<LeaderSnapshot> {
        self.leader.clone()
    }

    pub(crate) fn membership_snapshot(&self) -> MembershipSnapshot {
        self.membership.snapshot()
    }

    pub(crate) fn log_state(&self, label: &str) {
        slog::info!(
            self.logger,
            "{} -> node {:?}, leader {:?}, live servers {:?}, watermark {:?}, {} entries: {:?}",
            label,
            self.my_node_id,
            self.leader.as_ref().map(|l| l.leader_id),
            self.membership.live_ids(),
            self.acceptor.last_prepared(),
            self.store.len(),
            self.store.snapshot(),
        );
    }

    fn apply_learned(&mut self, operation: Operation) {
        match operation.kind {
            OperationKind::Put | OperationKind::Delete => {
                let store_key = self.store_key_mode.store_key(&operation.requester_id, &operation.key);
                self.handle_update_store(StoreUpdate {
                    kind: operation.kind,
                    key: store_key,
                    value: operation.value,
                });
            }
            OperationKind::Log => {
                let label = operation.value.unwrap_or(operation.key);
                self.log_state(&label);
            }
            OperationKind::Elect => match operation.elected_candidate() {
                Some(candidate) => self.install_elected_leader(candidate),
                None => slog::warn!(self.logger, "Ignoring malformed ELECT {:?}", operation),
            },
        }
    }

    /// The previous leader is tombstoned so we don't flap back to it. Rejoin restores the slot.
    fn install_elected_leader(&mut self, candidate: NodeId) {
        let previous = self.leader.as_ref().map(|l| l.leader_id);
        self.install_leader(candidate);

        if let Some(previous) = previous {
            if previous != candidate {
                self.tombstone(previous);
            }
        }
    }

    fn refresh_leader_if(&mut self, node_id: NodeId) {
        if self.leader.as_ref().map(|l| l.leader_id) == Some(node_id) {
            self.install_leader(node_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::learn_dispatch;
    use crate::node::proposal_id::ProposalId;
    use crate::peer::test_utils::FakePeer;
    use tokio::time::Duration;

    fn state_with_peers(size: usize) -> (NodeState, learn_dispatch::LearnDispatcher) {
        let logger = slog::Logger::root(slog::Discard, slog::o!());
        let me = FakePeer::healthy(NodeId::new(0));
        let mut membership = Membership::new(size, NodeId::new(0), me.clone(), me).unwrap();
        for id in 1..size {
            let peer = FakePeer::healthy(NodeId::new(id));
            membership.set_acceptor(NodeId::new(id), peer.clone()).unwrap();
            membership.set_learner(NodeId::new(id), peer).unwrap();
        }
        let (queue, dispatcher) = learn_dispatch::create(logger.clone(), Duration::from_millis(100));

        let state = NodeState::new(logger, NodeId::new(0), StoreKeyMode::Shared, membership, queue);
        (state, dispatcher)
    }

    fn learn(state: &mut NodeState, id: u64, operation: Operation) {
        state.handle_learn(LearnInput {
            proposal_id: ProposalId::new(id),
            operation,
        });
    }

    #[test]
    fn learned_put_and_delete_reach_the_store() {
        let (mut state, _dispatcher) = state_with_peers(3);

        learn(&mut state, 10, Operation::put("k", "v", "me"));
        assert_eq!(state.read_store("k"), None);
        learn(&mut state, 10, Operation::put("k", "v", "me"));
        assert_eq!(state.read_store("k").as_deref(), Some("v"));

        learn(&mut state, 20, Operation::delete("k", "me"));
        learn(&mut state, 20, Operation::delete("k", "me"));
        assert_eq!(state.read_store("k"), None);
    }

    #[test]
    fn duplicate_learn_cannot_resurrect_a_deleted_key() {
        let (mut state, _dispatcher) = state_with_peers(3);

        for _ in 0..3 {
            learn(&mut state, 10, Operation::put("k", "v", "me"));
        }
        for _ in 0..2 {
            learn(&mut state, 20, Operation::delete("k", "me"));
        }
        assert_eq!(state.read_store("k"), None);

        learn(&mut state, 10, Operation::put("k", "v", "me"));
        learn(&mut state, 10, Operation::put("k", "v", "me"));
        assert_eq!(state.read_store("k"), None);
    }

    #[test]
    fn elect_installs_leader_and_tombstones_previous() {
        let (mut state, _dispatcher) = state_with_peers(3);
        state.install_leader(NodeId::new(1));
        assert!(state.leader().unwrap().learner.is_some());

        learn(&mut state, 10, Operation::elect(NodeId::new(2)));
        learn(&mut state, 10, Operation::elect(NodeId::new(2)));

        let leader = state.leader().unwrap();
        assert_eq!(leader.leader_id, NodeId::new(2));
        assert!(leader.acceptor.is_some());
        assert_eq!(state.membership_snapshot().num_servers, 2);
    }

    #[test]
    fn reelecting_same_leader_keeps_its_slot() {
        let (mut state, _dispatcher) = state_with_peers(3);
        state.install_leader(NodeId::new(1));

        state.handle_update_store(StoreUpdate {
            kind: OperationKind::Elect,
            key: "ELECT".into(),
            value: Some("1".into()),
        });
        assert_eq!(state.membership_snapshot().num_servers, 3);
    }

    #[test]
    fn rejoined_leader_slot_refreshes_cached_handles() {
        let (mut state, _dispatcher) = state_with_peers(3);
        state.install_leader(NodeId::new(1));
        state.tombstone(NodeId::new(1));
        state.install_leader(NodeId::new(1));
        assert!(state.leader().unwrap().acceptor.is_none());

        let replacement = FakePeer::healthy(NodeId::new(1));
        state.register_acceptor(NodeId::new(1), replacement.clone()).unwrap();
        state.register_learner(NodeId::new(1), replacement).unwrap();

        let leader = state.leader().unwrap();
        assert!(leader.acceptor.is_some());
        assert!(leader.learner.is_some());
    }

    #[test]
    fn per_requester_keys_are_isolated() {
        let logger = slog::Logger::root(slog::Discard, slog::o!());
        let me = FakePeer::healthy(NodeId::new(0));
        let membership = Membership::new(1, NodeId::new(0), me.clone(), me).unwrap();
        let (queue, _dispatcher) = learn_dispatch::create(logger.clone(), Duration::from_millis(100));
        let mut state = NodeState::new(logger, NodeId::new(0), StoreKeyMode::PerRequester, membership, queue);

        learn(&mut state, 10, Operation::put("k", "alice-v", "alice"));
        learn(&mut state, 11, Operation::put("k", "bob-v", "bob"));

        assert_eq!(state.read_store("alice$-$k").as_deref(), Some("alice-v"));
        assert_eq!(state.read_store("bob$-$k").as_deref(), Some("bob-v"));
        assert_eq!(state.read_store("k"), None);
    }

    #[tokio::test]
    async fn accept_enqueues_learner_notice() {
        let (mut state, dispatcher) = state_with_peers(2);
        let operation = Operation::put("k", "v", "me");

        state
            .handle_prepare(PrepareInput {
                proposal_id: ProposalId::new(5),
                operation: operation.clone(),
            })
            .unwrap();
        let output = state
            .handle_accept(AcceptInput {
                proposal_id: ProposalId::new(5),
                operation,
            })
            .unwrap();
        assert_eq!(output.operation.proposal_id, ProposalId::new(5));

        assert!(state
            .handle_accept(AcceptInput {
                proposal_id: ProposalId::new(4),
                operation: Operation::put("k", "old", "me"),
            })
            .is_err());

        drop(state);
        dispatcher.run().await;
    }
}
