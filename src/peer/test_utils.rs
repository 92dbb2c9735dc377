use crate::api::PaxosMemberInfo;
use crate::node::{NodeId, Operation, ProposalId};
use crate::peer::{AcceptReply, AcceptorApi, LearnerApi, PeerError, PrepareReply, StoreUpdate};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::Duration;

/// FakePeer answers every call from memory. Calls fail with `Unreachable` while it is down.
pub(crate) struct FakePeer {
    node_id: NodeId,
    up: AtomicBool,
    leader: Mutex<Option<NodeId>>,
    accepted: Mutex<Option<Operation>>,
    reject_accepts: AtomicBool,
    accepted_operations: Mutex<Vec<Operation>>,
    learned: Mutex<Vec<(ProposalId, Operation)>>,
    updates: Mutex<Vec<StoreUpdate>>,
}

impl FakePeer {
    pub(crate) fn healthy(node_id: NodeId) -> Arc<Self> {
        Arc::new(FakePeer {
            node_id,
            up: AtomicBool::new(true),
            leader: Mutex::new(None),
            accepted: Mutex::new(None),
            reject_accepts: AtomicBool::new(false),
            accepted_operations: Mutex::new(Vec::new()),
            learned: Mutex::new(Vec::new()),
            updates: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn down(node_id: NodeId) -> Arc<Self> {
        let peer = Self::healthy(node_id);
        peer.set_up(false);
        peer
    }

    pub(crate) fn set_up(&self, up: bool) {
        self.up.store(up, Ordering::SeqCst);
    }

    pub(crate) fn set_leader(&self, leader: Option<NodeId>) {
        *self.leader.lock().unwrap() = leader;
    }

    /// Reported by `prepare` as the previously accepted operation.
    pub(crate) fn set_accepted(&self, accepted: Option<Operation>) {
        *self.accepted.lock().unwrap() = accepted;
    }

    pub(crate) fn reject_accepts(&self, reject: bool) {
        self.reject_accepts.store(reject, Ordering::SeqCst);
    }

    /// Every operation this fake accepted, in order.
    pub(crate) fn accepted_operations(&self) -> Vec<Operation> {
        self.accepted_operations.lock().unwrap().clone()
    }

    pub(crate) fn learned(&self) -> Vec<(ProposalId, Operation)> {
        self.learned.lock().unwrap().clone()
    }

    pub(crate) fn updates(&self) -> Vec<StoreUpdate> {
        self.updates.lock().unwrap().clone()
    }

    fn check_up(&self) -> Result<(), PeerError> {
        if self.up.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(PeerError::Unreachable(format!("fake peer {:?} is down", self.node_id)))
        }
    }
}

#[async_trait::async_trait]
impl AcceptorApi for FakePeer {
    async fn acceptor_id(&self) -> Result<NodeId, PeerError> {
        self.check_up()?;
        Ok(self.node_id)
    }

    async fn leader_id(&self) -> Result<Option<NodeId>, PeerError> {
        self.check_up()?;
        Ok(*self.leader.lock().unwrap())
    }

    async fn prepare(&self, proposal_id: ProposalId, _operation: Operation) -> Result<PrepareReply, PeerError> {
        self.check_up()?;
        Ok(PrepareReply {
            proposal_id,
            accepted: self.accepted.lock().unwrap().clone(),
        })
    }

    async fn accept(&self, proposal_id: ProposalId, mut operation: Operation) -> Result<AcceptReply, PeerError> {
        self.check_up()?;
        if self.reject_accepts.load(Ordering::SeqCst) {
            return Err(PeerError::StaleProposal {
                proposal_id,
                last_prepared: ProposalId::new(u64::MAX),
            });
        }
        operation.proposal_id = proposal_id;
        self.accepted_operations.lock().unwrap().push(operation.clone());
        Ok(AcceptReply { proposal_id, operation })
    }

    async fn request_stop(&self, _force: bool, _delay: Duration) -> Result<(), PeerError> {
        self.check_up()?;
        self.set_up(false);
        Ok(())
    }

    async fn register_peer(&self, _member: PaxosMemberInfo) -> Result<(), PeerError> {
        self.check_up()
    }

    async fn register_peer_pair(&self, _member: PaxosMemberInfo) -> Result<(), PeerError> {
        self.check_up()
    }
}

#[async_trait::async_trait]
impl LearnerApi for FakePeer {
    async fn learner_id(&self) -> Result<NodeId, PeerError> {
        self.check_up()?;
        Ok(self.node_id)
    }

    async fn learn(&self, proposal_id: ProposalId, operation: Operation) -> Result<(), PeerError> {
        self.check_up()?;
        self.learned.lock().unwrap().push((proposal_id, operation));
        Ok(())
    }

    async fn log_state(&self) -> Result<(), PeerError> {
        self.check_up()
    }

    async fn update_store(&self, update: StoreUpdate) -> Result<(), PeerError> {
        self.check_up()?;
        self.updates.lock().unwrap().push(update);
        Ok(())
    }

    async fn leader_update(&self, update: StoreUpdate) -> Result<(), PeerError> {
        self.update_store(update).await
    }

    async fn register_learner(&self, _member: PaxosMemberInfo) -> Result<(), PeerError> {
        self.check_up()
    }
}
