use crate::peer::{AcceptorApi, LearnerApi};
use std::fmt;
use std::sync::Arc;

/// NodeId is a node's stable identity and its index into every membership table. A replacement
/// node reuses the id of the node it replaces.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(id: usize) -> Self {
        NodeId(id)
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strictly more than half of the live servers.
pub(crate) fn is_majority(responses: usize, num_servers: usize) -> bool {
    responses > num_servers / 2
}

pub(crate) fn majority_count(num_servers: usize) -> usize {
    (num_servers / 2) + 1
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum MembershipError {
    #[error("Node {0:?} is outside of the configured cluster")]
    SlotOutOfRange(NodeId),
}

/// Membership is a pair of fixed size tables indexed by node id. A `None` slot is a tombstone:
/// the node in that slot is considered dead until a rejoin fills it again.
pub(crate) struct Membership {
    my_node_id: NodeId,
    acceptors: Vec<Option<Arc<dyn AcceptorApi>>>,
    learners: Vec<Option<Arc<dyn LearnerApi>>>,
    num_servers: usize,
}

#[derive(Clone)]
pub(crate) struct MembershipSnapshot {
    pub(crate) num_servers: usize,
    pub(crate) acceptors: Vec<(NodeId, Arc<dyn AcceptorApi>)>,
    pub(crate) learners: Vec<(NodeId, Arc<dyn LearnerApi>)>,
}

impl fmt::Debug for MembershipSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let acceptors: Vec<_> = self.acceptors.iter().map(|(id, _)| *id).collect();
        let learners: Vec<_> = self.learners.iter().map(|(id, _)| *id).collect();
        f.debug_struct("MembershipSnapshot")
            .field("num_servers", &self.num_servers)
            .field("acceptors", &acceptors)
            .field("learners", &learners)
            .finish()
    }
}

impl Membership {
    pub(crate) fn new(
        cluster_size: usize,
        my_node_id: NodeId,
        my_acceptor: Arc<dyn AcceptorApi>,
        my_learner: Arc<dyn LearnerApi>,
    ) -> Result<Self, MembershipError> {
        if my_node_id.as_usize() >= cluster_size {
            return Err(MembershipError::SlotOutOfRange(my_node_id));
        }

        let mut membership = Membership {
            my_node_id,
            acceptors: vec![None; cluster_size],
            learners: vec![None; cluster_size],
            num_servers: 0,
        };
        membership.acceptors[my_node_id.as_usize()] = Some(my_acceptor);
        membership.learners[my_node_id.as_usize()] = Some(my_learner);
        membership.recompute();

        Ok(membership)
    }

    pub(crate) fn num_servers(&self) -> usize {
        self.num_servers
    }

    pub(crate) fn set_acceptor(&mut self, node_id: NodeId, acceptor: Arc<dyn AcceptorApi>) -> Result<(), MembershipError> {
        let slot = self
            .acceptors
            .get_mut(node_id.as_usize())
            .ok_or(MembershipError::SlotOutOfRange(node_id))?;
        *slot = Some(acceptor);
        self.recompute();
        Ok(())
    }

    pub(crate) fn set_learner(&mut self, node_id: NodeId, learner: Arc<dyn LearnerApi>) -> Result<(), MembershipError> {
        let slot = self
            .learners
            .get_mut(node_id.as_usize())
            .ok_or(MembershipError::SlotOutOfRange(node_id))?;
        *slot = Some(learner);
        Ok(())
    }

    /// Returns true if the slot was live before. Our own slot is never tombstoned.
    pub(crate) fn tombstone(&mut self, node_id: NodeId) -> bool {
        if node_id == self.my_node_id {
            return false;
        }

        let index = node_id.as_usize();
        let was_live = matches!(self.acceptors.get(index), Some(Some(_)));
        if let Some(slot) = self.acceptors.get_mut(index) {
            *slot = None;
        }
        if let Some(slot) = self.learners.get_mut(index) {
            *slot = None;
        }
        self.recompute();

        was_live
    }

    pub(crate) fn acceptor(&self, node_id: NodeId) -> Option<Arc<dyn AcceptorApi>> {
        self.acceptors.get(node_id.as_usize()).cloned().flatten()
    }

    pub(crate) fn learner(&self, node_id: NodeId) -> Option<Arc<dyn LearnerApi>> {
        self.learners.get(node_id.as_usize()).cloned().flatten()
    }

    pub(crate) fn live_ids(&self) -> Vec<NodeId> {
        live(&self.acceptors).map(|(id, _)| id).collect()
    }

    pub(crate) fn learners_snapshot(&self) -> Vec<(NodeId, Arc<dyn LearnerApi>)> {
        live(&self.learners).collect()
    }

    pub(crate) fn snapshot(&self) -> MembershipSnapshot {
        MembershipSnapshot {
            num_servers: self.num_servers,
            acceptors: live(&self.acceptors).collect(),
            learners: self.learners_snapshot(),
        }
    }

    fn recompute(&mut self) {
        self.num_servers = self.acceptors.iter().filter(|slot| slot.is_some()).count();
    }
}

fn live<'a, T: ?Sized>(slots: &'a [Option<Arc<T>>]) -> impl Iterator<Item = (NodeId, Arc<T>)> + 'a {
    slots
        .iter()
        .enumerate()
        .filter_map(|(index, slot)| slot.as_ref().map(|handle| (NodeId::new(index), handle.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peer::test_utils::FakePeer;

    fn membership_of(size: usize, me: usize) -> Membership {
        let me_peer = FakePeer::healthy(NodeId::new(me));
        Membership::new(size, NodeId::new(me), me_peer.clone(), me_peer).unwrap()
    }

    #[test]
    fn majority_arithmetic() {
        assert!(!is_majority(0, 1));
        assert!(is_majority(1, 1));
        assert!(!is_majority(1, 2));
        assert!(is_majority(2, 2));
        assert!(!is_majority(1, 3));
        assert!(is_majority(2, 3));
        assert!(!is_majority(2, 4));
        assert!(is_majority(3, 4));
        assert!(is_majority(3, 5));

        for n in 1..10 {
            assert!(is_majority(majority_count(n), n));
            assert!(!is_majority(majority_count(n) - 1, n));
        }
    }

    #[test]
    fn tombstone_and_refill_keep_slot_index() {
        let mut membership = membership_of(3, 0);
        assert_eq!(membership.num_servers(), 1);

        for id in 1..3 {
            let peer = FakePeer::healthy(NodeId::new(id));
            membership.set_acceptor(NodeId::new(id), peer.clone()).unwrap();
            membership.set_learner(NodeId::new(id), peer).unwrap();
        }
        assert_eq!(membership.num_servers(), 3);

        assert!(membership.tombstone(NodeId::new(1)));
        assert!(!membership.tombstone(NodeId::new(1)));
        assert_eq!(membership.num_servers(), 2);
        assert_eq!(membership.live_ids(), vec![NodeId::new(0), NodeId::new(2)]);
        assert!(membership.learner(NodeId::new(1)).is_none());

        let replacement = FakePeer::healthy(NodeId::new(1));
        membership.set_acceptor(NodeId::new(1), replacement).unwrap();
        assert_eq!(membership.num_servers(), 3);
        assert_eq!(membership.live_ids(), vec![NodeId::new(0), NodeId::new(1), NodeId::new(2)]);
    }

    #[test]
    fn own_slot_is_never_tombstoned() {
        let mut membership = membership_of(3, 2);
        assert!(!membership.tombstone(NodeId::new(2)));
        assert_eq!(membership.num_servers(), 1);
        assert!(membership.acceptor(NodeId::new(2)).is_some());
    }

    #[test]
    fn out_of_range_slots_are_rejected() {
        let mut membership = membership_of(2, 0);
        let peer = FakePeer::healthy(NodeId::new(5));
        assert!(membership.set_acceptor(NodeId::new(5), peer.clone()).is_err());
        assert!(membership.set_learner(NodeId::new(5), peer).is_err());
        assert!(!membership.tombstone(NodeId::new(5)));

        let me = FakePeer::healthy(NodeId::new(4));
        assert!(Membership::new(2, NodeId::new(4), me.clone(), me).is_err());
    }
}
