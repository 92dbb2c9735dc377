use crate::node::NodeId;
use chrono::Utc;
use std::fmt;
use std::sync::Mutex;

/// ProposalId totally orders proposals for fencing. It is the wall clock millis with the
/// proposer's node id appended in decimal, so ids from different nodes almost never collide.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProposalId(u64);

impl ProposalId {
    pub fn new(id: u64) -> Self {
        ProposalId(id)
    }

    /// Nothing prepared or accepted yet.
    pub fn zero() -> Self {
        ProposalId(0)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    fn compose(millis: u64, node_id: NodeId) -> Self {
        let node_id = node_id.as_usize() as u64;
        let mut shift: u64 = 10;
        while shift <= node_id {
            shift = shift.saturating_mul(10);
        }

        ProposalId(millis.saturating_mul(shift).saturating_add(node_id))
    }
}

impl fmt::Debug for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub(crate) struct ProposalIdGenerator {
    node_id: NodeId,
    last_millis: Mutex<u64>,
}

impl ProposalIdGenerator {
    pub(crate) fn new(node_id: NodeId) -> Self {
        ProposalIdGenerator {
            node_id,
            last_millis: Mutex::new(0),
        }
    }

    /// Strictly increasing per node, even when called twice within the same millisecond.
    pub(crate) fn next(&self) -> ProposalId {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        self.next_at(now)
    }

    fn next_at(&self, now_millis: u64) -> ProposalId {
        let mut last = self
            .last_millis
            .lock()
            .expect("ProposalIdGenerator.next() mutex guard poison");
        let millis = if now_millis > *last { now_millis } else { *last + 1 };
        *last = millis;

        ProposalId::compose(millis, self.node_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_appends_node_id_digits() {
        assert_eq!(ProposalId::compose(1234, NodeId::new(0)).as_u64(), 12340);
        assert_eq!(ProposalId::compose(1234, NodeId::new(7)).as_u64(), 12347);
        assert_eq!(ProposalId::compose(1234, NodeId::new(12)).as_u64(), 123412);
        assert_eq!(ProposalId::compose(1234, NodeId::new(100)).as_u64(), 1234100);
    }

    #[test]
    fn same_millis_breaks_ties_by_node() {
        let a = ProposalIdGenerator::new(NodeId::new(1)).next_at(5000);
        let b = ProposalIdGenerator::new(NodeId::new(2)).next_at(5000);
        assert!(a < b);
    }

    #[test]
    fn generator_is_strictly_increasing() {
        let generator = ProposalIdGenerator::new(NodeId::new(3));
        let first = generator.next_at(5000);
        let second = generator.next_at(5000);
        let third = generator.next_at(4000);
        let fourth = generator.next();

        assert!(first < second);
        assert!(second < third);
        assert!(third < fourth);
    }
}
