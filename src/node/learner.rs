use crate::node::membership;
use crate::node::operation::{Operation, TallyKey};
use crate::node::proposal_id::ProposalId;
use std::collections::{HashMap, HashSet, VecDeque};

const APPLIED_PROPOSALS_CAPACITY: usize = 4096;

/// LearnerState counts accept votes by operation content and reports when an operation should be
/// applied to the store.
pub(crate) struct LearnerState {
    tally: HashMap<TallyKey, Tally>,
    applied: AppliedProposals,
}

#[derive(Default)]
struct Tally {
    votes: usize,
    proposal_ids: Vec<ProposalId>,
}

#[derive(Debug, PartialEq)]
pub(crate) enum LearnOutcome {
    Pending { votes: usize, num_servers: usize },
    Apply(Operation),
    AlreadyApplied,
}

impl LearnerState {
    pub(crate) fn new() -> Self {
        LearnerState {
            tally: HashMap::new(),
            applied: AppliedProposals::new(APPLIED_PROPOSALS_CAPACITY),
        }
    }

    pub(crate) fn learn(&mut self, proposal_id: ProposalId, mut operation: Operation, num_servers: usize) -> LearnOutcome {
        if self.applied.contains(proposal_id) {
            return LearnOutcome::AlreadyApplied;
        }

        let key = operation.tally_key();
        let tally = self.tally.entry(key.clone()).or_default();
        tally.votes += 1;
        if !tally.proposal_ids.contains(&proposal_id) {
            tally.proposal_ids.push(proposal_id);
        }

        if !membership::is_majority(tally.votes, num_servers) {
            return LearnOutcome::Pending {
                votes: tally.votes,
                num_servers,
            };
        }

        if let Some(applied) = self.tally.remove(&key) {
            for id in applied.proposal_ids {
                self.applied.insert(id);
            }
        }
        operation.proposal_id = proposal_id;
        LearnOutcome::Apply(operation)
    }

    #[cfg(test)]
    fn pending_entries(&self) -> usize {
        self.tally.len()
    }
}

/// Bounded memory of proposal ids that already made it into the store.
struct AppliedProposals {
    capacity: usize,
    ids: HashSet<ProposalId>,
    order: VecDeque<ProposalId>,
}

impl AppliedProposals {
    fn new(capacity: usize) -> Self {
        AppliedProposals {
            capacity,
            ids: HashSet::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    fn contains(&self, proposal_id: ProposalId) -> bool {
        self.ids.contains(&proposal_id)
    }

    fn insert(&mut self, proposal_id: ProposalId) {
        if !self.ids.insert(proposal_id) {
            return;
        }
        self.order.push_back(proposal_id);
        if self.order.len() > self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.ids.remove(&evicted);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(id: u64) -> ProposalId {
        ProposalId::new(id)
    }

    #[test]
    fn applies_once_majority_is_reached() {
        let mut learner = LearnerState::new();
        let op = Operation::put("k", "v", "me");

        assert_eq!(
            learner.learn(pid(10), op.clone(), 3),
            LearnOutcome::Pending {
                votes: 1,
                num_servers: 3
            }
        );
        match learner.learn(pid(10), op.clone(), 3) {
            LearnOutcome::Apply(applied) => {
                assert_eq!(applied.value.as_deref(), Some("v"));
                assert_eq!(applied.proposal_id, pid(10));
            }
            other => panic!("Expected apply, got {:?}", other),
        }

        // Third acceptor's vote arrives late. It must not seed a new tally entry.
        assert_eq!(learner.learn(pid(10), op, 3), LearnOutcome::AlreadyApplied);
        assert_eq!(learner.pending_entries(), 0);
    }

    #[test]
    fn duplicate_delivery_never_reapplies() {
        let mut learner = LearnerState::new();
        let op = Operation::delete("k", "me");

        assert!(matches!(learner.learn(pid(7), op.clone(), 1), LearnOutcome::Apply(_)));
        assert_eq!(learner.learn(pid(7), op.clone(), 1), LearnOutcome::AlreadyApplied);
        assert_eq!(learner.learn(pid(7), op, 1), LearnOutcome::AlreadyApplied);
    }

    #[test]
    fn rounds_with_same_content_share_a_tally() {
        let mut learner = LearnerState::new();

        let first = learner.learn(pid(10), Operation::put("k", "v", "alice"), 4);
        let second = learner.learn(pid(11), Operation::put("k", "v", "bob"), 4);
        assert!(matches!(first, LearnOutcome::Pending { votes: 1, .. }));
        assert!(matches!(second, LearnOutcome::Pending { votes: 2, .. }));
        assert!(matches!(
            learner.learn(pid(11), Operation::put("k", "v", "bob"), 4),
            LearnOutcome::Apply(_)
        ));

        // Both rounds are now considered applied.
        assert_eq!(
            learner.learn(pid(10), Operation::put("k", "v", "alice"), 4),
            LearnOutcome::AlreadyApplied
        );
    }

    #[test]
    fn later_round_with_same_content_applies_again() {
        let mut learner = LearnerState::new();
        let op = Operation::put("k", "v", "me");

        assert!(matches!(learner.learn(pid(10), op.clone(), 1), LearnOutcome::Apply(_)));
        assert!(matches!(learner.learn(pid(20), op, 1), LearnOutcome::Apply(_)));
    }

    #[test]
    fn applied_memory_is_bounded() {
        let mut applied = AppliedProposals::new(2);
        applied.insert(pid(1));
        applied.insert(pid(2));
        applied.insert(pid(3));

        assert!(!applied.contains(pid(1)));
        assert!(applied.contains(pid(2)));
        assert!(applied.contains(pid(3)));
    }
}
