use crate::node::operation::Operation;
use crate::node::proposal_id::ProposalId;
use std::collections::HashMap;

/// AcceptorState holds one consensus slot per key: the latest accepted operation. The prepare
/// watermark is shared across keys and only ever increases.
pub(crate) struct AcceptorState {
    last_prepared: ProposalId,
    accepted: HashMap<String, Operation>,
}

#[derive(Debug, Clone)]
pub(crate) struct Promise {
    pub(crate) proposal_id: ProposalId,
    pub(crate) accepted: Option<Operation>,
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("Proposal {proposal_id:?} is stale, already prepared {last_prepared:?}")]
pub(crate) struct StaleProposal {
    pub(crate) proposal_id: ProposalId,
    pub(crate) last_prepared: ProposalId,
}

impl AcceptorState {
    pub(crate) fn new() -> Self {
        AcceptorState {
            last_prepared: ProposalId::zero(),
            accepted: HashMap::new(),
        }
    }

    pub(crate) fn last_prepared(&self) -> ProposalId {
        self.last_prepared
    }

    /// Promise to ignore anything older than `proposal_id`, iff it is newer than every proposal
    /// prepared so far. Returns the operation previously accepted for the same key, if any.
    pub(crate) fn prepare(&mut self, proposal_id: ProposalId, operation: &Operation) -> Result<Promise, StaleProposal> {
        if proposal_id <= self.last_prepared {
            return Err(self.stale(proposal_id));
        }

        self.last_prepared = proposal_id;
        Ok(Promise {
            proposal_id,
            accepted: self.accepted.get(&operation.key).cloned(),
        })
    }

    /// Record `operation` as the accepted value of its key, unless a newer proposal has been
    /// prepared since.
    pub(crate) fn accept(&mut self, proposal_id: ProposalId, mut operation: Operation) -> Result<Operation, StaleProposal> {
        if proposal_id < self.last_prepared {
            return Err(self.stale(proposal_id));
        }

        operation.proposal_id = proposal_id;
        self.accepted.insert(operation.key.clone(), operation.clone());
        Ok(operation)
    }

    fn stale(&self, proposal_id: ProposalId) -> StaleProposal {
        StaleProposal {
            proposal_id,
            last_prepared: self.last_prepared,
        }
    }
}
