use crate::node::proposal_id::ProposalId;
use crate::node::NodeId;
use std::fmt;

pub(crate) const INTERNAL_REQUESTER: &str = "internal";
pub(crate) const ELECT_KEY: &str = "ELECT";
pub(crate) const LOG_KEY: &str = "logGlobalState";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Put,
    Delete,
    Log,
    Elect,
}

/// Operation is a single mutation driven through a consensus round, or applied directly by the
/// leader fast path.
#[derive(Clone, PartialEq)]
pub struct Operation {
    pub kind: OperationKind,
    pub key: String,
    pub value: Option<String>,
    pub requester_id: String,
    /// Stamped by the acceptor when the operation is accepted. Zero until then.
    pub proposal_id: ProposalId,
}

impl Operation {
    pub fn put(key: impl Into<String>, value: impl Into<String>, requester_id: impl Into<String>) -> Self {
        Operation {
            kind: OperationKind::Put,
            key: key.into(),
            value: Some(value.into()),
            requester_id: requester_id.into(),
            proposal_id: ProposalId::zero(),
        }
    }

    pub fn delete(key: impl Into<String>, requester_id: impl Into<String>) -> Self {
        Operation {
            kind: OperationKind::Delete,
            key: key.into(),
            value: None,
            requester_id: requester_id.into(),
            proposal_id: ProposalId::zero(),
        }
    }

    pub fn log(label: impl Into<String>) -> Self {
        Operation {
            kind: OperationKind::Log,
            key: LOG_KEY.to_string(),
            value: Some(label.into()),
            requester_id: INTERNAL_REQUESTER.to_string(),
            proposal_id: ProposalId::zero(),
        }
    }

    pub fn elect(candidate: NodeId) -> Self {
        Operation {
            kind: OperationKind::Elect,
            key: ELECT_KEY.to_string(),
            value: Some(candidate.as_usize().to_string()),
            requester_id: INTERNAL_REQUESTER.to_string(),
            proposal_id: ProposalId::zero(),
        }
    }

    /// For ELECT operations, the candidate carried as value.
    pub(crate) fn elected_candidate(&self) -> Option<NodeId> {
        if self.kind != OperationKind::Elect {
            return None;
        }
        self.value
            .as_ref()
            .and_then(|v| v.parse::<usize>().ok())
            .map(NodeId::new)
    }

    pub(crate) fn tally_key(&self) -> TallyKey {
        TallyKey {
            key: self.key.clone(),
            value: self.value.clone(),
        }
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}({}={:?}, by '{}', pid={:?})",
            self.kind, self.key, self.value, self.requester_id, self.proposal_id
        )
    }
}

/// Learners count votes by operation content. Two rounds that propose the same key and value
/// land in the same tally entry, whatever their proposal ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct TallyKey {
    key: String,
    value: Option<String>,
}
