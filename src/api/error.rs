use crate::node::{ForwardError, Phase, ProposalId, ProposeError};
use crate::peer::PeerError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaxosError {
    #[error("Requester id is missing")]
    Unauthorized,
    #[error("Key is missing")]
    MissingKey,
    #[error("Proposal {proposal_id:?} is stale, already prepared {last_prepared:?}")]
    StaleProposal {
        proposal_id: ProposalId,
        last_prepared: ProposalId,
    },
    #[error("Quorum not reached in {phase} phase: {granted} of {required} required")]
    QuorumNotReached {
        phase: Phase,
        granted: usize,
        required: usize,
    },
    #[error("Leader update failed after {attempts} attempts")]
    UpdateFailed { attempts: u32 },
    #[error("Peer is unreachable: {0}")]
    PeerUnreachable(String),
    #[error("Peer rejected request: {0}")]
    Rejected(String),
    #[error("Node has stopped")]
    NodeStopped,
}

// ------- Conversions --------

impl From<ProposeError> for PaxosError {
    fn from(e: ProposeError) -> Self {
        match e {
            ProposeError::QuorumNotReached {
                phase,
                granted,
                required,
            } => PaxosError::QuorumNotReached {
                phase,
                granted,
                required,
            },
            ProposeError::ActorExited => PaxosError::NodeStopped,
        }
    }
}

impl From<ForwardError> for PaxosError {
    fn from(e: ForwardError) -> Self {
        match e {
            ForwardError::UpdateFailed { attempts } => PaxosError::UpdateFailed { attempts },
            ForwardError::ActorExited => PaxosError::NodeStopped,
        }
    }
}

impl From<PeerError> for PaxosError {
    fn from(e: PeerError) -> Self {
        match e {
            PeerError::StaleProposal {
                proposal_id,
                last_prepared,
            } => PaxosError::StaleProposal {
                proposal_id,
                last_prepared,
            },
            PeerError::Unreachable(message) => PaxosError::PeerUnreachable(message),
            PeerError::Rejected(message) => PaxosError::Rejected(message),
        }
    }
}

impl From<crate::node::ActorExited> for PaxosError {
    fn from(_: crate::node::ActorExited) -> Self {
        PaxosError::NodeStopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_peer_is_not_reported_as_unreachable() {
        let error = PaxosError::from(PeerError::Rejected("missing operation".to_string()));
        assert_eq!(error, PaxosError::Rejected("missing operation".to_string()));

        let error = PaxosError::from(PeerError::Unreachable("timeout".to_string()));
        assert_eq!(error, PaxosError::PeerUnreachable("timeout".to_string()));
    }
}
