mod acceptor;
mod fault;
mod leader;
mod learn_dispatch;
mod learner;
mod lifecycle;
mod membership;
mod monitors;
mod node_api;
mod node_state;
mod operation;
mod proposal_id;
mod proposer;
mod service;
mod store;
#[cfg(test)]
mod test_utils;

pub use fault::AcceptFaultHook;
pub use fault::RandomAcceptFaults;
pub use membership::NodeId;
pub use monitors::rejoin_channel;
pub use monitors::RejoinRequests;
pub use monitors::RejoinTrigger;
pub use operation::Operation;
pub use operation::OperationKind;
pub use proposal_id::ProposalId;
pub use proposer::Phase;
pub use store::StoreKeyMode;

pub(crate) use leader::{ForwardError, LeaderPath};
pub(crate) use learn_dispatch::create as create_learn_dispatch;
pub(crate) use lifecycle::create as create_lifecycle;
pub(crate) use membership::{Membership, MembershipSnapshot};
pub(crate) use monitors::{probe, stop_signal, ElectionMonitorHandle, LivenessMonitorHandle, StopCheck};
pub(crate) use node_api::{
    AcceptError, AcceptInput, AcceptOutput, ActorExited, LeaderSnapshot, LearnInput, PrepareError, PrepareInput,
    PrepareOutput, RegisterError,
};
pub(crate) use node_state::NodeState;
pub(crate) use proposer::{ProposeError, Proposer};
pub(crate) use service::NodeService;
