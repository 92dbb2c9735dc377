//! This mod is meant to hold most of the code for the library's client-facing API.
mod client;
mod error;
mod options;
mod types;
mod wiring;

pub use client::PaxosNode;
pub use error::PaxosError;
pub use options::PaxosOptions;
pub use types::MembershipView;
pub use types::PaxosMemberInfo;
pub use wiring::try_create_paxos_node;
pub use wiring::PaxosNodeConfig;
pub use wiring::PaxosNodeCreationError;

pub(crate) use options::PaxosOptionsValidated;
pub(crate) use wiring::lowest_member_id;
