mod actor;
mod api;
mod cluster;
mod config;
mod node;
mod peer;
mod server;
mod grpc {
    include!("../generated/paxos.rs");
}

pub use api::try_create_paxos_node;
pub use api::MembershipView;
pub use api::PaxosError;
pub use api::PaxosMemberInfo;
pub use api::PaxosNode;
pub use api::PaxosNodeConfig;
pub use api::PaxosNodeCreationError;
pub use api::PaxosOptions;
pub use cluster::ClusterTransport;
pub use cluster::PaxosCluster;
pub use cluster::PaxosClusterConfig;
pub use cluster::PaxosClusterError;
pub use config::ClusterFile;
pub use config::ConfigError;
pub use config::MemberEntry;
pub use node::rejoin_channel;
pub use node::AcceptFaultHook;
pub use node::NodeId;
pub use node::Operation;
pub use node::OperationKind;
pub use node::Phase;
pub use node::ProposalId;
pub use node::RandomAcceptFaults;
pub use node::RejoinRequests;
pub use node::RejoinTrigger;
pub use node::StoreKeyMode;
pub use peer::AcceptReply;
pub use peer::AcceptorApi;
pub use peer::ConnectError;
pub use peer::GrpcPeerClient;
pub use peer::GrpcRegistry;
pub use peer::LearnerApi;
pub use peer::LocalRegistry;
pub use peer::PeerError;
pub use peer::PeerHandle;
pub use peer::PeerRegistry;
pub use peer::PrepareReply;
pub use peer::StoreUpdate;

// Learning 1: `create::{root_mod}` should not have any code. Just `mod` and `pub use` statements.
// Learning 2: All `mod` statements, anywhere, should not be `pub`. Only export `pub` via individual
//             use statements.
