mod grpc_client;
mod peer_api;
mod registry;
#[cfg(test)]
pub(crate) mod test_utils;
pub(crate) mod wire;

pub use grpc_client::ConnectError;
pub use grpc_client::GrpcPeerClient;
pub use peer_api::AcceptReply;
pub use peer_api::AcceptorApi;
pub use peer_api::LearnerApi;
pub use peer_api::PeerError;
pub use peer_api::PeerHandle;
pub use peer_api::PeerRegistry;
pub use peer_api::PrepareReply;
pub use peer_api::StoreUpdate;
pub use registry::GrpcRegistry;
pub use registry::LocalRegistry;
